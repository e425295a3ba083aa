use clap::ValueEnum;

/// What `create` does when it is handed a parent value that no node carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum MissingParentPolicy {
    /// Insert under the root instead, logging a warning
    #[default]
    FallbackToRoot,
    /// Fail with a "parent not found" error
    Reject,
}

impl MissingParentPolicy {
    /// Parses the camelCase spelling used in script settings
    pub fn from_setting(setting: &str) -> Option<Self> {
        match setting {
            "fallbackToRoot" => Some(MissingParentPolicy::FallbackToRoot),
            "reject" => Some(MissingParentPolicy::Reject),
            _ => None,
        }
    }
}
