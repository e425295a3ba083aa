use std::path::PathBuf;

use crate::cli::Cli;
use crate::tree::MissingParentPolicy;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub script: Option<PathBuf>,
    /// Overrides the script's setting when present
    pub missing_parent: Option<MissingParentPolicy>,
    pub interactive: bool,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            script: cli.script,
            missing_parent: cli.missing_parent,
            interactive: cli.interactive,
        }
    }
}
