use std::path::PathBuf;

use clap::Parser;

use crate::application::data::LogLevel;
use crate::tree::MissingParentPolicy;

/// In-memory directory tree driven by touch/mkdir/cd/rm/ls commands
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// YAML script whose commands run first. Without one, commands are read from stdin
    pub script: Option<PathBuf>,
    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// What a create does when its parent does not exist. Overrides the script setting
    #[clap(long, short, value_enum)]
    pub missing_parent: Option<MissingParentPolicy>,

    /// Keep reading commands from stdin after the script finishes
    #[clap(long, short)]
    pub interactive: bool,
}
