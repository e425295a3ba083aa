#[allow(clippy::module_inception)]
mod command;
mod dispatcher;

pub use command::{Command, CommandParseError};
pub use dispatcher::{DispatchError, Reply, execute_line};
