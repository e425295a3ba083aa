//! Drives command lines from a script or stdin through a directory tree and
//! reports each outcome as text.

mod report;
mod session;
mod source;

pub use session::Session;
pub use source::{script_source, stdin_source};
