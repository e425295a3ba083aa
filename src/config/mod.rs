mod script;

pub use script::{Script, ScriptLoadError};
