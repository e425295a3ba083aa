use std::io;

use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info};

use crate::application::RuntimeConfig;
use crate::config::{Script, ScriptLoadError};
use crate::shell::{Session, script_source, stdin_source};
use crate::tree::DirectoryTree;

const INTERACTIVE_PROMPT: &str = "dirtree> ";

pub struct Application;

impl Application {
    pub async fn run(app_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();

        let script = match &app_config.script {
            Some(path) => Some(Script::read(path).await.context(ScriptSnafu)?),
            None => None,
        };
        debug!("Loaded script: {:?}", script);

        let missing_parent = app_config
            .missing_parent
            .or_else(|| script.as_ref().and_then(|s| s.settings.missing_parent))
            .unwrap_or_default();
        info!("Missing parent policy: {:?}", missing_parent);

        let tree = DirectoryTree::with_missing_parent_policy(missing_parent);
        let mut session = Session::new(tree, io::stdout());

        if let Some(script) = &script {
            info!("Running {} scripted commands", script.commands.len());
            session.set_echo(true);
            session
                .run(script_source(script))
                .await
                .context(OutputSnafu)?;
        }

        if app_config.interactive || script.is_none() {
            info!("Reading commands from stdin");
            session.set_echo(false);
            session.set_prompt(Some(INTERACTIVE_PROMPT.to_string()));
            session.run(stdin_source()).await.context(OutputSnafu)?;
        }

        let summary = session.summary();
        info!(
            "Executed {} commands, {} failed, {} nodes left in the tree",
            summary.executed,
            summary.failed,
            session.tree().len()
        );

        Ok(())
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered while loading the script"))]
    ScriptError { source: ScriptLoadError },
    #[snafu(display("Failed to write command output"))]
    OutputError { source: io::Error },
}
