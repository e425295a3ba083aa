use std::io::{self, Write};

use futures::{Stream, StreamExt};
use tracing::{debug, info};

use crate::command::{DispatchError, Reply, execute_line};
use crate::shell::report::{write_echo, write_outcome};
use crate::tree::DirectoryTree;

const EXIT_COMMANDS: [&str; 2] = ["exit", "quit"];
const COMMENT_PREFIX: char = '#';

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub executed: usize,
    pub failed: usize,
}

/// What happened to one line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Blank line or comment
    Skipped,
    Executed(Result<Reply, DispatchError>),
    Exit,
}

/// Owns a tree and feeds it command lines, writing a status message for
/// every command. Failed commands are reported and the session carries on.
pub struct Session<W> {
    tree: DirectoryTree<String>,
    output: W,
    summary: SessionSummary,
    echo: bool,
    prompt: Option<String>,
}

impl<W: Write> Session<W> {
    pub fn new(tree: DirectoryTree<String>, output: W) -> Self {
        Self {
            tree,
            output,
            summary: SessionSummary::default(),
            echo: false,
            prompt: None,
        }
    }

    /// Write each command before its outcome
    pub fn set_echo(&mut self, echo: bool) {
        self.echo = echo;
    }

    /// Text written whenever the session waits for the next line
    pub fn set_prompt(&mut self, prompt: Option<String>) {
        self.prompt = prompt;
    }

    pub fn tree(&self) -> &DirectoryTree<String> {
        &self.tree
    }

    pub fn summary(&self) -> SessionSummary {
        self.summary
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Drains `source` until it ends or yields an exit command
    pub async fn run<S>(&mut self, mut source: S) -> io::Result<SessionSummary>
    where
        S: Stream<Item = String> + Unpin,
    {
        loop {
            self.write_prompt()?;
            let Some(line) = source.next().await else {
                debug!("Command source exhausted");
                break;
            };
            if self.run_line(&line)? == LineOutcome::Exit {
                debug!("Exit requested");
                break;
            }
        }

        info!(
            "Session finished: {} commands executed, {} failed",
            self.summary.executed, self.summary.failed
        );
        Ok(self.summary)
    }

    pub fn run_line(&mut self, line: &str) -> io::Result<LineOutcome> {
        let line = line.trim();
        if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
            return Ok(LineOutcome::Skipped);
        }
        if self.echo {
            write_echo(&mut self.output, line)?;
        }
        if EXIT_COMMANDS.contains(&line) {
            return Ok(LineOutcome::Exit);
        }

        let outcome = execute_line(&mut self.tree, line);
        debug!("'{}' -> {:?}", line, outcome);

        self.summary.executed += 1;
        if outcome.is_err() {
            self.summary.failed += 1;
        }
        write_outcome(&mut self.output, &outcome)?;

        Ok(LineOutcome::Executed(outcome))
    }

    fn write_prompt(&mut self) -> io::Result<()> {
        if let Some(prompt) = &self.prompt {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;
        }
        Ok(())
    }
}
