use std::str::{FromStr, SplitWhitespace};

use snafu::prelude::*;

use crate::tree::NodeKind;

/// `cd` argument that stands for the root rather than a node name
const ROOT_ALIAS: &str = "/";

/// A single instruction for the directory tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `touch <name> [parent]` or `mkdir <name> [parent]`
    Create {
        kind: NodeKind,
        name: String,
        parent: Option<String>,
    },
    /// `cd <name>`
    ChangeDirectory { name: String },
    /// `cd` or `cd /`
    ChangeToRoot,
    /// `rm <name>`
    Remove { name: String },
    /// `ls` / `list`
    List,
    /// `tree`
    LevelOrder,
    /// `pwd`
    WorkingDirectory,
}

impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();
        let verb = tokens.next().context(EmptySnafu)?;
        let mut args = Arguments { verb, tokens };

        let command = match verb {
            "touch" | "mkdir" => {
                let kind = NodeKind::from_command(verb).context(UnknownCommandSnafu { verb })?;
                let name = args.required("name")?;
                let parent = args.optional();
                Command::Create { kind, name, parent }
            }
            "cd" => match args.optional() {
                Some(name) if name != ROOT_ALIAS => Command::ChangeDirectory { name },
                _ => Command::ChangeToRoot,
            },
            "rm" => Command::Remove {
                name: args.required("name")?,
            },
            "ls" | "list" => Command::List,
            "tree" => Command::LevelOrder,
            "pwd" => Command::WorkingDirectory,
            _ => return UnknownCommandSnafu { verb }.fail(),
        };

        args.finish()?;
        Ok(command)
    }
}

struct Arguments<'a> {
    verb: &'a str,
    tokens: SplitWhitespace<'a>,
}

impl Arguments<'_> {
    fn required(&mut self, argument: &'static str) -> Result<String, CommandParseError> {
        self.optional().context(MissingArgumentSnafu {
            command: self.verb,
            argument,
        })
    }

    fn optional(&mut self) -> Option<String> {
        self.tokens.next().map(str::to_string)
    }

    fn finish(mut self) -> Result<(), CommandParseError> {
        match self.tokens.next() {
            Some(argument) => UnexpectedArgumentSnafu {
                command: self.verb,
                argument,
            }
            .fail(),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum CommandParseError {
    #[snafu(display("Empty command"))]
    Empty,
    #[snafu(display(
        "Unknown command '{}'. Use touch, mkdir, cd, rm, ls, tree or pwd",
        verb
    ))]
    UnknownCommand { verb: String },
    #[snafu(display("'{}' is missing its <{}> argument", command, argument))]
    MissingArgument {
        command: String,
        argument: &'static str,
    },
    #[snafu(display("'{}' got an unexpected argument '{}'", command, argument))]
    UnexpectedArgument { command: String, argument: String },
}
