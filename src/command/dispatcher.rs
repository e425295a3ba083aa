use std::fmt;

use snafu::prelude::*;
use tracing::debug;

use crate::command::{Command, CommandParseError};
use crate::tree::{DirectoryTree, NodeKind, TreeError};

/// Successful result of a command, owning everything needed to report it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Created {
        kind: NodeKind,
        name: String,
        /// `None` when the node became the root
        parent: Option<String>,
    },
    DirectoryChanged {
        name: String,
    },
    /// The current directory went back to the root, named by `root`
    DirectoryReset {
        root: String,
    },
    Removed {
        name: String,
        /// Folder the node was taken out of. `None` for the root
        parent: Option<String>,
        destroyed: usize,
        cleared_tree: bool,
        cursor_reset: bool,
    },
    Listing {
        directory: String,
        entries: Vec<String>,
    },
    Levels(Vec<Vec<String>>),
    WorkingDirectory(Vec<String>),
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Created {
                kind,
                name,
                parent: None,
            } => write!(f, "Created {kind} {name} as the root."),
            Reply::Created {
                kind,
                name,
                parent: Some(parent),
            } => write!(f, "Created {kind} {name} in {parent}."),
            Reply::DirectoryChanged { name } => write!(f, "Current directory set to {name}."),
            Reply::DirectoryReset { root } => {
                write!(f, "Current directory reset to the root {root}.")
            }
            Reply::Removed {
                name,
                cleared_tree: true,
                ..
            } => write!(f, "Root node {name} deleted."),
            Reply::Removed {
                name,
                parent,
                destroyed,
                cursor_reset,
                ..
            } => {
                write!(f, "Node {name} deleted successfully")?;
                if let Some(parent) = parent {
                    write!(f, " from {parent}")?;
                }
                if *destroyed > 1 {
                    write!(f, " along with {} descendants", destroyed - 1)?;
                }
                write!(f, ".")?;
                if *cursor_reset {
                    write!(f, " Current directory reset to the root.")?;
                }
                Ok(())
            }
            Reply::Listing { directory, entries } if entries.is_empty() => {
                write!(f, "Children of node {directory}:\nNo children.")
            }
            Reply::Listing { directory, entries } => {
                write!(f, "Children of node {directory}:\n{}", entries.join(" "))
            }
            Reply::Levels(levels) => {
                let lines: Vec<String> = levels.iter().map(|level| level.join(" ")).collect();
                write!(f, "Tree level display:\n{}", lines.join("\n"))
            }
            Reply::WorkingDirectory(folders) => write!(f, "/{}", folders.join("/")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum DispatchError {
    #[snafu(display("Invalid command: {}", source))]
    InvalidCommand { source: CommandParseError },
    #[snafu(display("{}", source))]
    TreeOperation { source: TreeError },
}

impl Command {
    /// Runs the command against `tree`. A failed command leaves the tree as it was.
    pub fn apply(self, tree: &mut DirectoryTree<String>) -> Result<Reply, TreeError> {
        debug!("Applying {:?}", self);

        match self {
            Command::Create { kind, name, parent } => {
                let path = tree.create(kind, name.clone(), parent.as_ref())?;
                let parent = path
                    .parent()
                    .and_then(|parent| tree.get(&parent))
                    .map(|parent| parent.value().clone());
                Ok(Reply::Created { kind, name, parent })
            }
            Command::ChangeDirectory { name } => {
                tree.set_cursor(&name)?;
                Ok(Reply::DirectoryChanged { name })
            }
            Command::ChangeToRoot => {
                let root = tree.root().ok_or(TreeError::EmptyTree)?.value().clone();
                tree.reset_cursor();
                Ok(Reply::DirectoryReset { root })
            }
            Command::Remove { name } => {
                // Same pre-order match that `remove` detaches
                let parent = tree
                    .find_parent(&name)
                    .ok()
                    .flatten()
                    .and_then(|parent| tree.get(&parent))
                    .map(|parent| parent.value().clone());
                let removal = tree.remove(&name)?;
                Ok(Reply::Removed {
                    name,
                    parent,
                    destroyed: removal.destroyed.len(),
                    cleared_tree: removal.cleared_tree,
                    cursor_reset: removal.cursor_reset,
                })
            }
            Command::List => {
                let listing = tree.list_children()?;
                Ok(Reply::Listing {
                    directory: listing.directory.clone(),
                    entries: listing.entries.into_iter().cloned().collect(),
                })
            }
            Command::LevelOrder => {
                if tree.is_empty() {
                    return Err(TreeError::EmptyTree);
                }
                let levels = tree
                    .level_order()
                    .into_iter()
                    .map(|level| level.into_iter().cloned().collect())
                    .collect();
                Ok(Reply::Levels(levels))
            }
            Command::WorkingDirectory => {
                let folders = tree.current_path()?;
                Ok(Reply::WorkingDirectory(
                    folders.into_iter().cloned().collect(),
                ))
            }
        }
    }
}

/// Parses one line of input and runs it against `tree`
pub fn execute_line(tree: &mut DirectoryTree<String>, line: &str) -> Result<Reply, DispatchError> {
    let command: Command = line.parse().context(InvalidCommandSnafu)?;
    command.apply(tree).context(TreeOperationSnafu)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::MissingParentPolicy;

    fn run(tree: &mut DirectoryTree<String>, lines: &[&str]) -> Vec<Result<Reply, DispatchError>> {
        lines.iter().map(|line| execute_line(tree, line)).collect()
    }

    #[test]
    fn reference_scenario() {
        let mut tree = DirectoryTree::new();
        let outcomes = run(
            &mut tree,
            &[
                "mkdir 10",
                "mkdir 4 10",
                "mkdir 6 10",
                "touch 7 10",
                "touch 2 10",
                "mkdir 5 10",
                "touch 61 4",
                "touch 48 4",
                "cd 4",
                "rm 4",
                "ls",
            ],
        );

        assert!(outcomes.iter().all(Result::is_ok), "{outcomes:?}");
        assert_eq!(
            outcomes[9],
            Ok(Reply::Removed {
                name: "4".into(),
                parent: Some("10".into()),
                destroyed: 3,
                cleared_tree: false,
                cursor_reset: true,
            })
        );
        assert_eq!(
            outcomes[10],
            Ok(Reply::Listing {
                directory: "10".into(),
                entries: vec!["6".into(), "7".into(), "2".into(), "5".into()],
            })
        );
    }

    #[test]
    fn created_reply_names_the_parent() {
        let mut tree = DirectoryTree::new();
        let outcomes = run(&mut tree, &["mkdir home", "cd home", "touch notes"]);

        assert_eq!(
            outcomes[0],
            Ok(Reply::Created {
                kind: NodeKind::Folder,
                name: "home".into(),
                parent: None,
            })
        );
        assert_eq!(
            outcomes[2],
            Ok(Reply::Created {
                kind: NodeKind::File,
                name: "notes".into(),
                parent: Some("home".into()),
            })
        );
    }

    #[test]
    fn failures_are_typed() {
        let mut tree = DirectoryTree::new();
        assert_eq!(
            execute_line(&mut tree, "ls"),
            Err(DispatchError::TreeOperation {
                source: TreeError::EmptyTree
            })
        );

        run(&mut tree, &["mkdir root", "touch file"]);
        assert_eq!(
            execute_line(&mut tree, "touch x file"),
            Err(DispatchError::TreeOperation {
                source: TreeError::NotAFolder {
                    value: "file".into()
                }
            })
        );
        assert_eq!(
            execute_line(&mut tree, "cd nonexistent"),
            Err(DispatchError::TreeOperation {
                source: TreeError::NotFound {
                    value: "nonexistent".into()
                }
            })
        );
        assert!(matches!(
            execute_line(&mut tree, "format c:"),
            Err(DispatchError::InvalidCommand {
                source: CommandParseError::UnknownCommand { .. }
            })
        ));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn reject_policy_surfaces_missing_parent() {
        let mut tree = DirectoryTree::with_missing_parent_policy(MissingParentPolicy::Reject);
        run(&mut tree, &["mkdir root"]);

        let outcome = execute_line(&mut tree, "touch a ghost");
        assert_eq!(
            outcome.map_err(|error| error.to_string()),
            Err("Parent 'ghost' not found".to_string())
        );
    }

    #[test]
    fn level_order_and_working_directory() {
        let mut tree = DirectoryTree::new();
        run(&mut tree, &["mkdir a", "mkdir b", "touch c", "mkdir d b", "cd d"]);

        assert_eq!(
            execute_line(&mut tree, "tree"),
            Ok(Reply::Levels(vec![
                vec!["a".into()],
                vec!["b".into(), "c".into()],
                vec!["d".into()],
            ]))
        );
        assert_eq!(
            execute_line(&mut tree, "pwd"),
            Ok(Reply::WorkingDirectory(vec![
                "a".into(),
                "b".into(),
                "d".into()
            ]))
        );
    }

    #[test]
    fn bare_cd_returns_to_the_root() {
        let mut tree = DirectoryTree::new();
        assert_eq!(
            execute_line(&mut tree, "cd"),
            Err(DispatchError::TreeOperation {
                source: TreeError::EmptyTree
            })
        );

        run(&mut tree, &["mkdir home", "mkdir docs", "cd docs", "touch a"]);
        assert_eq!(
            execute_line(&mut tree, "cd /"),
            Ok(Reply::DirectoryReset {
                root: "home".into()
            })
        );
        assert_eq!(tree.cursor(), None);
        assert_eq!(
            execute_line(&mut tree, "ls"),
            Ok(Reply::Listing {
                directory: "home".into(),
                entries: vec!["docs".into()],
            })
        );

        run(&mut tree, &["cd docs"]);
        assert!(execute_line(&mut tree, "cd").is_ok());
        assert_eq!(
            execute_line(&mut tree, "pwd"),
            Ok(Reply::WorkingDirectory(vec!["home".into()]))
        );
    }

    #[test]
    fn removed_reply_names_the_folder_it_left() {
        let mut tree = DirectoryTree::new();
        assert_eq!(
            execute_line(&mut tree, "rm x"),
            Err(DispatchError::TreeOperation {
                source: TreeError::EmptyTree
            })
        );

        run(&mut tree, &["mkdir root", "mkdir a", "touch x a", "touch x"]);

        assert_eq!(
            execute_line(&mut tree, "rm x"),
            Ok(Reply::Removed {
                name: "x".into(),
                parent: Some("a".into()),
                destroyed: 1,
                cleared_tree: false,
                cursor_reset: false,
            })
        );
        assert_eq!(
            execute_line(&mut tree, "rm x").map(|reply| reply.to_string()),
            Ok("Node x deleted successfully from root.".to_string())
        );
    }

    #[test]
    fn reply_rendering() {
        let removed = Reply::Removed {
            name: "4".into(),
            parent: Some("10".into()),
            destroyed: 3,
            cleared_tree: false,
            cursor_reset: true,
        };
        assert_eq!(
            removed.to_string(),
            "Node 4 deleted successfully from 10 along with 2 descendants. Current directory reset to the root."
        );

        let root_removed = Reply::Removed {
            name: "10".into(),
            parent: None,
            destroyed: 1,
            cleared_tree: true,
            cursor_reset: false,
        };
        assert_eq!(root_removed.to_string(), "Root node 10 deleted.");

        let empty = Reply::Listing {
            directory: "6".into(),
            entries: vec![],
        };
        assert_eq!(empty.to_string(), "Children of node 6:\nNo children.");

        let listing = Reply::Listing {
            directory: "10".into(),
            entries: vec!["7".into(), "2".into()],
        };
        assert_eq!(listing.to_string(), "Children of node 10:\n7 2");

        assert_eq!(
            Reply::WorkingDirectory(vec!["a".into(), "b".into()]).to_string(),
            "/a/b"
        );
    }
}
