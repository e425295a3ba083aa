//! In-memory directory tree.
//!
//! Nodes are files or folders; folders own their children and files never
//! have any. The tree tracks a current directory that unparented creates and
//! listings resolve against.

mod directory_tree;
mod error;
mod node;
mod node_path;
mod policy;
mod traversal;

pub use directory_tree::DirectoryTree;
pub use error::TreeError;
pub use node::{Node, NodeKind};
pub use node_path::NodePath;
pub use policy::MissingParentPolicy;
