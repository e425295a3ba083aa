use std::fmt::Display;

use snafu::prelude::*;
use tracing::{debug, warn};

use super::error::{
    EmptyTreeSnafu, InsertFailedSnafu, NotAFolderSnafu, NotFoundSnafu, ParentNotFoundSnafu,
};
use super::traversal::{PreOrder, level_order};
use super::{MissingParentPolicy, Node, NodeKind, NodePath, TreeError};

/// An ownership tree of files and folders with a movable current directory.
///
/// The cursor is a [`NodePath`] into the tree. It is only ever set to a
/// folder, and every removal either rewrites it for the new shape of the
/// tree or clears it, so it never refers to a node that is gone. When the
/// cursor is absent the root is the current directory.
#[derive(Debug)]
pub struct DirectoryTree<V> {
    root: Option<Node<V>>,
    cursor: Option<NodePath>,
    missing_parent: MissingParentPolicy,
}

/// What a successful [`DirectoryTree::remove`] took out of the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal<V> {
    /// Values of every destroyed node, children before parents; the removed
    /// node itself is last
    pub destroyed: Vec<V>,
    /// The root was removed and the tree is now empty
    pub cleared_tree: bool,
    /// The current directory was inside the removed subtree and fell back to the root
    pub cursor_reset: bool,
}

/// Immediate children of the current directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing<'a, V> {
    pub directory: &'a V,
    pub entries: Vec<&'a V>,
}

impl<V> Default for DirectoryTree<V> {
    fn default() -> Self {
        Self::with_missing_parent_policy(MissingParentPolicy::default())
    }
}

impl<V> Drop for DirectoryTree<V> {
    fn drop(&mut self) {
        if let Some(root) = self.root.take() {
            root.dismantle();
        }
    }
}

impl<V> DirectoryTree<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_missing_parent_policy(missing_parent: MissingParentPolicy) -> Self {
        Self {
            root: None,
            cursor: None,
            missing_parent,
        }
    }

    pub fn root(&self) -> Option<&Node<V>> {
        self.root.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.pre_order().count()
    }

    /// The explicitly selected current directory, if any
    pub fn cursor(&self) -> Option<&NodePath> {
        self.cursor.as_ref()
    }

    /// The effective current directory: the cursor, or the root when unset
    pub fn current(&self) -> Option<&Node<V>> {
        let root = self.root.as_ref()?;
        match self.cursor() {
            Some(cursor) => self.get(cursor),
            None => Some(root),
        }
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = None;
    }

    pub fn get(&self, path: &NodePath) -> Option<&Node<V>> {
        path.indices()
            .iter()
            .try_fold(self.root.as_ref()?, |node, &index| node.child(index))
    }

    fn get_mut(&mut self, path: &NodePath) -> Option<&mut Node<V>> {
        path.indices()
            .iter()
            .try_fold(self.root.as_mut()?, |node, &index| node.child_mut(index))
    }

    pub fn pre_order(&self) -> PreOrder<'_, V> {
        PreOrder::new(self.root.as_ref())
    }

    /// Node values grouped by depth, root level first
    pub fn level_order(&self) -> Vec<Vec<&V>> {
        level_order(self.root.as_ref())
    }
}

impl<V: PartialEq> DirectoryTree<V> {
    /// Handle of the first node carrying `value`, in pre-order
    pub fn find(&self, value: &V) -> Option<NodePath> {
        self.locate(value).map(|(path, _)| path)
    }

    fn locate(&self, value: &V) -> Option<(NodePath, &Node<V>)> {
        let mut walk = self.pre_order();
        let node = walk.by_ref().find(|node| node.value() == value)?;
        Some((walk.path(), node))
    }
}

impl<V: PartialEq + Display> DirectoryTree<V> {
    /// Parent of the first node carrying `value`. `Ok(None)` means the match
    /// is the root.
    pub fn find_parent(&self, value: &V) -> Result<Option<NodePath>, TreeError> {
        let path = self
            .find(value)
            .with_context(|| NotFoundSnafu {
                value: value.to_string(),
            })?;
        Ok(path.parent())
    }

    /// Adds a node and returns its handle.
    ///
    /// The first node always becomes the root. After that the node goes under
    /// `parent` when given, otherwise under the current directory.
    pub fn create(
        &mut self,
        kind: NodeKind,
        value: V,
        parent: Option<&V>,
    ) -> Result<NodePath, TreeError> {
        if self.root.is_none() {
            debug!("Tree is empty, {} '{}' becomes the root", kind, value);
            self.root = Some(Node::new(value, kind));
            return Ok(NodePath::root());
        }

        let target = self.insertion_target(parent)?;
        let label = value.to_string();
        let target_node = self
            .get_mut(&target)
            .with_context(|| InsertFailedSnafu {
                value: label.clone(),
            })?;

        ensure!(
            target_node.can_have_children(),
            NotAFolderSnafu {
                value: target_node.value().to_string(),
            }
        );

        let index = target_node
            .add_child(Node::new(value, kind))
            .map_err(|_| TreeError::InsertFailed {
                value: label.clone(),
            })?;
        debug!(
            "Added {} '{}' under '{}' at {}",
            kind,
            label,
            target_node.value(),
            target.child(index)
        );

        Ok(target.child(index))
    }

    fn insertion_target(&self, parent: Option<&V>) -> Result<NodePath, TreeError> {
        let Some(parent) = parent else {
            return Ok(self.cursor.clone().unwrap_or_default());
        };

        if let Some(path) = self.find(parent) {
            return Ok(path);
        }

        match self.missing_parent {
            MissingParentPolicy::FallbackToRoot => {
                warn!("Parent '{}' not found, adding under the root instead", parent);
                Ok(NodePath::root())
            }
            MissingParentPolicy::Reject => ParentNotFoundSnafu {
                parent: parent.to_string(),
            }
            .fail(),
        }
    }

    /// Makes the first folder carrying `value` the current directory
    pub fn set_cursor(&mut self, value: &V) -> Result<NodePath, TreeError> {
        ensure!(self.root.is_some(), EmptyTreeSnafu);

        let (path, node) = self.locate(value).with_context(|| NotFoundSnafu {
            value: value.to_string(),
        })?;
        ensure!(
            node.kind().is_folder(),
            NotAFolderSnafu {
                value: value.to_string(),
            }
        );

        debug!("Current directory set to '{}' at {}", value, path);
        self.cursor = Some(path.clone());
        Ok(path)
    }

    /// Detaches the first node carrying `value` together with everything
    /// below it, then destroys the detached subtree bottom-up.
    pub fn remove(&mut self, value: &V) -> Result<Removal<V>, TreeError> {
        ensure!(self.root.is_some(), EmptyTreeSnafu);

        let path = self.find(value).with_context(|| NotFoundSnafu {
            value: value.to_string(),
        })?;

        let (detached, cleared_tree) = match path.split_last() {
            None => (self.root.take().context(EmptyTreeSnafu)?, true),
            Some((parent_path, index)) => {
                // Detach by position so an equal value elsewhere is left alone
                let detached = self
                    .get_mut(&parent_path)
                    .and_then(|parent| parent.remove_child(index))
                    .with_context(|| NotFoundSnafu {
                        value: value.to_string(),
                    })?;
                (detached, false)
            }
        };

        let cursor_reset = match self.cursor.take() {
            Some(cursor) => {
                self.cursor = cursor.after_removal_of(&path);
                self.cursor.is_none()
            }
            None => false,
        };

        let destroyed = detached.dismantle();
        debug!(
            "Removed '{}' at {} ({} nodes destroyed, cursor reset: {})",
            value,
            path,
            destroyed.len(),
            cursor_reset
        );

        Ok(Removal {
            destroyed,
            cleared_tree,
            cursor_reset,
        })
    }

    /// Immediate children of the current directory, in insertion order
    pub fn list_children(&self) -> Result<Listing<'_, V>, TreeError> {
        let directory = self.current().context(EmptyTreeSnafu)?;
        Ok(Listing {
            directory: directory.value(),
            entries: directory.children().iter().map(Node::value).collect(),
        })
    }

    /// Values of the folders leading from the root to the current directory
    pub fn current_path(&self) -> Result<Vec<&V>, TreeError> {
        let mut node = self.root.as_ref().context(EmptyTreeSnafu)?;
        let mut values = vec![node.value()];

        for &index in self.cursor.iter().flat_map(NodePath::indices) {
            node = node.child(index).context(EmptyTreeSnafu)?;
            values.push(node.value());
        }

        Ok(values)
    }
}
