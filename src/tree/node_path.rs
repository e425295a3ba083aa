use std::fmt;

/// Positional handle to a node: the child indices leading from the root to
/// it. The empty path is the root itself.
///
/// A handle does not borrow the tree, so it goes stale when the tree changes
/// shape. Whoever holds one across a removal must pass it through
/// [`NodePath::after_removal_of`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// Splits the path into its parent and the index within that parent.
    /// The root has neither.
    pub fn split_last(&self) -> Option<(NodePath, usize)> {
        let (&last, parent) = self.0.split_last()?;
        Some((Self(parent.to_vec()), last))
    }

    pub fn parent(&self) -> Option<NodePath> {
        self.split_last().map(|(parent, _)| parent)
    }

    /// Whether `self` is `ancestor` or lies somewhere below it.
    pub fn is_within(&self, ancestor: &NodePath) -> bool {
        self.0.starts_with(&ancestor.0)
    }

    /// Rewrites the handle for the tree as it looks after the subtree at
    /// `removed` has been detached. Returns `None` when the handle pointed
    /// into that subtree.
    pub fn after_removal_of(&self, removed: &NodePath) -> Option<NodePath> {
        if self.is_within(removed) {
            return None;
        }

        let Some((removed_parent, removed_index)) = removed.split_last() else {
            // Everything is within the root, handled above
            return None;
        };

        let level = removed_parent.depth();
        let mut indices = self.0.clone();
        if self.depth() > level
            && self.is_within(&removed_parent)
            && indices[level] > removed_index
        {
            indices[level] -= 1;
        }
        Some(Self(indices))
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return write!(f, "/");
        }
        for index in &self.0 {
            write!(f, "/{index}")?;
        }
        Ok(())
    }
}
