use derive_more::{Display, IsVariant};

/// Represents the type of a tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IsVariant)]
pub enum NodeKind {
    #[display("file")]
    File,
    #[display("folder")]
    Folder,
}

impl NodeKind {
    /// Maps a creation command onto the kind of node it creates
    pub fn from_command(command: &str) -> Option<Self> {
        match command {
            "touch" => Some(NodeKind::File),
            "mkdir" => Some(NodeKind::Folder),
            _ => None,
        }
    }
}

/// A single element of the tree. Every node owns its children outright, so
/// dropping a node drops its whole subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<V> {
    value: V,
    kind: NodeKind,
    children: Vec<Node<V>>,
}

impl<V> Node<V> {
    pub fn new(value: V, kind: NodeKind) -> Self {
        Self {
            value,
            kind,
            children: Vec::new(),
        }
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn children(&self) -> &[Node<V>] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&Node<V>> {
        self.children.get(index)
    }

    pub(super) fn child_mut(&mut self, index: usize) -> Option<&mut Node<V>> {
        self.children.get_mut(index)
    }

    pub fn can_have_children(&self) -> bool {
        self.kind.is_folder()
    }

    /// Appends `child` and returns its index. Files refuse children and hand
    /// the node back to the caller.
    pub(super) fn add_child(&mut self, child: Node<V>) -> Result<usize, Node<V>> {
        if !self.can_have_children() {
            return Err(child);
        }
        self.children.push(child);
        Ok(self.children.len() - 1)
    }

    pub(super) fn remove_child(&mut self, index: usize) -> Option<Node<V>> {
        (index < self.children.len()).then(|| self.children.remove(index))
    }

    /// Tears the subtree down bottom-up: children before their parent,
    /// siblings left to right. Returns the values in the order they were
    /// destroyed, this node's value last.
    pub fn dismantle(self) -> Vec<V> {
        let mut destroyed = Vec::new();
        let mut stack = vec![(self, false)];

        while let Some((mut node, expanded)) = stack.pop() {
            if expanded {
                destroyed.push(node.value);
                continue;
            }
            let children = std::mem::take(&mut node.children);
            stack.push((node, true));
            stack.extend(children.into_iter().rev().map(|child| (child, false)));
        }

        destroyed
    }
}

#[cfg(test)]
impl<V> Node<V> {
    pub fn file(value: V) -> Self {
        Self::new(value, NodeKind::File)
    }

    pub fn folder(value: V) -> Self {
        Self::new(value, NodeKind::Folder)
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}
