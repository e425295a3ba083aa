use std::collections::VecDeque;

use super::{Node, NodePath};

/// Depth-first pre-order walk: a node before its children, children left to
/// right, each child's subtree finished before its next sibling.
///
/// The walk keeps a single index path for the node it last yielded, so
/// [`PreOrder::path`] is only paid for when a caller asks for it.
#[derive(Debug, Clone)]
pub struct PreOrder<'a, V> {
    start: Option<&'a Node<V>>,
    /// Ancestors of the last yielded node, and that node itself, each with
    /// the index of the next child to visit
    stack: Vec<(&'a Node<V>, usize)>,
    indices: Vec<usize>,
}

impl<'a, V> PreOrder<'a, V> {
    pub(super) fn new(root: Option<&'a Node<V>>) -> Self {
        Self {
            start: root,
            stack: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Handle of the node most recently yielded
    pub fn path(&self) -> NodePath {
        NodePath::from(self.indices.clone())
    }
}

impl<'a, V> Iterator for PreOrder<'a, V> {
    type Item = &'a Node<V>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(root) = self.start.take() {
            self.stack.push((root, 0));
            return Some(root);
        }

        while let Some(top) = self.stack.last_mut() {
            let (node, next_child) = *top;
            if let Some(child) = node.child(next_child) {
                top.1 += 1;
                self.indices.push(next_child);
                self.stack.push((child, 0));
                return Some(child);
            }

            self.stack.pop();
            self.indices.pop();
        }

        None
    }
}

/// Groups node values by depth, breadth first, starting at `root`
pub(super) fn level_order<V>(root: Option<&Node<V>>) -> Vec<Vec<&V>> {
    let mut levels = Vec::new();
    let mut queue: VecDeque<&Node<V>> = root.into_iter().collect();

    while !queue.is_empty() {
        let nodes_at_level = queue.len();
        let mut level = Vec::with_capacity(nodes_at_level);

        for _ in 0..nodes_at_level {
            let Some(node) = queue.pop_front() else {
                break;
            };
            level.push(node.value());
            queue.extend(node.children());
        }

        levels.push(level);
    }

    levels
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node<u32> {
        let mut four = Node::folder(4);
        four.add_child(Node::file(61)).unwrap();
        four.add_child(Node::file(48)).unwrap();
        let mut root = Node::folder(10);
        root.add_child(four).unwrap();
        root.add_child(Node::folder(6)).unwrap();
        root.add_child(Node::file(7)).unwrap();
        root
    }

    #[test]
    fn pre_order_visits_parent_then_children_depth_first() {
        let root = sample();
        let mut walk = PreOrder::new(Some(&root));
        let mut visited = Vec::new();
        while let Some(node) = walk.next() {
            visited.push((walk.path().to_string(), *node.value()));
        }

        assert_eq!(
            visited,
            vec![
                ("/".to_string(), 10),
                ("/0".to_string(), 4),
                ("/0/0".to_string(), 61),
                ("/0/1".to_string(), 48),
                ("/1".to_string(), 6),
                ("/2".to_string(), 7),
            ]
        );
    }

    #[test]
    fn path_tracks_the_last_yielded_node_after_backtracking() {
        let root = sample();
        let mut walk = PreOrder::new(Some(&root));

        let six = walk.by_ref().find(|node| *node.value() == 6);
        assert_eq!(six.map(Node::value), Some(&6));
        assert_eq!(walk.path(), NodePath::from(vec![1]));

        assert_eq!(walk.next().map(Node::value), Some(&7));
        assert_eq!(walk.path(), NodePath::from(vec![2]));
        assert!(walk.next().is_none());
    }

    #[test]
    fn pre_order_of_nothing_is_empty() {
        assert_eq!(PreOrder::<u32>::new(None).count(), 0);
    }

    #[test]
    fn level_order_groups_by_depth() {
        let root = sample();
        assert_eq!(
            level_order(Some(&root)),
            vec![vec![&10], vec![&4, &6, &7], vec![&61, &48]]
        );
        assert!(level_order::<u32>(None).is_empty());
    }
}
