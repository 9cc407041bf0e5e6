use crate::arena::{Arena, Handle};
use crate::error::{Error, Result};
use crate::red_black_tree::node::{Color, Node};
use log::trace;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::mem;

pub struct Tree<T> {
    pub arena: Arena<Node<T>>,
    pub root: Option<Handle>,
}

impl<T> Tree<T> {
    pub fn new(chunk_size: usize) -> Self {
        Tree {
            arena: Arena::new(chunk_size),
            root: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn chunk_size(&self) -> usize {
        self.arena.chunk_size()
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    pub fn is_red(&self, handle: Option<Handle>) -> bool {
        match handle {
            None => false,
            Some(handle) => self.arena[handle].is_red(),
        }
    }

    fn is_right_child(&self, handle: Handle) -> bool {
        match self.arena[handle].parent {
            Some(parent) => self.arena[parent].right == Some(handle),
            None => false,
        }
    }

    pub fn find<V>(&self, value: &V) -> Option<Handle>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = &self.arena[handle];
            curr = match value.cmp(node.data.borrow()) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(handle),
            };
        }
        None
    }

    pub fn min_from(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.arena[handle].left {
            handle = left;
        }
        handle
    }

    pub fn max_from(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.arena[handle].right {
            handle = right;
        }
        handle
    }

    // Attaches `value` as a red leaf. Nothing is allocated when an equal value already exists.
    pub fn insert(&mut self, value: T) -> Result<Handle>
    where
        T: Ord,
    {
        let mut parent = None;
        let mut go_left = false;
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = &self.arena[handle];
            curr = match value.cmp(&node.data) {
                Ordering::Less => {
                    go_left = true;
                    node.left
                },
                Ordering::Greater => {
                    go_left = false;
                    node.right
                },
                Ordering::Equal => return Err(Error::DuplicateValue),
            };
            parent = Some(handle);
        }

        let new_node = self.arena.allocate(Node::new(value, parent));
        match parent {
            None => self.root = Some(new_node),
            Some(parent) if go_left => self.arena[parent].left = Some(new_node),
            Some(parent) => self.arena[parent].right = Some(new_node),
        }

        self.fix_after_insert(new_node);
        if let Some(root) = self.root {
            self.arena[root].color = Color::Black;
        }
        Ok(new_node)
    }

    // Exchanges `child` and `parent` so that `parent` becomes a child of `child`. Colors are left
    // untouched.
    pub fn rotate(&mut self, child: Handle, parent: Handle) -> Result<()> {
        let is_adjacent = self.arena.get(child).and_then(|node| node.parent) == Some(parent)
            && self.arena.get(parent).map_or(false, |node| {
                node.left == Some(child) || node.right == Some(child)
            });
        if !is_adjacent {
            return Err(Error::InvalidRotation);
        }

        let grandparent = self.arena[parent].parent;
        let inner = if self.arena[parent].right == Some(child) {
            trace!("rotating left at {:?}", parent);
            let inner = self.arena[child].left;
            self.arena[parent].right = inner;
            self.arena[child].left = Some(parent);
            inner
        } else {
            trace!("rotating right at {:?}", parent);
            let inner = self.arena[child].right;
            self.arena[parent].left = inner;
            self.arena[child].right = Some(parent);
            inner
        };

        if let Some(inner) = inner {
            self.arena[inner].parent = Some(parent);
        }
        self.arena[parent].parent = Some(child);
        self.arena[child].parent = grandparent;

        match grandparent {
            None => self.root = Some(child),
            Some(grandparent) => {
                let slot = &mut self.arena[grandparent];
                if slot.left == Some(parent) {
                    slot.left = Some(child);
                } else {
                    slot.right = Some(child);
                }
            },
        }
        Ok(())
    }

    // Rotations here always pair a node with its current parent.
    fn fix_after_insert(&mut self, mut node: Handle) {
        loop {
            let parent = match self.arena[node].parent {
                Some(parent) => parent,
                None => {
                    self.arena[node].color = Color::Black;
                    return;
                },
            };

            if !self.arena[node].is_red() || !self.arena[parent].is_red() {
                return;
            }

            // a red parent is never the root once the root has been forced black
            let grandparent = match self.arena[parent].parent {
                Some(grandparent) => grandparent,
                None => {
                    self.arena[parent].color = Color::Black;
                    return;
                },
            };

            let parent_is_right = self.is_right_child(parent);
            let uncle = if parent_is_right {
                self.arena[grandparent].left
            } else {
                self.arena[grandparent].right
            };

            if self.is_red(uncle) {
                trace!("recoloring below {:?}", grandparent);
                self.arena[grandparent].color = Color::Red;
                self.arena[parent].color = Color::Black;
                if let Some(uncle) = uncle {
                    self.arena[uncle].color = Color::Black;
                }
                node = grandparent;
            } else if self.is_right_child(node) != parent_is_right {
                trace!("double rotation at {:?}", grandparent);
                let rotated = self
                    .rotate(node, parent)
                    .and_then(|_| self.rotate(node, grandparent));
                debug_assert!(rotated.is_ok(), "Expected adjacent nodes to rotate.");
                self.arena[node].color = Color::Black;
                self.arena[grandparent].color = Color::Red;
            } else {
                trace!("single rotation at {:?}", grandparent);
                let rotated = self.rotate(parent, grandparent);
                debug_assert!(rotated.is_ok(), "Expected adjacent nodes to rotate.");
                self.arena[parent].color = Color::Black;
                self.arena[grandparent].color = Color::Red;
                node = parent;
            }
        }
    }

    // Points `node`'s parent (or the root) at `replacement` instead of `node`.
    fn replace_node(&mut self, node: Handle, replacement: Option<Handle>) {
        let parent = self.arena[node].parent;
        if let Some(replacement) = replacement {
            self.arena[replacement].parent = parent;
        }
        match parent {
            None => self.root = replacement,
            Some(parent) => {
                let slot = &mut self.arena[parent];
                if slot.right == Some(node) {
                    slot.right = replacement;
                } else {
                    slot.left = replacement;
                }
            },
        }
    }

    fn free_node(&mut self, handle: Handle) -> Result<T> {
        self.arena
            .free(handle)
            .map(|node| node.data)
            .ok_or(Error::MissingValue)
    }

    // Structural removal only: colors are not repaired afterwards.
    pub fn remove<V>(&mut self, value: &V) -> Result<T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let node = self.find(value).ok_or(Error::MissingValue)?;
        let (left, right) = (self.arena[node].left, self.arena[node].right);

        match (left, right) {
            (Some(_), Some(right)) => {
                let successor = self.min_from(right);
                let successor_right = self.arena[successor].right;
                self.replace_node(successor, successor_right);
                let successor_data = self.free_node(successor)?;
                Ok(mem::replace(&mut self.arena[node].data, successor_data))
            },
            (Some(child), None) | (None, Some(child)) => {
                self.replace_node(node, Some(child));
                self.free_node(node)
            },
            (None, None) => {
                self.replace_node(node, None);
                self.free_node(node)
            },
        }
    }

    // Number of black nodes on every path from `handle` down to a leaf, or `None` if two paths
    // disagree.
    pub fn black_height(&self, handle: Option<Handle>) -> Option<usize> {
        let handle = match handle {
            Some(handle) => handle,
            None => return Some(0),
        };
        let node = &self.arena[handle];
        let left = self.black_height(node.left)?;
        let right = self.black_height(node.right)?;
        if left != right {
            return None;
        }
        Some(left + if node.is_red() { 0 } else { 1 })
    }

    pub fn has_red_violation(&self, handle: Option<Handle>) -> bool {
        let handle = match handle {
            Some(handle) => handle,
            None => return false,
        };
        let node = &self.arena[handle];
        if node.is_red() && (self.is_red(node.left) || self.is_red(node.right)) {
            return true;
        }
        self.has_red_violation(node.left) || self.has_red_violation(node.right)
    }

    pub fn has_consistent_links(&self, handle: Option<Handle>, parent: Option<Handle>) -> bool {
        let handle = match handle {
            Some(handle) => handle,
            None => return true,
        };
        let node = &self.arena[handle];
        node.parent == parent
            && self.has_consistent_links(node.left, Some(handle))
            && self.has_consistent_links(node.right, Some(handle))
    }
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Tree {
            arena: Arena::default(),
            root: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Tree;
    use crate::arena::Handle;
    use crate::error::Error;
    use crate::red_black_tree::node::Color;

    fn build(values: &[u32]) -> Tree<u32> {
        let mut tree = Tree::new(16);
        for value in values {
            tree.insert(*value).unwrap();
        }
        tree
    }

    fn handle_of(tree: &Tree<u32>, value: u32) -> Handle {
        tree.find(&value).unwrap()
    }

    fn shape(tree: &Tree<u32>, handle: Option<Handle>) -> String {
        match handle {
            None => String::from("."),
            Some(handle) => {
                let node = &tree.arena[handle];
                format!(
                    "({} {} {})",
                    shape(tree, node.left),
                    node.data,
                    shape(tree, node.right),
                )
            },
        }
    }

    #[test]
    fn test_insert_empty_is_black_root() {
        let tree = build(&[1]);
        let root = tree.root.unwrap();
        assert_eq!(tree.arena[root].color, Color::Black);
        assert_eq!(tree.arena[root].parent, None);
    }

    #[test]
    fn test_insert_duplicate_allocates_nothing() {
        let mut tree = build(&[2, 1, 3]);
        let before = shape(&tree, tree.root);
        assert_eq!(tree.insert(1), Err(Error::DuplicateValue));
        assert_eq!(tree.len(), 3);
        assert_eq!(shape(&tree, tree.root), before);
    }

    #[test]
    fn test_insert_with_rotations_completes() {
        let mut inner = build(&[3, 1]);
        let two = inner.insert(2).unwrap();
        assert_eq!(inner.root, Some(two));
        assert_eq!(shape(&inner, inner.root), "((. 1 .) 2 (. 3 .))");
        assert_eq!(inner.len(), 3);
        assert!(inner.has_consistent_links(inner.root, None));

        let mut outer = build(&[1, 2]);
        outer.insert(3).unwrap();
        assert_eq!(shape(&outer, outer.root), "((. 1 .) 2 (. 3 .))");
        assert_eq!(outer.len(), 3);
        assert_eq!(outer.black_height(outer.root), Some(1));
        assert!(!outer.has_red_violation(outer.root));
    }

    #[test]
    fn test_rotate_left_at_root() {
        let mut tree = Tree::new(16);
        let a = tree.insert(1).unwrap();
        let b = tree.insert(2).unwrap();
        tree.rotate(b, a).unwrap();
        assert_eq!(tree.root, Some(b));
        assert_eq!(tree.arena[b].left, Some(a));
        assert_eq!(tree.arena[a].parent, Some(b));
        assert_eq!(tree.arena[b].parent, None);
        assert_eq!(tree.arena[a].right, None);
    }

    #[test]
    fn test_rotate_moves_inner_subtree() {
        let mut tree = build(&[4, 2, 6, 1, 3, 5, 7]);
        let two = handle_of(&tree, 2);
        let four = handle_of(&tree, 4);
        tree.rotate(two, four).unwrap();
        assert_eq!(shape(&tree, tree.root), "((. 1 .) 2 ((. 3 .) 4 ((. 5 .) 6 (. 7 .))))");
        assert!(tree.has_consistent_links(tree.root, None));
    }

    #[test]
    fn test_rotate_below_right_child_keeps_side() {
        let mut tree = build(&[4, 2, 6, 1, 3, 5, 7]);
        let six = handle_of(&tree, 6);
        let seven = handle_of(&tree, 7);
        tree.rotate(seven, six).unwrap();
        assert_eq!(shape(&tree, tree.root), "(((. 1 .) 2 (. 3 .)) 4 (((. 5 .) 6 .) 7 .))");
        assert!(tree.has_consistent_links(tree.root, None));
    }

    #[test]
    fn test_rotate_is_its_own_inverse() {
        let mut tree = build(&[8, 4, 12, 2, 6, 10, 14, 1, 3, 5, 7]);
        let before = shape(&tree, tree.root);
        let four = handle_of(&tree, 4);
        let six = handle_of(&tree, 6);
        tree.rotate(six, four).unwrap();
        assert_ne!(shape(&tree, tree.root), before);
        tree.rotate(four, six).unwrap();
        assert_eq!(shape(&tree, tree.root), before);
        assert!(tree.has_consistent_links(tree.root, None));
    }

    #[test]
    fn test_rotate_keeps_colors() {
        let mut tree = build(&[2, 1, 3]);
        let one = handle_of(&tree, 1);
        let two = handle_of(&tree, 2);
        tree.rotate(one, two).unwrap();
        assert_eq!(tree.arena[one].color, Color::Red);
        assert_eq!(tree.arena[two].color, Color::Black);
    }

    #[test]
    fn test_rotate_non_adjacent() {
        let mut tree = build(&[4, 2, 6, 1]);
        let one = handle_of(&tree, 1);
        let four = handle_of(&tree, 4);
        let six = handle_of(&tree, 6);
        let before = shape(&tree, tree.root);
        assert_eq!(tree.rotate(one, four), Err(Error::InvalidRotation));
        assert_eq!(tree.rotate(four, six), Err(Error::InvalidRotation));
        assert_eq!(shape(&tree, tree.root), before);
    }

    #[test]
    fn test_insert_ascending_stays_balanced() {
        let tree = build(&(0..1000).collect::<Vec<u32>>());
        assert!(!tree.has_red_violation(tree.root));
        assert!(tree.black_height(tree.root).is_some());
        assert!(tree.has_consistent_links(tree.root, None));
    }

    #[test]
    fn test_remove_two_children_uses_successor() {
        let mut tree = build(&[4, 2, 6, 1, 3, 5, 7]);
        let root = tree.root.unwrap();
        assert_eq!(tree.remove(&4), Ok(4));
        assert_eq!(tree.root, Some(root));
        assert_eq!(tree.arena[root].data, 5);
        assert_eq!(shape(&tree, tree.root), "(((. 1 .) 2 (. 3 .)) 5 (. 6 (. 7 .)))");
        assert!(tree.has_consistent_links(tree.root, None));
    }

    #[test]
    fn test_remove_root_with_single_child() {
        let mut tree = build(&[1, 2]);
        assert_eq!(tree.remove(&1), Ok(1));
        let root = tree.root.unwrap();
        assert_eq!(tree.arena[root].data, 2);
        assert_eq!(tree.arena[root].parent, None);
    }

    #[test]
    fn test_remove_missing() {
        let mut tree = build(&[1]);
        assert_eq!(tree.remove(&2), Err(Error::MissingValue));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_black_height_detects_mismatch() {
        let mut tree = build(&[2, 1, 3]);
        assert_eq!(tree.black_height(tree.root), Some(1));
        let one = handle_of(&tree, 1);
        tree.arena[one].color = Color::Black;
        assert_eq!(tree.black_height(tree.root), None);
    }
}
