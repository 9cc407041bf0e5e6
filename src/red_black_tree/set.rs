use crate::arena::Handle;
use crate::error::{Error, Result};
use crate::red_black_tree::node::Color;
use crate::red_black_tree::tree::Tree;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt::{self, Display};
use std::iter::FromIterator;
use std::vec;

/// An ordered set implemented using a red black tree.
///
/// A red black tree is a self-balancing binary search tree that colors every node red or black
/// so that no red node has a red child and every path from the root down to a leaf crosses the
/// same number of black nodes. Nodes live in an arena and refer to their parent and children
/// through handles.
///
/// Removal detaches nodes without repairing colors, so after a removal the set is still ordered
/// and duplicate-free but may be unbalanced.
///
/// # Examples
///
/// ```
/// use red_black_paths::red_black_tree::RedBlackSet;
///
/// let mut set = RedBlackSet::new();
/// set.insert(0).unwrap();
/// set.insert(3).unwrap();
///
/// assert_eq!(set.len(), 2);
///
/// assert_eq!(set.min(), Some(&0));
/// assert_eq!(set.ceil(&2), Some(&3));
///
/// assert_eq!(set.remove(&0), Ok(0));
/// assert!(set.remove(&1).is_err());
/// ```
pub struct RedBlackSet<T> {
    tree: Tree<T>,
}

impl<T> RedBlackSet<T> {
    /// Constructs a new, empty `RedBlackSet<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_paths::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::new();
    /// assert_eq!(set.chunk_size(), 1024);
    /// ```
    pub fn new() -> Self {
        RedBlackSet {
            tree: Tree::default(),
        }
    }

    /// Constructs a new, empty `RedBlackSet<T>` whose node arena grows `chunk_size` nodes at a
    /// time.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_paths::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::with_chunk_size(64);
    /// assert!(set.is_empty());
    /// ```
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        RedBlackSet {
            tree: Tree::new(chunk_size),
        }
    }

    /// Returns the number of nodes the node arena allocates at a time.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_paths::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::with_chunk_size(64);
    /// assert_eq!(set.chunk_size(), 64);
    /// ```
    pub fn chunk_size(&self) -> usize {
        self.tree.chunk_size()
    }

    /// Inserts a value into the set. Returns `Error::DuplicateValue` and leaves the set untouched
    /// if an equal value is already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_paths::red_black_tree::RedBlackSet;
    /// use red_black_paths::Error;
    ///
    /// let mut set = RedBlackSet::new();
    /// assert_eq!(set.insert(1), Ok(()));
    /// assert!(set.contains(&1));
    /// assert_eq!(set.insert(1), Err(Error::DuplicateValue));
    /// ```
    pub fn insert(&mut self, value: T) -> Result<()>
    where
        T: Ord,
    {
        self.tree.insert(value).map(|_| ())
    }

    /// Inserts a value that may be absent. Returns `Error::NullValue` for `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_paths::red_black_tree::RedBlackSet;
    /// use red_black_paths::Error;
    ///
    /// let mut set = RedBlackSet::new();
    /// assert_eq!(set.insert_nullable(Some(1)), Ok(()));
    /// assert_eq!(set.insert_nullable(None), Err(Error::NullValue));
    /// ```
    pub fn insert_nullable(&mut self, value: Option<T>) -> Result<()>
    where
        T: Ord,
    {
        self.insert(value.ok_or(Error::NullValue)?)
    }

    /// Removes a value from the set and returns it. Returns `Error::MissingValue` if no equal
    /// value is present.
    ///
    /// Colors are not repaired after the node is detached.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_paths::red_black_tree::RedBlackSet;
    /// use red_black_paths::Error;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1).unwrap();
    /// assert_eq!(set.remove(&1), Ok(1));
    /// assert_eq!(set.remove(&1), Err(Error::MissingValue));
    /// ```
    pub fn remove<V>(&mut self, value: &V) -> Result<T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.remove(value)
    }

    /// Removes a value that may be absent. Returns `Error::NullValue` for `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_paths::red_black_tree::RedBlackSet;
    /// use red_black_paths::Error;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1).unwrap();
    /// assert_eq!(set.remove_nullable(Some(&1)), Ok(1));
    /// assert_eq!(set.remove_nullable(None::<&u32>), Err(Error::NullValue));
    /// ```
    pub fn remove_nullable<V>(&mut self, value: Option<&V>) -> Result<T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.remove(value.ok_or(Error::NullValue)?)
    }

    /// Checks if a value exists in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_paths::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1).unwrap();
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains<V>(&self, value: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.find(value).is_some()
    }

    /// Checks if a value that may be absent exists in the set. Returns `Error::NullValue` for
    /// `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_paths::red_black_tree::RedBlackSet;
    /// use red_black_paths::Error;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1).unwrap();
    /// assert_eq!(set.contains_nullable(Some(&1)), Ok(true));
    /// assert_eq!(set.contains_nullable(None::<&u32>), Err(Error::NullValue));
    /// ```
    pub fn contains_nullable<V>(&self, value: Option<&V>) -> Result<bool>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        Ok(self.contains(value.ok_or(Error::NullValue)?))
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_paths::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1).unwrap();
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_paths::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears the set, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_paths::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1).unwrap();
    /// set.insert(2).unwrap();
    /// set.clear();
    /// assert_eq!(set.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns a value in the set that is less than or equal to a particular value. Returns `None`
    /// if such a value does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_paths::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1).unwrap();
    /// assert_eq!(set.floor(&0), None);
    /// assert_eq!(set.floor(&2), Some(&1));
    /// ```
    pub fn floor<V>(&self, value: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut best = None;
        let mut curr = self.tree.root;
        while let Some(handle) = curr {
            let node = &self.tree.arena[handle];
            curr = match value.cmp(node.data.borrow()) {
                Ordering::Less => node.left,
                Ordering::Greater => {
                    best = Some(&node.data);
                    node.right
                },
                Ordering::Equal => return Some(&node.data),
            };
        }
        best
    }

    /// Returns a value in the set that is greater than or equal to a particular value. Returns
    /// `None` if such a value does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_paths::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1).unwrap();
    /// assert_eq!(set.ceil(&0), Some(&1));
    /// assert_eq!(set.ceil(&2), None);
    /// ```
    pub fn ceil<V>(&self, value: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut best = None;
        let mut curr = self.tree.root;
        while let Some(handle) = curr {
            let node = &self.tree.arena[handle];
            curr = match value.cmp(node.data.borrow()) {
                Ordering::Less => {
                    best = Some(&node.data);
                    node.left
                },
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(&node.data),
            };
        }
        best
    }

    /// Returns the minimum value of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_paths::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1).unwrap();
    /// set.insert(3).unwrap();
    /// assert_eq!(set.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        self.tree
            .root
            .map(|root| &self.tree.arena[self.tree.min_from(root)].data)
    }

    /// Returns the maximum value of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_paths::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1).unwrap();
    /// set.insert(3).unwrap();
    /// assert_eq!(set.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        self.tree
            .root
            .map(|root| &self.tree.arena[self.tree.max_from(root)].data)
    }

    /// Returns the color of the root node, or `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_paths::red_black_tree::{Color, RedBlackSet};
    ///
    /// let mut set = RedBlackSet::new();
    /// assert_eq!(set.root_color(), None);
    /// set.insert(1).unwrap();
    /// assert_eq!(set.root_color(), Some(Color::Black));
    /// ```
    pub fn root_color(&self) -> Option<Color> {
        self.tree.root.map(|root| self.tree.arena[root].color)
    }

    /// Returns the color of the node holding `value`, or `None` if the value is not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_paths::red_black_tree::{Color, RedBlackSet};
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(2).unwrap();
    /// set.insert(1).unwrap();
    /// assert_eq!(set.color_of(&2), Some(Color::Black));
    /// assert_eq!(set.color_of(&1), Some(Color::Red));
    /// assert_eq!(set.color_of(&3), None);
    /// ```
    pub fn color_of<V>(&self, value: &V) -> Option<Color>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree
            .find(value)
            .map(|handle| self.tree.arena[handle].color)
    }

    /// Returns the number of black nodes on every path from the root to a leaf. Returns `None`
    /// if two paths disagree, which can only happen after a removal.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_paths::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// assert_eq!(set.black_height(), Some(0));
    /// for value in &[2, 1, 3] {
    ///     set.insert(*value).unwrap();
    /// }
    /// assert_eq!(set.black_height(), Some(1));
    /// ```
    pub fn black_height(&self) -> Option<usize> {
        self.tree.black_height(self.tree.root)
    }

    /// Returns `true` if the set is ordered, has a black root, has no red node with a red child,
    /// has a uniform black height and every parent link matches its child link.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_paths::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// for value in 0..10 {
    ///     set.insert(value).unwrap();
    /// }
    /// assert!(set.is_valid_red_black());
    /// ```
    pub fn is_valid_red_black(&self) -> bool
    where
        T: Ord,
    {
        let is_ordered = self
            .iter()
            .zip(self.iter().skip(1))
            .all(|(prev, next)| prev < next);
        is_ordered
            && self.root_color() != Some(Color::Red)
            && !self.tree.has_red_violation(self.tree.root)
            && self.black_height().is_some()
            && self.tree.has_consistent_links(self.tree.root, None)
    }

    /// Returns an iterator over the set. The iterator will yield values using in-order
    /// traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_paths::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1).unwrap();
    /// set.insert(3).unwrap();
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> RedBlackSetIter<'_, T> {
        RedBlackSetIter {
            tree: &self.tree,
            current: self.tree.root,
            stack: Vec::new(),
        }
    }

    /// Returns an iterator over the set that yields values level by level from the root, left
    /// to right within a level.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_paths::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// for value in &[2, 1, 3] {
    ///     set.insert(*value).unwrap();
    /// }
    /// assert_eq!(set.level_order().collect::<Vec<&u32>>(), vec![&2, &1, &3]);
    /// ```
    pub fn level_order(&self) -> RedBlackSetLevelIter<'_, T> {
        RedBlackSetLevelIter {
            tree: &self.tree,
            queue: self.tree.root.into_iter().collect(),
        }
    }

    /// Renders the in-order traversal as `[ a, b, c ]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_paths::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// for value in &[2, 3, 1] {
    ///     set.insert(*value).unwrap();
    /// }
    /// assert_eq!(set.to_in_order_string(), "[ 1, 2, 3 ]");
    /// ```
    pub fn to_in_order_string(&self) -> String
    where
        T: Display,
    {
        bracketed(self.iter())
    }

    /// Renders the level-order traversal as `[ a, b, c ]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_paths::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// for value in &[1, 2, 3] {
    ///     set.insert(*value).unwrap();
    /// }
    /// assert_eq!(set.to_level_order_string(), "[ 2, 1, 3 ]");
    /// ```
    pub fn to_level_order_string(&self) -> String
    where
        T: Display,
    {
        bracketed(self.level_order())
    }
}

fn bracketed<'a, T, I>(values: I) -> String
where
    T: Display + 'a,
    I: Iterator<Item = &'a T>,
{
    let body = values
        .map(|value| value.to_string())
        .collect::<Vec<String>>()
        .join(", ");
    format!("[ {} ]", body)
}

impl<T> Display for RedBlackSet<T>
where
    T: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "level order: {}\nin order: {}",
            self.to_level_order_string(),
            self.to_in_order_string(),
        )
    }
}

impl<T> IntoIterator for RedBlackSet<T> {
    type IntoIter = RedBlackSetIntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        let RedBlackSet { mut tree } = self;
        let mut order = Vec::with_capacity(tree.len());
        let mut handles = RedBlackSetIter {
            tree: &tree,
            current: tree.root,
            stack: Vec::new(),
        };
        while let Some(handle) = handles.next_handle() {
            order.push(handle);
        }

        let mut values = Vec::with_capacity(order.len());
        for handle in order {
            if let Some(node) = tree.arena.free(handle) {
                values.push(node.data);
            }
        }
        RedBlackSetIntoIter {
            values: values.into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a RedBlackSet<T>
where
    T: 'a,
{
    type IntoIter = RedBlackSetIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `RedBlackSet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields owned values.
pub struct RedBlackSetIntoIter<T> {
    values: vec::IntoIter<T>,
}

impl<T> Iterator for RedBlackSetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.values.next()
    }
}

/// An iterator for `RedBlackSet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields immutable references.
pub struct RedBlackSetIter<'a, T> {
    tree: &'a Tree<T>,
    current: Option<Handle>,
    stack: Vec<Handle>,
}

impl<'a, T> RedBlackSetIter<'a, T> {
    fn next_handle(&mut self) -> Option<Handle> {
        while let Some(handle) = self.current {
            self.stack.push(handle);
            self.current = self.tree.arena[handle].left;
        }
        let handle = self.stack.pop()?;
        self.current = self.tree.arena[handle].right;
        Some(handle)
    }
}

impl<'a, T> Iterator for RedBlackSetIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        self.next_handle().map(|handle| &tree.arena[handle].data)
    }
}

/// A breadth-first iterator for `RedBlackSet<T>`.
pub struct RedBlackSetLevelIter<'a, T> {
    tree: &'a Tree<T>,
    queue: VecDeque<Handle>,
}

impl<'a, T> Iterator for RedBlackSetLevelIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        let node = &tree.arena[self.queue.pop_front()?];
        self.queue.extend(node.left);
        self.queue.extend(node.right);
        Some(&node.data)
    }
}

impl<T> FromIterator<T> for RedBlackSet<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = RedBlackSet::new();
        set.extend(iter);
        set
    }
}

impl<T> Extend<T> for RedBlackSet<T>
where
    T: Ord,
{
    // Values already present are skipped.
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in iter {
            let _ = self.insert(value);
        }
    }
}

impl<T> Default for RedBlackSet<T> {
    fn default() -> Self {
        Self::new()
    }
}
