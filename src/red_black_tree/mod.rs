//! Self-balancing binary search tree that uses a color bit to keep the tree approximately
//! balanced during insertions.
//!
//! Removal splices nodes out without recoloring, so a set that has had values removed keeps its
//! ordering but may no longer satisfy the red black coloring rules.

mod node;
mod set;
mod tree;

pub use self::node::Color;
pub use self::set::{RedBlackSet, RedBlackSetIntoIter, RedBlackSetIter, RedBlackSetLevelIter};
