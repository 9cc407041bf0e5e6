//! An arena-backed red black tree set and Dijkstra shortest-path search.
//!
//! `red_black_tree::RedBlackSet` is an ordered, duplicate-free set that rebalances on insertion.
//! `graph` holds a directed weighted graph and a single-pair shortest-path search over any type
//! implementing `graph::WeightedGraph`.
//!
//! Neither structure is internally synchronized. Mutation takes `&mut self`.

mod error;
pub mod arena;
pub mod graph;
pub mod red_black_tree;

pub use self::error::{Error, Result};
