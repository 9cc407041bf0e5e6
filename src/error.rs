use std::result;
use thiserror::Error;

/// Errors reported by `RedBlackSet` and the shortest-path search.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    /// An absent value was supplied where one is required.
    #[error("cannot store or look up an absent value")]
    NullValue,

    /// The value being inserted compares equal to one already stored.
    #[error("the set already contains an equal value")]
    DuplicateValue,

    /// The value being removed is not stored in the set.
    #[error("the value is not in the set")]
    MissingValue,

    /// A rotation was requested on two nodes that are not parent and child.
    #[error("nodes are not a parent and its child")]
    InvalidRotation,

    /// A start or end vertex is not in the graph.
    #[error("start or end vertex cannot be found")]
    UnknownVertex,

    /// No sequence of edges connects the start vertex to the end vertex.
    #[error("there is no path between these vertices")]
    NoPath,

    /// An edge weight is negative or not a number.
    #[error("edge weight {0} is not a non-negative number")]
    InvalidWeight(f64),
}

pub type Result<T> = result::Result<T, Error>;
