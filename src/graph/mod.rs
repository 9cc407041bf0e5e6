//! Directed weighted graphs and single-pair shortest-path search.
//!
//! The search in `dijkstra` only needs read access to vertices and outgoing edges, so it runs on
//! anything implementing `WeightedGraph`. `DiGraph` is an adjacency-list implementation.

mod digraph;
mod dijkstra;

pub use self::digraph::DiGraph;
pub use self::dijkstra::{shortest_path, shortest_path_cost, shortest_path_data, ShortestPath};

/// Read access to a directed graph whose edges carry a numeric weight.
pub trait WeightedGraph {
    type Vertex;
    type Edge;

    /// Returns `true` if `vertex` is in the graph.
    fn contains_vertex(&self, vertex: &Self::Vertex) -> bool;

    /// Returns the edges leaving `vertex` together with the vertex each one points at. An unknown
    /// vertex has no outgoing edges.
    fn outgoing_edges<'a>(
        &'a self,
        vertex: &Self::Vertex,
    ) -> Box<dyn Iterator<Item = (&'a Self::Vertex, &'a Self::Edge)> + 'a>;

    /// Returns the numeric weight of `edge`.
    fn weight(&self, edge: &Self::Edge) -> f64;
}
