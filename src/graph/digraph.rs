use crate::error::{Error, Result};
use crate::graph::WeightedGraph;
use std::collections::HashMap;
use std::hash::Hash;
use std::mem;

/// A directed graph stored as adjacency lists, with at most one edge per ordered pair of
/// vertices.
///
/// # Examples
///
/// ```
/// use red_black_paths::graph::DiGraph;
///
/// let mut graph = DiGraph::new();
/// graph.insert_vertex("A");
/// graph.insert_vertex("B");
/// assert_eq!(graph.insert_edge("A", "B", 4), Ok(None));
/// assert_eq!(graph.insert_edge("A", "B", 2), Ok(Some(4)));
///
/// assert_eq!(graph.edge_weight(&"A", &"B"), Some(2));
/// assert_eq!(graph.edge_count(), 1);
/// ```
pub struct DiGraph<V, E> {
    adjacency: HashMap<V, Vec<(V, E)>>,
    edge_count: usize,
}

impl<V, E> DiGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Copy,
{
    /// Constructs a new, empty `DiGraph<V, E>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_paths::graph::DiGraph;
    ///
    /// let graph: DiGraph<u32, u32> = DiGraph::new();
    /// assert!(graph.is_empty());
    /// ```
    pub fn new() -> Self {
        DiGraph {
            adjacency: HashMap::new(),
            edge_count: 0,
        }
    }

    /// Adds a vertex. Returns `false` if the vertex was already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_paths::graph::DiGraph;
    ///
    /// let mut graph: DiGraph<&str, u32> = DiGraph::new();
    /// assert!(graph.insert_vertex("A"));
    /// assert!(!graph.insert_vertex("A"));
    /// ```
    pub fn insert_vertex(&mut self, vertex: V) -> bool {
        if self.adjacency.contains_key(&vertex) {
            return false;
        }
        self.adjacency.insert(vertex, Vec::new());
        true
    }

    /// Removes a vertex along with every edge entering or leaving it. Returns `false` if the
    /// vertex was not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_paths::graph::DiGraph;
    ///
    /// let mut graph = DiGraph::new();
    /// graph.insert_vertex(1);
    /// graph.insert_vertex(2);
    /// graph.insert_edge(1, 2, 1.5).unwrap();
    /// graph.insert_edge(2, 1, 0.5).unwrap();
    ///
    /// assert!(graph.remove_vertex(&2));
    /// assert_eq!(graph.edge_count(), 0);
    /// assert!(!graph.contains_vertex(&2));
    /// ```
    pub fn remove_vertex(&mut self, vertex: &V) -> bool {
        let outgoing = match self.adjacency.remove(vertex) {
            Some(outgoing) => outgoing,
            None => return false,
        };
        self.edge_count -= outgoing.len();

        let mut removed = 0;
        for edges in self.adjacency.values_mut() {
            let before = edges.len();
            edges.retain(|(target, _)| target != vertex);
            removed += before - edges.len();
        }
        self.edge_count -= removed;
        true
    }

    /// Checks if a vertex exists in the graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_paths::graph::DiGraph;
    ///
    /// let mut graph: DiGraph<&str, u32> = DiGraph::new();
    /// graph.insert_vertex("A");
    /// assert!(graph.contains_vertex(&"A"));
    /// assert!(!graph.contains_vertex(&"B"));
    /// ```
    pub fn contains_vertex(&self, vertex: &V) -> bool {
        self.adjacency.contains_key(vertex)
    }

    /// Adds an edge from `source` to `target`, or replaces the weight of the existing one.
    /// Returns the replaced weight. Returns `Error::UnknownVertex` if either endpoint is missing.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_paths::graph::DiGraph;
    /// use red_black_paths::Error;
    ///
    /// let mut graph = DiGraph::new();
    /// graph.insert_vertex("A");
    /// graph.insert_vertex("B");
    /// assert_eq!(graph.insert_edge("A", "B", 4), Ok(None));
    /// assert_eq!(graph.insert_edge("A", "B", 2), Ok(Some(4)));
    /// assert_eq!(graph.insert_edge("A", "C", 1), Err(Error::UnknownVertex));
    /// ```
    pub fn insert_edge(&mut self, source: V, target: V, weight: E) -> Result<Option<E>> {
        if !self.adjacency.contains_key(&target) {
            return Err(Error::UnknownVertex);
        }
        let edges = self
            .adjacency
            .get_mut(&source)
            .ok_or(Error::UnknownVertex)?;

        if let Some((_, existing)) = edges.iter_mut().find(|(curr, _)| *curr == target) {
            return Ok(Some(mem::replace(existing, weight)));
        }
        edges.push((target, weight));
        self.edge_count += 1;
        Ok(None)
    }

    /// Removes the edge from `source` to `target` and returns its weight, if it exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_paths::graph::DiGraph;
    ///
    /// let mut graph = DiGraph::new();
    /// graph.insert_vertex("A");
    /// graph.insert_vertex("B");
    /// graph.insert_edge("A", "B", 3).unwrap();
    /// assert_eq!(graph.remove_edge(&"A", &"B"), Some(3));
    /// assert_eq!(graph.remove_edge(&"A", &"B"), None);
    /// ```
    pub fn remove_edge(&mut self, source: &V, target: &V) -> Option<E> {
        let edges = self.adjacency.get_mut(source)?;
        let index = edges.iter().position(|(curr, _)| curr == target)?;
        self.edge_count -= 1;
        Some(edges.remove(index).1)
    }

    /// Returns `true` if the edge from `source` to `target` exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_paths::graph::DiGraph;
    ///
    /// let mut graph = DiGraph::new();
    /// graph.insert_vertex("A");
    /// graph.insert_vertex("B");
    /// graph.insert_edge("A", "B", 3).unwrap();
    /// assert!(graph.contains_edge(&"A", &"B"));
    /// assert!(!graph.contains_edge(&"B", &"A"));
    /// ```
    pub fn contains_edge(&self, source: &V, target: &V) -> bool {
        self.edge_weight(source, target).is_some()
    }

    /// Returns the weight of the edge from `source` to `target`, if it exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_paths::graph::DiGraph;
    ///
    /// let mut graph = DiGraph::new();
    /// graph.insert_vertex("A");
    /// graph.insert_vertex("B");
    /// graph.insert_edge("A", "B", 3).unwrap();
    /// assert_eq!(graph.edge_weight(&"A", &"B"), Some(3));
    /// assert_eq!(graph.edge_weight(&"B", &"A"), None);
    /// ```
    pub fn edge_weight(&self, source: &V, target: &V) -> Option<E> {
        self.adjacency
            .get(source)?
            .iter()
            .find(|(curr, _)| curr == target)
            .map(|(_, weight)| *weight)
    }

    /// Returns the number of vertices.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_paths::graph::DiGraph;
    ///
    /// let mut graph: DiGraph<u32, u32> = DiGraph::new();
    /// graph.insert_vertex(0);
    /// graph.insert_vertex(1);
    /// assert_eq!(graph.vertex_count(), 2);
    /// ```
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns the number of edges.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_paths::graph::DiGraph;
    ///
    /// let mut graph = DiGraph::new();
    /// graph.insert_vertex(0);
    /// graph.insert_vertex(1);
    /// graph.insert_edge(0, 1, 1).unwrap();
    /// graph.insert_edge(1, 0, 1).unwrap();
    /// assert_eq!(graph.edge_count(), 2);
    /// ```
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns `true` if the graph has no vertices.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_paths::graph::DiGraph;
    ///
    /// let mut graph: DiGraph<u32, u32> = DiGraph::new();
    /// assert!(graph.is_empty());
    /// graph.insert_vertex(0);
    /// assert!(!graph.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}

impl<V, E> WeightedGraph for DiGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Copy + Into<f64>,
{
    type Vertex = V;
    type Edge = E;

    fn contains_vertex(&self, vertex: &V) -> bool {
        DiGraph::contains_vertex(self, vertex)
    }

    fn outgoing_edges<'a>(&'a self, vertex: &V) -> Box<dyn Iterator<Item = (&'a V, &'a E)> + 'a> {
        match self.adjacency.get(vertex) {
            Some(edges) => Box::new(edges.iter().map(|(target, weight)| (target, weight))),
            None => Box::new(std::iter::empty()),
        }
    }

    fn weight(&self, edge: &E) -> f64 {
        (*edge).into()
    }
}

impl<V, E> Default for DiGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Copy,
{
    fn default() -> Self {
        Self::new()
    }
}
