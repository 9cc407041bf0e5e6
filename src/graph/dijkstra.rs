use crate::error::{Error, Result};
use crate::graph::WeightedGraph;
use log::{debug, trace};
use serde_derive::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::hash::Hash;

/// The cheapest path between two vertices.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ShortestPath<V> {
    /// Sum of the edge weights along the path.
    pub cost: f64,
    /// Vertices from the start vertex to the end vertex, both inclusive.
    pub vertices: Vec<V>,
}

// A vertex reached along one particular path. `predecessor` indexes the path node this one was
// reached from.
struct PathNode<'a, V> {
    vertex: &'a V,
    predecessor: Option<usize>,
}

// A frontier entry. The heap is a max-heap, so the ordering is reversed: lower cost first, then
// the earlier pushed entry first.
struct Candidate {
    cost: f64,
    index: usize,
}

impl Ord for Candidate {
    fn cmp(&self, other: &Candidate) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Candidate) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Candidate) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

fn reconstruct<V>(path_nodes: &[PathNode<'_, V>], mut index: usize) -> Vec<V>
where
    V: Clone,
{
    let mut vertices = vec![path_nodes[index].vertex.clone()];
    while let Some(predecessor) = path_nodes[index].predecessor {
        vertices.push(path_nodes[predecessor].vertex.clone());
        index = predecessor;
    }
    vertices.reverse();
    vertices
}

/// Finds the cheapest path from `start` to `end` using Dijkstra's algorithm.
///
/// Returns `Error::UnknownVertex` if either vertex is not in the graph, `Error::NoPath` if `end`
/// cannot be reached from `start` and `Error::InvalidWeight` if the search meets a negative or NaN
/// edge weight.
///
/// # Examples
///
/// ```
/// use red_black_paths::graph::{self, DiGraph};
///
/// let mut graph = DiGraph::new();
/// for vertex in &["A", "B", "C", "D"] {
///     graph.insert_vertex(*vertex);
/// }
/// graph.insert_edge("A", "B", 4).unwrap();
/// graph.insert_edge("A", "C", 1).unwrap();
/// graph.insert_edge("B", "D", 2).unwrap();
/// graph.insert_edge("C", "D", 2).unwrap();
///
/// let path = graph::shortest_path(&graph, &"A", &"D").unwrap();
/// assert_eq!(path.cost, 3.0);
/// assert_eq!(path.vertices, vec!["A", "C", "D"]);
/// ```
pub fn shortest_path<'a, G>(
    graph: &'a G,
    start: &'a G::Vertex,
    end: &G::Vertex,
) -> Result<ShortestPath<G::Vertex>>
where
    G: WeightedGraph,
    G::Vertex: Clone + Eq + Hash,
{
    if !graph.contains_vertex(start) || !graph.contains_vertex(end) {
        return Err(Error::UnknownVertex);
    }

    if start == end {
        return Ok(ShortestPath {
            cost: 0.0,
            vertices: vec![start.clone()],
        });
    }

    let mut path_nodes = vec![PathNode {
        vertex: start,
        predecessor: None,
    }];
    let mut frontier = BinaryHeap::new();
    frontier.push(Candidate {
        cost: 0.0,
        index: 0,
    });
    let mut visited = HashSet::new();

    while let Some(Candidate { cost, index }) = frontier.pop() {
        let vertex = path_nodes[index].vertex;
        if !visited.insert(vertex) {
            continue;
        }

        if vertex == end {
            debug!(
                "found path of cost {} after finalizing {} vertices",
                cost,
                visited.len(),
            );
            return Ok(ShortestPath {
                cost,
                vertices: reconstruct(&path_nodes, index),
            });
        }

        for (target, edge) in graph.outgoing_edges(vertex) {
            if visited.contains(target) {
                continue;
            }
            let weight = graph.weight(edge);
            if weight.is_nan() || weight < 0.0 {
                return Err(Error::InvalidWeight(weight));
            }

            path_nodes.push(PathNode {
                vertex: target,
                predecessor: Some(index),
            });
            frontier.push(Candidate {
                cost: cost + weight,
                index: path_nodes.len() - 1,
            });
        }
        trace!("frontier holds {} candidates", frontier.len());
    }

    debug!("no path after finalizing {} vertices", visited.len());
    Err(Error::NoPath)
}

/// Returns the cost of the cheapest path from `start` to `end`.
pub fn shortest_path_cost<'a, G>(
    graph: &'a G,
    start: &'a G::Vertex,
    end: &G::Vertex,
) -> Result<f64>
where
    G: WeightedGraph,
    G::Vertex: Clone + Eq + Hash,
{
    shortest_path(graph, start, end).map(|path| path.cost)
}

/// Returns the vertices, from `start` to `end` inclusive, of the cheapest path between them.
pub fn shortest_path_data<'a, G>(
    graph: &'a G,
    start: &'a G::Vertex,
    end: &G::Vertex,
) -> Result<Vec<G::Vertex>>
where
    G: WeightedGraph,
    G::Vertex: Clone + Eq + Hash,
{
    shortest_path(graph, start, end).map(|path| path.vertices)
}
