//! Directed graph over opaque nodes, stored as a dense adjacency matrix. An edge `i -> j` means
//! node `i` must come before node `j`.
//!
//! Graphs are built in two steps: edges are collected in a mutable [AdjacencyMatrix], which is
//! then frozen together with its nodes into an immutable [Graph].

use crate::error::GraphError;
use itertools::Itertools;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt::{Display, Formatter};

/// Mutable square boolean matrix used while collecting edges.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdjacencyMatrix {
    size: usize,
    edges: Vec<bool>,
}

impl AdjacencyMatrix {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            edges: vec![false; size * size],
        }
    }

    /// Adds an edge `from -> to`. Panics on out-of-bounds indices.
    pub fn add_edge(&mut self, from: usize, to: usize) {
        assert!(from < self.size && to < self.size, "edge out of bounds");
        self.edges[from * self.size + to] = true;
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Freezes the matrix into a [Graph] over given nodes. Node count must match the matrix size.
    pub fn into_graph<T>(self, nodes: Vec<T>) -> Graph<T> {
        assert_eq!(nodes.len(), self.size, "node count must match matrix size");
        Graph { nodes, edges: self }
    }
}

/// Immutable directed graph.
#[derive(Clone, Debug)]
pub struct Graph<T> {
    nodes: Vec<T>,
    edges: AdjacencyMatrix,
}

impl<T> Graph<T> {
    #[inline]
    pub fn nodes(&self) -> &[T] {
        &self.nodes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        assert!(from < self.len() && to < self.len(), "edge out of bounds");
        self.edges.edges[from * self.edges.size + to]
    }

    fn successors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.len()).filter(move |target| self.has_edge(node, *target))
    }

    /// Finds all distinct elementary cycles. Every node starts a depth-first traversal limited to
    /// nodes which come after it, so each cycle is reported once, beginning with its earliest node.
    pub fn cycles(&self) -> Vec<Cycle<&T>> {
        let mut on_path = vec![false; self.len()];
        let mut path = vec![];
        let mut cycles = vec![];

        for start in 0..self.len() {
            self.find_cycles(start, start, &mut on_path, &mut path, &mut cycles);
        }

        cycles
            .into_iter()
            .map(|cycle: Vec<usize>| {
                Cycle::new(cycle.into_iter().map(|index| &self.nodes[index]).collect())
            })
            .collect()
    }

    fn find_cycles(
        &self,
        start: usize,
        node: usize,
        on_path: &mut [bool],
        path: &mut Vec<usize>,
        cycles: &mut Vec<Vec<usize>>,
    ) {
        on_path[node] = true;
        path.push(node);

        for target in self.successors(node) {
            if target == start {
                cycles.push(path.clone());
            } else if target > start && !on_path[target] {
                self.find_cycles(start, target, on_path, path, cycles);
            }
        }

        path.pop();
        on_path[node] = false;
    }

    #[inline]
    pub fn has_cycles(&self) -> bool {
        !self.cycles().is_empty()
    }

    /// Returns all nodes ordered so that every edge source comes before its target. Among nodes
    /// ready at the same time, the one earlier in the node list goes first.
    pub fn topological_order(&self) -> Result<Vec<&T>, GraphError> {
        self.topological_indices()
            .map(|order| order.into_iter().map(|index| &self.nodes[index]).collect())
    }

    /// Same as [Graph::topological_order], but returns node indices.
    pub fn topological_indices(&self) -> Result<Vec<usize>, GraphError> {
        let mut in_degrees = (0..self.len())
            .map(|target| {
                (0..self.len())
                    .filter(|source| self.has_edge(*source, target))
                    .count()
            })
            .collect_vec();

        let mut ready: BinaryHeap<Reverse<usize>> = in_degrees
            .iter()
            .positions(|degree| *degree == 0)
            .map(Reverse)
            .collect();

        let mut order = Vec::with_capacity(self.len());
        while let Some(Reverse(node)) = ready.pop() {
            order.push(node);

            for target in self.successors(node) {
                in_degrees[target] -= 1;
                if in_degrees[target] == 0 {
                    ready.push(Reverse(target));
                }
            }
        }

        if order.len() == self.len() {
            Ok(order)
        } else {
            Err(GraphError::CyclicGraph)
        }
    }
}

/// Ordered sequence of distinct nodes where each node has an edge to the next one, and the last
/// one to the first.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Cycle<T> {
    nodes: Vec<T>,
}

impl<T> Cycle<T> {
    /// Creates a cycle from a non-empty node sequence.
    pub fn new(nodes: Vec<T>) -> Self {
        debug_assert!(!nodes.is_empty());
        Self { nodes }
    }

    #[inline]
    pub fn nodes(&self) -> &[T] {
        &self.nodes
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Cycle<U> {
        Cycle {
            nodes: self.nodes.into_iter().map(f).collect(),
        }
    }
}

impl<T: Display> Display for Cycle<T> {
    /// Renders a boxed arrow diagram:
    /// ```text
    /// ┌->A -> B -> C -┐
    /// └---------------┘
    /// ```
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let inner = format!("->{} -", self.nodes.iter().join(" -> "));
        let width = inner.chars().count();

        writeln!(f, "┌{inner}┐")?;
        write!(f, "└{}┘", "-".repeat(width))
    }
}
