//! The Left-Right planarity test.
//!
//! The first pass orients the graph along a depth-first search and records
//! lowpoints and nesting depths for every edge. The second pass visits
//! outgoing edges in nesting order and maintains a stack of conflict pairs;
//! the graph is planar exactly when every pair of conflicting return edges
//! can be placed on opposite sides of the tree.

use std::cmp::Ordering;

use planaria_core::{SimpleGraph, planar_edge_bound};

use crate::{conflict::ConflictPair, errors::LrPlanarityError};

const UNVISITED: usize = usize::MAX;

/// Decides whether `graph` is planar.
///
/// Graphs above Euler's `3V−6` bound are rejected before any search.
pub(crate) fn is_planar(graph: &SimpleGraph) -> Result<bool, LrPlanarityError> {
    if planar_edge_bound(graph.vertex_count()).is_some_and(|bound| graph.edge_count() > bound) {
        return Ok(false);
    }
    let mut state = LrState::new(graph);
    state.orient();
    state.test()
}

/// Per-vertex and per-edge tables shared by both passes. Edges are indexed
/// by their position in the graph's edge list.
struct LrState {
    adjacency: Vec<Vec<(usize, usize)>>,
    height: Vec<usize>,
    parent_edge: Vec<Option<usize>>,
    roots: Vec<usize>,
    oriented: Vec<bool>,
    source: Vec<usize>,
    target: Vec<usize>,
    outgoing: Vec<Vec<usize>>,
    lowpt: Vec<usize>,
    lowpt2: Vec<usize>,
    nesting_depth: Vec<usize>,
    lowpt_edge: Vec<usize>,
    reference: Vec<Option<usize>>,
    stack_bottom: Vec<usize>,
    conflicts: Vec<ConflictPair>,
}

impl LrState {
    fn new(graph: &SimpleGraph) -> Self {
        let vertices = graph.vertex_count();
        let edges = graph.edge_count();
        let mut adjacency = vec![Vec::new(); vertices];
        for (edge, &(left, right)) in graph.edges().iter().enumerate() {
            adjacency[left].push((right, edge));
            adjacency[right].push((left, edge));
        }
        Self {
            adjacency,
            height: vec![UNVISITED; vertices],
            parent_edge: vec![None; vertices],
            roots: Vec::new(),
            oriented: vec![false; edges],
            source: vec![0; edges],
            target: vec![0; edges],
            outgoing: vec![Vec::new(); vertices],
            lowpt: vec![0; edges],
            lowpt2: vec![0; edges],
            nesting_depth: vec![0; edges],
            lowpt_edge: vec![0; edges],
            reference: vec![None; edges],
            stack_bottom: vec![0; edges],
            conflicts: Vec::new(),
        }
    }

    /// Orients every edge away from the DFS roots and computes lowpoints.
    fn orient(&mut self) {
        let mut cursor = vec![0_usize; self.adjacency.len()];
        let mut stack = Vec::new();
        for root in 0..self.adjacency.len() {
            if self.height[root] != UNVISITED {
                continue;
            }
            self.height[root] = 0;
            self.roots.push(root);
            stack.push(root);
            'dfs: while let Some(&v) = stack.last() {
                while let Some(&(w, edge)) = self.adjacency[v].get(cursor[v]) {
                    if self.oriented[edge] {
                        // Only the tree edge into a finished child is revisited.
                        if self.parent_edge[w] != Some(edge) {
                            cursor[v] += 1;
                            continue;
                        }
                    } else {
                        self.oriented[edge] = true;
                        self.source[edge] = v;
                        self.target[edge] = w;
                        self.outgoing[v].push(edge);
                        self.lowpt[edge] = self.height[v];
                        self.lowpt2[edge] = self.height[v];
                        if self.height[w] == UNVISITED {
                            self.parent_edge[w] = Some(edge);
                            self.height[w] = self.height[v] + 1;
                            stack.push(w);
                            continue 'dfs;
                        }
                        self.lowpt[edge] = self.height[w];
                    }
                    self.finish_orientation(v, edge);
                    cursor[v] += 1;
                }
                stack.pop();
            }
        }
    }

    fn finish_orientation(&mut self, v: usize, edge: usize) {
        let chordal = self.lowpt2[edge] < self.height[v];
        self.nesting_depth[edge] = 2 * self.lowpt[edge] + usize::from(chordal);

        let Some(parent) = self.parent_edge[v] else {
            return;
        };
        let (low, low2) = (self.lowpt[edge], self.lowpt2[edge]);
        match low.cmp(&self.lowpt[parent]) {
            Ordering::Less => {
                self.lowpt2[parent] = self.lowpt[parent].min(low2);
                self.lowpt[parent] = low;
            }
            Ordering::Greater => self.lowpt2[parent] = self.lowpt2[parent].min(low),
            Ordering::Equal => self.lowpt2[parent] = self.lowpt2[parent].min(low2),
        }
    }

    /// Runs the constraint pass over every DFS tree.
    fn test(&mut self) -> Result<bool, LrPlanarityError> {
        let nesting_depth = &self.nesting_depth;
        for outgoing in &mut self.outgoing {
            outgoing.sort_by_key(|&edge| nesting_depth[edge]);
        }

        let mut cursor = vec![0_usize; self.adjacency.len()];
        let mut started = vec![false; self.oriented.len()];
        let mut stack = Vec::new();
        for root in std::mem::take(&mut self.roots) {
            stack.push(root);
            'dfs: while let Some(&v) = stack.last() {
                let parent = self.parent_edge[v];
                while let Some(&edge) = self.outgoing[v].get(cursor[v]) {
                    if !started[edge] {
                        started[edge] = true;
                        self.stack_bottom[edge] = self.conflicts.len();
                        let w = self.target[edge];
                        if self.parent_edge[w] == Some(edge) {
                            stack.push(w);
                            continue 'dfs;
                        }
                        self.lowpt_edge[edge] = edge;
                        self.conflicts.push(ConflictPair::right_only(edge));
                    }
                    if let Some(parent) = parent
                        && self.lowpt[edge] < self.height[v]
                    {
                        if cursor[v] == 0 {
                            self.lowpt_edge[parent] = self.lowpt_edge[edge];
                        } else if !self.add_constraints(edge, parent)? {
                            return Ok(false);
                        }
                    }
                    cursor[v] += 1;
                }
                stack.pop();
                if let Some(parent) = parent {
                    self.remove_back_edges(parent)?;
                }
            }
        }
        Ok(true)
    }

    /// Merges the return edges of `edge` with those of its earlier siblings.
    /// Returns `false` when they cannot be separated.
    fn add_constraints(&mut self, edge: usize, parent: usize) -> Result<bool, LrPlanarityError> {
        let mut merged = ConflictPair::default();
        let bottom = self.stack_bottom[edge];
        loop {
            let mut pair = self
                .conflicts
                .pop()
                .ok_or(LrPlanarityError::ConflictStackUnderflow { edge })?;
            if !pair.left.is_empty() {
                pair.swap();
            }
            if !pair.left.is_empty() {
                return Ok(false);
            }
            let low = pair
                .right
                .low
                .ok_or(LrPlanarityError::MissingReturnEdges { edge })?;
            if self.lowpt[low] > self.lowpt[parent] {
                if merged.right.is_empty() {
                    merged.right = pair.right;
                } else if let Some(merged_low) = merged.right.low {
                    self.reference[merged_low] = pair.right.high;
                }
                merged.right.low = Some(low);
            } else {
                self.reference[low] = Some(self.lowpt_edge[parent]);
            }
            if self.conflicts.len() <= bottom {
                break;
            }
        }

        loop {
            let conflicting = self.conflicts.last().is_some_and(|top| {
                top.left.conflicts_with(edge, &self.lowpt)
                    || top.right.conflicts_with(edge, &self.lowpt)
            });
            if !conflicting {
                break;
            }
            let Some(mut pair) = self.conflicts.pop() else {
                break;
            };
            if pair.right.conflicts_with(edge, &self.lowpt) {
                pair.swap();
            }
            if pair.right.conflicts_with(edge, &self.lowpt) {
                return Ok(false);
            }
            if let Some(merged_low) = merged.right.low {
                self.reference[merged_low] = pair.right.high;
            }
            if pair.right.low.is_some() {
                merged.right.low = pair.right.low;
            }
            if merged.left.is_empty() {
                merged.left = pair.left;
            } else if let Some(merged_low) = merged.left.low {
                self.reference[merged_low] = pair.left.high;
            }
            merged.left.low = pair.left.low;
        }

        if !merged.is_empty() {
            self.conflicts.push(merged);
        }
        Ok(true)
    }

    /// Drops return edges that end at the source of `parent` once its
    /// subtree is finished.
    fn remove_back_edges(&mut self, parent: usize) -> Result<(), LrPlanarityError> {
        let u = self.source[parent];
        let height = self.height[u];
        while self
            .conflicts
            .last()
            .is_some_and(|top| top.lowest(&self.lowpt) == Some(height))
        {
            self.conflicts.pop();
        }

        if let Some(mut pair) = self.conflicts.pop() {
            while let Some(high) = pair.left.high
                && self.target[high] == u
            {
                pair.left.high = self.reference[high];
            }
            if pair.left.high.is_none()
                && let Some(low) = pair.left.low
            {
                self.reference[low] = pair.right.low;
                pair.left.low = None;
            }

            while let Some(high) = pair.right.high
                && self.target[high] == u
            {
                pair.right.high = self.reference[high];
            }
            if pair.right.high.is_none()
                && let Some(low) = pair.right.low
            {
                self.reference[low] = pair.left.low;
                pair.right.low = None;
            }
            self.conflicts.push(pair);
        }

        if self.lowpt[parent] < height {
            let top = self
                .conflicts
                .last()
                .ok_or(LrPlanarityError::MissingReturnEdges { edge: parent })?;
            self.reference[parent] = match (top.left.high, top.right.high) {
                (Some(left), Some(right)) if self.lowpt[left] > self.lowpt[right] => Some(left),
                (Some(left), None) => Some(left),
                (_, right) => right,
            };
        }
        Ok(())
    }
}
