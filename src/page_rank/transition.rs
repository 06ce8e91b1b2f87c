use super::*;
use crate::*;
use algograph::graph::{QueryableGraph, VertexId};
use std::{
    collections::{HashMap, HashSet},
    fmt::Debug,
    hash::Hash,
};

/// Probability of moving to each page from a fixed page.
pub type Distribution<P> = HashMap<P, f64, ahash::RandomState>;

/// Next-click distribution of a surfer currently on `page`.
///
/// With probability `damping` the surfer follows one of the links of `page`,
/// otherwise it jumps to any page. A sink sends the surfer anywhere.
pub fn transition<P>(
    graph: &LinkGraph<P>,
    page: &P,
    damping: f64,
) -> crate::Result<Distribution<P>>
where
    P: Eq + Hash + Clone + Debug,
{
    check_damping(damping)?;
    if graph.is_empty() {
        return Err(Error::EmptyGraph);
    }
    let u = graph.vertex(page)?;
    Ok(transitions(graph, u, damping)
        .into_iter()
        .filter_map(|(v, w)| graph.page(v).map(|p| (p.clone(), w)))
        .collect())
}

/// Same as [`transition`], over vertices and in vertex order.
pub(crate) fn transitions<P>(
    graph: &LinkGraph<P>,
    u: VertexId,
    damping: f64,
) -> Vec<(VertexId, f64)> {
    let g = graph.graph();
    let n = g.vertex_size() as f64;
    let targets: HashSet<VertexId, ahash::RandomState> =
        g.out_edges(&u).map(|e| e.sink).collect();
    if targets.is_empty() {
        return g.iter_vertices().map(|v| (v, 1.0 / n)).collect();
    }
    let jump = (1.0 - damping) / n;
    let follow = damping / (targets.len() as f64);
    g.iter_vertices()
        .map(|v| {
            if targets.contains(&v) {
                (v, jump + follow)
            } else {
                (v, jump)
            }
        })
        .collect()
}
