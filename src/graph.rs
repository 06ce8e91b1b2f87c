use crate::{Error, Result};
use algograph::graph::*;
use std::{collections::HashMap, fmt::Debug, hash::Hash};

/// Pages and the links between them.
///
/// Every link target is a page of the graph. Self-links and duplicate links
/// are never stored, so a page without outbound links is a sink.
#[derive(Debug, Clone)]
pub struct LinkGraph<P> {
    graph: directed::TreeBackedGraph,
    vertices: HashMap<P, VertexId, ahash::RandomState>,
    pages: HashMap<VertexId, P, ahash::RandomState>,
}

impl<P> Default for LinkGraph<P> {
    fn default() -> Self {
        Self {
            graph: directed::TreeBackedGraph::new(),
            vertices: HashMap::default(),
            pages: HashMap::default(),
        }
    }
}

impl<P> LinkGraph<P> {
    pub fn page_count(&self) -> usize {
        self.graph.vertex_size()
    }

    pub fn link_count(&self) -> usize {
        self.graph.edge_size()
    }

    pub fn is_empty(&self) -> bool {
        self.page_count() == 0
    }

    pub fn page(&self, v: VertexId) -> Option<&P> {
        self.pages.get(&v)
    }

    /// Pages in the order they were added.
    pub fn pages(&self) -> impl Iterator<Item = &P> + '_ {
        self.graph.iter_vertices().filter_map(|v| self.pages.get(&v))
    }

    pub(crate) fn graph(&self) -> &directed::TreeBackedGraph {
        &self.graph
    }
}

impl<P> LinkGraph<P>
where
    P: Eq + Hash + Clone + Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from `(page, targets)` pairs.
    ///
    /// Fails with [`Error::UnknownPage`] when a target is not itself one of
    /// the listed pages.
    pub fn from_adjacency<I, L>(adjacency: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, L)>,
        L: IntoIterator<Item = P>,
    {
        let adjacency: Vec<(P, Vec<P>)> = adjacency
            .into_iter()
            .map(|(page, links)| (page, links.into_iter().collect()))
            .collect();
        let mut res = Self::new();
        for (page, _) in adjacency.iter() {
            res.add_page(page.clone());
        }
        for (page, links) in adjacency.into_iter() {
            for link in links {
                if !res.contains(&link) {
                    return Err(Error::UnknownPage(format!("{link:?}")));
                }
                res.add_link(page.clone(), link);
            }
        }
        Ok(res)
    }

    /// Adds `page` unless it is already present.
    pub fn add_page(&mut self, page: P) -> VertexId {
        if let Some(v) = self.vertices.get(&page) {
            return *v;
        }
        let v = self.graph.add_vertex();
        self.vertices.insert(page.clone(), v);
        self.pages.insert(v, page);
        v
    }

    /// Adds a link, and both of its pages when missing.
    ///
    /// Returns `false` for self-links and links already present.
    pub fn add_link(&mut self, from: P, to: P) -> bool {
        let u = self.add_page(from);
        let v = self.add_page(to);
        if u == v || self.graph.out_edges(&u).any(|e| e.sink == v) {
            return false;
        }
        self.graph.add_edge(u, v);
        true
    }

    pub fn contains(&self, page: &P) -> bool {
        self.vertices.contains_key(page)
    }

    pub fn vertex(&self, page: &P) -> Result<VertexId> {
        self.vertices
            .get(page)
            .copied()
            .ok_or_else(|| Error::UnknownPage(format!("{page:?}")))
    }

    pub fn links<'a>(&'a self, page: &P) -> Result<impl Iterator<Item = &'a P> + 'a> {
        let u = self.vertex(page)?;
        Ok(self
            .graph
            .out_edges(&u)
            .filter_map(|e| self.pages.get(&e.sink)))
    }

    pub fn is_sink(&self, page: &P) -> Result<bool> {
        let u = self.vertex(page)?;
        Ok(self.graph.out_edges(&u).next().is_none())
    }
}
