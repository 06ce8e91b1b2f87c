use super::RankMapping;
use crate::LinkGraph;
use algograph::graph::VertexId;
use std::{collections::HashMap, fmt::Debug, hash::Hash};

pub trait PageRank {
    type Result: PageRankResult;

    fn calc(&self) -> crate::Result<Self::Result>;
}

pub trait PageRankResult {
    fn page_rank(&self) -> &HashMap<VertexId, f64, ahash::RandomState>;

    /// Ranks keyed by page instead of vertex.
    fn rank_mapping<P: Eq + Hash + Clone>(&self, graph: &LinkGraph<P>) -> RankMapping<P> {
        self.page_rank()
            .iter()
            .filter_map(|(v, w)| graph.page(*v).map(|p| (p.clone(), *w)))
            .collect()
    }

    fn debug<'a, P: Debug>(&'a self, graph: &'a LinkGraph<P>) -> impl Debug + 'a;
}
