use super::*;
use crate::*;
use algograph::graph::{QueryableGraph, VertexId};
use rand::{
    distr::{weighted::WeightedIndex, Distribution as _},
    seq::IndexedRandom,
    Rng,
};
use std::{
    cell::RefCell,
    collections::{hash_map::Entry, HashMap},
    hash::Hash,
};
use tracing::debug;

pub const DEFAULT_SAMPLES: usize = 10_000;

/// Random-surfer estimate of PageRank.
///
/// The surfer starts on a uniformly chosen page and takes `samples` steps,
/// each one drawn from the [`transition`] distribution of the page it is on.
/// The rank of a page is the share of steps that landed on it.
pub struct SampledPageRank<'a, P, R>
where
    R: Rng,
{
    graph: &'a LinkGraph<P>,
    damping: f64,
    samples: usize,
    vertices: Vec<VertexId>,
    // distributions of the pages visited so far
    cached: RefCell<HashMap<VertexId, Cached, ahash::RandomState>>,
    rng: RefCell<R>,
}

struct Cached {
    sinks: Vec<VertexId>,
    index: WeightedIndex<f64>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub damping: f64,
    pub samples: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            samples: DEFAULT_SAMPLES,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Result {
    pub page_rank: HashMap<VertexId, f64, ahash::RandomState>,
    pub visits: HashMap<VertexId, usize, ahash::RandomState>,
    pub samples: usize,
}

impl<'a, P, R: Rng> SampledPageRank<'a, P, R> {
    pub fn new(g: &'a LinkGraph<P>, config: &Config, rng: R) -> crate::Result<Self> {
        check_damping(config.damping)?;
        if config.samples == 0 {
            return Err(Error::ZeroSamples);
        }
        if g.is_empty() {
            return Err(Error::EmptyGraph);
        }
        let vertices: Vec<_> = g.graph().iter_vertices().collect();
        Ok(Self {
            graph: g,
            damping: config.damping,
            samples: config.samples,
            vertices,
            cached: RefCell::new(HashMap::with_hasher(ahash::RandomState::new())),
            rng: RefCell::new(rng),
        })
    }

    fn distribution(&self, u: VertexId) -> crate::Result<Cached> {
        let (sinks, weights): (Vec<_>, Vec<_>) =
            transition::transitions(self.graph, u, self.damping)
                .into_iter()
                .unzip();
        let index = WeightedIndex::new(weights).map_err(|e| Error::Degenerate(e.to_string()))?;
        Ok(Cached { sinks, index })
    }
}

impl<P, R: Rng> PageRank for SampledPageRank<'_, P, R> {
    type Result = self::Result;

    fn calc(&self) -> crate::Result<Self::Result> {
        let mut rng = self.rng.borrow_mut();
        let mut visits: HashMap<_, _, ahash::RandomState> =
            self.vertices.iter().map(|v| (*v, 0usize)).collect();
        let mut cached = self.cached.borrow_mut();
        let mut cur = *self.vertices.choose(&mut *rng).ok_or(Error::EmptyGraph)?;
        for _ in 0..self.samples {
            let next = match cached.entry(cur) {
                Entry::Occupied(e) => e.into_mut(),
                Entry::Vacant(e) => e.insert(self.distribution(cur)?),
            };
            cur = next.sinks[next.index.sample(&mut *rng)];
            *visits.entry(cur).or_insert(0) += 1;
        }
        let n = self.samples as f64;
        let page_rank = visits
            .iter()
            .map(|(v, count)| (*v, *count as f64 / n))
            .collect();
        debug!(
            pages = self.graph.page_count(),
            visited = cached.len(),
            samples = self.samples,
            "sampled page rank"
        );
        Ok(Self::Result {
            page_rank,
            visits,
            samples: self.samples,
        })
    }
}

/// Estimates the rank of every page from `n` steps of a random surfer.
pub fn sample_rank<P, R>(
    graph: &LinkGraph<P>,
    damping: f64,
    n: usize,
    rng: R,
) -> crate::Result<RankMapping<P>>
where
    P: Eq + Hash + Clone,
    R: Rng,
{
    let config = Config {
        damping,
        samples: n,
    };
    let spr = SampledPageRank::new(graph, &config, rng)?;
    let result = spr.calc()?;
    Ok(result.rank_mapping(graph))
}

impl PageRankResult for self::Result {
    fn page_rank(&self) -> &HashMap<VertexId, f64, ahash::RandomState> {
        &self.page_rank
    }

    fn debug<'a, P: std::fmt::Debug>(
        &'a self,
        graph: &'a LinkGraph<P>,
    ) -> impl std::fmt::Debug + 'a {
        ResultDebug {
            graph,
            result: self,
        }
    }
}

pub struct ResultDebug<'a, P> {
    graph: &'a LinkGraph<P>,
    result: &'a self::Result,
}

impl<P: std::fmt::Debug> std::fmt::Debug for ResultDebug<'_, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "samples: {}", self.result.samples)?;
        for v in self.graph.graph().iter_vertices() {
            let (Some(page), Some(p), Some(c)) = (
                self.graph.page(v),
                self.result.page_rank.get(&v),
                self.result.visits.get(&v),
            ) else {
                continue;
            };
            writeln!(f, "{page:?}: {p:?}, {c}")?;
        }
        Ok(())
    }
}
