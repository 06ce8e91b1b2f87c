use super::*;
use crate::*;
use algograph::graph::{QueryableGraph, VertexId};
use std::{collections::HashMap, hash::Hash};
use tracing::{debug, trace};

pub const DEFAULT_EPSILON: f64 = 0.001;
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// PageRank as the fixed point of
/// `rank(p) = (1 - damping) / n + damping * sum(rank(q) / out(q))`
/// over the pages `q` linking to `p`.
///
/// A sink is taken to link to every page, itself included.
pub struct IteratedPageRank<'a, P> {
    graph: &'a LinkGraph<P>,
    damping: f64,
    epsilon: f64,
    max_iterations: usize,
    // incoming links of every page, weighted by `damping / out(source)`
    transitions: HashMap<VertexId, Vec<(VertexId, f64)>, ahash::RandomState>,
    sinks: Vec<VertexId>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub damping: f64,
    pub epsilon: f64,
    pub max_iterations: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            epsilon: DEFAULT_EPSILON,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Result {
    pub page_rank: HashMap<VertexId, f64, ahash::RandomState>,
    pub delta: HashMap<VertexId, f64, ahash::RandomState>,
    pub iterations: usize,
}

impl<'a, P> IteratedPageRank<'a, P> {
    pub fn new(g: &'a LinkGraph<P>, config: &Config) -> crate::Result<Self> {
        let damping = config.damping;
        if !(0.0..1.0).contains(&damping) {
            return Err(Error::InvalidDamping(damping));
        }
        let epsilon = config.epsilon;
        if epsilon.is_nan() || epsilon <= 0.0 {
            return Err(Error::InvalidEpsilon(epsilon));
        }
        if config.max_iterations == 0 {
            return Err(Error::ZeroIterations);
        }
        if g.is_empty() {
            return Err(Error::EmptyGraph);
        }
        let graph = g.graph();
        let degrees: HashMap<_, _, ahash::RandomState> = graph
            .iter_vertices()
            .map(|u| (u, graph.out_edges(&u).count()))
            .collect();
        let sinks = graph
            .iter_vertices()
            .filter(|u| degrees[u] == 0)
            .collect();
        let transitions = graph
            .iter_vertices()
            .map(|v| {
                let incoming: Vec<_> = graph
                    .in_edges(&v)
                    .map(|e| (e.source, damping / (degrees[&e.source] as f64)))
                    .collect();
                (v, incoming)
            })
            .collect();
        Ok(Self {
            graph: g,
            damping,
            epsilon,
            max_iterations: config.max_iterations,
            transitions,
            sinks,
        })
    }
}

impl<P> PageRank for IteratedPageRank<'_, P> {
    type Result = self::Result;

    fn calc(&self) -> crate::Result<Self::Result> {
        let graph = self.graph.graph();
        let n = graph.vertex_size() as f64;
        let jump = (1.0 - self.damping) / n;
        let mut p: HashMap<_, _, ahash::RandomState> =
            graph.iter_vertices().map(|v| (v, 1.0 / n)).collect();
        let mut r = HashMap::with_hasher(ahash::RandomState::new());
        let mut delta = HashMap::with_hasher(ahash::RandomState::new());
        for iteration in 1..=self.max_iterations {
            let sunk = self.sinks.iter().map(|v| p[v]).sum::<f64>() * self.damping / n;
            for (v, incoming) in self.transitions.iter() {
                let followed: f64 = incoming.iter().map(|(u, w)| p[u] * w).sum();
                r.insert(*v, jump + sunk + followed);
            }

            delta.clear();
            for (v, b) in r.iter() {
                delta.insert(*v, b - p[v]);
            }

            let change = norm_inf(&delta);
            trace!(iteration, change, "page rank pass");
            if change < self.epsilon {
                debug!(
                    pages = graph.vertex_size(),
                    iterations = iteration,
                    total = norm_1(&r),
                    "iterated page rank converged"
                );
                return Ok(Self::Result {
                    page_rank: r,
                    delta,
                    iterations: iteration,
                });
            }

            std::mem::swap(&mut p, &mut r);
            r.clear();
        }
        Err(Error::NotConverged {
            iterations: self.max_iterations,
        })
    }
}

/// Ranks every page by iterating until no rank moves by
/// [`DEFAULT_EPSILON`] or more.
pub fn iterate_rank<P>(graph: &LinkGraph<P>, damping: f64) -> crate::Result<RankMapping<P>>
where
    P: Eq + Hash + Clone,
{
    let config = Config {
        damping,
        ..Config::default()
    };
    let ipr = IteratedPageRank::new(graph, &config)?;
    let result = ipr.calc()?;
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
        writeln!(f, "iterations: {}", self.result.iterations)?;
        for v in self.graph.graph().iter_vertices() {
            let (Some(page), Some(p), Some(d)) = (
                self.graph.page(v),
                self.result.page_rank.get(&v),
                self.result.delta.get(&v),
            ) else {
                continue;
            };
            writeln!(f, "{page:?}: {p:?}, {d:?}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use quickcheck_macros::quickcheck;

    fn total<P>(ranks: &RankMapping<P>) -> f64 {
        ranks.values().sum()
    }

    #[test]
    fn mutual_links() {
        let g = LinkGraph::from_adjacency([("a", vec!["b"]), ("b", vec!["a"])]).unwrap();
        let ranks = iterate_rank(&g, 0.85).unwrap();
        assert!((ranks[&"a"] - 0.5).abs() < 1e-9, "{ranks:?}");
        assert!((ranks[&"b"] - 0.5).abs() < 1e-9, "{ranks:?}");
    }

    #[test]
    fn sink_links_to_everything() {
        let g = LinkGraph::from_adjacency([("a", vec![]), ("b", vec!["a"])]).unwrap();
        let ranks = iterate_rank(&g, 0.85).unwrap();
        assert!(ranks[&"a"] > ranks[&"b"], "{ranks:?}");
        assert!((total(&ranks) - 1.0).abs() < 1e-6, "{ranks:?}");
        // the caller's graph keeps its sink
        assert!(g.is_sink(&"a").unwrap());
    }

    #[test]
    fn single_page() {
        let g = LinkGraph::from_adjacency([("a", vec![])]).unwrap();
        let ranks = iterate_rank(&g, 0.85).unwrap();
        assert_eq!(ranks.len(), 1);
        assert!((ranks[&"a"] - 1.0).abs() < 1e-12, "{ranks:?}");
    }

    #[test]
    fn isolated_pages_are_uniform() {
        let mut g = LinkGraph::new();
        for p in 0..4 {
            g.add_page(p);
        }
        let ipr = IteratedPageRank::new(&g, &Config::default()).unwrap();
        let res = ipr.calc().unwrap();
        assert_eq!(res.iterations, 1);
        for w in res.page_rank.values() {
            assert!((w - 0.25).abs() < 1e-12, "{res:?}");
        }
    }

    #[test]
    fn cycle_3() {
        let g = cycle(3);
        let ranks = iterate_rank(&g, 0.85).unwrap();
        for w in ranks.values() {
            assert!((w - 1.0 / 3.0).abs() < 0.001, "{ranks:?}");
        }
    }

    #[test]
    fn corpus_0() {
        let g = LinkGraph::from_adjacency([
            ("1.html", vec!["2.html"]),
            ("2.html", vec!["1.html", "3.html"]),
            ("3.html", vec!["2.html", "4.html"]),
            ("4.html", vec!["2.html"]),
        ])
        .unwrap();
        let ranks = iterate_rank(&g, 0.85).unwrap();
        let oracle = [
            ("1.html", 0.2202),
            ("2.html", 0.4289),
            ("3.html", 0.2202),
            ("4.html", 0.1307),
        ];
        for (page, w) in oracle {
            assert!((ranks[&page] - w).abs() < 0.01, "{ranks:?}");
        }
    }

    #[test]
    fn converges_within_epsilon() {
        let g = LinkGraph::from_adjacency([
            ("a", vec!["b", "c"]),
            ("b", vec!["c"]),
            ("c", vec!["a"]),
            ("d", vec!["c"]),
        ])
        .unwrap();
        let config = Config {
            epsilon: 1e-9,
            ..Config::default()
        };
        let res = IteratedPageRank::new(&g, &config).unwrap().calc().unwrap();
        assert!(norm_inf(&res.delta) < 1e-9, "{res:?}");
        assert!(res.iterations > 1, "{res:?}");
        let text = format!("{:?}", res.debug(&g));
        assert_eq!(text.lines().count(), 5, "{text}");
    }

    #[test]
    fn preconditions() {
        let g = cycle(3);
        let res = iterate_rank(&g, 1.0);
        assert!(matches!(res, Err(Error::InvalidDamping(_))), "{res:?}");
        let res = iterate_rank(&g, -0.5);
        assert!(matches!(res, Err(Error::InvalidDamping(_))), "{res:?}");
        let config = Config {
            epsilon: 0.0,
            ..Config::default()
        };
        let res = IteratedPageRank::new(&g, &config).map(|_| ());
        assert!(matches!(res, Err(Error::InvalidEpsilon(_))), "{res:?}");
        let config = Config {
            max_iterations: 0,
            ..Config::default()
        };
        let res = IteratedPageRank::new(&g, &config).map(|_| ());
        assert!(matches!(res, Err(Error::ZeroIterations)), "{res:?}");
        let empty = LinkGraph::<usize>::new();
        let res = iterate_rank(&empty, 0.85);
        assert!(matches!(res, Err(Error::EmptyGraph)), "{res:?}");
    }

    #[test]
    fn gives_up_after_max_iterations() {
        let g = LinkGraph::from_adjacency([("a", vec!["b"]), ("b", vec![]), ("c", vec!["a"])])
            .unwrap();
        let config = Config {
            epsilon: 1e-15,
            max_iterations: 1,
            ..Config::default()
        };
        let res = IteratedPageRank::new(&g, &config).unwrap().calc();
        assert!(
            matches!(res, Err(Error::NotConverged { iterations: 1 })),
            "{res:?}"
        );
    }

    #[quickcheck]
    fn sums_to_one(g: RandomGraph, d: Damping) {
        let g = &g.graph;
        let ranks = iterate_rank(g, d.0).unwrap();
        assert_eq!(ranks.len(), g.page_count());
        assert!((total(&ranks) - 1.0).abs() < 1e-6, "{ranks:?}");
        assert!(ranks.values().all(|w| *w >= 0.0), "{ranks:?}");
    }

    #[quickcheck]
    fn deterministic(g: RandomGraph, d: Damping) {
        let g = &g.graph;
        let r0 = iterate_rank(g, d.0).unwrap();
        let r1 = iterate_rank(g, d.0).unwrap();
        assert_eq!(r0, r1);
    }
}
