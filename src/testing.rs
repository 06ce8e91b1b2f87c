use crate::LinkGraph;
use quickcheck::{Arbitrary, Gen};

#[derive(Debug, Clone)]
pub struct RandomGraph {
    pub graph: LinkGraph<usize>,
}

impl Arbitrary for RandomGraph {
    fn arbitrary(g: &mut Gen) -> Self {
        const N: usize = 10;

        let n: usize = usize::arbitrary(g) % N + 1;
        let mut graph = LinkGraph::new();
        for p in 0..n {
            graph.add_page(p);
        }
        for _ in 0..(n * 2) {
            let u = usize::arbitrary(g) % n;
            let v = usize::arbitrary(g) % n;
            graph.add_link(u, v);
        }
        Self { graph }
    }
}

/// Damping factor in `[0, 0.99]`.
#[derive(Debug, Clone, Copy)]
pub struct Damping(pub f64);

impl Arbitrary for Damping {
    fn arbitrary(g: &mut Gen) -> Self {
        Self(f64::from(u8::arbitrary(g) % 100) / 100.0)
    }
}

pub fn cycle(n: usize) -> LinkGraph<usize> {
    let mut graph = LinkGraph::new();
    for u in 0..n {
        graph.add_link(u, (u + 1) % n);
    }
    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_of_three() {
        let g = cycle(3);
        assert_eq!(g.page_count(), 3);
        assert_eq!(g.link_count(), 3);
        for p in 0..3 {
            let links: Vec<_> = g.links(&p).unwrap().copied().collect();
            assert_eq!(links, vec![(p + 1) % 3]);
        }
    }
}
