use crate::config::{NeighborhoodConfig, Shape, MIN_SIZE};
use common::Graph;
use tracing::{info, instrument};

/// Enumerates the neighborhoods with `size` vertices and calls `emit` on each,
/// with the outer vertex as the last vertex of the graph. Returns the number
/// of emitted graphs.
///
/// An error returned by `emit` stops the enumeration and is passed on.
///
/// Panics if `size` is not within [NeighborhoodConfig::sizes]. Callers with
/// unchecked input validate it with [NeighborhoodConfig::check_size] first.
#[instrument(skip_all)]
pub fn enumerate_neighborhoods<F, E>(config: &NeighborhoodConfig, size: usize, mut emit: F) -> Result<u64, E>
where
    F: FnMut(&Graph) -> Result<(), E>,
{
    assert!(
        config.sizes().contains(&size),
        "size must be within [{MIN_SIZE},{}] (got {size})",
        config.max_size()
    );
    info!(n = size);

    let mut graph = Graph::new(size + 1).expect("sizes are checked against the vertex capacity");
    let mut found = 0;
    for shape in config.shapes(size) {
        info!(p = shape.p, q = shape.q, graphs = found);
        let mut search = Search { max_degree: config.max_degree(), shape, emit: &mut emit, found: 0 };
        search.choose_shape(&mut graph)?;
        found += search.found;
    }
    debug_assert_eq!(graph.edge_count(), 0);
    Ok(found)
}

struct Search<'a, F> {
    max_degree: usize,
    shape: Shape,
    emit: &'a mut F,
    found: u64,
}

impl<F, E> Search<'_, F>
where
    F: FnMut(&Graph) -> Result<(), E>,
{
    fn choose_shape(&mut self, graph: &mut Graph) -> Result<(), E> {
        let depth1 = self.shape.depth1().fold(0u128, |set, u| set | 1 << u);
        let mut g = graph.connect_scoped(0, depth1);
        self.branch_on_11_edge(&mut g, 1, 2)
    }

    /// Decides the edge between the depth-1 vertices `u` and `v`.
    fn branch_on_11_edge(&mut self, graph: &mut Graph, u: usize, v: usize) -> Result<(), E> {
        let p = self.shape.p;
        if u == p {
            if !self.canonical_degree_order(graph) {
                return Ok(());
            }
            return self.branch_on_12_edge(graph, 1, 1 + p, u64::MAX);
        }
        if v == 1 + p {
            return self.branch_on_11_edge(graph, u + 1, u + 2);
        }

        {
            let mut g = graph.add_edge_scoped(u, v);
            self.branch_on_11_edge(&mut g, u, v + 1)?;
        }
        self.branch_on_11_edge(graph, u, v + 1)
    }

    /// A depth-1 vertex never has a larger degree than its predecessor.
    fn canonical_degree_order(&self, graph: &Graph) -> bool {
        self.shape.depth1().skip(1).all(|u| graph.degree(u) <= graph.degree(u - 1))
    }

    /// Decides the edge between the depth-1 vertex `u` and the depth-2 vertex
    /// `w`. All depth-1 neighbors of `w` are chosen before moving on to `w + 1`.
    /// `previous` is the neighbor mask of `w - 1`.
    fn branch_on_12_edge(&mut self, graph: &mut Graph, u: usize, w: usize, previous: u64) -> Result<(), E> {
        if w == self.shape.outer() {
            return self.finish(graph);
        }
        if u == 1 + self.shape.p {
            let mask = self.neighbor_mask(graph, w);
            if mask == 0 || mask > previous {
                return Ok(());
            }
            return self.branch_on_12_edge(graph, 1, w + 1, mask);
        }

        if graph.degree(u) < self.max_degree && graph.degree(w) < self.max_degree {
            let mut g = graph.add_edge_scoped(u, w);
            self.branch_on_12_edge(&mut g, u + 1, w, previous)?;
        }
        self.branch_on_12_edge(graph, u + 1, w, previous)
    }

    /// The depth-1 neighbors of `w`, with vertex `1` as the most significant bit.
    fn neighbor_mask(&self, graph: &Graph, w: usize) -> u64 {
        self.shape.depth1().fold(0, |mask, u| mask << 1 | graph.has_edge(u, w) as u64)
    }

    /// Attaches all depth-2 vertices with spare degree to the outer vertex and
    /// emits the graph if no further edge can be added.
    fn finish(&mut self, graph: &mut Graph) -> Result<(), E> {
        let open = self.shape.depth2().filter(|&w| graph.degree(w) < self.max_degree).fold(0u128, |set, w| set | 1 << w);
        let g = graph.connect_scoped(self.shape.outer(), open);
        if self.is_saturated(&g) {
            self.found += 1;
            (self.emit)(&*g)?;
        }
        Ok(())
    }

    /// The outer vertex is attached, and every missing edge from a depth-1
    /// vertex to a later inner vertex has an endpoint of maximum degree.
    fn is_saturated(&self, graph: &Graph) -> bool {
        let outer = self.shape.outer();
        if graph.degree(outer) == 0 {
            return false;
        }
        let open = |v: usize| graph.degree(v) < self.max_degree;
        self.shape.depth1().all(|u| (u + 1..outer).all(|w| graph.has_edge(u, w) || !open(u) || !open(w)))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use common::io::write_neighborhood;
    use std::cmp::Reverse;
    use std::collections::HashSet;
    use std::convert::Infallible;

    fn collect(max_degree: usize, size: usize) -> Vec<Graph> {
        let config = NeighborhoodConfig::new(max_degree).unwrap();
        let mut graphs = vec![];
        let count = enumerate_neighborhoods(&config, size, |g| {
            graphs.push(g.clone());
            Ok::<_, Infallible>(())
        })
        .unwrap();
        assert_eq!(count, graphs.len() as u64);
        graphs
    }

    fn lines(graphs: &[Graph]) -> Vec<String> {
        graphs
            .iter()
            .map(|g| {
                let mut out = Vec::new();
                write_neighborhood(&mut out, g).unwrap();
                String::from_utf8(out).unwrap()
            })
            .collect()
    }

    /// Recovers the shape from the degree of the root.
    fn shape_of(graph: &Graph) -> Shape {
        let p = graph.degree(0);
        Shape { p, q: graph.node_count() - 2 - p }
    }

    fn mask(graph: &Graph, shape: Shape, w: usize) -> u64 {
        shape.depth1().fold(0, |mask, u| mask << 1 | graph.has_edge(u, w) as u64)
    }

    #[test]
    fn smallest_neighborhoods() {
        assert_eq!(lines(&collect(3, 3)), vec!["3 0 1 1 2 2 3 -1\n"]);
        assert_eq!(lines(&collect(3, 4)), vec!["4 0 1 1 2 1 3 2 4 3 4 -1\n", "4 0 1 0 2 1 2 1 3 2 3 3 4 -1\n"]);
        assert_eq!(
            lines(&collect(3, 5)),
            vec![
                "5 0 1 0 2 1 2 1 3 2 4 3 5 4 5 -1\n",
                "5 0 1 0 2 1 3 1 4 2 3 2 4 3 5 4 5 -1\n",
                "5 0 1 0 2 0 3 1 2 1 3 2 4 3 4 4 5 -1\n",
                "5 0 1 0 2 0 3 1 2 1 4 2 4 4 5 -1\n",
            ]
        );
    }

    #[test]
    fn counts_for_degree_3() {
        let config = NeighborhoodConfig::new(3).unwrap();
        let counts: Vec<u64> =
            config.sizes().map(|size| enumerate_neighborhoods(&config, size, |_| Ok::<_, Infallible>(())).unwrap()).collect();
        assert_eq!(counts, vec![1, 2, 4, 11, 11, 8, 3, 1]);
    }

    #[test]
    fn deterministic() {
        assert_eq!(collect(3, 7), collect(3, 7));
        assert_eq!(collect(4, 6), collect(4, 6));
    }

    #[test]
    fn canonical_form() {
        for (d, size) in [(3, 6), (3, 7), (3, 8), (3, 10), (4, 6), (4, 7)] {
            let graphs = collect(d, size);
            assert!(!graphs.is_empty());

            let distinct: HashSet<_> = lines(&graphs).into_iter().collect();
            assert_eq!(distinct.len(), graphs.len());

            for graph in &graphs {
                let shape = shape_of(graph);
                let outer = shape.outer();
                assert_eq!(outer, graph.node_count() - 1);
                assert_eq!(shape.size(), size);

                // layering
                assert!(shape.depth1().all(|u| graph.has_edge(0, u)));
                for w in shape.depth2() {
                    assert!(!graph.has_edge(0, w));
                    assert!(shape.depth2().all(|x| !graph.has_edge(w, x)));
                }
                assert!(shape.depth1().all(|u| !graph.has_edge(u, outer)));
                assert!(graph.degree(outer) > 0);

                // degree cap
                assert!((0..outer).all(|v| graph.degree(v) <= d));

                // symmetry breaking
                assert!(shape.depth1().skip(1).all(|u| graph.degree(u) <= graph.degree(u - 1)));
                let masks: Vec<_> = shape.depth2().map(|w| mask(graph, shape, w)).collect();
                assert!(masks.iter().all(|&m| m != 0));
                assert!(masks.windows(2).all(|pair| pair[0] >= pair[1]));

                // saturation
                for u in shape.depth1() {
                    for w in u + 1..outer {
                        assert!(graph.has_edge(u, w) || graph.degree(u) == d || graph.degree(w) == d);
                    }
                }
                // every depth-2 vertex with spare degree reaches the outer vertex
                assert!(shape.depth2().all(|w| graph.degree(w) == d || graph.has_edge(w, outer)));
            }
        }
    }

    #[test]
    fn swapping_equal_depth2_vertices_is_identity() {
        for graph in collect(3, 8) {
            let shape = shape_of(&graph);
            for w in shape.depth2() {
                for x in w + 1..shape.outer() {
                    if mask(&graph, shape, w) == mask(&graph, shape, x) {
                        assert_eq!(graph.degree(w), graph.degree(x));
                        assert_eq!(graph.has_edge(w, shape.outer()), graph.has_edge(x, shape.outer()));
                    }
                }
            }
        }
    }

    /// Swaps the depth-1 vertices `a` and `b`, then relabels depth 2 so the
    /// neighbor masks are non-increasing again.
    fn swap_depth1(graph: &Graph, shape: Shape, a: usize, b: usize) -> Graph {
        let n = graph.node_count();
        let swap = |x: usize| if x == a { b } else if x == b { a } else { x };
        let swapped = Graph::from_edges(n, graph.edges().map(|(x, y)| (swap(x), swap(y)))).unwrap();

        let mut depth2: Vec<usize> = shape.depth2().collect();
        depth2.sort_by_key(|&w| Reverse(mask(&swapped, shape, w)));
        let mut label: Vec<usize> = (0..n).collect();
        for (w, old) in shape.depth2().zip(depth2) {
            label[old] = w;
        }
        Graph::from_edges(n, swapped.edges().map(|(x, y)| (label[x], label[y]))).unwrap()
    }

    #[test]
    fn depth1_swaps_of_degree_3() {
        // Equal-degree depth-1 vertices are not fully ordered, some emitted
        // graphs are relabelings of each other. Each group lists graphs by
        // their position in the enumeration of one size.
        let groups: [(usize, &[usize]); 5] = [(7, &[2, 3]), (7, &[4, 5, 6]), (8, &[2, 5, 7]), (8, &[3, 4, 6]), (9, &[0, 1, 2])];
        let expected: HashSet<(usize, usize, usize)> = groups
            .iter()
            .flat_map(|&(size, group)| {
                group.iter().flat_map(move |&i| group.iter().filter(move |&&j| j != i).map(move |&j| (size, i, j)))
            })
            .collect();

        let config = NeighborhoodConfig::new(3).unwrap();
        let mut collisions = HashSet::new();
        for size in config.sizes() {
            let graphs = collect(3, size);
            for (i, graph) in graphs.iter().enumerate() {
                let shape = shape_of(graph);
                for a in shape.depth1() {
                    for b in a + 1..1 + shape.p {
                        if graph.degree(a) != graph.degree(b) {
                            continue;
                        }
                        let image = swap_depth1(graph, shape, a, b);
                        if image == *graph {
                            continue;
                        }
                        if let Some(j) = graphs.iter().position(|g| *g == image) {
                            collisions.insert((size, i, j));
                        }
                    }
                }
            }
        }
        assert_eq!(collisions.len(), 26);
        assert_eq!(collisions, expected);

        // vertices 1 and 3 of the first size-9 graph
        let graphs = collect(3, 9);
        let image = swap_depth1(&graphs[0], shape_of(&graphs[0]), 1, 3);
        assert_eq!(image, graphs[2]);
        let readable = |g: &Graph| g.edges().filter(|&(u, _)| u > 0).map(|(u, v)| format!("{u}-{v}")).collect::<Vec<_>>();
        assert_eq!(readable(&graphs[0])[..6], ["1-4", "1-5", "2-4", "2-6", "3-7", "3-8"]);
        assert_eq!(readable(&graphs[2])[..6], ["1-4", "1-5", "2-6", "2-7", "3-6", "3-8"]);
    }

    #[test]
    fn emit_error_stops_enumeration() {
        let config = NeighborhoodConfig::new(3).unwrap();
        let mut calls = 0;
        let result = enumerate_neighborhoods(&config, 6, |_| {
            calls += 1;
            Err("stop")
        });
        assert_eq!(result, Err("stop"));
        assert_eq!(calls, 1);

        // a later enumeration is unaffected
        assert_eq!(collect(3, 6).len(), 11);
    }

    #[test]
    #[should_panic(expected = "size must be within")]
    fn size_out_of_range() {
        let config = NeighborhoodConfig::new(3).unwrap();
        let _ = enumerate_neighborhoods(&config, 11, |_| Ok::<_, Infallible>(()));
    }
}
