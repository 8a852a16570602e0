use crate::partition::Partition;
use common::graph::members;
use common::Graph;

/// Calls `on_set` exactly once for every set of vertices that contains all
/// included vertices of `partition`, contains no excluded vertex, and in which
/// every vertex is connected to an included vertex through members of the set.
///
/// While `on_set` runs, the included vertices of the partition are the current
/// set. The partition is restored before this function returns.
///
/// Vertices are added in ascending index order. A vertex that is skipped in a
/// frame stays excluded for the remainder of that frame, so every set is
/// reached by exactly one sequence of additions.
///
/// If no vertex is included, the empty set is reported first and the
/// enumeration then starts from every undetermined vertex in turn.
///
/// Panics if the partition does not cover exactly the vertices of `graph`.
pub fn connected_supersets<F>(graph: &Graph, partition: &mut Partition, on_set: F)
where
    F: FnMut(&Partition),
{
    assert_eq!(graph.node_count(), partition.len(), "partition does not match the graph");
    let empty = partition.included() == 0;
    let mut search = Search { graph, partition, on_set };
    if empty {
        search.singletons();
    } else {
        search.grow();
    }
}

struct Search<'a, F> {
    graph: &'a Graph,
    partition: &'a mut Partition,
    on_set: F,
}

impl<F> Search<'_, F>
where
    F: FnMut(&Partition),
{
    fn singletons(&mut self) {
        (self.on_set)(&*self.partition);

        let mut excluded_here = 0u128;
        for v in members(self.partition.undetermined()) {
            self.partition.include(v);
            self.grow();
            self.partition.uninclude(v);
            self.partition.exclude(v);
            excluded_here |= 1 << v;
        }
        self.partition.unexclude_all(excluded_here);
    }

    fn grow(&mut self) {
        (self.on_set)(&*self.partition);

        // Vertices excluded by deeper frames are restored before the next
        // iteration, and the included set is the same on every iteration, so
        // the snapshot of undetermined vertices stays valid.
        let mut excluded_here = 0u128;
        for v in members(self.partition.undetermined()) {
            if self.graph.neighbor_set(v) & self.partition.included() == 0 {
                continue;
            }
            self.partition.include(v);
            self.grow();
            self.partition.uninclude(v);
            self.partition.exclude(v);
            excluded_here |= 1 << v;
        }
        self.partition.unexclude_all(excluded_here);
    }
}
