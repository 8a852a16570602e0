use common::graph::{members, vertex_mask};
use common::MAX_VERTICES;

/// The status of a vertex during an enumeration.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum VertexState {
    /// Not yet decided.
    Undetermined,
    /// Part of every set produced below the current frame.
    Included,
    /// Part of no set produced below the current frame.
    Excluded,
}

/// Splits the vertices `0..n` into included, excluded and undetermined vertices.
///
/// Both sets are stored as bitsets, so a partition covers at most
/// [MAX_VERTICES] vertices.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Partition {
    n: usize,
    included: u128,
    excluded: u128,
}

impl Partition {
    /// Creates a partition of `0..n` with all vertices undetermined.
    ///
    /// Panics if `n` exceeds [MAX_VERTICES].
    pub fn new(n: usize) -> Self {
        assert!(n <= MAX_VERTICES, "{n} vertices exceed the supported maximum of {MAX_VERTICES}");
        Self { n, included: 0, excluded: 0 }
    }

    /// Returns the number of vertices covered.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.n
    }

    /// Returns `true` if the partition covers no vertices.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Returns the state of `v`.
    #[inline(always)]
    pub fn state(&self, v: usize) -> VertexState {
        debug_assert!(v < self.n);
        if self.included >> v & 1 == 1 {
            VertexState::Included
        } else if self.excluded >> v & 1 == 1 {
            VertexState::Excluded
        } else {
            VertexState::Undetermined
        }
    }

    /// Sets the state of `v`.
    pub fn set(&mut self, v: usize, state: VertexState) {
        assert!(v < self.n, "vertex {v} out of range");
        let bit = 1u128 << v;
        self.included &= !bit;
        self.excluded &= !bit;
        match state {
            VertexState::Undetermined => {}
            VertexState::Included => self.included |= bit,
            VertexState::Excluded => self.excluded |= bit,
        }
    }

    /// Returns `true` if `v` is included.
    #[inline(always)]
    pub fn is_included(&self, v: usize) -> bool {
        self.included >> v & 1 == 1
    }

    /// Returns the included vertices as a bitset.
    #[inline(always)]
    pub fn included(&self) -> u128 {
        self.included
    }

    /// Returns the excluded vertices as a bitset.
    #[inline(always)]
    pub fn excluded(&self) -> u128 {
        self.excluded
    }

    /// Returns the undetermined vertices as a bitset.
    #[inline(always)]
    pub fn undetermined(&self) -> u128 {
        vertex_mask(self.n) & !(self.included | self.excluded)
    }

    /// Iterates over the included vertices in ascending order.
    pub fn included_vertices(&self) -> impl Iterator<Item = usize> {
        members(self.included)
    }

    #[inline(always)]
    pub(crate) fn include(&mut self, v: usize) {
        debug_assert_eq!(self.state(v), VertexState::Undetermined);
        self.included |= 1u128 << v;
    }

    #[inline(always)]
    pub(crate) fn uninclude(&mut self, v: usize) {
        debug_assert_eq!(self.state(v), VertexState::Included);
        self.included &= !(1u128 << v);
    }

    #[inline(always)]
    pub(crate) fn exclude(&mut self, v: usize) {
        debug_assert_eq!(self.state(v), VertexState::Undetermined);
        self.excluded |= 1u128 << v;
    }

    /// Returns every vertex of `set` from excluded to undetermined.
    #[inline(always)]
    pub(crate) fn unexclude_all(&mut self, set: u128) {
        debug_assert_eq!(self.excluded & set, set);
        self.excluded &= !set;
    }
}
