use std::cmp::Ordering;
use std::collections::BinaryHeap;

use gridnav_core::NodeId;

// ---------------------------------------------------------------------------
// SearchState
// ---------------------------------------------------------------------------

/// Per-node A* bookkeeping: cost so far (`g`), estimate to goal (`h`), their
/// sum (`f`), and the predecessor on the best known path.
///
/// `f` has no setter of its own; it is recomputed whenever `g` and `h` are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchState {
    g: i32,
    h: i32,
    f: i32,
    parent: Option<NodeId>,
}

impl SearchState {
    /// Sentinel cost of a node no search has reached.
    pub const INFINITE: i32 = i32::MAX;

    /// The "unsearched" state.
    pub const UNSEARCHED: Self = Self {
        g: Self::INFINITE,
        h: Self::INFINITE,
        f: Self::INFINITE,
        parent: None,
    };

    #[inline]
    pub fn g(&self) -> i32 {
        self.g
    }

    #[inline]
    pub fn h(&self) -> i32 {
        self.h
    }

    #[inline]
    pub fn f(&self) -> i32 {
        self.f
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Whether any search has written to this state since the last reset.
    #[inline]
    pub fn is_searched(&self) -> bool {
        *self != Self::UNSEARCHED
    }

    /// Set `g` and `h` together and recompute `f = g + h`.
    #[inline]
    pub fn set_search_cost(&mut self, g: i32, h: i32) {
        self.g = g;
        self.h = h;
        self.f = g.saturating_add(h);
    }

    #[inline]
    pub fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    /// Return to [`UNSEARCHED`](Self::UNSEARCHED).
    #[inline]
    pub fn reset_search_state(&mut self) {
        *self = Self::UNSEARCHED;
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self::UNSEARCHED
    }
}

// ---------------------------------------------------------------------------
// Open set
// ---------------------------------------------------------------------------

/// Which search set a node currently belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Membership {
    #[default]
    None,
    /// In the open set; `seq` identifies the one live heap entry.
    Open { seq: u64 },
    Closed,
}

/// Heap entry, ordered so `BinaryHeap` (a max-heap) pops the smallest `f`
/// first and, among equal `f`, the earliest insertion first.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) id: NodeId,
    pub(crate) f: i32,
    pub(crate) seq: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        other.f.cmp(&self.f).then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// SearchContext
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default)]
struct Record {
    state: SearchState,
    membership: Membership,
    touched: bool,
}

/// Scratch state of one A* search, keyed by [`NodeId`].
///
/// The context lives outside the grid, so any number of contexts can search
/// the same grid at once. Allocations are kept between searches; the
/// records themselves are reset after every search, touched nodes only.
#[derive(Debug, Default)]
pub struct SearchContext {
    records: Vec<Record>,
    touched: Vec<NodeId>,
    open: BinaryHeap<NodeRef>,
    next_seq: u64,
    expanded: usize,
}

impl SearchContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make room for a grid of `len` nodes.
    pub(crate) fn prepare(&mut self, len: usize) {
        if self.records.len() < len {
            self.records.resize(len, Record::default());
        }
    }

    /// Search state of `id`; unknown ids read as unsearched.
    pub fn state(&self, id: NodeId) -> SearchState {
        self.records
            .get(id.index())
            .map_or(SearchState::UNSEARCHED, |r| r.state)
    }

    /// Set membership of `id`; unknown ids read as [`Membership::None`].
    pub fn membership(&self, id: NodeId) -> Membership {
        self.records
            .get(id.index())
            .map_or(Membership::None, |r| r.membership)
    }

    /// Number of nodes expanded by the search in progress.
    #[inline]
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Whether no record carries search state. Always true between searches.
    pub fn is_clean(&self) -> bool {
        self.touched.is_empty()
            && self.open.is_empty()
            && self
                .records
                .iter()
                .all(|r| !r.state.is_searched() && r.membership == Membership::None)
    }

    /// Write the cost and parent of `id`, keeping `f = g + h`.
    pub(crate) fn update(&mut self, id: NodeId, g: i32, h: i32, parent: Option<NodeId>) {
        let rec = self.touch(id);
        rec.state.set_search_cost(g, h);
        rec.state.set_parent(parent);
    }

    /// Put `id` in the open set at its current `f`, invalidating any older
    /// heap entry for it.
    pub(crate) fn push_open(&mut self, id: NodeId) {
        let seq = self.next_seq;
        self.next_seq += 1;
        let rec = &mut self.records[id.index()];
        rec.membership = Membership::Open { seq };
        self.open.push(NodeRef {
            id,
            f: rec.state.f(),
            seq,
        });
    }

    /// Pop the live open entry with the lowest `f`, skipping stale ones.
    pub(crate) fn pop_open(&mut self) -> Option<NodeId> {
        while let Some(entry) = self.open.pop() {
            let rec = &mut self.records[entry.id.index()];
            if rec.membership == (Membership::Open { seq: entry.seq }) {
                rec.membership = Membership::None;
                return Some(entry.id);
            }
        }
        None
    }

    pub(crate) fn close(&mut self, id: NodeId) {
        self.touch(id).membership = Membership::Closed;
    }

    fn touch(&mut self, id: NodeId) -> &mut Record {
        let rec = &mut self.records[id.index()];
        if !rec.touched {
            rec.touched = true;
            self.touched.push(id);
        }
        rec
    }

    pub(crate) fn count_expansion(&mut self) {
        self.expanded += 1;
    }

    /// Return every touched record to the unsearched state.
    pub(crate) fn reset(&mut self) {
        let n = self.touched.len();
        for id in self.touched.drain(..) {
            self.records[id.index()] = Record::default();
        }
        self.open.clear();
        self.next_seq = 0;
        self.expanded = 0;
        log::trace!("astar: reset {n} touched nodes");
    }
}
