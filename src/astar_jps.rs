//! This module implements the lazy-deletion best-first search shared by all solvers, a variant of
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html)
//! in which every node records its predecessor only once it is finalized, and the successor
//! function can inspect the finalized set so that Jump Point Search can stop its scans on it.
use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use log::debug;
use num_traits::Zero;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// A candidate node waiting in the [Frontier].
#[derive(Clone, Debug)]
pub struct OpenNode<N, C> {
    pub state: N,
    pub predecessor: N,
    /// Accumulated cost from the start.
    pub cost: C,
    /// `cost` plus the heuristic estimate to the goal.
    pub estimated_cost: C,
}

impl<N, C: PartialEq> Eq for OpenNode<N, C> {}

impl<N, C: PartialEq> PartialEq for OpenNode<N, C> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost) && self.cost.eq(&other.cost)
    }
}

impl<N, C: Ord> PartialOrd for OpenNode<N, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N, C: Ord> Ord for OpenNode<N, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // First orders per estimated cost, then creates subordering
        // based on cost, favoring nodes with the largest accumulated cost
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => self.cost.cmp(&other.cost),
            s => s,
        }
    }
}

/// Priority queue of [OpenNode]s. Pops the smallest estimated cost first and, among equal
/// estimates, the largest accumulated cost. May hold several entries for the same state.
#[derive(Clone, Debug)]
pub struct Frontier<N, C> {
    heap: BinaryHeap<OpenNode<N, C>>,
}

impl<N, C: Ord> Default for Frontier<N, C> {
    fn default() -> Self {
        Frontier {
            heap: BinaryHeap::new(),
        }
    }
}

impl<N, C: Ord> Frontier<N, C> {
    pub fn push(&mut self, node: OpenNode<N, C>) {
        self.heap.push(node);
    }
    pub fn pop(&mut self) -> Option<OpenNode<N, C>> {
        self.heap.pop()
    }
    pub fn len(&self) -> usize {
        self.heap.len()
    }
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
    /// Empties the queue but keeps its allocation.
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

/// The closed set: maps every finalized node to the node it was reached from. The start node is
/// its own predecessor. Iteration follows finalization order.
#[derive(Clone, Debug)]
pub struct VisitationStore<N> {
    predecessors: FxIndexMap<N, N>,
}

impl<N> Default for VisitationStore<N> {
    fn default() -> Self {
        VisitationStore {
            predecessors: FxIndexMap::default(),
        }
    }
}

impl<N: Eq + Hash + Clone> VisitationStore<N> {
    pub fn is_closed(&self, node: &N) -> bool {
        self.predecessors.contains_key(node)
    }
    pub fn predecessor(&self, node: &N) -> Option<&N> {
        self.predecessors.get(node)
    }
    /// Records `node` as finalized. Returns [false] without touching the store if it already was.
    pub fn finalize(&mut self, node: N, predecessor: N) -> bool {
        match self.predecessors.entry(node) {
            indexmap::map::Entry::Occupied(_) => false,
            indexmap::map::Entry::Vacant(e) => {
                e.insert(predecessor);
                true
            }
        }
    }
    pub fn len(&self) -> usize {
        self.predecessors.len()
    }
    pub fn is_empty(&self) -> bool {
        self.predecessors.is_empty()
    }
    pub fn clear(&mut self) {
        self.predecessors.clear();
    }
    /// Grows the backing map so that `additional` more nodes fit without rehashing.
    pub fn reserve(&mut self, additional: usize) {
        self.predecessors.reserve(additional);
    }
    /// Finalized nodes with their predecessors, in the order they were finalized.
    pub fn iter(&self) -> impl Iterator<Item = (&N, &N)> {
        self.predecessors.iter()
    }
    /// Walks predecessor links from `end` back to the start and returns the nodes start first.
    pub fn reconstruct(&self, end: &N) -> Vec<N> {
        let mut path = vec![end.clone()];
        let mut current = end;
        while let Some(previous) = self.predecessors.get(current) {
            if previous == current {
                break;
            }
            path.push(previous.clone());
            current = previous;
        }
        path.reverse();
        path
    }
}

/// Owns the [Frontier] and [VisitationStore] of a search. Both are cleared at the start of every
/// search but keep their allocations, and the store remains readable after the search returns.
#[derive(Clone, Debug)]
pub struct SearchContext<N, C> {
    pub frontier: Frontier<N, C>,
    pub closed: VisitationStore<N>,
}

impl<N, C: Ord> Default for SearchContext<N, C> {
    fn default() -> Self {
        SearchContext {
            frontier: Frontier::default(),
            closed: VisitationStore::default(),
        }
    }
}

impl<N, C> SearchContext<N, C>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
{
    pub fn new() -> SearchContext<N, C> {
        SearchContext::default()
    }

    /// Resets the context before a new search.
    pub fn clear(&mut self) {
        self.frontier.clear();
        self.closed.clear();
    }

    /// Runs a best-first search from `start` until `success` accepts a finalized node. Successors
    /// are produced per node as `(node, move cost)` pairs; the ones already finalized are skipped.
    /// Returns the reconstructed path and its cost, or [None] once the frontier runs dry.
    pub fn astar_jps<FN, IN, FH, FS>(
        &mut self,
        start: &N,
        mut successors: FN,
        mut heuristic: FH,
        mut success: FS,
    ) -> Option<(Vec<N>, C)>
    where
        FN: FnMut(&N, &VisitationStore<N>) -> IN,
        IN: IntoIterator<Item = (N, C)>,
        FH: FnMut(&N) -> C,
        FS: FnMut(&N) -> bool,
    {
        self.clear();
        self.frontier.push(OpenNode {
            state: start.clone(),
            predecessor: start.clone(),
            cost: Zero::zero(),
            estimated_cost: heuristic(start),
        });
        while let Some(OpenNode {
            state,
            predecessor,
            cost,
            ..
        }) = self.frontier.pop()
        {
            // A state may have been pushed several times; only its first pop counts.
            if !self.closed.finalize(state.clone(), predecessor) {
                continue;
            }
            if success(&state) {
                debug!(
                    "Goal reached after finalizing {} nodes ({} left open)",
                    self.closed.len(),
                    self.frontier.len()
                );
                return Some((self.closed.reconstruct(&state), cost));
            }
            for (successor, move_cost) in successors(&state, &self.closed) {
                if self.closed.is_closed(&successor) {
                    continue;
                }
                let new_cost = cost + move_cost;
                let h = heuristic(&successor);
                self.frontier.push(OpenNode {
                    state: successor,
                    predecessor: state.clone(),
                    cost: new_cost,
                    estimated_cost: new_cost + h,
                });
            }
        }
        debug!(
            "Frontier exhausted after finalizing {} nodes",
            self.closed.len()
        );
        None
    }
}
