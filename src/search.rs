//! Breadth-first search over an implicit graph given by a successor function, in the
//! shape of [pathfinding's bfs](https://docs.rs/pathfinding/latest/pathfinding/directed/bfs/index.html).
//! Nodes are stored once in an insertion-ordered map from node to the index of the
//! node it was reached from, so the queue only has to carry indices.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::Vacant;
use indexmap::IndexMap;
use std::collections::VecDeque;
use std::hash::Hash;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

const NO_PARENT: usize = usize::MAX;

fn reverse_path<N>(parents: &FxIndexMap<N, usize>, end: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
{
    let mut path: Vec<N> = std::iter::successors(Some(end), |&ix| {
        parents
            .get_index(ix)
            .map(|(_, &parent)| parent)
            .filter(|&parent| parent != NO_PARENT)
    })
    .filter_map(|ix| parents.get_index(ix).map(|(node, _)| node.clone()))
    .collect();
    path.reverse();
    path
}

/// Returns the nodes from `start` to the first dequeued node accepted by `success`,
/// both ends included, or [None] once everything reachable has been seen.
///
/// Nodes are marked as seen when queued, so each is expanded at most once and the
/// returned path has the fewest possible edges. Among equally short paths the one
/// found through the earliest successors wins.
pub fn bfs<N, FN, IN, FS>(start: &N, mut successors: FN, mut success: FS) -> Option<Vec<N>>
where
    N: Eq + Hash + Clone,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = N>,
    FS: FnMut(&N) -> bool,
{
    let mut parents: FxIndexMap<N, usize> = FxIndexMap::default();
    parents.insert(start.clone(), NO_PARENT);
    let mut to_see = VecDeque::from([0]);
    while let Some(index) = to_see.pop_front() {
        let successors = {
            let (node, _) = parents.get_index(index)?;
            if success(node) {
                return Some(reverse_path(&parents, index));
            }
            successors(node)
        };
        for successor in successors {
            if let Vacant(e) = parents.entry(successor) {
                to_see.push_back(e.index());
                e.insert(index);
            }
        }
    }
    None
}

/// Number of nodes reachable from `start`, itself included.
pub fn reachable_count<N, FN, IN>(start: &N, successors: FN) -> usize
where
    N: Eq + Hash + Clone,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = N>,
{
    let mut count = 0;
    bfs(start, successors, |_| {
        count += 1;
        false
    });
    count
}
