//! # Ranked pairs
//!
//! Tideman's method: consider the pairwise defeats from the largest majority down and
//! lock each one in unless it would contradict what is already locked. The locked
//! relation is kept transitively closed at all times, so a contradiction check is a
//! single set lookup and the first alternative that dominates all others is the winner.
//!
//! Nodes live in a flat arena indexed by alternative and closure updates run through a
//! breadth-first worklist; the relation is a DAG by construction, but the worklist keeps
//! the propagation linear even when many locked chains share nodes.
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet, VecDeque};

use crate::data::answer::RuleError;
use crate::data::margin::Staircase;

/// A pairwise defeat: `from` beats `to` with majority `weight`.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Edge {
    from: usize,
    to: usize,
    weight: f64,
    /// Construction order; earlier edges win ties in processing order.
    sequence: usize,
}

impl Eq for Edge {}

impl Ord for Edge {
    fn cmp(&self, other: &Self) -> Ordering {
        // Margins contain no NaN by precondition. The heap pops the largest weight;
        // among equal weights, the smallest sequence.
        match self.weight.partial_cmp(&other.weight) {
            Some(Ordering::Equal) | None => other.sequence.cmp(&self.sequence),
            Some(ordering) => ordering,
        }
    }
}

impl PartialOrd for Edge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Per-alternative transitive dominance sets. Sets only grow.
#[derive(Clone, Debug, Default)]
struct DominanceNode {
    stronger_than: HashSet<usize>,
    weaker_than: HashSet<usize>,
}

/// The locked-in part of the defeat relation, transitively closed.
#[derive(Debug)]
struct DominanceGraph {
    nodes: Vec<DominanceNode>,
}

impl DominanceGraph {
    fn new(size: usize) -> Self {
        Self {
            nodes: vec![DominanceNode::default(); size],
        }
    }

    fn is_stronger(&self, node: usize, than: usize) -> bool {
        self.nodes[node].stronger_than.contains(&than)
    }

    /// The alternative dominating all others, if there is one already.
    fn winner(&self) -> Option<usize> {
        let size = self.nodes.len();
        self.nodes.iter().position(|node| node.stronger_than.len() == size - 1)
    }

    /// Lock in `dom > sub` and restore transitive closure.
    ///
    /// The caller has checked that `sub` does not already dominate `dom`, so no cycle
    /// can form.
    fn lock(&mut self, dom: usize, sub: usize) {
        debug_assert!(!self.is_stronger(sub, dom));

        let mut above = self.nodes[dom].weaker_than.clone();
        above.insert(dom);
        let mut below = self.nodes[sub].stronger_than.clone();
        below.insert(sub);

        // Everything from `sub` downwards is now weaker than everything above `dom`,
        // and vice versa.
        self.extend_downwards(sub, &above);
        self.extend_upwards(dom, &below);
    }

    /// Add `additions` to the `weaker_than` set of `start` and of every node it
    /// transitively dominates.
    fn extend_downwards(&mut self, start: usize, additions: &HashSet<usize>) {
        let mut queue = VecDeque::new();
        let mut seen = HashSet::new();
        queue.push_back(start);
        seen.insert(start);
        while let Some(node) = queue.pop_front() {
            self.nodes[node].weaker_than.extend(additions.iter().copied());
            for &next in &self.nodes[node].stronger_than {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
    }

    /// Add `additions` to the `stronger_than` set of `start` and of every node that
    /// transitively dominates it.
    fn extend_upwards(&mut self, start: usize, additions: &HashSet<usize>) {
        let mut queue = VecDeque::new();
        let mut seen = HashSet::new();
        queue.push_back(start);
        seen.insert(start);
        while let Some(node) = queue.pop_front() {
            self.nodes[node].stronger_than.extend(additions.iter().copied());
            for &next in &self.nodes[node].weaker_than {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
    }
}

/// All pairwise edges by descending weight; ties keep staircase order.
///
/// A tie (zero margin) is represented as a zero-weight defeat of the earlier
/// alternative by the later one. With `favourite` given, zero-weight edges incident
/// to it are oriented in its favour instead.
fn edge_queue(staircase: &Staircase, favourite: Option<usize>) -> BinaryHeap<Edge> {
    let mut queue = BinaryHeap::new();
    let mut sequence = 0;
    for (i, row) in staircase.rows().iter().enumerate() {
        for (j, &margin) in row.iter().enumerate() {
            let other = j + i + 1;
            let (from, to, weight) = if margin > 0_f64 {
                (i, other, margin)
            } else if margin == 0_f64 && favourite == Some(i) {
                (i, other, 0_f64)
            } else if margin == 0_f64 && favourite == Some(other) {
                (other, i, 0_f64)
            } else {
                (other, i, -margin)
            };
            queue.push(Edge { from, to, weight, sequence });
            sequence += 1;
        }
    }

    queue
}

/// The ranked-pairs winner.
///
/// # Errors
///
/// `RuleError::SearchFailed` if the queue drains without any alternative dominating all
/// others; unreachable for a complete tournament, but guarded rather than defaulted.
pub fn ranked_pairs_winner(staircase: &Staircase) -> Result<usize, RuleError> {
    let size = staircase.nr_alternatives();
    let mut queue = edge_queue(staircase, None);
    let mut graph = DominanceGraph::new(size);

    while let Some(edge) = queue.pop() {
        if !graph.is_stronger(edge.to, edge.from) {
            graph.lock(edge.from, edge.to);
        }
        if let Some(winner) = graph.winner() {
            return Ok(winner);
        }
    }

    graph.winner().ok_or(RuleError::SearchFailed)
}

/// The full ranked-pairs ranking: repeatedly take the winner and remove it.
pub fn ranked_pairs_ranking(staircase: &Staircase) -> Result<Vec<usize>, RuleError> {
    let mut stair = staircase.clone();
    let mut alive = (0..staircase.nr_alternatives()).collect::<Vec<_>>();
    let mut ranking = Vec::with_capacity(alive.len());

    while alive.len() > 1 {
        let winner = ranked_pairs_winner(&stair)?;
        ranking.push(alive[winner]);
        alive.remove(winner);
        stair.remove_alternative(winner);
    }
    ranking.push(alive[0]);

    Ok(ranking)
}

/// Whether `favourite` can win ranked pairs when every tie is broken in its favour.
///
/// Zero-weight edges incident to the favourite are oriented towards it. An edge that
/// would lock a defeat of the favourite is deferred while same-weight alternatives are
/// tried first; if it is still unresolved once its weight tier has passed, a strictly
/// heavier majority forced the decision and no tie-breaking can save the favourite.
///
/// # Errors
///
/// `RuleError::TieBreaking` when the favourite cannot win; `RuleError::SearchFailed` as
/// in [`ranked_pairs_winner`].
pub fn ranked_pairs_favours(staircase: &Staircase, favourite: usize) -> Result<(), RuleError> {
    let size = staircase.nr_alternatives();
    debug_assert!(favourite < size);

    let mut queue = edge_queue(staircase, Some(favourite));
    let mut graph = DominanceGraph::new(size);
    let mut deferred: Vec<Edge> = Vec::new();

    let lost = || {
        RuleError::TieBreaking(format!("no trivial tie-breaking possible for alternative {}", favourite))
    };

    while let Some(edge) = queue.pop() {
        // Deferred defeats from strictly heavier tiers can no longer be outrun: they
        // must have become redundant through a cycle, or the favourite has lost.
        let mut held_index = 0;
        while held_index < deferred.len() {
            if deferred[held_index].weight > edge.weight {
                let held = deferred.swap_remove(held_index);
                if !graph.is_stronger(favourite, held.from) {
                    return Err(lost());
                }
            } else {
                held_index += 1;
            }
        }

        if edge.to == favourite && !graph.is_stronger(favourite, edge.from) {
            let has_peer = queue.peek().map_or(false, |next| next.weight == edge.weight);
            if has_peer {
                deferred.push(edge);
                continue;
            }
            return Err(lost());
        }

        if !graph.is_stronger(edge.to, edge.from) {
            graph.lock(edge.from, edge.to);
        }
        if let Some(winner) = graph.winner() {
            return if winner == favourite { Ok(()) } else { Err(lost()) };
        }
    }

    for held in deferred {
        if !graph.is_stronger(favourite, held.from) {
            return Err(lost());
        }
    }

    match graph.winner() {
        Some(winner) if winner == favourite => Ok(()),
        Some(_) => Err(lost()),
        None => Err(RuleError::SearchFailed),
    }
}

#[cfg(test)]
mod test {
    use crate::algorithm::ranked_pairs::{
        ranked_pairs_favours, ranked_pairs_ranking, ranked_pairs_winner,
    };
    use crate::data::answer::RuleError;
    use crate::data::margin::Staircase;

    #[test]
    fn condorcet_winner_wins() {
        // Alternative 0 beats both others, 1 beats 2.
        let staircase = Staircase::new(vec![vec![2_f64, 2_f64], vec![2_f64]]);

        assert_eq!(ranked_pairs_winner(&staircase), Ok(0));
    }

    #[test]
    fn cycle_is_broken_by_processing_order() {
        // 0 > 1 > 2 > 0, all by one voter. Equal weights process in staircase order:
        // 0>1 and 2>0 lock, 1>2 would close the cycle and is discarded, leaving 2.
        let staircase = Staircase::new(vec![vec![1_f64, -1_f64], vec![1_f64]]);

        assert_eq!(ranked_pairs_winner(&staircase), Ok(2));
    }

    #[test]
    fn heavier_majorities_lock_first() {
        // 0 > 1 by 7; 1 > 2 by 5; 2 > 0 by 3: the two heavy defeats lock, the light
        // one is discarded.
        let staircase = Staircase::new(vec![vec![7_f64, -3_f64], vec![5_f64]]);

        assert_eq!(ranked_pairs_winner(&staircase), Ok(0));
    }

    #[test]
    fn ranking_follows_transitive_margins() {
        let staircase = Staircase::new(vec![vec![2_f64, 4_f64, 2_f64], vec![2_f64, 2_f64], vec![4_f64]]);

        assert_eq!(ranked_pairs_ranking(&staircase), Ok(vec![0, 1, 2, 3]));
    }

    #[test]
    fn tie_breaking_flips_zero_edges() {
        // 0 and 1 are tied; both beat 2. Unbiased processing hands the tie to the
        // later alternative; favouring 0 flips the zero-weight edge.
        let staircase = Staircase::new(vec![vec![0_f64, 1_f64], vec![1_f64]]);

        assert_eq!(ranked_pairs_winner(&staircase), Ok(1));
        assert_eq!(ranked_pairs_favours(&staircase, 0), Ok(()));
    }

    #[test]
    fn deferred_defeat_dissolves_in_a_cycle() {
        // 1 > 0, 0 > 2 and 2 > 1, all by five. The defeat of the favourite 0 comes up
        // first but is deferred; locking the other two makes it cycle-redundant.
        let staircase = Staircase::new(vec![vec![-5_f64, 5_f64], vec![-5_f64]]);

        assert_eq!(ranked_pairs_winner(&staircase), Ok(1));
        assert_eq!(ranked_pairs_favours(&staircase, 0), Ok(()));
    }

    #[test]
    fn forced_heavy_defeat_cannot_be_outrun() {
        // Both others beat 2 by the heaviest majorities; no tie-breaking helps.
        let staircase = Staircase::new(vec![vec![0_f64, 1_f64], vec![1_f64]]);

        assert!(matches!(
            ranked_pairs_favours(&staircase, 2),
            Err(RuleError::TieBreaking(_))
        ));
    }

    #[test]
    fn locked_relation_stays_acyclic() {
        // A cycle plus a trailing alternative; whatever wins, a full ranking exists,
        // which it would not if the locked relation contained a cycle.
        let staircase = Staircase::new(vec![
            vec![1_f64, -1_f64, 3_f64],
            vec![1_f64, 3_f64],
            vec![3_f64],
        ]);

        let ranking = ranked_pairs_ranking(&staircase).unwrap();
        assert_eq!(ranking.len(), 4);
        assert_eq!(ranking[3], 3);
    }
}
