//! # Elementary circuits and the split-cycle rule
//!
//! Split cycle weakens the defeat relation just enough to dissolve majority cycles:
//! every elementary circuit of the positive-margin digraph gets a split number, the
//! weakest margin along it, and a defeat only counts if it is stronger than the split
//! number of every cycle it lies on. Alternatives without a counting defeat against
//! them win.
//!
//! Circuit enumeration is Johnson's blocked depth-first search: one search rooted at
//! each vertex, restricted to vertices not smaller than the root so that every circuit
//! is reported exactly once (with its smallest vertex first), with the blocked set and
//! block map unblocking scheme keeping the search output-sensitive.
use std::collections::HashSet;

use crate::data::lottery::winner_lotteries;
use crate::data::margin::{MarginMatrix, Staircase};

/// All elementary circuits of the digraph with an edge `x -> y` iff `M[x][y] > 0`.
///
/// Each circuit is the list of its vertices in traversal order, starting at its
/// smallest vertex; the closing edge back to the start is implicit.
#[must_use]
pub fn elementary_cycles(margins: &MarginMatrix) -> Vec<Vec<usize>> {
    let size = margins.size();
    let successors = (0..size)
        .map(|x| (0..size).filter(|&y| margins.at(x, y) > 0_f64).collect::<Vec<_>>())
        .collect::<Vec<_>>();

    let mut cycles = Vec::new();
    let mut blocked = vec![false; size];
    let mut block_map = vec![HashSet::new(); size];
    let mut stack = Vec::new();

    for root in 0..size {
        for flag in &mut blocked {
            *flag = false;
        }
        for dependents in &mut block_map {
            dependents.clear();
        }
        circuit(root, root, &successors, &mut blocked, &mut block_map, &mut stack, &mut cycles);
        debug_assert!(stack.is_empty());
    }

    cycles
}

/// Depth-first circuit search below one root, considering only vertices `>= root`.
fn circuit(
    vertex: usize,
    root: usize,
    successors: &[Vec<usize>],
    blocked: &mut [bool],
    block_map: &mut [HashSet<usize>],
    stack: &mut Vec<usize>,
    cycles: &mut Vec<Vec<usize>>,
) -> bool {
    let mut found = false;
    stack.push(vertex);
    blocked[vertex] = true;

    for &next in &successors[vertex] {
        if next < root {
            continue;
        }
        if next == root {
            cycles.push(stack.clone());
            found = true;
        } else if !blocked[next]
            && circuit(next, root, successors, blocked, block_map, stack, cycles)
        {
            found = true;
        }
    }

    if found {
        unblock(vertex, blocked, block_map);
    } else {
        for &next in &successors[vertex] {
            if next >= root {
                block_map[next].insert(vertex);
            }
        }
    }

    stack.pop();
    found
}

/// Unblock a vertex and, transitively, everything blocked on it.
fn unblock(vertex: usize, blocked: &mut [bool], block_map: &mut [HashSet<usize>]) {
    blocked[vertex] = false;
    let dependents = block_map[vertex].drain().collect::<Vec<_>>();
    for dependent in dependents {
        if blocked[dependent] {
            unblock(dependent, blocked, block_map);
        }
    }
}

/// The split-cycle winners.
///
/// A defeat `x -> y` is retained iff its margin exceeds the maximum split number (the
/// minimum margin along the cycle) over all cycles through that edge; undefeated
/// alternatives win. Acyclic defeats are always retained, so a Condorcet winner is the
/// unique split-cycle winner.
#[must_use]
pub fn split_cycle_winners(staircase: &Staircase) -> Vec<usize> {
    let margins = MarginMatrix::from_staircase(staircase);
    let size = margins.size();

    // Per edge, the strongest cycle it lies on.
    let mut split = vec![vec![f64::NEG_INFINITY; size]; size];
    for cycle in elementary_cycles(&margins) {
        let number = cycle.iter().enumerate()
            .map(|(position, &x)| {
                let y = cycle[(position + 1) % cycle.len()];
                margins.at(x, y)
            })
            .fold(f64::INFINITY, f64::min);
        for (position, &x) in cycle.iter().enumerate() {
            let y = cycle[(position + 1) % cycle.len()];
            if number > split[x][y] {
                split[x][y] = number;
            }
        }
    }

    (0..size)
        .filter(|&y| {
            !(0..size).any(|x| {
                margins.at(x, y) > 0_f64 && margins.at(x, y) > split[x][y]
            })
        })
        .collect()
}

/// The split-cycle winners as degenerate lotteries.
#[must_use]
pub fn split_cycle_lotteries(staircase: &Staircase) -> Vec<Vec<f64>> {
    winner_lotteries(&split_cycle_winners(staircase), staircase.nr_alternatives())
}
