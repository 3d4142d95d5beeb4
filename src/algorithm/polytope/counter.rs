//! # Feasibility-pruned counting
//!
//! The vertex enumerator walks all combinations of tight constraints: integers from one
//! up to `2^k`, each bit deciding whether one constraint is forced to equality. Tight
//! constraint sets are monotone (if a set of equalities is infeasible, so is every
//! superset), so once a combination turns out infeasible, all its bitwise supersets can
//! be skipped without solving anything.
/// Counts through the non-empty subsets of a set of constraints, skipping every
/// superset of a combination that was marked infeasible.
#[derive(Debug)]
pub struct FeasibilityCounter {
    /// The next state to hand out, if not pruned.
    current: u64,
    /// Exclusive upper bound, `2^flags`.
    max: u64,
    /// The state most recently returned by [`next`](Self::next).
    previous: u64,
    flags: usize,
    infeasible_masks: Vec<u64>,
}

impl FeasibilityCounter {
    /// A counter over all non-empty subsets of `flags` constraints.
    ///
    /// The empty state (no tight constraints) is never produced: it corresponds to the
    /// caller's initial, unmodified solve.
    #[must_use]
    pub fn new(flags: usize) -> Self {
        debug_assert!(flags < u64::BITS as usize);

        Self {
            current: 1,
            max: 1 << flags,
            previous: 0,
            flags,
            infeasible_masks: Vec::new(),
        }
    }

    /// Whether an unpruned state remains.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current < self.max
    }

    /// Hand out the current state as per-constraint flags and advance past all states
    /// that are supersets of a known infeasible one.
    pub fn next(&mut self) -> Vec<bool> {
        self.previous = self.current;
        let state = (0..self.flags)
            .map(|i| self.current & (1 << i) > 0)
            .collect();

        loop {
            self.current += 1;
            if !self.is_pruned(self.current) {
                break;
            }
        }

        state
    }

    /// Record that the last state handed out was infeasible, pruning all its supersets.
    ///
    /// The counter had already advanced when the state was handed out, so the position
    /// it sits on may itself be a superset of the new mask; it is moved along until it
    /// is not.
    pub fn mark_infeasible(&mut self) {
        self.infeasible_masks.push(self.previous);
        while self.is_pruned(self.current) {
            self.current += 1;
        }
    }

    fn is_pruned(&self, state: u64) -> bool {
        self.infeasible_masks.iter().any(|&mask| state & mask == mask)
    }

    /// The integer key of the last state handed out.
    #[must_use]
    pub fn previous_state(&self) -> u64 {
        self.previous
    }
}

#[cfg(test)]
mod test {
    use proptest::collection::vec;
    use proptest::prelude::*;

    use crate::algorithm::polytope::counter::FeasibilityCounter;

    /// Collect all remaining states, marking those in `infeasible` as they appear.
    fn drain(counter: &mut FeasibilityCounter, infeasible: &[u64]) -> Vec<u64> {
        let mut states = Vec::new();
        while counter.has_next() {
            counter.next();
            states.push(counter.previous_state());
            if infeasible.contains(&counter.previous_state()) {
                counter.mark_infeasible();
            }
        }

        states
    }

    #[test]
    fn without_marks_all_states_appear_in_order() {
        let mut counter = FeasibilityCounter::new(3);

        assert_eq!(drain(&mut counter, &[]), (1..8).collect::<Vec<_>>());
        assert!(!counter.has_next());
    }

    #[test]
    fn bit_decomposition_is_least_significant_first() {
        let mut counter = FeasibilityCounter::new(3);

        assert_eq!(counter.next(), vec![true, false, false]);
        assert_eq!(counter.next(), vec![false, true, false]);
        assert_eq!(counter.next(), vec![true, true, false]);
    }

    #[test]
    fn marking_a_single_bit_prunes_every_superset() {
        // Mark the state where only constraint 2 is tight: afterwards no state with
        // bit 2 set may appear.
        let mut counter = FeasibilityCounter::new(3);
        let states = drain(&mut counter, &[0b100]);

        assert_eq!(states, vec![0b001, 0b010, 0b011, 0b100]);
    }

    #[test]
    fn overlapping_masks_compose() {
        let states = drain(&mut FeasibilityCounter::new(4), &[0b0011, 0b0100]);

        assert_eq!(states, vec![
            0b0001, 0b0010, 0b0011, 0b0100, 0b1000, 0b1001, 0b1010,
        ]);
    }

    proptest! {
        /// No returned state is a superset of any marked mask, every unpruned state in
        /// `[1, 2^k)` is returned exactly once, and the order is strictly increasing.
        #[test]
        fn monotone_pruning_is_sound_and_complete(
            flags in 1_usize..8,
            marks in vec(1_u64..128, 0..6),
        ) {
            let max = 1_u64 << flags;
            let marks = marks.into_iter().filter(|&m| m < max).collect::<Vec<_>>();
            let mut counter = FeasibilityCounter::new(flags);
            let states = drain(&mut counter, &marks);

            for window in states.windows(2) {
                prop_assert!(window[0] < window[1]);
            }

            for state in 1..max {
                // A mark only prunes states that come after it.
                let pruned = marks.iter()
                    .any(|&mask| mask < state && state & mask == mask);
                prop_assert_eq!(
                    states.contains(&state),
                    !pruned,
                    "state {} pruned by {:?}", state, marks
                );
            }
        }
    }
}
