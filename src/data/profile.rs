//! # Preference profiles
//!
//! Some rules cannot be computed from the majority margins alone (plurality scores, for
//! example, are invisible in pairwise comparisons). Those take a profile: a list of
//! complete preference orders, each cast by a number of voters.

/// One preference order and how many voters cast it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ballot {
    /// Alternatives from most to least preferred; a permutation of `0..n`.
    order: Vec<usize>,
    /// How many voters cast exactly this order.
    voters: u64,
}

impl Ballot {
    /// A new ballot.
    #[must_use]
    pub fn new(order: Vec<usize>, voters: u64) -> Self {
        Self { order, voters }
    }

    /// The preference order, most preferred first.
    #[must_use]
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// The number of voters behind this order.
    #[must_use]
    pub fn voters(&self) -> u64 {
        self.voters
    }

    /// Position of an alternative in this order (`0` is most preferred).
    #[must_use]
    pub fn position_of(&self, alternative: usize) -> usize {
        self.order.iter().position(|&x| x == alternative)
            .expect("ballot orders are permutations of the alternatives")
    }
}

/// A complete preference profile.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Profile {
    ballots: Vec<Ballot>,
}

impl Profile {
    /// Wrap ballots into a profile.
    ///
    /// Every ballot should order the same set of alternatives; this is a precondition,
    /// checked by `debug_assert!` only.
    #[must_use]
    pub fn new(ballots: Vec<Ballot>) -> Self {
        debug_assert!(ballots.windows(2).all(|w| w[0].order.len() == w[1].order.len()));

        Self { ballots }
    }

    /// All ballots.
    #[must_use]
    pub fn ballots(&self) -> &[Ballot] {
        &self.ballots
    }

    /// The number of alternatives being ordered.
    #[must_use]
    pub fn nr_alternatives(&self) -> usize {
        self.ballots.first().map_or(0, |ballot| ballot.order.len())
    }

    /// Total number of voters across all ballots.
    #[must_use]
    pub fn total_voters(&self) -> u64 {
        self.ballots.iter().map(Ballot::voters).sum()
    }

    /// Per alternative, the number of voters ranking it first.
    #[must_use]
    pub fn first_place_counts(&self) -> Vec<u64> {
        let mut counts = vec![0; self.nr_alternatives()];
        for ballot in &self.ballots {
            counts[ballot.order[0]] += ballot.voters;
        }

        counts
    }

    /// Per alternative, the number of voters ranking it last.
    #[must_use]
    pub fn last_place_counts(&self) -> Vec<u64> {
        let mut counts = vec![0; self.nr_alternatives()];
        for ballot in &self.ballots {
            if let Some(&last) = ballot.order.last() {
                counts[last] += ballot.voters;
            }
        }

        counts
    }

    /// First-place counts when only the `alive` alternatives remain standing.
    ///
    /// A ballot's vote moves to its highest-ranked alternative that is still alive.
    #[must_use]
    pub fn first_place_counts_among(&self, alive: &[bool]) -> Vec<u64> {
        let mut counts = vec![0; self.nr_alternatives()];
        for ballot in &self.ballots {
            if let Some(&favorite) = ballot.order.iter().find(|&&x| alive[x]) {
                counts[favorite] += ballot.voters;
            }
        }

        counts
    }

    /// The number of voters strictly preferring `a` over `b`.
    #[must_use]
    pub fn prefer_count(&self, a: usize, b: usize) -> u64 {
        self.ballots.iter()
            .filter(|ballot| ballot.position_of(a) < ballot.position_of(b))
            .map(Ballot::voters)
            .sum()
    }
}
