//! # The answer contract
//!
//! Every rule reports through the same shape: a successful [`Answer`] or a [`RuleError`].
//! Callers must not assume a result is present when a rule failed; failure carries a
//! human-readable message instead. This mirrors the wire contract of the service the
//! engine is embedded in (`{success, type, result, msg}`).
use std::error::Error;
use std::fmt;

use crate::data::lottery::ExactLottery;

/// A successful rule evaluation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "result"))]
pub enum Answer {
    /// A set of lotteries over the alternatives.
    ///
    /// Winner rules return one degenerate lottery per tied winner; the maximal-lottery
    /// rules return the corners of their polytope, sorted descending-lexicographically.
    Lotteries {
        /// The lotteries as probability vectors.
        lotteries: Vec<Vec<f64>>,
        /// Exact rational values, for the rules that can provide them.
        #[cfg_attr(feature = "serde", serde(skip))]
        exact: Option<Vec<ExactLottery>>,
    },
    /// A full preference ranking, best alternative first.
    #[cfg_attr(feature = "serde", serde(rename = "Profile"))]
    Ranking(Vec<usize>),
}

impl Answer {
    /// Degenerate winner lotteries, one per winner, without exact values.
    #[must_use]
    pub fn winners(winners: &[usize], size: usize) -> Self {
        Answer::Lotteries {
            lotteries: crate::data::lottery::winner_lotteries(winners, size),
            exact: None,
        }
    }
}

/// Why a rule failed to produce an answer.
///
/// All of these are surfaced exactly once to the caller; no variant is retried and no
/// partial result accompanies one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleError {
    /// The base linear program has no solution. Recoverable at the caller: the requested
    /// rule has no answer for this input.
    Infeasible,
    /// A wall-clock search budget was exceeded (polytope enumeration, Kemeny).
    Timeout,
    /// An expected, descriptive failure: tie-breaking for a test candidate was
    /// impossible, or an extraction stalled on unresolved ties.
    TieBreaking(String),
    /// The ranked-pairs queue was exhausted without a full winner. Should be unreachable
    /// for a complete tournament; surfaced rather than silently defaulted.
    SearchFailed,
    /// A profile-dependent rule was invoked without a profile.
    MissingProfile,
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RuleError::Infeasible => write!(f, "LP infeasible"),
            RuleError::Timeout => write!(f, "Server Timeout"),
            RuleError::TieBreaking(message) => message.fmt(f),
            RuleError::SearchFailed => write!(f, "Search failed"),
            RuleError::MissingProfile => write!(f, "this rule requires a preference profile"),
        }
    }
}

impl Error for RuleError {}

#[cfg(test)]
mod test {
    use crate::data::answer::{Answer, RuleError};

    #[test]
    fn winner_answer() {
        let answer = Answer::winners(&[1], 3);

        assert_eq!(answer, Answer::Lotteries {
            lotteries: vec![vec![0_f64, 1_f64, 0_f64]],
            exact: None,
        });
    }

    #[test]
    fn error_messages_match_the_contract() {
        assert_eq!(RuleError::Infeasible.to_string(), "LP infeasible");
        assert_eq!(RuleError::Timeout.to_string(), "Server Timeout");
        assert_eq!(RuleError::SearchFailed.to_string(), "Search failed");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn ranking_serializes_as_profile() {
        let serialized = serde_json::to_string(&Answer::Ranking(vec![2, 0, 1])).unwrap();

        assert_eq!(serialized, r#"{"type":"Profile","result":[2,0,1]}"#);
    }
}
