//! # Rule dispatch
//!
//! One entry point over every rule the crate implements. The service embedding this
//! engine dispatches an algorithm name to a handler; here that surface is a [`Rule`]
//! enum and a tagged [`Query`], so a caller cannot hand a profile-dependent rule a
//! margins-only request without getting a typed error back.
use crate::algorithm::{cycles, kemeny, polytope, ranked_pairs, schulze, scores, SearchLimits};
use crate::algorithm::solver::LinearSolver;
use crate::data::answer::{Answer, RuleError};
use crate::data::margin::Staircase;
use crate::data::profile::Profile;

/// Every rule the engine can evaluate.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rule {
    // Lottery rules on the maximal-lottery polytope.
    MaximalLottery,
    HomogeneousMaximalLottery,
    EssentialSet,
    BipartisanSet,
    // Score rules on the margins.
    Borda,
    Black,
    Minimax,
    TidemanScore,
    Nanson,
    Baldwin,
    Copeland,
    UncoveredSet,
    Condorcet,
    SplitCycle,
    // Ranking rules.
    Kemeny,
    Schulze,
    RankedPairsWinner,
    RankedPairsRanking,
    // Profile-dependent rules.
    Plurality,
    AntiPlurality,
    PluralityWithRunoff,
    InstantRunoff,
    Pareto,
    RandomDictatorship,
    ProportionalBorda,
}

/// The input of a rule evaluation.
///
/// Margins are always required; the profile only for the profile-dependent rules, the
/// exponent only for the homogeneous maximal lottery (default `1`).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Query {
    /// The pairwise majority margins.
    pub staircase: Staircase,
    /// The preference profile, for the rules that need one.
    pub profile: Option<Profile>,
    /// Rescaling exponent for the homogeneous maximal lottery.
    pub exponent: Option<f64>,
}

impl Query {
    /// A margins-only query.
    #[must_use]
    pub fn margins(staircase: Staircase) -> Self {
        Self { staircase, profile: None, exponent: None }
    }

    /// A query carrying both margins and the profile they came from.
    #[must_use]
    pub fn with_profile(staircase: Staircase, profile: Profile) -> Self {
        Self { staircase, profile: Some(profile), exponent: None }
    }
}

/// Evaluate one rule against a query.
///
/// # Errors
///
/// Every failure a rule can produce is passed through unchanged; additionally,
/// `RuleError::MissingProfile` when a profile-dependent rule is evaluated on a
/// margins-only query.
pub fn evaluate<S: LinearSolver<f64>>(
    rule: Rule,
    query: &Query,
    solver: &S,
    limits: &SearchLimits,
) -> Result<Answer, RuleError> {
    let staircase = &query.staircase;
    let size = staircase.nr_alternatives();

    match rule {
        Rule::MaximalLottery => polytope::maximal_lottery(staircase, solver, limits),
        Rule::HomogeneousMaximalLottery => {
            let exponent = query.exponent.unwrap_or(1_f64);
            polytope::homogeneous_maximal_lottery(staircase, exponent, solver, limits)
        },
        Rule::EssentialSet => polytope::essential_set(staircase, solver, limits),
        Rule::BipartisanSet => polytope::bipartisan_set(staircase, solver, limits),

        Rule::Borda => Ok(Answer::winners(&scores::borda(staircase), size)),
        Rule::Black => Ok(Answer::winners(&scores::black(staircase), size)),
        Rule::Minimax => Ok(Answer::winners(&scores::minimax(staircase), size)),
        Rule::TidemanScore => Ok(Answer::winners(&scores::tideman_score(staircase), size)),
        Rule::Nanson => Ok(Answer::winners(&scores::nanson(staircase), size)),
        Rule::Baldwin => Ok(Answer::winners(&scores::baldwin(staircase), size)),
        Rule::Copeland => Ok(Answer::winners(&scores::copeland(staircase), size)),
        Rule::UncoveredSet => Ok(Answer::winners(&scores::uncovered_set(staircase), size)),
        Rule::Condorcet => match scores::condorcet_winner(staircase) {
            Some(winner) => Ok(Answer::winners(&[winner], size)),
            None => Err(RuleError::TieBreaking("there is no Condorcet winner".to_string())),
        },
        Rule::SplitCycle => Ok(Answer::Lotteries {
            lotteries: cycles::split_cycle_lotteries(staircase),
            exact: None,
        }),

        Rule::Kemeny => {
            let (ranking, _) = kemeny::kemeny_ranking(staircase, limits)?;
            Ok(Answer::Ranking(ranking))
        },
        Rule::Schulze => Ok(Answer::Ranking(schulze::schulze_ranking(staircase)?)),
        Rule::RankedPairsWinner => {
            let winner = ranked_pairs::ranked_pairs_winner(staircase)?;
            Ok(Answer::winners(&[winner], size))
        },
        Rule::RankedPairsRanking => {
            Ok(Answer::Ranking(ranked_pairs::ranked_pairs_ranking(staircase)?))
        },

        Rule::Plurality => Ok(Answer::winners(&scores::plurality(profile(query)?), size)),
        Rule::AntiPlurality => {
            Ok(Answer::winners(&scores::anti_plurality(profile(query)?), size))
        },
        Rule::PluralityWithRunoff => {
            Ok(Answer::winners(&scores::plurality_with_runoff(profile(query)?), size))
        },
        Rule::InstantRunoff => {
            Ok(Answer::winners(&scores::instant_runoff(profile(query)?), size))
        },
        Rule::Pareto => Ok(Answer::winners(&scores::pareto(profile(query)?), size)),
        Rule::RandomDictatorship => {
            let (lottery, exact) = scores::random_dictatorship(profile(query)?);
            Ok(Answer::Lotteries { lotteries: vec![lottery], exact: Some(vec![exact]) })
        },
        Rule::ProportionalBorda => {
            let (lottery, exact) = scores::proportional_borda(profile(query)?);
            Ok(Answer::Lotteries { lotteries: vec![lottery], exact: Some(vec![exact]) })
        },
    }
}

fn profile(query: &Query) -> Result<&Profile, RuleError> {
    query.profile.as_ref().ok_or(RuleError::MissingProfile)
}
