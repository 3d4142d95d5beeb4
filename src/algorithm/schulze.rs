//! # The Schulze method
//!
//! Replaces every pairwise margin by the strength of the widest path between the two
//! alternatives: a Floyd–Warshall pass where addition is `min` (a path is as strong as
//! its weakest link) and the path choice is `max`. The resulting sign matrix is cycle
//! free, and a ranking is read off it by repeatedly extracting the alternative beating
//! the most remaining ones.
use crate::data::answer::RuleError;
use crate::data::margin::{MarginMatrix, Staircase};

/// The Schulze ranking, best alternative first.
///
/// # Errors
///
/// `RuleError::TieBreaking` when extraction stalls: several remaining alternatives are
/// tied on beat counts, so no strict ranking is supported by the widest-path margins.
pub fn schulze_ranking(staircase: &Staircase) -> Result<Vec<usize>, RuleError> {
    let size = staircase.nr_alternatives();
    let margins = MarginMatrix::from_staircase(staircase);

    // Positive margins are the direct path strengths.
    let mut power = margins.rows().iter()
        .map(|row| row.iter().map(|&margin| margin.max(0_f64)).collect::<Vec<_>>())
        .collect::<Vec<_>>();

    for i in 0..size {
        for j in 0..size {
            if j != i {
                for k in 0..size {
                    if k != i && k != j {
                        power[j][k] = power[j][k].max(power[j][i].min(power[i][k]));
                    }
                }
            }
        }
    }

    // The Schulze majority margins: only the sign of the widest-path comparison counts.
    let derived = (0..size)
        .map(|a| (0..size).map(|b| sign(power[a][b] - power[b][a])).collect::<Vec<_>>())
        .collect::<Vec<_>>();

    extract_ranking(&derived)
}

/// Repeatedly pull out the alternative with the highest count of positive margins
/// against the remaining ones; a tie for that count means the margins support no
/// strict ranking.
fn extract_ranking(derived: &[Vec<f64>]) -> Result<Vec<usize>, RuleError> {
    let mut alive = (0..derived.len()).collect::<Vec<_>>();
    let mut ranking = Vec::with_capacity(alive.len());

    while !alive.is_empty() {
        let counts = alive.iter()
            .map(|&a| alive.iter().filter(|&&b| b != a && derived[a][b] > 0_f64).count())
            .collect::<Vec<_>>();
        let highest = counts.iter().copied().max().unwrap_or(0);
        if counts.iter().filter(|&&count| count == highest).count() > 1 {
            return Err(RuleError::TieBreaking(
                "the Schulze method cannot find enough dominant edges".to_string(),
            ));
        }

        let position = counts.iter().position(|&count| count == highest)
            .expect("the maximum is attained");
        ranking.push(alive[position]);
        alive.remove(position);
    }

    Ok(ranking)
}

fn sign(value: f64) -> f64 {
    if value > 0_f64 {
        1_f64
    } else if value < 0_f64 {
        -1_f64
    } else {
        0_f64
    }
}

#[cfg(test)]
mod test {
    use crate::algorithm::schulze::schulze_ranking;
    use crate::data::answer::RuleError;
    use crate::data::margin::Staircase;

    #[test]
    fn transitive_margins_rank_directly() {
        let staircase = Staircase::new(vec![vec![2_f64, 4_f64], vec![2_f64]]);

        assert_eq!(schulze_ranking(&staircase), Ok(vec![0, 1, 2]));
    }

    #[test]
    fn widest_paths_break_the_cycle() {
        // 0 > 1 by 3, 1 > 2 by 5, 2 > 0 by 1: the widest path from 0 to 2 (via 1, of
        // strength 3) beats the direct defeat of strength 1, so 0 ranks first.
        let staircase = Staircase::new(vec![vec![3_f64, -1_f64], vec![5_f64]]);

        assert_eq!(schulze_ranking(&staircase), Ok(vec![0, 1, 2]));
    }

    #[test]
    fn full_tie_stalls_extraction() {
        let staircase = Staircase::new(vec![vec![0_f64, 0_f64], vec![0_f64]]);

        assert!(matches!(
            schulze_ranking(&staircase),
            Err(RuleError::TieBreaking(_))
        ));
    }
}
