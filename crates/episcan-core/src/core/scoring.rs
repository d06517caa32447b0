use super::candidate::EpitopeCandidate;
use super::sequence::NormalizedSequence;
use thiserror::Error;

pub const DEFAULT_WINDOW: usize = 9;
pub const DEFAULT_THRESHOLD: f64 = 0.3;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScoringError {
    #[error("Window size must be at least 1")]
    ZeroWindow,
}

/// Sliding-window hydrophilicity scorer.
///
/// Every window of `window` residues whose hydrophilic fraction is at least
/// `threshold` becomes a candidate. Overlapping windows are all reported, in
/// ascending start order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpitopeScorer {
    window: usize,
    threshold: f64,
}

impl EpitopeScorer {
    pub fn new(window: usize, threshold: f64) -> Result<Self, ScoringError> {
        if window == 0 {
            return Err(ScoringError::ZeroWindow);
        }
        Ok(Self { window, threshold })
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn scan(&self, sequence: &NormalizedSequence) -> Vec<EpitopeCandidate> {
        if sequence.len() < self.window {
            return Vec::new();
        }

        (0..=sequence.len() - self.window)
            .filter_map(|i| {
                let peptide = sequence.window(i, self.window)?;
                let fraction =
                    NormalizedSequence::hydrophilic_count(peptide) as f64 / self.window as f64;
                // Qualification uses the unrounded fraction.
                (fraction >= self.threshold).then(|| EpitopeCandidate {
                    peptide: peptide.iter().collect(),
                    start: i + 1,
                    end: i + self.window,
                    score: round_score(fraction),
                })
            })
            .collect()
    }
}

impl Default for EpitopeScorer {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Scores `sequence` (case-insensitively) and returns every qualifying window.
///
/// Sequences shorter than `window` yield an empty result. A zero `window` is
/// rejected.
pub fn predict_epitopes(
    sequence: &str,
    window: usize,
    threshold: f64,
) -> Result<Vec<EpitopeCandidate>, ScoringError> {
    let scorer = EpitopeScorer::new(window, threshold)?;
    Ok(scorer.scan(&NormalizedSequence::new(sequence)))
}

/// Rounds to two decimals from the exact binary value of `fraction`, ties to even.
pub fn round_score(fraction: f64) -> f64 {
    format!("{:.2}", fraction).parse().unwrap_or(fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn sequence_shorter_than_window_yields_nothing() {
        for threshold in [0.0, 0.1, 0.3, 1.0] {
            let result = predict_epitopes("ELDKWAS", 9, threshold).unwrap();
            assert!(result.is_empty());
        }
    }

    #[test]
    fn empty_sequence_yields_nothing() {
        assert!(predict_epitopes("", 9, 0.3).unwrap().is_empty());
        assert!(predict_epitopes("", 1, 0.0).unwrap().is_empty());
    }

    #[test]
    fn fully_hydrophilic_window_scores_one() {
        let result = predict_epitopes("KRDEQNKRD", 9, 0.3).unwrap();
        assert_eq!(
            result,
            vec![EpitopeCandidate {
                peptide: "KRDEQNKRD".to_string(),
                start: 1,
                end: 9,
                score: 1.0,
            }]
        );
    }

    #[test]
    fn fully_hydrophobic_window_is_rejected() {
        assert!(predict_epitopes("AAAAAAAAA", 9, 0.3).unwrap().is_empty());
    }

    #[test]
    fn sparse_hydrophilic_residues_at_both_ends() {
        let sequence = format!("{}{}", "KAAAAAAAA", "AAAAAAAAK");
        let result = predict_epitopes(&sequence, 9, 0.1).unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!((result[0].start, result[0].end), (1, 9));
        assert_eq!((result[1].start, result[1].end), (10, 18));
        assert!(result.iter().all(|c| f64_approx_equal(c.score, 0.11)));
        assert_eq!(result[0].peptide, "KAAAAAAAA");
        assert_eq!(result[1].peptide, "AAAAAAAAK");
    }

    #[test]
    fn overlapping_windows_are_all_retained_in_scan_order() {
        let result = predict_epitopes("KKKKKKKKKKK", 9, 0.5).unwrap();
        let starts: Vec<_> = result.iter().map(|c| c.start).collect();
        assert_eq!(starts, vec![1, 2, 3]);
    }

    #[test]
    fn scoring_is_case_insensitive() {
        let lower = predict_epitopes("ekd", 2, 0.3).unwrap();
        let upper = predict_epitopes("EKD", 2, 0.3).unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower[0].peptide, "EK");

        let mixed = predict_epitopes("mKtAyIaKqRqIsFvKsHfSrQ", 9, 0.3).unwrap();
        let shouted = predict_epitopes("MKTAYIAKQRQISFVKSHFSRQ", 9, 0.3).unwrap();
        assert_eq!(mixed, shouted);
    }

    #[test]
    fn candidate_length_always_matches_window() {
        let sequence = "MKTAYIAKQRQISFVKSHFSRQLEERLGLIEVQAPILSRVGDGTQDNLSGAEKAVQVKVKALPDAQ";
        for window in 1..=15 {
            for candidate in predict_epitopes(sequence, window, 0.2).unwrap() {
                assert_eq!(candidate.end - candidate.start + 1, window);
                assert_eq!(candidate.peptide.chars().count(), window);
            }
        }
    }

    #[test]
    fn scores_are_bounded_and_have_two_decimals() {
        let sequence = "MKTAYIAKQRQISFVKSHFSRQLEERLGLIEVQAPILSRVGDGTQDNLSGAEKAVQVKVKALPDAQ";
        for window in [3, 7, 9, 11] {
            for candidate in predict_epitopes(sequence, window, 0.0).unwrap() {
                assert!((0.0..=1.0).contains(&candidate.score));
                let scaled = candidate.score * 100.0;
                assert!(f64_approx_equal(scaled, scaled.round()));
            }
        }
    }

    #[test]
    fn raising_threshold_yields_a_subset() {
        let sequence = "MKTAYIAKQRQISFVKSHFSRQLEERLGLIEVQAPILSRVGDGTQDNLSGAEKAVQVKVKALPDAQ";
        let thresholds: Vec<f64> = (1..=10).map(|t| t as f64 / 10.0).collect();
        for pair in thresholds.windows(2) {
            let low = predict_epitopes(sequence, 9, pair[0]).unwrap();
            let high = predict_epitopes(sequence, 9, pair[1]).unwrap();
            assert!(high.len() <= low.len());
            assert!(high.iter().all(|c| low.contains(c)));
        }
    }

    #[test]
    fn qualification_uses_unrounded_fraction() {
        // 3/9 = 0.333.. qualifies for a 0.333 threshold but reports 0.33.
        let result = predict_epitopes("KKKAAAAAA", 9, 0.333).unwrap();
        assert_eq!(result.len(), 1);
        assert!(f64_approx_equal(result[0].score, 0.33));
    }

    #[test]
    fn threshold_is_inclusive() {
        let result = predict_epitopes("KKKAAAAAAA", 10, 0.3).unwrap();
        assert_eq!(result.len(), 1);
        assert!(f64_approx_equal(result[0].score, 0.3));
    }

    #[test]
    fn unbounded_thresholds_are_accepted() {
        let sequence = "KRDEQNKRD";
        assert_eq!(predict_epitopes(sequence, 3, -1.0).unwrap().len(), 7);
        assert!(predict_epitopes(sequence, 3, 1.5).unwrap().is_empty());
        assert!(predict_epitopes(sequence, 3, f64::NAN).unwrap().is_empty());
    }

    #[test]
    fn non_standard_characters_score_as_non_hydrophilic() {
        let result = predict_epitopes("K*X1", 4, 0.25).unwrap();
        assert_eq!(result.len(), 1);
        assert!(f64_approx_equal(result[0].score, 0.25));
    }

    #[test]
    fn zero_window_is_rejected() {
        assert_eq!(
            predict_epitopes("KRDEQN", 0, 0.3),
            Err(ScoringError::ZeroWindow)
        );
        assert!(EpitopeScorer::new(0, 0.3).is_err());
    }

    #[test]
    fn default_scorer_uses_nine_residue_window() {
        let scorer = EpitopeScorer::default();
        assert_eq!(scorer.window(), DEFAULT_WINDOW);
        assert!(f64_approx_equal(scorer.threshold(), DEFAULT_THRESHOLD));
    }

    #[test]
    fn round_score_rounds_ties_to_even() {
        assert!(f64_approx_equal(round_score(1.0 / 9.0), 0.11));
        assert!(f64_approx_equal(round_score(2.0 / 3.0), 0.67));
        assert!(f64_approx_equal(round_score(1.0 / 8.0), 0.12));
        assert!(f64_approx_equal(round_score(3.0 / 8.0), 0.38));
        assert!(f64_approx_equal(round_score(1.0), 1.0));
        assert!(f64_approx_equal(round_score(0.0), 0.0));
    }

    #[test]
    fn round_score_uses_exact_binary_value() {
        // 1/40 is stored slightly above 0.025, 3/40 slightly below 0.075.
        assert!(f64_approx_equal(round_score(1.0 / 40.0), 0.03));
        assert!(f64_approx_equal(round_score(3.0 / 40.0), 0.07));
        assert!(f64_approx_equal(round_score(2.0 / 80.0), 0.03));
        assert!(f64_approx_equal(round_score(6.0 / 80.0), 0.07));
    }

    #[test]
    fn long_window_scores_round_from_stored_fraction() {
        let one = format!("K{}", "A".repeat(39));
        let result = predict_epitopes(&one, 40, 0.0).unwrap();
        assert!(f64_approx_equal(result[0].score, 0.03));

        let three = format!("KKK{}", "A".repeat(37));
        let result = predict_epitopes(&three, 40, 0.0).unwrap();
        assert!(f64_approx_equal(result[0].score, 0.07));

        let six = format!("KKKKKK{}", "A".repeat(74));
        let result = predict_epitopes(&six, 80, 0.0).unwrap();
        assert!(f64_approx_equal(result[0].score, 0.07));
    }
}
