use crate::error::ClassifyError;
use crate::labels::CLASS_NAMES;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub label: &'static str,
    pub class_index: usize,
    /// Raw arg-max score as produced by the model.
    pub score: f32,
}

impl Classification {
    /// Score as a percentage rounded to two decimals.
    pub fn confidence_percent(&self) -> f64 {
        round_percentage(self.score)
    }
}

pub struct PostProcessor {
    pub labels: &'static [&'static str],
}

impl PostProcessor {
    pub fn new(labels: &'static [&'static str]) -> Self {
        Self { labels }
    }

    /// Pick the highest score and map its index to a label.
    ///
    /// Ties resolve to the lowest index. The model output is used as-is, no
    /// softmax is applied.
    #[tracing::instrument(skip(self, scores), fields(num_scores = scores.len()))]
    pub fn classify(&self, scores: &[f32]) -> Result<Classification, ClassifyError> {
        if self.labels.is_empty() || scores.len() != self.labels.len() {
            return Err(ClassifyError::OutputShape {
                expected: self.labels.len(),
                actual: scores.len(),
            });
        }

        let mut class_index = 0usize;
        let mut max_score = f32::NEG_INFINITY;
        for (i, &score) in scores.iter().enumerate() {
            if !score.is_finite() {
                return Err(ClassifyError::NonFiniteScore { index: i });
            }
            if score > max_score {
                max_score = score;
                class_index = i;
            }
        }

        Ok(Classification {
            label: self.labels[class_index],
            class_index,
            score: max_score,
        })
    }
}

impl Default for PostProcessor {
    fn default() -> Self {
        Self::new(&CLASS_NAMES)
    }
}

/// `score * 100` rounded to two decimals, ties to even.
pub fn round_percentage(score: f32) -> f64 {
    let percent = score as f64 * 100.0;
    (percent * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax_selects_highest_score() {
        let post_processor = PostProcessor::default();
        let result = post_processor
            .classify(&[0.05, 0.10, 0.70, 0.05, 0.10])
            .unwrap();

        assert_eq!(result.class_index, 2);
        assert_eq!(result.label, "No_DR");
        assert_eq!(result.score, 0.70);
    }

    #[test]
    fn test_confidence_is_argmax_score_not_another_class() {
        let post_processor = PostProcessor::default();
        let result = post_processor
            .classify(&[0.30, 0.01, 0.02, 0.03, 0.64])
            .unwrap();

        assert_eq!(result.label, "Severe");
        assert_eq!(result.confidence_percent(), 64.0);
    }

    #[test]
    fn test_ties_resolve_to_first_index() {
        let post_processor = PostProcessor::default();
        let result = post_processor
            .classify(&[0.1, 0.4, 0.1, 0.4, 0.0])
            .unwrap();

        assert_eq!(result.class_index, 1, "First maximum wins like numpy argmax");
        assert_eq!(result.label, "Moderate");
    }

    #[test]
    fn test_raw_logits_are_accepted_without_softmax() {
        let post_processor = PostProcessor::default();
        let result = post_processor
            .classify(&[-3.0, -1.5, -2.0, -0.5, -4.0])
            .unwrap();

        assert_eq!(result.label, "Proliferative_DR");
        assert_eq!(result.score, -0.5);
    }

    #[test]
    fn test_output_length_must_match_labels() {
        let post_processor = PostProcessor::default();
        let err = post_processor.classify(&[0.5, 0.5, 0.0]).unwrap_err();

        assert!(matches!(
            err,
            ClassifyError::OutputShape {
                expected: 5,
                actual: 3
            }
        ));

        let err = post_processor.classify(&[]).unwrap_err();
        assert!(matches!(err, ClassifyError::OutputShape { actual: 0, .. }));
    }

    #[test]
    fn test_non_finite_scores_are_rejected() {
        let post_processor = PostProcessor::default();
        let err = post_processor
            .classify(&[0.1, f32::NAN, 0.2, 0.3, 0.4])
            .unwrap_err();
        assert!(matches!(err, ClassifyError::NonFiniteScore { index: 1 }));

        let err = post_processor
            .classify(&[0.1, 0.2, 0.3, 0.4, f32::INFINITY])
            .unwrap_err();
        assert!(matches!(err, ClassifyError::NonFiniteScore { index: 4 }));
    }

    #[test]
    fn test_round_percentage_two_decimals() {
        assert_eq!(round_percentage(1.0), 100.0);
        assert_eq!(round_percentage(0.0), 0.0);
        assert_eq!(round_percentage(0.5), 50.0);
        assert_eq!(round_percentage(0.87456), 87.46);
        assert_eq!(round_percentage(0.123449), 12.34);
    }

    #[test]
    fn test_round_percentage_ties_go_to_even() {
        // These scores are exact in binary, so `score * 10_000` lands on a .5
        assert_eq!(round_percentage(0.03125), 3.12);
        assert_eq!(round_percentage(0.15625), 15.62);
        assert_eq!(round_percentage(0.28125), 28.12);
        assert_eq!(round_percentage(0.53125), 53.12);
        assert_eq!(round_percentage(0.09375), 9.38);
    }

    #[test]
    fn test_empty_label_set_is_an_output_shape_error() {
        static EMPTY: [&str; 0] = [];
        let post_processor = PostProcessor::new(&EMPTY);

        let err = post_processor.classify(&[]).unwrap_err();
        assert!(matches!(
            err,
            ClassifyError::OutputShape {
                expected: 0,
                actual: 0
            }
        ));
    }

    #[test]
    fn test_custom_label_set() {
        static BINARY: [&str; 2] = ["healthy", "diseased"];
        let post_processor = PostProcessor::new(&BINARY);

        let result = post_processor.classify(&[0.2, 0.8]).unwrap();
        assert_eq!(result.label, "diseased");
    }
}
