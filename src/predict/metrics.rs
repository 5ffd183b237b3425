//! Held-out evaluation: overall accuracy plus precision, recall and F1 per class.

use std::collections::BTreeSet;
use std::fmt;

use smartcore::metrics::accuracy;

/// Scores for a single label.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassMetrics {
    pub label: i32,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Number of true instances of the label.
    pub support: usize,
}

/// Per-class metrics for every label that appears in either vector.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport {
    pub accuracy: f64,
    pub classes: Vec<ClassMetrics>,
}

impl ClassificationReport {
    /// Compare predictions against ground truth. Ratios with a zero
    /// denominator are reported as `0.0`.
    ///
    /// `y_true` and `y_pred` must have the same length.
    pub fn new(y_true: &Vec<i32>, y_pred: &Vec<i32>) -> Self {
        debug_assert_eq!(y_true.len(), y_pred.len(), "label vectors differ in length");

        let acc = if y_true.is_empty() {
            0.0
        } else {
            accuracy(y_true, y_pred)
        };

        let labels: BTreeSet<i32> = y_true.iter().chain(y_pred.iter()).copied().collect();
        let classes = labels
            .into_iter()
            .map(|label| {
                let mut tp = 0usize;
                let mut fp = 0usize;
                let mut fn_ = 0usize;
                for (t, p) in y_true.iter().zip(y_pred.iter()) {
                    match (*t == label, *p == label) {
                        (true, true) => tp += 1,
                        (false, true) => fp += 1,
                        (true, false) => fn_ += 1,
                        (false, false) => {}
                    }
                }
                let precision = ratio(tp, tp + fp);
                let recall = ratio(tp, tp + fn_);
                let f1 = if precision + recall == 0.0 {
                    0.0
                } else {
                    2.0 * precision * recall / (precision + recall)
                };
                ClassMetrics {
                    label,
                    precision,
                    recall,
                    f1,
                    support: tp + fn_,
                }
            })
            .collect();

        ClassificationReport {
            accuracy: acc,
            classes,
        }
    }

    /// Unweighted mean F1 over the reported labels.
    pub fn macro_f1(&self) -> f64 {
        if self.classes.is_empty() {
            return 0.0;
        }
        self.classes.iter().map(|c| c.f1).sum::<f64>() / self.classes.len() as f64
    }

    pub fn get(&self, label: i32) -> Option<&ClassMetrics> {
        self.classes.iter().find(|c| c.label == label)
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>8} {:>10} {:>8} {:>8} {:>8}",
            "class", "precision", "recall", "f1", "support"
        )?;
        for c in &self.classes {
            writeln!(
                f,
                "{:>8} {:>10.3} {:>8.3} {:>8.3} {:>8}",
                c.label, c.precision, c.recall, c.f1, c.support
            )?;
        }
        write!(f, "accuracy {:.3}  macro f1 {:.3}", self.accuracy, self.macro_f1())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn perfect_predictions() {
        let y = vec![1, 2, 2, 3];
        let report = ClassificationReport::new(&y, &y);
        assert!(close(report.accuracy, 1.0));
        assert!(report.classes.iter().all(|c| close(c.f1, 1.0)));
        assert_eq!(report.get(2).map(|c| c.support), Some(2));
    }

    #[test]
    fn mixed_predictions() {
        let y_true = vec![1, 1, 2, 2, 3];
        let y_pred = vec![1, 2, 2, 2, 1];
        let report = ClassificationReport::new(&y_true, &y_pred);
        assert!(close(report.accuracy, 0.6));

        let c1 = report.get(1).unwrap();
        assert!(close(c1.precision, 0.5));
        assert!(close(c1.recall, 0.5));

        let c2 = report.get(2).unwrap();
        assert!(close(c2.precision, 2.0 / 3.0));
        assert!(close(c2.recall, 1.0));
        assert!(close(c2.f1, 0.8));

        // never predicted: zero precision without dividing by zero
        let c3 = report.get(3).unwrap();
        assert_eq!((c3.precision, c3.recall, c3.f1, c3.support), (0.0, 0.0, 0.0, 1));
    }

    #[test]
    fn label_only_in_predictions_is_reported() {
        let report = ClassificationReport::new(&vec![1, 1], &vec![1, 4]);
        let c4 = report.get(4).unwrap();
        assert_eq!(c4.support, 0);
        assert_eq!(c4.precision, 0.0);
    }

    #[test]
    fn display_has_row_per_class() {
        let report = ClassificationReport::new(&vec![1, 2], &vec![1, 2]);
        let text = report.to_string();
        assert_eq!(text.lines().count(), 4);
        assert!(text.contains("accuracy 1.000"));
    }
}
