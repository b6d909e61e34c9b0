use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// A confusion matrix over a fixed label universe.
///
/// Cell (i, j) counts observations with true label i and predicted label j.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    /// The label universe, in report order.
    labels: IndexSet<Box<str>>,
    /// Counts indexed by [true label][predicted label].
    counts: Box<[Box<[usize]>]>,
}

impl ConfusionMatrix {
    pub fn n_classes(&self) -> usize {
        self.labels.len()
    }

    /// The label universe, in report order.
    pub fn labels(&self) -> &IndexSet<Box<str>> {
        &self.labels
    }

    /// The label at the given class index.
    pub fn label(&self, class: usize) -> &str {
        &self.labels[class]
    }

    /// Count at [true class][predicted class].
    pub fn get(&self, true_class: usize, pred_class: usize) -> usize {
        self.counts[true_class][pred_class]
    }

    /// Count for a pair of label names; `None` if either is outside the universe.
    pub fn count_of(&self, true_label: &str, pred_label: &str) -> Option<usize> {
        let i = self.labels.get_index_of(true_label)?;
        let j = self.labels.get_index_of(pred_label)?;
        Some(self.counts[i][j])
    }

    /// Total number of counted observations.
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    pub fn accuracy(&self) -> f64 {
        let total_samples = self.total();
        if total_samples == 0 {
            return 0.0;
        }
        let total_correct: usize = self.counts.iter().enumerate().map(|(i, row)| row[i]).sum();
        total_correct as f64 / total_samples as f64
    }

    pub fn true_positives(&self, class: usize) -> usize {
        self.counts[class][class]
    }

    /// Observations predicted as `class` whose true label differs.
    pub fn false_positives(&self, class: usize) -> usize {
        (0..self.n_classes())
            .filter(|&i| i != class)
            .map(|i| self.counts[i][class])
            .sum()
    }

    /// Observations of `class` predicted as something else.
    pub fn false_negatives(&self, class: usize) -> usize {
        (0..self.n_classes())
            .filter(|&j| j != class)
            .map(|j| self.counts[class][j])
            .sum()
    }

    /// Count of true occurrences of `class`, i.e. the sum of row `class`.
    pub fn support(&self, class: usize) -> usize {
        self.counts[class].iter().sum()
    }

    /// Precision for one class; 0 when the class was never predicted.
    pub fn precision(&self, class: usize) -> f64 {
        let tp = self.true_positives(class) as f64;
        let fp = self.false_positives(class) as f64;
        if tp + fp > 0.0 {
            tp / (tp + fp)
        } else {
            0.0
        }
    }

    /// Recall for one class; 0 when the class never occurs in the truth.
    pub fn recall(&self, class: usize) -> f64 {
        let tp = self.true_positives(class) as f64;
        let fn_ = self.false_negatives(class) as f64;
        if tp + fn_ > 0.0 {
            tp / (tp + fn_)
        } else {
            0.0
        }
    }

    /// Harmonic mean of precision and recall; 0 when both are 0.
    pub fn f1(&self, class: usize) -> f64 {
        let p = self.precision(class);
        let r = self.recall(class);
        if p + r > 0.0 {
            2.0 * p * r / (p + r)
        } else {
            0.0
        }
    }

    /// Unweighted mean precision over the universe.
    pub fn precision_macro(&self) -> f64 {
        self.macro_avg(Self::precision)
    }

    /// Unweighted mean recall over the universe.
    pub fn recall_macro(&self) -> f64 {
        self.macro_avg(Self::recall)
    }

    /// Unweighted mean F1 over the universe.
    pub fn f1_macro(&self) -> f64 {
        self.macro_avg(Self::f1)
    }

    fn macro_avg(&self, metric: fn(&Self, usize) -> f64) -> f64 {
        if self.labels.is_empty() {
            return 0.0;
        }
        let sum: f64 = (0..self.n_classes()).map(|class| metric(self, class)).sum();
        sum / self.n_classes() as f64
    }
}

/// Compute the confusion matrix of the label pairs over the given universe.
///
/// Pairs mentioning a label outside the universe are skipped.
pub fn confusion_matrix<T, P>(
    y_true: &[T],
    y_pred: &[P],
    labels: IndexSet<Box<str>>,
) -> ConfusionMatrix
where
    T: AsRef<str>,
    P: AsRef<str>,
{
    assert_eq!(
        y_true.len(),
        y_pred.len(),
        "Lengths of true and predicted labels must match"
    );

    let n_classes = labels.len();
    let mut counts =
        vec![vec![0usize; n_classes].into_boxed_slice(); n_classes].into_boxed_slice();

    for (t, p) in y_true.iter().zip(y_pred.iter()) {
        let (Some(i), Some(j)) = (
            labels.get_index_of(t.as_ref()),
            labels.get_index_of(p.as_ref()),
        ) else {
            continue;
        };
        counts[i][j] += 1;
    }

    ConfusionMatrix { labels, counts }
}
