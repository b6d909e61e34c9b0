use indexmap::IndexSet;
use serde::{de::Error, Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, io::Read};

use crate::metrics::{confusion_matrix, ConfusionMatrix};
use crate::size::{SizeBucket, SizeThresholds};

/// Whole-dataset metrics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlobalMetrics {
    pub accuracy: f64,
    pub precision_macro: f64,
    pub recall_macro: f64,
    pub f1_macro: f64,
}

/// Metrics for a single label of the universe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub label: Box<str>,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Metrics restricted to one sentence-length bucket.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SizeMetrics {
    pub size: SizeBucket,
    pub accuracy: f64,
    pub precision_macro: f64,
    pub recall_macro: f64,
    pub f1_macro: f64,
}

/// The four evaluation tables produced by [`metrics_report`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub global_metrics: GlobalMetrics,
    pub per_class_metrics: Vec<ClassMetrics>,
    pub metrics_per_size: Vec<SizeMetrics>,
    pub confusion_matrix: ConfusionMatrix,
}

impl MetricsReport {
    /// Loads a report from a file.
    pub fn load_from_file(file: &mut dyn Read) -> Result<Self, serde_json::Error> {
        let mut buffer = String::new();
        file.read_to_string(&mut buffer)
            .map_err(serde_json::Error::custom)?;
        serde_json::from_str(&buffer)
    }

    /// Saves a report to a file.
    pub fn save_to_file(&self, file: &mut dyn std::io::Write) -> Result<(), serde_json::Error> {
        let serialized = serde_json::to_string(self)?;
        file.write_all(serialized.as_bytes())
            .map_err(serde_json::Error::custom)
    }

    /// Prints the rendered report to stdout.
    pub fn print(&self) {
        println!("{self}");
    }
}

/// Caller knobs for [`metrics_report`].
#[derive(Clone, Debug, Default)]
pub struct ReportOptions {
    /// Explicit label universe, in report order. Defaults to the sorted
    /// union of labels observed in the inputs.
    pub labels: Option<Vec<String>>,
    /// Word-count thresholds for the per-size table.
    pub thresholds: SizeThresholds,
}

/// Compute global, per-class, per-size, and confusion-matrix metrics for a
/// set of predictions.
///
/// The three slices are parallel: index i holds one observation's true
/// label, predicted label, and sentence word count.
pub fn metrics_report<T, P>(
    y_true: &[T],
    y_pred: &[P],
    n_words: &[i64],
    opts: &ReportOptions,
) -> MetricsReport
where
    T: AsRef<str>,
    P: AsRef<str>,
{
    assert_eq!(
        y_true.len(),
        y_pred.len(),
        "Lengths of true and predicted labels must match"
    );
    assert_eq!(
        y_true.len(),
        n_words.len(),
        "Lengths of labels and word counts must match"
    );

    let observed = observed_universe(y_true, y_pred);
    let universe = match &opts.labels {
        Some(labels) => labels.iter().map(|l| l.as_str().into()).collect(),
        None => observed.clone(),
    };

    // The global row averages over the observed labels even when an explicit
    // universe narrows or extends the per-class table.
    let global_cm = confusion_matrix(y_true, y_pred, observed);
    let global_metrics = GlobalMetrics {
        accuracy: exact_match_fraction(y_true, y_pred),
        precision_macro: global_cm.precision_macro(),
        recall_macro: global_cm.recall_macro(),
        f1_macro: global_cm.f1_macro(),
    };

    let cm = confusion_matrix(y_true, y_pred, universe);
    let per_class_metrics = (0..cm.n_classes())
        .map(|class| ClassMetrics {
            label: cm.label(class).into(),
            precision: cm.precision(class),
            recall: cm.recall(class),
            f1: cm.f1(class),
            support: cm.support(class),
        })
        .collect();

    let mut groups: BTreeMap<SizeBucket, Vec<usize>> = BTreeMap::new();
    for (row, &n) in n_words.iter().enumerate() {
        groups.entry(opts.thresholds.bucket(n)).or_default().push(row);
    }

    // Each bucket's macro averages run over the labels observed within it.
    let metrics_per_size = groups
        .into_iter()
        .map(|(size, rows)| {
            let sub_true: Vec<&str> = rows.iter().map(|&i| y_true[i].as_ref()).collect();
            let sub_pred: Vec<&str> = rows.iter().map(|&i| y_pred[i].as_ref()).collect();
            let sub_cm =
                confusion_matrix(&sub_true, &sub_pred, observed_universe(&sub_true, &sub_pred));
            SizeMetrics {
                size,
                accuracy: exact_match_fraction(&sub_true, &sub_pred),
                precision_macro: sub_cm.precision_macro(),
                recall_macro: sub_cm.recall_macro(),
                f1_macro: sub_cm.f1_macro(),
            }
        })
        .collect();

    MetricsReport {
        global_metrics,
        per_class_metrics,
        metrics_per_size,
        confusion_matrix: cm,
    }
}

/// Sorted deduplicated union of the labels appearing on either side.
fn observed_universe<T, P>(y_true: &[T], y_pred: &[P]) -> IndexSet<Box<str>>
where
    T: AsRef<str>,
    P: AsRef<str>,
{
    let mut labels: Vec<&str> = y_true
        .iter()
        .map(AsRef::as_ref)
        .chain(y_pred.iter().map(AsRef::as_ref))
        .collect();
    labels.sort_unstable();
    labels.dedup();
    labels.into_iter().map(Into::into).collect()
}

/// Fraction of indices where the true and predicted labels match exactly.
fn exact_match_fraction<T, P>(y_true: &[T], y_pred: &[P]) -> f64
where
    T: AsRef<str>,
    P: AsRef<str>,
{
    if y_true.is_empty() {
        return 0.0;
    }
    let correct = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(t, p)| t.as_ref() == p.as_ref())
        .count();
    correct as f64 / y_true.len() as f64
}

fn fmt_metric(value: f64) -> String {
    format!("{value:.4}")
}

/// Writes a whitespace-aligned table, every cell right-justified to its
/// column width.
fn write_table(f: &mut fmt::Formatter<'_>, columns: &[&str], rows: &[Vec<String>]) -> fmt::Result {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.len()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    for (col, (name, &width)) in columns.iter().zip(&widths).enumerate() {
        if col > 0 {
            f.write_str("  ")?;
        }
        write!(f, "{name:>width$}")?;
    }
    writeln!(f)?;

    for row in rows {
        for (col, (cell, &width)) in row.iter().zip(&widths).enumerate() {
            if col > 0 {
                f.write_str("  ")?;
            }
            write!(f, "{cell:>width$}")?;
        }
        writeln!(f)?;
    }

    Ok(())
}

impl fmt::Display for MetricsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Global Metrics ===")?;
        let g = &self.global_metrics;
        write_table(
            f,
            &["accuracy", "precision_macro", "recall_macro", "f1_macro"],
            &[vec![
                fmt_metric(g.accuracy),
                fmt_metric(g.precision_macro),
                fmt_metric(g.recall_macro),
                fmt_metric(g.f1_macro),
            ]],
        )?;

        writeln!(f, "\n=== Per-Class Metrics ===")?;
        let rows: Vec<Vec<String>> = self
            .per_class_metrics
            .iter()
            .map(|c| {
                vec![
                    c.label.to_string(),
                    fmt_metric(c.precision),
                    fmt_metric(c.recall),
                    fmt_metric(c.f1),
                    c.support.to_string(),
                ]
            })
            .collect();
        write_table(f, &["label", "precision", "recall", "f1", "support"], &rows)?;

        writeln!(f, "\n=== Metrics Per Size ===")?;
        let rows: Vec<Vec<String>> = self
            .metrics_per_size
            .iter()
            .map(|s| {
                vec![
                    s.size.to_string(),
                    fmt_metric(s.accuracy),
                    fmt_metric(s.precision_macro),
                    fmt_metric(s.recall_macro),
                    fmt_metric(s.f1_macro),
                ]
            })
            .collect();
        write_table(
            f,
            &["size", "accuracy", "precision_macro", "recall_macro", "f1_macro"],
            &rows,
        )?;

        writeln!(f, "\n=== Confusion Matrix ===")?;
        let cm = &self.confusion_matrix;
        let mut columns: Vec<&str> = vec![""];
        columns.extend(cm.labels().iter().map(|l| &**l));
        let rows: Vec<Vec<String>> = (0..cm.n_classes())
            .map(|i| {
                let mut row = vec![cm.label(i).to_string()];
                row.extend((0..cm.n_classes()).map(|j| cm.get(i, j).to_string()));
                row
            })
            .collect();
        write_table(f, &columns, &rows)
    }
}
