//! Evaluation reporting for classification models: global, per-class, and
//! sentence-length-bucketed metrics plus a confusion matrix, computed from
//! parallel slices of true labels, predicted labels, and word counts.

mod metrics;
mod report;
mod size;
mod tokenizer;

pub use metrics::{confusion_matrix, ConfusionMatrix};
pub use report::{
    metrics_report, ClassMetrics, GlobalMetrics, MetricsReport, ReportOptions, SizeMetrics,
};
pub use size::{SizeBucket, SizeThresholds};
pub use tokenizer::Tokenizer;
