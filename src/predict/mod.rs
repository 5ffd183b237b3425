//! Prediction layer: train/evaluate and single-sample inference.
//!
//! Every request refits from scratch:
//! ```text
//!   CleanedDataset ──► split (seeded 80/20) ──► fit ──► FittedModel
//!                                    │                     │
//!                                    ▼                     ▼
//!                             held-out report        predict_one(features)
//! ```

pub mod classifier;
pub mod metrics;
pub mod split;

use std::collections::BTreeSet;

use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::config::{ClassifierKind, PredictorConfig};
use crate::data::model::{CleanedDataset, FEATURE_COUNT};
use crate::error::PredictError;

use self::classifier::{Classifier, fit_classifier};
use self::metrics::ClassificationReport;
use self::split::train_test_split;

// ---------------------------------------------------------------------------
// Trained model
// ---------------------------------------------------------------------------

/// A classifier fit on one training split. Not cached between requests.
pub struct FittedModel {
    classifier: Box<dyn Classifier>,
    kind: ClassifierKind,
    labels: BTreeSet<u8>,
}

impl FittedModel {
    pub fn kind(&self) -> ClassifierKind {
        self.kind
    }

    /// Labels present in the training subset.
    pub fn labels(&self) -> &BTreeSet<u8> {
        &self.labels
    }
}

impl std::fmt::Debug for FittedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FittedModel")
            .field("classifier", &self.classifier.name())
            .field("labels", &self.labels)
            .finish()
    }
}

/// Outcome of scoring a fitted model on the held-out rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub classifier: ClassifierKind,
    pub accuracy: f64,
    pub report: ClassificationReport,
    pub train_size: usize,
    pub test_size: usize,
}

// ---------------------------------------------------------------------------
// Train / evaluate
// ---------------------------------------------------------------------------

/// Split, fit on the training rows and score on the held-out rows.
pub fn train(
    dataset: &CleanedDataset,
    config: &PredictorConfig,
) -> Result<(FittedModel, Evaluation), PredictError> {
    let (x, y) = dataset.to_xy();
    let split = train_test_split(dataset.len(), config.test_fraction, config.seed);

    let labels: BTreeSet<u8> = split.train.iter().map(|&i| y[i]).collect();
    if labels.len() < 2 {
        return Err(PredictError::InsufficientClassDiversity {
            found: labels.len(),
        });
    }

    let (x_train, y_train) = gather(&x, &y, &split.train);
    let (x_test, y_test) = gather(&x, &y, &split.test);

    log::debug!(
        "Fitting {} on {} rows, holding out {}",
        config.classifier,
        split.train.len(),
        split.test.len()
    );
    let classifier = fit_classifier(config.classifier, &x_train, &y_train, config.seed)?;

    let y_pred = if split.test.is_empty() {
        Vec::new()
    } else {
        classifier.predict(&x_test)?
    };
    let report = ClassificationReport::new(&y_test, &y_pred);

    let evaluation = Evaluation {
        classifier: config.classifier,
        accuracy: report.accuracy,
        report,
        train_size: split.train.len(),
        test_size: split.test.len(),
    };
    log::info!(
        "{} held-out accuracy {:.3} ({} train / {} test)",
        evaluation.classifier,
        evaluation.accuracy,
        evaluation.train_size,
        evaluation.test_size
    );

    let model = FittedModel {
        classifier,
        kind: config.classifier,
        labels,
    };
    Ok((model, evaluation))
}

/// Held-out accuracy and per-class report. The model is discarded.
pub fn evaluate(
    dataset: &CleanedDataset,
    config: &PredictorConfig,
) -> Result<Evaluation, PredictError> {
    train(dataset, config).map(|(_, evaluation)| evaluation)
}

// ---------------------------------------------------------------------------
// Single-sample inference
// ---------------------------------------------------------------------------

/// Predict the label of one feature vector in training order.
///
/// Values outside the ranges seen in training are accepted as-is.
pub fn predict_one(model: &FittedModel, features: &[f64]) -> Result<u8, PredictError> {
    if features.len() != FEATURE_COUNT {
        return Err(PredictError::FeatureCount {
            expected: FEATURE_COUNT,
            found: features.len(),
        });
    }
    let x = DenseMatrix::new(1, FEATURE_COUNT, features.to_vec(), false);
    let predicted = model.classifier.predict(&x)?;

    predicted
        .first()
        .and_then(|&label| u8::try_from(label).ok())
        .ok_or_else(|| PredictError::Model {
            model: model.classifier.name(),
            message: format!("no usable label in prediction {predicted:?}"),
        })
}

/// Retrain from scratch and predict one feature vector.
pub fn predict(
    dataset: &CleanedDataset,
    config: &PredictorConfig,
    features: &[f64],
) -> Result<u8, PredictError> {
    let (model, _) = train(dataset, config)?;
    predict_one(&model, features)
}

/// Row-major feature matrix and label vector for the given row indices.
fn gather(
    x: &[[f64; FEATURE_COUNT]],
    y: &[u8],
    rows: &[usize],
) -> (DenseMatrix<f64>, Vec<i32>) {
    let values: Vec<f64> = rows.iter().flat_map(|&i| x[i]).collect();
    let labels: Vec<i32> = rows.iter().map(|&i| i32::from(y[i])).collect();
    (DenseMatrix::new(rows.len(), FEATURE_COUNT, values, false), labels)
}
