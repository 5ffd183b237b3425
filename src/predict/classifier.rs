use smartcore::ensemble::random_forest_classifier::{
    RandomForestClassifier, RandomForestClassifierParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::tree::decision_tree_classifier::{
    DecisionTreeClassifier, DecisionTreeClassifierParameters,
};

use crate::config::ClassifierKind;
use crate::error::PredictError;

/// Contract shared by the fitted tree models. Labels are smartcore's `i32`.
pub trait Classifier {
    /// Predict one label per row of `x`.
    fn predict(&self, x: &DenseMatrix<f64>) -> Result<Vec<i32>, PredictError>;

    fn name(&self) -> &'static str;
}

struct DecisionTreeModel(DecisionTreeClassifier<f64, i32, DenseMatrix<f64>, Vec<i32>>);

impl Classifier for DecisionTreeModel {
    fn predict(&self, x: &DenseMatrix<f64>) -> Result<Vec<i32>, PredictError> {
        self.0.predict(x).map_err(|e| model_error(self.name(), e))
    }

    fn name(&self) -> &'static str {
        ClassifierKind::DecisionTree.as_str()
    }
}

struct RandomForestModel(RandomForestClassifier<f64, i32, DenseMatrix<f64>, Vec<i32>>);

impl Classifier for RandomForestModel {
    fn predict(&self, x: &DenseMatrix<f64>) -> Result<Vec<i32>, PredictError> {
        self.0.predict(x).map_err(|e| model_error(self.name(), e))
    }

    fn name(&self) -> &'static str {
        ClassifierKind::RandomForest.as_str()
    }
}

/// Fit the selected classifier with default hyperparameters.
/// `seed` fixes the model's random state so refits are reproducible.
pub fn fit_classifier(
    kind: ClassifierKind,
    x: &DenseMatrix<f64>,
    y: &Vec<i32>,
    seed: u64,
) -> Result<Box<dyn Classifier>, PredictError> {
    match kind {
        ClassifierKind::DecisionTree => {
            let params = DecisionTreeClassifierParameters {
                seed: Some(seed),
                ..Default::default()
            };
            let model = DecisionTreeClassifier::fit(x, y, params)
                .map_err(|e| model_error(kind.as_str(), e))?;
            Ok(Box::new(DecisionTreeModel(model)))
        }
        ClassifierKind::RandomForest => {
            let params = RandomForestClassifierParameters {
                seed,
                ..Default::default()
            };
            let model = RandomForestClassifier::fit(x, y, params)
                .map_err(|e| model_error(kind.as_str(), e))?;
            Ok(Box::new(RandomForestModel(model)))
        }
    }
}

fn model_error(model: &'static str, e: smartcore::error::Failed) -> PredictError {
    PredictError::Model {
        model,
        message: e.to_string(),
    }
}
