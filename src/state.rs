use std::sync::{Arc, OnceLock};

use crate::config::AppConfig;
use crate::data::filter::{DatasetFilter, filtered_indices};
use crate::data::loader::load_file;
use crate::data::model::{CleanedDataset, DiseaseClass};
use crate::error::{DataError, PredictError};
use crate::predict::{self, Evaluation};

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// Everything one viewing session needs, independent of rendering.
pub struct Session {
    pub config: AppConfig,

    /// Cleaned table, loaded on first use and then shared read-only.
    dataset: OnceLock<Arc<CleanedDataset>>,

    /// Current selection for the filtered table view.
    filter: Option<DatasetFilter>,
}

impl Session {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            dataset: OnceLock::new(),
            filter: None,
        }
    }

    /// The cleaned dataset for the configured source. The file is read and
    /// cleaned once; later calls return the same `Arc`.
    pub fn dataset(&self) -> Result<Arc<CleanedDataset>, DataError> {
        if let Some(ds) = self.dataset.get() {
            return Ok(Arc::clone(ds));
        }
        let loaded = Arc::new(load_file(&self.config.data_path)?);
        Ok(Arc::clone(self.dataset.get_or_init(|| loaded)))
    }

    /// Current filter, initialised to "show everything" on first access.
    pub fn filter(&mut self) -> Result<&mut DatasetFilter, DataError> {
        let filter = match self.filter.take() {
            Some(filter) => filter,
            None => {
                let ds = self.dataset()?;
                DatasetFilter::all(&ds)
            }
        };
        Ok(self.filter.insert(filter))
    }

    /// Indices of records passing the current filter.
    pub fn visible_indices(&mut self) -> Result<Vec<usize>, DataError> {
        let ds = self.dataset()?;
        let filter = self.filter()?;
        Ok(filtered_indices(&ds, filter))
    }

    /// Restrict the age window (inclusive). Bounds are swapped if reversed.
    pub fn set_age_range(&mut self, min_age: u32, max_age: u32) -> Result<(), DataError> {
        let filter = self.filter()?;
        filter.min_age = min_age.min(max_age);
        filter.max_age = max_age.max(min_age);
        Ok(())
    }

    /// Toggle a single class in the selection.
    pub fn toggle_class(&mut self, class: DiseaseClass) -> Result<(), DataError> {
        let filter = self.filter()?;
        if !filter.classes.remove(&class) {
            filter.classes.insert(class);
        }
        Ok(())
    }

    /// Select every class present in the dataset.
    pub fn select_all_classes(&mut self) -> Result<(), DataError> {
        let ds = self.dataset()?;
        self.filter()?.classes = ds.classes();
        Ok(())
    }

    /// Deselect all classes.
    pub fn select_no_classes(&mut self) -> Result<(), DataError> {
        self.filter()?.classes.clear();
        Ok(())
    }

    /// Held-out evaluation with the configured classifier.
    pub fn evaluate(&self) -> Result<Evaluation, SessionError> {
        let ds = self.dataset()?;
        Ok(predict::evaluate(&ds, &self.config.predictor)?)
    }

    /// Predict a label for user-entered features. Always retrains.
    pub fn predict(&self, features: &[f64]) -> Result<u8, SessionError> {
        let ds = self.dataset()?;
        let label = predict::predict(&ds, &self.config.predictor, features)?;
        log::info!("Predicted class {label} with {}", self.config.predictor.classifier);
        Ok(label)
    }
}

/// Either stage of a view can fail: loading or prediction.
#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Data(#[from] DataError),
    #[error(transparent)]
    Predict(#[from] PredictError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    use crate::config::{ClassifierKind, PredictorConfig};
    use crate::data::model::{ATTRIBUTE_COUNT, CLINICAL_COUNT};
    use crate::predict::{predict_one, train};

    fn write_fixture(rows: &[(u8, &str, u8)]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for (v, age, class) in rows {
            let mut cells: Vec<String> = vec![v.to_string(); CLINICAL_COUNT];
            cells.push(age.to_string());
            cells.push(class.to_string());
            assert_eq!(cells.len(), ATTRIBUTE_COUNT);
            writeln!(file, "{}", cells.join(",")).unwrap();
        }
        file
    }

    fn session_for(path: PathBuf) -> Session {
        Session::new(AppConfig {
            data_path: path,
            ..AppConfig::default()
        })
    }

    #[test]
    fn dataset_is_loaded_once() {
        let file = write_fixture(&[(1, "20", 1), (2, "?", 2), (3, "50", 3)]);
        let session = session_for(file.path().to_path_buf());
        let a = session.dataset().unwrap();
        let b = session.dataset().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn filter_operations() {
        let file = write_fixture(&[(1, "20", 1), (2, "35", 2), (3, "50", 1)]);
        let mut session = session_for(file.path().to_path_buf());

        assert_eq!(session.visible_indices().unwrap(), vec![0, 1, 2]);

        session.set_age_range(40, 20).unwrap();
        assert_eq!(session.visible_indices().unwrap(), vec![0, 1]);

        session.toggle_class(DiseaseClass::Psoriasis).unwrap();
        assert_eq!(session.visible_indices().unwrap(), vec![1]);

        session.select_no_classes().unwrap();
        assert!(session.visible_indices().unwrap().is_empty());

        session.select_all_classes().unwrap();
        assert_eq!(session.visible_indices().unwrap(), vec![0, 1]);
    }

    #[test]
    fn missing_source_fails_every_view() {
        let mut session = session_for(PathBuf::from("/no/such/dermatology.data"));
        assert!(session.dataset().is_err());
        assert!(session.visible_indices().is_err());
        assert!(matches!(session.evaluate(), Err(SessionError::Data(_))));
    }

    #[test]
    fn all_missing_source_cannot_predict() {
        let file = write_fixture(&[(1, "?", 1), (2, "?", 2)]);
        let session = session_for(file.path().to_path_buf());
        assert!(session.dataset().unwrap().is_empty());
        let err = session.predict(&[0.0; 34]).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Predict(PredictError::InsufficientClassDiversity { found: 0 })
        ));
    }

    #[test]
    fn filter_starts_from_loaded_dataset() {
        let file = write_fixture(&[(1, "18", 2), (2, "64", 4), (3, "?", 1)]);
        let mut session = session_for(file.path().to_path_buf());

        let filter = session.filter().unwrap().clone();
        assert_eq!((filter.min_age, filter.max_age), (18, 64));
        assert_eq!(
            filter.classes.into_iter().collect::<Vec<_>>(),
            vec![DiseaseClass::SeborrheicDermatitis, DiseaseClass::PityriasisRosea]
        );
    }

    #[test]
    fn predict_retrains_and_matches_fitted_model() {
        let rows: Vec<(u8, String, u8)> = (0..30u8)
            .map(|i| {
                let class = i % 3 + 1;
                (class, (20 + u32::from(i)).to_string(), class)
            })
            .collect();
        let borrowed: Vec<(u8, &str, u8)> =
            rows.iter().map(|(v, age, c)| (*v, age.as_str(), *c)).collect();
        let file = write_fixture(&borrowed);

        for kind in [ClassifierKind::DecisionTree, ClassifierKind::RandomForest] {
            let session = Session::new(AppConfig {
                data_path: file.path().to_path_buf(),
                predictor: PredictorConfig::new(kind),
            });
            let ds = session.dataset().unwrap();
            let (model, _) = train(&ds, &session.config.predictor).unwrap();

            for record in ds.records.iter().take(5) {
                let features = record.features();
                let label = session.predict(&features).unwrap();
                assert_eq!(label, predict_one(&model, &features).unwrap(), "{kind}");
                assert!(model.labels().contains(&label));
            }
        }
    }
}
