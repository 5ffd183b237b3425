use std::collections::BTreeSet;

use super::model::{CleanedDataset, DiseaseClass};

// ---------------------------------------------------------------------------
// Filter predicate: age window plus selected classes
// ---------------------------------------------------------------------------

/// Row selection for the filtered table view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetFilter {
    pub min_age: u32,
    pub max_age: u32,
    /// Classes to show. An empty set hides every row.
    pub classes: BTreeSet<DiseaseClass>,
}

impl DatasetFilter {
    /// A filter that lets every record of `dataset` through.
    pub fn all(dataset: &CleanedDataset) -> Self {
        let (min_age, max_age) = dataset.age_range().unwrap_or((0, 0));
        DatasetFilter {
            min_age,
            max_age,
            classes: dataset.classes(),
        }
    }

    pub fn matches(&self, age: u32, class: DiseaseClass) -> bool {
        (self.min_age..=self.max_age).contains(&age) && self.classes.contains(&class)
    }
}

/// Return indices of records that pass the filter.
///
/// A record passes when its age lies in `[min_age, max_age]` (inclusive) and
/// its class is one of the selected classes.
pub fn filtered_indices(dataset: &CleanedDataset, filter: &DatasetFilter) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| filter.matches(r.age, r.class))
        .map(|(i, _)| i)
        .collect()
}
