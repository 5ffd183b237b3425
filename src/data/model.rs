use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Fixed attribute schema
// ---------------------------------------------------------------------------

/// Positional attribute names of the source table.
pub static ATTRIBUTE_NAMES: [&str; ATTRIBUTE_COUNT] = [
    "erythema",
    "scaling",
    "definite_borders",
    "itching",
    "koebner_phenomenon",
    "polygonal_papules",
    "follicular_papules",
    "oral_mucosal_involvement",
    "knee_and_elbow_involvement",
    "scalp_involvement",
    "family_history",
    "melanin_incontinence",
    "eosinophils_in_the_infiltrate",
    "PNL_infiltrate",
    "fibrosis_papillary_dermis",
    "exocytosis",
    "acanthosis",
    "hyperkeratosis",
    "parakeratosis",
    "clubbing_rete_ridges",
    "elongation_rete_ridges",
    "thinning_suprapapillary_epidermis",
    "spongiform_pustule",
    "munro_microabcess",
    "focal_hypergranulosis",
    "disappearance_granular_layer",
    "vacuolisation_damage_basal_layer",
    "spongiosis",
    "saw_tooth_appearance_retes",
    "follicular_horn_plug",
    "perifollicular_parakeratosis",
    "inflammatory_monoluclear_inflitrate",
    "band_like_infiltrate",
    "age",
    "class",
];

/// Total number of columns in a source row.
pub const ATTRIBUTE_COUNT: usize = 35;
/// Number of ordinal clinical / histopathological attributes.
pub const CLINICAL_COUNT: usize = 33;
/// Number of model inputs: clinical attributes plus age.
pub const FEATURE_COUNT: usize = CLINICAL_COUNT + 1;
pub const AGE_INDEX: usize = CLINICAL_COUNT;
pub const CLASS_INDEX: usize = ATTRIBUTE_COUNT - 1;

/// Names of the model inputs, in training order.
pub fn feature_names() -> &'static [&'static str] {
    &ATTRIBUTE_NAMES[..FEATURE_COUNT]
}

// ---------------------------------------------------------------------------
// DiseaseClass – the label domain
// ---------------------------------------------------------------------------

/// The six diagnoses encoded by the `class` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiseaseClass {
    Psoriasis = 1,
    SeborrheicDermatitis = 2,
    LichenPlanus = 3,
    PityriasisRosea = 4,
    ChronicDermatitis = 5,
    PityriasisRubraPilaris = 6,
}

impl DiseaseClass {
    pub const ALL: [DiseaseClass; 6] = [
        DiseaseClass::Psoriasis,
        DiseaseClass::SeborrheicDermatitis,
        DiseaseClass::LichenPlanus,
        DiseaseClass::PityriasisRosea,
        DiseaseClass::ChronicDermatitis,
        DiseaseClass::PityriasisRubraPilaris,
    ];

    pub fn from_label(label: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.label() == label)
    }

    pub fn label(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            DiseaseClass::Psoriasis => "psoriasis",
            DiseaseClass::SeborrheicDermatitis => "seborrheic dermatitis",
            DiseaseClass::LichenPlanus => "lichen planus",
            DiseaseClass::PityriasisRosea => "pityriasis rosea",
            DiseaseClass::ChronicDermatitis => "chronic dermatitis",
            DiseaseClass::PityriasisRubraPilaris => "pityriasis rubra pilaris",
        }
    }
}

impl fmt::Display for DiseaseClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.name())
    }
}

// ---------------------------------------------------------------------------
// Record – one cleaned row
// ---------------------------------------------------------------------------

/// A fully observed row of the source table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Ordinal attribute values in schema order.
    pub clinical: [u8; CLINICAL_COUNT],
    pub age: u32,
    pub class: DiseaseClass,
}

impl Record {
    /// Model input vector: the clinical attributes followed by age.
    pub fn features(&self) -> [f64; FEATURE_COUNT] {
        let mut out = [0.0; FEATURE_COUNT];
        for (slot, v) in out.iter_mut().zip(self.clinical.iter()) {
            *slot = f64::from(*v);
        }
        out[AGE_INDEX] = f64::from(self.age);
        out
    }

    /// Value of attribute `index` (schema order, class included) as a number.
    pub fn value(&self, index: usize) -> f64 {
        match index {
            i if i < CLINICAL_COUNT => f64::from(self.clinical[i]),
            AGE_INDEX => f64::from(self.age),
            _ => f64::from(self.class.label()),
        }
    }
}

// ---------------------------------------------------------------------------
// CleanedDataset – the complete-case table
// ---------------------------------------------------------------------------

/// The cleaned table. Built once by the loader and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct CleanedDataset {
    pub records: Vec<Record>,
    /// Source rows discarded because at least one attribute was missing.
    pub dropped_rows: usize,
}

impl CleanedDataset {
    pub fn new(records: Vec<Record>, dropped_rows: usize) -> Self {
        CleanedDataset {
            records,
            dropped_rows,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct labels present, ascending.
    pub fn classes(&self) -> BTreeSet<DiseaseClass> {
        self.records.iter().map(|r| r.class).collect()
    }

    /// Smallest and largest age, `None` when empty.
    pub fn age_range(&self) -> Option<(u32, u32)> {
        let min = self.records.iter().map(|r| r.age).min()?;
        let max = self.records.iter().map(|r| r.age).max()?;
        Some((min, max))
    }

    /// Feature matrix rows and label vector, in record order.
    pub fn to_xy(&self) -> (Vec<[f64; FEATURE_COUNT]>, Vec<u8>) {
        self.records
            .iter()
            .map(|r| (r.features(), r.class.label()))
            .unzip()
    }
}
