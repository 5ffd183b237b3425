//! Write a synthetic dermatology-shaped data file for demos and manual testing.
//!
//! Each class gets a handful of characteristic attributes scored high; the
//! rest is low-level noise. About 2% of ages are written as `?`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use dermascan::data::loader::MISSING_MARKER;
use dermascan::data::model::{CLINICAL_COUNT, DiseaseClass};

const ROWS_PER_CLASS: [usize; 6] = [112, 61, 72, 49, 52, 20];
const FAMILY_HISTORY: usize = 10;

/// Attributes scored high for each class, by column index.
fn signature(class: DiseaseClass) -> &'static [usize] {
    match class {
        DiseaseClass::Psoriasis => &[1, 2, 18, 19, 20, 21, 22, 23],
        DiseaseClass::SeborrheicDermatitis => &[0, 1, 15, 16, 27],
        DiseaseClass::LichenPlanus => &[3, 5, 7, 24, 26, 28, 32],
        DiseaseClass::PityriasisRosea => &[0, 15, 27, 13],
        DiseaseClass::ChronicDermatitis => &[3, 14, 16, 17, 20],
        DiseaseClass::PityriasisRubraPilaris => &[6, 9, 29, 30],
    }
}

fn main() -> Result<()> {
    let output_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("dermatology.data"));

    let mut rng = StdRng::seed_from_u64(42);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;

    let mut rows = 0usize;
    for (class, &count) in DiseaseClass::ALL.iter().zip(ROWS_PER_CLASS.iter()) {
        let high = signature(*class);
        for _ in 0..count {
            let mut cells: Vec<String> = (0..CLINICAL_COUNT)
                .map(|col| {
                    let value: u8 = if col == FAMILY_HISTORY {
                        u8::from(rng.gen_bool(0.15))
                    } else if high.contains(&col) {
                        rng.gen_range(2..=3)
                    } else {
                        rng.gen_range(0..=1)
                    };
                    value.to_string()
                })
                .collect();

            let age = if rng.gen_bool(0.02) {
                MISSING_MARKER.to_string()
            } else {
                rng.gen_range(7u32..=75).to_string()
            };
            cells.push(age);
            cells.push(class.label().to_string());

            writer.write_record(&cells).context("writing row")?;
            rows += 1;
        }
    }
    writer.flush().context("flushing output")?;

    println!("Wrote {rows} rows to {}", output_path.display());
    Ok(())
}
