use anyhow::{Context, Result};

use dermascan::config::AppConfig;
use dermascan::data::model::{DiseaseClass, feature_names};
use dermascan::data::summary::{class_distribution, describe, feature_ranges};
use dermascan::state::Session;

fn main() -> Result<()> {
    env_logger::init();

    let config = AppConfig::from_env().context("loading configuration")?;
    let mut session = Session::new(config);

    // ---- Dataset ----
    let dataset = session
        .dataset()
        .with_context(|| format!("loading {}", session.config.data_path.display()))?;
    println!(
        "Dataset: {} complete records, {} dropped",
        dataset.len(),
        dataset.dropped_rows
    );

    // ---- Summary ----
    println!("\nClass distribution:");
    for (class, count) in class_distribution(&dataset) {
        println!("  {class:<32} {count}");
    }
    println!("\n{:<36} {:>8} {:>8} {:>8}", "attribute", "mean", "min", "max");
    for s in describe(&dataset) {
        println!("{:<36} {:>8.2} {:>8.0} {:>8.0}", s.name, s.mean, s.min, s.max);
    }

    // ---- Filtered view ----
    if let Some((min_age, max_age)) = dataset.age_range() {
        let mid = min_age + (max_age - min_age) / 2;
        session.set_age_range(min_age, mid)?;
        let visible = session.visible_indices()?;
        println!("\nAges {min_age}..={mid}: {} of {} records", visible.len(), dataset.len());
    }

    // ---- Predict ----
    let evaluation = session.evaluate().context("evaluating classifier")?;
    println!("\n{} held-out evaluation:\n{}", evaluation.classifier, evaluation.report);

    let ranges = feature_ranges(&dataset);
    let Some(sample) = dataset.records.first() else {
        log::warn!("No records to build a demo prediction from");
        return Ok(());
    };
    let features: Vec<f64> = sample
        .features()
        .iter()
        .zip(&ranges)
        .map(|(v, range)| range.clamp(*v))
        .collect();
    log::debug!(
        "Demo request {:?}",
        feature_names().iter().zip(&features).collect::<Vec<_>>()
    );

    let label = session.predict(&features).context("predicting demo record")?;
    let name = DiseaseClass::from_label(label).map_or("unknown", DiseaseClass::name);
    println!("\nPrediction for record 0: class {label} ({name}), recorded {}", sample.class);

    Ok(())
}
