//! Synthetic approximator output.
//!
//! Writes sample tables that look like what the external fitter dumps: the
//! analytic Gaussian family evaluated on a uniform x grid, scaled by a
//! relative amplitude error and perturbed with seeded Gaussian noise.

use std::fs;
use std::path::PathBuf;

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{SampleConfig, Series, SeriesKey};
use crate::error::AppError;
use crate::io::export::write_series_file;
use crate::io::ingest::series_path;
use crate::math::evaluate;

/// Generate one series per configured stem.
///
/// Keys carry no source label, matching the file stems they are written to.
pub fn generate_sample(config: &SampleConfig) -> Result<Vec<Series>, AppError> {
    if config.points < 2 {
        return Err(AppError::input("Sample point count must be >= 2."));
    }
    if !(config.x_min.is_finite() && config.x_max.is_finite() && config.x_max > config.x_min) {
        return Err(AppError::input("Invalid x range for sample generation."));
    }
    if !(config.noise.is_finite() && config.noise >= 0.0) {
        return Err(AppError::input("Noise level must be finite and >= 0."));
    }
    if !config.bias.is_finite() {
        return Err(AppError::input("Amplitude bias must be finite."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| AppError::input(format!("Noise distribution error: {e}")))?;

    let step = (config.x_max - config.x_min) / (config.points as f64 - 1.0);
    let x: Vec<f64> = (0..config.points)
        .map(|i| config.x_min + step * i as f64)
        .collect();

    let mut out = Vec::with_capacity(config.stems.len());
    for stem in &config.stems {
        let key = SeriesKey::from_stem(stem, "").ok_or_else(|| {
            AppError::input(format!("Cannot infer quantity kind from file stem '{stem}'."))
        })?;

        let y = x
            .iter()
            .map(|&xi| {
                let exact = evaluate(key.kind, xi, config.params);
                let z: f64 = normal.sample(&mut rng);
                exact * (1.0 + config.bias) + config.noise * z
            })
            .collect();

        out.push(Series {
            key,
            x: x.clone(),
            y,
        });
    }

    Ok(out)
}

/// Generate and write `<out_dir>/<stem>.txt` for every stem.
pub fn write_sample(config: &SampleConfig) -> Result<Vec<PathBuf>, AppError> {
    let series = generate_sample(config)?;

    fs::create_dir_all(&config.out_dir).map_err(|e| {
        AppError::input(format!(
            "Failed to create output directory '{}': {e}",
            config.out_dir.display()
        ))
    })?;

    let mut written = Vec::with_capacity(series.len());
    for s in &series {
        let path = series_path(&config.out_dir, &s.key.name);
        write_series_file(&path, s, &config.delimiter)?;
        log::info!("Wrote {} samples to '{}'", s.len(), path.display());
        written.push(path);
    }
    Ok(written)
}
