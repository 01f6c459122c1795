use crate::config::AppConfig;
use crate::dashboard;
use crate::types::JobTable;
use anyhow::{Context, Result};
use geojson::{feature::Id, Feature, FeatureCollection, Geometry, JsonObject, Value};
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Writes `dashboard.json` and `jobs.geojson` into the export directory and
/// returns the written paths.
pub fn export(config: &AppConfig, table: &JobTable) -> Result<Vec<PathBuf>> {
    let out_dir = &config.output.export_dir;
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create export directory: {:?}", out_dir))?;

    let dashboard_path = out_dir.join("dashboard.json");
    let dashboard = dashboard::build(table, config);
    let json = serde_json::to_string_pretty(&dashboard).context("Failed to serialize dashboard")?;
    fs::write(&dashboard_path, json)
        .with_context(|| format!("Failed to write {:?}", dashboard_path))?;

    let markers_path = out_dir.join("jobs.geojson");
    let collection = job_markers(table);
    info!(features = collection.features.len(), "writing job markers");
    fs::write(&markers_path, collection.to_string())
        .with_context(|| format!("Failed to write {:?}", markers_path))?;

    Ok(vec![dashboard_path, markers_path])
}

/// One point feature per located job, skills as properties.
pub fn job_markers(table: &JobTable) -> FeatureCollection {
    let features = table
        .iter()
        .filter_map(|job| {
            let point = job.location?;
            let mut properties = JsonObject::new();
            properties.insert("work_type".into(), job.work_type_label().into());
            properties.insert(
                "applicant_count".into(),
                job.applicant_count.map(serde_json::Value::from).unwrap_or_default(),
            );
            properties.insert(
                "skills".into(),
                job.skills.iter().map(|s| s.to_string()).collect::<Vec<_>>().into(),
            );

            Some(Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::from(&point))),
                id: (!job.id.is_empty()).then(|| Id::String(job.id.clone())),
                properties: Some(properties),
                foreign_members: None,
            })
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}
