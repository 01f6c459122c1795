use crate::config::AppConfig;
use crate::error::DatasetError;
use crate::skills;
use crate::types::{JobRecord, JobTable};
use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};
use geo::Point;
use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::Read;
use tracing::{debug, info};

const ID_COLUMN: &str = "id";
const LAT_COLUMN: &str = "lat";
const LNG_COLUMN: &str = "lng";
const WORK_TYPE_COLUMN: &str = "work_type";
const APPLICANT_COLUMN: &str = "applicant_count";

pub fn load_data(config: &AppConfig) -> Result<JobTable> {
    info!(path = ?config.input.data_csv, "loading job dataset");

    let file = File::open(&config.input.data_csv)
        .with_context(|| format!("Failed to open CSV file: {:?}", config.input.data_csv))?;
    let table = load_jobs_from_reader(file)
        .with_context(|| format!("Failed to load dataset {:?}", config.input.data_csv))?;

    info!(jobs = table.len(), "loaded job dataset");
    Ok(table)
}

/// Column positions resolved once from the header.
struct Columns {
    id: usize,
    lat: Option<usize>,
    lng: Option<usize>,
    work_type: Option<usize>,
    applicant_count: Option<usize>,
    flags: Vec<(&'static str, usize)>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self, DatasetError> {
        let col_indices: HashMap<&str, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim(), i))
            .collect();

        let required = |name: &str| {
            col_indices
                .get(name)
                .copied()
                .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
        };

        let flags = skills::flag_columns()
            .map(|column| required(column).map(|idx| (column, idx)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: required(ID_COLUMN)?,
            lat: col_indices.get(LAT_COLUMN).copied(),
            lng: col_indices.get(LNG_COLUMN).copied(),
            work_type: col_indices.get(WORK_TYPE_COLUMN).copied(),
            applicant_count: col_indices.get(APPLICANT_COLUMN).copied(),
            flags,
        })
    }
}

pub fn load_jobs_from_reader<R: Read>(reader: R) -> Result<JobTable, DatasetError> {
    // Short rows are kept; their missing cells read as absent/false.
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers()?.clone();
    let columns = Columns::resolve(&headers)?;

    let mut jobs = Vec::new();
    for result in rdr.records() {
        let record = result?;
        jobs.push(parse_record(&record, &columns));
    }

    debug!(rows = jobs.len(), "parsed dataset rows");
    Ok(JobTable::new(jobs))
}

fn parse_record(record: &StringRecord, columns: &Columns) -> JobRecord {
    let cell = |idx: Option<usize>| {
        idx.and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    };

    let lat = cell(columns.lat).and_then(parse_coordinate);
    let lng = cell(columns.lng).and_then(parse_coordinate);
    let location = match (lat, lng) {
        (Some(lat), Some(lng))
            if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng) =>
        {
            Some(Point::new(lng, lat))
        }
        _ => None,
    };

    let skills: BTreeSet<&'static str> = columns
        .flags
        .iter()
        .filter(|(_, idx)| record.get(*idx).map(parse_flag).unwrap_or(false))
        .map(|(column, _)| *column)
        .collect();

    JobRecord {
        id: cell(Some(columns.id)).unwrap_or_default().to_string(),
        location,
        work_type: cell(columns.work_type).map(str::to_string),
        applicant_count: cell(columns.applicant_count).and_then(parse_count),
        skills,
    }
}

fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

// pandas writes integer columns with gaps as floats ("12.0").
fn parse_count(raw: &str) -> Option<u32> {
    if let Ok(n) = raw.parse::<u32>() {
        return Some(n);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0 && *v <= u32::MAX as f64)
        .map(|v| v as u32)
}

/// Unrecognised cells are false.
pub fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "t" | "1" | "1.0" | "yes" | "y"
    )
}
