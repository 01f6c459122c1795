//! Aggregations behind the static charts. Every function is a single read-only
//! pass over the table.

use crate::types::JobTable;
use serde::Serialize;
use std::collections::HashMap;
use tracing::warn;

/// LinkedIn stops reporting applicants past this number.
pub const APPLICANT_CAP: u32 = 200;
const APPLICANT_BUCKET_WIDTH: u32 = 20;

pub const MAX_VENN_SETS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Count {
    pub label: String,
    pub value: usize,
}

impl Count {
    fn new(label: impl Into<String>, value: usize) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Share {
    pub required: usize,
    pub not_required: usize,
}

impl Share {
    pub fn total(&self) -> usize {
        self.required + self.not_required
    }

    /// Percentage of jobs that require it, 0.0 for an empty table.
    pub fn percent(&self) -> f64 {
        if self.total() == 0 {
            return 0.0;
        }
        self.required as f64 * 100.0 / self.total() as f64
    }
}

/// A named union of flag columns, e.g. "nosql" = mongodb | redis | nosql.
#[derive(Debug, Clone, Copy)]
pub struct SkillGroup<'a> {
    pub label: &'a str,
    pub columns: &'a [&'a str],
}

impl<'a> SkillGroup<'a> {
    pub const fn new(label: &'a str, columns: &'a [&'a str]) -> Self {
        Self { label, columns }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VennRegion {
    pub sets: Vec<String>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VennCounts {
    pub sets: Vec<Count>,
    pub regions: Vec<VennRegion>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
}

fn sort_descending(counts: &mut [Count]) {
    // Stable, so ties keep declaration order.
    counts.sort_by(|a, b| b.value.cmp(&a.value));
}

pub fn work_type_counts(table: &JobTable) -> Vec<Count> {
    let mut by_label: HashMap<&str, usize> = HashMap::new();
    for job in table.iter() {
        *by_label.entry(job.work_type_label()).or_default() += 1;
    }

    let mut counts: Vec<Count> = by_label
        .into_iter()
        .map(|(label, value)| Count::new(label, value))
        .collect();
    counts.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.label.cmp(&b.label)));
    counts
}

pub fn applicant_bucket_labels() -> Vec<String> {
    let mut labels = vec!["0".to_string(), format!("1-{}", APPLICANT_BUCKET_WIDTH - 1)];
    let mut start = APPLICANT_BUCKET_WIDTH;
    while start < APPLICANT_CAP {
        labels.push(format!("{}-{}", start, start + APPLICANT_BUCKET_WIDTH - 1));
        start += APPLICANT_BUCKET_WIDTH;
    }
    labels.push(format!("{}+", APPLICANT_CAP));
    labels
}

fn applicant_bucket_index(count: u32) -> usize {
    match count {
        0 => 0,
        n if n >= APPLICANT_CAP => (APPLICANT_CAP / APPLICANT_BUCKET_WIDTH) as usize + 1,
        n => (n / APPLICANT_BUCKET_WIDTH) as usize + 1,
    }
}

/// Jobs without a known applicant count are left out.
pub fn applicant_buckets(table: &JobTable) -> Vec<Count> {
    let labels = applicant_bucket_labels();
    let mut values = vec![0usize; labels.len()];
    for count in table.iter().filter_map(|job| job.applicant_count) {
        values[applicant_bucket_index(count)] += 1;
    }
    labels
        .into_iter()
        .zip(values)
        .map(|(label, value)| Count::new(label, value))
        .collect()
}

/// A job requires the group when any of its columns is flagged.
pub fn requirement_share(table: &JobTable, columns: &[&str]) -> Share {
    let required = table.iter().filter(|job| job.has_any(columns)).count();
    Share {
        required,
        not_required: table.len() - required,
    }
}

pub fn single_skill_share(table: &JobTable, column: &str) -> Share {
    requirement_share(table, &[column])
}

pub fn skill_counts(table: &JobTable, columns: &[&str]) -> Vec<Count> {
    let mut counts: Vec<Count> = columns
        .iter()
        .map(|column| Count::new(*column, table.iter().filter(|job| job.has(column)).count()))
        .collect();
    sort_descending(&mut counts);
    counts
}

pub fn grouped_counts(table: &JobTable, groups: &[SkillGroup<'_>]) -> Vec<Count> {
    let mut counts: Vec<Count> = groups
        .iter()
        .map(|group| Count::new(group.label, requirement_share(table, group.columns).required))
        .collect();
    sort_descending(&mut counts);
    counts
}

/// Exclusive region sizes for up to three overlapping groups. Regions are
/// listed for every non-empty combination, in bitmask order. Groups past the
/// third are dropped.
pub fn venn(table: &JobTable, groups: &[SkillGroup<'_>]) -> VennCounts {
    if groups.len() > MAX_VENN_SETS {
        warn!(
            given = groups.len(),
            kept = MAX_VENN_SETS,
            "too many venn sets, dropping the rest"
        );
    }
    let groups = &groups[..groups.len().min(MAX_VENN_SETS)];

    let region_count = 1usize << groups.len();
    let mut regions = vec![0usize; region_count];
    let mut sizes = vec![0usize; groups.len()];

    for job in table.iter() {
        let mut mask = 0usize;
        for (i, group) in groups.iter().enumerate() {
            if job.has_any(group.columns) {
                mask |= 1 << i;
                sizes[i] += 1;
            }
        }
        if mask != 0 {
            regions[mask] += 1;
        }
    }

    VennCounts {
        sets: groups
            .iter()
            .zip(sizes)
            .map(|(group, size)| Count::new(group.label, size))
            .collect(),
        regions: (1..region_count)
            .map(|mask| VennRegion {
                sets: groups
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1usize << *i) != 0)
                    .map(|(_, group)| group.label.to_string())
                    .collect(),
                count: regions[mask],
            })
            .collect(),
    }
}

/// Jobs that can be placed on the map.
pub fn locations(table: &JobTable) -> Vec<Location> {
    table
        .iter()
        .filter(|job| !job.id.is_empty())
        .filter_map(|job| {
            job.location.map(|point| Location {
                id: job.id.clone(),
                lat: point.y(),
                lng: point.x(),
            })
        })
        .collect()
}
