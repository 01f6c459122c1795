use geo::Point;
use serde::Serialize;
use std::collections::BTreeSet;

pub const NOT_SPECIFIED: &str = "Not-Specified";

#[derive(Debug, Clone, PartialEq)]
pub struct JobRecord {
    pub id: String,
    pub location: Option<Point<f64>>, // x = lng, y = lat
    pub work_type: Option<String>,
    pub applicant_count: Option<u32>,
    // Only the flags that are true; anything absent is false.
    pub skills: BTreeSet<&'static str>,
}

impl JobRecord {
    pub fn has(&self, skill: &str) -> bool {
        self.skills.contains(skill)
    }

    pub fn has_any(&self, skills: &[&str]) -> bool {
        skills.iter().any(|s| self.has(s))
    }

    pub fn work_type_label(&self) -> &str {
        self.work_type.as_deref().unwrap_or(NOT_SPECIFIED)
    }
}

/// The loaded dataset. Built once, then only ever read.
#[derive(Debug, Clone, Default)]
pub struct JobTable {
    jobs: Vec<JobRecord>,
}

impl JobTable {
    pub fn new(jobs: Vec<JobRecord>) -> Self {
        Self { jobs }
    }

    pub fn jobs(&self) -> &[JobRecord] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, JobRecord> {
        self.jobs.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchCounts {
    pub matched: usize,
    pub unmatched: usize,
}

impl MatchCounts {
    pub fn total(&self) -> usize {
        self.matched + self.unmatched
    }
}
