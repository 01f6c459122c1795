//! Chart values handed to the browser as JSON. The page only draws them.

use crate::config::MapConfig;
use crate::stats::{Count, Location, Share, VennCounts, VennRegion};
use crate::types::MatchCounts;
use serde::Serialize;

pub const BLUE: &str = "#636EFA";
pub const RED: &str = "#EF553B";

pub const MATCHED_LABEL: &str = "100% Match";
pub const UNMATCHED_LABEL: &str = "Missing at least 1 skill";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Chart {
    Pie(PieChart),
    Bar(BarChart),
    Venn(VennDiagram),
    Map(MarkerMap),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<Count>,
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub bars: Vec<Count>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VennDiagram {
    pub title: String,
    pub sets: Vec<Count>,
    pub regions: Vec<VennRegion>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerMap {
    pub center: [f64; 2],
    pub zoom: u8,
    pub markers: Vec<Location>,
}

fn palette(colors: &[&str]) -> Vec<String> {
    colors.iter().map(|c| c.to_string()).collect()
}

impl PieChart {
    pub fn new(title: impl Into<String>, slices: Vec<Count>, colors: &[&str]) -> Self {
        Self {
            title: title.into(),
            slices,
            colors: palette(colors),
        }
    }

    /// Two slices, `required` then `not_required`.
    pub fn from_share(title: impl Into<String>, share: Share, colors: [&str; 2]) -> Self {
        let slices = vec![
            Count {
                label: "required".to_string(),
                value: share.required,
            },
            Count {
                label: "not_required".to_string(),
                value: share.not_required,
            },
        ];
        Self::new(title, slices, &colors)
    }

    /// The match widget pie. Blue goes to whichever side is larger.
    pub fn from_match(counts: MatchCounts) -> Self {
        let colors = if counts.matched > counts.unmatched {
            [BLUE, RED]
        } else {
            [RED, BLUE]
        };
        let slices = vec![
            Count {
                label: MATCHED_LABEL.to_string(),
                value: counts.matched,
            },
            Count {
                label: UNMATCHED_LABEL.to_string(),
                value: counts.unmatched,
            },
        ];
        Self::new("My 100% Match Jobs", slices, &colors)
    }
}

impl BarChart {
    pub fn new(title: impl Into<String>, x_label: impl Into<String>, bars: Vec<Count>) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            bars,
        }
    }
}

impl VennDiagram {
    pub fn new(title: impl Into<String>, counts: VennCounts) -> Self {
        Self {
            title: title.into(),
            sets: counts.sets,
            regions: counts.regions,
        }
    }
}

impl MarkerMap {
    pub fn new(map: &MapConfig, markers: Vec<Location>) -> Self {
        Self {
            center: [map.center_lat, map.center_lng],
            zoom: map.zoom,
            markers,
        }
    }
}
