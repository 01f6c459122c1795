use crate::charts::{BarChart, Chart, MarkerMap, PieChart, VennDiagram, BLUE, RED};
use crate::config::{AppConfig, MatchingConfig};
use crate::matching::{match_jobs, SkillSet};
use crate::skills;
use crate::stats::{self, SkillGroup};
use crate::types::JobTable;
use serde::Serialize;

pub const TITLE: &str = "The State of Data Analyst Jobs in Indonesia LinkedIn Jobs";

const DATABASE_BAR_FAMILIES: [SkillGroup<'static>; 3] = [
    SkillGroup::new("sql", skills::SQL_BAR_FAMILY),
    SkillGroup::new("nosql", skills::NOSQL_BAR_FAMILY),
    SkillGroup::new("big query", skills::BIGQUERY_FAMILY),
];

const DATABASE_FAMILIES: [SkillGroup<'static>; 3] = [
    SkillGroup::new("sql", skills::SQL_FAMILY),
    SkillGroup::new("nosql", skills::NOSQL_FAMILY),
    SkillGroup::new("big query", skills::BIGQUERY_FAMILY),
];

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub title: String,
    pub sections: Vec<Section>,
    pub matcher: MatchWidget,
}

#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub heading: String,
    pub panels: Vec<Panel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Panel {
    pub title: String,
    pub narrative: Vec<String>,
    pub tabs: Vec<Tab>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Tab {
    pub label: String,
    pub chart: Chart,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchWidget {
    pub core_options: Vec<&'static str>,
    pub soft_options: Vec<&'static str>,
    pub default_core: Vec<String>,
    pub default_soft: Vec<String>,
    pub chart: PieChart,
}

impl Panel {
    fn new(title: &str, narrative: Vec<String>, tabs: Vec<Tab>) -> Self {
        Self {
            title: title.to_string(),
            narrative,
            tabs,
        }
    }
}

fn tab(label: &str, chart: Chart) -> Tab {
    Tab {
        label: label.to_string(),
        chart,
    }
}

fn lines(text: &[&str]) -> Vec<String> {
    text.iter().map(|line| line.to_string()).collect()
}

pub fn build(table: &JobTable, config: &AppConfig) -> Dashboard {
    Dashboard {
        title: TITLE.to_string(),
        sections: vec![
            location_section(table, config),
            core_skills_section(table),
            other_skills_section(table),
        ],
        matcher: match_widget(table, &config.matching),
    }
}

pub fn marker_map(table: &JobTable, config: &AppConfig) -> MarkerMap {
    MarkerMap::new(&config.map, stats::locations(table))
}

fn location_section(table: &JobTable, config: &AppConfig) -> Section {
    let work_types = stats::work_type_counts(table);
    let remote = work_types
        .iter()
        .find(|c| c.label.eq_ignore_ascii_case("remote"))
        .map(|c| c.value)
        .unwrap_or(0);
    let remote_pct = percent_of(remote, table.len());

    Section {
        heading: "Jobs Location".to_string(),
        panels: vec![
            Panel::new(
                "Jobs Location",
                lines(&["Most postings are located in Jakarta or West Java."]),
                vec![tab("Map", Chart::Map(marker_map(table, config)))],
            ),
            Panel::new(
                "Work Type",
                vec![
                    "Hybrid and on-site work are becoming dominant again.".to_string(),
                    format!(
                        "Remote positions make up {remote_pct:.1}% of postings; if unspecified postings are \
                         assumed to be on-site, most work is offline again."
                    ),
                ],
                vec![tab(
                    "Pie Chart",
                    Chart::Pie(PieChart::new("Work Type", work_types, &[BLUE, RED])),
                )],
            ),
            Panel::new(
                "Applicants Count",
                lines(&[
                    "LinkedIn caps the visible applicant count at 200; anything above shows as 200+.",
                    "Many postings reach 200+ applicants, usually from popular companies.",
                    "Most postings sit between 1 and 39 applicants.",
                ]),
                vec![tab(
                    "Bar Plot",
                    Chart::Bar(BarChart::new(
                        "Applicants Count",
                        "applicant_count",
                        stats::applicant_buckets(table),
                    )),
                )],
            ),
        ],
    }
}

fn core_skills_section(table: &JobTable) -> Section {
    Section {
        heading: "Core Skills".to_string(),
        panels: vec![
            programming_panel(table),
            etl_panel(table),
            visualization_panel(table),
            database_panel(table),
        ],
    }
}

fn programming_panel(table: &JobTable) -> Panel {
    let share = stats::requirement_share(table, skills::PROGRAMMING_MENTIONS);
    let groups: Vec<SkillGroup<'_>> = skills::PROGRAMMING_LANGUAGES
        .iter()
        .map(|column| SkillGroup::new(column, std::slice::from_ref(column)))
        .collect();

    Panel::new(
        "Programming Languages",
        vec![
            format!(
                "{:.1}% of postings mention Python, R, Scala or the word \"programming\".",
                share.percent()
            ),
            "Python is mentioned far more than any other language; R remains a reasonable \
             alternative and Scala is rare."
                .to_string(),
        ],
        vec![
            tab(
                "Pie Chart",
                Chart::Pie(PieChart::from_share("Programming Languages", share, [BLUE, RED])),
            ),
            tab(
                "Bar Plot",
                Chart::Bar(BarChart::new(
                    "Programming Languages",
                    "programming_language",
                    stats::skill_counts(table, skills::PROGRAMMING_LANGUAGES),
                )),
            ),
            tab(
                "Venn Diagram",
                Chart::Venn(VennDiagram::new(
                    "Programming Languages",
                    stats::venn(table, &groups),
                )),
            ),
        ],
    )
}

fn etl_panel(table: &JobTable) -> Panel {
    let share = stats::requirement_share(table, skills::ETL_SOFTWARE);
    Panel::new(
        "ETL Softwares",
        vec![
            format!(
                "{:.1}% of postings explicitly mention an ETL tool or the ETL keyword.",
                share.percent()
            ),
            "Most of them name the practice rather than a product, so any ETL tool is a fine \
             choice to learn."
                .to_string(),
        ],
        vec![
            tab(
                "Pie Chart",
                Chart::Pie(PieChart::from_share("ETL Softwares", share, [RED, BLUE])),
            ),
            tab(
                "Bar Plot",
                Chart::Bar(BarChart::new(
                    "ETL Softwares",
                    "etl",
                    stats::skill_counts(table, skills::ETL_SOFTWARE),
                )),
            ),
        ],
    )
}

fn visualization_panel(table: &JobTable) -> Panel {
    let share = stats::requirement_share(table, skills::DATA_VISUALIZATION);
    let groups = [
        SkillGroup::new("tableau", &["tableau"]),
        SkillGroup::new("redash", &["redash"]),
        SkillGroup::new("powerbi", &["powerbi"]),
    ];

    Panel::new(
        "Data Visualizations",
        vec![
            format!(
                "{:.1}% of postings mention a data visualization skill.",
                share.percent()
            ),
            "Tableau is the most mentioned visualization tool, ahead of the generic term itself."
                .to_string(),
            "Plotting libraries are rarely named; companies care about tools for sharing results."
                .to_string(),
        ],
        vec![
            tab(
                "Pie Chart",
                Chart::Pie(PieChart::from_share("Data Visualizations", share, [BLUE, RED])),
            ),
            tab(
                "Bar Plot",
                Chart::Bar(BarChart::new(
                    "Data Visualizations",
                    "data_visualization",
                    stats::skill_counts(table, skills::DATA_VISUALIZATION),
                )),
            ),
            tab(
                "Venn Diagram",
                Chart::Venn(VennDiagram::new(
                    "Data Visualizations",
                    stats::venn(table, &groups),
                )),
            ),
        ],
    )
}

fn database_panel(table: &JobTable) -> Panel {
    let share = stats::requirement_share(table, skills::DATABASES);
    Panel::new(
        "Databases",
        vec![
            format!("{:.1}% of postings mention a database.", share.percent()),
            "SQL stays the most important database skill for a data analyst; BigQuery and NoSQL \
             show up as additions."
                .to_string(),
            "The bar plot counts BigQuery as NoSQL as well and leaves SQL Server out of SQL; the \
             Venn diagram keeps BigQuery on its own and counts SQL Server as SQL."
                .to_string(),
        ],
        vec![
            tab(
                "Pie Chart",
                Chart::Pie(PieChart::from_share("Databases", share, [BLUE, RED])),
            ),
            tab(
                "Bar Plot",
                Chart::Bar(BarChart::new(
                    "Databases",
                    "database",
                    stats::grouped_counts(table, &DATABASE_BAR_FAMILIES),
                )),
            ),
            tab(
                "Venn Diagram",
                Chart::Venn(VennDiagram::new(
                    "Databases",
                    stats::venn(table, &DATABASE_FAMILIES),
                )),
            ),
            tab(
                "SQL Bar Plot",
                Chart::Bar(BarChart::new(
                    "SQL Database",
                    "SQL Database",
                    stats::skill_counts(table, skills::SQL_ENGINES),
                )),
            ),
        ],
    )
}

fn other_skills_section(table: &JobTable) -> Section {
    let panel = |column: &str, title: &str, note: &str| {
        let share = stats::single_skill_share(table, column);
        Panel::new(
            title,
            vec![
                format!("{:.1}% of postings mention {} explicitly.", share.percent(), title.to_lowercase()),
                note.to_string(),
            ],
            vec![tab(
                "Pie Chart",
                Chart::Pie(PieChart::from_share(title, share, [RED, BLUE])),
            )],
        )
    };

    Section {
        heading: "Other Skills".to_string(),
        panels: vec![
            panel(
                "communication",
                "Communications",
                "An analyst has to convey insights to stakeholders.",
            ),
            panel(
                "deployment",
                "Deployments",
                "Deployment experience helps a candidate stand out.",
            ),
            panel(
                "english",
                "English",
                "English is needed for clients and for the data itself.",
            ),
        ],
    }
}

pub fn match_widget(table: &JobTable, matching: &MatchingConfig) -> MatchWidget {
    let selection = SkillSet::from_selection(&matching.default_core, &matching.default_soft);
    MatchWidget {
        core_options: skills::CORE_MATCH_SKILLS.to_vec(),
        soft_options: skills::SOFT_MATCH_SKILLS.to_vec(),
        default_core: matching.default_core.clone(),
        default_soft: matching.default_soft.clone(),
        chart: PieChart::from_match(match_jobs(table, &selection)),
    }
}

fn percent_of(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::JobRecord;
    use geo::Point;

    fn config() -> AppConfig {
        AppConfig::from_toml("[input]\ndata_csv = \"jobs.csv\"\n[server]\nport = 8501\n").unwrap()
    }

    fn table() -> JobTable {
        let job = |id: &str, flags: &[&'static str]| JobRecord {
            id: id.to_string(),
            location: Some(Point::new(106.8, -6.2)),
            work_type: Some("Remote".to_string()),
            applicant_count: Some(5),
            skills: flags.iter().copied().collect(),
        };
        JobTable::new(vec![
            job("1", &["python", "sql", "communication"]),
            job("2", &["python", "pentaho"]),
            job("3", &["tableau", "mongodb"]),
            job("4", &[]),
        ])
    }

    #[test]
    fn dashboard_has_every_section() {
        let dashboard = build(&table(), &config());
        let headings: Vec<&str> = dashboard.sections.iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(headings, vec!["Jobs Location", "Core Skills", "Other Skills"]);

        let core = &dashboard.sections[1];
        let titles: Vec<&str> = core.panels.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Programming Languages", "ETL Softwares", "Data Visualizations", "Databases"]
        );
        assert_eq!(core.panels[3].tabs.len(), 4);
    }

    #[test]
    fn narrative_percentages_are_computed() {
        let dashboard = build(&table(), &config());
        let programming = &dashboard.sections[1].panels[0];
        assert_eq!(
            programming.narrative[0],
            "50.0% of postings mention Python, R, Scala or the word \"programming\"."
        );
    }

    #[test]
    fn programming_keyword_alone_counts_as_required() {
        let mut jobs = table().jobs().to_vec();
        jobs.push(JobRecord {
            id: "5".to_string(),
            location: None,
            work_type: None,
            applicant_count: None,
            skills: ["programming"].into_iter().collect(),
        });
        let table = JobTable::new(jobs);

        let panel = programming_panel(&table);
        assert_eq!(
            panel.narrative[0],
            "60.0% of postings mention Python, R, Scala or the word \"programming\"."
        );
        let Chart::Pie(pie) = &panel.tabs[0].chart else {
            panic!("expected a pie chart");
        };
        assert_eq!(pie.slices[0].value, 3);
        // The language bar still lists only the three languages.
        let Chart::Bar(bar) = &panel.tabs[1].chart else {
            panic!("expected a bar chart");
        };
        assert_eq!(bar.bars.len(), 3);
    }

    #[test]
    fn database_bar_and_venn_group_columns_differently() {
        let job = |id: &str, flags: &[&'static str]| JobRecord {
            id: id.to_string(),
            location: None,
            work_type: None,
            applicant_count: None,
            skills: flags.iter().copied().collect(),
        };
        let table = JobTable::new(vec![job("1", &["bigquery"]), job("2", &["sql server"])]);

        let panel = database_panel(&table);
        let Chart::Bar(bar) = &panel.tabs[1].chart else {
            panic!("expected a bar chart");
        };
        let bar_value = |label: &str| bar.bars.iter().find(|c| c.label == label).map(|c| c.value);
        assert_eq!(bar_value("sql"), Some(0));
        assert_eq!(bar_value("nosql"), Some(1));
        assert_eq!(bar_value("big query"), Some(1));

        let Chart::Venn(venn) = &panel.tabs[2].chart else {
            panic!("expected a venn diagram");
        };
        let set_size =
            |label: &str| venn.sets.iter().find(|c| c.label == label).map(|c| c.value);
        assert_eq!(set_size("sql"), Some(1));
        assert_eq!(set_size("nosql"), Some(0));
        assert_eq!(set_size("big query"), Some(1));
    }

    #[test]
    fn map_contains_located_jobs() {
        let map = marker_map(&table(), &config());
        assert_eq!(map.markers.len(), 4);
        assert_eq!(map.center, [-2.945311, 119.579316]);
    }

    #[test]
    fn match_widget_uses_default_selection() {
        let widget = match_widget(&table(), &config().matching);
        // python+pentaho+sql+communication covers jobs 1, 2 and 4.
        assert_eq!(widget.chart.slices[0].value, 3);
        assert_eq!(widget.chart.slices[1].value, 1);
        assert_eq!(widget.core_options.len(), 14);
        assert_eq!(widget.soft_options, vec!["communication", "deployment", "english"]);
    }
}
