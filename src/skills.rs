// Fixed skill vocabulary. Column names match the dataset header exactly.

pub const PROGRAMMING_LANGUAGES: &[&str] = &["python", "r", "scala"];

/// A posting counts as asking for programming when it names a language or
/// uses the word "programming" itself.
pub const PROGRAMMING_MENTIONS: &[&str] = &["python", "r", "scala", "programming"];

pub const ETL_SOFTWARE: &[&str] = &[
    "talend", "dataiku", "pentaho", "snowflake", "hive", "spark", "kafka", "kinesis", "etl",
];

pub const DATA_VISUALIZATION: &[&str] = &[
    "matplotlib",
    "seaborn",
    "plotly",
    "bokeh",
    "tableau",
    "redash",
    "powerbi",
    "data_visualization",
];

pub const DATABASES: &[&str] = &[
    "mysql", "postgresql", "sql", "mongodb", "redis", "sqlite", "sql server", "bigquery", "nosql",
];

pub const OTHER_SKILLS: &[&str] = &["communication", "deployment", "english"];

/// Flag columns outside the charted groups; loaded and summarised only.
pub const KEYWORD_COLUMNS: &[&str] = &["programming", "data_mining", "data_scraping"];

/// Database columns folded into the three families the dashboard compares.
pub const SQL_FAMILY: &[&str] = &["mysql", "postgresql", "sql", "sqlite", "sql server"];
pub const NOSQL_FAMILY: &[&str] = &["mongodb", "redis", "nosql"];
pub const BIGQUERY_FAMILY: &[&str] = &["bigquery"];

// The database bar chart folds columns differently from the Venn diagram:
// `sql server` is left out and `bigquery` also counts as nosql.
pub const SQL_BAR_FAMILY: &[&str] = &["mysql", "postgresql", "sql", "sqlite"];
pub const NOSQL_BAR_FAMILY: &[&str] = &["mongodb", "redis", "bigquery"];

/// SQL engines shown individually on the "SQL Database" bar chart.
pub const SQL_ENGINES: &[&str] = &["mysql", "postgresql", "sql", "sqlite", "bigquery"];

/// Options of the "core skills" multiselect.
pub const CORE_MATCH_SKILLS: &[&str] = &[
    "python", "r", "scala", "spark", "kafka", "talend", "pentaho", "hive", "tableau", "powerbi",
    "redash", "sql", "nosql", "bigquery",
];

/// Options of the "soft skills" multiselect.
pub const SOFT_MATCH_SKILLS: &[&str] = OTHER_SKILLS;

/// Every flag column the loader requires in the CSV header.
pub fn flag_columns() -> impl Iterator<Item = &'static str> + Clone {
    PROGRAMMING_LANGUAGES
        .iter()
        .chain(ETL_SOFTWARE)
        .chain(DATA_VISUALIZATION)
        .chain(DATABASES)
        .chain(OTHER_SKILLS)
        .chain(KEYWORD_COLUMNS)
        .copied()
}

/// The vocabulary the match filter checks: core options followed by soft options.
pub fn match_vocabulary() -> impl Iterator<Item = &'static str> + Clone {
    CORE_MATCH_SKILLS.iter().chain(SOFT_MATCH_SKILLS).copied()
}

pub fn is_match_skill(name: &str) -> bool {
    match_vocabulary().any(|skill| skill == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn match_vocabulary_is_subset_of_flag_columns() {
        let columns: HashSet<&str> = flag_columns().collect();
        for skill in match_vocabulary() {
            assert!(columns.contains(skill), "{skill} is not a flag column");
        }
    }

    #[test]
    fn flag_columns_are_unique() {
        let all: Vec<&str> = flag_columns().collect();
        let unique: HashSet<&str> = all.iter().copied().collect();
        assert_eq!(all.len(), unique.len());
    }

    #[test]
    fn database_families_cover_database_columns() {
        let families: HashSet<&str> = SQL_FAMILY
            .iter()
            .chain(NOSQL_FAMILY)
            .chain(BIGQUERY_FAMILY)
            .copied()
            .collect();
        let databases: HashSet<&str> = DATABASES.iter().copied().collect();
        assert_eq!(families, databases);
    }

    #[test]
    fn loader_requires_keyword_columns() {
        let columns: Vec<&str> = flag_columns().collect();
        assert_eq!(columns.len(), 35);
        for column in PROGRAMMING_MENTIONS.iter().chain(KEYWORD_COLUMNS) {
            assert!(columns.contains(column), "{column} is not loaded");
        }
    }

    #[test]
    fn soft_skills_are_match_skills() {
        assert!(is_match_skill("english"));
        assert!(is_match_skill("sql"));
        assert!(!is_match_skill("matplotlib"));
    }
}
