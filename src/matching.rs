use crate::skills;
use crate::types::{JobRecord, JobTable, MatchCounts};
use std::collections::BTreeSet;

/// The skills a user claims to have. Names outside the match vocabulary are
/// kept but never consulted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillSet(BTreeSet<String>);

impl SkillSet {
    pub fn new<I, S>(skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(skills.into_iter().map(Into::into).collect())
    }

    /// Union of the two multiselects.
    pub fn from_selection(core: &[String], soft: &[String]) -> Self {
        Self::new(core.iter().chain(soft).cloned())
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.0.contains(skill)
    }

    /// Names that the filter will ignore.
    pub fn unknown(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .map(String::as_str)
            .filter(|s| !skills::is_match_skill(s))
    }
}

/// True unless the job flags a vocabulary skill the user lacks.
pub fn is_fully_matched<'a>(
    job: &JobRecord,
    vocabulary: impl IntoIterator<Item = &'a str>,
    possessed: &SkillSet,
) -> bool {
    vocabulary
        .into_iter()
        .all(|skill| !job.has(skill) || possessed.contains(skill))
}

/// Counts jobs fully matched by `possessed` over the dashboard's vocabulary.
pub fn match_jobs(table: &JobTable, possessed: &SkillSet) -> MatchCounts {
    match_jobs_with_vocabulary(table, skills::match_vocabulary(), possessed)
}

pub fn match_jobs_with_vocabulary<'a>(
    table: &JobTable,
    vocabulary: impl IntoIterator<Item = &'a str> + Clone,
    possessed: &SkillSet,
) -> MatchCounts {
    let matched = table
        .iter()
        .filter(|job| is_fully_matched(job, vocabulary.clone(), possessed))
        .count();

    MatchCounts {
        matched,
        unmatched: table.len() - matched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: &str, flags: &[&'static str]) -> JobRecord {
        JobRecord {
            id: id.to_string(),
            location: None,
            work_type: None,
            applicant_count: None,
            skills: flags.iter().copied().collect(),
        }
    }

    const SMALL_VOCAB: [&str; 3] = ["python", "sql", "communication"];

    fn small_table() -> JobTable {
        JobTable::new(vec![
            job("1", &["python"]),
            job("2", &[]),
            job("3", &["python", "sql", "communication"]),
        ])
    }

    fn sample_table() -> JobTable {
        JobTable::new(vec![
            job("a", &["python", "sql"]),
            job("b", &["tableau"]),
            job("c", &[]),
            job("d", &["communication", "english"]),
            job("e", &["python", "r", "scala", "spark"]),
            job("f", &["sql", "bigquery", "powerbi"]),
            // Not a match vocabulary column, so never required.
            job("g", &["matplotlib", "etl"]),
        ])
    }

    #[test]
    fn python_only_matches_two_of_three() {
        let counts = match_jobs_with_vocabulary(
            &small_table(),
            SMALL_VOCAB,
            &SkillSet::new(["python"]),
        );
        assert_eq!(counts, MatchCounts { matched: 2, unmatched: 1 });
    }

    #[test]
    fn empty_selection_matches_only_unflagged_jobs() {
        let counts = match_jobs_with_vocabulary(&small_table(), SMALL_VOCAB, &SkillSet::default());
        assert_eq!(counts, MatchCounts { matched: 1, unmatched: 2 });
    }

    #[test]
    fn full_vocabulary_matches_everything() {
        let table = sample_table();
        let everything = SkillSet::new(skills::match_vocabulary());
        let counts = match_jobs(&table, &everything);
        assert_eq!(counts.matched, table.len());
        assert_eq!(counts.unmatched, 0);
    }

    #[test]
    fn empty_selection_counts_jobs_without_vocabulary_flags() {
        let table = sample_table();
        let expected = table
            .iter()
            .filter(|j| !skills::match_vocabulary().any(|s| j.has(s)))
            .count();
        let counts = match_jobs(&table, &SkillSet::default());
        assert_eq!(counts.matched, expected);
        assert_eq!(counts.matched, 2); // "c" and "g"
    }

    #[test]
    fn counts_always_sum_to_total() {
        let table = sample_table();
        let selections = [
            vec![],
            vec!["python"],
            vec!["python", "sql"],
            vec!["sql", "bigquery", "powerbi", "tableau"],
            vec!["communication", "english", "python", "r", "scala", "spark"],
        ];
        for selection in selections {
            let counts = match_jobs(&table, &SkillSet::new(selection));
            assert_eq!(counts.total(), table.len());
        }
    }

    #[test]
    fn larger_selection_never_matches_fewer() {
        let table = sample_table();
        let vocab: Vec<&str> = skills::match_vocabulary().collect();
        let mut selection = Vec::new();
        let mut previous = match_jobs(&table, &SkillSet::default()).matched;
        for skill in vocab {
            selection.push(skill);
            let current = match_jobs(&table, &SkillSet::new(selection.clone())).matched;
            assert!(current >= previous, "adding {skill} lowered matches");
            previous = current;
        }
        assert_eq!(previous, table.len());
    }

    #[test]
    fn unknown_skills_have_no_effect() {
        let table = sample_table();
        let plain = match_jobs(&table, &SkillSet::new(["python", "sql"]));
        let noisy = SkillSet::new(["python", "sql", "cobol", "matplotlib"]);
        assert_eq!(match_jobs(&table, &noisy), plain);
        assert_eq!(noisy.unknown().collect::<Vec<_>>(), vec!["cobol", "matplotlib"]);
    }

    #[test]
    fn selection_is_union_of_both_lists() {
        let set = SkillSet::from_selection(
            &["python".to_string(), "sql".to_string()],
            &["communication".to_string()],
        );
        assert!(set.contains("python") && set.contains("sql") && set.contains("communication"));
        assert!(!set.contains("english"));
    }
}
