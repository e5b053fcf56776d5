use std::{fmt, str::FromStr};

use crate::domain::{Catalog, Project};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LetterFilter {
    #[default]
    All,
    Letter(char),
}

impl LetterFilter {
    pub fn strip() -> Vec<LetterFilter> {
        std::iter::once(LetterFilter::All)
            .chain(('A'..='Z').map(LetterFilter::Letter))
            .collect()
    }

    pub fn label(self) -> String {
        match self {
            LetterFilter::All => "All".to_string(),
            LetterFilter::Letter(c) => c.to_string(),
        }
    }

    fn matches(self, project: &Project) -> bool {
        match self {
            LetterFilter::All => true,
            LetterFilter::Letter(letter) => project.initial() == Some(letter),
        }
    }
}

impl fmt::Display for LetterFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for LetterFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(LetterFilter::All);
        }

        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => {
                Ok(LetterFilter::Letter(c.to_ascii_uppercase()))
            }
            _ => Err(format!("'{}' is not 'All' or a single letter A-Z", s)),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search_text: String,
    pub letter: LetterFilter,
}

impl FilterState {
    pub fn clear_search(&mut self) {
        self.search_text.clear();
    }

    pub fn clear_letter(&mut self) {
        self.letter = LetterFilter::All;
    }

    pub fn clear(&mut self) {
        self.clear_search();
        self.clear_letter();
    }

    pub fn is_active(&self) -> bool {
        self.letter != LetterFilter::All || !self.search_text.trim().is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilteredProject<'a> {
    pub index: usize,
    pub project: &'a Project,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterOutcome<'a> {
    Matches(Vec<FilteredProject<'a>>),
    NoResults,
}

impl<'a> FilterOutcome<'a> {
    pub fn entries(&self) -> &[FilteredProject<'a>] {
        match self {
            FilterOutcome::Matches(entries) => entries,
            FilterOutcome::NoResults => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    #[cfg(test)]
    pub fn titles(&self) -> Vec<&'a str> {
        self.entries()
            .iter()
            .map(|entry| entry.project.title.as_str())
            .collect()
    }
}

pub fn filter_projects<'a>(catalog: &'a Catalog, state: &FilterState) -> FilterOutcome<'a> {
    let query = state.search_text.trim().to_lowercase();

    let entries: Vec<FilteredProject<'a>> = catalog
        .projects()
        .iter()
        .enumerate()
        .filter(|(_, project)| state.letter.matches(project))
        .filter(|(_, project)| query.is_empty() || haystack(project).contains(&query))
        .map(|(index, project)| FilteredProject { index, project })
        .collect();

    if entries.is_empty() {
        FilterOutcome::NoResults
    } else {
        FilterOutcome::Matches(entries)
    }
}

fn haystack(project: &Project) -> String {
    format!("{} {}", project.title, project.details.join(" ")).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> Catalog {
        Catalog::new(vec![
            Project::new("Alpha").with_details(&["Rust parser", "tokio runtime"]),
            Project::new("Bravo").with_details(&["Python scripts"]),
            Project::new("Apple"),
        ])
        .unwrap()
    }

    fn state(search: &str, letter: LetterFilter) -> FilterState {
        FilterState {
            search_text: search.to_string(),
            letter,
        }
    }

    #[test]
    fn test_letter_filter_keeps_catalog_order() {
        let catalog = sample_catalog();
        let outcome = filter_projects(&catalog, &state("", LetterFilter::Letter('A')));
        assert_eq!(outcome.titles(), vec!["Alpha", "Apple"]);
        let indices: Vec<usize> = outcome.entries().iter().map(|e| e.index).collect();
        assert_eq!(indices, vec![0, 2]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = sample_catalog();
        let outcome = filter_projects(&catalog, &state("apple", LetterFilter::All));
        assert_eq!(outcome.titles(), vec!["Apple"]);

        let outcome = filter_projects(&catalog, &state("  APPLE ", LetterFilter::All));
        assert_eq!(outcome.titles(), vec!["Apple"]);
    }

    #[test]
    fn test_search_reaches_into_details() {
        let catalog = sample_catalog();
        let outcome = filter_projects(&catalog, &state("tokio", LetterFilter::All));
        assert_eq!(outcome.titles(), vec!["Alpha"]);

        // title and first detail are space-joined
        let outcome = filter_projects(&catalog, &state("alpha rust", LetterFilter::All));
        assert_eq!(outcome.titles(), vec!["Alpha"]);
    }

    #[test]
    fn test_letter_and_search_combine() {
        let catalog = sample_catalog();
        let outcome = filter_projects(&catalog, &state("python", LetterFilter::Letter('A')));
        assert_eq!(outcome, FilterOutcome::NoResults);
    }

    #[test]
    fn test_blank_search_is_skipped() {
        let catalog = sample_catalog();
        let outcome = filter_projects(&catalog, &state("   ", LetterFilter::All));
        assert_eq!(outcome.len(), 3);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let catalog = sample_catalog();
        let filter = state("a", LetterFilter::Letter('A'));
        let first = filter_projects(&catalog, &filter);
        let second = filter_projects(&catalog, &filter);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_catalog_has_no_results() {
        let catalog = Catalog::default();
        let outcome = filter_projects(&catalog, &FilterState::default());
        assert_eq!(outcome, FilterOutcome::NoResults);
        assert!(outcome.entries().is_empty());
    }

    #[test]
    fn test_lower_case_title_matches_upper_letter() {
        let catalog = Catalog::new(vec![Project::new("apex"), Project::new("Beta")]).unwrap();
        let outcome = filter_projects(&catalog, &state("", LetterFilter::Letter('A')));
        assert_eq!(outcome.titles(), vec!["apex"]);
    }

    #[test]
    fn test_clear_resets_independently() {
        let mut filter = state("rust", LetterFilter::Letter('R'));
        filter.clear_search();
        assert_eq!(filter.letter, LetterFilter::Letter('R'));
        assert!(filter.is_active());

        filter.search_text = "x".to_string();
        filter.clear_letter();
        assert_eq!(filter.search_text, "x");

        filter.clear();
        assert_eq!(filter, FilterState::default());
        assert!(!filter.is_active());
    }

    #[test]
    fn test_letter_filter_parsing() {
        assert_eq!("all".parse::<LetterFilter>(), Ok(LetterFilter::All));
        assert_eq!("q".parse::<LetterFilter>(), Ok(LetterFilter::Letter('Q')));
        assert!("ab".parse::<LetterFilter>().is_err());
        assert!("7".parse::<LetterFilter>().is_err());
        assert_eq!(LetterFilter::strip().len(), 27);
    }
}
