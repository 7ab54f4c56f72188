use std::ops::Range;

use regex::Regex;

use crate::model::task::Task;

/// Which field of a task matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchField {
    Title,
    Description,
}

/// A search hit for a task field
#[derive(Debug, Clone)]
pub struct SearchHit {
    /// Index into the searched slice
    pub index: usize,
    pub field: MatchField,
    pub spans: Vec<Range<usize>>,
}

/// Compile a case-insensitive search regex. Falls back to a literal match
/// when the pattern is not a valid regex.
pub fn compile_pattern(pattern: &str) -> Option<Regex> {
    Regex::new(&format!("(?i){}", pattern))
        .or_else(|_| Regex::new(&format!("(?i){}", regex::escape(pattern))))
        .ok()
}

/// Collect all non-overlapping match byte-ranges for a regex in the given text.
fn find_matches(re: &Regex, text: &str) -> Vec<Range<usize>> {
    re.find_iter(text).map(|m| m.start()..m.end()).collect()
}

/// Search titles and descriptions across the task snapshot.
pub fn search_tasks(tasks: &[Task], re: &Regex) -> Vec<SearchHit> {
    let mut hits = Vec::new();
    for (index, task) in tasks.iter().enumerate() {
        let title_spans = find_matches(re, &task.title);
        if !title_spans.is_empty() {
            hits.push(SearchHit {
                index,
                field: MatchField::Title,
                spans: title_spans,
            });
        }
        let desc_spans = find_matches(re, &task.description);
        if !desc_spans.is_empty() {
            hits.push(SearchHit {
                index,
                field: MatchField::Description,
                spans: desc_spans,
            });
        }
    }
    hits
}
