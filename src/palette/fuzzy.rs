//! Approximate substring matching for task search.
//!
//! A query matches a field when the fewest edits (insertions, deletions,
//! substitutions) turning the query into *some* substring of the field,
//! divided by the query length, is at or below the threshold. The comparison
//! is case-insensitive. A score of 0 means the query occurs verbatim.

use crate::models::Task;

/// Default relative edit-distance threshold.
pub const DEFAULT_THRESHOLD: f64 = 0.4;

/// Relative edit-distance matcher.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatcher {
    threshold: f64,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl FuzzyMatcher {
    /// Create a matcher; `threshold` is clamped into `0.0..=1.0`.
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    /// Configured threshold.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Score `query` against one field, `None` when it does not qualify.
    #[must_use]
    pub fn score(&self, query: &str, field: &str) -> Option<f64> {
        let score = relative_distance(query, field);
        (score <= self.threshold).then_some(score)
    }

    /// Best score of `query` across the searchable fields of a task: title,
    /// id, each tag, and the git branch name.
    #[must_use]
    pub fn score_task(&self, query: &str, task: &Task) -> Option<f64> {
        let branch = task.git.as_ref().map(|g| g.branch_name.as_str());
        [task.title.as_str(), task.id.as_str()]
            .into_iter()
            .chain(task.tags.iter().map(String::as_str))
            .chain(branch)
            .filter_map(|field| self.score(query, field))
            .min_by(f64::total_cmp)
    }
}

/// Edit distance from `query` to its closest substring of `text`, over the
/// query length.
#[allow(clippy::cast_precision_loss)] // Lengths are tiny compared to f64 mantissa.
fn relative_distance(query: &str, text: &str) -> f64 {
    let query: Vec<char> = query.chars().flat_map(char::to_lowercase).collect();
    if query.is_empty() {
        return 0.0;
    }
    let edits = substring_edit_distance(&query, text);
    edits as f64 / query.len() as f64
}

/// Semi-global edit distance: the text may be entered and left anywhere for
/// free, every query character must be accounted for.
fn substring_edit_distance(query: &[char], text: &str) -> usize {
    // column[i] = cost of matching query[..i] ending at the current text
    // position.
    let mut column: Vec<usize> = (0..=query.len()).collect();
    let mut best = column[query.len()];

    for tc in text.chars().flat_map(char::to_lowercase) {
        let mut diagonal = column[0];
        column[0] = 0;
        for (i, &qc) in query.iter().enumerate() {
            let substitution = diagonal + usize::from(qc != tc);
            let deletion = column[i] + 1;
            let insertion = column[i + 1] + 1;
            diagonal = column[i + 1];
            column[i + 1] = substitution.min(deletion).min(insertion);
        }
        best = best.min(column[query.len()]);
    }

    best
}
