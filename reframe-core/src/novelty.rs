//! Recent-output history used to reject near-duplicate facts.

use std::collections::VecDeque;

/// Default number of accepted texts remembered.
pub const DEFAULT_CAPACITY: usize = 10;

/// Containment only counts when the contained string is longer than this.
const MIN_CONTAINMENT_LEN: usize = 10;

/// Characters dropped before comparison.
const STRIPPED_PUNCTUATION: &[char] = &[
    '.', ',', '/', '#', '!', '$', '%', '^', '&', '*', ';', ':', '{', '}', '=', '-', '_', '`', '~',
    '(', ')',
];

/// Lowercase `text` and strip the fixed punctuation set.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| !STRIPPED_PUNCTUATION.contains(c))
        .collect()
}

/// Bounded FIFO history of accepted texts.
///
/// Callers must ask [`NoveltyFilter::is_too_similar`] before [`NoveltyFilter::record`];
/// a rejected candidate is never recorded.
#[derive(Debug, Clone)]
pub struct NoveltyFilter {
    capacity: usize,
    entries: VecDeque<Entry>,
}

#[derive(Debug, Clone)]
struct Entry {
    text: String,
    normalized: String,
}

impl NoveltyFilter {
    /// Create a filter remembering at most `capacity` texts.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: VecDeque::with_capacity(capacity.max(1) + 1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Recorded texts, oldest first.
    pub fn recent(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.text.as_str())
    }

    /// Whether `candidate` equals or overlaps a recent text after normalization.
    pub fn is_too_similar(&self, candidate: &str) -> bool {
        let normalized = normalize(candidate);
        self.entries
            .iter()
            .any(|entry| overlaps(&normalized, &entry.normalized))
    }

    /// Remember `text`, evicting the oldest entry once over capacity.
    pub fn record(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.entries.iter().any(|e| e.text == text) {
            return;
        }

        let normalized = normalize(&text);
        self.entries.push_back(Entry { text, normalized });
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }
}

impl Default for NoveltyFilter {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Lengths count `char`s, so one emoji is one unit; ASCII text counts the same
/// as UTF-16 code units.
fn overlaps(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    (a.chars().count() > MIN_CONTAINMENT_LEN && b.contains(a))
        || (b.chars().count() > MIN_CONTAINMENT_LEN && a.contains(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("THE OCEAN COVERS 71% OF EARTH!"), "the ocean covers 71 of earth");
        assert_eq!(normalize("a-b_c (d) {e}"), "abc d e");
        // '?' and quotes are not in the stripped set
        assert_eq!(normalize("Why? \"Yes\""), "why? \"yes\"");
    }

    #[test]
    fn test_case_and_punctuation_insensitive_equality() {
        let mut filter = NoveltyFilter::default();
        filter.record("THE OCEAN COVERS 71% OF EARTH!");
        assert!(filter.is_too_similar("The ocean covers 71% of Earth."));
    }

    #[test]
    fn test_short_string_containment_guard() {
        let mut filter = NoveltyFilter::default();
        filter.record("AI is transforming industries today with 40% growth.");
        assert!(!filter.is_too_similar("AI"));
    }

    #[test]
    fn test_containment_either_direction() {
        let mut filter = NoveltyFilter::default();
        filter.record("Tardigrades survive in space");
        assert!(filter.is_too_similar("Scientists found tardigrades survive in space for 10 days."));

        let mut filter = NoveltyFilter::default();
        filter.record("Scientists found tardigrades survive in space for 10 days.");
        assert!(filter.is_too_similar("Tardigrades survive in space"));
    }

    #[test]
    fn test_unrelated_text_passes() {
        let mut filter = NoveltyFilter::default();
        filter.record("Perovskite cells reached 33.9% efficiency in 2023.");
        assert!(!filter.is_too_similar("A 2022 survey counted 1,200 new deep-sea species."));
    }

    #[test]
    fn test_fifo_eviction() {
        let mut filter = NoveltyFilter::new(3);
        for i in 0..4 {
            filter.record(format!("fact number {i} about coral reefs"));
        }
        assert_eq!(filter.len(), 3);
        assert!(!filter.is_too_similar("fact number 0 about coral reefs"));
        assert!(filter.is_too_similar("fact number 3 about coral reefs"));
        assert_eq!(filter.recent().next(), Some("fact number 1 about coral reefs"));
    }

    #[test]
    fn test_record_same_text_twice_is_stored_once() {
        let mut filter = NoveltyFilter::new(2);
        filter.record("first fact text here");
        filter.record("first fact text here");
        filter.record("second fact text here");
        assert_eq!(filter.len(), 2);
        assert!(filter.is_too_similar("first fact text here"));
    }

    #[test]
    fn test_empty_filter_accepts_everything() {
        let filter = NoveltyFilter::default();
        assert!(filter.is_empty());
        assert!(!filter.is_too_similar(""));
    }

    #[test]
    fn test_containment_length_counts_chars() {
        let mut filter = NoveltyFilter::new(10);
        filter.record("🌊🌊🌊🌊🌊🌊 tides rose 3 cm in 2024");
        // six chars, twelve UTF-16 units
        assert!(!filter.is_too_similar("🌊🌊🌊🌊🌊🌊"));
        assert!(filter.is_too_similar("🌊🌊🌊🌊🌊🌊 tides rose"));
    }
}
