//! Multi-pattern substring matching for indicator tables.
//!
//! Each table row maps a label (a framework, a database, ...) to the
//! substrings whose presence in a document signals it. All indicators of a
//! table are compiled into one case-insensitive Aho-Corasick automaton so a
//! document is scanned once regardless of table size.

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use std::collections::BTreeSet;

/// Compiled indicator table
pub struct IndicatorSet<L: Copy> {
    matcher: AhoCorasick,
    /// Pattern id -> (label, indicator text)
    patterns: Vec<(L, &'static str)>,
}

impl<L: Copy + Ord> IndicatorSet<L> {
    pub fn new(table: &[(L, &[&'static str])]) -> Result<Self, aho_corasick::BuildError> {
        let patterns: Vec<(L, &'static str)> = table
            .iter()
            .flat_map(|(label, indicators)| indicators.iter().map(move |indicator| (*label, *indicator)))
            .collect();

        let matcher = AhoCorasickBuilder::new()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::Standard)
            .build(patterns.iter().map(|(_, indicator)| *indicator))?;

        Ok(Self { matcher, patterns })
    }

    /// Every distinct indicator found in `text`, in table order
    pub fn matched_indicators(&self, text: &str) -> Vec<(L, &'static str)> {
        let mut hit = vec![false; self.patterns.len()];
        for mat in self.matcher.find_overlapping_iter(text) {
            hit[mat.pattern().as_usize()] = true;
        }

        self.patterns
            .iter()
            .zip(hit)
            .filter_map(|(pattern, found)| found.then_some(*pattern))
            .collect()
    }

    /// Distinct labels with at least one indicator present in `text`
    pub fn matched_labels(&self, text: &str) -> BTreeSet<L> {
        self.matched_indicators(text)
            .into_iter()
            .map(|(label, _)| label)
            .collect()
    }
}
