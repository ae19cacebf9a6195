// src/result_list.rs
//! Ranked result cards: sorted by score, tier badge, collapsible reasoning.

use std::collections::HashSet;
use std::fmt::Write;

use crate::types::RankingResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    High,
    Medium,
    Low,
}

impl ScoreTier {
    /// Lower bound of each tier is inclusive: 7 is high, 4 is medium.
    pub fn of(score: f64) -> Self {
        if score >= 7.0 {
            ScoreTier::High
        } else if score >= 4.0 {
            ScoreTier::Medium
        } else {
            ScoreTier::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreTier::High => "high",
            ScoreTier::Medium => "medium",
            ScoreTier::Low => "low",
        }
    }
}

/// A result as displayed, with its position in the service response.
#[derive(Debug, Clone, Copy)]
pub struct Entry<'a> {
    pub key: usize,
    pub result: &'a RankingResult,
    pub tier: ScoreTier,
    pub expanded: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ResultList {
    results: Vec<RankingResult>,
    // indices into `results`, best score first
    order: Vec<usize>,
    // keyed by response position, so duplicate filenames stay independent
    expanded: HashSet<usize>,
}

impl ResultList {
    pub fn new(results: Vec<RankingResult>) -> Self {
        let order = sorted_order(&results);
        Self {
            results,
            order,
            expanded: HashSet::new(),
        }
    }

    /// Swap in a new result set; toggle state does not carry over.
    pub fn replace(&mut self, results: Vec<RankingResult>) {
        *self = Self::new(results);
    }

    /// Results in the order the service returned them
    pub fn results(&self) -> &[RankingResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Results best-first; the response order is left as is
    pub fn sorted(&self) -> Vec<&RankingResult> {
        self.order.iter().map(|&i| &self.results[i]).collect()
    }

    pub fn entries(&self) -> impl Iterator<Item = Entry<'_>> + '_ {
        self.order.iter().map(move |&key| {
            let result = &self.results[key];
            Entry {
                key,
                result,
                tier: ScoreTier::of(result.score),
                expanded: self.expanded.contains(&key),
            }
        })
    }

    /// Flip the reasoning panel of the card at `rank` (0 = best).
    /// Returns the new state, or `None` when out of range.
    pub fn toggle(&mut self, rank: usize) -> Option<bool> {
        let key = *self.order.get(rank)?;
        Some(self.flip(key))
    }

    /// Flip every card showing `filename`. Returns how many were flipped.
    pub fn toggle_filename(&mut self, filename: &str) -> usize {
        let keys: Vec<usize> = self
            .results
            .iter()
            .enumerate()
            .filter(|(_, r)| r.filename == filename)
            .map(|(i, _)| i)
            .collect();

        for &key in &keys {
            self.flip(key);
        }
        keys.len()
    }

    pub fn is_expanded(&self, rank: usize) -> bool {
        self.order
            .get(rank)
            .is_some_and(|key| self.expanded.contains(key))
    }

    pub fn expand_all(&mut self) {
        self.expanded = (0..self.results.len()).collect();
    }

    fn flip(&mut self, key: usize) -> bool {
        if self.expanded.remove(&key) {
            false
        } else {
            self.expanded.insert(key);
            true
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        for (rank, entry) in self.entries().enumerate() {
            let result = entry.result;
            let marker = if entry.expanded { "▲" } else { "▼" };

            let _ = writeln!(
                out,
                "#{:<2} ({:>4}) [{}] {}",
                rank + 1,
                result.score,
                entry.tier.as_str(),
                result.filename
            );
            let _ = writeln!(
                out,
                "     Match score: {}/10    View reasoning {}",
                result.score, marker
            );

            if entry.expanded {
                let _ = writeln!(out, "     Reasoning:");
                for line in result.reasoning.lines() {
                    let _ = writeln!(out, "       {}", line);
                }
            }
        }

        out
    }
}

/// Stable, descending by score. Equal scores keep response order.
fn sorted_order(results: &[RankingResult]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..results.len()).collect();
    order.sort_by(|&a, &b| results[b].score.total_cmp(&results[a].score));
    order
}
