use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Durable per-subject counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ScoreboardState {
    scores: BTreeMap<String, i64>,
}

impl ScoreboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, subject: &str) -> Option<i64> {
        self.scores.get(subject).copied()
    }

    /// Add `delta` to the subject's counter, starting from zero, and return the new value
    pub fn mutate(&mut self, subject: &str, delta: i64) -> i64 {
        let value = self.scores.entry(subject.to_string()).or_insert(0);
        *value = value.saturating_add(delta);
        *value
    }

    pub fn set(&mut self, subject: &str, value: i64) {
        self.scores.insert(subject.to_string(), value);
    }

    pub fn remove(&mut self, subject: &str) -> Option<i64> {
        self.scores.remove(subject)
    }

    /// Highest scores first, ties broken by subject name
    pub fn top(&self, limit: usize) -> Vec<(&str, i64)> {
        let mut entries: Vec<(&str, i64)> = self.scores.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries.truncate(limit);
        entries
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
