//! Substitution engine - Rewrites `:token:` triggers in chat text

use once_cell::sync::Lazy;
use rand::Rng;
use regex_lite::Regex;

use crate::domain::entities::SubstitutionTable;

static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r":([A-Za-z0-9_+\-]+):").expect("token pattern is valid")
});

/// Applies a substitution table to whole messages
pub struct SubstitutionEngine {
    table: SubstitutionTable,
}

impl SubstitutionEngine {
    pub fn new(table: SubstitutionTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &SubstitutionTable {
        &self.table
    }

    /// Run one substitution pass.
    ///
    /// Returns `None` when the text holds no trigger, or when any trigger is
    /// unknown: in that case nothing is rewritten at all.
    pub fn substitute<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> Option<String> {
        let matches: Vec<(&str, &str)> = TOKEN_PATTERN
            .captures_iter(text)
            .filter_map(|caps| Some((caps.get(0)?.as_str(), caps.get(1)?.as_str())))
            .collect();
        if matches.is_empty() {
            return None;
        }

        let mut out = text.to_string();
        for (literal, token) in matches {
            let Some(replacement) = self.table.lookup(token) else {
                tracing::debug!("Unknown trigger :{}:, dropping substitution", token);
                return None;
            };
            out = out.replacen(literal, replacement.resolve(rng), 1);
        }
        Some(out)
    }
}
