use std::collections::BTreeSet;

/// Nicknames trusted to run privileged commands.
///
/// Membership is case-sensitive and only ever grows during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminSet {
    nicks: BTreeSet<String>,
}

impl AdminSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from a space separated list, as found in the configuration
    pub fn from_list(list: &str) -> Self {
        let mut set = Self::new();
        set.extend_from_list(list);
        set
    }

    pub fn extend_from_list(&mut self, list: &str) {
        for nick in list.split_whitespace() {
            self.grant(nick);
        }
    }

    /// Returns true when the nick was not trusted before
    pub fn grant(&mut self, nick: impl Into<String>) -> bool {
        self.nicks.insert(nick.into())
    }

    pub fn contains(&self, nick: &str) -> bool {
        self.nicks.contains(nick)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.nicks.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.nicks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nicks.is_empty()
    }
}
