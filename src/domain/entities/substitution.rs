use rand::seq::IndexedRandom;
use rand::Rng;
use std::collections::HashMap;

/// What a trigger token expands to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replacement {
    Fixed(String),
    /// Never empty; one candidate is picked per occurrence
    Choice(Vec<String>),
}

impl Replacement {
    pub fn resolve<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        match self {
            Replacement::Fixed(text) => text,
            Replacement::Choice(candidates) => candidates
                .choose(rng)
                .map(String::as_str)
                .unwrap_or_default(),
        }
    }
}

/// A named group of trigger tokens
#[derive(Debug, Clone, Default)]
pub struct Category {
    pub name: String,
    entries: HashMap<String, Replacement>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: HashMap::new(),
        }
    }

    pub fn with_fixed(mut self, token: impl Into<String>, text: impl Into<String>) -> Self {
        self.entries.insert(token.into(), Replacement::Fixed(text.into()));
        self
    }

    /// Empty candidate lists are ignored
    pub fn with_choice<I, S>(mut self, token: impl Into<String>, candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let candidates: Vec<String> = candidates.into_iter().map(Into::into).collect();
        if !candidates.is_empty() {
            self.entries.insert(token.into(), Replacement::Choice(candidates));
        }
        self
    }

    pub fn get(&self, token: &str) -> Option<&Replacement> {
        self.entries.get(token)
    }

    pub fn tokens(&self) -> Vec<&str> {
        let mut tokens: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        tokens.sort_unstable();
        tokens
    }
}

/// Static token table, consulted category by category
#[derive(Debug, Clone, Default)]
pub struct SubstitutionTable {
    categories: Vec<Category>,
}

impl SubstitutionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }

    /// First category holding the token wins
    pub fn lookup(&self, token: &str) -> Option<&Replacement> {
        self.categories.iter().find_map(|c| c.get(token))
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_lookup_respects_category_order() {
        let table = SubstitutionTable::new()
            .with_category(Category::new("emoji").with_fixed("smile", "🙂"))
            .with_category(Category::new("other").with_choice("smile", ["x", "y"]));

        assert_eq!(table.lookup("smile"), Some(&Replacement::Fixed("🙂".to_string())));
        assert_eq!(table.lookup("frown"), None);
    }

    #[test]
    fn test_choice_resolves_to_a_candidate() {
        let entry = Replacement::Choice(vec!["a".to_string(), "b".to_string()]);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let picked = entry.resolve(&mut rng);
            assert!(picked == "a" || picked == "b");
        }
    }

    #[test]
    fn test_empty_choice_is_not_registered() {
        let category = Category::new("other").with_choice("nothing", Vec::<String>::new());
        assert!(category.get("nothing").is_none());
    }
}
