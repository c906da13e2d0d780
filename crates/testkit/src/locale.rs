//! Locale stub.

use std::collections::HashMap;

use parlor_service::LocalePort;

/// Fixed-answer locale for tests.
///
/// Explicit entries win; any other key comes back as the recognizable
/// `[key]` placeholder, so assertions never depend on translation tables.
#[derive(Debug, Clone, Default)]
pub struct StaticLocale {
    entries: HashMap<String, String>,
}

impl StaticLocale {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }
}

impl LocalePort for StaticLocale {
    fn localized(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| format!("[{key}]"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_entries_win() {
        let locale = StaticLocale::new().with_entry("game.win", "You win!");
        assert_eq!(locale.localized("game.win"), "You win!");
    }

    #[test]
    fn unknown_keys_become_placeholders() {
        let locale = StaticLocale::new();
        assert_eq!(locale.localized("game.lose"), "[game.lose]");
    }
}
