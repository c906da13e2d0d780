//! Minimal game fixture.

use parlor_service::GameHandler;

/// A named placeholder game for registration tests. No rules behind it.
#[derive(Debug, Clone)]
pub struct StubGame {
    name: String,
    description: String,
}

impl StubGame {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let description = format!("{name} (stub)");
        Self { name, description }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl GameHandler for StubGame {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carries_its_metadata() {
        let game = StubGame::new("chess");
        assert_eq!(game.name(), "chess");
        assert_eq!(game.description(), "chess (stub)");

        let described = StubGame::new("chess").with_description("Classic chess");
        assert_eq!(described.description(), "Classic chess");
    }
}
