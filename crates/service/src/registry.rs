//! Concurrent registry of hosted games.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;

use crate::ports::GameHandler;

/// Cheap-to-clone handle over the shared namespace → game map.
///
/// Reads, inserts and removals are safe from any task without external
/// locking. Clones see the same map.
#[derive(Clone, Default)]
pub struct GameRegistry {
    games: Arc<DashMap<String, Arc<dyn GameHandler>>>,
}

impl GameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `game` under `namespace`, returning the handler it displaced.
    pub fn insert(
        &self,
        namespace: impl Into<String>,
        game: Arc<dyn GameHandler>,
    ) -> Option<Arc<dyn GameHandler>> {
        let namespace = namespace.into();
        tracing::debug!(namespace = %namespace, game = %game.name(), "Game registered");
        self.games.insert(namespace, game)
    }

    pub fn remove(&self, namespace: &str) -> Option<Arc<dyn GameHandler>> {
        let removed = self.games.remove(namespace).map(|(_, game)| game);
        if removed.is_some() {
            tracing::debug!(namespace = %namespace, "Game unregistered");
        }
        removed
    }

    pub fn get(&self, namespace: &str) -> Option<Arc<dyn GameHandler>> {
        self.games
            .get(namespace)
            .map(|entry| Arc::clone(entry.value()))
    }

    pub fn contains(&self, namespace: &str) -> bool {
        self.games.contains_key(namespace)
    }

    /// Namespaces currently registered, in no particular order.
    pub fn namespaces(&self) -> Vec<String> {
        self.games.iter().map(|entry| entry.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn clear(&self) {
        self.games.clear();
    }
}

impl fmt::Debug for GameRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameRegistry")
            .field("games", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        name: &'static str,
    }

    impl GameHandler for Fixture {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "fixture game"
        }
    }

    fn game(name: &'static str) -> Arc<dyn GameHandler> {
        Arc::new(Fixture { name })
    }

    #[test]
    fn insert_then_lookup() {
        let registry = GameRegistry::new();
        assert!(!registry.contains("chess"));
        assert!(registry.insert("chess", game("chess")).is_none());
        assert!(registry.contains("chess"));
        let found = registry.get("chess").expect("registered game");
        assert_eq!(found.name(), "chess");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn insert_displaces_previous_handler() {
        let registry = GameRegistry::new();
        registry.insert("chess", game("first"));
        let displaced = registry.insert("chess", game("second"));
        assert_eq!(displaced.expect("previous handler").name(), "first");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn remove_and_clear_empty_the_registry() {
        let registry = GameRegistry::new();
        registry.insert("chess", game("chess"));
        registry.insert("checkers", game("checkers"));
        assert!(registry.remove("chess").is_some());
        assert!(registry.remove("chess").is_none());
        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn clones_share_the_same_map() {
        let registry = GameRegistry::new();
        let clone = registry.clone();
        registry.insert("chess", game("chess"));
        assert!(clone.contains("chess"));
        clone.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn namespaces_lists_registered_games() {
        let registry = GameRegistry::new();
        registry.insert("chess", game("chess"));
        registry.insert("checkers", game("checkers"));
        let mut namespaces = registry.namespaces();
        namespaces.sort();
        assert_eq!(namespaces, ["checkers", "chess"]);
    }
}
