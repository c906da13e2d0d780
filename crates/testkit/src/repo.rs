//! In-memory room persistence.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use parlor_service::{GameRepo, RepoError, RoomRecord};

/// [`GameRepo`] backed by a process-local map; the default persistence
/// stand-in. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryGameRepo {
    rooms: DashMap<(String, String), RoomRecord>,
}

impl MemoryGameRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rooms currently stored, across all namespaces.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

#[async_trait]
impl GameRepo for MemoryGameRepo {
    async fn load_rooms(&self, namespace: &str) -> Result<Vec<RoomRecord>, RepoError> {
        Ok(self
            .rooms
            .iter()
            .filter(|entry| entry.key().0 == namespace)
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn save_room(&self, room: &RoomRecord) -> Result<(), RepoError> {
        let mut record = room.clone();
        record.updated_at = Utc::now();
        self.rooms
            .insert((record.namespace.clone(), record.room.clone()), record);
        Ok(())
    }

    async fn delete_room(&self, namespace: &str, room: &str) -> Result<(), RepoError> {
        self.rooms
            .remove(&(namespace.to_string(), room.to_string()))
            .map(|_| ())
            .ok_or_else(|| RepoError::NotFound {
                namespace: namespace.to_string(),
                room: room.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn saves_and_loads_per_namespace() {
        let repo = MemoryGameRepo::new();
        repo.save_room(&RoomRecord::new("chess", "lobby", json!({"moves": []})))
            .await
            .expect("saves");
        repo.save_room(&RoomRecord::new("chess", "blitz", json!({"moves": ["e4"]})))
            .await
            .expect("saves");
        repo.save_room(&RoomRecord::new("checkers", "lobby", json!({})))
            .await
            .expect("saves");

        let mut rooms = repo.load_rooms("chess").await.expect("loads");
        rooms.sort_by(|a, b| a.room.cmp(&b.room));
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].room, "blitz");
        assert_eq!(rooms[1].room, "lobby");
        assert_eq!(repo.len(), 3);
    }

    #[tokio::test]
    async fn save_refreshes_the_timestamp() {
        let repo = MemoryGameRepo::new();
        let mut record = RoomRecord::new("chess", "lobby", json!({}));
        record.updated_at = Utc::now() - chrono::Duration::hours(1);
        repo.save_room(&record).await.expect("saves");

        let rooms = repo.load_rooms("chess").await.expect("loads");
        assert!(rooms[0].updated_at > record.updated_at);
    }

    #[tokio::test]
    async fn deleting_an_absent_room_is_not_found() {
        let repo = MemoryGameRepo::new();
        repo.save_room(&RoomRecord::new("chess", "lobby", json!({})))
            .await
            .expect("saves");
        repo.delete_room("chess", "lobby").await.expect("deletes");
        let err = repo
            .delete_room("chess", "lobby")
            .await
            .expect_err("already gone");
        assert!(matches!(err, RepoError::NotFound { .. }));
        assert!(repo.is_empty());
    }
}
