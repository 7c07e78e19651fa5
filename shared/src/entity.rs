//! Mutable session entities and the list payloads that carry them
//!
//! Each entity is a snapshot of server-reported fields. Mutation methods
//! delegate to the originating client using the entity's own identity and
//! never touch the snapshot; re-fetch to observe the new server state.

use crate::error::Result;
use crate::mutator::{Attach, ClientHandle, ResourceMutator};
use crate::spatial::{distance, nearest_matching, Position, Positionable};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// `Positionable` plus an inherent `distance_to` for entities with a `position` field.
macro_rules! positioned_entity {
    ($ty:ty) => {
        impl Positionable for $ty {
            fn position(&self) -> Position {
                self.position
            }
        }

        impl $ty {
            pub fn distance_to<P: Positionable + ?Sized>(&self, other: &P) -> f64 {
                distance(self, other)
            }
        }
    };
}

macro_rules! attachable {
    ($ty:ty) => {
        impl Attach for $ty {
            fn attach(&mut self, mutator: &Arc<dyn ResourceMutator>) {
                self.client = ClientHandle::new(Arc::clone(mutator));
            }
        }

        impl $ty {
            /// Whether this entity was produced by a client and can issue calls.
            pub fn is_attached(&self) -> bool {
                self.client.is_attached()
            }
        }
    };
}

// ── Grids ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Grid {
    pub display_name: String,
    #[serde(alias = "EntityID")]
    pub entity_id: i64,
    pub grid_size: String,
    pub blocks_count: i64,
    pub mass: f64,
    pub position: Position,
    pub linear_speed: f64,
    pub distance_to_player: f64,
    #[serde(alias = "OwnerSteamID")]
    pub owner_steam_id: i64,
    pub owner_display_name: String,
    pub is_powered: bool,
    #[serde(rename = "PCU", alias = "Pcu")]
    pub pcu: i64,
    #[serde(skip)]
    client: ClientHandle,
}

impl Grid {
    pub async fn delete(&self) -> Result<()> {
        self.client.get()?.delete_grid(self.entity_id).await
    }

    pub async fn stop(&self) -> Result<()> {
        self.client.get()?.stop_grid(self.entity_id).await
    }

    pub async fn power_up(&self) -> Result<()> {
        self.client.get()?.power_up_grid(self.entity_id).await
    }

    pub async fn power_down(&self) -> Result<()> {
        self.client.get()?.power_down_grid(self.entity_id).await
    }
}

positioned_entity!(Grid);
attachable!(Grid);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GridList {
    pub grids: Vec<Grid>,
}

impl Attach for GridList {
    fn attach(&mut self, mutator: &Arc<dyn ResourceMutator>) {
        self.grids.attach(mutator);
    }
}

// ── Characters ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Character {
    pub display_name: String,
    #[serde(alias = "EntityID")]
    pub entity_id: i64,
    pub mass: f64,
    pub position: Position,
    pub linear_speed: f64,
    #[serde(skip)]
    client: ClientHandle,
}

impl Character {
    pub async fn stop(&self) -> Result<()> {
        self.client.get()?.stop_character(self.entity_id).await
    }
}

positioned_entity!(Character);
attachable!(Character);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CharacterList {
    pub characters: Vec<Character>,
}

impl Attach for CharacterList {
    fn attach(&mut self, mutator: &Arc<dyn ResourceMutator>) {
        self.characters.attach(mutator);
    }
}

// ── Players ─────────────────────────────────────────────────────────

/// An online player. Players have no position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Player {
    #[serde(rename = "SteamID", alias = "SteamId")]
    pub steam_id: i64,
    pub display_name: String,
    pub faction_name: String,
    pub faction_tag: String,
    pub promote_level: i32,
    pub ping: f64,
    #[serde(skip)]
    client: ClientHandle,
}

impl Player {
    pub async fn kick(&self) -> Result<()> {
        self.client.get()?.kick_player(self.steam_id).await
    }

    pub async fn ban(&self) -> Result<()> {
        self.client.get()?.ban_player(self.steam_id).await
    }

    pub async fn promote(&self) -> Result<()> {
        self.client.get()?.promote_player(self.steam_id).await
    }

    pub async fn demote(&self) -> Result<()> {
        self.client.get()?.demote_player(self.steam_id).await
    }
}

attachable!(Player);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PlayerList {
    pub players: Vec<Player>,
}

impl Attach for PlayerList {
    fn attach(&mut self, mutator: &Arc<dyn ResourceMutator>) {
        self.players.attach(mutator);
    }
}

// ── Asteroids ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Asteroid {
    pub display_name: String,
    #[serde(alias = "EntityID")]
    pub entity_id: i64,
    pub position: Position,
    #[serde(skip)]
    client: ClientHandle,
}

impl Asteroid {
    pub async fn delete(&self) -> Result<()> {
        self.client.get()?.delete_asteroid(self.entity_id).await
    }
}

positioned_entity!(Asteroid);
attachable!(Asteroid);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AsteroidList {
    pub asteroids: Vec<Asteroid>,
}

impl Attach for AsteroidList {
    fn attach(&mut self, mutator: &Arc<dyn ResourceMutator>) {
        self.asteroids.attach(mutator);
    }
}

// ── Planets ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Planet {
    pub display_name: String,
    #[serde(alias = "EntityID")]
    pub entity_id: i64,
    pub position: Position,
    #[serde(skip)]
    client: ClientHandle,
}

impl Planet {
    pub async fn delete(&self) -> Result<()> {
        self.client.get()?.delete_planet(self.entity_id).await
    }
}

positioned_entity!(Planet);
attachable!(Planet);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PlanetList {
    pub planets: Vec<Planet>,
}

impl Attach for PlanetList {
    fn attach(&mut self, mutator: &Arc<dyn ResourceMutator>) {
        self.planets.attach(mutator);
    }
}

// ── Floating objects ────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FloatingObject {
    pub display_name: String,
    #[serde(alias = "EntityID")]
    pub entity_id: i64,
    pub kind: String,
    pub mass: f64,
    pub position: Position,
    pub linear_speed: f64,
    pub distance_to_player: f64,
    #[serde(skip)]
    client: ClientHandle,
}

impl FloatingObject {
    pub async fn stop(&self) -> Result<()> {
        self.client.get()?.stop_floating_object(self.entity_id).await
    }

    pub async fn delete(&self) -> Result<()> {
        self.client.get()?.delete_floating_object(self.entity_id).await
    }

    /// Every grid in the session, nearest first.
    pub async fn nearest_grids(&self) -> Result<Vec<Grid>> {
        self.nearest_grids_matching(|_| true).await
    }

    /// Grids accepted by `predicate`, nearest first. Equal distances keep server order.
    pub async fn nearest_grids_matching<F>(&self, predicate: F) -> Result<Vec<Grid>>
    where
        F: FnMut(&Grid) -> bool + Send,
    {
        let grids = self.client.get()?.fetch_grids().await?;
        Ok(nearest_matching(self, grids, predicate))
    }
}

positioned_entity!(FloatingObject);
attachable!(FloatingObject);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FloatingObjectList {
    pub floating_objects: Vec<FloatingObject>,
}

impl Attach for FloatingObjectList {
    fn attach(&mut self, mutator: &Arc<dyn ResourceMutator>) {
        self.floating_objects.attach(mutator);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RemoteError;
    use assert_approx_eq::assert_approx_eq;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every call it receives and serves a fixed grid list.
    #[derive(Default)]
    struct RecordingMutator {
        calls: Mutex<Vec<String>>,
        grids: Vec<Grid>,
    }

    impl RecordingMutator {
        fn record(&self, call: String) -> Result<()> {
            self.calls.lock().unwrap().push(call);
            Ok(())
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ResourceMutator for RecordingMutator {
        async fn fetch_grids(&self) -> Result<Vec<Grid>> {
            self.record("fetch_grids".to_string())?;
            Ok(self.grids.clone())
        }
        async fn delete_grid(&self, id: i64) -> Result<()> {
            self.record(format!("delete_grid {}", id))
        }
        async fn stop_grid(&self, id: i64) -> Result<()> {
            self.record(format!("stop_grid {}", id))
        }
        async fn power_up_grid(&self, id: i64) -> Result<()> {
            self.record(format!("power_up_grid {}", id))
        }
        async fn power_down_grid(&self, id: i64) -> Result<()> {
            self.record(format!("power_down_grid {}", id))
        }
        async fn stop_character(&self, id: i64) -> Result<()> {
            self.record(format!("stop_character {}", id))
        }
        async fn delete_asteroid(&self, id: i64) -> Result<()> {
            self.record(format!("delete_asteroid {}", id))
        }
        async fn delete_planet(&self, id: i64) -> Result<()> {
            self.record(format!("delete_planet {}", id))
        }
        async fn stop_floating_object(&self, id: i64) -> Result<()> {
            self.record(format!("stop_floating_object {}", id))
        }
        async fn delete_floating_object(&self, id: i64) -> Result<()> {
            self.record(format!("delete_floating_object {}", id))
        }
        async fn kick_player(&self, id: i64) -> Result<()> {
            self.record(format!("kick_player {}", id))
        }
        async fn ban_player(&self, id: i64) -> Result<()> {
            self.record(format!("ban_player {}", id))
        }
        async fn promote_player(&self, id: i64) -> Result<()> {
            self.record(format!("promote_player {}", id))
        }
        async fn demote_player(&self, id: i64) -> Result<()> {
            self.record(format!("demote_player {}", id))
        }
    }

    fn grid_at(entity_id: i64, x: f64) -> Grid {
        Grid {
            display_name: format!("Grid {}", entity_id),
            entity_id,
            position: Position::new(x, 0.0, 0.0),
            ..Grid::default()
        }
    }

    fn attached<T: Attach>(mut value: T, mutator: &Arc<RecordingMutator>) -> T {
        let handle: Arc<dyn ResourceMutator> = mutator.clone();
        value.attach(&handle);
        value
    }

    #[test]
    fn test_grid_list_decodes_server_fields() {
        let json = r#"{
            "Grids": [{
                "DisplayName": "Large Grid 4411",
                "EntityId": 117964396475468520,
                "GridSize": "Large",
                "BlocksCount": 412,
                "Mass": 1250000.5,
                "Position": {"X": 1.0, "Y": -2.0, "Z": 3.5},
                "LinearSpeed": 0.0,
                "DistanceToPlayer": 15.2,
                "OwnerSteamId": 76561198000000001,
                "OwnerDisplayName": "Builder",
                "IsPowered": true,
                "PCU": 9001
            }]
        }"#;

        let list: GridList = serde_json::from_str(json).unwrap();
        let grid = &list.grids[0];
        assert_eq!(grid.display_name, "Large Grid 4411");
        assert_eq!(grid.entity_id, 117964396475468520);
        assert_eq!(grid.grid_size, "Large");
        assert_eq!(grid.blocks_count, 412);
        assert_eq!(grid.owner_steam_id, 76561198000000001);
        assert!(grid.is_powered);
        assert_eq!(grid.pcu, 9001);
        assert_eq!(grid.position, Position::new(1.0, -2.0, 3.5));
        assert!(!grid.is_attached());
    }

    #[test]
    fn test_missing_fields_default() {
        let player: Player = serde_json::from_str(r#"{"SteamId": 42}"#).unwrap();
        assert_eq!(player.steam_id, 42);
        assert!(player.display_name.is_empty());
        assert_eq!(player.promote_level, 0);
    }

    #[tokio::test]
    async fn test_detached_entity_reports_detached() {
        let grid = grid_at(1, 0.0);
        assert!(matches!(grid.delete().await, Err(RemoteError::Detached)));
    }

    #[tokio::test]
    async fn test_grid_mutations_use_own_id() {
        let mutator = Arc::new(RecordingMutator::default());
        let grid = attached(grid_at(77, 0.0), &mutator);

        grid.delete().await.unwrap();
        grid.stop().await.unwrap();
        grid.power_up().await.unwrap();
        grid.power_down().await.unwrap();

        assert_eq!(
            mutator.calls(),
            vec![
                "delete_grid 77",
                "stop_grid 77",
                "power_up_grid 77",
                "power_down_grid 77"
            ]
        );
    }

    #[tokio::test]
    async fn test_player_mutations_use_steam_id() {
        let mutator = Arc::new(RecordingMutator::default());
        let player: Player = serde_json::from_str(r#"{"SteamID": 765, "DisplayName": "x"}"#).unwrap();
        let player = attached(player, &mutator);

        player.kick().await.unwrap();
        player.ban().await.unwrap();
        player.promote().await.unwrap();
        player.demote().await.unwrap();

        assert_eq!(
            mutator.calls(),
            vec!["kick_player 765", "ban_player 765", "promote_player 765", "demote_player 765"]
        );
    }

    #[tokio::test]
    async fn test_list_attach_reaches_every_entity() {
        let mutator = Arc::new(RecordingMutator::default());
        let list = attached(
            AsteroidList {
                asteroids: vec![
                    Asteroid {
                        entity_id: 3,
                        ..Asteroid::default()
                    },
                    Asteroid {
                        entity_id: 4,
                        ..Asteroid::default()
                    },
                ],
            },
            &mutator,
        );

        for asteroid in &list.asteroids {
            assert!(asteroid.is_attached());
            asteroid.delete().await.unwrap();
        }
        assert_eq!(mutator.calls(), vec!["delete_asteroid 3", "delete_asteroid 4"]);
    }

    #[tokio::test]
    async fn test_nearest_grids_orders_by_distance() {
        let mutator = Arc::new(RecordingMutator {
            grids: vec![grid_at(1, 50.0), grid_at(2, 10.0), grid_at(3, 30.0), grid_at(4, -10.0)],
            ..RecordingMutator::default()
        });
        let object = attached(
            FloatingObject {
                entity_id: 900,
                position: Position::default(),
                ..FloatingObject::default()
            },
            &mutator,
        );

        let ids: Vec<i64> = object
            .nearest_grids()
            .await
            .unwrap()
            .iter()
            .map(|g| g.entity_id)
            .collect();
        assert_eq!(ids, vec![2, 4, 3, 1]);

        let far: Vec<i64> = object
            .nearest_grids_matching(|g| g.position.x > 20.0)
            .await
            .unwrap()
            .iter()
            .map(|g| g.entity_id)
            .collect();
        assert_eq!(far, vec![3, 1]);
    }

    #[test]
    fn test_entity_distance_to() {
        let planet = Planet {
            position: Position::new(0.0, 3.0, 4.0),
            ..Planet::default()
        };
        let character = Character {
            position: Position::default(),
            ..Character::default()
        };
        assert_approx_eq!(planet.distance_to(&character), 5.0, 1e-12);
        assert_approx_eq!(character.distance_to(&Position::new(1.0, 0.0, 0.0)), 1.0, 1e-12);
    }
}
