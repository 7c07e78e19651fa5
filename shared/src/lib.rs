//! # Remote Administration Shared Library
//!
//! Wire model and pure protocol logic for the game server's remote
//! administration API. Everything here is free of I/O; the client crate
//! supplies the transport and the request lock.
//!
//! ## Module Organization
//!
//! ### Signature (`signature`)
//! Canonical string construction and HMAC-SHA1 signing of each request.
//!
//! ### Envelope (`envelope`)
//! Decoding of the `{ error, meta, data }` envelope every response is wrapped
//! in. An in-band error always wins over the HTTP status and over `data`.
//!
//! ### Entities (`entity`, `records`)
//! Snapshots of server state. Mutable kinds (grids, characters, players,
//! asteroids, planets, floating objects) carry a back-reference to the
//! client that produced them so follow-up calls can be made directly on the
//! entity.
//!
//! ### Spatial (`spatial`)
//! Euclidean distance and stable nearest-first ordering over anything with a
//! position.
//!
//! ### Ticks (`ticks`)
//! Conversion of chat timestamps, which count 100ns ticks since year one.

pub mod entity;
pub mod envelope;
pub mod error;
pub mod mutator;
pub mod records;
pub mod signature;
pub mod spatial;
pub mod ticks;

pub use entity::{
    Asteroid, AsteroidList, Character, CharacterList, FloatingObject, FloatingObjectList, Grid,
    GridList, Planet, PlanetList, Player, PlayerList,
};
pub use envelope::{decode_envelope, ApiErrorBody, Envelope, Meta, Response};
pub use error::{RemoteError, Result};
pub use mutator::{Attach, ClientHandle, ResourceMutator};
pub use records::{
    BannedPlayer, BannedPlayerList, ChatMessage, ChatMessageList, KickedPlayer, KickedPlayerList,
    ServerInfo,
};
pub use spatial::{distance, nearest_matching, Position, Positionable};

/// Fixed prefix under which every resource lives.
pub const BASE_RESOURCE_PATH: &str = "/vrageremote/v1";
