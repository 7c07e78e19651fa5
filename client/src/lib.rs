//! # Remote Administration Client
//!
//! Async client for the game server's remote administration HTTP API.
//! Every request is authenticated with a per-request HMAC signature derived
//! from a shared secret key, and every response arrives wrapped in a JSON
//! envelope that carries either an error or a data payload.
//!
//! ## Request Lifecycle
//!
//! 1. A [`RemoteClient`] operation picks a verb and a resource path.
//! 2. The request lock is taken, the nonce is read and incremented, the date
//!    is captured and the request is signed (`request` module).
//! 3. The [`Transport`] sends it and returns the status and full body.
//! 4. The envelope is decoded. An in-band error becomes
//!    [`shared::RemoteError::Api`] whatever the HTTP status was.
//! 5. List payloads have every entity wired back to the client so that
//!    `grid.delete()`, `player.kick()` and friends work directly.
//!
//! ## Module Organization
//!
//! ### Config Module (`config`)
//! Remote address, shared key, resource prefix and transport timeout.
//!
//! ### Request Module (`request`)
//! Resource URL and query encoding, date header formatting and signing.
//!
//! ### Transport Module (`transport`)
//! The [`Transport`] trait and its reqwest implementation.
//!
//! ### Network Module (`network`)
//! [`RemoteClient`] with dispatch and the full resource catalogue.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use vrage_client::{ClientConfig, RemoteClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("http://localhost:8080", "RTOLNUrsQ2ZUW1ZDYqkKwA==");
//!     let client = RemoteClient::new(config)?;
//!
//!     let info = client.server_info().await?;
//!     println!("Server is running version: {}", info.data.version);
//!
//!     for object in client.floating_objects().await?.data.floating_objects {
//!         object.stop().await?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Concurrency
//!
//! A single client may be shared between tasks. Calls are serialized per
//! client for the whole request, so nonces are strictly increasing in the
//! order the server receives them. No retries are made; timeouts come from
//! the transport and surface as [`shared::RemoteError::Transport`].

pub mod config;
pub mod network;
pub mod request;
pub mod transport;

pub use config::ClientConfig;
pub use network::RemoteClient;
pub use request::{Query, SignedRequest};
pub use transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport};
