//! Remote client: request dispatch and the resource catalogue
//!
//! Every call goes through [`RemoteClient::dispatch`], which holds the
//! client's request lock for the whole exchange: nonce read-and-increment,
//! date capture, signing, sending and reading the body. Two calls on the
//! same client therefore never sign with the same nonce and reach the server
//! in nonce order. Independently configured clients do not share the lock.

use crate::config::ClientConfig;
use crate::request::{encode_body, format_date, resource_url, Query, SignedRequest};
use crate::transport::{Method, ReqwestTransport, Transport};
use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};
use serde::de::{DeserializeOwned, IgnoredAny};
use shared::{
    decode_envelope, AsteroidList, Attach, BannedPlayerList, CharacterList, ChatMessageList,
    Envelope, FloatingObjectList, Grid, GridList, KickedPlayerList, Meta, PlanetList, PlayerList,
    ResourceMutator, Response, Result, ServerInfo,
};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;

struct Inner {
    config: ClientConfig,
    transport: Box<dyn Transport>,
    /// Next nonce to sign with. The mutex doubles as the request lock.
    nonce: Mutex<u64>,
}

/// Handle to one credentialed server. Cloning shares the nonce and lock.
#[derive(Clone)]
pub struct RemoteClient {
    inner: Arc<Inner>,
}

impl fmt::Debug for RemoteClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

/// Nonces start at the wall clock in nanoseconds so restarts with the same key
/// keep moving forward.
fn initial_nonce() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::from_secs(0))
        .as_nanos() as u64
}

impl RemoteClient {
    /// Creates a client using the default reqwest transport.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Ok(Self::with_transport(config, transport))
    }

    pub fn with_transport<T: Transport + 'static>(config: ClientConfig, transport: T) -> Self {
        Self::with_transport_and_nonce(config, transport, initial_nonce())
    }

    /// Like [`RemoteClient::with_transport`] but with an explicit starting nonce.
    pub fn with_transport_and_nonce<T: Transport + 'static>(
        config: ClientConfig,
        transport: T,
        nonce: u64,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                transport: Box::new(transport),
                nonce: Mutex::new(nonce),
            }),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Signs, sends and decodes one request.
    ///
    /// Only transport and decoding failures are returned as errors here; an
    /// in-band API error comes back inside the envelope for the caller to check.
    pub async fn dispatch<T: DeserializeOwned>(
        &self,
        method: Method,
        resource: &str,
        query: Option<&Query>,
        body: Option<Vec<u8>>,
    ) -> Result<Envelope<T>> {
        let config = &self.inner.config;
        let url = resource_url(&config.base_resource_path, resource, query);

        let response = {
            let mut nonce = self.inner.nonce.lock().await;
            let date = format_date(Utc::now());
            let signed = SignedRequest::sign(method, url, *nonce, date, &config.key, body)?;
            *nonce += 1;

            debug!("{} {} (nonce {})", method, signed.resource_url, signed.nonce);
            let request = signed.into_http(&config.remote_address);
            self.inner.transport.execute(request).await?
        };

        debug!("{} {} -> HTTP {}", method, resource, response.status);
        decode_envelope(&response.body)
    }

    async fn checked<T: DeserializeOwned>(
        &self,
        method: Method,
        resource: &str,
        query: Option<&Query>,
        body: Option<Vec<u8>>,
    ) -> Result<Envelope<T>> {
        let envelope = self.dispatch(method, resource, query, body).await?;
        if let Some(error) = &envelope.error {
            warn!("{} {} rejected: {}", method, resource, error.message);
        }
        envelope.check()
    }

    /// A call whose only useful outcome is success or failure.
    async fn command(&self, method: Method, resource: &str) -> Result<Option<Meta>> {
        let envelope: Envelope<IgnoredAny> = self.checked(method, resource, None, None).await?;
        Ok(envelope.meta)
    }

    async fn fetch<T: DeserializeOwned>(&self, resource: &str) -> Result<Response<T>> {
        self.checked(Method::Get, resource, None, None)
            .await?
            .into_response()
    }

    /// Fetches a list and wires every entity back to this client before returning it.
    async fn fetch_attached<T: DeserializeOwned + Attach>(
        &self,
        resource: &str,
    ) -> Result<Response<T>> {
        let mut response = self.fetch::<T>(resource).await?;
        response.data.attach(&self.mutator());
        Ok(response)
    }

    fn mutator(&self) -> Arc<dyn ResourceMutator> {
        Arc::new(self.clone())
    }

    // ── Server ──────────────────────────────────────────────────────

    pub async fn server_info(&self) -> Result<Response<ServerInfo>> {
        self.fetch("server").await
    }

    /// Round-trip wall time of a signed ping.
    pub async fn ping(&self) -> Result<Duration> {
        let start = Instant::now();
        self.command(Method::Get, "server/ping").await?;
        Ok(start.elapsed())
    }

    pub async fn stop_server(&self) -> Result<()> {
        self.command(Method::Delete, "server").await.map(|_| ())
    }

    // ── Session ─────────────────────────────────────────────────────

    pub async fn save(&self) -> Result<()> {
        self.command(Method::Patch, "session").await.map(|_| ())
    }

    pub async fn save_as(&self, name: &str) -> Result<()> {
        let mut query = Query::new();
        query.insert("savename".to_string(), name.to_string());
        self.checked::<IgnoredAny>(Method::Patch, "session", Some(&query), None)
            .await
            .map(|_| ())
    }

    pub async fn characters(&self) -> Result<Response<CharacterList>> {
        self.fetch_attached("session/characters").await
    }

    pub async fn stop_character(&self, entity_id: i64) -> Result<()> {
        let resource = format!("session/characters/{}", entity_id);
        self.command(Method::Patch, &resource).await.map(|_| ())
    }

    pub async fn players(&self) -> Result<Response<PlayerList>> {
        self.fetch_attached("session/players").await
    }

    pub async fn asteroids(&self) -> Result<Response<AsteroidList>> {
        self.fetch_attached("session/asteroids").await
    }

    pub async fn delete_asteroid(&self, entity_id: i64) -> Result<()> {
        let resource = format!("session/asteroids/{}", entity_id);
        self.command(Method::Delete, &resource).await.map(|_| ())
    }

    pub async fn floating_objects(&self) -> Result<Response<FloatingObjectList>> {
        self.fetch_attached("session/floatingObjects").await
    }

    pub async fn delete_floating_object(&self, entity_id: i64) -> Result<()> {
        let resource = format!("session/floatingObjects/{}", entity_id);
        self.command(Method::Delete, &resource).await.map(|_| ())
    }

    pub async fn stop_floating_object(&self, entity_id: i64) -> Result<()> {
        let resource = format!("session/floatingObjects/{}", entity_id);
        self.command(Method::Patch, &resource).await.map(|_| ())
    }

    pub async fn grids(&self) -> Result<Response<GridList>> {
        self.fetch_attached("session/grids").await
    }

    pub async fn delete_grid(&self, entity_id: i64) -> Result<()> {
        let resource = format!("session/grids/{}", entity_id);
        self.command(Method::Delete, &resource).await.map(|_| ())
    }

    pub async fn stop_grid(&self, entity_id: i64) -> Result<()> {
        let resource = format!("session/grids/{}", entity_id);
        self.command(Method::Patch, &resource).await.map(|_| ())
    }

    pub async fn power_up_grid(&self, entity_id: i64) -> Result<()> {
        let resource = format!("session/poweredGrids/{}", entity_id);
        self.command(Method::Post, &resource).await.map(|_| ())
    }

    pub async fn power_down_grid(&self, entity_id: i64) -> Result<()> {
        let resource = format!("session/poweredGrids/{}", entity_id);
        self.command(Method::Delete, &resource).await.map(|_| ())
    }

    pub async fn planets(&self) -> Result<Response<PlanetList>> {
        self.fetch_attached("session/planets").await
    }

    pub async fn delete_planet(&self, entity_id: i64) -> Result<()> {
        let resource = format!("session/planets/{}", entity_id);
        self.command(Method::Delete, &resource).await.map(|_| ())
    }

    pub async fn chat(&self) -> Result<Response<ChatMessageList>> {
        self.fetch("session/chat").await
    }

    /// Posts `content` as a raw JSON string body.
    pub async fn send_chat(&self, content: &str) -> Result<()> {
        let body = encode_body(content)?;
        self.checked::<IgnoredAny>(Method::Post, "session/chat", None, Some(body))
            .await
            .map(|_| ())
    }

    // ── Admin ───────────────────────────────────────────────────────

    pub async fn promote_player(&self, steam_id: i64) -> Result<()> {
        let resource = format!("admin/promotedPlayers/{}", steam_id);
        self.command(Method::Post, &resource).await.map(|_| ())
    }

    pub async fn demote_player(&self, steam_id: i64) -> Result<()> {
        let resource = format!("admin/promotedPlayers/{}", steam_id);
        self.command(Method::Delete, &resource).await.map(|_| ())
    }

    pub async fn banned_players(&self) -> Result<Response<BannedPlayerList>> {
        self.fetch("admin/bannedPlayers").await
    }

    pub async fn ban_player(&self, steam_id: i64) -> Result<()> {
        let resource = format!("admin/bannedPlayers/{}", steam_id);
        self.command(Method::Post, &resource).await.map(|_| ())
    }

    pub async fn unban_player(&self, steam_id: i64) -> Result<()> {
        let resource = format!("admin/bannedPlayers/{}", steam_id);
        self.command(Method::Delete, &resource).await.map(|_| ())
    }

    pub async fn kicked_players(&self) -> Result<Response<KickedPlayerList>> {
        self.fetch("admin/kickedPlayers").await
    }

    pub async fn kick_player(&self, steam_id: i64) -> Result<()> {
        let resource = format!("admin/kickedPlayers/{}", steam_id);
        self.command(Method::Post, &resource).await.map(|_| ())
    }

    pub async fn unkick_player(&self, steam_id: i64) -> Result<()> {
        let resource = format!("admin/kickedPlayers/{}", steam_id);
        self.command(Method::Delete, &resource).await.map(|_| ())
    }
}

#[async_trait]
impl ResourceMutator for RemoteClient {
    async fn fetch_grids(&self) -> Result<Vec<Grid>> {
        Ok(self.grids().await?.data.grids)
    }

    async fn delete_grid(&self, entity_id: i64) -> Result<()> {
        RemoteClient::delete_grid(self, entity_id).await
    }

    async fn stop_grid(&self, entity_id: i64) -> Result<()> {
        RemoteClient::stop_grid(self, entity_id).await
    }

    async fn power_up_grid(&self, entity_id: i64) -> Result<()> {
        RemoteClient::power_up_grid(self, entity_id).await
    }

    async fn power_down_grid(&self, entity_id: i64) -> Result<()> {
        RemoteClient::power_down_grid(self, entity_id).await
    }

    async fn stop_character(&self, entity_id: i64) -> Result<()> {
        RemoteClient::stop_character(self, entity_id).await
    }

    async fn delete_asteroid(&self, entity_id: i64) -> Result<()> {
        RemoteClient::delete_asteroid(self, entity_id).await
    }

    async fn delete_planet(&self, entity_id: i64) -> Result<()> {
        RemoteClient::delete_planet(self, entity_id).await
    }

    async fn stop_floating_object(&self, entity_id: i64) -> Result<()> {
        RemoteClient::stop_floating_object(self, entity_id).await
    }

    async fn delete_floating_object(&self, entity_id: i64) -> Result<()> {
        RemoteClient::delete_floating_object(self, entity_id).await
    }

    async fn kick_player(&self, steam_id: i64) -> Result<()> {
        RemoteClient::kick_player(self, steam_id).await
    }

    async fn ban_player(&self, steam_id: i64) -> Result<()> {
        RemoteClient::ban_player(self, steam_id).await
    }

    async fn promote_player(&self, steam_id: i64) -> Result<()> {
        RemoteClient::promote_player(self, steam_id).await
    }

    async fn demote_player(&self, steam_id: i64) -> Result<()> {
        RemoteClient::demote_player(self, steam_id).await
    }
}
