//! Outbound request construction
//!
//! Turns a logical call (verb, resource path, query, body) into a signed
//! [`HttpRequest`]. The resource URL that gets signed is the path plus
//! query only; the remote address is prepended afterwards.

use crate::transport::{HttpRequest, Method};
use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::{signature, RemoteError, Result};
use std::collections::BTreeMap;

/// Query parameters, encoded in key order.
pub type Query = BTreeMap<String, String>;

/// Format of the `Date` header: RFC 1123 with a numeric UTC offset.
pub const DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S +0000";

/// `base/resource`, plus `?query` only when there is at least one parameter.
pub fn resource_url(base_resource_path: &str, resource: &str, query: Option<&Query>) -> String {
    let mut url = format!("{}/{}", base_resource_path, resource);
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(query.iter())
            .finish();
        url.push('?');
        url.push_str(&encoded);
    }
    url
}

pub fn format_date(now: DateTime<Utc>) -> String {
    now.format(DATE_FORMAT).to_string()
}

/// Serializes a request body as UTF-8 JSON.
pub fn encode_body<B: Serialize + ?Sized>(body: &B) -> Result<Vec<u8>> {
    serde_json::to_vec(body).map_err(RemoteError::Encode)
}

/// Everything that went into one signature. Lives only for one dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedRequest {
    pub method: Method,
    pub resource_url: String,
    pub nonce: String,
    pub date: String,
    pub digest: String,
    pub body: Option<Vec<u8>>,
}

impl SignedRequest {
    /// Decodes `key` and signs. A malformed key fails here, before anything is sent.
    pub fn sign(
        method: Method,
        resource_url: String,
        nonce: u64,
        date: String,
        key: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Self> {
        let nonce = nonce.to_string();
        let digest = signature::sign_with_key(&resource_url, &nonce, &date, key)?;
        Ok(Self {
            method,
            resource_url,
            nonce,
            date,
            digest,
            body,
        })
    }

    pub fn authorization(&self) -> String {
        signature::authorization_header(&self.nonce, &self.digest)
    }

    /// Attaches the remote address and headers.
    pub fn into_http(self, remote_address: &str) -> HttpRequest {
        let mut headers = Vec::with_capacity(3);
        if self.body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        headers.push(("Authorization".to_string(), self.authorization()));
        headers.push(("Date".to_string(), self.date));

        HttpRequest {
            method: self.method,
            url: format!("{}{}", remote_address, self.resource_url),
            headers,
            body: self.body,
        }
    }
}
