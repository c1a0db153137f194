//! Deluge web JSON-RPC adapter.
//!
//! Drives the daemon through the web interface's `/json` endpoint:
//! `auth.login` establishes a cookie session, `web.connected` confirms
//! a daemon is attached, and `core.*` methods are proxied through.
//! Every request carries a bounded timeout so an unresponsive daemon
//! cannot stall a run indefinitely.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::debug;
use url::Url;

use crate::error::{SourceError, SourceResult};
use crate::model::{TorrentId, TorrentSummary};
use crate::service::SourceClient;
use async_trait::async_trait;

const METHOD_LOGIN: &str = "auth.login";
const METHOD_CONNECTED: &str = "web.connected";
const METHOD_STATUS: &str = "core.get_torrents_status";
const METHOD_REMOVE: &str = "core.remove_torrent";

/// Status fields requested for every seeding torrent.
const STATUS_FIELDS: [&str; 5] = ["ratio", "seeding_time", "save_path", "label", "name"];

/// Connection settings for the Deluge web interface.
#[derive(Debug, Clone)]
pub struct DelugeClientConfig {
    /// Base URL of the web interface; the RPC endpoint is resolved
    /// relative to it.
    pub base_url: Url,
    /// Web interface password.
    pub password: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// Source client backed by Deluge's web JSON-RPC endpoint.
pub struct DelugeClient {
    http: reqwest::Client,
    endpoint: Url,
    password: String,
    next_request_id: AtomicI64,
}

impl DelugeClient {
    /// Build a client for the given endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint URL cannot be resolved or the
    /// HTTP client cannot be constructed.
    pub fn new(config: DelugeClientConfig) -> SourceResult<Self> {
        let endpoint = config
            .base_url
            .join("json")
            .map_err(|source| SourceError::Endpoint {
                value: config.base_url.to_string(),
                source,
            })?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .cookie_store(true)
            .build()
            .map_err(|source| SourceError::Client {
                operation: "client.build",
                source,
            })?;

        Ok(Self {
            http,
            endpoint,
            password: config.password,
            next_request_id: AtomicI64::new(0),
        })
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &'static str,
        params: Value,
    ) -> SourceResult<T> {
        let request_id = self.next_request_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({ "method": method, "params": params, "id": request_id });
        debug!(method, request_id, "issuing source rpc");

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(|source| SourceError::Transport {
                operation: method,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                operation: method,
                status: status.as_u16(),
            });
        }

        let envelope: RpcEnvelope<T> =
            response
                .json()
                .await
                .map_err(|source| SourceError::Transport {
                    operation: method,
                    source,
                })?;

        if let Some(error) = envelope.error {
            return Err(SourceError::Remote {
                operation: method,
                code: error.code,
                message: error.message,
            });
        }

        envelope.result.ok_or(SourceError::Decode {
            operation: method,
            reason: "response carried no result",
        })
    }
}

#[async_trait]
impl SourceClient for DelugeClient {
    async fn connect(&self) -> SourceResult<()> {
        let authenticated: bool = self
            .call(METHOD_LOGIN, json!([self.password.as_str()]))
            .await?;
        if !authenticated {
            return Err(SourceError::AuthRejected);
        }

        let connected: bool = self.call(METHOD_CONNECTED, json!([])).await?;
        if !connected {
            return Err(SourceError::Disconnected);
        }

        debug!("source client session established");
        Ok(())
    }

    async fn seeding_torrents(&self) -> SourceResult<Vec<TorrentSummary>> {
        let filter = json!({ "is_seed": [true] });
        let rows: HashMap<String, StatusRow> = self
            .call(METHOD_STATUS, json!([filter, STATUS_FIELDS]))
            .await?;

        Ok(rows
            .into_iter()
            .map(|(id, row)| TorrentSummary {
                id: TorrentId::new(id),
                name: row.name,
                ratio: row.ratio,
                seeding_secs: row.seeding_time,
                save_path: PathBuf::from(row.save_path),
                label: row.label,
            })
            .collect())
    }

    async fn remove_torrent(&self, id: &TorrentId, delete_data: bool) -> SourceResult<()> {
        let removed: bool = self
            .call(METHOD_REMOVE, json!([id.as_str(), delete_data]))
            .await?;
        if !removed {
            return Err(SourceError::Remote {
                operation: METHOD_REMOVE,
                code: 0,
                message: "daemon declined the removal".to_string(),
            });
        }

        debug!(torrent_id = %id, "removed torrent from source client");
        Ok(())
    }
}

/// Wire envelope wrapping every web JSON-RPC response.
#[derive(Debug, Deserialize)]
struct RpcEnvelope<T> {
    result: Option<T>,
    error: Option<RpcError>,
}

/// Remote error payload attached to a failed RPC call.
#[derive(Debug, Deserialize)]
struct RpcError {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

/// Per-torrent field set returned by the status query.
#[derive(Debug, Deserialize)]
struct StatusRow {
    #[serde(default)]
    name: String,
    #[serde(default)]
    ratio: f64,
    #[serde(default)]
    seeding_time: u64,
    #[serde(default)]
    save_path: String,
    #[serde(default)]
    label: String,
}
