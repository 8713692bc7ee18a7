//! SurrealDB-backed store
//!
//! Supports runtime protocol selection via URL scheme:
//! - `ws://` / `wss://` - WebSocket connections
//! - `http://` / `https://` - HTTP connections
//! - `mem://` - In-memory database (for testing)

use std::marker::PhantomData;
use std::time::Duration;

use uuid::Uuid;

use crate::config::SurrealDbConfig;
use crate::domain::Document;
use crate::error::{Error, Result};

use super::{EntityStore, PageRequest, StoreError, StoreOperation, StoreResult};

/// SurrealDB client type alias using the `Any` engine for runtime protocol selection
pub type SurrealClient = surrealdb::Surreal<surrealdb::engine::any::Any>;

/// Connect to SurrealDB with retry and exponential backoff
pub async fn connect(config: &SurrealDbConfig) -> Result<SurrealClient> {
    let mut attempt = 0;
    let base_delay = Duration::from_secs(config.retry_delay_secs);

    loop {
        match try_connect(config).await {
            Ok(client) => {
                if attempt > 0 {
                    tracing::info!(
                        "SurrealDB connection established after {} attempt(s)",
                        attempt + 1
                    );
                } else {
                    tracing::info!(
                        "SurrealDB connected: url={}, ns={}, db={}",
                        sanitize_connection_url(&config.url),
                        config.namespace,
                        config.database
                    );
                }
                return Ok(client);
            }
            Err(e) => {
                attempt += 1;

                if attempt > config.max_retries {
                    tracing::error!(
                        "Failed to connect to SurrealDB after {} attempts: {}",
                        config.max_retries + 1,
                        e
                    );
                    return Err(e);
                }

                let delay_multiplier = 2_u32.pow(attempt.saturating_sub(1));
                let delay = base_delay * delay_multiplier;

                tracing::warn!(
                    "SurrealDB connection attempt {} failed: {}. Retrying in {:?}...",
                    attempt,
                    e,
                    delay
                );

                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// Attempt to connect to SurrealDB (single try)
async fn try_connect(config: &SurrealDbConfig) -> Result<SurrealClient> {
    let url_safe = sanitize_connection_url(&config.url);
    tracing::debug!("Connecting to SurrealDB: {}", url_safe);

    let client = surrealdb::engine::any::connect(&config.url)
        .await
        .map_err(|e| {
            Error::Database(format!(
                "Failed to connect to SurrealDB at '{}': {}",
                url_safe, e
            ))
        })?;

    if let (Some(username), Some(password)) = (&config.username, &config.password) {
        client
            .signin(surrealdb::opt::auth::Root { username, password })
            .await
            .map_err(|e| {
                Error::Database(format!(
                    "Failed to authenticate with SurrealDB at '{}': {}",
                    url_safe, e
                ))
            })?;
    }

    client
        .use_ns(&config.namespace)
        .use_db(&config.database)
        .await
        .map_err(|e| {
            Error::Database(format!(
                "Failed to select namespace '{}' / database '{}' on SurrealDB at '{}': {}",
                config.namespace, config.database, url_safe, e
            ))
        })?;

    Ok(client)
}

/// Sanitize connection URL for safe logging (remove credentials if present)
fn sanitize_connection_url(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if let Some(scheme_end) = url.find("://") {
            let scheme = &url[..=scheme_end + 2];
            let after_at = &url[at_pos..];
            return format!("{}***{}", scheme, after_at);
        }
    }
    url.to_string()
}

/// Classify a SurrealDB error into a store error category
fn map_surreal_err(operation: StoreOperation, err: surrealdb::Error) -> StoreError {
    let message = err.to_string();
    let lower = message.to_lowercase();

    if lower.contains("timeout") || lower.contains("timed out") {
        StoreError::timeout(operation, message)
    } else if lower.contains("connect")
        || lower.contains("network")
        || lower.contains("refused")
        || lower.contains("channel")
    {
        StoreError::connection_failed(operation, message)
    } else if lower.contains("serializ") || lower.contains("deserializ") || lower.contains("parse")
    {
        StoreError::serialization_error(operation, message)
    } else {
        StoreError::database_error(operation, message)
    }
}

/// Document store over a SurrealDB collection
///
/// Records live at `(TABLE, key)`. The domain `id` field never enters the
/// record body: it is stripped before writes and reconstructed from the
/// record key on reads, keeping SurrealDB the single identifier authority.
pub struct SurrealStore<D: Document> {
    client: SurrealClient,
    _entity: PhantomData<D>,
}

impl<D: Document> Clone for SurrealStore<D> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            _entity: PhantomData,
        }
    }
}

impl<D: Document> SurrealStore<D> {
    /// Create a store over an established client
    pub fn new(client: SurrealClient) -> Self {
        Self {
            client,
            _entity: PhantomData,
        }
    }

    /// Serialize the entity's record body, stripping the domain `id` field
    fn content_of(entity: &D, operation: StoreOperation) -> StoreResult<serde_json::Value> {
        let mut value = serde_json::to_value(entity)
            .map_err(|e| StoreError::serialization_error(operation, e.to_string()))?;
        if let serde_json::Value::Object(ref mut map) = value {
            map.remove("id");
        }
        Ok(value)
    }
}

// Record ids are projected back into the domain `id` field as plain strings
// so query results deserialize straight into the entity type.
const ID_PROJECTION: &str = "*, record::id(id) AS id";

impl<D: Document> EntityStore for SurrealStore<D> {
    type Entity = D;

    async fn get(&self, id: &str) -> StoreResult<Option<D>> {
        let sql = format!("SELECT {} FROM type::thing($tb, $key)", ID_PROJECTION);
        let mut response = self
            .client
            .query(sql)
            .bind(("tb", D::TABLE))
            .bind(("key", id.to_string()))
            .await
            .map_err(|e| map_surreal_err(StoreOperation::Get, e).with_entity(D::NAME, id))?;

        let found: Option<D> = response
            .take(0)
            .map_err(|e| map_surreal_err(StoreOperation::Get, e).with_entity(D::NAME, id))?;
        Ok(found)
    }

    async fn insert(&self, entity: D) -> StoreResult<D> {
        if let Some(id) = entity.id() {
            return Err(StoreError::invalid_argument(
                StoreOperation::Insert,
                "cannot insert an entity that already has an id",
            )
            .with_entity(D::NAME, id));
        }

        let key = Uuid::now_v7().simple().to_string();
        let content = Self::content_of(&entity, StoreOperation::Insert)?;

        let sql = format!(
            "SELECT {} FROM (CREATE type::thing($tb, $key) CONTENT $content)",
            ID_PROJECTION
        );
        let mut response = self
            .client
            .query(sql)
            .bind(("tb", D::TABLE))
            .bind(("key", key.clone()))
            .bind(("content", content))
            .await
            .map_err(|e| map_surreal_err(StoreOperation::Insert, e).with_entity(D::NAME, &key))?;

        let created: Option<D> = response
            .take(0)
            .map_err(|e| map_surreal_err(StoreOperation::Insert, e).with_entity(D::NAME, &key))?;

        created.ok_or_else(|| {
            StoreError::database_error(StoreOperation::Insert, "create returned no record")
                .with_entity(D::NAME, &key)
        })
    }

    async fn replace(&self, entity: D) -> StoreResult<Option<D>> {
        let id = entity
            .id()
            .ok_or_else(|| {
                StoreError::invalid_argument(
                    StoreOperation::Replace,
                    "cannot replace an entity without an id",
                )
                .with_entity(D::NAME, "<none>")
            })?
            .to_string();

        let content = Self::content_of(&entity, StoreOperation::Replace)?;

        // UPDATE targeting a specific record only touches an existing one,
        // so a vanished record yields an empty result rather than an upsert.
        let sql = format!(
            "SELECT {} FROM (UPDATE type::thing($tb, $key) CONTENT $content)",
            ID_PROJECTION
        );
        let mut response = self
            .client
            .query(sql)
            .bind(("tb", D::TABLE))
            .bind(("key", id.clone()))
            .bind(("content", content))
            .await
            .map_err(|e| map_surreal_err(StoreOperation::Replace, e).with_entity(D::NAME, &id))?;

        let replaced: Option<D> = response
            .take(0)
            .map_err(|e| map_surreal_err(StoreOperation::Replace, e).with_entity(D::NAME, &id))?;
        Ok(replaced)
    }

    async fn exists(&self, id: &str) -> StoreResult<bool> {
        let sql = "SELECT record::id(id) AS id FROM type::thing($tb, $key)";
        let mut response = self
            .client
            .query(sql)
            .bind(("tb", D::TABLE))
            .bind(("key", id.to_string()))
            .await
            .map_err(|e| map_surreal_err(StoreOperation::Exists, e).with_entity(D::NAME, id))?;

        let found: Option<serde_json::Value> = response
            .take(0)
            .map_err(|e| map_surreal_err(StoreOperation::Exists, e).with_entity(D::NAME, id))?;
        Ok(found.is_some())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.client
            .query("DELETE type::thing($tb, $key)")
            .bind(("tb", D::TABLE))
            .bind(("key", id.to_string()))
            .await
            .map_err(|e| map_surreal_err(StoreOperation::Delete, e).with_entity(D::NAME, id))?
            .check()
            .map_err(|e| map_surreal_err(StoreOperation::Delete, e).with_entity(D::NAME, id))?;
        Ok(())
    }

    async fn count(&self) -> StoreResult<u64> {
        #[derive(serde::Deserialize)]
        struct CountRow {
            total: u64,
        }

        let mut response = self
            .client
            .query("SELECT count() AS total FROM type::table($tb) GROUP ALL")
            .bind(("tb", D::TABLE))
            .await
            .map_err(|e| map_surreal_err(StoreOperation::Count, e))?;

        let row: Option<CountRow> = response
            .take(0)
            .map_err(|e| map_surreal_err(StoreOperation::Count, e))?;
        // GROUP ALL over an empty table yields no row at all
        Ok(row.map_or(0, |r| r.total))
    }

    async fn list(&self, page: &PageRequest) -> StoreResult<Vec<D>> {
        let mut sql = format!("SELECT {} FROM type::table($tb)", ID_PROJECTION);

        // ORDER BY fields cannot be bound as parameters; only allowlisted
        // field names ever reach the query string.
        if let Some((field, order)) = &page.sort {
            if D::sortable_fields().contains(&field.as_str()) {
                sql.push_str(&format!(" ORDER BY {} {}", field, order.as_sql()));
            } else {
                tracing::debug!(
                    entity = D::NAME,
                    field = %field,
                    "ignoring unknown sort field"
                );
            }
        }
        sql.push_str(" LIMIT $limit START $start");

        let mut response = self
            .client
            .query(sql)
            .bind(("tb", D::TABLE))
            .bind(("limit", page.limit))
            .bind(("start", page.offset))
            .await
            .map_err(|e| map_surreal_err(StoreOperation::List, e))?;

        let records: Vec<D> = response
            .take(0)
            .map_err(|e| map_surreal_err(StoreOperation::List, e))?;
        Ok(records)
    }
}
