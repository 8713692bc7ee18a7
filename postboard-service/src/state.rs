//! Application state shared across handlers

use std::sync::Arc;

use crate::config::Config;
use crate::domain::{Comment, Post};
use crate::error::Result;
use crate::service::EntityService;
use crate::store::{connect, SurrealClient, SurrealStore};

/// Shared state: one entity service per collection plus the application
/// name used in alert headers. Cheap to clone; the SurrealDB client is
/// reference-counted internally.
#[derive(Clone)]
pub struct AppState {
    posts: EntityService<SurrealStore<Post>>,
    comments: EntityService<SurrealStore<Comment>>,
    application_name: Arc<str>,
}

impl AppState {
    /// Connect to the configured database and build the state
    pub async fn connect(config: &Config) -> Result<Self> {
        let client = connect(&config.surrealdb).await?;
        Ok(Self::with_client(client, &config.service.name))
    }

    /// Build the state over an established client
    ///
    /// Used directly by tests running against the `mem://` engine.
    pub fn with_client(client: SurrealClient, application_name: &str) -> Self {
        Self {
            posts: EntityService::new(SurrealStore::new(client.clone())),
            comments: EntityService::new(SurrealStore::new(client)),
            application_name: Arc::from(application_name),
        }
    }

    /// Service managing posts
    pub fn posts(&self) -> &EntityService<SurrealStore<Post>> {
        &self.posts
    }

    /// Service managing comments
    pub fn comments(&self) -> &EntityService<SurrealStore<Comment>> {
        &self.comments
    }

    /// Application name used as the token in alert headers
    pub fn application_name(&self) -> &str {
        &self.application_name
    }
}
