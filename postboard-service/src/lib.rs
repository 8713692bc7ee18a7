//! postboard-service: async CRUD REST service for posts and comments
//!
//! A non-blocking HTTP service exposing CRUD endpoints for two document
//! entities, Post and Comment, persisted in SurrealDB. Requests flow from
//! axum handlers through per-entity services to a store abstraction; the
//! whole pipeline is async end to end.
//!
//! # Layout
//!
//! - [`domain`] — entities and the document contract
//! - [`store`] — persistence abstraction and the SurrealDB backend
//! - [`service`] — per-entity orchestration (merge semantics, logging)
//! - [`web`] — routes, extractors, errors, pagination and alert headers
//! - [`config`] / [`observability`] / [`server`] — runtime plumbing

pub mod config;
pub mod domain;
pub mod error;
pub mod middleware;
pub mod observability;
pub mod server;
pub mod service;
pub mod state;
pub mod store;
pub mod web;

pub use config::Config;
pub use error::{Error, Result};
pub use server::Server;
pub use state::AppState;
