//! thermo-hub: a thermostat/device REST hub with an in-memory articles
//! demo API.
//!
//! Exposes two HTTP surfaces from one process: the REST surface
//! (articles CRUD plus thermostat endpoints under /rest/v1, literals,
//! and a token-gated /admin subtree) and a minimal device-status surface
//! (GET /device) on its own listener. All state lives in one owned
//! container shared behind an RwLock.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
