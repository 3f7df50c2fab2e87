//! HTTP request handlers, grouped by resource.
//!
//! Every handler is a plain async fn: decode the body (if any), take the
//! appropriate guard on the shared state, read or mutate, encode the result.

pub mod admin;
pub mod articles;
pub mod climate;
