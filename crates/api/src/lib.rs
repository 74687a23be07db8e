//! HTTP layer: configuration, shared state, error mapping, routes and
//! handlers for the project list API.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
