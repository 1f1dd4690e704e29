//! A notes page backed by a remote notes service, plus a same-origin relay
//! (`/api/notes/...`) that forwards any method and sub-path to that service.

pub mod client;
pub mod components;
pub mod config;
pub mod controllers;
pub mod errors;
pub mod manager;
pub mod middleware;
pub mod models;
pub mod relay;
pub mod routes;

#[cfg(test)]
mod test_upstream;
