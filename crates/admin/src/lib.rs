//! Cartloom Admin library.
//!
//! The administrative back-office for the Cartloom marketplace: vendor
//! onboarding and verification, order and product browsing, category
//! management, and a dashboard of aggregate statistics.
//!
//! Everything here is a composition of the same three pieces: an authenticated
//! admin session, a `PostgreSQL` query (sometimes an aggregation), and either
//! an askama view or a JSON acknowledgement. There is intentionally no cache,
//! no queue, and no background work.
//!
//! # Security
//!
//! This crate must only be deployed on network-restricted infrastructure; it
//! exposes every record in the marketplace database.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod pagination;
pub mod routes;
pub mod services;
pub mod state;
pub mod stats;
