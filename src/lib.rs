//! Exercise recommendations from a short self-report, plus catalog search,
//! personal routines and condition history over HTTP.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
