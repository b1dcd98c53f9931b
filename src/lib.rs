//! Rotomdex - a terminal Pokédex browser
//!
//! This library exposes modules for use in integration tests.

pub mod api;
pub mod app;
pub mod cache;
pub mod favorites;
pub mod filter;
pub mod lang;
pub mod models;
pub mod prefs;
pub mod storage;
pub mod terminal;
pub mod ui;
