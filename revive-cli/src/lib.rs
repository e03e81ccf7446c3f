// Library exports for the Revive Fitness CLI
// This allows testing of internal modules

pub mod api;
pub mod commands;
pub mod config;
pub mod models;
pub mod pages;
pub mod routes;
pub mod session;
pub mod storage;
pub mod sync;
pub mod ui;
