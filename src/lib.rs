//! Activity MFE Library
//!
//! An embeddable user-activity panel. The [`activity`] panel gates, fetches
//! and retries against a backend-for-frontend; the [`element`] adapter gives
//! it a custom-element style surface (attributes, properties, lifecycle,
//! outbound signals) for a host shell to drive.

pub mod activity;
pub mod auth;
pub mod client;
pub mod config;
pub mod element;
pub mod messaging;
pub mod render;
pub mod runner;
