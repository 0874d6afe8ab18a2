//! Bridge between a host webcam framework and a go2rtc streaming server.
//!
//! * [`webcam`] turns the live go2rtc configuration into webcam descriptors.
//! * [`crate::core::snapshot_proxy`] serves snapshots, one capture at a time.
//! * [`crate::core::management`] adds/removes streams and enables CORS, behind a
//!   capability gate.

pub mod app_config;
pub mod cli;
pub mod common;
pub mod config_loader;
pub mod core;
pub mod errors;
pub mod go2rtc;
pub mod operations;
pub mod stream_profile;
pub mod webcam;

pub use app_config::BridgeSettings;
pub use errors::BridgeError;
