pub mod client;
pub mod remote_config;

pub use client::{CaptureSourceInfo, Go2rtcClient};
pub use remote_config::RemoteConfig;
