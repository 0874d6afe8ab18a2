pub mod descriptor;
pub mod provider;

pub use descriptor::{build_webcam_descriptor, WebcamDescriptor};
pub use provider::{Go2rtcWebcamProvider, WebcamSource};
