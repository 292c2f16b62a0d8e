pub mod camera;
pub mod instance;

// Re-export key types for convenient access
pub use camera::{Camera3D, CameraController, CameraState, CameraUniform};
pub use instance::{FlowPulse, FrameSnapshot, ObjectInstance};
