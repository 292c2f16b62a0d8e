pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::config::{DeviceClass, DeviceProfile, SceneConfig};
pub use api::error::{HostError, SceneError};
pub use api::host::{NullHost, SceneHost};
pub use api::scene::ShowcaseScene;
pub use api::types::{Category, CursorHint, ObjectId, SelectionKey};
pub use assets::content::{ContentEntry, DescriptiveContent};
pub use assets::loader::{
    LoadFailure, LoadOutcome, LoadTicket, Material, SlotState, TextureFetcher, TextureHandle, TextureLoader,
};
pub use assets::manifest::{create_manifest, SceneManifest};
pub use components::motion::MotionParams;
pub use components::object::{SceneObject, Transform, VisualState};
pub use core::scene::SceneRegistry;
pub use core::time::FrameClock;
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::camera::{Camera3D, CameraController, CameraState, CameraUniform};
pub use renderer::instance::{FlowPulse, FrameSnapshot, ObjectInstance};
pub use systems::info_panel::{InfoPanelController, PanelView};
pub use systems::interaction::{Dispatcher, Gesture, InteractionState};
pub use systems::particles::{ParticleField, ParticlePoint};
