//! WebGPU rendering module
//!
//! Everything is vector-drawn: the scene is rebuilt as flat-colored
//! triangles each frame, and HUD text is left to the host page.

pub mod hud;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use hud::HudSnapshot;
pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::Vertex;
