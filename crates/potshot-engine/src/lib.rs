//! Headless 2D engine substrate: rigid bodies, fixed-step loop support,
//! input queue and vector drawing. Games implement [`Game`]; a host-side
//! runner drives them.

pub mod api;
pub mod core;
pub mod input;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext, RenderContext};
pub use api::types::GameEvent;
pub use core::bodies::{BodyDesc, BodyType, ColliderDesc, ColliderMaterial, RigidBodies};
pub use core::time::FixedTimestep;
pub use input::queue::{keys, InputEvent, InputQueue};

#[cfg(feature = "physics")]
pub use core::physics::{PhysicsWorld, PhysicsBody};

#[cfg(feature = "vectors")]
pub use systems::vector::{VectorState, VectorVertex, VectorColor};
