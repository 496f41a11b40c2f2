pub mod bodies;
#[cfg(feature = "physics")]
pub mod physics;
pub mod time;
