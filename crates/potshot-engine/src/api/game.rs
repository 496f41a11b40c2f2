use crate::api::types::GameEvent;
use crate::input::queue::InputQueue;
#[cfg(feature = "physics")]
use crate::core::physics::PhysicsWorld;
#[cfg(feature = "vectors")]
use crate::systems::vector::VectorState;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// World width in game units. The host sizes its canvas to this.
    pub world_width: f32,
    /// World height in game units.
    pub world_height: f32,
    /// Maximum vector vertices per frame (default: 16384).
    pub max_vector_vertices: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Gravity vector for the physics world. Default: zero.
    /// For Y-down coordinate systems, positive Y pulls downward.
    #[cfg(feature = "physics")]
    pub gravity: glam::Vec2,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 800.0,
            world_height: 600.0,
            max_vector_vertices: 16384,
            max_events: 32,
            #[cfg(feature = "physics")]
            gravity: glam::Vec2::ZERO,
        }
    }
}

/// The contract every game fulfils. The runner calls `init` once, then
/// `update` once per fixed tick and `render` once per frame.
pub trait Game {
    /// Return engine configuration. Called before init and after `configure`.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Set up initial state.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed tick. The game owns physics stepping: it advances the world
    /// at the point in its tick where it wants the integration to happen.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Draw the current state. Read-only with respect to the game.
    fn render(&self, _ctx: &mut RenderContext) {}

    /// Apply a host-supplied JSON configuration. Ignored by default.
    fn configure(&mut self, _ctx: &mut EngineContext, _json: &str) {}
}

/// Mutable access to engine state, passed to `Game::init` and `Game::update`.
pub struct EngineContext {
    pub events: Vec<GameEvent>,
    max_events: usize,
    #[cfg(feature = "physics")]
    pub physics: PhysicsWorld,
    #[cfg(feature = "vectors")]
    pub vectors: VectorState,
}

impl EngineContext {
    /// Build the context a game described by `config` runs in.
    pub fn new(config: &GameConfig) -> Self {
        #[cfg(feature = "physics")]
        let physics = {
            let mut world = PhysicsWorld::new(config.gravity);
            world.set_dt(config.fixed_dt);
            world
        };

        Self {
            events: Vec::with_capacity(config.max_events),
            max_events: config.max_events,
            #[cfg(feature = "physics")]
            physics,
            #[cfg(feature = "vectors")]
            vectors: VectorState::with_capacity(config.max_vector_vertices),
        }
    }

    /// Queue a game event for the host. Events past `max_events` in one
    /// frame are dropped.
    pub fn emit_event(&mut self, event: GameEvent) {
        if self.events.len() >= self.max_events {
            log::warn!("event buffer full ({}), dropping {:?}", self.max_events, event);
            return;
        }
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }

    /// Borrow the pieces a render pass needs.
    pub fn render_context(&mut self) -> RenderContext<'_> {
        RenderContext {
            #[cfg(feature = "physics")]
            physics: &self.physics,
            #[cfg(feature = "vectors")]
            vectors: &mut self.vectors,
            #[cfg(not(any(feature = "physics", feature = "vectors")))]
            _marker: std::marker::PhantomData,
        }
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

/// What a render pass sees: the simulation read-only, the draw list mutable.
pub struct RenderContext<'a> {
    #[cfg(feature = "physics")]
    pub physics: &'a PhysicsWorld,
    #[cfg(feature = "vectors")]
    pub vectors: &'a mut VectorState,
    #[cfg(not(any(feature = "physics", feature = "vectors")))]
    _marker: std::marker::PhantomData<&'a ()>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_capped_per_frame() {
        let config = GameConfig {
            max_events: 2,
            ..GameConfig::default()
        };
        let mut ctx = EngineContext::new(&config);
        for i in 0..5 {
            ctx.emit_event(GameEvent::new(1.0, i as f32));
        }
        assert_eq!(ctx.events.len(), 2);
        assert_eq!(ctx.events[1].a, 1.0);

        ctx.clear_frame_data();
        assert!(ctx.events.is_empty());
    }

    #[cfg(feature = "physics")]
    #[test]
    fn physics_world_uses_config_timestep() {
        let config = GameConfig {
            fixed_dt: 1.0 / 120.0,
            ..GameConfig::default()
        };
        let ctx = EngineContext::new(&config);
        assert!((ctx.physics.dt() - 1.0 / 120.0).abs() < 1e-6);
        assert_eq!(ctx.physics.body_count(), 0);
    }

    #[cfg(feature = "vectors")]
    #[test]
    fn render_context_draws_into_context_vectors() {
        let mut ctx = EngineContext::default();
        {
            let rc = ctx.render_context();
            rc.vectors
                .fill_rect(glam::Vec2::ZERO, 10.0, 10.0, crate::VectorColor::WHITE);
        }
        assert_eq!(ctx.vectors.vertex_count(), 6);
    }
}
