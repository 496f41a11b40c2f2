//! Pool sketch: a top-down table with three rack layouts, six pockets and
//! a cue driven by mouse or keyboard over Rapier2D physics.

use glam::Vec2;
use potshot_engine::{
    keys, EngineContext, Game, GameConfig, GameEvent, InputEvent, InputQueue, PhysicsWorld,
    RenderContext,
};

use crate::config::PoolConfig;
use crate::cue::ControlMode;
use crate::rack::RackLayout;
use crate::session::Session;

/// Custom event IDs from the host UI
pub mod events {
    pub const TOGGLE_MODE: u32 = 1;
}

/// Game event kinds sent to the host
pub mod game_events {
    pub const BALLS_REMAINING: f32 = 1.0;
    /// `a` = 1 for mouse mode, 0 for keyboard mode.
    pub const MODE_CHANGED: f32 = 2.0;
}

pub struct PoolGame {
    config: PoolConfig,
    session: Option<Session<PhysicsWorld>>,
    // Init and configure run between frames, where events would be
    // cleared unread; the next update reports the mode instead.
    mode_pending: bool,
}

impl PoolGame {
    pub fn new() -> Self {
        Self {
            config: PoolConfig::default(),
            session: None,
            mode_pending: false,
        }
    }

    pub fn session(&self) -> Option<&Session<PhysicsWorld>> {
        self.session.as_ref()
    }

    /// Replace the session; the new mode is reported on the next update.
    fn start_session(&mut self, ctx: &mut EngineContext) {
        match Session::new(&self.config, &mut ctx.physics) {
            Ok(session) => {
                self.session = Some(session);
                self.mode_pending = true;
            }
            Err(e) => log::error!("could not start session: {}", e),
        }
    }
}

impl Default for PoolGame {
    fn default() -> Self {
        Self::new()
    }
}

fn emit_mode(ctx: &mut EngineContext, mode: ControlMode) {
    let flag = if mode.is_mouse() { 1.0 } else { 0.0 };
    ctx.emit_event(GameEvent::new(game_events::MODE_CHANGED, flag));
}

impl Game for PoolGame {
    fn config(&self) -> GameConfig {
        let width = self.config.table_width;
        GameConfig {
            fixed_dt: 1.0 / 60.0,
            world_width: width,
            world_height: width / 2.0,
            gravity: Vec2::ZERO, // Top-down table
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        self.start_session(ctx);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        if self.mode_pending {
            emit_mode(ctx, session.mode());
            self.mode_pending = false;
        }

        for event in input.iter() {
            match *event {
                InputEvent::PointerMove { x, y } => session.pointer_moved(Vec2::new(x, y)),
                InputEvent::PointerDown { x, y } => {
                    session.pointer_pressed(&ctx.physics, Vec2::new(x, y));
                }
                InputEvent::PointerUp { x, y } => {
                    session.pointer_released(&mut ctx.physics, Vec2::new(x, y));
                }
                InputEvent::KeyDown { key_code } => {
                    if let Some(layout) = RackLayout::from_key(key_code) {
                        session.rack(&mut ctx.physics, layout);
                        continue;
                    }
                    match key_code {
                        keys::SPACE => {
                            session.shoot_command(&mut ctx.physics);
                        }
                        keys::ARROW_LEFT => session.rotate_aim(-1.0),
                        keys::ARROW_RIGHT => session.rotate_aim(1.0),
                        keys::M => {
                            let mode = session.toggle_mode();
                            emit_mode(ctx, mode);
                        }
                        _ => {}
                    }
                }
                InputEvent::Custom { kind, .. } if kind == events::TOGGLE_MODE => {
                    let mode = session.toggle_mode();
                    emit_mode(ctx, mode);
                }
                InputEvent::Custom { kind, .. } => {
                    log::warn!("unknown custom event {}", kind);
                }
                InputEvent::KeyUp { .. } => {}
            }
        }

        for pot in session.tick(&mut ctx.physics) {
            log::debug!("pot: {:?}", pot);
        }

        ctx.emit_event(GameEvent::new(
            game_events::BALLS_REMAINING,
            session.object_balls_remaining() as f32,
        ));
    }

    fn render(&self, ctx: &mut RenderContext) {
        if let Some(session) = &self.session {
            session.draw(ctx.physics, ctx.vectors);
        }
    }

    /// Accepts a JSON [`PoolConfig`]. A valid config re-racks a new table;
    /// an invalid one is logged and the current game carries on.
    fn configure(&mut self, ctx: &mut EngineContext, json: &str) {
        let config = match PoolConfig::from_json(json) {
            Ok(config) => config,
            Err(e) => {
                log::error!("rejected config: {}", e);
                return;
            }
        };

        if let Some(old) = self.session.take() {
            old.teardown(&mut ctx.physics);
        }
        self.config = config;
        log::info!("config applied: {:?}", self.config);
        self.start_session(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ball::BallColor;
    use potshot_web::GameRunner;

    fn started() -> (PoolGame, EngineContext) {
        let mut game = PoolGame::new();
        let mut ctx = EngineContext::new(&game.config());
        game.init(&mut ctx);
        (game, ctx)
    }

    fn update_with(game: &mut PoolGame, ctx: &mut EngineContext, events: &[InputEvent]) {
        ctx.clear_frame_data();
        let mut input = InputQueue::new();
        for e in events {
            input.push(*e);
        }
        game.update(ctx, &input);
    }

    fn events_of(ctx: &EngineContext, kind: f32) -> Vec<GameEvent> {
        ctx.events.iter().copied().filter(|e| e.kind == kind).collect()
    }

    #[test]
    fn world_matches_table() {
        let game = PoolGame::new();
        let config = game.config();
        assert_eq!(config.world_width, 800.0);
        assert_eq!(config.world_height, 400.0);
        assert_eq!(config.gravity, Vec2::ZERO);
    }

    #[test]
    fn init_racks_and_reports_mode_on_first_update() {
        let (mut game, mut ctx) = started();
        let session = game.session().unwrap();
        assert_eq!(session.balls().len(), 18);
        // 18 balls + 4 cushions
        assert_eq!(ctx.physics.body_count(), 22);

        update_with(&mut game, &mut ctx, &[]);
        assert_eq!(
            events_of(&ctx, game_events::MODE_CHANGED),
            vec![GameEvent::new(game_events::MODE_CHANGED, 1.0)]
        );
        update_with(&mut game, &mut ctx, &[]);
        assert!(events_of(&ctx, game_events::MODE_CHANGED).is_empty());
    }

    #[test]
    fn host_sees_mode_after_init_and_configure() {
        let mut runner = GameRunner::new(PoolGame::new());
        runner.init();
        runner.tick(3.0 / 60.0);
        let modes: Vec<GameEvent> = runner
            .game_events()
            .iter()
            .copied()
            .filter(|e| e.kind == game_events::MODE_CHANGED)
            .collect();
        assert_eq!(modes, vec![GameEvent::new(game_events::MODE_CHANGED, 1.0)]);

        runner.configure(r#"{"start_in_mouse_mode": false}"#);
        runner.tick(1.0 / 60.0);
        let modes: Vec<GameEvent> = runner
            .game_events()
            .iter()
            .copied()
            .filter(|e| e.kind == game_events::MODE_CHANGED)
            .collect();
        assert_eq!(modes, vec![GameEvent::new(game_events::MODE_CHANGED, 0.0)]);
    }

    #[test]
    fn reports_balls_remaining_each_tick() {
        let (mut game, mut ctx) = started();
        update_with(&mut game, &mut ctx, &[]);
        assert_eq!(
            events_of(&ctx, game_events::BALLS_REMAINING),
            vec![GameEvent::new(game_events::BALLS_REMAINING, 17.0)]
        );

        update_with(&mut game, &mut ctx, &[InputEvent::KeyDown { key_code: keys::DIGIT_2 }]);
        let remaining = game.session().unwrap().object_balls_remaining();
        assert!(remaining <= 15);
        assert_eq!(
            events_of(&ctx, game_events::BALLS_REMAINING),
            vec![GameEvent::new(game_events::BALLS_REMAINING, remaining as f32)]
        );
    }

    #[test]
    fn rack_keys_keep_body_count_in_step() {
        let (mut game, mut ctx) = started();
        for key in [keys::DIGIT_2, keys::DIGIT_3, keys::DIGIT_2, keys::DIGIT_1] {
            update_with(&mut game, &mut ctx, &[InputEvent::KeyDown { key_code: key }]);
            let balls = game.session().unwrap().balls().len();
            assert_eq!(ctx.physics.body_count(), balls + 4);
        }
        assert_eq!(game.session().unwrap().count_of(BallColor::Red), 15);
        assert_eq!(game.session().unwrap().count_of(BallColor::Blue), 1);
    }

    #[test]
    fn toggle_by_button_or_key() {
        let (mut game, mut ctx) = started();
        update_with(
            &mut game,
            &mut ctx,
            &[InputEvent::Custom {
                kind: events::TOGGLE_MODE,
                a: 0.0,
                b: 0.0,
                c: 0.0,
            }],
        );
        assert_eq!(game.session().unwrap().mode(), ControlMode::Keyboard);
        assert_eq!(
            events_of(&ctx, game_events::MODE_CHANGED),
            vec![GameEvent::new(game_events::MODE_CHANGED, 0.0)]
        );

        update_with(&mut game, &mut ctx, &[InputEvent::KeyDown { key_code: keys::M }]);
        assert_eq!(game.session().unwrap().mode(), ControlMode::Mouse);
    }

    #[test]
    fn mouse_drag_shot_moves_the_cue_ball() {
        let (mut game, mut ctx) = started();
        update_with(&mut game, &mut ctx, &[]);

        let cue = game.session().unwrap().cue_ball();
        let start = ctx.physics.body_position(&cue);
        update_with(
            &mut game,
            &mut ctx,
            &[
                InputEvent::PointerDown { x: start.x + 5.0, y: start.y },
                InputEvent::PointerMove { x: start.x - 100.0, y: start.y },
            ],
        );
        update_with(
            &mut game,
            &mut ctx,
            &[InputEvent::PointerUp { x: start.x - 100.0, y: start.y }],
        );
        for _ in 0..5 {
            update_with(&mut game, &mut ctx, &[]);
        }

        let now = ctx.physics.body_position(&cue);
        assert!(now.x < start.x - 1.0, "cue ball did not move left: {:?}", now);
        assert!(!game.session().unwrap().cue().is_aiming());
    }

    #[test]
    fn keyboard_rotation_and_space() {
        let (mut game, mut ctx) = started();
        update_with(&mut game, &mut ctx, &[InputEvent::KeyDown { key_code: keys::M }]);
        let before = game.session().unwrap().cue().angle();

        update_with(
            &mut game,
            &mut ctx,
            &[
                InputEvent::KeyDown { key_code: keys::ARROW_RIGHT },
                InputEvent::KeyDown { key_code: keys::ARROW_RIGHT },
                InputEvent::PointerMove { x: 10.0, y: 10.0 },
            ],
        );
        let after = game.session().unwrap().cue().angle();
        assert!((after - before - 2.0 * std::f32::consts::PI / 90.0).abs() < 1e-5);

        let cue = game.session().unwrap().cue_ball();
        update_with(&mut game, &mut ctx, &[InputEvent::KeyDown { key_code: keys::SPACE }]);
        update_with(&mut game, &mut ctx, &[]);
        assert!(ctx.physics.velocity(&cue).length() > 1.0);
    }

    #[test]
    fn bad_config_keeps_current_game() {
        let (mut game, mut ctx) = started();
        let cue = game.session().unwrap().cue_ball();
        game.configure(&mut ctx, r#"{"table_width": 0}"#);
        assert_eq!(game.session().unwrap().cue_ball(), cue);
        assert_eq!(game.config().world_width, 800.0);
    }

    #[test]
    fn good_config_rebuilds_the_table() {
        let (mut game, mut ctx) = started();
        ctx.clear_frame_data();
        game.configure(&mut ctx, r#"{"table_width": 720, "start_in_mouse_mode": false}"#);

        let session = game.session().unwrap();
        assert_eq!(session.table().width(), 720.0);
        assert_eq!(session.mode(), ControlMode::Keyboard);
        assert_eq!(ctx.physics.body_count(), 22);
        assert_eq!(game.config().world_height, 360.0);

        update_with(&mut game, &mut ctx, &[]);
        assert_eq!(
            events_of(&ctx, game_events::MODE_CHANGED),
            vec![GameEvent::new(game_events::MODE_CHANGED, 0.0)]
        );
    }

    #[test]
    fn render_draws_the_table() {
        let (game, mut ctx) = started();
        let mut rc = ctx.render_context();
        game.render(&mut rc);
        assert!(ctx.vectors.vertex_count() > 0);
    }
}
