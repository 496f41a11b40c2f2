//! One game of pool: the balls on the table, the cue, the control mode,
//! and the per-tick potting pass. Physics is reached only through
//! [`RigidBodies`], so tests can drive a session with a recording mock.

use glam::Vec2;
use potshot_engine::{RigidBodies, VectorColor, VectorState};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::ball::{Ball, BallColor};
use crate::config::{ConfigError, PoolConfig};
use crate::cue::{ControlMode, Cue};
use crate::rack::{self, RackLayout};
use crate::table::Table;

const FELT: (u8, u8, u8) = (25, 110, 50);
const OUTLINE_WIDTH: f32 = 2.0;
const BALL_OUTLINE_WIDTH: f32 = 1.0;

/// A ball that dropped this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Potting {
    pub pocket: usize,
    pub color: BallColor,
}

pub struct Session<B: RigidBodies> {
    table: Table,
    /// Every ball on the table, the cue ball included.
    balls: Vec<Ball<B::Handle>>,
    cue_ball: B::Handle,
    cushions: Vec<B::Handle>,
    cue: Cue,
    mode: ControlMode,
    pointer: Vec2,
    aim_step: f32,
    rng: ChaCha8Rng,
}

impl<B: RigidBodies> Session<B> {
    /// Build the cushions and a start-layout rack in `bodies`.
    pub fn new(config: &PoolConfig, bodies: &mut B) -> Result<Self, ConfigError> {
        config.validate()?;
        let table = config.table()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

        let material = table.cushion_material();
        let cushions = table
            .cushions()
            .iter()
            .map(|desc| bodies.add_body(desc, material))
            .collect();

        let (balls, cue_ball) = place(bodies, &table, RackLayout::Start, &mut rng);
        let mode = if config.start_in_mouse_mode {
            ControlMode::Mouse
        } else {
            ControlMode::Keyboard
        };

        log::info!(
            "session: {}x{} table, {} balls, {} mode",
            table.width(),
            table.height(),
            balls.len(),
            mode.label()
        );

        Ok(Self {
            pointer: table.cue_spawn(),
            table,
            balls,
            cue_ball,
            cushions,
            cue: Cue::new(config.shot_power, config.shot_strength),
            mode,
            aim_step: config.aim_step,
            rng,
        })
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn balls(&self) -> &[Ball<B::Handle>] {
        &self.balls
    }

    pub fn cue_ball(&self) -> B::Handle {
        self.cue_ball
    }

    pub fn cue(&self) -> &Cue {
        &self.cue
    }

    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn count_of(&self, color: BallColor) -> usize {
        self.balls.iter().filter(|b| b.color == color).count()
    }

    /// Balls still in play other than the cue ball.
    pub fn object_balls_remaining(&self) -> usize {
        self.balls.iter().filter(|b| !b.is_cue()).count()
    }

    /// Discard every ball, in flight or not, and rack `layout` with a
    /// fresh cue ball.
    pub fn rack(&mut self, bodies: &mut B, layout: RackLayout) {
        for ball in self.balls.drain(..) {
            ball.despawn(bodies);
        }
        let (balls, cue_ball) = place(bodies, &self.table, layout, &mut self.rng);
        self.balls = balls;
        self.cue_ball = cue_ball;
        log::info!("racked {:?}: {} balls", layout, self.balls.len());
    }

    /// Advance physics one step, pot what dropped, then re-aim.
    pub fn tick(&mut self, bodies: &mut B) -> Vec<Potting> {
        bodies.step();
        let potted = self.check_pockets(bodies);
        self.update_cue(bodies);
        potted
    }

    /// Remove object balls that reached a pocket and respawn the cue ball
    /// if it did. Walks the list back to front so removal never skips.
    pub fn check_pockets(&mut self, bodies: &mut B) -> Vec<Potting> {
        let mut potted = Vec::new();
        for i in (0..self.balls.len()).rev() {
            let ball = self.balls[i];
            let Some(pocket) = self.table.pocket_containing(ball.position(bodies)) else {
                continue;
            };
            if ball.is_cue() {
                bodies.set_position(ball.body, self.table.cue_spawn());
                bodies.set_velocity(ball.body, Vec2::ZERO);
                log::info!("cue ball potted in pocket {}, respawned", pocket);
            } else {
                self.balls.remove(i).despawn(bodies);
                log::info!("{:?} potted in pocket {}", ball.color, pocket);
            }
            potted.push(Potting {
                pocket,
                color: ball.color,
            });
        }
        potted
    }

    /// Mouse mode tracks the pointer every tick. Keyboard mode holds its
    /// angle until a rotate command.
    fn update_cue(&mut self, bodies: &B) {
        if self.mode.is_mouse() {
            let from = bodies.position(self.cue_ball);
            self.cue.aim_at(from, self.pointer);
        }
    }

    pub fn pointer_moved(&mut self, pos: Vec2) {
        self.pointer = pos;
    }

    /// Mouse mode: a press within one ball diameter of the cue ball arms it.
    pub fn pointer_pressed(&mut self, bodies: &B, pos: Vec2) {
        self.pointer = pos;
        if !self.mode.is_mouse() {
            return;
        }
        let cue_pos = bodies.position(self.cue_ball);
        self.cue.arm_if_near(pos, cue_pos, self.table.ball_diameter());
    }

    /// Mouse mode: releasing while armed shoots and disarms.
    pub fn pointer_released(&mut self, bodies: &mut B, pos: Vec2) -> Option<Vec2> {
        self.pointer = pos;
        if !self.mode.is_mouse() || !self.cue.is_aiming() {
            return None;
        }
        let impulse = self.cue.shoot(bodies, self.cue_ball);
        self.cue.disarm();
        Some(impulse)
    }

    /// Keyboard mode shoot command. Ignored in mouse mode.
    pub fn shoot_command(&mut self, bodies: &mut B) -> Option<Vec2> {
        if self.mode.is_mouse() {
            log::warn!("shoot key ignored in mouse mode");
            return None;
        }
        Some(self.cue.shoot(bodies, self.cue_ball))
    }

    /// Keyboard mode: turn the aim by `steps` increments of the aim step.
    pub fn rotate_aim(&mut self, steps: f32) {
        if self.mode.is_mouse() {
            return;
        }
        self.cue.rotate(steps * self.aim_step);
    }

    /// Switch between mouse and keyboard control. Cue state is untouched.
    pub fn toggle_mode(&mut self) -> ControlMode {
        self.mode = self.mode.toggled();
        log::info!("control mode: {}", self.mode.label());
        self.mode
    }

    /// Table, D-zone, pockets, balls and aim line.
    pub fn draw(&self, bodies: &B, vectors: &mut VectorState) {
        let t = &self.table;
        let (w, h) = (t.width(), t.height());

        vectors.fill_rect(Vec2::ZERO, w, h, VectorColor::rgb8(FELT.0, FELT.1, FELT.2));
        vectors.stroke_rect(Vec2::ZERO, w, h, OUTLINE_WIDTH, VectorColor::WHITE);

        let d = t.d_zone();
        vectors.stroke_arc(
            d.center,
            d.radius,
            -std::f32::consts::FRAC_PI_2,
            std::f32::consts::PI,
            OUTLINE_WIDTH,
            VectorColor::WHITE,
        );

        for pocket in t.pockets() {
            vectors.fill_circle(*pocket, t.pocket_radius(), VectorColor::BLACK);
        }

        for ball in &self.balls {
            let pos = ball.position(bodies);
            vectors.fill_circle(pos, t.ball_radius(), ball.color.vector_color());
            vectors.stroke_circle(pos, t.ball_radius(), BALL_OUTLINE_WIDTH, VectorColor::BLACK);
        }

        self.cue.draw(vectors, bodies.position(self.cue_ball), self.mode);
    }

    /// Deregister every body this session created.
    pub fn teardown(self, bodies: &mut B) {
        for ball in self.balls {
            ball.despawn(bodies);
        }
        for cushion in self.cushions {
            bodies.remove_body(cushion);
        }
    }
}

/// Spawn the object balls for `layout` followed by a new cue ball.
fn place<B: RigidBodies>(
    bodies: &mut B,
    table: &Table,
    layout: RackLayout,
    rng: &mut ChaCha8Rng,
) -> (Vec<Ball<B::Handle>>, B::Handle) {
    let mut balls: Vec<Ball<B::Handle>> = rack::object_balls(layout, table, rng)
        .into_iter()
        .map(|(pos, color)| Ball::spawn(bodies, table, pos, color))
        .collect();
    let cue = Ball::spawn(bodies, table, table.cue_spawn(), BallColor::White);
    balls.push(cue);
    (balls, cue.body)
}
