//! Balls: one physics body plus a color tag.

use glam::Vec2;
use potshot_engine::{BodyDesc, ColliderDesc, ColliderMaterial, RigidBodies, VectorColor};

use crate::table::Table;

const RESTITUTION: f32 = 0.8;
const FRICTION: f32 = 0.01;
// Felt drag; roughly 1% speed loss per 60 Hz tick.
const LINEAR_DAMPING: f32 = 0.6;
const ANGULAR_DAMPING: f32 = 1.0;
// Balls are nearly massless in pixel units so a default shot
// (impulse 50 × 0.00035) sends the cue ball off at ~600 px/s.
const DENSITY: f32 = 7.5e-8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BallColor {
    Red,
    Blue,
    Black,
    White,
}

impl BallColor {
    /// The white ball is the cue ball.
    pub fn is_cue(self) -> bool {
        self == BallColor::White
    }

    pub fn vector_color(self) -> VectorColor {
        match self {
            BallColor::Red => VectorColor::RED,
            BallColor::Blue => VectorColor::BLUE,
            BallColor::Black => VectorColor::BLACK,
            BallColor::White => VectorColor::WHITE,
        }
    }
}

/// A ball on the table. `H` is the physics backend's body handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball<H> {
    pub body: H,
    pub color: BallColor,
}

impl<H: Copy> Ball<H> {
    /// Register a ball body at `pos` and wrap it.
    pub fn spawn<B>(bodies: &mut B, table: &Table, pos: Vec2, color: BallColor) -> Self
    where
        B: RigidBodies<Handle = H>,
    {
        let desc = BodyDesc::dynamic(ColliderDesc::Ball {
            radius: table.ball_radius(),
        })
        .with_position(pos)
        .with_linear_damping(LINEAR_DAMPING)
        .with_angular_damping(ANGULAR_DAMPING)
        .with_ccd(true);

        let material = ColliderMaterial {
            restitution: RESTITUTION,
            friction: FRICTION,
            density: DENSITY,
        };

        Self {
            body: bodies.add_body(&desc, material),
            color,
        }
    }

    /// Deregister the body. The ball is consumed.
    pub fn despawn<B>(self, bodies: &mut B)
    where
        B: RigidBodies<Handle = H>,
    {
        bodies.remove_body(self.body);
    }

    pub fn position<B>(&self, bodies: &B) -> Vec2
    where
        B: RigidBodies<Handle = H>,
    {
        bodies.position(self.body)
    }

    pub fn is_cue(&self) -> bool {
        self.color.is_cue()
    }
}
