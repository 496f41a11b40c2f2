//! The cue: aim angle, shot power and the mouse/keyboard arming rules.

use glam::Vec2;
use potshot_engine::{RigidBodies, VectorColor, VectorState};

pub const DEFAULT_POWER: f32 = 50.0;
/// Impulse per unit of power.
pub const SHOT_STRENGTH: f32 = 0.00035;

const AIM_LINE_LENGTH: f32 = 100.0;
const AIM_LINE_WIDTH: f32 = 4.0;

/// Which ruleset governs the cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMode {
    Mouse,
    Keyboard,
}

impl ControlMode {
    pub fn toggled(self) -> Self {
        match self {
            ControlMode::Mouse => ControlMode::Keyboard,
            ControlMode::Keyboard => ControlMode::Mouse,
        }
    }

    pub fn is_mouse(self) -> bool {
        self == ControlMode::Mouse
    }

    pub fn label(self) -> &'static str {
        match self {
            ControlMode::Mouse => "Mouse",
            ControlMode::Keyboard => "Keyboard",
        }
    }
}

/// Observable cue state, derived from the mode and the aiming flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueState {
    /// Keyboard mode: the line is always shown, space shoots.
    IdleAiming,
    /// Mouse mode, waiting for the pointer release.
    Armed,
    /// Mouse mode after a shot, until the next press near the cue ball.
    Disarmed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    is_aiming: bool,
    power: f32,
    angle: f32,
    strength: f32,
}

impl Cue {
    pub fn new(power: f32, strength: f32) -> Self {
        Self {
            is_aiming: true,
            power,
            angle: 0.0,
            strength,
        }
    }

    pub fn is_aiming(&self) -> bool {
        self.is_aiming
    }

    pub fn power(&self) -> f32 {
        self.power
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle;
    }

    /// Point from `from` toward `target`.
    pub fn aim_at(&mut self, from: Vec2, target: Vec2) {
        let d = target - from;
        self.angle = d.y.atan2(d.x);
    }

    pub fn rotate(&mut self, delta: f32) {
        self.angle = (self.angle + delta).rem_euclid(std::f32::consts::TAU);
    }

    pub fn impulse(&self) -> Vec2 {
        Vec2::from_angle(self.angle) * self.power * self.strength
    }

    /// Apply one shot impulse to `cue_ball` and return it.
    pub fn shoot<B: RigidBodies>(&self, bodies: &mut B, cue_ball: B::Handle) -> Vec2 {
        let impulse = self.impulse();
        bodies.apply_impulse(cue_ball, impulse);
        log::debug!("shot at {:.3} rad, impulse {:?}", self.angle, impulse);
        impulse
    }

    /// Arm when the press lands strictly within `reach` of the cue ball.
    pub fn arm_if_near(&mut self, press: Vec2, cue_pos: Vec2, reach: f32) -> bool {
        if press.distance(cue_pos) < reach {
            self.is_aiming = true;
            log::debug!("cue armed");
            true
        } else {
            false
        }
    }

    pub fn disarm(&mut self) {
        self.is_aiming = false;
    }

    pub fn state(&self, mode: ControlMode) -> CueState {
        match (mode, self.is_aiming) {
            (ControlMode::Keyboard, _) => CueState::IdleAiming,
            (ControlMode::Mouse, true) => CueState::Armed,
            (ControlMode::Mouse, false) => CueState::Disarmed,
        }
    }

    pub fn shows_aim_line(&self, mode: ControlMode) -> bool {
        self.state(mode) != CueState::Disarmed
    }

    pub fn draw(&self, vectors: &mut VectorState, cue_pos: Vec2, mode: ControlMode) {
        if !self.shows_aim_line(mode) {
            return;
        }
        let tip = cue_pos + Vec2::from_angle(self.angle) * AIM_LINE_LENGTH;
        vectors.stroke_polyline(&[cue_pos, tip], AIM_LINE_WIDTH, VectorColor::RED);
    }
}

impl Default for Cue {
    fn default() -> Self {
        Self::new(DEFAULT_POWER, SHOT_STRENGTH)
    }
}
