//! Table geometry. Every dimension derives from the table width.

use glam::Vec2;
use potshot_engine::{BodyDesc, ColliderDesc, ColliderMaterial};
use thiserror::Error;

/// Cushion rails are this thick, centered on the table edges.
pub const CUSHION_THICKNESS: f32 = 10.0;

const CUSHION_MATERIAL: ColliderMaterial = ColliderMaterial {
    restitution: 0.9,
    friction: 0.1,
    density: 1.0,
};

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum TableError {
    #[error("table width must be a positive finite number, got {0}")]
    InvalidWidth(f32),
}

/// The semicircle marked around the cue ball spawn. Drawn only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DZone {
    pub center: Vec2,
    pub radius: f32,
}

/// Immutable table dimensions and pocket positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    width: f32,
    height: f32,
    ball_diameter: f32,
    pocket_diameter: f32,
    pockets: [Vec2; 6],
}

impl Table {
    pub const DEFAULT_WIDTH: f32 = 800.0;

    /// Derive a table from its width. Rejects non-finite or non-positive widths.
    pub fn new(width: f32) -> Result<Self, TableError> {
        if !width.is_finite() || width <= 0.0 {
            return Err(TableError::InvalidWidth(width));
        }
        Ok(Self::from_width(width))
    }

    fn from_width(width: f32) -> Self {
        let height = width / 2.0;
        let ball_diameter = width / 36.0;
        Self {
            width,
            height,
            ball_diameter,
            pocket_diameter: ball_diameter * 1.5,
            // Four corners and the two long-edge midpoints
            pockets: [
                Vec2::new(0.0, 0.0),
                Vec2::new(width / 2.0, 0.0),
                Vec2::new(width, 0.0),
                Vec2::new(0.0, height),
                Vec2::new(width / 2.0, height),
                Vec2::new(width, height),
            ],
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn ball_diameter(&self) -> f32 {
        self.ball_diameter
    }

    pub fn ball_radius(&self) -> f32 {
        self.ball_diameter / 2.0
    }

    pub fn pocket_diameter(&self) -> f32 {
        self.pocket_diameter
    }

    pub fn pocket_radius(&self) -> f32 {
        self.pocket_diameter / 2.0
    }

    pub fn pockets(&self) -> &[Vec2; 6] {
        &self.pockets
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Where the cue ball is racked and respawned.
    pub fn cue_spawn(&self) -> Vec2 {
        Vec2::new(self.width * 0.2, self.height / 2.0)
    }

    pub fn d_zone(&self) -> DZone {
        DZone {
            center: self.cue_spawn(),
            radius: self.width * 0.2,
        }
    }

    /// Min and max corners of the region random racks place balls in:
    /// one ball diameter in from every edge.
    pub fn placement_bounds(&self) -> (Vec2, Vec2) {
        let d = self.ball_diameter;
        (
            Vec2::splat(d),
            Vec2::new(self.width - d, self.height - d),
        )
    }

    /// Index of the first pocket whose capture radius strictly contains a
    /// ball centered at `pos`.
    pub fn pocket_containing(&self, pos: Vec2) -> Option<usize> {
        let reach = self.ball_radius() + self.pocket_radius();
        self.pockets.iter().position(|pocket| pos.distance(*pocket) < reach)
    }

    /// Static rails along the four edges.
    pub fn cushions(&self) -> [BodyDesc; 4] {
        let (w, h, t) = (self.width, self.height, CUSHION_THICKNESS);
        let horizontal = ColliderDesc::Cuboid {
            half_width: w / 2.0,
            half_height: t / 2.0,
        };
        let vertical = ColliderDesc::Cuboid {
            half_width: t / 2.0,
            half_height: h / 2.0,
        };
        [
            BodyDesc::fixed(horizontal).with_position(Vec2::new(w / 2.0, 0.0)),
            BodyDesc::fixed(horizontal).with_position(Vec2::new(w / 2.0, h)),
            BodyDesc::fixed(vertical).with_position(Vec2::new(0.0, h / 2.0)),
            BodyDesc::fixed(vertical).with_position(Vec2::new(w, h / 2.0)),
        ]
    }

    pub fn cushion_material(&self) -> ColliderMaterial {
        CUSHION_MATERIAL
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::from_width(Self::DEFAULT_WIDTH)
    }
}
