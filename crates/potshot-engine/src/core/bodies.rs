//! Backend-independent rigid body descriptions.
//!
//! Games describe bodies with [`BodyDesc`] and talk to the simulation only
//! through the [`RigidBodies`] trait, so the rapier-backed [`PhysicsWorld`]
//! can be swapped for a recording stand-in in tests.
//!
//! [`PhysicsWorld`]: crate::core::physics::PhysicsWorld

use glam::Vec2;
use std::fmt::Debug;

/// Whether a body is simulated or pinned in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    Dynamic,
    Fixed,
}

/// Collision shape of a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderDesc {
    /// Circle of the given radius.
    Ball { radius: f32 },
    /// Axis-aligned rectangle given by its half extents.
    Cuboid { half_width: f32, half_height: f32 },
}

/// Surface properties of a collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColliderMaterial {
    pub restitution: f32,
    pub friction: f32,
    pub density: f32,
}

impl Default for ColliderMaterial {
    fn default() -> Self {
        Self {
            restitution: 0.3,
            friction: 0.5,
            density: 1.0,
        }
    }
}

/// Builder for describing a rigid body before it is registered.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyDesc {
    pub body_type: BodyType,
    pub position: Vec2,
    pub velocity: Vec2,
    pub collider: ColliderDesc,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub ccd: bool,
}

impl BodyDesc {
    /// A dynamic body with the given collider shape, at rest at the origin.
    pub fn dynamic(collider: ColliderDesc) -> Self {
        Self {
            body_type: BodyType::Dynamic,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            collider,
            linear_damping: 0.0,
            angular_damping: 0.0,
            ccd: false,
        }
    }

    /// A fixed (static) body with the given collider shape.
    pub fn fixed(collider: ColliderDesc) -> Self {
        Self {
            body_type: BodyType::Fixed,
            ..Self::dynamic(collider)
        }
    }

    pub fn with_position(mut self, pos: Vec2) -> Self {
        self.position = pos;
        self
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.velocity = vel;
        self
    }

    /// Velocity decay per second. Stands in for rolling resistance on felt.
    pub fn with_linear_damping(mut self, damping: f32) -> Self {
        self.linear_damping = damping;
        self
    }

    pub fn with_angular_damping(mut self, damping: f32) -> Self {
        self.angular_damping = damping;
        self
    }

    /// Continuous collision detection, for fast small bodies.
    pub fn with_ccd(mut self, enabled: bool) -> Self {
        self.ccd = enabled;
        self
    }
}

/// The narrow capability a game needs from a physics engine.
///
/// Handles are opaque and cheap to copy. Queries against a handle that was
/// already removed return zero vectors; mutations are ignored.
pub trait RigidBodies {
    type Handle: Copy + PartialEq + Debug;

    /// Register a body with the world.
    fn add_body(&mut self, desc: &BodyDesc, material: ColliderMaterial) -> Self::Handle;

    /// Deregister a body and its collider.
    fn remove_body(&mut self, handle: Self::Handle);

    fn position(&self, handle: Self::Handle) -> Vec2;

    /// Teleport a body.
    fn set_position(&mut self, handle: Self::Handle, pos: Vec2);

    fn velocity(&self, handle: Self::Handle) -> Vec2;

    fn set_velocity(&mut self, handle: Self::Handle, vel: Vec2);

    /// Apply a one-shot impulse; the velocity change happens once.
    fn apply_impulse(&mut self, handle: Self::Handle, impulse: Vec2);

    /// Advance the simulation by one fixed step.
    fn step(&mut self);

    /// Number of bodies currently registered.
    fn body_count(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_pattern() {
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: 5.0 })
            .with_position(Vec2::new(10.0, 20.0))
            .with_velocity(Vec2::new(1.0, 2.0))
            .with_linear_damping(0.6)
            .with_ccd(true);

        assert_eq!(desc.body_type, BodyType::Dynamic);
        assert_eq!(desc.position, Vec2::new(10.0, 20.0));
        assert_eq!(desc.velocity, Vec2::new(1.0, 2.0));
        assert!((desc.linear_damping - 0.6).abs() < 0.001);
        assert!(desc.ccd);
    }

    #[test]
    fn fixed_keeps_shape_and_defaults() {
        let desc = BodyDesc::fixed(ColliderDesc::Cuboid {
            half_width: 400.0,
            half_height: 5.0,
        });
        assert_eq!(desc.body_type, BodyType::Fixed);
        assert_eq!(desc.velocity, Vec2::ZERO);
        assert!(!desc.ccd);
        assert_eq!(
            desc.collider,
            ColliderDesc::Cuboid { half_width: 400.0, half_height: 5.0 }
        );
    }

    #[test]
    fn collider_material_defaults() {
        let mat = ColliderMaterial::default();
        assert!((mat.restitution - 0.3).abs() < 0.001);
        assert!((mat.friction - 0.5).abs() < 0.001);
        assert!((mat.density - 1.0).abs() < 0.001);
    }
}
