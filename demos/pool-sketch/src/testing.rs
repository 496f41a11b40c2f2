//! Recording stand-in for the physics world.

use glam::Vec2;
use potshot_engine::{BodyDesc, ColliderMaterial, RigidBodies};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockHandle(pub u32);

#[derive(Debug, Clone)]
struct MockBody {
    handle: MockHandle,
    desc: BodyDesc,
    pos: Vec2,
    vel: Vec2,
}

/// Keeps bodies in insertion order and records every call worth asserting
/// on. `step` only counts; nothing moves unless a test moves it.
#[derive(Debug, Default)]
pub struct MockBodies {
    next: u32,
    bodies: Vec<MockBody>,
    pub removed: Vec<MockHandle>,
    pub impulses: Vec<(MockHandle, Vec2)>,
    pub steps: usize,
}

impl MockBodies {
    fn get(&self, handle: MockHandle) -> Option<&MockBody> {
        self.bodies.iter().find(|b| b.handle == handle)
    }

    fn get_mut(&mut self, handle: MockHandle) -> Option<&mut MockBody> {
        self.bodies.iter_mut().find(|b| b.handle == handle)
    }

    pub fn desc(&self, handle: MockHandle) -> Option<&BodyDesc> {
        self.get(handle).map(|b| &b.desc)
    }

    pub fn contains(&self, handle: MockHandle) -> bool {
        self.get(handle).is_some()
    }
}

impl RigidBodies for MockBodies {
    type Handle = MockHandle;

    fn add_body(&mut self, desc: &BodyDesc, _material: ColliderMaterial) -> MockHandle {
        self.next += 1;
        let handle = MockHandle(self.next);
        self.bodies.push(MockBody {
            handle,
            desc: desc.clone(),
            pos: desc.position,
            vel: desc.velocity,
        });
        handle
    }

    fn remove_body(&mut self, handle: MockHandle) {
        if let Some(idx) = self.bodies.iter().position(|b| b.handle == handle) {
            self.bodies.remove(idx);
            self.removed.push(handle);
        }
    }

    fn position(&self, handle: MockHandle) -> Vec2 {
        self.get(handle).map_or(Vec2::ZERO, |b| b.pos)
    }

    fn set_position(&mut self, handle: MockHandle, pos: Vec2) {
        if let Some(b) = self.get_mut(handle) {
            b.pos = pos;
        }
    }

    fn velocity(&self, handle: MockHandle) -> Vec2 {
        self.get(handle).map_or(Vec2::ZERO, |b| b.vel)
    }

    fn set_velocity(&mut self, handle: MockHandle, vel: Vec2) {
        if let Some(b) = self.get_mut(handle) {
            b.vel = vel;
        }
    }

    fn apply_impulse(&mut self, handle: MockHandle, impulse: Vec2) {
        self.impulses.push((handle, impulse));
    }

    fn step(&mut self) {
        self.steps += 1;
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }
}
