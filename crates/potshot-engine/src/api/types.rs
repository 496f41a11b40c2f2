use bytemuck::{Pod, Zeroable};

/// A game event handed from Rust to the host page.
/// `kind` identifies the event, `a/b/c` carry payload. The host reads the
/// event array straight out of linear memory, hence `repr(C)` + `Pod`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    /// Event carrying a single value.
    pub fn new(kind: f32, a: f32) -> Self {
        Self { kind, a, ..Self::default() }
    }
}
