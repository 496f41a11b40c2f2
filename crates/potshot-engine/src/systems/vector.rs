//! Immediate-mode vector drawing.
//!
//! Shapes are tessellated on the CPU with lyon into a flat triangle list of
//! `[x, y, r, g, b, a]` vertices, which the host uploads and draws as-is.
//! The buffer is cleared at the start of every render pass.
//!
//! ```ignore
//! vectors.fill_rect(Vec2::ZERO, 800.0, 400.0, VectorColor::rgb8(25, 110, 50));
//! vectors.stroke_arc(Vec2::new(160.0, 200.0), 160.0, -FRAC_PI_2, PI, 2.0, VectorColor::WHITE);
//! vectors.stroke_polyline(&[from, to], 4.0, VectorColor::RED);
//! ```

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::{point, vector, Angle};
use lyon::path::{Path, Winding};
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor,
    StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor, VertexBuffers,
};

/// Tessellation tolerance in world units.
const TOLERANCE: f32 = 0.5;

/// Max chord length when flattening arcs.
const ARC_SEGMENT_LEN: f32 = 4.0;

/// Per-vertex data: position + RGBA. 6 floats = 24 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    pub const FLOATS: usize = 6;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    fn at(x: f32, y: f32, color: VectorColor) -> Self {
        Self { x, y, r: color.r, g: color.g, b: color.b, a: color.a }
    }
}

/// RGBA color, components in 0.0 - 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorColor {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Opaque color from 0-255 channels, the way canvas sketches spell them.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
}

impl Default for VectorColor {
    fn default() -> Self {
        Self::WHITE
    }
}

struct FillVertexCtor {
    color: VectorColor,
}

impl FillVertexConstructor<VectorVertex> for FillVertexCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> VectorVertex {
        let p = vertex.position();
        VectorVertex::at(p.x, p.y, self.color)
    }
}

struct StrokeVertexCtor {
    color: VectorColor,
}

impl StrokeVertexConstructor<VectorVertex> for StrokeVertexCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> VectorVertex {
        let p = vertex.position();
        VectorVertex::at(p.x, p.y, self.color)
    }
}

/// Build a path through `points`, optionally closing it.
fn polyline_path(points: &[Vec2], closed: bool) -> Path {
    let mut builder = Path::builder();
    builder.begin(point(points[0].x, points[0].y));
    for p in &points[1..] {
        builder.line_to(point(p.x, p.y));
    }
    builder.end(closed);
    builder.build()
}

fn circle_path(center: Vec2, radius: f32) -> Path {
    let mut builder = Path::builder();
    builder.add_circle(point(center.x, center.y), radius, Winding::Positive);
    builder.build()
}

fn ellipse_path(center: Vec2, radii: Vec2) -> Path {
    let mut builder = Path::builder();
    builder.add_ellipse(
        point(center.x, center.y),
        vector(radii.x, radii.y),
        Angle::radians(0.0),
        Winding::Positive,
    );
    builder.build()
}

/// Tessellators plus the flat output buffer for one frame of drawing.
pub struct VectorState {
    fill_tess: FillTessellator,
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    buffer: Vec<f32>,
    max_vertices: usize,
    overflowed: bool,
}

impl VectorState {
    pub fn new() -> Self {
        Self::with_capacity(16384)
    }

    /// Create a state that holds at most `max_vertices` vertices per frame.
    /// Shapes that would overflow are dropped whole.
    pub fn with_capacity(max_vertices: usize) -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            buffer: Vec::with_capacity(max_vertices * VectorVertex::FLOATS),
            max_vertices,
            overflowed: false,
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.overflowed = false;
    }

    pub fn vertex_count(&self) -> usize {
        self.buffer.len() / VectorVertex::FLOATS
    }

    pub fn max_vertices(&self) -> usize {
        self.max_vertices
    }

    /// The flat vertex buffer, `FLOATS` per vertex.
    pub fn vertices(&self) -> &[f32] {
        &self.buffer
    }

    /// Raw pointer to the flat buffer, for the host to read.
    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    /// Expand indexed geometry into the flat triangle list.
    fn flush_geometry(&mut self) {
        let incoming = self.geometry.indices.len();
        if self.vertex_count() + incoming > self.max_vertices {
            if !self.overflowed {
                log::warn!(
                    "vector buffer full ({} vertices), dropping shapes this frame",
                    self.max_vertices
                );
                self.overflowed = true;
            }
        } else {
            for idx in &self.geometry.indices {
                let v = &self.geometry.vertices[*idx as usize];
                self.buffer.extend_from_slice(&[v.x, v.y, v.r, v.g, v.b, v.a]);
            }
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    fn fill_path(&mut self, path: &Path, color: VectorColor) {
        let result = self.fill_tess.tessellate_path(
            path,
            &FillOptions::tolerance(TOLERANCE),
            &mut BuffersBuilder::new(&mut self.geometry, FillVertexCtor { color }),
        );
        if result.is_ok() {
            self.flush_geometry();
        }
    }

    fn stroke_path(&mut self, path: &Path, width: f32, color: VectorColor) {
        let result = self.stroke_tess.tessellate_path(
            path,
            &StrokeOptions::tolerance(TOLERANCE).with_line_width(width),
            &mut BuffersBuilder::new(&mut self.geometry, StrokeVertexCtor { color }),
        );
        if result.is_ok() {
            self.flush_geometry();
        }
    }

    /// Fill a closed polygon (convex or concave).
    pub fn fill_polygon(&mut self, points: &[Vec2], color: VectorColor) {
        if points.len() < 3 {
            return;
        }
        self.fill_path(&polyline_path(points, true), color);
    }

    /// Fill an axis-aligned rectangle with its top-left corner at `pos`.
    pub fn fill_rect(&mut self, pos: Vec2, width: f32, height: f32, color: VectorColor) {
        self.fill_polygon(&rect_corners(pos, width, height), color);
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: VectorColor) {
        if radius <= 0.0 {
            return;
        }
        self.fill_path(&circle_path(center, radius), color);
    }

    /// Fill an axis-aligned ellipse with half-axes `radii`.
    pub fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: VectorColor) {
        if radii.x <= 0.0 || radii.y <= 0.0 {
            return;
        }
        self.fill_path(&ellipse_path(center, radii), color);
    }

    pub fn stroke_ellipse(&mut self, center: Vec2, radii: Vec2, width: f32, color: VectorColor) {
        if radii.x <= 0.0 || radii.y <= 0.0 {
            return;
        }
        self.stroke_path(&ellipse_path(center, radii), width, color);
    }

    /// Stroke an open polyline.
    pub fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: VectorColor) {
        if points.len() < 2 {
            return;
        }
        self.stroke_path(&polyline_path(points, false), width, color);
    }

    pub fn stroke_polygon(&mut self, points: &[Vec2], width: f32, color: VectorColor) {
        if points.len() < 3 {
            return;
        }
        self.stroke_path(&polyline_path(points, true), width, color);
    }

    pub fn stroke_rect(&mut self, pos: Vec2, width: f32, height: f32, line_width: f32, color: VectorColor) {
        self.stroke_polygon(&rect_corners(pos, width, height), line_width, color);
    }

    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: VectorColor) {
        if radius <= 0.0 {
            return;
        }
        self.stroke_path(&circle_path(center, radius), width, color);
    }

    /// Stroke a circular arc starting at `start` radians and sweeping
    /// `sweep` radians (positive = clockwise in Y-down space).
    pub fn stroke_arc(
        &mut self,
        center: Vec2,
        radius: f32,
        start: f32,
        sweep: f32,
        width: f32,
        color: VectorColor,
    ) {
        if radius <= 0.0 || sweep == 0.0 {
            return;
        }
        let segments = ((radius * sweep.abs()) / ARC_SEGMENT_LEN).ceil().max(2.0) as usize;
        let points: Vec<Vec2> = (0..=segments)
            .map(|i| {
                let theta = start + sweep * (i as f32 / segments as f32);
                center + Vec2::from_angle(theta) * radius
            })
            .collect();
        self.stroke_polyline(&points, width, color);
    }
}

fn rect_corners(pos: Vec2, width: f32, height: f32) -> [Vec2; 4] {
    [
        pos,
        Vec2::new(pos.x + width, pos.y),
        Vec2::new(pos.x + width, pos.y + height),
        Vec2::new(pos.x, pos.y + height),
    ]
}

impl Default for VectorState {
    fn default() -> Self {
        Self::new()
    }
}
