//! Renderer boundary: the backend trait and the plain-data frame
//! submission the application hands it every tick.

use glam::{Mat4, Vec3};
use thiserror::Error;

/// Index into the renderer's material table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub u8);

/// Material drawn on sub-cube faces that do not lie on the puzzle hull.
pub const INNER_MATERIAL: MaterialId = MaterialId(6);

/// RGBA face colors, indexed by `MaterialId`. The last entry is the inner
/// material.
pub const FACE_COLORS: [[f32; 4]; 7] = [
    [1.0, 1.0, 1.0, 1.0],   // front: white
    [1.0, 1.0, 0.0, 1.0],   // back: yellow
    [1.0, 0.0, 0.0, 1.0],   // left: red
    [1.0, 0.55, 0.0, 1.0],  // right: orange
    [0.0, 0.8, 0.0, 1.0],   // top: green
    [0.0, 0.35, 1.0, 1.0],  // bottom: blue
    [1.0, 1.0, 1.0, 1.0],   // inner
];

/// One sub-cube, ready to draw.
#[derive(Debug, Clone, Copy)]
pub struct CubeSubmission {
    /// Model-to-world transform (accumulated twists).
    pub world: Mat4,
    pub min_corner: Vec3,
    pub max_corner: Vec3,
    /// Material per face in face-index order; `None` means the face is
    /// interior and takes [`INNER_MATERIAL`].
    pub face_materials: [Option<MaterialId>; 6],
}

/// Everything a backend needs to draw one frame.
#[derive(Debug, Clone)]
pub struct FrameSubmission {
    pub view: Mat4,
    pub projection: Mat4,
    pub cubes: Vec<CubeSubmission>,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render backend '{backend}' failed to initialize: {reason}")]
    Initialization { backend: &'static str, reason: String },
    #[error("draw failed: {0}")]
    Draw(String),
}

/// Interface every render backend implements.
///
/// The application never talks to a graphics device directly; it builds a
/// [`FrameSubmission`] and hands it across this seam.
pub trait RenderBackend {
    fn name(&self) -> &'static str;

    fn initialize(&mut self) -> Result<(), RenderError>;

    fn resize(&mut self, width: u32, height: u32);

    fn draw(&mut self, frame: &FrameSubmission) -> Result<(), RenderError>;
}

/// Backend that draws nothing. Used by tests and headless runs.
#[derive(Debug, Default)]
pub struct NullRenderer {
    frames_drawn: u64,
}

impl NullRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }
}

impl RenderBackend for NullRenderer {
    fn name(&self) -> &'static str {
        "null"
    }

    fn initialize(&mut self) -> Result<(), RenderError> {
        tracing::info!(backend = self.name(), "render backend initialized");
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        tracing::debug!(width, height, "null renderer resized");
    }

    fn draw(&mut self, frame: &FrameSubmission) -> Result<(), RenderError> {
        self.frames_drawn += 1;
        tracing::trace!(cubes = frame.cubes.len(), "null renderer frame");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_renderer_counts_frames() {
        let mut r = NullRenderer::new();
        r.initialize().unwrap();
        let frame = FrameSubmission {
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            cubes: Vec::new(),
        };
        r.draw(&frame).unwrap();
        r.draw(&frame).unwrap();
        assert_eq!(r.frames_drawn(), 2);
    }

    #[test]
    fn material_table_covers_all_ids() {
        assert_eq!(FACE_COLORS.len(), 7);
        assert_eq!(INNER_MATERIAL.0 as usize, FACE_COLORS.len() - 1);
    }
}
