use std::sync::atomic::{AtomicU64, Ordering};

use glam::Vec3;
use parking_lot::Mutex;

use crate::vertex::{DebugLabel, DebugVertex};

/// Overlay output accumulated during one frame.
#[derive(Debug, Default)]
pub struct OverlayFrame {
    pub vertices: Vec<DebugVertex>,
    pub labels: Vec<DebugLabel>,
}

impl OverlayFrame {
    fn clear(&mut self) {
        self.vertices.clear();
        self.labels.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.labels.is_empty()
    }

    /// Number of line segments in the frame.
    pub fn line_count(&self) -> usize {
        self.vertices.len() / 2
    }
}

/// Immediate overlay sink.
///
/// Nothing drawn here persists: each frame's output is thrown away once the
/// next-but-one frame starts. Shapes that must stay visible are redrawn every
/// frame by the [`DebugShapeRegistry`](crate::DebugShapeRegistry).
///
/// Double-buffered:
/// - `frames[current_frame % 2]` is written by [`DebugDrawerContext`]s
/// - `frames[(current_frame + 1) % 2]` holds the previous frame, ready for the host renderer
///
/// Call [`advance_frame`](Self::advance_frame) once per frame before creating any contexts.
pub struct DebugDrawer {
    current_frame: AtomicU64,
    frames: Mutex<[OverlayFrame; 2]>,
}

impl DebugDrawer {
    pub fn new() -> Self {
        Self {
            current_frame: AtomicU64::new(0),
            frames: Mutex::new([OverlayFrame::default(), OverlayFrame::default()]),
        }
    }

    pub fn current_frame(&self) -> u64 {
        self.current_frame.load(Ordering::Acquire)
    }

    /// Advance to the next frame and clear its write buffer.
    pub fn advance_frame(&self) {
        let new_frame = self.current_frame.load(Ordering::Acquire) + 1;
        let write_index = (new_frame % 2) as usize;
        {
            let mut frames = self.frames.lock();
            frames[write_index].clear();
        }
        self.current_frame.store(new_frame, Ordering::Release);
    }

    /// Create a drawing context for the current frame.
    ///
    /// The context collects output locally and flushes it on [`Drop`], so the
    /// mutex is only held briefly.
    pub fn context(&self) -> DebugDrawerContext<'_> {
        DebugDrawerContext {
            drawer: self,
            frame: self.current_frame(),
            segments: 16,
            output: OverlayFrame::default(),
        }
    }

    /// Take the previous frame's output.
    ///
    /// Returns what was drawn during frame N-1 while frame N is being
    /// collected. The stored buffer is left empty.
    pub fn take_render_data(&self) -> OverlayFrame {
        let frame = self.current_frame();
        let render_index = ((frame + 1) % 2) as usize;
        let mut frames = self.frames.lock();
        std::mem::take(&mut frames[render_index])
    }

    fn flush(&self, frame: u64, output: OverlayFrame) {
        if output.is_empty() {
            return;
        }
        let current = self.current_frame();
        if frame != current {
            log::warn!(
                "DebugDrawerContext flushed for frame {} but current is {}; discarding",
                frame,
                current
            );
            return;
        }
        let write_index = (frame % 2) as usize;
        let mut frames = self.frames.lock();
        frames[write_index].vertices.extend(output.vertices);
        frames[write_index].labels.extend(output.labels);
    }
}

impl Default for DebugDrawer {
    fn default() -> Self {
        Self::new()
    }
}

/// A short-lived overlay drawing context.
///
/// Obtain via [`DebugDrawer::context()`]. Flushes to the parent drawer on drop.
pub struct DebugDrawerContext<'a> {
    drawer: &'a DebugDrawer,
    frame: u64,
    pub(crate) segments: u32,
    pub(crate) output: OverlayFrame,
}

impl DebugDrawerContext<'_> {
    /// Segment count used for round shapes drawn through this context.
    pub fn with_segments(mut self, segments: u32) -> Self {
        self.segments = segments.max(4);
        self
    }

    #[inline]
    pub fn push_line(&mut self, start: Vec3, end: Vec3, color: [f32; 4]) {
        self.output.vertices.push(DebugVertex {
            position: start.to_array(),
            color,
        });
        self.output.vertices.push(DebugVertex {
            position: end.to_array(),
            color,
        });
    }

    pub fn push_label(&mut self, position: Vec3, text: &str, color: [f32; 4], scale: f32) {
        self.output.labels.push(DebugLabel {
            position: position.to_array(),
            text: text.to_owned(),
            color,
            scale,
        });
    }

    /// Segments pushed so far and not yet flushed.
    pub fn pending_lines(&self) -> usize {
        self.output.line_count()
    }
}

impl Drop for DebugDrawerContext<'_> {
    fn drop(&mut self) {
        let output = std::mem::take(&mut self.output);
        self.drawer.flush(self.frame, output);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

    #[test]
    fn test_new_drawer() {
        let drawer = DebugDrawer::new();
        assert_eq!(drawer.current_frame(), 0);
    }

    #[test]
    fn test_advance_frame() {
        let drawer = DebugDrawer::new();
        drawer.advance_frame();
        assert_eq!(drawer.current_frame(), 1);
        drawer.advance_frame();
        assert_eq!(drawer.current_frame(), 2);
    }

    #[test]
    fn test_context_flush() {
        let drawer = DebugDrawer::new();
        drawer.advance_frame();

        {
            let mut ctx = drawer.context();
            ctx.push_line(Vec3::ZERO, Vec3::ONE, RED);
            ctx.push_label(Vec3::ONE, "hit", RED, 1.0);
        }

        drawer.advance_frame();

        let data = drawer.take_render_data();
        assert_eq!(data.vertices.len(), 2);
        assert_eq!(data.labels.len(), 1);
        assert_eq!(data.labels[0].text, "hit");
    }

    #[test]
    fn test_output_lasts_one_frame() {
        let drawer = DebugDrawer::new();
        drawer.advance_frame();
        drawer.context().push_line(Vec3::ZERO, Vec3::X, RED);
        drawer.advance_frame();
        drawer.advance_frame();
        assert!(drawer.take_render_data().is_empty());
    }

    #[test]
    fn test_stale_context_discarded() {
        let drawer = DebugDrawer::new();
        let mut ctx = drawer.context();
        ctx.push_line(Vec3::ZERO, Vec3::ONE, RED);

        drawer.advance_frame();
        drawer.advance_frame();
        drop(ctx);

        assert!(drawer.take_render_data().is_empty());
    }

    #[test]
    fn test_multiple_contexts() {
        let drawer = DebugDrawer::new();
        drawer.advance_frame();

        {
            let mut ctx1 = drawer.context();
            ctx1.push_line(Vec3::ZERO, Vec3::ONE, RED);

            let mut ctx2 = drawer.context();
            ctx2.push_line(Vec3::splat(2.0), Vec3::splat(3.0), RED);
        }

        drawer.advance_frame();
        assert_eq!(drawer.take_render_data().line_count(), 2);
    }
}
