/// An overlay vertex: position + color.
///
/// Vertices form a line list. Every pair of consecutive vertices is one
/// segment, ready to be uploaded as-is by the host renderer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DebugVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// A text label anchored at a world position.
///
/// Labels are kept apart from the line list since the host draws them with
/// its own text renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct DebugLabel {
    pub position: [f32; 3],
    pub text: String,
    pub color: [f32; 4],
    pub scale: f32,
}
