use std::f32::consts::{PI, TAU};

use glam::{Quat, Vec3};

use crate::drawer::DebugDrawerContext;

/// Cone half-angles are clamped below 90 degrees so the rim stays finite.
const MAX_CONE_ANGLE: f32 = 89.0_f32 * PI / 180.0;

impl DebugDrawerContext<'_> {
    pub fn draw_line(&mut self, start: Vec3, end: Vec3, color: [f32; 4]) {
        self.push_line(start, end, color);
    }

    /// Draw an oriented box given its center, half-extents and rotation (12 edges).
    pub fn draw_box(&mut self, center: Vec3, half_extents: Vec3, rotation: Quat, color: [f32; 4]) {
        let corner = |sx: f32, sy: f32, sz: f32| {
            center + rotation * (half_extents * Vec3::new(sx, sy, sz))
        };

        let c = [
            corner(-1.0, -1.0, -1.0),
            corner(1.0, -1.0, -1.0),
            corner(1.0, 1.0, -1.0),
            corner(-1.0, 1.0, -1.0),
            corner(-1.0, -1.0, 1.0),
            corner(1.0, -1.0, 1.0),
            corner(1.0, 1.0, 1.0),
            corner(-1.0, 1.0, 1.0),
        ];

        // Bottom face
        self.push_line(c[0], c[1], color);
        self.push_line(c[1], c[2], color);
        self.push_line(c[2], c[3], color);
        self.push_line(c[3], c[0], color);
        // Top face
        self.push_line(c[4], c[5], color);
        self.push_line(c[5], c[6], color);
        self.push_line(c[6], c[7], color);
        self.push_line(c[7], c[4], color);
        // Vertical edges
        self.push_line(c[0], c[4], color);
        self.push_line(c[1], c[5], color);
        self.push_line(c[2], c[6], color);
        self.push_line(c[3], c[7], color);
    }

    /// Draw a circle in the plane spanned by two orthogonal unit axes.
    pub fn draw_circle(
        &mut self,
        center: Vec3,
        radius: f32,
        axis_a: Vec3,
        axis_b: Vec3,
        color: [f32; 4],
    ) {
        let segments = self.segments;
        self.draw_arc(center, radius, axis_a, axis_b, 0.0, TAU, segments, color);
    }

    /// Draw part of a circle from `start_angle` to `end_angle` (radians).
    #[allow(clippy::too_many_arguments)]
    pub fn draw_arc(
        &mut self,
        center: Vec3,
        radius: f32,
        axis_a: Vec3,
        axis_b: Vec3,
        start_angle: f32,
        end_angle: f32,
        segments: u32,
        color: [f32; 4],
    ) {
        let segments = segments.max(1);
        let step = (end_angle - start_angle) / segments as f32;
        let point = |angle: f32| {
            let (sin, cos) = angle.sin_cos();
            center + (axis_a * cos + axis_b * sin) * radius
        };

        let mut prev = point(start_angle);
        for i in 1..=segments {
            let next = point(start_angle + step * i as f32);
            self.push_line(prev, next, color);
            prev = next;
        }
    }

    /// Draw a wireframe sphere using 3 great circles (XY, XZ, YZ planes).
    pub fn draw_sphere(&mut self, center: Vec3, radius: f32, color: [f32; 4]) {
        self.draw_circle(center, radius, Vec3::X, Vec3::Y, color);
        self.draw_circle(center, radius, Vec3::X, Vec3::Z, color);
        self.draw_circle(center, radius, Vec3::Y, Vec3::Z, color);
    }

    /// Draw a capsule around `center` along the rotated +Z axis.
    ///
    /// `half_height` is measured from the center to either tip, caps included.
    pub fn draw_capsule(
        &mut self,
        center: Vec3,
        half_height: f32,
        radius: f32,
        rotation: Quat,
        color: [f32; 4],
    ) {
        let axis_x = rotation * Vec3::X;
        let axis_y = rotation * Vec3::Y;
        let axis_z = rotation * Vec3::Z;

        let cylinder_half = (half_height - radius).max(0.0);
        let top = center + axis_z * cylinder_half;
        let bottom = center - axis_z * cylinder_half;

        self.draw_circle(top, radius, axis_x, axis_y, color);
        self.draw_circle(bottom, radius, axis_x, axis_y, color);

        for side in [axis_x, -axis_x, axis_y, -axis_y] {
            self.push_line(bottom + side * radius, top + side * radius, color);
        }

        let half_segments = (self.segments / 2).max(1);
        self.draw_arc(top, radius, axis_x, axis_z, 0.0, PI, half_segments, color);
        self.draw_arc(top, radius, axis_y, axis_z, 0.0, PI, half_segments, color);
        self.draw_arc(bottom, radius, axis_x, -axis_z, 0.0, PI, half_segments, color);
        self.draw_arc(bottom, radius, axis_y, -axis_z, 0.0, PI, half_segments, color);
    }

    /// Draw a line with a four-fin arrow head at `end`.
    pub fn draw_arrow(&mut self, start: Vec3, end: Vec3, arrow_size: f32, color: [f32; 4]) {
        self.push_line(start, end, color);

        let dir = (end - start).normalize_or_zero();
        if dir == Vec3::ZERO || arrow_size <= 0.0 {
            return;
        }
        let (side_a, side_b) = dir.any_orthonormal_pair();
        let back = end - dir * arrow_size;
        let spread = arrow_size * 0.5;
        for side in [side_a, -side_a, side_b, -side_b] {
            self.push_line(end, back + side * spread, color);
        }
    }

    /// Draw a cone with its apex at `origin`, opening along `direction`.
    ///
    /// Half-angles are in radians. The rim is an ellipse when they differ.
    pub fn draw_cone(
        &mut self,
        origin: Vec3,
        direction: Vec3,
        length: f32,
        angle_width: f32,
        angle_height: f32,
        color: [f32; 4],
    ) {
        let dir = direction.normalize_or_zero();
        if dir == Vec3::ZERO {
            return;
        }
        let (axis_w, axis_h) = dir.any_orthonormal_pair();
        let radius_w = length * angle_width.clamp(0.0, MAX_CONE_ANGLE).tan();
        let radius_h = length * angle_height.clamp(0.0, MAX_CONE_ANGLE).tan();
        let rim_center = origin + dir * length;

        let segments = self.segments;
        let rim_point = |i: u32| {
            let (sin, cos) = (i as f32 * TAU / segments as f32).sin_cos();
            rim_center + axis_w * (radius_w * cos) + axis_h * (radius_h * sin)
        };

        let mut prev = rim_point(0);
        for i in 1..=segments {
            let next = rim_point(i);
            self.push_line(prev, next, color);
            self.push_line(origin, next, color);
            prev = next;
        }
    }

    /// Place a text label at `location`.
    pub fn draw_text(&mut self, location: Vec3, text: &str, color: [f32; 4], scale: f32) {
        self.push_label(location, text, color, scale);
    }
}
