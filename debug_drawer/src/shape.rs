//! Debug draw commands.
//!
//! A [`DrawCommand`] pairs one [`DrawShape`] with presentation, attribution and
//! a remaining lifetime. Each shape variant carries only the geometry that its
//! kind actually uses.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::ShapeError;
use crate::owner::OwnerHandle;

/// Log category used when a producer does not pick one.
pub const DEFAULT_LOG_CATEGORY: &str = "LogOmniDebugDraw";

/// Lifetime in seconds given to commands built with [`DrawCommand::new`].
pub const DEFAULT_LIFETIME: f32 = 3.0;

/// The closed set of shape kinds the registry knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Circle,
    Line,
    Box,
    Sphere,
    Capsule,
    Arrow,
    Text,
    Cone,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 8] = [
        ShapeKind::Circle,
        ShapeKind::Line,
        ShapeKind::Box,
        ShapeKind::Sphere,
        ShapeKind::Capsule,
        ShapeKind::Arrow,
        ShapeKind::Text,
        ShapeKind::Cone,
    ];
}

/// Geometry of a debug shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawShape {
    /// Circle in the plane spanned by the rotation's Y and Z axes.
    Circle {
        center: Vec3,
        radius: f32,
        rotation: Quat,
    },
    Line {
        start: Vec3,
        end: Vec3,
    },
    /// Box of half-extents `extent`. Identity rotation means axis aligned.
    Box {
        center: Vec3,
        extent: Vec3,
        rotation: Quat,
    },
    Sphere {
        center: Vec3,
        radius: f32,
    },
    /// Capsule with its bottom tip at `base`, extending `2 * half_height`
    /// (caps included) along the rotated +Z axis.
    Capsule {
        base: Vec3,
        radius: f32,
        half_height: f32,
        rotation: Quat,
    },
    Arrow {
        start: Vec3,
        end: Vec3,
        arrow_size: f32,
    },
    /// Floating label. The text itself is [`DrawCommand::text`].
    Text {
        location: Vec3,
    },
    /// Cone with apex at `origin`. Angles are half-angles in degrees.
    Cone {
        origin: Vec3,
        direction: Vec3,
        length: f32,
        angle_width: f32,
        angle_height: f32,
    },
}

impl DrawShape {
    pub fn circle(center: Vec3, radius: f32, rotation: Quat) -> Self {
        DrawShape::Circle {
            center,
            radius,
            rotation,
        }
    }

    pub fn line(start: Vec3, end: Vec3) -> Self {
        DrawShape::Line { start, end }
    }

    /// Axis-aligned box.
    pub fn aabb(center: Vec3, extent: Vec3) -> Self {
        DrawShape::Box {
            center,
            extent,
            rotation: Quat::IDENTITY,
        }
    }

    pub fn oriented_box(center: Vec3, extent: Vec3, rotation: Quat) -> Self {
        DrawShape::Box {
            center,
            extent,
            rotation,
        }
    }

    pub fn sphere(center: Vec3, radius: f32) -> Self {
        DrawShape::Sphere { center, radius }
    }

    pub fn capsule(base: Vec3, radius: f32, half_height: f32, rotation: Quat) -> Self {
        DrawShape::Capsule {
            base,
            radius,
            half_height,
            rotation,
        }
    }

    pub fn arrow(start: Vec3, end: Vec3, arrow_size: f32) -> Self {
        DrawShape::Arrow {
            start,
            end,
            arrow_size,
        }
    }

    pub fn text(location: Vec3) -> Self {
        DrawShape::Text { location }
    }

    pub fn cone(
        origin: Vec3,
        direction: Vec3,
        length: f32,
        angle_width: f32,
        angle_height: f32,
    ) -> Self {
        DrawShape::Cone {
            origin,
            direction,
            length,
            angle_width,
            angle_height,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            DrawShape::Circle { .. } => ShapeKind::Circle,
            DrawShape::Line { .. } => ShapeKind::Line,
            DrawShape::Box { .. } => ShapeKind::Box,
            DrawShape::Sphere { .. } => ShapeKind::Sphere,
            DrawShape::Capsule { .. } => ShapeKind::Capsule,
            DrawShape::Arrow { .. } => ShapeKind::Arrow,
            DrawShape::Text { .. } => ShapeKind::Text,
            DrawShape::Cone { .. } => ShapeKind::Cone,
        }
    }

    /// Check that every field can be rendered.
    ///
    /// All vectors and scalars must be finite, sizes must be non-negative and
    /// a cone needs a non-zero direction.
    pub fn validate(&self) -> Result<(), ShapeError> {
        let kind = self.kind();
        match *self {
            DrawShape::Circle {
                center,
                radius,
                rotation,
            } => {
                finite_vec(kind, "center", center)?;
                size(kind, "radius", radius)?;
                finite_quat(kind, rotation)
            }
            DrawShape::Line { start, end } => {
                finite_vec(kind, "start", start)?;
                finite_vec(kind, "end", end)
            }
            DrawShape::Box {
                center,
                extent,
                rotation,
            } => {
                finite_vec(kind, "center", center)?;
                finite_vec(kind, "extent", extent)?;
                size(kind, "extent", extent.min_element())?;
                finite_quat(kind, rotation)
            }
            DrawShape::Sphere { center, radius } => {
                finite_vec(kind, "center", center)?;
                size(kind, "radius", radius)
            }
            DrawShape::Capsule {
                base,
                radius,
                half_height,
                rotation,
            } => {
                finite_vec(kind, "base", base)?;
                size(kind, "radius", radius)?;
                size(kind, "half_height", half_height)?;
                finite_quat(kind, rotation)
            }
            DrawShape::Arrow {
                start,
                end,
                arrow_size,
            } => {
                finite_vec(kind, "start", start)?;
                finite_vec(kind, "end", end)?;
                size(kind, "arrow_size", arrow_size)
            }
            DrawShape::Text { location } => finite_vec(kind, "location", location),
            DrawShape::Cone {
                origin,
                direction,
                length,
                angle_width,
                angle_height,
            } => {
                finite_vec(kind, "origin", origin)?;
                finite_vec(kind, "direction", direction)?;
                if direction.length_squared() <= f32::EPSILON {
                    return Err(ShapeError::Degenerate {
                        kind,
                        field: "direction",
                    });
                }
                size(kind, "length", length)?;
                size(kind, "angle_width", angle_width)?;
                size(kind, "angle_height", angle_height)
            }
        }
    }
}

fn finite_vec(kind: ShapeKind, field: &'static str, v: Vec3) -> Result<(), ShapeError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(ShapeError::NonFinite { kind, field })
    }
}

fn finite_quat(kind: ShapeKind, q: Quat) -> Result<(), ShapeError> {
    if q.is_finite() {
        Ok(())
    } else {
        Err(ShapeError::NonFinite {
            kind,
            field: "rotation",
        })
    }
}

fn size(kind: ShapeKind, field: &'static str, value: f32) -> Result<(), ShapeError> {
    if !value.is_finite() {
        Err(ShapeError::NonFinite { kind, field })
    } else if value < 0.0 {
        Err(ShapeError::Negative { kind, field, value })
    } else {
        Ok(())
    }
}

/// Presentation shared by every shape kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawStyle {
    /// Linear RGBA.
    pub color: [f32; 4],
    pub depth_priority: u8,
    pub thickness: f32,
    pub wireframe: bool,
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0, 1.0],
            depth_priority: 0,
            thickness: 0.0,
            wireframe: false,
        }
    }
}

/// One debug visualization request.
#[derive(Debug, Clone)]
pub struct DrawCommand {
    pub shape: DrawShape,
    pub style: DrawStyle,
    /// Who asked for this shape. Attribution only.
    pub owner: Option<OwnerHandle>,
    pub log_category: String,
    pub text: String,
    pub add_message_to_log: bool,
    /// Seconds remaining. Decremented every tick.
    pub lifetime: f32,
}

impl DrawCommand {
    pub fn new(shape: DrawShape) -> Self {
        Self {
            shape,
            style: DrawStyle::default(),
            owner: None,
            log_category: DEFAULT_LOG_CATEGORY.to_owned(),
            text: String::new(),
            add_message_to_log: false,
            lifetime: DEFAULT_LIFETIME,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.style.color = color;
        self
    }

    pub fn with_thickness(mut self, thickness: f32) -> Self {
        self.style.thickness = thickness;
        self
    }

    pub fn with_depth_priority(mut self, depth_priority: u8) -> Self {
        self.style.depth_priority = depth_priority;
        self
    }

    pub fn with_wireframe(mut self, wireframe: bool) -> Self {
        self.style.wireframe = wireframe;
        self
    }

    pub fn with_style(mut self, style: DrawStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_owner(mut self, owner: OwnerHandle) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn with_log_category(mut self, category: impl Into<String>) -> Self {
        self.log_category = category.into();
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_message_to_log(mut self, enabled: bool) -> Self {
        self.add_message_to_log = enabled;
        self
    }

    pub fn with_lifetime(mut self, seconds: f32) -> Self {
        self.lifetime = seconds;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        let shapes = [
            DrawShape::circle(Vec3::ZERO, 1.0, Quat::IDENTITY),
            DrawShape::line(Vec3::ZERO, Vec3::X),
            DrawShape::aabb(Vec3::ZERO, Vec3::ONE),
            DrawShape::sphere(Vec3::ZERO, 1.0),
            DrawShape::capsule(Vec3::ZERO, 1.0, 2.0, Quat::IDENTITY),
            DrawShape::arrow(Vec3::ZERO, Vec3::Y, 0.2),
            DrawShape::text(Vec3::ZERO),
            DrawShape::cone(Vec3::ZERO, Vec3::Z, 1.0, 30.0, 30.0),
        ];
        let kinds: Vec<_> = shapes.iter().map(DrawShape::kind).collect();
        assert_eq!(kinds, ShapeKind::ALL);
        for shape in &shapes {
            assert!(shape.validate().is_ok(), "{shape:?}");
        }
    }

    #[test]
    fn command_defaults() {
        let cmd = DrawCommand::new(DrawShape::sphere(Vec3::ZERO, 10.0));
        assert_eq!(cmd.lifetime, DEFAULT_LIFETIME);
        assert_eq!(cmd.log_category, DEFAULT_LOG_CATEGORY);
        assert!(!cmd.add_message_to_log);
        assert!(cmd.owner.is_none());
        assert_eq!(cmd.kind(), ShapeKind::Sphere);
    }

    #[test]
    fn builder_sets_fields() {
        let cmd = DrawCommand::new(DrawShape::text(Vec3::ONE))
            .with_color([1.0, 0.0, 0.0, 1.0])
            .with_thickness(2.0)
            .with_depth_priority(1)
            .with_text("hello")
            .with_log_category("LogTrace")
            .with_message_to_log(true)
            .with_lifetime(0.5);
        assert_eq!(cmd.style.color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(cmd.style.thickness, 2.0);
        assert_eq!(cmd.style.depth_priority, 1);
        assert_eq!(cmd.text, "hello");
        assert_eq!(cmd.log_category, "LogTrace");
        assert!(cmd.add_message_to_log);
        assert_eq!(cmd.lifetime, 0.5);
    }

    #[test]
    fn negative_radius_rejected() {
        let err = DrawShape::sphere(Vec3::ZERO, -1.0).validate().unwrap_err();
        assert_eq!(
            err,
            ShapeError::Negative {
                kind: ShapeKind::Sphere,
                field: "radius",
                value: -1.0
            }
        );
    }

    #[test]
    fn nan_location_rejected() {
        let err = DrawShape::text(Vec3::new(f32::NAN, 0.0, 0.0))
            .validate()
            .unwrap_err();
        assert!(matches!(err, ShapeError::NonFinite { field: "location", .. }));
    }

    #[test]
    fn zero_cone_direction_rejected() {
        let err = DrawShape::cone(Vec3::ZERO, Vec3::ZERO, 1.0, 10.0, 10.0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ShapeError::Degenerate { field: "direction", .. }));
    }

    #[test]
    fn negative_box_extent_rejected() {
        let shape = DrawShape::aabb(Vec3::ZERO, Vec3::new(1.0, -2.0, 1.0));
        assert!(matches!(
            shape.validate(),
            Err(ShapeError::Negative { field: "extent", .. })
        ));
    }
}
