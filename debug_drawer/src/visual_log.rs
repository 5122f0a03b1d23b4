//! Persistent, shape-typed debug log.
//!
//! Where the overlay forgets everything after a frame, the visual log keeps
//! one [`VisualLogEntry`] per shape per tick for offline review. Entries carry
//! the producer's log category and owner name so they can be filtered later.

use std::collections::VecDeque;
use std::path::Path;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::DebugDrawConfig;
use crate::error::{DebugDrawError, DebugDrawResult};
use crate::shape::{DrawCommand, DrawShape, ShapeKind};

/// Geometry primitives the visual log understands.
///
/// Lines are stored as thin capsules and text as zero-radius spheres, since
/// the log has no native primitive for either.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum VisualLogShape {
    Disc {
        center: Vec3,
        normal: Vec3,
        radius: f32,
        thickness: f32,
    },
    Box {
        center: Vec3,
        extent: Vec3,
        rotation: Quat,
    },
    Sphere {
        center: Vec3,
        radius: f32,
    },
    /// Capsule with its bottom tip at `base`.
    Capsule {
        base: Vec3,
        half_height: f32,
        radius: f32,
        rotation: Quat,
    },
    Arrow {
        start: Vec3,
        end: Vec3,
        arrow_size: f32,
    },
    /// Angles are half-angles in degrees.
    Cone {
        origin: Vec3,
        direction: Vec3,
        length: f32,
        angle_width: f32,
        angle_height: f32,
    },
}

impl VisualLogShape {
    pub fn from_shape(shape: &DrawShape, thickness: f32) -> Self {
        match *shape {
            DrawShape::Circle {
                center,
                radius,
                rotation,
            } => VisualLogShape::Disc {
                center,
                normal: rotation * Vec3::X,
                radius,
                thickness,
            },
            DrawShape::Line { start, end } => {
                let delta = end - start;
                let dir = delta.normalize_or_zero();
                let rotation = if dir == Vec3::ZERO {
                    Quat::IDENTITY
                } else {
                    Quat::from_rotation_arc(Vec3::Z, dir)
                };
                VisualLogShape::Capsule {
                    base: start,
                    half_height: delta.length() * 0.5,
                    radius: thickness,
                    rotation,
                }
            }
            DrawShape::Box {
                center,
                extent,
                rotation,
            } => VisualLogShape::Box {
                center,
                extent,
                rotation,
            },
            DrawShape::Sphere { center, radius } => VisualLogShape::Sphere { center, radius },
            DrawShape::Capsule {
                base,
                radius,
                half_height,
                rotation,
            } => VisualLogShape::Capsule {
                base,
                half_height,
                radius,
                rotation,
            },
            DrawShape::Arrow {
                start,
                end,
                arrow_size,
            } => VisualLogShape::Arrow {
                start,
                end,
                arrow_size,
            },
            DrawShape::Text { location } => VisualLogShape::Sphere {
                center: location,
                radius: 0.0,
            },
            DrawShape::Cone {
                origin,
                direction,
                length,
                angle_width,
                angle_height,
            } => VisualLogShape::Cone {
                origin,
                direction,
                length,
                angle_width,
                angle_height,
            },
        }
    }
}

/// One recorded shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualLogEntry {
    /// Frame the entry was recorded in. Stamped by the sink.
    pub frame: u64,
    pub category: String,
    /// Owner name at record time, if the owner still existed.
    pub owner: Option<String>,
    pub kind: ShapeKind,
    pub shape: VisualLogShape,
    pub color: [f32; 4],
    pub wireframe: bool,
    pub label: String,
}

impl VisualLogEntry {
    pub fn from_command(command: &DrawCommand) -> Self {
        Self {
            frame: 0,
            category: command.log_category.clone(),
            owner: command.owner.as_ref().and_then(|owner| owner.name()),
            kind: command.kind(),
            shape: VisualLogShape::from_shape(&command.shape, command.style.thickness),
            color: command.style.color,
            wireframe: command.style.wireframe,
            label: command.text.clone(),
        }
    }
}

/// Destination for visual log entries.
pub trait VisualLogSink {
    fn record(&mut self, entry: VisualLogEntry);
}

impl VisualLogSink for Vec<VisualLogEntry> {
    fn record(&mut self, entry: VisualLogEntry) {
        self.push(entry);
    }
}

/// In-memory visual log with a bounded capacity.
///
/// Append-only from the registry's point of view. Once full, the oldest
/// entries are dropped first.
#[derive(Debug)]
pub struct VisualLog {
    entries: VecDeque<VisualLogEntry>,
    max_capacity: usize,
    frame: u64,
}

impl VisualLog {
    pub fn new(max_capacity: usize) -> Self {
        let max_capacity = max_capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(max_capacity.min(1024)),
            max_capacity,
            frame: 0,
        }
    }

    pub fn from_config(config: &DebugDrawConfig) -> Self {
        Self::new(config.visual_log_capacity)
    }

    pub fn entries(&self) -> &VecDeque<VisualLogEntry> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Start stamping subsequent entries with the next frame number.
    pub fn advance_frame(&mut self) {
        self.frame += 1;
    }

    pub fn by_category<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a VisualLogEntry> + 'a {
        self.entries.iter().filter(move |e| e.category == category)
    }

    pub fn by_owner<'a>(&'a self, owner: &'a str) -> impl Iterator<Item = &'a VisualLogEntry> + 'a {
        self.entries
            .iter()
            .filter(move |e| e.owner.as_deref() == Some(owner))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn to_ron_string(&self) -> DebugDrawResult<String> {
        let text = ron::ser::to_string_pretty(&self.entries, ron::ser::PrettyConfig::default())?;
        Ok(text)
    }

    pub fn save_ron(&self, path: &Path) -> DebugDrawResult<()> {
        let text = self.to_ron_string()?;
        std::fs::write(path, text).map_err(|source| DebugDrawError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!(
            "Saved {} visual log entries to {}",
            self.entries.len(),
            path.display()
        );
        Ok(())
    }
}

impl Default for VisualLog {
    fn default() -> Self {
        Self::new(10_000)
    }
}

impl VisualLogSink for VisualLog {
    fn record(&mut self, mut entry: VisualLogEntry) {
        entry.frame = self.frame;
        if self.entries.len() >= self.max_capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }
}
