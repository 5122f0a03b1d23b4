//! Debug shape registry for Omni debug drawing.
//!
//! Keeps a keyed set of debug shapes alive for a number of seconds, drawing
//! each of them every frame into two independent sinks:
//!
//! - [`DebugDrawer`]: the immediate overlay. Line-list vertices and text labels
//!   for the current frame only, double-buffered with one-frame latency.
//! - [`VisualLog`]: a persistent, shape-typed log for offline review, filtered
//!   by category and owner, exportable as RON.
//!
//! # Architecture
//!
//! - [`DebugShapeRegistry`]: owns the shapes, ticks them, evicts expired ones
//! - [`DrawCommand`] / [`DrawShape`]: one request, geometry typed per [`ShapeKind`]
//! - [`ShapeSender`]: queue for producers running on other threads
//! - [`DebugDrawConfig`]: sink toggles, loaded from TOML or built in code
//!
//! # Usage
//!
//! ```ignore
//! let config = DebugDrawConfig::load_or_default(Path::new("debug_draw.toml"));
//! let drawer = DebugDrawer::new();
//! let mut visual_log = VisualLog::from_config(&config);
//! let mut registry = DebugShapeRegistry::new(config);
//!
//! registry.add_shape(
//!     DrawCommand::new(DrawShape::sphere(Vec3::ZERO, 10.0)).with_lifetime(2.0),
//!     "target",
//! );
//!
//! // Each frame:
//! drawer.advance_frame();
//! visual_log.advance_frame();
//! registry.tick(delta_time, &drawer, &mut visual_log);
//! let overlay = drawer.take_render_data(); // previous frame, for the host renderer
//! ```

mod config;
mod draw_api;
mod drawer;
mod error;
mod message;
mod owner;
mod queue;
mod registry;
mod shape;
mod vertex;
mod visual_log;

pub use config::DebugDrawConfig;
pub use drawer::{DebugDrawer, DebugDrawerContext, OverlayFrame};
pub use error::{DebugDrawError, DebugDrawResult, ShapeError};
pub use message::summarize;
pub use owner::{DebugOwner, OwnerHandle};
pub use queue::ShapeSender;
pub use registry::{DebugShapeRegistry, ShapeKey, TickStats};
pub use shape::{
    DrawCommand, DrawShape, DrawStyle, ShapeKind, DEFAULT_LIFETIME, DEFAULT_LOG_CATEGORY,
};
pub use vertex::{DebugLabel, DebugVertex};
pub use visual_log::{VisualLog, VisualLogEntry, VisualLogShape, VisualLogSink};

pub use glam::{Quat, Vec3};
