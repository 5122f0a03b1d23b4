use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::sync::mpsc;

use glam::Vec3;

use crate::config::DebugDrawConfig;
use crate::drawer::{DebugDrawer, DebugDrawerContext};
use crate::message;
use crate::queue::{ShapeRequest, ShapeSender};
use crate::shape::{DrawCommand, DrawShape};
use crate::visual_log::{VisualLogEntry, VisualLogSink};

/// Name of a registry entry.
///
/// An empty key means "no key": the registry replaces it with a freshly
/// generated UUID so the new shape never overwrites an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ShapeKey(String);

impl ShapeKey {
    /// A new random key (32 hex digits).
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn or_generate(self) -> Self {
        if self.is_empty() {
            Self::generate()
        } else {
            self
        }
    }
}

impl From<&str> for ShapeKey {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

impl From<String> for ShapeKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<Option<&str>> for ShapeKey {
    fn from(key: Option<&str>) -> Self {
        key.map(ShapeKey::from).unwrap_or_default()
    }
}

impl Borrow<str> for ShapeKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShapeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a single [`DebugShapeRegistry::tick`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Entries live at the start of the tick.
    pub visited: usize,
    /// Entries drawn into the overlay.
    pub drawn: usize,
    /// Entries appended to the visual log.
    pub recorded: usize,
    /// Summary lines emitted through `log`.
    pub messages: usize,
    /// Entries with invalid geometry that were not rendered.
    pub skipped: usize,
    /// Entries removed at the end of the tick.
    pub expired: usize,
}

/// Keyed set of live debug shapes with timed eviction.
///
/// Every [`tick`](Self::tick) draws each live shape into the overlay and the
/// visual log (each gated by [`DebugDrawConfig`]), ages it by the elapsed time
/// and evicts the ones whose lifetime has run out. A shape keeps being redrawn
/// every tick until then, since the overlay itself only lasts one frame.
///
/// The registry is not `Sync`. Producers on other threads go through
/// [`sender`](Self::sender); their requests are applied at the start of the
/// next tick.
pub struct DebugShapeRegistry {
    shapes: HashMap<ShapeKey, DrawCommand>,
    config: DebugDrawConfig,
    sender: mpsc::Sender<ShapeRequest>,
    receiver: mpsc::Receiver<ShapeRequest>,
}

impl DebugShapeRegistry {
    pub fn new(config: DebugDrawConfig) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            shapes: HashMap::new(),
            config,
            sender,
            receiver,
        }
    }

    pub fn config(&self) -> &DebugDrawConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: DebugDrawConfig) {
        self.config = config;
    }

    /// Handle for queueing shapes from other threads.
    pub fn sender(&self) -> ShapeSender {
        ShapeSender::new(self.sender.clone())
    }

    /// Insert `command` under `key`, replacing any shape already stored there.
    ///
    /// An empty key is replaced by a generated one. Returns the key used.
    pub fn add_shape(&mut self, command: DrawCommand, key: impl Into<ShapeKey>) -> ShapeKey {
        let key = key.into().or_generate();
        if self.shapes.insert(key.clone(), command).is_some() {
            log::trace!("Replaced debug shape '{key}'");
        }
        key
    }

    /// Insert `command` under a generated key.
    pub fn add_shape_auto(&mut self, command: DrawCommand) -> ShapeKey {
        self.add_shape(command, ShapeKey::default())
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.shapes.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&DrawCommand> {
        self.shapes.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ShapeKey, &DrawCommand)> {
        self.shapes.iter()
    }

    pub fn remove(&mut self, key: &str) -> Option<DrawCommand> {
        self.shapes.remove(key)
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Advance all shapes by `delta_time` seconds.
    ///
    /// Queued requests are applied first. Then every live shape is drawn into
    /// the current frame of `drawer` and recorded into `visual_log`, its
    /// summary is logged if requested, and its lifetime is reduced. Shapes
    /// whose lifetime reaches zero or below, or is NaN, are removed after all
    /// of them have been visited.
    ///
    /// A zero, negative or non-finite `delta_time` counts as no time passing:
    /// shapes are still drawn but nothing ages or expires.
    pub fn tick(
        &mut self,
        delta_time: f32,
        drawer: &DebugDrawer,
        visual_log: &mut impl VisualLogSink,
    ) -> TickStats {
        self.drain_requests();
        let elapsed = effective_delta(delta_time);

        let mut stats = TickStats::default();
        let mut expired = Vec::new();
        {
            let mut overlay = drawer.context().with_segments(self.config.circle_segments);
            for (key, command) in self.shapes.iter_mut() {
                stats.visited += 1;

                match command.shape.validate() {
                    Ok(()) => {
                        if self.config.draw_debug_shapes {
                            draw_overlay(&mut overlay, command);
                            stats.drawn += 1;
                        }
                        if self.config.record_visual_log {
                            visual_log.record(VisualLogEntry::from_command(command));
                            stats.recorded += 1;
                        }
                        if command.add_message_to_log {
                            message::emit(command);
                            stats.messages += 1;
                        }
                    }
                    Err(err) => {
                        log::error!("Skipping invalid debug shape '{key}': {err}");
                        if cfg!(debug_assertions) {
                            panic!("invalid debug shape '{key}': {err}");
                        }
                        stats.skipped += 1;
                    }
                }

                if elapsed > 0.0 {
                    command.lifetime -= elapsed;
                    if command.lifetime.is_nan() {
                        log::warn!("Debug shape '{key}' has a NaN lifetime; expiring it");
                    }
                    if command.lifetime.is_nan() || command.lifetime <= 0.0 {
                        expired.push(key.clone());
                    }
                }
            }
        }

        for key in &expired {
            self.shapes.remove(key);
        }
        stats.expired = expired.len();
        stats
    }

    fn drain_requests(&mut self) {
        for request in self.receiver.try_iter() {
            if self.shapes.insert(request.key.clone(), request.command).is_some() {
                log::trace!("Replaced debug shape '{}' from queue", request.key);
            }
        }
    }
}

impl Default for DebugShapeRegistry {
    fn default() -> Self {
        Self::new(DebugDrawConfig::default())
    }
}

fn effective_delta(delta_time: f32) -> f32 {
    if !delta_time.is_finite() {
        log::warn!("Non-finite debug draw delta time {delta_time}; treating as 0");
        0.0
    } else if delta_time < 0.0 {
        log::warn!("Negative debug draw delta time {delta_time}; treating as 0");
        0.0
    } else {
        delta_time
    }
}

fn draw_overlay(overlay: &mut DebugDrawerContext<'_>, command: &DrawCommand) {
    let color = command.style.color;
    match command.shape {
        DrawShape::Circle {
            center,
            radius,
            rotation,
        } => overlay.draw_circle(center, radius, rotation * Vec3::Y, rotation * Vec3::Z, color),
        DrawShape::Line { start, end } => overlay.draw_line(start, end, color),
        DrawShape::Box {
            center,
            extent,
            rotation,
        } => overlay.draw_box(center, extent, rotation, color),
        DrawShape::Sphere { center, radius } => overlay.draw_sphere(center, radius, color),
        DrawShape::Capsule {
            base,
            radius,
            half_height,
            rotation,
        } => {
            // Stored by its base, drawn around its center.
            let center = base + rotation * Vec3::Z * half_height;
            overlay.draw_capsule(center, half_height, radius, rotation, color);
        }
        DrawShape::Arrow {
            start,
            end,
            arrow_size,
        } => overlay.draw_arrow(start, end, arrow_size, color),
        DrawShape::Text { location } => {
            let scale = if command.style.thickness > 0.0 {
                command.style.thickness
            } else {
                1.0
            };
            overlay.draw_text(location, &command.text, color, scale);
        }
        DrawShape::Cone {
            origin,
            direction,
            length,
            angle_width,
            angle_height,
        } => overlay.draw_cone(
            origin,
            direction,
            length,
            angle_width.to_radians(),
            angle_height.to_radians(),
            color,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visual_log::VisualLog;

    fn sphere(radius: f32, lifetime: f32) -> DrawCommand {
        DrawCommand::new(DrawShape::sphere(Vec3::ZERO, radius)).with_lifetime(lifetime)
    }

    #[test]
    fn empty_key_is_generated() {
        let mut registry = DebugShapeRegistry::default();
        let key = registry.add_shape(sphere(1.0, 1.0), "");
        assert_eq!(key.as_str().len(), 32);
        assert!(registry.contains(key.as_str()));
    }

    #[test]
    fn none_key_is_generated() {
        let mut registry = DebugShapeRegistry::default();
        let key = registry.add_shape(sphere(1.0, 1.0), None::<&str>);
        assert!(!key.is_empty());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn same_key_replaces() {
        let mut registry = DebugShapeRegistry::default();
        registry.add_shape(sphere(1.0, 0.5), "hit");
        registry.add_shape(sphere(2.0, 5.0), "hit");
        assert_eq!(registry.len(), 1);
        let cmd = registry.get("hit").unwrap();
        assert_eq!(cmd.lifetime, 5.0);
        assert_eq!(cmd.shape, DrawShape::sphere(Vec3::ZERO, 2.0));
    }

    #[test]
    fn lifetime_counts_down_then_expires() {
        let drawer = DebugDrawer::new();
        let mut log = VisualLog::default();
        let mut registry = DebugShapeRegistry::default();
        registry.add_shape(sphere(1.0, 3.0), "s");

        for expected in [2.0, 1.0] {
            let stats = registry.tick(1.0, &drawer, &mut log);
            assert_eq!(stats.expired, 0);
            assert_eq!(registry.get("s").unwrap().lifetime, expected);
        }
        let stats = registry.tick(1.0, &drawer, &mut log);
        assert_eq!(stats.expired, 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn zero_lifetime_goes_on_next_tick() {
        let drawer = DebugDrawer::new();
        let mut registry = DebugShapeRegistry::default();
        registry.add_shape(sphere(1.0, 0.0), "flash");
        let stats = registry.tick(0.016, &drawer, &mut Vec::new());
        assert_eq!(stats.drawn, 1);
        assert_eq!(stats.expired, 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn degenerate_delta_ages_nothing() {
        let drawer = DebugDrawer::new();
        let mut registry = DebugShapeRegistry::default();
        registry.add_shape(sphere(1.0, 1.0), "a");
        registry.add_shape(sphere(1.0, 0.0), "b");

        for dt in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let stats = registry.tick(dt, &drawer, &mut Vec::new());
            assert_eq!(stats.expired, 0);
            assert_eq!(stats.drawn, 2);
        }
        assert_eq!(registry.get("a").unwrap().lifetime, 1.0);
        assert_eq!(registry.get("b").unwrap().lifetime, 0.0);
    }

    #[test]
    fn nan_lifetime_expires_on_first_aging_tick() {
        let drawer = DebugDrawer::new();
        let mut log = Vec::new();
        let mut registry = DebugShapeRegistry::default();
        registry.add_shape(sphere(1.0, f32::NAN), "nan");
        registry.add_shape(sphere(1.0, 5.0), "kept");

        let stats = registry.tick(0.0, &drawer, &mut log);
        assert_eq!(stats.expired, 0);
        assert!(registry.contains("nan"));

        let stats = registry.tick(1.0, &drawer, &mut log);
        assert_eq!(stats.drawn, 2);
        assert_eq!(stats.expired, 1);
        assert!(!registry.contains("nan"));
        assert!(registry.contains("kept"));

        registry.tick(1.0, &drawer, &mut log);
        assert_eq!(log.len(), 5);
    }

    #[test]
    fn capsule_overlay_is_centered_above_base() {
        let drawer = DebugDrawer::new();
        let mut registry = DebugShapeRegistry::default();
        registry.add_shape(
            DrawCommand::new(DrawShape::capsule(
                Vec3::ZERO,
                1.0,
                3.0,
                glam::Quat::IDENTITY,
            )),
            "c",
        );
        registry.tick(1.0, &drawer, &mut Vec::new());
        drawer.advance_frame();

        let data = drawer.take_render_data();
        let (min_z, max_z) = data
            .vertices
            .iter()
            .map(|v| v.position[2])
            .fold((f32::MAX, f32::MIN), |(lo, hi), z| (lo.min(z), hi.max(z)));
        assert!(min_z.abs() < 1e-4);
        assert!((max_z - 6.0).abs() < 1e-4);
    }

    #[test]
    fn queued_requests_apply_on_tick() {
        let drawer = DebugDrawer::new();
        let mut registry = DebugShapeRegistry::default();
        let sender = registry.sender();
        sender.add_shape(sphere(1.0, 2.0), "queued");
        assert!(registry.is_empty());

        let stats = registry.tick(0.5, &drawer, &mut Vec::new());
        assert_eq!(stats.visited, 1);
        assert_eq!(registry.get("queued").unwrap().lifetime, 1.5);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "invalid debug shape 'bad'")]
    fn invalid_shape_panics_in_debug() {
        let drawer = DebugDrawer::new();
        let mut registry = DebugShapeRegistry::default();
        registry.add_shape(sphere(-1.0, 1.0), "bad");
        registry.tick(0.1, &drawer, &mut Vec::new());
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn invalid_shape_is_skipped_in_release() {
        let drawer = DebugDrawer::new();
        let mut registry = DebugShapeRegistry::default();
        registry.add_shape(sphere(-1.0, 1.0), "bad");
        registry.add_shape(sphere(1.0, 1.0), "good");
        let mut log = Vec::new();
        let stats = registry.tick(0.5, &drawer, &mut log);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.drawn, 1);
        assert_eq!(log.len(), 1);
        assert_eq!(registry.get("bad").unwrap().lifetime, 0.5);
    }
}
