use std::path::Path;

use serde::Deserialize;

use crate::error::{DebugDrawError, DebugDrawResult};

/// Runtime switches for the debug shape registry.
///
/// Loaded from a `[debug_draw]` table in TOML, or built in code. Every field
/// has a default, so an empty table is valid.
///
/// ```toml
/// [debug_draw]
/// draw_debug_shapes = true
/// record_visual_log = false
/// circle_segments = 24
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DebugDrawConfig {
    /// Render shapes into the immediate overlay.
    pub draw_debug_shapes: bool,
    /// Append shapes to the visual log.
    pub record_visual_log: bool,
    /// Segments used for circles, spheres, capsules and cones.
    pub circle_segments: u32,
    /// Maximum entries a [`VisualLog`](crate::VisualLog) keeps before dropping the oldest.
    pub visual_log_capacity: usize,
}

impl Default for DebugDrawConfig {
    fn default() -> Self {
        Self {
            draw_debug_shapes: true,
            record_visual_log: true,
            circle_segments: 16,
            visual_log_capacity: 10_000,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    debug_draw: DebugDrawConfig,
}

impl DebugDrawConfig {
    /// Both sinks off. Shapes still age and expire.
    pub fn disabled() -> Self {
        Self {
            draw_debug_shapes: false,
            record_visual_log: false,
            ..Self::default()
        }
    }

    pub fn from_toml_str(content: &str) -> DebugDrawResult<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.debug_draw.sanitized())
    }

    pub fn load(path: &Path) -> DebugDrawResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| DebugDrawError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load from `path`, falling back to defaults if it is missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded debug draw config from {}", path.display());
                config
            }
            Err(DebugDrawError::Read { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                log::debug!("No debug draw config at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("{e}; using default debug draw config");
                Self::default()
            }
        }
    }

    fn sanitized(mut self) -> Self {
        if self.circle_segments < 4 {
            log::warn!(
                "circle_segments = {} is too low, clamping to 4",
                self.circle_segments
            );
            self.circle_segments = 4;
        }
        if self.visual_log_capacity == 0 {
            log::warn!("visual_log_capacity = 0, clamping to 1");
            self.visual_log_capacity = 1;
        }
        self
    }
}
