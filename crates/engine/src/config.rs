//! Application configuration.
//!
//! Values come from environment variables first (see the crate docs for the
//! full list); command-line flags parsed into [`ConfigArgs`] override them.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core::{FrameSet, GridError, GridSpec, MapConfig};
use crate::types::{
    DataMode, DEFAULT_CELL_SIZE, DEFAULT_FRAME_COUNT, DEFAULT_GRID_SIZE, FRAME_PERIOD_MS,
};

/// Log file used by the terminal viewer when none is configured.
pub const DEFAULT_LOG_PATH: &str = "polygrid.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub grid_size: u32,
    pub cell_size: u32,
    pub frame_count: usize,
    pub tick_ms: u64,
    pub mode: DataMode,
    pub log_frames: bool,
    pub seed: Option<u64>,
    pub log_path: Option<PathBuf>,
    pub map: MapConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            cell_size: DEFAULT_CELL_SIZE,
            frame_count: DEFAULT_FRAME_COUNT,
            tick_ms: FRAME_PERIOD_MS as u64,
            mode: DataMode::default(),
            log_frames: false,
            seed: None,
            log_path: None,
            map: MapConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let grid_size = non_empty("POLYGRID_GRID_SIZE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.grid_size);
        let cell_size = non_empty("POLYGRID_CELL_SIZE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.cell_size);
        let frame_count = non_empty("POLYGRID_FRAMES")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.frame_count);
        let tick_ms = non_empty("POLYGRID_TICK_MS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.tick_ms);
        let mode = non_empty("POLYGRID_MODE")
            .and_then(|s| DataMode::from_str(&s))
            .unwrap_or(defaults.mode);
        let log_frames = non_empty("POLYGRID_LOG_FRAMES")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);
        let seed = non_empty("POLYGRID_SEED").and_then(|s| s.parse().ok());
        let log_path = non_empty("POLYGRID_LOG_PATH").map(PathBuf::from);
        let style = non_empty("POLYGRID_MAP_STYLE").unwrap_or(defaults.map.style);
        let access_token = non_empty("MAPBOX_ACCESS_TOKEN");

        Self {
            grid_size,
            cell_size,
            frame_count,
            tick_ms,
            mode,
            log_frames,
            seed,
            log_path,
            map: MapConfig {
                style,
                access_token,
            },
        }
    }

    /// Environment configuration with command-line overrides applied.
    pub fn load(args: &ConfigArgs) -> Self {
        let mut config = Self::from_env();
        config.apply_args(args);
        config
    }

    pub fn apply_args(&mut self, args: &ConfigArgs) {
        if let Some(v) = args.grid_size {
            self.grid_size = v;
        }
        if let Some(v) = args.cell_size {
            self.cell_size = v;
        }
        if let Some(v) = args.frames {
            self.frame_count = v;
        }
        if let Some(v) = args.tick_ms {
            self.tick_ms = v;
        }
        if let Some(v) = args.mode {
            self.mode = v;
        }
        if args.log_frames {
            self.log_frames = true;
        }
        if let Some(v) = args.seed {
            self.seed = Some(v);
        }
        if let Some(v) = &args.log_path {
            self.log_path = Some(v.clone());
        }
        if let Some(v) = &args.map_style {
            self.map.style = v.clone();
        }
    }

    pub fn grid_spec(&self) -> Result<GridSpec, GridError> {
        GridSpec::new(self.grid_size, self.cell_size)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    /// Seeded generator when a seed is configured, OS entropy otherwise.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Generate every frame described by this configuration.
    pub fn generate_frames(&self) -> Result<FrameSet> {
        let spec = self.grid_spec()?;
        let mut rng = self.rng();
        let frames = FrameSet::generate(spec, self.frame_count, &mut rng)?;
        Ok(frames)
    }
}

/// Command-line overrides shared by every binary.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigArgs {
    /// Side of the cartesian area
    #[arg(long)]
    pub grid_size: Option<u32>,

    /// Side of one cell
    #[arg(long)]
    pub cell_size: Option<u32>,

    /// Number of frames to pre-generate
    #[arg(long)]
    pub frames: Option<usize>,

    /// Frame advance period in milliseconds
    #[arg(long)]
    pub tick_ms: Option<u64>,

    /// Data supply mode: binary or objects
    #[arg(long, value_parser = parse_mode)]
    pub mode: Option<DataMode>,

    /// Log the data of every frame that becomes active
    #[arg(long)]
    pub log_frames: bool,

    /// Seed for reproducible frames
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log file path
    #[arg(long)]
    pub log_path: Option<PathBuf>,

    /// Basemap style URL
    #[arg(long)]
    pub map_style: Option<String>,
}

fn parse_mode(s: &str) -> Result<DataMode, String> {
    DataMode::from_str(s).ok_or_else(|| format!("unknown data mode: {s} (expected binary or objects)"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.grid_size, 512);
        assert_eq!(config.cell_size, 2);
        assert_eq!(config.frame_count, 5);
        assert_eq!(config.tick_period(), Duration::from_secs(1));
        assert_eq!(config.mode, DataMode::Binary);
        assert!(!config.map.has_token());
    }

    #[test]
    fn test_env_values() {
        let config = AppConfig::from_lookup(lookup(&[
            ("POLYGRID_GRID_SIZE", "64"),
            ("POLYGRID_CELL_SIZE", "4"),
            ("POLYGRID_FRAMES", "3"),
            ("POLYGRID_TICK_MS", "250"),
            ("POLYGRID_MODE", "objects"),
            ("POLYGRID_LOG_FRAMES", "TRUE"),
            ("POLYGRID_SEED", "42"),
            ("POLYGRID_LOG_PATH", "/tmp/grid.log"),
            ("MAPBOX_ACCESS_TOKEN", " pk.abc "),
        ]));

        assert_eq!(config.grid_size, 64);
        assert_eq!(config.cell_size, 4);
        assert_eq!(config.frame_count, 3);
        assert_eq!(config.tick_ms, 250);
        assert_eq!(config.mode, DataMode::Objects);
        assert!(config.log_frames);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.log_path, Some(PathBuf::from("/tmp/grid.log")));
        assert_eq!(config.map.access_token.as_deref(), Some("pk.abc"));
    }

    #[test]
    fn test_invalid_env_values_fall_back() {
        let config = AppConfig::from_lookup(lookup(&[
            ("POLYGRID_GRID_SIZE", "huge"),
            ("POLYGRID_MODE", "sideways"),
            ("MAPBOX_ACCESS_TOKEN", "   "),
        ]));
        assert_eq!(config.grid_size, 512);
        assert_eq!(config.mode, DataMode::Binary);
        assert_eq!(config.map.access_token, None);
    }

    #[test]
    fn test_args_override_env() {
        let mut config = AppConfig::from_lookup(lookup(&[("POLYGRID_FRAMES", "3")]));
        let args = ConfigArgs {
            frames: Some(7),
            mode: Some(DataMode::Objects),
            log_frames: true,
            ..Default::default()
        };
        config.apply_args(&args);

        assert_eq!(config.frame_count, 7);
        assert_eq!(config.mode, DataMode::Objects);
        assert!(config.log_frames);
        assert_eq!(config.grid_size, 512);
    }

    #[test]
    fn test_zero_cell_size_is_rejected() {
        let config = AppConfig {
            cell_size: 0,
            ..Default::default()
        };
        assert_eq!(config.grid_spec(), Err(GridError::ZeroCellSize));
        assert!(config.generate_frames().is_err());
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let config = AppConfig {
            grid_size: 8,
            seed: Some(9),
            ..Default::default()
        };
        let a = config.generate_frames().unwrap();
        let b = config.generate_frames().unwrap();
        assert_eq!(a.frames(), b.frames());
        assert_eq!(a.len(), 5);
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(parse_mode("binary"), Ok(DataMode::Binary));
        assert!(parse_mode("bogus").is_err());
    }
}
