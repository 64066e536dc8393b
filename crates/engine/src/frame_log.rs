//! Logging of the active frame's data.

use crate::core::FrameSet;
use crate::types::DataMode;

/// Log frame `index` as it becomes active.
///
/// A one-line summary goes to `info`; the full layer descriptor (every
/// contour or every buffer) is serialized only when `debug` is enabled.
pub fn log_active_frame(frames: &FrameSet, index: usize, mode: DataMode) {
    let Some(source) = frames.source(index, mode) else {
        log::warn!("frame {} out of range ({} frames)", index, frames.len());
        return;
    };

    let bytes = match mode {
        DataMode::Binary => frames.packed(index).map(|p| p.byte_len()).unwrap_or(0),
        DataMode::Objects => 0,
    };
    log::info!(
        "frame {}/{} [{}]: {} polygons, mean elevation {:.1}, {} buffer bytes",
        index + 1,
        frames.len(),
        mode.as_str(),
        source.polygon_count(),
        source.mean_elevation(),
        bytes
    );

    if !log::log_enabled!(log::Level::Debug) {
        return;
    }
    if let Some(layer) = frames.layer(index, mode) {
        match serde_json::to_string(&layer) {
            Ok(json) => log::debug!("frame {} layer: {}", index + 1, json),
            Err(e) => log::warn!("frame {} layer serialization failed: {}", index + 1, e),
        }
    }
}
