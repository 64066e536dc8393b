//! FrameSet: every animation frame, generated once.
//!
//! The host builds one `FrameSet` at startup and passes it by reference to
//! whatever consumes frames (terminal view, exporter, frame logging). It is
//! never mutated afterwards. Each frame is held in both encodings so that
//! switching the data mode at runtime costs nothing.

use std::time::{Duration, Instant};

use rand::Rng;

use crate::error::GridError;
use crate::grid::{generate_frame, Frame, GridSpec};
use crate::layer::LayerDescriptor;
use crate::pack::{pack, PackedFrame};
use crate::source::CellSource;
use crate::types::DataMode;

#[derive(Debug, Clone)]
pub struct FrameSet {
    spec: GridSpec,
    frames: Vec<Frame>,
    packed: Vec<PackedFrame>,
    generation_time: Duration,
}

impl FrameSet {
    /// Generate and pack `frame_count` frames.
    ///
    /// Logs the total generation wall time.
    pub fn generate<R: Rng + ?Sized>(
        spec: GridSpec,
        frame_count: usize,
        rng: &mut R,
    ) -> Result<Self, GridError> {
        if frame_count == 0 {
            return Err(GridError::NoFrames);
        }

        let started = Instant::now();
        let mut frames = Vec::with_capacity(frame_count);
        let mut packed = Vec::with_capacity(frame_count);

        for i in 0..frame_count {
            log::debug!("Data index : {}", i);
            let frame = generate_frame(spec, rng);
            packed.push(pack(&frame));
            frames.push(frame);
        }

        let generation_time = started.elapsed();
        log::info!(
            "Data generation duration : {:.1}sec ({} frames, {} polygons each)",
            generation_time.as_secs_f64(),
            frame_count,
            spec.cell_count()
        );

        Ok(Self {
            spec,
            frames,
            packed,
            generation_time,
        })
    }

    /// Wrap already generated frames (packing each one).
    pub fn from_frames(spec: GridSpec, frames: Vec<Frame>) -> Result<Self, GridError> {
        if frames.is_empty() {
            return Err(GridError::NoFrames);
        }
        let packed = frames.iter().map(pack).collect();
        Ok(Self {
            spec,
            frames,
            packed,
            generation_time: Duration::ZERO,
        })
    }

    pub fn spec(&self) -> GridSpec {
        self.spec
    }

    /// Number of frames (always at least one).
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn packed(&self, index: usize) -> Option<&PackedFrame> {
        self.packed.get(index)
    }

    pub fn generation_time(&self) -> Duration {
        self.generation_time
    }

    /// Frame `index` in the encoding selected by `mode`.
    pub fn source(&self, index: usize, mode: DataMode) -> Option<&dyn CellSource> {
        match mode {
            DataMode::Objects => self.frame(index).map(|f| f as &dyn CellSource),
            DataMode::Binary => self.packed(index).map(|p| p as &dyn CellSource),
        }
    }

    /// Renderer layer for frame `index` in the encoding selected by `mode`.
    pub fn layer(&self, index: usize, mode: DataMode) -> Option<LayerDescriptor<'_>> {
        match mode {
            DataMode::Objects => self.frame(index).map(LayerDescriptor::objects),
            DataMode::Binary => self.packed(index).map(LayerDescriptor::binary),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_generate_requires_frames() {
        let spec = GridSpec::new(4, 2).unwrap();
        let err = FrameSet::generate(spec, 0, &mut StdRng::seed_from_u64(1)).unwrap_err();
        assert_eq!(err, GridError::NoFrames);
        assert_eq!(FrameSet::from_frames(spec, Vec::new()).unwrap_err(), GridError::NoFrames);
    }

    #[test]
    fn test_packed_matches_frames() {
        let spec = GridSpec::new(8, 2).unwrap();
        let set = FrameSet::generate(spec, 3, &mut StdRng::seed_from_u64(11)).unwrap();

        assert_eq!(set.len(), 3);
        for i in 0..set.len() {
            let frame = set.frame(i).unwrap();
            let packed = set.packed(i).unwrap();
            assert_eq!(packed.polygon_count(), frame.len());
            assert_eq!(&packed.unpack(), frame);
        }
        assert!(set.frame(3).is_none());
        assert!(set.packed(3).is_none());
    }

    #[test]
    fn test_source_follows_mode() {
        let spec = GridSpec::new(4, 2).unwrap();
        let set = FrameSet::generate(spec, 1, &mut StdRng::seed_from_u64(2)).unwrap();

        let objects = set.source(0, DataMode::Objects).unwrap();
        let binary = set.source(0, DataMode::Binary).unwrap();
        assert_eq!(objects.polygon_count(), 4);
        assert_eq!(binary.polygon_count(), 4);
        assert_eq!(objects.cell_color(2), binary.cell_color(2));
        assert!(set.source(1, DataMode::Binary).is_none());
    }

    #[test]
    fn test_layer_follows_mode() {
        let spec = GridSpec::new(4, 2).unwrap();
        let set = FrameSet::generate(spec, 1, &mut StdRng::seed_from_u64(2)).unwrap();

        assert_eq!(set.layer(0, DataMode::Objects).unwrap().id, "solid-polygon-layer");
        assert_eq!(
            set.layer(0, DataMode::Binary).unwrap().id,
            "solid-polygon-layer-binary"
        );
    }
}
