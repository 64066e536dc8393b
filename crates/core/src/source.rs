//! Read access shared by both frame encodings.
//!
//! Consumers that only need per-cell color and elevation (the terminal
//! preview, frame summaries) go through [`CellSource`] so they work the same
//! whether the host supplies object records or packed buffers.

use crate::grid::Frame;
use crate::pack::PackedFrame;
use crate::types::Rgba;

pub trait CellSource {
    fn polygon_count(&self) -> usize;

    fn cell_color(&self, index: usize) -> Option<Rgba>;

    fn cell_elevation(&self, index: usize) -> Option<u8>;

    /// Mean elevation over all cells, `0.0` when empty.
    fn mean_elevation(&self) -> f32 {
        let n = self.polygon_count();
        if n == 0 {
            return 0.0;
        }
        let sum: u64 = (0..n)
            .filter_map(|i| self.cell_elevation(i))
            .map(u64::from)
            .sum();
        sum as f32 / n as f32
    }
}

impl CellSource for Frame {
    fn polygon_count(&self) -> usize {
        self.len()
    }

    fn cell_color(&self, index: usize) -> Option<Rgba> {
        self.get(index).map(|c| c.color)
    }

    fn cell_elevation(&self, index: usize) -> Option<u8> {
        self.get(index).map(|c| c.elevation)
    }
}

impl CellSource for PackedFrame {
    fn polygon_count(&self) -> usize {
        PackedFrame::polygon_count(self)
    }

    fn cell_color(&self, index: usize) -> Option<Rgba> {
        self.color(index)
    }

    fn cell_elevation(&self, index: usize) -> Option<u8> {
        self.elevation(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{generate_frame, Cell, GridSpec};
    use crate::pack::pack;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_encodings_agree() {
        let frame = generate_frame(GridSpec::new(12, 2).unwrap(), &mut StdRng::seed_from_u64(5));
        let packed = pack(&frame);

        assert_eq!(CellSource::polygon_count(&frame), CellSource::polygon_count(&packed));
        for i in 0..frame.len() {
            assert_eq!(frame.cell_color(i), packed.cell_color(i));
            assert_eq!(frame.cell_elevation(i), packed.cell_elevation(i));
        }
        assert_eq!(frame.cell_color(frame.len()), None);
        assert_eq!(packed.cell_color(frame.len()), None);
    }

    #[test]
    fn test_mean_elevation() {
        let frame = Frame::from_cells(vec![
            Cell::square(0, 0, 1, [0, 0, 0, 150], 10),
            Cell::square(0, 1, 1, [0, 0, 0, 150], 30),
        ]);
        assert_eq!(frame.mean_elevation(), 20.0);
        assert_eq!(pack(&frame).mean_elevation(), 20.0);
        assert_eq!(Frame::default().mean_elevation(), 0.0);
    }
}
