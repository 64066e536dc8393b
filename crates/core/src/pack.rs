//! Pack module - structure-of-arrays encoding of a frame
//!
//! [`pack`] flattens a [`Frame`] into parallel vertex buffers so a renderer
//! can upload them without walking per-cell records:
//!
//! | Buffer | Element | Per vertex |
//! |--------|---------|------------|
//! | `polygons` | `f32` | 2 (`x`, `y`) |
//! | `colors` | `u8` | 4 (`r`, `g`, `b`, `a`) |
//! | `elevations` | `u8` | 1 |
//!
//! Every cell contributes [`CONTOUR_LEN`] vertices. Its color and elevation
//! are repeated once per vertex.
//!
//! `start_indices` holds one offset per cell, measured in **vertices** (not
//! floats): cell `i` starts at vertex `start_indices[i]` and ends where the
//! next cell starts, or at [`PackedFrame::vertex_count`] for the last one.
//!
//! Positions are stored as `f32`, which represents grid coordinates exactly up
//! to 2^24.

use std::borrow::Cow;

use bytemuck::Pod;

use crate::grid::{Cell, Frame};
use crate::types::{Rgba, COLOR_SIZE, CONTOUR_LEN, ELEVATION_SIZE, POSITION_SIZE};

/// Flat, renderer-ready view of one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PackedFrame {
    polygons: Vec<f32>,
    colors: Vec<u8>,
    elevations: Vec<u8>,
    polygon_count: usize,
    start_indices: Vec<u32>,
}

/// Encode a frame as flat attribute buffers.
pub fn pack(frame: &Frame) -> PackedFrame {
    let vertex_count = frame.len() * CONTOUR_LEN;

    let mut polygons = Vec::with_capacity(vertex_count * POSITION_SIZE);
    let mut colors = Vec::with_capacity(vertex_count * COLOR_SIZE);
    let mut elevations = Vec::with_capacity(vertex_count * ELEVATION_SIZE);

    for cell in frame {
        for [x, y] in cell.contour {
            polygons.push(x as f32);
            polygons.push(y as f32);
            colors.extend_from_slice(&cell.color);
            elevations.push(cell.elevation);
        }
    }

    // One offset per contour, walking the vertex stream.
    let start_indices = (0..vertex_count)
        .step_by(CONTOUR_LEN)
        .map(|v| v as u32)
        .collect();

    PackedFrame {
        polygons,
        colors,
        elevations,
        polygon_count: frame.len(),
        start_indices,
    }
}

impl PackedFrame {
    pub fn polygons(&self) -> &[f32] {
        &self.polygons
    }

    pub fn colors(&self) -> &[u8] {
        &self.colors
    }

    pub fn elevations(&self) -> &[u8] {
        &self.elevations
    }

    pub fn polygon_count(&self) -> usize {
        self.polygon_count
    }

    pub fn start_indices(&self) -> &[u32] {
        &self.start_indices
    }

    pub fn is_empty(&self) -> bool {
        self.polygon_count == 0
    }

    /// Total number of vertices across all contours.
    pub fn vertex_count(&self) -> usize {
        self.polygons.len() / POSITION_SIZE
    }

    /// Vertex range `[start, end)` of polygon `index`.
    pub fn vertex_range(&self, index: usize) -> Option<(usize, usize)> {
        let start = *self.start_indices.get(index)? as usize;
        let end = self
            .start_indices
            .get(index + 1)
            .map(|&s| s as usize)
            .unwrap_or_else(|| self.vertex_count());
        Some((start, end))
    }

    /// Position floats of polygon `index` (`x0, y0, x1, y1, ...`).
    pub fn polygon(&self, index: usize) -> Option<&[f32]> {
        let (start, end) = self.vertex_range(index)?;
        self.polygons.get(start * POSITION_SIZE..end * POSITION_SIZE)
    }

    /// Color of polygon `index`, read from its first vertex.
    pub fn color(&self, index: usize) -> Option<Rgba> {
        let (start, _) = self.vertex_range(index)?;
        let bytes = self.colors.get(start * COLOR_SIZE..(start + 1) * COLOR_SIZE)?;
        bytes.try_into().ok()
    }

    /// Elevation of polygon `index`, read from its first vertex.
    pub fn elevation(&self, index: usize) -> Option<u8> {
        let (start, _) = self.vertex_range(index)?;
        self.elevations.get(start).copied()
    }

    /// Recover the cell record of polygon `index`.
    ///
    /// Returns `None` if the index is out of range or the polygon does not
    /// hold exactly [`CONTOUR_LEN`] vertices.
    pub fn unpack_cell(&self, index: usize) -> Option<Cell> {
        let floats = self.polygon(index)?;
        if floats.len() != CONTOUR_LEN * POSITION_SIZE {
            return None;
        }

        let mut contour = [[0u32; 2]; CONTOUR_LEN];
        for (dst, xy) in contour.iter_mut().zip(floats.chunks_exact(POSITION_SIZE)) {
            *dst = [xy[0] as u32, xy[1] as u32];
        }

        Some(Cell {
            contour,
            color: self.color(index)?,
            elevation: self.elevation(index)?,
        })
    }

    /// Rebuild the whole frame from the flat buffers.
    pub fn unpack(&self) -> Frame {
        let cells = (0..self.polygon_count)
            .filter_map(|i| self.unpack_cell(i))
            .collect();
        Frame::from_cells(cells)
    }

    /// Position buffer as raw bytes (native byte order).
    pub fn polygon_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.polygons)
    }

    /// Start index buffer as raw bytes (native byte order).
    pub fn start_index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.start_indices)
    }

    /// Position buffer as little-endian bytes, borrowed on little-endian
    /// targets.
    pub fn polygon_le_bytes(&self) -> Cow<'_, [u8]> {
        le_bytes(&self.polygons, |v| v.to_le_bytes())
    }

    /// Start index buffer as little-endian bytes, borrowed on little-endian
    /// targets.
    pub fn start_index_le_bytes(&self) -> Cow<'_, [u8]> {
        le_bytes(&self.start_indices, |v| v.to_le_bytes())
    }

    /// Combined size of all buffers in bytes.
    pub fn byte_len(&self) -> usize {
        self.polygon_bytes().len()
            + self.colors.len()
            + self.elevations.len()
            + self.start_index_bytes().len()
    }
}

fn le_bytes<T: Pod, const N: usize>(values: &[T], to_le: impl Fn(&T) -> [u8; N]) -> Cow<'_, [u8]> {
    if cfg!(target_endian = "little") {
        Cow::Borrowed(bytemuck::cast_slice(values))
    } else {
        Cow::Owned(values.iter().flat_map(to_le).collect())
    }
}
