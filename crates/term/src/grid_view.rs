//! GridView: maps the active frame into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! The frame is drawn top-down: one terminal cell samples the grid cell under
//! its center, with `y` growing upwards. Color is the cell color composited
//! over the background at its alpha; brightness and glyph density follow the
//! elevation, standing in for extrusion. A side panel shows the frame number,
//! polygon count and toggles.

use crate::core::{CellSource, GridSpec, ViewSnapshot};
use crate::fb::{FrameBuffer, Rgb, Style};

/// Glyphs from lowest to highest elevation.
const SHADES: [char; 5] = [' ', '░', '▒', '▓', '█'];

const BACKGROUND: Rgb = Rgb::new(24, 24, 32);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

pub struct GridView {
    /// Terminal columns per sampled cell (compensates glyph aspect ratio).
    cell_w: u16,
    /// Width of the side panel in columns.
    panel_w: u16,
}

impl Default for GridView {
    fn default() -> Self {
        Self {
            cell_w: 2,
            panel_w: 22,
        }
    }
}

impl GridView {
    pub fn new(cell_w: u16, panel_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            panel_w,
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &ViewSnapshot,
        source: &dyn CellSource,
        spec: GridSpec,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Style::plain(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0)));

        let side = self.map_side(spec, viewport);
        let map_w = side * self.cell_w;
        if side > 0 {
            self.draw_border(fb, 0, 0, map_w + 2, side + 2);
            self.draw_map(fb, source, spec, side);
        }

        let panel_x = if side > 0 { map_w + 4 } else { 1 };
        self.draw_panel(fb, snap, panel_x, viewport);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &ViewSnapshot,
        source: &dyn CellSource,
        spec: GridSpec,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, source, spec, viewport, &mut fb);
        fb
    }

    /// Sampled cells per side of the square map (0 when nothing fits).
    pub fn map_side(&self, spec: GridSpec, viewport: Viewport) -> u16 {
        let per_side = spec.cells_per_side().min(u16::MAX as u32) as u16;
        let avail_w = viewport
            .width
            .saturating_sub(self.panel_w)
            .saturating_sub(4)
            / self.cell_w;
        let avail_h = viewport.height.saturating_sub(2);
        per_side.min(avail_w).min(avail_h)
    }

    fn draw_map(&self, fb: &mut FrameBuffer, source: &dyn CellSource, spec: GridSpec, side: u16) {
        let per_side = spec.cells_per_side() as u64;
        let side64 = side as u64;

        for ty in 0..side {
            // Screen rows grow downwards, grid rows grow upwards.
            let from_top = (2 * ty as u64 + 1) * per_side / (2 * side64);
            let row = (per_side - 1 - from_top) as u32;

            for tx in 0..side {
                let col = ((2 * tx as u64 + 1) * per_side / (2 * side64)) as u32;
                let sample = spec
                    .index_of(col, row)
                    .and_then(|i| Some((source.cell_color(i)?, source.cell_elevation(i)?)));

                let (ch, style) = match sample {
                    Some((color, elevation)) => shade(color, elevation),
                    None => ('·', Style::plain(Rgb::new(90, 90, 100), BACKGROUND)),
                };
                let x = 1 + tx * self.cell_w;
                for dx in 0..self.cell_w {
                    fb.put_char(x + dx, 1 + ty, ch, style);
                }
            }
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        if w < 2 || h < 2 {
            return;
        }
        let style = Style::plain(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);
        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, snap: &ViewSnapshot, x: u16, viewport: Viewport) {
        if x >= viewport.width {
            return;
        }

        let label = Style {
            bold: true,
            ..Style::plain(Rgb::new(230, 230, 230), Rgb::new(0, 0, 0))
        };
        let value = Style::plain(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let dim = Style { dim: true, ..value };

        let lines: [(&str, String, Style); 7] = [
            (
                "FRAME",
                format!("{}/{}", snap.frame_number(), snap.frame_count),
                value,
            ),
            ("POLYGONS", snap.polygon_count.to_string(), value),
            (
                "GRID",
                format!("{} / {}", snap.grid_size, snap.cell_size),
                value,
            ),
            ("BINARY", checkbox(snap.mode.is_binary(), 'b'), value),
            ("LOG", checkbox(snap.log_frames, 'l'), value),
            (
                "MAP",
                if snap.map_token { "token set" } else { "no token" }.to_string(),
                if snap.map_token { value } else { dim },
            ),
            ("", "q quit".to_string(), dim),
        ];

        let mut y = 1u16;
        for (name, text, style) in lines.iter() {
            if y >= viewport.height {
                break;
            }
            if !name.is_empty() {
                fb.put_str(x, y, name, label);
                y = y.saturating_add(1);
            }
            fb.put_str(x, y, text, *style);
            y = y.saturating_add(2);
        }
    }
}

fn checkbox(on: bool, key: char) -> String {
    format!("[{}] ({})", if on { 'x' } else { ' ' }, key)
}

fn shade(color: [u8; 4], elevation: u8) -> (char, Style) {
    let level = elevation as usize * SHADES.len() / 256;
    let brightness = 0.35 + 0.65 * (elevation as f32 / 255.0);
    let fg = Rgb::new(color[0], color[1], color[2]).scaled(brightness);
    let bg = Rgb::blend_over(color, BACKGROUND).scaled(brightness);
    (SHADES[level], Style::plain(fg, bg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Cell, Frame};
    use crate::types::DataMode;

    fn snapshot() -> ViewSnapshot {
        ViewSnapshot {
            frame_index: 2,
            frame_count: 5,
            polygon_count: 4,
            mode: DataMode::Binary,
            log_frames: false,
            grid_size: 4,
            cell_size: 2,
            map_token: false,
        }
    }

    #[test]
    fn test_shade_levels() {
        assert_eq!(shade([0, 0, 0, 150], 0).0, ' ');
        assert_eq!(shade([0, 0, 0, 150], 255).0, '█');
        assert_eq!(shade([0, 0, 0, 150], 128).0, '▒');
    }

    #[test]
    fn test_map_side_limited_by_grid_and_viewport() {
        let view = GridView::default();
        let spec = GridSpec::new(4, 2).unwrap();
        assert_eq!(view.map_side(spec, Viewport::new(80, 24)), 2);

        let big = GridSpec::new(512, 2).unwrap();
        assert_eq!(view.map_side(big, Viewport::new(80, 24)), 22);
        assert_eq!(view.map_side(big, Viewport::new(10, 5)), 0);
    }

    #[test]
    fn test_map_is_drawn_top_down() {
        // Column-major: (0,0) (0,2) (2,0) (2,2)
        let frame = Frame::from_cells(vec![
            Cell::square(0, 0, 2, [255, 0, 0, 255], 255),
            Cell::square(0, 2, 2, [0, 255, 0, 255], 255),
            Cell::square(2, 0, 2, [0, 0, 255, 255], 255),
            Cell::square(2, 2, 2, [255, 255, 255, 255], 255),
        ]);
        let spec = GridSpec::new(4, 2).unwrap();
        let fb = GridView::default().render(&snapshot(), &frame, spec, Viewport::new(60, 10));

        // Top-left on screen is the cell at (0, 2).
        assert_eq!(fb.get(1, 1).unwrap().style.fg, Rgb::new(0, 255, 0));
        // Bottom-left on screen is the cell at (0, 0).
        assert_eq!(fb.get(1, 2).unwrap().style.fg, Rgb::new(255, 0, 0));
        // Bottom-right is (2, 0), two columns per cell.
        assert_eq!(fb.get(3, 2).unwrap().style.fg, Rgb::new(0, 0, 255));
        assert_eq!(fb.get(4, 2).unwrap().style.fg, Rgb::new(0, 0, 255));
        assert_eq!(fb.get(1, 1).unwrap().ch, '█');
    }

    #[test]
    fn test_panel_text() {
        let frame = Frame::default();
        let spec = GridSpec::new(4, 2).unwrap();
        let fb = GridView::default().render(&snapshot(), &frame, spec, Viewport::new(60, 20));
        let text: String = (0..fb.height()).map(|y| fb.row_text(y) + "\n").collect();

        assert!(text.contains("FRAME"));
        assert!(text.contains("3/5"));
        assert!(text.contains("POLYGONS"));
        assert!(text.contains("[x] (b)"));
        assert!(text.contains("[ ] (l)"));
        assert!(text.contains("no token"));
    }

    #[test]
    fn test_missing_cells_render_as_dots() {
        let frame = Frame::default();
        let spec = GridSpec::new(4, 2).unwrap();
        let fb = GridView::default().render(&snapshot(), &frame, spec, Viewport::new(60, 10));
        assert_eq!(fb.get(1, 1).unwrap().ch, '·');
    }
}
