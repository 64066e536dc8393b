//! Frame exporter.
//!
//! Generates the frame set and writes one frame either as the renderer-facing
//! JSON descriptor or as raw little-endian attribute buffers with a manifest.
//!
//! Usage:
//!   polygrid-export --frame 0 --format json > frame0.json
//!   polygrid-export --frame 2 --format raw --out ./frame2 --seed 7

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;

use tui_polygrid::core::{DeckDescriptor, FrameSet, PackedFrame};
use tui_polygrid::engine::{init_logging, AppConfig, ConfigArgs, LogTarget};
use tui_polygrid::types::{COLOR_SIZE, ELEVATION_SIZE, POSITION_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Layer descriptor with basemap and initial view, as JSON
    Json,
    /// Binary attribute buffers plus manifest.json
    Raw,
}

#[derive(Parser, Debug)]
#[command(name = "polygrid-export", about = "Export one generated frame")]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    /// Frame index (0-based)
    #[arg(long, default_value_t = 0)]
    frame: usize,

    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Output file (json) or directory (raw); json defaults to stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Manifest<'a> {
    frame: usize,
    frame_count: usize,
    grid_size: u32,
    cell_size: u32,
    polygon_count: usize,
    vertex_count: usize,
    buffers: [BufferEntry<'a>; 4],
}

#[derive(Debug, Serialize)]
struct BufferEntry<'a> {
    name: &'a str,
    file: &'a str,
    dtype: &'a str,
    size: usize,
    len: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(LogTarget::Stderr)?;

    let config = AppConfig::load(&cli.config);
    let frames = config.generate_frames()?;
    if cli.frame >= frames.len() {
        bail!(
            "frame {} out of range ({} frames generated)",
            cli.frame,
            frames.len()
        );
    }

    match cli.format {
        Format::Json => export_json(&frames, &config, &cli),
        Format::Raw => {
            let Some(dir) = &cli.out else {
                bail!("--format raw requires --out DIR");
            };
            export_raw(&frames, cli.frame, dir)
        }
    }
}

fn export_json(frames: &FrameSet, config: &AppConfig, cli: &Cli) -> Result<()> {
    let layer = frames
        .layer(cli.frame, config.mode)
        .context("frame out of range")?;
    let deck = DeckDescriptor::new(&config.map, layer);

    match &cli.out {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            serde_json::to_writer(&mut out, &deck)?;
            out.flush()?;
            log::info!(
                "wrote frame {} ({}) to {}",
                cli.frame,
                config.mode.as_str(),
                path.display()
            );
        }
        None => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            serde_json::to_writer(&mut out, &deck)?;
            writeln!(out)?;
            out.flush()?;
        }
    }
    Ok(())
}

fn export_raw(frames: &FrameSet, index: usize, dir: &Path) -> Result<()> {
    let packed = frames.packed(index).context("frame out of range")?;
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    write_buffer(dir, "positions.f32", &packed.polygon_le_bytes())?;
    write_buffer(dir, "colors.u8", packed.colors())?;
    write_buffer(dir, "elevations.u8", packed.elevations())?;
    write_buffer(dir, "start_indices.u32", &packed.start_index_le_bytes())?;

    let spec = frames.spec();
    let manifest = manifest(packed, index, frames.len(), spec.grid_size(), spec.cell_size());
    let path = dir.join("manifest.json");
    let file =
        File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, &manifest)?;
    out.flush()?;

    log::info!(
        "wrote frame {} ({} polygons, {} bytes) to {}",
        index,
        packed.polygon_count(),
        packed.byte_len(),
        dir.display()
    );
    Ok(())
}

fn write_buffer(dir: &Path, name: &str, bytes: &[u8]) -> Result<()> {
    let path = dir.join(name);
    fs::write(&path, bytes).with_context(|| format!("failed to write {}", path.display()))
}

fn manifest(
    packed: &PackedFrame,
    frame: usize,
    frame_count: usize,
    grid_size: u32,
    cell_size: u32,
) -> Manifest<'static> {
    Manifest {
        frame,
        frame_count,
        grid_size,
        cell_size,
        polygon_count: packed.polygon_count(),
        vertex_count: packed.vertex_count(),
        buffers: [
            BufferEntry {
                name: "getPolygon",
                file: "positions.f32",
                dtype: "float32",
                size: POSITION_SIZE,
                len: packed.polygons().len(),
            },
            BufferEntry {
                name: "getFillColor",
                file: "colors.u8",
                dtype: "uint8",
                size: COLOR_SIZE,
                len: packed.colors().len(),
            },
            BufferEntry {
                name: "getElevation",
                file: "elevations.u8",
                dtype: "uint8",
                size: ELEVATION_SIZE,
                len: packed.elevations().len(),
            },
            BufferEntry {
                name: "startIndices",
                file: "start_indices.u32",
                dtype: "uint32",
                size: 1,
                len: packed.start_indices().len(),
            },
        ],
    }
}
