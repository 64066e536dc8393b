//! Terminal polygon grid player (default binary).
//!
//! Generates every frame up front, then cycles through them on a fixed period
//! while drawing a top-down preview with a custom framebuffer renderer.
//! Log records go to a file so they never corrupt the screen.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};

use tui_polygrid::core::{FrameSet, ViewState};
use tui_polygrid::engine::config::DEFAULT_LOG_PATH;
use tui_polygrid::engine::{
    init_logging, log_active_frame, AppConfig, ConfigArgs, FrameTicker, LogTarget,
};
use tui_polygrid::input::{handle_key_event, should_quit};
use tui_polygrid::term::{FrameBuffer, GridView, TerminalRenderer, Viewport};

/// Input poll timeout; bounds how late a frame change is drawn.
const POLL_MS: u64 = 50;

#[derive(Parser, Debug)]
#[command(name = "tui-polygrid", about = "Animated grid of extruded polygons in the terminal")]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config);

    let log_path = config
        .log_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_PATH));
    init_logging(LogTarget::File(log_path))?;

    if !config.map.has_token() {
        log::warn!("MAPBOX_ACCESS_TOKEN is not set; the basemap will not load");
    }

    let frames = config.generate_frames()?;
    let mut ticker = FrameTicker::start(frames.len(), config.tick_period())?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, &frames, &mut ticker);

    ticker.stop();
    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(e) = &result {
        log::error!("player stopped: {:#}", e);
    }
    result
}

fn run(
    term: &mut TerminalRenderer,
    config: &AppConfig,
    frames: &FrameSet,
    ticker: &mut FrameTicker,
) -> Result<()> {
    let view = GridView::default();
    let mut state = ViewState::new(config.mode, config.log_frames);
    let mut fb = FrameBuffer::new(0, 0);

    let mut index = ticker.current();
    let mut viewport = current_viewport();
    let mut dirty = true;

    if state.logs_frame_change() {
        log_active_frame(frames, index, state.mode);
    }

    loop {
        if dirty {
            if let Some(source) = frames.source(index, state.mode) {
                let snap = state.snapshot(frames, index, config.map.has_token());
                view.render_into(&snap, source, frames.spec(), viewport, &mut fb);
                term.draw(&fb)?;
            }
            dirty = false;
        }

        if event::poll(Duration::from_millis(POLL_MS))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        let log_now = state.apply_action(action);
                        log::info!(
                            "{}: mode={} log_frames={}",
                            action.as_str(),
                            state.mode.as_str(),
                            state.log_frames
                        );
                        if log_now {
                            log_active_frame(frames, index, state.mode);
                        }
                        dirty = true;
                    }
                }
                Event::Resize(w, h) => {
                    viewport = Viewport::new(w, h);
                    term.invalidate();
                    dirty = true;
                }
                _ => {}
            }
        }

        if let Some(next) = ticker.poll_changed() {
            index = next;
            if state.logs_frame_change() {
                log_active_frame(frames, index, state.mode);
            }
            dirty = true;
        }
    }
}

fn current_viewport() -> Viewport {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    Viewport::new(w, h)
}
