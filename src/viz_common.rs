//! Shared utilities for the CLI and the viewer binary.
//!
//! Argument parsing for picking a spiral, one-shot generation with timing,
//! conversion to an egui texture, and the pan/zoom state of the viewer.

use std::time::Instant;

use crate::grid::Grid;
use crate::{Algorithm, Result, SpiralGenerator};

/// Side length used when none is given.
pub const DEFAULT_SIZE: i64 = 1000;
/// Initial on-screen magnification of the grid.
pub const DISPLAY_SCALE: f32 = 7.0;
/// Pixels moved per frame while a pan key is held.
pub const PAN_SPEED: f32 = 5.0;
pub const ZOOM_FACTOR: f32 = 1.1;
/// Upper bound on the displayed side length, in pixels.
pub const MAX_DISPLAY_SIZE: f32 = 20000.0;

/// Which spiral to draw and how large.
#[derive(Debug, Clone, clap::Args)]
pub struct SpiralArgs {
    /// Spiral layout
    #[arg(long, value_enum, default_value_t = Algorithm::Sacks)]
    pub algorithm: Algorithm,

    /// Spiral size: integers 1..size² are placed
    #[arg(long, default_value_t = DEFAULT_SIZE, allow_negative_numbers = true)]
    pub size: i64,
}

impl SpiralArgs {
    pub fn build(&self) -> Result<Box<dyn SpiralGenerator + Send + Sync>> {
        self.algorithm.build(self.size)
    }
}

/// Build the generator and run it once, logging how long it took.
pub fn generate(args: &SpiralArgs) -> Result<(Box<dyn SpiralGenerator + Send + Sync>, Grid)> {
    log::info!(
        "Generating {} spiral (size {})...",
        args.algorithm.name(),
        args.size
    );
    let start = Instant::now();
    let generator = args.build()?;
    let grid = generator.generate()?;
    log::info!(
        "Done in {:.2?}: {}x{} grid.",
        start.elapsed(),
        grid.dim(),
        grid.dim()
    );
    Ok((generator, grid))
}

/// Texture-ready copy of the grid.
pub fn to_color_image(grid: &Grid) -> egui::ColorImage {
    egui::ColorImage::from_rgb([grid.dim(), grid.dim()], &grid.to_rgb_bytes())
}

/// Format a number with comma separators: 1000000 → "1,000,000"
pub fn format_num(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

// ─── View state ─────────────────────────────────────────────────────────────

/// Where the spiral image sits in the window and how big it is drawn.
///
/// Zooming re-centers the image; panning moves it by a fixed step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    /// Displayed side length in pixels.
    pub display_size: f32,
    /// Top-left corner of the image in window coordinates.
    pub pos: [f32; 2],
    window: [f32; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pan {
    Left,
    Right,
    Up,
    Down,
}

impl ViewState {
    pub fn new(size: i64, window: [f32; 2]) -> Self {
        let mut view = ViewState {
            display_size: (size as f32 * DISPLAY_SCALE).min(MAX_DISPLAY_SIZE),
            pos: [0.0, 0.0],
            window,
        };
        view.recenter();
        view
    }

    pub fn recenter(&mut self) {
        let half = (self.display_size / 2.0).floor();
        self.pos = [
            (self.window[0] / 2.0).floor() - half,
            (self.window[1] / 2.0).floor() - half,
        ];
    }

    /// Track the window size; the image keeps its position until the next zoom.
    pub fn set_window(&mut self, window: [f32; 2]) {
        self.window = window;
    }

    /// Keys move the image the opposite way, like dragging the view.
    pub fn pan(&mut self, dir: Pan) {
        match dir {
            Pan::Left => self.pos[0] += PAN_SPEED,
            Pan::Right => self.pos[0] -= PAN_SPEED,
            Pan::Up => self.pos[1] += PAN_SPEED,
            Pan::Down => self.pos[1] -= PAN_SPEED,
        }
    }

    pub fn zoom_in(&mut self) {
        self.display_size = (self.display_size * ZOOM_FACTOR).min(MAX_DISPLAY_SIZE);
        self.recenter();
    }

    /// Floor-divides by the zoom factor; never shrinks below one pixel.
    pub fn zoom_out(&mut self) {
        self.display_size = (self.display_size / ZOOM_FACTOR).floor().max(1.0);
        self.recenter();
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
