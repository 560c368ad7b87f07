//! Interpreter that draws an L-System state onto a pixel buffer.
//!
//! The entry point is [`TurtleRenderer`]. Configure it with a [`TurtleConfig`],
//! bind symbols to operations through [`DrawRules`], then call
//! [`TurtleRenderer::draw`] with an [`LSystem`] (or
//! [`TurtleRenderer::draw_str`] with any derived string). The finished buffer
//! is available from [`TurtleRenderer::image`] or written with
//! [`TurtleRenderer::save_png`].

use crate::canvas::{Canvas, Paint, PathCommand};
use crate::error::RenderError;
use crate::lsystem::LSystem;
use crate::turtle::{DrawRules, TurtleOp, TurtleState};
use glam::DVec2;
use image::{ImageFormat, RgbaImage};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

/// Heading the turtle starts with unless configured otherwise, in degrees.
///
/// With the renderer's axis convention this points along +X.
pub const DEFAULT_HEADING: f64 = 90.0;

/// Configuration for turtle rendering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurtleConfig {
    /// Heading (degrees) at the start of every draw. Default: [`DEFAULT_HEADING`].
    pub initial_heading: f64,
    /// Start position. `None` places the turtle at the buffer centre.
    pub initial_position: Option<DVec2>,
    /// Colour the buffer is cleared to on construction. `None` leaves it
    /// fully transparent.
    pub background: Option<[u8; 4]>,
    /// Fill and stroke settings for the final commit.
    pub paint: Paint,
    /// Maximum stack depth for push operations. `None` is unbounded; pushes
    /// beyond a set limit are dropped.
    pub max_stack_depth: Option<usize>,
}

impl Default for TurtleConfig {
    fn default() -> Self {
        Self {
            initial_heading: DEFAULT_HEADING,
            initial_position: None,
            background: None,
            paint: Paint::default(),
            max_stack_depth: None,
        }
    }
}

/// Walks a derived string and traces it as a single path on an owned canvas.
pub struct TurtleRenderer {
    canvas: Canvas,
    rules: DrawRules,
    config: TurtleConfig,
    initial: TurtleState,
    turtle: TurtleState,
    stack: Vec<TurtleState>,
}

impl TurtleRenderer {
    /// Creates a `width` x `height` renderer with the default configuration.
    pub fn new(width: u32, height: u32, rules: DrawRules) -> Self {
        Self::with_config(width, height, rules, TurtleConfig::default())
    }

    /// Creates a `width` x `height` renderer with an explicit configuration.
    pub fn with_config(width: u32, height: u32, rules: DrawRules, config: TurtleConfig) -> Self {
        let centre = DVec2::new((width / 2) as f64, (height / 2) as f64);
        let initial = TurtleState::new(
            config.initial_position.unwrap_or(centre),
            config.initial_heading,
        );

        Self {
            canvas: Canvas::new(width, height, config.background),
            rules,
            config,
            initial,
            turtle: initial,
            stack: Vec::new(),
        }
    }

    /// Draws the current state of `system`.
    pub fn draw(&mut self, system: &LSystem) {
        self.draw_str(system.state());
    }

    /// Interprets `symbols` and commits the resulting path to the buffer.
    ///
    /// The turtle is reset to its initial state and the stack emptied first.
    /// The path is rebuilt from scratch, but pixels from an earlier draw stay
    /// in the buffer.
    pub fn draw_str(&mut self, symbols: &str) {
        self.turtle = self.initial;
        self.stack.clear();
        self.canvas.begin_path();
        self.canvas.move_to(self.turtle.position);

        let mut consumed = 0usize;
        let mut ignored_pops = 0usize;

        for symbol in symbols.chars() {
            let Some(op) = self.rules.get(symbol) else {
                continue;
            };
            consumed += 1;

            match op {
                TurtleOp::Forward(length) => {
                    let next = self.turtle.ahead(length as f64);
                    self.canvas.line_to(next);
                    self.turtle.position = next;
                }
                TurtleOp::Turn(degrees) => self.turtle.turn(degrees as f64),
                TurtleOp::Push => {
                    if self
                        .config
                        .max_stack_depth
                        .is_none_or(|max| self.stack.len() < max)
                    {
                        self.stack.push(self.turtle);
                    } else {
                        trace!("push dropped at stack depth {}", self.stack.len());
                    }
                }
                TurtleOp::Pop => match self.stack.pop() {
                    Some(saved) => {
                        self.turtle = saved;
                        self.canvas.move_to(saved.position);
                    }
                    None => {
                        ignored_pops += 1;
                        trace!("pop ignored on empty stack");
                    }
                },
            }
        }

        self.canvas.fill_stroke(&self.config.paint);

        debug!(
            "drew {} of {} symbols: {} segments, {} unmatched pops",
            consumed,
            symbols.chars().count(),
            self.canvas.segment_count(),
            ignored_pops
        );
    }

    /// Current position and heading of the turtle.
    pub fn state(&self) -> TurtleState {
        self.turtle
    }

    /// The state every draw starts from.
    pub fn initial_state(&self) -> TurtleState {
        self.initial
    }

    /// Number of states currently saved by push operations.
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// The path built by the last draw.
    pub fn path(&self) -> &[PathCommand] {
        self.canvas.path()
    }

    /// The symbol bindings used for interpretation.
    pub fn rules(&self) -> &DrawRules {
        &self.rules
    }

    /// The configuration this renderer was built with.
    pub fn config(&self) -> &TurtleConfig {
        &self.config
    }

    /// The pixel buffer, including everything committed so far.
    pub fn image(&self) -> &RgbaImage {
        self.canvas.image()
    }

    /// Consumes the renderer and returns its pixel buffer.
    pub fn into_image(self) -> RgbaImage {
        self.canvas.into_image()
    }

    /// Encodes the buffer as PNG into `writer`.
    pub fn write_png<W: Write + Seek>(&self, writer: &mut W) -> Result<(), RenderError> {
        self.canvas.image().write_to(writer, ImageFormat::Png)?;
        Ok(())
    }

    /// Writes the buffer to `path` as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        let path = path.as_ref();
        let mut out = BufWriter::new(File::create(path)?);
        self.write_png(&mut out)?;
        out.flush()?;

        debug!(
            "saved {}x{} image to {}",
            self.canvas.width(),
            self.canvas.height(),
            path.display()
        );
        Ok(())
    }
}
