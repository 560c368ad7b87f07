//! Turtle state and drawing operations.

use crate::grammar::Symbol;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Position and heading of the drawing turtle.
///
/// Headings are in degrees and never normalised. A heading of 0 points along
/// +Y; increasing the heading rotates toward +X.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurtleState {
    /// Current position in pixel space.
    pub position: DVec2,

    /// Current heading in degrees.
    pub heading: f64,
}

impl TurtleState {
    /// Creates a state at `position` facing `heading` degrees.
    pub fn new(position: DVec2, heading: f64) -> Self {
        Self { position, heading }
    }

    /// The point `distance` units ahead along the current heading.
    pub fn ahead(&self, distance: f64) -> DVec2 {
        let rad = self.heading.to_radians();
        let offset = DVec2::new(rad.sin() * distance, rad.cos() * distance);
        offset + self.position
    }

    /// Rotates the heading by `degrees` (signed).
    pub fn turn(&mut self, degrees: f64) {
        self.heading += degrees;
    }
}

/// Operations the turtle performs for a symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurtleOp {
    /// Draw a segment of the given length along the heading.
    Forward(i32),
    /// Add the given number of degrees to the heading.
    Turn(i32),
    /// Save position and heading onto the stack (`[`).
    Push,
    /// Restore the most recently pushed state (`]`). No-op on an empty stack.
    Pop,
}

/// Symbol -> [`TurtleOp`] bindings used by the renderer.
///
/// Symbols with no binding are skipped during interpretation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawRules {
    ops: HashMap<Symbol, TurtleOp>,
}

impl DrawRules {
    /// Creates a table with no bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `symbol` to `op`, replacing any existing binding.
    pub fn add(&mut self, symbol: Symbol, op: TurtleOp) -> &mut Self {
        self.ops.insert(symbol, op);
        self
    }

    /// By-value variant of [`add`](Self::add).
    pub fn with(mut self, symbol: Symbol, op: TurtleOp) -> Self {
        self.add(symbol, op);
        self
    }

    /// Binds the conventional branch symbols: `[` to push and `]` to pop.
    pub fn add_brackets(&mut self) -> &mut Self {
        self.add('[', TurtleOp::Push).add(']', TurtleOp::Pop)
    }

    /// The operation bound to `symbol`, if any.
    pub fn get(&self, symbol: Symbol) -> Option<TurtleOp> {
        self.ops.get(&symbol).copied()
    }

    /// Number of bound symbols.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// True when no symbol is bound.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}
