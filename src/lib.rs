//! # turtle-lsystem
//!
//! Deterministic, context-free L-Systems and a 2D turtle that draws them.
//!
//! A grammar ([`Alphabet`] + [`RuleTable`]) drives an [`LSystem`] through any
//! number of simultaneous rewrite rounds. The derived string is then walked by
//! a [`TurtleRenderer`], which maps symbols to [`TurtleOp`]s through
//! [`DrawRules`], traces one path with push/pop branching, and commits it to an
//! RGBA buffer that can be exported as PNG.
//!
//! ```
//! use turtle_lsystem::{Alphabet, DrawRules, LSystem, RuleTable, TurtleOp, TurtleRenderer};
//!
//! let rules = RuleTable::new().with('A', "B-A-B").with('B', "A+B+A");
//! let mut system = LSystem::new("A", Alphabet::from_symbols("AB", "+-"), rules);
//! system.run(2);
//! assert_eq!(system.state(), "A+B+A-B-A-B-A+B+A");
//!
//! let draw = DrawRules::new()
//!     .with('A', TurtleOp::Forward(10))
//!     .with('B', TurtleOp::Forward(10))
//!     .with('-', TurtleOp::Turn(-60))
//!     .with('+', TurtleOp::Turn(60));
//! let mut renderer = TurtleRenderer::new(256, 256, draw);
//! renderer.draw(&system);
//! assert_eq!(renderer.image().dimensions(), (256, 256));
//! ```

pub mod canvas;
pub mod error;
pub mod grammar;
pub mod interpreter;
pub mod lsystem;
pub mod turtle;

pub use canvas::*;
pub use error::*;
pub use grammar::*;
pub use interpreter::*;
pub use lsystem::*;
pub use turtle::*;
