//! Alphabet and production rules for L-System grammars.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single grammar symbol.
pub type Symbol = char;

/// The symbols a grammar is defined over.
///
/// Purely descriptive: the derivation and drawing logic never consult it, so
/// duplicates and symbols without productions are tolerated.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alphabet {
    /// Symbols that are expected to be rewritten.
    pub variables: Vec<Symbol>,
    /// Symbols that are expected to survive derivation unchanged.
    pub constants: Vec<Symbol>,
}

impl Alphabet {
    /// Creates an empty alphabet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an alphabet from two symbol strings, e.g. `Alphabet::from_symbols("AB", "+-")`.
    pub fn from_symbols(variables: &str, constants: &str) -> Self {
        Self {
            variables: variables.chars().collect(),
            constants: constants.chars().collect(),
        }
    }

    /// Appends a variable symbol.
    pub fn add_variable(&mut self, symbol: Symbol) -> &mut Self {
        self.variables.push(symbol);
        self
    }

    /// Appends a constant symbol.
    pub fn add_constant(&mut self, symbol: Symbol) -> &mut Self {
        self.constants.push(symbol);
        self
    }

    /// Whether `symbol` was listed as a variable.
    pub fn is_variable(&self, symbol: Symbol) -> bool {
        self.variables.contains(&symbol)
    }

    /// Whether `symbol` was listed as a constant.
    pub fn is_constant(&self, symbol: Symbol) -> bool {
        self.constants.contains(&symbol)
    }
}

/// Production rules: symbol -> replacement string.
///
/// At most one production exists per symbol; adding a second one for the same
/// symbol replaces the first. Symbols without a production rewrite to
/// themselves.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTable {
    rules: HashMap<Symbol, String>,
}

impl RuleTable {
    /// Creates a table with no productions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the production for `symbol`.
    pub fn add(&mut self, symbol: Symbol, replacement: impl Into<String>) -> &mut Self {
        self.rules.insert(symbol, replacement.into());
        self
    }

    /// By-value variant of [`add`](Self::add) for one-expression construction.
    pub fn with(mut self, symbol: Symbol, replacement: impl Into<String>) -> Self {
        self.add(symbol, replacement);
        self
    }

    /// Returns the production for `symbol`, if one was registered.
    pub fn get(&self, symbol: Symbol) -> Option<&str> {
        self.rules.get(&symbol).map(String::as_str)
    }

    /// Number of symbols with a production.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when every symbol rewrites to itself.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates over `(symbol, production)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &str)> {
        self.rules.iter().map(|(&s, r)| (s, r.as_str()))
    }
}
