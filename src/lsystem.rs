//! Dragon curve L-system
//!
//! Axiom: F, Rules: F → F-H, H → F+H, Angle: 90°
//! Both F and H draw a forward step; + and - turn by a quarter.

use std::f64::consts::SQRT_2;
use std::fmt;

/// One symbol of a production
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    F,
    H,
    Plus,
    Minus,
}

impl Symbol {
    #[allow(dead_code)]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'F' => Some(Symbol::F),
            'H' => Some(Symbol::H),
            '+' => Some(Symbol::Plus),
            '-' => Some(Symbol::Minus),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Symbol::F => 'F',
            Symbol::H => 'H',
            Symbol::Plus => '+',
            Symbol::Minus => '-',
        }
    }

    /// F and H move the cursor; turns only rotate it
    pub fn draws(self) -> bool {
        matches!(self, Symbol::F | Symbol::H)
    }
}

/// Rewrite rules for the two draw symbols. Turns are always copied through.
#[derive(Debug, Clone)]
pub struct Grammar {
    pub rule_f: Vec<Symbol>,
    pub rule_h: Vec<Symbol>,
}

impl Grammar {
    /// The paper-folding dragon: F → F-H, H → F+H
    pub fn dragon() -> Self {
        Self {
            rule_f: vec![Symbol::F, Symbol::Minus, Symbol::H],
            rule_h: vec![Symbol::F, Symbol::Plus, Symbol::H],
        }
    }

    fn rewrite(&self, current: &[Symbol]) -> Vec<Symbol> {
        let mut next = Vec::with_capacity(current.len() * 2 + 1);
        for &sym in current {
            match sym {
                Symbol::F => next.extend_from_slice(&self.rule_f),
                Symbol::H => next.extend_from_slice(&self.rule_h),
                turn => next.push(turn),
            }
        }
        next
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Self::dragon()
    }
}

/// A fully rewritten symbol sequence plus the step length it is drawn with
#[derive(Debug, Clone)]
pub struct Production {
    symbols: Vec<Symbol>,
    generations: u32,
    step_length: f64,
}

impl Production {
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    #[allow(dead_code)]
    pub fn generations(&self) -> u32 {
        self.generations
    }

    /// Length of one drawn segment. Shrinks by √2 per generation so every
    /// depth covers roughly the same extent.
    pub fn step_length(&self) -> f64 {
        self.step_length
    }

    /// Number of segments this production will draw
    #[allow(dead_code)]
    pub fn draw_count(&self) -> usize {
        self.symbols.iter().filter(|s| s.draws()).count()
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for sym in &self.symbols {
            write!(f, "{}", sym.as_char())?;
        }
        Ok(())
    }
}

/// Rewrite `axiom` under `grammar` exactly `generations` times
pub fn generate(grammar: &Grammar, axiom: &[Symbol], generations: u32, base_length: f64) -> Production {
    let mut symbols = axiom.to_vec();
    let mut step_length = base_length;

    for _ in 0..generations {
        symbols = grammar.rewrite(&symbols);
        step_length /= SQRT_2;
    }

    Production {
        symbols,
        generations,
        step_length,
    }
}

/// Dragon curve from the standard axiom "F"
pub fn dragon(generations: u32, base_length: f64) -> Production {
    generate(&Grammar::dragon(), &[Symbol::F], generations, base_length)
}
