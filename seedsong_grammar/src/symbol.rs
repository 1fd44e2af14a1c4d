// Reserved drawing symbols and positions within an expanded path.
//
// seedsong's alphabet is open: any `char` may appear in an axiom or a
// replacement, and unknown symbols pass through expansion and both
// interpreter walks untouched. The interpreters recognize a small reserved
// subset, classified here so the draw walk and the tone walk can never
// disagree about what counts as a step.
//
// `SourceSpan` lives here too: it is a range of positions in an expanded
// path, the coordinate system both walks share. The tone walk stamps each
// note with the span of step symbols that sounded it; the draw walk uses the
// currently-playing span to highlight those same segments.
//
// See also: `expand.rs` for the rewriting engine (which treats every symbol
// uniformly), `rules.rs` for the validated symbol → replacement mapping.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The symbols the interpreters give meaning to. Everything else is a no-op,
/// kept for forward compatibility (and for steering rewriting, as `X`-style
/// scaffold symbols in classic grammars do).
pub const RESERVED: [char; 7] = ['F', 'G', '+', '-', '[', ']', '$'];

/// Step symbols: move forward and draw (draw walk), extend the current note
/// run (tone walk). `F` and `G` behave identically; two-symbol grammars like
/// the dragon curve use the distinction only to steer rewriting.
pub fn is_step(symbol: char) -> bool {
    matches!(symbol, 'F' | 'G')
}

/// Whether `symbol` has a reserved meaning for the interpreters.
pub fn is_reserved(symbol: char) -> bool {
    RESERVED.contains(&symbol)
}

/// A half-open range `[start, end)` of symbol indices within an expanded
/// path. Indices count symbols (char positions), never bytes.
///
/// A span produced by the tone walk covers exactly the run of step symbols
/// that sounded one note, so its end index is never itself a step symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpan {
    pub start: usize,
    pub end: usize,
}

impl SourceSpan {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of symbols covered.
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(self) -> bool {
        self.end <= self.start
    }

    /// Whether the symbol at `index` falls inside the span.
    pub fn contains(self, index: usize) -> bool {
        self.start <= index && index < self.end
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
