use std::{
    fmt::{self, Display, Write},
    iter::repeat_n,
};

/// a horizontal bar showing how busy a cpu core was.
#[derive(Clone, Copy, Debug)]
pub struct Meter {
    /// utilization, as a percentage.
    pub value: f64,
    /// the number of columns a fully idle bar occupies.
    pub width: usize,
    /// the glyph drawn for busy time.
    pub fill: char,
}

// === impl Meter ===

impl Meter {
    pub fn new(value: f64, width: usize, fill: char) -> Self {
        Self { value, width, fill }
    }

    /// renders the bar into a string.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// the number of filled columns, truncated toward zero.
    ///
    /// this is not capped at `width`, so a value above 100% overflows the bar.
    fn filled(&self) -> usize {
        let Self { value, width, .. } = *self;
        // NB: float-to-int casts saturate, so negative and NaN values become 0.
        (value / 100.0 * width as f64).max(0.0) as usize
    }
}

impl Display for Meter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const IDLE: char = ' ';

        let Self { width, fill, .. } = *self;
        let filled = self.filled();
        let idle = width.saturating_sub(filled);

        repeat_n(fill, filled)
            .chain(repeat_n(IDLE, idle))
            .try_for_each(|c| f.write_char(c))
    }
}
