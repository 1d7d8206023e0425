//! a live per-core cpu bar meter.
//!
//! each refresh cycle reads `/proc/stat` twice, a short window apart, and draws one bar per
//! core whose filled length is that core's utilization over the window.

use {self::sentinel::Sentinel, std::io};

pub use self::{
    config::Config,
    meter::Meter,
    source::{ProcStatFile, StatsSource},
    stat::{CpuTime, Measurement, Snapshot, StatReadError, UserHz},
    window::{Screen, Tty},
};

mod config;
mod meter;
mod sentinel;
mod source;
/// kernel statistics facilities.
///
/// this file provides tools to interact with `/proc/stat`.
mod stat;
mod window;

/// the refresh loop.
///
/// see [`App::run()`].
pub struct App<S = ProcStatFile, T = Tty> {
    /// samples the counter source.
    sentinel: Sentinel<S>,
    /// the terminal being drawn to.
    screen: T,
    config: Config,
    /// the width of the terminal during the previous cycle, if any.
    columns: Option<u16>,
}

/// an error that stops the refresh loop.
///
/// failures to read kernel statistics are not among these; the loop reports them and retries.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to query the terminal size: {0}")]
    Geometry(#[source] io::Error),
    #[error("failed to write to the terminal: {0}")]
    Output(#[from] io::Error),
}

// === impl App ===

impl App {
    /// initializes a new application, drawing `/proc/stat` to standard output.
    pub fn new(config: Config) -> Self {
        Self::with(ProcStatFile, Tty::default(), config)
    }
}

impl<S, T> App<S, T> {
    fn with(source: S, screen: T, config: Config) -> Self {
        Self {
            sentinel: Sentinel::new(source),
            screen,
            config,
            columns: None,
        }
    }
}
