use {
    super::*,
    crate::{
        meter::Meter,
        sentinel::Recording,
        stat::{Snapshot, StatReadError},
    },
    crossterm::{
        QueueableCommand, cursor,
        terminal::{self, ClearType},
    },
    std::{
        io::Write,
        sync::mpsc::{Receiver, RecvTimeoutError},
        time::Duration,
    },
    tracing::{debug, info, warn},
};

/// a terminal that frames can be drawn to.
pub trait Screen: Write {
    /// returns the current number of columns.
    fn columns(&mut self) -> io::Result<u16>;
}

/// the controlling terminal, via standard output.
#[derive(Debug)]
pub struct Tty {
    stdout: io::Stdout,
}

/// where the refresh loop is within a cycle.
#[derive(Debug)]
enum State {
    /// take the first snapshot of a cycle.
    Sampling,
    /// wait out the sampling window.
    Waiting { first: Snapshot },
    /// take the second snapshot of a cycle.
    Resampling { first: Snapshot },
    /// draw the cycle's frame.
    Rendering { first: Snapshot, second: Snapshot },
    /// a read failed. pause, then start a new cycle.
    ErrorBackoff { pause: Duration },
}

// === impl App ===

impl<S, T> App<S, T>
where
    S: StatsSource,
    T: Screen,
{
    /// runs the refresh loop.
    ///
    /// this returns `Ok(())` once `cancel` receives a message or is disconnected. the loop
    /// checks for cancellation whenever it pauses. failing to read kernel statistics is
    /// reported on screen and retried; failing to query the terminal size is fatal.
    pub fn run(mut self, cancel: &Receiver<()>) -> Result<(), Error> {
        info!(config = ?self.config, "starting refresh loop");

        let mut state = State::Sampling;
        while let Some(next) = self.step(state, cancel)? {
            state = next;
        }

        debug!("refresh loop cancelled");
        Ok(())
    }

    /// advances the loop by one state. returns `None` if the loop was cancelled.
    fn step(&mut self, state: State, cancel: &Receiver<()>) -> Result<Option<State>, Error> {
        let Config {
            interval,
            retry_backoff,
            resample_backoff,
            ..
        } = self.config;

        let next = match state {
            State::Sampling => match self.sentinel.sample() {
                Ok(first) => {
                    self.resize()?;
                    State::Waiting { first }
                }
                Err(error) => {
                    self.report(&error)?;
                    State::ErrorBackoff {
                        pause: retry_backoff,
                    }
                }
            },
            State::Waiting { first } => {
                if Self::cancelled(cancel, interval) {
                    return Ok(None);
                }
                State::Resampling { first }
            }
            State::Resampling { first } => match self.sentinel.sample() {
                Ok(second) => State::Rendering { first, second },
                Err(error) => {
                    self.report(&error)?;
                    State::ErrorBackoff {
                        pause: resample_backoff,
                    }
                }
            },
            State::Rendering { first, second } => {
                self.draw(&Recording::new(&first, &second))?;
                State::Sampling
            }
            State::ErrorBackoff { pause } => {
                if Self::cancelled(cancel, pause) {
                    return Ok(None);
                }
                State::Sampling
            }
        };

        Ok(Some(next))
    }

    /// queries the terminal's width, clearing the screen if it has changed.
    fn resize(&mut self) -> Result<(), Error> {
        let columns = self.screen.columns().map_err(Error::Geometry)?;

        if self.columns.replace(columns) != Some(columns) {
            debug!(columns, "terminal width changed, clearing the screen");
            self.screen
                .queue(cursor::MoveTo(0, 0))?
                .queue(terminal::Clear(ClearType::All))?;
        }

        Ok(())
    }

    /// draws one bar per core, then homes the cursor so the next frame overwrites this one.
    fn draw(&mut self, recording: &Recording) -> Result<(), Error> {
        let Self {
            screen,
            config: Config { fill, .. },
            columns,
            ..
        } = self;
        let width = columns.map(usize::from).unwrap_or_default();

        for percent in recording.percentages() {
            writeln!(screen, "{}", Meter::new(percent, width, *fill))?;
        }

        screen.queue(cursor::MoveTo(0, 0))?.flush()?;

        Ok(())
    }

    fn report(&mut self, error: &StatReadError) -> Result<(), Error> {
        warn!(%error, "failed to read cpu statistics");

        writeln!(self.screen, "Error reading CPU stats: {error}")?;
        self.screen.flush()?;

        Ok(())
    }

    /// waits for `pause`, returning true if the loop should stop.
    fn cancelled(cancel: &Receiver<()>, pause: Duration) -> bool {
        match cancel.recv_timeout(pause) {
            Err(RecvTimeoutError::Timeout) => false,
            Ok(()) | Err(RecvTimeoutError::Disconnected) => true,
        }
    }
}

// === impl Tty ===

impl Default for Tty {
    fn default() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }
}

impl Screen for Tty {
    fn columns(&mut self) -> io::Result<u16> {
        terminal::size().map(|(cols, _rows)| cols)
    }
}

impl Write for Tty {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stdout.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }
}
