//! a live per-core cpu bar meter.

use {
    anyhow::{Context, anyhow, bail},
    corebar::{App, Config, Error},
    std::{
        io,
        panic::{self, AssertUnwindSafe},
        sync::mpsc::{self, Receiver, Sender},
        thread::{self, JoinHandle},
    },
    tracing::info,
    tracing_subscriber::EnvFilter,
};

/// why the main thread woke up.
enum Event {
    /// an interrupt or termination request arrived.
    Interrupted,
    /// the refresh loop stopped on its own.
    Stopped(Result<(), Error>),
    /// the refresh loop panicked.
    Panicked,
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let (events_tx, events) = mpsc::channel();
    let (cancel, cancel_rx) = mpsc::channel();

    ctrlc::set_handler({
        let events_tx = events_tx.clone();
        move || {
            let _ = events_tx.send(Event::Interrupted);
        }
    })
    .context("failed to install the interrupt handler")?;

    let app = App::new(Config::default());
    let refresh = spawn_refresh(move || app.run(&cancel_rx), events_tx)
        .context("failed to spawn the refresh loop")?;

    supervise(&events, &cancel, refresh)
}

/// runs the refresh loop on its own thread, reporting how it ended to `events`.
fn spawn_refresh<F>(run: F, events: Sender<Event>) -> io::Result<JoinHandle<()>>
where
    F: FnOnce() -> Result<(), Error> + Send + 'static,
{
    thread::Builder::new()
        .name("refresh".to_owned())
        .spawn(move || {
            let event = match panic::catch_unwind(AssertUnwindSafe(run)) {
                Ok(result) => Event::Stopped(result),
                Err(_) => Event::Panicked,
            };
            let _ = events.send(event);
        })
}

/// waits for an interrupt or for the refresh loop to stop, whichever comes first.
///
/// an interrupt cancels the loop and exits cleanly. the loop stopping on its own is a failure.
fn supervise(
    events: &Receiver<Event>,
    cancel: &Sender<()>,
    refresh: JoinHandle<()>,
) -> anyhow::Result<()> {
    let event = events.recv().unwrap_or(Event::Interrupted);

    if let Event::Interrupted = event {
        info!("interrupted, stopping the refresh loop");
        let _ = cancel.send(());
    }

    refresh
        .join()
        .map_err(|_| anyhow!("the refresh loop panicked"))?;

    match event {
        Event::Interrupted => {
            println!("Exiting...");
            Ok(())
        }
        Event::Stopped(result) => result.context("the refresh loop stopped"),
        Event::Panicked => bail!("the refresh loop panicked"),
    }
}

/// logs to standard error, so that log lines do not land inside a frame.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
