use {
    crate::{
        source::{ProcStatFile, StatsSource},
        stat::{Measurement, Snapshot, StatReadError},
    },
    tracing::{trace, warn},
};

/// observes kernel statistics.
#[derive(Debug, Default)]
pub struct Sentinel<S = ProcStatFile> {
    /// the underlying source of kernel statistics.
    source: S,
}

/// a recording of the system's cpu load between two snapshots.
#[derive(Clone, Debug, PartialEq)]
pub struct Recording {
    /// how each cpu spent its time, by stable core index.
    pub cpus: Vec<Measurement>,
}

// === impl Sentinel ===

impl<S> Sentinel<S> {
    /// creates a new [`Sentinel`] that reads from `source`.
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

impl<S: StatsSource> Sentinel<S> {
    /// takes a fresh snapshot of every core.
    pub fn sample(&self) -> Result<Snapshot, StatReadError> {
        let Self { source } = self;

        let snapshot = Snapshot::read(source)?;
        trace!(cores = snapshot.len(), "sampled cpu statistics");

        Ok(snapshot)
    }
}

// === impl Recording ===

impl Recording {
    /// compares each core in `a` with the same core in the later snapshot `b`.
    ///
    /// if the two snapshots disagree on the number of cores, only the indices present in both
    /// are recorded.
    pub fn new(a: &Snapshot, b: &Snapshot) -> Recording {
        if a.len() != b.len() {
            warn!(before = a.len(), after = b.len(), "cpu count changed between samples");
        }

        let cpus = a
            .cpus
            .iter()
            .zip(&b.cpus)
            .map(|(a, b)| Measurement::new(a, b))
            .collect();

        Self { cpus }
    }

    /// returns each core's utilization percentage, in core order.
    pub fn percentages(&self) -> impl Iterator<Item = f64> + '_ {
        self.cpus.iter().map(Measurement::percentage)
    }
}
