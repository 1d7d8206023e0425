use {
    crate::source::StatsSource,
    std::io::{self, Read},
    tracing::{debug, warn},
};

pub use self::{
    cpu_time::{CpuTime, Measurement},
    user_hz::UserHz,
};

mod cpu_time;
mod user_hz;

#[cfg(test)]
mod tests;

/// a snapshot of each cpu core's statistics at a moment in time.
///
/// cores appear in the order the kernel lists them, which is their stable index.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Snapshot {
    pub cpus: Vec<CpuTime>,
}

#[derive(Debug, thiserror::Error)]
pub enum StatReadError {
    /// the counter source could not be read.
    #[error("cpu statistics are unavailable: {0}")]
    SourceUnavailable(#[from] io::Error),
    /// a cpu record carried too few fields.
    #[error("malformed record `{record}`: expected at least 8 fields, found {fields}")]
    MalformedRecord { record: String, fields: usize },
}

// === impl Snapshot ===

impl Snapshot {
    /// the label of the line that sums every cpu. it is not a core of its own.
    const ALL_CPUS: &str = "cpu";

    /// reads every core's counters from the given source.
    pub fn read(stats: &impl StatsSource) -> Result<Snapshot, StatReadError> {
        let mut text = String::new();
        stats.open()?.read_to_string(&mut text)?;
        text.parse()
    }

    /// the number of cores in this snapshot.
    pub fn len(&self) -> usize {
        self.cpus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cpus.is_empty()
    }

    /// returns true if `label` names an individual core, e.g. `cpu3`.
    fn is_core(label: &str) -> bool {
        label
            .strip_prefix(Self::ALL_CPUS)
            .is_some_and(|id| !id.is_empty())
    }
}

impl std::str::FromStr for Snapshot {
    type Err = StatReadError;
    fn from_str(stat: &str) -> Result<Self, Self::Err> {
        let mut cpus = Vec::new();

        for line in stat.lines() {
            let mut tokens = line.split_whitespace();
            let Some(label) = tokens.next().filter(|label| Self::is_core(label)) else {
                continue;
            };
            let fields = tokens.collect::<Vec<_>>();
            cpus.push(CpuTime::from_fields(label, &fields)?);
        }

        Ok(Self { cpus })
    }
}
