use super::*;

/// how one cpu core has spent its time since boot.
///
/// a `CpuTime` is only meaningful next to a later `CpuTime` of the same core.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CpuTime {
    /// time spent in user mode.
    pub user: UserHz,
    /// time spent in user mode with low priority (nice).
    pub nice: UserHz,
    /// time spent in system mode.
    pub system: UserHz,
    /// time spent in the idle task.
    pub idle: UserHz,
    /// time waiting for i/o to complete.
    ///
    /// this value is not reliable, and may decrease in certain conditions.
    pub iowait: UserHz,
    /// time servicing interrupts.
    pub irq: UserHz,
    /// time servicing softirqs.
    pub softirq: UserHz,
    /// stolen time, which is the time spent in other operating systems when running in a
    /// virtualized environment.
    ///
    /// older kernels do not report this, in which case it is zero.
    pub steal: UserHz,
}

/// the difference between two [`CpuTime`]s of the same core.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Measurement {
    /// change in the sum of all eight counters.
    total: i128,
    /// change in idle plus iowait time.
    idle: i128,
}

// === impl CpuTime ===

impl CpuTime {
    /// the number of counters a cpu record must carry after its label.
    pub const REQUIRED: usize = 7;

    /// builds a `CpuTime` from the counter fields that follow a record's label.
    ///
    /// counters that are not valid integers are read as zero. a missing steal counter is zero.
    pub(super) fn from_fields(label: &str, fields: &[&str]) -> Result<Self, StatReadError> {
        if fields.len() < Self::REQUIRED {
            return Err(StatReadError::MalformedRecord {
                record: label.to_owned(),
                fields: fields.len() + 1,
            });
        }

        let counter = |i: usize| -> UserHz {
            let Some(field) = fields.get(i) else {
                return UserHz::ZERO;
            };
            field.parse().unwrap_or_else(|error| {
                debug!(%label, %field, %error, "unparsable counter, reading it as zero");
                UserHz::ZERO
            })
        };

        Ok(Self {
            user: counter(0),
            nice: counter(1),
            system: counter(2),
            idle: counter(3),
            iowait: counter(4),
            irq: counter(5),
            softirq: counter(6),
            steal: counter(7),
        })
    }

    /// time spent doing nothing: idle plus iowait.
    pub fn idle(&self) -> UserHz {
        let Self { idle, iowait, .. } = *self;
        idle + iowait
    }

    /// the sum of all eight counters.
    pub fn total(&self) -> UserHz {
        <[UserHz; 8]>::from(*self).into_iter().sum()
    }
}

impl From<[UserHz; 8]> for CpuTime {
    fn from([user, nice, system, idle, iowait, irq, softirq, steal]: [UserHz; 8]) -> Self {
        Self {
            user,
            nice,
            system,
            idle,
            iowait,
            irq,
            softirq,
            steal,
        }
    }
}

impl From<CpuTime> for [UserHz; 8] {
    fn from(
        CpuTime {
            user,
            nice,
            system,
            idle,
            iowait,
            irq,
            softirq,
            steal,
        }: CpuTime,
    ) -> Self {
        [user, nice, system, idle, iowait, irq, softirq, steal]
    }
}

// === impl Measurement ===

impl Measurement {
    /// compares an earlier reading `a` of a core with a later reading `b` of the same core.
    pub fn new(a: &CpuTime, b: &CpuTime) -> Self {
        let total = b.total() - a.total();
        let idle = b.idle() - a.idle();

        if total < 0 || idle < 0 {
            warn!(total, idle, "cpu counters went backwards");
        }

        Self { total, idle }
    }

    /// returns the percentage of time the core spent doing work.
    ///
    /// this is 0.0 when no time has elapsed. the result is not clamped, so regressing counters
    /// may yield a value outside `0.0..=100.0`.
    pub fn percentage(&self) -> f64 {
        let Self { total, idle } = *self;

        if total == 0 {
            return 0.0;
        }

        (total - idle) as f64 / total as f64 * 100.0
    }
}
