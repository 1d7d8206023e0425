use std::{
    fs::File,
    io::{self, BufReader, Read},
};

#[cfg(test)]
use std::{cell::RefCell, collections::VecDeque, io::Cursor};

/// a source of kernel statistics.
pub trait StatsSource {
    /// returns a reader over a fresh copy of the statistics table.
    fn open(&self) -> io::Result<impl Read>;
}

/// stats backed by `/proc/stat`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcStatFile;

/// a mock stat source.
///
/// each call to [`StatsSource::open()`] yields the next queued table. a `None` entry behaves as
/// though the table could not be opened.
#[cfg(test)]
#[derive(Default)]
pub struct MockStatFile {
    stats: RefCell<VecDeque<Option<String>>>,
}

// === impl ProcStatFile ===

impl StatsSource for ProcStatFile {
    fn open(&self) -> io::Result<impl Read> {
        File::open(Self::STAT).map(BufReader::new)
    }
}

impl ProcStatFile {
    const STAT: &str = "/proc/stat";
}

// === impl MockStatFile ===

#[cfg(test)]
impl MockStatFile {
    pub fn new<I, T>(stats: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let stats = stats.into_iter().map(Into::into).map(Some).collect();
        Self {
            stats: RefCell::new(stats),
        }
    }

    /// a source that fails once, the next time it is opened.
    pub fn unavailable() -> Self {
        Self::default().then_fail()
    }

    /// queues a table.
    pub fn then(self, stat: impl Into<String>) -> Self {
        self.stats.borrow_mut().push_back(Some(stat.into()));
        self
    }

    /// queues a failure.
    pub fn then_fail(self) -> Self {
        self.stats.borrow_mut().push_back(None);
        self
    }
}

#[cfg(test)]
impl StatsSource for MockStatFile {
    fn open(&self) -> io::Result<impl Read> {
        let Self { stats } = self;

        stats
            .borrow_mut()
            .pop_front()
            .expect("mock stats should not be empty")
            .map(Cursor::new)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }
}
