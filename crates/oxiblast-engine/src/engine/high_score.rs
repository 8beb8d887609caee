use std::convert::Infallible;

/// Persistence backend for the best score.
///
/// The engine reads the value once when a round is created and writes it when
/// a finished round beats it. Storage failures never interrupt play: a failed
/// read is treated as a high score of zero and a failed write is dropped, both
/// with a warning in the log.
pub trait HighScoreStore {
    type Error: std::error::Error;

    fn read(&self) -> Result<u64, Self::Error>;

    fn write(&mut self, value: u64) -> Result<(), Self::Error>;
}

impl<S> HighScoreStore for &mut S
where
    S: HighScoreStore + ?Sized,
{
    type Error = S::Error;

    fn read(&self) -> Result<u64, Self::Error> {
        (**self).read()
    }

    fn write(&mut self, value: u64) -> Result<(), Self::Error> {
        (**self).write(value)
    }
}

/// In-memory store, used by default and by simulations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryHighScoreStore {
    value: u64,
}

impl MemoryHighScoreStore {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self { value }
    }

    #[must_use]
    pub const fn value(&self) -> u64 {
        self.value
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    type Error = Infallible;

    fn read(&self) -> Result<u64, Self::Error> {
        Ok(self.value)
    }

    fn write(&mut self, value: u64) -> Result<(), Self::Error> {
        self.value = value;
        Ok(())
    }
}

pub(crate) fn load_or_zero<S>(store: &S) -> u64
where
    S: HighScoreStore + ?Sized,
{
    store.read().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to read high score, starting from 0");
        0
    })
}

pub(crate) fn save_or_warn<S>(store: &mut S, value: u64)
where
    S: HighScoreStore + ?Sized,
{
    if let Err(e) = store.write(value) {
        tracing::warn!(error = %e, value, "failed to persist high score");
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::io;

    use super::*;

    /// Store whose every operation fails.
    #[derive(Debug, Default)]
    pub(crate) struct FailingStore {
        pub(crate) writes: usize,
    }

    impl HighScoreStore for FailingStore {
        type Error = io::Error;

        fn read(&self) -> Result<u64, Self::Error> {
            Err(io::Error::other("read failed"))
        }

        fn write(&mut self, _value: u64) -> Result<(), Self::Error> {
            self.writes += 1;
            Err(io::Error::other("write failed"))
        }
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryHighScoreStore::new(5);
        assert_eq!(store.read().unwrap(), 5);
        store.write(42).unwrap();
        assert_eq!(store.value(), 42);
    }

    #[test]
    fn test_store_through_mutable_reference() {
        let mut store = MemoryHighScoreStore::default();
        {
            let mut by_ref = &mut store;
            by_ref.write(7).unwrap();
            assert_eq!(by_ref.read().unwrap(), 7);
        }
        assert_eq!(store.value(), 7);
    }

    #[test]
    fn test_failures_are_absorbed() {
        let mut store = FailingStore::default();
        assert_eq!(load_or_zero(&store), 0);
        save_or_warn(&mut store, 10);
        assert_eq!(store.writes, 1);
    }
}
