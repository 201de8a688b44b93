use std::mem;

use tracing::{debug, trace};

use crate::coding::{fixed, varint};
use crate::error::{Error, Result, Violation};
use crate::sstable::block::BlockOptions;

/// Accumulates sorted key-value pairs and serializes them into a
/// prefix-compressed block.
///
/// Each record stores only the part of its key that differs from the
/// previous key. Every `restart_interval` records the key is stored in full
/// and the record's offset is remembered as a restart point, so a reader
/// can binary search the restart table and decode forward from there.
///
/// Layout of a finished block:
/// ```text
/// ┌───────────────────────────────────────────────────────────────┐
/// │ Record 0: [shared][non_shared][val_len][key suffix][value]    │
/// │ Record 1: ...             (three header fields are varints)   │
/// │ Record N: ...                                                  │
/// ├───────────────────────────────────────────────────────────────┤
/// │ Restart table: [off_0(4B)][off_1(4B)]...   off_0 is always 0  │
/// │ Num restarts (4B)                                              │
/// └───────────────────────────────────────────────────────────────┘
/// ```
///
/// Lifecycle: building → `finish` → finished → `reset` → building.
/// Calling `add` or `finish` on a finished builder is a contract violation.
#[derive(Debug)]
pub struct BlockBuilder {
    /// Encoded records. Moved out to the caller by `finish`.
    data: Vec<u8>,
    /// Offsets into `data` of records that store their key in full.
    restarts: Vec<u32>,
    /// Records emitted since the last restart point.
    counter: u32,
    /// Most recently added key.
    last_key: Vec<u8>,
    /// Records added since creation or the last reset.
    num_entries: usize,
    restart_interval: u32,
    finished: bool,
}

impl BlockBuilder {
    /// Create a builder that stores a full key every `restart_interval` records.
    pub fn new(restart_interval: u32) -> Result<Self> {
        Self::with_options(BlockOptions::default().with_restart_interval(restart_interval))
    }

    /// Create a builder from a full set of options.
    pub fn with_options(options: BlockOptions) -> Result<Self> {
        if options.restart_interval == 0 {
            return Err(Violation::ZeroRestartInterval.into());
        }
        Ok(Self::empty(options.restart_interval))
    }

    fn empty(restart_interval: u32) -> Self {
        BlockBuilder {
            data: Vec::new(),
            restarts: vec![0],
            counter: 0,
            last_key: Vec::new(),
            num_entries: 0,
            restart_interval,
            finished: false,
        }
    }

    /// Add a key-value pair. Keys MUST be strictly increasing.
    ///
    /// All checks and allocations happen before anything is written, so a
    /// rejected call leaves the builder exactly as it was.
    pub fn add(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        if self.finished {
            return Err(Violation::AddAfterFinish.into());
        }
        if self.num_entries > 0 && key <= self.last_key.as_slice() {
            return Err(Violation::KeyNotIncreasing.into());
        }
        if self.counter > self.restart_interval {
            return Err(Violation::RestartOverflow.into());
        }

        let restart = self.counter >= self.restart_interval;
        let shared = if restart {
            // A restart record always carries its whole key.
            0
        } else {
            shared_prefix_len(&self.last_key, key)
        };
        let non_shared = key.len() - shared;

        let shared_u32 = to_u32(shared)?;
        let non_shared_u32 = to_u32(non_shared)?;
        let value_len_u32 = to_u32(value.len())?;
        let restart_offset = if restart {
            Some(to_u32(self.data.len())?)
        } else {
            None
        };

        let record_len = varint::encoded_len(shared_u32)
            + varint::encoded_len(non_shared_u32)
            + varint::encoded_len(value_len_u32)
            + non_shared
            + value.len();
        self.data.try_reserve(record_len)?;
        self.restarts.try_reserve(1)?;
        self.last_key
            .try_reserve(key.len().saturating_sub(self.last_key.len()))?;

        if let Some(offset) = restart_offset {
            trace!(offset, "restart point");
            self.restarts.push(offset);
            self.counter = 0;
        }

        varint::put_u32(&mut self.data, shared_u32);
        varint::put_u32(&mut self.data, non_shared_u32);
        varint::put_u32(&mut self.data, value_len_u32);
        self.data.extend_from_slice(&key[shared..]);
        self.data.extend_from_slice(value);

        self.last_key.clear();
        self.last_key.extend_from_slice(key);
        self.counter += 1;
        self.num_entries += 1;
        Ok(())
    }

    /// Size the block would have if it were finished now: records plus the
    /// restart table plus the restart count.
    ///
    /// After `finish` the records have been handed out, so this reports the
    /// size of an empty block until the next `add`.
    pub fn current_size_estimate(&self) -> usize {
        self.data.len() + self.restarts.len() * fixed::LEN + fixed::LEN
    }

    /// Finalize the block: append the restart table and restart count, and
    /// hand the buffer to the caller.
    ///
    /// The builder keeps no reference to the returned bytes. It stays
    /// finished until `reset`.
    pub fn finish(&mut self) -> Result<Vec<u8>> {
        if self.finished {
            return Err(Violation::FinishAfterFinish.into());
        }
        let num_restarts = to_u32(self.restarts.len())?;
        self.data
            .try_reserve((self.restarts.len() + 1) * fixed::LEN)?;

        for &offset in &self.restarts {
            fixed::put_u32(&mut self.data, offset);
        }
        fixed::put_u32(&mut self.data, num_restarts);

        let block = mem::take(&mut self.data);
        debug!(
            entries = self.num_entries,
            restarts = num_restarts,
            size = block.len(),
            "block finished"
        );

        self.restarts.clear();
        self.restarts.push(0);
        self.counter = 0;
        self.finished = true;
        Ok(block)
    }

    /// Return to a fresh building state, keeping allocated capacity.
    pub fn reset(&mut self) {
        trace!(entries = self.num_entries, finished = self.finished, "block reset");
        self.data.clear();
        self.restarts.clear();
        self.restarts.push(0);
        self.counter = 0;
        self.last_key.clear();
        self.num_entries = 0;
        self.finished = false;
    }

    /// Number of records added since creation or the last reset.
    pub fn len(&self) -> usize {
        self.num_entries
    }

    /// Whether no records have been added since creation or the last reset.
    pub fn is_empty(&self) -> bool {
        self.num_entries == 0
    }

    /// The most recently added key, kept through `finish` until `reset`.
    pub fn last_key(&self) -> Option<&[u8]> {
        if self.num_entries == 0 {
            None
        } else {
            Some(&self.last_key)
        }
    }

    /// Configured maximum number of records per restart chain.
    pub fn restart_interval(&self) -> u32 {
        self.restart_interval
    }

    /// Whether `finish` has been called since creation or the last reset.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self::empty(BlockOptions::default().restart_interval)
    }
}

/// Length of the common leading bytes of `prev` and `key`.
fn shared_prefix_len(prev: &[u8], key: &[u8]) -> usize {
    let shared = prev
        .iter()
        .zip(key)
        .take_while(|(a, b)| a == b)
        .count();
    trace!(shared, non_shared = key.len() - shared, "shared prefix");
    shared
}

fn to_u32(n: usize) -> Result<u32> {
    u32::try_from(n).map_err(|_| Error::ContractViolation(Violation::LengthOverflow))
}
