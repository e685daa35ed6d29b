use crate::builder::{Builder, Config};
use crate::clock::{MonotonicClock, TimeSource};
use crate::error::*;
use crate::id::Id;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// bit length of the whole id
pub(crate) const TOTAL_BITS: u32 = 64;
/// the sign bit is never set
pub(crate) const RESERVED_SIGN_BITS: u32 = 1;
/// bit length of milliseconds since epoch
pub const TIME_BITS: u32 = 40;
/// bits shared between sequence and node id
pub const ALLOCATION_BITS: u32 = TOTAL_BITS - RESERVED_SIGN_BITS - TIME_BITS;
/// the smallest sequence field a layout may have
pub const MIN_SEQUENCE_BITS: u8 = 11;
/// lower bound of the node id field width
pub const MIN_NODE_BITS: u8 = 8;
/// upper bound of the node id field width
pub const MAX_NODE_BITS: u8 = ALLOCATION_BITS as u8 - MIN_SEQUENCE_BITS;
/// node id field width used unless configured
pub const DEFAULT_NODE_BITS: u8 = 10;
/// Unix seconds of the earliest accepted epoch, June 1st 2024 UTC.
pub const MIN_EPOCH_SECS: i64 = 1_717_200_000;

/// Cursor of the most recently allocated (millisecond, sequence) pair.
#[derive(Debug, Default)]
pub(crate) struct Internals {
    pub(crate) millis: i64,
    pub(crate) sequence: i64,
}

/// State shared between clones of one generator.
pub(crate) struct SharedMonoFlake<T> {
    pub(crate) epoch: DateTime<Utc>,
    pub(crate) epoch_millis: i64,
    pub(crate) node_id: i64,
    pub(crate) node_bits: u8,
    pub(crate) max_sequence: i64,
    pub(crate) time: T,
    pub(crate) internals: Mutex<Internals>,
}

/// MonoFlake is a node-local unique ID generator.
///
/// Ids from one generator are strictly increasing, also under concurrent use.
/// Cloning is cheap and clones share the same state, so `clone` it before
/// moving to another thread.
///
/// Default layout:
///
/// ```text
/// | 1 bit (reserved) | 40 bits (since epoch) | 13 bits (sequence) | 10 bits (node id) |
/// | 0                | [0, 1099511627776)    | [0, 8192)          | [0, 1024)         |
/// ```
pub struct MonoFlake<T = MonotonicClock>(pub(crate) Arc<SharedMonoFlake<T>>);

impl MonoFlake {
    /// Create a new MonoFlake for `node_id` with the default configuration.
    /// For custom configuration see [`builder`] or [`with_config`].
    ///
    /// [`builder`]: MonoFlake::builder
    /// [`with_config`]: MonoFlake::with_config
    pub fn new(node_id: u16) -> Result<Self, Error> {
        Builder::new().node_id(node_id).finalize()
    }

    /// Create a new MonoFlake for `node_id` from an explicit [`Config`].
    pub fn with_config(node_id: u16, config: Config) -> Result<Self, Error> {
        Builder::new().node_id(node_id).config(config).finalize()
    }

    /// Create a new [`Builder`] to construct a MonoFlake.
    pub fn builder() -> Builder {
        Builder::new()
    }
}

impl<T: TimeSource> MonoFlake<T> {
    pub(crate) fn new_inner(shared: Arc<SharedMonoFlake<T>>) -> Self {
        Self(shared)
    }

    /// Generate the next unique id.
    ///
    /// When the sequence of the current millisecond is exhausted the
    /// generator moves on to the next millisecond instead of waiting for the
    /// clock, so this never blocks on anything but the internal lock.
    #[allow(clippy::should_implement_trait)]
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next(&self) -> Id {
        let shared = &*self.0;
        let mut internals = shared.internals.lock();

        let elapsed = shared.time.now_millis() - shared.epoch_millis;
        let (millis, sequence) = if elapsed > internals.millis {
            (elapsed, 0)
        } else {
            // clock equal or behind: stay in the current bucket
            (internals.millis, internals.sequence)
        };

        let mut next_millis = millis;
        let mut next_sequence = sequence + 1;
        if next_sequence >= shared.max_sequence {
            next_sequence = 0;
            next_millis += 1;
            #[cfg(feature = "tracing")]
            tracing::trace!(millis, "sequence exhausted, rolling into next millisecond");
        }
        internals.millis = next_millis;
        internals.sequence = next_sequence;

        Id::from_i64(millis << ALLOCATION_BITS | sequence << shared.node_bits | shared.node_id)
    }

    /// Alias of [`next`](MonoFlake::next).
    pub fn next_id(&self) -> Id {
        self.next()
    }

    /// Generate the next id and return its base62 string form.
    pub fn next_base62(&self) -> String {
        self.next().to_base62_string()
    }

    /// The node id embedded in every generated id.
    pub fn node_id(&self) -> i64 {
        self.0.node_id
    }

    /// Width of the node id field.
    pub fn node_bits(&self) -> u8 {
        self.0.node_bits
    }

    /// Exclusive upper bound of the per-millisecond sequence.
    pub fn max_sequence(&self) -> i64 {
        self.0.max_sequence
    }

    /// The epoch generated ids count milliseconds from.
    pub fn epoch(&self) -> DateTime<Utc> {
        self.0.epoch
    }
}

/// Returns a new `MonoFlake` referencing the same state as `self`.
impl<T> Clone for MonoFlake<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> std::fmt::Debug for MonoFlake<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonoFlake")
            .field("epoch", &self.0.epoch)
            .field("node_id", &self.0.node_id)
            .field("node_bits", &self.0.node_bits)
            .field("max_sequence", &self.0.max_sequence)
            .finish_non_exhaustive()
    }
}

/// Exclusive upper bound of the sequence for a layout with `node_bits` node bits.
pub(crate) const fn max_sequence(node_bits: u8) -> i64 {
    1 << (ALLOCATION_BITS - node_bits as u32)
}
