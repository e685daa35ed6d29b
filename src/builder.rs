use crate::clock::{MonotonicClock, TimeSource};
use crate::error::Error;
use crate::monoflake::{
    DEFAULT_NODE_BITS, Internals, MAX_NODE_BITS, MIN_EPOCH_SECS, MIN_NODE_BITS, MonoFlake,
    SharedMonoFlake, max_sequence,
};
use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;
use std::sync::Arc;

/// The earliest epoch a generator accepts, June 1st 2024 UTC.
pub fn min_epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + TimeDelta::seconds(MIN_EPOCH_SECS)
}

/// Layout and epoch of a generator.
///
/// Checked by [`Config::validate`], in this order: node bits lower bound,
/// node bits upper bound, epoch floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Width of the node id field, in `8..=12`. The sequence gets the
    /// remaining `23 - node_bits` bits.
    pub node_bits: u8,
    /// Reference point of the time field. Must not precede [`min_epoch`].
    pub epoch: DateTime<Utc>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            node_bits: DEFAULT_NODE_BITS,
            epoch: min_epoch(),
        }
    }
}

impl Config {
    /// Check the node bit range and the epoch floor.
    pub fn validate(&self) -> Result<(), Error> {
        if self.node_bits < MIN_NODE_BITS {
            return Err(Error::NodeBitsTooLow(self.node_bits));
        }
        if self.node_bits > MAX_NODE_BITS {
            return Err(Error::NodeBitsTooHigh(self.node_bits));
        }
        if self.epoch.timestamp() < MIN_EPOCH_SECS {
            return Err(Error::EpochTooEarly(self.epoch));
        }
        Ok(())
    }
}

/// A builder for building the [`MonoFlake`] generator.
#[derive(Clone, Debug, Default)]
pub struct Builder {
    config: Config,
    node_id: u16,
    #[cfg(feature = "ip-fallback")]
    node_id_from_ip: bool,
}

impl Builder {
    /// Construct a new builder with the default configuration and node id 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the node id seed.
    /// It is reduced modulo `2^node_bits` when the generator is built.
    pub fn node_id(mut self, node_id: u16) -> Self {
        self.node_id = node_id;
        self
    }

    /// Derive the node id seed from a private address of this host.
    /// If none is found, `finalize` will fail.
    #[cfg(feature = "ip-fallback")]
    pub fn node_id_from_ip(mut self) -> Self {
        self.node_id_from_ip = true;
        self
    }

    /// Set the bit length of the node id section.
    /// Outside `8..=12`, `finalize` will fail.
    pub fn node_bits(mut self, node_bits: u8) -> Self {
        self.config.node_bits = node_bits;
        self
    }

    /// Set the epoch.
    /// If it is earlier than [`min_epoch`], `finalize` will fail.
    pub fn epoch(mut self, epoch: DateTime<Utc>) -> Self {
        self.config.epoch = epoch;
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Finish building and create a MonoFlake reading time from a
    /// [`MonotonicClock`].
    pub fn finalize(self) -> Result<MonoFlake, Error> {
        self.finalize_with_time_source(MonotonicClock::new())
    }

    /// Finish building and create a MonoFlake reading time from `time`.
    pub fn finalize_with_time_source<T: TimeSource>(self, time: T) -> Result<MonoFlake<T>, Error> {
        self.config.validate()?;

        #[cfg(feature = "ip-fallback")]
        let seed = if self.node_id_from_ip {
            crate::net::node_id_from_private_ip().ok_or(Error::NoPrivateAddress)?
        } else {
            self.node_id
        };
        #[cfg(not(feature = "ip-fallback"))]
        let seed = self.node_id;

        let node_bits = self.config.node_bits;
        let node_id = i64::from(seed) % (1i64 << node_bits);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            node_id,
            node_bits,
            epoch = %self.config.epoch,
            "monoflake generator created"
        );

        let shared = Arc::new(SharedMonoFlake {
            epoch: self.config.epoch,
            epoch_millis: self.config.epoch.timestamp_millis(),
            node_id,
            node_bits,
            max_sequence: max_sequence(node_bits),
            time,
            internals: Mutex::new(Internals::default()),
        });
        Ok(MonoFlake::new_inner(shared))
    }
}
