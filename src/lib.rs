//! A node-local generator of time ordered 64 bit unique ids.
//!
//! Each id packs milliseconds since an epoch, a per-millisecond sequence and a
//! node id into a non-negative `i64`. Ids from one generator are strictly
//! increasing; ids from generators with distinct node ids never collide, so
//! many nodes can mint ids without coordinating.
//!
//! Ids render as fixed-width base62 strings whose lexicographic order equals
//! their numeric order, or as 8 big-endian bytes.
//!
//! ## Quickstart
//!
//! ```
//! use monoflake::MonoFlake;
//!
//! let mf = MonoFlake::new(19).unwrap();
//! let (a, b) = (mf.next(), mf.next());
//! assert!(a < b);
//! assert_eq!(a.to_base62_string().len(), 11);
//! ```
//!
//! ## Configuration
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use monoflake::{Error, MonoFlake};
//!
//! let mf = MonoFlake::builder()
//!     .node_id(771)
//!     .node_bits(12)
//!     .epoch(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())
//!     .finalize()
//!     .unwrap();
//! assert_eq!(mf.next().node_id(mf.node_bits()), 771);
//!
//! assert_eq!(
//!     MonoFlake::builder().node_bits(13).finalize().unwrap_err(),
//!     Error::NodeBitsTooHigh(13)
//! );
//! ```
//!
//! ## Concurrent use
//!
//! MonoFlake is thread safe. `clone` it before moving to another thread:
//! ```
//! use monoflake::MonoFlake;
//! use std::thread;
//!
//! let mf = MonoFlake::new(1).unwrap();
//!
//! let mut children = Vec::new();
//! for _ in 0..10 {
//!     let thread_mf = mf.clone();
//!     children.push(thread::spawn(move || {
//!         println!("{}", thread_mf.next());
//!     }));
//! }
//!
//! for child in children {
//!     child.join().unwrap();
//! }
//! ```
//!
//! ## Parsing
//!
//! ```
//! use monoflake::{Id, parse_base62};
//!
//! assert_eq!(parse_base62("AzL8n0Y58m7").as_i64(), i64::MAX);
//! assert_eq!(parse_base62("ZZZZZZZZZZZ"), Id::INVALID);
//! assert!("ZZZZZZZZZZZ".parse::<Id>().is_err());
//! ```
//!
//! ## Features
//!
//! - `serde`: serialize [`Id`] as its base62 string.
//! - `tracing`: trace events from the generator.
//! - `ip-fallback`: derive the node id from a private address of the host.

pub mod base62;
mod builder;
mod clock;
mod error;
mod id;
mod monoflake;
#[cfg(feature = "ip-fallback")]
mod net;
#[cfg(feature = "serde")]
pub mod serde;

pub use crate::monoflake::*;
pub use builder::*;
pub use clock::*;
pub use error::*;
pub use id::*;
#[cfg(feature = "ip-fallback")]
pub use net::node_id_from_private_ip;
