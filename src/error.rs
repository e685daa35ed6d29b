// Copyright 2022 houseme
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// The error type returned when building a [`MonoFlake`].
///
/// Every variant is raised synchronously by [`Builder::finalize`]; generating
/// ids never fails.
///
/// [`MonoFlake`]: crate::MonoFlake
/// [`Builder::finalize`]: crate::Builder::finalize
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("epoch `{0}` is earlier than June 1st 2024 UTC")]
    EpochTooEarly(DateTime<Utc>),
    #[error("node bits `{0}` must be at least 8")]
    NodeBitsTooLow(u8),
    #[error("node bits `{0}` must be at most 12")]
    NodeBitsTooHigh(u8),
    #[cfg(feature = "ip-fallback")]
    #[error("could not find any private ip address")]
    NoPrivateAddress,
}

/// The error type of the result-typed decoders such as [`Id::try_from_base62`].
///
/// The sentinel-returning decoders report the same condition as [`Id::INVALID`].
///
/// [`Id::try_from_base62`]: crate::Id::try_from_base62
/// [`Id::INVALID`]: crate::Id::INVALID
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("decoded value overflows a signed 64 bit integer")]
    Overflow,
}
