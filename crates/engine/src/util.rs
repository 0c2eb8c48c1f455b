// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Small helpers shared across the engine.

use rand::Rng;

/// A random 6-digit correlation id for an `InternalError`: returned in the
/// HTTP 500 body and logged alongside the real cause so an operator can tie
/// the two together without leaking internals to the caller.
pub fn correlation_id() -> u32 {
    rand::thread_rng().gen_range(100_000..=999_999)
}

#[cfg(test)]
#[path = "util_tests.rs"]
mod tests;
