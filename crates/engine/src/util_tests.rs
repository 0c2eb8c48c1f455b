// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn correlation_id_is_always_six_digits() {
    for _ in 0..100 {
        let id = correlation_id();
        assert!((100_000..=999_999).contains(&id));
    }
}
