// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    clean_exit  = { 0,      0 },
    exit_one    = { 1 << 8, 1 },
    exit_42     = { 42 << 8, 42 },
    sigkill     = { 9,      137 },
    sigterm     = { 15,     143 },
)]
fn exit_code_from_raw_status(raw: i32, expected: i32) {
    assert_eq!(exit_code(ExitStatus::from_raw(raw)), expected);
}
