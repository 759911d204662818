// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn ascii_passes_through() {
    let mut decoder = ChunkDecoder::default();
    assert_eq!(decoder.decode(b"hello\n"), "hello\n");
    assert_eq!(decoder.finish(), "");
}

#[test]
fn split_multibyte_sequence_is_carried() {
    let bytes = "héllo".as_bytes();
    let mut decoder = ChunkDecoder::default();
    // 'é' is two bytes; split in the middle of it
    assert_eq!(decoder.decode(&bytes[..2]), "h");
    assert_eq!(decoder.decode(&bytes[2..]), "éllo");
}

#[test]
fn invalid_byte_becomes_replacement() {
    let mut decoder = ChunkDecoder::default();
    assert_eq!(decoder.decode(b"a\xffb"), "a\u{fffd}b");
}

#[test]
fn truncated_tail_is_flushed_lossily() {
    let mut decoder = ChunkDecoder::default();
    assert_eq!(decoder.decode(&[b'x', 0xe2, 0x82]), "x");
    assert_eq!(decoder.finish(), "\u{fffd}");
    assert_eq!(decoder.finish(), "");
}
