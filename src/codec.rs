// Copyright (C) 2026 Access Card Contributors
// SPDX-License-Identifier: LGPL-3.0-only

//! Conversions between hex text and raw bytes.

use crate::Error;

/// Decodes hex text, first character of each pair being the high nibble.
///
/// Accepts both cases. Odd lengths and non-hex characters are rejected.
pub fn hex_to_bytes(s: &str) -> Result<Vec<u8>, Error> {
    if s.len() % 2 == 1 {
        return Err(Error::InvalidEncoding);
    }
    Ok(hex::decode(s)?)
}

/// Uppercase hex, two characters per byte.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}

/// Copies `first` followed by every slice of `rest` into a fresh buffer.
pub fn concat(first: &[u8], rest: &[&[u8]]) -> Vec<u8> {
    let total = first.len() + rest.iter().map(|part| part.len()).sum::<usize>();
    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(first);
    for part in rest {
        out.extend_from_slice(part);
    }
    out
}
