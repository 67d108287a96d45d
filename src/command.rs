// Copyright (C) 2026 Access Card Contributors
// SPDX-License-Identifier: LGPL-3.0-only

//! Recognising and building the command frames the card understands.
//!
//! Only two shapes are known, both ISO 7816-4 short APDUs:
//!
//! - SELECT: `00 A4 04 00 | Lc | AID`
//! - broadcast: `00 CA 00 00 | Lc | challenge`

use subtle::ConstantTimeEq;

use crate::codec::{concat, hex_to_bytes};
use crate::constants::*;
use crate::Error;

/// How the byte in front of the challenge is treated.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LengthCheck {
    /// The byte must equal the number of challenge bytes.
    #[default]
    Strict,
    /// The byte is skipped without looking at it.
    Lenient,
}

/// Builds the SELECT frame for an AID given as hex text.
///
/// Lc is a single byte, so the AID is limited to 255 bytes.
pub fn build_select_apdu(aid: &str) -> Result<Vec<u8>, Error> {
    let aid = hex_to_bytes(aid)?;
    let lc = u8::try_from(aid.len()).map_err(|_| Error::AidTooLong(aid.len()))?;
    Ok(concat(&SELECT_APDU_HEADER, &[&[lc], &aid]))
}

/// Exact match against the expected SELECT frame.
pub fn is_select(frame: &[u8], expected: &[u8]) -> bool {
    frame.ct_eq(expected).into()
}

/// Compares the first four bytes only. Shorter frames never match.
pub fn is_broadcast_header(frame: &[u8], header: &[u8; HEADER_LEN]) -> bool {
    frame
        .get(..HEADER_LEN)
        .map_or(false, |start| start == header)
}

/// Everything after the header and its length byte, i.e. `frame[CHALLENGE_OFFSET..]`.
pub fn extract_challenge(frame: &[u8], check: LengthCheck) -> Result<&[u8], Error> {
    let Some((&lc, challenge)) = frame
        .get(HEADER_LEN..)
        .and_then(|rest| rest.split_first())
    else {
        warn!("Broadcast without length byte: {:02X?}", frame);
        return Err(Error::MalformedFrame);
    };

    if check == LengthCheck::Strict && usize::from(lc) != challenge.len() {
        warn!(
            "Broadcast length mismatch: claimed: {}, real: {}",
            lc,
            challenge.len()
        );
        return Err(Error::MalformedFrame);
    }
    Ok(challenge)
}

/// Classification of one incoming frame.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Command<'l> {
    /// The reader selects this application.
    Select,
    /// Door broadcast carrying a challenge. The frame is kept whole, the challenge is only
    /// extracted once a credential is at hand.
    Broadcast(&'l [u8]),
    Unknown,
}

impl<'l> Command<'l> {
    /// SELECT wins over broadcast, anything else is unknown.
    pub fn classify(frame: &'l [u8], select_apdu: &[u8]) -> Self {
        if is_select(frame, select_apdu) {
            Self::Select
        } else if is_broadcast_header(frame, &BROADCAST_APDU_HEADER) {
            Self::Broadcast(frame)
        } else {
            Self::Unknown
        }
    }
}
