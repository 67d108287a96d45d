// Copyright (C) 2026 Access Card Contributors
// SPDX-License-Identifier: LGPL-3.0-only

use hex_literal::hex;

/// AID of the door access card application.
///
/// Kept as hex text: the expected SELECT frame is derived from it when a card is built.
pub const ACCESS_CARD_AID: &str = "F222222222";

// Format: [Class | Instruction | Parameter 1 | Parameter 2]
pub const SELECT_APDU_HEADER: [u8; 4] = hex!("00A40400");
// Points broadcast sent by the door reader, followed by Lc and the challenge.
pub const BROADCAST_APDU_HEADER: [u8; 4] = hex!("00CA0000");

pub const HEADER_LEN: usize = 4;
// header + Lc
pub const CHALLENGE_OFFSET: usize = HEADER_LEN + 1;

pub const SELECT_OK_SW: [u8; 2] = hex!("9000");
pub const UNKNOWN_CMD_SW: [u8; 2] = hex!("0000");

/// Name of the asset holding the base64 encoded credential.
pub const CARD_FILE: &str = "cardInfo.txt";

/// Capacity of a response APDU, status word included.
pub const RESPONSE_SIZE: usize = 256;

// credential field bounds
pub const MAX_CARD_ID_LEN: usize = 16;
pub const MIN_KEY_LEN: usize = 16;
pub const MAX_KEY_LEN: usize = 64;
pub const MAC_LEN: usize = 32;

// CBOR map with two byte strings and short field names
pub const SERIALIZED_CREDENTIAL_BUFFER_SIZE: usize = 128;
