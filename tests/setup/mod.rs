// Copyright (C) 2026 Access Card Contributors
// SPDX-License-Identifier: LGPL-3.0-only

#![allow(unused)]

use access_card::{Card, Credential, InlineStore, Options};
use hex_literal::hex;

pub const CARD_ID: [u8; 8] = hex!("0102030405060708");
pub const CARD_KEY: [u8; 32] = [0x42; 32];

pub const SELECT: [u8; 10] = hex!("00A40400 05 F222222222");

pub type TestCard = Card<InlineStore>;

pub fn credential() -> Credential {
    Credential::new(&CARD_ID, &CARD_KEY).unwrap()
}

pub fn encoded_credential() -> String {
    credential().encode().unwrap()
}

pub fn card<R>(options: Options, test: impl FnOnce(&mut TestCard) -> R) -> R {
    let store = InlineStore::new(encoded_credential());
    let mut card = Card::new(store, options).unwrap();
    test(&mut card)
}
