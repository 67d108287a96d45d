// Copyright (C) 2026 Access Card Contributors
// SPDX-License-Identifier: LGPL-3.0-only

mod setup;

use access_card::{Credential, Options};
use hex_literal::hex;

#[test]
fn deterministic_response() {
    let credential = setup::credential();
    let first = credential.authenticate(&hex!("01020304")).unwrap();
    let second = credential.authenticate(&hex!("01020304")).unwrap();
    assert_eq!(first, second);

    assert_eq!(first.len(), setup::CARD_ID.len() + 32 + 2);
    assert_eq!(&first[..8], setup::CARD_ID);
    assert_eq!(&first[first.len() - 2..], hex!("9000"));

    let other = credential.authenticate(&hex!("01020305")).unwrap();
    assert_ne!(first, other);
}

#[test]
fn response_depends_on_key() {
    let credential = setup::credential();
    let impostor = Credential::new(&setup::CARD_ID, &[0x43; 32]).unwrap();
    let challenge = hex!("DEADBEEF");

    let response = impostor.authenticate(&challenge).unwrap();
    assert!(impostor.verify(&challenge, &response));
    assert!(!credential.verify(&challenge, &response));
    assert!(!credential.verify(&challenge, &response[..response.len() - 2]));
}

#[test]
fn key_is_not_printed() {
    let printed = format!("{:?}", setup::credential());
    assert!(printed.contains("0102030405060708"));
    assert!(!printed.contains("4242"));
}

#[test]
fn card_returns_credential_response_verbatim() {
    setup::card(Options::new(), |card| {
        let response = card.respond(&hex!("00CA0000 04 DEADBEEF")).unwrap();
        assert_eq!(
            response,
            setup::credential().authenticate(&hex!("DEADBEEF")).unwrap()
        );
    });
}
