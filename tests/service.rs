// Copyright (C) 2026 Access Card Contributors
// SPDX-License-Identifier: LGPL-3.0-only

mod setup;

use std::sync::mpsc;

use access_card::service::{DeactivationReason, Delivery, Extras, Service};
use access_card::{Card, Error, InlineStore, Options};
use hex_literal::hex;

fn service(options: Options) -> Service<InlineStore> {
    let store = InlineStore::new(setup::encoded_credential());
    Service::new(Card::new(store, options).unwrap())
}

#[test_log::test]
fn inline_delivery() {
    let mut service = service(Options::new());
    let extras = Extras::from([("reader".to_owned(), "door-1".to_owned())]);

    let response = service.process_command_apdu(&setup::SELECT, Some(&extras));
    assert_eq!(response.unwrap().as_slice(), hex!("9000"));

    let response = service
        .process_command_apdu(&hex!("00CA0000 02 CAFE"), None)
        .unwrap();
    assert!(setup::credential().verify(&hex!("CAFE"), &response));

    let response = service.process_command_apdu(&hex!("FFFFFFFF"), None);
    assert_eq!(response.unwrap().as_slice(), hex!("0000"));
    assert!(!service.has_pending());

    let card = service.card();
    assert_eq!(card.options().delivery, Delivery::Inline);
    assert_eq!(card.select_apdu(), setup::SELECT);
}

#[test_log::test]
fn faults_answer_with_status_words() {
    let mut service = service(Options::new());
    let response = service.process_command_apdu(&hex!("00CA0000 07 CAFE"), None);
    assert_eq!(response.unwrap().as_slice(), hex!("6700"));

    let store = InlineStore::new("");
    let mut service = Service::new(Card::new(store, Options::new()).unwrap());
    let response = service.process_command_apdu(&hex!("00CA0000 02 CAFE"), None);
    assert_eq!(response.unwrap().as_slice(), hex!("6400"));

    // the select answer does not depend on the credential
    let response = service.process_command_apdu(&setup::SELECT, None);
    assert_eq!(response.unwrap().as_slice(), hex!("9000"));
}

#[test_log::test]
fn deferred_delivery() {
    let mut service = service(Options::new().delivery(Delivery::Deferred));
    let (mut tx, rx) = mpsc::channel::<Vec<u8>>();

    // nothing pending yet
    service.send_pending(&mut tx);
    assert!(rx.try_recv().is_err());

    assert!(service
        .process_command_apdu(&hex!("00CA0000 02 CAFE"), None)
        .is_none());
    assert!(service.has_pending());
    service.send_pending(&mut tx);
    let response = rx.try_recv().unwrap();
    assert!(setup::credential().verify(&hex!("CAFE"), &response));

    // exactly once
    service.send_pending(&mut tx);
    assert!(rx.try_recv().is_err());

    let mut sent = Vec::new();
    assert!(service.process_command_apdu(&setup::SELECT, None).is_none());
    service.send_pending(&mut |response: &[u8]| sent.push(response.to_vec()));
    assert_eq!(sent, vec![hex!("9000").to_vec()]);
}

#[test_log::test]
fn deactivation_discards_pending() {
    let mut service = service(Options::new().delivery(Delivery::Deferred));
    let (mut tx, rx) = mpsc::channel::<Vec<u8>>();

    assert!(service.process_command_apdu(&setup::SELECT, None).is_none());
    service.on_deactivated(DeactivationReason::LinkLoss);
    assert!(!service.has_pending());
    service.send_pending(&mut tx);
    assert!(rx.try_recv().is_err());

    // no-op without pending frame
    service.on_deactivated(DeactivationReason::Deselected);
    assert!(service.process_command_apdu(&hex!("FFFF"), None).is_none());
    service.send_pending(&mut tx);
    assert_eq!(rx.try_recv().unwrap(), hex!("0000").to_vec());
}

#[test]
fn status_words_of_faults() {
    assert_eq!(Error::MalformedFrame.status_word(), hex!("6700"));
    assert_eq!(Error::DeserializationError.status_word(), hex!("6400"));
    assert_eq!(Error::ResourceEmpty("x".into()).status_word(), hex!("6400"));
    assert_eq!(Error::InvalidEncoding.status_word(), hex!("6F00"));
    assert!(!Error::MalformedFrame.is_credential_fault());
}

#[test]
fn invalid_aid_is_rejected() {
    let store = InlineStore::new(setup::encoded_credential());
    assert_eq!(
        Card::new(store, Options::new().aid("F2222")).err(),
        Some(Error::InvalidEncoding)
    );
}
