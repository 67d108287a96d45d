// Copyright (C) 2026 Access Card Contributors
// SPDX-License-Identifier: CC0-1.0

// To use this, make sure that you have vpcd from vsmartcard installed and configured (e. g.
// install vsmartcard-vpcd on Debian).  You might have to restart your pcscd, e. g.
// `systemctl restart pcscd pcscd.socket`.
//
// The credential is read from `$ACCESS_CARD_ASSETS/cardInfo.txt` (current directory if unset),
// one line of base64 as produced by `Credential::encode`.
//
// Set `RUST_LOG=access_card=info` to see the received commands.

use access_card::{service::Service, store::Assets, vpicc::VirtualCard, Card, Options};

fn main() {
    env_logger::init();

    let options = Options::default();
    let root = std::env::var_os("ACCESS_CARD_ASSETS").unwrap_or_else(|| ".".into());
    let assets = Assets::new(root);
    let store = assets.cached_card_file();

    let card = Card::new(store, options).expect("invalid card options");
    let mut virtual_card = VirtualCard::new(Service::new(card));
    let vpicc = vpicc::connect().expect("failed to connect to vpicc");
    vpicc
        .run(&mut virtual_card)
        .expect("failed to run virtual smartcard");
}
