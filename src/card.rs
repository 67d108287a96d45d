// Copyright (C) 2026 Access Card Contributors
// SPDX-License-Identifier: LGPL-3.0-only

use crate::command::{build_select_apdu, extract_challenge, Command, LengthCheck};
use crate::constants::*;
use crate::service::Delivery;
use crate::{Credential, CredentialStore, Error, Response};

/// Card configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct Options {
    /// AID as hex text.
    pub aid: &'static str,
    pub length_check: LengthCheck,
    pub delivery: Delivery,
}

impl Options {
    pub const fn new() -> Self {
        Self {
            aid: ACCESS_CARD_AID,
            length_check: LengthCheck::Strict,
            delivery: Delivery::Inline,
        }
    }

    pub const fn aid(mut self, aid: &'static str) -> Self {
        self.aid = aid;
        self
    }

    pub const fn length_check(mut self, length_check: LengthCheck) -> Self {
        self.length_check = length_check;
        self
    }

    pub const fn delivery(mut self, delivery: Delivery) -> Self {
        self.delivery = delivery;
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}

/// The access card application.
///
/// Holds no session state: every call to [`Card::respond`] is answered from the frame alone,
/// plus the credential fetched from the store when a broadcast arrives.
#[derive(Debug)]
pub struct Card<S> {
    options: Options,
    select_apdu: Vec<u8>,
    store: S,
}

impl<S: CredentialStore> Card<S> {
    pub fn new(store: S, options: Options) -> Result<Self, Error> {
        let select_apdu = build_select_apdu(options.aid)?;
        info!("access card for AID {}", options.aid);
        Ok(Self {
            options,
            select_apdu,
            store,
        })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The SELECT frame this card answers with OK.
    pub fn select_apdu(&self) -> &[u8] {
        &self.select_apdu
    }

    pub fn store(&mut self) -> &mut S {
        &mut self.store
    }

    /// Answers one command frame.
    ///
    /// Failures to obtain the credential are returned as errors, they never turn into the
    /// UNKNOWN status word.
    pub fn respond(&mut self, frame: &[u8]) -> crate::Result {
        info!("Received APDU: {:02X?}", frame);
        match Command::classify(frame, &self.select_apdu) {
            Command::Select => status_response(&SELECT_OK_SW),
            Command::Broadcast(frame) => {
                let credential = self.store.load().map_err(|err| {
                    warn!("Failed to load credential: {}", err);
                    err
                })?;
                self.authenticate_broadcast(&credential, frame)
            }
            Command::Unknown => {
                debug!("unknown command");
                status_response(&UNKNOWN_CMD_SW)
            }
        }
    }

    fn authenticate_broadcast(
        &self,
        credential: &Credential,
        frame: &[u8],
    ) -> Result<Response, Error> {
        let challenge = extract_challenge(frame, self.options.length_check)?;
        debug!(
            "authenticating card {:02X?} for challenge {:02X?}",
            credential.id(),
            challenge
        );
        credential.authenticate(challenge)
    }
}

fn status_response(sw: &[u8; 2]) -> Result<Response, Error> {
    Response::from_slice(sw).map_err(|_| Error::ResponseTooLong)
}
