// Copyright (C) 2026 Access Card Contributors
// SPDX-License-Identifier: LGPL-3.0-only

//! Host side of the card: the callbacks a contactless stack invokes.
//!
//! The host hands over one frame at a time. It either gets the response back directly, or,
//! in deferred mode, gets nothing and is sent the response later through a [`ResponseSink`].
//! Faults are answered with the status word of the [`Error`], never with UNKNOWN.

use std::collections::BTreeMap;
use std::sync::mpsc;

use crate::{Card, CredentialStore, Error, Response};

/// Metadata the host may pass along with a frame. Not interpreted by the card.
pub type Extras = BTreeMap<String, String>;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Delivery {
    /// Responses are returned from [`Service::process_command_apdu`].
    #[default]
    Inline,
    /// Responses are sent through [`Service::send_pending`].
    Deferred,
}

/// Why the link to the reader ended.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DeactivationReason {
    LinkLoss,
    Deselected,
}

/// Out of band channel back to the reader.
pub trait ResponseSink {
    fn send_response_apdu(&mut self, response: &[u8]);
}

impl<F: FnMut(&[u8])> ResponseSink for F {
    fn send_response_apdu(&mut self, response: &[u8]) {
        self(response)
    }
}

impl ResponseSink for mpsc::Sender<Vec<u8>> {
    fn send_response_apdu(&mut self, response: &[u8]) {
        if self.send(response.to_vec()).is_err() {
            warn!("Response receiver is gone, dropping response");
        }
    }
}

#[derive(Debug)]
pub struct Service<S> {
    card: Card<S>,
    delivery: Delivery,
    pending: Option<Vec<u8>>,
}

impl<S: CredentialStore> Service<S> {
    pub fn new(card: Card<S>) -> Self {
        let delivery = card.options().delivery;
        Self {
            card,
            delivery,
            pending: None,
        }
    }

    pub fn card(&mut self) -> &mut Card<S> {
        &mut self.card
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Host callback for a received frame.
    ///
    /// Returns `None` in deferred mode, the response then follows via [`Service::send_pending`].
    pub fn process_command_apdu(
        &mut self,
        frame: &[u8],
        _extras: Option<&Extras>,
    ) -> Option<Response> {
        match self.delivery {
            Delivery::Inline => Some(self.answer(frame)),
            Delivery::Deferred => {
                if self.pending.replace(frame.to_vec()).is_some() {
                    warn!("Replacing pending command that was never answered");
                }
                None
            }
        }
    }

    /// Answers the pending frame, if any, through `sink`.
    pub fn send_pending(&mut self, sink: &mut impl ResponseSink) {
        if let Some(frame) = self.pending.take() {
            let response = self.answer(&frame);
            sink.send_response_apdu(&response);
        }
    }

    /// Host callback for the end of the link. Drops the pending frame.
    pub fn on_deactivated(&mut self, _reason: DeactivationReason) {
        info!("deactivated: {:?}", _reason);
        if self.pending.take().is_some() {
            debug!("discarded pending command");
        }
    }

    fn answer(&mut self, frame: &[u8]) -> Response {
        self.card
            .respond(frame)
            .unwrap_or_else(|err| fault_response(&err))
    }
}

fn fault_response(err: &Error) -> Response {
    warn!("Answering with fault: {}", err);
    let mut response = Response::new();
    // two bytes always fit
    response.extend_from_slice(&err.status_word()).ok();
    response
}
