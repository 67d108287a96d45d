// Copyright (C) 2026 Access Card Contributors
// SPDX-License-Identifier: LGPL-3.0-only

use crate::service::{DeactivationReason, Service};
use crate::CredentialStore;

/// Virtual access card for [`vpicc`][].
///
/// Deferred responses are flushed before `execute` returns, vpcd expects a reply per command.
#[derive(Debug)]
pub struct VirtualCard<S> {
    service: Service<S>,
}

impl<S: CredentialStore> VirtualCard<S> {
    pub fn new(service: Service<S>) -> Self {
        Self { service }
    }
}

impl<S: CredentialStore> vpicc::VSmartCard for VirtualCard<S> {
    fn power_on(&mut self) {}

    fn power_off(&mut self) {
        self.service.on_deactivated(DeactivationReason::LinkLoss);
    }

    fn reset(&mut self) {
        self.service.on_deactivated(DeactivationReason::LinkLoss);
    }

    fn execute(&mut self, msg: &[u8]) -> Vec<u8> {
        if let Some(response) = self.service.process_command_apdu(msg, None) {
            return response.to_vec();
        }
        let mut reply = Vec::new();
        self.service
            .send_pending(&mut |response: &[u8]| reply.extend_from_slice(response));
        reply
    }
}
