// Copyright (C) 2026 Access Card Contributors
// SPDX-License-Identifier: LGPL-3.0-only

//! The secret the card answers door challenges with.
//!
//! A credential is stored as one line of base64 text wrapping a CBOR map with two byte
//! strings, the card identifier and the HMAC key. Answering a challenge is deterministic:
//!
//! ```text
//! response = id || HMAC-SHA256(key, id || challenge) || 90 00
//! ```

use base64::{engine::general_purpose::STANDARD, Engine as _};
use heapless_bytes::Bytes;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::constants::*;
use crate::{Error, Response};

type HmacSha256 = Hmac<Sha256>;

#[derive(Clone, Eq, PartialEq, Deserialize, Serialize)]
pub struct Credential {
    #[serde(rename = "i")]
    id: Bytes<MAX_CARD_ID_LEN>,
    #[serde(rename = "k")]
    key: Bytes<MAX_KEY_LEN>,
}

// Never print the key.
impl core::fmt::Debug for Credential {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Credential")
            .field("id", &hex::encode_upper(self.id()))
            .finish_non_exhaustive()
    }
}

impl Credential {
    pub fn new(id: &[u8], key: &[u8]) -> Result<Self, Error> {
        let credential = Self {
            id: Bytes::from_slice(id).map_err(|_| Error::DeserializationError)?,
            key: Bytes::from_slice(key).map_err(|_| Error::DeserializationError)?,
        };
        credential.validate()?;
        Ok(credential)
    }

    fn validate(&self) -> Result<(), Error> {
        if self.id.is_empty() {
            warn!("Credential without card identifier");
            return Err(Error::DeserializationError);
        }
        if self.key.len() < MIN_KEY_LEN {
            warn!("Credential key too short: {}", self.key.len());
            return Err(Error::DeserializationError);
        }
        Ok(())
    }

    pub fn id(&self) -> &[u8] {
        &self.id
    }

    /// Reconstructs a credential from a resource line.
    pub fn decode(line: &str) -> Result<Self, Error> {
        let serialized = STANDARD.decode(line.trim()).map_err(|_err| {
            warn!("Credential is not valid base64: {:?}", _err);
            Error::DeserializationError
        })?;
        let credential: Self = cbor_smol::cbor_deserialize(&serialized).map_err(|_err| {
            warn!("Failed to deserialize credential: {:?}", _err);
            Error::DeserializationError
        })?;
        credential.validate()?;
        Ok(credential)
    }

    /// Produces the resource line `decode` accepts.
    pub fn encode(&self) -> Result<String, Error> {
        let mut buffer = [0u8; SERIALIZED_CREDENTIAL_BUFFER_SIZE];
        let serialized = cbor_smol::cbor_serialize(self, &mut buffer).map_err(|_err| {
            error!("Failed to serialize credential: {:?}", _err);
            Error::ResponseTooLong
        })?;
        Ok(STANDARD.encode(serialized))
    }

    fn mac(&self, challenge: &[u8]) -> Result<[u8; MAC_LEN], Error> {
        let mut mac = <HmacSha256 as Mac>::new_from_slice(&self.key)
            .map_err(|_| Error::DeserializationError)?;
        mac.update(&self.id);
        mac.update(challenge);
        let mut out = [0u8; MAC_LEN];
        out.copy_from_slice(&mac.finalize().into_bytes());
        Ok(out)
    }

    /// Answers a door challenge. The result is a complete response APDU.
    pub fn authenticate(&self, challenge: &[u8]) -> Result<Response, Error> {
        let mac = self.mac(challenge)?;
        let mut response = Response::new();
        let parts: [&[u8]; 3] = [self.id(), &mac, &SELECT_OK_SW];
        for part in parts {
            response
                .extend_from_slice(part)
                .map_err(|_| Error::ResponseTooLong)?;
        }
        Ok(response)
    }

    /// Door side check of a response produced by [`Credential::authenticate`].
    pub fn verify(&self, challenge: &[u8], response: &[u8]) -> bool {
        let Ok(expected) = self.authenticate(challenge) else {
            return false;
        };
        expected.as_slice().ct_eq(response).into()
    }
}

/// Free-standing form of [`Credential::decode`].
pub fn decode_credential(line: &str) -> Result<Credential, Error> {
    Credential::decode(line)
}
