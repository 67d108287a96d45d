// Copyright (C) 2026 Access Card Contributors
// SPDX-License-Identifier: LGPL-3.0-only

use iso7816::Status;

/// Everything that can keep the card from producing a regular response.
///
/// None of these is ever answered with the UNKNOWN status word, that one is reserved for
/// commands the card does not recognise.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("invalid hex encoding")]
    InvalidEncoding,
    #[error("AID of {0} bytes does not fit a one byte length field")]
    AidTooLong(usize),
    #[error("card resource not found: {0}")]
    ResourceNotFound(String),
    #[error("card resource is empty: {0}")]
    ResourceEmpty(String),
    #[error("failed to read card resource {name}: {reason}")]
    ResourceIo { name: String, reason: String },
    #[error("credential deserialization error")]
    DeserializationError,
    #[error("malformed command frame")]
    MalformedFrame,
    #[error("response does not fit the response buffer")]
    ResponseTooLong,
}

impl Error {
    /// Status word sent to the reader in place of a response.
    pub fn status(&self) -> Status {
        match self {
            Self::ResourceNotFound(_)
            | Self::ResourceEmpty(_)
            | Self::ResourceIo { .. }
            | Self::DeserializationError => Status::UnspecifiedNonpersistentExecutionError,
            Self::MalformedFrame => Status::WrongLength,
            Self::InvalidEncoding | Self::AidTooLong(_) | Self::ResponseTooLong => {
                Status::UnspecifiedCheckingError
            }
        }
    }

    /// `true` for failures to obtain the credential, as opposed to protocol errors.
    pub fn is_credential_fault(&self) -> bool {
        matches!(
            self,
            Self::ResourceNotFound(_)
                | Self::ResourceEmpty(_)
                | Self::ResourceIo { .. }
                | Self::DeserializationError
        )
    }

    pub fn status_word(&self) -> [u8; 2] {
        u16::from(self.status()).to_be_bytes()
    }
}

impl From<hex::FromHexError> for Error {
    fn from(_: hex::FromHexError) -> Self {
        Self::InvalidEncoding
    }
}
