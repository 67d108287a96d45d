// Copyright (C) 2026 Access Card Contributors
// SPDX-License-Identifier: LGPL-3.0-only

//! Emulated contactless access card.
//!
//! The card answers two commands from a door reader:
//!
//! - SELECT of its AID (`F222222222`), answered with `90 00`
//! - the door broadcast `00 CA 00 00 | Lc | challenge`, answered with the response the stored
//!   [`Credential`] computes for the challenge
//!
//! Anything else is answered with the UNKNOWN status word `00 00`.
//!
//! [`Card`] is the command interpreter. It gets its credential from a [`CredentialStore`]
//! whenever a broadcast arrives. [`Service`] sits on top of it and models the host callbacks,
//! including responses delivered after the fact and deactivation of the link.

#[cfg(not(feature = "delog"))]
#[macro_use]
extern crate log;

#[cfg(feature = "delog")]
delog::generate_macros!();

mod card;
pub mod codec;
pub mod command;
pub mod constants;
pub mod credential;
mod error;
pub mod service;
pub mod store;
#[cfg(feature = "virtual")]
pub mod vpicc;

pub use card::{Card, Options};
pub use credential::{decode_credential, Credential};
pub use error::Error;
pub use service::Service;
pub use store::{CachedStore, CredentialStore, FileStore, InlineStore};

/// Response APDU buffer.
pub type Response = heapless::Vec<u8, { constants::RESPONSE_SIZE }>;

pub type Result<T = Response> = core::result::Result<T, Error>;
