//! Core module containing the main data structures
//!
//! This module contains:
//! - Contacts: contact records and the flat-file contact store
//! - Settings: user configuration
//! - Errors: the crate error type

mod contacts;
mod errors;
mod settings;

pub use contacts::*;
pub use errors::*;
pub use settings::*;
