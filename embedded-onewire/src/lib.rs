#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]
//! # embedded-onewire
//! A no-std trait definition for the 1-Wire protocol on a single-drop bus.
//!
//! The [OneWire] trait captures the bit-level operations a bus master has to provide
//! (reset/presence, write a bit, read a bit) and builds the byte-level transceiver
//! (least-significant bit first) on top of them.
//! Bus masters report the outcome of a reset through a type implementing [OneWireStatus].

pub mod consts;
mod error;
mod traits;
pub use error::OneWireError;
pub use traits::{OneWire, OneWireStatus};

/// Error type for 1-Wire operations.
pub type OneWireResult<T, E> = Result<T, OneWireError<E>>;
