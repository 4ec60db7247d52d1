#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

//! # tcp-options-wire
//!
//! This crate decodes the options region of a TCP header into a queryable
//! set of records keyed by option kind, and rewrites the payload of options
//! already present in place. It is designed for packet-mangling pipelines
//! that inspect or stamp TCP options as segments pass through, and is a
//! `no_std` crate that never allocates.
//!
//! ## Features
//!
//! - `no_std` compatible, zero allocation
//! - Single bounded pass over at most 40 bytes; malformed or truncated
//!   options are reported as errors, never read out of bounds
//! - Static catalog of option kinds and their length rules
//! - In-place payload rewriting that never resizes or shifts options
//! - Typed views for MSS, window scale, timestamps, SACK, user timeout and
//!   the enforcer authentication option
//!
//! ## Architecture
//!
//! - `catalog` - Option kinds and their length classes
//! - `decode` - Single-pass scanner over the options region
//! - `store` - Per-region mapping from kind to decoded record
//! - `packet` - `TcpOptions`, the buffer and its store, with accessors
//! - `options` - Zero-copy wrappers for well-known option payloads
//! - `repr` - High-level representation for parsing/emitting one option
//! - `field` - Field offset definitions
//!
//! ## Example
//!
//! ```
//! use tcp_options_wire::prelude::*;
//!
//! // MSS 1460, NOP, NOP, enforcer authentication token 0x0001.
//! let mut region = [2u8, 4, 0x05, 0xB4, 1, 1, 255, 4, 0x00, 0x01];
//! let mut options = TcpOptions::new_checked(&mut region[..]).unwrap();
//!
//! assert_eq!(options.mss(), Ok(1460));
//! options.set_authentication_token(0xBEEF).unwrap();
//! assert_eq!(options.payload_of(OptionKind::EnforcerAuthentication), Some(&[0xBE, 0xEF][..]));
//! ```

/// Option kinds and the static length catalog.
pub mod catalog;

/// Single-pass options region decoder.
pub mod decode;

/// Error type for decoding and access failures.
pub mod error;

/// Field offset definitions for all wire format structures.
pub mod field;

/// Typed payload views for well-known options.
pub mod options;

/// Options region wrapper with accessors, mutator and diagnostic dump.
pub mod packet;

/// High-level representation for parse/emit operations.
pub mod repr;

/// Decoded records keyed by kind.
pub mod store;

/// Prelude module for convenient imports.
pub mod prelude;


// Compile-time assertion that we don't link against an allocator in no_std mode
// This will fail to compile if somehow an allocator is required
#[cfg(not(test))]
unsafe extern "C" {
    // This symbol should NOT exist - if it's required, compilation will fail with "undefined reference"
    // Remove this if you ever need to add allocation support
    #[link_name = "\n\nERROR: This crate must not require an allocator\n\n"]
    fn __rust_alloc_trigger_compile_error() -> !;
}
