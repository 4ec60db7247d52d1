//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate,
//! allowing for convenient glob imports:
//!
//! ```
//! use tcp_options_wire::prelude::*;
//! ```

pub use crate::catalog::{LengthClass, OptionKind, length_class};
pub use crate::decode::{OptionIter, RawOption, decode};
pub use crate::error::{DecodeError, Error};
pub use crate::options::{
    AuthenticationOption, MssOption, SackOption, TimestampsOption, UserTimeoutOption,
    WindowScaleOption,
};
pub use crate::packet::{OptionRecord, TcpOptions};
pub use crate::repr::OptionRepr;
pub use crate::store::OptionStore;
