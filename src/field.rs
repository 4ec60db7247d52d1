//! Field offset definitions for TCP option wire format structures.
//!
//! All offsets are const ranges or const functions so they can be evaluated
//! at compile time. Option header offsets are relative to the option's kind
//! byte; payload offsets are relative to the first payload byte (the byte
//! after the length byte).
//!
//! # Wire Format Structure
//!
//! ```text
//! Zero-class option:       Fixed / variable option:
//! +--------+               +--------+--------+-----------------+
//! |  Kind  |               |  Kind  | Length |  Payload (L-2)  |
//! +--------+               +--------+--------+-----------------+
//! ```

#![allow(non_snake_case)]
#![allow(dead_code)]

/// Type alias for a byte range (slice index range).
pub type Field = ::core::ops::Range<usize>;

/// Largest options region a TCP header can carry.
///
/// Data offset is 4 bits of 32-bit words (at most 60 bytes), minus the
/// 20-byte fixed header.
pub const MAX_OPTIONS_LEN: usize = 40;

/// Option header field offsets.
pub mod option {
    use crate::field::Field;

    /// Kind field (1 byte at offset 0).
    pub const KIND: Field = 0..1;

    /// Length field (1 byte at offset 1), total option size in bytes.
    ///
    /// Absent for zero-class options.
    pub const LENGTH: Field = 1..2;

    /// Size of the kind and length bytes that precede a payload.
    pub const HEADER_LEN: usize = LENGTH.end;

    /// Payload field of an option whose total size is `length`.
    ///
    /// # Parameters
    ///
    /// * `length` - Total option size including the 2 header bytes
    ///
    /// # Returns
    ///
    /// Field range covering the payload
    pub const fn PAYLOAD(length: usize) -> Field {
        HEADER_LEN..length
    }
}

/// Maximum Segment Size payload (2 bytes).
pub mod mss {
    use crate::field::Field;

    /// Segment size in network byte order.
    pub const VALUE: Field = 0..2;
}

/// Window Scale payload (1 byte).
pub mod window_scale {
    use crate::field::Field;

    /// Shift count.
    pub const SHIFT: Field = 0..1;
}

/// Timestamps payload (8 bytes).
pub mod timestamps {
    use crate::field::Field;

    /// Timestamp value.
    pub const TSVAL: Field = 0..4;

    /// Timestamp echo reply.
    pub const TSECR: Field = 4..8;
}

/// Selective acknowledgement payload (n * 8 bytes).
pub mod sack {
    use crate::field::Field;

    /// Size of one left/right edge pair.
    pub const BLOCK_LEN: usize = 8;

    /// A 40-byte region minus the 2 header bytes fits at most 4 blocks.
    pub const MAX_BLOCKS: usize = 4;

    /// Left edge of block `idx`.
    pub const fn LEFT_EDGE(idx: usize) -> Field {
        let start = idx * BLOCK_LEN;
        start..(start + 4)
    }

    /// Right edge of block `idx`.
    pub const fn RIGHT_EDGE(idx: usize) -> Field {
        let start = idx * BLOCK_LEN + 4;
        start..(start + 4)
    }
}

/// User Timeout payload (2 bytes).
pub mod user_timeout {
    use crate::field::Field;

    /// Granularity bit and 15-bit timeout, network byte order.
    pub const VALUE: Field = 0..2;

    /// Granularity bit; set means the timeout is in minutes, clear means seconds.
    pub const GRANULARITY: u16 = 0x8000;

    /// Mask of the timeout bits.
    pub const TIMEOUT_MASK: u16 = 0x7FFF;
}

/// Enforcer authentication payload (2 bytes).
pub mod authentication {
    use crate::field::Field;

    /// Opaque token in network byte order.
    pub const TOKEN: Field = 0..2;
}
