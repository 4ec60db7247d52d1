/// Error type for TCP options decoding and access.
///
/// Represents the different error conditions that can occur while decoding
/// an options region, querying decoded records, or rewriting payload bytes
/// in place.
///
/// # Examples
///
/// ```
/// use tcp_options_wire::error::{DecodeError, Error};
/// use tcp_options_wire::decode::decode;
///
/// // MSS claims 4 bytes but the region ends after 2.
/// let result = decode(&[2, 4]);
/// assert_eq!(
///     result.err(),
///     Some(Error::MalformedOptions { kind: 2, offset: 0, cause: DecodeError::Truncated })
/// );
/// ```
#[derive(PartialEq, Debug, Clone, Copy, Eq)]
pub enum Error {
    /// The options region could not be decoded.
    ///
    /// `kind` is the kind byte of the offending option and `offset` its
    /// position within the region. Decoding stops at the first malformed
    /// option.
    MalformedOptions {
        /// Kind byte of the option that failed to decode.
        kind: u8,
        /// Offset of the option's kind byte within the region.
        offset: usize,
        /// What was wrong with it.
        cause: DecodeError,
    },

    /// The requested option kind was never decoded from this region.
    AbsentKind(u8),

    /// An in-place overwrite targeted an option that is not present, or
    /// whose payload size differs from the data being emitted.
    ///
    /// Nothing is written when this is returned.
    PayloadOverwriteMismatch(u8),

    /// Buffer is too short for the expected payload layout.
    BufferTooShort,

    /// Options region is longer than a TCP header can carry (40 bytes).
    BufferTooLong,

    /// Payload size is not valid for the option kind's layout.
    ///
    /// For example a SACK payload that is not a whole number of blocks.
    InvalidPayloadLength(u8),
}

/// Reasons an option inside the region is malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// A variable-length option's kind byte is the last byte of the region.
    MissingLength,

    /// A variable-length option declares a total length below 2, which
    /// cannot even cover its own kind and length bytes.
    LengthBelowMinimum,

    /// The option's total length runs past the end of the region.
    Truncated,
}

/// Result type alias using the crate's Error type.
pub type Result<T> = core::result::Result<T, Error>;

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::MalformedOptions { kind, offset, cause } => write!(
                f,
                "malformed options: kind {} at offset {}: {}",
                kind, offset, cause
            ),
            Error::AbsentKind(k) => write!(f, "option kind {} not present", k),
            Error::PayloadOverwriteMismatch(k) => {
                write!(f, "cannot overwrite payload of option kind {}", k)
            }
            Error::BufferTooShort => write!(f, "buffer too short for expected structure"),
            Error::BufferTooLong => write!(f, "options region exceeds 40 bytes"),
            Error::InvalidPayloadLength(k) => {
                write!(f, "invalid payload length for option kind {}", k)
            }
        }
    }
}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DecodeError::MissingLength => write!(f, "missing length byte"),
            DecodeError::LengthBelowMinimum => write!(f, "declared length below minimum"),
            DecodeError::Truncated => write!(f, "option runs past end of region"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MalformedOptions {
            kind: 5,
            offset: 3,
            cause: DecodeError::LengthBelowMinimum,
        };
        assert_eq!(
            format!("{}", err),
            "malformed options: kind 5 at offset 3: declared length below minimum"
        );
        assert_eq!(format!("{}", Error::AbsentKind(8)), "option kind 8 not present");
        assert_eq!(
            format!("{}", Error::PayloadOverwriteMismatch(255)),
            "cannot overwrite payload of option kind 255"
        );
        assert_eq!(format!("{}", Error::BufferTooShort), "buffer too short for expected structure");
        assert_eq!(format!("{}", Error::BufferTooLong), "options region exceeds 40 bytes");
        assert_eq!(
            format!("{}", Error::InvalidPayloadLength(5)),
            "invalid payload length for option kind 5"
        );
    }

    #[test]
    fn test_decode_error_display() {
        assert_eq!(format!("{}", DecodeError::MissingLength), "missing length byte");
        assert_eq!(format!("{}", DecodeError::Truncated), "option runs past end of region");
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(Error::AbsentKind(2), Error::AbsentKind(2));
        assert_ne!(Error::AbsentKind(2), Error::AbsentKind(3));
        assert_ne!(Error::AbsentKind(2), Error::PayloadOverwriteMismatch(2));
        assert_ne!(
            Error::MalformedOptions { kind: 2, offset: 0, cause: DecodeError::Truncated },
            Error::MalformedOptions { kind: 2, offset: 0, cause: DecodeError::MissingLength },
        );
    }

    #[test]
    fn test_error_clone_copy() {
        let err = Error::BufferTooShort;
        let err2 = err;
        let err3 = err.clone();
        assert_eq!(err, err2);
        assert_eq!(err, err3);
    }
}
