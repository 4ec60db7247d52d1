//! Single-pass decoder for the TCP options region.

use crate::catalog::{LengthClass, length_class};
use crate::error::{DecodeError, Error, Result};
use crate::field::{self, Field};
use crate::store::OptionStore;

/// One option occurrence as found on the wire.
///
/// `payload` is the position of the payload within the scanned region, so
/// the same record can be resolved against the buffer later for reading or
/// in-place rewriting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOption {
    /// Kind byte.
    pub kind: u8,
    /// Total on-wire size; 0 for zero-class options.
    pub length: u8,
    /// Offset of the kind byte within the region.
    pub offset: usize,
    /// Payload position within the region, excluding kind and length bytes.
    pub payload: Field,
}

/// Iterator over the options in a TCP options region.
///
/// Yields one `Result<RawOption>` per option occurrence, padding included.
/// The first malformed option yields an error and ends the iteration; the
/// iterator never reads past the end of `data`.
pub struct OptionIter<'a> {
    data: &'a [u8],
    pos: usize,
    failed: bool,
}

impl<'a> OptionIter<'a> {
    /// Create a new iterator over an options region.
    ///
    /// # Parameters
    /// * `data` - The bytes between the fixed TCP header and the payload
    pub fn new(data: &'a [u8]) -> Self {
        OptionIter {
            data,
            pos: 0,
            failed: false,
        }
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn malformed(&mut self, kind: u8, cause: DecodeError) -> Option<Result<RawOption>> {
        self.failed = true;
        Some(Err(Error::MalformedOptions {
            kind,
            offset: self.pos,
            cause,
        }))
    }
}

impl<'a> Iterator for OptionIter<'a> {
    type Item = Result<RawOption>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.data.len() {
            return None;
        }

        let offset = self.pos;
        let remaining = self.data.len() - offset;
        let kind = self.data[offset];

        let length = match length_class(kind) {
            LengthClass::Zero => {
                self.pos += 1;
                return Some(Ok(RawOption {
                    kind,
                    length: 0,
                    offset,
                    payload: (offset + 1)..(offset + 1),
                }));
            }
            LengthClass::Variable => {
                if remaining < field::option::HEADER_LEN {
                    return self.malformed(kind, DecodeError::MissingLength);
                }
                let declared = self.data[offset + field::option::LENGTH.start];
                if (declared as usize) < field::option::HEADER_LEN {
                    return self.malformed(kind, DecodeError::LengthBelowMinimum);
                }
                declared
            }
            LengthClass::Fixed(n) => n,
        };

        if length as usize > remaining {
            return self.malformed(kind, DecodeError::Truncated);
        }

        let payload = field::option::PAYLOAD(length as usize);
        self.pos += length as usize;
        Some(Ok(RawOption {
            kind,
            length,
            offset,
            payload: (offset + payload.start)..(offset + payload.end),
        }))
    }
}

/// Decode a whole options region into a fresh store.
///
/// All-or-nothing: on the first malformed option the error is returned and no
/// store is produced. When the same kind occurs more than once, the last
/// occurrence wins.
///
/// # Example
/// ```
/// use tcp_options_wire::decode::decode;
///
/// let store = decode(&[2, 4, 0x05, 0xB4]).unwrap();
/// let (length, payload) = store.get(2).unwrap();
/// assert_eq!(length, 4);
/// assert_eq!(payload, 2..4);
/// ```
pub fn decode(data: &[u8]) -> Result<OptionStore> {
    if data.len() > field::MAX_OPTIONS_LEN {
        return Err(Error::BufferTooLong);
    }

    let mut store = OptionStore::new();
    for option in OptionIter::new(data) {
        let option = option?;
        store.insert(option.kind, option.length, option.payload);
    }
    Ok(store)
}
