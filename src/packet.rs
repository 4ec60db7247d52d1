//! Packet module
//!
//! This module contains `TcpOptions`, a read/write wrapper around the options
//! region of one TCP header, paired with the store decoded from it.

use crate::catalog::OptionKind;
use crate::decode;
use crate::error::{Error, Result};
use crate::field;
use crate::options::{
    AuthenticationOption, MssOption, SackOption, TimestampsOption, UserTimeoutOption,
    WindowScaleOption,
};
use crate::repr::OptionRepr;
use crate::store::OptionStore;
use core::fmt;
use log::trace;

/// One decoded option as seen through its buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionRecord<'a> {
    /// Option kind.
    pub kind: OptionKind,
    /// Total on-wire size; 0 for zero-class options.
    pub length: u8,
    /// Payload bytes, excluding the kind and length bytes.
    pub payload: &'a [u8],
}

impl<'a> fmt::Display for OptionRecord<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} len={} payload=[", self.kind, self.length)?;
        for (i, byte) in self.payload.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{:02x}", byte)?;
        }
        write!(f, "]")
    }
}

/// A read/write wrapper around a TCP options region.
///
/// The wrapper owns the [`OptionStore`] decoded from its buffer. The store
/// refers to payloads by position, and `T` can only be read or written in
/// place, never resized, so stored positions stay valid for as long as the
/// wrapper lives. Rewriting goes through [`TcpOptions::set_payload`] and
/// friends, which change payload bytes only: kind and length bytes, and the
/// layout of every other option, are left as they are.
///
/// # Example
/// ```
/// use tcp_options_wire::catalog::OptionKind;
/// use tcp_options_wire::packet::TcpOptions;
///
/// let mut buffer = [2u8, 4, 0x05, 0xB4, 1, 1, 1, 0];
/// let mut options = TcpOptions::new_checked(&mut buffer[..]).unwrap();
/// assert_eq!(options.length_of(OptionKind::Mss), Some(4));
/// assert_eq!(options.payload_of(OptionKind::Mss), Some(&[0x05, 0xB4][..]));
///
/// options.set_payload(OptionKind::Mss, &[0x02, 0x18]).unwrap();
/// assert_eq!(buffer, [2, 4, 0x02, 0x18, 1, 1, 1, 0]);
/// ```
#[derive(Debug, Clone)]
pub struct TcpOptions<T: AsRef<[u8]>> {
    buffer: T,
    store: OptionStore,
}

impl<T: AsRef<[u8]>> TcpOptions<T> {
    /// Creates a new `TcpOptions` with an empty store.
    ///
    /// Nothing is decoded until [`TcpOptions::decode`] is called.
    ///
    /// # Arguments
    ///
    /// * `buffer` - The options region: the bytes between the fixed TCP
    ///   header and the payload.
    pub const fn new_unchecked(buffer: T) -> TcpOptions<T> {
        TcpOptions {
            buffer,
            store: OptionStore::new(),
        }
    }

    /// Creates a new `TcpOptions` and decodes the region.
    ///
    /// # Returns
    ///
    /// * `Result<TcpOptions>` - The decoded options, or the first decode error.
    pub fn new_checked(buffer: T) -> Result<TcpOptions<T>> {
        let mut options = Self::new_unchecked(buffer);
        options.decode()?;
        Ok(options)
    }

    /// Checks that the region fits in a TCP header.
    pub fn check_len(&self) -> Result<()> {
        if self.buffer.as_ref().len() > field::MAX_OPTIONS_LEN {
            return Err(Error::BufferTooLong);
        }
        Ok(())
    }

    /// Rebuilds the store from the current buffer contents.
    ///
    /// The previous store is discarded first. On failure the store is left
    /// empty; no partially decoded records are kept.
    ///
    /// A failure is also reported through `log::trace!` with the error, so a
    /// host that installs a logger at trace level sees one record per
    /// rejected region. Nothing is logged on success.
    pub fn decode(&mut self) -> Result<()> {
        self.store.clear();
        match decode::decode(self.buffer.as_ref()) {
            Ok(store) => {
                self.store = store;
                Ok(())
            }
            Err(err) => {
                trace!("tcp options decode failed: {}", err);
                Err(err)
            }
        }
    }

    /// Returns the inner buffer.
    pub fn into_inner(self) -> T {
        self.buffer
    }

    /// Returns a reference to the whole options region.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        self.buffer.as_ref()
    }

    /// Returns the decoded store.
    pub fn store(&self) -> &OptionStore {
        &self.store
    }

    /// Whether `kind` was decoded from this region.
    pub fn contains(&self, kind: OptionKind) -> bool {
        self.store.contains(kind.as_u8())
    }

    /// Total on-wire length of `kind`, 0 for zero-class options.
    ///
    /// # Returns
    ///
    /// * `None` if the kind was never decoded.
    pub fn length_of(&self, kind: OptionKind) -> Option<u8> {
        self.store.get(kind.as_u8()).map(|(length, _)| length)
    }

    /// Payload bytes of `kind`, excluding its kind and length bytes.
    ///
    /// # Returns
    ///
    /// * `None` if the kind was never decoded. A present zero-class option
    ///   yields `Some` of an empty slice.
    pub fn payload_of(&self, kind: OptionKind) -> Option<&[u8]> {
        self.store
            .get(kind.as_u8())
            .map(|(_, payload)| &self.buffer.as_ref()[payload])
    }

    /// The full record of `kind`.
    ///
    /// # Returns
    ///
    /// * `Err(Error::AbsentKind)` if the kind was never decoded.
    pub fn record(&self, kind: OptionKind) -> Result<OptionRecord<'_>> {
        let (length, payload) = self
            .store
            .get(kind.as_u8())
            .ok_or(Error::AbsentKind(kind.as_u8()))?;
        Ok(OptionRecord {
            kind: OptionKind::from_u8(kind.as_u8()),
            length,
            payload: &self.buffer.as_ref()[payload],
        })
    }

    /// All records in ascending kind order.
    pub fn records(&self) -> impl Iterator<Item = OptionRecord<'_>> + '_ {
        let data = self.buffer.as_ref();
        self.store
            .iter()
            .map(move |(kind, length, payload)| OptionRecord {
                kind: OptionKind::from_u8(kind),
                length,
                payload: &data[payload],
            })
    }

    fn payload(&self, kind: OptionKind) -> Result<&[u8]> {
        self.payload_of(kind).ok_or(Error::AbsentKind(kind.as_u8()))
    }

    /// Maximum segment size.
    pub fn mss(&self) -> Result<u16> {
        Ok(MssOption::new_checked(self.payload(OptionKind::Mss)?)?.mss())
    }

    /// Window scale shift count.
    pub fn window_scale(&self) -> Result<u8> {
        Ok(WindowScaleOption::new_checked(self.payload(OptionKind::WindowScale)?)?.shift())
    }

    /// Timestamps as `(tsval, tsecr)`.
    pub fn timestamps(&self) -> Result<(u32, u32)> {
        let option = TimestampsOption::new_checked(self.payload(OptionKind::Timestamps)?)?;
        Ok((option.tsval(), option.tsecr()))
    }

    /// SACK blocks view.
    pub fn sack_blocks(&self) -> Result<SackOption<&[u8]>> {
        SackOption::new_checked(self.payload(OptionKind::Sack)?)
    }

    /// User timeout as `(in_minutes, timeout)`.
    pub fn user_timeout(&self) -> Result<(bool, u16)> {
        let option = UserTimeoutOption::new_checked(self.payload(OptionKind::UserTimeout)?)?;
        Ok((option.in_minutes(), option.timeout()))
    }

    /// Token carried by the enforcer authentication option.
    pub fn authentication_token(&self) -> Result<u16> {
        let payload = self.payload(OptionKind::EnforcerAuthentication)?;
        Ok(AuthenticationOption::new_checked(payload)?.token())
    }
}

impl<T: AsRef<[u8]> + AsMut<[u8]>> TcpOptions<T> {
    /// Mutable payload bytes of `kind`.
    ///
    /// The slice covers exactly the existing payload, so nothing written
    /// through it can reach another option.
    pub fn payload_mut(&mut self, kind: OptionKind) -> Option<&mut [u8]> {
        let (_, payload) = self.store.get(kind.as_u8())?;
        Some(&mut self.buffer.as_mut()[payload])
    }

    fn payload_for_write(&mut self, kind: OptionKind) -> Result<&mut [u8]> {
        self.payload_mut(kind)
            .ok_or(Error::PayloadOverwriteMismatch(kind.as_u8()))
    }

    /// Overwrites the payload of `kind` in place.
    ///
    /// Copies `min(data.len(), payload.len())` bytes to the start of the
    /// existing payload. Payload bytes beyond `data` keep their previous
    /// values, and bytes of `data` beyond the payload are not written.
    ///
    /// # Returns
    ///
    /// * `Ok(n)` - Number of bytes written; `n < data.len()` means `data`
    ///   was truncated to fit.
    /// * `Err(Error::PayloadOverwriteMismatch)` - The kind is not present;
    ///   nothing was written.
    pub fn set_payload(&mut self, kind: OptionKind, data: &[u8]) -> Result<usize> {
        let payload = self.payload_for_write(kind)?;
        let n = payload.len().min(data.len());
        payload[..n].copy_from_slice(&data[..n]);
        Ok(n)
    }

    /// Rewrites an existing option from its high-level form.
    ///
    /// # Returns
    ///
    /// * `Err(Error::PayloadOverwriteMismatch)` - The kind is not present or
    ///   its payload size differs from `repr.payload_len()`.
    pub fn emit(&mut self, repr: &OptionRepr) -> Result<()> {
        let kind = repr.kind();
        let payload = self.payload_for_write(kind)?;
        if payload.len() != repr.payload_len() {
            return Err(Error::PayloadOverwriteMismatch(kind.as_u8()));
        }
        repr.emit(payload);
        Ok(())
    }

    /// Sets the maximum segment size of an existing MSS option.
    pub fn set_mss(&mut self, value: u16) -> Result<()> {
        let payload = self.payload_for_write(OptionKind::Mss)?;
        MssOption::new_checked(payload)?.set_mss(value);
        Ok(())
    }

    /// Sets the shift count of an existing window scale option.
    pub fn set_window_scale(&mut self, value: u8) -> Result<()> {
        let payload = self.payload_for_write(OptionKind::WindowScale)?;
        WindowScaleOption::new_checked(payload)?.set_shift(value);
        Ok(())
    }

    /// Sets both values of an existing timestamps option.
    pub fn set_timestamps(&mut self, tsval: u32, tsecr: u32) -> Result<()> {
        let payload = self.payload_for_write(OptionKind::Timestamps)?;
        let mut option = TimestampsOption::new_checked(payload)?;
        option.set_tsval(tsval);
        option.set_tsecr(tsecr);
        Ok(())
    }

    /// Sets the token of an existing enforcer authentication option.
    pub fn set_authentication_token(&mut self, token: u16) -> Result<()> {
        let payload = self.payload_for_write(OptionKind::EnforcerAuthentication)?;
        AuthenticationOption::new_checked(payload)?.set_token(token);
        Ok(())
    }
}

impl<T: AsRef<[u8]>> fmt::Display for TcpOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "TCP options: region_len={}, kinds={}",
            self.as_slice().len(),
            self.store.len()
        )?;
        for record in self.records() {
            write!(f, "\n  {}", record)?;
        }
        Ok(())
    }
}
