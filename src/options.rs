/// Typed views over TCP option payloads
///
/// This module provides zero-copy wrappers around the payloads of the
/// well-known TCP options. Each wrapper is constructed over the payload only,
/// i.e. the bytes after the kind and length bytes, as returned by
/// `TcpOptions::payload_of`. Writes go straight into the underlying buffer,
/// so rewriting an option never changes its size.

use crate::catalog::OptionKind;
use crate::error::{Error, Result};
use crate::field;
use byteorder::{ByteOrder, NetworkEndian};

/// Zero-copy wrapper around a Maximum Segment Size payload (2 bytes).
///
/// Wire format (4 bytes, payload marked):
/// ```text
/// +--------+--------+---------+--------+
/// |00000010|00000100|   max seg size   |
/// +--------+--------+---------+--------+
///                    ^^^^^^^^^^^^^^^^^^
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MssOption<T: AsRef<[u8]>> {
    buffer: T,
}

impl<T: AsRef<[u8]>> MssOption<T> {
    /// MSS payload size in bytes.
    pub const LENGTH: usize = 2;

    /// Create an MssOption without validation.
    ///
    /// # Parameters
    /// * `buffer` - The payload bytes
    pub fn new_unchecked(buffer: T) -> Self {
        MssOption { buffer }
    }

    /// Create an MssOption from a payload with length validation.
    ///
    /// # Returns
    /// * `Ok(MssOption)` if the payload is at least 2 bytes
    /// * `Err(Error::BufferTooShort)` otherwise
    pub fn new_checked(buffer: T) -> Result<Self> {
        let option = Self::new_unchecked(buffer);
        option.check_len()?;
        Ok(option)
    }

    /// Validate that the payload is at least 2 bytes long.
    pub fn check_len(&self) -> Result<()> {
        if self.buffer.as_ref().len() < Self::LENGTH {
            return Err(Error::BufferTooShort);
        }
        Ok(())
    }

    /// Get the maximum segment size.
    pub fn mss(&self) -> u16 {
        NetworkEndian::read_u16(&self.buffer.as_ref()[field::mss::VALUE])
    }
}

impl<T: AsRef<[u8]> + AsMut<[u8]>> MssOption<T> {
    /// Set the maximum segment size.
    pub fn set_mss(&mut self, value: u16) {
        NetworkEndian::write_u16(&mut self.buffer.as_mut()[field::mss::VALUE], value);
    }
}

/// Zero-copy wrapper around a Window Scale payload (1 byte).
#[derive(Debug, Clone, Copy)]
pub struct WindowScaleOption<T: AsRef<[u8]>> {
    buffer: T,
}

impl<T: AsRef<[u8]>> WindowScaleOption<T> {
    /// Window scale payload size in bytes.
    pub const LENGTH: usize = 1;

    /// Largest shift count a receiver will honor (RFC 7323 2.3).
    pub const MAX_SHIFT: u8 = 14;

    /// Create a WindowScaleOption without validation.
    pub fn new_unchecked(buffer: T) -> Self {
        WindowScaleOption { buffer }
    }

    /// Create a WindowScaleOption from a payload with length validation.
    pub fn new_checked(buffer: T) -> Result<Self> {
        let option = Self::new_unchecked(buffer);
        option.check_len()?;
        Ok(option)
    }

    /// Validate that the payload is at least 1 byte long.
    pub fn check_len(&self) -> Result<()> {
        if self.buffer.as_ref().len() < Self::LENGTH {
            return Err(Error::BufferTooShort);
        }
        Ok(())
    }

    /// Get the shift count as carried on the wire.
    ///
    /// Values above [`Self::MAX_SHIFT`] are returned unchanged; see
    /// [`Self::effective_shift`] for the value a receiver applies.
    pub fn shift(&self) -> u8 {
        self.buffer.as_ref()[field::window_scale::SHIFT.start]
    }

    /// Shift count clamped to [`Self::MAX_SHIFT`].
    pub fn effective_shift(&self) -> u8 {
        self.shift().min(Self::MAX_SHIFT)
    }
}

impl<T: AsRef<[u8]> + AsMut<[u8]>> WindowScaleOption<T> {
    /// Set the shift count.
    pub fn set_shift(&mut self, value: u8) {
        self.buffer.as_mut()[field::window_scale::SHIFT.start] = value;
    }
}

/// Zero-copy wrapper around a Timestamps payload (8 bytes).
///
/// Wire format (10 bytes, payload marked):
/// ```text
/// +-------+-------+---------------------+---------------------+
/// |Kind=8 |  10   |   TS Value (TSval)  |TS Echo Reply (TSecr)|
/// +-------+-------+---------------------+---------------------+
///     1       1              4                     4
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TimestampsOption<T: AsRef<[u8]>> {
    buffer: T,
}

impl<T: AsRef<[u8]>> TimestampsOption<T> {
    /// Timestamps payload size in bytes.
    pub const LENGTH: usize = 8;

    /// Create a TimestampsOption without validation.
    pub fn new_unchecked(buffer: T) -> Self {
        TimestampsOption { buffer }
    }

    /// Create a TimestampsOption from a payload with length validation.
    pub fn new_checked(buffer: T) -> Result<Self> {
        let option = Self::new_unchecked(buffer);
        option.check_len()?;
        Ok(option)
    }

    /// Validate that the payload is at least 8 bytes long.
    pub fn check_len(&self) -> Result<()> {
        if self.buffer.as_ref().len() < Self::LENGTH {
            return Err(Error::BufferTooShort);
        }
        Ok(())
    }

    /// Get the timestamp value.
    pub fn tsval(&self) -> u32 {
        NetworkEndian::read_u32(&self.buffer.as_ref()[field::timestamps::TSVAL])
    }

    /// Get the timestamp echo reply.
    pub fn tsecr(&self) -> u32 {
        NetworkEndian::read_u32(&self.buffer.as_ref()[field::timestamps::TSECR])
    }
}

impl<T: AsRef<[u8]> + AsMut<[u8]>> TimestampsOption<T> {
    /// Set the timestamp value.
    pub fn set_tsval(&mut self, value: u32) {
        NetworkEndian::write_u32(&mut self.buffer.as_mut()[field::timestamps::TSVAL], value);
    }

    /// Set the timestamp echo reply.
    pub fn set_tsecr(&mut self, value: u32) {
        NetworkEndian::write_u32(&mut self.buffer.as_mut()[field::timestamps::TSECR], value);
    }
}

/// Zero-copy wrapper around a selective acknowledgement payload.
///
/// The payload is a sequence of left/right edge pairs, 8 bytes each.
#[derive(Debug, Clone, Copy)]
pub struct SackOption<T: AsRef<[u8]>> {
    buffer: T,
}

impl<T: AsRef<[u8]>> SackOption<T> {
    /// Create a SackOption without validation.
    pub fn new_unchecked(buffer: T) -> Self {
        SackOption { buffer }
    }

    /// Create a SackOption from a payload with block validation.
    ///
    /// # Returns
    /// * `Ok(SackOption)` if the payload is a whole number of blocks, at most 4
    /// * `Err(Error::InvalidPayloadLength)` otherwise
    pub fn new_checked(buffer: T) -> Result<Self> {
        let option = Self::new_unchecked(buffer);
        option.check_len()?;
        Ok(option)
    }

    /// Validate that the payload holds whole blocks and no more than 4.
    pub fn check_len(&self) -> Result<()> {
        let len = self.buffer.as_ref().len();
        if len % field::sack::BLOCK_LEN != 0
            || len / field::sack::BLOCK_LEN > field::sack::MAX_BLOCKS
        {
            return Err(Error::InvalidPayloadLength(OptionKind::Sack.as_u8()));
        }
        Ok(())
    }

    /// Number of blocks in the payload.
    pub fn num_blocks(&self) -> usize {
        self.buffer.as_ref().len() / field::sack::BLOCK_LEN
    }

    /// Get block `idx` as `(left_edge, right_edge)`.
    ///
    /// # Panics
    /// If `idx` is not below [`Self::num_blocks`].
    pub fn block(&self, idx: usize) -> (u32, u32) {
        assert!(idx < self.num_blocks());
        let data = self.buffer.as_ref();
        (
            NetworkEndian::read_u32(&data[field::sack::LEFT_EDGE(idx)]),
            NetworkEndian::read_u32(&data[field::sack::RIGHT_EDGE(idx)]),
        )
    }

    /// Iterate over all blocks in order.
    pub fn blocks(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..self.num_blocks()).map(move |idx| self.block(idx))
    }
}

impl<T: AsRef<[u8]> + AsMut<[u8]>> SackOption<T> {
    /// Set block `idx`.
    ///
    /// # Panics
    /// If `idx` is not below [`Self::num_blocks`].
    pub fn set_block(&mut self, idx: usize, block: (u32, u32)) {
        assert!(idx < self.num_blocks());
        let data = self.buffer.as_mut();
        NetworkEndian::write_u32(&mut data[field::sack::LEFT_EDGE(idx)], block.0);
        NetworkEndian::write_u32(&mut data[field::sack::RIGHT_EDGE(idx)], block.1);
    }
}

/// Zero-copy wrapper around a User Timeout payload (2 bytes).
///
/// ```text
/// +-+-----------------------------+
/// |G|        User Timeout         |
/// +-+-----------------------------+
/// ```
#[derive(Debug, Clone, Copy)]
pub struct UserTimeoutOption<T: AsRef<[u8]>> {
    buffer: T,
}

impl<T: AsRef<[u8]>> UserTimeoutOption<T> {
    /// User timeout payload size in bytes.
    pub const LENGTH: usize = 2;

    /// Create a UserTimeoutOption without validation.
    pub fn new_unchecked(buffer: T) -> Self {
        UserTimeoutOption { buffer }
    }

    /// Create a UserTimeoutOption from a payload with length validation.
    pub fn new_checked(buffer: T) -> Result<Self> {
        let option = Self::new_unchecked(buffer);
        option.check_len()?;
        Ok(option)
    }

    /// Validate that the payload is at least 2 bytes long.
    pub fn check_len(&self) -> Result<()> {
        if self.buffer.as_ref().len() < Self::LENGTH {
            return Err(Error::BufferTooShort);
        }
        Ok(())
    }

    fn raw(&self) -> u16 {
        NetworkEndian::read_u16(&self.buffer.as_ref()[field::user_timeout::VALUE])
    }

    /// True when the timeout is expressed in minutes, false for seconds.
    pub fn in_minutes(&self) -> bool {
        self.raw() & field::user_timeout::GRANULARITY != 0
    }

    /// The 15-bit timeout.
    pub fn timeout(&self) -> u16 {
        self.raw() & field::user_timeout::TIMEOUT_MASK
    }
}

impl<T: AsRef<[u8]> + AsMut<[u8]>> UserTimeoutOption<T> {
    /// Set the granularity and timeout; bits of `timeout` above 15 are dropped.
    pub fn set_timeout(&mut self, in_minutes: bool, timeout: u16) {
        let mut raw = timeout & field::user_timeout::TIMEOUT_MASK;
        if in_minutes {
            raw |= field::user_timeout::GRANULARITY;
        }
        NetworkEndian::write_u16(&mut self.buffer.as_mut()[field::user_timeout::VALUE], raw);
    }
}

/// Zero-copy wrapper around the enforcer authentication payload (2 bytes).
///
/// The token is opaque to this crate; policy code decides what it means.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticationOption<T: AsRef<[u8]>> {
    buffer: T,
}

impl<T: AsRef<[u8]>> AuthenticationOption<T> {
    /// Authentication payload size in bytes.
    pub const LENGTH: usize = 2;

    /// Create an AuthenticationOption without validation.
    pub fn new_unchecked(buffer: T) -> Self {
        AuthenticationOption { buffer }
    }

    /// Create an AuthenticationOption from a payload with length validation.
    pub fn new_checked(buffer: T) -> Result<Self> {
        let option = Self::new_unchecked(buffer);
        option.check_len()?;
        Ok(option)
    }

    /// Validate that the payload is at least 2 bytes long.
    pub fn check_len(&self) -> Result<()> {
        if self.buffer.as_ref().len() < Self::LENGTH {
            return Err(Error::BufferTooShort);
        }
        Ok(())
    }

    /// Get the token.
    pub fn token(&self) -> u16 {
        NetworkEndian::read_u16(&self.buffer.as_ref()[field::authentication::TOKEN])
    }
}

impl<T: AsRef<[u8]> + AsMut<[u8]>> AuthenticationOption<T> {
    /// Set the token.
    pub fn set_token(&mut self, value: u16) {
        NetworkEndian::write_u16(&mut self.buffer.as_mut()[field::authentication::TOKEN], value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mss_option() {
        let mut buffer = [0u8; 2];
        let mut option = MssOption::new_unchecked(&mut buffer[..]);
        option.set_mss(1460);
        assert_eq!(option.mss(), 1460);
        assert_eq!(buffer, [0x05, 0xB4]);
    }

    #[test]
    fn test_window_scale_option() {
        let mut buffer = [0u8; 1];
        let mut option = WindowScaleOption::new_unchecked(&mut buffer[..]);
        option.set_shift(7);
        assert_eq!(option.shift(), 7);
        assert_eq!(option.effective_shift(), 7);
    }

    #[test]
    fn test_window_scale_clamps_large_shift() {
        let option = WindowScaleOption::new_unchecked(&[15u8][..]);
        assert_eq!(option.shift(), 15);
        assert_eq!(option.effective_shift(), WindowScaleOption::<&[u8]>::MAX_SHIFT);

        let option = WindowScaleOption::new_unchecked(&[14u8][..]);
        assert_eq!(option.effective_shift(), 14);
    }

    #[test]
    fn test_timestamps_option() {
        let mut buffer = [0u8; 8];
        let mut option = TimestampsOption::new_unchecked(&mut buffer[..]);
        option.set_tsval(0x01020304);
        option.set_tsecr(0xA0B0C0D0);
        assert_eq!(option.tsval(), 0x01020304);
        assert_eq!(option.tsecr(), 0xA0B0C0D0);
        assert_eq!(buffer, [1, 2, 3, 4, 0xA0, 0xB0, 0xC0, 0xD0]);
    }

    #[test]
    fn test_sack_option_blocks() {
        let mut buffer = [0u8; 16];
        let mut option = SackOption::new_checked(&mut buffer[..]).unwrap();
        assert_eq!(option.num_blocks(), 2);
        option.set_block(0, (100, 200));
        option.set_block(1, (300, 400));
        assert_eq!(option.block(0), (100, 200));
        assert_eq!(option.block(1), (300, 400));

        let option = SackOption::new_unchecked(&buffer[..]);
        let blocks: Vec<_> = option.blocks().collect();
        assert_eq!(blocks, vec![(100, 200), (300, 400)]);
    }

    #[test]
    fn test_sack_option_empty() {
        let option = SackOption::new_checked(&[0u8; 0][..]).unwrap();
        assert_eq!(option.num_blocks(), 0);
        assert_eq!(option.blocks().count(), 0);
    }

    #[test]
    fn test_sack_option_validation() {
        assert_eq!(
            SackOption::new_checked(&[0u8; 7][..]).err(),
            Some(Error::InvalidPayloadLength(5))
        );
        assert_eq!(
            SackOption::new_checked(&[0u8; 40][..]).err(),
            Some(Error::InvalidPayloadLength(5))
        );
        assert!(SackOption::new_checked(&[0u8; 32][..]).is_ok());
    }

    #[test]
    #[should_panic]
    fn test_sack_option_block_out_of_range() {
        let option = SackOption::new_unchecked(&[0u8; 8][..]);
        option.block(1);
    }

    #[test]
    fn test_user_timeout_option() {
        let mut buffer = [0u8; 2];
        let mut option = UserTimeoutOption::new_unchecked(&mut buffer[..]);
        option.set_timeout(true, 600);
        assert!(option.in_minutes());
        assert_eq!(option.timeout(), 600);

        option.set_timeout(false, 0xFFFF);
        assert!(!option.in_minutes());
        assert_eq!(option.timeout(), 0x7FFF);
    }

    #[test]
    fn test_authentication_option() {
        let mut buffer = [0u8; 2];
        let mut option = AuthenticationOption::new_unchecked(&mut buffer[..]);
        option.set_token(0xBEEF);
        assert_eq!(option.token(), 0xBEEF);
        assert_eq!(buffer, [0xBE, 0xEF]);
    }

    #[test]
    fn test_views_reject_short_payloads() {
        assert_eq!(MssOption::new_checked(&[0u8; 1][..]).err(), Some(Error::BufferTooShort));
        assert_eq!(WindowScaleOption::new_checked(&[0u8; 0][..]).err(), Some(Error::BufferTooShort));
        assert_eq!(TimestampsOption::new_checked(&[0u8; 7][..]).err(), Some(Error::BufferTooShort));
        assert_eq!(UserTimeoutOption::new_checked(&[0u8; 1][..]).err(), Some(Error::BufferTooShort));
        assert_eq!(
            AuthenticationOption::new_checked(&[0u8; 1][..]).err(),
            Some(Error::BufferTooShort)
        );
    }
}
