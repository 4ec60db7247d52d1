use crate::catalog::OptionKind;
use crate::error::*;
use crate::options::*;
use crate::packet::OptionRecord;
use core::fmt;

/// A high-level representation of one TCP option.
///
/// Known layouts are parsed into their fields; everything else is kept as
/// raw payload bytes. Emitting writes the payload only, so a `Repr` can be
/// written back over an existing option of the same kind and size with
/// `TcpOptions::emit`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum OptionRepr<'a> {
    /// End of option list.
    EndOfOptionsList,
    /// No operation.
    Nop,
    /// Maximum segment size.
    Mss(u16),
    /// Window scale shift count.
    WindowScale(u8),
    /// SACK permitted.
    SackPermitted,
    /// Selective acknowledgement blocks, raw.
    Sack(&'a [u8]),
    /// Timestamps.
    Timestamps {
        /// Timestamp value.
        tsval: u32,
        /// Timestamp echo reply.
        tsecr: u32,
    },
    /// User timeout.
    UserTimeout {
        /// Timeout is in minutes rather than seconds.
        minutes: bool,
        /// 15-bit timeout.
        timeout: u16,
    },
    /// Enforcer authentication token.
    Authentication(u16),
    /// Any other option, payload kept as is.
    Other {
        /// Option kind.
        kind: OptionKind,
        /// Payload bytes.
        payload: &'a [u8],
    },
}

impl<'a> OptionRepr<'a> {
    /// Parse a decoded record into a high-level representation.
    ///
    /// # Arguments
    ///
    /// * `record` - A record returned by `TcpOptions::record` or `records`
    ///
    /// # Returns
    ///
    /// * `Result<OptionRepr>` - The parsed option, or an error if the payload
    ///   does not fit the kind's layout
    pub fn parse(record: &OptionRecord<'a>) -> Result<OptionRepr<'a>> {
        let payload = record.payload;
        let repr = match record.kind {
            OptionKind::EndOfOptionsList => OptionRepr::EndOfOptionsList,
            OptionKind::Nop => OptionRepr::Nop,
            OptionKind::Mss => OptionRepr::Mss(MssOption::new_checked(payload)?.mss()),
            OptionKind::WindowScale => {
                OptionRepr::WindowScale(WindowScaleOption::new_checked(payload)?.shift())
            }
            OptionKind::SackPermitted => OptionRepr::SackPermitted,
            OptionKind::Sack => {
                SackOption::new_checked(payload)?;
                OptionRepr::Sack(payload)
            }
            OptionKind::Timestamps => {
                let option = TimestampsOption::new_checked(payload)?;
                OptionRepr::Timestamps {
                    tsval: option.tsval(),
                    tsecr: option.tsecr(),
                }
            }
            OptionKind::UserTimeout => {
                let option = UserTimeoutOption::new_checked(payload)?;
                OptionRepr::UserTimeout {
                    minutes: option.in_minutes(),
                    timeout: option.timeout(),
                }
            }
            OptionKind::EnforcerAuthentication => {
                OptionRepr::Authentication(AuthenticationOption::new_checked(payload)?.token())
            }
            kind => OptionRepr::Other { kind, payload },
        };
        Ok(repr)
    }

    /// The option kind this representation emits.
    pub fn kind(&self) -> OptionKind {
        match self {
            OptionRepr::EndOfOptionsList => OptionKind::EndOfOptionsList,
            OptionRepr::Nop => OptionKind::Nop,
            OptionRepr::Mss(_) => OptionKind::Mss,
            OptionRepr::WindowScale(_) => OptionKind::WindowScale,
            OptionRepr::SackPermitted => OptionKind::SackPermitted,
            OptionRepr::Sack(_) => OptionKind::Sack,
            OptionRepr::Timestamps { .. } => OptionKind::Timestamps,
            OptionRepr::UserTimeout { .. } => OptionKind::UserTimeout,
            OptionRepr::Authentication(_) => OptionKind::EnforcerAuthentication,
            OptionRepr::Other { kind, .. } => OptionKind::from_u8(kind.as_u8()),
        }
    }

    /// Payload size in bytes, excluding kind and length bytes.
    pub fn payload_len(&self) -> usize {
        match self {
            OptionRepr::EndOfOptionsList | OptionRepr::Nop | OptionRepr::SackPermitted => 0,
            OptionRepr::Mss(_) => MssOption::<&[u8]>::LENGTH,
            OptionRepr::WindowScale(_) => WindowScaleOption::<&[u8]>::LENGTH,
            OptionRepr::Sack(blocks) => blocks.len(),
            OptionRepr::Timestamps { .. } => TimestampsOption::<&[u8]>::LENGTH,
            OptionRepr::UserTimeout { .. } => UserTimeoutOption::<&[u8]>::LENGTH,
            OptionRepr::Authentication(_) => AuthenticationOption::<&[u8]>::LENGTH,
            OptionRepr::Other { payload, .. } => payload.len(),
        }
    }

    /// Emits the payload into the provided buffer.
    ///
    /// # Arguments
    ///
    /// * `payload` - Exactly [`OptionRepr::payload_len`] bytes to overwrite.
    ///
    /// # Panics
    ///
    /// If `payload` is shorter than [`OptionRepr::payload_len`].
    pub fn emit(&self, payload: &mut [u8]) {
        match *self {
            OptionRepr::EndOfOptionsList | OptionRepr::Nop | OptionRepr::SackPermitted => {}
            OptionRepr::Mss(value) => MssOption::new_unchecked(payload).set_mss(value),
            OptionRepr::WindowScale(shift) => {
                WindowScaleOption::new_unchecked(payload).set_shift(shift)
            }
            OptionRepr::Sack(blocks) => payload[..blocks.len()].copy_from_slice(blocks),
            OptionRepr::Timestamps { tsval, tsecr } => {
                let mut option = TimestampsOption::new_unchecked(payload);
                option.set_tsval(tsval);
                option.set_tsecr(tsecr);
            }
            OptionRepr::UserTimeout { minutes, timeout } => {
                UserTimeoutOption::new_unchecked(payload).set_timeout(minutes, timeout)
            }
            OptionRepr::Authentication(token) => {
                AuthenticationOption::new_unchecked(payload).set_token(token)
            }
            OptionRepr::Other { payload: data, .. } => {
                payload[..data.len()].copy_from_slice(data)
            }
        }
    }
}

impl<'a> fmt::Display for OptionRepr<'a> {
    /// Formats the option as a short human-readable string.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OptionRepr::Mss(value) => write!(f, "MSS {}", value),
            OptionRepr::WindowScale(shift) => write!(f, "WS {}", shift),
            OptionRepr::Sack(blocks) => write!(f, "SACK {} blocks", blocks.len() / 8),
            OptionRepr::Timestamps { tsval, tsecr } => write!(f, "TS {}/{}", tsval, tsecr),
            OptionRepr::UserTimeout { minutes, timeout } => {
                write!(f, "UTO {}{}", timeout, if *minutes { "m" } else { "s" })
            }
            OptionRepr::Authentication(token) => write!(f, "AUTH 0x{:04x}", token),
            OptionRepr::Other { kind, payload } => write!(f, "{} ({} bytes)", kind, payload.len()),
            other => write!(f, "{}", other.kind()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::TcpOptions;

    #[test]
    fn test_repr_parse_known() {
        let buffer = [2u8, 4, 0x05, 0xB4, 3, 3, 7, 8, 10, 0, 0, 0, 5, 0, 0, 0, 6, 1, 1];
        let options = TcpOptions::new_checked(&buffer[..]).unwrap();

        let mss = options.record(OptionKind::Mss).unwrap();
        assert_eq!(OptionRepr::parse(&mss), Ok(OptionRepr::Mss(1460)));

        let ws = options.record(OptionKind::WindowScale).unwrap();
        assert_eq!(OptionRepr::parse(&ws), Ok(OptionRepr::WindowScale(7)));

        let ts = options.record(OptionKind::Timestamps).unwrap();
        assert_eq!(
            OptionRepr::parse(&ts),
            Ok(OptionRepr::Timestamps { tsval: 5, tsecr: 6 })
        );

        let nop = options.record(OptionKind::Nop).unwrap();
        assert_eq!(OptionRepr::parse(&nop), Ok(OptionRepr::Nop));
    }

    #[test]
    fn test_repr_parse_other() {
        let record = OptionRecord {
            kind: OptionKind::FastOpenCookie,
            length: 6,
            payload: &[1, 2, 3, 4],
        };
        assert_eq!(
            OptionRepr::parse(&record),
            Ok(OptionRepr::Other {
                kind: OptionKind::FastOpenCookie,
                payload: &[1, 2, 3, 4],
            })
        );
    }

    #[test]
    fn test_repr_parse_bad_sack() {
        let record = OptionRecord {
            kind: OptionKind::Sack,
            length: 5,
            payload: &[1, 2, 3],
        };
        assert_eq!(OptionRepr::parse(&record), Err(Error::InvalidPayloadLength(5)));
    }

    #[test]
    fn test_repr_emit_over_existing() {
        let mut buffer = [1u8, 1, 8, 10, 0, 0, 0, 0, 0, 0, 0, 0, 255, 4, 0, 0, 0, 0, 0, 0];
        let mut options = TcpOptions::new_checked(&mut buffer[..]).unwrap();

        options
            .emit(&OptionRepr::Timestamps { tsval: 0x01020304, tsecr: 0x0A0B0C0D })
            .unwrap();
        options.emit(&OptionRepr::Authentication(0xBEEF)).unwrap();

        assert_eq!(options.timestamps(), Ok((0x01020304, 0x0A0B0C0D)));
        assert_eq!(options.authentication_token(), Ok(0xBEEF));
        assert_eq!(
            buffer,
            [1, 1, 8, 10, 1, 2, 3, 4, 0x0A, 0x0B, 0x0C, 0x0D, 255, 4, 0xBE, 0xEF, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_repr_emit_mismatch() {
        let mut buffer = [5u8, 10, 0, 0, 0, 1, 0, 0, 0, 2];
        let mut options = TcpOptions::new_checked(&mut buffer[..]).unwrap();

        // Absent kind.
        assert_eq!(
            options.emit(&OptionRepr::Mss(1200)),
            Err(Error::PayloadOverwriteMismatch(2))
        );
        // Present, but a different size than on the wire.
        let blocks = [0u8; 16];
        assert_eq!(
            options.emit(&OptionRepr::Sack(&blocks)),
            Err(Error::PayloadOverwriteMismatch(5))
        );
        assert_eq!(buffer, [5, 10, 0, 0, 0, 1, 0, 0, 0, 2]);
    }

    #[test]
    fn test_repr_parse_emit_roundtrip() {
        let original = [28u8, 4, 0x80, 0x1E, 3, 3, 14];
        let options = TcpOptions::new_checked(&original[..]).unwrap();

        let mut copy = [28u8, 4, 0, 0, 3, 3, 0];
        let mut target = TcpOptions::new_checked(&mut copy[..]).unwrap();
        for record in options.records() {
            let repr = OptionRepr::parse(&record).unwrap();
            assert_eq!(repr.payload_len(), record.payload.len());
            target.emit(&repr).unwrap();
        }
        assert_eq!(copy, original);
    }

    #[test]
    fn test_repr_kind_and_len() {
        assert_eq!(OptionRepr::Mss(1).kind(), OptionKind::Mss);
        assert_eq!(OptionRepr::Mss(1).payload_len(), 2);
        assert_eq!(OptionRepr::Authentication(1).kind(), OptionKind::EnforcerAuthentication);
        assert_eq!(OptionRepr::SackPermitted.payload_len(), 0);
        assert_eq!(OptionRepr::Timestamps { tsval: 0, tsecr: 0 }.payload_len(), 8);

        let other = OptionRepr::Other { kind: OptionKind::Unknown(2), payload: &[0, 1] };
        assert!(matches!(other.kind(), OptionKind::Mss));
    }

    #[test]
    fn test_repr_display() {
        assert_eq!(format!("{}", OptionRepr::Mss(1460)), "MSS 1460");
        assert_eq!(
            format!("{}", OptionRepr::UserTimeout { minutes: true, timeout: 5 }),
            "UTO 5m"
        );
        assert_eq!(format!("{}", OptionRepr::Nop), "Nop");
        assert_eq!(format!("{}", OptionRepr::Authentication(0xBEEF)), "AUTH 0xbeef");
    }
}
