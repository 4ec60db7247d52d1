//! Option kinds and their length classes.
//!
//! The catalog is a compiled-in pure function: every one of the 256 kind
//! values maps to exactly one [`LengthClass`], and kinds with no entry fall
//! through to [`LengthClass::Zero`].

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

/// TCP option kind.
///
/// An open enumeration over the 8-bit kind field. Kinds listed in the catalog
/// get a named variant; any other value is carried as `Unknown`.
///
/// Equality, hashing and ordering are by kind byte, so `Unknown(2)` is the
/// same kind as `Mss` and kinds sort in wire order.
#[derive(Debug, Clone, Copy)]
pub enum OptionKind {
    /// End of option list (0)
    EndOfOptionsList,
    /// No operation, used for padding (1)
    Nop,
    /// Maximum segment size (2)
    Mss,
    /// Window scale (3)
    WindowScale,
    /// SACK permitted (4)
    SackPermitted,
    /// Selective acknowledgement (5)
    Sack,
    /// Echo, obsoleted by timestamps (6)
    Echo,
    /// Echo reply, obsoleted by timestamps (7)
    EchoReply,
    /// Timestamps (8)
    Timestamps,
    /// Partial order connection permitted (9)
    PartialOrderConnectionPermitted,
    /// Partial order service profile (10)
    PartialOrderServiceProfile,
    /// Connection count (11)
    Cc,
    /// CC.NEW (12)
    CcNew,
    /// CC.ECHO (13)
    CcEcho,
    /// Alternate checksum request (14)
    AlternateChecksumRequest,
    /// Alternate checksum data (15)
    AlternateChecksumData,
    /// Skeeter (16)
    Skeeter,
    /// Bubba (17)
    Bubba,
    /// Trailer checksum (18)
    TrailerChecksum,
    /// MD5 signature (19)
    Md5Signature,
    /// SCPS capabilities (20)
    ScpsCapabilities,
    /// Selective negative acknowledgements (21)
    SelectiveNegativeAck,
    /// Record boundaries (22)
    RecordBoundaries,
    /// Corruption experienced (23)
    CorruptionExperienced,
    /// SNAP (24)
    Snap,
    /// Unassigned (25)
    Unassigned,
    /// Compression filter (26)
    CompressionFilter,
    /// Quick-start response (27)
    QuickStartResponse,
    /// User timeout (28)
    UserTimeout,
    /// TCP authentication option (29)
    TcpAuthentication,
    /// Multipath TCP (30)
    Multipath,
    /// Reserved (31)
    Reserved,
    /// TCP Fast Open cookie (34)
    FastOpenCookie,
    /// Authentication metadata inserted by the enforcer (255)
    EnforcerAuthentication,
    /// Any kind without a named variant, including the reserved range.
    Unknown(u8),
}

impl OptionKind {
    /// Convert a kind byte to an OptionKind.
    ///
    /// Total: values without a named variant become `Unknown`.
    pub const fn from_u8(value: u8) -> Self {
        match value {
            0 => OptionKind::EndOfOptionsList,
            1 => OptionKind::Nop,
            2 => OptionKind::Mss,
            3 => OptionKind::WindowScale,
            4 => OptionKind::SackPermitted,
            5 => OptionKind::Sack,
            6 => OptionKind::Echo,
            7 => OptionKind::EchoReply,
            8 => OptionKind::Timestamps,
            9 => OptionKind::PartialOrderConnectionPermitted,
            10 => OptionKind::PartialOrderServiceProfile,
            11 => OptionKind::Cc,
            12 => OptionKind::CcNew,
            13 => OptionKind::CcEcho,
            14 => OptionKind::AlternateChecksumRequest,
            15 => OptionKind::AlternateChecksumData,
            16 => OptionKind::Skeeter,
            17 => OptionKind::Bubba,
            18 => OptionKind::TrailerChecksum,
            19 => OptionKind::Md5Signature,
            20 => OptionKind::ScpsCapabilities,
            21 => OptionKind::SelectiveNegativeAck,
            22 => OptionKind::RecordBoundaries,
            23 => OptionKind::CorruptionExperienced,
            24 => OptionKind::Snap,
            25 => OptionKind::Unassigned,
            26 => OptionKind::CompressionFilter,
            27 => OptionKind::QuickStartResponse,
            28 => OptionKind::UserTimeout,
            29 => OptionKind::TcpAuthentication,
            30 => OptionKind::Multipath,
            31 => OptionKind::Reserved,
            34 => OptionKind::FastOpenCookie,
            255 => OptionKind::EnforcerAuthentication,
            other => OptionKind::Unknown(other),
        }
    }

    /// Convert the OptionKind to its kind byte.
    pub const fn as_u8(&self) -> u8 {
        match *self {
            OptionKind::EndOfOptionsList => 0,
            OptionKind::Nop => 1,
            OptionKind::Mss => 2,
            OptionKind::WindowScale => 3,
            OptionKind::SackPermitted => 4,
            OptionKind::Sack => 5,
            OptionKind::Echo => 6,
            OptionKind::EchoReply => 7,
            OptionKind::Timestamps => 8,
            OptionKind::PartialOrderConnectionPermitted => 9,
            OptionKind::PartialOrderServiceProfile => 10,
            OptionKind::Cc => 11,
            OptionKind::CcNew => 12,
            OptionKind::CcEcho => 13,
            OptionKind::AlternateChecksumRequest => 14,
            OptionKind::AlternateChecksumData => 15,
            OptionKind::Skeeter => 16,
            OptionKind::Bubba => 17,
            OptionKind::TrailerChecksum => 18,
            OptionKind::Md5Signature => 19,
            OptionKind::ScpsCapabilities => 20,
            OptionKind::SelectiveNegativeAck => 21,
            OptionKind::RecordBoundaries => 22,
            OptionKind::CorruptionExperienced => 23,
            OptionKind::Snap => 24,
            OptionKind::Unassigned => 25,
            OptionKind::CompressionFilter => 26,
            OptionKind::QuickStartResponse => 27,
            OptionKind::UserTimeout => 28,
            OptionKind::TcpAuthentication => 29,
            OptionKind::Multipath => 30,
            OptionKind::Reserved => 31,
            OptionKind::FastOpenCookie => 34,
            OptionKind::EnforcerAuthentication => 255,
            OptionKind::Unknown(value) => value,
        }
    }

    /// Length class of this kind according to the catalog.
    pub const fn length_class(&self) -> LengthClass {
        length_class(self.as_u8())
    }
}

impl From<u8> for OptionKind {
    fn from(value: u8) -> Self {
        OptionKind::from_u8(value)
    }
}

impl From<OptionKind> for u8 {
    fn from(kind: OptionKind) -> Self {
        kind.as_u8()
    }
}

impl PartialEq for OptionKind {
    fn eq(&self, other: &Self) -> bool {
        self.as_u8() == other.as_u8()
    }
}

impl Eq for OptionKind {}

impl Hash for OptionKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_u8().hash(state);
    }
}

impl PartialOrd for OptionKind {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OptionKind {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_u8().cmp(&other.as_u8())
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match OptionKind::from_u8(self.as_u8()) {
            OptionKind::Unknown(value) => write!(f, "Unknown({})", value),
            known => write!(f, "{:?}", known),
        }
    }
}

/// How the on-wire size of an option is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthClass {
    /// Kind byte only: no length byte, no payload.
    Zero,
    /// Total size known from the kind, including the kind and length bytes.
    Fixed(u8),
    /// Total size carried in the length byte after the kind.
    Variable,
}

impl LengthClass {
    /// Bytes preceding the payload: the kind byte, plus the length byte for
    /// fixed and variable options.
    pub const fn header_len(&self) -> usize {
        match self {
            LengthClass::Zero => 1,
            LengthClass::Fixed(_) | LengthClass::Variable => 2,
        }
    }

    /// Total size for fixed options, `None` otherwise.
    pub const fn fixed_len(&self) -> Option<u8> {
        match self {
            LengthClass::Fixed(n) => Some(*n),
            _ => None,
        }
    }
}

/// Look up the length class of a kind byte.
///
/// # Example
/// ```
/// use tcp_options_wire::catalog::{length_class, LengthClass};
///
/// assert_eq!(length_class(2), LengthClass::Fixed(4));
/// assert_eq!(length_class(5), LengthClass::Variable);
/// assert_eq!(length_class(200), LengthClass::Zero);
/// ```
pub const fn length_class(kind: u8) -> LengthClass {
    match kind {
        0 | 1 => LengthClass::Zero,
        2 => LengthClass::Fixed(4),
        3 => LengthClass::Fixed(3),
        4 => LengthClass::Fixed(2),
        5 => LengthClass::Variable,
        6 | 7 => LengthClass::Fixed(6),
        8 => LengthClass::Fixed(10),
        9 => LengthClass::Fixed(2),
        10 => LengthClass::Fixed(3),
        11..=13 => LengthClass::Fixed(6),
        14 => LengthClass::Fixed(3),
        15 => LengthClass::Variable,
        16 | 17 => LengthClass::Zero,
        18 => LengthClass::Fixed(3),
        19 => LengthClass::Fixed(18),
        20 => LengthClass::Fixed(4),
        21 => LengthClass::Variable,
        22 | 23 => LengthClass::Fixed(2),
        24 => LengthClass::Variable,
        25 | 26 => LengthClass::Zero,
        27 => LengthClass::Fixed(8),
        28 => LengthClass::Fixed(4),
        29 => LengthClass::Zero,
        30 => LengthClass::Variable,
        31 => LengthClass::Zero,
        34 => LengthClass::Variable,
        255 => LengthClass::Fixed(4),
        // 32, 33 and the reserved range 35..=254 have no entry.
        _ => LengthClass::Zero,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrip_all_values() {
        for value in 0..=u8::MAX {
            assert_eq!(OptionKind::from_u8(value).as_u8(), value);
        }
    }

    #[test]
    fn test_kind_named_variants() {
        assert_eq!(OptionKind::from(0), OptionKind::EndOfOptionsList);
        assert_eq!(OptionKind::from(2), OptionKind::Mss);
        assert_eq!(OptionKind::from(34), OptionKind::FastOpenCookie);
        assert_eq!(OptionKind::from(255), OptionKind::EnforcerAuthentication);
        assert_eq!(OptionKind::from(32), OptionKind::Unknown(32));
        assert_eq!(OptionKind::from(200), OptionKind::Unknown(200));
        assert_eq!(u8::from(OptionKind::Timestamps), 8);
    }

    #[test]
    fn test_catalog_classes() {
        assert_eq!(length_class(0), LengthClass::Zero);
        assert_eq!(length_class(1), LengthClass::Zero);
        assert_eq!(length_class(2), LengthClass::Fixed(4));
        assert_eq!(length_class(3), LengthClass::Fixed(3));
        assert_eq!(length_class(4), LengthClass::Fixed(2));
        assert_eq!(length_class(8), LengthClass::Fixed(10));
        assert_eq!(length_class(19), LengthClass::Fixed(18));
        assert_eq!(length_class(255), LengthClass::Fixed(4));
        for kind in [5, 15, 21, 24, 30, 34] {
            assert_eq!(length_class(kind), LengthClass::Variable, "kind {}", kind);
        }
    }

    #[test]
    fn test_unlisted_kinds_are_zero_class() {
        assert_eq!(length_class(32), LengthClass::Zero);
        assert_eq!(length_class(33), LengthClass::Zero);
        for kind in 35..=254 {
            assert_eq!(length_class(kind), LengthClass::Zero);
        }
    }

    #[test]
    fn test_fixed_lengths_cover_header() {
        for kind in 0..=u8::MAX {
            if let LengthClass::Fixed(n) = length_class(kind) {
                assert!(n >= 2, "kind {} fixed length {}", kind, n);
            }
        }
    }

    #[test]
    fn test_length_class_helpers() {
        assert_eq!(LengthClass::Zero.header_len(), 1);
        assert_eq!(LengthClass::Fixed(4).header_len(), 2);
        assert_eq!(LengthClass::Variable.header_len(), 2);
        assert_eq!(LengthClass::Fixed(10).fixed_len(), Some(10));
        assert_eq!(LengthClass::Variable.fixed_len(), None);
        assert_eq!(OptionKind::Sack.length_class(), LengthClass::Variable);
    }

    #[test]
    fn test_kind_identity_is_the_byte() {
        let named: Vec<u8> = (0..=31).chain([34, 255]).collect();
        for value in 0..=u8::MAX {
            let kind = OptionKind::from_u8(value);
            assert_eq!(
                matches!(kind, OptionKind::Unknown(_)),
                !named.contains(&value),
                "kind {}",
                value
            );
            assert_eq!(kind, OptionKind::Unknown(value));
        }
        assert_eq!(OptionKind::Unknown(2), OptionKind::Mss);
        assert_ne!(OptionKind::Unknown(3), OptionKind::Mss);
    }

    #[test]
    fn test_kind_hash_follows_byte() {
        use std::collections::HashSet;

        let set: HashSet<OptionKind> = [OptionKind::Mss, OptionKind::Unknown(2)].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_kind_order_is_byte_order() {
        assert!(OptionKind::Unknown(32) < OptionKind::EnforcerAuthentication);
        assert!(OptionKind::Unknown(200) > OptionKind::FastOpenCookie);

        let mut kinds = vec![
            OptionKind::EnforcerAuthentication,
            OptionKind::Unknown(32),
            OptionKind::Unknown(200),
            OptionKind::Mss,
            OptionKind::Nop,
        ];
        kinds.sort();
        let bytes: Vec<u8> = kinds.iter().map(OptionKind::as_u8).collect();
        assert_eq!(bytes, vec![1, 2, 32, 200, 255]);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(format!("{}", OptionKind::Mss), "Mss");
        assert_eq!(format!("{}", OptionKind::Unknown(77)), "Unknown(77)");
        assert_eq!(format!("{}", OptionKind::Unknown(2)), "Mss");
    }
}
