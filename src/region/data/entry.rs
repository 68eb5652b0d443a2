use core::fmt::{Display, Formatter};

use super::attributes::FileAttributes;
use super::checksum::checksum;
use super::datetime::{Date, DateTime, Time};
use super::{RawEntry, ESCAPED_FREE, FREE};
use crate::endian::Little;
use crate::types::ClusterID;

const NT_LOWERCASE_BASE: u8 = 0x08;
const NT_LOWERCASE_EXTENSION: u8 = 0x10;

/// Space padded 8.3 name as stored, base name followed by extension
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ShortName {
    bytes: [u8; 11],
    nt_flags: u8,
}

impl ShortName {
    pub(crate) fn new(bytes: [u8; 11], nt_flags: u8) -> Self {
        Self { bytes, nt_flags }
    }

    pub fn bytes(&self) -> &[u8; 11] {
        &self.bytes
    }

    pub fn checksum(&self) -> u8 {
        checksum(&self.bytes)
    }

    fn push(output: &mut heapless::String<23>, bytes: &[u8], lowercase: bool) {
        for &byte in bytes.iter() {
            let byte = if lowercase { byte.to_ascii_lowercase() } else { byte };
            output.push(byte as char).ok();
        }
    }

    /// Dotted form like `README.TXT`, padding stripped
    pub fn display(&self) -> heapless::String<23> {
        let mut base = self.bytes;
        if base[0] == ESCAPED_FREE {
            base[0] = FREE;
        }
        let base_length = base[..8].iter().rposition(|&b| b != b' ').map_or(0, |i| i + 1);
        let extension_length = base[8..].iter().rposition(|&b| b != b' ').map_or(0, |i| i + 1);
        let mut output = heapless::String::new();
        let lowercase = self.nt_flags & NT_LOWERCASE_BASE > 0;
        Self::push(&mut output, &base[..base_length], lowercase);
        if extension_length > 0 {
            output.push('.').ok();
            let lowercase = self.nt_flags & NT_LOWERCASE_EXTENSION > 0;
            Self::push(&mut output, &base[8..8 + extension_length], lowercase);
        }
        output
    }
}

impl Display for ShortName {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Decoded 32 bytes short (8.3) directory entry
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ShortEntry {
    pub name: ShortName,
    pub attributes: FileAttributes,
    pub created: DateTime,
    pub last_accessed: Date,
    pub last_modified: DateTime,
    pub first_cluster: ClusterID,
    pub size: u32,
}

impl ShortEntry {
    pub(crate) fn parse(raw: &RawEntry) -> Self {
        let bytes = &raw[..];
        let cluster_high = bytes.u16_at(20) as u32;
        let cluster_low = bytes.u16_at(26) as u32;
        Self {
            name: ShortName::new(bytes.array_at(0), bytes.u8_at(12)),
            attributes: bytes.u8_at(11).into(),
            created: DateTime {
                date: bytes.u16_at(16).into(),
                time: bytes.u16_at(14).into(),
                centisecond: bytes.u8_at(13),
            },
            last_accessed: bytes.u16_at(18).into(),
            last_modified: DateTime {
                date: bytes.u16_at(24).into(),
                time: Time::from(bytes.u16_at(22)),
                centisecond: 0,
            },
            first_cluster: ((cluster_high << 16) | cluster_low).into(),
            size: bytes.u32_at(28),
        }
    }

    pub fn is_directory(&self) -> bool {
        self.attributes.is_directory()
    }

    /// Label stored as an 11 bytes name, trailing spaces removed
    pub fn label(&self) -> heapless::String<22> {
        let mut label = heapless::String::new();
        for &byte in self.name.bytes().iter() {
            label.push(byte as char).ok();
        }
        let length = label.trim_end_matches(' ').len();
        label.truncate(length);
        label
    }
}

pub const CHARS_PER_FRAGMENT: usize = 13;
/// 255 UCS-2 characters at most, 13 per fragment
pub const MAX_FRAGMENTS: usize = 20;

const LAST_FRAGMENT: u8 = 0x40;
const ORDINAL_MASK: u8 = 0x1F;

/// One slot of a long filename, overlaying a 32 bytes directory slot
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LfnFragment {
    /// Ordinal counted from the fragment nearest to the short entry, starting with 1
    pub sequence: u8,
    pub is_last: bool,
    pub checksum: u8,
    pub chars: [u16; CHARS_PER_FRAGMENT],
}

impl LfnFragment {
    pub(crate) fn parse(raw: &RawEntry) -> Self {
        let bytes = &raw[..];
        let mut chars = [0u16; CHARS_PER_FRAGMENT];
        // Characters 1~5, 6~11 and 12~13 live at three discontiguous offsets
        let offsets = (0..5).map(|i| 1 + i * 2);
        let offsets = offsets.chain((0..6).map(|i| 14 + i * 2));
        let offsets = offsets.chain((0..2).map(|i| 28 + i * 2));
        for (ch, offset) in chars.iter_mut().zip(offsets) {
            *ch = bytes.u16_at(offset);
        }
        let sequence = bytes.u8_at(0);
        Self {
            sequence: sequence & ORDINAL_MASK,
            is_last: sequence & LAST_FRAGMENT > 0,
            checksum: bytes.u8_at(13),
            chars,
        }
    }

    /// Code units before the first 0xFFFF padding or NUL terminator
    pub fn units(&self) -> impl Iterator<Item = u16> + '_ {
        self.chars.iter().copied().take_while(|&ch| ch != 0xFFFF && ch != 0x0000)
    }
}
