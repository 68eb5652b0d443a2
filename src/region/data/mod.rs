pub(crate) mod attributes;
pub(crate) mod checksum;
pub(crate) mod datetime;
pub(crate) mod entry;

pub(crate) const ENTRY_SIZE: usize = 32;
pub(crate) type RawEntry = [u8; ENTRY_SIZE];

/// First name byte of the slot terminating a directory
pub(crate) const END_OF_DIRECTORY: u8 = 0x00;
/// First name byte of a deleted slot
pub(crate) const FREE: u8 = 0xE5;
/// Stored in place of a genuine leading 0xE5 name byte
pub(crate) const ESCAPED_FREE: u8 = 0x05;
