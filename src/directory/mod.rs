pub mod lfn;
mod slot_iter;

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::LfnError;
use crate::region::data::attributes::FileAttributes;
use crate::region::data::entry::{LfnFragment, ShortEntry};
use crate::region::data::{RawEntry, END_OF_DIRECTORY, FREE};
pub use lfn::{long_name_length, reconstruct, ReconstructedName};
pub use slot_iter::SlotIter;

/// One 32 bytes directory slot, classified
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DirectorySlot {
    /// No valid slot follows
    End,
    /// Deleted entry or orphaned LFN fragment
    Free,
    VolumeId { label: heapless::String<22> },
    Directory(ShortEntry),
    /// Regular file, whether or not the archive bit is set
    File(ShortEntry),
    LfnFragment(LfnFragment),
}

impl DirectorySlot {
    pub fn classify(raw: &RawEntry) -> Self {
        match raw[0] {
            END_OF_DIRECTORY => return Self::End,
            FREE => return Self::Free,
            _ => (),
        }
        let attributes = FileAttributes::from(raw[11]);
        if attributes.is_long_name() {
            return Self::LfnFragment(LfnFragment::parse(raw));
        }
        let entry = ShortEntry::parse(raw);
        match () {
            _ if attributes.is_volume_label() => Self::VolumeId { label: entry.label() },
            _ if attributes.is_directory() => Self::Directory(entry),
            _ => Self::File(entry),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::End => "end",
            Self::Free => "free",
            Self::VolumeId { .. } => "volume-id",
            Self::Directory(_) => "directory",
            Self::File(_) => "file",
            Self::LfnFragment(_) => "lfn-fragment",
        }
    }

    pub fn short_entry(&self) -> Option<&ShortEntry> {
        match self {
            Self::Directory(entry) | Self::File(entry) => Some(entry),
            _ => None,
        }
    }
}

/// File or directory entry of a listing, paired with its long name if any
#[derive(Clone, Debug)]
pub struct Entry<'a> {
    pub index: usize,
    pub short_entry: &'a ShortEntry,
    pub long_name: Result<Option<ReconstructedName>, LfnError>,
}

impl<'a> Entry<'a> {
    /// Long name when reconstructed, otherwise the dotted short name
    pub fn name(&self) -> String {
        match &self.long_name {
            Ok(Some(name)) => String::from(name.as_str()),
            _ => String::from(self.short_entry.name.display().as_str()),
        }
    }

    pub fn is_directory(&self) -> bool {
        self.short_entry.is_directory()
    }

    fn matches(&self, name: &str) -> bool {
        if let Ok(Some(long_name)) = &self.long_name {
            if long_name.as_str().eq_ignore_ascii_case(name) {
                return true;
            }
        }
        self.short_entry.name.display().eq_ignore_ascii_case(name)
    }
}

/// Classified content of one directory buffer
#[derive(Clone, Debug, Default)]
pub struct Directory {
    slots: Vec<DirectorySlot>,
}

impl Directory {
    /// Classify every slot of `buffer` up to and including the end marker
    pub fn parse(buffer: &[u8]) -> Self {
        Self { slots: SlotIter::new(buffer).map(|(_, slot)| slot).collect() }
    }

    pub fn slots(&self) -> &[DirectorySlot] {
        &self.slots
    }

    pub fn volume_label(&self) -> Option<&str> {
        self.slots.iter().find_map(|slot| match slot {
            DirectorySlot::VolumeId { label } => Some(label.as_str()),
            _ => None,
        })
    }

    /// Files and directories in storage order. A long name failing to
    /// reconstruct is reported on its own entry and never stops the listing.
    pub fn entries(&self) -> impl Iterator<Item = Entry<'_>> {
        let slots = &self.slots[..];
        slots.iter().enumerate().filter_map(move |(index, slot)| {
            let short_entry = slot.short_entry()?;
            let long_name = reconstruct(slots, index);
            if let Err(error) = &long_name {
                warn!("Long name of slot {} ({}) skipped: {}", index, short_entry.name, error);
            }
            Some(Entry { index, short_entry, long_name })
        })
    }

    /// Find a file or directory by long or short name, ASCII case insensitive
    pub fn find(&self, name: &str) -> Option<Entry<'_>> {
        self.entries().find(|entry| entry.matches(name))
    }
}
