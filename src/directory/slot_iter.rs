use super::DirectorySlot;
use crate::region::data::{RawEntry, ENTRY_SIZE};

/// Classifies 32 bytes slots in storage order, fused after the end marker
pub struct SlotIter<'a> {
    entries: core::slice::ChunksExact<'a, u8>,
    index: usize,
    ended: bool,
}

impl<'a> SlotIter<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { entries: buffer.chunks_exact(ENTRY_SIZE), index: 0, ended: false }
    }
}

impl<'a> Iterator for SlotIter<'a> {
    type Item = (usize, DirectorySlot);

    fn next(&mut self) -> Option<Self::Item> {
        if self.ended {
            return None;
        }
        let chunk = self.entries.next()?;
        let mut raw: RawEntry = [0u8; ENTRY_SIZE];
        raw.copy_from_slice(chunk);
        let slot = DirectorySlot::classify(&raw);
        trace!("Slot {} classified as {}", self.index, slot.kind());
        self.ended = slot == DirectorySlot::End;
        let index = self.index;
        self.index += 1;
        Some((index, slot))
    }
}
