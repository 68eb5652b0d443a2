use alloc::string::String;

use super::DirectorySlot;
use crate::error::LfnError;
use crate::region::data::entry::{CHARS_PER_FRAGMENT, MAX_FRAGMENTS};

/// Long filename of one short entry
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReconstructedName {
    name: String,
    length: usize,
    fragments: usize,
}

impl ReconstructedName {
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Number of characters, equal to what [`long_name_length`] reports
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// LFN fragments consumed
    pub fn fragments(&self) -> usize {
        self.fragments
    }

    pub fn into_string(self) -> String {
        self.name
    }
}

/// Walk fragments backward from the short entry at `index`, feeding each
/// character to `sink` in reading order. Returns the number of fragments
/// consumed, or `None` when no fragment precedes the short entry.
fn walk<F: FnMut(u8)>(slots: &[DirectorySlot], index: usize, mut sink: F) -> Result<Option<usize>, LfnError> {
    let short_entry = match slots.get(index) {
        Some(DirectorySlot::File(entry)) | Some(DirectorySlot::Directory(entry)) => entry,
        _ => return Err(LfnError::NotShortEntry(index)),
    };
    let expected = short_entry.name.checksum();
    let mut fragments = 0;
    for slot in slots[..index].iter().rev() {
        let fragment = match slot {
            DirectorySlot::LfnFragment(fragment) => fragment,
            _ if fragments == 0 => return Ok(None),
            _ => break,
        };
        if fragment.checksum != expected {
            return Err(LfnError::ChecksumMismatch { expected, found: fragment.checksum });
        }
        fragments += 1;
        trace!("Fragment {} of slot {} sequence {}", fragments, index, fragment.sequence);
        if fragment.sequence as usize != fragments {
            return Err(LfnError::MalformedChain);
        }
        for unit in fragment.units() {
            if unit > 0xFF {
                return Err(LfnError::UnsupportedEncoding(unit));
            }
            sink(unit as u8);
        }
        if fragment.is_last {
            return Ok(Some(fragments));
        }
        if fragments >= MAX_FRAGMENTS {
            break;
        }
    }
    match fragments {
        0 => Ok(None),
        _ => Err(LfnError::MalformedChain),
    }
}

/// Long filename of the short entry at `index`
pub fn reconstruct(slots: &[DirectorySlot], index: usize) -> Result<Option<ReconstructedName>, LfnError> {
    let mut name = String::with_capacity(CHARS_PER_FRAGMENT * 2);
    let mut length = 0;
    let fragments = walk(slots, index, |byte| {
        name.push(byte as char);
        length += 1;
    })?;
    Ok(fragments.map(|fragments| ReconstructedName { name, length, fragments }))
}

/// Character count of the long filename, without materializing it
pub fn long_name_length(slots: &[DirectorySlot], index: usize) -> Result<Option<usize>, LfnError> {
    let mut length = 0;
    let fragments = walk(slots, index, |_| length += 1)?;
    Ok(fragments.map(|_| length))
}

#[cfg(test)]
mod test {
    use std::vec::Vec;

    use super::{long_name_length, reconstruct};
    use crate::directory::DirectorySlot;
    use crate::error::LfnError;
    use crate::region::data::attributes::FileAttributes;
    use crate::region::data::checksum::checksum;
    use crate::region::data::entry::test::{lfn_chain, lfn_fragment, short_entry};
    use crate::region::data::RawEntry;

    const SHORT_NAME: &[u8; 11] = b"REPORT~1TXT";

    fn slots(raws: &[RawEntry]) -> Vec<DirectorySlot> {
        raws.iter().map(DirectorySlot::classify).collect()
    }

    fn with_short_entry(mut raws: Vec<RawEntry>) -> Vec<DirectorySlot> {
        raws.push(short_entry(SHORT_NAME, FileAttributes::ARCHIVE, 3, 1024));
        slots(&raws)
    }

    #[test]
    fn test_round_trip() {
        let name = "REPORT-FINAL-VERSION.TXT";
        let slots = with_short_entry(lfn_chain(name, checksum(SHORT_NAME)));
        let index = slots.len() - 1;
        let reconstructed = reconstruct(&slots, index).unwrap().unwrap();
        assert_eq!(reconstructed.as_str(), name);
        assert_eq!(reconstructed.fragments(), 2);
        assert_eq!(long_name_length(&slots, index), Ok(Some(name.len())));
        assert_eq!(reconstructed.len(), name.len());
    }

    #[test]
    fn test_exactly_one_fragment() {
        let name = "THIRTEEN-CHAR";
        let chain = lfn_chain(name, checksum(SHORT_NAME));
        assert_eq!(chain.len(), 1);
        assert!(chain[0][1..].windows(2).all(|w| w != [0xFF, 0xFF]));
        let slots = with_short_entry(chain);
        let reconstructed = reconstruct(&slots, 1).unwrap().unwrap();
        assert_eq!(reconstructed.as_str(), name);
        assert_eq!(reconstructed.fragments(), 1);
        assert_eq!(long_name_length(&slots, 1), Ok(Some(13)));
    }

    #[test]
    fn test_fourteen_chars_need_second_fragment() {
        let name = "FOURTEEN-CHARS";
        let chain = lfn_chain(name, checksum(SHORT_NAME));
        assert_eq!(chain.len(), 2);
        let slots = with_short_entry(chain);
        match &slots[0] {
            DirectorySlot::LfnFragment(fragment) => {
                assert!(fragment.is_last);
                assert_eq!(fragment.chars[0], b'S' as u16);
                assert!(fragment.chars[1..].iter().all(|&ch| ch == 0xFFFF));
            }
            slot => panic!("Unexpected slot {:?}", slot),
        }
        let reconstructed = reconstruct(&slots, 2).unwrap().unwrap();
        assert_eq!(reconstructed.as_str(), name);
        assert_eq!(long_name_length(&slots, 2), Ok(Some(14)));
    }

    #[test]
    fn test_checksum_mismatch() {
        let expected = checksum(SHORT_NAME);
        let mut chain = lfn_chain("REPORT-FINAL-VERSION.TXT", expected);
        chain[0][13] = expected.wrapping_add(1);
        let slots = with_short_entry(chain);
        let error = LfnError::ChecksumMismatch { expected, found: expected.wrapping_add(1) };
        assert_eq!(reconstruct(&slots, 2), Err(error));
        assert_eq!(long_name_length(&slots, 2), Err(error));
    }

    #[test]
    fn test_unterminated_chain() {
        let sum = checksum(SHORT_NAME);
        let chars = [b'X' as u16; 13];
        let mut raws: Vec<RawEntry> = (1..=21u8).rev().map(|ordinal| lfn_fragment(ordinal, sum, &chars)).collect();
        let slots = with_short_entry(raws.clone());
        let index = slots.len() - 1;
        assert_eq!(reconstruct(&slots, index), Err(LfnError::MalformedChain));
        assert_eq!(long_name_length(&slots, index), Err(LfnError::MalformedChain));

        // Chain running into the start of the buffer
        raws.drain(..18);
        let slots = with_short_entry(raws);
        assert_eq!(reconstruct(&slots, 3), Err(LfnError::MalformedChain));
    }

    #[test]
    fn test_out_of_order_fragments() {
        let mut chain = lfn_chain("REPORT-FINAL-VERSION.TXT", checksum(SHORT_NAME));
        chain.swap(0, 1);
        let slots = with_short_entry(chain);
        assert_eq!(reconstruct(&slots, 2), Err(LfnError::MalformedChain));
    }

    #[test]
    fn test_unsupported_encoding() {
        let slots = with_short_entry(lfn_chain("résumé-ÿ-ĳ.doc", checksum(SHORT_NAME)));
        assert_eq!(reconstruct(&slots, 2), Err(LfnError::UnsupportedEncoding(0x0133)));
        assert_eq!(long_name_length(&slots, 2), Err(LfnError::UnsupportedEncoding(0x0133)));
    }

    #[test]
    fn test_short_name_only() {
        let raws = [
            short_entry(b"README  TXT", FileAttributes::ARCHIVE, 3, 10),
            short_entry(SHORT_NAME, FileAttributes::ARCHIVE, 4, 10),
        ];
        let slots = slots(&raws);
        assert_eq!(reconstruct(&slots, 0), Ok(None));
        assert_eq!(reconstruct(&slots, 1), Ok(None));
        assert_eq!(long_name_length(&slots, 1), Ok(None));
    }

    #[test]
    fn test_not_short_entry() {
        let slots = with_short_entry(lfn_chain("REPORT-FINAL-VERSION.TXT", checksum(SHORT_NAME)));
        assert_eq!(reconstruct(&slots, 0), Err(LfnError::NotShortEntry(0)));
        assert_eq!(reconstruct(&slots, 9), Err(LfnError::NotShortEntry(9)));
    }
}
