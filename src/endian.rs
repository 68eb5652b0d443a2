//! Little endian field extraction over raw on-disk bytes.
//!
//! Every on-disk structure is decoded field by field from its byte offset,
//! independent of host byte order and struct layout.

pub(crate) trait Little {
    fn u8_at(&self, offset: usize) -> u8;
    fn u16_at(&self, offset: usize) -> u16;
    fn u32_at(&self, offset: usize) -> u32;
    fn array_at<const N: usize>(&self, offset: usize) -> [u8; N];
}

macro_rules! define {
    ($name:ident, $type:ty) => {
        #[inline]
        fn $name(&self, offset: usize) -> $type {
            <$type>::from_le_bytes(self.array_at(offset))
        }
    };
}

impl Little for [u8] {
    #[inline]
    fn u8_at(&self, offset: usize) -> u8 {
        self[offset]
    }

    define!(u16_at, u16);
    define!(u32_at, u32);

    #[inline]
    fn array_at<const N: usize>(&self, offset: usize) -> [u8; N] {
        let mut array = [0u8; N];
        array.copy_from_slice(&self[offset..offset + N]);
        array
    }
}
