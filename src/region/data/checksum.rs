/// Rotating checksum linking long filename fragments to their 8.3 entry
#[derive(Copy, Clone, Default, Debug)]
pub(crate) struct Checksum(u8);

impl Checksum {
    pub fn write(&mut self, bytes: &[u8]) {
        let mut sum = self.0;
        for &byte in bytes.iter() {
            sum = ((sum & 1) << 7).wrapping_add(sum >> 1).wrapping_add(byte);
        }
        self.0 = sum;
    }

    pub fn sum(&self) -> u8 {
        self.0
    }
}

/// Checksum over the 11 bytes of a short name, name and extension space padded
pub fn checksum(short_name: &[u8; 11]) -> u8 {
    let mut checksum = Checksum::default();
    checksum.write(short_name);
    checksum.sum()
}
