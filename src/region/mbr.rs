use derive_more::Display;

use crate::endian::Little;
use crate::error::{DataError, PartitionError};
use crate::types::SectorID;

pub const PARTITION_TABLE_OFFSET: usize = 0x1BE;
pub const PARTITION_ENTRY_SIZE: usize = 16;
pub const NUM_PARTITIONS: usize = 4;

const BOOT_SIGNATURE: [u8; 2] = hex!("55 AA");

/// FAT flavour the geometry is resolved with
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
pub enum FATVariant {
    FAT16,
    FAT32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PartitionType {
    Unused,
    FAT12,
    /// Less than 32MiB
    FAT16Small,
    Extended,
    FAT16,
    /// Less than 2GiB
    FAT32Small,
    FAT32,
    FAT16LBA,
    ExtendedLBA,
    Other(u8),
}

impl From<u8> for PartitionType {
    fn from(code: u8) -> Self {
        match code {
            0 => Self::Unused,
            1 => Self::FAT12,
            4 => Self::FAT16Small,
            5 => Self::Extended,
            6 => Self::FAT16,
            11 => Self::FAT32Small,
            12 => Self::FAT32,
            14 => Self::FAT16LBA,
            15 => Self::ExtendedLBA,
            _ => Self::Other(code),
        }
    }
}

impl From<PartitionType> for u8 {
    fn from(partition_type: PartitionType) -> u8 {
        match partition_type {
            PartitionType::Unused => 0,
            PartitionType::FAT12 => 1,
            PartitionType::FAT16Small => 4,
            PartitionType::Extended => 5,
            PartitionType::FAT16 => 6,
            PartitionType::FAT32Small => 11,
            PartitionType::FAT32 => 12,
            PartitionType::FAT16LBA => 14,
            PartitionType::ExtendedLBA => 15,
            PartitionType::Other(code) => code,
        }
    }
}

impl PartitionType {
    pub fn is_fat16(&self) -> bool {
        matches!(self, Self::FAT16 | Self::FAT16LBA | Self::FAT16Small)
    }

    pub fn is_fat32(&self) -> bool {
        matches!(self, Self::FAT32 | Self::FAT32Small)
    }

    pub fn is_supported(&self) -> bool {
        self.is_fat16() || self.is_fat32()
    }

    pub fn variant(&self) -> Result<FATVariant, PartitionError> {
        match () {
            _ if self.is_fat32() => Ok(FATVariant::FAT32),
            _ if self.is_fat16() => Ok(FATVariant::FAT16),
            _ => Err(PartitionError::UnsupportedPartitionType((*self).into())),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PartitionEntry {
    pub bootable: bool,
    pub partition_type: PartitionType,
    pub start_sector: SectorID,
    pub sector_count: u32,
}

impl PartitionEntry {
    /// Decode one 16 bytes partition table entry
    pub fn parse(bytes: &[u8]) -> Self {
        Self {
            bootable: bytes.u8_at(0) & 0x80 > 0,
            partition_type: bytes.u8_at(4).into(),
            start_sector: bytes.u32_at(8).into(),
            sector_count: bytes.u32_at(12),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.partition_type == PartitionType::Unused || self.sector_count == 0
    }
}

#[derive(Copy, Clone, Debug)]
pub struct PartitionTable(pub [PartitionEntry; NUM_PARTITIONS]);

impl PartitionTable {
    pub fn parse(sector: &[u8]) -> Result<Self, DataError> {
        if sector.len() < 512 || sector.array_at::<2>(510) != BOOT_SIGNATURE {
            return Err(DataError::MissingBootSignature);
        }
        let entry = |index: usize| {
            let offset = PARTITION_TABLE_OFFSET + index * PARTITION_ENTRY_SIZE;
            PartitionEntry::parse(&sector[offset..offset + PARTITION_ENTRY_SIZE])
        };
        Ok(Self([entry(0), entry(1), entry(2), entry(3)]))
    }

    pub fn get(&self, index: usize) -> Result<&PartitionEntry, DataError> {
        let entry = self.0.get(index).ok_or(DataError::PartitionIndex(index))?;
        match entry.is_empty() {
            true => Err(DataError::EmptyPartition),
            false => Ok(entry),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PartitionEntry> {
        self.0.iter().filter(|entry| !entry.is_empty())
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::{FATVariant, PartitionTable, PartitionType, PARTITION_TABLE_OFFSET};
    use crate::error::{DataError, PartitionError};

    pub(crate) fn mbr(entries: &[(u8, u32, u32)]) -> [u8; 512] {
        let mut sector = [0u8; 512];
        for (i, &(type_code, start, count)) in entries.iter().enumerate() {
            let offset = PARTITION_TABLE_OFFSET + i * 16;
            sector[offset] = if i == 0 { 0x80 } else { 0 };
            sector[offset + 4] = type_code;
            sector[offset + 8..offset + 12].copy_from_slice(&start.to_le_bytes());
            sector[offset + 12..offset + 16].copy_from_slice(&count.to_le_bytes());
        }
        sector[510..].copy_from_slice(&hex!("55 AA"));
        sector
    }

    #[test]
    fn test_partition_classification() {
        for code in [6u8, 14, 4] {
            let partition_type = PartitionType::from(code);
            assert!(partition_type.is_fat16());
            assert!(!partition_type.is_fat32());
            assert_eq!(partition_type.variant(), Ok(FATVariant::FAT16));
        }
        for code in [11u8, 12] {
            let partition_type = PartitionType::from(code);
            assert!(partition_type.is_fat32());
            assert!(!partition_type.is_fat16());
            assert_eq!(partition_type.variant(), Ok(FATVariant::FAT32));
        }
        for code in [0u8, 1, 5, 15, 0x83] {
            let partition_type = PartitionType::from(code);
            assert!(!partition_type.is_supported());
            let expected = Err(PartitionError::UnsupportedPartitionType(code));
            assert_eq!(partition_type.variant(), expected);
        }
    }

    #[test]
    fn test_partition_table() {
        let sector = mbr(&[(12, 2048, 65536), (0, 0, 0), (6, 67584, 4096)]);
        let table = PartitionTable::parse(&sector).unwrap();
        let first = table.get(0).unwrap();
        assert!(first.bootable);
        assert_eq!(first.partition_type, PartitionType::FAT32);
        assert_eq!(u32::from(first.start_sector), 2048);
        assert_eq!(first.sector_count, 65536);
        assert_eq!(table.get(1).unwrap_err(), DataError::EmptyPartition);
        assert_eq!(table.get(2).unwrap().partition_type, PartitionType::FAT16);
        assert_eq!(table.get(4).unwrap_err(), DataError::PartitionIndex(4));
        assert_eq!(table.iter().count(), 2);
    }

    #[test]
    fn test_missing_signature() {
        let mut sector = mbr(&[(12, 2048, 65536)]);
        sector[511] = 0;
        assert_eq!(PartitionTable::parse(&sector).unwrap_err(), DataError::MissingBootSignature);
    }
}
