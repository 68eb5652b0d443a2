// Boot sector of a FAT partition

use crate::endian::Little;
use crate::region::mbr::FATVariant;

pub const BOOT_SIGNATURE: u16 = 0xAA55;

/// Fields shared by every FAT variant, offset 0 to 36
#[derive(Copy, Clone, Debug, Default)]
pub struct BiosParameterBlock {
    pub jump_boot: [u8; 3],
    pub oem_id: [u8; 8],
    pub bytes_per_sector: u16,
    pub sectors_per_cluster: u8,
    pub reserved_sector_count: u16,
    pub number_of_fats: u8,
    pub root_entry_count: u16, // 0 on FAT32
    pub total_sectors_16: u16,
    pub media_type: u8,
    pub sectors_per_fat_16: u16, // 0 on FAT32
    pub sectors_per_track: u16,
    pub number_of_heads: u16,
    pub hidden_sectors: u32,
    pub total_sectors_32: u32,
}

impl BiosParameterBlock {
    pub const SIZE: usize = 36;

    fn parse(bytes: &[u8]) -> Self {
        Self {
            jump_boot: bytes.array_at(0),
            oem_id: bytes.array_at(3),
            bytes_per_sector: bytes.u16_at(11),
            sectors_per_cluster: bytes.u8_at(13),
            reserved_sector_count: bytes.u16_at(14),
            number_of_fats: bytes.u8_at(16),
            root_entry_count: bytes.u16_at(17),
            total_sectors_16: bytes.u16_at(19),
            media_type: bytes.u8_at(21),
            sectors_per_fat_16: bytes.u16_at(22),
            sectors_per_track: bytes.u16_at(24),
            number_of_heads: bytes.u16_at(26),
            hidden_sectors: bytes.u32_at(28),
            total_sectors_32: bytes.u32_at(32),
        }
    }
}

/// Volume identification trailer, common to both extended blocks
#[derive(Copy, Clone, Debug, Default)]
pub struct VolumeID {
    pub drive_number: u8, // 0x00 floppy, 0x80 hard disk
    pub nt_flags: u8,
    pub signature: u8, // 0x28 or 0x29
    pub serial_number: u32,
    pub volume_label: [u8; 11],
    pub system_id: [u8; 8],
}

impl VolumeID {
    fn parse(bytes: &[u8], offset: usize) -> Self {
        Self {
            drive_number: bytes.u8_at(offset),
            nt_flags: bytes.u8_at(offset + 1),
            signature: bytes.u8_at(offset + 2),
            serial_number: bytes.u32_at(offset + 3),
            volume_label: bytes.array_at(offset + 7),
            system_id: bytes.array_at(offset + 18),
        }
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct Fat16Extension {
    pub volume_id: VolumeID,
}

#[derive(Copy, Clone, Debug, Default)]
pub struct Fat32Extension {
    pub sectors_per_fat: u32,
    pub flags: u16,
    pub version: u16, // major in high byte
    pub root_cluster: u32,
    pub fs_info_sector: u16,
    pub backup_boot_sector: u16,
    pub volume_id: VolumeID,
}

/// Extended BPB, selected by the already classified partition type
#[derive(Copy, Clone, Debug)]
pub enum Extension {
    Fat16(Fat16Extension),
    Fat32(Fat32Extension),
}

impl Extension {
    fn parse(bytes: &[u8], variant: FATVariant) -> Self {
        let offset = BiosParameterBlock::SIZE;
        match variant {
            FATVariant::FAT16 => {
                Self::Fat16(Fat16Extension { volume_id: VolumeID::parse(bytes, offset) })
            }
            FATVariant::FAT32 => Self::Fat32(Fat32Extension {
                sectors_per_fat: bytes.u32_at(offset),
                flags: bytes.u16_at(offset + 4),
                version: bytes.u16_at(offset + 6),
                root_cluster: bytes.u32_at(offset + 8),
                fs_info_sector: bytes.u16_at(offset + 12),
                backup_boot_sector: bytes.u16_at(offset + 14),
                volume_id: VolumeID::parse(bytes, offset + 28),
            }),
        }
    }

    pub fn volume_id(&self) -> &VolumeID {
        match self {
            Self::Fat16(extension) => &extension.volume_id,
            Self::Fat32(extension) => &extension.volume_id,
        }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct BootSector {
    pub bpb: BiosParameterBlock,
    pub extension: Extension,
    pub boot_signature: u16,
}

impl BootSector {
    pub const SIZE: usize = 512;

    /// Caller guarantees sector holds at least 512 bytes
    pub fn parse(sector: &[u8], variant: FATVariant) -> Self {
        Self {
            bpb: BiosParameterBlock::parse(sector),
            extension: Extension::parse(sector, variant),
            boot_signature: sector.u16_at(510),
        }
    }

    pub fn variant(&self) -> FATVariant {
        match self.extension {
            Extension::Fat16(_) => FATVariant::FAT16,
            Extension::Fat32(_) => FATVariant::FAT32,
        }
    }

    pub fn has_boot_signature(&self) -> bool {
        self.boot_signature == BOOT_SIGNATURE
    }

    pub fn total_sectors(&self) -> u32 {
        match self.bpb.total_sectors_16 {
            0 => self.bpb.total_sectors_32,
            sectors => sectors as u32,
        }
    }

    /// FAT32 keeps the table size in its extension, FAT16 in the legacy 16-bit field
    pub fn sectors_per_fat(&self) -> u32 {
        match self.extension {
            Extension::Fat32(extension) => extension.sectors_per_fat,
            Extension::Fat16(_) => self.bpb.sectors_per_fat_16 as u32,
        }
    }

    pub fn serial_number(&self) -> u32 {
        self.extension.volume_id().serial_number
    }

    pub fn volume_label(&self) -> heapless::String<22> {
        let label = &self.extension.volume_id().volume_label;
        let mut string = heapless::String::new();
        for &byte in label.iter() {
            string.push(byte as char).ok();
        }
        let length = string.trim_end_matches(' ').len();
        string.truncate(length);
        string
    }
}
