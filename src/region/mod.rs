/// Master boot record, partition table of the whole disk
pub(crate) mod mbr;

/// Boot region, BIOS parameter block and the FAT16/FAT32 extended block
pub(crate) mod boot;

/// Data region, 32 bytes directory slots
pub(crate) mod data;
