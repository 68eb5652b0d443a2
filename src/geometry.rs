use crate::error::{ClusterError, PartitionError};
use crate::region::boot::{BootSector, Extension};
use crate::region::data::ENTRY_SIZE;
use crate::region::mbr::{FATVariant, PartitionEntry};
use crate::types::{ClusterID, SectorID};

/// Where the root directory lives, FAT16 and FAT32 diverge here
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RootDirLocation {
    /// FAT16 fixed region right after the tables
    FixedRegion { sector: SectorID, entry_count: u16 },
    /// FAT32 root is an ordinary cluster chain
    ClusterChain { start_cluster: ClusterID },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VolumeGeometry {
    pub variant: FATVariant,
    pub bytes_per_sector: u16,
    pub sectors_per_cluster: u8,
    pub first_fat_sector: SectorID,
    pub sectors_per_fat: u32,
    pub fat_count: u8,
    pub first_data_sector: SectorID,
    pub root_dir_location: RootDirLocation,
}

/// First sector of `cluster`, counting from the start of the data region
pub fn cluster_to_sector(
    first_data_sector: u32,
    cluster: u32,
    sectors_per_cluster: u8,
) -> Result<u32, ClusterError> {
    let error = ClusterError::InvalidClusterNumber(cluster);
    let offset = ClusterID::from(cluster).offset().ok_or(error)?;
    let sectors = offset.checked_mul(sectors_per_cluster as u32).ok_or(error)?;
    first_data_sector.checked_add(sectors).ok_or(error)
}

impl VolumeGeometry {
    /// Resolve geometry from the partition's boot sector, a short sector reads as zero padded
    pub fn resolve(sector: &[u8], partition: &PartitionEntry) -> Result<Self, PartitionError> {
        let variant = partition.partition_type.variant()?;
        let mut padded = [0u8; BootSector::SIZE];
        let length = sector.len().min(BootSector::SIZE);
        padded[..length].copy_from_slice(&sector[..length]);
        let boot_sector = BootSector::parse(&padded, variant);
        Self::from_boot_sector(&boot_sector, partition.start_sector)
    }

    pub(crate) fn from_boot_sector(
        boot_sector: &BootSector,
        start: SectorID,
    ) -> Result<Self, PartitionError> {
        if !boot_sector.has_boot_signature() {
            warn!("Boot signature missing on partition at sector {}", start);
        }
        let bpb = &boot_sector.bpb;
        let sectors_per_fat = boot_sector.sectors_per_fat();
        let overflow = PartitionError::GeometryOverflow;
        let first_fat_sector = start.checked_add(bpb.reserved_sector_count).ok_or(overflow)?;
        let fat_sectors = (bpb.number_of_fats as u32).checked_mul(sectors_per_fat).ok_or(overflow)?;
        let first_data_sector = first_fat_sector.checked_add(fat_sectors).ok_or(overflow)?;
        let root_dir_location = match boot_sector.extension {
            Extension::Fat32(extension) => {
                RootDirLocation::ClusterChain { start_cluster: extension.root_cluster.into() }
            }
            Extension::Fat16(_) => RootDirLocation::FixedRegion {
                sector: first_data_sector,
                entry_count: bpb.root_entry_count,
            },
        };
        let geometry = Self {
            variant: boot_sector.variant(),
            bytes_per_sector: bpb.bytes_per_sector,
            sectors_per_cluster: bpb.sectors_per_cluster,
            first_fat_sector,
            sectors_per_fat,
            fat_count: bpb.number_of_fats,
            first_data_sector,
            root_dir_location,
        };
        // Cluster 2 must stay addressable
        first_data_sector.checked_add(geometry.root_dir_sectors()).ok_or(overflow)?;
        debug!("Volume geometry {:?}", geometry);
        Ok(geometry)
    }

    pub fn cluster_size(&self) -> usize {
        self.bytes_per_sector as usize * self.sectors_per_cluster as usize
    }

    /// Sectors occupied by the FAT16 fixed root region, zero on FAT32
    pub fn root_dir_sectors(&self) -> u32 {
        match self.root_dir_location {
            RootDirLocation::FixedRegion { entry_count, .. } => {
                let bytes = entry_count as u32 * ENTRY_SIZE as u32;
                let sector_size = (self.bytes_per_sector as u32).max(1);
                (bytes + sector_size - 1) / sector_size
            }
            RootDirLocation::ClusterChain { .. } => 0,
        }
    }

    /// Sector holding cluster 2, saturated for hand-built geometry beyond 32-bit addressing
    pub fn cluster_heap_offset(&self) -> SectorID {
        let offset = u32::from(self.first_data_sector).saturating_add(self.root_dir_sectors());
        offset.into()
    }

    pub fn cluster_sector(&self, cluster: ClusterID) -> Result<SectorID, ClusterError> {
        let first = self.cluster_heap_offset().into();
        let sector = cluster_to_sector(first, cluster.into(), self.sectors_per_cluster)?;
        Ok(sector.into())
    }

    /// First sector of the root directory
    pub fn root_dir_sector(&self) -> Result<SectorID, ClusterError> {
        match self.root_dir_location {
            RootDirLocation::FixedRegion { sector, .. } => Ok(sector),
            RootDirLocation::ClusterChain { start_cluster } => self.cluster_sector(start_cluster),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{cluster_to_sector, RootDirLocation, VolumeGeometry};
    use crate::error::{ClusterError, PartitionError};
    use crate::region::boot::test::{boot_sector, Layout};
    use crate::region::mbr::{FATVariant, PartitionEntry, PartitionType};
    use crate::types::{ClusterID, SectorID};

    fn partition(type_code: u8, start: u32) -> PartitionEntry {
        PartitionEntry {
            bootable: true,
            partition_type: PartitionType::from(type_code),
            start_sector: start.into(),
            sector_count: 131072,
        }
    }

    #[test]
    fn test_cluster_to_sector() {
        assert_eq!(cluster_to_sector(100, 2, 8), Ok(100));
        assert_eq!(cluster_to_sector(100, 3, 8), Ok(108));
        assert_eq!(cluster_to_sector(100, 1, 8), Err(ClusterError::InvalidClusterNumber(1)));
        assert_eq!(cluster_to_sector(100, 0, 8), Err(ClusterError::InvalidClusterNumber(0)));
        let error = Err(ClusterError::InvalidClusterNumber(u32::MAX));
        assert_eq!(cluster_to_sector(100, u32::MAX, 64), error);
    }

    #[test]
    fn test_fat32_geometry() {
        let layout = Layout { root_cluster: 5, ..Default::default() };
        let sector = boot_sector(FATVariant::FAT32, &layout);
        let geometry = VolumeGeometry::resolve(&sector, &partition(12, 2048)).unwrap();
        assert_eq!(geometry.variant, FATVariant::FAT32);
        assert_eq!(geometry.first_fat_sector, SectorID::from(2048 + 32));
        assert_eq!(geometry.sectors_per_fat, 1009);
        assert_eq!(geometry.first_data_sector, SectorID::from(2080 + 2 * 1009));
        let start_cluster = ClusterID::from(5);
        assert_eq!(geometry.root_dir_location, RootDirLocation::ClusterChain { start_cluster });
        assert_eq!(geometry.root_dir_sectors(), 0);
        assert_eq!(geometry.root_dir_sector(), Ok(SectorID::from(4098 + 3 * 8)));
        assert_eq!(geometry.cluster_size(), 4096);
    }

    #[test]
    fn test_fat16_geometry() {
        let layout = Layout {
            sectors_per_cluster: 4,
            reserved_sectors: 4,
            root_entry_count: 512,
            sectors_per_fat: 200,
            ..Default::default()
        };
        let sector = boot_sector(FATVariant::FAT16, &layout);
        let geometry = VolumeGeometry::resolve(&sector, &partition(6, 63)).unwrap();
        assert_eq!(geometry.variant, FATVariant::FAT16);
        assert_eq!(geometry.first_fat_sector, SectorID::from(67));
        assert_eq!(geometry.first_data_sector, SectorID::from(467));
        let expected = RootDirLocation::FixedRegion { sector: 467.into(), entry_count: 512 };
        assert_eq!(geometry.root_dir_location, expected);
        // No cluster arithmetic applied to the fixed root region
        assert_eq!(geometry.root_dir_sector(), Ok(SectorID::from(467)));
        assert_eq!(geometry.root_dir_sectors(), 32);
        assert_eq!(geometry.cluster_heap_offset(), SectorID::from(499));
        assert_eq!(geometry.cluster_sector(3.into()), Ok(SectorID::from(503)));
    }

    #[test]
    fn test_short_sector() {
        let layout = Layout { root_entry_count: 512, sectors_per_fat: 200, ..Default::default() };
        let sector = boot_sector(FATVariant::FAT16, &layout);
        let geometry = VolumeGeometry::resolve(&sector[..64], &partition(6, 0)).unwrap();
        assert_eq!(geometry.first_data_sector, SectorID::from(32 + 400));
    }

    #[test]
    fn test_geometry_overflow() {
        let layout = Layout { sectors_per_fat: 0x9000_0000, ..Default::default() };
        let sector = boot_sector(FATVariant::FAT32, &layout);
        let result = VolumeGeometry::resolve(&sector, &partition(12, 2048));
        assert_eq!(result, Err(PartitionError::GeometryOverflow));

        let sector = boot_sector(FATVariant::FAT32, &Layout::default());
        let result = VolumeGeometry::resolve(&sector, &partition(12, 0xFFFF_FFF0));
        assert_eq!(result, Err(PartitionError::GeometryOverflow));

        // Tables fit, fixed root region does not
        let layout = Layout { root_entry_count: 512, sectors_per_fat: 0x7FFF, ..Default::default() };
        let sector = boot_sector(FATVariant::FAT16, &layout);
        let start = u32::MAX - 32 - 2 * 0x7FFF - 16;
        let result = VolumeGeometry::resolve(&sector, &partition(6, start));
        assert_eq!(result, Err(PartitionError::GeometryOverflow));
    }

    #[test]
    fn test_unsupported_partition_type() {
        let sector = boot_sector(FATVariant::FAT32, &Layout::default());
        for code in [0u8, 1, 5, 15] {
            let result = VolumeGeometry::resolve(&sector, &partition(code, 2048));
            assert_eq!(result, Err(PartitionError::UnsupportedPartitionType(code)));
        }
    }
}
