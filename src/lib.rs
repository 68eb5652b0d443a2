#![doc = include_str!("../README.md")]
#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(all(feature = "async", feature = "std", not(any(feature = "smol", feature = "tokio"))))]
compile_error!("Either smol or tokio must be selected");

extern crate alloc;

#[macro_use]
extern crate hex_literal;
extern crate heapless;
#[macro_use]
extern crate log;

pub mod directory;
mod endian;
pub mod error;
mod geometry;
pub mod io;
mod region;
pub mod types;

use core::fmt::Debug;

pub use directory::{long_name_length, reconstruct, Directory, DirectorySlot, Entry};
pub use directory::{ReconstructedName, SlotIter};
use error::{DataError, Error};
pub use geometry::{cluster_to_sector, RootDirLocation, VolumeGeometry};
use io::IOWrapper;
pub use region::boot::{BiosParameterBlock, BootSector, Extension, Fat16Extension, Fat32Extension};
pub use region::boot::VolumeID;
pub use region::data::attributes::FileAttributes;
pub use region::data::checksum::checksum;
pub use region::data::datetime::{Date, DateTime, Time};
pub use region::data::entry::{LfnFragment, ShortEntry, ShortName};
pub use region::mbr::{FATVariant, PartitionEntry, PartitionTable, PartitionType};
use types::{ClusterID, SectorID};

const MIN_SECTOR_SIZE: u16 = 512;
const MAX_SECTOR_SIZE: u16 = 4096;

/// One FAT16 or FAT32 partition, geometry resolved
pub struct Volume<IO> {
    io: IOWrapper<IO>,
    partition: PartitionEntry,
    boot_sector: BootSector,
    geometry: VolumeGeometry,
}

#[cfg_attr(not(feature = "async"), deasync::deasync)]
impl<E: Debug, IO: io::IO<Error = E>> Volume<IO> {
    /// Read the partition table from the first sector of the disk
    pub async fn partition_table(io: &mut IO) -> Result<PartitionTable, Error<E>> {
        let sector = io.read_sectors(SectorID::MBR, 1).await.map_err(Error::IO)?;
        Ok(PartitionTable::parse(&sector)?)
    }

    /// Open the partition at `index` of the MBR partition table
    pub async fn open_partition(mut io: IO, index: usize) -> Result<Self, Error<E>> {
        let table = Self::partition_table(&mut io).await?;
        let partition = *table.get(index)?;
        debug!("Partition {} {:?}", index, partition);
        Self::open(io, &partition).await
    }

    pub async fn open(io: IO, partition: &PartitionEntry) -> Result<Self, Error<E>> {
        let variant = partition.partition_type.variant()?;
        let mut io = IOWrapper::new(io);
        let sector = io.read_sectors(partition.start_sector, 1).await?;
        if sector.len() < BootSector::SIZE {
            return Err(DataError::SectorSize(sector.len()).into());
        }
        let boot_sector = BootSector::parse(&sector, variant);
        let geometry = VolumeGeometry::from_boot_sector(&boot_sector, partition.start_sector)?;
        let sector_size = geometry.bytes_per_sector;
        let valid = (MIN_SECTOR_SIZE..=MAX_SECTOR_SIZE).contains(&sector_size);
        if !valid || !sector_size.is_power_of_two() {
            return Err(DataError::SectorSize(sector_size as usize).into());
        }
        io.set_sector_size(sector_size)?;
        Ok(Self { io, partition: *partition, boot_sector, geometry })
    }

    async fn read_region(&mut self, start: SectorID, count: usize) -> Result<Directory, Error<E>> {
        let sectors = self.io.read_sectors(start, count).await?;
        Ok(Directory::parse(&sectors))
    }

    /// Root directory, one cluster on FAT32 or the whole fixed region on FAT16
    pub async fn read_root_directory(&mut self) -> Result<Directory, Error<E>> {
        let geometry = self.geometry;
        let (start, count) = match geometry.root_dir_location {
            RootDirLocation::FixedRegion { sector, .. } => (sector, geometry.root_dir_sectors()),
            RootDirLocation::ClusterChain { start_cluster } => {
                (geometry.cluster_sector(start_cluster)?, geometry.sectors_per_cluster as u32)
            }
        };
        debug!("Root directory on sector {} count {}", start, count);
        self.read_region(start, count as usize).await
    }

    /// First cluster of a directory, cluster 0 refers to the root directory
    pub async fn read_directory(&mut self, cluster: ClusterID) -> Result<Directory, Error<E>> {
        if u32::from(cluster) == 0 {
            return self.read_root_directory().await;
        }
        let start = self.geometry.cluster_sector(cluster)?;
        debug!("Directory on cluster {} sector {}", cluster, start);
        let count = self.geometry.sectors_per_cluster as usize;
        self.read_region(start, count).await
    }
}

impl<IO> Volume<IO> {
    pub fn geometry(&self) -> &VolumeGeometry {
        &self.geometry
    }

    pub fn boot_sector(&self) -> &BootSector {
        &self.boot_sector
    }

    pub fn partition(&self) -> &PartitionEntry {
        &self.partition
    }

    pub fn volume_label(&self) -> heapless::String<22> {
        self.boot_sector.volume_label()
    }

    pub fn serial_number(&self) -> u32 {
        self.boot_sector.serial_number()
    }

    pub fn free(self) -> IO {
        self.io.unwrap()
    }
}
