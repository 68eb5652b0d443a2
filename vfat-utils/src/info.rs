use std::io;

use derive_more::Display;
use vfat::error::Error;
use vfat::io::std::FileIO;
use vfat::{Extension, RootDirLocation, Volume};

#[derive(Display)]
#[display("{:04X}-{:04X}", _0 >> 16, _0 & 0xFFFF)]
struct Serial(u32);

pub fn info(io: FileIO, partition: usize) -> Result<(), Error<io::Error>> {
    let volume = Volume::open_partition(io, partition)?;
    let boot_sector = volume.boot_sector();
    let geometry = volume.geometry();
    println!("Variant:             {}", geometry.variant);
    println!("OEM:                 {}", String::from_utf8_lossy(&boot_sector.bpb.oem_id).trim_end());
    println!("Label:               {}", volume.volume_label());
    println!("Serial number:       {}", Serial(volume.serial_number()));
    println!("Total sectors:       {}", boot_sector.total_sectors());
    println!("Bytes per sector:    {}", geometry.bytes_per_sector);
    println!("Sectors per cluster: {}", geometry.sectors_per_cluster);
    println!("Cluster size:        {}", geometry.cluster_size());
    println!("FAT count:           {}", geometry.fat_count);
    println!("Sectors per FAT:     {}", geometry.sectors_per_fat);
    println!("First FAT sector:    {}", geometry.first_fat_sector);
    println!("First data sector:   {}", geometry.first_data_sector);
    println!("Cluster heap offset: {}", geometry.cluster_heap_offset());
    match geometry.root_dir_location {
        RootDirLocation::FixedRegion { sector, entry_count } => {
            println!("Root directory:      sector {} with {} entries", sector, entry_count)
        }
        RootDirLocation::ClusterChain { start_cluster } => {
            println!("Root directory:      cluster {}", start_cluster)
        }
    }
    if let Extension::Fat32(extension) = &boot_sector.extension {
        println!("FS info sector:      {}", extension.fs_info_sector);
        println!("Backup boot sector:  {}", extension.backup_boot_sector);
    }
    Ok(())
}
