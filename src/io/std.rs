use std::io::SeekFrom;
use std::path::Path;
use std::vec::Vec;
#[cfg(not(feature = "async"))]
use std::{fs, io::prelude::*};

#[cfg(all(feature = "async", feature = "smol"))]
use smol::fs;
#[cfg(all(feature = "async", feature = "smol"))]
use smol::io::{AsyncReadExt, AsyncSeekExt};
#[cfg(all(feature = "async", feature = "tokio"))]
use tokio::fs;
#[cfg(all(feature = "async", feature = "tokio"))]
use tokio::io::{AsyncReadExt, AsyncSeekExt};

#[cfg(feature = "async")]
use async_trait::async_trait;

use super::DEFAULT_SECTOR_SIZE;
use crate::types::SectorID;

/// Disk image or block device opened read-only
#[derive(Debug)]
pub struct FileIO {
    file: fs::File,
    sector_size: u16,
}

#[cfg_attr(not(feature = "async"), deasync::deasync)]
impl FileIO {
    pub async fn open<P: AsRef<Path>>(filepath: P) -> std::io::Result<Self> {
        let file = fs::File::open(filepath.as_ref()).await?;
        Ok(Self { file, sector_size: DEFAULT_SECTOR_SIZE })
    }
}

#[cfg_attr(feature = "async", async_trait)]
#[cfg_attr(not(feature = "async"), deasync::deasync)]
impl super::IO for FileIO {
    type Sectors = Vec<u8>;
    type Error = std::io::Error;

    fn set_sector_size(&mut self, size: u16) -> Result<(), Self::Error> {
        self.sector_size = size;
        Ok(())
    }

    async fn read_sectors(&mut self, start: SectorID, count: usize) -> Result<Vec<u8>, Self::Error> {
        let sector_size = self.sector_size as usize;
        let seek = SeekFrom::Start(u32::from(start) as u64 * sector_size as u64);
        self.file.seek(seek).await?;
        let mut buffer = vec![0u8; count * sector_size];
        self.file.read_exact(&mut buffer).await?;
        Ok(buffer)
    }
}
