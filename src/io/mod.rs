#[cfg(feature = "std")]
pub mod std;

#[cfg(all(feature = "async", not(feature = "std")))]
use alloc::boxed::Box;
use core::fmt::Debug;
use core::ops::Deref;

#[cfg(feature = "async")]
use async_trait::async_trait;

use crate::error::Error;
use crate::types::SectorID;

pub const DEFAULT_SECTOR_SIZE: u16 = 512;

/// Block read primitive supplied by the host
#[cfg_attr(feature = "async", async_trait)]
#[cfg_attr(not(feature = "async"), deasync::deasync)]
pub trait IO {
    type Sectors: Deref<Target = [u8]>;
    type Error: Debug;

    /// Default to 512, changed once the boot sector tells otherwise
    fn set_sector_size(&mut self, size: u16) -> Result<(), Self::Error>;
    /// Read `count` whole sectors starting from `start`
    async fn read_sectors(&mut self, start: SectorID, count: usize) -> Result<Self::Sectors, Self::Error>;
}

pub(crate) struct IOWrapper<IO>(IO);

#[cfg_attr(not(feature = "async"), deasync::deasync)]
impl<E, S: Deref<Target = [u8]>, T: IO<Sectors = S, Error = E>> IOWrapper<T> {
    pub fn new(io: T) -> Self {
        Self(io)
    }

    pub fn set_sector_size(&mut self, size: u16) -> Result<(), Error<E>> {
        self.0.set_sector_size(size).map_err(|e| Error::IO(e))
    }

    pub async fn read_sectors(&mut self, start: SectorID, count: usize) -> Result<S, Error<E>> {
        trace!("Read {} sectors from {}", count, start);
        self.0.read_sectors(start, count).await.map_err(|e| Error::IO(e))
    }
}

impl<T> IOWrapper<T> {
    pub fn unwrap(self) -> T {
        self.0
    }
}
