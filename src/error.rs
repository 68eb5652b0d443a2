use core::fmt::{Debug, Display, Formatter, Result};

use displaydoc::Display;
use thiserror::Error;

#[derive(Copy, Clone, Debug, Display, Error, PartialEq, Eq)]
pub enum PartitionError {
    /// Unsupported partition type 0x{0:02X}
    UnsupportedPartitionType(u8),
    /// Partition layout exceeds 32-bit sector addressing
    GeometryOverflow,
}

#[derive(Copy, Clone, Debug, Display, Error, PartialEq, Eq)]
pub enum ClusterError {
    /// Invalid cluster number {0}, data region starts with cluster 2
    InvalidClusterNumber(u32),
}

#[derive(Copy, Clone, Debug, Display, Error, PartialEq, Eq)]
pub enum LfnError {
    /// LFN checksum 0x{found:02X} does not match short entry checksum 0x{expected:02X}
    ChecksumMismatch { expected: u8, found: u8 },
    /// Code unit 0x{0:04X} is not representable
    UnsupportedEncoding(u16),
    /// LFN chain is not terminated by a last fragment
    MalformedChain,
    /// Slot {0} is not a short file or directory entry
    NotShortEntry(usize),
}

#[derive(Copy, Clone, Debug, Display, Error, PartialEq, Eq)]
pub enum DataError {
    /// Boot signature 0xAA55 missing
    MissingBootSignature,
    /// Partition index {0} out of range
    PartitionIndex(usize),
    /// Partition has no sectors
    EmptyPartition,
    /// Sector size {0} not supported
    SectorSize(usize),
}

#[derive(Debug)]
pub enum Error<E> {
    /// Sector read failure reported by the host
    IO(E),
    Partition(PartitionError),
    Cluster(ClusterError),
    Lfn(LfnError),
    Data(DataError),
}

impl<E: Debug> Display for Error<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::IO(e) => write!(f, "Sector read failure: {:?}", e),
            Self::Partition(e) => write!(f, "{}", e),
            Self::Cluster(e) => write!(f, "{}", e),
            Self::Lfn(e) => write!(f, "{}", e),
            Self::Data(e) => write!(f, "{}", e),
        }
    }
}

impl<E: Debug> core::error::Error for Error<E> {}

macro_rules! from {
    ($type:ident, $variant:ident) => {
        impl<E> From<$type> for Error<E> {
            fn from(e: $type) -> Self {
                Self::$variant(e)
            }
        }
    };
}

from!(PartitionError, Partition);
from!(ClusterError, Cluster);
from!(LfnError, Lfn);
from!(DataError, Data);
