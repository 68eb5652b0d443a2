use derive_more::{Display, From, Into};

#[derive(Copy, Clone, Debug, Default, Display, From, Into, Eq, Ord, PartialOrd, PartialEq, Hash)]
pub struct SectorID(u32);

impl SectorID {
    pub(crate) const MBR: Self = Self(0);

    /// `None` once the result leaves 32-bit sector addressing
    pub fn checked_add<I: Into<u32>>(self, count: I) -> Option<Self> {
        self.0.checked_add(count.into()).map(Self)
    }
}

#[derive(Copy, Clone, Debug, Default, Display, From, Into, Eq, Ord, PartialOrd, PartialEq, Hash)]
pub struct ClusterID(u32);

impl ClusterID {
    /// Cluster 0 and 1 are reserved, the data region starts with cluster 2
    pub const FIRST: Self = Self(2);

    pub fn valid(&self) -> bool {
        self.0 >= Self::FIRST.0
    }

    /// Zero based index into the data region, `None` for reserved cluster numbers
    pub(crate) fn offset(self) -> Option<u32> {
        self.0.checked_sub(Self::FIRST.0)
    }
}

#[cfg(test)]
mod test {
    use super::{ClusterID, SectorID};

    #[test]
    fn test_cluster_offset() {
        assert_eq!(ClusterID::from(0).offset(), None);
        assert_eq!(ClusterID::from(1).offset(), None);
        assert_eq!(ClusterID::from(2).offset(), Some(0));
        assert_eq!(ClusterID::from(9).offset(), Some(7));
        assert!(!ClusterID::from(1).valid());
        assert!(ClusterID::FIRST.valid());
    }

    #[test]
    fn test_sector_arithmetic() {
        let sector = SectorID::from(2048).checked_add(32u32).unwrap();
        assert_eq!(u32::from(sector), 2080);
        assert_eq!(sector.checked_add(8u8), Some(SectorID::from(2088)));
        assert_eq!(SectorID::from(0xFFFF_FFF0).checked_add(32u16), None);
    }
}
