use bitfield::bitfield;
use derive_more::Into;

bitfield! {
    #[derive(Copy, Clone, Default, Debug, Into, PartialEq, Eq)]
    pub struct FileAttributes(u8);
    pub read_only, set_read_only: 0, 0;
    pub hidden, set_hidden: 1, 1;
    pub system, set_system: 2, 2;
    pub volume_id, set_volume_id: 3, 3;
    pub directory, set_directory: 4, 4;
    pub archive, set_archive: 5, 5;
}

impl FileAttributes {
    pub const READ_ONLY: u8 = 0x01;
    pub const HIDDEN: u8 = 0x02;
    pub const SYSTEM: u8 = 0x04;
    pub const VOLUME_ID: u8 = 0x08;
    pub const DIRECTORY: u8 = 0x10;
    pub const ARCHIVE: u8 = 0x20;
    /// Exact attribute value marking a long filename fragment
    pub const LONG_NAME: u8 = Self::READ_ONLY | Self::HIDDEN | Self::SYSTEM | Self::VOLUME_ID;

    pub fn bits(&self) -> u8 {
        self.0
    }

    pub fn is_long_name(&self) -> bool {
        self.0 == Self::LONG_NAME
    }

    pub fn is_volume_label(&self) -> bool {
        self.0 == Self::VOLUME_ID
    }

    pub fn is_directory(&self) -> bool {
        self.directory() > 0
    }
}

impl From<u8> for FileAttributes {
    fn from(byte: u8) -> Self {
        Self(byte)
    }
}
