use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Cursor;
use std::ops::Range;

use crate::error::{Result, WadError};

/// WAD3 directory type tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    Spray,
    Qpic,
    Miptex,
    Font,
}

impl EntryType {
    pub fn from_i8(value: i8) -> Option<Self> {
        match value {
            0x40 => Some(EntryType::Spray),
            0x42 => Some(EntryType::Qpic),
            0x43 => Some(EntryType::Miptex),
            0x46 => Some(EntryType::Font),
            _ => None,
        }
    }

    pub fn as_i8(&self) -> i8 {
        match self {
            EntryType::Spray => 0x40,
            EntryType::Qpic => 0x42,
            EntryType::Miptex => 0x43,
            EntryType::Font => 0x46,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntryType::Spray => "spray",
            EntryType::Qpic => "qpic",
            EntryType::Miptex => "miptex",
            EntryType::Font => "font",
        }
    }
}

/// Archive header - 12 bytes at offset 0
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveHeader {
    pub magic: [u8; 4],
    pub num_entries: i32,
    pub dir_offset: i32,
}

impl ArchiveHeader {
    pub const SIGNATURE: &'static [u8] = b"WAD3";
    pub const SIZE: usize = 12;

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        // The magic is checked before anything else is read
        if !data.starts_with(Self::SIGNATURE) {
            return Err(WadError::format("not a valid WAD3 file"));
        }
        if data.len() < Self::SIZE {
            return Err(WadError::format(format!(
                "truncated header: {} of {} bytes",
                data.len(),
                Self::SIZE
            )));
        }

        let mut cursor = Cursor::new(&data[4..Self::SIZE]);

        let mut magic = [0u8; 4];
        magic.copy_from_slice(&data[..4]);

        Ok(Self {
            magic,
            num_entries: cursor.read_i32::<LittleEndian>()?,
            dir_offset: cursor.read_i32::<LittleEndian>()?,
        })
    }

    /// Byte range of the directory table within an archive of `archive_len` bytes.
    pub fn directory_range(&self, archive_len: usize) -> Result<Range<usize>> {
        let count = usize::try_from(self.num_entries).map_err(|_| {
            WadError::format(format!("negative directory entry count {}", self.num_entries))
        })?;
        let start = usize::try_from(self.dir_offset).map_err(|_| {
            WadError::format(format!("negative directory offset {}", self.dir_offset))
        })?;
        let end = count
            .checked_mul(DirectoryRecord::SIZE)
            .and_then(|len| start.checked_add(len))
            .filter(|&end| end <= archive_len)
            .ok_or_else(|| {
                WadError::format(format!(
                    "directory of {count} entries at offset {start} exceeds archive of {archive_len} bytes"
                ))
            })?;
        Ok(start..end)
    }
}

/// Directory record - exactly 32 bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryRecord {
    pub file_pos: i32,
    pub disk_size: i32,
    /// Uncompressed size. Stored for completeness, decoding never uses it.
    pub size: i32,
    /// Raw type tag, see [`EntryType::from_i8`]
    pub type_tag: i8,
    pub compression: bool,
    pub name: String,
}

impl DirectoryRecord {
    pub const SIZE: usize = 32;
    pub const NAME_SIZE: usize = 16;

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < Self::SIZE {
            return Err(WadError::format(format!(
                "truncated directory record: {} of {} bytes",
                data.len(),
                Self::SIZE
            )));
        }

        let mut cursor = Cursor::new(&data[..Self::SIZE]);

        let file_pos = cursor.read_i32::<LittleEndian>()?;
        let disk_size = cursor.read_i32::<LittleEndian>()?;
        let size = cursor.read_i32::<LittleEndian>()?;
        let type_tag = cursor.read_i8()?;
        let compression = cursor.read_u8()? != 0;
        let _padding = cursor.read_u16::<LittleEndian>()?;

        Ok(Self {
            file_pos,
            disk_size,
            size,
            type_tag,
            compression,
            name: read_name(&data[16..16 + Self::NAME_SIZE]),
        })
    }

    pub fn entry_type(&self) -> Option<EntryType> {
        EntryType::from_i8(self.type_tag)
    }

    /// Byte range of this record's payload within an archive of `archive_len` bytes.
    pub fn payload_range(&self, archive_len: usize) -> Result<Range<usize>> {
        let start = usize::try_from(self.file_pos).map_err(|_| {
            WadError::format(format!("{}: negative file position {}", self.name, self.file_pos))
        })?;
        let len = usize::try_from(self.disk_size).map_err(|_| {
            WadError::format(format!("{}: negative disk size {}", self.name, self.disk_size))
        })?;
        let end = start
            .checked_add(len)
            .filter(|&end| end <= archive_len)
            .ok_or_else(|| {
                WadError::format(format!(
                    "{}: payload of {len} bytes at offset {start} exceeds archive of {archive_len} bytes",
                    self.name
                ))
            })?;
        Ok(start..end)
    }
}

/// Decode a fixed-size, null-terminated name field.
///
/// Each byte maps to the character with the same code point; decoding stops
/// at the first zero byte or the end of the field.
pub fn read_name(field: &[u8]) -> String {
    field
        .iter()
        .take_while(|&&b| b != 0)
        .map(|&b| char::from(b))
        .collect()
}
