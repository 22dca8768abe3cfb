//! Type-specific payload layouts.
//!
//! Every decoder takes the directory record and the payload bytes sliced
//! out for it, and produces a [`DecodedEntry`]. Offsets derived from the
//! payload itself (dimensions, mip offsets, color counts) are checked
//! against the payload length before any slicing happens.

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt};
use std::fmt;
use std::io::Cursor;

use crate::error::{Result, WadError};

use super::structures::{DirectoryRecord, EntryType, read_name};

/// Size of a full 256-color RGB palette.
pub const PALETTE_SIZE: usize = 768;

/// Miptex header: 16-byte name, width, height, four mip offsets.
pub const MIPTEX_HEADER_SIZE: usize = 40;

/// Font header: width, height, row count, row height.
pub const FONT_HEADER_SIZE: usize = 16;

/// Per-character offset/width table following the font header.
pub const FONT_CHARINFO_SIZE: usize = 1024;

const QPIC_HEADER_SIZE: usize = 8;

/// The miptex palette sits this many bytes before the end of the payload.
const MIPTEX_PALETTE_TRAILER: usize = 2;

/// Content digest used to detect changed entries.
///
/// MD5 over the decoded content bytes followed by the palette. Only ever
/// compared for equality.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 16]);

impl Fingerprint {
    pub fn of(data: &[u8], palette: &[u8]) -> Self {
        let mut buf = Vec::with_capacity(data.len() + palette.len());
        buf.extend_from_slice(data);
        buf.extend_from_slice(palette);
        Fingerprint(md5::compute(&buf).0)
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({self})")
    }
}

/// Variant-specific fields of a decoded entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    Miptex {
        mip_offsets: [u32; 4],
    },
    /// Same layout as miptex, kept apart for display
    Spray {
        mip_offsets: [u32; 4],
    },
    Qpic {
        colors_used: i16,
    },
    Font {
        row_count: u32,
        row_height: u32,
        colors_used: i16,
    },
}

/// A fully decoded archive entry
#[derive(Debug, Clone)]
pub struct DecodedEntry {
    pub name: String,
    pub kind: EntryKind,
    /// Size of the stored payload, copied from the directory record
    pub disk_size: i32,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub palette: Vec<u8>,
    pub fingerprint: Fingerprint,
}

impl DecodedEntry {
    fn new(
        name: String,
        kind: EntryKind,
        disk_size: i32,
        (width, height): (u32, u32),
        data: &[u8],
        palette: &[u8],
    ) -> Self {
        Self {
            name,
            kind,
            disk_size,
            width,
            height,
            fingerprint: Fingerprint::of(data, palette),
            data: data.to_vec(),
            palette: palette.to_vec(),
        }
    }

    pub fn entry_type(&self) -> EntryType {
        match self.kind {
            EntryKind::Miptex { .. } => EntryType::Miptex,
            EntryKind::Spray { .. } => EntryType::Spray,
            EntryKind::Qpic { .. } => EntryType::Qpic,
            EntryKind::Font { .. } => EntryType::Font,
        }
    }
}

/// Signature shared by all payload decoders.
pub type PayloadDecoder = fn(&DirectoryRecord, &[u8]) -> Result<DecodedEntry>;

/// Decoder for each known type tag.
pub const DECODERS: &[(EntryType, PayloadDecoder)] = &[
    (EntryType::Qpic, decode_qpic),
    (EntryType::Miptex, decode_miptex),
    (EntryType::Spray, decode_spray),
    (EntryType::Font, decode_font),
];

/// Look up the decoder for a raw directory type tag.
pub fn decoder_for(type_tag: i8) -> Option<PayloadDecoder> {
    DECODERS
        .iter()
        .find(|(ty, _)| ty.as_i8() == type_tag)
        .map(|&(_, decoder)| decoder)
}

/// Decode a mip-mapped texture. The name comes from the payload, not the directory.
pub fn decode_miptex(record: &DirectoryRecord, payload: &[u8]) -> Result<DecodedEntry> {
    if payload.len() < MIPTEX_HEADER_SIZE {
        return Err(truncated(&record.name, "miptex header", payload.len()));
    }

    let name = read_name(&payload[..16]);
    let mut cursor = Cursor::new(&payload[16..MIPTEX_HEADER_SIZE]);
    let width = cursor.read_u32::<LittleEndian>()?;
    let height = cursor.read_u32::<LittleEndian>()?;
    let mut mip_offsets = [0u32; 4];
    cursor.read_u32_into::<LittleEndian>(&mut mip_offsets)?;

    // Content runs from the end of the header up to the second mip level
    let data_end = mip_offsets[1] as usize;
    if data_end < MIPTEX_HEADER_SIZE || data_end > payload.len() {
        return Err(WadError::format(format!(
            "{name}: mip offset {data_end} outside payload of {} bytes",
            payload.len()
        )));
    }
    let data = &payload[MIPTEX_HEADER_SIZE..data_end];

    if payload.len() < PALETTE_SIZE + MIPTEX_PALETTE_TRAILER {
        return Err(truncated(&name, "miptex palette", payload.len()));
    }
    let palette_end = payload.len() - MIPTEX_PALETTE_TRAILER;
    let palette = &payload[palette_end - PALETTE_SIZE..palette_end];

    Ok(DecodedEntry::new(
        name,
        EntryKind::Miptex { mip_offsets },
        record.disk_size,
        (width, height),
        data,
        palette,
    ))
}

/// Decode a spray decal. Identical to miptex apart from the tag.
pub fn decode_spray(record: &DirectoryRecord, payload: &[u8]) -> Result<DecodedEntry> {
    let mut entry = decode_miptex(record, payload)?;
    if let EntryKind::Miptex { mip_offsets } = entry.kind {
        entry.kind = EntryKind::Spray { mip_offsets };
    }
    Ok(entry)
}

/// Decode a plain picture: width, height, pixels, then a counted palette.
pub fn decode_qpic(record: &DirectoryRecord, payload: &[u8]) -> Result<DecodedEntry> {
    let name = &record.name;
    if payload.len() < QPIC_HEADER_SIZE {
        return Err(truncated(name, "qpic header", payload.len()));
    }

    let mut cursor = Cursor::new(payload);
    let width = cursor.read_u32::<LittleEndian>()?;
    let height = cursor.read_u32::<LittleEndian>()?;

    let data = region(payload, QPIC_HEADER_SIZE, pixel_count(name, width, height)?, name, "pixels")?;
    let (colors_used, palette) =
        counted_palette(payload, QPIC_HEADER_SIZE + data.len(), name)?;

    Ok(DecodedEntry::new(
        name.clone(),
        EntryKind::Qpic { colors_used },
        record.disk_size,
        (width, height),
        data,
        palette,
    ))
}

/// Decode a font: header, character table, glyph bitmap, then a counted palette.
pub fn decode_font(record: &DirectoryRecord, payload: &[u8]) -> Result<DecodedEntry> {
    let name = &record.name;
    if payload.len() < FONT_HEADER_SIZE {
        return Err(truncated(name, "font header", payload.len()));
    }

    let mut cursor = Cursor::new(payload);
    let width = cursor.read_u32::<LittleEndian>()?;
    let height = cursor.read_u32::<LittleEndian>()?;
    let row_count = cursor.read_u32::<LittleEndian>()?;
    let row_height = cursor.read_u32::<LittleEndian>()?;

    let data_offset = FONT_HEADER_SIZE + FONT_CHARINFO_SIZE;
    let data = region(payload, data_offset, pixel_count(name, width, height)?, name, "glyphs")?;
    let (colors_used, palette) = counted_palette(payload, data_offset + data.len(), name)?;

    Ok(DecodedEntry::new(
        name.clone(),
        EntryKind::Font {
            row_count,
            row_height,
            colors_used,
        },
        record.disk_size,
        (width, height),
        data,
        palette,
    ))
}

/// Read a signed 16-bit color count at `offset` and the `count * 3` bytes after it.
fn counted_palette<'a>(payload: &'a [u8], offset: usize, name: &str) -> Result<(i16, &'a [u8])> {
    let colors_used = LittleEndian::read_i16(region(payload, offset, 2, name, "color count")?);
    let len = usize::try_from(colors_used)
        .map_err(|_| WadError::format(format!("{name}: negative color count {colors_used}")))?
        * 3;
    let palette = region(payload, offset + 2, len, name, "palette")?;
    Ok((colors_used, palette))
}

fn pixel_count(name: &str, width: u32, height: u32) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| WadError::format(format!("{name}: dimensions {width}x{height} overflow")))
}

fn region<'a>(payload: &'a [u8], start: usize, len: usize, name: &str, what: &str) -> Result<&'a [u8]> {
    start
        .checked_add(len)
        .filter(|&end| end <= payload.len())
        .map(|end| &payload[start..end])
        .ok_or_else(|| {
            WadError::format(format!(
                "{name}: {what} ({len} bytes at offset {start}) exceeds payload of {} bytes",
                payload.len()
            ))
        })
}

fn truncated(name: &str, what: &str, len: usize) -> WadError {
    WadError::format(format!("{name}: payload of {len} bytes too short for {what}"))
}
