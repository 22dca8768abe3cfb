//! WAD3 archive parsing.
//!
//! ## Architecture
//!
//! - [`structures`]: fixed-size format records (header, directory record, type tags)
//! - [`payload`]: per-type payload decoders and the decoded entry model
//! - [`reader`]: the archive reader tying the two together
//!
//! ## WAD3 Format Overview
//!
//! A WAD3 file consists of:
//! 1. A 12-byte header: `"WAD3"`, entry count, directory offset
//! 2. Payloads for each entry, anywhere in the file
//! 3. A directory table of 32-byte records pointing at those payloads
//!
//! All integers are little-endian.
//!
//! ## Supported Entry Types
//!
//! - `0x40` spray decals and `0x43` mip-mapped textures (same layout)
//! - `0x42` plain pictures
//! - `0x46` fonts
//!
//! ## Limitations
//!
//! - Read-only
//! - The per-record compression flag is decoded but never acted on
//! - No WAD2 support

mod payload;
mod reader;
mod structures;

pub use payload::{
    DECODERS, DecodedEntry, EntryKind, FONT_CHARINFO_SIZE, FONT_HEADER_SIZE, Fingerprint,
    MIPTEX_HEADER_SIZE, PALETTE_SIZE, PayloadDecoder, decode_font, decode_miptex, decode_qpic,
    decode_spray, decoder_for,
};
pub use reader::{LoadOptions, Wad3Archive, load, load_with};
pub use structures::*;
