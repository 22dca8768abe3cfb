#![allow(dead_code)]

use byteorder::{LittleEndian, WriteBytesExt};

pub const SPRAY: i8 = 0x40;
pub const QPIC: i8 = 0x42;
pub const MIPTEX: i8 = 0x43;
pub const FONT: i8 = 0x46;

/// Deterministic filler so different seeds give different content.
pub fn pattern(len: usize, seed: u8) -> Vec<u8> {
    (0..len)
        .map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed))
        .collect()
}

fn name_field(name: &str) -> [u8; 16] {
    let mut field = [0u8; 16];
    let bytes = name.as_bytes();
    field[..bytes.len()].copy_from_slice(bytes);
    field
}

/// Miptex payload with all four mip levels, a 256-color palette and trailing padding.
pub fn miptex_payload(name: &str, width: u32, height: u32, pixels: &[u8], palette: &[u8]) -> Vec<u8> {
    assert_eq!(pixels.len(), (width * height) as usize);
    assert_eq!(palette.len(), 768);

    let area = width * height;
    let offsets = [40, 40 + area, 40 + area + area / 4, 40 + area + area / 4 + area / 16];

    let mut out = Vec::new();
    out.extend_from_slice(&name_field(name));
    out.write_u32::<LittleEndian>(width).unwrap();
    out.write_u32::<LittleEndian>(height).unwrap();
    for offset in offsets {
        out.write_u32::<LittleEndian>(offset).unwrap();
    }
    out.extend_from_slice(pixels);
    out.extend(pattern((area / 4 + area / 16 + area / 64) as usize, 0xEE));
    out.write_i16::<LittleEndian>(256).unwrap();
    out.extend_from_slice(palette);
    out.extend_from_slice(&[0, 0]);
    out
}

pub fn qpic_payload(width: u32, height: u32, pixels: &[u8], palette: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.write_u32::<LittleEndian>(width).unwrap();
    out.write_u32::<LittleEndian>(height).unwrap();
    out.extend_from_slice(pixels);
    out.write_i16::<LittleEndian>((palette.len() / 3) as i16).unwrap();
    out.extend_from_slice(palette);
    out
}

pub fn font_payload(width: u32, height: u32, pixels: &[u8], palette: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.write_u32::<LittleEndian>(width).unwrap();
    out.write_u32::<LittleEndian>(height).unwrap();
    out.write_u32::<LittleEndian>(16).unwrap();
    out.write_u32::<LittleEndian>(height / 16).unwrap();
    out.extend(pattern(1024, 0x11));
    out.extend_from_slice(pixels);
    out.write_i16::<LittleEndian>((palette.len() / 3) as i16).unwrap();
    out.extend_from_slice(palette);
    out
}

struct Lump {
    name: String,
    tag: i8,
    payload: Vec<u8>,
}

/// Builds a WAD3 file: header, payloads in insertion order, directory at the end.
#[derive(Default)]
pub struct WadBuilder {
    lumps: Vec<Lump>,
}

impl WadBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(mut self, name: &str, tag: i8, payload: Vec<u8>) -> Self {
        self.lumps.push(Lump {
            name: name.to_string(),
            tag,
            payload,
        });
        self
    }

    /// 4x4 texture whose content depends on `seed`.
    pub fn miptex(self, name: &str, seed: u8) -> Self {
        let payload = miptex_payload(name, 4, 4, &pattern(16, seed), &pattern(768, 3));
        self.raw(name, MIPTEX, payload)
    }

    pub fn spray(self, name: &str, seed: u8) -> Self {
        let payload = miptex_payload(name, 4, 4, &pattern(16, seed), &pattern(768, 5));
        self.raw(name, SPRAY, payload)
    }

    pub fn qpic(self, name: &str, seed: u8) -> Self {
        let payload = qpic_payload(3, 2, &pattern(6, seed), &pattern(12, 7));
        self.raw(name, QPIC, payload)
    }

    pub fn font(self, name: &str, seed: u8) -> Self {
        let payload = font_payload(256, 2, &pattern(512, seed), &pattern(768, 9));
        self.raw(name, FONT, payload)
    }

    pub fn build(&self) -> Vec<u8> {
        let mut body = Vec::new();
        let mut positions = Vec::new();
        for lump in &self.lumps {
            positions.push(12 + body.len() as i32);
            body.extend_from_slice(&lump.payload);
        }

        let mut out = Vec::new();
        out.extend_from_slice(b"WAD3");
        out.write_i32::<LittleEndian>(self.lumps.len() as i32).unwrap();
        out.write_i32::<LittleEndian>(12 + body.len() as i32).unwrap();
        out.extend_from_slice(&body);

        for (lump, pos) in self.lumps.iter().zip(positions) {
            out.write_i32::<LittleEndian>(pos).unwrap();
            out.write_i32::<LittleEndian>(lump.payload.len() as i32).unwrap();
            out.write_i32::<LittleEndian>(lump.payload.len() as i32).unwrap();
            out.write_i8(lump.tag).unwrap();
            out.write_u8(0).unwrap();
            out.write_u16::<LittleEndian>(0).unwrap();
            out.extend_from_slice(&name_field(&lump.name));
        }

        out
    }
}
