mod common;

use common::*;
use comparewad::{
    EntryKind, EntryType, Fingerprint, LoadOptions, MemoryReader, WadError, Wad3Archive,
};

#[test]
fn decodes_every_entry_type() {
    let data = WadBuilder::new()
        .miptex("WALL01", 1)
        .spray("{LOGO", 2)
        .qpic("CONCHARS", 3)
        .font("FONT1", 4)
        .build();

    let archive = Wad3Archive::parse(&data).unwrap();
    assert_eq!(archive.len(), 4);
    assert_eq!(archive.header().num_entries, 4);
    assert_eq!(archive.directory().len(), 4);

    assert_eq!(archive.get("wall01").unwrap().entry_type(), EntryType::Miptex);
    assert_eq!(archive.get("{logo").unwrap().entry_type(), EntryType::Spray);
    assert_eq!(archive.get("conchars").unwrap().entry_type(), EntryType::Qpic);

    let font = archive.get("font1").unwrap();
    assert_eq!((font.width, font.height), (256, 2));
    assert_eq!(font.data, pattern(512, 4));
    assert_eq!(font.palette, pattern(768, 9));
    assert_eq!(
        font.kind,
        EntryKind::Font {
            row_count: 16,
            row_height: 0,
            colors_used: 256
        }
    );
}

#[test]
fn miptex_round_trip_recovers_inputs() {
    let pixels = pattern(8 * 4, 42);
    let palette = pattern(768, 99);
    let payload = miptex_payload("SKY1", 8, 4, &pixels, &palette);
    let disk_size = payload.len() as i32;
    let data = WadBuilder::new().raw("SKY1", MIPTEX, payload).build();

    let archive = Wad3Archive::parse(&data).unwrap();
    let entry = archive.get("sky1").unwrap();
    assert_eq!(entry.name, "SKY1");
    assert_eq!((entry.width, entry.height), (8, 4));
    assert_eq!(entry.data, pixels);
    assert_eq!(entry.palette, palette);
    assert_eq!(entry.disk_size, disk_size);
    assert_eq!(entry.fingerprint, Fingerprint::of(&pixels, &palette));
    assert_eq!(
        entry.kind,
        EntryKind::Miptex {
            mip_offsets: [40, 72, 80, 82]
        }
    );
}

#[test]
fn miptex_name_comes_from_payload() {
    let payload = miptex_payload("Inner", 4, 4, &pattern(16, 0), &pattern(768, 0));
    let data = WadBuilder::new().raw("OUTER", MIPTEX, payload).build();

    let archive = Wad3Archive::parse(&data).unwrap();
    assert!(archive.contains("inner"));
    assert!(!archive.contains("outer"));
    assert_eq!(archive.directory()[0].name, "OUTER");
}

#[test]
fn lookups_ignore_case() {
    let data = WadBuilder::new().miptex("WALL01", 1).build();
    let archive = Wad3Archive::parse(&data).unwrap();

    assert!(archive.contains("Wall01"));
    assert!(archive.contains("WALL01"));
    assert_eq!(archive.get("wall01").unwrap().name, "WALL01");
    assert_eq!(archive.names().into_iter().collect::<Vec<_>>(), ["wall01"]);
}

#[test]
fn missing_name_is_lookup_error() {
    let data = WadBuilder::new().miptex("WALL01", 1).build();
    let archive = Wad3Archive::parse(&data).unwrap();

    let err = archive.get("door1").unwrap_err();
    assert!(matches!(err, WadError::NotFound(ref name) if name == "door1"));
    // The handle is still usable afterwards
    assert!(archive.get("wall01").is_ok());
}

#[test]
fn later_duplicate_name_wins() {
    let data = WadBuilder::new()
        .qpic("DUP", 1)
        .qpic("dup", 2)
        .build();
    let archive = Wad3Archive::parse(&data).unwrap();

    assert_eq!(archive.len(), 1);
    assert_eq!(archive.directory().len(), 2);
    assert_eq!(archive.get("DUP").unwrap().name, "dup");
}

#[test]
fn bad_magic_fails_regardless_of_content() {
    let mut data = WadBuilder::new().miptex("WALL01", 1).build();
    data[..4].copy_from_slice(b"WAD2");

    let err = Wad3Archive::parse(&data).unwrap_err();
    assert!(matches!(err, WadError::Format(_)));
    assert_eq!(err.to_string(), "not a valid WAD3 file");

    assert!(matches!(Wad3Archive::parse(b""), Err(WadError::Format(_))));
}

#[test]
fn unsupported_type_fails_whole_load() {
    let data = WadBuilder::new()
        .miptex("WALL01", 1)
        .raw("MYSTERY", 0x99u8 as i8, vec![0; 64])
        .build();

    let err = Wad3Archive::parse(&data).unwrap_err();
    assert!(matches!(err, WadError::UnsupportedType(tag) if tag == 0x99u8 as i8));
    assert_eq!(err.to_string(), "invalid entry file type: 0x99");
}

#[test]
fn lenient_mode_skips_unsupported_types() {
    let data = WadBuilder::new()
        .miptex("WALL01", 1)
        .raw("MYSTERY", 0x44, vec![0; 64])
        .build();

    let archive = Wad3Archive::parse_with(&data, &LoadOptions { lenient: true }).unwrap();
    assert_eq!(archive.len(), 1);
    assert_eq!(archive.directory().len(), 2);
    assert!(archive.contains("wall01"));
}

#[test]
fn lenient_mode_still_rejects_malformed_payloads() {
    let data = WadBuilder::new().raw("BROKEN", QPIC, vec![0; 4]).build();
    let err = Wad3Archive::parse_with(&data, &LoadOptions { lenient: true }).unwrap_err();
    assert!(matches!(err, WadError::Format(_)));
}

#[test]
fn directory_past_end_is_format_error() {
    let mut data = WadBuilder::new().miptex("WALL01", 1).build();
    // Claim one more record than the table holds
    data[4..8].copy_from_slice(&2i32.to_le_bytes());
    assert!(matches!(Wad3Archive::parse(&data), Err(WadError::Format(_))));

    let mut data = WadBuilder::new().miptex("WALL01", 1).build();
    data[8..12].copy_from_slice(&(-1i32).to_le_bytes());
    assert!(matches!(Wad3Archive::parse(&data), Err(WadError::Format(_))));
}

#[test]
fn payload_past_end_is_format_error() {
    let mut data = WadBuilder::new().qpic("PIC", 1).build();
    let dir = data.len() - 32;
    data[dir + 4..dir + 8].copy_from_slice(&10_000i32.to_le_bytes());
    let err = Wad3Archive::parse(&data).unwrap_err();
    assert!(err.to_string().contains("exceeds archive"));
}

#[test]
fn empty_archive_has_no_entries() {
    let data = WadBuilder::new().build();
    let archive = Wad3Archive::parse(&data).unwrap();
    assert!(archive.is_empty());
    assert!(archive.names().is_empty());
}

#[test]
fn loading_twice_gives_identical_fingerprints() {
    let data = WadBuilder::new()
        .miptex("A", 1)
        .qpic("B", 2)
        .font("C", 3)
        .build();
    let first = Wad3Archive::parse(&data).unwrap();
    let second = Wad3Archive::parse(&data.clone()).unwrap();

    for (name, entry) in first.iter() {
        assert_eq!(entry.fingerprint, second.get(name).unwrap().fingerprint);
    }
}

#[test]
fn iter_is_sorted_by_name() {
    let data = WadBuilder::new()
        .qpic("Zeta", 1)
        .qpic("alpha", 2)
        .qpic("MID", 3)
        .build();
    let archive = Wad3Archive::parse(&data).unwrap();
    let names: Vec<_> = archive.iter().map(|(name, _)| name).collect();
    assert_eq!(names, ["alpha", "mid", "zeta"]);
}

#[tokio::test]
async fn loads_from_reader() {
    let data = WadBuilder::new().miptex("WALL01", 1).build();
    let reader = MemoryReader::new(data);
    let archive = Wad3Archive::load(&reader, &LoadOptions::default()).await.unwrap();
    assert!(archive.contains("wall01"));
}

#[tokio::test]
async fn loads_from_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("textures.wad");
    std::fs::write(&path, WadBuilder::new().qpic("PIC", 1).build()).unwrap();

    let archive = comparewad::load(&path).await.unwrap();
    assert!(archive.contains("pic"));

    let missing = comparewad::load(dir.path().join("nope.wad")).await.unwrap_err();
    assert!(matches!(missing, WadError::Io(_)));
}
