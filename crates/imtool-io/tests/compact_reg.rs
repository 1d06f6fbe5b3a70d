//! Compact format regression test
//!
//! Checks the header, the color table order and the index width chosen
//! at the table-size boundaries.

use imtool_core::{Color, Image, Layout};
use imtool_io::{
    ImageFormat, IndexWidth, IndexedImage, read_image_header, write_compact_mem, write_image,
};
use imtool_test::{RegParams, image_from_colors};

/// `n` distinct colors, one per pixel, in a single row
fn distinct_colors(n: usize) -> Image {
    let colors: Vec<Color> = (0..n)
        .map(|i| Color::new((i % 256) as u16, (i / 256) as u16, 7))
        .collect();
    image_from_colors(n as u32, 1, 255, &colors, Layout::Interleaved).expect("image")
}

fn header_len(data: &[u8]) -> usize {
    data.iter().position(|&b| b == b'\n').expect("header newline") + 1
}

#[test]
fn compact_reg() {
    let mut rp = RegParams::new("compact");

    // Test 1-3: 256 colors use one-byte indices
    eprintln!("=== Test 1-3: 256 colors ===");
    let image = distinct_colors(256);
    let data = write_compact_mem(&image).expect("write compact");
    let hlen = header_len(&data);
    rp.compare_strings(b"C6 256 1 255 256\n", &data[..hlen]);
    rp.compare_values((256 * 3 + 256) as f64, (data.len() - hlen) as f64, 0.0);
    let indexed = IndexedImage::from_image(&image).expect("index");
    rp.compare_values(
        1.0,
        if indexed.table.index_width() == IndexWidth::U8 { 1.0 } else { 0.0 },
        0.0,
    );

    // Test 4-6: 257 colors move to two-byte indices
    eprintln!("=== Test 4-6: 257 colors ===");
    let image = distinct_colors(257);
    let data = write_compact_mem(&image).expect("write compact");
    let hlen = header_len(&data);
    rp.compare_strings(b"C6 257 1 255 257\n", &data[..hlen]);
    rp.compare_values((257 * 3 + 257 * 2) as f64, (data.len() - hlen) as f64, 0.0);
    // Last index (256) is little-endian
    rp.compare_strings(&[0x00, 0x01], &data[data.len() - 2..]);

    // Test 7-8: repeated colors share table entries
    eprintln!("=== Test 7-8: deduplication ===");
    let palette = [
        Color::new(10, 20, 30),
        Color::new(40, 50, 60),
        Color::new(10, 20, 30),
    ];
    let image = image_from_colors(6, 4, 255, &palette, Layout::Planar).expect("image");
    let indexed = IndexedImage::from_image(&image).expect("index");
    rp.compare_values(2.0, indexed.table.len() as f64, 0.0);
    rp.compare_values(24.0, indexed.indices.len() as f64, 0.0);

    // Test 9-10: file output carries the table size in its header
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("palette.cppm");
    write_image(&image, &path, ImageFormat::Compact).expect("write compact file");
    let header = read_image_header(&path).expect("read header");
    rp.compare_values(2.0, header.num_colors.unwrap_or(0) as f64, 0.0);
    rp.compare_values(
        1.0,
        if header.format == ImageFormat::Compact { 1.0 } else { 0.0 },
        0.0,
    );

    assert!(rp.cleanup());
}
