//! Rare-color removal regression test
//!
//! Uses images with known color counts so the rare/common split is
//! fully determined, then checks the replacements against a linear scan.

use imtool_color::{
    ColorTree, color_histogram, rare_color_replacements, remove_rare_colors,
};
use imtool_core::{Color, Layout};
use imtool_io::{read_ppm_mem, write_ppm_mem};
use imtool_test::{RegParams, counted_colors_image, gradient_image};

fn nearest_by_scan(colors: &[Color], target: Color) -> u64 {
    colors
        .iter()
        .map(|c| target.distance_squared(*c))
        .min()
        .unwrap_or(u64::MAX)
}

#[test]
fn quantize_reg() {
    let mut rp = RegParams::new("quantize");

    let a = Color::new(200, 10, 10);
    let b = Color::new(10, 200, 10);
    let c = Color::new(10, 10, 200);
    let d = Color::new(250, 250, 250);
    let e = Color::new(0, 0, 0);

    // Counts [1, 1, 1, 5, 9]; a, b, c tie at 1 and rank in that order
    let counts = [(d, 5), (a, 1), (e, 9), (b, 1), (c, 1)];

    for layout in [Layout::Interleaved, Layout::Planar] {
        eprintln!("=== layout {:?} ===", layout);
        let image = counted_colors_image(&counts, 255, layout).expect("fixture");

        // Histogram order
        let hist = color_histogram(&image);
        let ranked: Vec<usize> = hist.entries().iter().map(|e| e.count).collect();
        rp.compare_values(1.0, if ranked == vec![1, 1, 1, 5, 9] { 1.0 } else { 0.0 }, 0.0);
        rp.compare_values(
            1.0,
            if hist.entries()[0].color == a && hist.entries()[1].color == b {
                1.0
            } else {
                0.0
            },
            0.0,
        );

        // N = 2 replaces exactly a and b
        let map = rare_color_replacements(&image, 2);
        rp.compare_values(2.0, map.len() as f64, 0.0);
        let replaced_ok = map.contains_key(&a)
            && map.contains_key(&b)
            && map.values().all(|v| [c, d, e].contains(v));
        rp.compare_values(1.0, if replaced_ok { 1.0 } else { 0.0 }, 0.0);

        let out = remove_rare_colors(&image, 2).expect("remove");
        let out_hist = color_histogram(&out);
        rp.compare_values(3.0, out_hist.len() as f64, 0.0);
        // a and b are both closest to black, which absorbs them
        rp.compare_values(11.0, out_hist.count_of(e) as f64, 0.0);
        rp.compare_values(5.0, out_hist.count_of(d) as f64, 0.0);
        rp.compare_values(1.0, out_hist.count_of(c) as f64, 0.0);
        // Pixels that were not rare are untouched
        rp.compare_values(
            1.0,
            if out.pixels().zip(image.pixels()).all(|(o, i)| i == a || i == b || o == i) {
                1.0
            } else {
                0.0
            },
            0.0,
        );

        // Degenerate thresholds
        rp.compare_images(&image, &remove_rare_colors(&image, 0).expect("n = 0"));
        rp.compare_images(&image, &remove_rare_colors(&image, 5).expect("n = 5"));
        rp.compare_images(&image, &remove_rare_colors(&image, 50).expect("n = 50"));
    }

    assert!(rp.cleanup());
}

#[test]
fn quantize_gradient_reg() {
    let mut rp = RegParams::new("quantize_gradient");

    // 16-bit gradient with many distinct colors
    let image = gradient_image(48, 32, 65535, Layout::Planar).expect("gradient");
    let hist = color_histogram(&image);
    let n = hist.len() / 2;
    let (rare, common) = hist.split_rarest(n);
    let common_colors: Vec<Color> = common.iter().map(|e| e.color).collect();

    // Every replacement is a nearest common color
    let map = rare_color_replacements(&image, n);
    rp.compare_values(rare.len() as f64, map.len() as f64, 0.0);
    let all_nearest = map
        .iter()
        .all(|(from, to)| from.distance_squared(*to) == nearest_by_scan(&common_colors, *from));
    rp.compare_values(1.0, if all_nearest { 1.0 } else { 0.0 }, 0.0);

    // Tree agrees with a linear scan for arbitrary queries
    let tree = ColorTree::build(&common_colors);
    let agree = image.pixels().step_by(7).all(|target| {
        tree.nearest(target).map(|n| n.distance) == Some(nearest_by_scan(&common_colors, target))
    });
    rp.compare_values(1.0, if agree { 1.0 } else { 0.0 }, 0.0);

    // Output has at most the common colors and survives the codec
    let out = remove_rare_colors(&image, n).expect("remove");
    rp.compare_values(
        1.0,
        if color_histogram(&out).len() <= common.len() { 1.0 } else { 0.0 },
        0.0,
    );
    let decoded = read_ppm_mem(&write_ppm_mem(&out).expect("write")).expect("read");
    rp.compare_images(&out, &decoded);

    assert!(rp.cleanup());
}
