#![no_main]

use glam::Vec2;
use libfuzzer_sys::fuzz_target;
use stray_vector::{Compositor, GeoUnion, Polygon, ShapeKind};

fuzz_target!(|data: &[u8]| {
    // Each 4-byte chunk is one ellipse: center, and half extents.
    let polygons: Vec<Polygon> = data
        .chunks_exact(4)
        .take(64)
        .map(|c| {
            let center = Vec2::new(c[0] as f32, c[1] as f32);
            let half = Vec2::new((c[2] as f32 + 1.0) / 8.0, (c[3] as f32 + 1.0) / 8.0);
            Polygon::ellipse(center, half, 12)
        })
        .collect();

    let compositor = Compositor::new(ShapeKind::Ellipse, 12, Some(GeoUnion));
    if let Some(fusion) = compositor.fusion() {
        // Fused output never carries degenerate regions.
        if let Some(fused) = fusion.union_all(polygons) {
            assert!(fused.regions().iter().all(|r| r.len() >= 3));
        }
    }
});
