//! Benchmarks for the PhotoOps facet engine.
//!
//! Run with: cargo bench -p photoops-core

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use photoops_core::facets::extract_geometry;
use photoops_core::{FacetEngine, FacetKind, SourceDocument, TagTree};
use serde_json::json;

/// A RAW-like tree: thumbnail geometry in IFD0, the real size deep in the
/// EXIF sub-IFD, behind a bulky maker note.
fn nef_tree() -> TagTree {
    let blob: Vec<u32> = (0..4096).collect();
    serde_json::from_value(json!({
        "ifd0": {
            "make": "NIKON CORPORATION",
            "model": "NIKON D750",
            "subfile_type": "Reduced-resolution image",
            "image_width": 160,
            "image_length": 120,
            "compression": "JPEG (old-style)",
            "maker_note": {
                "serial_number": "6012345",
                "lens_min_max_focal_max_aperture": [24.0, 70.0, 2.8, 2.8],
                "lens_type": "AF-S VR",
                "focus_mode": "AF-S",
                "preview": { "blob": blob }
            },
            "exif_ifd": {
                "date_time_original": "2021:06:12 18:04:31",
                "exposure_time": 0.004,
                "f_number": 2.8,
                "photographic_sensitivity": 200,
                "pixel_x_dimension": 6016,
                "pixel_y_dimension": 4016
            },
            "gps_ifd": {
                "gps_version_id": [2, 3, 0, 0],
                "gps_latitude_ref": "N",
                "gps_latitude": [52.0, 22.0, 12.5]
            }
        }
    }))
    .unwrap_or_default()
}

fn benchmark_geometry(c: &mut Criterion) {
    let tree = nef_tree();

    c.bench_function("extract_geometry", |b| {
        b.iter(|| extract_geometry(black_box(&tree)))
    });
}

fn benchmark_engine(c: &mut Criterion) {
    let doc = SourceDocument {
        bucket: "photos".into(),
        key: "2021/06/DSC_0042.NEF".into(),
        size: 24_117_248,
        container: Some("tif".into()),
        exif: nef_tree(),
    };

    let engine = FacetEngine::default();
    c.bench_function("engine_build_default", |b| {
        b.iter(|| engine.build(black_box(&doc)))
    });

    let all = FacetEngine::default().with_facets(FacetKind::ALL.to_vec());
    c.bench_function("engine_build_records_all", |b| {
        b.iter(|| all.build(black_box(&doc)).map(|set| set.records()))
    });
}

criterion_group!(benches, benchmark_geometry, benchmark_engine);
criterion_main!(benches);
