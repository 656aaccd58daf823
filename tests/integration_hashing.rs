//! Integration tests for the hashing facade.
//!
//! These tests verify end-to-end behavior including:
//! - Hashing from files, bytes and readers
//! - Stability under lossy recompression and rescaling
//! - Separation of unrelated images
//! - Error propagation from the decode step

use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use perceptual_fingerprint::core::hasher::DctTransformKind;
use perceptual_fingerprint::{
    hamming_distance, Fingerprint, HashAlgorithmKind, HashError, HasherConfig,
};
use std::f64::consts::PI;
use std::fs::File;
use std::io::{Cursor, Write};
use tempfile::TempDir;

/// Parameters of a synthetic "photo": two low-frequency waves plus a bright disc
struct Scene {
    fx: f64,
    fy: f64,
    phase: f64,
    disc_x: f64,
    disc_y: f64,
}

const SCENES: [Scene; 5] = [
    Scene { fx: 1.0, fy: 0.5, phase: 0.0, disc_x: 0.3, disc_y: 0.3 },
    Scene { fx: 0.5, fy: 2.0, phase: 1.7, disc_x: 0.7, disc_y: 0.6 },
    Scene { fx: 2.0, fy: 1.0, phase: 3.1, disc_x: 0.5, disc_y: 0.8 },
    Scene { fx: 1.5, fy: 1.5, phase: 4.4, disc_x: 0.2, disc_y: 0.7 },
    Scene { fx: 0.7, fy: 0.3, phase: 5.5, disc_x: 0.8, disc_y: 0.2 },
];

fn render(scene: &Scene, width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(ImageBuffer::from_fn(width, height, |x, y| {
        let u = (x as f64 + 0.5) / width as f64;
        let v = (y as f64 + 0.5) / height as f64;
        let wave = (2.0 * PI * (scene.fx * u + scene.fy * v) + scene.phase).sin();
        let ripple = (2.0 * PI * (scene.fy * u - scene.fx * v)).cos();
        let d2 = (u - scene.disc_x).powi(2) + (v - scene.disc_y).powi(2);
        let disc = if d2 < 0.02 { 70.0 } else { 0.0 };
        let base = 110.0 + 55.0 * wave + 25.0 * ripple + disc;
        let r = base.clamp(0.0, 255.0) as u8;
        let g = (base * 0.9 + 15.0).clamp(0.0, 255.0) as u8;
        let b = (255.0 - base * 0.5).clamp(0.0, 255.0) as u8;
        Rgb([r, g, b])
    }))
}

fn encode(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .to_rgb8()
        .write_to(&mut Cursor::new(&mut bytes), format)
        .unwrap();
    bytes
}

#[test]
fn file_bytes_and_reader_agree() {
    let temp_dir = TempDir::new().unwrap();
    let image = render(&SCENES[0], 160, 120);
    let png = encode(&image, ImageFormat::Png);

    let path = temp_dir.path().join("scene.png");
    File::create(&path).unwrap().write_all(&png).unwrap();

    for kind in [HashAlgorithmKind::Average, HashAlgorithmKind::Dct] {
        let hasher = HasherConfig::new().algorithm(kind).build().unwrap();

        let from_image = hasher.hash_image(&image).unwrap();
        assert_eq!(hasher.hash_file(&path).unwrap(), from_image);
        assert_eq!(hasher.hash_bytes(&png).unwrap(), from_image);
        assert_eq!(hasher.hash_reader(Cursor::new(&png)).unwrap(), from_image);
    }
}

#[test]
fn jpeg_recompression_is_a_near_duplicate() {
    let temp_dir = TempDir::new().unwrap();
    let hasher = HasherConfig::new().build().unwrap();

    for (i, scene) in SCENES.iter().enumerate() {
        let image = render(scene, 320, 240);
        let path = temp_dir.path().join(format!("scene-{}.jpg", i));
        File::create(&path)
            .unwrap()
            .write_all(&encode(&image, ImageFormat::Jpeg))
            .unwrap();

        let original = hasher.hash_image(&image).unwrap();
        let recompressed = hasher.hash_file(&path).unwrap();

        let distance = original.distance(&recompressed);
        assert!(distance <= 10, "scene {} moved {} bits", i, distance);
    }
}

#[test]
fn rescaled_copy_is_a_near_duplicate() {
    let hasher = HasherConfig::new().build().unwrap();

    for scene in &SCENES {
        let small = hasher.hash_image(&render(scene, 64, 48)).unwrap();
        let large = hasher.hash_image(&render(scene, 640, 480)).unwrap();

        assert!(small.distance(&large) <= 10, "distance {}", small.distance(&large));
    }
}

#[test]
fn unrelated_scenes_are_far_apart_on_average() {
    let hasher = HasherConfig::new().build().unwrap();
    let hashes: Vec<Fingerprint> = SCENES
        .iter()
        .map(|scene| hasher.hash_image(&render(scene, 200, 150)).unwrap())
        .collect();

    let mut total = 0u32;
    let mut pairs = 0u32;
    for i in 0..hashes.len() {
        for j in (i + 1)..hashes.len() {
            total += hashes[i].distance(&hashes[j]);
            pairs += 1;
        }
    }

    let mean = total as f64 / pairs as f64;
    assert!(mean > 12.0, "mean distance between unrelated scenes {}", mean);
}

#[test]
fn transform_backends_agree_on_real_images() {
    let table = HasherConfig::new().build().unwrap();
    let planned = HasherConfig::new()
        .transform(DctTransformKind::Planned)
        .build()
        .unwrap();

    for scene in &SCENES {
        let image = render(scene, 200, 150);
        assert_eq!(
            table.hash_image(&image).unwrap(),
            planned.hash_image(&image).unwrap()
        );
    }
}

#[test]
fn flat_images_hash_identically_on_both_backends() {
    let table = HasherConfig::new().build().unwrap();
    let planned = HasherConfig::new()
        .transform(DctTransformKind::Planned)
        .build()
        .unwrap();
    let average = HasherConfig::new()
        .algorithm(HashAlgorithmKind::Average)
        .build()
        .unwrap();

    for level in [0u8, 64, 128, 129, 255] {
        let image = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(120, 80, Rgb([level; 3])));
        let expected = if level == 0 { 0 } else { 0x8000_0000_0000_0000 };

        assert_eq!(table.hash_image(&image).unwrap().bits(), expected, "level {}", level);
        assert_eq!(planned.hash_image(&image).unwrap().bits(), expected, "level {}", level);
        assert_eq!(average.hash_image(&image).unwrap().bits(), 0, "level {}", level);
    }
}

#[test]
fn metric_properties_hold_for_real_fingerprints() {
    let hashes: Vec<u64> = SCENES
        .iter()
        .flat_map(|scene| {
            let image = render(scene, 128, 96);
            [
                HashAlgorithmKind::Average.hash_image(&image).unwrap().bits(),
                HashAlgorithmKind::Dct.hash_image(&image).unwrap().bits(),
            ]
        })
        .collect();

    for &a in &hashes {
        assert_eq!(hamming_distance(a, a), 0);
        for &b in &hashes {
            assert_eq!(hamming_distance(a, b), hamming_distance(b, a));
            assert!(hamming_distance(a, b) <= 64);
            for &c in &hashes {
                assert!(hamming_distance(a, c) <= hamming_distance(a, b) + hamming_distance(b, c));
            }
        }
    }
}

#[test]
fn fingerprint_hex_survives_persistence() {
    let hash = HashAlgorithmKind::Dct
        .hash_image(&render(&SCENES[2], 100, 100))
        .unwrap();

    let text = hash.to_hex();
    assert_eq!(text.len(), 18);
    assert_eq!(text.parse::<Fingerprint>().unwrap(), hash);

    let json = serde_json::to_string(&hash).unwrap();
    assert_eq!(serde_json::from_str::<Fingerprint>(&json).unwrap(), hash);
}

#[test]
fn corrupt_file_propagates_decode_error() {
    let temp_dir = TempDir::new().unwrap();
    let corrupt_path = temp_dir.path().join("corrupt.jpg");
    File::create(&corrupt_path)
        .unwrap()
        .write_all(b"this is not a valid image file")
        .unwrap();

    let err = HasherConfig::new().build().unwrap().hash_file(&corrupt_path).unwrap_err();

    assert!(matches!(err, HashError::DecodeError { .. }));
    assert!(!err.is_invalid_input());
}

#[test]
fn nonexistent_file_is_an_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.png");

    let err = HasherConfig::new().build().unwrap().hash_file(&missing).unwrap_err();

    assert!(matches!(err, HashError::IoError { .. }));
}
