use provenance_core::{ContainerFormat, Label, Reason, analyze};

const PLAUSIBLE_SIZE: usize = 200 * 1024;

fn dqt() -> Vec<u8> {
    let mut seg = vec![0xFF, 0xDB, 0x00, 0x43, 0x00];
    seg.extend_from_slice(&[0x01; 64]);
    seg
}

fn sof0(width: u16, height: u16) -> Vec<u8> {
    let mut seg = vec![0xFF, 0xC0, 0x00, 0x11, 0x08];
    seg.extend_from_slice(&height.to_be_bytes());
    seg.extend_from_slice(&width.to_be_bytes());
    seg.extend_from_slice(&[0x03, 0x01, 0x22, 0x00, 0x02, 0x11, 0x01, 0x03, 0x11, 0x01]);
    seg
}

/// A JPEG-shaped buffer with an APP1 block holding `app1_text`, one
/// quantization table, a 3024x4032 frame and zero padding up to `size`.
fn phone_jpeg(app1_text: &[u8], size: usize) -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8, 0xFF, 0xE1];
    data.extend_from_slice(&((app1_text.len() + 2) as u16).to_be_bytes());
    data.extend_from_slice(app1_text);
    data.extend(dqt());
    data.extend(sof0(3024, 4032));
    data.resize(size.saturating_sub(2), 0);
    data.extend_from_slice(&[0xFF, 0xD9]);
    data
}

fn png(width: u32, height: u32, extra: &[u8], size: usize) -> Vec<u8> {
    let mut data = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 13];
    data.extend_from_slice(b"IHDR");
    data.extend_from_slice(&width.to_be_bytes());
    data.extend_from_slice(&height.to_be_bytes());
    data.extend_from_slice(&[8, 2, 0, 0, 0, 0, 0, 0, 0]);
    data.extend_from_slice(extra);
    data.resize(size, 0);
    data
}

#[test]
fn phone_photo_scores_four_and_names_the_device() {
    let data = phone_jpeg(b"Exif\0\0Apple\0iPhone 13\0", PLAUSIBLE_SIZE);
    let verdict = analyze(&data);

    assert_eq!(verdict.format, ContainerFormat::Jpeg);
    assert_eq!(verdict.quantization_tables, Some(1));
    assert_eq!(verdict.resolution().as_deref(), Some("3024x4032"));
    assert!(verdict.metadata.exif_present);
    assert!(!verdict.screenshot);
    assert_eq!(verdict.score, 4);
    assert!(verdict.reasons.is_empty(), "unexpected reasons: {:?}", verdict.reasons);
    assert_eq!(verdict.label.to_string(), "Captured with Apple iPhone");
}

#[test]
fn editing_tag_costs_a_point_but_keeps_device_label() {
    let data = phone_jpeg(b"Exif\0\0Apple\0iPhone 13\0Lightroom\0", PLAUSIBLE_SIZE);
    let verdict = analyze(&data);

    assert_eq!(verdict.score, 3);
    assert_eq!(verdict.reasons, vec![Reason::EditingSoftware("Lightroom")]);
    assert!(
        verdict
            .reasons
            .iter()
            .any(|r| r.to_string() == "Editing software tag detected: Lightroom")
    );
    assert_eq!(verdict.label.to_string(), "Captured with Apple iPhone");
}

#[test]
fn standalone_camera_make_wins_over_device_label() {
    let data = phone_jpeg(b"Exif\0\0Canon\0Canon EOS R5\0", PLAUSIBLE_SIZE);
    let verdict = analyze(&data);
    assert_eq!(verdict.label, Label::StandaloneCamera("Canon"));
    assert_eq!(verdict.label.to_string(), "Likely standalone camera capture (Canon)");
}

#[test]
fn bare_screen_sized_png_is_a_screenshot() {
    let verdict = analyze(&png(1920, 1080, b"", PLAUSIBLE_SIZE));

    assert_eq!(verdict.format, ContainerFormat::Png);
    assert!(verdict.screenshot);
    assert_eq!(verdict.label, Label::Screenshot);
    assert_eq!(verdict.score, 1 - 1);
    assert!(!verdict.reasons.contains(&Reason::NoQuantizationTables));
    assert_eq!(verdict.reasons.last(), Some(&Reason::Screenshot));
}

#[test]
fn aspect_near_the_tolerance_edge_follows_decimal_rounding() {
    let near_three_halves = analyze(&png(3090, 2000, b"", PLAUSIBLE_SIZE));
    assert!(near_three_halves.screenshot);
    assert_eq!(near_three_halves.score, 0);
    assert_eq!(near_three_halves.label, Label::Screenshot);

    let below_four_thirds = analyze(&png(2570, 2000, b"", PLAUSIBLE_SIZE));
    assert!(!below_four_thirds.screenshot);
    assert_eq!(below_four_thirds.score, 1);
    assert_eq!(below_four_thirds.label, Label::Insufficient);
}

#[test]
fn manufacturer_string_clears_screenshot_flag() {
    let verdict = analyze(&png(1920, 1080, b"Nikon", PLAUSIBLE_SIZE));
    assert!(!verdict.screenshot);
    assert_eq!(verdict.label, Label::StandaloneCamera("Nikon"));
}

#[test]
fn jpeg_without_tables_is_flagged_but_png_is_not() {
    let mut data = vec![0xFF, 0xD8];
    data.extend(sof0(4000, 3000));
    data.resize(PLAUSIBLE_SIZE, 0);
    let verdict = analyze(&data);
    assert_eq!(verdict.quantization_tables, Some(0));
    assert!(verdict.reasons.contains(&Reason::NoQuantizationTables));

    let verdict = analyze(&png(4000, 3000, b"", PLAUSIBLE_SIZE));
    assert_eq!(verdict.quantization_tables, None);
    assert!(!verdict.reasons.contains(&Reason::NoQuantizationTables));
}

#[test]
fn tiny_buffer_fails_size_check_whatever_else_it_says() {
    let mut data = b"Exif Apple iPhone".to_vec();
    data.resize(50, b' ');
    let verdict = analyze(&data);
    assert!(verdict.reasons.contains(&Reason::FileTooSmall));
    assert!(!verdict.reasons.contains(&Reason::ResolutionTooLow));
    assert_eq!(
        Reason::FileTooSmall.to_string(),
        "File too small to be a natural camera photo"
    );
}

#[test]
fn low_resolution_is_reported_after_size_passes() {
    let verdict = analyze(&png(320, 240, b"", PLAUSIBLE_SIZE));
    assert!(verdict.reasons.contains(&Reason::ResolutionTooLow));
}

#[test]
fn gps_note_and_extra_fields_are_echoed() {
    let data = phone_jpeg(
        b"Exif\0\0Apple\0iPhone 13\02024:03:09 14:05:59\0Orientation\0\0\0\x01 GPS 37.7749 -122.4194",
        PLAUSIBLE_SIZE,
    );
    let verdict = analyze(&data);
    assert!(verdict.metadata.gps_present);
    assert_eq!(verdict.reasons.last(), Some(&Reason::GpsEmbedded));
    assert_eq!(verdict.score, 4);
    assert_eq!(verdict.metadata.timestamp.as_deref(), Some("2024:03:09 14:05:59"));
    let orientation = verdict.metadata.orientation.as_deref().unwrap();
    assert!(orientation.starts_with("Orientation"));
    assert_eq!(orientation.chars().count(), 30);
}

#[test]
fn webp_and_tiff_dimensions_reach_the_verdict() {
    let mut webp = b"RIFF\0\0\0\0WEBPVP8X\x0a\0\0\0\0\0\0\0".to_vec();
    webp.extend_from_slice(&1919u32.to_le_bytes()[..3]);
    webp.extend_from_slice(&1079u32.to_le_bytes()[..3]);
    let verdict = analyze(&webp);
    assert_eq!(verdict.format, ContainerFormat::Webp);
    assert_eq!(verdict.resolution().as_deref(), Some("1920x1080"));
    assert!(verdict.screenshot);

    let mut tiff = b"II*\0\x08\0\0\0\x02\0".to_vec();
    tiff.extend_from_slice(&[0x00, 0x01, 0x03, 0x00, 1, 0, 0, 0, 0x40, 0x1F, 0, 0]);
    tiff.extend_from_slice(&[0x01, 0x01, 0x03, 0x00, 1, 0, 0, 0, 0x20, 0x15, 0, 0]);
    let verdict = analyze(&tiff);
    assert_eq!(verdict.format, ContainerFormat::Tiff);
    assert_eq!(verdict.resolution().as_deref(), Some("8000x5408"));
}

#[test]
fn verdict_serializes_with_caller_identifier() {
    let data = phone_jpeg(b"Exif\0\0Apple\0iPhone 13\0", PLAUSIBLE_SIZE);
    let verdict = analyze(&data).with_identifier("IMG_0001.jpg");
    let json = serde_json::to_value(&verdict).unwrap();
    assert_eq!(json["file"], "IMG_0001.jpg");
    assert_eq!(json["verdict"], "Captured with Apple iPhone");
    assert_eq!(json["format"], "JPEG");
    assert_eq!(json["make"], "Apple");
    assert_eq!(json["model"], "iPhone");
    assert_eq!(json["gps_info_present"], false);
    assert_eq!(json["reasons"], serde_json::json!([]));
}
