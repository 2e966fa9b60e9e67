//! Integration tests for pdf-core
//!
//! These tests build documents end to end and parse the output back with lopdf.

use pdf_core::{Align, Color, FontWeight, ImageScaleMode, PdfDocument, PdfError, A4_HEIGHT};
use pretty_assertions::assert_eq;

/// Create a minimal JPEG image for testing
fn create_test_jpeg() -> Vec<u8> {
    vec![
        0xFF, 0xD8, // SOI marker
        0xFF, 0xC0, // SOF0 marker (baseline DCT)
        0x00, 0x11, // Length (17 bytes)
        0x08, // Precision (8 bits)
        0x00, 0x10, // Height (16 pixels)
        0x00, 0x20, // Width (32 pixels)
        0x03, // Number of components (RGB)
        0x01, 0x22, 0x00, // Component 1
        0x02, 0x11, 0x01, // Component 2
        0x03, 0x11, 0x01, // Component 3
        0xFF, 0xD9, // EOI marker
    ]
}

/// Create a small grayscale PNG using the image crate
fn create_test_png() -> Vec<u8> {
    use image::{ImageBuffer, Luma};

    let img: ImageBuffer<Luma<u8>, Vec<u8>> = ImageBuffer::new(16, 16);
    let mut buffer = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut buffer),
        image::ImageFormat::Png,
    )
    .expect("Failed to create PNG");
    buffer
}

/// Decompressed content stream of a page (1-indexed)
fn page_content(bytes: &[u8], page: u32) -> String {
    let doc = lopdf::Document::load_mem(bytes).expect("Failed to parse PDF");
    let pages = doc.get_pages();
    let page_id = pages[&page];
    let content = doc.get_page_content(page_id).expect("Missing page content");
    String::from_utf8_lossy(&content).into_owned()
}

#[test]
fn test_blank_pages_roundtrip() {
    let mut doc = PdfDocument::new();
    doc.add_a4_page();
    doc.add_a4_page();
    doc.add_a4_page();
    let bytes = doc.to_bytes().expect("Failed to save PDF");

    let parsed = lopdf::Document::load_mem(&bytes).expect("Failed to parse PDF");
    assert_eq!(parsed.get_pages().len(), 3);
}

#[test]
fn test_media_box_is_page_size() {
    let mut doc = PdfDocument::new();
    doc.add_page(300.0, 400.0).unwrap();
    let bytes = doc.to_bytes().unwrap();

    let parsed = lopdf::Document::load_mem(&bytes).unwrap();
    let page_id = parsed.get_pages()[&1];
    let page = parsed.get_dictionary(page_id).unwrap();
    let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
    assert_eq!(media_box.len(), 4);
    assert_eq!(media_box[2].as_float().unwrap(), 300.0);
    assert_eq!(media_box[3].as_float().unwrap(), 400.0);
}

#[test]
fn test_insert_text_alignment() {
    let mut doc = PdfDocument::new();
    let page = doc.add_a4_page();
    doc.use_builtin_font(10.0);

    let width = doc.get_text_width("Hi");
    assert!((width - 9.44).abs() < 1e-3);

    doc.insert_text("Hi", page, 100.0, 100.0, Align::Left).unwrap();
    doc.insert_text("Hi", page, 100.0, 120.0, Align::Right).unwrap();
    doc.insert_text("Hi", page, 100.0, 140.0, Align::Center).unwrap();

    let content = page_content(&doc.to_bytes().unwrap(), 1);
    let baseline = |y: f64| {
        let v = A4_HEIGHT - y;
        format!("{v:.2}")
    };
    assert!(content.contains(&format!("100 {} Td", baseline(100.0))));
    assert!(content.contains(&format!("90.56 {} Td", baseline(120.0))));
    assert!(content.contains(&format!("95.28 {} Td", baseline(140.0))));
}

#[test]
fn test_bold_uses_second_builtin_font() {
    let mut doc = PdfDocument::new();
    let page = doc.add_a4_page();
    doc.use_builtin_font(12.0);
    doc.insert_text("Regular", page, 40.0, 60.0, Align::Left).unwrap();
    doc.set_font_weight(FontWeight::Bold);
    doc.insert_text("Bold", page, 40.0, 80.0, Align::Left).unwrap();

    let bytes = doc.to_bytes().unwrap();
    let parsed = lopdf::Document::load_mem(&bytes).unwrap();
    let page_id = parsed.get_pages()[&1];
    let fonts = parsed.get_page_fonts(page_id);
    let mut names: Vec<String> = fonts
        .values()
        .map(|f| String::from_utf8_lossy(f.get(b"BaseFont").unwrap().as_name().unwrap()).into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["Helvetica", "Helvetica-Bold"]);
}

#[test]
fn test_shapes_on_multiple_pages() {
    let mut doc = PdfDocument::new();
    let p1 = doc.add_a4_page();
    let p2 = doc.add_a4_page();
    doc.fill_rect(p1, 0.0, 0.0, 595.28, 6.0, Color::from_rgb(37, 99, 235))
        .unwrap();
    doc.draw_rounded_rect(p2, 40.0, 100.0, 200.0, 60.0, 8.0, Some(Color::white()), Some((Color::black(), 0.5)))
        .unwrap();
    doc.draw_line(p2, 40.0, 200.0, 555.28, 200.0, Color::black(), 0.75)
        .unwrap();

    let bytes = doc.to_bytes().unwrap();
    let first = page_content(&bytes, 1);
    let second = page_content(&bytes, 2);
    assert!(first.contains("re\nf"));
    assert!(!first.contains(" c\n"));
    assert!(second.contains(" c\n"));
    assert!(second.contains("0.75 w"));
}

#[test]
fn test_insert_image_jpeg_and_png() {
    let jpeg = create_test_jpeg();
    let png = create_test_png();

    let mut doc = PdfDocument::new();
    let page = doc.add_a4_page();
    doc.insert_image(&jpeg, page, 40.0, 40.0, 64.0, 32.0).unwrap();
    doc.insert_image_scaled(&png, page, 100.0, 40.0, 80.0, 40.0, ImageScaleMode::FitBox)
        .unwrap();
    // same bytes reuse the same XObject
    doc.insert_image(&jpeg, page, 40.0, 200.0, 64.0, 32.0).unwrap();

    let bytes = doc.to_bytes().unwrap();
    let parsed = lopdf::Document::load_mem(&bytes).unwrap();
    let images = parsed
        .objects
        .values()
        .filter_map(|o| o.as_stream().ok())
        .filter(|s| {
            s.dict
                .get(b"Subtype")
                .and_then(|v| v.as_name())
                .map(|n| n == b"Image")
                .unwrap_or(false)
        })
        .count();
    assert_eq!(images, 2);

    let content = page_content(&bytes, 1);
    // FitBox centers a 40x40 square inside the 80x40 box
    assert!(content.contains("40 0 0 40 120"));
}

#[test]
fn test_insert_invalid_image() {
    let mut doc = PdfDocument::new();
    let page = doc.add_a4_page();
    let result = doc.insert_image(&[0u8; 32], page, 0.0, 0.0, 10.0, 10.0);
    assert!(matches!(result, Err(PdfError::ImageError(_))));
}

#[test]
fn test_empty_text() {
    let mut doc = PdfDocument::new();
    let page = doc.add_a4_page();
    doc.use_builtin_font(12.0);
    doc.insert_text("", page, 0.0, 0.0, Align::Left).unwrap();
    let content = page_content(&doc.to_bytes().unwrap(), 1);
    assert!(!content.contains("BT"));
}

#[test]
fn test_non_latin_text_with_builtin_font() {
    let mut doc = PdfDocument::new();
    let page = doc.add_a4_page();
    doc.use_builtin_font(12.0);
    doc.insert_text("فاتورة", page, 40.0, 40.0, Align::Left).unwrap();
    let content = page_content(&doc.to_bytes().unwrap(), 1);
    assert!(content.contains("(??????) Tj"));
}

#[test]
fn test_invalid_page_number() {
    let mut doc = PdfDocument::new();
    doc.add_a4_page();
    doc.use_builtin_font(12.0);

    let result = doc.insert_text("Test", 0, 0.0, 0.0, Align::Left);
    assert!(matches!(result, Err(PdfError::InvalidPage(0, 1))));

    let result = doc.insert_text("Test", 5, 0.0, 0.0, Align::Left);
    assert!(matches!(result, Err(PdfError::InvalidPage(5, 1))));
}

#[test]
fn test_title_in_info() {
    let mut doc = PdfDocument::new();
    doc.add_a4_page();
    doc.set_title("Report");
    let bytes = doc.to_bytes().unwrap();
    let parsed = lopdf::Document::load_mem(&bytes).unwrap();
    let info_ref = parsed.trailer.get(b"Info").unwrap().as_reference().unwrap();
    let info = parsed.get_dictionary(info_ref).unwrap();
    assert!(info.get(b"Title").is_ok());
    assert!(info.get(b"Producer").is_ok());
}

#[test]
fn test_save_to_file() {
    let path = std::env::temp_dir().join("pdf_core_save_to_file.pdf");
    let mut doc = PdfDocument::new();
    doc.add_a4_page();
    doc.save(&path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    let _ = std::fs::remove_file(&path);
}
