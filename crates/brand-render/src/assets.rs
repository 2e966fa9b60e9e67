//! Raster inputs: logo data URIs and invoice QR codes

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use pdf_core::{detect_format, ImageFormat};

use crate::{RenderError, Result};

/// A decoded PNG or JPEG, ready to embed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub format: ImageFormat,
    pub bytes: Vec<u8>,
}

/// Decode a `data:image/(png|jpeg|jpg)[;base64],...` URI
///
/// Anything else (other MIME types, broken base64, bytes that are not the
/// declared format) yields None and is logged at debug level.
pub fn parse_data_uri(uri: &str) -> Option<RasterImage> {
    let uri = uri.trim();
    let Some(rest) = uri
        .get(..5)
        .filter(|scheme| scheme.eq_ignore_ascii_case("data:"))
        .map(|_| &uri[5..])
    else {
        log::debug!("Skipping image: not a data URI");
        return None;
    };

    let Some((meta, payload)) = rest.split_once(',') else {
        log::debug!("Skipping image: data URI without payload");
        return None;
    };

    let mut params = meta.split(';').map(|p| p.trim().to_ascii_lowercase());
    let mime = params.next().unwrap_or_default();
    let is_base64 = params.any(|p| p == "base64");

    let declared = match mime.as_str() {
        "image/png" => ImageFormat::Png,
        "image/jpeg" | "image/jpg" => ImageFormat::Jpeg,
        other => {
            log::debug!("Skipping image with unsupported type {other:?}");
            return None;
        }
    };

    let bytes = if is_base64 {
        let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        match STANDARD.decode(compact) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::debug!("Skipping image: invalid base64 ({e})");
                return None;
            }
        }
    } else {
        payload.as_bytes().to_vec()
    };

    match detect_format(&bytes) {
        Ok(actual) if actual == declared => Some(RasterImage {
            format: actual,
            bytes,
        }),
        Ok(actual) => {
            log::debug!("Skipping image: declared {declared:?} but data is {actual:?}");
            None
        }
        Err(e) => {
            log::debug!("Skipping image: {e}");
            None
        }
    }
}

/// Render a QR code for the payload as a JPEG
pub fn generate_qr(payload: &str) -> Result<RasterImage> {
    use image::Luma;
    use qrcode::{EcLevel, QrCode};

    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::M)
        .map_err(|e| RenderError::Image(e.to_string()))?;

    let image = code.render::<Luma<u8>>().min_dimensions(200, 200).build();

    let mut bytes: Vec<u8> = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut bytes);
    image::DynamicImage::ImageLuma8(image)
        .write_to(&mut cursor, image::ImageFormat::Jpeg)
        .map_err(|e| RenderError::Image(e.to_string()))?;

    Ok(RasterImage {
        format: ImageFormat::Jpeg,
        bytes,
    })
}

/// The QR image for an invoice's `zatca.qrCode` field
///
/// An image data URI is embedded as is; any other text is treated as the
/// QR payload (usually the base64 TLV string) and encoded.
pub fn invoice_qr(value: &str) -> Option<RasterImage> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if value
        .get(..5)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:"))
    {
        return parse_data_uri(value);
    }
    match generate_qr(value) {
        Ok(image) => Some(image),
        Err(e) => {
            log::debug!("Skipping QR code: {e}");
            None
        }
    }
}

/// Build a ZATCA phase-1 TLV payload, base64-encoded
///
/// Tags: 1 seller name, 2 VAT number, 3 timestamp, 4 invoice total,
/// 5 VAT total. Values longer than 255 bytes are truncated at a char boundary.
pub fn zatca_tlv(
    seller: &str,
    vat_number: &str,
    timestamp: &str,
    total: &str,
    vat_total: &str,
) -> String {
    let mut buf = Vec::new();
    for (tag, value) in [seller, vat_number, timestamp, total, vat_total]
        .into_iter()
        .enumerate()
    {
        let mut end = value.len().min(255);
        while !value.is_char_boundary(end) {
            end -= 1;
        }
        buf.push(tag as u8 + 1);
        buf.push(end as u8);
        buf.extend_from_slice(&value.as_bytes()[..end]);
    }
    STANDARD.encode(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn png_bytes() -> Vec<u8> {
        let img = image::RgbImage::from_pixel(2, 2, image::Rgb([10, 20, 30]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_png_data_uri() {
        let uri = format!("data:image/png;base64,{}", STANDARD.encode(png_bytes()));
        let image = parse_data_uri(&uri).unwrap();
        assert_eq!(image.format, ImageFormat::Png);
        assert_eq!(image.bytes, png_bytes());
    }

    #[test]
    fn test_rejects_other_types() {
        let payload = STANDARD.encode(png_bytes());
        assert_eq!(parse_data_uri(&format!("data:image/svg+xml;base64,{payload}")), None);
        assert_eq!(parse_data_uri(&format!("data:image/gif;base64,{payload}")), None);
        assert_eq!(parse_data_uri("https://example.com/logo.png"), None);
        assert_eq!(parse_data_uri("data:image/png;base64"), None);
    }

    #[test]
    fn test_rejects_mismatched_or_broken_data() {
        let payload = STANDARD.encode(png_bytes());
        assert_eq!(parse_data_uri(&format!("data:image/jpeg;base64,{payload}")), None);
        assert_eq!(parse_data_uri("data:image/png;base64,!!!not-base64"), None);
        assert_eq!(parse_data_uri("data:image/png;base64,AAAA"), None);
    }

    #[test]
    fn test_generate_qr_is_jpeg() {
        let qr = generate_qr("hello").unwrap();
        assert_eq!(qr.format, ImageFormat::Jpeg);
        assert_eq!(detect_format(&qr.bytes).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn test_invoice_qr_sources() {
        assert!(invoice_qr("").is_none());
        assert!(invoice_qr("data:image/gif;base64,AAAA").is_none());
        let tlv = zatca_tlv("Acme", "300000000000003", "2025-01-15T10:00:00Z", "115.00", "15.00");
        assert!(invoice_qr(&tlv).is_some());
    }

    #[test]
    fn test_zatca_tlv_layout() {
        let encoded = zatca_tlv("AB", "1", "", "9", "0");
        let raw = STANDARD.decode(encoded).unwrap();
        assert_eq!(raw, vec![1, 2, b'A', b'B', 2, 1, b'1', 3, 0, 4, 1, b'9', 5, 1, b'0']);
    }
}
