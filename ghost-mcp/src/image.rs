//! Image upload normalization.
//!
//! Callers supply images as base64 data URIs. Before anything reaches the
//! Admin API the payload is decoded and checked against the upload rules:
//! a 2 MB size cap, a per-purpose format allow-list keyed off the declared
//! MIME type, and an equal width/height requirement for `profile_image` and
//! `icon` uploads. Every violation is a caller error; nothing is uploaded
//! until all checks pass.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use once_cell::sync::Lazy;
use regex::Regex;
use schemars::JsonSchema;
use serde::Deserialize;
use thiserror::Error;

/// Maximum accepted image size in bytes (2 MB).
pub const MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

static DATA_URI_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^data:([a-zA-Z0-9]+/[a-zA-Z0-9.+-]+);base64,(.+)$").expect("valid pattern")
});

const COMMON_FORMATS: [&str; 6] = [".webp", ".jpg", ".jpeg", ".gif", ".png", ".svg"];
const ICON_FORMATS: [&str; 7] = [".webp", ".jpg", ".jpeg", ".gif", ".png", ".svg", ".ico"];

/// What the uploaded image will be used for. Constrains accepted formats
/// and, for `profile_image`/`icon`, requires square dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ImagePurpose {
    #[default]
    Image,
    ProfileImage,
    Icon,
}

impl ImagePurpose {
    pub fn as_str(self) -> &'static str {
        match self {
            ImagePurpose::Image => "image",
            ImagePurpose::ProfileImage => "profile_image",
            ImagePurpose::Icon => "icon",
        }
    }

    fn allowed_formats(self) -> &'static [&'static str] {
        match self {
            ImagePurpose::Image | ImagePurpose::ProfileImage => &COMMON_FORMATS,
            ImagePurpose::Icon => &ICON_FORMATS,
        }
    }

    fn requires_square(self) -> bool {
        matches!(self, ImagePurpose::ProfileImage | ImagePurpose::Icon)
    }
}

/// Why an image payload was rejected.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Invalid base64 image data format")]
    MalformedDataUri,

    #[error("Failed to decode base64 image data")]
    Decode,

    #[error("File size exceeds maximum limit of 2MB")]
    TooLarge,

    #[error("Invalid image format for {purpose}. Allowed formats: {allowed}")]
    UnsupportedFormat {
        purpose: &'static str,
        allowed: String,
    },

    #[error("{purpose} must be square (current dimensions: {width}x{height})")]
    NotSquare {
        purpose: &'static str,
        width: usize,
        height: usize,
    },

    #[error("Failed to determine image dimensions")]
    UnknownDimensions,
}

/// A decoded, validated image ready for multipart packaging.
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    pub data: Vec<u8>,
    pub mime_type: String,
    /// Synthesized from the MIME type, e.g. `image/png` -> `image.png`.
    pub file_name: String,
}

/// Decode and validate a base64 data URI for the given purpose.
pub fn normalize(file: &str, purpose: ImagePurpose) -> Result<NormalizedImage, ImageError> {
    let (mime_type, data) = parse_data_uri(file)?;
    validate(&data, &mime_type, purpose)?;

    let file_name = format!("image{}", mime_type.replacen("image/", ".", 1));
    Ok(NormalizedImage {
        data,
        mime_type,
        file_name,
    })
}

/// Split a `data:<mime>;base64,<payload>` URI into MIME type and raw bytes.
pub fn parse_data_uri(input: &str) -> Result<(String, Vec<u8>), ImageError> {
    let caps = DATA_URI_RE
        .captures(input)
        .ok_or(ImageError::MalformedDataUri)?;

    let mime_type = caps[1].to_string();
    let data = BASE64
        .decode(caps[2].as_bytes())
        .map_err(|_| ImageError::Decode)?;

    Ok((mime_type, data))
}

fn validate(data: &[u8], mime_type: &str, purpose: ImagePurpose) -> Result<(), ImageError> {
    if data.len() > MAX_IMAGE_BYTES {
        return Err(ImageError::TooLarge);
    }

    // The format token is the raw MIME subtype, so `image/svg+xml` yields
    // `.svg+xml` and does not satisfy `.svg`.
    let subtype = mime_type.split('/').nth(1).unwrap_or_default();
    let extension = format!(".{}", subtype.to_lowercase());
    let allowed = purpose.allowed_formats();
    if !allowed.contains(&extension.as_str()) {
        return Err(ImageError::UnsupportedFormat {
            purpose: purpose.as_str(),
            allowed: allowed.join(", "),
        });
    }

    if purpose.requires_square() {
        let size = imagesize::blob_size(data).map_err(|_| ImageError::UnknownDimensions)?;
        if size.width != size.height {
            return Err(ImageError::NotSquare {
                purpose: purpose.as_str(),
                width: size.width,
                height: size.height,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal PNG: signature plus an IHDR chunk with the given dimensions.
    /// Size probing only reads the header, so no pixel data is needed.
    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        bytes.extend_from_slice(&13u32.to_be_bytes());
        bytes.extend_from_slice(b"IHDR");
        bytes.extend_from_slice(&width.to_be_bytes());
        bytes.extend_from_slice(&height.to_be_bytes());
        bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
        bytes.extend_from_slice(&[0, 0, 0, 0]);
        bytes
    }

    fn data_uri(mime: &str, data: &[u8]) -> String {
        format!("data:{mime};base64,{}", BASE64.encode(data))
    }

    #[test]
    fn test_parse_data_uri_extracts_mime_and_bytes() {
        let (mime, data) = parse_data_uri(&data_uri("image/png", b"hello")).unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(data, b"hello");
    }

    #[test]
    fn test_parse_rejects_plain_base64() {
        let err = parse_data_uri("aGVsbG8=").unwrap_err();
        assert!(matches!(err, ImageError::MalformedDataUri));
    }

    #[test]
    fn test_parse_rejects_missing_base64_marker() {
        let err = parse_data_uri("data:image/png,aGVsbG8=").unwrap_err();
        assert!(matches!(err, ImageError::MalformedDataUri));
    }

    #[test]
    fn test_parse_rejects_invalid_base64_payload() {
        let err = parse_data_uri("data:image/png;base64,!!!!").unwrap_err();
        assert!(matches!(err, ImageError::Decode));
    }

    #[test]
    fn test_normalize_square_png_for_icon() {
        let uri = data_uri("image/png", &png_bytes(100, 100));
        let image = normalize(&uri, ImagePurpose::Icon).unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.file_name, "image.png");
        assert_eq!(image.data, png_bytes(100, 100));
    }

    #[test]
    fn test_normalize_rejects_non_square_profile_image() {
        let uri = data_uri("image/png", &png_bytes(100, 50));
        let err = normalize(&uri, ImagePurpose::ProfileImage).unwrap_err();
        assert_eq!(
            err.to_string(),
            "profile_image must be square (current dimensions: 100x50)"
        );
    }

    #[test]
    fn test_normalize_skips_square_check_for_plain_image() {
        let uri = data_uri("image/png", &png_bytes(100, 50));
        assert!(normalize(&uri, ImagePurpose::Image).is_ok());
    }

    #[test]
    fn test_normalize_rejects_oversized_payload_before_format() {
        // Declared format is irrelevant once the size cap is exceeded.
        let uri = data_uri("image/bmp", &vec![0u8; MAX_IMAGE_BYTES + 1]);
        let err = normalize(&uri, ImagePurpose::Image).unwrap_err();
        assert!(matches!(err, ImageError::TooLarge));
    }

    #[test]
    fn test_normalize_accepts_exactly_max_size() {
        let mut data = png_bytes(10, 10);
        data.resize(MAX_IMAGE_BYTES, 0);
        let uri = data_uri("image/png", &data);
        assert!(normalize(&uri, ImagePurpose::Image).is_ok());
    }

    #[test]
    fn test_normalize_rejects_unknown_format() {
        let uri = data_uri("image/bmp", &png_bytes(10, 10));
        let err = normalize(&uri, ImagePurpose::Image).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Invalid image format for image"));
        assert!(message.contains(".webp"));
        assert!(message.contains(".png"));
    }

    #[test]
    fn test_ico_only_allowed_for_icon_purpose() {
        let square = data_uri("image/ico", &png_bytes(32, 32));
        assert!(normalize(&square, ImagePurpose::Icon).is_ok());
        assert!(matches!(
            normalize(&square, ImagePurpose::Image).unwrap_err(),
            ImageError::UnsupportedFormat { .. }
        ));
    }

    #[test]
    fn test_svg_xml_subtype_does_not_match_svg() {
        let uri = data_uri("image/svg+xml", b"<svg/>");
        assert!(matches!(
            normalize(&uri, ImagePurpose::Image).unwrap_err(),
            ImageError::UnsupportedFormat { .. }
        ));
    }

    #[test]
    fn test_square_check_with_undecodable_bytes() {
        let uri = data_uri("image/png", b"not really a png");
        let err = normalize(&uri, ImagePurpose::Icon).unwrap_err();
        assert!(matches!(err, ImageError::UnknownDimensions));
    }

    #[test]
    fn test_purpose_default_is_image() {
        assert_eq!(ImagePurpose::default(), ImagePurpose::Image);
    }

    #[test]
    fn test_purpose_deserializes_snake_case() {
        let p: ImagePurpose = serde_json::from_str("\"profile_image\"").unwrap();
        assert_eq!(p, ImagePurpose::ProfileImage);
        assert!(serde_json::from_str::<ImagePurpose>("\"banner\"").is_err());
    }
}
