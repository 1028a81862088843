use super::ILLUSTRATION_MIME_TYPE;

/// Guess an image MIME type from magic bytes.
///
/// Unknown payloads are assumed to be the requested JPEG encoding.
pub fn detect_image_mime(bytes: &[u8]) -> &'static str {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [0x89, 0x50, 0x4E, 0x47, ..] => "image/png",
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => "image/webp",
        _ => {
            tracing::warn!(
                "Unrecognized image format (first 4 bytes: {:02X?}), falling back to {}",
                &bytes[..bytes.len().min(4)],
                ILLUSTRATION_MIME_TYPE
            );
            ILLUSTRATION_MIME_TYPE
        }
    }
}
