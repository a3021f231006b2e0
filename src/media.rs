use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

/// Largest file accepted for transmission. The channel carries whole frames
/// only, so oversized payloads are rejected up front instead of chunked.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("failed to read file: {0}")]
    Read(#[from] std::io::Error),
    #[error("file is {0} bytes, over the {MAX_IMAGE_BYTES}-byte limit")]
    TooLarge(usize),
    #[error("file is not a supported image format")]
    UnsupportedFormat,
    #[error("invalid base64 image payload: {0}")]
    Payload(#[from] base64::DecodeError),
    #[error("image payload failed to decode: {0}")]
    Decode(#[from] image::ImageError),
}

/// Read a picked file and produce the transport payload: the base64 body a
/// data URL would carry, without the prefix.
pub async fn encode_file(path: &Path) -> Result<String, MediaError> {
    let bytes = tokio::fs::read(path).await?;
    encode_bytes(&bytes)
}

/// Validate and encode raw file bytes. Size is checked before anything is
/// encoded; bytes that do not look like a raster image are refused.
pub fn encode_bytes(bytes: &[u8]) -> Result<String, MediaError> {
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(MediaError::TooLarge(bytes.len()));
    }
    image::guess_format(bytes).map_err(|_| MediaError::UnsupportedFormat)?;
    Ok(STANDARD.encode(bytes))
}

/// Decode an inbound base64 payload into pixels for display.
pub fn decode_payload(payload: &str) -> Result<image::RgbaImage, MediaError> {
    let bytes = STANDARD.decode(payload)?;
    Ok(image::load_from_memory(&bytes)?.to_rgba8())
}
