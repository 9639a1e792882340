use base64::{Engine as _, engine::general_purpose};

/// Decode a browser-produced `data:image/...;base64,` URL into raw bytes.
///
/// Thumbnails arrive from the client as a data URL captured off a canvas;
/// only base64-encoded image payloads are accepted.
pub fn decode_image_data_url(data_url: &str) -> Result<Vec<u8>, String> {
    let rest = data_url
        .strip_prefix("data:image/")
        .ok_or_else(|| "expected a data:image/* URL".to_string())?;

    let (_, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| "expected a base64-encoded data URL".to_string())?;

    general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| format!("invalid base64 payload: {e}"))
}
