use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// Encode an identifier for use as a path segment (base64url, no padding).
pub fn encode_id(id: &str) -> String {
    URL_SAFE_NO_PAD.encode(id.as_bytes())
}
