use base64::Engine;
use percent_encoding::percent_decode;

use crate::CodecError;

pub fn url_encode_str(input: &str) -> String {
    percent_encoding::percent_encode(input.as_bytes(), percent_encoding::NON_ALPHANUMERIC)
        .to_string()
}

pub fn url_decode_str(input: &str) -> Result<String, CodecError> {
    percent_decode(input.as_bytes())
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|err| CodecError::Url(err.to_string()))
}

pub fn base64_encode_str(input: &str) -> String {
    base64::engine::general_purpose::STANDARD.encode(input.as_bytes())
}

pub fn base64_decode_str(input: &str) -> Result<String, CodecError> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(input.trim())
        .map_err(|err| CodecError::Base64(err.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn base64url_encode_str(input: &str) -> String {
    base64::engine::general_purpose::URL_SAFE.encode(input.as_bytes())
}

pub fn hex_encode_str(input: &str) -> String {
    hex::encode(input.as_bytes())
}

pub fn html_escape_str(input: &str) -> String {
    html_escape::encode_safe(input).to_string()
}
