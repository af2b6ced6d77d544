use std::io::Read;

use flate2::read::{DeflateDecoder, GzDecoder, ZlibDecoder};

use crate::CodecError;

pub fn gzip_decompress(input: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut decoder = GzDecoder::new(input);
    let mut output = Vec::new();
    decoder
        .read_to_end(&mut output)
        .map_err(|err| CodecError::Compression(err.to_string()))?;
    Ok(output)
}

/// `deflate` on the wire is usually zlib-wrapped; raw deflate is the fallback.
pub fn deflate_decompress(input: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut output = Vec::new();
    if ZlibDecoder::new(input).read_to_end(&mut output).is_ok() {
        return Ok(output);
    }
    output.clear();
    DeflateDecoder::new(input)
        .read_to_end(&mut output)
        .map_err(|err| CodecError::Compression(err.to_string()))?;
    Ok(output)
}

/// Undoes `Content-Encoding`. Encodings we cannot decode pass through untouched.
pub fn decode_body(content_encoding: Option<&str>, body: Vec<u8>) -> Result<Vec<u8>, CodecError> {
    let Some(encoding) = content_encoding else {
        return Ok(body);
    };
    if body.is_empty() {
        return Ok(body);
    }
    match encoding.trim().to_ascii_lowercase().as_str() {
        "gzip" | "x-gzip" => gzip_decompress(&body),
        "deflate" => deflate_decompress(&body),
        _ => Ok(body),
    }
}
