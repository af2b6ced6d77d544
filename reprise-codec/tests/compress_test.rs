use std::io::Write;

use assert_matches::assert_matches;
use flate2::Compression;
use flate2::write::{GzEncoder, ZlibEncoder};
use reprise_codec::*;

#[test]
fn decode_gzip_body() {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(b"hello gzip").unwrap();
    let compressed = encoder.finish().unwrap();
    let decoded = decode_body(Some("gzip"), compressed).unwrap();
    assert_eq!(decoded, b"hello gzip");
}

#[test]
fn decode_zlib_wrapped_deflate_body() {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(b"hello deflate").unwrap();
    let compressed = encoder.finish().unwrap();
    let decoded = decode_body(Some("Deflate"), compressed).unwrap();
    assert_eq!(decoded, b"hello deflate");
}

#[test]
fn unknown_encoding_passes_through() {
    let body = b"opaque".to_vec();
    assert_eq!(decode_body(Some("br"), body.clone()).unwrap(), body);
    assert_eq!(decode_body(None, body.clone()).unwrap(), body);
}

#[test]
fn gzip_invalid_errors() {
    let err = gzip_decompress(b"not gzip").unwrap_err();
    assert_matches!(err, CodecError::Compression(_));
}
