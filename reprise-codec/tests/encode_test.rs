use assert_matches::assert_matches;
use reprise_codec::*;

#[test]
fn url_roundtrip() {
    let input = "a b&c=d/é";
    let encoded = url_encode_str(input);
    assert!(!encoded.contains(' '));
    assert_eq!(url_decode_str(&encoded).unwrap(), input);
}

#[test]
fn base64_roundtrip() {
    let encoded = base64_encode_str("admin:admin");
    assert_eq!(encoded, "YWRtaW46YWRtaW4=");
    assert_eq!(base64_decode_str(&encoded).unwrap(), "admin:admin");
}

#[test]
fn base64_invalid_errors() {
    assert_matches!(base64_decode_str("@@@"), Err(CodecError::Base64(_)));
}

#[test]
fn base64url_and_hex() {
    assert_eq!(base64url_encode_str("??>"), "Pz8-");
    assert_eq!(hex_encode_str("hi"), "6869");
}

#[test]
fn html_escape_removes_markup() {
    let escaped = html_escape_str("<script>\"x\"</script>");
    assert!(!escaped.contains('<'));
    assert!(!escaped.contains('"'));
}
