mod compress;
mod encode;
mod error;
mod format;
mod headers;
mod model;
mod parse;

pub use compress::{decode_body, deflate_decompress, gzip_decompress};
pub use encode::{
    base64_decode_str, base64_encode_str, base64url_encode_str, hex_encode_str,
    html_escape_str, url_decode_str, url_encode_str,
};
pub use error::{CodecError, ParseError};
pub use format::{
    format_request, format_request_for_editing, format_response, pretty_json_or_verbatim,
};
pub use headers::{
    CONDITIONAL_HEADERS, DEFAULT_REPLAY_HEADER, DENIED_HEADERS, DENIED_PREFIXES, OutboundPolicy,
    is_conditional_header, is_denied_header, is_valid_header_name, prepare_outbound,
    retain_sendable_headers, split_host_port,
};
pub use model::{
    Header, OutboundRequest, ParsedRequest, Scheme, SendOptions, StructuredRequest,
    StructuredResponse,
};
pub use parse::{DEFAULT_HTTP_VERSION, normalize_newlines, parse_request, parse_request_with_fallback};
