// Text and binary encoding helpers

use base64::{engine::general_purpose::STANDARD, Engine as _};
use encoding_rs::UTF_8;
use serde::Serializer;

/// Decode UTF-8 text from a metadata block.
///
/// Malformed sequences become U+FFFD; a leading BOM is kept as text.
pub fn decode_utf8(data: &[u8], context: &'static str) -> String {
    let (text, had_errors) = UTF_8.decode_without_bom_handling(data);
    if had_errors {
        tracing::warn!(context, length = data.len(), "invalid UTF-8 replaced while decoding");
    }
    text.into_owned()
}

/// Serialize raw bytes as a standard base64 string
pub fn serialize_base64<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(data))
}

pub fn serialize_base64_opt<S: Serializer>(
    data: &Option<Vec<u8>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match data {
        Some(bytes) => serialize_base64(bytes, serializer),
        None => serializer.serialize_none(),
    }
}
