//! `data:` URI decoding (RFC 2397).

use crate::resource::ResourceError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

#[derive(Debug, Clone, PartialEq)]
pub struct DataUri {
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Decodes `data:[<mime>][;base64],<payload>`.
///
/// Non-base64 payloads are percent-decoded.
pub fn parse_data_uri(uri: &str) -> Result<DataUri, ResourceError> {
    let invalid = |msg: &str| ResourceError::InvalidFormat(format!("data URI: {}", msg));

    let rest = uri
        .get(..5)
        .filter(|scheme| scheme.eq_ignore_ascii_case("data:"))
        .and_then(|_| uri.get(5..))
        .ok_or_else(|| invalid("missing 'data:' scheme"))?;
    let (header, payload) = rest.split_once(',').ok_or_else(|| invalid("missing ','"))?;

    let mut params = header.split(';');
    let mime = params.next().unwrap_or_default().trim();
    let is_base64 = params.any(|p| p.trim().eq_ignore_ascii_case("base64"));

    let data = if is_base64 {
        let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        STANDARD
            .decode(compact.as_bytes())
            .map_err(|e| invalid(&e.to_string()))?
    } else {
        percent_decode(payload)
    };

    Ok(DataUri {
        mime_type: if mime.is_empty() { "text/plain".to_string() } else { mime.to_string() },
        data,
    })
}

fn percent_decode(input: &str) -> Vec<u8> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 3 <= bytes.len() {
            let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
            if let Some(value) = hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                out.push(value);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_base64_payload() {
        let uri = parse_data_uri("data:image/png;base64,iVBORw0KGgo=").unwrap();
        assert_eq!(uri.mime_type, "image/png");
        assert_eq!(&uri.data[..4], &[0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn decodes_percent_payload() {
        let uri = parse_data_uri("data:,Hello%2C%20World").unwrap();
        assert_eq!(uri.mime_type, "text/plain");
        assert_eq!(uri.data, b"Hello, World");
        assert_eq!(parse_data_uri("data:,Hi%21").unwrap().data, b"Hi!");
    }

    #[test]
    fn rejects_malformed() {
        assert!(parse_data_uri("data:image/png;base64").is_err());
        assert!(parse_data_uri("data:image/png;base64,@@@").is_err());
        assert!(parse_data_uri("file:x").is_err());
    }
}
