//! CoAP wire codec (RFC 7252 §3).
//!
//! Message layout: a fixed 4-byte header (version, type, token
//! length, code, message id), the token, a delta-encoded option
//! list, and an optional `0xFF`-marked payload. Only the options the
//! gateway acts on are decoded (Uri-Path, Content-Format); unknown
//! options are skipped by length.

use coap_gateway_domain::{CoapMessage, ContentFormat, DomainError, MessageCode, MessageKind};

const COAP_VERSION: u8 = 1;
const MAX_TOKEN_LEN: usize = 8;
const PAYLOAD_MARKER: u8 = 0xFF;

const OPTION_URI_PATH: u16 = 11;
const OPTION_CONTENT_FORMAT: u16 = 12;

fn invalid(detail: impl Into<String>) -> DomainError {
    DomainError::InvalidCoapMessage(detail.into())
}

/// Decode one datagram into a `CoapMessage`.
pub fn decode(buf: &[u8]) -> Result<CoapMessage, DomainError> {
    if buf.len() < 4 {
        return Err(invalid("datagram shorter than the 4-byte header"));
    }

    let version = buf[0] >> 6;
    if version != COAP_VERSION {
        return Err(invalid(format!("unsupported version {}", version)));
    }

    let kind = MessageKind::from_bits(buf[0] >> 4);
    let token_len = (buf[0] & 0x0F) as usize;
    if token_len > MAX_TOKEN_LEN {
        return Err(invalid(format!("token length {} exceeds 8", token_len)));
    }

    let code = MessageCode::from_byte(buf[1])
        .ok_or_else(|| invalid(format!("unknown code 0x{:02X}", buf[1])))?;
    let message_id = u16::from_be_bytes([buf[2], buf[3]]);

    let mut pos = 4;
    if pos + token_len > buf.len() {
        return Err(invalid("token truncated"));
    }
    let token = buf[pos..pos + token_len].to_vec();
    pos += token_len;

    let mut option_number: u16 = 0;
    let mut uri_path = Vec::new();
    let mut content_format = None;
    let mut payload = Vec::new();

    while pos < buf.len() {
        if buf[pos] == PAYLOAD_MARKER {
            pos += 1;
            if pos >= buf.len() {
                return Err(invalid("payload marker with empty payload"));
            }
            payload = buf[pos..].to_vec();
            break;
        }

        let delta_nibble = buf[pos] >> 4;
        let len_nibble = buf[pos] & 0x0F;
        pos += 1;

        let (delta, consumed) = read_extended(buf, pos, delta_nibble)?;
        pos += consumed;
        let (value_len, consumed) = read_extended(buf, pos, len_nibble)?;
        pos += consumed;
        let value_len = value_len as usize;

        option_number = option_number
            .checked_add(delta)
            .ok_or_else(|| invalid("option number overflow"))?;

        if pos + value_len > buf.len() {
            return Err(invalid("option value truncated"));
        }
        let value = &buf[pos..pos + value_len];
        pos += value_len;

        match option_number {
            OPTION_URI_PATH => {
                uri_path.push(String::from_utf8_lossy(value).into_owned());
            }
            OPTION_CONTENT_FORMAT if value.len() <= 2 => {
                content_format = ContentFormat::from_u16(decode_uint(value));
            }
            _ => {}
        }
    }

    Ok(CoapMessage {
        kind,
        code,
        message_id,
        token,
        uri_path,
        content_format,
        payload,
    })
}

/// Encode a `CoapMessage` into wire format.
pub fn encode(message: &CoapMessage) -> Vec<u8> {
    let mut out = Vec::with_capacity(16 + message.payload.len());

    let token_len = message.token.len().min(MAX_TOKEN_LEN) as u8;
    out.push((COAP_VERSION << 6) | (message.kind.as_bits() << 4) | token_len);
    out.push(message.code.as_byte());
    out.extend_from_slice(&message.message_id.to_be_bytes());
    out.extend_from_slice(&message.token[..token_len as usize]);

    let mut last_number: u16 = 0;
    for segment in &message.uri_path {
        emit_option(
            &mut out,
            OPTION_URI_PATH - last_number,
            segment.as_bytes(),
        );
        last_number = OPTION_URI_PATH;
    }
    if let Some(format) = message.content_format {
        let value = encode_uint(format.to_u16());
        emit_option(&mut out, OPTION_CONTENT_FORMAT - last_number, &value);
    }

    if !message.payload.is_empty() {
        out.push(PAYLOAD_MARKER);
        out.extend_from_slice(&message.payload);
    }

    out
}

/// Resolve a 4-bit delta/length nibble against its extended bytes.
/// Returns the decoded value and how many bytes were consumed.
fn read_extended(buf: &[u8], pos: usize, nibble: u8) -> Result<(u16, usize), DomainError> {
    match nibble {
        0..=12 => Ok((nibble as u16, 0)),
        13 => {
            let byte = *buf.get(pos).ok_or_else(|| invalid("truncated option header"))?;
            Ok((byte as u16 + 13, 1))
        }
        14 => {
            if pos + 2 > buf.len() {
                return Err(invalid("truncated option header"));
            }
            let value = u16::from_be_bytes([buf[pos], buf[pos + 1]]);
            value
                .checked_add(269)
                .map(|v| (v, 2))
                .ok_or_else(|| invalid("option delta out of range"))
        }
        _ => Err(invalid("reserved option nibble 15")),
    }
}

fn emit_option(out: &mut Vec<u8>, delta: u16, value: &[u8]) {
    let (delta_nibble, delta_ext) = split_nibble(delta);
    let (len_nibble, len_ext) = split_nibble(value.len() as u16);

    out.push((delta_nibble << 4) | len_nibble);
    out.extend_from_slice(&delta_ext);
    out.extend_from_slice(&len_ext);
    out.extend_from_slice(value);
}

fn split_nibble(value: u16) -> (u8, Vec<u8>) {
    if value <= 12 {
        (value as u8, vec![])
    } else if value <= 268 {
        (13, vec![(value - 13) as u8])
    } else {
        (14, (value - 269).to_be_bytes().to_vec())
    }
}

/// CoAP uint option values are big-endian with leading zeros elided.
fn decode_uint(value: &[u8]) -> u16 {
    value.iter().fold(0u16, |acc, &b| (acc << 8) | b as u16)
}

fn encode_uint(value: u16) -> Vec<u8> {
    if value == 0 {
        vec![]
    } else if value < 256 {
        vec![value as u8]
    } else {
        value.to_be_bytes().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_request() -> CoapMessage {
        CoapMessage {
            kind: MessageKind::Confirmable,
            code: MessageCode::Get,
            message_id: 0x1234,
            token: vec![0xAB, 0xCD],
            uri_path: vec!["ip".to_string()],
            content_format: None,
            payload: b"example.com".to_vec(),
        }
    }

    #[test]
    fn test_round_trip_request() {
        let wire = encode(&lookup_request());
        let decoded = decode(&wire).unwrap();
        assert_eq!(decoded, lookup_request());
    }

    #[test]
    fn test_decode_known_bytes() {
        // CON GET, id 0x0001, token AB, Uri-Path "ip", payload "x"
        let wire = [
            0x41, 0x01, 0x00, 0x01, // header, TKL=1
            0xAB, // token
            0xB2, b'i', b'p', // option 11, len 2
            0xFF, b'x',
        ];
        let msg = decode(&wire).unwrap();
        assert_eq!(msg.kind, MessageKind::Confirmable);
        assert_eq!(msg.code, MessageCode::Get);
        assert_eq!(msg.message_id, 1);
        assert_eq!(msg.token, vec![0xAB]);
        assert_eq!(msg.uri_path, vec!["ip".to_string()]);
        assert_eq!(msg.payload, b"x");
    }

    #[test]
    fn test_encode_ack_with_content_format() {
        let ack = CoapMessage {
            kind: MessageKind::Acknowledgement,
            code: MessageCode::Content,
            message_id: 0x1234,
            token: vec![0xAB],
            uri_path: vec![],
            content_format: Some(ContentFormat::TextPlain),
            payload: b"93.184.216.34".to_vec(),
        };
        let wire = encode(&ack);

        // 0x61: version 1, ACK, TKL 1; code 2.05
        assert_eq!(wire[0], 0x61);
        assert_eq!(wire[1], 0x45);
        assert_eq!(&wire[2..4], &[0x12, 0x34]);
        assert_eq!(wire[4], 0xAB);
        // Content-Format 0 (text/plain): delta 12, zero-length value
        assert_eq!(wire[5], 0xC0);
        assert_eq!(wire[6], PAYLOAD_MARKER);
        assert_eq!(&wire[7..], b"93.184.216.34");

        assert_eq!(decode(&wire).unwrap(), ack);
    }

    #[test]
    fn test_empty_payload_has_no_marker() {
        let mut msg = lookup_request();
        msg.payload.clear();
        let wire = encode(&msg);
        assert!(!wire.contains(&PAYLOAD_MARKER));
        assert_eq!(decode(&wire).unwrap(), msg);
    }

    #[test]
    fn test_multi_segment_path() {
        let mut msg = lookup_request();
        msg.uri_path = vec!["a".to_string(), "b".to_string()];
        let decoded = decode(&encode(&msg)).unwrap();
        assert_eq!(decoded.uri_path, msg.uri_path);
    }

    #[test]
    fn test_long_option_value_uses_extended_length() {
        let mut msg = lookup_request();
        msg.uri_path = vec!["x".repeat(40)];
        let decoded = decode(&encode(&msg)).unwrap();
        assert_eq!(decoded.uri_path, msg.uri_path);
    }

    #[test]
    fn test_unknown_options_are_skipped() {
        // Uri-Port (7) then Uri-Path (11): delta 7 len 1, delta 4 len 2
        let wire = [
            0x40, 0x01, 0x00, 0x02, // CON GET, TKL 0
            0x71, 0x16, // Uri-Port 22
            0x42, b'i', b'p',
        ];
        let msg = decode(&wire).unwrap();
        assert_eq!(msg.uri_path, vec!["ip".to_string()]);
    }

    #[test]
    fn test_truncated_datagrams_rejected() {
        assert!(decode(&[]).is_err());
        assert!(decode(&[0x40, 0x01, 0x00]).is_err());
        // TKL says 2, only 1 token byte present
        assert!(decode(&[0x42, 0x01, 0x00, 0x01, 0xAB]).is_err());
        // marker with nothing after it
        assert!(decode(&[0x40, 0x01, 0x00, 0x01, 0xFF]).is_err());
    }

    #[test]
    fn test_bad_version_rejected() {
        assert!(decode(&[0x80, 0x01, 0x00, 0x01]).is_err());
    }

    #[test]
    fn test_reserved_token_length_rejected() {
        assert!(decode(&[0x49, 0x01, 0x00, 0x01]).is_err());
    }

    #[test]
    fn test_reserved_option_nibble_rejected() {
        assert!(decode(&[0x40, 0x01, 0x00, 0x01, 0xF1, 0x00]).is_err());
    }
}
