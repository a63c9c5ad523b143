use std::fmt;

/// CoAP message type (RFC 7252 §3), two bits on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Confirmable,
    NonConfirmable,
    Acknowledgement,
    Reset,
}

impl MessageKind {
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => MessageKind::Confirmable,
            1 => MessageKind::NonConfirmable,
            2 => MessageKind::Acknowledgement,
            _ => MessageKind::Reset,
        }
    }

    pub fn as_bits(&self) -> u8 {
        match self {
            MessageKind::Confirmable => 0,
            MessageKind::NonConfirmable => 1,
            MessageKind::Acknowledgement => 2,
            MessageKind::Reset => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Confirmable => "CON",
            MessageKind::NonConfirmable => "NON",
            MessageKind::Acknowledgement => "ACK",
            MessageKind::Reset => "RST",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CoAP code registry subset (RFC 7252 §12.1).
///
/// Codes are `class.detail` pairs packed into one byte:
/// class in the top three bits, detail in the bottom five.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageCode {
    Empty,

    Get,
    Post,
    Put,
    Delete,

    Content,

    BadRequest,
    NotFound,
    MethodNotAllowed,

    InternalServerError,
}

impl MessageCode {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(MessageCode::Empty),
            0x01 => Some(MessageCode::Get),
            0x02 => Some(MessageCode::Post),
            0x03 => Some(MessageCode::Put),
            0x04 => Some(MessageCode::Delete),
            0x45 => Some(MessageCode::Content),
            0x80 => Some(MessageCode::BadRequest),
            0x84 => Some(MessageCode::NotFound),
            0x85 => Some(MessageCode::MethodNotAllowed),
            0xA0 => Some(MessageCode::InternalServerError),
            _ => None,
        }
    }

    pub fn as_byte(&self) -> u8 {
        match self {
            MessageCode::Empty => 0x00,
            MessageCode::Get => 0x01,
            MessageCode::Post => 0x02,
            MessageCode::Put => 0x03,
            MessageCode::Delete => 0x04,
            MessageCode::Content => 0x45,
            MessageCode::BadRequest => 0x80,
            MessageCode::NotFound => 0x84,
            MessageCode::MethodNotAllowed => 0x85,
            MessageCode::InternalServerError => 0xA0,
        }
    }

    /// Request codes are class 0 with a non-zero detail.
    pub fn is_request(&self) -> bool {
        matches!(
            self,
            MessageCode::Get | MessageCode::Post | MessageCode::Put | MessageCode::Delete
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageCode::Empty => "0.00",
            MessageCode::Get => "0.01",
            MessageCode::Post => "0.02",
            MessageCode::Put => "0.03",
            MessageCode::Delete => "0.04",
            MessageCode::Content => "2.05",
            MessageCode::BadRequest => "4.00",
            MessageCode::NotFound => "4.04",
            MessageCode::MethodNotAllowed => "4.05",
            MessageCode::InternalServerError => "5.00",
        }
    }
}

impl fmt::Display for MessageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content-Format option values (RFC 7252 §12.3). The gateway only
/// ever emits `TextPlain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFormat {
    TextPlain,
    OctetStream,
    Json,
}

impl ContentFormat {
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0 => Some(ContentFormat::TextPlain),
            42 => Some(ContentFormat::OctetStream),
            50 => Some(ContentFormat::Json),
            _ => None,
        }
    }

    pub fn to_u16(self) -> u16 {
        match self {
            ContentFormat::TextPlain => 0,
            ContentFormat::OctetStream => 42,
            ContentFormat::Json => 50,
        }
    }
}

/// A decoded CoAP message. Wire-level option encoding lives in the
/// infrastructure codec; this type only carries the fields the
/// gateway acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoapMessage {
    pub kind: MessageKind,
    pub code: MessageCode,
    pub message_id: u16,
    pub token: Vec<u8>,
    pub uri_path: Vec<String>,
    pub content_format: Option<ContentFormat>,
    pub payload: Vec<u8>,
}

impl CoapMessage {
    pub fn is_confirmable(&self) -> bool {
        self.kind == MessageKind::Confirmable
    }

    /// Acknowledgement skeleton correlated to `self`: same message id
    /// and token, no options, no payload.
    pub fn acknowledgement(&self, code: MessageCode) -> CoapMessage {
        CoapMessage {
            kind: MessageKind::Acknowledgement,
            code,
            message_id: self.message_id,
            token: self.token.clone(),
            uri_path: Vec::new(),
            content_format: None,
            payload: Vec::new(),
        }
    }
}
