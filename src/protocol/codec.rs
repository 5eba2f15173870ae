//! Frame encoding
//!
//! Request:  `u32 LE action | u32 LE length | UTF-8 JSON`
//! Response: `u32 LE status | u32 LE length | UTF-8 JSON`
//!
//! An absent payload is sent as length zero with no body.

use serde::Serialize;
use serde_json::Value;

use crate::core::error::{BotError, Result};
use crate::protocol::codes::{Action, StatusCode};

pub const HEADER_SIZE: usize = 8;

/// The 8-byte header shared by requests and responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Action code for requests, status code for responses
    pub code: u32,
    pub length: u32,
}

impl FrameHeader {
    pub fn to_bytes(self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[..4].copy_from_slice(&self.code.to_le_bytes());
        bytes[4..].copy_from_slice(&self.length.to_le_bytes());
        bytes
    }

    pub fn from_bytes(bytes: [u8; HEADER_SIZE]) -> Self {
        let [c0, c1, c2, c3, l0, l1, l2, l3] = bytes;
        Self {
            code: u32::from_le_bytes([c0, c1, c2, c3]),
            length: u32::from_le_bytes([l0, l1, l2, l3]),
        }
    }

    fn parse(bytes: &[u8]) -> Result<(Self, &[u8])> {
        if bytes.len() < HEADER_SIZE {
            return Err(BotError::InvalidField {
                field: "frame",
                value: format!("{} bytes is shorter than the header", bytes.len()),
            });
        }
        let (head, body) = bytes.split_at(HEADER_SIZE);
        let mut header = [0u8; HEADER_SIZE];
        header.copy_from_slice(head);
        let header = Self::from_bytes(header);
        if body.len() != header.length as usize {
            return Err(BotError::InvalidField {
                field: "frame",
                value: format!("declared {} body bytes, got {}", header.length, body.len()),
            });
        }
        Ok((header, body))
    }
}

fn frame(code: u32, body: &[u8]) -> Result<Vec<u8>> {
    let length = u32::try_from(body.len()).map_err(|_| BotError::InvalidField {
        field: "payload",
        value: format!("{} bytes exceeds the frame limit", body.len()),
    })?;
    let mut bytes = Vec::with_capacity(HEADER_SIZE + body.len());
    bytes.extend_from_slice(&FrameHeader { code, length }.to_bytes());
    bytes.extend_from_slice(body);
    Ok(bytes)
}

/// Encode a request frame
pub fn encode_request<T: Serialize + ?Sized>(action: Action, payload: Option<&T>) -> Result<Vec<u8>> {
    let body = match payload {
        Some(data) => serde_json::to_vec(data)?,
        None => Vec::new(),
    };
    frame(action.code(), &body)
}

/// Decode a complete request frame
pub fn decode_request(bytes: &[u8]) -> Result<(Action, Option<Value>)> {
    let (header, body) = FrameHeader::parse(bytes)?;
    let action = Action::from_code(header.code).ok_or_else(|| BotError::InvalidField {
        field: "action",
        value: header.code.to_string(),
    })?;
    Ok((action, decode_body(body)?))
}

/// Encode a response frame around raw payload bytes
pub fn encode_response(status: StatusCode, payload: &[u8]) -> Result<Vec<u8>> {
    frame(status.code(), payload)
}

/// Decode a complete response frame into status and raw payload
pub fn decode_response(bytes: &[u8]) -> Result<(StatusCode, Vec<u8>)> {
    let (header, body) = FrameHeader::parse(bytes)?;
    Ok((StatusCode::from_code(header.code), body.to_vec()))
}

/// JSON body, or None for an empty payload
pub fn decode_body(body: &[u8]) -> Result<Option<Value>> {
    if body.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_slice(body)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_layout() {
        let bytes = encode_request(Action::Login, Some(&json!({"name": "Boris"}))).unwrap();
        let body = br#"{"name":"Boris"}"#;

        assert_eq!(&bytes[..4], &1u32.to_le_bytes());
        assert_eq!(&bytes[4..8], &(body.len() as u32).to_le_bytes());
        assert_eq!(&bytes[8..], body);
    }

    #[test]
    fn test_empty_request() {
        let bytes = encode_request::<Value>(Action::Turn, None).unwrap();
        assert_eq!(bytes, vec![6, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(decode_request(&bytes).unwrap(), (Action::Turn, None));
    }

    #[test]
    fn test_length_counts_utf8_bytes() {
        let payload = json!({"name": "Ёжик"});
        let bytes = encode_request(Action::Login, Some(&payload)).unwrap();
        let header = FrameHeader::from_bytes(bytes[..8].try_into().unwrap());
        assert_eq!(header.length as usize, bytes.len() - HEADER_SIZE);
        assert!(header.length as usize > serde_json::to_string(&payload).unwrap().chars().count());
    }

    #[test]
    fn test_request_round_trip() {
        let payload = json!({"vehicle_id": 5, "target": {"x": -1, "y": 1, "z": 0}});
        let bytes = encode_request(Action::Shoot, Some(&payload)).unwrap();
        assert_eq!(decode_request(&bytes).unwrap(), (Action::Shoot, Some(payload)));
    }

    #[test]
    fn test_response_round_trip() {
        let payload = br#"{"error_message": "late"}"#;
        let bytes = encode_response(StatusCode::Timeout, payload).unwrap();
        let (status, body) = decode_response(&bytes).unwrap();
        assert_eq!(status, StatusCode::Timeout);
        assert_eq!(body, payload.to_vec());
    }

    #[test]
    fn test_truncated_frames_rejected() {
        assert!(decode_response(&[0, 0, 0]).is_err());
        let mut bytes = encode_response(StatusCode::Ok, b"{}").unwrap();
        bytes.pop();
        assert!(decode_response(&bytes).is_err());
    }

    #[test]
    fn test_unknown_action_rejected() {
        let bytes = FrameHeader { code: 77, length: 0 }.to_bytes();
        assert!(matches!(
            decode_request(&bytes),
            Err(BotError::InvalidField { field: "action", .. })
        ));
    }
}
