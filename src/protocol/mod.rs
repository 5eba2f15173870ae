//! Wire protocol: length-prefixed JSON frames over a byte stream

pub mod codec;
pub mod codes;
pub mod connection;
pub mod messages;

pub use codec::{decode_request, decode_response, encode_request, encode_response, FrameHeader};
pub use codes::{Action, StatusCode};
pub use connection::Connection;
pub use messages::{ChatRequest, GameActions, LoginRequest, LoginResponse, RecordedAction};
