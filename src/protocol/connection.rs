//! Request/response client for the game server
//!
//! One request is written, then the full response is awaited before the call
//! returns. Nothing is pipelined.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::core::error::{BotError, Result};
use crate::model::UnitAction;
use crate::protocol::codec::{decode_body, encode_request, FrameHeader, HEADER_SIZE};
use crate::protocol::codes::{Action, StatusCode};
use crate::protocol::messages::{ChatRequest, GameActions, LoginRequest, LoginResponse};

/// Largest single read while collecting a response body
pub const BUFFER_SIZE: usize = 8192;

/// Client side of one server session
pub struct Connection<S> {
    stream: S,
}

impl Connection<TcpStream> {
    /// Open a TCP connection to the server
    pub async fn connect(host: &str, port: u16) -> Result<Self> {
        let stream = TcpStream::connect((host, port)).await?;
        stream.set_nodelay(true)?;
        tracing::info!("Connected to {}:{}", host, port);
        Ok(Self::new(stream))
    }
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S) -> Self {
        Self { stream }
    }

    /// Send one request and wait for its response
    ///
    /// Returns None when the server answered with an empty body.
    pub async fn send<T: Serialize + ?Sized>(
        &mut self,
        action: Action,
        payload: Option<&T>,
    ) -> Result<Option<Value>> {
        let frame = encode_request(action, payload)?;
        tracing::trace!("-> {:?} ({} bytes)", action, frame.len());
        self.stream.write_all(&frame).await?;
        self.stream.flush().await?;

        let body = self.receive().await?;
        tracing::trace!("<- {:?} ({} bytes)", action, body.len());
        decode_body(&body)
    }

    /// Send a request whose response must be a non-empty `R`
    pub async fn request<T, R>(&mut self, action: Action, payload: Option<&T>) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let value = self
            .send(action, payload)
            .await?
            .ok_or(BotError::EmptyResponse(action))?;
        Ok(serde_json::from_value(value)?)
    }

    /// Read one response frame, collecting the body until its declared length
    async fn receive(&mut self) -> Result<Vec<u8>> {
        let mut header = [0u8; HEADER_SIZE];
        self.stream.read_exact(&mut header).await?;
        let header = FrameHeader::from_bytes(header);
        let status = StatusCode::from_code(header.code);
        let length = header.length as usize;

        // the declared length is untrusted, grow as bytes arrive
        let mut payload = Vec::with_capacity(length.min(BUFFER_SIZE));
        let mut chunk = vec![0u8; BUFFER_SIZE.min(length.max(1))];
        while payload.len() < length {
            let wanted = (length - payload.len()).min(chunk.len());
            let read = self.stream.read(&mut chunk[..wanted]).await?;
            if read == 0 {
                if !status.is_ok() {
                    return Err(BotError::Protocol { status, payload });
                }
                return Err(BotError::Transport(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    format!(
                        "connection closed after {} of {} payload bytes",
                        payload.len(),
                        length
                    ),
                )));
            }
            payload.extend_from_slice(&chunk[..read]);
        }

        if !status.is_ok() {
            return Err(BotError::Protocol { status, payload });
        }
        Ok(payload)
    }

    pub async fn login(&mut self, request: &LoginRequest) -> Result<LoginResponse> {
        self.request(Action::Login, Some(request)).await
    }

    pub async fn logout(&mut self) -> Result<()> {
        self.send::<Value>(Action::Logout, None).await?;
        Ok(())
    }

    /// Raw MAP payload
    pub async fn map(&mut self) -> Result<Value> {
        self.request::<Value, Value>(Action::Map, None).await
    }

    /// Raw GAME_STATE payload
    pub async fn game_state(&mut self) -> Result<Value> {
        self.request::<Value, Value>(Action::GameState, None).await
    }

    pub async fn game_actions(&mut self) -> Result<GameActions> {
        self.request::<Value, GameActions>(Action::GameActions, None).await
    }

    /// End the current turn; the server answers once the turn is over
    pub async fn turn(&mut self) -> Result<()> {
        self.send::<Value>(Action::Turn, None).await?;
        Ok(())
    }

    pub async fn chat(&mut self, message: &str) -> Result<()> {
        let request = ChatRequest {
            message: message.to_string(),
        };
        self.send(Action::Chat, Some(&request)).await?;
        Ok(())
    }

    /// Send one MOVE or SHOOT
    pub async fn submit(&mut self, action: &UnitAction) -> Result<()> {
        self.send(action.protocol_action(), Some(&action.payload())).await?;
        Ok(())
    }

    /// Shut down the write half; the server sees end of stream
    pub async fn close(&mut self) -> Result<()> {
        self.stream.shutdown().await?;
        Ok(())
    }
}
