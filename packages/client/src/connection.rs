//! WebSocket plumbing shared by the viewer and the operator.

use futures_util::{
    SinkExt, StreamExt,
    stream::{SplitSink, SplitStream},
};
use marionette_server::infrastructure::dto::websocket::{ClientMessage, ServerMessage};
use tokio::net::TcpStream;
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};

use crate::error::ClientError;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
pub type FrameWriter = SplitSink<WsStream, Message>;
pub type FrameReader = SplitStream<WsStream>;

pub async fn connect(url: &str) -> Result<(FrameWriter, FrameReader), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    Ok(ws_stream.split())
}

pub async fn send_frame(writer: &mut FrameWriter, frame: &ClientMessage) -> Result<(), ClientError> {
    let json = frame.to_json()?;
    writer
        .send(Message::Text(json.into()))
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))
}

/// Wait for the next server frame
///
/// Unparseable text frames are logged and skipped. A close frame, a read
/// error or the end of the stream is reported as a lost connection.
pub async fn next_frame(reader: &mut FrameReader) -> Result<ServerMessage, ClientError> {
    while let Some(message) = reader.next().await {
        match message {
            Ok(Message::Text(text)) => match serde_json::from_str::<ServerMessage>(&text) {
                Ok(frame) => return Ok(frame),
                Err(e) => tracing::warn!("Ignoring unparseable frame: {}", e),
            },
            Ok(Message::Close(_)) => {
                tracing::info!("Server closed the connection");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("WebSocket read error: {}", e);
                break;
            }
        }
    }
    Err(ClientError::ConnectionError("Connection lost".to_string()))
}
