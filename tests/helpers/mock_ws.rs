//! A scripted WebSocketConnection for driving the watch loop in tests.
use async_trait::async_trait;
use ctwatch::network::WebSocketConnection;
use std::collections::VecDeque;
use tokio_tungstenite::tungstenite::{Error, Message};

/// Replays a fixed list of frames, then reports the connection as closed.
pub struct ScriptedWebSocket {
    messages: VecDeque<Result<Message, Error>>,
}

impl ScriptedWebSocket {
    pub fn new() -> Self {
        Self {
            messages: VecDeque::new(),
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        let text: String = text.into();
        self.messages.push_back(Ok(Message::Text(text.into())));
        self
    }

    pub fn ping(mut self) -> Self {
        self.messages.push_back(Ok(Message::Ping(Default::default())));
        self
    }

    pub fn error(mut self, error: Error) -> Self {
        self.messages.push_back(Err(error));
        self
    }

    pub fn boxed(self) -> Box<dyn WebSocketConnection> {
        Box::new(self)
    }
}

#[async_trait]
impl WebSocketConnection for ScriptedWebSocket {
    async fn read_message(&mut self) -> Option<Result<Message, Error>> {
        self.messages.pop_front()
    }
}
