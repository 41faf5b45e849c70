use std::io::{ErrorKind, Read};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};

use boardwire_frame::{ActionTag, FrameWriter, StreamDecoder};
use boardwire_record::{
    BoardDescriptor, BoardId, Credentials, Image, Line, PointsSet, Record, Text,
};

use crate::correlation::CorrelationSource;
use crate::dispatch::Dispatcher;
use crate::error::{Result, SessionError};
use crate::events::{BoardEvents, ConnectionEvent};

const READ_CHUNK_SIZE: usize = 4 * 1024;

/// Lifecycle of the one logical stream a client owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    /// We initiated the close; the peer's EOF is sanctioned.
    Closing,
}

/// Client-side connection controller.
///
/// Owns the socket, the incremental stream decoder and the reassembly-backed
/// dispatcher. All protocol state is driven from [`poll`](Self::poll) on one
/// thread; sending is fire-and-forget with no protocol-level backpressure
/// beyond the transport's own write buffering.
pub struct Client {
    stream: TcpStream,
    writer: FrameWriter<TcpStream>,
    decoder: StreamDecoder,
    dispatcher: Dispatcher,
    correlation: CorrelationSource,
    state: ConnectionState,
}

impl Client {
    /// Open the transport. The `Connected` event surfaces on the first
    /// [`poll`](Self::poll) after the connection is up.
    pub fn connect(addr: impl ToSocketAddrs) -> Result<Self> {
        let stream = TcpStream::connect(addr)?;
        stream.set_nodelay(true)?;
        stream.set_nonblocking(true)?;
        let writer = FrameWriter::new(stream.try_clone()?);

        Ok(Self {
            stream,
            writer,
            decoder: StreamDecoder::new(),
            dispatcher: Dispatcher::new(),
            correlation: CorrelationSource::new(),
            state: ConnectionState::Connecting,
        })
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        matches!(
            self.state,
            ConnectionState::Connecting | ConnectionState::Connected
        )
    }

    /// Drain whatever the transport has buffered, without blocking past
    /// available data, and dispatch every record that completes.
    ///
    /// One call may deliver many records, or none. Callbacks run on the
    /// calling thread.
    pub fn poll<E: BoardEvents>(&mut self, events: &mut E) -> Result<()> {
        match self.state {
            ConnectionState::Disconnected => return Ok(()),
            ConnectionState::Connecting => {
                self.state = ConnectionState::Connected;
                events.connection_event(ConnectionEvent::Connected);
            }
            ConnectionState::Connected | ConnectionState::Closing => {}
        }

        let mut chunk = [0u8; READ_CHUNK_SIZE];
        loop {
            match self.stream.read(&mut chunk) {
                Ok(0) => {
                    let sanctioned = self.state == ConnectionState::Closing;
                    self.teardown();
                    if !sanctioned {
                        events.connection_event(ConnectionEvent::ErrorOccurred);
                    }
                    events.connection_event(ConnectionEvent::Disconnected);
                    return Ok(());
                }
                Ok(read) => {
                    self.decoder.extend(&chunk[..read]);
                    self.drain_frames(events)?;
                }
                Err(err) if err.kind() == ErrorKind::WouldBlock => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => {
                    let sanctioned = self.state == ConnectionState::Closing;
                    self.teardown();
                    if sanctioned {
                        events.connection_event(ConnectionEvent::Disconnected);
                        return Ok(());
                    }
                    events.connection_event(ConnectionEvent::ErrorOccurred);
                    events.connection_event(ConnectionEvent::Disconnected);
                    return Err(err.into());
                }
            }
        }
    }

    fn drain_frames<E: BoardEvents>(&mut self, events: &mut E) -> Result<()> {
        loop {
            match self.decoder.next_frame() {
                Ok(Some(frame)) => {
                    if let Err(err) = self.dispatcher.handle_frame(frame, events) {
                        self.fail(events);
                        return Err(err);
                    }
                }
                Ok(None) => return Ok(()),
                // Framing is gone; the stream cannot be resynchronized.
                Err(err) => {
                    self.fail(events);
                    return Err(err.into());
                }
            }
        }
    }

    fn fail<E: BoardEvents>(&mut self, events: &mut E) {
        self.teardown();
        events.connection_event(ConnectionEvent::ErrorOccurred);
        events.connection_event(ConnectionEvent::Disconnected);
    }

    fn teardown(&mut self) {
        let _ = self.stream.shutdown(Shutdown::Both);
        self.dispatcher.abort();
        self.decoder.reset();
        self.state = ConnectionState::Disconnected;
    }

    /// Initiate a clean close. The peer's EOF arrives through
    /// [`poll`](Self::poll) as `Disconnected`, without `ErrorOccurred`.
    pub fn disconnect(&mut self) {
        if self.state == ConnectionState::Disconnected {
            return;
        }
        self.state = ConnectionState::Closing;
        let _ = self.stream.shutdown(Shutdown::Write);
    }

    /// Fragment and send one record.
    pub fn send(&mut self, tag: ActionTag, body: &[u8]) -> Result<()> {
        if !self.is_connected() {
            return Err(SessionError::NotConnected);
        }
        let correlation = self.correlation.next();
        self.writer.send_record(tag, correlation, body)?;
        Ok(())
    }

    fn send_encoded<R: Record>(&mut self, tag: ActionTag, record: &R) -> Result<()> {
        let body = record.to_body()?;
        self.send(tag, &body)
    }

    pub fn log_in(&mut self, username: &str, password: &str) -> Result<()> {
        self.send_encoded(ActionTag::LogIn, &Credentials::new(username, password))
    }

    pub fn register(&mut self, username: &str, password: &str) -> Result<()> {
        self.send_encoded(ActionTag::Register, &Credentials::new(username, password))
    }

    pub fn send_points_set(&mut self, points_set: &PointsSet) -> Result<()> {
        self.send_encoded(ActionTag::PointsSet, points_set)
    }

    pub fn send_line(&mut self, line: &Line) -> Result<()> {
        self.send_encoded(ActionTag::Line, line)
    }

    pub fn send_text(&mut self, text: &Text) -> Result<()> {
        self.send_encoded(ActionTag::Text, text)
    }

    pub fn send_image(&mut self, image: &Image) -> Result<()> {
        self.send_encoded(ActionTag::Image, image)
    }

    pub fn send_undo(&mut self) -> Result<()> {
        self.send(ActionTag::Undo, b"")
    }

    pub fn send_clear(&mut self) -> Result<()> {
        self.send(ActionTag::Clear, b"")
    }

    pub fn create_board(&mut self, board: &BoardDescriptor) -> Result<()> {
        self.send_encoded(ActionTag::CreateBoard, board)
    }

    pub fn get_board(&mut self, id: i32) -> Result<()> {
        self.send_encoded(ActionTag::GetBoard, &BoardId(id))
    }

    pub fn get_boards(&mut self) -> Result<()> {
        self.send(ActionTag::GetBoards, b"")
    }

    pub fn delete_board(&mut self, id: i32) -> Result<()> {
        self.send_encoded(ActionTag::DeleteBoard, &BoardId(id))
    }

    pub fn select_board(&mut self, id: i32) -> Result<()> {
        self.send_encoded(ActionTag::SelectBoard, &BoardId(id))
    }

    pub fn get_board_elements(&mut self) -> Result<()> {
        self.send(ActionTag::GetBoardElements, b"")
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("state", &self.state)
            .field("in_flight", &self.dispatcher.in_flight())
            .finish()
    }
}
