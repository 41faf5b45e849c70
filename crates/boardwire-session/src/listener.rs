use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};

use boardwire_frame::{ActionTag, FrameReader, FrameWriter};
use bytes::Bytes;

use crate::correlation::CorrelationSource;
use crate::error::Result;
use crate::reassembly::Reassembly;

/// Accepts connections for the server side of the protocol.
pub struct Listener {
    inner: TcpListener,
}

impl Listener {
    pub fn bind(addr: impl ToSocketAddrs) -> Result<Self> {
        let inner = TcpListener::bind(addr)?;
        Ok(Self { inner })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.inner.local_addr()?)
    }

    /// Block until the next peer connects.
    pub fn accept(&self) -> Result<Connection> {
        let (stream, peer) = self.inner.accept()?;
        stream.set_nodelay(true)?;
        let reader = FrameReader::new(stream.try_clone()?);
        let writer = FrameWriter::new(stream);
        tracing::debug!(%peer, "peer connected");

        Ok(Connection {
            reader,
            writer,
            reassembly: Reassembly::new(),
            correlation: CorrelationSource::new(),
            peer,
        })
    }
}

/// One accepted peer: blocking record-oriented reads and fragmenting writes
/// over the same codec the client uses.
pub struct Connection {
    reader: FrameReader<TcpStream>,
    writer: FrameWriter<TcpStream>,
    reassembly: Reassembly,
    correlation: CorrelationSource,
    peer: SocketAddr,
}

impl Connection {
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    /// Block until one complete record arrives.
    ///
    /// Frames with unknown tags are logged and skipped; fragments buffer
    /// until their terminal fragment lands.
    pub fn recv_record(&mut self) -> Result<(ActionTag, Bytes)> {
        loop {
            let frame = self.reader.read_frame()?;
            let Some(tag) = frame.action() else {
                tracing::warn!(peer = %self.peer, tag = frame.tag, "dropping unknown action tag");
                continue;
            };
            if let Some(record) = self.reassembly.push(tag, frame) {
                return Ok(record);
            }
        }
    }

    /// Fragment and send one record.
    pub fn send_record(&mut self, tag: ActionTag, body: &[u8]) -> Result<u32> {
        let correlation = self.correlation.next();
        Ok(self.writer.send_record(tag, correlation, body)?)
    }

    /// Send one descriptor-like record positioned within a batch response.
    /// `index`/`count` are batch coordinates; each body is one complete
    /// record, so it must fit a single frame.
    pub fn send_batch_item(
        &mut self,
        tag: ActionTag,
        index: u32,
        count: u32,
        body: &[u8],
    ) -> Result<()> {
        let correlation = self.correlation.next();
        let frame = boardwire_frame::Frame {
            tag: tag.raw(),
            index,
            count,
            correlation,
            body: Bytes::copy_from_slice(body),
        };
        Ok(self.writer.write_frame(&frame)?)
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("peer", &self.peer)
            .field("in_flight", &self.reassembly.in_flight())
            .finish()
    }
}
