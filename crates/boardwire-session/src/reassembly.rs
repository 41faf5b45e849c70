use std::collections::HashMap;

use boardwire_frame::{ActionTag, Frame};
use bytes::{Bytes, BytesMut};

/// Fragment bodies of one in-flight record, in receipt order.
///
/// Receipt order equals index order because the transport is a lossless,
/// in-order byte stream; this table does not reorder.
#[derive(Debug)]
struct PendingRecord {
    tag: ActionTag,
    bodies: Vec<Bytes>,
}

/// Buffers multi-fragment records keyed by correlation id until their
/// terminal fragment arrives.
#[derive(Debug, Default)]
pub struct Reassembly {
    pending: HashMap<i64, PendingRecord>,
}

impl Reassembly {
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb one frame. Returns the completed `(tag, body)` record when
    /// this frame finishes one, `None` while the record is still in flight.
    ///
    /// Single-fragment frames bypass buffering entirely.
    pub fn push(&mut self, tag: ActionTag, frame: Frame) -> Option<(ActionTag, Bytes)> {
        if frame.count == 1 {
            return Some((tag, frame.body));
        }

        let mut record = self
            .pending
            .remove(&frame.correlation)
            .unwrap_or_else(|| PendingRecord {
                tag,
                bodies: Vec::with_capacity(frame.count as usize),
            });
        let terminal = frame.is_terminal();
        record.bodies.push(frame.body);

        if !terminal {
            self.pending.insert(frame.correlation, record);
            return None;
        }

        let total: usize = record.bodies.iter().map(Bytes::len).sum();
        let mut body = BytesMut::with_capacity(total);
        for fragment in &record.bodies {
            body.extend_from_slice(fragment);
        }
        Some((record.tag, body.freeze()))
    }

    /// Records currently in flight.
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    /// Discard every pending record. Called on connection teardown so a
    /// partial record can never reach dispatch.
    pub fn clear(&mut self) {
        if !self.pending.is_empty() {
            tracing::debug!(
                discarded = self.pending.len(),
                "dropping in-flight records on teardown"
            );
        }
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(tag: ActionTag, correlation: i64, index: u32, count: u32, body: &[u8]) -> Frame {
        Frame {
            tag: tag.raw(),
            index,
            count,
            correlation,
            body: Bytes::copy_from_slice(body),
        }
    }

    #[test]
    fn single_fragment_bypasses_buffering() {
        let mut table = Reassembly::new();
        let done = table.push(ActionTag::Line, frame(ActionTag::Line, 1, 0, 1, b"abc"));
        assert_eq!(done, Some((ActionTag::Line, Bytes::from_static(b"abc"))));
        assert_eq!(table.in_flight(), 0);
    }

    #[test]
    fn empty_sentinel_passes_through() {
        let mut table = Reassembly::new();
        let done = table.push(ActionTag::GetBoards, frame(ActionTag::GetBoards, 2, 0, 1, b""));
        assert_eq!(done, Some((ActionTag::GetBoards, Bytes::new())));
    }

    #[test]
    fn fragments_concatenate_on_terminal() {
        let mut table = Reassembly::new();
        assert!(table
            .push(ActionTag::Image, frame(ActionTag::Image, 3, 0, 3, b"aa"))
            .is_none());
        assert!(table
            .push(ActionTag::Image, frame(ActionTag::Image, 3, 1, 3, b"bb"))
            .is_none());
        assert_eq!(table.in_flight(), 1);

        let (tag, body) = table
            .push(ActionTag::Image, frame(ActionTag::Image, 3, 2, 3, b"cc"))
            .unwrap();
        assert_eq!(tag, ActionTag::Image);
        assert_eq!(body.as_ref(), b"aabbcc");
        assert_eq!(table.in_flight(), 0);
    }

    #[test]
    fn interleaved_correlations_reassemble_independently() {
        let mut table = Reassembly::new();
        table.push(ActionTag::Image, frame(ActionTag::Image, 10, 0, 2, b"i0"));
        table.push(ActionTag::Text, frame(ActionTag::Text, 11, 0, 2, b"t0"));
        assert_eq!(table.in_flight(), 2);

        let image = table
            .push(ActionTag::Image, frame(ActionTag::Image, 10, 1, 2, b"i1"))
            .unwrap();
        let text = table
            .push(ActionTag::Text, frame(ActionTag::Text, 11, 1, 2, b"t1"))
            .unwrap();

        assert_eq!(image, (ActionTag::Image, Bytes::from_static(b"i0i1")));
        assert_eq!(text, (ActionTag::Text, Bytes::from_static(b"t0t1")));
    }

    #[test]
    fn clear_discards_partials() {
        let mut table = Reassembly::new();
        table.push(ActionTag::Image, frame(ActionTag::Image, 20, 0, 4, b"xx"));
        assert_eq!(table.in_flight(), 1);

        table.clear();
        assert_eq!(table.in_flight(), 0);

        // A fresh record under the same correlation starts from nothing.
        assert!(table
            .push(ActionTag::Image, frame(ActionTag::Image, 20, 0, 2, b"yy"))
            .is_none());
        let (_, body) = table
            .push(ActionTag::Image, frame(ActionTag::Image, 20, 1, 2, b"zz"))
            .unwrap();
        assert_eq!(body.as_ref(), b"yyzz");
    }
}
