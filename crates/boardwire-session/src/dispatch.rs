use boardwire_frame::{ActionTag, Frame};
use boardwire_record::{BoardDescriptor, Image, Line, PointsSet, Record, Text};
use bytes::Bytes;

use crate::error::Result;
use crate::events::{BoardEvents, ConnectionEvent};
use crate::reassembly::Reassembly;

/// Routes incoming frames through reassembly and completed records to the
/// matching [`BoardEvents`] callback.
#[derive(Debug, Default)]
pub struct Dispatcher {
    reassembly: Reassembly,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb one decoded frame.
    ///
    /// Batch-style responses (board listings) bypass reassembly: each frame
    /// is one complete record and its index/count locate it within the
    /// batch, not within a fragmented record.
    pub fn handle_frame<E: BoardEvents>(&mut self, frame: Frame, events: &mut E) -> Result<()> {
        let Some(tag) = frame.action() else {
            tracing::warn!(tag = frame.tag, "dropping frame with unknown action tag");
            return Ok(());
        };

        if tag.is_batch() {
            return self.handle_batch(frame, events);
        }

        if let Some((tag, body)) = self.reassembly.push(tag, frame) {
            self.route(tag, body, events)?;
        }
        Ok(())
    }

    fn handle_batch<E: BoardEvents>(&mut self, frame: Frame, events: &mut E) -> Result<()> {
        // Empty single frame on a batch action: the "no data" sentinel.
        if frame.count == 1 && frame.body.is_empty() {
            events.no_boards();
            return Ok(());
        }
        let last_of_batch = frame.is_terminal();
        let board = BoardDescriptor::decode(&frame.body)?;
        events.board_received(board, last_of_batch);
        Ok(())
    }

    fn route<E: BoardEvents>(&mut self, tag: ActionTag, body: Bytes, events: &mut E) -> Result<()> {
        tracing::trace!(%tag, len = body.len(), "record completed");
        match tag {
            ActionTag::Error => events.connection_event(ConnectionEvent::ErrorOccurred),
            ActionTag::LogIn => events.log_in_result(!body.is_empty()),
            ActionTag::Register => events.register_result(!body.is_empty()),
            ActionTag::CreateBoard => events.create_board_result(!body.is_empty()),
            ActionTag::DeleteBoard => events.delete_board_result(!body.is_empty()),
            ActionTag::GetBoard => {
                if body.is_empty() {
                    events.no_boards();
                } else {
                    events.board_received(BoardDescriptor::decode(&body)?, true);
                }
            }
            ActionTag::PointsSet => events.points_set_received(PointsSet::decode(&body)?),
            ActionTag::Line => events.line_received(Line::decode(&body)?),
            ActionTag::Text => events.text_received(Text::decode(&body)?),
            ActionTag::Image => events.image_received(Image::decode(&body)?),
            ActionTag::Undo => events.undo_received(),
            ActionTag::Clear => events.clear_received(),
            ActionTag::GetBoardElements => events.board_elements_finished(),
            ActionTag::Shutdown | ActionTag::SelectBoard | ActionTag::GetBoards => {
                // GetBoards is handled as a batch before reassembly; the
                // other two are client-to-server only.
                tracing::debug!(%tag, "ignoring unexpected record");
            }
        }
        Ok(())
    }

    /// Records currently mid-reassembly.
    pub fn in_flight(&self) -> usize {
        self.reassembly.in_flight()
    }

    /// Drop all in-flight records. A partial record must never be delivered.
    pub fn abort(&mut self) {
        self.reassembly.clear();
    }
}
