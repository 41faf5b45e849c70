use boardwire_record::{BoardDescriptor, Image, Line, PointsSet, Text};

/// Connection lifecycle notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionEvent {
    Connected,
    Disconnected,
    /// Transport failure or a peer vanishing without a sanctioned close.
    ErrorOccurred,
}

/// Application callbacks for completed records.
///
/// This is the dispatch table: one method per action the server can push.
/// Handlers run synchronously on the thread that drained the stream and must
/// never block it. Every method defaults to a no-op so implementors bind
/// only the actions they care about.
#[allow(unused_variables)]
pub trait BoardEvents {
    fn connection_event(&mut self, event: ConnectionEvent) {}

    fn log_in_result(&mut self, successful: bool) {}
    fn register_result(&mut self, successful: bool) {}

    fn create_board_result(&mut self, successful: bool) {}
    /// One board of a listing. `last_of_batch` marks the final descriptor of
    /// this response; it is a batch-level signal, not fragment completion.
    fn board_received(&mut self, board: BoardDescriptor, last_of_batch: bool) {}
    fn no_boards(&mut self) {}
    fn delete_board_result(&mut self, successful: bool) {}

    fn points_set_received(&mut self, points_set: PointsSet) {}
    fn line_received(&mut self, line: Line) {}
    fn text_received(&mut self, text: Text) {}
    fn image_received(&mut self, image: Image) {}
    fn undo_received(&mut self) {}
    fn clear_received(&mut self) {}

    /// All elements of the selected board have been replayed.
    fn board_elements_finished(&mut self) {}
}
