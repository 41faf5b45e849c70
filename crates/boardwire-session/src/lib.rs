//! Session layer of the boardwire protocol: correlates wire fragments back
//! into records, dispatches completed records to application callbacks, and
//! owns the socket lifecycle on both the client and server side.
//!
//! Everything here is single-threaded and event-driven: reassembly state and
//! dispatch bindings are only ever touched from the thread that drains the
//! transport. The one concession to other threads is [`TaskQueue`], a
//! mutex-guarded FIFO for marshalling UI-initiated actions onto the
//! event-loop thread.

pub mod client;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod listener;
pub mod reassembly;
pub mod tasks;

mod correlation;

pub use client::{Client, ConnectionState};
pub use correlation::CorrelationSource;
pub use dispatch::Dispatcher;
pub use error::{Result, SessionError};
pub use events::{BoardEvents, ConnectionEvent};
pub use listener::{Connection, Listener};
pub use reassembly::Reassembly;
pub use tasks::TaskQueue;
