use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::info;

use boardwire_frame::FrameError;
use boardwire_session::{Listener, SessionError};

use crate::cmd::ServeArgs;
use crate::exit::{session_error, CliError, CliResult, SUCCESS};

/// Accepts one connection at a time and mirrors every completed record
/// back to its sender. A `GetBoards` probe echoes as the empty listing.
pub fn run(args: ServeArgs) -> CliResult<i32> {
    let listener = Listener::bind(&args.addr).map_err(|err| session_error("bind failed", err))?;
    let local = listener
        .local_addr()
        .map_err(|err| session_error("bind failed", err))?;
    info!(addr = %local, "serving");

    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    while running.load(Ordering::SeqCst) {
        let mut conn = match listener.accept() {
            Ok(conn) => conn,
            Err(err) => return Err(session_error("accept failed", err)),
        };
        info!(peer = %conn.peer_addr(), "peer connected");

        while running.load(Ordering::SeqCst) {
            let (tag, body) = match conn.recv_record() {
                Ok(record) => record,
                Err(SessionError::Frame(FrameError::ConnectionClosed)) => break,
                Err(err) => return Err(session_error("receive failed", err)),
            };
            if let Err(err) = conn.send_record(tag, &body) {
                return Err(session_error("echo failed", err));
            }
        }
        info!(peer = %conn.peer_addr(), "peer disconnected");
    }

    Ok(SUCCESS)
}

fn install_ctrlc_handler(running: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .map_err(|err| {
        CliError::new(
            crate::exit::INTERNAL,
            format!("signal handler setup failed: {err}"),
        )
    })
}
