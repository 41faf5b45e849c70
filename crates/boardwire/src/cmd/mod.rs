use std::time::{Duration, Instant};

use clap::{Args, Subcommand};

use boardwire_record::{Color, Point};
use boardwire_session::{BoardEvents, Client};

use crate::exit::{session_error, CliError, CliResult, TIMEOUT, USAGE};

pub mod boards;
pub mod send_line;
pub mod send_text;
pub mod serve;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start an echo server that mirrors every record back to its sender.
    Serve(ServeArgs),
    /// Send a single line stroke.
    SendLine(SendLineArgs),
    /// Send a single text element.
    SendText(SendTextArgs),
    /// List the boards a server reports.
    Boards(BoardsArgs),
}

pub fn run(command: Command) -> CliResult<i32> {
    match command {
        Command::Serve(args) => serve::run(args),
        Command::SendLine(args) => send_line::run(args),
        Command::SendText(args) => send_text::run(args),
        Command::Boards(args) => boards::run(args),
    }
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind, e.g. 127.0.0.1:7777.
    pub addr: String,
}

#[derive(Args, Debug)]
pub struct SendLineArgs {
    /// Server address to connect to.
    pub addr: String,
    /// Start point as x,y.
    #[arg(long, default_value = "0,0")]
    pub from: String,
    /// End point as x,y.
    #[arg(long, default_value = "100,100")]
    pub to: String,
    /// Stroke width in pixels.
    #[arg(long, default_value = "2")]
    pub width: i32,
    /// Stroke color as RRGGBB or RRGGBBAA hex.
    #[arg(long, default_value = "000000")]
    pub color: String,
    /// Wait for the server to mirror the stroke back.
    #[arg(long)]
    pub wait: bool,
    /// Maximum time to wait when --wait is set (e.g. 5s, 500ms).
    #[arg(long, default_value = "5s")]
    pub wait_timeout: String,
}

#[derive(Args, Debug)]
pub struct SendTextArgs {
    /// Server address to connect to.
    pub addr: String,
    /// Text content.
    pub text: String,
    /// Anchor point as x,y.
    #[arg(long, default_value = "0,0")]
    pub at: String,
    /// Font size in points.
    #[arg(long, default_value = "14")]
    pub font_size: i32,
    /// Text color as RRGGBB or RRGGBBAA hex.
    #[arg(long, default_value = "000000")]
    pub color: String,
    /// Wait for the server to mirror the text back.
    #[arg(long)]
    pub wait: bool,
    /// Maximum time to wait when --wait is set (e.g. 5s, 500ms).
    #[arg(long, default_value = "5s")]
    pub wait_timeout: String,
}

#[derive(Args, Debug)]
pub struct BoardsArgs {
    /// Server address to connect to.
    pub addr: String,
    /// Maximum time to wait for the full listing (e.g. 5s, 500ms).
    #[arg(long, default_value = "5s")]
    pub timeout: String,
}

/// Drive [`Client::poll`] until `done` reports true or the timeout
/// elapses.
pub(crate) fn poll_until<E, F>(
    client: &mut Client,
    events: &mut E,
    timeout: Duration,
    done: F,
) -> CliResult<()>
where
    E: BoardEvents,
    F: Fn(&E) -> bool,
{
    let deadline = Instant::now() + timeout;
    while !done(events) {
        if Instant::now() >= deadline {
            return Err(CliError::new(TIMEOUT, "timed out waiting for response"));
        }
        client
            .poll(events)
            .map_err(|err| session_error("receive failed", err))?;
        if done(events) {
            break;
        }
        if !client.is_connected() {
            return Err(CliError::new(
                crate::exit::FAILURE,
                "server closed the connection",
            ));
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    Ok(())
}

pub(crate) fn parse_point(input: &str) -> CliResult<Point> {
    let (x, y) = input
        .split_once(',')
        .ok_or_else(|| CliError::new(USAGE, format!("invalid point (want x,y): {input}")))?;
    let x = x
        .trim()
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid point coordinate: {x}")))?;
    let y = y
        .trim()
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid point coordinate: {y}")))?;
    Ok(Point::new(x, y))
}

pub(crate) fn parse_color(input: &str) -> CliResult<Color> {
    let hex = input.trim().trim_start_matches('#');
    let bad = || CliError::new(USAGE, format!("invalid color (want RRGGBB or RRGGBBAA): {input}"));
    if hex.len() != 6 && hex.len() != 8 {
        return Err(bad());
    }
    let mut channels = [0u8; 4];
    channels[3] = 0xff;
    for (slot, pair) in channels.iter_mut().zip(hex.as_bytes().chunks(2)) {
        let pair = std::str::from_utf8(pair).map_err(|_| bad())?;
        *slot = u8::from_str_radix(pair, 16).map_err(|_| bad())?;
    }
    Ok(Color::new(channels[0], channels[1], channels[2], channels[3]))
}

/// Accepts `500ms`, `5s`, or a bare second count.
pub(crate) fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    let (digits, from_unit): (&str, fn(u64) -> Duration) =
        if let Some(ms) = input.strip_suffix("ms") {
            (ms, Duration::from_millis)
        } else {
            (input.strip_suffix('s').unwrap_or(input), Duration::from_secs)
        };

    match digits.parse::<u64>() {
        Ok(0) => Err(CliError::new(USAGE, "duration must be greater than zero")),
        Ok(value) => Ok(from_unit(value)),
        Err(_) => Err(CliError::new(USAGE, format!("invalid duration: {input}"))),
    }
}
