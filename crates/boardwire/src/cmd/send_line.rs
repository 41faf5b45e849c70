use tracing::info;

use boardwire_record::Line;
use boardwire_session::{BoardEvents, Client};

use crate::cmd::{parse_color, parse_duration, parse_point, poll_until, SendLineArgs};
use crate::exit::{session_error, CliResult, SUCCESS};

#[derive(Default)]
struct EchoWatch {
    line: Option<Line>,
}

impl BoardEvents for EchoWatch {
    fn line_received(&mut self, line: Line) {
        self.line = Some(line);
    }
}

pub fn run(args: SendLineArgs) -> CliResult<i32> {
    let wait_timeout = parse_duration(&args.wait_timeout)?;
    let line = Line {
        start: parse_point(&args.from)?,
        end: parse_point(&args.to)?,
        width: args.width,
        color: parse_color(&args.color)?,
    };

    let mut client =
        Client::connect(&args.addr).map_err(|err| session_error("connect failed", err))?;
    client
        .send_line(&line)
        .map_err(|err| session_error("send failed", err))?;
    info!(from = %args.from, to = %args.to, "line sent");

    if args.wait {
        let mut watch = EchoWatch::default();
        poll_until(&mut client, &mut watch, wait_timeout, |w| w.line.is_some())?;
        if let Some(echoed) = watch.line {
            println!(
                "line ({},{}) -> ({},{}) width {}",
                echoed.start.x, echoed.start.y, echoed.end.x, echoed.end.y, echoed.width
            );
        }
    }

    client.disconnect();
    Ok(SUCCESS)
}
