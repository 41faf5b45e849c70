use tracing::info;

use boardwire_record::Text;
use boardwire_session::{BoardEvents, Client};

use crate::cmd::{parse_color, parse_duration, parse_point, poll_until, SendTextArgs};
use crate::exit::{session_error, CliResult, SUCCESS};

#[derive(Default)]
struct EchoWatch {
    text: Option<Text>,
}

impl BoardEvents for EchoWatch {
    fn text_received(&mut self, text: Text) {
        self.text = Some(text);
    }
}

pub fn run(args: SendTextArgs) -> CliResult<i32> {
    let wait_timeout = parse_duration(&args.wait_timeout)?;
    let text = Text {
        pos: parse_point(&args.at)?,
        font_size: args.font_size,
        color: parse_color(&args.color)?,
        text: args.text.clone(),
    };

    let mut client =
        Client::connect(&args.addr).map_err(|err| session_error("connect failed", err))?;
    client
        .send_text(&text)
        .map_err(|err| session_error("send failed", err))?;
    info!(at = %args.at, len = args.text.len(), "text sent");

    if args.wait {
        let mut watch = EchoWatch::default();
        poll_until(&mut client, &mut watch, wait_timeout, |w| w.text.is_some())?;
        if let Some(echoed) = watch.text {
            println!("text at ({},{}): {}", echoed.pos.x, echoed.pos.y, echoed.text);
        }
    }

    client.disconnect();
    Ok(SUCCESS)
}
