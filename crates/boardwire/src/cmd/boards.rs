use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use boardwire_record::BoardDescriptor;
use boardwire_session::{BoardEvents, Client};

use crate::cmd::{parse_duration, poll_until, BoardsArgs};
use crate::exit::{session_error, CliResult, SUCCESS};

#[derive(Default)]
struct Listing {
    boards: Vec<BoardDescriptor>,
    complete: bool,
}

impl BoardEvents for Listing {
    fn board_received(&mut self, board: BoardDescriptor, last_of_batch: bool) {
        self.boards.push(board);
        if last_of_batch {
            self.complete = true;
        }
    }

    fn no_boards(&mut self) {
        self.complete = true;
    }
}

pub fn run(args: BoardsArgs) -> CliResult<i32> {
    let timeout = parse_duration(&args.timeout)?;

    let mut client =
        Client::connect(&args.addr).map_err(|err| session_error("connect failed", err))?;
    client
        .get_boards()
        .map_err(|err| session_error("request failed", err))?;

    let mut listing = Listing::default();
    poll_until(&mut client, &mut listing, timeout, |l| l.complete)?;
    client.disconnect();

    if listing.boards.is_empty() {
        println!("no boards");
        return Ok(SUCCESS);
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "TITLE", "COLOR"]);
    for board in &listing.boards {
        table.add_row(vec![
            board.id.to_string(),
            board.title.clone(),
            format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                board.color.r, board.color.g, board.color.b, board.color.a
            ),
        ]);
    }
    println!("{table}");

    Ok(SUCCESS)
}
