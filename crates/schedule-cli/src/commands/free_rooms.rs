//! Free rooms command implementation.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::Args;

use schedule_core::{Api, FreeRoomsQuery, RoomType};

use crate::cli::Target;
use crate::output;
use crate::session;

const INPUT_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

#[derive(Args, Debug)]
pub struct FreeRoomsArgs {
    /// Range start, e.g. 2024-09-02T08:30
    #[arg(long, value_parser = parse_datetime)]
    pub start: NaiveDateTime,

    /// Range end, e.g. 2024-09-02T10:00
    #[arg(long, value_parser = parse_datetime)]
    pub end: NaiveDateTime,

    /// Room type (lecture or lab)
    #[arg(long = "type")]
    pub room_type: Option<RoomType>,

    /// Minimum capacity
    #[arg(long)]
    pub capacity: Option<u32>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

fn parse_datetime(s: &str) -> Result<NaiveDateTime, String> {
    INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .ok_or_else(|| format!("expected YYYY-MM-DDTHH:MM, got '{}'", s))
}

pub async fn run(args: FreeRoomsArgs, target: &Target) -> Result<()> {
    let mut query = FreeRoomsQuery::new(
        args.start.format("%Y-%m-%dT%H:%M:%S").to_string(),
        args.end.format("%Y-%m-%dT%H:%M:%S").to_string(),
    );
    query.room_type = args.room_type;
    query.capacity = args.capacity;

    let client = session::open(target)?;
    let rooms = client
        .free_rooms(&query)
        .await
        .context("Failed to search free rooms")?;

    output::body(&rooms, args.pretty)
}
