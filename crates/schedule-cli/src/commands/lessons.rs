//! Lessons command implementation.

use anyhow::{Context, Result};
use clap::{ArgGroup, Args};

use schedule_core::{Api, LessonFilter};

use crate::cli::Target;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("owner").required(true).args(["group", "teacher", "room"])))]
pub struct LessonsArgs {
    /// Group id
    #[arg(long)]
    pub group: Option<u64>,

    /// Teacher id
    #[arg(long)]
    pub teacher: Option<u64>,

    /// Room id
    #[arg(long)]
    pub room: Option<u64>,

    /// Academic week number
    #[arg(long)]
    pub week: Option<u32>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl LessonsArgs {
    fn filter(&self) -> Option<LessonFilter> {
        self.group
            .map(LessonFilter::Group)
            .or(self.teacher.map(LessonFilter::Teacher))
            .or(self.room.map(LessonFilter::Room))
    }
}

pub async fn run(args: LessonsArgs, target: &Target) -> Result<()> {
    let filter = args
        .filter()
        .context("One of --group, --teacher or --room is required")?;

    let client = session::open(target)?;
    let lessons = client
        .lessons_by(filter, args.week)
        .await
        .context("Failed to fetch lessons")?;

    output::body(&lessons, args.pretty)
}
