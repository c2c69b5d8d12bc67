//! Raw request command implementation.

use anyhow::{Context, Result};
use clap::Args;

use schedule_core::{Api, Method, RequestDescriptor};

use crate::cli::Target;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct CallArgs {
    /// HTTP method (GET, POST, PUT, DELETE)
    pub method: Method,

    /// Path relative to the API root, e.g. /rooms/
    pub path: String,

    /// JSON body, or @file
    #[arg(long)]
    pub data: Option<String>,

    /// Extra header as NAME:VALUE (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

fn parse_header(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once(':')
        .ok_or_else(|| format!("expected NAME:VALUE, got '{}'", s))?;
    Ok((name.trim().to_string(), value.trim().to_string()))
}

pub async fn run(args: CallArgs, target: &Target) -> Result<()> {
    let mut request = RequestDescriptor::new(args.method, &args.path);
    if let Some(data) = &args.data {
        request = request.json(&super::parse_data(data)?)?;
    }
    for (name, value) in args.headers {
        request = request.header(name, value);
    }

    let client = session::open(target)?;
    let body = client
        .call(&request)
        .await
        .with_context(|| format!("{} {} failed", args.method, args.path))?;

    output::body(&body, args.pretty)
}
