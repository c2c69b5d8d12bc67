//! Subcommand implementations.

mod call;
mod create;
mod delete;
mod free_rooms;
mod get;
mod lessons;
mod list;
mod login;
mod logout;
mod refresh_token;
mod register;
mod update;
mod whoami;

use std::fs;

use anyhow::{Context, Result};
use clap::Subcommand;
use serde_json::Value;

use crate::cli::Target;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and store the token pair
    Login(login::LoginArgs),

    /// Forget the stored tokens and role
    Logout(logout::LogoutArgs),

    /// Display the logged-in user
    Whoami(whoami::WhoamiArgs),

    /// Exchange the refresh token for a new access token
    RefreshToken(refresh_token::RefreshTokenArgs),

    /// Register a new account
    Register(register::RegisterArgs),

    /// Send an arbitrary request to the API
    Call(call::CallArgs),

    /// List a resource collection
    List(list::ListArgs),

    /// Fetch a single resource item
    Get(get::GetArgs),

    /// Create a resource item
    Create(create::CreateArgs),

    /// Replace a resource item
    Update(update::UpdateArgs),

    /// Delete a resource item
    Delete(delete::DeleteArgs),

    /// Search rooms that are free in a time range
    FreeRooms(free_rooms::FreeRoomsArgs),

    /// Show the lessons of a group, teacher or room
    Lessons(lessons::LessonsArgs),
}

pub async fn handle(cmd: Command, target: &Target) -> Result<()> {
    match cmd {
        Command::Login(args) => login::run(args, target).await,
        Command::Logout(args) => logout::run(args, target).await,
        Command::Whoami(args) => whoami::run(args, target).await,
        Command::RefreshToken(args) => refresh_token::run(args, target).await,
        Command::Register(args) => register::run(args, target).await,
        Command::Call(args) => call::run(args, target).await,
        Command::List(args) => list::run(args, target).await,
        Command::Get(args) => get::run(args, target).await,
        Command::Create(args) => create::run(args, target).await,
        Command::Update(args) => update::run(args, target).await,
        Command::Delete(args) => delete::run(args, target).await,
        Command::FreeRooms(args) => free_rooms::run(args, target).await,
        Command::Lessons(args) => lessons::run(args, target).await,
    }
}

/// Parse a JSON body given inline or as `@path`.
fn parse_data(data: &str) -> Result<Value> {
    let text = match data.strip_prefix('@') {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?
        }
        None => data.to_string(),
    };
    serde_json::from_str(&text).context("Invalid JSON data")
}
