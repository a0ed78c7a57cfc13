//! Command-line surface of the `herald` console.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use herald_core::event::EventType;
use herald_core::ordering::Direction;
use herald_core::types::parse_wire_date;
use herald_core::video::VideoCategory;

#[derive(Debug, Parser)]
#[command(name = "herald", version, about = "Content administration console")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Photo gallery events.
    #[command(subcommand)]
    Events(EventsCommand),
    /// Press releases.
    #[command(subcommand)]
    Press(PressCommand),
    /// Homepage slider.
    #[command(subcommand)]
    Sliders(SlidersCommand),
    /// Video catalog.
    #[command(subcommand)]
    Videos(VideosCommand),
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[derive(Debug, Subcommand)]
pub enum EventsCommand {
    List(SearchArgs),
    Create(CreateEventArgs),
    Delete(DeleteArgs),
    /// Save the event's QR code as `<Title>-QR.png`.
    Qr {
        id: String,
        /// Output directory.
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

#[derive(Debug, Args)]
pub struct CreateEventArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long = "type")]
    pub event_type: EventType,
    #[arg(long, value_parser = parse_date)]
    pub date: NaiveDate,
    /// Photo to upload, optionally followed by `=CAPTION`. Repeatable.
    #[arg(long = "image", value_parser = parse_image, required = true)]
    pub images: Vec<ImageArg>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageArg {
    pub path: PathBuf,
    pub caption: String,
}

// ---------------------------------------------------------------------------
// Press releases
// ---------------------------------------------------------------------------

#[derive(Debug, Subcommand)]
pub enum PressCommand {
    List(SearchArgs),
    Create(CreatePressArgs),
    Delete(DeleteArgs),
    /// Show or hide a press release.
    Toggle(ToggleArgs),
}

#[derive(Debug, Args)]
pub struct CreatePressArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long, value_parser = parse_date)]
    pub date: NaiveDate,
    /// HTML body.
    #[arg(long, conflicts_with = "content_file")]
    pub content: Option<String>,
    /// Read the HTML body from a file.
    #[arg(long)]
    pub content_file: Option<PathBuf>,
    #[arg(long)]
    pub source: String,
    #[arg(long)]
    pub author: String,
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    #[arg(long, default_value = "")]
    pub link: String,
    #[arg(long)]
    pub thumbnail: Option<PathBuf>,
    /// Create the release hidden.
    #[arg(long)]
    pub inactive: bool,
}

// ---------------------------------------------------------------------------
// Sliders
// ---------------------------------------------------------------------------

#[derive(Debug, Subcommand)]
pub enum SlidersCommand {
    List(SearchArgs),
    Create(CreateSliderArgs),
    Edit(EditSliderArgs),
    Delete(DeleteArgs),
    /// Swap a slider with its neighbour.
    Move {
        id: String,
        direction: MoveDirection,
    },
    Toggle(ToggleArgs),
}

#[derive(Debug, Args)]
pub struct CreateSliderArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long, default_value = "")]
    pub subtitle: String,
    #[arg(long)]
    pub image: Option<PathBuf>,
    #[arg(long)]
    pub link: Option<String>,
    /// Defaults to one past the current last slider.
    #[arg(long)]
    pub order: Option<i64>,
    #[arg(long)]
    pub inactive: bool,
}

/// Fields left out keep their stored value.
#[derive(Debug, Args)]
pub struct EditSliderArgs {
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub subtitle: Option<String>,
    #[arg(long)]
    pub image: Option<PathBuf>,
    #[arg(long)]
    pub link: Option<String>,
    #[arg(long)]
    pub order: Option<i64>,
    #[arg(long, action = clap::ArgAction::Set)]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MoveDirection {
    Up,
    Down,
}

impl From<MoveDirection> for Direction {
    fn from(value: MoveDirection) -> Self {
        match value {
            MoveDirection::Up => Direction::Up,
            MoveDirection::Down => Direction::Down,
        }
    }
}

// ---------------------------------------------------------------------------
// Videos
// ---------------------------------------------------------------------------

#[derive(Debug, Subcommand)]
pub enum VideosCommand {
    List(SearchArgs),
    Create(CreateVideoArgs),
}

#[derive(Debug, Args)]
pub struct CreateVideoArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub thumbnail: String,
    #[arg(long)]
    pub link: String,
    #[arg(long, value_parser = parse_date)]
    pub publish_date: NaiveDate,
    #[arg(long)]
    pub category: VideoCategory,
}

// ---------------------------------------------------------------------------
// Shared arguments
// ---------------------------------------------------------------------------

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Case-insensitive substring filter.
    #[arg(long, short, default_value = "")]
    pub search: String,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    pub id: String,
    /// Skip the confirmation prompt.
    #[arg(long, short)]
    pub yes: bool,
}

#[derive(Debug, Args)]
pub struct ToggleArgs {
    pub id: String,
    #[arg(long, action = clap::ArgAction::Set)]
    pub active: bool,
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    parse_wire_date(raw).ok_or_else(|| format!("expected YYYY-MM-DD, got `{raw}`"))
}

fn parse_image(raw: &str) -> Result<ImageArg, String> {
    let (path, caption) = raw.split_once('=').unwrap_or((raw, ""));
    if path.is_empty() {
        return Err("image path is empty".to_string());
    }
    Ok(ImageArg {
        path: PathBuf::from(path),
        caption: caption.to_string(),
    })
}
