use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "oereb-extract",
    version,
    about = "Normalize land-use restriction extracts into presentation-ready views"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assemble the full view model of an extract.
    Render(RenderArgs),
    /// Show legend, documents and offices of one concerned theme.
    Theme(ThemeArgs),
    /// Expand one theme and list the overlay layers it adds to the map.
    Layers(ThemeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct DocumentArgs {
    /// Extract document, JSON or XML.
    #[arg(long)]
    pub document: PathBuf,

    /// Viewer configuration file (JSON).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Display language; overrides the configuration.
    #[arg(long)]
    pub lang: Option<String>,

    #[arg(long, default_value_t = false)]
    pub hide_logo: bool,

    #[arg(long, default_value_t = false)]
    pub office_from_restriction: bool,
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub document: DocumentArgs,

    /// Write the render manifest here instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ThemeArgs {
    #[command(flatten)]
    pub document: DocumentArgs,

    #[arg(long)]
    pub code: String,

    #[arg(long, default_value = "")]
    pub subcode: String,
}
