use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "sift",
    about = "Page text extraction and YouTube transcript service",
    version
)]
pub struct Cli {
    /// Config file (default: ~/.config/sift/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to bind, overrides the config file
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on, overrides the config file
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    pub verbose: bool,
}
