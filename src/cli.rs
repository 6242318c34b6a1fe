use std::path::PathBuf;

use clap::Parser;

/// refpin - floating reference image overlay
#[derive(Parser, Debug)]
#[command(name = "refpin")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Image to load at startup, skipping the file picker
    #[arg(value_name = "IMAGE")]
    pub image: Option<PathBuf>,

    /// Initial overlay opacity in percent
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub opacity: Option<u8>,
}
