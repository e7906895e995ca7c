use anyhow::{Context, Result};
use blocker_icon::{
    design::{Design, Rgb},
    icon_gen::{self, Options, DEFAULT_OUTPUT},
};
use clap::Parser;
use std::{path::PathBuf, str::FromStr};

#[derive(Debug, Parser)]
#[clap(
    name = "blocker-icon",
    about = "Render the LLM Time Blocker store icon as a PNG"
)]
struct Args {
    /// Path of the PNG to write. Its directory must already exist.
    #[clap(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// JSON file overriding the built-in design parameters
    #[clap(long, value_name = "FILE")]
    design: Option<PathBuf>,

    /// Edge length of the saved icon in pixels
    #[clap(short, long, value_name = "PX")]
    size: Option<u32>,

    /// Background color at the top edge (opaque CSS color)
    #[clap(long, value_name = "COLOR")]
    top_color: Option<String>,

    /// Background color at the bottom edge (opaque CSS color)
    #[clap(long, value_name = "COLOR")]
    bottom_color: Option<String>,

    /// Color of the prohibition sign (opaque CSS color)
    #[clap(long, value_name = "COLOR")]
    ban_color: Option<String>,
}

impl Args {
    fn into_options(self) -> Result<Options> {
        let mut design = match &self.design {
            Some(path) => Design::load(path)?,
            None => Design::default(),
        };

        if let Some(size) = self.size {
            design.size = size;
        }
        if let Some(color) = &self.top_color {
            design.gradient_top = parse_color(color).context("Invalid --top-color")?;
        }
        if let Some(color) = &self.bottom_color {
            design.gradient_bottom = parse_color(color).context("Invalid --bottom-color")?;
        }
        if let Some(color) = &self.ban_color {
            design.ban_color = parse_color(color).context("Invalid --ban-color")?;
        }

        Ok(Options {
            output: self.output,
            design,
        })
    }
}

fn parse_color(color: &str) -> Result<Rgb> {
    let parsed = css_color::Srgb::from_str(color)
        .map_err(|_| anyhow::anyhow!("'{}' is not a CSS color", color))?;
    if parsed.alpha < 1.0 {
        anyhow::bail!("'{}' is translucent; icon colors must be opaque", color);
    }

    Ok([
        (parsed.red * 255.) as u8,
        (parsed.green * 255.) as u8,
        (parsed.blue * 255.) as u8,
    ])
}

fn main() -> Result<()> {
    let options = Args::parse().into_options()?;

    icon_gen::generate_icon(&options)
}
