use anyhow::{Context, Result};
use blocker_icon::inspect::inspect;

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| blocker_icon::icon_gen::DEFAULT_OUTPUT.to_string());

    let img = image::open(&path).with_context(|| format!("Failed to open {path}"))?;
    let report = inspect(&img);

    println!("Checking icon: {}", path);
    println!("Image dimensions: {}x{}", report.width, report.height);
    println!("  Alpha channel: {}", if report.has_alpha { "yes" } else { "no" });
    println!("  Corner alpha (TL, TR, BL, BR): {:?}", report.corner_alpha);
    let c = report.center;
    println!("  Center RGBA: [{}, {}, {}, {}]", c[0], c[1], c[2], c[3]);
    println!("  Red pixels: {}", report.red_pixels);
    println!("  Light pixels: {}", report.light_pixels);

    if report.corners_transparent() && c[3] == 255 && report.red_pixels > 0 && report.light_pixels > 0
    {
        println!("✓ Icon looks right");
    } else {
        println!("⚠ Icon does not match the expected layout");
    }

    Ok(())
}
