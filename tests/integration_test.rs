use blocker_icon::inspect::{inspect, is_light, is_red};
use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Path to the blocker-icon binary built for this test run
fn get_blocker_icon_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_blocker-icon"))
}

/// Path to the inspect_icon binary built for this test run
fn get_inspect_icon_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_inspect_icon"))
}

fn run(args: &[&OsStr]) -> Output {
    Command::new(get_blocker_icon_binary_path())
        .args(args)
        .output()
        .expect("Failed to run blocker-icon command")
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        eprintln!("Command failed with status: {}", output.status);
        eprintln!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        panic!("blocker-icon command failed");
    }
}

/// Renders the default icon and checks the file end to end
#[test]
fn test_default_icon_end_to_end() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("icon128_store.png");

    let output = run(&[OsStr::new("-o"), output_path.as_os_str()]);
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Saved 128x128 to"),
        "Confirmation message missing from stdout: {}",
        stdout
    );
    assert!(stdout.contains(&output_path.display().to_string()));

    assert!(
        output_path.exists(),
        "Icon should exist at: {}",
        output_path.display()
    );

    let bytes = std::fs::read(&output_path).expect("Failed to read icon");
    assert_eq!(
        image::guess_format(&bytes).expect("Unknown format"),
        image::ImageFormat::Png
    );

    let icon = image::load_from_memory(&bytes).expect("Failed to decode icon");
    let report = inspect(&icon);

    assert_eq!((report.width, report.height), (128, 128));
    assert!(report.has_alpha, "Icon should carry an alpha channel");
    assert!(
        report.corners_transparent(),
        "Corners should be transparent, got {:?}",
        report.corner_alpha
    );

    let rgba = icon.to_rgba8();
    let central: Vec<_> = rgba
        .enumerate_pixels()
        .filter(|(x, y, _)| (16..112).contains(x) && (16..112).contains(y))
        .map(|(_, _, p)| *p)
        .collect();
    assert!(central.iter().any(is_red), "No red pixels in the center");
    assert!(central.iter().any(is_light), "No white pixels in the center");

    // Only the icon is left behind, no temporary files
    let entries = std::fs::read_dir(temp_dir.path()).unwrap().count();
    assert_eq!(entries, 1);
}

#[test]
fn test_repeated_runs_are_identical() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let first = temp_dir.path().join("first.png");
    let second = temp_dir.path().join("second.png");

    assert_success(&run(&[OsStr::new("-o"), first.as_os_str()]));
    assert_success(&run(&[OsStr::new("-o"), second.as_os_str()]));

    assert_eq!(
        std::fs::read(&first).unwrap(),
        std::fs::read(&second).unwrap()
    );
}

#[test]
fn test_overwrites_existing_icon() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("icon.png");
    std::fs::write(&output_path, b"stale").unwrap();

    assert_success(&run(&[OsStr::new("-o"), output_path.as_os_str()]));

    let icon = image::open(&output_path).expect("Stale file should have been replaced");
    assert_eq!(icon.width(), 128);
}

#[test]
fn test_missing_output_directory_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("missing").join("icon.png");

    let output = run(&[OsStr::new("-o"), output_path.as_os_str()]);

    assert!(!output.status.success(), "Writing into a missing directory should fail");
    assert!(!output_path.exists());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("temporary file"),
        "Error should name the failed write: {}",
        stderr
    );
}

#[test]
fn test_size_and_color_overrides() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("icon64.png");

    let output = run(&[
        OsStr::new("-o"),
        output_path.as_os_str(),
        OsStr::new("--size"),
        OsStr::new("64"),
        OsStr::new("--ban-color"),
        OsStr::new("#00ff00"),
    ]);
    assert_success(&output);
    assert!(String::from_utf8_lossy(&output.stdout).contains("Saved 64x64"));

    let icon = image::open(&output_path).expect("Failed to load icon");
    let report = inspect(&icon);
    assert_eq!((report.width, report.height), (64, 64));
    assert_eq!(report.red_pixels, 0, "A green ban sign should leave no red pixels");
}

#[test]
fn test_invalid_color_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("icon.png");

    let output = run(&[
        OsStr::new("-o"),
        output_path.as_os_str(),
        OsStr::new("--top-color"),
        OsStr::new("not-a-color"),
    ]);

    assert!(!output.status.success());
    assert!(!output_path.exists());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--top-color"));
}

#[test]
fn test_design_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let design_path = temp_dir.path().join("design.json");
    let output_path = temp_dir.path().join("icon.png");
    std::fs::write(&design_path, r#"{ "size": 96, "supersample": 384 }"#).unwrap();

    let output = run(&[
        OsStr::new("-o"),
        output_path.as_os_str(),
        OsStr::new("--design"),
        design_path.as_os_str(),
    ]);
    assert_success(&output);

    let icon = image::open(&output_path).expect("Failed to load icon");
    assert_eq!(icon.width(), 96);
    assert_eq!(icon.height(), 96);
}

#[test]
fn test_upscaling_is_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("icon.png");

    let output = run(&[
        OsStr::new("-o"),
        output_path.as_os_str(),
        OsStr::new("--size"),
        OsStr::new("1024"),
    ]);

    assert!(!output.status.success());
    assert!(!output_path.exists());
}

#[test]
fn test_translucent_color_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("icon.png");

    let output = run(&[
        OsStr::new("-o"),
        output_path.as_os_str(),
        OsStr::new("--ban-color"),
        OsStr::new("#ff000080"),
    ]);

    assert!(!output.status.success());
    assert!(!output_path.exists());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--ban-color"), "unexpected stderr: {}", stderr);
    assert!(stderr.contains("opaque"), "unexpected stderr: {}", stderr);
}

#[test]
fn test_inspect_icon_reports_rendered_icon() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("icon.png");
    assert_success(&run(&[OsStr::new("-o"), output_path.as_os_str()]));

    let output = Command::new(get_inspect_icon_binary_path())
        .arg(&output_path)
        .output()
        .expect("Failed to run inspect_icon command");
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Image dimensions: 128x128"), "stdout: {}", stdout);
    assert!(stdout.contains("Corner alpha (TL, TR, BL, BR): [0, 0, 0, 0]"), "stdout: {}", stdout);
    assert!(stdout.contains("✓ Icon looks right"), "stdout: {}", stdout);
}

#[test]
fn test_inspect_icon_missing_file_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let missing = temp_dir.path().join("nope.png");

    let output = Command::new(get_inspect_icon_binary_path())
        .arg(&missing)
        .output()
        .expect("Failed to run inspect_icon command");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to open"));
}
