use std::fs;
use std::io::Cursor;
use std::path::Path;

use tempfile::TempDir;

use super::*;
use crate::cli::ScanOpts;

/// Two projects: `big` holds 300 bytes of dependencies, `small` holds 100.
fn setup_projects() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for (project, size) in [("big", 300), ("small", 100)] {
        let pkg = temp_dir.path().join(project).join("node_modules/pkg");
        fs::create_dir_all(&pkg).unwrap();
        fs::write(pkg.join("index.js"), vec![b'x'; size]).unwrap();
        fs::write(temp_dir.path().join(project).join("package.json"), "{}").unwrap();
    }
    temp_dir
}

fn scan_cli(root: &Path, yes: bool) -> Cli {
    Cli::builder()
        .quiet(true)
        .yes(yes)
        .command(Commands::Scan(ScanOpts::builder().path(root).build()))
        .build()
        .unwrap()
}

fn prune_cli(opts: ScanOpts, yes: bool, all: bool, dry_run: bool) -> Cli {
    Cli::builder()
        .quiet(true)
        .yes(yes)
        .command(Commands::Prune {
            scan: opts,
            all,
            dry_run,
        })
        .build()
        .unwrap()
}

fn run(cli: &Cli, input: &str) -> (Result<()>, String) {
    let mut output = Vec::new();
    let result = execute_with_io(cli, &mut Cursor::new(input.to_string()), &mut output);
    (result, String::from_utf8(output).unwrap())
}

#[test]
fn test_scan_prints_summary_tree_and_distribution() {
    let temp_dir = setup_projects();

    let (result, output) = run(&scan_cli(temp_dir.path(), true), "");

    result.unwrap();
    assert!(output.contains("Found 2 node_modules directories"));
    assert!(output.contains("Total space used: 400 bytes"));
    assert!(output.contains("├── big/node_modules (300 bytes)"));
    assert!(output.contains("╰── small/node_modules (100 bytes)"));
    assert!(output.contains("Size distribution:"));
    assert!(output.contains("Tiny (< 1MB)"));
}

#[test]
fn test_scan_asks_before_walking() {
    let temp_dir = setup_projects();

    let (result, output) = run(&scan_cli(temp_dir.path(), false), "n\n");

    result.unwrap();
    assert!(output.contains("[y/N]"));
    assert!(output.contains("Scan cancelled."));
    assert!(!output.contains("Found"));
}

#[test]
fn test_scan_confirmed_interactively() {
    let temp_dir = setup_projects();

    let (result, output) = run(&scan_cli(temp_dir.path(), false), "y\n");

    result.unwrap();
    assert!(output.contains("Found 2 node_modules directories"));
}

#[test]
fn test_scan_missing_root_reports_then_fails() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing");

    let (result, output) = run(&scan_cli(&missing, true), "");

    assert!(matches!(result, Err(SweepError::RootNotFound(_))));
    assert!(output.contains("Found 0 node_modules directories"));
    assert!(output.contains("Total space used: 0 bytes"));
}

#[test]
fn test_scan_min_size_hides_small_matches() {
    let temp_dir = setup_projects();
    let cli = Cli::builder()
        .quiet(true)
        .yes(true)
        .command(Commands::Scan(
            ScanOpts::builder()
                .path(temp_dir.path())
                .min_size("200")
                .build(),
        ))
        .build()
        .unwrap();

    let (result, output) = run(&cli, "");

    result.unwrap();
    assert!(output.contains("Found 1 node_modules directories"));
    assert!(output.contains("big/node_modules"));
    assert!(!output.contains("small/node_modules"));
}

#[test]
fn test_scan_invalid_min_size_fails_before_prompting() {
    let temp_dir = setup_projects();
    let cli = Cli::builder()
        .command(Commands::Scan(
            ScanOpts::builder()
                .path(temp_dir.path())
                .min_size("lots")
                .build(),
        ))
        .build()
        .unwrap();

    let (result, output) = run(&cli, "y\n");

    assert!(matches!(result, Err(SweepError::InvalidSize(..))));
    assert!(output.is_empty());
}

#[test]
fn test_prune_all_removes_every_match() {
    let temp_dir = setup_projects();
    let opts = ScanOpts::builder().path(temp_dir.path()).build();

    let (result, output) = run(&prune_cli(opts, true, true, false), "");

    result.unwrap();
    assert!(output.contains("Pruned 2 directories, freed 400 bytes"));
    assert!(!temp_dir.path().join("big/node_modules").exists());
    assert!(!temp_dir.path().join("small/node_modules").exists());
    assert!(temp_dir.path().join("big/package.json").exists());
}

#[test]
fn test_prune_interactive_selection() {
    let temp_dir = setup_projects();
    let opts = ScanOpts::builder().path(temp_dir.path()).build();

    // Confirm the scan, pick the second-largest entry, confirm the deletion.
    let (result, output) = run(&prune_cli(opts, false, false, false), "y\n2\ny\n");

    result.unwrap();
    assert!(output.contains("Permanently delete 1 directories (100 bytes)?"));
    assert!(output.contains("Pruned 1 directories, freed 100 bytes"));
    assert!(temp_dir.path().join("big/node_modules").exists());
    assert!(!temp_dir.path().join("small/node_modules").exists());
}

#[test]
fn test_prune_declined_keeps_everything() {
    let temp_dir = setup_projects();
    let opts = ScanOpts::builder().path(temp_dir.path()).build();

    let (result, output) = run(&prune_cli(opts, false, true, false), "y\nn\n");

    result.unwrap();
    assert!(output.contains("Pruning cancelled."));
    assert!(temp_dir.path().join("big/node_modules").exists());
    assert!(temp_dir.path().join("small/node_modules").exists());
}

#[test]
fn test_prune_selecting_none() {
    let temp_dir = setup_projects();
    let opts = ScanOpts::builder().path(temp_dir.path()).build();

    let (result, output) = run(&prune_cli(opts, true, false, false), "none\n");

    result.unwrap();
    assert!(output.contains("No directories selected."));
    assert!(temp_dir.path().join("small/node_modules").exists());
}

#[test]
fn test_prune_dry_run_deletes_nothing() {
    let temp_dir = setup_projects();
    let opts = ScanOpts::builder().path(temp_dir.path()).build();

    let (result, output) = run(&prune_cli(opts, false, true, true), "y\n");

    result.unwrap();
    assert!(output.contains("Dry run: would prune 2 directories and free 400 bytes"));
    assert!(!output.contains("Permanently delete"));
    assert!(temp_dir.path().join("big/node_modules").exists());
    assert!(temp_dir.path().join("small/node_modules").exists());
}

#[test]
fn test_prune_with_no_matches() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("empty-project")).unwrap();
    let opts = ScanOpts::builder().path(temp_dir.path()).build();

    let (result, output) = run(&prune_cli(opts, true, true, false), "");

    result.unwrap();
    assert!(output.contains("Nothing to prune."));
}

#[test]
fn test_prune_missing_root_returns_walk_error() {
    let temp_dir = TempDir::new().unwrap();
    let opts = ScanOpts::builder()
        .path(temp_dir.path().join("missing"))
        .build();

    let (result, output) = run(&prune_cli(opts, true, true, false), "");

    assert!(matches!(result, Err(SweepError::RootNotFound(_))));
    assert!(output.contains("Nothing to prune."));
}

#[test]
fn test_prune_custom_match_name() {
    let temp_dir = TempDir::new().unwrap();
    let vendor = temp_dir.path().join("app/vendor");
    fs::create_dir_all(&vendor).unwrap();
    fs::write(vendor.join("lib.rb"), "x").unwrap();
    let opts = ScanOpts::builder()
        .path(temp_dir.path())
        .name("vendor")
        .build();

    let (result, output) = run(&prune_cli(opts, true, true, false), "");

    result.unwrap();
    assert!(output.contains("Found 1 vendor directories"));
    assert!(!vendor.exists());
}

#[test]
fn test_builders_require_scan_options() {
    assert!(matches!(
        Survey::builder().build(),
        Err(SweepError::ConfigError(_))
    ));
    assert!(matches!(
        Prune::builder().build(),
        Err(SweepError::ConfigError(_))
    ));
}
