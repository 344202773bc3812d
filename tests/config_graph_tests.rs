//! Integration tests for config graph resolution
//!
//! These tests verify:
//! - Directive extraction order and comment handling
//! - Home and relative path resolution
//! - Glob expansion and de-duplication
//! - Recursive vs single-level resolution, include cycles
//! - Determinism of repeated resolution

use camino::{Utf8Path, Utf8PathBuf};
use hyprsettings::HyprError;
use hyprsettings::models::ResolveMode;
use hyprsettings::services::paths::{self, HyprPaths};
use hyprsettings::services::{ConfigGraphBuilder, SourceDirectiveParser};
use std::fs;
use tempfile::TempDir;

/// Temporary home with an empty `~/.config/hypr`
fn create_home() -> (TempDir, Utf8PathBuf, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let home = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    let hypr = home.join(".config/hypr");
    fs::create_dir_all(&hypr).unwrap();
    (temp_dir, home, hypr)
}

fn write(path: &Utf8Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn test_directives_in_order_without_comments() {
    let parser = SourceDirectiveParser::new();
    let text = "# header\n\nsource = \"a.conf\"\n   # source = ignored.conf\nsource=b.conf  # comment\n";

    assert_eq!(parser.extract_paths(text), vec!["a.conf", "b.conf"]);
}

#[test]
fn test_home_and_relative_resolution() {
    let home = Utf8Path::new("/home/u");

    assert_eq!(
        paths::resolve("~/x.conf", Utf8Path::new("/anywhere"), home),
        Utf8PathBuf::from("/home/u/x.conf")
    );
    assert_eq!(
        paths::resolve("sub/y.conf", Utf8Path::new("/home/u/.config/hypr"), home),
        Utf8PathBuf::from("/home/u/.config/hypr/sub/y.conf")
    );
}

#[test]
fn test_glob_expansion_deduplicates_across_directives() {
    let (_temp, home, hypr) = create_home();
    write(&hypr.join("conf.d/a.conf"), "");
    write(&hypr.join("conf.d/b.conf"), "");
    write(&hypr.join("conf.d/notes.txt"), "");
    write(
        &hypr.join("hyprland.conf"),
        "source = conf.d/*.conf\nsource = conf.d/a.conf\nsource = ~/.config/hypr/conf.d/../conf.d/*.conf\n",
    );

    let builder = ConfigGraphBuilder::new(&home, ResolveMode::SingleLevel);
    let sourced = builder
        .build_sourced_file_set(&hypr.join("hyprland.conf"))
        .unwrap();

    assert_eq!(
        sourced,
        vec![hypr.join("conf.d/a.conf"), hypr.join("conf.d/b.conf")]
    );
}

#[test]
fn test_missing_sourced_file_is_still_listed() {
    let (_temp, home, hypr) = create_home();
    write(&hypr.join("hyprland.conf"), "source = ~/.config/hypr/later.conf\n");

    let builder = ConfigGraphBuilder::new(&home, ResolveMode::Recursive);
    let sourced = builder
        .build_sourced_file_set(&hypr.join("hyprland.conf"))
        .unwrap();

    assert_eq!(sourced, vec![hypr.join("later.conf")]);
}

#[test]
fn test_resolution_is_deterministic() {
    let (_temp, home, hypr) = create_home();
    write(&hypr.join("themes/dark.conf"), "");
    write(&hypr.join("themes/light.conf"), "");
    write(&hypr.join("binds.conf"), "source = themes/*.conf\n");
    write(
        &hypr.join("hyprland.conf"),
        "source = binds.conf\nsource = ~/.config/hypr/monitors.conf\n",
    );

    let builder = ConfigGraphBuilder::new(&home, ResolveMode::Recursive);
    let root = hypr.join("hyprland.conf");

    let first = builder.build_sourced_file_set(&root).unwrap();
    let second = builder.build_sourced_file_set(&root).unwrap();
    assert_eq!(first, second);
    assert_eq!(builder.build(&root).unwrap(), builder.build(&root).unwrap());
}

#[test]
fn test_recursive_follows_nested_includes_depth_first() {
    let (_temp, home, hypr) = create_home();
    write(&hypr.join("hyprland.conf"), "source = a.conf\nsource = c.conf\n");
    write(&hypr.join("a.conf"), "source = nested/b.conf\n");
    // Relative to the containing file, not to the root
    write(&hypr.join("nested/b.conf"), "source = deep.conf\n");
    write(&hypr.join("nested/deep.conf"), "");
    write(&hypr.join("c.conf"), "");

    let builder = ConfigGraphBuilder::new(&home, ResolveMode::Recursive);
    let sourced = builder
        .build_sourced_file_set(&hypr.join("hyprland.conf"))
        .unwrap();

    assert_eq!(
        sourced,
        vec![
            hypr.join("a.conf"),
            hypr.join("nested/b.conf"),
            hypr.join("nested/deep.conf"),
            hypr.join("c.conf"),
        ]
    );
}

#[test]
fn test_recursive_terminates_on_cycles() {
    let (_temp, home, hypr) = create_home();
    write(&hypr.join("hyprland.conf"), "source = a.conf\n");
    write(&hypr.join("a.conf"), "source = b.conf\n");
    write(&hypr.join("b.conf"), "source = a.conf\nsource = hyprland.conf\n");

    let builder = ConfigGraphBuilder::new(&home, ResolveMode::Recursive);
    let graph = builder.build(&hypr.join("hyprland.conf")).unwrap();

    let sourced: Vec<Utf8PathBuf> = graph.sourced_files().map(Utf8Path::to_path_buf).collect();
    assert_eq!(sourced, vec![hypr.join("a.conf"), hypr.join("b.conf")]);
    assert!(graph.contains(&hypr.join("hyprland.conf")));
}

#[test]
fn test_single_level_ignores_nested_directives() {
    let (_temp, home, hypr) = create_home();
    write(&hypr.join("hyprland.conf"), "source = a.conf\n");
    write(&hypr.join("a.conf"), "source = b.conf\n");
    write(&hypr.join("b.conf"), "");

    let builder = ConfigGraphBuilder::new(&home, ResolveMode::SingleLevel);
    let sourced = builder
        .build_sourced_file_set(&hypr.join("hyprland.conf"))
        .unwrap();

    assert_eq!(sourced, vec![hypr.join("a.conf")]);
}

#[test]
fn test_locate_root() {
    let (_temp, home, hypr) = create_home();
    let paths = HyprPaths::for_home(&home);

    let err = paths.locate_root().unwrap_err();
    assert!(matches!(err, HyprError::ConfigNotFound { .. }));
    assert!(!err.is_recoverable());

    write(&hypr.join("hyprland.conf"), "");
    assert_eq!(paths.locate_root().unwrap(), hypr.join("hyprland.conf"));
}
