//! Integration tests for typepick
//!
//! These tests drive the public API end to end: name lists on disk become a
//! catalog, the catalog becomes a tree, and key sequences run picker
//! sessions over it.

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use typepick::catalog::{Catalog, CatalogOptions, Grouping};
use typepick::config::PickConfig;
use typepick::matcher::{MatcherKind, WordStartMatcher, score_and_include};
use typepick::picker::{KeyOutcome, Mode, Picker, PickerKey, PickerOptions, SessionOutcome};
use typepick::tree::{PathTree, Selection, TreeError};

const TYPES: &str = "\
# gameplay
Game.Loggers.GreetingLogger
Game.Loggers.AnotherLogger
Game.Loggers.FileLogger
Game.Player.PlayerController
Game.Player.PlayerHealth
Game.UI.HealthBar
Game.UI.MainMenu

# audio
Audio.SoundManager
Audio.MusicPlayer
GlobalSettings
Utils.Collections.PriorityQueue
";

fn write_types(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("types.txt");
    fs::write(&path, TYPES).unwrap();
    path
}

fn session(path: &Path) -> Picker<String> {
    let catalog = Catalog::from_path(path, &CatalogOptions::default()).unwrap();
    let (tree, rejected) = catalog.build_tree(Some("(None)"));
    assert!(rejected.is_empty());
    Picker::new(tree, MatcherKind::WordStart.build(), PickerOptions::default())
}

fn typed(text: &str) -> Vec<PickerKey> {
    text.chars().map(PickerKey::Char).collect()
}

#[test]
fn test_initials_query() {
    assert!(score_and_include("GL", "GreetingLogger").included);
    assert!(!score_and_include("GL", "AnotherLogger").included);
}

#[test]
fn test_candidate_matches_itself() {
    for name in ["GreetingLogger", "ui", "A.B+C", "x"] {
        assert!(score_and_include(name, name).included, "{name}");
    }
}

#[test]
fn test_shared_folders() {
    let mut tree: PathTree<u8> = PathTree::new();
    tree.insert("A/B/C", "C", 1).unwrap();
    tree.insert("A/B/D", "D", 2).unwrap();

    let top = tree.children(tree.root());
    assert_eq!(top.len(), 1);
    let a = top[0];
    assert!(tree.is_folder(a));

    let b = tree.children(a);
    assert_eq!(b.len(), 1);
    let leaves: Vec<&str> = tree
        .children(b[0])
        .iter()
        .map(|&id| tree.node(id).name())
        .collect();
    assert_eq!(leaves, vec!["C", "D"]);
}

#[test]
fn test_duplicate_leaf_rejected() {
    let mut tree: PathTree<u8> = PathTree::new();
    tree.insert("X", "X", 1).unwrap();

    let err = tree.insert("X", "X", 2).unwrap_err();
    assert!(matches!(err, TreeError::DuplicatePath { .. }));
    assert_eq!(tree.leaf_count(), 1);
    assert_eq!(tree.find_value(&2), None);
}

#[test]
fn test_filter_is_stable_and_empty_query_is_empty() {
    let dir = TempDir::new().unwrap();
    let catalog = Catalog::from_path(&write_types(&dir), &CatalogOptions::default()).unwrap();
    let (tree, _) = catalog.build_tree(None);

    let first = tree.filter_by_query("Logger", &mut WordStartMatcher);
    let second = tree.filter_by_query("Logger", &mut WordStartMatcher);
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);

    assert!(tree.filter_by_query("", &mut WordStartMatcher).is_empty());
}

#[test]
fn test_search_and_pick() {
    let dir = TempDir::new().unwrap();
    let mut picker = session(&write_types(&dir));

    let mut keys = typed("Main");
    keys.push(PickerKey::Enter);

    assert_eq!(
        picker.run(keys),
        SessionOutcome::Finalized(Some("Game.UI.MainMenu".to_string()))
    );
}

#[test]
fn test_browse_and_pick() {
    let dir = TempDir::new().unwrap();
    let mut picker = session(&write_types(&dir));
    assert_eq!(picker.selection(), Selection::Null);

    // null row -> Audio, open it, step inside, pick
    let outcome = picker.run([
        PickerKey::Down,
        PickerKey::Right,
        PickerKey::Right,
        PickerKey::Enter,
    ]);

    assert_eq!(
        outcome,
        SessionOutcome::Finalized(Some("Audio.MusicPlayer".to_string()))
    );
}

#[test]
fn test_pick_none_entry() {
    let dir = TempDir::new().unwrap();
    let mut picker = session(&write_types(&dir));

    assert_eq!(picker.run([PickerKey::Enter]), SessionOutcome::Finalized(None));
}

#[test]
fn test_single_notification() {
    let dir = TempDir::new().unwrap();
    let mut picker = session(&write_types(&dir));
    picker.set_query("PQ");

    let outcomes: Vec<KeyOutcome<String>> = [PickerKey::Enter, PickerKey::Enter, PickerKey::Escape]
        .into_iter()
        .map(|key| picker.handle_key(key))
        .collect();

    let finalized = outcomes
        .iter()
        .filter(|o| matches!(o, KeyOutcome::Finalized(_)))
        .count();
    assert_eq!(finalized, 1);
    assert_eq!(outcomes[1], KeyOutcome::Ignored);
    assert_eq!(outcomes[2], KeyOutcome::Ignored);
    assert!(picker.is_finished());
}

#[test]
fn test_cancel() {
    let dir = TempDir::new().unwrap();
    let mut picker = session(&write_types(&dir));

    assert_eq!(
        picker.run([PickerKey::Down, PickerKey::Escape, PickerKey::Enter]),
        SessionOutcome::Cancelled
    );
}

#[test]
fn test_clearing_query_keeps_selection_visible() {
    let dir = TempDir::new().unwrap();
    let mut picker = session(&write_types(&dir));

    let mut keys = typed("PQ");
    keys.extend([PickerKey::Backspace, PickerKey::Backspace]);
    assert_eq!(picker.run(keys), SessionOutcome::Pending);

    assert_eq!(picker.mode(), Mode::Browsing);
    assert_eq!(
        picker.selected_value().map(String::as_str),
        Some("Utils.Collections.PriorityQueue")
    );
    let id = picker.selection().node().unwrap();
    assert!(picker.tree().is_visible(id));
}

#[test]
fn test_small_catalog_disables_typing() {
    let catalog = Catalog::from_names(["A.One", "A.Two", "B.Three"], &CatalogOptions::default());
    let (tree, _) = catalog.build_tree(None);
    let mut picker = Picker::new(tree, MatcherKind::WordStart.build(), PickerOptions::default());

    assert!(!picker.search_enabled());
    assert_eq!(picker.handle_key(PickerKey::Char('T')), KeyOutcome::Ignored);
    assert_eq!(picker.query(), "");
}

#[test]
fn test_config_drives_layout() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        "grouping = \"none\"\nshort_names = true\nexclude = [\"Game.*\"]\ninclude_none = false\n",
    )
    .unwrap();

    let config = PickConfig::load(Some(&config_path)).unwrap();
    assert_eq!(config.grouping, Grouping::None);

    let catalog = Catalog::from_path(&write_types(&dir), &config.catalog_options().unwrap()).unwrap();
    let (tree, rejected) = catalog.build_tree(config.null_label());

    assert!(rejected.is_empty());
    let names: Vec<&str> = tree
        .children(tree.root())
        .iter()
        .map(|&id| tree.node(id).name())
        .collect();
    assert_eq!(
        names,
        vec!["GlobalSettings", "MusicPlayer", "PriorityQueue", "SoundManager"]
    );
}
