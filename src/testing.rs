//! Testing utilities for typepick
//!
//! Shared fixtures for unit tests: a small catalog of type names spread over
//! a few namespaces, and a tree built from it.
//!
//! Only available when compiled with `cfg(test)`.

use crate::catalog::{Catalog, CatalogOptions};
use crate::tree::PathTree;

/// Label used for the "no value" entry in fixtures
pub const NULL_LABEL: &str = "(None)";

/// Type names used across tests
///
/// With the default grouping the tree looks like:
///
/// ```text
/// Audio/{MusicPlayer, SoundManager}
/// Game/Loggers/{AnotherLogger, FileLogger, GreetingLogger}
/// Game/Player/{PlayerController, PlayerHealth}
/// Game/UI/{HealthBar, MainMenu}
/// GlobalSettings
/// Utils/Collections/PriorityQueue
/// ```
pub const SAMPLE_TYPES: &[&str] = &[
    "Game.Loggers.GreetingLogger",
    "Game.Loggers.AnotherLogger",
    "Game.Loggers.FileLogger",
    "Game.Player.PlayerController",
    "Game.Player.PlayerHealth",
    "Game.UI.HealthBar",
    "Game.UI.MainMenu",
    "Audio.SoundManager",
    "Audio.MusicPlayer",
    "GlobalSettings",
    "Utils.Collections.PriorityQueue",
];

/// Catalog of [`SAMPLE_TYPES`] with default options
#[must_use]
pub fn sample_catalog() -> Catalog {
    Catalog::from_names(SAMPLE_TYPES, &CatalogOptions::default())
}

/// Tree of [`SAMPLE_TYPES`], all folders collapsed
///
/// # Panics
/// Panics if the fixture names collide, which would be a bug in the fixture.
#[must_use]
pub fn sample_tree(with_null: bool) -> PathTree<String> {
    let (tree, rejected) = sample_catalog().build_tree(with_null.then_some(NULL_LABEL));
    assert!(rejected.is_empty(), "fixture collision: {rejected:?}");
    tree
}
