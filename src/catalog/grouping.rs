//! How type names are laid out as tree paths

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Separator between namespace segments in a type name
pub const NAMESPACE_SEPARATOR: char = '.';

/// Separator between an outer type and a nested type
pub const NESTED_SEPARATOR: char = '+';

/// Display layout of the candidate tree
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Grouping {
    /// Every type is a top-level entry
    None,
    /// One folder per namespace segment: `A.B.C` → `A/B/C`
    #[default]
    ByNamespace,
    /// One folder per whole namespace: `A.B.C` → `A.B/C`
    ByNamespaceFlat,
}

/// A type name split into namespace and own name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeName<'a> {
    /// Namespace without trailing separator; empty for global types
    pub namespace: &'a str,
    /// Type name including any nesting (`Outer+Inner`)
    pub name: &'a str,
}

impl<'a> TypeName<'a> {
    /// Split a full name such as `Game.Loggers.Outer+Inner`
    ///
    /// Dots after the first nesting marker belong to nested names, not the
    /// namespace.
    #[must_use]
    pub fn parse(full_name: &'a str) -> Self {
        let outer_end = full_name.find(NESTED_SEPARATOR).unwrap_or(full_name.len());
        match full_name[..outer_end].rfind(NAMESPACE_SEPARATOR) {
            Some(dot) => Self {
                namespace: &full_name[..dot],
                name: &full_name[dot + 1..],
            },
            None => Self {
                namespace: "",
                name: full_name,
            },
        }
    }

    /// Own name with nesting markers rendered as dots
    #[must_use]
    pub fn display_name(&self) -> String {
        self.name.replace(NESTED_SEPARATOR, ".")
    }
}

/// Key the matcher scores against: the full name with nesting as dots
#[must_use]
pub fn search_key(full_name: &str) -> String {
    full_name.replace(NESTED_SEPARATOR, ".")
}

impl Grouping {
    /// Tree path for a full type name
    ///
    /// `short_names` only affects [`Grouping::None`], where it drops the
    /// namespace from the leaf label.
    #[must_use]
    pub fn display_path(self, full_name: &str, short_names: bool) -> String {
        let parsed = TypeName::parse(full_name);
        let name = parsed.display_name();

        match self {
            Self::None if short_names => name,
            Self::None => search_key(full_name),
            _ if parsed.namespace.is_empty() => name,
            Self::ByNamespace => format!(
                "{}/{name}",
                parsed.namespace.replace(NAMESPACE_SEPARATOR, "/")
            ),
            Self::ByNamespaceFlat => format!("{}/{name}", parsed.namespace),
        }
    }
}
