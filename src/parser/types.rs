//! Shared types for manifest parsing.
//!
//! This module defines the package.json structure and the [`DependencySet`]
//! handed to the usage analyzer: the universe of declared package names.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Represents the parts of a package.json file that matter for usage analysis.
///
/// # Example
///
/// ```
/// use usagescope::parser::types::PackageJson;
///
/// let json = r#"{"name": "my-app", "version": "1.0.0"}"#;
/// let pkg: PackageJson = serde_json::from_str(json).unwrap();
/// assert_eq!(pkg.name, Some("my-app".to_string()));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PackageJson {
    /// The name of the package.
    pub name: Option<String>,

    /// The version of the package (semver format).
    pub version: Option<String>,

    /// Production dependencies required at runtime.
    pub dependencies: Option<BTreeMap<String, String>>,

    /// Development-only dependencies (testing, building, etc.).
    #[serde(rename = "devDependencies")]
    pub dev_dependencies: Option<BTreeMap<String, String>>,
}

/// Mapping from declared package name to its version range.
///
/// Keys are unique and kept sorted, so every report built from a set
/// lists packages in the same order.
///
/// # Example
///
/// ```
/// use usagescope::parser::DependencySet;
///
/// let deps: DependencySet = [("lodash", "^4.17.21"), ("react", "^18.2.0")]
///     .into_iter()
///     .collect();
///
/// assert!(deps.contains("lodash"));
/// assert_eq!(deps.version("react"), Some("^18.2.0"));
/// assert_eq!(deps.names().collect::<Vec<_>>(), vec!["lodash", "react"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencySet(BTreeMap<String, String>);

impl DependencySet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a package. A later declaration of the same name replaces the version.
    pub fn insert(&mut self, name: impl Into<String>, version: impl Into<String>) {
        self.0.insert(name.into(), version.into());
    }

    /// Returns true if `name` is a declared package.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Returns the declared version range for `name`.
    pub fn version(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Declared package names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for DependencySet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = DependencySet::new();
        for (name, version) in iter {
            set.insert(name, version);
        }
        set
    }
}
