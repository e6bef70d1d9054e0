//! Identifier to package mapping for member calls with no tracked import.
//!
//! This is a best-effort heuristic, not name resolution. It is only consulted
//! when the receiver of `ident.method(...)` was not bound by any import in the
//! same file.

use std::collections::BTreeMap;

use crate::parser::DependencySet;

/// Identifiers conventionally bound to a well-known package.
pub const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("_", "lodash"),
    ("$", "jquery"),
    ("jQuery", "jquery"),
    ("React", "react"),
    ("ReactDOM", "react-dom"),
    ("Vue", "vue"),
    ("axios", "axios"),
    ("moment", "moment"),
    ("dayjs", "dayjs"),
    ("d3", "d3"),
    ("R", "ramda"),
    ("Immutable", "immutable"),
    ("Rx", "rxjs"),
];

/// Lowercases and drops `-` and `_` so `myPkg` and `my-pkg` compare equal.
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Alias table plus fuzzy name matching against declared dependencies.
#[derive(Debug, Clone)]
pub struct IdentifierMapper {
    aliases: BTreeMap<String, String>,
}

impl IdentifierMapper {
    /// Creates a mapper with the built-in alias table.
    pub fn new() -> Self {
        let aliases = DEFAULT_ALIASES
            .iter()
            .map(|(ident, pkg)| (ident.to_string(), pkg.to_string()))
            .collect();
        Self { aliases }
    }

    /// Layers extra `identifier -> package` entries over the built-in table.
    pub fn with_aliases<I, K, V>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (ident, pkg) in extra {
            self.aliases.insert(ident.into(), pkg.into());
        }
        self
    }

    /// Maps `identifier` to a declared package, if any plausibly matches.
    ///
    /// Order: alias table (only if the aliased package is declared), then a
    /// case-insensitive name match, then a match ignoring `-` and `_`.
    pub fn map_identifier<'d>(
        &self,
        identifier: &str,
        declared: &'d DependencySet,
    ) -> Option<&'d str> {
        if identifier.is_empty() {
            return None;
        }

        if let Some(pkg) = self.aliases.get(identifier) {
            if let Some(name) = declared.names().find(|name| *name == pkg.as_str()) {
                return Some(name);
            }
        }

        if let Some(name) = declared
            .names()
            .find(|name| name.eq_ignore_ascii_case(identifier))
        {
            return Some(name);
        }

        let wanted = normalize_name(identifier);
        declared
            .names()
            .find(|name| normalize_name(name) == wanted)
    }
}

impl Default for IdentifierMapper {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps an identifier using the built-in alias table only.
pub fn map_identifier<'d>(identifier: &str, declared: &'d DependencySet) -> Option<&'d str> {
    IdentifierMapper::new().map_identifier(identifier, declared)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declared(names: &[&str]) -> DependencySet {
        names.iter().map(|n| (*n, "1.0.0")).collect()
    }

    #[test]
    fn test_alias_requires_declared_package() {
        let deps = declared(&["lodash"]);
        assert_eq!(map_identifier("_", &deps), Some("lodash"));
        assert_eq!(map_identifier("$", &deps), None);
    }

    #[test]
    fn test_common_aliases() {
        let deps = declared(&["jquery", "react", "vue", "axios", "moment"]);
        assert_eq!(map_identifier("$", &deps), Some("jquery"));
        assert_eq!(map_identifier("React", &deps), Some("react"));
        assert_eq!(map_identifier("Vue", &deps), Some("vue"));
        assert_eq!(map_identifier("axios", &deps), Some("axios"));
        assert_eq!(map_identifier("moment", &deps), Some("moment"));
    }

    #[test]
    fn test_case_insensitive_match() {
        let deps = declared(&["express"]);
        assert_eq!(map_identifier("Express", &deps), Some("express"));
    }

    #[test]
    fn test_normalized_match() {
        let deps = declared(&["my-pkg", "other_lib"]);
        assert_eq!(map_identifier("myPkg", &deps), Some("my-pkg"));
        assert_eq!(map_identifier("otherLib", &deps), Some("other_lib"));
    }

    #[test]
    fn test_no_match() {
        let deps = declared(&["lodash"]);
        assert_eq!(map_identifier("console", &deps), None);
        assert_eq!(map_identifier("", &deps), None);
    }

    #[test]
    fn test_extra_aliases_override() {
        let deps = declared(&["lodash-es"]);
        let mapper = IdentifierMapper::new().with_aliases([("_", "lodash-es")]);
        assert_eq!(mapper.map_identifier("_", &deps), Some("lodash-es"));
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("My-Pkg_Name"), "mypkgname");
    }
}
