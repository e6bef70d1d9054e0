//! Parser for npm package.json manifests.
//!
//! Turns a package.json into the [`DependencySet`] the usage analyzer
//! consumes: production dependencies, optionally merged with dev ones.

use std::fs;
use std::path::Path;

use super::types::{DependencySet, PackageJson};

/// Errors that can occur during package.json parsing.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Failed to read the file from disk.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse JSON content.
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The package.json structure is invalid or missing required fields.
    #[error("Invalid package.json: {0}")]
    InvalidPackage(String),
}

/// Result type alias for manifest operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a package.json file from a file path.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use usagescope::parser::package_json::parse_file;
///
/// let pkg = parse_file(Path::new("package.json")).unwrap();
/// println!("Package: {:?}", pkg.name);
/// ```
pub fn parse_file(path: &Path) -> ParseResult<PackageJson> {
    let content = fs::read_to_string(path)?;
    parse_str(&content)
}

/// Parses a package.json from a string.
///
/// # Example
///
/// ```
/// use usagescope::parser::package_json::parse_str;
///
/// let json = r#"{"name": "my-app", "version": "1.0.0"}"#;
/// let pkg = parse_str(json).unwrap();
/// assert_eq!(pkg.name, Some("my-app".to_string()));
/// ```
pub fn parse_str(content: &str) -> ParseResult<PackageJson> {
    let pkg: PackageJson = serde_json::from_str(content)?;
    Ok(pkg)
}

/// Rejects dependency tables whose keys cannot be package names.
///
/// An empty manifest is fine: it simply yields an empty report.
pub fn validate(pkg: &PackageJson) -> ParseResult<()> {
    let tables = [pkg.dependencies.as_ref(), pkg.dev_dependencies.as_ref()];
    for name in tables.into_iter().flatten().flat_map(|t| t.keys()) {
        if name.trim().is_empty() {
            return Err(ParseError::InvalidPackage(
                "dependency with an empty name".to_string(),
            ));
        }
        if name.starts_with('.') || name.starts_with('/') {
            return Err(ParseError::InvalidPackage(format!(
                "'{}' is a path, not a package name",
                name
            )));
        }
    }
    Ok(())
}

/// Builds the analyzer input from a manifest.
///
/// When a package is declared in both tables the production range wins.
pub fn dependency_set(pkg: &PackageJson, include_dev: bool) -> DependencySet {
    let mut set = DependencySet::new();

    // Dev first so production entries overwrite duplicates.
    if include_dev {
        if let Some(ref dev_dependencies) = pkg.dev_dependencies {
            for (name, version) in dev_dependencies {
                set.insert(name.as_str(), version.as_str());
            }
        }
    }

    if let Some(ref dependencies) = pkg.dependencies {
        for (name, version) in dependencies {
            set.insert(name.as_str(), version.as_str());
        }
    }

    set
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_PACKAGE_JSON: &str = r#"{
        "name": "test-app",
        "version": "1.0.0",
        "dependencies": {
            "react": "^18.2.0",
            "lodash": "^4.17.21",
            "@babel/core": "^7.23.0"
        },
        "devDependencies": {
            "typescript": "^5.0.0",
            "react": "^18.0.0",
            "jest": "^29.0.0"
        }
    }"#;

    #[test]
    fn test_parse_str_valid() {
        let pkg = parse_str(SAMPLE_PACKAGE_JSON).unwrap();

        assert_eq!(pkg.name, Some("test-app".to_string()));
        assert_eq!(pkg.version, Some("1.0.0".to_string()));
        assert_eq!(pkg.dependencies.as_ref().map(|d| d.len()), Some(3));
        assert_eq!(pkg.dev_dependencies.as_ref().map(|d| d.len()), Some(3));
    }

    #[test]
    fn test_parse_str_invalid_json() {
        let result = parse_str("{ invalid json }");

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ParseError::JsonError(_)));
    }

    #[test]
    fn test_validate_empty_manifest_is_ok() {
        let pkg = parse_str("{}").unwrap();
        assert!(validate(&pkg).is_ok());
    }

    #[test]
    fn test_validate_rejects_path_keys() {
        let pkg = parse_str(r#"{"dependencies": {"./local": "1.0.0"}}"#).unwrap();
        let result = validate(&pkg);

        assert!(matches!(result, Err(ParseError::InvalidPackage(_))));
    }

    #[test]
    fn test_dependency_set_merges_dev() {
        let pkg = parse_str(SAMPLE_PACKAGE_JSON).unwrap();
        let deps = dependency_set(&pkg, true);

        assert_eq!(deps.len(), 5);
        assert!(deps.contains("jest"));
        assert!(deps.contains("@babel/core"));
        // production range wins over the dev duplicate
        assert_eq!(deps.version("react"), Some("^18.2.0"));
    }

    #[test]
    fn test_dependency_set_production_only() {
        let pkg = parse_str(SAMPLE_PACKAGE_JSON).unwrap();
        let deps = dependency_set(&pkg, false);

        assert_eq!(deps.len(), 3);
        assert!(!deps.contains("typescript"));
    }

    #[test]
    fn test_parse_str_with_extra_fields() {
        let json = r#"{
            "name": "with-extras",
            "scripts": {"build": "tsc"},
            "peerDependencies": {"react": ">=16.8.0"},
            "dependencies": {"express": "^4.18.0"}
        }"#;

        let pkg = parse_str(json).unwrap();
        let deps = dependency_set(&pkg, true);
        assert_eq!(deps.names().collect::<Vec<_>>(), vec!["express"]);
    }

    #[test]
    fn test_parse_file_missing() {
        let result = parse_file(Path::new("/definitely/not/here/package.json"));
        assert!(matches!(result, Err(ParseError::IoError(_))));
    }
}
