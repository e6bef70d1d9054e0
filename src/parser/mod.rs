//! Manifest parsing for dependency usage analysis.
//!
//! Reads package.json and produces the [`DependencySet`] that defines which
//! module specifiers the analyzer may attribute usage to.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use usagescope::parser::{dependency_set, parse_file};
//!
//! let pkg = parse_file(Path::new("package.json")).unwrap();
//! let deps = dependency_set(&pkg, true);
//! println!("Tracking {} packages", deps.len());
//! ```

pub mod package_json;
pub mod types;

pub use package_json::{dependency_set, parse_file, parse_str, validate, ParseError, ParseResult};

pub use types::{DependencySet, PackageJson};
