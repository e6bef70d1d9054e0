//! Loading a project from disk into analyzer inputs.
//!
//! Reads `package.json` for the dependency set and walks the tree for
//! JavaScript/TypeScript sources. File order is sorted by path so repeated
//! runs see the same batch.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::analysis::SourceFile;
use crate::config::AnalyzerConfig;
use crate::parser::{self, DependencySet};

/// Extensions collected by the project walk.
pub const SOURCE_EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs", "ts", "tsx", "mts", "cts"];

/// Errors that can occur while loading a project.
#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("Failed to load manifest {path}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: parser::ParseError,
    },

    #[error("Failed to walk project: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

pub type ProjectResult<T> = Result<T, ProjectError>;

/// Inputs for one analysis run.
#[derive(Debug, Clone, Default)]
pub struct ProjectSources {
    pub name: Option<String>,
    pub dependencies: DependencySet,
    pub files: Vec<SourceFile>,
}

/// Returns true if the path has a JavaScript/TypeScript extension.
pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            SOURCE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Load the manifest and every source file under `root`.
pub fn load_project(root: &Path, config: &AnalyzerConfig) -> ProjectResult<ProjectSources> {
    if !root.is_dir() {
        return Err(ProjectError::NotADirectory(root.to_path_buf()));
    }

    let manifest_path = root.join("package.json");
    let manifest = parser::parse_file(&manifest_path).and_then(|pkg| {
        parser::validate(&pkg)?;
        Ok(pkg)
    });
    let manifest = manifest.map_err(|source| ProjectError::Manifest {
        path: manifest_path.clone(),
        source,
    })?;

    let dependencies = parser::dependency_set(&manifest, config.include_dev_dependencies);
    debug!(count = dependencies.len(), "declared dependencies");

    Ok(ProjectSources {
        name: manifest.name,
        dependencies,
        files: collect_sources(root, &config.ignored_dirs)?,
    })
}

/// Collect JavaScript/TypeScript sources under `root`, sorted by path.
///
/// Names are relative to `root` with `/` separators. Files that are not
/// valid UTF-8 are skipped with a warning.
pub fn collect_sources(root: &Path, ignored_dirs: &[String]) -> ProjectResult<Vec<SourceFile>> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_ignored_dir(e, ignored_dirs));

    for entry in walker {
        let entry = entry?;
        let path = entry.path();

        if !entry.file_type().is_file() || !is_source_file(path) {
            continue;
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!(file = %path.display(), error = %e, "skipping unreadable file");
                continue;
            }
        };

        files.push(SourceFile::new(relative_name(root, path), content));
    }

    Ok(files)
}

fn relative_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Check if a directory should be ignored during traversal.
fn is_ignored_dir(entry: &walkdir::DirEntry, ignored_dirs: &[String]) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }

    let name = entry.file_name().to_string_lossy();
    ignored_dirs.iter().any(|dir| dir.as_str() == name.as_ref())
}
