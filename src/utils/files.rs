//! Source file resolution for `\input`, `\include` and `\subfile`
//!
//! The `FileResolver` trait hides where included files come from:
//! - `StdFileResolver`: the real filesystem, searching `TEXINPUTS`-style paths
//! - `MemoryFileResolver`: preloaded in-memory files (tests, embedding)
//! - `NoopFileResolver`: refuses every read

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Trait for resolving and reading LaTeX source files
pub trait FileResolver: Send + Sync {
    /// Read a file's contents
    fn read_file(&self, path: &str) -> Result<String, FileResolveError>;

    /// Check if a file exists
    fn file_exists(&self, path: &str) -> bool;

    /// Resolve a path written inside `base` to a path this resolver can read
    fn resolve_path(&self, base: &str, relative: &str) -> String;
}

/// Error type for file resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileResolveError {
    NotFound(String),
    ReadError(String),
    NotSupported(String),
}

impl std::fmt::Display for FileResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileResolveError::NotFound(path) => write!(f, "file not found: {}", path),
            FileResolveError::ReadError(msg) => write!(f, "read error: {}", msg),
            FileResolveError::NotSupported(msg) => write!(f, "not supported: {}", msg),
        }
    }
}

impl std::error::Error for FileResolveError {}

/// `name`, then `name.tex` unless the name already carries an extension
fn candidate_names(name: &str) -> Vec<String> {
    let mut names = vec![name.to_string()];
    if Path::new(name).extension().is_none() {
        names.push(format!("{}.tex", name));
    }
    names
}

#[cfg(not(target_os = "windows"))]
const PATH_SEP: char = ':';
#[cfg(target_os = "windows")]
const PATH_SEP: char = ';';

/// Filesystem resolver
///
/// Relative includes are looked up next to the including file first, then
/// in each search path in order.
#[derive(Debug, Clone, Default)]
pub struct StdFileResolver {
    search_paths: Vec<PathBuf>,
}

impl StdFileResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            search_paths: paths
                .into_iter()
                .map(|p| p.as_ref().to_path_buf())
                .collect(),
        }
    }

    /// Search paths taken from the `TEXINPUTS` environment variable
    pub fn from_env() -> Self {
        let paths = std::env::var("TEXINPUTS").unwrap_or_default();
        Self::with_search_paths(paths.split(PATH_SEP).filter(|p| !p.is_empty()))
    }

    pub fn add_search_path(&mut self, path: impl AsRef<Path>) {
        self.search_paths.push(path.as_ref().to_path_buf());
    }

    fn find_file(&self, path: &str) -> Option<PathBuf> {
        let direct = candidate_names(path)
            .into_iter()
            .map(PathBuf::from)
            .find(|p| p.is_file());
        if direct.is_some() || Path::new(path).is_absolute() {
            return direct;
        }

        self.search_paths.iter().find_map(|dir| {
            candidate_names(path)
                .into_iter()
                .map(|name| dir.join(name))
                .find(|p| p.is_file())
        })
    }
}

impl FileResolver for StdFileResolver {
    fn read_file(&self, path: &str) -> Result<String, FileResolveError> {
        let full_path = self
            .find_file(path)
            .ok_or_else(|| FileResolveError::NotFound(path.to_string()))?;
        std::fs::read_to_string(&full_path).map_err(|e| FileResolveError::ReadError(e.to_string()))
    }

    fn file_exists(&self, path: &str) -> bool {
        self.find_file(path).is_some()
    }

    fn resolve_path(&self, base: &str, relative: &str) -> String {
        let relative_path = Path::new(relative);
        if relative_path.is_absolute() {
            return relative.to_string();
        }
        match Path::new(base).parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                parent.join(relative_path).to_string_lossy().to_string()
            }
            _ => relative.to_string(),
        }
    }
}

/// In-memory resolver
#[derive(Debug, Clone, Default)]
pub struct MemoryFileResolver {
    files: HashMap<String, String>,
}

impl MemoryFileResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, path: &str, content: &str) {
        self.files.insert(path.to_string(), content.to_string());
    }

    /// Builder-style variant of [`add_file`](Self::add_file)
    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.add_file(path, content);
        self
    }
}

impl FileResolver for MemoryFileResolver {
    fn read_file(&self, path: &str) -> Result<String, FileResolveError> {
        candidate_names(path)
            .iter()
            .find_map(|name| self.files.get(name))
            .cloned()
            .ok_or_else(|| FileResolveError::NotFound(path.to_string()))
    }

    fn file_exists(&self, path: &str) -> bool {
        candidate_names(path)
            .iter()
            .any(|name| self.files.contains_key(name))
    }

    fn resolve_path(&self, base: &str, relative: &str) -> String {
        if relative.starts_with('/') {
            return relative.to_string();
        }
        match base.rfind('/') {
            Some(sep) => format!("{}/{}", &base[..sep], relative),
            None => relative.to_string(),
        }
    }
}

/// Resolver that cannot read anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFileResolver;

impl FileResolver for NoopFileResolver {
    fn read_file(&self, path: &str) -> Result<String, FileResolveError> {
        Err(FileResolveError::NotSupported(format!(
            "file reading disabled: {}",
            path
        )))
    }

    fn file_exists(&self, _path: &str) -> bool {
        false
    }

    fn resolve_path(&self, _base: &str, relative: &str) -> String {
        relative.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_resolver() {
        let resolver = MemoryFileResolver::new().with_file("intro.tex", "Hello");
        assert!(resolver.file_exists("intro.tex"));
        assert!(resolver.file_exists("intro"));
        assert_eq!(resolver.read_file("intro").unwrap(), "Hello");
        assert!(matches!(
            resolver.read_file("missing"),
            Err(FileResolveError::NotFound(_))
        ));
    }

    #[test]
    fn test_memory_resolve_path() {
        let resolver = MemoryFileResolver::new();
        assert_eq!(resolver.resolve_path("main.tex", "ch1"), "ch1");
        assert_eq!(
            resolver.resolve_path("chapters/main.tex", "ch1"),
            "chapters/ch1"
        );
        assert_eq!(resolver.resolve_path("a/main.tex", "/abs/x"), "/abs/x");
    }

    #[test]
    fn test_std_resolver_search_paths() {
        let dir = std::env::temp_dir().join(format!("texstrip-files-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("part.tex"), "From disk").unwrap();

        let resolver = StdFileResolver::with_search_paths([&dir]);
        assert!(resolver.file_exists("part"));
        assert_eq!(resolver.read_file("part").unwrap(), "From disk");
        assert!(!resolver.file_exists("nope"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_std_resolve_path() {
        let resolver = StdFileResolver::new();
        assert_eq!(resolver.resolve_path("main.tex", "ch1"), "ch1");
        let joined = resolver.resolve_path("book/main.tex", "ch1");
        assert_eq!(Path::new(&joined), Path::new("book").join("ch1"));
    }

    #[test]
    fn test_noop_resolver() {
        let resolver = NoopFileResolver;
        assert!(!resolver.file_exists("any.tex"));
        assert!(resolver.read_file("any.tex").is_err());
    }
}
