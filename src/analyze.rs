//! Source-dependency analyzer for app project trees.
//!
//! Walks a project root, scans Python and Dart sources for imports,
//! resolves them to files inside the tree, and reports the dependency
//! hierarchy plus files nothing references. Kotlin/Java/XML files are
//! collected so they show up in the unused report, but their imports
//! are not scanned.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;
use walkdir::WalkDir;

/// File extensions the analyzer collects.
const SOURCE_EXTENSIONS: &[&str] = &["py", "dart", "kt", "java", "xml"];

// ══════════════════════════════════════════════════════════════════════════
// Import Patterns
// ══════════════════════════════════════════════════════════════════════════

/// Compiled regexes for import scanning.
pub struct ImportPatterns {
    py_import: Regex,
    py_from: Regex,
    dart_import: Regex,
}

impl ImportPatterns {
    pub fn new() -> Result<Self> {
        Ok(Self {
            py_import: Regex::new(r"(?m)^\s*import\s+(.+)$")?,
            py_from: Regex::new(r"(?m)^\s*from\s+([\w.]+)\s+import\b")?,
            dart_import: Regex::new(r#"import\s+['"]([^'"]+)['"]"#)?,
        })
    }
}

/// Extract imported module names from Python source.
///
/// `import a, b as c` yields `a` and `b`; `from x.y import z` yields `x.y`.
fn python_imports(patterns: &ImportPatterns, content: &str) -> Vec<String> {
    let mut specs = Vec::new();

    for cap in patterns.py_import.captures_iter(content) {
        for part in cap[1].split(',') {
            // Strip any "as alias" suffix
            if let Some(name) = part.split_whitespace().next() {
                specs.push(name.to_string());
            }
        }
    }

    for cap in patterns.py_from.captures_iter(content) {
        specs.push(cap[1].to_string());
    }

    specs
}

/// Extract imported URIs from Dart source.
fn dart_imports(patterns: &ImportPatterns, content: &str) -> Vec<String> {
    patterns
        .dart_import
        .captures_iter(content)
        .map(|cap| cap[1].to_string())
        .collect()
}

// ══════════════════════════════════════════════════════════════════════════
// Project Analyzer
// ══════════════════════════════════════════════════════════════════════════

pub struct ProjectAnalyzer {
    root: PathBuf,
    all_files: BTreeSet<PathBuf>,
    dependencies: BTreeMap<PathBuf, BTreeSet<PathBuf>>,
    unused: Vec<PathBuf>,
}

impl ProjectAnalyzer {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            all_files: BTreeSet::new(),
            dependencies: BTreeMap::new(),
            unused: Vec::new(),
        }
    }

    /// Run the full analysis: collect, scan, detect, report.
    pub fn analyze(&mut self) -> Result<()> {
        let patterns = ImportPatterns::new()?;

        self.collect_files();
        self.scan_imports(&patterns);
        self.find_unused();
        self.log_results();

        Ok(())
    }

    /// Recursively collect all source files under the project root.
    fn collect_files(&mut self) {
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    log::warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let ext = entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("")
                .to_ascii_lowercase();
            if SOURCE_EXTENSIONS.contains(&ext.as_str()) {
                self.all_files.insert(entry.into_path());
            }
        }

        log::info!("Found {} source files", self.all_files.len());
    }

    /// Scan every collected file for imports and record resolved targets.
    fn scan_imports(&mut self, patterns: &ImportPatterns) {
        let files: Vec<PathBuf> = self.all_files.iter().cloned().collect();

        for file in files {
            let content = match fs::read_to_string(&file) {
                Ok(c) => c,
                Err(e) => {
                    log::error!("Failed to read {}: {}", file.display(), e);
                    continue;
                }
            };

            let specs = match file.extension().and_then(|e| e.to_str()) {
                Some("py") => python_imports(patterns, &content),
                Some("dart") => dart_imports(patterns, &content),
                _ => Vec::new(),
            };

            for spec in specs {
                if let Some(target) = self.resolve_import(&file, &spec) {
                    self.dependencies
                        .entry(file.clone())
                        .or_default()
                        .insert(target);
                }
            }
        }
    }

    /// Resolve an import spec to a file inside the tree, if one exists.
    ///
    /// `package:` URIs resolve under `<root>/lib`; quoted `.dart`/`.py`
    /// paths resolve relative to the importing file; dotted Python
    /// modules resolve to `a/b.py` next to the importing file or under
    /// the project root. Imports that land outside the tree (stdlib,
    /// third-party packages) resolve to nothing and are dropped.
    fn resolve_import(&self, source: &Path, spec: &str) -> Option<PathBuf> {
        let source_dir = source.parent()?;

        let candidates: Vec<PathBuf> = if let Some(rest) = spec.strip_prefix("package:") {
            vec![self.root.join("lib").join(rest)]
        } else if spec.ends_with(".dart") || spec.ends_with(".py") {
            vec![source_dir.join(spec)]
        } else {
            let rel = module_to_rel_path(spec)?;
            vec![source_dir.join(&rel), self.root.join(&rel)]
        };

        candidates
            .into_iter()
            .map(|p| normalize(&p))
            .find(|p| p.is_file())
    }

    /// A file is unused when no other file's resolved imports reference it.
    fn find_unused(&mut self) {
        let referenced: BTreeSet<&PathBuf> = self.dependencies.values().flatten().collect();

        self.unused = self
            .all_files
            .iter()
            .filter(|f| !referenced.contains(f))
            .cloned()
            .collect();
    }

    /// Log the dependency hierarchy, the unused files, and a summary.
    fn log_results(&self) {
        log::info!("=== Project hierarchy ===");
        for (file, deps) in &self.dependencies {
            log::info!("{} depends on:", self.relative(file).display());
            for dep in deps {
                log::info!("  -> {}", self.relative(dep).display());
            }
        }

        log::info!("=== Unused files ===");
        for file in &self.unused {
            log::info!("{}", self.relative(file).display());
        }

        log::info!(
            "Total: {} files, {} unused",
            self.all_files.len(),
            self.unused.len()
        );
    }

    /// The dependency graph with paths relative to the project root.
    pub fn dependency_graph(&self) -> BTreeMap<String, Vec<String>> {
        self.dependencies
            .iter()
            .map(|(file, deps)| {
                (
                    self.relative(file).display().to_string(),
                    deps.iter()
                        .map(|d| self.relative(d).display().to_string())
                        .collect(),
                )
            })
            .collect()
    }

    /// Write the dependency graph as JSON.
    pub fn export_graph(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.dependency_graph())?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write dependency graph: {:?}", path))?;
        Ok(())
    }

    pub fn unused_files(&self) -> &[PathBuf] {
        &self.unused
    }

    pub fn file_count(&self) -> usize {
        self.all_files.len()
    }

    fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Helper Functions
// ══════════════════════════════════════════════════════════════════════════

/// Convert a dotted module name (`a.b`) to a relative path (`a/b.py`).
fn module_to_rel_path(module: &str) -> Option<PathBuf> {
    let mut path = PathBuf::new();
    for segment in module.split('.').filter(|s| !s.is_empty()) {
        path.push(segment);
    }
    if path.as_os_str().is_empty() {
        return None;
    }
    path.set_extension("py");
    Some(path)
}

/// Fold `.` and `..` segments out of a path without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

// ══════════════════════════════════════════════════════════════════════════
// Tests
// ══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_project(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("lernkarten-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn python_import_lines_are_extracted() {
        let patterns = ImportPatterns::new().unwrap();
        let content = "import os\nimport re, json as j\nfrom collections import defaultdict\nx = 1\n";
        let specs = python_imports(&patterns, content);
        assert_eq!(specs, vec!["os", "re", "json", "collections"]);
    }

    #[test]
    fn dart_import_uris_are_extracted() {
        let patterns = ImportPatterns::new().unwrap();
        let content = "import 'package:app/screens/home.dart';\nimport \"widgets/button.dart\";\n";
        let specs = dart_imports(&patterns, content);
        assert_eq!(specs, vec!["package:app/screens/home.dart", "widgets/button.dart"]);
    }

    #[test]
    fn package_imports_resolve_under_lib() {
        let root = scratch_project("pkg-resolve");
        write(&root.join("lib/app/screens/home.dart"), "");
        write(
            &root.join("lib/main.dart"),
            "import 'package:app/screens/home.dart';\n",
        );

        let analyzer = ProjectAnalyzer::new(root.clone());
        let target =
            analyzer.resolve_import(&root.join("lib/main.dart"), "package:app/screens/home.dart");
        assert_eq!(target, Some(root.join("lib/app/screens/home.dart")));
    }

    #[test]
    fn relative_dart_imports_resolve_next_to_the_source() {
        let root = scratch_project("rel-dart");
        write(&root.join("lib/widgets/button.dart"), "");
        write(
            &root.join("lib/main.dart"),
            "import 'widgets/button.dart';\n",
        );

        let analyzer = ProjectAnalyzer::new(root.clone());
        let target = analyzer.resolve_import(&root.join("lib/main.dart"), "widgets/button.dart");
        assert_eq!(target, Some(root.join("lib/widgets/button.dart")));
    }

    #[test]
    fn dotted_python_modules_resolve_to_files() {
        let root = scratch_project("py-resolve");
        write(&root.join("app/models.py"), "");
        write(&root.join("app/main.py"), "from models import thing\n");

        let analyzer = ProjectAnalyzer::new(root.clone());
        let target = analyzer.resolve_import(&root.join("app/main.py"), "models");
        assert_eq!(target, Some(root.join("app/models.py")));
    }

    #[test]
    fn stdlib_imports_resolve_to_nothing() {
        let root = scratch_project("stdlib");
        write(&root.join("main.py"), "import os\n");

        let analyzer = ProjectAnalyzer::new(root.clone());
        assert_eq!(analyzer.resolve_import(&root.join("main.py"), "os"), None);
    }

    #[test]
    fn unreferenced_files_are_reported_unused() {
        let root = scratch_project("unused");
        write(
            &root.join("lib/main.dart"),
            "import 'package:app/home.dart';\n",
        );
        write(&root.join("lib/app/home.dart"), "");
        write(&root.join("orphan.kt"), "class Orphan\n");

        let mut analyzer = ProjectAnalyzer::new(root.clone());
        analyzer.analyze().unwrap();

        assert_eq!(analyzer.file_count(), 3);
        let unused = analyzer.unused_files();
        assert!(unused.contains(&root.join("orphan.kt")));
        assert!(!unused.contains(&root.join("lib/app/home.dart")));
    }

    #[test]
    fn dependency_graph_uses_relative_paths() {
        let root = scratch_project("graph");
        write(
            &root.join("lib/main.dart"),
            "import 'package:app/home.dart';\n",
        );
        write(&root.join("lib/app/home.dart"), "");

        let mut analyzer = ProjectAnalyzer::new(root.clone());
        analyzer.analyze().unwrap();

        let graph = analyzer.dependency_graph();
        let deps = graph.get("lib/main.dart").unwrap();
        assert_eq!(deps, &vec!["lib/app/home.dart".to_string()]);
    }

    #[test]
    fn exported_graph_is_valid_json() {
        let root = scratch_project("export");
        write(
            &root.join("lib/main.dart"),
            "import 'package:app/home.dart';\n",
        );
        write(&root.join("lib/app/home.dart"), "");

        let mut analyzer = ProjectAnalyzer::new(root.clone());
        analyzer.analyze().unwrap();

        let out = root.join("dependency_graph.json");
        analyzer.export_graph(&out).unwrap();

        let json = fs::read_to_string(&out).unwrap();
        let graph: BTreeMap<String, Vec<String>> = serde_json::from_str(&json).unwrap();
        assert!(graph.contains_key("lib/main.dart"));
    }

    #[test]
    fn parent_segments_normalize_away() {
        assert_eq!(
            normalize(Path::new("/a/b/../c/./d.py")),
            PathBuf::from("/a/c/d.py")
        );
    }
}
