//
//  Copyright (C) 2022-2024  Chase Ruskin
//
//  This program is free software: you can redistribute it and/or modify
//  it under the terms of the GNU General Public License as published by
//  the Free Software Foundation, either version 3 of the License, or
//  (at your option) any later version.
//
//  This program is distributed in the hope that it will be useful,
//  but WITHOUT ANY WARRANTY; without even the implied warranty of
//  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//  GNU General Public License for more details.
//
//  You should have received a copy of the GNU General Public License
//  along with this program.  If not, see <http://www.gnu.org/licenses/>.
//

use glob::{Pattern, PatternError};
use serde::de::{self};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::util::filesystem;

/// Number of levels searched when a caller does not specify a depth.
pub const DEFAULT_DEPTH: usize = 5;

/// A glob-style pattern matched against a file's basename (ex: `*.v`).
#[derive(Debug, PartialEq, Clone)]
pub struct ExtensionPattern(Pattern);

impl ExtensionPattern {
    /// Checks if the final component of `path` matches the pattern.
    pub fn matches(&self, path: &Path) -> bool {
        match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => self.0.matches_with(name, MATCH_OPTS),
            None => false,
        }
    }
}

const MATCH_OPTS: glob::MatchOptions = glob::MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

#[derive(Debug)]
pub enum PatternErr {
    Empty,
    Invalid(String, PatternError),
}

impl std::error::Error for PatternErr {}

impl fmt::Display for PatternErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self {
            Self::Empty => write!(f, "empty pattern"),
            Self::Invalid(p, e) => write!(f, "'{}' {}", p, e.to_string().to_lowercase()),
        }
    }
}

impl FromStr for ExtensionPattern {
    type Err = PatternErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() == true {
            return Err(PatternErr::Empty);
        }
        match Pattern::new(s) {
            Ok(p) => Ok(Self(p)),
            Err(e) => Err(PatternErr::Invalid(s.to_string(), e)),
        }
    }
}

impl fmt::Display for ExtensionPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for ExtensionPattern {
    fn deserialize<D>(deserializer: D) -> Result<ExtensionPattern, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct LayerVisitor;

        impl<'de> de::Visitor<'de> for LayerVisitor {
            type Value = ExtensionPattern;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a glob-style pattern")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                ExtensionPattern::from_str(v).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(LayerVisitor)
    }
}

impl Serialize for ExtensionPattern {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

/// Parses every string into a pattern, keeping order and duplicates.
pub fn parse_patterns<S: AsRef<str>>(list: &[S]) -> Result<Vec<ExtensionPattern>, PatternErr> {
    list.iter()
        .map(|s| ExtensionPattern::from_str(s.as_ref()))
        .collect()
}

/// Where and how deep to look for files.
#[derive(Debug, PartialEq, Clone)]
pub struct SearchSpec {
    root: PathBuf,
    patterns: Vec<ExtensionPattern>,
    depth: usize,
}

impl SearchSpec {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            patterns: Vec::new(),
            depth: DEFAULT_DEPTH,
        }
    }

    /// Sets the ordered list of patterns.
    pub fn patterns(mut self, p: Vec<ExtensionPattern>) -> Self {
        self.patterns = p;
        self
    }

    /// Sets the number of directory levels below the root to descend into.
    pub fn depth(mut self, d: usize) -> Self {
        self.depth = d;
        self
    }

    /// Gathers the files described by the search.
    pub fn collect(&self) -> Vec<String> {
        collect(&self.root, &self.patterns, self.depth)
    }
}

/// Finds every regular file under `root` whose basename matches one of `patterns`.
///
/// Files in a directory are listed per pattern in the order the patterns are given,
/// then each subdirectory is searched with one less level of `depth`. Nothing is
/// sorted or deduplicated, so repeating a pattern repeats its matches.
///
/// A root that is missing or cannot be read yields an empty list.
pub fn collect(root: &Path, patterns: &[ExtensionPattern], depth: usize) -> Vec<String> {
    let mut files = Vec::new();
    collect_into(root, patterns, depth, &mut files);
    files
}

fn collect_into(root: &Path, patterns: &[ExtensionPattern], depth: usize, acc: &mut Vec<String>) {
    let entries: Vec<fs::DirEntry> = match fs::read_dir(root) {
        Ok(rd) => rd.filter_map(|e| e.ok()).collect(),
        Err(e) => {
            tracing::trace!("skipping {:?}: {}", root, e);
            return;
        }
    };
    // split the listing once so every pattern sees the same enumeration order
    let mut files = Vec::new();
    let mut dirs = Vec::new();
    for entry in entries {
        match entry.file_type() {
            Ok(ft) if ft.is_file() => files.push(entry.path()),
            Ok(ft) if ft.is_dir() => dirs.push(entry.path()),
            // follow links to decide what they point at
            Ok(ft) if ft.is_symlink() => {
                let path = entry.path();
                if path.is_file() {
                    files.push(path);
                } else if path.is_dir() {
                    dirs.push(path);
                }
            }
            _ => (),
        }
    }

    for p in patterns {
        files
            .iter()
            .filter(|f| p.matches(f))
            .for_each(|f| acc.push(filesystem::into_std_str(f.clone())));
    }

    if depth > 0 {
        for dir in dirs {
            collect_into(&dir, patterns, depth - 1, acc);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;

    fn pats(list: &[&str]) -> Vec<ExtensionPattern> {
        parse_patterns(list).unwrap()
    }

    /// Builds `a.v`, `b.ipx`, and `lib/c.v` under a temporary root.
    fn sample_tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.v"), "module a; endmodule\n").unwrap();
        fs::write(dir.path().join("b.ipx"), "<ip/>\n").unwrap();
        fs::create_dir(dir.path().join("lib")).unwrap();
        fs::write(dir.path().join("lib/c.v"), "module c; endmodule\n").unwrap();
        dir
    }

    fn rel(root: &Path, files: &[String]) -> Vec<String> {
        filesystem::rebase(files, &filesystem::into_std_str(root.to_path_buf()), "")
    }

    #[test]
    fn one_level_of_verilog() {
        let dir = sample_tree();
        let files = collect(dir.path(), &pats(&["*.v"]), 1);
        assert_eq!(rel(dir.path(), &files), vec!["a.v", "lib/c.v"]);
    }

    #[test]
    fn depth_zero_does_not_descend() {
        let dir = sample_tree();
        let files = collect(dir.path(), &pats(&["*.ipx"]), 0);
        assert_eq!(rel(dir.path(), &files), vec!["b.ipx"]);

        let files = collect(dir.path(), &pats(&["*.v"]), 0);
        assert_eq!(rel(dir.path(), &files), vec!["a.v"]);
    }

    #[test]
    fn depth_bounds_levels() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("x/y/z")).unwrap();
        fs::write(dir.path().join("top.v"), "").unwrap();
        fs::write(dir.path().join("x/one.v"), "").unwrap();
        fs::write(dir.path().join("x/y/two.v"), "").unwrap();
        fs::write(dir.path().join("x/y/z/three.v"), "").unwrap();

        let p = pats(&["*.v"]);
        assert_eq!(collect(dir.path(), &p, 0).len(), 1);
        assert_eq!(collect(dir.path(), &p, 1).len(), 2);
        assert_eq!(collect(dir.path(), &p, 2).len(), 3);
        assert_eq!(collect(dir.path(), &p, 3).len(), 4);
        assert_eq!(collect(dir.path(), &p, DEFAULT_DEPTH).len(), 4);
        assert_eq!(
            rel(dir.path(), &collect(dir.path(), &p, 2)),
            vec!["top.v", "x/one.v", "x/y/two.v"]
        );
    }

    #[test]
    fn duplicate_patterns_duplicate_results() {
        let dir = sample_tree();
        let files = collect(dir.path(), &pats(&["*.v", "*.v"]), 0);
        assert_eq!(rel(dir.path(), &files), vec!["a.v", "a.v"]);
    }

    #[test]
    fn pattern_order_within_directory() {
        let dir = sample_tree();
        let files = collect(dir.path(), &pats(&["*.ipx", "*.v"]), 0);
        assert_eq!(rel(dir.path(), &files), vec!["b.ipx", "a.v"]);
    }

    #[test]
    fn only_matching_basenames() {
        let dir = sample_tree();
        fs::write(dir.path().join("lib/readme.md"), "").unwrap();
        // a directory whose name matches is never reported
        fs::create_dir(dir.path().join("gen.v")).unwrap();
        let p = pats(&["*.v", "*.ipx"]);
        let files = collect(dir.path(), &p, 4);
        assert_eq!(files.len(), 3);
        for f in &files {
            assert!(p.iter().any(|x| x.matches(Path::new(f))));
        }
    }

    #[test]
    fn missing_root_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let files = collect(&dir.path().join("does-not-exist"), &pats(&["*.v"]), 5);
        assert_eq!(files, Vec::<String>::new());

        let empty = tempfile::tempdir().unwrap();
        assert_eq!(collect(empty.path(), &pats(&["*.v"]), 5).len(), 0);
    }

    #[test]
    fn search_spec_collects() {
        let spec = SearchSpec::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src/core"))
            .patterns(pats(&["fileset.rs"]))
            .depth(0);
        let files = spec.collect();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("src/core/fileset.rs"));
    }

    #[test]
    fn parse_pattern_errors() {
        assert!(matches!(
            ExtensionPattern::from_str(""),
            Err(PatternErr::Empty)
        ));
        assert!(ExtensionPattern::from_str("[").is_err());
        assert!(parse_patterns(&["*.v", "["]).is_err());
        assert_eq!(ExtensionPattern::from_str("*.sv").unwrap().to_string(), "*.sv");
    }

    #[test]
    fn match_basename_only() {
        let p = ExtensionPattern::from_str("*.v").unwrap();
        assert!(p.matches(Path::new("rtl/sub/top.v")));
        assert!(p.matches(Path::new("top.v")));
        assert_eq!(p.matches(Path::new("top.vh")), false);
        assert_eq!(p.matches(Path::new("top.V")), false);
    }
}
