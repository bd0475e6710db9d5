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

use std::env;
use std::io;
use std::path::{Path, PathBuf};

/// Resolves a relative path into a full path if given relative to some `root` path.
///
/// This function is helpful for resolving the tool command and board directory
/// defined in a configuration file.
pub fn resolve_rel_path(root: &Path, s: String) -> String {
    let resolved_path = root.join(&s);
    if resolved_path.exists() == true {
        if PathBuf::from(&s).is_relative() == true {
            // write out full path
            resolved_path.display().to_string()
        } else {
            s
        }
    } else {
        s
    }
}

/// Transforms the path into a string using forward slashes as separators.
///
/// The vendor tool accepts '/' on every platform, while '\' would be read as an
/// escape character inside its command shell.
pub fn into_std_str(path: PathBuf) -> String {
    path.display().to_string().replace('\\', "/")
}

/// Removes the first `cut_prefix` characters (plus one separator) from every path
/// and prepends `add_prefix`.
///
/// The prefix is not verified to actually begin each path. A path shorter than
/// the cut collapses to `add_prefix`.
pub fn rebase<S: AsRef<str>>(paths: &[S], cut_prefix: &str, add_prefix: &str) -> Vec<String> {
    let cut = cut_prefix.chars().count() + 1;
    paths
        .iter()
        .map(|p| {
            let tail: String = p.as_ref().chars().skip(cut).collect();
            format!("{}{}", add_prefix, tail)
        })
        .collect()
}

/// Makes `path` absolute by joining it onto `base` when it is relative.
pub fn absolutize(base: &Path, path: &str) -> String {
    let p = PathBuf::from(path);
    match p.is_relative() {
        true => into_std_str(base.join(p)),
        false => into_std_str(p),
    }
}

/// Remembers the process's working directory and restores it when dropped.
///
/// Restoration happens on every exit path of the owning scope, including early
/// returns through `?`.
#[derive(Debug)]
pub struct DirGuard {
    origin: PathBuf,
}

impl DirGuard {
    /// Captures the current working directory.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            origin: env::current_dir()?,
        })
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        tracing::debug!("restoring directory {:?}", self.origin);
        if let Err(e) = env::set_current_dir(&self.origin) {
            tracing::warn!("failed to restore directory {:?}: {}", self.origin, e);
        }
    }
}

/// Serializes tests that move the process's working directory.
#[cfg(test)]
pub(crate) static CWD_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
pub(crate) fn lock_cwd() -> std::sync::MutexGuard<'static, ()> {
    CWD_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn resolve_path_simple() {
        let rel_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        // expands relative path to full path
        assert_eq!(
            resolve_rel_path(&rel_root, String::from("src/lib.rs")),
            rel_root.join("src/lib.rs").display().to_string()
        );
        // no file or directory named 'radiantc' at the relative root
        assert_eq!(
            resolve_rel_path(&rel_root, String::from("radiantc")),
            String::from("radiantc")
        );
        // not relative
        assert_eq!(
            resolve_rel_path(&rel_root, String::from("/src")),
            String::from("/src")
        );
    }

    #[test]
    fn rebase_cuts_prefix_and_separator() {
        let paths = vec!["rtl/top.v", "rtl/lib/fifo.v"];
        assert_eq!(
            rebase(&paths, "rtl", ""),
            vec![String::from("top.v"), String::from("lib/fifo.v")]
        );
        assert_eq!(
            rebase(&paths, "rtl", "../src/"),
            vec![String::from("../src/top.v"), String::from("../src/lib/fifo.v")]
        );
    }

    #[test]
    fn rebase_does_not_check_prefix() {
        // the cut is applied by length only
        let paths = vec!["abc/top.v", "a"];
        assert_eq!(
            rebase(&paths, "xyz", "/"),
            vec![String::from("/top.v"), String::from("/")]
        );
        // multi-byte characters are counted as characters
        let paths = vec!["réd/top.v"];
        assert_eq!(rebase(&paths, "réd", ""), vec![String::from("top.v")]);
    }

    #[test]
    fn absolutize_relative_only() {
        let base = PathBuf::from("/work/fpga");
        assert_eq!(absolutize(&base, "rtl/top.v"), "/work/fpga/rtl/top.v");
        assert_eq!(absolutize(&base, "/ip/pll.ipx"), "/ip/pll.ipx");
    }

    #[test]
    fn dir_guard_restores_on_drop() {
        let _lock = lock_cwd();
        let before = env::current_dir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        {
            let _guard = DirGuard::new().unwrap();
            env::set_current_dir(dir.path()).unwrap();
            assert_eq!(
                env::current_dir().unwrap().canonicalize().unwrap(),
                dir.path().canonicalize().unwrap()
            );
        }
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    fn dir_guard_restores_on_error_path() {
        let _lock = lock_cwd();
        let before = env::current_dir().unwrap();
        let dir = tempfile::tempdir().unwrap();

        fn fails_inside(dir: &Path) -> Result<(), String> {
            let _guard = DirGuard::new().map_err(|e| e.to_string())?;
            env::set_current_dir(dir).map_err(|e| e.to_string())?;
            Err(String::from("tool failed"))
        }

        assert!(fails_inside(dir.path()).is_err());
        assert_eq!(env::current_dir().unwrap(), before);
    }
}
