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

use crate::core::fileset::{self, ExtensionPattern};
use crate::core::store::{Blueprint, ProjectHandle, ProjectStore, StoreError};
use crate::error::{Error, Hint, LastError};
use crate::util::filesystem::DirGuard;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Finds a project's descriptor file below a directory.
#[derive(Debug, PartialEq, Clone)]
pub struct ProjectLocator {
    pattern: ExtensionPattern,
    depth: usize,
}

impl ProjectLocator {
    pub fn new(pattern: &str, depth: usize) -> Result<Self, Error> {
        Ok(Self {
            pattern: ExtensionPattern::from_str(pattern)
                .map_err(|e| Error::BadPattern(LastError(e.to_string())))?,
            depth,
        })
    }

    /// Returns the first descriptor found within `depth` levels of `ppath`.
    ///
    /// A `ppath` that names a descriptor file directly is returned as-is.
    pub fn find(&self, ppath: &Path) -> Result<PathBuf, Error> {
        if ppath.is_file() == true && self.pattern.matches(ppath) == true {
            return Ok(ppath.to_path_buf());
        }
        match fileset::collect(ppath, &[self.pattern.clone()], self.depth)
            .into_iter()
            .next()
        {
            Some(found) => {
                tracing::debug!("found project descriptor {:?}", found);
                Ok(PathBuf::from(found))
            }
            None => Err(Error::ProjectNotFound(
                ppath.to_path_buf(),
                self.depth,
                Hint::CreateProject,
            )),
        }
    }
}

/// Finds the constraints file for the board `name` within `depth` levels of `dir`.
pub fn find_board(dir: &Path, name: &str, depth: usize) -> Result<String, Error> {
    let pattern = ExtensionPattern::from_str(&format!("{}.pdc", glob::Pattern::escape(name)))
        .map_err(|e| Error::BadPattern(LastError(e.to_string())))?;
    fileset::collect(dir, &[pattern], depth)
        .into_iter()
        .next()
        .ok_or(Error::BoardNotFound(name.to_string(), dir.to_path_buf()))
}

fn last(e: StoreError) -> LastError {
    LastError(e.to_string())
}

/// Applies `f` to an opened project, then saves and closes it.
///
/// When `f` fails the project is closed without saving. The project is closed
/// exactly once on every path.
fn finish<S, T, F>(store: &mut S, handle: ProjectHandle, f: F) -> Result<T, Error>
where
    S: ProjectStore + ?Sized,
    F: FnOnce(&mut S, &ProjectHandle) -> Result<T, Error>,
{
    match f(store, &handle) {
        Ok(value) => {
            if let Err(e) = store.save(&handle) {
                if let Err(c) = store.close(handle) {
                    tracing::warn!("failed to close project after failed save: {}", c);
                }
                return Err(Error::SaveFailed(last(e)));
            }
            store
                .close(handle)
                .map_err(|e| Error::CloseFailed(last(e)))?;
            Ok(value)
        }
        Err(err) => {
            if let Err(c) = store.close(handle) {
                tracing::warn!("failed to close project: {}", c);
            }
            Err(err)
        }
    }
}

/// Opens the project at `descriptor`, applies `f`, then saves and closes it.
///
/// The caller's working directory is restored before returning, whether or not
/// any step failed.
pub fn with_project<S, T, F>(store: &mut S, descriptor: &Path, f: F) -> Result<T, Error>
where
    S: ProjectStore + ?Sized,
    F: FnOnce(&mut S, &ProjectHandle) -> Result<T, Error>,
{
    let _guard = DirGuard::new().map_err(|e| Error::WorkingDir(LastError(e.to_string())))?;
    let handle = store
        .open(descriptor)
        .map_err(|e| Error::OpenFailed(descriptor.to_path_buf(), last(e)))?;
    finish(store, handle, f)
}

/// Creates the project described by `blueprint`, applies `f`, then saves and
/// closes it.
///
/// The project's directory is created when missing. Creating over an existing
/// descriptor is refused before the tool is started.
pub fn create_project<S, T, F>(store: &mut S, blueprint: &Blueprint, f: F) -> Result<T, Error>
where
    S: ProjectStore + ?Sized,
    F: FnOnce(&mut S, &ProjectHandle) -> Result<T, Error>,
{
    let descriptor = blueprint.get_descriptor();
    if descriptor.exists() == true {
        return Err(Error::ProjectExists(descriptor));
    }
    std::fs::create_dir_all(blueprint.get_dir())
        .map_err(|e| Error::CreateFailed(blueprint.get_name().to_string(), LastError(e.to_string())))?;
    let _guard = DirGuard::new().map_err(|e| Error::WorkingDir(LastError(e.to_string())))?;
    let handle = store
        .create(blueprint)
        .map_err(|e| Error::CreateFailed(blueprint.get_name().to_string(), last(e)))?;
    if let Some(device) = blueprint.get_device() {
        if let Err(e) = store.set_device_part(&handle, device, blueprint.get_performance()) {
            if let Err(c) = store.close(handle) {
                tracing::warn!("failed to close project after failed device setup: {}", c);
            }
            return Err(Error::CreateFailed(blueprint.get_name().to_string(), last(e)));
        }
    }
    finish(store, handle, f)
}

/// Runs the implementation flow of the project found at `ppath`.
pub fn run_project<S>(
    store: &mut S,
    locator: &ProjectLocator,
    ppath: &Path,
    implementation: &str,
    step: &str,
) -> Result<PathBuf, Error>
where
    S: ProjectStore + ?Sized,
{
    let descriptor = locator.find(ppath)?;
    with_project(store, &descriptor, |store, project| {
        store.run(project, implementation, step).map_err(|e| {
            Error::RunFailed(step.to_string(), implementation.to_string(), last(e))
        })
    })?;
    Ok(descriptor)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::store::memory::MemoryStore;
    use crate::util::filesystem::lock_cwd;
    use std::env;
    use std::fs;

    #[test]
    fn locate_within_depth() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a/b/c/d")).unwrap();
        fs::write(dir.path().join("a/b/c/d/deep.rdf"), "").unwrap();
        let locator = ProjectLocator::new("*.rdf", 3).unwrap();
        // four levels down is out of reach
        assert!(matches!(
            locator.find(dir.path()),
            Err(Error::ProjectNotFound(_, 3, _))
        ));
        fs::write(dir.path().join("a/b/c/near.rdf"), "").unwrap();
        let found = locator.find(dir.path()).unwrap();
        assert!(found.ends_with("a/b/c/near.rdf"));
    }

    #[test]
    fn board_lookup() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("lattice/crosslink")).unwrap();
        fs::write(dir.path().join("lattice/crosslink/evn[1].pdc"), "").unwrap();
        fs::write(dir.path().join("lattice/crosslink/evn1.pdc"), "").unwrap();
        // brackets in the name are taken literally
        let found = find_board(dir.path(), "evn[1]", 7).unwrap();
        assert!(found.ends_with("lattice/crosslink/evn[1].pdc"));
        assert!(matches!(
            find_board(dir.path(), "evn1", 1),
            Err(Error::BoardNotFound(..))
        ));
        assert!(find_board(dir.path(), "evn1", 2).is_ok());
    }

    #[test]
    fn locate_descriptor_path_directly() {
        let dir = tempfile::tempdir().unwrap();
        let rdf = dir.path().join("blinky.rdf");
        fs::write(&rdf, "").unwrap();
        let locator = ProjectLocator::new("*.rdf", 0).unwrap();
        assert_eq!(locator.find(&rdf).unwrap(), rdf);
    }

    #[test]
    fn run_saves_and_closes_once() {
        let _lock = lock_cwd();
        let before = env::current_dir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let rdf = dir.path().join("blinky.rdf");
        fs::write(&rdf, "").unwrap();
        let mut store = MemoryStore::new().with_project(&rdf);
        let locator = ProjectLocator::new("*.rdf", 3).unwrap();

        run_project(&mut store, &locator, dir.path(), "impl_1", "Export").unwrap();
        assert_eq!(store.calls(), &vec!["open", "run", "save", "close"]);
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    fn failed_step_closes_without_saving() {
        let _lock = lock_cwd();
        let before = env::current_dir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let rdf = dir.path().join("blinky.rdf");
        fs::write(&rdf, "").unwrap();
        let mut store = MemoryStore::new().with_project(&rdf);

        let result: Result<(), Error> = with_project(&mut store, &rdf, |_, _| {
            Err(Error::CommandsFailed(1))
        });
        assert_eq!(result, Err(Error::CommandsFailed(1)));
        assert_eq!(store.count("save"), 0);
        assert_eq!(store.count("close"), 1);
        assert_eq!(store.is_open(), false);
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    fn create_sets_device_and_enters_directory() {
        let _lock = lock_cwd();
        let before = env::current_dir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let bp = Blueprint::new("blinky", dir.path().join("blinky"))
            .device(Some("LIFCL-40-9BG400C"));
        let mut store = MemoryStore::new();

        let inside = create_project(&mut store, &bp, |_, _| Ok(env::current_dir().unwrap()))
            .unwrap();
        assert_eq!(
            inside,
            dir.path().join("blinky").canonicalize().unwrap()
        );
        assert_eq!(
            store.calls(),
            &vec!["create", "set_device_part", "save", "close"]
        );
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    fn create_closes_without_saving_on_bad_device() {
        let _lock = lock_cwd();
        let before = env::current_dir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let bp = Blueprint::new("blinky", dir.path().join("blinky")).device(Some("LIFCL-99"));
        let mut store = MemoryStore::new().failing("LIFCL-99");

        let result = create_project(&mut store, &bp, |_, _| Ok(()));
        assert!(matches!(result, Err(Error::CreateFailed(..))));
        assert_eq!(store.calls(), &vec!["create", "set_device_part", "close"]);
        assert_eq!(store.count("save"), 0);
        assert_eq!(store.is_open(), false);
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    fn create_refuses_existing_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("blinky.rdf"), "").unwrap();
        let bp = Blueprint::new("blinky", dir.path().to_path_buf());
        let mut store = MemoryStore::new();
        let result = create_project(&mut store, &bp, |_, _| Ok(()));
        assert!(matches!(result, Err(Error::ProjectExists(_))));
        assert_eq!(store.calls().len(), 0);
    }
}
