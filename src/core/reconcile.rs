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

//! Brings a project's file manifest in line with a desired list of files.
//!
//! Files that are already members of the project are reported as such and are
//! never treated as failures, so reconciling the same list twice is harmless.

use crate::core::project::{self, ProjectLocator};
use crate::core::store::{AddOutcome, ProjectHandle, ProjectStore};
use crate::error::{Error, LastError};
use serde_derive::Serialize;
use std::path::{Path, PathBuf};

/// The outcome of registering one file.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Member {
    path: String,
    outcome: AddOutcome,
}

impl Member {
    pub fn get_path(&self) -> &str {
        &self.path
    }

    pub fn get_outcome(&self) -> AddOutcome {
        self.outcome
    }
}

/// What happened to a project during one reconciliation.
#[derive(Debug, PartialEq, Serialize)]
pub struct Report {
    project: PathBuf,
    members: Vec<Member>,
}

impl Report {
    pub fn get_project(&self) -> &PathBuf {
        &self.project
    }

    pub fn get_members(&self) -> &Vec<Member> {
        &self.members
    }

    pub fn count(&self, outcome: AddOutcome) -> usize {
        self.members.iter().filter(|m| m.outcome == outcome).count()
    }
}

/// Registers every file of `files` with the opened `project`, in order.
///
/// Stops at the first file the store fails to add for any reason other than
/// already being a member.
pub fn reconcile<S>(
    store: &mut S,
    project: &ProjectHandle,
    files: &[String],
) -> Result<Vec<Member>, Error>
where
    S: ProjectStore + ?Sized,
{
    let mut members = Vec::with_capacity(files.len());
    for path in files {
        let outcome = store
            .add_source(project, path)
            .map_err(|e| Error::AddSourceFailed(path.clone(), LastError(e.to_string())))?;
        tracing::debug!("{}: {}", path, outcome);
        members.push(Member {
            path: path.clone(),
            outcome,
        });
    }
    Ok(members)
}

/// Finds the project under `ppath`, reconciles `files` into it, then saves and
/// closes it.
///
/// Relative entries of `files` are resolved by the tool against the project's
/// own directory. When no project is found nothing is added.
pub fn add_to_project<S>(
    store: &mut S,
    locator: &ProjectLocator,
    ppath: &Path,
    files: &[String],
) -> Result<Report, Error>
where
    S: ProjectStore + ?Sized,
{
    let descriptor = locator.find(ppath)?;
    let members = project::with_project(store, &descriptor, |store, handle| {
        reconcile(store, handle, files)
    })?;
    Ok(Report {
        project: descriptor,
        members,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::store::memory::MemoryStore;
    use crate::util::filesystem::lock_cwd;
    use std::env;
    use std::fs;

    fn project_dir() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("impl")).unwrap();
        let rdf = dir.path().join("impl/blinky.rdf");
        fs::write(&rdf, "").unwrap();
        (dir, rdf)
    }

    fn files(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn second_pass_is_already_present() {
        let _lock = lock_cwd();
        let (dir, rdf) = project_dir();
        let mut store = MemoryStore::new().with_project(&rdf);
        let locator = ProjectLocator::new("*.rdf", 3).unwrap();
        let list = files(&["x.v", "y.v"]);

        let first = add_to_project(&mut store, &locator, dir.path(), &list).unwrap();
        assert_eq!(first.count(AddOutcome::Added), 2);
        let outcomes: Vec<AddOutcome> = first.get_members().iter().map(|m| m.get_outcome()).collect();
        assert_eq!(outcomes, vec![AddOutcome::Added, AddOutcome::Added]);
        let size = store.manifest(&rdf).unwrap().len();

        let second = add_to_project(&mut store, &locator, dir.path(), &list).unwrap();
        let outcomes: Vec<AddOutcome> = second.get_members().iter().map(|m| m.get_outcome()).collect();
        assert_eq!(
            outcomes,
            vec![AddOutcome::AlreadyPresent, AddOutcome::AlreadyPresent]
        );
        assert_eq!(store.manifest(&rdf).unwrap().len(), size);
        // saved and closed exactly once per pass
        assert_eq!(store.count("save"), 2);
        assert_eq!(store.count("close"), 2);
    }

    #[test]
    fn duplicates_within_one_list() {
        let _lock = lock_cwd();
        let (dir, rdf) = project_dir();
        let mut store = MemoryStore::new().with_project(&rdf);
        let locator = ProjectLocator::new("*.rdf", 3).unwrap();

        let report =
            add_to_project(&mut store, &locator, dir.path(), &files(&["a.v", "a.v", "b.v"]))
                .unwrap();
        assert_eq!(report.count(AddOutcome::Added), 2);
        assert_eq!(report.count(AddOutcome::AlreadyPresent), 1);
        assert_eq!(report.get_members()[1].get_path(), "a.v");
        assert_eq!(store.count("save"), 1);
        assert_eq!(store.count("close"), 1);
    }

    #[test]
    fn relative_paths_resolve_against_project_dir() {
        let _lock = lock_cwd();
        let (dir, rdf) = project_dir();
        let mut store = MemoryStore::new().with_project(&rdf);
        let locator = ProjectLocator::new("*.rdf", 3).unwrap();

        add_to_project(&mut store, &locator, dir.path(), &files(&["top.v"])).unwrap();
        let expected = crate::util::filesystem::absolutize(
            &dir.path().join("impl").canonicalize().unwrap(),
            "top.v",
        );
        assert_eq!(store.manifest(&rdf).unwrap(), &vec![expected]);
    }

    #[test]
    fn missing_project_adds_nothing() {
        let _lock = lock_cwd();
        let before = env::current_dir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a/b/c/d")).unwrap();
        // deeper than the search reaches
        fs::write(dir.path().join("a/b/c/d/blinky.rdf"), "").unwrap();
        let mut store = MemoryStore::new();
        let locator = ProjectLocator::new("*.rdf", 3).unwrap();

        let result = add_to_project(&mut store, &locator, dir.path(), &files(&["x.v"]));
        assert!(matches!(result, Err(Error::ProjectNotFound(..))));
        assert_eq!(store.count("add_source"), 0);
        assert_eq!(store.calls().len(), 0);
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    fn working_directory_restored_after_success() {
        let _lock = lock_cwd();
        let before = env::current_dir().unwrap();
        let (dir, rdf) = project_dir();
        let mut store = MemoryStore::new().with_project(&rdf);
        let locator = ProjectLocator::new("*.rdf", 3).unwrap();

        add_to_project(&mut store, &locator, dir.path(), &files(&["x.v"])).unwrap();
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    fn empty_list_still_saves() {
        let _lock = lock_cwd();
        let (dir, rdf) = project_dir();
        let mut store = MemoryStore::new().with_project(&rdf);
        let locator = ProjectLocator::new("*.rdf", 3).unwrap();

        let report = add_to_project(&mut store, &locator, dir.path(), &[]).unwrap();
        assert_eq!(report.get_members().len(), 0);
        assert_eq!(store.calls(), &vec!["open", "save", "close"]);
    }

    #[test]
    fn report_as_json() {
        let report = Report {
            project: PathBuf::from("/w/blinky.rdf"),
            members: vec![Member {
                path: String::from("top.v"),
                outcome: AddOutcome::AlreadyPresent,
            }],
        };
        assert_eq!(
            serde_json::to_string(&report).unwrap(),
            r#"{"project":"/w/blinky.rdf","members":[{"path":"top.v","outcome":"already-present"}]}"#
        );
    }
}
