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

use serde_derive::Serialize;
use std::fmt::Display;
use std::path::{Path, PathBuf};

/// A reference to a project opened by a [ProjectStore].
///
/// The handle is owned by exactly one caller and is consumed when the project
/// is closed, so it cannot be used afterward.
#[derive(Debug, PartialEq)]
pub struct ProjectHandle {
    descriptor: PathBuf,
}

impl ProjectHandle {
    pub fn new(descriptor: PathBuf) -> Self {
        Self { descriptor }
    }

    /// References the path to the project descriptor file.
    pub fn get_descriptor(&self) -> &PathBuf {
        &self.descriptor
    }

    /// References the directory the tool resolves relative paths against.
    pub fn get_base_dir(&self) -> &Path {
        self.descriptor.parent().unwrap_or(Path::new("."))
    }
}

/// The effect of registering one file with a project's manifest.
#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
}

impl Display for AddOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Added => write!(f, "added"),
            Self::AlreadyPresent => write!(f, "already present"),
        }
    }
}

/// The settings needed to create a new project.
#[derive(Debug, PartialEq, Clone)]
pub struct Blueprint {
    name: String,
    dir: PathBuf,
    implementation: String,
    device: Option<String>,
    performance: Option<String>,
    synthesis: String,
}

impl Blueprint {
    pub fn new(name: &str, dir: PathBuf) -> Self {
        Self {
            name: name.to_string(),
            dir,
            implementation: String::from(crate::core::config::DEFAULT_IMPL),
            device: None,
            performance: None,
            synthesis: String::from(crate::core::config::DEFAULT_SYNTHESIS),
        }
    }

    pub fn implementation(mut self, s: &str) -> Self {
        self.implementation = s.to_string();
        self
    }

    pub fn device(mut self, s: Option<&str>) -> Self {
        self.device = s.map(|s| s.to_string());
        self
    }

    pub fn performance(mut self, s: Option<&str>) -> Self {
        self.performance = s.map(|s| s.to_string());
        self
    }

    pub fn synthesis(mut self, s: &str) -> Self {
        self.synthesis = s.to_string();
        self
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_dir(&self) -> &PathBuf {
        &self.dir
    }

    pub fn get_implementation(&self) -> &str {
        &self.implementation
    }

    pub fn get_device(&self) -> Option<&str> {
        self.device.as_deref()
    }

    pub fn get_performance(&self) -> Option<&str> {
        self.performance.as_deref()
    }

    pub fn get_synthesis(&self) -> &str {
        &self.synthesis
    }

    /// Returns the descriptor path the tool will create for this project.
    pub fn get_descriptor(&self) -> PathBuf {
        self.dir.join(format!("{}.rdf", self.name))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to start tool {0:?}: {1}")]
    Spawn(String, std::io::Error),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("project {0:?} does not exist")]
    NotFound(PathBuf),
    #[error("command `{command}` failed: {message}")]
    Command { command: String, message: String },
    #[error("tool session ended unexpectedly")]
    Closed,
}

/// The operations the vendor tool offers on its projects.
///
/// Opening or creating a project moves the process into the project's directory,
/// the same way the tool resolves relative paths against the descriptor's
/// directory. Callers are responsible for restoring their own directory.
pub trait ProjectStore {
    fn open(&mut self, descriptor: &Path) -> Result<ProjectHandle, StoreError>;

    fn create(&mut self, blueprint: &Blueprint) -> Result<ProjectHandle, StoreError>;

    /// Registers `path` with the project's manifest.
    ///
    /// A file that is already a member is reported as [AddOutcome::AlreadyPresent]
    /// and is not an error.
    fn add_source(&mut self, project: &ProjectHandle, path: &str)
        -> Result<AddOutcome, StoreError>;

    fn set_device_part(
        &mut self,
        project: &ProjectHandle,
        device: &str,
        performance: Option<&str>,
    ) -> Result<(), StoreError>;

    /// Runs the implementation flow up to and including `step`.
    fn run(
        &mut self,
        project: &ProjectHandle,
        implementation: &str,
        step: &str,
    ) -> Result<(), StoreError>;

    /// Passes an arbitrary command to the tool, returning its output.
    fn execute(&mut self, project: &ProjectHandle, command: &str) -> Result<String, StoreError>;

    fn save(&mut self, project: &ProjectHandle) -> Result<(), StoreError>;

    fn close(&mut self, project: ProjectHandle) -> Result<(), StoreError>;
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn blueprint_descriptor() {
        let bp = Blueprint::new("blinky", PathBuf::from("/work/blinky"))
            .implementation("impl_2")
            .device(Some("LIFCL-40-9BG400C"));
        assert_eq!(bp.get_descriptor(), PathBuf::from("/work/blinky/blinky.rdf"));
        assert_eq!(bp.get_implementation(), "impl_2");
        assert_eq!(bp.get_device(), Some("LIFCL-40-9BG400C"));
        assert_eq!(bp.get_performance(), None);
        assert_eq!(bp.get_synthesis(), "lse");
    }

    #[test]
    fn handle_base_dir() {
        let h = ProjectHandle::new(PathBuf::from("/work/blinky/blinky.rdf"));
        assert_eq!(h.get_base_dir(), Path::new("/work/blinky"));
    }

    #[test]
    fn outcome_json() {
        assert_eq!(
            serde_json::to_string(&AddOutcome::AlreadyPresent).unwrap(),
            "\"already-present\""
        );
        assert_eq!(AddOutcome::Added.to_string(), "added");
    }
}
