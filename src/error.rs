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

use colored::Colorize;
use std::{fmt::Display, path::PathBuf};

/// Exit code for failures that stop a batch before any project is touched.
pub const EXIT_FATAL: u8 = 2;

/// Exit code for every other failure.
pub const EXIT_FAILURE: u8 = 101;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("tool version {1} does not match the required version {0}{2}")]
    VersionMismatch(String, String, Hint),
    #[error("failed to detect the tool version from environment variable {0:?}{1}")]
    VersionStringUnparseable(String, Hint),
    #[error("no project descriptor found within {1} levels of {0:?}{2}")]
    ProjectNotFound(PathBuf, usize, Hint),
    #[error("invalid usage mode {0:?}: expecting \"auto\" or \"manual\"")]
    InvalidUsageMode(String),
    #[error("a project descriptor already exists at {0:?}")]
    ProjectExists(PathBuf),
    #[error("no board file named {0:?} found under {1:?}")]
    BoardNotFound(String, PathBuf),
    #[error("{0} tool command(s) failed")]
    CommandsFailed(usize),
    #[error("failed to add file {0:?} to the project: {1}")]
    AddSourceFailed(String, LastError),
    #[error("failed to open project {0:?}: {1}")]
    OpenFailed(PathBuf, LastError),
    #[error("failed to create project {0:?}: {1}")]
    CreateFailed(String, LastError),
    #[error("failed to run {0:?} for implementation {1:?}: {2}")]
    RunFailed(String, String, LastError),
    #[error("failed to save project: {0}")]
    SaveFailed(LastError),
    #[error("failed to close project: {0}")]
    CloseFailed(LastError),
    #[error("failed to access the working directory: {0}")]
    WorkingDir(LastError),
    #[error("invalid pattern {0}")]
    BadPattern(LastError),
    #[error("failed to load configuration: {0}")]
    ConfigNotLoaded(LastError),
}

impl Error {
    /// Returns the process exit code this error should terminate with.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::VersionMismatch(..)
            | Self::VersionStringUnparseable(..)
            | Self::ProjectNotFound(..)
            | Self::InvalidUsageMode(..) => EXIT_FATAL,
            _ => EXIT_FAILURE,
        }
    }

    pub fn lowerize(s: String) -> String {
        // get the first word
        let first_word = match s.split_whitespace().next() {
            Some(w) => w,
            None => return s,
        };
        // retain punctuation if the first word is all-caps and longer than 1 character
        if first_word.len() > 1 && first_word.chars().any(|c| c.is_ascii_lowercase()) == false {
            s
        } else {
            s.char_indices()
                .map(|(i, c)| if i == 0 { c.to_ascii_lowercase() } else { c })
                .collect()
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct LastError(pub String);

impl Display for LastError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Error::lowerize(self.0.to_string()))
    }
}

#[derive(Debug, PartialEq)]
pub enum Hint {
    IgnoreVersion,
    SetVersionVar,
    CreateProject,
}

impl Display for Hint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            Self::IgnoreVersion => {
                "use \"--ignore-version\" to continue with a different tool version"
            }
            Self::SetVersionVar => {
                "point the variable to the tool's installation path or change \"tool.version-var\""
            }
            Self::CreateProject => "use `prjkit create` to create a new project",
        };
        write!(
            f,
            "\n\n{}: {}",
            "hint".green(),
            Error::lowerize(message.to_string())
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fatal_exit_codes() {
        assert_eq!(
            Error::InvalidUsageMode(String::from("both")).exit_code(),
            EXIT_FATAL
        );
        assert_eq!(
            Error::ProjectNotFound(PathBuf::from("."), 3, Hint::CreateProject).exit_code(),
            EXIT_FATAL
        );
        assert_eq!(Error::CommandsFailed(1).exit_code(), EXIT_FAILURE);
    }

    #[test]
    fn lowerize_first_letter() {
        assert_eq!(
            Error::lowerize(String::from("Invalid command name")),
            "invalid command name"
        );
        // acronyms keep their case
        assert_eq!(
            Error::lowerize(String::from("ERROR - file not found")),
            "ERROR - file not found"
        );
        assert_eq!(Error::lowerize(String::new()), "");
    }
}
