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

//! The vendor tool's release number and the compliance check against the
//! version a project requires.
//!
//! Releases are named by year and a single-digit release within the year
//! (ex: `2023.1`). The installed release is detected from a path held in an
//! environment variable, such as `/usr/local/lscc/radiant/2023.1/ispfpga`.

use crate::core::config::Config;
use crate::error::{Error, Hint};
use crate::util::anyerror::AnyError;
use crate::util::environment::Environment;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct ToolVersion {
    year: u16,
    release: u8,
}

impl ToolVersion {
    pub fn new(year: u16, release: u8) -> Self {
        Self { year, release }
    }

    /// Finds the first `dddd.d` token within `s`.
    pub fn extract(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() < 6 {
            return None;
        }
        (0..=bytes.len() - 6).find_map(|i| {
            let w = &bytes[i..i + 6];
            match w[..4].iter().all(u8::is_ascii_digit) && w[4] == b'.' && w[5].is_ascii_digit()
            {
                true => Self::from_token(&w[..4], w[5]),
                false => None,
            }
        })
    }

    fn from_token(year: &[u8], release: u8) -> Option<Self> {
        let year = std::str::from_utf8(year).ok()?.parse::<u16>().ok()?;
        Some(Self {
            year,
            release: release - b'0',
        })
    }
}

impl FromStr for ToolVersion {
    type Err = AnyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let version = match s.len() == 6 {
            true => Self::extract(s),
            false => None,
        };
        version.ok_or_else(|| {
            AnyError(format!(
                "invalid tool version {:?}: expecting format YYYY.R",
                s
            ))
        })
    }
}

impl Display for ToolVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}.{}", self.year, self.release)
    }
}

/// Result of comparing the installed tool against the required release.
#[derive(Debug, PartialEq)]
pub enum Compliance {
    /// No release is required.
    Unchecked,
    /// The installed release is the required release.
    Compliant(ToolVersion),
    /// The releases differ but mismatches are only warnings.
    Tolerated {
        required: ToolVersion,
        detected: ToolVersion,
    },
}

/// The inputs to a tool version compliance check.
#[derive(Debug, PartialEq)]
pub struct VersionCheck {
    required: Option<String>,
    ignore: bool,
    var: String,
    value: Option<String>,
}

impl VersionCheck {
    /// Gathers the requirement from `config` and reads the tool's path from the
    /// environment variable the configuration names.
    pub fn from_config(config: &Config) -> Self {
        let var = config.get_version_var().to_string();
        Self {
            required: config.get_required_version().map(|s| s.to_string()),
            ignore: config.ignores_version(),
            value: Environment::read(&var),
            var,
        }
    }

    /// Detects the installed release from the environment variable's value.
    fn detect(&self) -> Result<ToolVersion, Error> {
        self.value
            .as_deref()
            .and_then(ToolVersion::extract)
            .ok_or(Error::VersionStringUnparseable(
                self.var.clone(),
                Hint::SetVersionVar,
            ))
    }

    /// Compares the installed release against the required release.
    ///
    /// A release that cannot be detected is always an error when a release is
    /// required, even if mismatches are tolerated.
    pub fn run(&self) -> Result<Compliance, Error> {
        let required = match &self.required {
            Some(r) => r,
            None => return Ok(Compliance::Unchecked),
        };
        let detected = self.detect()?;
        let required = match ToolVersion::from_str(required) {
            Ok(v) => v,
            // a malformed requirement can never be met
            Err(_) => {
                return Err(Error::VersionMismatch(
                    required.clone(),
                    detected.to_string(),
                    Hint::IgnoreVersion,
                ))
            }
        };
        if required == detected {
            Ok(Compliance::Compliant(detected))
        } else if self.ignore == true {
            Ok(Compliance::Tolerated { required, detected })
        } else {
            Err(Error::VersionMismatch(
                required.to_string(),
                detected.to_string(),
                Hint::IgnoreVersion,
            ))
        }
    }
}
