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

use crate::core::fileset::ExtensionPattern;
use crate::util::anyerror::{AnyError, Fault};
use crate::util::filesystem;
use serde_derive::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const CONFIG_FILE: &str = "config.toml";
pub const LOCAL_CONFIG_FILE: &str = "prjkit.toml";

pub const DEFAULT_VERSION_VAR: &str = "FOUNDRY";
pub const DEFAULT_TOOL_COMMAND: &str = "radiantc";
pub const DEFAULT_DUPLICATE_PATTERN: &str = "already";

pub const DEFAULT_SYNTHESIS: &str = "lse";
pub const DEFAULT_IMPL: &str = "impl_1";
pub const DEFAULT_STEP: &str = "Export";
pub const DEFAULT_DESCRIPTOR: &str = "*.rdf";
pub const DEFAULT_DESCRIPTOR_DEPTH: usize = 3;
pub const DEFAULT_BOARDS_DIR: &str = "boards";
pub const DEFAULT_BOARD_DEPTH: usize = 7;

pub const DEFAULT_EXTS: [&str; 5] = ["*.v", "*.sv", "*.vhd", "*.vhdl", "*.ipx"];
pub const DEFAULT_SOURCE_DEPTH: usize = 6;

/// Loads a data structure from a file on disk.
pub trait FromFile: Sized {
    fn from_file(path: &Path) -> Result<Self, Fault>;
}

#[derive(Debug, PartialEq, Clone)]
pub enum Locality {
    Global,
    Local,
    Other,
}

#[derive(Debug, PartialEq)]
pub struct Configs {
    inner: Vec<(PathBuf, Config, Locality)>,
}

impl Configs {
    pub fn new() -> Self {
        Self { inner: Vec::new() }
    }

    /// Loads the configuration file at `file` along with every file it includes.
    pub fn load(self, file: PathBuf, lvl: Locality) -> Result<Self, Fault> {
        // create a set to remember what paths are already loaded
        let mut set = HashSet::new();
        let mut configs = self.inner;

        let mut to_process = vec![(file, lvl)];
        let mut i = 0;
        while let Some((path, local)) = to_process.get(i).cloned() {
            let cfg = Config::from_file(&path)?;
            set.insert(path.clone());
            let base = path
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_default();
            // access its neighboring files (check "include" key)
            for next in cfg.get_includes() {
                let next = base.join(next);
                // avoid processing the same files
                if set.contains(&next) == false {
                    to_process.push((next, Locality::Other));
                }
            }
            configs.push((path, cfg, local));
            i += 1;
        }
        Ok(Self { inner: configs })
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

impl From<Configs> for Config {
    /// Transform the multi-layered configurations into a single level.
    ///
    /// This function processes configurations in the following order:
    /// 1. LOCAL
    /// 2. GLOBAL
    /// 3. INCLUDES (first to last)
    ///
    /// Once a value is set (not None), then it will not be overridden by any
    /// configuration file later in the processing order. The processing order is
    /// the precedence order.
    fn from(value: Configs) -> Self {
        let mut single = Config::new();
        let mut value = value;
        // process local file
        let local = value.inner.iter().position(|p| p.2 == Locality::Local);
        if let Some(i) = local {
            single.append(value.inner.remove(i).1);
        }
        // process global file
        let global = value.inner.iter().position(|p| p.2 == Locality::Global);
        if let Some(i) = global {
            single.append(value.inner.remove(i).1);
        }
        // process includes in the order they were read
        value.inner.into_iter().for_each(|p| {
            single.append(p.1);
        });
        single
    }
}

/// Settings for driving the vendor tool's command shell.
#[derive(PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Tool {
    version: Option<String>,
    #[serde(rename = "ignore-version")]
    ignore_version: Option<bool>,
    #[serde(rename = "version-var")]
    version_var: Option<String>,
    command: Option<String>,
    args: Option<Vec<String>>,
    #[serde(rename = "duplicate-pattern")]
    duplicate_pattern: Option<String>,
    #[serde(skip)]
    root: Option<PathBuf>,
}

impl Tool {
    /// Merges any populated data from `rhs` into attributes that do not already
    /// have data defined in `self`.
    pub fn merge(&mut self, rhs: Option<Self>) {
        if let Some(rhs) = rhs {
            if self.version.is_none() {
                self.version = rhs.version;
            }
            if self.ignore_version.is_none() {
                self.ignore_version = rhs.ignore_version;
            }
            if self.version_var.is_none() {
                self.version_var = rhs.version_var;
            }
            // the command and its arguments travel together with their root
            if self.command.is_none() {
                self.command = rhs.command;
                self.args = rhs.args;
                self.root = rhs.root;
            }
            if self.duplicate_pattern.is_none() {
                self.duplicate_pattern = rhs.duplicate_pattern;
            }
        }
    }
}

/// Defaults used when creating or operating on a project.
#[derive(PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    device: Option<String>,
    performance: Option<String>,
    synthesis: Option<String>,
    #[serde(rename = "impl")]
    implementation: Option<String>,
    step: Option<String>,
    descriptor: Option<String>,
    #[serde(rename = "descriptor-depth")]
    descriptor_depth: Option<usize>,
    boards: Option<String>,
    #[serde(rename = "board-depth")]
    board_depth: Option<usize>,
    #[serde(skip)]
    root: Option<PathBuf>,
}

impl Project {
    pub fn merge(&mut self, rhs: Option<Self>) {
        if let Some(rhs) = rhs {
            if self.device.is_none() {
                self.device = rhs.device;
            }
            if self.performance.is_none() {
                self.performance = rhs.performance;
            }
            if self.synthesis.is_none() {
                self.synthesis = rhs.synthesis;
            }
            if self.implementation.is_none() {
                self.implementation = rhs.implementation;
            }
            if self.step.is_none() {
                self.step = rhs.step;
            }
            if self.descriptor.is_none() {
                self.descriptor = rhs.descriptor;
            }
            if self.descriptor_depth.is_none() {
                self.descriptor_depth = rhs.descriptor_depth;
            }
            if self.boards.is_none() {
                self.boards = rhs.boards;
                self.root = rhs.root;
            }
            if self.board_depth.is_none() {
                self.board_depth = rhs.board_depth;
            }
        }
    }
}

/// Defaults for automatic source discovery.
#[derive(PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Sources {
    exts: Option<Vec<ExtensionPattern>>,
    depth: Option<usize>,
}

impl Sources {
    pub fn merge(&mut self, rhs: Option<Self>) {
        if let Some(rhs) = rhs {
            if self.exts.is_none() {
                self.exts = rhs.exts;
            }
            if self.depth.is_none() {
                self.depth = rhs.depth;
            }
        }
    }
}

#[derive(PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    include: Option<Vec<PathBuf>>,
    env: Option<HashMap<String, String>>,
    tool: Option<Tool>,
    project: Option<Project>,
    sources: Option<Sources>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the new information to the existing configuration to combine data.
    ///
    /// Note that the struct calling this function is the root/base config file. If there is
    /// already existing data in `self`, then it has precedence over any incoming data from `rhs`.
    pub fn append(&mut self, rhs: Self) {
        match &mut self.include {
            Some(v) => v.append(&mut rhs.include.unwrap_or_default()),
            None => self.include = rhs.include,
        }
        // combine '[env]' table
        match &mut self.env {
            Some(v) => {
                for (key, val) in rhs.env.unwrap_or_default() {
                    v.entry(key).or_insert(val);
                }
            }
            None => self.env = rhs.env,
        }
        match &mut self.tool {
            Some(v) => v.merge(rhs.tool),
            None => self.tool = rhs.tool,
        }
        match &mut self.project {
            Some(v) => v.merge(rhs.project),
            None => self.project = rhs.project,
        }
        match &mut self.sources {
            Some(v) => v.merge(rhs.sources),
            None => self.sources = rhs.sources,
        }
    }

    pub fn get_includes(&self) -> Vec<&PathBuf> {
        match &self.include {
            Some(i) => i.iter().collect(),
            None => Vec::new(),
        }
    }

    pub fn get_env(&self) -> Option<&HashMap<String, String>> {
        self.env.as_ref()
    }

    /// Overrides the required tool version.
    pub fn set_required_version(&mut self, version: String) {
        self.tool.get_or_insert_with(Tool::default).version = Some(version);
    }

    /// Overrides whether a tool version mismatch is only a warning.
    pub fn set_ignore_version(&mut self, ignore: bool) {
        self.tool.get_or_insert_with(Tool::default).ignore_version = Some(ignore);
    }

    pub fn get_required_version(&self) -> Option<&str> {
        self.tool.as_ref().and_then(|t| t.version.as_deref())
    }

    pub fn ignores_version(&self) -> bool {
        self.tool
            .as_ref()
            .and_then(|t| t.ignore_version)
            .unwrap_or(false)
    }

    pub fn get_version_var(&self) -> &str {
        self.tool
            .as_ref()
            .and_then(|t| t.version_var.as_deref())
            .unwrap_or(DEFAULT_VERSION_VAR)
    }

    /// Returns the tool command, resolved against the configuration file that set it.
    pub fn get_tool_command(&self) -> String {
        match &self.tool {
            Some(Tool {
                command: Some(cmd),
                root: Some(root),
                ..
            }) => filesystem::resolve_rel_path(root, cmd.clone()),
            Some(Tool {
                command: Some(cmd),
                ..
            }) => cmd.clone(),
            _ => String::from(DEFAULT_TOOL_COMMAND),
        }
    }

    pub fn get_tool_args(&self) -> Vec<String> {
        self.tool
            .as_ref()
            .and_then(|t| t.args.clone())
            .unwrap_or_default()
    }

    pub fn get_duplicate_pattern(&self) -> &str {
        self.tool
            .as_ref()
            .and_then(|t| t.duplicate_pattern.as_deref())
            .unwrap_or(DEFAULT_DUPLICATE_PATTERN)
    }

    pub fn get_device(&self) -> Option<&str> {
        self.project.as_ref().and_then(|p| p.device.as_deref())
    }

    pub fn get_performance(&self) -> Option<&str> {
        self.project.as_ref().and_then(|p| p.performance.as_deref())
    }

    pub fn get_synthesis(&self) -> &str {
        self.project
            .as_ref()
            .and_then(|p| p.synthesis.as_deref())
            .unwrap_or(DEFAULT_SYNTHESIS)
    }

    pub fn get_impl(&self) -> &str {
        self.project
            .as_ref()
            .and_then(|p| p.implementation.as_deref())
            .unwrap_or(DEFAULT_IMPL)
    }

    pub fn get_step(&self) -> &str {
        self.project
            .as_ref()
            .and_then(|p| p.step.as_deref())
            .unwrap_or(DEFAULT_STEP)
    }

    pub fn get_descriptor_pattern(&self) -> &str {
        self.project
            .as_ref()
            .and_then(|p| p.descriptor.as_deref())
            .unwrap_or(DEFAULT_DESCRIPTOR)
    }

    pub fn get_descriptor_depth(&self) -> usize {
        self.project
            .as_ref()
            .and_then(|p| p.descriptor_depth)
            .unwrap_or(DEFAULT_DESCRIPTOR_DEPTH)
    }

    /// Returns the board directory, resolved against the configuration file that set it.
    pub fn get_boards_dir(&self) -> PathBuf {
        match &self.project {
            Some(Project {
                boards: Some(dir),
                root: Some(root),
                ..
            }) => PathBuf::from(filesystem::resolve_rel_path(root, dir.clone())),
            Some(Project {
                boards: Some(dir), ..
            }) => PathBuf::from(dir),
            _ => PathBuf::from(DEFAULT_BOARDS_DIR),
        }
    }

    pub fn get_board_depth(&self) -> usize {
        self.project
            .as_ref()
            .and_then(|p| p.board_depth)
            .unwrap_or(DEFAULT_BOARD_DEPTH)
    }

    pub fn get_exts(&self) -> Vec<ExtensionPattern> {
        match self.sources.as_ref().and_then(|s| s.exts.clone()) {
            Some(exts) => exts,
            None => DEFAULT_EXTS
                .iter()
                .filter_map(|e| ExtensionPattern::from_str(e).ok())
                .collect(),
        }
    }

    pub fn get_source_depth(&self) -> usize {
        self.sources
            .as_ref()
            .and_then(|s| s.depth)
            .unwrap_or(DEFAULT_SOURCE_DEPTH)
    }
}

impl FromStr for Config {
    type Err = toml::de::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s)
    }
}

impl FromFile for Config {
    fn from_file(path: &Path) -> Result<Self, Fault> {
        // verify the path exists
        if path.is_file() == false {
            return Err(AnyError(format!(
                "failed to locate configuration file \"{}\"",
                path.display()
            )))?;
        }
        let contents = std::fs::read_to_string(path)?;
        // parse toml syntax
        match Self::from_str(&contents) {
            Ok(mut r) => {
                // remember where relative paths are written from
                let base = path.parent().map(|p| p.to_path_buf());
                if let Some(tool) = &mut r.tool {
                    tool.root = base.clone();
                }
                if let Some(project) = &mut r.project {
                    project.root = base;
                }
                Ok(r)
            }
            Err(e) => Err(AnyError(format!(
                "failed to parse \"{}\" file: {}",
                path.display(),
                e
            )))?,
        }
    }
}
