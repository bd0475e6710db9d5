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

use crate::core::config::{Config, Configs, Locality, CONFIG_FILE, LOCAL_CONFIG_FILE};
use crate::core::project::ProjectLocator;
use crate::core::session::ToolSession;
use crate::core::version::{Compliance, VersionCheck};
use crate::error::{Error, LastError};
use crate::util::anyerror::{AnyError, Fault};
use crate::util::environment::{
    Environment, PRJKIT_HOME, PRJKIT_IGNORE_VERSION, PRJKIT_TOOL_VERSION,
};
use colored::Colorize;
use std::env;
use std::path::{Path, PathBuf};

/// Everything a command needs to know about its surroundings.
#[derive(Debug)]
pub struct Context {
    home_path: Option<PathBuf>,
    config: Config,
}

impl Context {
    pub fn new() -> Context {
        Context {
            home_path: None,
            config: Config::new(),
        }
    }

    /// Sets the home directory. By default this is `$HOME/.prjkit`. If set by `key`,
    /// it must be an existing directory.
    pub fn home(mut self, key: &str) -> Result<Context, Fault> {
        self.home_path = match Environment::read(key) {
            Some(s) => {
                let hp = PathBuf::from(s);
                // do not allow a non-existent directory to be set for the home
                if hp.is_dir() == false {
                    return Err(AnyError(format!(
                        "directory {:?} does not exist for {}",
                        hp, key
                    )))?;
                }
                Some(hp)
            }
            None => home::home_dir().map(|p| p.join(".prjkit")),
        };
        Ok(self)
    }

    /// Reads the global configuration file in the home directory and the local
    /// configuration file in `cwd`, when they exist.
    pub fn settings(mut self, cwd: &Path) -> Result<Context, Fault> {
        let mut configs = Configs::new();
        if let Some(home) = &self.home_path {
            let global = home.join(CONFIG_FILE);
            if global.is_file() == true {
                configs = configs.load(global, Locality::Global)?;
            }
        }
        let local = cwd.join(LOCAL_CONFIG_FILE);
        if local.is_file() == true {
            configs = configs.load(local, Locality::Local)?;
        }
        self.config = Config::from(configs);
        Ok(self)
    }

    /// Applies the environment's overrides onto the loaded configuration.
    pub fn overrides(mut self) -> Context {
        if let Some(v) = Environment::read(PRJKIT_TOOL_VERSION) {
            self.config.set_required_version(v);
        }
        if let Some(b) = Environment::read_flag(PRJKIT_IGNORE_VERSION) {
            self.config.set_ignore_version(b);
        }
        self
    }

    /// Downgrades a version mismatch to a warning when `ignore` is set.
    pub fn ignore_version(mut self, ignore: bool) -> Context {
        if ignore == true {
            self.config.set_ignore_version(true);
        }
        self
    }

    /// Builds the context from the process's environment.
    pub fn from_env(ignore_version: bool) -> Result<Context, Fault> {
        let cwd = env::current_dir()?;
        Ok(Context::new()
            .home(PRJKIT_HOME)?
            .settings(&cwd)
            .map_err(|e| Error::ConfigNotLoaded(LastError(e.to_string())))?
            .overrides()
            .ignore_version(ignore_version))
    }

    pub fn get_config(&self) -> &Config {
        &self.config
    }

    /// Verifies the installed tool is the release the configuration requires.
    ///
    /// A tolerated mismatch prints a warning and succeeds.
    pub fn check_tool_version(&self) -> Result<Compliance, Error> {
        let compliance = VersionCheck::from_config(&self.config).run()?;
        match &compliance {
            Compliance::Tolerated { required, detected } => println!(
                "{}: tool version {} does not match the required version {}",
                "warning".yellow(),
                detected,
                required
            ),
            Compliance::Compliant(v) => tracing::debug!("tool version {} is compliant", v),
            Compliance::Unchecked => tracing::debug!("no tool version is required"),
        }
        Ok(compliance)
    }

    /// Creates the locator for project descriptor files.
    pub fn project_locator(&self) -> Result<ProjectLocator, Error> {
        ProjectLocator::new(
            self.config.get_descriptor_pattern(),
            self.config.get_descriptor_depth(),
        )
    }

    /// Prepares a session with the vendor tool.
    pub fn tool_session(&self) -> ToolSession {
        ToolSession::from_config(&self.config)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;

    #[test]
    fn layered_settings() {
        let home = tempfile::tempdir().unwrap();
        let work = tempfile::tempdir().unwrap();
        fs::write(
            home.path().join(CONFIG_FILE),
            "[tool]\nversion = \"2023.1\"\n[project]\ndevice = \"LIFCL-17-8SG72C\"\n",
        )
        .unwrap();
        fs::write(
            work.path().join(LOCAL_CONFIG_FILE),
            "[project]\ndevice = \"LIFCL-40-9BG400C\"\n",
        )
        .unwrap();
        let mut ctx = Context::new();
        ctx.home_path = Some(home.path().to_path_buf());
        let ctx = ctx.settings(work.path()).unwrap().ignore_version(true);
        assert_eq!(ctx.get_config().get_required_version(), Some("2023.1"));
        assert_eq!(ctx.get_config().get_device(), Some("LIFCL-40-9BG400C"));
        assert_eq!(ctx.get_config().ignores_version(), true);
    }

    #[test]
    fn missing_files_give_defaults() {
        let home = tempfile::tempdir().unwrap();
        let mut ctx = Context::new();
        ctx.home_path = Some(home.path().join("absent"));
        let ctx = ctx.settings(home.path()).unwrap();
        assert_eq!(ctx.get_config(), &Config::new());
        assert_eq!(ctx.get_config().get_descriptor_depth(), 3);
        assert!(ctx.project_locator().is_ok());
    }

    #[test]
    fn bad_local_config_errors() {
        let work = tempfile::tempdir().unwrap();
        fs::write(work.path().join(LOCAL_CONFIG_FILE), "[tool\n").unwrap();
        assert!(Context::new().settings(work.path()).is_err());
    }
}
