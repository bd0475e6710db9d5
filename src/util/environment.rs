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

use crate::core::config::Config;
use std::collections::btree_set::BTreeSet;
use std::collections::HashMap;
use std::hash::Hash;

pub const PRJKIT_HOME: &str = "PRJKIT_HOME";
pub const PRJKIT_TOOL_VERSION: &str = "PRJKIT_TOOL_VERSION";
pub const PRJKIT_IGNORE_VERSION: &str = "PRJKIT_IGNORE_VERSION";
pub const PRJKIT_LOG: &str = "PRJKIT_LOG";

pub const PRJKIT_PROJECT: &str = "PRJKIT_PROJECT";
pub const PRJKIT_PROJECT_DIR: &str = "PRJKIT_PROJECT_DIR";

#[derive(Eq)]
pub struct EnvVar {
    key: String,
    value: String,
}

impl PartialEq for EnvVar {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Ord for EnvVar {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

impl PartialOrd for EnvVar {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for EnvVar {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        // only hash by the key name
        self.key.hash(state);
    }
}

impl EnvVar {
    pub fn new() -> Self {
        Self {
            key: String::new(),
            value: String::new(),
        }
    }

    /// Sets the environment key.
    pub fn key(mut self, s: &str) -> Self {
        // normalize the key name upon entry
        self.key = s.to_ascii_uppercase().replace('-', "_");
        self
    }

    /// Sets the environment value.
    pub fn value(mut self, s: &str) -> Self {
        self.value = s.to_owned();
        self
    }
}

impl std::fmt::Debug for EnvVar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}=\"{}\"", self.key, self.value)
    }
}

/// The set of variables handed to the tool's command shell.
#[derive(Debug)]
pub struct Environment(BTreeSet<EnvVar>);

impl Environment {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    pub fn insert(&mut self, var: EnvVar) -> bool {
        self.0.insert(var)
    }

    pub fn into_map(&self) -> HashMap<&String, &String> {
        self.0.iter().map(|v| (&v.key, &v.value)).collect()
    }

    /// Loads an `Environment` struct from a `Config` document.
    ///
    /// It searches the `[env]` table and collects all env variables.
    pub fn from_config(mut self, config: &Config) -> Self {
        if let Some(map) = config.get_env() {
            map.iter().for_each(|(key, val)| {
                self.insert(EnvVar::new().key(key).value(val));
            });
        }
        self
    }

    pub fn read(key: &str) -> Option<String> {
        match std::env::var(key) {
            Ok(v) => Some(v),
            Err(_) => None,
        }
    }

    /// Reads a variable as a switch.
    ///
    /// Returns `None` when the variable is unset or empty.
    pub fn read_flag(key: &str) -> Option<bool> {
        Self::read(key).and_then(|v| parse_flag(&v))
    }
}

/// Interprets common spellings of a boolean switch.
fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_ref() {
        "" => None,
        "1" | "true" | "yes" | "on" => Some(true),
        _ => Some(false),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn normalize_keys() {
        let mut env = Environment::new();
        env.insert(EnvVar::new().key("lm-license_file").value("/opt/license.dat"));
        // same key once normalized
        assert_eq!(env.insert(EnvVar::new().key("LM-LICENSE-FILE").value("/x")), false);
        let map = env.into_map();
        assert_eq!(map.len(), 1);
        assert_eq!(
            map.get(&String::from("LM_LICENSE_FILE")).map(|v| v.as_str()),
            Some("/opt/license.dat")
        );
    }

    #[test]
    fn from_config_env_table() {
        let cfg = Config::from_str("[env]\nlm-license-file = \"/lic.dat\"\n").unwrap();
        let env = Environment::new().from_config(&cfg);
        let map = env.into_map();
        assert_eq!(map.len(), 1);
        assert_eq!(
            map.get(&String::from("LM_LICENSE_FILE")).map(|v| v.as_str()),
            Some("/lic.dat")
        );
    }

    #[test]
    fn flag_spellings() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("no"), Some(false));
        assert_eq!(parse_flag(" "), None);
    }
}
