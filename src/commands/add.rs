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

use crate::commands::helps::add;
use crate::core::context::Context;
use crate::core::fileset::{self, ExtensionPattern, SearchSpec};
use crate::core::reconcile::{self, Report};
use crate::core::store::AddOutcome;
use crate::error::{Error, LastError};
use crate::util::filesystem;
use cliproc::{cli, proc, stage::*};
use cliproc::{Arg, Cli, Help, Subcommand};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// How the files to register are chosen.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum UsageMode {
    Auto,
    Manual,
}

impl FromStr for UsageMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "manual" => Ok(Self::Manual),
            _ => Err(Error::InvalidUsageMode(s.to_string())),
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Add {
    ppath: PathBuf,
    usage: String,
    exts: Option<Vec<String>>,
    spath: String,
    sdepth: Option<usize>,
    flist: Vec<String>,
    json: bool,
}

impl Subcommand<Context> for Add {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(add::HELP))?;
        Ok(Add {
            json: cli.check(Arg::flag("json"))?,
            ppath: cli
                .get(Arg::option("ppath").value("dir"))?
                .unwrap_or(PathBuf::from(".")),
            // validated when executed
            usage: cli
                .get(Arg::option("usage").value("mode"))?
                .unwrap_or(String::from("auto")),
            exts: cli.get_all(Arg::option("exts").value("glob"))?,
            spath: cli
                .get(Arg::option("spath").value("dir"))?
                .unwrap_or(String::from(".")),
            sdepth: cli.get(Arg::option("sdepth").value("n"))?,
            flist: cli
                .get_all(Arg::option("flist").value("file"))?
                .unwrap_or_default(),
        })
    }

    fn execute(self, c: &Context) -> proc::Result {
        let mode = UsageMode::from_str(&self.usage)?;
        c.check_tool_version()?;

        let cwd = std::env::current_dir()?;
        let files = match mode {
            UsageMode::Auto => {
                let exts = match &self.exts {
                    Some(list) => parse_exts(list)?,
                    None => c.get_config().get_exts(),
                };
                let depth = self.sdepth.unwrap_or(c.get_config().get_source_depth());
                self.collect_sources(&cwd, exts, depth)
            }
            UsageMode::Manual => self.list_sources(&cwd),
        };
        tracing::debug!("{} file(s) to reconcile", files.len());

        let mut session = c.tool_session();
        let report =
            reconcile::add_to_project(&mut session, &c.project_locator()?, &self.ppath, &files)?;
        self.display(&report)
    }
}

impl Add {
    /// Collects files under the search path, made absolute against `cwd`.
    fn collect_sources(&self, cwd: &Path, exts: Vec<ExtensionPattern>, depth: usize) -> Vec<String> {
        // the cut length must match how the search path prefixes each result
        let root = match self.spath.trim_end_matches(['/', '\\']) {
            "" => self.spath.as_str(),
            trimmed => trimmed,
        };
        let found = SearchSpec::new(PathBuf::from(root))
            .patterns(exts)
            .depth(depth)
            .collect();
        match Path::new(root).is_relative() {
            true => {
                // `cwd/./rtl` collapses to `cwd/rtl`
                let base: PathBuf = cwd.join(root).components().collect();
                filesystem::rebase(
                    &found,
                    root,
                    &format!("{}/", filesystem::into_std_str(base)),
                )
            }
            false => found,
        }
    }

    /// Takes the explicit file list, made absolute against `cwd`.
    fn list_sources(&self, cwd: &Path) -> Vec<String> {
        self.flist
            .iter()
            .map(|f| filesystem::absolutize(cwd, f))
            .collect()
    }

    fn display(&self, report: &Report) -> proc::Result {
        if self.json == true {
            println!("{}", serde_json::to_string_pretty(report)?);
            return Ok(());
        }
        for member in report.get_members() {
            match member.get_outcome() {
                AddOutcome::Added => println!("info: added {}", member.get_path()),
                AddOutcome::AlreadyPresent => {
                    println!("info: already in project {}", member.get_path())
                }
            }
        }
        println!(
            "info: {} file(s) added and {} already present in {}",
            report.count(AddOutcome::Added),
            report.count(AddOutcome::AlreadyPresent),
            report.get_project().display()
        );
        Ok(())
    }
}

/// Parses the extension globs given on the command-line.
fn parse_exts(list: &[String]) -> Result<Vec<ExtensionPattern>, Error> {
    fileset::parse_patterns(list).map_err(|e| Error::BadPattern(LastError(e.to_string())))
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;

    fn add(spath: &str, flist: &[&str]) -> Add {
        Add {
            ppath: PathBuf::from("."),
            usage: String::from("auto"),
            exts: None,
            spath: spath.to_string(),
            sdepth: None,
            flist: flist.iter().map(|s| s.to_string()).collect(),
            json: false,
        }
    }

    #[test]
    fn usage_modes() {
        assert_eq!(UsageMode::from_str("auto").unwrap(), UsageMode::Auto);
        assert_eq!(UsageMode::from_str("manual").unwrap(), UsageMode::Manual);
        let err = UsageMode::from_str("Auto").unwrap_err();
        assert_eq!(err, Error::InvalidUsageMode(String::from("Auto")));
        assert_eq!(err.exit_code(), crate::error::EXIT_FATAL);
    }

    #[test]
    fn absolute_search_path_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("lib")).unwrap();
        fs::write(dir.path().join("a.v"), "").unwrap();
        fs::write(dir.path().join("b.ipx"), "").unwrap();
        fs::write(dir.path().join("lib/c.v"), "").unwrap();
        let spath = filesystem::into_std_str(dir.path().to_path_buf());

        let files = add(&spath, &[]).collect_sources(Path::new("/elsewhere"), pats(&["*.v"]), 1);
        assert_eq!(files.len(), 2);
        assert!(files.contains(&format!("{}/a.v", spath)));
        assert!(files.contains(&format!("{}/lib/c.v", spath)));
    }

    fn pats(list: &[&str]) -> Vec<ExtensionPattern> {
        fileset::parse_patterns(list).unwrap()
    }

    #[test]
    fn relative_search_path_keeps_its_directory() {
        let _lock = filesystem::lock_cwd();
        let _guard = filesystem::DirGuard::new().unwrap();
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("rtl")).unwrap();
        fs::write(dir.path().join("rtl/top.sv"), "").unwrap();
        std::env::set_current_dir(dir.path()).unwrap();

        let cwd = std::env::current_dir().unwrap();
        let base = filesystem::into_std_str(cwd.clone());
        for spath in ["rtl", "rtl/", "./rtl"] {
            let files = add(spath, &[]).collect_sources(&cwd, pats(&["*.sv"]), 0);
            assert_eq!(files, vec![format!("{}/rtl/top.sv", base)]);
            assert!(Path::new(&files[0]).exists());
        }
        for spath in [".", "./"] {
            let files = add(spath, &[]).collect_sources(&cwd, pats(&["*.sv"]), 1);
            assert_eq!(files, vec![format!("{}/rtl/top.sv", base)]);
            assert!(Path::new(&files[0]).exists());
        }
    }

    #[test]
    fn manual_list_is_absolutized() {
        let files = add(".", &["rtl/top.v", "/ip/pll.ipx"]).list_sources(Path::new("/work"));
        assert_eq!(files, vec!["/work/rtl/top.v", "/ip/pll.ipx"]);
    }

    #[test]
    fn nested_relative_search_path() {
        let _lock = filesystem::lock_cwd();
        let _guard = filesystem::DirGuard::new().unwrap();
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("hw/rtl/sub")).unwrap();
        fs::write(dir.path().join("hw/rtl/top.v"), "").unwrap();
        fs::write(dir.path().join("hw/rtl/sub/alu.v"), "").unwrap();
        std::env::set_current_dir(dir.path()).unwrap();

        let cwd = std::env::current_dir().unwrap();
        let base = filesystem::into_std_str(cwd.clone());
        let files = add("hw/rtl", &[]).collect_sources(&cwd, pats(&["*.v"]), 1);
        assert_eq!(
            files,
            vec![
                format!("{}/hw/rtl/top.v", base),
                format!("{}/hw/rtl/sub/alu.v", base)
            ]
        );
        assert!(files.iter().all(|f| Path::new(f).exists()));
    }

    #[test]
    fn bad_pattern_is_rejected() {
        let result = parse_exts(&[String::from("*.v"), String::from("[")]);
        assert!(matches!(result, Err(Error::BadPattern(_))));
        assert_eq!(parse_exts(&[String::from("*.sv")]).unwrap().len(), 1);
    }
}
