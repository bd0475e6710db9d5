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

use crate::commands::helps::exec;
use crate::core::batch::{self, CommandOutcome};
use crate::core::context::Context;
use crate::core::project;
use crate::error::Error;
use crate::util::anyerror::Fault;
use cliproc::{cli, proc, stage::*};
use cliproc::{Arg, Cli, Help, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

#[derive(Debug, PartialEq)]
pub struct Exec {
    ppath: PathBuf,
    cmds: Vec<String>,
    json: bool,
}

impl Subcommand<Context> for Exec {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(exec::HELP))?;
        Ok(Exec {
            json: cli.check(Arg::flag("json"))?,
            ppath: cli
                .get(Arg::option("ppath").value("dir"))?
                .unwrap_or(PathBuf::from(".")),
            cmds: cli
                .get_all(Arg::option("cmd").value("command"))?
                .unwrap_or_default(),
        })
    }

    fn execute(self, c: &Context) -> proc::Result {
        c.check_tool_version()?;
        let locator = c.project_locator()?;
        let descriptor = locator.find(&self.ppath)?;

        let mut session = c.tool_session();
        let results = project::with_project(&mut session, &descriptor, |store, handle| {
            Ok(batch::execute_all(store, handle, &self.cmds))
        })?;
        report(&results, self.json)?;
        Ok(())
    }
}

/// Displays the outcome of every command, failing if any of them failed.
pub fn report(results: &[(String, CommandOutcome)], json: bool) -> Result<(), Fault> {
    if json == true {
        let list: Vec<serde_json::Value> = results
            .iter()
            .map(|(cmd, outcome)| {
                let mut entry = serde_json::to_value(outcome)?;
                if let Some(map) = entry.as_object_mut() {
                    map.insert(String::from("command"), serde_json::Value::from(cmd.as_str()));
                }
                Ok(entry)
            })
            .collect::<Result<Vec<serde_json::Value>, serde_json::Error>>()?;
        println!("{}", serde_json::to_string_pretty(&list)?);
    } else {
        for (cmd, outcome) in results {
            match outcome {
                CommandOutcome::Ok(text) => {
                    println!("info: {}", cmd);
                    if text.is_empty() == false {
                        println!("{}", text);
                    }
                }
                CommandOutcome::Failed(message) => {
                    println!("{}: {}: {}", "error".red(), cmd, message)
                }
            }
        }
    }
    match batch::failures(results) {
        0 => Ok(()),
        n => Err(Error::CommandsFailed(n))?,
    }
}
