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

use crate::commands::helps::run;
use crate::core::context::Context;
use crate::core::project;
use cliproc::{cli, proc, stage::*};
use cliproc::{Arg, Cli, Help, Subcommand};
use std::path::PathBuf;

#[derive(Debug, PartialEq)]
pub struct Run {
    ppath: PathBuf,
    implementation: Option<String>,
    step: Option<String>,
}

impl Subcommand<Context> for Run {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(run::HELP))?;
        Ok(Run {
            ppath: cli
                .get(Arg::option("ppath").value("dir"))?
                .unwrap_or(PathBuf::from(".")),
            implementation: cli.get(Arg::option("impl").value("name"))?,
            step: cli.get(Arg::option("step"))?,
        })
    }

    fn execute(self, c: &Context) -> proc::Result {
        c.check_tool_version()?;
        // command-line arguments override the configuration
        let implementation = self
            .implementation
            .as_deref()
            .unwrap_or(c.get_config().get_impl());
        let step = self.step.as_deref().unwrap_or(c.get_config().get_step());

        let mut session = c.tool_session();
        let descriptor = project::run_project(
            &mut session,
            &c.project_locator()?,
            &self.ppath,
            implementation,
            step,
        )?;
        println!(
            "info: finished {} of {} for project {}",
            step,
            implementation,
            descriptor.display()
        );
        Ok(())
    }
}
