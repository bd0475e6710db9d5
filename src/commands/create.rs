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

use crate::commands::exec;
use crate::commands::helps::create;
use crate::core::batch;
use crate::core::context::Context;
use crate::core::project;
use crate::core::store::{Blueprint, ProjectStore};
use crate::error::{Error, LastError};
use crate::util::filesystem;
use cliproc::{cli, proc, stage::*};
use cliproc::{Arg, Cli, Help, Subcommand};
use std::path::PathBuf;

#[derive(Debug, PartialEq)]
pub struct Create {
    name: String,
    ppath: PathBuf,
    device: Option<String>,
    performance: Option<String>,
    board: Option<String>,
    synthesis: Option<String>,
    implementation: Option<String>,
    cmds: Vec<String>,
}

impl Subcommand<Context> for Create {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(create::HELP))?;
        Ok(Create {
            ppath: cli
                .get(Arg::option("ppath").value("dir"))?
                .unwrap_or(PathBuf::from(".")),
            device: cli.get(Arg::option("device").value("part"))?,
            performance: cli.get(Arg::option("performance").value("grade"))?,
            board: cli.get(Arg::option("board").value("name"))?,
            synthesis: cli.get(Arg::option("synthesis").value("tool"))?,
            implementation: cli.get(Arg::option("impl").value("name"))?,
            cmds: cli
                .get_all(Arg::option("cmd").value("command"))?
                .unwrap_or_default(),
            name: cli.require(Arg::option("name"))?,
        })
    }

    fn execute(self, c: &Context) -> proc::Result {
        c.check_tool_version()?;
        let config = c.get_config();
        let cwd = std::env::current_dir()?;

        // locate the board before anything is created
        let board = match &self.board {
            Some(name) => {
                let found = project::find_board(
                    &config.get_boards_dir(),
                    name,
                    config.get_board_depth(),
                )?;
                Some(filesystem::absolutize(&cwd, &found))
            }
            None => None,
        };

        let blueprint = Blueprint::new(&self.name, cwd.join(&self.ppath))
            .implementation(self.implementation.as_deref().unwrap_or(config.get_impl()))
            .synthesis(self.synthesis.as_deref().unwrap_or(config.get_synthesis()))
            .device(self.device.as_deref().or(config.get_device()))
            .performance(self.performance.as_deref().or(config.get_performance()));

        let mut session = c.tool_session();
        let results = project::create_project(&mut session, &blueprint, |store, handle| {
            if let Some(pdc) = &board {
                let outcome = store
                    .add_source(handle, pdc)
                    .map_err(|e| Error::AddSourceFailed(pdc.clone(), LastError(e.to_string())))?;
                tracing::debug!("{}: {}", pdc, outcome);
            }
            Ok(batch::execute_all(store, handle, &self.cmds))
        })?;
        println!(
            "info: created project {}",
            blueprint.get_descriptor().display()
        );
        exec::report(&results, false)?;
        Ok(())
    }
}
