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

use crate::commands::helps::check;
use crate::core::context::Context;
use crate::core::version::Compliance;
use cliproc::{cli, proc, stage::*};
use cliproc::{Cli, Help, Subcommand};

#[derive(Debug, PartialEq)]
pub struct Check;

impl Subcommand<Context> for Check {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(check::HELP))?;
        Ok(Check)
    }

    fn execute(self, c: &Context) -> proc::Result {
        match c.check_tool_version()? {
            Compliance::Unchecked => println!("info: no tool version is required"),
            Compliance::Compliant(v) => println!("info: tool version {} is compliant", v),
            // the warning is already displayed
            Compliance::Tolerated { .. } => (),
        }
        Ok(())
    }
}
