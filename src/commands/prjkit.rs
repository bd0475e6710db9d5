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

use crate::commands::helps::prjkit;
use crate::core::context::Context;
use crate::error::{Error, EXIT_FATAL};
use crate::util::anyerror::AnyError;
use crate::util::logging;
use cliproc::{cli, proc, stage::*};
use cliproc::{Arg, Cli, Command, Help, Subcommand};
use colored::Colorize;
use std::str::FromStr;

#[derive(Debug, PartialEq)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl FromStr for ColorMode {
    type Err = AnyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            _ => Err(AnyError::from(
                "value must be \"auto\", \"always\", or \"never\"",
            )),
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Prjkit {
    version: bool,
    ignore_version: bool,
    verbose: bool,
    command: Option<PrjkitSubcommand>,
}

impl Command for Prjkit {
    fn interpret(cli: &mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(prjkit::HELP))?;
        // need to set this coloring mode ASAP
        match cli
            .get(Arg::option("color").value("when"))?
            .unwrap_or(ColorMode::Auto)
        {
            ColorMode::Always => colored::control::set_override(true),
            ColorMode::Never => colored::control::set_override(false),
            ColorMode::Auto => (),
        }
        Ok(Prjkit {
            version: cli.check(Arg::flag("version"))?,
            ignore_version: cli.check(Arg::flag("ignore-version"))?,
            verbose: cli.check(Arg::flag("verbose"))?,
            command: cli.nest(Arg::subcommand("command"))?,
        })
    }

    fn execute(self) -> proc::Result {
        // prioritize version information
        if self.version == true {
            println!("prjkit {}", VERSION);
            return Ok(());
        }
        let command = match self.command {
            Some(c) => c,
            // if no command is given then print default help
            None => {
                println!("{}", prjkit::HELP);
                return Ok(());
            }
        };
        logging::init_logging(self.verbose);
        // reading the manual never depends on the configuration
        if let PrjkitSubcommand::Help(h) = command {
            return h.execute(&());
        }
        let context = Context::from_env(self.ignore_version)?;
        match command.execute(&context) {
            Ok(()) => Ok(()),
            Err(e) => match e.downcast_ref::<Error>() {
                Some(err) if err.exit_code() == EXIT_FATAL => {
                    eprintln!("{}: {}", "error".red().bold(), err);
                    std::process::exit(EXIT_FATAL as i32)
                }
                _ => Err(e),
            },
        }
    }
}

use crate::commands::add::Add;
use crate::commands::check::Check;
use crate::commands::create::Create;
use crate::commands::exec::Exec;
use crate::commands::help;
use crate::commands::run::Run;

#[derive(Debug, PartialEq)]
enum PrjkitSubcommand {
    Help(help::Help),
    Create(Create),
    Add(Add),
    Run(Run),
    Exec(Exec),
    Check(Check),
}

impl Subcommand<Context> for PrjkitSubcommand {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        match cli
            .select(&["help", "create", "add", "run", "exec", "check"])?
            .as_ref()
        {
            "help" => Ok(PrjkitSubcommand::Help(help::Help::interpret(cli)?)),
            "create" => Ok(PrjkitSubcommand::Create(Create::interpret(cli)?)),
            "add" => Ok(PrjkitSubcommand::Add(Add::interpret(cli)?)),
            "run" => Ok(PrjkitSubcommand::Run(Run::interpret(cli)?)),
            "exec" => Ok(PrjkitSubcommand::Exec(Exec::interpret(cli)?)),
            "check" => Ok(PrjkitSubcommand::Check(Check::interpret(cli)?)),
            _ => panic!("an unimplemented command was passed through!"),
        }
    }

    fn execute(self, context: &Context) -> proc::Result {
        match self {
            PrjkitSubcommand::Help(c) => c.execute(&()),
            PrjkitSubcommand::Create(c) => c.execute(context),
            PrjkitSubcommand::Add(c) => c.execute(context),
            PrjkitSubcommand::Run(c) => c.execute(context),
            PrjkitSubcommand::Exec(c) => c.execute(context),
            PrjkitSubcommand::Check(c) => c.execute(context),
        }
    }
}

const VERSION: &str = env!("CARGO_PKG_VERSION");
