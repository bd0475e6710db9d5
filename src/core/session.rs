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
use crate::core::store::{AddOutcome, Blueprint, ProjectHandle, ProjectStore, StoreError};
use crate::core::tcl;
use crate::util::environment::{Environment, PRJKIT_PROJECT, PRJKIT_PROJECT_DIR};
use crate::util::filesystem;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

/// The outcome of one framed command as printed by the tool's shell.
#[derive(Debug, PartialEq)]
pub struct Reply {
    code: i32,
    message: String,
}

impl Reply {
    pub fn get_code(&self) -> i32 {
        self.code
    }

    pub fn get_message(&self) -> &str {
        &self.message
    }

    /// Tcl `catch` returns 0 for success and 2 for an explicit `return`.
    pub fn is_ok(&self) -> bool {
        self.code == 0 || self.code == 2
    }

    fn into_result(self, command: &str) -> Result<String, StoreError> {
        match self.is_ok() {
            true => Ok(self.message),
            false => Err(StoreError::Command {
                command: command.to_string(),
                message: self.message,
            }),
        }
    }
}

/// Reads lines until a complete framed reply is found.
///
/// Anything the tool prints outside of the frame is logged and discarded.
pub fn read_reply<R: BufRead>(reader: &mut R) -> Result<Reply, StoreError> {
    let mut line = String::new();
    // find the opening marker
    let code = loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Err(StoreError::Closed);
        }
        let text = line.trim_end();
        match text.strip_prefix(tcl::BEGIN_MARK) {
            Some(rc) => match rc.trim().parse::<i32>() {
                Ok(code) => break code,
                Err(_) => {
                    // treated as a failed command
                    tracing::debug!("unreadable return code in marker {:?}", text);
                    break 1;
                }
            },
            None => tracing::debug!("tool: {}", text),
        }
    };
    // gather the message until the closing marker
    let mut message: Vec<String> = Vec::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Err(StoreError::Closed);
        }
        let text = line.trim_end_matches(['\n', '\r']);
        if text == tcl::END_MARK {
            break;
        }
        message.push(text.to_string());
    }
    Ok(Reply {
        code,
        message: message.join("\n").trim_end().to_string(),
    })
}

struct Shell {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

/// Drives the vendor tool's interactive Tcl shell as a child process.
///
/// One shell is started per opened or created project and ends when the
/// project is closed.
pub struct ToolSession {
    command: String,
    args: Vec<String>,
    env: Environment,
    duplicate_pattern: String,
    shell: Option<Shell>,
}

impl ToolSession {
    pub fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
            args: Vec::new(),
            env: Environment::new(),
            duplicate_pattern: String::from(crate::core::config::DEFAULT_DUPLICATE_PATTERN),
            shell: None,
        }
    }

    /// Configures the shell command, its arguments, its environment, and the
    /// text that identifies a duplicate source.
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.get_tool_command())
            .args(config.get_tool_args())
            .env(Environment::new().from_config(config))
            .duplicate_pattern(config.get_duplicate_pattern())
    }

    pub fn args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn env(mut self, env: Environment) -> Self {
        self.env = env;
        self
    }

    pub fn duplicate_pattern(mut self, s: &str) -> Self {
        self.duplicate_pattern = s.to_lowercase();
        self
    }

    /// Checks if the tool's message reports that a file is already in the project.
    pub fn is_duplicate(&self, message: &str) -> bool {
        message.to_lowercase().contains(&self.duplicate_pattern)
    }

    fn spawn(&mut self, dir: &Path, descriptor: &Path) -> Result<(), StoreError> {
        if self.shell.is_some() == true {
            return Err(StoreError::Command {
                command: String::from("prj_open"),
                message: String::from("a project is already open in this session"),
            });
        }
        tracing::debug!("starting tool {:?} in {:?}", self.command, dir);
        let mut child = Command::new(&self.command)
            .args(&self.args)
            .current_dir(dir)
            .envs(self.env.into_map())
            .env(PRJKIT_PROJECT, filesystem::into_std_str(descriptor.to_path_buf()))
            .env(PRJKIT_PROJECT_DIR, filesystem::into_std_str(dir.to_path_buf()))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| StoreError::Spawn(self.command.clone(), e))?;
        let stdin = child.stdin.take().ok_or(StoreError::Closed)?;
        let stdout = BufReader::new(child.stdout.take().ok_or(StoreError::Closed)?);
        self.shell = Some(Shell {
            child,
            stdin,
            stdout,
        });
        Ok(())
    }

    /// Sends one command and waits for its reply.
    fn send(&mut self, command: &str) -> Result<String, StoreError> {
        let shell = self.shell.as_mut().ok_or(StoreError::Closed)?;
        tracing::trace!("send: {}", command);
        shell.stdin.write_all(tcl::frame(command).as_bytes())?;
        shell.stdin.flush()?;
        let reply = read_reply(&mut shell.stdout)?;
        tracing::trace!("reply: {:?}", reply);
        reply.into_result(command)
    }

    /// Asks the shell to exit and waits for it.
    fn shutdown(&mut self) -> Result<(), StoreError> {
        if let Some(mut shell) = self.shell.take() {
            // the shell may already be gone; waiting reports the real status
            let _ = writeln!(shell.stdin, "{}", tcl::exit());
            drop(shell.stdin);
            let status = shell.child.wait()?;
            tracing::debug!("tool exited with {}", status);
        }
        Ok(())
    }

    fn enter(&mut self, dir: &Path, descriptor: &Path) -> Result<(), StoreError> {
        self.spawn(dir, descriptor)?;
        // follow the tool into the project's directory
        std::env::set_current_dir(dir)?;
        Ok(())
    }
}

impl ProjectStore for ToolSession {
    fn open(&mut self, descriptor: &Path) -> Result<ProjectHandle, StoreError> {
        if descriptor.is_file() == false {
            return Err(StoreError::NotFound(descriptor.to_path_buf()));
        }
        let descriptor = descriptor.canonicalize()?;
        let handle = ProjectHandle::new(descriptor.clone());
        self.enter(handle.get_base_dir(), &descriptor)?;
        if let Err(e) = self.send(&tcl::open(&filesystem::into_std_str(descriptor))) {
            self.shutdown()?;
            return Err(e);
        }
        Ok(handle)
    }

    fn create(&mut self, blueprint: &Blueprint) -> Result<ProjectHandle, StoreError> {
        let dir = blueprint.get_dir().canonicalize()?;
        let handle = ProjectHandle::new(dir.join(format!("{}.rdf", blueprint.get_name())));
        self.enter(&dir, handle.get_descriptor())?;
        if let Err(e) = self.send(&tcl::create(blueprint)) {
            self.shutdown()?;
            return Err(e);
        }
        Ok(handle)
    }

    fn add_source(&mut self, _: &ProjectHandle, path: &str) -> Result<AddOutcome, StoreError> {
        match self.send(&tcl::add_source(path)) {
            Ok(_) => Ok(AddOutcome::Added),
            Err(StoreError::Command { message, .. }) if self.is_duplicate(&message) => {
                Ok(AddOutcome::AlreadyPresent)
            }
            Err(e) => Err(e),
        }
    }

    fn set_device_part(
        &mut self,
        _: &ProjectHandle,
        device: &str,
        performance: Option<&str>,
    ) -> Result<(), StoreError> {
        self.send(&tcl::set_device(device, performance))?;
        Ok(())
    }

    fn run(
        &mut self,
        _: &ProjectHandle,
        implementation: &str,
        step: &str,
    ) -> Result<(), StoreError> {
        self.send(&tcl::run(implementation, step))?;
        Ok(())
    }

    fn execute(&mut self, _: &ProjectHandle, command: &str) -> Result<String, StoreError> {
        if tcl::is_balanced(command) == false {
            return Err(StoreError::Command {
                command: command.to_string(),
                message: String::from("unbalanced braces"),
            });
        }
        self.send(command)
    }

    fn save(&mut self, _: &ProjectHandle) -> Result<(), StoreError> {
        self.send(&tcl::save())?;
        Ok(())
    }

    fn close(&mut self, _: ProjectHandle) -> Result<(), StoreError> {
        let result = self.send(&tcl::close());
        self.shutdown()?;
        result.map(|_| ())
    }
}

impl Drop for ToolSession {
    fn drop(&mut self) {
        if let Some(mut shell) = self.shell.take() {
            tracing::debug!("stopping tool left running");
            let _ = shell.child.kill();
            let _ = shell.child.wait();
        }
    }
}
