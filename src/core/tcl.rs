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

//! Text of the commands sent to the vendor tool's Tcl shell.

use crate::core::store::Blueprint;

/// First line of a framed reply, followed by the command's return code.
pub const BEGIN_MARK: &str = "@@prjkit-begin";
/// Last line of a framed reply.
pub const END_MARK: &str = "@@prjkit-end";

/// Writes `s` as a double-quoted Tcl word.
///
/// Characters that trigger substitution inside double quotes are escaped so the
/// word reaches the command unchanged.
pub fn quote(s: &str) -> String {
    let mut word = String::with_capacity(s.len() + 2);
    word.push('"');
    for c in s.chars() {
        match c {
            '\\' | '"' | '$' | '[' | ']' => {
                word.push('\\');
                word.push(c);
            }
            '\n' => word.push_str("\\n"),
            _ => word.push(c),
        }
    }
    word.push('"');
    word
}

/// Checks that every brace in `cmd` is closed, ignoring escaped braces.
pub fn is_balanced(cmd: &str) -> bool {
    let mut depth: usize = 0;
    let mut escaped = false;
    for c in cmd.chars() {
        match (escaped, c) {
            (true, _) => escaped = false,
            (false, '\\') => escaped = true,
            (false, '{') => depth += 1,
            (false, '}') => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            _ => (),
        }
    }
    depth == 0
}

/// Surrounds `cmd` so its return code and result are printed between markers.
pub fn frame(cmd: &str) -> String {
    format!(
        "set __prjkit_rc [catch {{{cmd}}} __prjkit_msg]\n\
         puts \"{BEGIN_MARK} $__prjkit_rc\"\n\
         puts $__prjkit_msg\n\
         puts \"{END_MARK}\"\n\
         flush stdout\n"
    )
}

pub fn open(descriptor: &str) -> String {
    format!("prj_open {}", quote(descriptor))
}

pub fn create(bp: &Blueprint) -> String {
    let mut cmd = format!(
        "prj_create -name {} -impl {}",
        quote(bp.get_name()),
        quote(bp.get_implementation())
    );
    if let Some(dev) = bp.get_device() {
        cmd.push_str(&format!(" -dev {}", quote(dev)));
    }
    if let Some(grade) = bp.get_performance() {
        cmd.push_str(&format!(" -performance {}", quote(grade)));
    }
    cmd.push_str(&format!(" -synthesis {}", quote(bp.get_synthesis())));
    cmd
}

pub fn add_source(path: &str) -> String {
    format!("prj_add_source {}", quote(path))
}

pub fn set_device(device: &str, performance: Option<&str>) -> String {
    match performance {
        Some(grade) => format!(
            "prj_set_device -part {} -performance {}",
            quote(device),
            quote(grade)
        ),
        None => format!("prj_set_device -part {}", quote(device)),
    }
}

pub fn run(implementation: &str, step: &str) -> String {
    format!("prj_run {} -impl {}", quote(step), quote(implementation))
}

pub fn save() -> String {
    String::from("prj_save")
}

pub fn close() -> String {
    String::from("prj_close")
}

pub fn exit() -> String {
    String::from("exit")
}
