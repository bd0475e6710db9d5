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

use crate::core::store::{ProjectHandle, ProjectStore};
use serde_derive::Serialize;

/// The result of passing one command to the tool.
#[derive(Debug, PartialEq, Serialize)]
#[serde(tag = "status", content = "text", rename_all = "kebab-case")]
pub enum CommandOutcome {
    Ok(String),
    Failed(String),
}

impl CommandOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }
}

/// Runs each command against `project` in order.
///
/// A failing command is recorded and the remaining commands still run.
pub fn execute_all<S, C>(
    store: &mut S,
    project: &ProjectHandle,
    commands: &[C],
) -> Vec<(String, CommandOutcome)>
where
    S: ProjectStore + ?Sized,
    C: AsRef<str>,
{
    commands
        .iter()
        .map(|cmd| {
            let cmd = cmd.as_ref();
            let outcome = match store.execute(project, cmd) {
                Ok(out) => CommandOutcome::Ok(out),
                Err(e) => {
                    tracing::debug!("command `{}` failed: {}", cmd, e);
                    CommandOutcome::Failed(e.to_string())
                }
            };
            (cmd.to_string(), outcome)
        })
        .collect()
}

/// Counts the commands that did not succeed.
pub fn failures(results: &[(String, CommandOutcome)]) -> usize {
    results.iter().filter(|(_, o)| o.is_ok() == false).count()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::store::memory::MemoryStore;
    use crate::core::store::ProjectStore;
    use crate::util::filesystem::{lock_cwd, DirGuard};

    #[test]
    fn failures_do_not_stop_the_batch() {
        let _lock = lock_cwd();
        let _guard = DirGuard::new().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let rdf = dir.path().join("blinky.rdf");
        let mut store = MemoryStore::new().with_project(&rdf).failing("bogus");
        let handle = store.open(&rdf).unwrap();

        let results = execute_all(
            &mut store,
            &handle,
            &["prj_set_strategy_value x=1", "bogus", "prj_run Synthesis"],
        );
        assert_eq!(results.len(), 3);
        assert!(results[0].1.is_ok());
        assert_eq!(results[1].0, "bogus");
        assert!(matches!(results[1].1, CommandOutcome::Failed(_)));
        assert!(results[2].1.is_ok());
        assert_eq!(failures(&results), 1);
        assert_eq!(store.count("execute"), 3);
        store.close(handle).unwrap();
    }

    #[test]
    fn outcome_json() {
        assert_eq!(
            serde_json::to_string(&CommandOutcome::Failed(String::from("oops"))).unwrap(),
            r#"{"status":"failed","text":"oops"}"#
        );
    }
}
