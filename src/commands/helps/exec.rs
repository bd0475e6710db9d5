// This help page was automatically generated from the mangen.py tool.
pub const HELP: &str = r#"Pass commands to the tool for a project.

Usage:
    prjkit exec [options] --cmd <command>...

Options:
    --ppath <dir>           directory to search for the project
    --cmd <command>...      tool command to run against the project
    --json                  print the results as json

Use 'prjkit help exec' to read more about the command.
"#;
