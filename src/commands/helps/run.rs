// This help page was automatically generated from the mangen.py tool.
pub const HELP: &str = r#"Run the implementation flow of a project.

Usage:
    prjkit run [options]

Options:
    --ppath <dir>       directory to search for the project
    --impl <name>       implementation to run
    --step <step>       last step of the flow to run

Use 'prjkit help run' to read more about the command.
"#;
