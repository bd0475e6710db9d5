// This help page was automatically generated from the mangen.py tool.
pub const HELP: &str = r#"Verify the installed tool version.

Usage:
    prjkit check

Use 'prjkit help check' to read more about the command.
"#;
