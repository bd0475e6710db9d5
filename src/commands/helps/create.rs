// This help page was automatically generated from the mangen.py tool.
pub const HELP: &str = r#"Create a new project.

Usage:
    prjkit create [options] --name <name>

Options:
    --name <name>           name of the project
    --ppath <dir>           directory to create the project in
    --device <part>         device part number
    --performance <grade>   device performance grade
    --board <name>          add the board's constraints file
    --synthesis <tool>      synthesis tool to use
    --impl <name>           name of the first implementation
    --cmd <command>...      tool commands to run after creation

Use 'prjkit help create' to read more about the command.
"#;
