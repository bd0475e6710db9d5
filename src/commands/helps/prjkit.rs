// This help page was automatically generated from the mangen.py tool.
pub const HELP: &str = r#"Prjkit is a tool for driving fpga vendor projects.

Usage:
    prjkit [options] [command]

Commands:
    create          create a new project
    add             register source files with a project
    run             run the implementation flow
    exec            pass commands to the tool for a project
    check           verify the installed tool version

Options:
    --version           print version information and exit
    --ignore-version    continue when the tool version does not match
    --verbose           print diagnostic messages
    --color <when>      coloring: auto, always, never
    --help, -h          print help information

Use 'prjkit help <command>' for more information about a command.
"#;
