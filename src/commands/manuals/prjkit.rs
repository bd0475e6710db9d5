// This manual page was automatically generated from the mangen.py tool.
pub const MANUAL: &str = r#"NAME
    prjkit - drive fpga vendor projects from the command line

SYNOPSIS
    prjkit [options] [command]

DESCRIPTION
    Prjkit creates and opens projects of the vendor tool, registers hdl
    source files with them, and runs the implementation flow. The tool is
    driven through its command shell, so the project descriptor (.rdf) is
    only ever read and written by the tool itself.

    Before any command touches a project, the installed tool version is
    compared against the required version (see 'prjkit help check').

OPTIONS
    --version
        Print version information and exit

    --ignore-version
        Continue with a warning when the tool version does not match

    --verbose
        Print diagnostic messages to stderr

    --color <when>
        Coloring: auto, always, never

    --help, -h
        Print help information

ENVIRONMENT
    PRJKIT_HOME
        Directory holding the global config.toml (default: ~/.prjkit)

    PRJKIT_TOOL_VERSION
        Required tool version, overriding the configuration

    PRJKIT_IGNORE_VERSION
        Set to 1 or true to behave as if --ignore-version was given

    PRJKIT_LOG
        Filter for diagnostic messages (default: warn)

EXIT STATUS
    0 on success, 2 when the tool version is wrong or undetectable, the
    usage mode is invalid, or no project is found, and 101 otherwise.

EXAMPLES
    prjkit create --name blinky --device LIFCL-40-9BG400C
    prjkit add --exts "*.v" --sdepth 2
    prjkit run --step Bitstream
"#;
