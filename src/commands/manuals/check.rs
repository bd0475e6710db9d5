// This manual page was automatically generated from the mangen.py tool.
pub const MANUAL: &str = r#"NAME
    check - verify the installed tool version

SYNOPSIS
    prjkit check

DESCRIPTION
    This command compares the installed tool version against the required
    version. The installed version is read from the environment variable
    named by tool.version-var (default: FOUNDRY), which holds the tool's
    installation path, such as /usr/local/lscc/radiant/2023.1/ispfpga.

    A mismatch is an error unless --ignore-version is given, in which case
    a warning is printed. When the version cannot be read from the
    variable, it is always an error. When no version is required, nothing
    is checked.

    Every command that opens a project runs this check first.

EXAMPLES
    prjkit check
    PRJKIT_TOOL_VERSION=2023.2 prjkit check
"#;
