// This manual page was automatically generated from the mangen.py tool.
pub const MANUAL: &str = r#"NAME
    exec - pass commands to the tool for a project

SYNOPSIS
    prjkit exec [options] --cmd <command>...

DESCRIPTION
    This command finds the first project descriptor within 3 levels of
    --ppath, opens it, and passes each command to the tool in order.

    Every command is attempted. A failing command is reported and the
    remaining commands still run. The project is saved and closed at the
    end, and the command exits with an error if any command failed.

OPTIONS
    --ppath <dir>
        Directory to search for the project (default: .)

    --cmd <command>...
        Tool command to run against the project

    --json
        Print the results as json

EXAMPLES
    prjkit exec --cmd "prj_set_impl_opt top blinky" --cmd "prj_run Synthesis"
"#;
