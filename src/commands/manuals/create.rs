// This manual page was automatically generated from the mangen.py tool.
pub const MANUAL: &str = r#"NAME
    create - create a new project

SYNOPSIS
    prjkit create [options] --name <name>

DESCRIPTION
    This command creates the project <name>.rdf in the directory given by
    --ppath, creating the directory when it is missing. Creating a project
    over an existing descriptor of the same name is refused.

    When a device is given, it is set as the project's part. When a board is
    given, its constraints file <board>.pdc is located under the configured
    boards directory and added to the project. Any commands given with
    --cmd are run afterward, in order. A failing command does not stop the
    commands after it, but the creation exits with an error once the
    project is saved.

OPTIONS
    --name <name>
        Name of the project

    --ppath <dir>
        Directory to create the project in (default: .)

    --device <part>
        Device part number (default: project.device)

    --performance <grade>
        Device performance grade (default: project.performance)

    --board <name>
        Board whose constraints file is added to the project

    --synthesis <tool>
        Synthesis tool to use (default: lse)

    --impl <name>
        Name of the first implementation (default: impl_1)

    --cmd <command>...
        Tool command to run after the project is created

EXAMPLES
    prjkit create --name blinky --device LIFCL-40-9BG400C --board crosslink-evn
    prjkit create --name blinky --ppath build --cmd "prj_set_strategy_value -strategy Strategy1 syn_frequency=100"
"#;
