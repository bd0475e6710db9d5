// This manual page was automatically generated from the mangen.py tool.
pub const MANUAL: &str = r#"NAME
    run - run the implementation flow of a project

SYNOPSIS
    prjkit run [options]

DESCRIPTION
    This command finds the first project descriptor within 3 levels of
    --ppath and runs its implementation flow up to and including --step.
    The project is saved and closed afterward.

OPTIONS
    --ppath <dir>
        Directory to search for the project (default: .)

    --impl <name>
        Implementation to run (default: impl_1)

    --step <step>
        Last step of the flow to run (default: Export)

EXAMPLES
    prjkit run
    prjkit run --impl impl_2 --step Synthesis
"#;
