// This manual page was automatically generated from the mangen.py tool.
pub const MANUAL: &str = r#"NAME
    add - register source files with a project

SYNOPSIS
    prjkit add [options]

DESCRIPTION
    This command finds the first project descriptor within 3 levels of
    --ppath and registers files with it. The project is saved and closed
    once after every file is processed.

    In auto mode, files are collected from --spath by matching their names
    against each --exts pattern, searching at most --sdepth levels below
    it. In manual mode, exactly the files given by --flist are added.

    A file that is already part of the project is reported and skipped.
    Adding the same files twice leaves the project unchanged.

OPTIONS
    --ppath <dir>
        Directory to search for the project (default: .)

    --usage <mode>
        Select files automatically or manually: auto, manual (default: auto)

    --exts <glob>...
        Pattern of file names to collect in auto mode (default: sources.exts)

    --spath <dir>
        Directory to collect files from in auto mode (default: .)

    --sdepth <n>
        Levels below --spath to collect from (default: 6)

    --flist <file>...
        File to add in manual mode

    --json
        Print the results as json

EXAMPLES
    prjkit add
    prjkit add --exts "*.sv" --exts "*.ipx" --spath rtl --sdepth 2
    prjkit add --usage manual --flist rtl/top.v --flist rtl/uart.v --json
"#;
