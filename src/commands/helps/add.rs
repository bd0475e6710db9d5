// This help page was automatically generated from the mangen.py tool.
pub const HELP: &str = r#"Register source files with a project.

Usage:
    prjkit add [options]

Options:
    --ppath <dir>           directory to search for the project
    --usage <mode>          select files automatically or manually (auto, manual)
    --exts <glob>...        patterns of files to collect in auto mode
    --spath <dir>           directory to collect files from in auto mode
    --sdepth <n>            levels below the search directory to collect from
    --flist <file>...       files to add in manual mode
    --json                  print the results as json

Use 'prjkit help add' to read more about the command.
"#;
