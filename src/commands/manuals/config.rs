// This manual page was automatically generated from the mangen.py tool.
pub const MANUAL: &str = r#"NAME
    config - configuration files

DESCRIPTION
    Settings are read from the global file $PRJKIT_HOME/config.toml and the
    local file ./prjkit.toml. A value set in the local file takes precedence
    over the global file, which takes precedence over any files listed in
    their 'include' keys. Relative paths are resolved against the file that
    sets them.

    [tool]
    version = "2023.1"
    ignore-version = false
    version-var = "FOUNDRY"
    command = "radiantc"
    args = []
    duplicate-pattern = "already"

    [project]
    device = "LIFCL-40-9BG400C"
    performance = "9_High-Performance_1.0V"
    synthesis = "lse"
    impl = "impl_1"
    step = "Export"
    descriptor = "*.rdf"
    descriptor-depth = 3
    boards = "boards"
    board-depth = 7

    [sources]
    exts = ["*.v", "*.sv", "*.vhd", "*.vhdl", "*.ipx"]
    depth = 6

    [env]
    KEY = "value"

    Variables in the [env] table are passed to the tool's shell.
"#;
