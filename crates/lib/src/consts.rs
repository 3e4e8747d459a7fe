/// Environment variable overriding the project root
pub const ROOT_ENV: &str = "FWBUILD_ROOT";

/// Config header template, relative to the project root
pub const TEMPLATE_PATH: &str = "src/system/include/config_template.h";

/// Generated config header, relative to the project root
pub const HEADER_PATH: &str = "src/system/include/config.h";

/// Serial console used by the program action when none is given
pub const DEFAULT_CONSOLE: u32 = 4;
