pub const URL_COLUMN: &str = "url";
pub const USERNAME_COLUMN: &str = "username";
pub const PASSWORD_COLUMN: &str = "password";
pub const GROUP_COLUMN: &str = "group";

pub const DEFAULT_OUTPUT_PATH: &str = "data/exported_passwords.csv";
pub const DEFAULT_CONFIG_FILE: &str = "config.json";
pub const DEFAULT_VERBOSITY: &str = "normal";
pub const VERBOSITY_LEVELS: &[&str] = &["silent", "normal", "verbose"];

pub const INPUT_PROMPT: &str = "Enter path to passwords file: ";
pub const DUPLICATES_BANNER: &str = "=============POSSIBLE DUPLICATED ENTRIES:=============";
pub const OUTDATED_BANNER: &str = "=============POSSIBLE OUTDATED ENTRIES:=============";
pub const NO_DUPLICATES_MESSAGE: &str = "No duplicates found";
pub const NO_OUTDATED_MESSAGE: &str = "No outdated entries found";

pub const PROTOCOL_HTTP: &str = "http://";
pub const PROTOCOL_SEPARATOR: &str = "://";

pub const FAILURE_EXIT_CODE: i32 = 1;

pub const SECONDS_PER_MINUTE: f64 = 60.0;
pub const SECONDS_PER_HOUR: f64 = 3600.0;
