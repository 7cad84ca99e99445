mod start_options;

pub use start_options::StartOptions;

pub(crate) const DEFAULT_LANG: &str = "en-US";
pub(crate) const DEFAULT_CONTINUOUS: bool = true;
pub(crate) const DEFAULT_INTERIM_RESULTS: bool = true;
pub(crate) const OPTIONS_FILE_NAME: &str = "start-options.toml";
