/// Manifest read when no path is given on the command line.
pub const DEFAULT_MANIFEST: &str = "names.txt";

/// Lines starting with this marker are comments.
pub const COMMENT_MARKER: char = '#';

/// Config file looked up next to the manifest.
pub const CONFIG_FILENAME: &str = "extbuild.json";

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "EXTBUILD_CONFIG";

/// Number of characters kept from a revision hash.
pub const REVISION_LEN: usize = 12;
