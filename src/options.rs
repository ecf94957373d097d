use std::path::PathBuf;

pub const DEFAULT_LOCATION: &str = "http://localhost:8000/swagger/?format=json";
pub const DEFAULT_OUTPUT_DIR: &str = "src/api";
pub const DEFAULT_TRANSPORT_MODULE: &str = "@/utils/request";
pub const DEFAULT_PATHS_MODULE: &str = "@/utils/api-paths";

/// The resolved configuration for one generation run.
///
/// An options value is built once by the command-line layer and threaded
/// explicitly into every component call; nothing reads configuration from
/// ambient state.
#[derive(Clone, Debug)]
pub struct GeneratorOptions {
    /// Where the schema document lives: an `http(s)` URL or a file path.
    pub location: String,
    /// Directory receiving one generated module file per tag.
    pub output_dir: PathBuf,
    /// Destination file for the generated path-constants module.
    pub paths_file: PathBuf,
    /// Group constants and stubs by tag. When false, everything lands in a
    /// single flat `api` module.
    pub group_by_tag: bool,
    /// Camel-case generated module and operation keys.
    pub camel_case_keys: bool,
    /// Carry schema summaries and descriptions into generated comments.
    pub include_comments: bool,
    /// Replace output files that already exist.
    pub overwrite: bool,
    /// Allow-list of tag names to generate. Empty means all.
    pub modules: Vec<String>,
    /// Deny-list of tag names, applied only when `modules` is empty.
    pub exclude: Vec<String>,
    /// Module reference the generated stubs import the transport from.
    pub request_module: String,
    /// Module reference the generated stubs import path constants from.
    pub api_paths_module: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            location: DEFAULT_LOCATION.to_owned(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            paths_file: PathBuf::from(DEFAULT_OUTPUT_DIR).join("api-paths.js"),
            group_by_tag: true,
            camel_case_keys: true,
            include_comments: true,
            overwrite: false,
            modules: Vec::new(),
            exclude: Vec::new(),
            request_module: DEFAULT_TRANSPORT_MODULE.to_owned(),
            api_paths_module: DEFAULT_PATHS_MODULE.to_owned(),
        }
    }
}
