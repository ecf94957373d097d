use std::io::ErrorKind as IoErrorKind;
use std::path::PathBuf;

use apigen::{
    GeneratorOptions,
    options::{DEFAULT_LOCATION, DEFAULT_OUTPUT_DIR, DEFAULT_PATHS_MODULE, DEFAULT_TRANSPORT_MODULE},
};
use clap::{
    CommandFactory, FromArgMatches,
    error::{ErrorKind as ClapErrorKind, Result as ClapResult},
};
use serde::Deserialize;

const CONFIG_FILE: &str = ".apigen.toml";

#[derive(Debug)]
pub struct Main {
    pub options: GeneratorOptions,
}

impl Main {
    /// Parses the command line, merges it over the optional `.apigen.toml`
    /// in the working directory, and resolves one explicit options value
    /// for the run.
    pub fn parse() -> ClapResult<Main> {
        let mut cmd = MainArgs::command();
        let mut matches = cmd
            .try_get_matches_from_mut(std::env::args_os())
            .map_err(|err| err.format(&mut cmd))?;
        let args =
            MainArgs::from_arg_matches_mut(&mut matches).map_err(|err| err.format(&mut cmd))?;

        let file: Option<ConfigFile> = match std::fs::read_to_string(CONFIG_FILE) {
            Ok(contents) => Some(toml::from_str(&contents).map_err(|err| {
                cmd.error(
                    ClapErrorKind::ValueValidation,
                    format!("Failed to parse `{CONFIG_FILE}`: {err}"),
                )
            })?),
            Err(err) if err.kind() == IoErrorKind::NotFound => None,
            Err(err) => {
                return Err(cmd.error(
                    ClapErrorKind::Io,
                    format!("Failed to read `{CONFIG_FILE}`: {err}"),
                ));
            }
        };
        let file = file.unwrap_or_default();

        let output_dir = args
            .output
            .or(file.output)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
        let paths_file = args
            .paths
            .or(file.paths)
            .unwrap_or_else(|| output_dir.join("api-paths.js"));

        let options = GeneratorOptions {
            location: args
                .location
                .or(file.location)
                .unwrap_or_else(|| DEFAULT_LOCATION.to_owned()),
            output_dir,
            paths_file,
            group_by_tag: args.group_by_tag.or(file.group_by_tag).unwrap_or(true),
            camel_case_keys: args.camel_case.or(file.camel_case_keys).unwrap_or(true),
            include_comments: args.comments.or(file.include_comments).unwrap_or(true),
            overwrite: args.overwrite || file.overwrite.unwrap_or(false),
            modules: if args.modules.is_empty() {
                file.modules.unwrap_or_default()
            } else {
                args.modules
            },
            exclude: if args.exclude.is_empty() {
                file.exclude.unwrap_or_default()
            } else {
                args.exclude
            },
            request_module: args
                .request_module
                .or(file.request_module)
                .unwrap_or_else(|| DEFAULT_TRANSPORT_MODULE.to_owned()),
            api_paths_module: args
                .api_paths_module
                .or(file.api_paths_module)
                .unwrap_or_else(|| DEFAULT_PATHS_MODULE.to_owned()),
        };

        Ok(Main { options })
    }
}

#[derive(Debug, clap::Parser)]
#[command(
    version,
    about = "Generate JavaScript API client modules from a Swagger/OpenAPI document",
    long_about = None
)]
struct MainArgs {
    /// The schema document to read (http(s) URL or local file path).
    #[arg(short = 'u', long = "url", value_name = "LOCATION")]
    location: Option<String>,

    /// The output directory for generated API modules.
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// The destination file for the path-constants module.
    #[arg(short, long, value_name = "FILE")]
    paths: Option<PathBuf>,

    /// Generate only these tag modules (comma-separated).
    #[arg(short, long, value_delimiter = ',', value_name = "TAGS")]
    modules: Vec<String>,

    /// Skip these tag modules (comma-separated).
    #[arg(short, long, value_delimiter = ',', value_name = "TAGS")]
    exclude: Vec<String>,

    /// Group generated constants and stubs by tag.
    #[arg(long, value_name = "BOOL")]
    group_by_tag: Option<bool>,

    /// Camel-case generated module and operation keys.
    #[arg(long, value_name = "BOOL")]
    camel_case: Option<bool>,

    /// Carry schema summaries into generated comments.
    #[arg(long, value_name = "BOOL")]
    comments: Option<bool>,

    /// Replace output files that already exist.
    #[arg(long)]
    overwrite: bool,

    /// Module reference the generated stubs import the transport from.
    #[arg(long, value_name = "MODULE")]
    request_module: Option<String>,

    /// Module reference the generated stubs import path constants from.
    #[arg(long, value_name = "MODULE")]
    api_paths_module: Option<String>,
}

/// The optional `.apigen.toml` next to the invocation.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    output: Option<PathBuf>,
    #[serde(default)]
    paths: Option<PathBuf>,
    #[serde(default)]
    group_by_tag: Option<bool>,
    #[serde(default)]
    camel_case_keys: Option<bool>,
    #[serde(default)]
    include_comments: Option<bool>,
    #[serde(default)]
    overwrite: Option<bool>,
    #[serde(default)]
    modules: Option<Vec<String>>,
    #[serde(default)]
    exclude: Option<Vec<String>>,
    #[serde(default)]
    request_module: Option<String>,
    #[serde(default)]
    api_paths_module: Option<String>,
}
