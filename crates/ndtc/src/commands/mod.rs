//! Command handlers for the ndt CLI.
//!
//! Each handler takes already-split arguments and returns the text to print.
//! Flag parsing and registry setup live here in the module root.

use ndt_bind::{BindConfig, BindError, DtypeRegistry};
use ndt_types::{DateUnit, DtypeError, StringEncoding};

mod describe;

pub use describe::{describe, index_dtype, kind_of, show_dtype};

/// Error from a CLI invocation.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Wrong arguments; the message is the usage line to print.
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Bind(#[from] BindError),
}

impl From<DtypeError> for CliError {
    fn from(err: DtypeError) -> Self {
        CliError::Bind(BindError::from(err))
    }
}

impl From<ndt_parse::ParseError> for CliError {
    fn from(err: ndt_parse::ParseError) -> Self {
        CliError::Bind(BindError::from(err))
    }
}

/// Options shared by every command.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub config: BindConfig,
}

/// Split `args` into options and positional arguments.
///
/// Recognized flags are `--wide-encoding=<enc>` and `--date-unit=<unit>`.
pub fn parse_options(args: &[String]) -> Result<(Options, Vec<&str>), CliError> {
    let mut options = Options::default();
    let mut positional = Vec::new();

    for arg in args {
        if let Some(token) = arg.strip_prefix("--wide-encoding=") {
            options.config.wide_encoding = StringEncoding::from_token(token)?;
        } else if let Some(token) = arg.strip_prefix("--date-unit=") {
            options.config.default_date_unit = DateUnit::from_token(token)?;
        } else if arg.starts_with("--") {
            return Err(CliError::Usage(format!("unknown option `{arg}`")));
        } else {
            positional.push(arg.as_str());
        }
    }

    Ok((options, positional))
}

/// Build the registry the commands run against.
pub fn build_registry(options: &Options) -> Result<DtypeRegistry, CliError> {
    Ok(DtypeRegistry::builder().config(options.config).build()?)
}

/// Run one CLI invocation, `args` excluding the program name.
pub fn run(args: &[String]) -> Result<String, CliError> {
    let Some((command, rest)) = args.split_first() else {
        return Ok(usage());
    };

    let (options, positional) = parse_options(rest)?;
    tracing::debug!(command = command.as_str(), ?options, "running command");

    match (command.as_str(), positional.as_slice()) {
        ("help" | "--help" | "-h", _) => Ok(usage()),
        ("show", [dtype]) => show_dtype(&build_registry(&options)?, dtype),
        ("show", _) => Err(CliError::Usage("Usage: ndt show <dtype>".to_string())),
        ("kind", [dtype]) => kind_of(&build_registry(&options)?, dtype),
        ("kind", _) => Err(CliError::Usage("Usage: ndt kind <dtype>".to_string())),
        ("index", [dtype, subscript]) => {
            index_dtype(&build_registry(&options)?, dtype, subscript)
        }
        ("index", _) => Err(CliError::Usage(
            "Usage: ndt index <dtype> <subscript>".to_string(),
        )),
        (other, _) => Err(CliError::Usage(format!(
            "unknown command `{other}`, run `ndt help` for usage"
        ))),
    }
}

/// Help text.
pub fn usage() -> String {
    let lines = [
        "ndt - inspect dtypes written in dtype notation",
        "",
        "Usage: ndt <command> [options]",
        "",
        "Commands:",
        "  show <dtype>               Print notation, kind, size and alignment",
        "  kind <dtype>               Print the kind name",
        "  index <dtype> <subscript>  Index a dtype, e.g. ndt index '5, 10, int32' '2, 0:5'",
        "  help                       Show this help message",
        "",
        "Options:",
        "  --wide-encoding=<enc>      Encoding for non-ASCII text: utf_8, utf_16, utf_32",
        "  --date-unit=<unit>         Default date unit: day, month, year",
        "",
        "Set RUST_LOG (e.g. RUST_LOG=ndt_types=trace) for diagnostic output.",
    ];
    let mut text = lines.join("\n");
    text.push('\n');
    text
}
