//! Command-line argument parsing for the docqa CLI.

use std::path::PathBuf;

use crate::models::{DEFAULT_LETTER_QUERY, DEFAULT_LETTER_TOP_K, DEFAULT_QUERY_TOP_K};

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Ask a question about the indexed documents
    Ask { question: String, top_k: u32 },
    /// Generate a demand letter
    Letter { query: String, top_k: u32 },
    /// Upload a local PDF
    Upload { path: PathBuf },
    /// Have the backend download a PDF
    UploadUrl { url: String },
    /// Index uploaded PDFs
    Process,
    /// Scrape and index an HTML page
    ProcessHtml { url: String },
    /// Upload demand-letter supporting documents
    DemandUpload { paths: Vec<PathBuf> },
    DemandProcess,
    DemandList,
    DemandClear,
    DemandDelete { filename: String },
    /// Check the backend is reachable
    Health,
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Arguments could not be parsed
    Invalid(String),
}

/// Parse command-line arguments and return the command to run.
///
/// # Examples
///
/// ```
/// use docqa::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["docqa".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    // Skip the program name
    let args: Vec<String> = args.skip(1).collect();

    if args.iter().any(|a| a == "--version" || a == "-V") {
        return CliCommand::Version;
    }
    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        return CliCommand::Help;
    }

    let rest = &args[1..];
    match args[0].as_str() {
        "ask" => parse_ask(rest),
        "letter" => parse_letter(rest),
        "upload" => match single(rest, "upload <file.pdf>") {
            Ok(path) => CliCommand::Upload {
                path: PathBuf::from(path),
            },
            Err(cmd) => cmd,
        },
        "upload-url" => match single(rest, "upload-url <url>") {
            Ok(url) => CliCommand::UploadUrl { url },
            Err(cmd) => cmd,
        },
        "process" => no_args(rest, "process", CliCommand::Process),
        "process-html" => match single(rest, "process-html <url>") {
            Ok(url) => CliCommand::ProcessHtml { url },
            Err(cmd) => cmd,
        },
        "health" => no_args(rest, "health", CliCommand::Health),
        "demand" => parse_demand(rest),
        other => CliCommand::Invalid(format!("Unknown command: {}", other)),
    }
}

/// Split `--top-k N` out of `args`, returning the remaining words.
fn take_top_k(args: &[String], default: u32) -> Result<(Vec<String>, u32), CliCommand> {
    let mut words = Vec::new();
    let mut top_k = default;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if arg == "--top-k" || arg == "-k" {
            let value = iter
                .next()
                .ok_or_else(|| CliCommand::Invalid("--top-k needs a value".to_string()))?;
            top_k = match value.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(CliCommand::Invalid(format!(
                        "--top-k must be a positive integer, got '{}'",
                        value
                    )))
                }
            };
        } else {
            words.push(arg.clone());
        }
    }

    Ok((words, top_k))
}

fn parse_ask(args: &[String]) -> CliCommand {
    match take_top_k(args, DEFAULT_QUERY_TOP_K) {
        Ok((words, _)) if words.is_empty() => {
            CliCommand::Invalid("Usage: ask <question> [--top-k N]".to_string())
        }
        Ok((words, top_k)) => CliCommand::Ask {
            question: words.join(" "),
            top_k,
        },
        Err(cmd) => cmd,
    }
}

fn parse_letter(args: &[String]) -> CliCommand {
    match take_top_k(args, DEFAULT_LETTER_TOP_K) {
        Ok((words, top_k)) => CliCommand::Letter {
            query: if words.is_empty() {
                DEFAULT_LETTER_QUERY.to_string()
            } else {
                words.join(" ")
            },
            top_k,
        },
        Err(cmd) => cmd,
    }
}

fn parse_demand(args: &[String]) -> CliCommand {
    let Some(sub) = args.first() else {
        return CliCommand::Invalid(
            "Usage: demand <upload|process|list|clear|delete> ...".to_string(),
        );
    };
    let rest = &args[1..];

    match sub.as_str() {
        "upload" if rest.is_empty() => {
            CliCommand::Invalid("Usage: demand upload <file>...".to_string())
        }
        "upload" => CliCommand::DemandUpload {
            paths: rest.iter().map(PathBuf::from).collect(),
        },
        "process" => no_args(rest, "demand process", CliCommand::DemandProcess),
        "list" => no_args(rest, "demand list", CliCommand::DemandList),
        "clear" => no_args(rest, "demand clear", CliCommand::DemandClear),
        "delete" => match single(rest, "demand delete <filename>") {
            Ok(filename) => CliCommand::DemandDelete { filename },
            Err(cmd) => cmd,
        },
        other => CliCommand::Invalid(format!("Unknown demand command: {}", other)),
    }
}

fn single(args: &[String], usage: &str) -> Result<String, CliCommand> {
    match args {
        [value] => Ok(value.clone()),
        _ => Err(CliCommand::Invalid(format!("Usage: {}", usage))),
    }
}

fn no_args(args: &[String], name: &str, command: CliCommand) -> CliCommand {
    if args.is_empty() {
        command
    } else {
        CliCommand::Invalid(format!("{} takes no arguments", name))
    }
}
