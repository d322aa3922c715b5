//! Version and usage text for the docqa CLI.

/// The current version of docqa, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Usage text printed for `--help`.
pub const USAGE: &str = "\
Usage: docqa <command> [args]

Commands:
  ask <question> [--top-k N]     Ask a question about the indexed documents
  letter [query] [--top-k N]     Generate a demand letter
  upload <file.pdf>              Upload a PDF
  upload-url <url>               Have the backend download a PDF
  process                        Index uploaded PDFs
  process-html <url>             Scrape and index a web page
  demand upload <file>...        Upload demand-letter documents
  demand process                 Index demand-letter documents
  demand list                    List demand-letter documents
  demand clear                   Delete all demand-letter documents
  demand delete <filename>       Delete one demand-letter document
  health                         Check the backend is reachable

Options:
  -h, --help                     Show this help
  -V, --version                  Show version

Environment:
  DOCQA_API_URL                  Backend base URL (default http://localhost:8000)
  RUST_LOG                       Log filter, e.g. docqa=debug (default warn)";

/// The line printed for `--version`.
pub fn version_line() -> String {
    format!("docqa {}", VERSION)
}
