//! CLI module for docqa.
//!
//! - Argument parsing
//! - Version and usage text
//! - Command dispatch against an [`ApiClient`]
//!
//! # Usage
//!
//! ```ignore
//! use docqa::cli::{parse_args, run_command};
//!
//! let command = parse_args(std::env::args());
//! run_command(&client, command, &mut std::io::stdout()).await?;
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, CliCommand};
pub use version::{version_line, USAGE, VERSION};

use std::io::Write;
use std::path::PathBuf;

use color_eyre::eyre::{eyre, Report};
use color_eyre::Result;
use tracing::debug;

use crate::chat::{consume_stream, Conversation, SubmitRejected, DEMAND_LETTER_LABEL};
use crate::client::{ApiClient, FrameStream};
use crate::error::ApiError;
use crate::ingest::{
    format_file_size, validate_demand_doc, validate_pdf, validate_url, IngestError, UploadFile,
};
use crate::models::QueryRequest;
use crate::traits::HttpClient;

/// Run one parsed command, writing user-facing output to `out`.
///
/// Streamed answers are written delta by delta as they arrive. A failed
/// command is reported with a hint on what to do next.
pub async fn run_command<C, W>(
    client: &ApiClient<C>,
    command: CliCommand,
    out: &mut W,
) -> Result<()>
where
    C: HttpClient,
    W: Write,
{
    dispatch(client, command, out)
        .await
        .map_err(|report| eyre!(failure_message(&report)))
}

/// Text shown for a failed command: what went wrong, then how to recover.
pub fn failure_message(report: &Report) -> String {
    let (message, category, code) = if let Some(err) = report.downcast_ref::<ApiError>() {
        let message = match err {
            ApiError::Stream(stream) => stream.user_message(),
            other => other.to_string(),
        };
        (message, err.category(), err.error_code())
    } else if let Some(err) = report.downcast_ref::<IngestError>() {
        (err.to_string(), err.category(), err.error_code())
    } else if let Some(err) = report.downcast_ref::<SubmitRejected>() {
        (err.to_string(), err.category(), err.error_code())
    } else {
        return report.to_string();
    };

    debug!(code, category = %category, "Command failed");
    format!("{}\n{}", message, category.recovery_hint())
}

async fn dispatch<C, W>(client: &ApiClient<C>, command: CliCommand, out: &mut W) -> Result<()>
where
    C: HttpClient,
    W: Write,
{
    match command {
        CliCommand::Version => writeln!(out, "{}", version_line())?,
        CliCommand::Help => writeln!(out, "{}", USAGE)?,
        CliCommand::Invalid(message) => return Err(eyre!("{}\n\n{}", message, USAGE)),
        CliCommand::Ask { question, top_k } => {
            let mut conversation = Conversation::new();
            let query = conversation.submit(&question)?;
            let request = QueryRequest::new(query).with_top_k(top_k);
            let frames = client.query(&request).await;
            stream_answer(frames, &mut conversation, out).await?;
        }
        CliCommand::Letter { query, top_k } => {
            let mut conversation = Conversation::new();
            conversation.begin(DEMAND_LETTER_LABEL)?;
            let request = QueryRequest::new(query).with_top_k(top_k);
            let frames = client.generate_demand_letter(&request).await;
            stream_answer(frames, &mut conversation, out).await?;
        }
        CliCommand::Upload { path } => {
            validate_pdf(&path)?;
            let file = UploadFile::from_path(&path).await?;
            let size = format_file_size(file.size() as u64);
            let response = client.upload_pdf(file).await?;
            writeln!(out, "Uploaded {} ({})", response.filename, size)?;
        }
        CliCommand::UploadUrl { url } => {
            let url = validate_url(&url)?;
            let response = client.upload_pdf_url(url.as_str()).await?;
            writeln!(out, "Uploaded {}", response.filename)?;
        }
        CliCommand::Process => {
            let response = client.process_documents().await?;
            writeln!(out, "{}", response.summary())?;
        }
        CliCommand::ProcessHtml { url } => {
            let url = validate_url(&url)?;
            let response = client.process_html(url.as_str()).await?;
            writeln!(out, "{}", response.summary())?;
        }
        CliCommand::DemandUpload { paths } => {
            let files = read_demand_docs(&paths).await?;
            let response = client.upload_demand_docs(files).await?;
            writeln!(out, "Uploaded {} file(s)", response.uploaded.len())?;
            for name in &response.uploaded {
                writeln!(out, "  {}", name)?;
            }
        }
        CliCommand::DemandProcess => {
            let response = client.process_demand_docs().await?;
            writeln!(
                out,
                "{}: {} document(s) loaded, {} chunk(s) indexed",
                response.status.as_deref().unwrap_or("done"),
                response.documents_loaded.unwrap_or(0),
                response.chunks_indexed.unwrap_or(0)
            )?;
        }
        CliCommand::DemandList => {
            let response = client.list_demand_docs().await?;
            if response.files.is_empty() {
                writeln!(out, "No demand documents uploaded.")?;
            }
            for name in &response.files {
                writeln!(out, "{}", name)?;
            }
        }
        CliCommand::DemandClear => {
            let response = client.clear_demand_docs().await?;
            writeln!(out, "Deleted {} file(s)", response.deleted.len())?;
            for failure in &response.errors {
                writeln!(out, "  could not delete {}: {}", failure.file, failure.error)?;
            }
        }
        CliCommand::DemandDelete { filename } => {
            let response = client.delete_demand_doc(&filename).await?;
            writeln!(out, "Deleted {}", response.deleted)?;
        }
        CliCommand::Health => {
            if client.health_check().await? {
                writeln!(out, "Backend at {} is healthy", client.base_url())?;
            } else {
                return Err(eyre!("Backend at {} is not healthy", client.base_url()));
            }
        }
    }
    Ok(())
}

async fn read_demand_docs(paths: &[PathBuf]) -> Result<Vec<UploadFile>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        validate_demand_doc(path)?;
        files.push(UploadFile::from_path(path).await?);
    }
    Ok(files)
}

/// Print a streamed answer progressively and report how it ended.
async fn stream_answer<W: Write>(
    frames: std::result::Result<FrameStream, ApiError>,
    conversation: &mut Conversation,
    out: &mut W,
) -> Result<()> {
    let frames = match frames {
        Ok(frames) => frames,
        Err(err) => {
            conversation.fail_active();
            print_answer(conversation, out)?;
            return Err(err.into());
        }
    };

    let mut write_error = None;
    let result = consume_stream(frames, conversation, |delta| {
        if write_error.is_none() {
            if let Err(e) = out.write_all(delta.as_bytes()).and_then(|_| out.flush()) {
                write_error = Some(e);
            }
        }
    })
    .await;
    writeln!(out)?;
    if let Some(err) = write_error {
        return Err(err.into());
    }

    match result {
        Ok(summary) => {
            if summary.skipped > 0 {
                writeln!(out, "({} malformed frame(s) skipped)", summary.skipped)?;
            }
            Ok(())
        }
        Err(err) => {
            print_answer(conversation, out)?;
            Err(ApiError::from(err).into())
        }
    }
}

fn print_answer<W: Write>(conversation: &Conversation, out: &mut W) -> Result<()> {
    if let Some(message) = conversation.messages().last() {
        writeln!(out, "{}", message.content)?;
    }
    Ok(())
}
