use chunk_normalizer::config::{Config, OutputMode};
use chunk_normalizer::converters::stream::parse_sse_data_line;
use chunk_normalizer::converters::{GenericStreamingChunk, normalize_value};
use chunk_normalizer::error::ProxyError;
use chunk_normalizer::logging;
use chunk_normalizer::trace::TraceWriter;
use clap::Parser;
use futures::{Stream, StreamExt, stream};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

#[derive(Parser, Debug)]
#[command(name = "chunk-normalizer")]
#[command(about = "Normalize LLM streaming chunks into one canonical shape")]
struct Args {
    /// Read chunks from this file instead of stdin (SSE or JSON Lines)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long, value_enum)]
    output: Option<OutputMode>,

    /// trace, debug, info, warn, error
    #[arg(short, long)]
    log_level: Option<String>,

    /// Write a markdown trace of every chunk into this directory
    #[arg(long)]
    trace_dir: Option<PathBuf>,
}

/// 按行读取输入，跳过无法解析的行。
fn raw_chunks(
    reader: Box<dyn AsyncBufRead + Unpin>,
    highlight: bool,
) -> impl Stream<Item = Value> {
    stream::unfold(reader.lines(), move |mut lines| async move {
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => match parse_sse_data_line(&line) {
                    Ok(Some(value)) => return Some((value, lines)),
                    Ok(None) => continue,
                    Err(e) => warn!("{}", ProxyError::with_highlight(e, highlight)),
                },
                Ok(None) => return None,
                Err(e) => {
                    warn!("{}", ProxyError::with_highlight(e, highlight));
                    return None;
                }
            }
        }
    })
}

fn render<T: Serialize>(items: &[T]) -> anyhow::Result<String> {
    let mut out = String::new();
    for item in items {
        out.push_str(&serde_json::to_string(item)?);
        out.push('\n');
    }
    Ok(out)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    }
    .apply_env();

    let log_level = logging::parse_level(
        args.log_level
            .as_deref()
            .or(config.log_level.as_deref())
            .unwrap_or("warn"),
    );
    logging::init_logging(log_level, config.log_file.as_deref().map(Path::new))?;

    let output = args.output.unwrap_or(config.output);
    let highlight = config.error_highlight_enabled();
    let trace_dir = args
        .trace_dir
        .clone()
        .or_else(|| config.traces.enabled.then(|| PathBuf::from(&config.traces.dir)));
    let mut tracer = match trace_dir {
        Some(dir) => Some(TraceWriter::create(dir, "RESPONSE_STREAM").await?),
        None => None,
    };
    if let Some(tracer) = &tracer {
        info!("Writing trace to {}", tracer.path().display());
    }

    let reader: Box<dyn AsyncBufRead + Unpin> = match &args.input {
        Some(path) => Box::new(BufReader::new(tokio::fs::File::open(path).await?)),
        None => Box::new(BufReader::new(tokio::io::stdin())),
    };

    let mut stdout = tokio::io::stdout();
    let mut chunks = Box::pin(raw_chunks(reader, highlight));
    let mut processed = 0usize;
    while let Some(raw) = chunks.next().await {
        let canonical = match normalize_value(&raw) {
            Ok(chunk) => chunk,
            Err(e) => {
                warn!("{}", ProxyError::with_highlight(e, highlight));
                continue;
            }
        };
        processed += 1;
        debug!("normalized chunk {}: {:?}", processed, canonical.id);

        let rendered = match output {
            OutputMode::Canonical => {
                let normalized = [canonical];
                if let Some(tracer) = tracer.as_mut() {
                    tracer.record(&raw, normalized.as_slice()).await?;
                }
                render(normalized.as_slice())?
            }
            OutputMode::Generic => {
                let generic: Vec<GenericStreamingChunk> =
                    GenericStreamingChunk::from_canonical(canonical).collect();
                if let Some(tracer) = tracer.as_mut() {
                    tracer.record(&raw, generic.as_slice()).await?;
                }
                render(generic.as_slice())?
            }
        };
        stdout.write_all(rendered.as_bytes()).await?;
    }
    stdout.flush().await?;

    info!("Normalized {} chunks", processed);
    Ok(())
}
