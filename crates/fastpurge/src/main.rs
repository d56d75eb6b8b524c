//! Akamai Fast Purge (CCU v3) batch invalidation client.
//!
//! Exit status reflects only pre-dispatch failures: bad flags, an
//! unreadable credential file, validation errors, and structural errors
//! in the input stream. Once dispatch has begun, per-chunk outcomes are
//! reported through log lines and the process exits zero.

mod app;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use fastpurge_core::{ChunkError, Config, FileType, JsonChunker, PurgeConfig, TextChunker};
use fastpurge_dispatch::{Dispatcher, ReqwestClient};
use fastpurge_edgegrid::{EdgeGridSigner, load_edgerc};

use crate::app::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = App::parse();
    init_tracing(&app.log_level)?;

    let edgerc = expand_home(&app.edgerc)?;
    let credentials = load_edgerc(&edgerc, &app.section)?;

    let config = Config {
        method: app.method.clone(),
        network: app.network.clone(),
        file_type: app.file_type.clone(),
        credentials,
    }
    .validate()?;

    let dispatcher = Dispatcher::new(
        ReqwestClient::new(),
        EdgeGridSigner::new(config.credentials.clone()),
        config.endpoint_url(),
    );

    if app.files.is_empty() {
        run(&dispatcher, &config, io::stdin().lock()).await?;
    } else {
        for file in &app.files {
            let path = expand_home(file)?;
            let fp = File::open(&path)
                .with_context(|| format!("cannot open invalidation list {}", path.display()))?;
            run(&dispatcher, &config, BufReader::new(fp)).await?;
        }
    }

    Ok(())
}

/// Chunk one input source and dispatch every produced request body.
async fn run<R: BufRead>(
    dispatcher: &Dispatcher<ReqwestClient, EdgeGridSigner>,
    config: &PurgeConfig,
    input: R,
) -> anyhow::Result<()> {
    match config.file_type {
        FileType::Text => {
            let chunks = TextChunker::new(input)
                .map(|chunk| chunk.and_then(|body| body.to_bytes().map_err(ChunkError::from)));
            dispatcher.dispatch_all(chunks).await?;
        }
        FileType::Json => {
            dispatcher.dispatch_all(JsonChunker::new(input)).await?;
        }
    }
    Ok(())
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .context("invalid log level filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

fn expand_home(path: &str) -> anyhow::Result<PathBuf> {
    if path == "~" {
        return home::home_dir().context("cannot determine home directory");
    }
    if let Some(rest) = path.strip_prefix("~/") {
        let dir = home::home_dir().context("cannot determine home directory")?;
        return Ok(dir.join(rest));
    }
    Ok(PathBuf::from(path))
}
