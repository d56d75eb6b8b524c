use clap::Parser;

/// Batch cache-invalidation client for the Akamai Fast Purge (CCU v3)
/// API.
///
/// Reads URLs or cache-key ARLs from stdin or the given files, packs
/// them into size-bounded requests, and delivers every request
/// concurrently with EdgeGrid-signed authorization and bounded retry.
#[derive(Clone, Debug, Parser)]
#[command(name = "fastpurge", version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
pub struct App {
    /// Path to the edgerc credential file.
    #[arg(short = 'c', long, default_value = "~/.edgerc")]
    pub edgerc: String,

    /// Section of the edgerc file to use.
    #[arg(short = 's', long, default_value = "default")]
    pub section: String,

    /// Invalidation method: "invalidate" or "delete".
    #[arg(short = 'm', long, default_value = "invalidate")]
    pub method: String,

    /// Target network: "staging" or "production".
    #[arg(short = 'n', long, default_value = "staging")]
    pub network: String,

    /// Invalidation list type: "text" (one object per line) or "json"
    /// (a stream of request documents).
    #[arg(short = 't', long = "type", default_value = "text")]
    pub file_type: String,

    /// Log level filter when RUST_LOG is unset.
    #[arg(short = 'l', long, default_value = "info")]
    pub log_level: String,

    /// Invalidation list files; stdin when omitted.
    pub files: Vec<String>,
}
