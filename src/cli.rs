use crate::config::Overrides;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "solrload", version)]
#[command(
    about = "Uploads documents from JSON files in a Solr collection (index) using the update queries in parallel",
    long_about = None
)]
pub struct Cli {
    /// http link to a Solr collection like http[s]://address[:port]/solr/collection
    #[arg(short = 'c', long = "collink")]
    pub collection: Option<String>,

    /// Number of updating queries in parallel [default: 8]
    #[arg(short = 'n', long)]
    pub nqueries: Option<usize>,

    /// Path to the dump directory with JSON files to upload [default: .]
    #[arg(short = 's', long = "src")]
    pub src_dir: Option<PathBuf>,

    /// Don't request a commit with each update query
    #[arg(long)]
    pub nocommit: bool,

    /// User name. Can also be set by the SOLRUSER environment variable
    #[arg(short = 'u', long)]
    pub user: Option<String>,

    /// User password. Can also be set by the SOLRPASSW environment variable
    #[arg(short = 'p', long)]
    pub password: Option<String>,

    /// http timeout in seconds [default: 180]
    #[arg(short = 't', long = "http-timeout", alias = "httpTimeout")]
    pub http_timeout: Option<u64>,

    /// TOML configuration file [default: solrload.toml, or $SOLRLOAD_CONFIG]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            collection: self.collection.clone(),
            src_dir: self.src_dir.clone(),
            nqueries: self.nqueries,
            no_commit: self.nocommit,
            user: self.user.clone(),
            password: self.password.clone(),
            http_timeout_secs: self.http_timeout,
        }
    }
}
