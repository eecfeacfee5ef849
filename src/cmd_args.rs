use std::ffi::OsString;
use std::path::PathBuf;

pub use clap::Parser;

use crate::config;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Base URL of the search service serving /movie and /location.
    /// Falls back to REELMAP_SERVER_URL, then to http://localhost:5000.
    #[clap(short = 's', long, help = "search service base URL")]
    server: Option<String>,

    /// Write tracing output to this file. The terminal belongs to the UI,
    /// so nothing is logged unless a file is given.
    #[clap(long, value_name = "PATH", help = "log file path")]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    server: String,
    log_file: Option<PathBuf>,
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        Self::from_clap(ClapArgs::parse())
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::from_clap(ClapArgs::parse_from(itr))
    }

    fn from_clap(args: ClapArgs) -> Self {
        Self {
            server: args.server.unwrap_or_else(config::get_server_url),
            log_file: args.log_file,
        }
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn log_file(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }
}
