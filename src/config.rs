use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Server settings. Each flag can also come from the environment.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Config {
    /// Address to bind the HTTP server to.
    #[clap(long, env = "CHESS_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[clap(short, long, env = "CHESS_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Directory served under /static.
    #[clap(long, env = "CHESS_STATIC_DIR", default_value = "./static", value_hint = clap::ValueHint::DirPath)]
    pub static_dir: PathBuf,

    /// Clock tick period in milliseconds.
    #[clap(long, env = "CHESS_TICK_MS", default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Default log filter when RUST_LOG is unset.
    #[clap(long, env = "CHESS_LOG", default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
