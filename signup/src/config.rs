use clap::Parser;
use std::path::PathBuf;
use url::Url;

/// Create an account from the terminal
#[derive(Debug, Parser)]
#[clap(version)]
pub struct Config {
    /// The auth server to create accounts on. Should only be the protocol
    /// and domain.
    #[clap(long, env = "SIGNUP_SERVER", default_value = "http://localhost:3000")]
    pub server: String,

    /// Where the web app lives. Once sign-up is done we print where to go
    /// next, relative to this.
    #[clap(long, env = "SIGNUP_APP_URL", default_value = "http://localhost:8080")]
    pub app_url: Url,

    /// Where should we write logs?
    #[clap(long, env = "SIGNUP_DATA_DIR")]
    data_dir: Option<PathBuf>,
}

impl Config {
    /// Get either the configured or a default data directory. If no data
    /// directory can be found (e.g. because `$HOME` is unset) we will use the
    /// current directory.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| {
                directories::ProjectDirs::from("com", "slt", "signup")
                    .map(|dirs| dirs.data_local_dir().to_owned())
            })
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
