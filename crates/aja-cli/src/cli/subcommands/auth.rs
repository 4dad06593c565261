use clap::{Args, Subcommand};

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Log in against the audit backend.
    Login(AuthLoginArgs),
    /// Clear the stored session.
    Logout,
    /// Show the current session and backend URLs.
    Status,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    #[arg(long, short = 'u')]
    pub username: String,
    /// Password (falls back to `AJA_PASSWORD`).
    #[arg(long)]
    pub password: Option<String>,
}
