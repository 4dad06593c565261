use aja_core::enums::{Role, UserStatus};
use clap::{Subcommand, ValueEnum};

/// User administration commands.
#[derive(Clone, Debug, Subcommand)]
pub enum UserCommands {
    /// List users, optionally one role only.
    List {
        #[arg(long)]
        role: Option<Role>,
    },
    /// Add a user.
    Add {
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "viewer")]
        role: Role,
        #[arg(long, value_enum, default_value_t = StatusArg::Active)]
        status: StatusArg,
    },
    /// Change a user's name, role, status or password.
    Update {
        /// User id or username.
        user: String,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        role: Option<Role>,
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
        #[arg(long)]
        password: Option<String>,
    },
    /// Delete a user.
    Delete {
        /// User id or username.
        user: String,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum StatusArg {
    Active,
    Inactive,
}

impl From<StatusArg> for UserStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Active => Self::Active,
            StatusArg::Inactive => Self::Inactive,
        }
    }
}
