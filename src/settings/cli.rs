use super::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "tokenguard", about = "Issue, rotate and revoke auth token pairs")]
pub struct Cli {
    #[arg(long)]
    pub settings: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a password hash record suitable for the `account.password` column.
    HashPassword { password: String },
    /// Check credentials and print a new token pair.
    Login {
        #[arg(long)]
        value: String,
        #[arg(long)]
        password: String,
    },
    /// Exchange a refresh token for a new token pair.
    Refresh {
        #[arg(long)]
        token: String,
    },
    /// Revoke a refresh token.
    Logout {
        #[arg(long)]
        token: String,
    },
    /// Print the identity an access token belongs to.
    Whoami {
        #[arg(long)]
        access_token: String,
    },
}
