use clap::{Args, Subcommand};

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Configure or show the API connection
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Log in with email and password
    Login(LoginArgs),

    /// Create an account and log in with it
    Register(RegisterArgs),

    /// Forget the stored tokens
    Logout,

    /// Show the logged-in user
    Whoami(JsonArgs),

    /// Browse resource requests
    Requests {
        #[command(subcommand)]
        command: RequestCommands,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigCommands {
    /// Show the stored configuration
    Show(JsonArgs),
    /// Update the stored configuration
    Set {
        /// Backend base URL (e.g. https://bench.example.com)
        #[arg(long)]
        api_url: Option<String>,
        /// HTTP timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
}

#[derive(Subcommand)]
pub(crate) enum RequestCommands {
    /// List resource requests visible to the current user
    List(JsonArgs),
    /// Open a resource request as requester or owner
    Open {
        id: benchdesk::model::RequestId,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
pub(crate) struct JsonArgs {
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct LoginArgs {
    #[arg(long)]
    pub(crate) email: String,
    /// Password (falls back to BENCH_PASSWORD)
    #[arg(long, env = "BENCH_PASSWORD", hide_env_values = true)]
    pub(crate) password: String,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct RegisterArgs {
    #[arg(long)]
    pub(crate) email: String,
    /// Password (falls back to BENCH_PASSWORD)
    #[arg(long, env = "BENCH_PASSWORD", hide_env_values = true)]
    pub(crate) password: String,
    #[arg(long)]
    pub(crate) first_name: Option<String>,
    #[arg(long)]
    pub(crate) last_name: Option<String>,
    #[arg(long)]
    pub(crate) company_name: Option<String>,
    /// Extra registration field as key=value (repeatable)
    #[arg(long = "field", value_name = "KEY=VALUE")]
    pub(crate) fields: Vec<String>,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}
