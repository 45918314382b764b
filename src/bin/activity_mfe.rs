//! activity-mfe - terminal host for the user activity element
//!
//! Configures a `<user-activity-mfe>` element from the settings file and
//! command-line flags, then prints what the element shows and signals.

use std::path::PathBuf;

use activity_mfe::runner::{run_host, AppConfig};
use clap::Parser;

/// Host the user activity panel in a terminal
#[derive(Parser, Debug)]
#[command(name = "activity-mfe")]
#[command(version, about, long_about = None)]
struct Args {
    /// Tenant shown in the panel header (the `tenant-id` attribute)
    #[arg(long)]
    tenant_id: Option<String>,

    /// Signed-in user id
    #[arg(long)]
    user_id: Option<String>,

    /// Roles of the signed-in user, comma separated
    #[arg(long, value_delimiter = ',')]
    roles: Option<Vec<String>>,

    /// Base URL of the backend-for-frontend
    #[arg(long, env = "ACTIVITY_MFE_BFF_URL")]
    bff_url: Option<String>,

    /// Settings file (defaults to $XDG_CONFIG_HOME/activity-mfe/settings.json)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Press Refresh once the element is configured
    #[arg(short = 'r', long)]
    refresh: bool,

    /// Enable debug logging
    #[arg(short = 'd', long)]
    debug: bool,

    /// Enable verbose (trace-level) logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl From<Args> for AppConfig {
    fn from(args: Args) -> Self {
        AppConfig {
            debug: args.debug,
            verbose: args.verbose,
            refresh: args.refresh,
            settings_path: args.settings,
            tenant_id: args.tenant_id,
            bff_base_url: args.bff_url,
            user_id: args.user_id,
            roles: args.roles,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    run_host(AppConfig::from(args))
}
