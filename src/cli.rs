//! CLI definitions and startup.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::Settings;
use crate::dns::SystemResolver;
use crate::domain::TargetSet;
use crate::menu::{self, DialoguerPrompter};
use crate::session::Session;

#[derive(Parser)]
#[command(name = "nhlhosts", version)]
#[command(about = "Redirect NHL.tv/MLB.tv auth hosts to NHLGames via the hosts file")]
pub struct Cli {
    /// Which auth hosts to redirect
    #[arg(long, value_enum, default_value_t = TargetSet::Nhl)]
    pub targets: TargetSet,

    /// Hosts file to edit (default: NHLHOSTS_HOSTS_FILE or the system hosts file)
    #[arg(long, value_name = "PATH")]
    pub hosts_file: Option<PathBuf>,

    /// Candidate domains, one per line (default: NHLHOSTS_DOMAINS_FILE or ./domains.txt)
    #[arg(long, value_name = "PATH")]
    pub domains_file: Option<PathBuf>,
}

impl Cli {
    pub fn settings(self) -> Settings {
        Settings::resolve(self.targets, self.hosts_file, self.domains_file)
    }
}

/// Log to stderr, filtered by RUST_LOG (default: warn).
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init();
}

/// Parse args, open the session and run the menu.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let settings = cli.settings();
    let mut session = Session::open(settings, Box::new(SystemResolver))?;
    let mut prompter = DialoguerPrompter::default();
    let mut stdout = std::io::stdout().lock();
    menu::run(&mut session, &mut prompter, &mut stdout)
}
