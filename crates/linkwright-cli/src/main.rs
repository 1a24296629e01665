//! linkwright - create Windows shortcuts from installers and scripts.
//!
//! Results are printed to stdout as JSON; logs go to stderr.

mod commands;

use clap::{Args as ClapArgs, Parser, Subcommand};
use linkwright::config::AppConfig;
use linkwright::ShortcutError;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = AppConfig::APP_NAME)]
#[command(about = "Create Windows shortcuts tagged with an AppUserModelId")]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create or update a single shortcut
    Create(CreateArgs),
    /// Create the desktop, Start Menu and pinned taskbar shortcuts of an app
    Install(InstallArgs),
    /// Remove the shortcuts of an app
    Uninstall(AppArgs),
    /// Show which shortcuts of an app exist
    Status(AppArgs),
}

/// Shortcut content shared by `create` and `install`.
#[derive(ClapArgs, Debug)]
struct LinkArgs {
    /// Command-line arguments passed to the target
    #[arg(long, allow_hyphen_values = true)]
    arguments: Option<String>,

    /// Tooltip shown by Explorer
    #[arg(long)]
    description: Option<String>,

    /// Icon file
    #[arg(long)]
    icon: Option<PathBuf>,

    /// Icon index within the icon file
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    icon_index: i32,

    /// Start-in directory
    #[arg(long)]
    working_dir: Option<PathBuf>,

    /// AppUserModelId stored in the shortcut
    #[arg(long)]
    app_id: Option<String>,

    /// Encode the file directly instead of using the Shell Link object
    #[arg(long)]
    portable: bool,
}

#[derive(ClapArgs, Debug)]
struct CreateArgs {
    /// Read the shortcut settings from a JSON file
    #[arg(
        long,
        conflicts_with_all = [
            "shortcut",
            "target",
            "only_if_exists",
            "arguments",
            "description",
            "icon",
            "icon_index",
            "working_dir",
            "app_id",
        ]
    )]
    settings: Option<PathBuf>,

    /// Absolute path of the .lnk file to write
    #[arg(long, required_unless_present = "settings")]
    shortcut: Option<PathBuf>,

    /// Program the shortcut launches
    #[arg(long, required_unless_present = "settings")]
    target: Option<PathBuf>,

    /// Only update the shortcut if it already exists
    #[arg(long)]
    only_if_exists: bool,

    #[command(flatten)]
    link: LinkArgs,
}

#[derive(ClapArgs, Debug)]
struct AppArgs {
    /// Application name, used as the shortcut file name
    #[arg(long)]
    app_name: String,

    /// Start Menu folder grouping the publisher's apps
    #[arg(long)]
    publisher: Option<String>,
}

#[derive(ClapArgs, Debug)]
struct InstallArgs {
    #[command(flatten)]
    app: AppArgs,

    /// Program the shortcuts launch
    #[arg(long)]
    target: PathBuf,

    /// Refresh existing shortcuts only
    #[arg(long)]
    upgrade: bool,

    #[command(flatten)]
    link: LinkArgs,
}

fn init_logging(debug: bool, json: bool) {
    let log_level = if debug { "debug" } else { "info" };
    // RUST_LOG overrides the flag.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", AppConfig::LOG_TARGET, log_level)));

    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false);

    if json {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}

fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<ShortcutError>()
        .map(ShortcutError::exit_code)
        .and_then(|code| u8::try_from(code).ok())
        .unwrap_or(1)
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.debug, args.json_logs);
    debug!(
        "Platform: {}, shell link object: {}",
        linkwright::platform::current_platform(),
        linkwright::platform::has_shell_link()
    );

    let result = match args.command {
        Command::Create(create) => commands::create(create),
        Command::Install(install) => commands::install(install),
        Command::Uninstall(app) => commands::uninstall(app),
        Command::Status(app) => commands::status(app),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(exit_code_for(&e))
        }
    }
}
