//! frontpanel - Menu-driven front panel for an LCD-equipped single-board computer
//!
//! Copyright (C) 2026 The frontpanel developers
//! Released under the GNU GPLv2+

mod core;
mod platform;
mod ui;

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use clap::{ArgAction, Parser};
use log::{info, warn};

use crate::core::{JsonContactStore, Settings};
use crate::platform::{cleanup_profiles, NetworkManager, Nmcli};
use crate::ui::{
    Crt, LoginScreen, NoticeTiming, RenderContext, RunOutcome, ScreenManager, Services,
};

/// Static flag for clean shutdown
static RUNNING: AtomicBool = AtomicBool::new(true);

const VERSION: &str = env!("CARGO_PKG_VERSION");
const COPYRIGHT: &str = "(C) 2026 The frontpanel developers.";
const LICENSE_SPDX: &str = env!("CARGO_PKG_LICENSE");

/// Convert SPDX license identifier to display string
fn license_display() -> &'static str {
    match LICENSE_SPDX {
        "GPL-2.0-or-later" => "GNU GPLv2+",
        "GPL-2.0" | "GPL-2.0-only" => "GNU GPLv2",
        _ => LICENSE_SPDX,
    }
}

fn print_version() {
    println!("frontpanel {}", VERSION);
    println!("{}", COPYRIGHT);
    println!("Released under the {}.", license_display());
}

fn print_help() {
    print_version();
    println!();
    println!("-c --contacts=FILE   Read and write contacts in FILE");
    println!("   --config=FILE     Use FILE instead of the default frontpanelrc");
    println!("-h --help            Print this help screen");
    println!("-V --version         Print version info");
    println!();
    println!("Set FRONTPANEL_LOG=debug for verbose logging.");
}

/// frontpanel - LCD front panel controller
#[derive(Parser, Debug)]
#[command(name = "frontpanel")]
#[command(disable_help_flag = true)]
#[command(disable_version_flag = true)]
struct Args {
    /// Contact file to use
    #[arg(short = 'c', long = "contacts", value_name = "FILE")]
    contacts: Option<PathBuf>,

    /// Configuration file to use
    #[arg(long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print this help screen
    #[arg(short = 'h', long = "help", action = ArgAction::SetTrue)]
    help: bool,

    /// Print version info
    #[arg(short = 'V', long = "version", action = ArgAction::SetTrue)]
    version: bool,
}

extern "C" fn handle_signal(_: libc::c_int) {
    RUNNING.store(false, Ordering::SeqCst);
}

fn setup_signal_handlers() {
    use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};

    let action = SigAction::new(
        SigHandler::Handler(handle_signal),
        SaFlags::empty(),
        SigSet::empty(),
    );
    for signal in [Signal::SIGINT, Signal::SIGTERM, Signal::SIGHUP] {
        // SAFETY: the handler only stores to an atomic
        if let Err(e) = unsafe { sigaction(signal, &action) } {
            warn!("could not install {} handler: {}", signal, e);
        }
    }
}

/// Send log output to a file; the terminal belongs to ncurses
fn init_logging(settings: &Settings) {
    let Some(path) = settings.log_file_path() else {
        return;
    };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("FRONTPANEL_LOG", "info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}

/// Delete transient connection profiles, keeping the configured ones
fn release_profiles(network: &mut dyn NetworkManager, settings: &Settings) {
    let deleted = cleanup_profiles(network, &settings.keep_profiles);
    if deleted > 0 {
        info!("removed {} connection profiles", deleted);
    }
}

/// Terminal session: login, then the menu tree
fn run(settings: &Settings, network: &mut Nmcli) -> Result<RunOutcome> {
    let mut crt = Crt::new(settings)?;
    let mut contacts = JsonContactStore::new(&settings.contacts_file);
    let ctx = RenderContext::new(settings.visible_items, settings.screen_columns);

    let mut services = Services {
        contacts: &mut contacts,
        network,
        timing: NoticeTiming {
            notice: settings.notice_duration(),
            brief: settings.brief_notice_duration(),
        },
        ctx,
    };

    let login = LoginScreen::new(
        &settings.passcode,
        settings.login_attempts,
        settings.passcode_length,
    );
    let mut manager = ScreenManager::new(Box::new(login), ctx, settings.cursor_blink());
    let outcome = manager.run(&mut crt, &mut services, &RUNNING);

    crt.done();
    Ok(outcome)
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Handle help and version flags first
    if args.help {
        print_help();
        return Ok(());
    }
    if args.version {
        print_version();
        return Ok(());
    }

    // Create settings and load from config file
    let mut settings = Settings::new();
    if let Some(path) = args.config {
        settings.filename = Some(path);
    }
    let loaded = settings.load();
    if let Some(path) = args.contacts {
        settings.contacts_file = path;
    }

    init_logging(&settings);
    if let Err(e) = loaded {
        eprintln!("Warning: Failed to load settings: {}", e);
        warn!("failed to load settings: {}", e);
    }
    info!("frontpanel {} starting", VERSION);

    setup_signal_handlers();

    let mut network = Nmcli::new();
    release_profiles(&mut network, &settings);

    let result = run(&settings, &mut network);

    // runs on every path out of the session, errors included
    release_profiles(&mut network, &settings);

    match &result {
        Ok(outcome) => info!("frontpanel stopped ({:?})", outcome),
        Err(e) => warn!("frontpanel stopped: {}", e),
    }
    result.map(|_| ())
}
