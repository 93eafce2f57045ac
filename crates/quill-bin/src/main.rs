//! Quill entrypoint.
use anyhow::{Context, Result};
use clap::Parser;
use core_actions::Session;
use core_cipher::CipherRegistry;
use core_config::{Config, load_from};
use core_state::EditorState;
use core_terminal::{ConsoleBackend, CrosstermBackend, NullBackend};
use core_text::LineBuffer;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

mod repl;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "quill", version, about = "Line-oriented text editor with undo/redo")]
struct Args {
    /// Optional file whose lines are loaded at startup.
    pub path: Option<PathBuf>,
    /// Optional configuration file path (overrides discovery of `quill.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Cipher module to resolve at startup (overrides `[cipher] module`).
    #[arg(long = "cipher")]
    pub cipher: Option<String>,
}

struct AppStartup {
    log_guard: Option<WorkerGuard>,
}

impl AppStartup {
    fn new() -> Self {
        Self { log_guard: None }
    }

    fn run(&mut self, args: &Args) -> Result<Session> {
        let config = load_from(args.config.clone())?;
        self.configure_logging(&config)?;
        Self::install_panic_hook();
        info!(target: "runtime", "startup");

        let module_name = config.cipher_module(args.cipher.as_deref());
        let cipher = CipherRegistry::with_builtins()
            .resolve(module_name)
            .with_context(|| format!("cannot start: cipher module `{module_name}` unavailable"))?;

        let state =
            EditorState::with_history_limit(LineBuffer::new(), config.history_limit());
        let mut session = Session::with_state(state, cipher);

        let mut open_failed = false;
        if let Some(path) = args.path.as_deref() {
            open_failed = !Self::open_initial(&mut session, path);
        }

        info!(
            target: "runtime.startup",
            path = args.path.as_ref().map(|p| p.display().to_string()).as_deref(),
            open_failed,
            config_override = args.config.is_some(),
            cipher = session.cipher_name(),
            history_limit = config.history_limit(),
            "bootstrap_complete"
        );
        Ok(session)
    }

    fn open_initial(session: &mut Session, path: &Path) -> bool {
        match session.load_from_file(path) {
            Ok(_) => true,
            Err(e) => {
                error!(target: "io", error = %e, "initial_load_failed");
                eprintln!("{e}");
                false
            }
        }
    }

    fn configure_logging(&mut self, config: &Config) -> Result<()> {
        let log_dir = Path::new(".");
        let file_name = config.file.log.file.as_str();
        let log_path = log_dir.join(file_name);
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.file.log.filter));
        let file_appender = tracing_appender::rolling::never(log_dir, file_name);
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        match tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(nb_writer)
            .try_init()
        {
            Ok(_) => {
                self.log_guard = Some(guard);
            }
            Err(_err) => {
                // Global tracing subscriber already installed; drop guard so writer shuts down.
            }
        }

        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }
}

/// Escape sequences only make sense on a terminal; piped output gets none.
fn console_for(is_terminal: bool) -> Box<dyn ConsoleBackend> {
    if is_terminal {
        Box::new(CrosstermBackend::new())
    } else {
        info!(target: "runtime", "stdout_not_a_terminal");
        Box::new(NullBackend::default())
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut startup = AppStartup::new();
    let mut session = startup.run(&args)?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut console = console_for(stdout.is_terminal());
    let _ = console.set_title("Quill");

    let summary = repl::run(&mut session, console.as_mut(), stdin.lock(), stdout.lock())?;
    info!(
        target: "runtime",
        commands = summary.commands,
        errors = summary.errors,
        dirty = session.state().dirty,
        "shutdown"
    );
    Ok(())
}
