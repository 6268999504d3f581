//! `kilo [FILE]`: edit FILE, or an empty unnamed buffer.

use anyhow::Context;
use kilo::{Editor, EditorConfig, RawMode, Terminal, Tty};
use std::path::Path;
use tracing::info;

/// Environment variable naming the log file. Without it nothing is logged,
/// since the screen belongs to the editor.
const LOG_ENV: &str = "KILO_LOG";

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let config = EditorConfig::from_env();
    let mut tty = Tty::new();
    let raw = RawMode::enable(tty.input_fd(), config.input_timeout_deciseconds())?;

    let result = edit(&mut tty, config);
    if result.is_err() {
        // Leave a clean screen behind the error message.
        let _ = tty.write_frame(b"\x1b[2J\x1b[H");
    }
    raw.restore()?;
    result
}

fn edit(tty: &mut Tty, config: EditorConfig) -> anyhow::Result<()> {
    let mut editor = Editor::new(tty, config)?;
    if let Some(path) = std::env::args_os().nth(1) {
        info!(path = ?path, "opening");
        editor.open(Path::new(&path));
    }
    editor.set_status("HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find");
    editor.run()?;
    Ok(())
}

/// Log to the file named by `KILO_LOG`, filtered by `RUST_LOG`.
fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let Some(path) = std::env::var_os(LOG_ENV) else {
        return Ok(());
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", Path::new(&path).display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kilo=info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::sync::Mutex::new(file)).with_ansi(false).with_target(true))
        .with(filter)
        .init();

    info!("Kilo v{} starting up", env!("CARGO_PKG_VERSION"));
    Ok(())
}
