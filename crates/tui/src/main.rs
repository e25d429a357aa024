mod app;
mod logging;
mod renderer;
mod terminal;

use std::io::stdout;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use algoviz_core::{Algorithm, AlgorithmKind, Session, SessionConfig};
use anyhow::{Context, Result};
use clap::Parser;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::logging::{Sink, init_logger};
use crate::renderer::TerminalRenderer;
use crate::terminal::TerminalGuard;

/// Step through sorting and graph-traversal algorithms one frame at a time.
#[derive(Parser, Debug)]
#[command(name = "algoviz", version)]
struct Cli {
    /// bubble, selection, insertion, quick, merge, bfs or dfs
    #[arg(short, long, default_value = "bubble")]
    algorithm: Algorithm,

    /// Array length (10-100) or node count (5-15)
    #[arg(short = 'n', long)]
    size: Option<usize>,

    /// Seed for the generated data; defaults to the clock
    #[arg(long)]
    seed: Option<u64>,

    /// Traversal start node
    #[arg(long, default_value_t = 0)]
    start: usize,

    /// Delay between frames while playing
    #[arg(long, default_value_t = 50)]
    delay_ms: u64,

    /// Write the recorded frames as JSON instead of opening the UI
    #[arg(long)]
    dump: Option<PathBuf>,

    /// Write log records to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn session_config(&self) -> SessionConfig {
        let size = self.size.unwrap_or(match self.algorithm.kind() {
            AlgorithmKind::Sort => 30,
            AlgorithmKind::Traversal => 10,
        });
        let seed = self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default()
        });
        SessionConfig {
            algorithm: self.algorithm,
            size,
            seed,
            start_node: self.start,
            delay: Duration::from_millis(self.delay_ms),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let sink = match (&cli.log_file, &cli.dump) {
        (Some(path), _) => Sink::File(path),
        (None, Some(_)) => Sink::Stderr,
        (None, None) => Sink::Off,
    };
    init_logger(sink)?;

    let session = Session::new(cli.session_config()).context("invalid arguments")?;
    log::info!(
        "{} on {} elements, seed {}",
        session.algorithm(),
        session.data().len(),
        session.seed()
    );

    match &cli.dump {
        Some(path) => dump(&session, path),
        None => run_tui(session),
    }
}

fn dump(session: &Session, path: &Path) -> Result<()> {
    let store = session.record()?;
    std::fs::write(path, store.to_json()?)
        .with_context(|| format!("writing {}", path.display()))?;
    log::info!("wrote {} frames to {}", store.len(), path.display());
    Ok(())
}

fn run_tui(session: Session) -> Result<()> {
    let _terminal_guard = TerminalGuard::enter().context("preparing the terminal")?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    App::new(session, TerminalRenderer::new(terminal)).run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dump_writes_the_recorded_store() {
        let session = Session::new(SessionConfig {
            algorithm: Algorithm::Dfs,
            size: 6,
            seed: 4,
            ..SessionConfig::default()
        })
        .expect("session");
        let path = std::env::temp_dir().join(format!("algoviz-dump-{}.json", std::process::id()));

        dump(&session, &path).expect("dump");
        let written = std::fs::read_to_string(&path).expect("read dump");
        let _ = std::fs::remove_file(&path);

        let expected = session.record().expect("record").to_json().expect("json");
        assert_eq!(written, expected);
    }

    #[test]
    fn cli_defaults_pick_a_size_per_kind() {
        let cli = Cli::parse_from(["algoviz", "--algorithm", "bfs", "--seed", "9"]);
        let config = cli.session_config();
        assert_eq!(config.algorithm, Algorithm::Bfs);
        assert_eq!(config.size, 10);
        assert_eq!(config.seed, 9);
    }
}
