use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};

/// Where log records go. The terminal UI owns stdout and stderr, so while
/// it runs records are either piped to a file or dropped.
pub enum Sink<'a> {
    File(&'a Path),
    Stderr,
    Off,
}

pub fn init_logger(sink: Sink<'_>) -> Result<()> {
    let target = match sink {
        Sink::Off => return Ok(()),
        Sink::Stderr => Target::Stderr,
        Sink::File(path) => {
            let file = File::create(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            Target::Pipe(Box::new(file))
        }
    };

    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder.target(target);
    builder.format(|buf, record| {
        let module_path = record.module_path().unwrap_or("<unknown>");
        writeln!(
            buf,
            "{} [{}][{}] {}",
            buf.timestamp_millis(),
            record.level(),
            module_path,
            record.args()
        )
    });
    let _ = builder.try_init();
    Ok(())
}
