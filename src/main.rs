use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use maths_companion::app::{App, Request, Response};
use maths_companion::settings::Settings;
use maths_companion::{CoreError, ErrorReport};

/// One JSON request per stdin line, one JSON response per stdout line.
///
/// Optional first argument: path to a JSON settings file.
fn main() -> Result<()> {
    env_logger::init();

    let settings = match std::env::args_os().nth(1) {
        Some(path) => Settings::load(Path::new(&path))?,
        None => Settings::default(),
    };
    let mut app = App::from_settings(settings)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in stdin.lock().lines() {
        let line = line.context("reading request")?;
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => app.handle(request),
            Err(e) => {
                log::warn!("unparseable request: {e}");
                Response::Error {
                    error: ErrorReport::from(&CoreError::format(format!("invalid request: {e}"))),
                }
            }
        };

        serde_json::to_writer(&mut out, &response).context("writing response")?;
        writeln!(out).context("writing response")?;
        out.flush().context("flushing response")?;
    }

    Ok(())
}
