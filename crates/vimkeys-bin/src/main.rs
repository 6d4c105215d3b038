//! `vimkeys`: replay a key script through the interpreter and print the
//! host output each input event produces.

use anyhow::{Context, Result};
use clap::Parser;
use core_actions::{HostOutput, Interpreter, InterpreterOptions, OutputEvent};
use core_events::{HostKey, KeyEvent};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;

mod script;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "vimkeys", version, about = "Vim-style modal key interpreter")]
struct Args {
    /// Key script to replay; stdin when omitted.
    pub script: Option<PathBuf>,
    /// Optional configuration file path (overrides discovery of `vimkeys.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

/// One line of host output, keys and layer switches in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
enum HostLine {
    Key(OutputEvent),
    Layer(u8),
}

impl std::fmt::Display for HostLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostLine::Key(event) => write!(f, "{event}"),
            HostLine::Layer(layer) => write!(f, "layer {layer}"),
        }
    }
}

/// Host that keeps a single ordered stream of everything emitted.
#[derive(Debug, Default)]
struct ScriptHost {
    lines: Vec<HostLine>,
}

impl HostOutput for ScriptHost {
    fn press(&mut self, key: HostKey) {
        debug!(target: "host", %key, "press");
        self.lines.push(HostLine::Key(OutputEvent::Press(key)));
    }

    fn release(&mut self, key: HostKey) {
        debug!(target: "host", %key, "release");
        self.lines.push(HostLine::Key(OutputEvent::Release(key)));
    }

    fn activate_layer(&mut self, layer: u8) {
        debug!(target: "host", layer, "activate_layer");
        self.lines.push(HostLine::Layer(layer));
    }
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join("vimkeys.log");
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, "vimkeys.log");
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(false)
        .with_writer(nb_writer)
        .try_init()
        .ok()
        .map(|_| guard)
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

fn read_script(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("reading script from stdin")?;
            Ok(text)
        }
    }
}

/// Feed `events` and render one report line per input event.
fn replay(interp: &mut Interpreter<ScriptHost>, events: &[KeyEvent]) -> Vec<String> {
    events
        .iter()
        .map(|event| {
            let forward = interp.process(*event);
            let emitted = std::mem::take(&mut interp.host_mut().lines);
            let mut outputs: Vec<String> = emitted.iter().map(ToString::to_string).collect();
            if forward {
                outputs.push("forward".to_string());
            }
            if outputs.is_empty() {
                format!("{event}")
            } else {
                format!("{event} -> {}", outputs.join(", "))
            }
        })
        .collect()
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = configure_logging();
    install_panic_hook();

    let cfg = core_config::load_from(args.config.clone())?;
    let opts = InterpreterOptions::from_config(&cfg)?;
    info!(target: "runtime", ?opts, "startup");

    let text = read_script(args.script.as_deref())?;
    let events = script::parse(&text)?;
    let mut interp = Interpreter::new(ScriptHost::default(), opts);

    let mut stdout = io::stdout().lock();
    for line in replay(&mut interp, &events) {
        writeln!(stdout, "{line}")?;
    }
    info!(target: "runtime", events = events.len(), mode = ?interp.mode(), "replay_complete");
    Ok(())
}
