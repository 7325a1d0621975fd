//! Diagnostic log file for the process lifetime.
//!
//! Hosts load plugins with no console attached, so tracing output goes to an
//! append-only file in the temp directory, named after the plugin. Best
//! effort only: failure to open the file never affects the plugin.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, Once};

use tracing_subscriber::EnvFilter;

static LOG_INIT: Once = Once::new();

/// Where the diagnostic log for `plugin_name` lives.
pub fn log_file_path(plugin_name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("{plugin_name}.log"))
}

fn open_append(path: &Path) -> Option<File> {
    OpenOptions::new().create(true).append(true).open(path).ok()
}

/// Install the process-wide tracing subscriber, writing to
/// [`log_file_path`]. Safe to call every `Initialise`; only the first call
/// does anything. `FFGL_LOG` overrides the default `info` filter.
pub fn init_plugin_logging(plugin_name: &str) {
    let name = plugin_name.to_string();
    LOG_INIT.call_once(move || {
        let path = log_file_path(&name);
        let Some(file) = open_append(&path) else {
            return;
        };

        let filter = EnvFilter::try_from_env("FFGL_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .try_init();

        tracing::info!(plugin = %name, log_file = %path.display(), "plugin logging initialised");
    });
}
