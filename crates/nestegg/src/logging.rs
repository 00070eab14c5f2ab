//! File logging for the native binary.
//!
//! Everything goes to `{data_dir}/nestegg.log`. The file is trimmed once at
//! startup when it has grown past [`LogRetention::max_bytes`].

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_FILE_NAME: &str = "nestegg.log";

const ROTATION_MARKER: &[u8] = b"--- Log rotated (older entries removed) ---\n";

/// Size limits applied to the log file at startup
#[derive(Debug, Clone, Copy)]
struct LogRetention {
    max_bytes: u64,
    keep_bytes: u64,
}

impl LogRetention {
    const DEFAULT: Self = Self {
        max_bytes: 5 * 1024 * 1024,
        keep_bytes: 1024 * 1024,
    };

    /// Cut `path` down to its most recent `keep_bytes` if it is larger than
    /// `max_bytes`. The kept tail starts on a whole line.
    fn apply(self, path: &Path) -> io::Result<bool> {
        let len = match fs::metadata(path) {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e),
        };
        if len <= self.max_bytes {
            return Ok(false);
        }

        let mut tail = Vec::new();
        {
            let mut file = File::open(path)?;
            file.seek(SeekFrom::Start(len.saturating_sub(self.keep_bytes)))?;
            file.read_to_end(&mut tail)?;
        }

        let first_line = tail
            .iter()
            .position(|&b| b == b'\n')
            .map_or(0, |newline| newline + 1);

        let mut file = File::create(path)?;
        file.write_all(ROTATION_MARKER)?;
        file.write_all(&tail[first_line..])?;
        Ok(true)
    }
}

/// Install the global subscriber writing to the log file in `data_dir`.
///
/// `RUST_LOG` takes precedence over `level`, which only applies to the
/// `nestegg` target.
pub fn init_logging(data_dir: &Path, level: &str) -> color_eyre::Result<()> {
    fs::create_dir_all(data_dir)?;
    let log_path = data_dir.join(LOG_FILE_NAME);

    if let Err(e) = LogRetention::DEFAULT.apply(&log_path) {
        eprintln!("Warning: could not trim {}: {e}", log_path.display());
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("nestegg={level},nestegg_core=warn")));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    tracing::info!(log_path = %log_path.display(), "Logging initialized");
    Ok(())
}
