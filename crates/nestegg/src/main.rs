#[cfg(feature = "native")]
use clap::Parser;
#[cfg(feature = "native")]
use nestegg::cli::{Command, execute};
#[cfg(feature = "native")]
use nestegg::platform::NativeStorage;
#[cfg(feature = "native")]
use nestegg::{Session, init_logging};
#[cfg(feature = "native")]
use std::path::PathBuf;

#[cfg(feature = "native")]
#[derive(Parser, Debug)]
#[command(name = "nestegg")]
#[command(about = "Project savings growth by decade of contribution")]
struct Args {
    /// Path to the data directory (default: ~/.nestegg/)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[cfg(feature = "native")]
fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let data_dir = args.data_dir.unwrap_or_else(NativeStorage::default_path);

    init_logging(&data_dir, &args.log_level)?;

    let mut session = Session::load(NativeStorage::new(data_dir));
    let command = args.command.unwrap_or(Command::Show { table: false });

    print!("{}", execute(&mut session, &command));

    session.flush();
    tracing::info!("NestEgg exiting");

    Ok(())
}

#[cfg(not(feature = "native"))]
fn main() {
    // Web entry point is handled via wasm_bindgen in web.rs
    // This main() exists only to satisfy the binary target requirement
    panic!("This binary requires the 'native' feature. For web, build the WASM target.");
}
