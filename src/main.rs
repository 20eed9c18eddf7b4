//! protodoc - protocol reference generator

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::debug;

use protodoc::{Config, MarkdownExporter, load_protocol};

#[derive(Parser)]
#[command(name = "protodoc")]
#[command(version, about = "Render JSON Schema protocol definitions as Markdown", long_about = None)]
#[command(after_help = "EXAMPLES:
    protodoc generate doc/protocol/index.json              Write to stdout
    protodoc generate doc/protocol/index.json protocol.md  Write to a file")]
struct Cli {
    /// Log loading and rendering progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the Markdown reference for a protocol index
    Generate {
        /// Root index file (JSON)
        #[arg(value_name = "INDEX")]
        index: PathBuf,

        /// Output file; defaults to stdout
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Directory packet files are read from [default: the index's directory]
        #[arg(long, value_name = "DIR")]
        packet_dir: Option<PathBuf>,

        /// Extension appended to packet identifiers
        #[arg(long, value_name = "EXT", default_value = "json")]
        extension: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Command::Generate {
            index,
            output,
            packet_dir,
            extension,
        } => {
            let mut config = Config::new().with_packet_extension(extension);
            if let Some(dir) = packet_dir {
                config = config.with_packet_dir(dir);
            }

            match generate(&index, output.as_deref(), config) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("error: {e}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}

fn generate(index_path: &Path, output: Option<&Path>, config: Config) -> protodoc::Result<()> {
    // Load everything first so a bad input never leaves a truncated output file
    let index = load_protocol(index_path, &config)?;
    let exporter = MarkdownExporter::with_config(config);

    match output {
        Some(path) => {
            debug!("writing {}", path.display());
            let mut writer = BufWriter::new(File::create(path)?);
            exporter.export(&index, &mut writer)
        }
        None => exporter.export(&index, &mut io::stdout().lock()),
    }
}
