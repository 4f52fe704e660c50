use std::path::PathBuf;
use std::process;

use clap::Parser;
use pdfprotect_core::{protect_pdf, ProtectError, ProtectOptions, ProtectSummary};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "pdfprotect",
    about = "Encrypt a PDF with a user password and an optional owner password",
    version
)]
struct Cli {
    /// Path to the input PDF file
    input_pdf: PathBuf,

    /// Output path for the encrypted PDF (defaults to <input>_protected.pdf)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// User password required to open the encrypted PDF
    #[arg(short, long)]
    password: String,

    /// Owner password; defaults to the user password when omitted
    #[arg(long)]
    owner_password: Option<String>,

    /// Password to unlock the input PDF if it is already encrypted
    #[arg(long)]
    input_password: Option<String>,

    /// Overwrite the output file if it exists
    #[arg(long)]
    overwrite: bool,

    /// Do not copy metadata from the source PDF
    #[arg(long)]
    no_metadata: bool,

    /// Emit non-fatal warnings
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(summary) => {
            println!("Encrypted PDF saved to: {}", summary.output.display());
        }
        Err(err) => {
            report_error(&err);
            process::exit(exit_code(&err));
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ProtectSummary> {
    let options = ProtectOptions {
        user_password: cli.password.clone(),
        owner_password: cli.owner_password.clone(),
        input_password: cli.input_password.clone(),
        overwrite: cli.overwrite,
        copy_metadata: !cli.no_metadata,
    };

    let summary = protect_pdf(&cli.input_pdf, cli.output.as_deref(), &options)?;
    Ok(summary)
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "info" } else { "error" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn report_error(err: &anyhow::Error) {
    match err.downcast_ref::<ProtectError>() {
        Some(ProtectError::OutputExists(path)) => {
            eprintln!(
                "Error: output file '{}' already exists. Use --overwrite to replace it.",
                path.display()
            );
        }
        Some(protect_err) => eprintln!("Error: {protect_err}"),
        None => eprintln!("Unexpected error: {err}"),
    }
}

/// Map pipeline failures to the documented process exit codes.
fn exit_code(err: &anyhow::Error) -> i32 {
    let Some(err) = err.downcast_ref::<ProtectError>() else {
        return 99;
    };
    match err {
        ProtectError::InputNotFound(_) => 2,
        ProtectError::OutputExists(_) => 3,
        ProtectError::Parse(_) => 4,
        ProtectError::PasswordRequired => 5,
        ProtectError::WrongPassword => 6,
        ProtectError::PageCopy(_) => 7,
        ProtectError::Encryption(_) => 8,
        ProtectError::Write(_) => 9,
    }
}
