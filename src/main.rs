use std::process::ExitCode;

use clap::{Parser, Subcommand};

use srcsnip::{commands, diagnostics};

/// Command-line arguments.
#[derive(Parser)]
#[command(name = "srcsnip", about = "Numbered source snippets of C and C++ functions and classes", long_about = None)]
struct Cli {
    /// The command to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Print a function, method, or class from a .c/.cpp file, or a whole .h file
    Show {
        /// Source file (.c, .cpp, or .h)
        file: String,
        /// Function, method, class, or struct name
        name: String,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Like `show`, but prints errors as plain text and always exits 0
    Context {
        /// Source file (.c, .cpp, or .h)
        file: String,
        /// Function, method, class, or struct name
        name: String,
    },
    /// List the functions, methods, classes, and structs defined in a file
    List {
        /// Source file (.c, .cpp, or .h)
        file: String,
    },
}

/// Install the stderr log subscriber. `SRCSNIP_LOG` overrides the `warn` default.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("SRCSNIP_LOG")
                .unwrap_or_else(|_| return tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    return match cli.command {
        Commands::Context { file, name } => commands::context(&file, &name),
        Commands::List { file } => match commands::list(&file) {
            Err(e) => {
                diagnostics::print_error(&e, &[]);
                ExitCode::FAILURE
            },
            Ok(()) => ExitCode::SUCCESS,
        },
        Commands::Show { file, name, json } => commands::show(&file, &name, json),
    };
}
