mod commands;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use commands::{EXIT_FAILURE, EXIT_IMAGE_ERROR, EXIT_MANIFEST_ERROR};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "crxedit",
    version,
    about = "Editor for Chrome-style app manifests"
)]
struct Cli {
    /// Output results as structured JSON.
    #[arg(long, default_value_t = false, global = true)]
    json: bool,

    /// Enable verbose (debug) logging output.
    #[arg(short, long, default_value_t = false, global = true)]
    verbose: bool,

    /// Enable trace-level logging (more detailed than --verbose).
    #[arg(long, default_value_t = false, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create a fresh manifest file.
    New {
        /// Path of the manifest to create.
        #[arg(default_value = "manifest.json")]
        path: PathBuf,
        /// Application name.
        #[arg(long)]
        name: Option<String>,
        /// Application description.
        #[arg(long)]
        description: Option<String>,
        /// Application version string (defaults to "1.0").
        #[arg(long = "app-version")]
        app_version: Option<String>,
        /// Launch URL.
        #[arg(long)]
        web_url: Option<String>,
        /// Overwrite an existing manifest without asking.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Show a manifest's fields and icon set.
    Inspect {
        /// Path to the manifest file.
        #[arg(default_value = "manifest.json")]
        path: PathBuf,
    },
    /// Edit manifest fields and save.
    Set {
        /// Path to the manifest file.
        #[arg(default_value = "manifest.json")]
        path: PathBuf,
        /// New application name.
        #[arg(long)]
        name: Option<String>,
        /// New application description.
        #[arg(long)]
        description: Option<String>,
        /// New application version string.
        #[arg(long = "app-version")]
        app_version: Option<String>,
        /// New launch URL.
        #[arg(long)]
        web_url: Option<String>,
    },
    /// Regenerate the icon set from a source image and save.
    SetIcon {
        /// Source image to derive the 16/32/48/128 px icons from.
        image: PathBuf,
        /// Path to the manifest file.
        #[arg(default_value = "manifest.json")]
        path: PathBuf,
    },
    /// Generate shell completions for bash, zsh, fish, elvish, or powershell.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

fn main() -> ExitCode {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let msg = info.to_string();
        if msg.contains("Broken pipe")
            || msg.contains("broken pipe")
            || msg.contains("os error 32")
            || msg.contains("failed printing to stdout")
        {
            std::process::exit(0);
        }
        default_hook(info);
    }));

    let cli = Cli::parse();

    let default_level = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("CRXEDIT_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .without_time()
        .init();

    let json_output = cli.json;

    let result = match cli.command {
        Commands::New {
            path,
            name,
            description,
            app_version,
            web_url,
            force,
        } => commands::new::run(
            &path,
            name,
            description,
            app_version,
            web_url,
            force,
            json_output,
        ),
        Commands::Inspect { path } => commands::inspect::run(&path, json_output),
        Commands::Set {
            path,
            name,
            description,
            app_version,
            web_url,
        } => commands::set::run(&path, name, description, app_version, web_url, json_output),
        Commands::SetIcon { image, path } => commands::set_icon::run(&path, &image, json_output),
        Commands::Completions { shell } => commands::completions::run::<Cli>(shell),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(msg) => {
            eprintln!("error: {msg}");
            let code = if msg.starts_with("manifest error:")
                || msg.starts_with("failed to parse manifest")
                || msg.starts_with("manifest I/O error:")
            {
                EXIT_MANIFEST_ERROR
            } else if msg.starts_with("icon error:") {
                EXIT_IMAGE_ERROR
            } else {
                EXIT_FAILURE
            };
            ExitCode::from(code)
        }
    }
}
