use clap::{Parser, Subcommand};
use config::GlobalArgs;
use errors::{SlotError, SlotResult};
use genie_sdk::{Category, GenerationMode, Genie, Idea, Session};
use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};
use store::{mask_key, API_KEY};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod errors;
mod output;
mod store;

#[derive(Parser)]
#[command(name = "genie-slot")]
#[command(about = "Spin the slot machine for a $1 software idea, then generate its starter code")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Spin for new ideas
    Spin {
        /// Number of ideas to draw in this session
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
        /// Save the last idea as JSON for `build --idea`
        #[arg(short, long)]
        save: Option<PathBuf>,
    },
    /// Generate starter code for a saved idea, or for a fresh spin
    Build {
        /// Idea file written by `spin --save`
        #[arg(short, long)]
        idea: Option<PathBuf>,
        /// Directory the generated files are written to
        #[arg(short, long, default_value = "genie-out")]
        out: PathBuf,
    },
    /// Manage the stored API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
    /// List the idea categories
    Categories,
}

#[derive(Subcommand)]
enum KeyAction {
    /// Store an API key for later runs
    Set { key: String },
    /// Remove the stored API key
    Clear,
    /// Show whether a key is stored
    Show,
}

/// Logs go to stderr so generated output can be piped.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "genie_slot=info,genie_sdk=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> SlotResult<()> {
    let Cli { global, command } = cli;

    match command {
        Commands::Spin { count, save } => {
            let (genie, credential) = connect(&global)?;
            let mode = genie.mode(credential.as_deref());
            let mut session = Session::new(global.category);

            for _ in 0..count.max(1) {
                let idea = session.spin(&mode).await.map_err(SlotError::Idea)?;
                println!("{}", output::render_idea(idea));
            }
            if let (Some(path), Some(idea)) = (save, session.current_idea()) {
                output::save_idea(idea, &path)?;
                println!("Saved idea to {}", path.display());
            }
        }
        Commands::Build { idea, out } => {
            let (genie, credential) = connect(&global)?;
            let mode = genie.mode(credential.as_deref());
            let mut session = Session::new(global.category);

            let idea = pick_idea(&mut session, &mode, idea.as_deref()).await?;
            println!("{}", output::render_idea(idea));

            let bundle = session.build(&mode).await.map_err(SlotError::Code)?;
            for path in output::write_bundle(bundle, &out)? {
                println!("wrote {}", path.display());
            }
        }
        Commands::Key { action } => {
            let mut store = global.open_store()?;
            match action {
                KeyAction::Set { key } => {
                    let key = key.trim();
                    if key.is_empty() {
                        return Err(SlotError::Config("API key must not be empty".to_string()));
                    }
                    store.set(API_KEY, key);
                    store.save()?;
                    println!("Stored API key in {}", store.path().display());
                }
                KeyAction::Clear => {
                    if store.remove(API_KEY).is_some() {
                        store.save()?;
                        println!("Removed stored API key");
                    } else {
                        println!("No API key stored");
                    }
                }
                KeyAction::Show => match store.get(API_KEY) {
                    Some(key) => println!("{} ({})", mask_key(key), store.path().display()),
                    None => println!("No API key stored"),
                },
            }
        }
        Commands::Categories => {
            println!("{:<14} All Categories", "all");
            for category in Category::ALL {
                println!("{:<14} {}", category.id(), category.label());
            }
        }
    }

    Ok(())
}

/// The saved idea when a file is given, otherwise a fresh spin.
async fn pick_idea<'a>(
    session: &'a mut Session,
    mode: &GenerationMode,
    saved: Option<&Path>,
) -> SlotResult<&'a Idea> {
    match saved {
        Some(path) => {
            let idea = output::load_idea(path)?;
            tracing::debug!(title = %idea.title, path = %path.display(), "loaded saved idea");
            Ok(session.select(idea))
        }
        None => session.spin(mode).await.map_err(SlotError::Idea),
    }
}

fn connect(global: &GlobalArgs) -> SlotResult<(Genie, Option<String>)> {
    let credential = global.credential()?;
    let genie = Genie::new(global.genie_config()?);

    if credential.is_none() {
        tracing::info!("no API key configured, serving sample ideas");
    } else {
        tracing::info!(
            model = %genie.config().model_id,
            endpoint = genie.config().endpoint.mode(),
            "using remote generation"
        );
    }

    Ok((genie, credential))
}
