use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use rail_tui::{App, RunOptions, theme};
use rail_util::{Translator, UserPreferences, config_root, derive_initials, expand_tilde, format_count};
use tracing::warn;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "rail.log";
const DEFAULT_LOAD_DELAY_MS: u64 = 800;

/// Workspace navigation rail for the terminal.
#[derive(Parser, Debug)]
#[command(name = "rail", version, about)]
struct Cli {
    /// JSON file with string overrides (keys such as `appBar.workspaces`)
    #[arg(long = "locale", global = true, env = "RAIL_LOCALE")]
    locale_file: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Launch the interactive rail (the default)
    Tui(TuiArgs),
    /// Print the badge label for each name
    Initials {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Print the compact form of each count
    Count {
        #[arg(required = true)]
        counts: Vec<u64>,
    },
    /// Print a headless rendering of the rail
    Render(RenderArgs),
    /// Show or save the locale override file
    Locale {
        /// JSON file to store as the default string overrides
        #[arg(long, conflicts_with = "clear")]
        set: Option<String>,

        /// Forget the saved locale file
        #[arg(long)]
        clear: bool,
    },
    /// List available themes, optionally saving a preference
    Themes {
        /// Theme id or alias to store as the preferred theme
        #[arg(long)]
        set: Option<String>,
    },
}

#[derive(Args, Debug)]
struct TuiArgs {
    /// Workspace snapshot; the built-in demo workspace when omitted
    #[arg(long)]
    snapshot: Option<String>,

    /// Delay before projects finish loading, in milliseconds
    #[arg(long, default_value_t = DEFAULT_LOAD_DELAY_MS)]
    load_delay_ms: u64,

    /// Theme id or alias (overrides RAIL_THEME and the saved preference)
    #[arg(long)]
    theme: Option<String>,
}

impl Default for TuiArgs {
    fn default() -> Self {
        Self {
            snapshot: None,
            load_delay_ms: DEFAULT_LOAD_DELAY_MS,
            theme: None,
        }
    }
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Workspace snapshot; the built-in demo workspace when omitted
    #[arg(long)]
    snapshot: Option<String>,

    #[arg(long, default_value_t = 60)]
    width: u16,

    #[arg(long, default_value_t = 30)]
    height: u16,

    /// Render as a signed-out user
    #[arg(long)]
    signed_out: bool,

    /// Render while projects are still loading
    #[arg(long)]
    loading: bool,

    /// Project id to mark active
    #[arg(long)]
    active: Option<String>,

    /// Theme id or alias
    #[arg(long)]
    theme: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let preferences = UserPreferences::new().unwrap_or_else(|error| {
        eprintln!("warning: preferences unavailable ({error}); using defaults");
        UserPreferences::ephemeral()
    });

    match cli.command {
        None => {
            init_file_tracing()?;
            run_tui(TuiArgs::default(), cli.locale_file, &preferences).await
        }
        Some(Command::Tui(args)) => {
            init_file_tracing()?;
            run_tui(args, cli.locale_file, &preferences).await
        }
        Some(command) => {
            init_stderr_tracing();
            run_command(command, cli.locale_file, &preferences)
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn init_stderr_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

/// The terminal belongs to the UI, so logs go to a file in the config dir.
fn init_file_tracing() -> Result<()> {
    let directory = config_root();
    std::fs::create_dir_all(&directory).with_context(|| format!("failed to create {}", directory.display()))?;
    let path = directory.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

fn load_translator(locale: Option<String>, preferences: &UserPreferences) -> Result<Translator> {
    let path = locale.map(|path| expand_tilde(&path)).or_else(|| preferences.locale_path());
    match path {
        Some(path) => {
            Translator::from_file(&path).with_context(|| format!("failed to load locale {}", path.display()))
        }
        None => Ok(Translator::english()),
    }
}

fn load_theme(explicit: Option<&str>, preferences: &UserPreferences) -> theme::LoadedTheme {
    let loaded = theme::load(explicit, preferences.preferred_theme().as_deref());
    if let Some(name) = explicit
        && loaded.source != theme::ThemeSource::Explicit
    {
        warn!(theme = name, fallback = loaded.definition.id, "unknown theme requested");
    }
    loaded
}

async fn run_tui(args: TuiArgs, locale: Option<String>, preferences: &UserPreferences) -> Result<()> {
    let strings = load_translator(locale, preferences)?;
    let loaded = load_theme(args.theme.as_deref(), preferences);
    rail_tui::run(RunOptions {
        snapshot: args.snapshot.map(|path| expand_tilde(&path)),
        load_delay: Duration::from_millis(args.load_delay_ms),
        theme: loaded.theme,
        strings,
    })
    .await
}

fn run_command(command: Command, locale: Option<String>, preferences: &UserPreferences) -> Result<()> {
    match command {
        Command::Initials { names } => {
            for name in names {
                println!("{}", derive_initials(&name));
            }
            Ok(())
        }
        Command::Count { counts } => {
            for count in counts {
                println!("{}", format_count(count));
            }
            Ok(())
        }
        Command::Render(args) => render(args, locale, preferences),
        Command::Themes { set } => themes(set, preferences),
        Command::Locale { set, clear } => locale_command(set, clear, preferences),
        Command::Tui(_) => bail!("the interactive UI cannot run as a plain command"),
    }
}

fn render(args: RenderArgs, locale: Option<String>, preferences: &UserPreferences) -> Result<()> {
    let strings = load_translator(locale, preferences)?;
    let loaded = load_theme(args.theme.as_deref(), preferences);

    let mut snapshot = match args.snapshot {
        Some(path) => {
            let path: PathBuf = expand_tilde(&path);
            rail_util::load_snapshot(&path).with_context(|| format!("failed to load snapshot {}", path.display()))?
        }
        None => rail_util::parse_snapshot(rail_tui::DEMO_SNAPSHOT).context("invalid demo snapshot")?,
    };
    if args.signed_out {
        snapshot.signed_in = false;
    }
    if let Some(active) = args.active {
        if !snapshot.projects.iter().any(|project| project.id == active) {
            bail!("no project with id {active:?} in snapshot");
        }
        snapshot.active_project_id = Some(active);
    }

    let mut app = App::new(&snapshot, args.loading, loaded.theme, strings);
    for line in rail_tui::render_snapshot(&mut app, args.width, args.height)? {
        println!("{line}");
    }
    Ok(())
}

fn themes(set: Option<String>, preferences: &UserPreferences) -> Result<()> {
    if let Some(name) = set {
        let Some(definition) = theme::catalog::resolve(name.trim()) else {
            bail!("unknown theme {name:?}; run `rail themes` for the list");
        };
        if let Err(error) = preferences.set_preferred_theme(Some(definition.id.to_string())) {
            warn!(%error, path = ?preferences.path(), "failed to persist theme preference");
            return Err(error).context("failed to save preferences");
        }
        println!("preferred theme set to {}", definition.id);
        return Ok(());
    }

    let preferred = preferences.preferred_theme();
    for definition in theme::catalog::all() {
        let marker = if preferred.as_deref() == Some(definition.id) { "*" } else { " " };
        let aliases = definition.aliases.join(", ");
        let palette = if definition.is_ansi_fallback { "256-color" } else { "truecolor" };
        println!("{marker} {:<10} {:<12} {palette:<10} {aliases}", definition.id, definition.label);
    }
    Ok(())
}

fn locale_command(set: Option<String>, clear: bool, preferences: &UserPreferences) -> Result<()> {
    if clear {
        preferences.set_locale_path(None).context("failed to save preferences")?;
        println!("locale override cleared");
        return Ok(());
    }
    if let Some(path) = set {
        let path = expand_tilde(&path);
        Translator::from_file(&path).with_context(|| format!("failed to load locale {}", path.display()))?;
        preferences
            .set_locale_path(Some(path.clone()))
            .context("failed to save preferences")?;
        println!("locale override set to {}", path.display());
        return Ok(());
    }
    match preferences.locale_path() {
        Some(path) => println!("{}", path.display()),
        None => println!("built-in English strings"),
    }
    Ok(())
}
