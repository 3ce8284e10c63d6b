use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use ccswitch::{
    commands, logging,
    paths::Paths,
    ui::{ColorMode, Theme, Ui},
};

#[derive(Parser)]
#[command(name = "ccswitch")]
#[command(about = "Claude Code config switcher - activate one of several settings.json profiles")]
#[command(version)]
struct Cli {
    /// Config directory holding settings.json and its profiles [default: ~/.claude]
    #[arg(long, global = true, env = "CCSWITCH_DIR", value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// When to use colors
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto", ignore_case = true)]
    color: ColorMode,

    /// Color theme
    #[arg(long, global = true, env = "CCSWITCH_THEME", default_value = "dark", ignore_case = true)]
    theme: Theme,

    /// Increase diagnostic logging (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all profiles and which one is active
    List,

    /// Print a profile's content (pretty-printed when it is JSON)
    Show {
        /// Profile file name; defaults to the current selection
        name: Option<String>,
    },

    /// Remember a profile as the selection for the next `use`
    Select {
        /// Profile file name, e.g. work_settings.json
        name: String,
    },

    /// Switch to a profile (back up settings.json, then overwrite it)
    Use {
        /// Profile file name; defaults to the current selection
        name: Option<String>,
    },

    /// Show the active settings file and the saved selection
    Current,

    /// List backups taken before each switch
    Backups,

    /// Open the config directory in the file browser
    Open,

    /// Run diagnostics on the ccswitch setup
    Doctor,

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let ui = Ui::new(cli.color, cli.no_color).with_theme(cli.theme);
    logging::init_logging(cli.verbose, ui.color_enabled);

    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "ccswitch", &mut std::io::stdout());
        return Ok(());
    }

    let paths = Paths::resolve(cli.dir)?;

    match cli.command {
        Commands::List => commands::list(&paths, &ui),
        Commands::Show { name } => commands::show(&paths, name.as_deref(), &ui),
        Commands::Select { name } => commands::select(&paths, &name, &ui),
        Commands::Use { name } => commands::use_profile(&paths, name.as_deref(), &ui),
        Commands::Current => commands::current(&paths, &ui),
        Commands::Backups => commands::backups(&paths, &ui),
        Commands::Open => commands::open(&paths, &ui),
        Commands::Doctor => commands::doctor(&paths, &ui),
        Commands::Completions { .. } => Ok(()),
    }
}
