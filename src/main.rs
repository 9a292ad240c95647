use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;

use consolenav::{
    config::{self, Config},
    menufile::MenuFile,
    palette::ConsoleColor,
    render::{ColorMode, Renderer},
    theme::Style,
    EofPolicy, ExitReason, Menu, MenuItem, Navigator,
};

#[derive(Parser, Debug)]
#[command(name = "consolenav", version, about = "Colored console menus")]
struct Cli {
    /// When to emit color: auto, always or never. Overrides the config file.
    #[arg(long, global = true)]
    color: Option<ColorMode>,
    /// Keep showing the menu when stdin closes instead of leaving it.
    #[arg(long, global = true)]
    loop_on_eof: bool,
    /// More log output on stderr (-v, -vv).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Runs a menu described in a JSON file.
    Run {
        /// Path to the menu file.
        file: PathBuf,
    },
    /// Runs a built-in menu whose items add and remove other items.
    Demo,
    /// Prints every palette color in its own color.
    Palette,
    /// Prints the config path that would be used (if any).
    ConfigPath,
    /// Writes a config template if none exists and prints its path.
    InitConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cfg = config::load_optional()?.unwrap_or_default();
    let mode = cli.color.unwrap_or(cfg.color);
    let eof = if cli.loop_on_eof {
        EofPolicy::Invalid
    } else {
        cfg.eof_policy(EofPolicy::Exit)
    };

    match cli.command {
        Command::Run { file } => {
            let menu_file = MenuFile::load(&file)?;
            let renderer = Arc::new(Renderer::stdout(cfg.theme(), mode));
            let mut menu = menu_file.build(&renderer);
            run(&cfg, renderer, eof, &mut menu)?;
        }
        Command::Demo => {
            let renderer = Arc::new(Renderer::stdout(cfg.theme(), mode));
            let mut menu = demo_menu();
            run(&cfg, renderer, eof, &mut menu)?;
        }
        Command::Palette => {
            let renderer = Renderer::stdout(cfg.theme(), mode);
            let mut out = renderer.lock();
            for color in ConsoleColor::PALETTE {
                out.write_styled(Style::fg(color), color.name(), true)
                    .context("write palette")?;
            }
        }
        Command::ConfigPath => {
            if let Some(path) = config::resolve_config_path() {
                println!("{}", path.display());
            }
        }
        Command::InitConfig => {
            let path = config::ensure_config_file_exists().context("ensure config exists")?;
            println!("{}", path.display());
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();
}

fn run(
    cfg: &Config,
    renderer: Arc<Renderer<std::io::Stdout>>,
    eof: EofPolicy,
    menu: &mut Menu,
) -> Result<()> {
    cfg.apply_exit_item(menu);
    let mut nav = Navigator::stdin(renderer).with_eof_policy(eof);
    let outcome = nav
        .run_menu(menu)
        .with_context(|| format!("run menu '{}'", menu.title))?;
    if outcome.reason == ExitReason::EndOfInput {
        log::info!("stdin closed after {} selections", outcome.selections);
    }
    Ok(())
}

fn demo_menu() -> Menu {
    Menu::new("Demo").with_items([
        MenuItem::new("Add an item").with_key("a").on_select(|menu, _| {
            let n = menu.items.len().saturating_sub(2);
            menu.push(MenuItem::new(format!("Extra item {n}")));
        }),
        MenuItem::new("Remove the last extra item")
            .with_key("r")
            .on_select(|menu, _| {
                if menu.items.len() > 3 {
                    menu.items.pop();
                }
            }),
        MenuItem::new("Rename this menu").with_key("n").on_select(|menu, _| {
            menu.title = if menu.title == "Demo" {
                "Demo (renamed)".to_string()
            } else {
                "Demo".to_string()
            };
        }),
    ])
}
