use clap::Parser;
use directories::ProjectDirs;
use invtxt::api::InvApi;
use invtxt::commands::edit::Field;
use invtxt::commands::{CmdMessage, CmdResult};
use invtxt::config::InvConfig;
use invtxt::error::{InvError, Result};
use invtxt::pictures;
use invtxt::store::fs_backend::FsBackend;
use invtxt::store::InventoryStore;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod args;
mod cli;
use args::{Cli, Commands, PicsAction};
use cli::print::{print_items, print_messages, print_names, ListStyle};

const LOG_ENV: &str = "INVTXT_LOG";

fn main() {
    init_logging();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

struct AppContext {
    api: InvApi<FsBackend>,
    config: InvConfig,
    config_dir: PathBuf,
    style: ListStyle,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config_dir = resolve_config_dir(&cli)?;
    let mut config = InvConfig::load_or_init(&config_dir)?;
    if let Some(dir) = &cli.dir {
        config.inventory_dir = dir.clone();
    }

    let command = cli.command.unwrap_or(Commands::Ls { filter: None });
    if let Commands::Config = command {
        return handle_config(&config, &config_dir);
    }

    let mut ctx = init_context(config, config_dir, cli.plain)?;
    dispatch(&mut ctx, command)?;
    if ctx.api.finish()? {
        debug!("changes saved");
    }
    Ok(())
}

fn dispatch(ctx: &mut AppContext, command: Commands) -> Result<()> {
    match command {
        Commands::Ls { filter } => {
            let result = ctx.api.list(filter.as_deref());
            show_items(ctx, &result);
        }
        Commands::Deficit => {
            let result = ctx.api.deficit();
            show_items(ctx, &result);
        }
        Commands::Cats => print_names(&ctx.api.categories().names),
        Commands::Tags => print_names(&ctx.api.tags().names),
        Commands::Aliases => print_names(&ctx.api.aliases().names),
        Commands::Refs { item } => {
            let result = ctx.api.refs(&item)?;
            show_items(ctx, &result);
        }
        Commands::Add { record } => print_messages(&ctx.api.add(&record)?.messages),
        Commands::Rm { item } => print_messages(&ctx.api.remove(&item)?.messages),
        Commands::Num { item, value } => handle_edit(ctx, &item, Field::Amount, &value)?,
        Commands::Req { item, value } => handle_edit(ctx, &item, Field::Required, &value)?,
        Commands::Als { item, value } => handle_edit(ctx, &item, Field::Alias, &value)?,
        Commands::Text { item, value } => handle_edit(ctx, &item, Field::Text, &value)?,
        Commands::Meta { item, value } => handle_edit(ctx, &item, Field::Meta, &value)?,
        Commands::Pics { action } => handle_pics(ctx, action)?,
        Commands::Config => handle_config(&ctx.config, &ctx.config_dir)?,
    }
    Ok(())
}

fn resolve_config_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.config_dir {
        return Ok(dir.clone());
    }
    ProjectDirs::from("org", "invtxt", "invtxt")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| InvError::Store("Could not determine config directory".into()))
}

fn init_context(config: InvConfig, config_dir: PathBuf, plain: bool) -> Result<AppContext> {
    let backend = FsBackend::new(config.inventory_dir.clone());
    let store = InventoryStore::new(backend, config.markers.clone());
    store.init()?;
    let api = InvApi::open(store)?;

    let style = ListStyle {
        sorted: config.sorted,
        pretty: config.pretty && !plain,
    };
    Ok(AppContext {
        api,
        config,
        config_dir,
        style,
    })
}

fn show_items(ctx: &AppContext, result: &CmdResult) {
    print_items(
        &result.listed_items,
        result.total_items,
        ctx.api.inventory().markers(),
        ctx.style,
    );
    print_messages(&result.messages);
}

fn handle_edit(ctx: &mut AppContext, item: &str, field: Field, value: &str) -> Result<()> {
    let result = ctx.api.edit(item, field, value)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_pics(ctx: &mut AppContext, action: PicsAction) -> Result<()> {
    match action {
        PicsAction::Add { item, files } => {
            let choice = pictures::select_importer(
                ctx.config.no_magick,
                ctx.config.jpg_size,
                ctx.config.jpg_quality,
            );
            if choice.degraded {
                print_messages(&[CmdMessage::warning(
                    "ImageMagick not found, pictures are imported unmodified and only .jpg is \
                     supported. Set \"no_magick\": true in the config to silence this.",
                )]);
            }
            let result = ctx.api.add_pictures(&item, &files, choice.importer.as_ref())?;
            print_messages(&result.messages);
        }
        PicsAction::Show { item } => {
            let result = ctx.api.show_pictures(&item)?;
            for path in &result.picture_paths {
                view_picture(&ctx.config.viewer, path);
            }
            print_messages(&result.messages);
        }
        PicsAction::Clean => {
            let result = ctx.api.clean_pictures()?;
            print_messages(&result.messages);
        }
    }
    Ok(())
}

fn view_picture(viewer: &str, path: &Path) {
    if let Err(e) = pictures::view(viewer, path) {
        eprintln!("Warning: {}", e);
    }
}

fn handle_config(config: &InvConfig, config_dir: &Path) -> Result<()> {
    println!("# {}", InvConfig::config_path(config_dir).display());
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
