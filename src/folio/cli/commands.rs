//! Per-command handlers: build the context, call the API, print the result.

use super::logging::{init_logging, LogConfig};
use super::render::{print_messages, render_categories, render_config, render_frame};
use super::setup::{Cli, Commands};
use clap::Parser;
use console::Term;
use directories::ProjectDirs;
use folio::api::{ConfigAction, FolioApi, FolioPaths, ListQuery};
use folio::catalog::{source_for_path, Catalog};
use folio::config::FolioConfig;
use folio::controls::Controls;
use folio::error::{FolioError, Result};
use folio::model::Scope;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const PROJECT_DIR: &str = ".folio";

struct AppContext {
    api: FolioApi,
    scope: Scope,
    use_color: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let use_color = !cli.no_color && Term::stdout().features().colors_supported();
    if !use_color {
        colored::control::set_override(false);
    }
    init_logging(&LogConfig::from_verbosity(cli.verbose).with_ansi(use_color));

    let needs_catalog = !matches!(cli.command, Some(Commands::Config { .. }));
    let ctx = init_context(&cli, needs_catalog, use_color)?;

    match cli.command {
        Some(Commands::List {
            category,
            search,
            page,
        }) => handle_list(
            &ctx,
            ListQuery {
                category,
                search,
                page,
            },
        ),
        Some(Commands::Categories) => handle_categories(&ctx),
        Some(Commands::Replay { script, controls }) => {
            handle_replay(&ctx, &script, controls.as_deref())
        }
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None => handle_list(&ctx, ListQuery::default()),
    }
}

fn init_context(cli: &Cli, needs_catalog: bool, use_color: bool) -> Result<AppContext> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let project_dir = cwd.join(PROJECT_DIR);

    let global_dir = match ProjectDirs::from("com", "folio", "folio") {
        Some(dirs) => dirs.data_dir().to_path_buf(),
        None => {
            warn!("no user data directory available, global scope falls back to ./.folio");
            project_dir.clone()
        }
    };

    let scope = if cli.global {
        Scope::Global
    } else {
        Scope::Project
    };
    let config_dir = match scope {
        Scope::Project => &project_dir,
        Scope::Global => &global_dir,
    };
    let config = FolioConfig::load(config_dir).unwrap_or_else(|e| {
        warn!(error = %e, "unreadable config, using defaults");
        FolioConfig::default()
    });

    let paths = FolioPaths {
        project: Some(project_dir),
        global: global_dir,
    };
    let options = config.listing_options();

    let api = if needs_catalog {
        let path = catalog_path(cli, &config, &cwd)?;
        debug!(path = %path.display(), "loading catalog");
        FolioApi::new(&*source_for_path(&path), options, paths)
    } else {
        FolioApi::with_catalog(Catalog::default(), options, paths)
    };

    Ok(AppContext {
        api,
        scope,
        use_color,
    })
}

fn catalog_path(cli: &Cli, config: &FolioConfig, cwd: &Path) -> Result<PathBuf> {
    let path = cli
        .catalog
        .clone()
        .or_else(|| config.catalog.clone())
        .ok_or_else(|| {
            FolioError::Config(
                "No catalog given: pass --catalog <PATH> or run `folio config catalog <PATH>`"
                    .to_string(),
            )
        })?;
    Ok(if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    })
}

fn handle_list(ctx: &AppContext, query: ListQuery) -> Result<()> {
    let result = ctx.api.list(query)?;
    for frame in &result.frames {
        print!(
            "{}",
            render_frame(frame, ctx.api.catalog(), false, ctx.use_color)
        );
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_categories(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.categories()?;
    print!("{}", render_categories(&result.categories, ctx.use_color));
    print_messages(&result.messages);
    Ok(())
}

fn handle_replay(ctx: &AppContext, script: &Path, controls: Option<&Path>) -> Result<()> {
    let text = fs::read_to_string(script)?;
    let controls = match controls {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            Some(serde_json::from_str::<Controls>(&content)?)
        }
        None => None,
    };

    let result = ctx.api.replay(&text, controls)?;
    for (i, frame) in result.frames.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print!(
            "{}",
            render_frame(frame, ctx.api.catalog(), true, ctx.use_color)
        );
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let show_all = matches!(action, ConfigAction::ShowAll);
    let result = ctx.api.config(ctx.scope, action)?;
    if show_all && let Some(config) = &result.config {
        print!("{}", render_config(config, ctx.use_color));
    }
    print_messages(&result.messages);
    Ok(())
}
