use super::CommandContext;
use crate::cli::{ScoringArgs, StructureArgs, StructureCommands};
use crate::config::{AppConfig, build_config};
use crate::data::StructureStore;
use crate::error::Result;
use crate::utils::progress::apply_fetch_progress;
use episcan::structure::StructureId;
use std::path::PathBuf;
use tracing::info;

pub async fn run(args: StructureArgs, ctx: &CommandContext) -> Result<()> {
    let app = build_config(ctx.config_path.as_deref(), &ScoringArgs::default(), false)?;

    match args.command {
        StructureCommands::Fetch { id, force } => handle_fetch(&id, force, &app, ctx).await,
        StructureCommands::Path => handle_path(&app),
        StructureCommands::SetPath { path } => handle_set_path(path),
        StructureCommands::ResetPath => handle_reset_path(),
        StructureCommands::Clear => handle_clear(&app),
    }
}

async fn handle_fetch(raw_id: &str, force: bool, app: &AppConfig, ctx: &CommandContext) -> Result<()> {
    let id = StructureId::parse(raw_id)?;
    let store = StructureStore::new(&app.structure)?;

    let pb = ctx.download_bar(id.as_str());
    match store
        .fetch(&id, force, |progress| apply_fetch_progress(&pb, progress))
        .await
    {
        Ok(_) => {
            pb.finish_and_clear();
            println!(
                "✓ Structure {} available at {}",
                id,
                store.cached_file(&id).display()
            );
            Ok(())
        }
        Err(e) => {
            pb.abandon_with_message("✗ Download failed.");
            Err(e.into())
        }
    }
}

fn handle_path(app: &AppConfig) -> Result<()> {
    let store = StructureStore::new(&app.structure)?;
    println!("{}", store.cache_path().display());
    Ok(())
}

fn handle_set_path(path: PathBuf) -> Result<()> {
    StructureStore::set_custom_path(&path)?;
    info!("Structure cache path set to {:?}", path);
    println!("✓ Structure cache path set to {}", path.display());
    Ok(())
}

fn handle_reset_path() -> Result<()> {
    StructureStore::reset_path()?;
    println!("✓ Structure cache path reset to the default location.");
    Ok(())
}

fn handle_clear(app: &AppConfig) -> Result<()> {
    let store = StructureStore::new(&app.structure)?;
    let removed = store.clear()?;
    println!(
        "✓ Removed {} cached structure(s) from {}",
        removed,
        store.cache_path().display()
    );
    Ok(())
}
