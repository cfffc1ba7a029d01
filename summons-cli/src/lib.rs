//! Headless summon index: loads a directory of pack files through a
//! [`SummonsSession`] and prints the creature table for one ruleset.

mod packs;
mod table;

pub use packs::{DirectoryCatalog, JsonPackSource, load_art};
pub use table::format_table;

use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use std::sync::Arc;
use summons_index::{
    ArtService, Dnd5eEnricher, LoadOptions, Pf2eEnricher, StaticArt, SummonsConfig,
    SummonsSession,
};
use summons_types::RulesetId;
use tracing::info;

/// Everything one run needs.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub packs_dir: PathBuf,
    pub config: SummonsConfig,
    pub ruleset: RulesetId,
    pub art: Option<PathBuf>,
    /// Column to sort by; `None` keeps load order.
    pub sort: Option<usize>,
    pub descending: bool,
}

/// Loads the packs and returns the formatted table.
pub async fn run(options: RunOptions) -> Result<String> {
    let catalog = DirectoryCatalog::scan(&options.packs_dir)
        .with_context(|| format!("Failed to scan pack directory {:?}", options.packs_dir))?;
    info!(packs = catalog.len(), "Pack directory scanned");

    let mut config = options.config;
    if config.sources.is_empty() {
        config.sources = catalog.descriptors();
    }

    let art: Arc<dyn ArtService> = match &options.art {
        Some(path) => Arc::new(
            load_art(path).with_context(|| format!("Failed to load art map {path:?}"))?,
        ),
        None => Arc::new(StaticArt::default()),
    };
    let placeholder = config.placeholder_icon.clone();

    let mut builder =
        SummonsSession::builder(config, options.ruleset.clone()).catalog(Arc::new(catalog));
    if options.ruleset == RulesetId::PF2E {
        builder = builder.enricher(Arc::new(Pf2eEnricher::new(art, placeholder)));
    } else if options.ruleset == RulesetId::DND5E {
        builder = builder.enricher(Arc::new(Dnd5eEnricher::new(art, placeholder)));
    }
    let session = builder.build();

    let index = session
        .load_packs(LoadOptions::default())
        .await
        .context("Failed to load pack index")?;

    let rows = match options.sort {
        Some(column) => match session.sorted(column, options.descending).await {
            Some(rows) => rows,
            None => bail!(
                "Ruleset {} has no column {} ({} columns)",
                options.ruleset,
                column,
                session.columns().len()
            ),
        },
        None => index.as_ref().clone(),
    };

    Ok(format_table(session.columns(), &rows))
}
