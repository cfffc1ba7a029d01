//! The summons session: owns every registry and the index cache.
//!
//! A session is built in two phases. First the base registries are built
//! (the base wrapper class, the built-in columns, no custom packs). Then
//! every extension's `register_*` hook runs. Only after `build()` returns
//! can the index be loaded.

use std::collections::HashMap;
use std::sync::Arc;
use summons_columns::{ColumnDefinition, ColumnRegistry, sort_rows};
use summons_model::{DocWrapper, ModelError, RawEntry, WrapperRegistry};
use summons_types::{
    EnglishLocalizer, Localizer, LogNotifier, MODULE_TITLE, Notifier, RulesetId,
};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::config::SummonsConfig;
use crate::enrich::RulesetEnricher;
use crate::error::IndexResult;
use crate::extension::SummonsExtension;
use crate::progress::{LogProgress, Progress, ProgressDisplay};
use crate::source::{CustomPacks, MemoryCatalog, PackCatalog, PackDescriptor, PackSource, deduplicate};

/// A loaded index. Cache hits hand out the same `Arc`.
pub type Index = Arc<Vec<DocWrapper>>;

/// Options for [`SummonsSession::load_packs`].
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Ignore the cache and read every source again.
    pub refresh: bool,
    /// Allow this call to replace an existing cached index. When false, the
    /// call serves the cache if there is one, and a recomputed index is only
    /// stored when nothing was cached before.
    pub reload_index: bool,
    /// Packs to load; `None` means the configured sources.
    pub packs: Option<Vec<PackDescriptor>>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            refresh: false,
            reload_index: true,
            packs: None,
        }
    }
}

impl LoadOptions {
    pub fn with_refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    pub fn with_reload_index(mut self, reload_index: bool) -> Self {
        self.reload_index = reload_index;
        self
    }

    pub fn with_packs(mut self, packs: Vec<PackDescriptor>) -> Self {
        self.packs = Some(packs);
        self
    }
}

/// Builder for [`SummonsSession`].
pub struct SummonsSessionBuilder {
    config: SummonsConfig,
    ruleset: RulesetId,
    catalog: Arc<dyn PackCatalog>,
    notifier: Arc<dyn Notifier>,
    progress: Arc<dyn ProgressDisplay>,
    localizer: Arc<dyn Localizer>,
    enrichers: Vec<Arc<dyn RulesetEnricher>>,
    extensions: Vec<Arc<dyn SummonsExtension>>,
}

impl SummonsSessionBuilder {
    /// The host's pack collection. Defaults to an empty catalog.
    pub fn catalog(mut self, catalog: Arc<dyn PackCatalog>) -> Self {
        self.catalog = catalog;
        self
    }

    /// User-visible notifications. Defaults to logging them.
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// The loading bar. Defaults to logging progress.
    pub fn progress_display(mut self, progress: Arc<dyn ProgressDisplay>) -> Self {
        self.progress = progress;
        self
    }

    /// The string table. Defaults to English.
    pub fn localizer(mut self, localizer: Arc<dyn Localizer>) -> Self {
        self.localizer = localizer;
        self
    }

    /// Adds an enricher. A later enricher for the same ruleset replaces an earlier one.
    pub fn enricher(mut self, enricher: Arc<dyn RulesetEnricher>) -> Self {
        self.enrichers.push(enricher);
        self
    }

    /// Adds an extension. Extensions run in the order they are added.
    pub fn extension(mut self, extension: Arc<dyn SummonsExtension>) -> Self {
        self.extensions.push(extension);
        self
    }

    /// Runs startup and returns a session ready to load packs.
    pub fn build(self) -> SummonsSession {
        let mut wrappers = WrapperRegistry::new();
        let mut custom_packs = CustomPacks::new();
        let mut columns = ColumnRegistry::builder().with_builtin(self.localizer.as_ref());

        for extension in &self.extensions {
            extension.register_wrapper_classes(&mut wrappers);
        }
        for extension in &self.extensions {
            extension.register_custom_packs(&mut custom_packs);
        }
        for extension in &self.extensions {
            extension.register_columns(&mut columns);
        }

        let enrichers: HashMap<RulesetId, Arc<dyn RulesetEnricher>> = self
            .enrichers
            .into_iter()
            .map(|e| (e.ruleset(), e))
            .collect();

        info!(
            ruleset = %self.ruleset,
            extensions = self.extensions.len(),
            custom_packs = custom_packs.len(),
            "Summons session ready"
        );

        SummonsSession {
            config: self.config,
            ruleset: self.ruleset,
            wrappers,
            custom_packs,
            columns: columns.build(),
            catalog: self.catalog,
            enrichers,
            extensions: self.extensions,
            notifier: self.notifier,
            progress: self.progress,
            localizer: self.localizer,
            cache: RwLock::new(None),
        }
    }
}

/// Registries, services and the cached index for one host session.
pub struct SummonsSession {
    config: SummonsConfig,
    ruleset: RulesetId,
    wrappers: WrapperRegistry,
    custom_packs: CustomPacks,
    columns: ColumnRegistry,
    catalog: Arc<dyn PackCatalog>,
    enrichers: HashMap<RulesetId, Arc<dyn RulesetEnricher>>,
    extensions: Vec<Arc<dyn SummonsExtension>>,
    notifier: Arc<dyn Notifier>,
    progress: Arc<dyn ProgressDisplay>,
    localizer: Arc<dyn Localizer>,
    cache: RwLock<Option<Index>>,
}

impl SummonsSession {
    pub fn builder(config: SummonsConfig, ruleset: RulesetId) -> SummonsSessionBuilder {
        SummonsSessionBuilder {
            config,
            ruleset,
            catalog: Arc::new(MemoryCatalog::new()),
            notifier: Arc::new(LogNotifier),
            progress: Arc::new(LogProgress),
            localizer: Arc::new(EnglishLocalizer::new()),
            enrichers: Vec::new(),
            extensions: Vec::new(),
        }
    }

    pub fn config(&self) -> &SummonsConfig {
        &self.config
    }

    pub fn ruleset(&self) -> &RulesetId {
        &self.ruleset
    }

    pub fn wrappers(&self) -> &WrapperRegistry {
        &self.wrappers
    }

    pub fn custom_packs(&self) -> &CustomPacks {
        &self.custom_packs
    }

    pub fn column_registry(&self) -> &ColumnRegistry {
        &self.columns
    }

    /// Columns of the active ruleset.
    pub fn columns(&self) -> &[ColumnDefinition] {
        self.columns.columns(&self.ruleset)
    }

    /// The cached index, if one was stored.
    pub async fn cached_index(&self) -> Option<Index> {
        self.cache.read().await.clone()
    }

    /// Drops the cached index.
    pub async fn clear_cache(&self) {
        *self.cache.write().await = None;
    }

    /// Re-reads every configured source and replaces the cache.
    pub async fn refresh(&self) -> IndexResult<Index> {
        self.load_packs(LoadOptions::default().with_refresh(true)).await
    }

    /// Loads, enriches and wraps the index of every requested pack.
    ///
    /// Packs are processed strictly one after another: pack N is fully
    /// fetched, enriched and wrapped before pack N+1 is requested, and the
    /// `on_loading_packs` hooks see the complete index.
    ///
    /// - A pack that resolves to no source is logged and skipped.
    /// - An entry without a name or uuid is reported through the notifier
    ///   and left out of the index.
    /// - A failing source or enrichment service aborts the call. A failing
    ///   source is also reported through the notifier.
    ///
    /// Concurrent calls are not serialized: two loads started on an empty
    /// cache both read every source, and the last one to finish owns the cache.
    pub async fn load_packs(&self, options: LoadOptions) -> IndexResult<Index> {
        let LoadOptions {
            refresh,
            reload_index,
            packs,
        } = options;

        let packs = packs.unwrap_or_else(|| self.config.sources.clone());
        let packs = deduplicate(packs, |p| p.id.clone());

        let existing = self.cache.read().await.clone().filter(|i| !i.is_empty());
        if !refresh {
            if let Some(index) = &existing {
                debug!(entries = index.len(), "Pack index served from cache");
                return Ok(Arc::clone(index));
            }
        }
        let publish = reload_index || existing.is_none();

        let fields = self.config.requested_fields();
        let mut progress = Progress::new(packs.len(), Arc::clone(&self.progress));
        let mut index: Vec<DocWrapper> = Vec::new();

        for descriptor in &packs {
            let Some(source) = self.resolve_pack(descriptor) else {
                warn!(
                    pack = %descriptor.display_name(),
                    "{MODULE_TITLE} | {}",
                    self.localizer.format(
                        "fs.notifications.error.loadingPack",
                        &[("pack", descriptor.display_name())]
                    )
                );
                continue;
            };

            let entries = match source.get_index(&fields).await {
                Ok(entries) => entries,
                Err(err) => {
                    self.notifier.error(&format!(
                        "{MODULE_TITLE} | {}",
                        self.localizer.format(
                            "fs.notifications.error.indexFailed",
                            &[("pack", source.label())]
                        )
                    ));
                    return Err(err);
                }
            };
            let fetched = entries.len();
            let entries = self.enrich(entries).await?;

            let before = index.len();
            for entry in entries {
                match self.wrappers.wrap(entry) {
                    Ok(wrapper) => index.push(wrapper),
                    Err(err) => self.report_invalid(source.id(), &err),
                }
            }
            debug!(
                pack = %source.id(),
                fetched,
                indexed = index.len() - before,
                "Pack indexed"
            );

            progress.advance(
                &self
                    .localizer
                    .format("fs.notifications.loadingPack", &[("pack", source.label())]),
            );
        }

        for extension in &self.extensions {
            extension.on_loading_packs(&mut index);
        }

        progress.close(&self.localizer.localize("fs.notifications.loadingComplete"));

        let index = Arc::new(index);
        if publish {
            *self.cache.write().await = Some(Arc::clone(&index));
        }
        info!(
            entries = index.len(),
            packs = packs.len(),
            cached = publish,
            "Pack index loaded"
        );
        Ok(index)
    }

    /// Sorted copy of the cached index by a column of the active ruleset.
    /// `None` when the column does not exist.
    pub async fn sorted(&self, column: usize, descending: bool) -> Option<Vec<DocWrapper>> {
        let column = self.columns.column(&self.ruleset, column)?;
        let mut rows = self
            .cached_index()
            .await
            .map(|index| index.as_ref().clone())
            .unwrap_or_default();
        sort_rows(&mut rows, column, descending);
        Some(rows)
    }

    /// Custom packs shadow catalog packs with the same id.
    fn resolve_pack(&self, descriptor: &PackDescriptor) -> Option<Arc<dyn PackSource>> {
        self.custom_packs
            .get(&descriptor.id)
            .or_else(|| self.catalog.get(&descriptor.id))
    }

    async fn enrich(&self, entries: Vec<RawEntry>) -> IndexResult<Vec<RawEntry>> {
        match self.enrichers.get(&self.ruleset) {
            Some(enricher) => enricher.enrich(entries).await,
            None => Ok(entries),
        }
    }

    fn report_invalid(&self, pack: &str, err: &ModelError) {
        warn!(pack = %pack, error = %err, "Index entry skipped");
        match err {
            ModelError::MissingFields(fields) => {
                for field in fields {
                    let key = match *field {
                        "name" => "fs.notifications.error.missingName",
                        _ => "fs.notifications.error.missingUuid",
                    };
                    self.notifier
                        .error(&format!("{MODULE_TITLE} | {}", self.localizer.localize(key)));
                }
            }
            other => self.notifier.error(&format!("{MODULE_TITLE} | {other}")),
        }
    }
}
