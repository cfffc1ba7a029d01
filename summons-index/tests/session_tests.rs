mod common;

use async_trait::async_trait;
use common::{
    BrokenPack, CountingPack, FailingArt, RecordingNotifier, RecordingProgress, creature, entry,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use summons_columns::{ColumnDefinition, ColumnRegistryBuilder};
use summons_index::{
    CustomPacks, IndexError, LoadOptions, MemoryCatalog, PackDescriptor, Pf2eEnricher, StaticArt,
    SummonsConfig, SummonsExtension, SummonsSession,
};
use summons_model::{DocWrapper, WrapperClass, WrapperRegistry};
use summons_types::RulesetId;

const WOLF: &str = "Compendium.pf2e.bestiary.wolf";
const BEAR: &str = "Compendium.pf2e.bestiary.bear";
const ANGEL: &str = "Compendium.pf2e.bestiary.angel";

fn config(ids: &[&str]) -> SummonsConfig {
    SummonsConfig {
        sources: ids.iter().map(|id| PackDescriptor::new(*id)).collect(),
        ..SummonsConfig::default()
    }
}

fn bestiary() -> Arc<CountingPack> {
    CountingPack::new(
        "pf2e.bestiary",
        "Bestiary",
        vec![
            creature(WOLF, "Wolf", 1, "N"),
            creature(BEAR, "Bear", 2, "N"),
            creature(ANGEL, "Angel", 6, "LG"),
        ],
    )
}

fn catalog(packs: &[Arc<CountingPack>]) -> Arc<MemoryCatalog> {
    let mut catalog = MemoryCatalog::new();
    for pack in packs {
        catalog.insert(pack.clone());
    }
    Arc::new(catalog)
}

fn names(index: &[DocWrapper]) -> Vec<&str> {
    index.iter().map(DocWrapper::name).collect()
}

// ── Loading ──────────────────────────────────────────────────────

#[tokio::test]
async fn loads_configured_packs_in_order() {
    let bestiary = bestiary();
    let extra = CountingPack::new("world.extra", "Extra", vec![creature("Actor.imp", "Imp", -1, "LE")]);
    let session = SummonsSession::builder(config(&["world.extra", "pf2e.bestiary"]), RulesetId::PF2E)
        .catalog(catalog(&[bestiary.clone(), extra.clone()]))
        .build();

    let index = session.load_packs(LoadOptions::default()).await.unwrap();

    assert_eq!(names(&index), vec!["Imp", "Wolf", "Bear", "Angel"]);
    assert_eq!(index[1].doc_type(), "DocWrapper");
    assert_eq!(index[1].uuid(), WOLF);
    assert_eq!(index[1].id(), WOLF);
    assert_eq!(index[1].fields()["_id"], json!("wolf"));
    assert_eq!(bestiary.last_fields(), session.config().requested_fields());
}

#[tokio::test]
async fn duplicate_packs_are_loaded_once() {
    let bestiary = bestiary();
    let session = SummonsSession::builder(
        config(&["pf2e.bestiary", "pf2e.bestiary"]),
        RulesetId::PF2E,
    )
    .catalog(catalog(&[bestiary.clone()]))
    .build();

    let index = session.load_packs(LoadOptions::default()).await.unwrap();
    assert_eq!(index.len(), 3);
    assert_eq!(bestiary.fetches(), 1);
}

#[tokio::test]
async fn explicit_pack_list_overrides_config() {
    let bestiary = bestiary();
    let other = CountingPack::new("other", "Other", vec![creature("Actor.imp", "Imp", -1, "LE")]);
    let session = SummonsSession::builder(config(&["pf2e.bestiary"]), RulesetId::PF2E)
        .catalog(catalog(&[bestiary.clone(), other.clone()]))
        .build();

    let index = session
        .load_packs(LoadOptions::default().with_packs(vec![PackDescriptor::new("other")]))
        .await
        .unwrap();

    assert_eq!(names(&index), vec!["Imp"]);
    assert_eq!(bestiary.fetches(), 0);
}

#[tokio::test]
async fn unresolvable_pack_is_skipped() {
    let bestiary = bestiary();
    let session = SummonsSession::builder(config(&["missing.pack", "pf2e.bestiary"]), RulesetId::PF2E)
        .catalog(catalog(&[bestiary]))
        .build();

    let index = session.load_packs(LoadOptions::default()).await.unwrap();
    assert_eq!(index.len(), 3);
}

#[tokio::test]
async fn no_sources_yields_empty_index() {
    let session = SummonsSession::builder(config(&[]), RulesetId::PF2E).build();
    let index = session.load_packs(LoadOptions::default()).await.unwrap();
    assert!(index.is_empty());
}

#[tokio::test]
async fn failing_source_aborts_the_load() {
    let mut catalog = MemoryCatalog::new();
    catalog.insert(Arc::new(BrokenPack {
        id: "broken".to_string(),
    }));
    let notifier = Arc::new(RecordingNotifier::default());
    let session = SummonsSession::builder(config(&["broken"]), RulesetId::PF2E)
        .catalog(Arc::new(catalog))
        .notifier(notifier.clone())
        .build();

    let err = session.load_packs(LoadOptions::default()).await.unwrap_err();
    assert!(matches!(err, IndexError::Source { ref pack, .. } if pack == "broken"));
    assert!(session.cached_index().await.is_none());
    assert_eq!(
        notifier.errors(),
        vec!["Hazard Foundry Summons | Could not read the index of broken".to_string()]
    );
}

// ── Invalid entries ──────────────────────────────────────────────

#[tokio::test]
async fn invalid_entries_are_reported_and_excluded() {
    let pack = CountingPack::new(
        "p",
        "P",
        vec![
            entry(json!({ "uuid": "u1", "name": "Wolf" })),
            entry(json!({ "uuid": "u2" })),
            entry(json!({ "name": "Nameless uuid" })),
            entry(json!({ "img": "only.webp" })),
            entry(json!({ "uuid": "u3", "name": "Odd", "id": { "k": 1 } })),
        ],
    );
    let notifier = Arc::new(RecordingNotifier::default());
    let session = SummonsSession::builder(config(&["p"]), RulesetId::DND5E)
        .catalog(catalog(&[pack]))
        .notifier(notifier.clone())
        .build();

    let index = session.load_packs(LoadOptions::default()).await.unwrap();

    assert_eq!(names(&index), vec!["Wolf"]);
    let missing_name =
        "Hazard Foundry Summons | Error loading pack index. An entry is missing a name!";
    let missing_uuid =
        "Hazard Foundry Summons | Error loading pack index. An entry is missing a uuid!";
    assert_eq!(
        notifier.errors(),
        vec![
            missing_name.to_string(),
            missing_uuid.to_string(),
            missing_name.to_string(),
            missing_uuid.to_string(),
            "Hazard Foundry Summons | index entry field 'id' is invalid: expected a string or number, got {\"k\":1}".to_string(),
        ]
    );
}

// ── Caching ──────────────────────────────────────────────────────

#[tokio::test]
async fn second_load_is_served_from_cache() {
    let bestiary = bestiary();
    let session = SummonsSession::builder(config(&["pf2e.bestiary"]), RulesetId::PF2E)
        .catalog(catalog(&[bestiary.clone()]))
        .build();

    let first = session.load_packs(LoadOptions::default()).await.unwrap();
    let second = session.load_packs(LoadOptions::default()).await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(bestiary.fetches(), 1);
}

#[tokio::test]
async fn without_reload_index_the_first_result_is_kept() {
    let bestiary = bestiary();
    let session = SummonsSession::builder(config(&["pf2e.bestiary"]), RulesetId::PF2E)
        .catalog(catalog(&[bestiary.clone()]))
        .build();
    let options = LoadOptions::default().with_reload_index(false);

    let first = session.load_packs(options.clone()).await.unwrap();
    let second = session.load_packs(options).await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(bestiary.fetches(), 1);
}

#[tokio::test]
async fn refresh_without_reload_index_leaves_cache_alone() {
    let bestiary = bestiary();
    let session = SummonsSession::builder(config(&["pf2e.bestiary"]), RulesetId::PF2E)
        .catalog(catalog(&[bestiary.clone()]))
        .build();

    let cached = session.load_packs(LoadOptions::default()).await.unwrap();
    let fresh = session
        .load_packs(
            LoadOptions::default()
                .with_refresh(true)
                .with_reload_index(false),
        )
        .await
        .unwrap();

    assert_eq!(bestiary.fetches(), 2);
    assert!(!Arc::ptr_eq(&cached, &fresh));
    let still_cached = session.cached_index().await.unwrap();
    assert!(Arc::ptr_eq(&cached, &still_cached));
}

#[tokio::test]
async fn refresh_recomputes_and_replaces_cache() {
    let bestiary = bestiary();
    let session = SummonsSession::builder(config(&["pf2e.bestiary"]), RulesetId::PF2E)
        .catalog(catalog(&[bestiary.clone()]))
        .build();

    let first = session.load_packs(LoadOptions::default()).await.unwrap();
    let refreshed = session.refresh().await.unwrap();

    assert_eq!(bestiary.fetches(), 2);
    assert!(!Arc::ptr_eq(&first, &refreshed));
    assert_eq!(*first, *refreshed);
    assert!(Arc::ptr_eq(&refreshed, &session.cached_index().await.unwrap()));
}

#[tokio::test]
async fn empty_cache_is_not_served() {
    let empty = CountingPack::new("empty", "Empty", vec![]);
    let session = SummonsSession::builder(config(&["empty"]), RulesetId::PF2E)
        .catalog(catalog(&[empty.clone()]))
        .build();

    session.load_packs(LoadOptions::default()).await.unwrap();
    session.load_packs(LoadOptions::default()).await.unwrap();
    assert_eq!(empty.fetches(), 2);
}

#[tokio::test]
async fn clear_cache_forces_a_reload() {
    let bestiary = bestiary();
    let session = SummonsSession::builder(config(&["pf2e.bestiary"]), RulesetId::PF2E)
        .catalog(catalog(&[bestiary.clone()]))
        .build();

    session.load_packs(LoadOptions::default()).await.unwrap();
    session.clear_cache().await;
    assert!(session.cached_index().await.is_none());

    session.load_packs(LoadOptions::default()).await.unwrap();
    assert_eq!(bestiary.fetches(), 2);
}

// ── Enrichment ───────────────────────────────────────────────────

#[tokio::test]
async fn active_ruleset_enricher_runs() {
    let session = SummonsSession::builder(config(&["pf2e.bestiary"]), RulesetId::PF2E)
        .catalog(catalog(&[bestiary()]))
        .enricher(Arc::new(Pf2eEnricher::new(
            Arc::new(StaticArt::default()),
            "icons/svg/mystery-man.svg",
        )))
        .build();

    let index = session.load_packs(LoadOptions::default()).await.unwrap();
    let angel = index.iter().find(|w| w.name() == "Angel").unwrap();
    assert_eq!(angel.traits(), vec!["beast", "lawful", "good"]);
}

#[tokio::test]
async fn other_ruleset_enricher_is_ignored() {
    let session = SummonsSession::builder(config(&["pf2e.bestiary"]), RulesetId::DND5E)
        .catalog(catalog(&[bestiary()]))
        .enricher(Arc::new(Pf2eEnricher::new(Arc::new(FailingArt), "placeholder.svg")))
        .build();

    let index = session.load_packs(LoadOptions::default()).await.unwrap();
    let angel = index.iter().find(|w| w.name() == "Angel").unwrap();
    assert_eq!(angel.traits(), vec!["beast"]);
}

#[tokio::test]
async fn enrichment_failure_propagates() {
    let session = SummonsSession::builder(config(&["pf2e.bestiary"]), RulesetId::PF2E)
        .catalog(catalog(&[bestiary()]))
        .enricher(Arc::new(Pf2eEnricher::new(Arc::new(FailingArt), "placeholder.svg")))
        .build();

    let err = session.load_packs(LoadOptions::default()).await.unwrap_err();
    assert!(matches!(err, IndexError::Enrichment { .. }));
}

// ── Progress ─────────────────────────────────────────────────────

#[tokio::test]
async fn progress_steps_follow_deduplicated_packs() {
    let progress = Arc::new(RecordingProgress::default());
    let a = CountingPack::new("a", "Pack A", vec![creature("Actor.a", "A", 1, "N")]);
    let b = CountingPack::new("b", "Pack B", vec![creature("Actor.b", "B", 1, "N")]);
    let session = SummonsSession::builder(config(&["a", "b", "a"]), RulesetId::PF2E)
        .catalog(catalog(&[a, b]))
        .progress_display(progress.clone())
        .build();

    session.load_packs(LoadOptions::default()).await.unwrap();

    assert_eq!(
        progress.updates(),
        vec![
            ("Loading Pack A".to_string(), 0),
            ("Loading Pack B".to_string(), 50),
            ("Loading complete".to_string(), 100),
        ]
    );
}

// ── Extensions ───────────────────────────────────────────────────

struct SummonerWrapper;

#[async_trait]
impl WrapperClass for SummonerWrapper {
    fn doc_type(&self) -> &str {
        "SummonerWrapper"
    }

    fn on_wrap(&self, wrapper: &mut DocWrapper) {
        wrapper.set_field("summoner", json!(true));
    }
}

struct HomebrewExtension {
    pack: Arc<CountingPack>,
}

impl SummonsExtension for HomebrewExtension {
    fn register_wrapper_classes(&self, registry: &mut WrapperRegistry) {
        registry.register(Arc::new(SummonerWrapper));
    }

    fn register_custom_packs(&self, packs: &mut CustomPacks) {
        packs.register(self.pack.clone());
    }

    fn register_columns(&self, columns: &mut ColumnRegistryBuilder) {
        columns.push(
            RulesetId::PF2E,
            ColumnDefinition::pointer("Summoner", "/summoner"),
        );
    }

    fn on_loading_packs(&self, index: &mut Vec<DocWrapper>) {
        index.retain(|w| w.name() != "Bear");
    }
}

#[tokio::test]
async fn extensions_register_and_post_process() {
    let homebrew = CountingPack::new(
        "homebrew",
        "Homebrew",
        vec![entry(json!({
            "uuid": "Actor.familiar",
            "name": "Familiar",
            "docType": "SummonerWrapper",
        }))],
    );
    let session = SummonsSession::builder(config(&["pf2e.bestiary", "homebrew"]), RulesetId::PF2E)
        .catalog(catalog(&[bestiary()]))
        .extension(Arc::new(HomebrewExtension {
            pack: homebrew.clone(),
        }))
        .build();

    assert!(session.wrappers().contains("SummonerWrapper"));
    assert_eq!(session.custom_packs().len(), 1);
    let column_names: Vec<&str> = session.columns().iter().map(|c| c.name()).collect();
    assert_eq!(column_names, vec!["Name", "Level", "Summoner"]);

    let index = session.load_packs(LoadOptions::default()).await.unwrap();
    assert_eq!(names(&index), vec!["Wolf", "Angel", "Familiar"]);

    let familiar = &index[2];
    assert_eq!(familiar.doc_type(), "SummonerWrapper");
    assert_eq!(familiar.pointer("/summoner"), Some(&json!(true)));
    assert_eq!(homebrew.fetches(), 1);
}

#[tokio::test]
async fn custom_pack_shadows_catalog_pack() {
    let catalog_pack = bestiary();
    let shadow = CountingPack::new(
        "pf2e.bestiary",
        "Shadow",
        vec![creature("Actor.shadow", "Shadow", 3, "CE")],
    );
    let session = SummonsSession::builder(config(&["pf2e.bestiary"]), RulesetId::PF2E)
        .catalog(catalog(&[catalog_pack.clone()]))
        .extension(Arc::new(HomebrewExtension {
            pack: shadow.clone(),
        }))
        .build();

    let index = session.load_packs(LoadOptions::default()).await.unwrap();
    assert_eq!(names(&index), vec!["Shadow"]);
    assert_eq!(catalog_pack.fetches(), 0);
}

// ── Sorting ──────────────────────────────────────────────────────

#[tokio::test]
async fn sorted_orders_cached_index_by_column() {
    let session = SummonsSession::builder(config(&["pf2e.bestiary"]), RulesetId::PF2E)
        .catalog(catalog(&[bestiary()]))
        .build();
    session.load_packs(LoadOptions::default()).await.unwrap();

    let by_level = session.sorted(1, true).await.unwrap();
    assert_eq!(names(&by_level), vec!["Angel", "Bear", "Wolf"]);

    let by_name = session.sorted(0, false).await.unwrap();
    assert_eq!(names(&by_name), vec!["Angel", "Bear", "Wolf"]);

    assert!(session.sorted(7, false).await.is_none());
}

#[tokio::test]
async fn sorted_without_index_is_empty() {
    let session = SummonsSession::builder(config(&[]), RulesetId::DND5E).build();
    let rows = session.sorted(0, false).await.unwrap();
    assert!(rows.is_empty());
}
