//! Module art lookup (token bestiaries and similar art packs).

use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::IndexResult;

/// A ruleset's art registry: maps entry uuids to replacement artwork.
#[async_trait]
pub trait ArtService: Send + Sync {
    /// Rebuilds the uuid → image map. Awaited before every pack is enriched.
    async fn refresh(&self) -> IndexResult<()>;

    /// Replacement image for an entry, if any module provides one.
    fn image_for(&self, uuid: &str) -> Option<String>;
}

/// Fixed uuid → image map.
#[derive(Debug, Clone, Default)]
pub struct StaticArt {
    images: HashMap<String, String>,
}

impl StaticArt {
    pub fn new(images: HashMap<String, String>) -> Self {
        Self { images }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[async_trait]
impl ArtService for StaticArt {
    async fn refresh(&self) -> IndexResult<()> {
        Ok(())
    }

    fn image_for(&self, uuid: &str) -> Option<String> {
        self.images.get(uuid).cloned()
    }
}
