use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::schema::{BlockConfig, BlockType, defaults_for};
use crate::site::SiteId;

pub type BlockId = u64;

/// Per-block style attributes. Each one overrides the site default
/// when present; colors start out unset, spacing gets the model
/// defaults from day one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockStyle {
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub padding: Option<String>,
    pub margin: Option<String>,
}

impl Default for BlockStyle {
    fn default() -> Self {
        Self {
            background_color: None,
            text_color: None,
            padding: Some("20px".to_string()),
            margin: Some("0".to_string()),
        }
    }
}

/// One content unit placed on a site. The configuration payload is an
/// open, type-dependent mapping; this entity treats it as opaque and
/// only merges defaults over it on read. Type and identity are fixed
/// at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub site_id: SiteId,
    pub block_type: BlockType,
    /// Relative position only; not necessarily contiguous or unique.
    pub order: i64,
    pub active: bool,
    pub config: Map<String, Value>,
    pub style: BlockStyle,
    /// URL of a bound image asset. Takes precedence over a configured
    /// `url` when rendering image blocks.
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Block {
    pub(crate) fn new(
        id: BlockId,
        site_id: SiteId,
        block_type: BlockType,
        order: i64,
        config: Map<String, Value>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            site_id,
            block_type,
            order,
            active: true,
            config,
            style: BlockStyle::default(),
            image_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Type defaults overlaid with the stored payload, payload winning
    /// per key. Leaves the stored payload untouched; resolving twice
    /// gives the same mapping as resolving once.
    pub fn resolved_config(&self) -> Map<String, Value> {
        let mut merged = defaults_for(&self.block_type);
        for (key, value) in &self.config {
            merged.insert(key.clone(), value.clone());
        }
        merged
    }

    /// The resolved configuration as its typed per-type variant.
    pub fn typed_config(&self) -> BlockConfig {
        BlockConfig::resolve(&self.block_type, &self.resolved_config())
    }

    /// Partial update: only fields present in the patch change. Type
    /// and identity are never alterable here.
    pub fn apply_patch(&mut self, patch: &BlockPatch) {
        if let Some(config) = &patch.config {
            self.config = config.clone();
        }
        if let Some(order) = patch.order {
            self.order = order;
        }
        if let Some(active) = patch.active {
            self.active = active;
        }
        if let Some(color) = &patch.background_color {
            self.style.background_color = Some(color.clone());
        }
        if let Some(color) = &patch.text_color {
            self.style.text_color = Some(color.clone());
        }
        if let Some(padding) = &patch.padding {
            self.style.padding = Some(padding.clone());
        }
        if let Some(margin) = &patch.margin {
            self.style.margin = Some(margin.clone());
        }
        if let Some(url) = &patch.image_url {
            self.image_url = Some(url.clone());
        }
        self.updated_at = Utc::now();
    }
}

/// Partial-update document for a block. Absent fields leave the
/// corresponding attribute untouched; unknown fields in the source
/// document are ignored on deserialization, not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockPatch {
    pub config: Option<Map<String, Value>>,
    pub order: Option<i64>,
    pub active: Option<bool>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub padding: Option<String>,
    pub margin: Option<String>,
    pub image_url: Option<String>,
}
