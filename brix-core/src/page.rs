//! The ordering manager: owner-checked CRUD over sites and blocks,
//! append-at-next-order insertion, bulk reorder, and the active,
//! ordered block listing the assembly layer renders from.
//!
//! Every mutating operation takes the requesting principal explicitly;
//! there is no ambient session state.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::block::{Block, BlockId, BlockPatch};
use crate::schema::BlockType;
use crate::site::{Site, SiteId, SiteSettings, UserId};
use crate::store::{MemoryStore, StoreError};

/// One entry of a bulk reorder request. Order values are arbitrary
/// integers interpreted only by relative comparison.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReorderEntry {
    pub id: BlockId,
    pub order: i64,
}

#[derive(Debug, Default)]
pub struct PageManager {
    store: MemoryStore,
}

impl PageManager {
    pub fn new() -> Self {
        Self {
            store: MemoryStore::new(),
        }
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    pub fn create_site(&mut self, owner: UserId, title: &str) -> Site {
        self.store.create_site(owner, title).clone()
    }

    pub fn site(&self, site_id: SiteId) -> Result<&Site, StoreError> {
        self.store.site(site_id)
    }

    pub fn sites_of(&self, owner: UserId) -> Vec<&Site> {
        self.store.sites_of(owner)
    }

    pub fn update_site(
        &mut self,
        principal: UserId,
        site_id: SiteId,
        settings: SiteSettings,
    ) -> Result<&Site, StoreError> {
        self.check_owner(principal, site_id)?;
        let site = self.store.site_mut(site_id)?;
        site.apply_settings(settings);
        Ok(site)
    }

    pub fn delete_site(&mut self, principal: UserId, site_id: SiteId) -> Result<(), StoreError> {
        self.check_owner(principal, site_id)?;
        self.store.delete_site(site_id)
    }

    /// Appends a block at the end of the site: order is one past the
    /// current maximum, or 1 on an empty site. The initial
    /// configuration must be a JSON object (or null for empty).
    pub fn append(
        &mut self,
        principal: UserId,
        site_id: SiteId,
        block_type: BlockType,
        initial_config: Value,
    ) -> Result<Block, StoreError> {
        self.check_owner(principal, site_id)?;
        let config = into_config_map(initial_config)?;
        let order = self.store.max_order(site_id).map_or(1, |max| max + 1);
        Ok(self
            .store
            .insert_block(site_id, block_type, order, config)
            .clone())
    }

    pub fn get_block(&self, block_id: BlockId) -> Result<&Block, StoreError> {
        self.store.block(block_id)
    }

    /// Partial update; returns the updated block.
    pub fn update_block(
        &mut self,
        principal: UserId,
        block_id: BlockId,
        patch: &BlockPatch,
    ) -> Result<Block, StoreError> {
        let site_id = self.store.block(block_id)?.site_id;
        self.check_owner(principal, site_id)?;
        let block = self.store.block_mut(block_id)?;
        block.apply_patch(patch);
        Ok(block.clone())
    }

    pub fn delete_block(&mut self, principal: UserId, block_id: BlockId) -> Result<(), StoreError> {
        let site_id = self.store.block(block_id)?.site_id;
        self.check_owner(principal, site_id)?;
        self.store.delete_block(block_id)
    }

    /// Records an uploaded asset's URL on the block. Rendering gives
    /// the bound URL precedence over any configured one.
    pub fn bind_image(
        &mut self,
        principal: UserId,
        block_id: BlockId,
        url: &str,
    ) -> Result<(), StoreError> {
        let site_id = self.store.block(block_id)?.site_id;
        self.check_owner(principal, site_id)?;
        let block = self.store.block_mut(block_id)?;
        block.image_url = Some(url.to_string());
        block.updated_at = chrono::Utc::now();
        Ok(())
    }

    /// Appends an uploaded image's URL to a slider block's `images`
    /// list, creating the list if the payload has none yet.
    pub fn push_slider_image(
        &mut self,
        principal: UserId,
        block_id: BlockId,
        url: &str,
    ) -> Result<(), StoreError> {
        let site_id = self.store.block(block_id)?.site_id;
        self.check_owner(principal, site_id)?;
        let block = self.store.block_mut(block_id)?;

        let images = block
            .config
            .entry("images".to_string())
            .or_insert_with(|| json!([]));
        match images {
            Value::Array(list) => list.push(json!(url)),
            other => *other = json!([url]),
        }
        block.updated_at = chrono::Utc::now();
        Ok(())
    }

    /// Applies a caller-supplied permutation. Per-pair: entries whose
    /// block is missing or belongs to another site are skipped, the
    /// rest are applied. No atomicity across entries; returns how many
    /// were applied.
    pub fn reorder(
        &mut self,
        principal: UserId,
        site_id: SiteId,
        entries: &[ReorderEntry],
    ) -> Result<usize, StoreError> {
        self.check_owner(principal, site_id)?;

        let mut applied = 0;
        for entry in entries {
            match self.store.block_mut(entry.id) {
                Ok(block) if block.site_id == site_id => {
                    block.order = entry.order;
                    block.updated_at = chrono::Utc::now();
                    applied += 1;
                }
                Ok(_) => {
                    debug!(block = entry.id, "reorder: block belongs to another site, skipping");
                }
                Err(_) => {
                    debug!(block = entry.id, "reorder: no such block, skipping");
                }
            }
        }
        Ok(applied)
    }

    /// Active blocks of the site, sorted ascending by order. The sort
    /// is stable, so equal orders keep insertion order.
    pub fn active_ordered(&self, site_id: SiteId) -> Result<Vec<Block>, StoreError> {
        self.store.site(site_id)?;
        let mut blocks: Vec<Block> = self
            .store
            .blocks_of(site_id)
            .filter(|block| block.active)
            .cloned()
            .collect();
        blocks.sort_by_key(|block| block.order);
        Ok(blocks)
    }

    fn check_owner(&self, principal: UserId, site_id: SiteId) -> Result<(), StoreError> {
        let site = self.store.site(site_id)?;
        if site.owner != principal {
            return Err(StoreError::Denied);
        }
        Ok(())
    }
}

fn into_config_map(value: Value) -> Result<Map<String, Value>, StoreError> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(StoreError::InvalidPayload(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
