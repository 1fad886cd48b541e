use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Value};

use crate::block::{Block, BlockId};
use crate::schema::BlockType;
use crate::site::{Site, SiteId, UserId};

#[derive(Debug)]
pub enum StoreError {
    SiteNotFound(SiteId),
    BlockNotFound(BlockId),
    /// The operation targets a record not owned by the requesting
    /// principal. Never silently redirected.
    Denied,
    InvalidPayload(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::SiteNotFound(id) => write!(f, "site {} not found", id),
            StoreError::BlockNotFound(id) => write!(f, "block {} not found", id),
            StoreError::Denied => write!(f, "access denied"),
            StoreError::InvalidPayload(reason) => write!(f, "invalid block payload: {}", reason),
        }
    }
}

impl std::error::Error for StoreError {}

/// In-memory object store over site and block records. Ids are
/// assigned sequentially, so iterating the id-keyed maps walks records
/// in insertion order — the stable tiebreak the ordering layer relies
/// on. Per-record last-write-wins, no transactions.
#[derive(Debug)]
pub struct MemoryStore {
    sites: BTreeMap<SiteId, Site>,
    blocks: BTreeMap<BlockId, Block>,
    next_site_id: SiteId,
    next_block_id: BlockId,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            sites: BTreeMap::new(),
            blocks: BTreeMap::new(),
            next_site_id: 1,
            next_block_id: 1,
        }
    }

    pub fn create_site(&mut self, owner: UserId, title: &str) -> &Site {
        let id = self.next_site_id;
        self.next_site_id += 1;
        self.sites.insert(id, Site::new(id, owner, title));
        &self.sites[&id]
    }

    pub fn site(&self, id: SiteId) -> Result<&Site, StoreError> {
        self.sites.get(&id).ok_or(StoreError::SiteNotFound(id))
    }

    pub fn site_mut(&mut self, id: SiteId) -> Result<&mut Site, StoreError> {
        self.sites.get_mut(&id).ok_or(StoreError::SiteNotFound(id))
    }

    /// Deletes a site and cascades to every block it owns.
    pub fn delete_site(&mut self, id: SiteId) -> Result<(), StoreError> {
        if self.sites.remove(&id).is_none() {
            return Err(StoreError::SiteNotFound(id));
        }
        self.blocks.retain(|_, block| block.site_id != id);
        Ok(())
    }

    pub fn sites_of(&self, owner: UserId) -> Vec<&Site> {
        self.sites
            .values()
            .filter(|site| site.owner == owner)
            .collect()
    }

    pub fn insert_block(
        &mut self,
        site_id: SiteId,
        block_type: BlockType,
        order: i64,
        config: Map<String, Value>,
    ) -> &Block {
        let id = self.next_block_id;
        self.next_block_id += 1;
        self.blocks
            .insert(id, Block::new(id, site_id, block_type, order, config));
        &self.blocks[&id]
    }

    pub fn block(&self, id: BlockId) -> Result<&Block, StoreError> {
        self.blocks.get(&id).ok_or(StoreError::BlockNotFound(id))
    }

    pub fn block_mut(&mut self, id: BlockId) -> Result<&mut Block, StoreError> {
        self.blocks
            .get_mut(&id)
            .ok_or(StoreError::BlockNotFound(id))
    }

    pub fn delete_block(&mut self, id: BlockId) -> Result<(), StoreError> {
        self.blocks
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::BlockNotFound(id))
    }

    /// All blocks of a site, in insertion order.
    pub fn blocks_of(&self, site_id: SiteId) -> impl Iterator<Item = &Block> {
        self.blocks
            .values()
            .filter(move |block| block.site_id == site_id)
    }

    pub fn max_order(&self, site_id: SiteId) -> Option<i64> {
        self.blocks_of(site_id).map(|block| block.order).max()
    }
}

/// Boundary contract for binary asset storage: accept an uploaded
/// binary, hand back a stable URL. Records store only that URL.
pub trait AssetStore {
    fn put(&mut self, name: &str, bytes: &[u8]) -> String;
}

/// Test and demo asset store keeping uploads in memory and minting
/// sequential URLs under a fixed base.
#[derive(Debug)]
pub struct MemoryAssets {
    base_url: String,
    uploads: Vec<(String, Vec<u8>)>,
}

impl MemoryAssets {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            uploads: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.uploads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uploads.is_empty()
    }
}

impl AssetStore for MemoryAssets {
    fn put(&mut self, name: &str, bytes: &[u8]) -> String {
        let url = format!("{}/{}-{}", self.base_url, self.uploads.len() + 1, name);
        self.uploads.push((url.clone(), bytes.to_vec()));
        url
    }
}
