//! The site document: the JSON wire format the CLI reads, describing a
//! site and its blocks in one file.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::block::BlockPatch;
use crate::page::PageManager;
use crate::schema::BlockType;
use crate::site::{SiteId, SiteSettings, UserId};
use crate::store::StoreError;

#[derive(Debug)]
pub enum DocumentError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Store(StoreError),
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::Io(e) => write!(f, "IO error: {}", e),
            DocumentError::Parse(e) => write!(f, "JSON parse error: {}", e),
            DocumentError::Store(e) => write!(f, "Store error: {}", e),
        }
    }
}

impl std::error::Error for DocumentError {}

impl From<std::io::Error> for DocumentError {
    fn from(value: std::io::Error) -> Self {
        DocumentError::Io(value)
    }
}

impl From<serde_json::Error> for DocumentError {
    fn from(value: serde_json::Error) -> Self {
        DocumentError::Parse(value)
    }
}

impl From<StoreError> for DocumentError {
    fn from(value: StoreError) -> Self {
        DocumentError::Store(value)
    }
}

/// One block as written in a site document. Only the type is required;
/// order defaults to file position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockSpec {
    #[serde(rename = "type")]
    pub block_type: BlockType,
    #[serde(default)]
    pub config: Map<String, Value>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub order: Option<i64>,
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default)]
    pub text_color: Option<String>,
    #[serde(default)]
    pub padding: Option<String>,
    #[serde(default)]
    pub margin: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteDocument {
    #[serde(default)]
    pub site: SiteSettings,
    #[serde(default)]
    pub blocks: Vec<BlockSpec>,
}

impl SiteDocument {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, DocumentError> {
        let data = std::fs::read_to_string(path)?;
        Self::parse(&data)
    }

    pub fn parse(data: &str) -> Result<Self, DocumentError> {
        let document: SiteDocument = serde_json::from_str(data)?;
        Ok(document)
    }

    /// Loads the document into a fresh manager under the given owner.
    /// Blocks get appended in file order unless a spec carries an
    /// explicit order.
    pub fn into_manager(self, owner: UserId) -> Result<(PageManager, SiteId), DocumentError> {
        let mut manager = PageManager::new();
        let site_id = manager.create_site(owner, &self.site.title).id;
        manager.update_site(owner, site_id, self.site)?;

        for spec in self.blocks {
            let block = manager.append(
                owner,
                site_id,
                spec.block_type,
                Value::Object(spec.config),
            )?;

            let patch = BlockPatch {
                config: None,
                order: spec.order,
                active: spec.active,
                background_color: spec.background_color,
                text_color: spec.text_color,
                padding: spec.padding,
                margin: spec.margin,
                image_url: spec.image_url,
            };
            manager.update_block(owner, block.id, &patch)?;
        }

        Ok((manager, site_id))
    }
}
