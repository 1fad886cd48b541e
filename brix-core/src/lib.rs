pub mod assemble;
pub mod block;
pub mod document;
pub mod page;
pub mod render;
pub mod schema;
pub mod site;
pub mod store;

// Re-export main types
pub use block::{Block, BlockId, BlockPatch, BlockStyle};
pub use document::{BlockSpec, DocumentError, SiteDocument};
pub use page::{PageManager, ReorderEntry};
pub use render::render;
pub use schema::{BlockConfig, BlockType, defaults_for};
pub use site::{FooterConfig, HeaderConfig, Site, SiteId, SiteSettings, SiteStyle, UserId};
pub use store::{AssetStore, MemoryAssets, MemoryStore, StoreError};
