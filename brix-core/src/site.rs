use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type SiteId = u64;
pub type UserId = u64;

/// Page-wide style defaults. Blocks override these per attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteStyle {
    pub background_color: String,
    pub text_color: String,
    pub font_family: String,
}

impl Default for SiteStyle {
    fn default() -> Self {
        Self {
            background_color: "#ffffff".to_string(),
            text_color: "#000000".to_string(),
            font_family: "Arial, sans-serif".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub show: bool,
    pub logo_url: Option<String>,
    pub company_name: String,
    pub background_color: String,
    pub text_color: String,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            show: true,
            logo_url: None,
            company_name: String::new(),
            background_color: "#ffffff".to_string(),
            text_color: "#000000".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterConfig {
    pub show: bool,
    /// Raw markup, rendered as-is.
    pub content: String,
    pub background_color: String,
    pub text_color: String,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            show: true,
            content: "<p>© 2024 My site</p>".to_string(),
            background_color: "#f3f4f6".to_string(),
            text_color: "#000000".to_string(),
        }
    }
}

/// The page-level container owning an ordered set of blocks plus
/// header/footer chrome and global style. The owner is fixed at
/// creation; everything else changes through [`Site::apply_settings`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    pub id: SiteId,
    pub title: String,
    pub description: String,
    pub owner: UserId,
    pub style: SiteStyle,
    pub header: HeaderConfig,
    pub footer: FooterConfig,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Site {
    pub(crate) fn new(id: SiteId, owner: UserId, title: &str) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: title.to_string(),
            description: String::new(),
            owner,
            style: SiteStyle::default(),
            header: HeaderConfig::default(),
            footer: FooterConfig::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Full-field update: every mutable field is replaced wholesale.
    /// Identity, owner, and created_at are untouchable.
    pub fn apply_settings(&mut self, settings: SiteSettings) {
        self.title = settings.title;
        self.description = settings.description;
        self.style = settings.style;
        self.header = settings.header;
        self.footer = settings.footer;
        self.updated_at = Utc::now();
    }
}

/// The mutable half of a [`Site`], used for full-field updates and as
/// the site section of a site document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    pub title: String,
    pub description: String,
    pub style: SiteStyle,
    pub header: HeaderConfig,
    pub footer: FooterConfig,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            title: "My site".to_string(),
            description: String::new(),
            style: SiteStyle::default(),
            header: HeaderConfig::default(),
            footer: FooterConfig::default(),
        }
    }
}
