use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value, json};

/// The closed set of block types. Values outside the set (written by a
/// newer schema version, or plain bad data) deserialize to `Unknown`
/// instead of failing, so stored pages always load.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlockType {
    Text,
    Heading,
    Image,
    Video,
    Button,
    Slider,
    Section,
    Unknown(String),
}

impl BlockType {
    pub fn from_name(name: &str) -> Self {
        match name {
            "text" => BlockType::Text,
            "heading" => BlockType::Heading,
            "image" => BlockType::Image,
            "video" => BlockType::Video,
            "button" => BlockType::Button,
            "slider" => BlockType::Slider,
            "section" => BlockType::Section,
            other => BlockType::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BlockType::Text => "text",
            BlockType::Heading => "heading",
            BlockType::Image => "image",
            BlockType::Video => "video",
            BlockType::Button => "button",
            BlockType::Slider => "slider",
            BlockType::Section => "section",
            BlockType::Unknown(name) => name,
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for BlockType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BlockType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(BlockType::from_name(&name))
    }
}

/// Default configuration for a block type. Total over the type set:
/// unknown types get an empty mapping, never an error.
pub fn defaults_for(block_type: &BlockType) -> Map<String, Value> {
    let defaults = match block_type {
        BlockType::Text => json!({"content": "Block text", "size": "16px", "align": "left"}),
        BlockType::Heading => json!({"content": "Heading", "level": "h1", "align": "left"}),
        BlockType::Image => json!({"url": "", "alt": "Image", "width": "100%", "height": "auto"}),
        BlockType::Video => json!({"url": "", "width": "100%", "height": "400px", "autoplay": false}),
        BlockType::Button => json!({"text": "Button", "link": "#", "style": "primary", "align": "left"}),
        BlockType::Slider => json!({"images": [], "autoplay": true, "interval": 3000}),
        BlockType::Section => json!({"content": "", "columns": 1}),
        BlockType::Unknown(_) => json!({}),
    };

    match defaults {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// A width/height value: either a raw CSS string used verbatim, or a
/// bare number coerced to pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum Dimension {
    Px(f64),
    Raw(String),
}

impl Dimension {
    fn read(map: &Map<String, Value>, key: &str, fallback: &str) -> Self {
        match map.get(key) {
            Some(v) if v.is_number() => Dimension::Px(v.as_f64().unwrap_or(0.0)),
            Some(Value::String(s)) => Dimension::Raw(s.clone()),
            _ => Dimension::Raw(fallback.to_string()),
        }
    }

    pub fn css(&self) -> String {
        match self {
            Dimension::Px(n) if n.fract() == 0.0 => format!("{}px", *n as i64),
            Dimension::Px(n) => format!("{}px", n),
            Dimension::Raw(s) => s.clone(),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.css())
    }
}

/// Named color preset for buttons. Unrecognized names fall back to
/// `Primary` rather than erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Primary,
    Secondary,
    Success,
    Danger,
}

impl ButtonStyle {
    pub fn from_name(name: &str) -> Self {
        match name {
            "secondary" => ButtonStyle::Secondary,
            "success" => ButtonStyle::Success,
            "danger" => ButtonStyle::Danger,
            _ => ButtonStyle::Primary,
        }
    }

    pub fn css(&self) -> &'static str {
        match self {
            ButtonStyle::Primary => {
                "background: linear-gradient(135deg, #8b5cf6 0%, #7c3aed 100%); color: white;"
            }
            ButtonStyle::Secondary => "background: #e5e7eb; color: #374151;",
            ButtonStyle::Success => "background: #10b981; color: white;",
            ButtonStyle::Danger => "background: #ef4444; color: white;",
        }
    }
}

/// Named size preset for buttons, resolved independently of the color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonSize {
    Small,
    Medium,
    Large,
}

impl ButtonSize {
    pub fn from_name(name: &str) -> Self {
        match name {
            "small" => ButtonSize::Small,
            "large" => ButtonSize::Large,
            _ => ButtonSize::Medium,
        }
    }

    pub fn css(&self) -> &'static str {
        match self {
            ButtonSize::Small => "padding: 0.5rem 1rem; font-size: 0.875rem;",
            ButtonSize::Medium => "padding: 0.75rem 1.5rem; font-size: 1rem;",
            ButtonSize::Large => "padding: 1rem 2rem; font-size: 1.125rem;",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextConfig {
    pub content: String,
    pub size: String,
    pub align: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeadingConfig {
    pub content: String,
    pub level: String,
    pub align: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageConfig {
    pub url: String,
    pub alt: String,
    pub width: Dimension,
    pub height: Dimension,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VideoConfig {
    pub url: String,
    pub width: Dimension,
    pub height: Dimension,
    pub autoplay: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ButtonConfig {
    pub text: String,
    pub link: String,
    pub style: ButtonStyle,
    pub align: String,
    pub bg_color: Option<String>,
    pub text_color: Option<String>,
    pub size: ButtonSize,
    pub border_radius: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SliderConfig {
    pub images: Vec<String>,
    pub autoplay: bool,
    pub interval: u64,
    pub width: Dimension,
    pub height: Dimension,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionConfig {
    pub content: String,
    pub columns: u32,
}

/// A block's resolved configuration as a typed variant, one per block
/// type. Built by forgiving extraction from the merged defaults+payload
/// mapping: wrong-typed values fall back to the type default, unknown
/// keys are ignored. Total over all payloads.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockConfig {
    Text(TextConfig),
    Heading(HeadingConfig),
    Image(ImageConfig),
    Video(VideoConfig),
    Button(ButtonConfig),
    Slider(SliderConfig),
    Section(SectionConfig),
    Unknown(String),
}

impl BlockConfig {
    pub fn resolve(block_type: &BlockType, resolved: &Map<String, Value>) -> Self {
        match block_type {
            BlockType::Text => BlockConfig::Text(TextConfig {
                content: str_field(resolved, "content", "Block text"),
                size: str_field(resolved, "size", "16px"),
                align: str_field(resolved, "align", "left"),
            }),
            BlockType::Heading => BlockConfig::Heading(HeadingConfig {
                content: str_field(resolved, "content", "Heading"),
                level: str_field(resolved, "level", "h1"),
                align: str_field(resolved, "align", "left"),
            }),
            BlockType::Image => BlockConfig::Image(ImageConfig {
                url: str_field(resolved, "url", ""),
                alt: str_field(resolved, "alt", "Image"),
                width: Dimension::read(resolved, "width", "100%"),
                height: Dimension::read(resolved, "height", "auto"),
            }),
            BlockType::Video => BlockConfig::Video(VideoConfig {
                url: str_field(resolved, "url", ""),
                width: Dimension::read(resolved, "width", "100%"),
                height: Dimension::read(resolved, "height", "400px"),
                autoplay: bool_field(resolved, "autoplay", false),
            }),
            BlockType::Button => BlockConfig::Button(ButtonConfig {
                text: str_field(resolved, "text", "Button"),
                link: str_field(resolved, "link", "#"),
                style: ButtonStyle::from_name(&str_field(resolved, "style", "primary")),
                align: str_field(resolved, "align", "left"),
                bg_color: opt_str_field(resolved, "bg_color"),
                text_color: opt_str_field(resolved, "text_color"),
                size: ButtonSize::from_name(&str_field(resolved, "size", "medium")),
                border_radius: str_field(resolved, "border_radius", "8px"),
            }),
            BlockType::Slider => BlockConfig::Slider(SliderConfig {
                images: string_list_field(resolved, "images"),
                autoplay: bool_field(resolved, "autoplay", true),
                interval: int_field(resolved, "interval", 3000),
                width: Dimension::read(resolved, "width", "100%"),
                height: Dimension::read(resolved, "height", "auto"),
            }),
            BlockType::Section => BlockConfig::Section(SectionConfig {
                content: str_field(resolved, "content", ""),
                columns: int_field(resolved, "columns", 1) as u32,
            }),
            BlockType::Unknown(name) => BlockConfig::Unknown(name.clone()),
        }
    }
}

fn str_field(map: &Map<String, Value>, key: &str, fallback: &str) -> String {
    match map.get(key) {
        Some(Value::String(s)) => s.clone(),
        _ => fallback.to_string(),
    }
}

fn opt_str_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn bool_field(map: &Map<String, Value>, key: &str, fallback: bool) -> bool {
    match map.get(key) {
        Some(Value::Bool(b)) => *b,
        _ => fallback,
    }
}

fn int_field(map: &Map<String, Value>, key: &str, fallback: u64) -> u64 {
    match map.get(key) {
        Some(v) => v.as_u64().unwrap_or(fallback),
        None => fallback,
    }
}

fn string_list_field(map: &Map<String, Value>, key: &str) -> Vec<String> {
    match map.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str().map(|s| s.to_string()))
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_known_type() {
        let defaults = defaults_for(&BlockType::Text);
        assert_eq!(defaults.get("content"), Some(&json!("Block text")));
        assert_eq!(defaults.get("size"), Some(&json!("16px")));
        assert_eq!(defaults.get("align"), Some(&json!("left")));
    }

    #[test]
    fn test_defaults_for_unknown_type_is_empty() {
        let defaults = defaults_for(&BlockType::Unknown("countdown".into()));
        assert!(defaults.is_empty());
    }

    #[test]
    fn test_block_type_deserializes_unknown_names() {
        let t: BlockType = serde_json::from_str("\"countdown\"").unwrap();
        assert_eq!(t, BlockType::Unknown("countdown".into()));

        let t: BlockType = serde_json::from_str("\"slider\"").unwrap();
        assert_eq!(t, BlockType::Slider);
    }

    #[test]
    fn test_block_type_round_trips() {
        for name in ["text", "heading", "image", "video", "button", "slider", "section"] {
            let t = BlockType::from_name(name);
            assert_eq!(serde_json::to_value(&t).unwrap(), json!(name));
        }
    }

    #[test]
    fn test_dimension_coerces_bare_numbers_to_px() {
        let map = match json!({"width": 300, "height": "50vh"}) {
            Value::Object(m) => m,
            _ => unreachable!(),
        };
        assert_eq!(Dimension::read(&map, "width", "100%").css(), "300px");
        assert_eq!(Dimension::read(&map, "height", "auto").css(), "50vh");
        assert_eq!(Dimension::read(&map, "missing", "auto").css(), "auto");
    }

    #[test]
    fn test_button_presets_fall_back_to_defaults() {
        assert_eq!(ButtonStyle::from_name("success"), ButtonStyle::Success);
        assert_eq!(ButtonStyle::from_name("sparkly"), ButtonStyle::Primary);
        assert_eq!(ButtonSize::from_name("large"), ButtonSize::Large);
        assert_eq!(ButtonSize::from_name("gigantic"), ButtonSize::Medium);
    }

    #[test]
    fn test_resolve_tolerates_wrong_typed_values() {
        let map = match json!({"content": 42, "size": "20px", "autoplay": "yes"}) {
            Value::Object(m) => m,
            _ => unreachable!(),
        };
        let config = BlockConfig::resolve(&BlockType::Text, &map);
        match config {
            BlockConfig::Text(text) => {
                assert_eq!(text.content, "Block text");
                assert_eq!(text.size, "20px");
            }
            other => panic!("expected text config, got {:?}", other),
        }
    }
}
