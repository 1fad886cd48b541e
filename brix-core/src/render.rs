//! The rendering engine: a pure function from a block to an HTML
//! fragment with inline styles only, so fragments stay portable.
//!
//! Rendering is total by design. It runs on every page view, so one
//! malformed block must never take the whole page down: unknown types
//! degrade to a diagnostic container and media blocks without a
//! resolvable source degrade to a placeholder box.

use crate::block::{Block, BlockStyle};
use crate::schema::{
    BlockConfig, ButtonConfig, HeadingConfig, ImageConfig, SectionConfig, SliderConfig,
    TextConfig, VideoConfig,
};

/// Render a block to a self-contained HTML fragment. Pure and
/// deterministic given the block's resolved configuration and style;
/// never fails and never returns an empty string.
pub fn render(block: &Block) -> String {
    let style_attr = style_attr(&block.style);

    match block.typed_config() {
        BlockConfig::Heading(config) => render_heading(&config, &style_attr),
        BlockConfig::Text(config) => render_text(&config, &style_attr),
        BlockConfig::Image(config) => render_image(block, &config, &style_attr),
        BlockConfig::Video(config) => render_video(&config, &style_attr),
        BlockConfig::Button(config) => render_button(&config, &style_attr),
        BlockConfig::Slider(config) => render_slider(block.id, &config, &style_attr),
        BlockConfig::Section(config) => render_section(&config, &style_attr),
        BlockConfig::Unknown(name) => format!(
            "<div style=\"{}\">Unknown block type: {}</div>",
            style_attr,
            html_escape::encode_text(&name)
        ),
    }
}

/// Collect the shared CSS declaration list from whichever style
/// attributes are set on the block. Reused across all type branches.
fn style_attr(style: &BlockStyle) -> String {
    let mut declarations = Vec::new();
    if let Some(color) = &style.background_color {
        declarations.push(format!("background-color: {};", color));
    }
    if let Some(color) = &style.text_color {
        declarations.push(format!("color: {};", color));
    }
    if let Some(padding) = &style.padding {
        declarations.push(format!("padding: {};", padding));
    }
    if let Some(margin) = &style.margin {
        declarations.push(format!("margin: {};", margin));
    }
    declarations.join(" ")
}

fn render_heading(config: &HeadingConfig, style_attr: &str) -> String {
    let level = heading_tag(&config.level);
    format!(
        "<{0} style=\"text-align: {1}; {2}\">{3}</{0}>",
        level, config.align, style_attr, config.content
    )
}

/// Only h1..h6 are valid tag names; anything else configured falls
/// back to h1 rather than producing broken markup.
fn heading_tag(level: &str) -> &str {
    match level {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => level,
        _ => "h1",
    }
}

fn render_text(config: &TextConfig, style_attr: &str) -> String {
    format!(
        "<p style=\"font-size: {}; text-align: {}; {}\">{}</p>",
        config.size, config.align, style_attr, config.content
    )
}

fn render_image(block: &Block, config: &ImageConfig, style_attr: &str) -> String {
    // A bound asset takes precedence over the configured URL.
    let url = match &block.image_url {
        Some(bound) if !bound.is_empty() => bound.as_str(),
        _ => config.url.as_str(),
    };

    if url.is_empty() {
        return placeholder("🖼️ Image", "min-height: 200px;", style_attr);
    }

    format!(
        "<img src=\"{}\" alt=\"{}\" style=\"width: {}; height: {}; {}\" />",
        html_escape::encode_quoted_attribute(url),
        html_escape::encode_quoted_attribute(&config.alt),
        config.width.css(),
        config.height.css(),
        style_attr
    )
}

fn render_video(config: &VideoConfig, style_attr: &str) -> String {
    if config.url.is_empty() {
        return placeholder("🎥 Video", "min-height: 200px;", style_attr);
    }

    let autoplay_attr = if config.autoplay { "autoplay " } else { "" };
    format!(
        "<video src=\"{}\" width=\"{}\" height=\"{}\" controls {}style=\"{}\"></video>",
        html_escape::encode_quoted_attribute(&config.url),
        config.width.css(),
        config.height.css(),
        autoplay_attr,
        style_attr
    )
}

fn render_button(config: &ButtonConfig, style_attr: &str) -> String {
    // An explicit custom color always beats the named preset. Without
    // an explicit text color, default to white so the label stays
    // legible against an arbitrary background.
    let color_style = match &config.bg_color {
        Some(bg) => {
            let text = config.text_color.as_deref().unwrap_or("white");
            format!("background: {}; color: {};", bg, text)
        }
        None => config.style.css().to_string(),
    };

    format!(
        "<div style=\"text-align: {}; {}\"><a href=\"{}\" style=\"{} {} border-radius: {}; text-decoration: none; display: inline-block; font-weight: 600; transition: all 0.3s ease;\">{}</a></div>",
        config.align,
        style_attr,
        html_escape::encode_quoted_attribute(&config.link),
        color_style,
        config.size.css(),
        config.border_radius,
        config.text
    )
}

fn render_slider(block_id: u64, config: &SliderConfig, style_attr: &str) -> String {
    let size_style = format!(
        "width: {}; height: {};",
        config.width.css(),
        config.height.css()
    );

    if config.images.is_empty() {
        let sizing = format!("min-height: 300px; {}", size_style);
        return placeholder("🎠 Slider (add images)", &sizing, style_attr);
    }

    let slider_id = format!("slider-{}", block_id);

    let slides: String = config
        .images
        .iter()
        .enumerate()
        .map(|(index, image)| {
            format!(
                "<div class=\"slide\" data-slide-index=\"{0}\"><img src=\"{1}\" style=\"width: 100%; height: auto; display: block;\" alt=\"Slide {2}\" /></div>",
                index,
                html_escape::encode_quoted_attribute(image),
                index + 1
            )
        })
        .collect();

    let indicators: String = (0..config.images.len())
        .map(|index| {
            format!(
                "<span class=\"slider-indicator\" data-slide=\"{0}\" onclick=\"goToSlide('{1}', {0})\"></span>",
                index, slider_id
            )
        })
        .collect();

    let nav_buttons = format!(
        "<button class=\"slider-btn slider-prev\" onclick=\"changeSlide('{0}', -1)\">‹</button><button class=\"slider-btn slider-next\" onclick=\"changeSlide('{0}', 1)\">›</button>",
        slider_id
    );

    format!(
        "<div class=\"slider-container\" id=\"{}\" data-autoplay=\"{}\" data-interval=\"{}\" style=\"{} {}\"><div class=\"slider\">{}</div><div class=\"slider-indicators\">{}</div>{}</div>",
        slider_id, config.autoplay, config.interval, size_style, style_attr, slides, indicators, nav_buttons
    )
}

fn render_section(config: &SectionConfig, style_attr: &str) -> String {
    // Section content may carry further markup; it is placed inside
    // uninterpreted.
    format!(
        "<div style=\"display: grid; grid-template-columns: repeat({}, 1fr); gap: 1rem; {}\">{}</div>",
        config.columns.max(1),
        style_attr,
        config.content
    )
}

/// The shared fallback box for media blocks without a resolvable
/// source: a fixed glyph and caption in a neutral flex container.
fn placeholder(caption: &str, sizing: &str, style_attr: &str) -> String {
    format!(
        "<div style=\"background: #e5e7eb; display: flex; align-items: center; justify-content: center; {} {}\">{}</div>",
        sizing, style_attr, caption
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::BlockType;
    use serde_json::{Map, Value, json};

    fn block_with(block_type: BlockType, config: Value) -> Block {
        let map = match config {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            _ => panic!("expected an object"),
        };
        Block::new(42, 1, block_type, 1, map)
    }

    #[test]
    fn test_every_type_renders_nonempty_markup() {
        let types = [
            BlockType::Text,
            BlockType::Heading,
            BlockType::Image,
            BlockType::Video,
            BlockType::Button,
            BlockType::Slider,
            BlockType::Section,
            BlockType::Unknown("countdown".into()),
        ];
        for block_type in types {
            let html = render(&block_with(block_type.clone(), Value::Null));
            assert!(!html.is_empty(), "empty markup for {}", block_type);
        }
    }

    #[test]
    fn test_heading_uses_configured_level_and_align() {
        let html = render(&block_with(
            BlockType::Heading,
            json!({"content": "Welcome", "level": "h2", "align": "center"}),
        ));
        assert!(html.starts_with("<h2"));
        assert!(html.ends_with("</h2>"));
        assert!(html.contains("text-align: center;"));
        assert!(html.contains("Welcome"));
    }

    #[test]
    fn test_heading_rejects_bogus_level() {
        let html = render(&block_with(
            BlockType::Heading,
            json!({"level": "script"}),
        ));
        assert!(html.starts_with("<h1"));
    }

    #[test]
    fn test_text_carries_size_and_shared_style() {
        let mut block = block_with(BlockType::Text, json!({"content": "Hi", "size": "18px"}));
        block.style.background_color = Some("#fafafa".to_string());
        let html = render(&block);
        assert!(html.contains("font-size: 18px;"));
        assert!(html.contains("background-color: #fafafa;"));
        assert!(html.contains("padding: 20px;"));
    }

    #[test]
    fn test_image_without_url_renders_placeholder() {
        let html = render(&block_with(BlockType::Image, Value::Null));
        assert!(!html.contains("<img"));
        assert!(html.contains("🖼️"));
        assert!(html.contains("min-height: 200px;"));
    }

    #[test]
    fn test_image_bound_asset_beats_configured_url() {
        let mut block = block_with(BlockType::Image, json!({"url": "config.jpg"}));
        block.image_url = Some("https://assets.example/bound.jpg".to_string());
        let html = render(&block);
        assert!(html.contains("src=\"https://assets.example/bound.jpg\""));
        assert!(!html.contains("config.jpg"));
    }

    #[test]
    fn test_image_numeric_dimensions_coerce_to_px() {
        let html = render(&block_with(
            BlockType::Image,
            json!({"url": "a.jpg", "width": 300, "height": 150}),
        ));
        assert!(html.contains("width: 300px;"));
        assert!(html.contains("height: 150px;"));
    }

    #[test]
    fn test_video_autoplay_flag() {
        let with = render(&block_with(
            BlockType::Video,
            json!({"url": "v.mp4", "autoplay": true}),
        ));
        assert!(with.contains("controls autoplay"));

        let without = render(&block_with(BlockType::Video, json!({"url": "v.mp4"})));
        assert!(!without.contains("autoplay"));
        assert!(without.contains("controls"));
    }

    #[test]
    fn test_video_without_url_renders_placeholder() {
        let html = render(&block_with(BlockType::Video, Value::Null));
        assert!(!html.contains("<video"));
        assert!(html.contains("🎥"));
    }

    #[test]
    fn test_button_preset_colors() {
        let html = render(&block_with(BlockType::Button, json!({"style": "success"})));
        assert!(html.contains("background: #10b981;"));

        let fallback = render(&block_with(BlockType::Button, json!({"style": "sparkly"})));
        assert!(fallback.contains("linear-gradient"));
    }

    #[test]
    fn test_button_custom_color_beats_preset() {
        let html = render(&block_with(
            BlockType::Button,
            json!({"style": "success", "bg_color": "#000000"}),
        ));
        assert!(html.contains("background: #000000;"));
        assert!(!html.contains("#10b981"));
        // No explicit text color: default to white for legibility.
        assert!(html.contains("color: white;"));
    }

    #[test]
    fn test_button_size_preset_independent_of_color() {
        let html = render(&block_with(
            BlockType::Button,
            json!({"size": "large", "bg_color": "#123456"}),
        ));
        assert!(html.contains("padding: 1rem 2rem;"));
        assert!(html.contains("background: #123456;"));
    }

    #[test]
    fn test_slider_emits_one_slide_and_indicator_per_image() {
        let html = render(&block_with(
            BlockType::Slider,
            json!({"images": ["a.jpg", "b.jpg"]}),
        ));
        assert_eq!(html.matches("class=\"slide\"").count(), 2);
        assert_eq!(html.matches("class=\"slider-indicator\"").count(), 2);
        assert!(html.contains("data-slide-index=\"0\""));
        assert!(html.contains("data-slide-index=\"1\""));
        assert!(html.contains("data-slide=\"0\""));
        assert!(html.contains("data-slide=\"1\""));
        assert!(html.contains("slider-prev"));
        assert!(html.contains("slider-next"));
        assert!(html.contains("id=\"slider-42\""));
    }

    #[test]
    fn test_slider_carries_autoplay_and_interval_data() {
        let html = render(&block_with(
            BlockType::Slider,
            json!({"images": ["a.jpg"], "autoplay": false, "interval": 5000}),
        ));
        assert!(html.contains("data-autoplay=\"false\""));
        assert!(html.contains("data-interval=\"5000\""));
    }

    #[test]
    fn test_slider_without_images_renders_placeholder() {
        let html = render(&block_with(BlockType::Slider, json!({"height": 250})));
        assert!(html.contains("🎠"));
        assert!(html.contains("min-height: 300px;"));
        assert!(html.contains("height: 250px;"));
    }

    #[test]
    fn test_section_grid_columns_and_raw_content() {
        let html = render(&block_with(
            BlockType::Section,
            json!({"columns": 3, "content": "<p>raw</p>"}),
        ));
        assert!(html.contains("repeat(3, 1fr)"));
        assert!(html.contains("<p>raw</p>"));
    }

    #[test]
    fn test_unknown_type_renders_diagnostic_container() {
        let mut block = block_with(BlockType::Unknown("countdown".into()), Value::Null);
        block.style.background_color = Some("#eeeeee".to_string());
        let html = render(&block);
        assert!(html.contains("Unknown block type: countdown"));
        assert!(html.contains("background-color: #eeeeee;"));
    }
}
