//! Page assembly: wraps rendered blocks with the site-level chrome
//! (header, footer, global style) into one self-contained document.

use crate::block::Block;
use crate::page::PageManager;
use crate::render::render;
use crate::site::{Site, SiteId};
use crate::store::StoreError;

/// Concatenation of the rendered fragments, in the given order.
pub fn render_blocks(blocks: &[Block]) -> String {
    let mut html = String::new();
    for block in blocks {
        html.push_str(&render(block));
        html.push('\n');
    }
    html
}

/// Assembles a full HTML document from a site and its block list.
/// Header and footer are each independently toggled by the site
/// configuration; styling is inline only.
pub fn render_document(site: &Site, blocks: &[Block]) -> String {
    let mut html = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\" />\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n");
    if !site.description.is_empty() {
        html.push_str(&format!(
            "<meta name=\"description\" content=\"{}\" />\n",
            html_escape::encode_quoted_attribute(&site.description)
        ));
    }
    html.push_str(&format!(
        "<title>{}</title>\n",
        html_escape::encode_text(&site.title)
    ));
    html.push_str("</head>\n");

    html.push_str(&format!(
        "<body style=\"background-color: {}; color: {}; font-family: {}; margin: 0;\">\n",
        site.style.background_color, site.style.text_color, site.style.font_family
    ));

    if site.header.show {
        html.push_str(&render_header(site));
    }

    html.push_str("<main>\n");
    html.push_str(&render_blocks(blocks));
    html.push_str("</main>\n");

    if site.footer.show {
        html.push_str(&render_footer(site));
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// Fetches the active, ordered block list for a site and assembles the
/// document. The one-stop entry point for page views.
pub fn render_site(manager: &PageManager, site_id: SiteId) -> Result<String, StoreError> {
    let site = manager.site(site_id)?;
    let blocks = manager.active_ordered(site_id)?;
    Ok(render_document(site, &blocks))
}

fn render_header(site: &Site) -> String {
    let mut header = format!(
        "<header style=\"background-color: {}; color: {}; padding: 16px 24px; display: flex; align-items: center; gap: 12px;\">",
        site.header.background_color, site.header.text_color
    );
    if let Some(logo) = &site.header.logo_url {
        header.push_str(&format!(
            "<img src=\"{}\" alt=\"logo\" style=\"height: 40px;\" />",
            html_escape::encode_quoted_attribute(logo)
        ));
    }
    if !site.header.company_name.is_empty() {
        header.push_str(&format!(
            "<span style=\"font-size: 1.25rem; font-weight: 600;\">{}</span>",
            html_escape::encode_text(&site.header.company_name)
        ));
    }
    header.push_str("</header>\n");
    header
}

fn render_footer(site: &Site) -> String {
    // Footer content is stored markup, emitted as-is.
    format!(
        "<footer style=\"background-color: {}; color: {}; padding: 16px 24px;\">{}</footer>\n",
        site.footer.background_color, site.footer.text_color, site.footer.content
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::BlockType;
    use crate::site::{SiteSettings, UserId};
    use serde_json::{Value, json};

    const OWNER: UserId = 1;

    #[test]
    fn test_document_carries_global_style_and_blocks_in_order() {
        let mut manager = PageManager::new();
        let site_id = manager.create_site(OWNER, "Test").id;
        manager
            .append(
                OWNER,
                site_id,
                BlockType::Heading,
                json!({"content": "First"}),
            )
            .unwrap();
        manager
            .append(OWNER, site_id, BlockType::Text, json!({"content": "Second"}))
            .unwrap();

        let html = render_site(&manager, site_id).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("font-family: Arial, sans-serif;"));
        assert!(html.contains("<title>Test</title>"));
        let first = html.find("First").unwrap();
        let second = html.find("Second").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_header_and_footer_toggles() {
        let mut manager = PageManager::new();
        let site_id = manager.create_site(OWNER, "Test").id;

        let with_chrome = render_site(&manager, site_id).unwrap();
        assert!(with_chrome.contains("<header"));
        assert!(with_chrome.contains("<footer"));
        assert!(with_chrome.contains("© 2024 My site"));

        let mut settings = SiteSettings::default();
        settings.title = "Test".to_string();
        settings.header.show = false;
        settings.footer.show = false;
        manager.update_site(OWNER, site_id, settings).unwrap();

        let bare = render_site(&manager, site_id).unwrap();
        assert!(!bare.contains("<header"));
        assert!(!bare.contains("<footer"));
    }

    #[test]
    fn test_inactive_blocks_are_left_out() {
        let mut manager = PageManager::new();
        let site_id = manager.create_site(OWNER, "Test").id;
        let block = manager
            .append(OWNER, site_id, BlockType::Text, json!({"content": "Hidden"}))
            .unwrap();
        manager
            .update_block(
                OWNER,
                block.id,
                &crate::block::BlockPatch {
                    active: Some(false),
                    ..Default::default()
                },
            )
            .unwrap();

        let html = render_site(&manager, site_id).unwrap();
        assert!(!html.contains("Hidden"));
    }

    #[test]
    fn test_render_site_surfaces_missing_site() {
        let manager = PageManager::new();
        assert!(matches!(
            render_site(&manager, 7),
            Err(StoreError::SiteNotFound(7))
        ));
    }

    #[test]
    fn test_header_logo_and_company_name() {
        let mut manager = PageManager::new();
        let site_id = manager.create_site(OWNER, "Test").id;
        let mut settings = SiteSettings::default();
        settings.header.logo_url = Some("https://assets.example/logo.png".to_string());
        settings.header.company_name = "Acme & Co".to_string();
        manager.update_site(OWNER, site_id, settings).unwrap();

        let html = render_site(&manager, site_id).unwrap();
        assert!(html.contains("src=\"https://assets.example/logo.png\""));
        assert!(html.contains("Acme &amp; Co"));
    }

    #[test]
    fn test_render_blocks_concatenates_fragments() {
        let mut manager = PageManager::new();
        let site_id = manager.create_site(OWNER, "Test").id;
        manager
            .append(OWNER, site_id, BlockType::Text, Value::Null)
            .unwrap();
        manager
            .append(OWNER, site_id, BlockType::Button, Value::Null)
            .unwrap();

        let blocks = manager.active_ordered(site_id).unwrap();
        let html = render_blocks(&blocks);
        assert!(html.contains("<p"));
        assert!(html.contains("<a href="));
    }
}
