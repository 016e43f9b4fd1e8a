//! Server-side render planning for the public site. The presentational layer
//! consumes a flat list of sections (kind + props) plus the computed header
//! styling; everything about which blocks show, in what order, and with what
//! fallback is decided here.

use serde::Serialize;

use crate::models::block::{BlockContent, BlockType, LayoutBlock};
use crate::models::header::{BackgroundType, HeaderConfig};
use crate::registry;

/// One renderable page section: the component to mount and its props.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub content: BlockContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
}

/// Computes the section sequence for a page from its blocks: hidden blocks
/// are dropped, the rest are ordered by `order` (stable, so equal orders keep
/// fetch order), and types without a public section are skipped. An empty
/// result falls back to the default homepage sections so the public site
/// never renders blank.
pub fn page_render_plan(blocks: &[LayoutBlock]) -> Vec<Section> {
    let mut visible: Vec<&LayoutBlock> = blocks.iter().filter(|b| b.is_visible).collect();
    visible.sort_by_key(|b| b.order);

    let sections: Vec<Section> = visible
        .into_iter()
        .filter(|b| registry::definition(b.block_type).has_section)
        .map(|b| Section {
            block_type: b.block_type,
            content: b.content.clone(),
            block_id: Some(b.id.clone()),
        })
        .collect();

    if sections.is_empty() {
        fallback_plan()
    } else {
        sections
    }
}

/// The hard-coded default page shown when no blocks exist yet.
pub fn fallback_plan() -> Vec<Section> {
    [
        BlockType::Hero,
        BlockType::About,
        BlockType::Services,
        BlockType::Testimonials,
        BlockType::Gallery,
        BlockType::Schedule,
    ]
    .into_iter()
    .map(|t| Section {
        block_type: t,
        content: registry::default_content(t),
        block_id: None,
    })
    .collect()
}

/// CSS-ready style values for one header band.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BandStyle {
    pub background: String,
    pub color: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderStyles {
    pub top_bar: BandStyle,
    pub main_nav: BandStyle,
}

const TOP_BAR_FALLBACK_BG: &str = "#2dd4bf";
const MAIN_NAV_FALLBACK_BG: &str = "#f97316";
const FALLBACK_TEXT: &str = "#ffffff";

fn background_declaration(
    background_type: BackgroundType,
    color: Option<&str>,
    image: Option<&str>,
    gradient_from: Option<&str>,
    gradient_to: Option<&str>,
    fallback: &str,
) -> String {
    match background_type {
        BackgroundType::Solid => {
            if let Some(color) = color {
                return color.to_string();
            }
        }
        BackgroundType::Gradient => {
            if let (Some(from), Some(to)) = (gradient_from, gradient_to) {
                return format!("linear-gradient(135deg, {}, {})", from, to);
            }
        }
        BackgroundType::Image => {
            if let Some(url) = image {
                return format!("url({}) center / cover no-repeat", url);
            }
        }
    }
    fallback.to_string()
}

/// Computes the top-bar and main-nav styling from the active header config.
/// `None` means no config exists yet; the hard-coded site defaults apply.
pub fn header_styles(config: Option<&HeaderConfig>) -> HeaderStyles {
    let Some(config) = config else {
        return HeaderStyles {
            top_bar: BandStyle {
                background: TOP_BAR_FALLBACK_BG.to_string(),
                color: FALLBACK_TEXT.to_string(),
            },
            main_nav: BandStyle {
                background: MAIN_NAV_FALLBACK_BG.to_string(),
                color: FALLBACK_TEXT.to_string(),
            },
        };
    };

    let top_bar = BandStyle {
        background: background_declaration(
            config.top_bar_background_type,
            config.top_bar_background_color.as_deref(),
            config.top_bar_background_image.as_deref(),
            config.top_bar_gradient_from.as_deref(),
            config.top_bar_gradient_to.as_deref(),
            config
                .top_bar_background_color
                .as_deref()
                .unwrap_or(TOP_BAR_FALLBACK_BG),
        ),
        color: config
            .top_bar_text_color
            .clone()
            .unwrap_or_else(|| FALLBACK_TEXT.to_string()),
    };

    let main_nav = BandStyle {
        background: background_declaration(
            config.background_type,
            config.background_color.as_deref(),
            config.background_image.as_deref(),
            config.gradient_from.as_deref(),
            config.gradient_to.as_deref(),
            config
                .main_nav_background_color
                .as_deref()
                .unwrap_or(MAIN_NAV_FALLBACK_BG),
        ),
        color: config
            .text_color
            .clone()
            .or_else(|| config.main_nav_text_color.clone())
            .unwrap_or_else(|| FALLBACK_TEXT.to_string()),
    };

    HeaderStyles { top_bar, main_nav }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::block::{TextContent, TestimonialsContent};
    use crate::models::header::HeaderConfigForm;

    fn block(id: &str, block_type: BlockType, order: i64, visible: bool) -> LayoutBlock {
        LayoutBlock {
            id: id.to_string(),
            page_id: "p1".to_string(),
            block_type,
            content: registry::default_content(block_type),
            order,
            is_visible: visible,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn plan_orders_and_filters_blocks() {
        let blocks = vec![
            block("c", BlockType::Services, 3, true),
            block("a", BlockType::Hero, 1, true),
            block("hidden", BlockType::Gallery, 2, false),
            block("b", BlockType::About, 2, true),
        ];

        let plan = page_render_plan(&blocks);
        let kinds: Vec<BlockType> = plan.iter().map(|s| s.block_type).collect();
        assert_eq!(
            kinds,
            vec![BlockType::Hero, BlockType::About, BlockType::Services]
        );
        assert_eq!(plan[0].block_id.as_deref(), Some("a"));
    }

    #[test]
    fn plan_drops_types_without_sections() {
        let mut text = block("t", BlockType::Text, 1, true);
        text.content = BlockContent::Text(TextContent {
            title: "t".to_string(),
            text: None,
        });
        let hero = block("h", BlockType::Hero, 2, true);

        let plan = page_render_plan(&[text, hero]);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].block_type, BlockType::Hero);
    }

    #[test]
    fn equal_orders_keep_fetch_order() {
        let mut first = block("first", BlockType::Testimonials, 1, true);
        first.content = BlockContent::Testimonials(TestimonialsContent {
            title: "first".to_string(),
        });
        let second = block("second", BlockType::Hero, 1, true);

        let plan = page_render_plan(&[first, second]);
        assert_eq!(plan[0].block_id.as_deref(), Some("first"));
        assert_eq!(plan[1].block_id.as_deref(), Some("second"));
    }

    #[test]
    fn empty_page_falls_back_to_defaults() {
        let plan = page_render_plan(&[]);
        assert_eq!(plan.len(), 6);
        assert_eq!(plan[0].block_type, BlockType::Hero);
        assert!(plan.iter().all(|s| s.block_id.is_none()));

        // All hidden behaves the same as empty.
        let hidden = vec![block("x", BlockType::Hero, 1, false)];
        assert_eq!(page_render_plan(&hidden).len(), 6);
    }

    #[test]
    fn header_styles_without_config_use_site_defaults() {
        let styles = header_styles(None);
        assert_eq!(styles.top_bar.background, TOP_BAR_FALLBACK_BG);
        assert_eq!(styles.main_nav.background, MAIN_NAV_FALLBACK_BG);
        assert_eq!(styles.top_bar.color, FALLBACK_TEXT);
    }

    #[test]
    fn header_styles_branch_on_background_type() {
        let mut config = HeaderConfigForm::default().into_config("c1".to_string(), 0);

        config.top_bar_background_type = BackgroundType::Gradient;
        config.top_bar_gradient_from = Some("#111111".to_string());
        config.top_bar_gradient_to = Some("#222222".to_string());
        config.background_type = BackgroundType::Image;
        config.background_image = Some("/uploads/nav.jpg".to_string());
        config.text_color = Some("#333333".to_string());

        let styles = header_styles(Some(&config));
        assert_eq!(
            styles.top_bar.background,
            "linear-gradient(135deg, #111111, #222222)"
        );
        assert_eq!(
            styles.main_nav.background,
            "url(/uploads/nav.jpg) center / cover no-repeat"
        );
        assert_eq!(styles.main_nav.color, "#333333");
    }

    #[test]
    fn incomplete_gradient_falls_back_to_solid_color() {
        let mut config = HeaderConfigForm::default().into_config("c1".to_string(), 0);
        config.top_bar_background_type = BackgroundType::Gradient;
        config.top_bar_gradient_from = Some("#111111".to_string());
        config.top_bar_gradient_to = None;
        config.top_bar_background_color = None;

        let styles = header_styles(Some(&config));
        assert_eq!(styles.top_bar.background, TOP_BAR_FALLBACK_BG);
    }
}
