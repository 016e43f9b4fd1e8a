use serde::{Deserialize, Serialize};

/// The set of block kinds a page can be assembled from. The tag decides which
/// payload schema `content` must satisfy and which public section (if any)
/// renders it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Hero,
    About,
    Services,
    Testimonials,
    Gallery,
    Text,
    Image,
    Video,
    Cta,
    Schedule,
}

impl BlockType {
    pub const ALL: [BlockType; 10] = [
        BlockType::Hero,
        BlockType::About,
        BlockType::Services,
        BlockType::Testimonials,
        BlockType::Gallery,
        BlockType::Text,
        BlockType::Image,
        BlockType::Video,
        BlockType::Cta,
        BlockType::Schedule,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Hero => "hero",
            BlockType::About => "about",
            BlockType::Services => "services",
            BlockType::Testimonials => "testimonials",
            BlockType::Gallery => "gallery",
            BlockType::Text => "text",
            BlockType::Image => "image",
            BlockType::Video => "video",
            BlockType::Cta => "cta",
            BlockType::Schedule => "schedule",
        }
    }

    pub fn parse(s: &str) -> Option<BlockType> {
        BlockType::ALL.iter().copied().find(|t| t.as_str() == s)
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct HeroContent {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_primary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_secondary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay_opacity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_alignment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AboutContent {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub founder_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceItem {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ServicesContent {
    pub title: String,
    #[serde(default)]
    pub services: Vec<ServiceItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialsContent {
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GalleryContent {
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TextContent {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImageContent {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct VideoContent {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CtaContent {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleContent {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Typed block payload. One variant per `BlockType`; the tag itself lives on
/// the owning `LayoutBlock`, so serialization emits only the payload object.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum BlockContent {
    Hero(HeroContent),
    About(AboutContent),
    Services(ServicesContent),
    Testimonials(TestimonialsContent),
    Gallery(GalleryContent),
    Text(TextContent),
    Image(ImageContent),
    Video(VideoContent),
    Cta(CtaContent),
    Schedule(ScheduleContent),
}

impl BlockContent {
    pub fn block_type(&self) -> BlockType {
        match self {
            BlockContent::Hero(_) => BlockType::Hero,
            BlockContent::About(_) => BlockType::About,
            BlockContent::Services(_) => BlockType::Services,
            BlockContent::Testimonials(_) => BlockType::Testimonials,
            BlockContent::Gallery(_) => BlockType::Gallery,
            BlockContent::Text(_) => BlockType::Text,
            BlockContent::Image(_) => BlockType::Image,
            BlockContent::Video(_) => BlockType::Video,
            BlockContent::Cta(_) => BlockType::Cta,
            BlockContent::Schedule(_) => BlockType::Schedule,
        }
    }

    /// Type-directed deserialization: the payload must satisfy the schema of
    /// the given tag. This is the validation boundary that rejects content
    /// whose shape does not match its declared type.
    pub fn from_value(
        block_type: BlockType,
        value: serde_json::Value,
    ) -> Result<BlockContent, serde_json::Error> {
        Ok(match block_type {
            BlockType::Hero => BlockContent::Hero(serde_json::from_value(value)?),
            BlockType::About => BlockContent::About(serde_json::from_value(value)?),
            BlockType::Services => BlockContent::Services(serde_json::from_value(value)?),
            BlockType::Testimonials => BlockContent::Testimonials(serde_json::from_value(value)?),
            BlockType::Gallery => BlockContent::Gallery(serde_json::from_value(value)?),
            BlockType::Text => BlockContent::Text(serde_json::from_value(value)?),
            BlockType::Image => BlockContent::Image(serde_json::from_value(value)?),
            BlockType::Video => BlockContent::Video(serde_json::from_value(value)?),
            BlockType::Cta => BlockContent::Cta(serde_json::from_value(value)?),
            BlockType::Schedule => BlockContent::Schedule(serde_json::from_value(value)?),
        })
    }

    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// A positioned piece of page content. `order` defines the render sequence
/// within the owning page; `is_visible` gates public rendering.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutBlock {
    pub id: String,
    pub page_id: String,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub content: BlockContent,
    pub order: i64,
    pub is_visible: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutBlockForm {
    pub page_id: String,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub content: serde_json::Value,
    #[serde(default)]
    pub order: Option<i64>,
    #[serde(default)]
    pub is_visible: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutBlockUpdateForm {
    #[serde(default, rename = "type")]
    pub block_type: Option<BlockType>,
    #[serde(default)]
    pub content: Option<serde_json::Value>,
    #[serde(default)]
    pub order: Option<i64>,
    #[serde(default)]
    pub is_visible: Option<bool>,
}

/// Validated insert data handed to the storage layer; `content` carries the
/// type tag, so a block can never be created with mismatched type/content.
#[derive(Debug, Clone)]
pub struct NewLayoutBlock {
    pub page_id: String,
    pub content: BlockContent,
    pub order: i64,
    pub is_visible: bool,
}

/// Validated field changes applied by the storage layer. `content` always
/// carries its matching tag; routes build this after boundary validation.
#[derive(Debug, Clone, Default)]
pub struct LayoutBlockPatch {
    pub content: Option<BlockContent>,
    pub order: Option<i64>,
    pub is_visible: Option<bool>,
}

/// One (block, position) pair for `reorder_layout_blocks`.
#[derive(Debug, Clone)]
pub struct BlockOrder {
    pub id: String,
    pub order: i64,
}

/// The reorder endpoint receives whole block objects from the editor but
/// only positions matter; anything beyond the id is ignored.
#[derive(Debug, Deserialize)]
pub struct ReorderEntry {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub blocks: Vec<ReorderEntry>,
}
