//! Single registry for everything that is keyed by block type: the default
//! content a new block starts from, the field set the admin editor exposes,
//! and whether a public section renders the block. Keeping these in one place
//! means the add/edit/render paths cannot drift apart.

use serde::Serialize;

use crate::models::block::{
    AboutContent, BlockContent, BlockType, CtaContent, GalleryContent, HeroContent, ImageContent,
    ScheduleContent, ServicesContent, TestimonialsContent, TextContent, VideoContent,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Textarea,
    Image,
    Number,
    Link,
    List,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn field(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, kind }
}

pub struct BlockTypeDef {
    pub block_type: BlockType,
    pub fields: &'static [FieldSpec],
    /// Whether the public site has a section component for this type.
    /// Blocks without one are stored and editable but never rendered.
    pub has_section: bool,
}

static HERO_FIELDS: &[FieldSpec] = &[
    field("title", FieldKind::Text),
    field("subtitle", FieldKind::Text),
    field("description", FieldKind::Textarea),
    field("ctaPrimary", FieldKind::Text),
    field("ctaSecondary", FieldKind::Text),
    field("imageUrl", FieldKind::Image),
    field("overlayOpacity", FieldKind::Number),
    field("textAlignment", FieldKind::Text),
];

static ABOUT_FIELDS: &[FieldSpec] = &[
    field("title", FieldKind::Text),
    field("subtitle", FieldKind::Text),
    field("founderName", FieldKind::Text),
    field("description", FieldKind::Textarea),
    field("ctaText", FieldKind::Text),
    field("imageUrl", FieldKind::Image),
];

static SERVICES_FIELDS: &[FieldSpec] = &[
    field("title", FieldKind::Text),
    field("services", FieldKind::List),
];

static TESTIMONIALS_FIELDS: &[FieldSpec] = &[field("title", FieldKind::Text)];

static GALLERY_FIELDS: &[FieldSpec] = &[field("title", FieldKind::Text)];

static TEXT_FIELDS: &[FieldSpec] = &[
    field("title", FieldKind::Text),
    field("text", FieldKind::Textarea),
];

static IMAGE_FIELDS: &[FieldSpec] = &[
    field("title", FieldKind::Text),
    field("imageUrl", FieldKind::Image),
    field("alt", FieldKind::Text),
];

static VIDEO_FIELDS: &[FieldSpec] = &[
    field("title", FieldKind::Text),
    field("videoUrl", FieldKind::Link),
    field("description", FieldKind::Textarea),
];

static CTA_FIELDS: &[FieldSpec] = &[
    field("title", FieldKind::Text),
    field("buttonText", FieldKind::Text),
    field("buttonLink", FieldKind::Link),
];

static SCHEDULE_FIELDS: &[FieldSpec] = &[
    field("title", FieldKind::Text),
    field("subtitle", FieldKind::Text),
    field("description", FieldKind::Textarea),
];

static DEFINITIONS: &[BlockTypeDef] = &[
    BlockTypeDef {
        block_type: BlockType::Hero,
        fields: HERO_FIELDS,
        has_section: true,
    },
    BlockTypeDef {
        block_type: BlockType::About,
        fields: ABOUT_FIELDS,
        has_section: true,
    },
    BlockTypeDef {
        block_type: BlockType::Services,
        fields: SERVICES_FIELDS,
        has_section: true,
    },
    BlockTypeDef {
        block_type: BlockType::Testimonials,
        fields: TESTIMONIALS_FIELDS,
        has_section: true,
    },
    BlockTypeDef {
        block_type: BlockType::Gallery,
        fields: GALLERY_FIELDS,
        has_section: true,
    },
    BlockTypeDef {
        block_type: BlockType::Text,
        fields: TEXT_FIELDS,
        has_section: false,
    },
    BlockTypeDef {
        block_type: BlockType::Image,
        fields: IMAGE_FIELDS,
        has_section: false,
    },
    BlockTypeDef {
        block_type: BlockType::Video,
        fields: VIDEO_FIELDS,
        has_section: false,
    },
    BlockTypeDef {
        block_type: BlockType::Cta,
        fields: CTA_FIELDS,
        has_section: false,
    },
    BlockTypeDef {
        block_type: BlockType::Schedule,
        fields: SCHEDULE_FIELDS,
        has_section: true,
    },
];

pub fn definition(block_type: BlockType) -> &'static BlockTypeDef {
    DEFINITIONS
        .iter()
        .find(|d| d.block_type == block_type)
        .expect("every block type has a registry definition")
}

/// The content object a freshly added block starts from.
pub fn default_content(block_type: BlockType) -> BlockContent {
    match block_type {
        BlockType::Hero => BlockContent::Hero(HeroContent {
            title: "RELAX. SOAK. REPEAT.".to_string(),
            subtitle: Some("Your backyard, upgraded".to_string()),
            description: Some(
                "Hot tubs, swim spas, saunas and everything that goes with them, \
                 from people who know them inside out."
                    .to_string(),
            ),
            cta_primary: Some("Schedule a Visit".to_string()),
            cta_secondary: Some("View Products".to_string()),
            image_url: None,
            overlay_opacity: Some("60".to_string()),
            text_alignment: Some("center".to_string()),
        }),
        BlockType::About => BlockContent::About(AboutContent {
            title: "About Us".to_string(),
            founder_name: Some("Name Here".to_string()),
            ..Default::default()
        }),
        BlockType::Services => BlockContent::Services(ServicesContent {
            title: "Our Services".to_string(),
            services: Vec::new(),
        }),
        BlockType::Testimonials => BlockContent::Testimonials(TestimonialsContent {
            title: "Testimonials".to_string(),
        }),
        BlockType::Gallery => BlockContent::Gallery(GalleryContent {
            title: "Gallery".to_string(),
        }),
        BlockType::Text => BlockContent::Text(TextContent {
            title: "Text Block".to_string(),
            text: Some("Your content here".to_string()),
        }),
        BlockType::Image => BlockContent::Image(ImageContent {
            title: "Image Block".to_string(),
            image_url: Some(String::new()),
            alt: Some("Description".to_string()),
        }),
        BlockType::Video => BlockContent::Video(VideoContent {
            title: "Video Section".to_string(),
            video_url: Some(String::new()),
            description: Some("Video description".to_string()),
        }),
        BlockType::Cta => BlockContent::Cta(CtaContent {
            title: "Call to Action".to_string(),
            button_text: Some("Get Started".to_string()),
            button_link: Some("/contact".to_string()),
        }),
        BlockType::Schedule => BlockContent::Schedule(ScheduleContent {
            title: "Visit Us".to_string(),
            subtitle: Some("Book a time that works for you".to_string()),
            ..Default::default()
        }),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub fields: &'static [FieldSpec],
    pub default_content: BlockContent,
    pub has_section: bool,
}

/// Everything the admin UI needs to build its block pickers and editors.
pub fn catalog() -> Vec<CatalogEntry> {
    DEFINITIONS
        .iter()
        .map(|d| CatalogEntry {
            block_type: d.block_type,
            fields: d.fields,
            default_content: default_content(d.block_type),
            has_section: d.has_section,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_type_has_a_definition() {
        for t in BlockType::ALL {
            let def = definition(t);
            assert_eq!(def.block_type, t);
            assert!(!def.fields.is_empty());
        }
    }

    #[test]
    fn default_content_matches_its_type() {
        for t in BlockType::ALL {
            assert_eq!(default_content(t).block_type(), t);
        }
    }

    #[test]
    fn default_content_round_trips_through_validation() {
        // The registry default for a type must satisfy that type's own
        // payload schema, otherwise add-block would produce invalid blocks.
        for t in BlockType::ALL {
            let value = default_content(t).to_value();
            let parsed = BlockContent::from_value(t, value).expect("default validates");
            assert_eq!(parsed.block_type(), t);
        }
    }

    #[test]
    fn catalog_covers_all_types() {
        let catalog = catalog();
        assert_eq!(catalog.len(), BlockType::ALL.len());
        assert!(catalog.iter().any(|e| e.block_type == BlockType::Hero));
    }
}
