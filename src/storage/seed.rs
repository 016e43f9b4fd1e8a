//! Default site content installed into a fresh store: one published
//! homepage with a hero/about/services sequence, two testimonials, and the
//! admin user. Both backends seed from here so a first run never serves an
//! empty site.

use uuid::Uuid;

use crate::models::block::{
    AboutContent, BlockContent, HeroContent, LayoutBlock, ServiceItem, ServicesContent,
};
use crate::models::page::Page;
use crate::models::testimonial::Testimonial;
use crate::models::user::User;
use crate::utils::time::current_timestamp_seconds;

pub struct SeedData {
    pub admin: User,
    pub page: Page,
    pub blocks: Vec<LayoutBlock>,
    pub testimonials: Vec<Testimonial>,
}

pub fn default_site(admin_email: &str) -> SeedData {
    let now = current_timestamp_seconds();

    let admin = User {
        id: Uuid::new_v4().to_string(),
        email: admin_email.to_string(),
        // Placeholder; login verifies against the configured credential pair,
        // never against this column.
        password: "!".to_string(),
        role: "admin".to_string(),
        created_at: now,
    };

    let page = Page {
        id: Uuid::new_v4().to_string(),
        slug: "homepage".to_string(),
        title: "Clearwater Spas - Hot Tubs, Swim Spas & Saunas".to_string(),
        meta_description: Some(
            "Quality hot tubs, swim spas, pools and saunas with local service you can count on."
                .to_string(),
        ),
        is_published: true,
        created_at: now,
        updated_at: now,
    };

    let hero = LayoutBlock {
        id: Uuid::new_v4().to_string(),
        page_id: page.id.clone(),
        block_type: crate::models::block::BlockType::Hero,
        content: BlockContent::Hero(HeroContent {
            title: "RELAX. SOAK. REPEAT.".to_string(),
            subtitle: Some("Your backyard, upgraded".to_string()),
            description: Some(
                "Our staff will walk you through hot tubs, swim spas, pools and saunas \
                 until you find the one that fits your space and your budget."
                    .to_string(),
            ),
            cta_primary: Some("Schedule a Visit".to_string()),
            cta_secondary: Some("View Products".to_string()),
            image_url: Some("/uploads/seed/hero.jpg".to_string()),
            overlay_opacity: Some("60".to_string()),
            text_alignment: Some("center".to_string()),
        }),
        order: 1,
        is_visible: true,
        created_at: now,
        updated_at: now,
    };

    let about = LayoutBlock {
        id: Uuid::new_v4().to_string(),
        page_id: page.id.clone(),
        block_type: crate::models::block::BlockType::About,
        content: BlockContent::About(AboutContent {
            title: "ABOUT US".to_string(),
            subtitle: Some("MEET THE FOUNDER".to_string()),
            founder_name: Some("Hi, I'm Dana!".to_string()),
            description: Some(
                "We opened our doors as a two-person hot tub rental outfit and grew into \
                 a full showroom. After a few years away designing pools, we're back, \
                 serving our neighbors with the same products we put in our own yards."
                    .to_string(),
            ),
            cta_text: Some("See more".to_string()),
            image_url: Some("/uploads/seed/founder.jpg".to_string()),
        }),
        order: 2,
        is_visible: true,
        created_at: now,
        updated_at: now,
    };

    let services = LayoutBlock {
        id: Uuid::new_v4().to_string(),
        page_id: page.id.clone(),
        block_type: crate::models::block::BlockType::Services,
        content: BlockContent::Services(ServicesContent {
            title: "Our Services".to_string(),
            services: vec![
                ServiceItem {
                    title: "HOT TUBS".to_string(),
                    image: Some("/uploads/seed/hot-tubs.jpg".to_string()),
                    description: Some("Luxury hot tubs for relaxation and therapy".to_string()),
                },
                ServiceItem {
                    title: "SAUNAS".to_string(),
                    image: Some("/uploads/seed/saunas.jpg".to_string()),
                    description: Some("Traditional and infrared saunas".to_string()),
                },
                ServiceItem {
                    title: "POOLS".to_string(),
                    image: Some("/uploads/seed/pools.jpg".to_string()),
                    description: Some("Above-ground and in-ground pools".to_string()),
                },
                ServiceItem {
                    title: "SWIM SPAS".to_string(),
                    image: Some("/uploads/seed/swim-spas.jpg".to_string()),
                    description: Some("Exercise and relaxation in one unit".to_string()),
                },
            ],
        }),
        order: 3,
        is_visible: true,
        created_at: now,
        updated_at: now,
    };

    let testimonials = vec![
        Testimonial {
            id: Uuid::new_v4().to_string(),
            name: "M. Andersen".to_string(),
            rating: 5,
            text: "Great service from the first visit through installation. The crew also \
                   keeps us stocked on cleaning products and handled a heater repair fast."
                .to_string(),
            date: "Jun 20, 2025".to_string(),
            is_visible: true,
            order: 1,
            created_at: now,
        },
        Testimonial {
            id: Uuid::new_v4().to_string(),
            name: "D. Phillips".to_string(),
            rating: 5,
            text: "Bought a heater online and neither the store nor the manufacturer would \
                   help when it failed. These folks troubleshot it anyway. Lesson learned: \
                   buy local."
                .to_string(),
            date: "Jun 11, 2025".to_string(),
            is_visible: true,
            order: 2,
            created_at: now,
        },
    ];

    SeedData {
        admin,
        page,
        blocks: vec![hero, about, services],
        testimonials,
    }
}
