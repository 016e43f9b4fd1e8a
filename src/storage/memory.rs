//! Map-backed storage. Everything lives in process memory and is lost on
//! restart; secondary lookups are linear scans. Seeded with default site
//! content at construction.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::block::{BlockOrder, LayoutBlock, LayoutBlockPatch, NewLayoutBlock};
use crate::models::gallery::{GalleryImage, GalleryImageForm, GalleryImagePatch};
use crate::models::header::{HeaderConfig, HeaderConfigForm, HeaderConfigPatch};
use crate::models::page::{Page, PageForm, PagePatch};
use crate::models::testimonial::{Testimonial, TestimonialForm, TestimonialPatch};
use crate::models::upload::{UploadedFile, UploadedFileForm};
use crate::models::user::{User, UserForm};
use crate::storage::{seed, Storage};
use crate::utils::time::current_timestamp_seconds;

#[derive(Default)]
pub struct MemoryStorage {
    users: RwLock<HashMap<String, User>>,
    pages: RwLock<HashMap<String, Page>>,
    blocks: RwLock<HashMap<String, LayoutBlock>>,
    testimonials: RwLock<HashMap<String, Testimonial>>,
    gallery: RwLock<HashMap<String, GalleryImage>>,
    uploads: RwLock<HashMap<String, UploadedFile>>,
    header_configs: RwLock<HashMap<String, HeaderConfig>>,
}

impl MemoryStorage {
    /// An empty store, for tests that want full control over contents.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store preloaded with the default site content.
    pub fn seeded(admin_email: &str) -> Self {
        let storage = Self::default();
        let data = seed::default_site(admin_email);
        storage
            .users
            .write()
            .unwrap()
            .insert(data.admin.id.clone(), data.admin);
        storage
            .pages
            .write()
            .unwrap()
            .insert(data.page.id.clone(), data.page);
        {
            let mut blocks = storage.blocks.write().unwrap();
            for block in data.blocks {
                blocks.insert(block.id.clone(), block);
            }
        }
        {
            let mut testimonials = storage.testimonials.write().unwrap();
            for testimonial in data.testimonials {
                testimonials.insert(testimonial.id.clone(), testimonial);
            }
        }
        storage
    }

    fn blocks_for_page(&self, page_id: &str) -> Vec<LayoutBlock> {
        let blocks = self.blocks.read().unwrap();
        let mut result: Vec<LayoutBlock> = blocks
            .values()
            .filter(|b| b.page_id == page_id)
            .cloned()
            .collect();
        // Map iteration order is arbitrary, so break order ties on
        // (created_at, id) to keep listings deterministic.
        result.sort_by(|a, b| {
            a.order
                .cmp(&b.order)
                .then(a.created_at.cmp(&b.created_at))
                .then(a.id.cmp(&b.id))
        });
        result
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get_user(&self, id: &str) -> AppResult<Option<User>> {
        Ok(self.users.read().unwrap().get(id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .read()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create_user(&self, form: UserForm) -> AppResult<User> {
        let user = User {
            id: Uuid::new_v4().to_string(),
            email: form.email,
            password: form.password,
            role: form.role.unwrap_or_else(|| "admin".to_string()),
            created_at: current_timestamp_seconds(),
        };
        self.users
            .write()
            .unwrap()
            .insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn get_page(&self, id: &str) -> AppResult<Option<Page>> {
        Ok(self.pages.read().unwrap().get(id).cloned())
    }

    async fn get_page_by_slug(&self, slug: &str) -> AppResult<Option<Page>> {
        Ok(self
            .pages
            .read()
            .unwrap()
            .values()
            .find(|p| p.slug == slug)
            .cloned())
    }

    async fn create_page(&self, form: PageForm) -> AppResult<Page> {
        let now = current_timestamp_seconds();
        let page = Page {
            id: Uuid::new_v4().to_string(),
            slug: form.slug,
            title: form.title,
            meta_description: form.meta_description,
            is_published: form.is_published.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };
        self.pages
            .write()
            .unwrap()
            .insert(page.id.clone(), page.clone());
        Ok(page)
    }

    async fn update_page(&self, id: &str, patch: PagePatch) -> AppResult<Option<Page>> {
        let mut pages = self.pages.write().unwrap();
        let Some(page) = pages.get_mut(id) else {
            return Ok(None);
        };
        if let Some(title) = patch.title {
            page.title = title;
        }
        if let Some(meta) = patch.meta_description {
            page.meta_description = Some(meta);
        }
        if let Some(published) = patch.is_published {
            page.is_published = published;
        }
        page.updated_at = current_timestamp_seconds();
        Ok(Some(page.clone()))
    }

    async fn get_layout_block(&self, id: &str) -> AppResult<Option<LayoutBlock>> {
        Ok(self.blocks.read().unwrap().get(id).cloned())
    }

    async fn get_layout_blocks_by_page_id(&self, page_id: &str) -> AppResult<Vec<LayoutBlock>> {
        Ok(self.blocks_for_page(page_id))
    }

    async fn get_layout_blocks_by_page_slug(&self, slug: &str) -> AppResult<Vec<LayoutBlock>> {
        let Some(page) = self.get_page_by_slug(slug).await? else {
            return Ok(Vec::new());
        };
        Ok(self.blocks_for_page(&page.id))
    }

    async fn create_layout_block(&self, block: NewLayoutBlock) -> AppResult<LayoutBlock> {
        let now = current_timestamp_seconds();
        let block_type = block.content.block_type();
        let record = LayoutBlock {
            id: Uuid::new_v4().to_string(),
            page_id: block.page_id,
            block_type,
            content: block.content,
            order: block.order,
            is_visible: block.is_visible,
            created_at: now,
            updated_at: now,
        };
        self.blocks
            .write()
            .unwrap()
            .insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn update_layout_block(
        &self,
        id: &str,
        patch: LayoutBlockPatch,
    ) -> AppResult<Option<LayoutBlock>> {
        let mut blocks = self.blocks.write().unwrap();
        let Some(block) = blocks.get_mut(id) else {
            return Ok(None);
        };
        if let Some(content) = patch.content {
            block.block_type = content.block_type();
            block.content = content;
        }
        if let Some(order) = patch.order {
            block.order = order;
        }
        if let Some(visible) = patch.is_visible {
            block.is_visible = visible;
        }
        block.updated_at = current_timestamp_seconds();
        Ok(Some(block.clone()))
    }

    async fn delete_layout_block(&self, id: &str) -> AppResult<bool> {
        Ok(self.blocks.write().unwrap().remove(id).is_some())
    }

    async fn reorder_layout_blocks(&self, entries: &[BlockOrder]) -> AppResult<()> {
        // One write lock over the whole batch, so readers never observe a
        // partially renumbered sequence.
        let mut blocks = self.blocks.write().unwrap();
        let now = current_timestamp_seconds();
        for entry in entries {
            if let Some(block) = blocks.get_mut(&entry.id) {
                block.order = entry.order;
                block.updated_at = now;
            }
        }
        Ok(())
    }

    async fn get_testimonials(&self) -> AppResult<Vec<Testimonial>> {
        let testimonials = self.testimonials.read().unwrap();
        let mut result: Vec<Testimonial> = testimonials.values().cloned().collect();
        result.sort_by(|a, b| {
            a.order
                .cmp(&b.order)
                .then(a.created_at.cmp(&b.created_at))
                .then(a.id.cmp(&b.id))
        });
        Ok(result)
    }

    async fn create_testimonial(&self, form: TestimonialForm) -> AppResult<Testimonial> {
        let testimonial = Testimonial {
            id: Uuid::new_v4().to_string(),
            name: form.name,
            rating: form.rating,
            text: form.text,
            date: form.date,
            is_visible: form.is_visible.unwrap_or(true),
            order: form.order.unwrap_or(0),
            created_at: current_timestamp_seconds(),
        };
        self.testimonials
            .write()
            .unwrap()
            .insert(testimonial.id.clone(), testimonial.clone());
        Ok(testimonial)
    }

    async fn update_testimonial(
        &self,
        id: &str,
        patch: TestimonialPatch,
    ) -> AppResult<Option<Testimonial>> {
        let mut testimonials = self.testimonials.write().unwrap();
        let Some(testimonial) = testimonials.get_mut(id) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            testimonial.name = name;
        }
        if let Some(rating) = patch.rating {
            testimonial.rating = rating;
        }
        if let Some(text) = patch.text {
            testimonial.text = text;
        }
        if let Some(date) = patch.date {
            testimonial.date = date;
        }
        if let Some(visible) = patch.is_visible {
            testimonial.is_visible = visible;
        }
        if let Some(order) = patch.order {
            testimonial.order = order;
        }
        Ok(Some(testimonial.clone()))
    }

    async fn delete_testimonial(&self, id: &str) -> AppResult<bool> {
        Ok(self.testimonials.write().unwrap().remove(id).is_some())
    }

    async fn get_gallery_images(&self) -> AppResult<Vec<GalleryImage>> {
        let gallery = self.gallery.read().unwrap();
        let mut result: Vec<GalleryImage> = gallery.values().cloned().collect();
        result.sort_by(|a, b| {
            a.order
                .cmp(&b.order)
                .then(a.created_at.cmp(&b.created_at))
                .then(a.id.cmp(&b.id))
        });
        Ok(result)
    }

    async fn create_gallery_image(&self, form: GalleryImageForm) -> AppResult<GalleryImage> {
        let image = GalleryImage {
            id: Uuid::new_v4().to_string(),
            title: form.title,
            image_url: form.image_url,
            alt: form.alt,
            category: form.category.unwrap_or_else(|| "general".to_string()),
            is_visible: form.is_visible.unwrap_or(true),
            order: form.order.unwrap_or(0),
            created_at: current_timestamp_seconds(),
        };
        self.gallery
            .write()
            .unwrap()
            .insert(image.id.clone(), image.clone());
        Ok(image)
    }

    async fn update_gallery_image(
        &self,
        id: &str,
        patch: GalleryImagePatch,
    ) -> AppResult<Option<GalleryImage>> {
        let mut gallery = self.gallery.write().unwrap();
        let Some(image) = gallery.get_mut(id) else {
            return Ok(None);
        };
        if let Some(title) = patch.title {
            image.title = title;
        }
        if let Some(url) = patch.image_url {
            image.image_url = url;
        }
        if let Some(alt) = patch.alt {
            image.alt = alt;
        }
        if let Some(category) = patch.category {
            image.category = category;
        }
        if let Some(visible) = patch.is_visible {
            image.is_visible = visible;
        }
        if let Some(order) = patch.order {
            image.order = order;
        }
        Ok(Some(image.clone()))
    }

    async fn delete_gallery_image(&self, id: &str) -> AppResult<bool> {
        Ok(self.gallery.write().unwrap().remove(id).is_some())
    }

    async fn get_uploaded_file(&self, id: &str) -> AppResult<Option<UploadedFile>> {
        Ok(self.uploads.read().unwrap().get(id).cloned())
    }

    async fn get_uploaded_files(&self) -> AppResult<Vec<UploadedFile>> {
        let uploads = self.uploads.read().unwrap();
        let mut result: Vec<UploadedFile> = uploads.values().cloned().collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(result)
    }

    async fn create_uploaded_file(&self, form: UploadedFileForm) -> AppResult<UploadedFile> {
        let file = UploadedFile {
            id: Uuid::new_v4().to_string(),
            filename: form.filename,
            original_name: form.original_name,
            mime_type: form.mime_type,
            size: form.size,
            path: form.path,
            url: form.url,
            uploaded_by: form.uploaded_by,
            created_at: current_timestamp_seconds(),
        };
        self.uploads
            .write()
            .unwrap()
            .insert(file.id.clone(), file.clone());
        Ok(file)
    }

    async fn delete_uploaded_file(&self, id: &str) -> AppResult<bool> {
        Ok(self.uploads.write().unwrap().remove(id).is_some())
    }

    async fn get_header_config(&self) -> AppResult<Option<HeaderConfig>> {
        Ok(self
            .header_configs
            .read()
            .unwrap()
            .values()
            .find(|c| c.is_active)
            .cloned())
    }

    async fn create_header_config(&self, form: HeaderConfigForm) -> AppResult<HeaderConfig> {
        let config = form.into_config(
            Uuid::new_v4().to_string(),
            current_timestamp_seconds(),
        );
        // Single write lock: deactivation and insert are one atomic step.
        let mut configs = self.header_configs.write().unwrap();
        if config.is_active {
            for existing in configs.values_mut() {
                existing.is_active = false;
            }
        }
        configs.insert(config.id.clone(), config.clone());
        Ok(config)
    }

    async fn update_header_config(
        &self,
        id: &str,
        patch: HeaderConfigPatch,
    ) -> AppResult<Option<HeaderConfig>> {
        let mut configs = self.header_configs.write().unwrap();
        if !configs.contains_key(id) {
            return Ok(None);
        }
        if patch.is_active == Some(true) {
            for (other_id, other) in configs.iter_mut() {
                if other_id.as_str() != id {
                    other.is_active = false;
                }
            }
        }
        let Some(config) = configs.get_mut(id) else {
            return Ok(None);
        };
        config.apply(patch, current_timestamp_seconds());
        Ok(Some(config.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::block::{BlockContent, BlockType, TextContent};
    use crate::registry;

    fn new_block(page_id: &str, block_type: BlockType, order: i64) -> NewLayoutBlock {
        NewLayoutBlock {
            page_id: page_id.to_string(),
            content: registry::default_content(block_type),
            order,
            is_visible: true,
        }
    }

    fn page_form(slug: &str) -> PageForm {
        PageForm {
            slug: slug.to_string(),
            title: format!("{} page", slug),
            meta_description: None,
            is_published: None,
        }
    }

    #[tokio::test]
    async fn seeded_store_has_default_site() {
        let storage = MemoryStorage::seeded("admin@example.com");

        let page = storage.get_page_by_slug("homepage").await.unwrap();
        assert!(page.is_some());

        let blocks = storage
            .get_layout_blocks_by_page_slug("homepage")
            .await
            .unwrap();
        assert_eq!(blocks.len(), 3);
        let orders: Vec<i64> = blocks.iter().map(|b| b.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
        assert_eq!(blocks[0].block_type, BlockType::Hero);
        assert_eq!(blocks[1].block_type, BlockType::About);
        assert_eq!(blocks[2].block_type, BlockType::Services);

        assert_eq!(storage.get_testimonials().await.unwrap().len(), 2);
        let admin = storage
            .get_user_by_email("admin@example.com")
            .await
            .unwrap();
        assert!(admin.is_some());
    }

    #[tokio::test]
    async fn blocks_are_scoped_to_their_page() {
        let storage = MemoryStorage::new();
        let home = storage.create_page(page_form("homepage")).await.unwrap();
        let other = storage.create_page(page_form("contact")).await.unwrap();

        storage
            .create_layout_block(new_block(&home.id, BlockType::Hero, 1))
            .await
            .unwrap();
        storage
            .create_layout_block(new_block(&other.id, BlockType::Text, 1))
            .await
            .unwrap();

        let home_blocks = storage
            .get_layout_blocks_by_page_slug("homepage")
            .await
            .unwrap();
        assert_eq!(home_blocks.len(), 1);
        assert_eq!(home_blocks[0].page_id, home.id);

        // Unknown slug yields an empty list, not an error.
        let none = storage
            .get_layout_blocks_by_page_slug("missing")
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn reorder_rewrites_positions() {
        let storage = MemoryStorage::new();
        let page = storage.create_page(page_form("homepage")).await.unwrap();
        let a = storage
            .create_layout_block(new_block(&page.id, BlockType::Hero, 1))
            .await
            .unwrap();
        let b = storage
            .create_layout_block(new_block(&page.id, BlockType::About, 2))
            .await
            .unwrap();
        let c = storage
            .create_layout_block(new_block(&page.id, BlockType::Services, 3))
            .await
            .unwrap();

        storage
            .reorder_layout_blocks(&[
                BlockOrder {
                    id: c.id.clone(),
                    order: 1,
                },
                BlockOrder {
                    id: a.id.clone(),
                    order: 2,
                },
                BlockOrder {
                    id: b.id.clone(),
                    order: 3,
                },
            ])
            .await
            .unwrap();

        let blocks = storage
            .get_layout_blocks_by_page_id(&page.id)
            .await
            .unwrap();
        let ids: Vec<&str> = blocks.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec![&c.id, &a.id, &b.id]);
    }

    #[tokio::test]
    async fn reorder_skips_unknown_ids() {
        let storage = MemoryStorage::new();
        let page = storage.create_page(page_form("homepage")).await.unwrap();
        let a = storage
            .create_layout_block(new_block(&page.id, BlockType::Hero, 1))
            .await
            .unwrap();

        storage
            .reorder_layout_blocks(&[
                BlockOrder {
                    id: "does-not-exist".to_string(),
                    order: 1,
                },
                BlockOrder {
                    id: a.id.clone(),
                    order: 5,
                },
            ])
            .await
            .unwrap();

        let block = storage.get_layout_block(&a.id).await.unwrap().unwrap();
        assert_eq!(block.order, 5);
    }

    #[tokio::test]
    async fn update_unknown_block_does_not_create() {
        let storage = MemoryStorage::new();
        let result = storage
            .update_layout_block(
                "missing",
                LayoutBlockPatch {
                    order: Some(9),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(result.is_none());
        assert!(storage.get_layout_block("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn content_patch_retags_block() {
        let storage = MemoryStorage::new();
        let page = storage.create_page(page_form("homepage")).await.unwrap();
        let block = storage
            .create_layout_block(new_block(&page.id, BlockType::Hero, 1))
            .await
            .unwrap();

        let updated = storage
            .update_layout_block(
                &block.id,
                LayoutBlockPatch {
                    content: Some(BlockContent::Text(TextContent {
                        title: "Plain text".to_string(),
                        text: Some("body".to_string()),
                    })),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.block_type, BlockType::Text);
    }

    #[tokio::test]
    async fn testimonial_defaults_apply() {
        let storage = MemoryStorage::new();
        let testimonial = storage
            .create_testimonial(TestimonialForm {
                name: "A".to_string(),
                rating: 5,
                text: "t".to_string(),
                date: "d".to_string(),
                is_visible: None,
                order: None,
            })
            .await
            .unwrap();
        assert!(testimonial.is_visible);
        assert_eq!(testimonial.order, 0);
    }

    #[tokio::test]
    async fn delete_is_idempotent_failure() {
        let storage = MemoryStorage::new();
        let page = storage.create_page(page_form("homepage")).await.unwrap();
        let block = storage
            .create_layout_block(new_block(&page.id, BlockType::Hero, 1))
            .await
            .unwrap();

        assert!(storage.delete_layout_block(&block.id).await.unwrap());
        assert!(!storage.delete_layout_block(&block.id).await.unwrap());
        let blocks = storage
            .get_layout_blocks_by_page_id(&page.id)
            .await
            .unwrap();
        assert!(blocks.is_empty());
    }

    #[tokio::test]
    async fn second_active_header_config_wins() {
        let storage = MemoryStorage::new();
        let first = storage
            .create_header_config(HeaderConfigForm::default())
            .await
            .unwrap();
        assert!(first.is_active);

        let second = storage
            .create_header_config(HeaderConfigForm {
                logo_alt: Some("Second".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let active = storage.get_header_config().await.unwrap().unwrap();
        assert_eq!(active.id, second.id);
        assert_eq!(active.logo_alt, "Second");

        // Exactly one record is active and the first was deactivated.
        let configs = storage.header_configs.read().unwrap();
        assert_eq!(configs.values().filter(|c| c.is_active).count(), 1);
        assert!(!configs.get(&first.id).unwrap().is_active);
    }

    #[tokio::test]
    async fn activating_config_deactivates_others() {
        let storage = MemoryStorage::new();
        let first = storage
            .create_header_config(HeaderConfigForm::default())
            .await
            .unwrap();
        let second = storage
            .create_header_config(HeaderConfigForm::default())
            .await
            .unwrap();

        storage
            .update_header_config(
                &first.id,
                HeaderConfigPatch {
                    is_active: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        let active = storage.get_header_config().await.unwrap().unwrap();
        assert_eq!(active.id, first.id);
        let configs = storage.header_configs.read().unwrap();
        assert!(!configs.get(&second.id).unwrap().is_active);
        assert_eq!(configs.values().filter(|c| c.is_active).count(), 1);
    }

    #[tokio::test]
    async fn update_header_config_unknown_id() {
        let storage = MemoryStorage::new();
        let result = storage
            .update_header_config("missing", HeaderConfigPatch::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
