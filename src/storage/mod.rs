//! Data access. One trait, two backends: an in-process map store (default)
//! and a SQLite-backed store, chosen once at startup from configuration.

pub mod memory;
pub(crate) mod seed;
pub mod sql;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Config;
use crate::error::AppResult;
use crate::models::block::{BlockOrder, LayoutBlock, LayoutBlockPatch, NewLayoutBlock};
use crate::models::gallery::{GalleryImage, GalleryImageForm, GalleryImagePatch};
use crate::models::header::{HeaderConfig, HeaderConfigForm, HeaderConfigPatch};
use crate::models::page::{Page, PageForm, PagePatch};
use crate::models::testimonial::{Testimonial, TestimonialForm, TestimonialPatch};
use crate::models::upload::{UploadedFile, UploadedFileForm};
use crate::models::user::{User, UserForm};

/// CRUD contract shared by both backends. Creates assign ids and timestamps
/// and apply documented defaults; updates merge partial fields and return
/// `None` for unknown ids without ever creating a record; deletes report
/// whether a record existed.
#[async_trait]
pub trait Storage: Send + Sync {
    // Users
    async fn get_user(&self, id: &str) -> AppResult<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn create_user(&self, form: UserForm) -> AppResult<User>;

    // Pages
    async fn get_page(&self, id: &str) -> AppResult<Option<Page>>;
    async fn get_page_by_slug(&self, slug: &str) -> AppResult<Option<Page>>;
    async fn create_page(&self, form: PageForm) -> AppResult<Page>;
    async fn update_page(&self, id: &str, patch: PagePatch) -> AppResult<Option<Page>>;

    // Layout blocks
    async fn get_layout_block(&self, id: &str) -> AppResult<Option<LayoutBlock>>;
    async fn get_layout_blocks_by_page_id(&self, page_id: &str) -> AppResult<Vec<LayoutBlock>>;
    async fn get_layout_blocks_by_page_slug(&self, slug: &str) -> AppResult<Vec<LayoutBlock>>;
    async fn create_layout_block(&self, block: NewLayoutBlock) -> AppResult<LayoutBlock>;
    async fn update_layout_block(
        &self,
        id: &str,
        patch: LayoutBlockPatch,
    ) -> AppResult<Option<LayoutBlock>>;
    async fn delete_layout_block(&self, id: &str) -> AppResult<bool>;
    /// Rewrites `order` per entry inside one atomic step. Entries for unknown
    /// ids are skipped.
    async fn reorder_layout_blocks(&self, entries: &[BlockOrder]) -> AppResult<()>;

    // Testimonials
    async fn get_testimonials(&self) -> AppResult<Vec<Testimonial>>;
    async fn create_testimonial(&self, form: TestimonialForm) -> AppResult<Testimonial>;
    async fn update_testimonial(
        &self,
        id: &str,
        patch: TestimonialPatch,
    ) -> AppResult<Option<Testimonial>>;
    async fn delete_testimonial(&self, id: &str) -> AppResult<bool>;

    // Gallery images
    async fn get_gallery_images(&self) -> AppResult<Vec<GalleryImage>>;
    async fn create_gallery_image(&self, form: GalleryImageForm) -> AppResult<GalleryImage>;
    async fn update_gallery_image(
        &self,
        id: &str,
        patch: GalleryImagePatch,
    ) -> AppResult<Option<GalleryImage>>;
    async fn delete_gallery_image(&self, id: &str) -> AppResult<bool>;

    // Uploaded files
    async fn get_uploaded_file(&self, id: &str) -> AppResult<Option<UploadedFile>>;
    async fn get_uploaded_files(&self) -> AppResult<Vec<UploadedFile>>;
    async fn create_uploaded_file(&self, form: UploadedFileForm) -> AppResult<UploadedFile>;
    async fn delete_uploaded_file(&self, id: &str) -> AppResult<bool>;

    // Header configuration
    /// The single record with `is_active = true`, if any.
    async fn get_header_config(&self) -> AppResult<Option<HeaderConfig>>;
    /// Creates a record, deactivating every other record first when the new
    /// one is active. Atomic per backend.
    async fn create_header_config(&self, form: HeaderConfigForm) -> AppResult<HeaderConfig>;
    /// Merges fields; activating a record deactivates all others in the same
    /// atomic step.
    async fn update_header_config(
        &self,
        id: &str,
        patch: HeaderConfigPatch,
    ) -> AppResult<Option<HeaderConfig>>;
}

/// Picks the backend once at startup: a configured `DATABASE_URL` selects the
/// relational store, otherwise content lives in process memory.
pub async fn init(config: &Config) -> anyhow::Result<Arc<dyn Storage>> {
    match &config.database_url {
        Some(url) => {
            let storage = sql::SqlStorage::connect(url, &config.admin_email).await?;
            tracing::info!("Using SQLite storage");
            Ok(Arc::new(storage))
        }
        None => {
            tracing::info!("DATABASE_URL not set, using in-memory storage");
            Ok(Arc::new(memory::MemoryStorage::seeded(&config.admin_email)))
        }
    }
}
