//! SQLite-backed storage. One parameterized query per operation; JSON-valued
//! columns (`content`, `navigation_items`, `top_bar_links`) are TEXT and are
//! round-tripped through serde at the row boundary. The two multi-record
//! operations (reorder, header-config activation) run inside a transaction.

use async_trait::async_trait;
use sqlx::FromRow;
use uuid::Uuid;

use crate::db::Database;
use crate::error::{AppError, AppResult};
use crate::models::block::{
    BlockContent, BlockOrder, BlockType, LayoutBlock, LayoutBlockPatch, NewLayoutBlock,
};
use crate::models::gallery::{GalleryImage, GalleryImageForm, GalleryImagePatch};
use crate::models::header::{
    BackgroundType, HeaderConfig, HeaderConfigForm, HeaderConfigPatch, NavigationItem,
};
use crate::models::page::{Page, PageForm, PagePatch};
use crate::models::testimonial::{Testimonial, TestimonialForm, TestimonialPatch};
use crate::models::upload::{UploadedFile, UploadedFileForm};
use crate::models::user::{User, UserForm};
use crate::storage::{seed, Storage};
use crate::utils::time::current_timestamp_seconds;

pub struct SqlStorage {
    db: Database,
}

const BLOCK_COLUMNS: &str =
    r#"id, page_id, type AS block_type, content, "order", is_visible, created_at, updated_at"#;

#[derive(FromRow)]
struct LayoutBlockRow {
    id: String,
    page_id: String,
    block_type: String,
    content: String,
    order: i64,
    is_visible: bool,
    created_at: i64,
    updated_at: i64,
}

impl LayoutBlockRow {
    fn into_block(self) -> AppResult<LayoutBlock> {
        let block_type = BlockType::parse(&self.block_type).ok_or_else(|| {
            AppError::Internal(format!("unknown block type '{}' in storage", self.block_type))
        })?;
        let value: serde_json::Value = serde_json::from_str(&self.content)
            .map_err(|e| AppError::Internal(format!("corrupt block content: {}", e)))?;
        let content = BlockContent::from_value(block_type, value)
            .map_err(|e| AppError::Internal(format!("block content does not match type: {}", e)))?;
        Ok(LayoutBlock {
            id: self.id,
            page_id: self.page_id,
            block_type,
            content,
            order: self.order,
            is_visible: self.is_visible,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const HEADER_COLUMNS: &str = "id, logo_url, logo_alt, navigation_items, contact_phone, \
     contact_text, cta_text, cta_link, top_bar_enabled, top_bar_phone, top_bar_address, \
     top_bar_background_type, top_bar_background_color, top_bar_background_image, \
     top_bar_gradient_from, top_bar_gradient_to, top_bar_text_color, top_bar_links, \
     background_type, background_color, background_image, gradient_from, gradient_to, \
     text_color, link_color, link_hover_color, main_nav_background_color, \
     main_nav_text_color, is_active, updated_at";

#[derive(FromRow)]
struct HeaderConfigRow {
    id: String,
    logo_url: Option<String>,
    logo_alt: String,
    navigation_items: String,
    contact_phone: Option<String>,
    contact_text: Option<String>,
    cta_text: Option<String>,
    cta_link: Option<String>,
    top_bar_enabled: bool,
    top_bar_phone: Option<String>,
    top_bar_address: Option<String>,
    top_bar_background_type: String,
    top_bar_background_color: Option<String>,
    top_bar_background_image: Option<String>,
    top_bar_gradient_from: Option<String>,
    top_bar_gradient_to: Option<String>,
    top_bar_text_color: Option<String>,
    top_bar_links: String,
    background_type: String,
    background_color: Option<String>,
    background_image: Option<String>,
    gradient_from: Option<String>,
    gradient_to: Option<String>,
    text_color: Option<String>,
    link_color: Option<String>,
    link_hover_color: Option<String>,
    main_nav_background_color: Option<String>,
    main_nav_text_color: Option<String>,
    is_active: bool,
    updated_at: i64,
}

fn parse_background_type(s: &str) -> BackgroundType {
    match s {
        "gradient" => BackgroundType::Gradient,
        "image" => BackgroundType::Image,
        _ => BackgroundType::Solid,
    }
}

fn background_type_str(t: BackgroundType) -> &'static str {
    match t {
        BackgroundType::Solid => "solid",
        BackgroundType::Gradient => "gradient",
        BackgroundType::Image => "image",
    }
}

fn parse_nav_items(s: &str) -> Vec<NavigationItem> {
    serde_json::from_str(s).unwrap_or_default()
}

fn nav_items_json(items: &[NavigationItem]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

impl HeaderConfigRow {
    fn into_config(self) -> HeaderConfig {
        HeaderConfig {
            id: self.id,
            logo_url: self.logo_url,
            logo_alt: self.logo_alt,
            navigation_items: parse_nav_items(&self.navigation_items),
            contact_phone: self.contact_phone,
            contact_text: self.contact_text,
            cta_text: self.cta_text,
            cta_link: self.cta_link,
            top_bar_enabled: self.top_bar_enabled,
            top_bar_phone: self.top_bar_phone,
            top_bar_address: self.top_bar_address,
            top_bar_background_type: parse_background_type(&self.top_bar_background_type),
            top_bar_background_color: self.top_bar_background_color,
            top_bar_background_image: self.top_bar_background_image,
            top_bar_gradient_from: self.top_bar_gradient_from,
            top_bar_gradient_to: self.top_bar_gradient_to,
            top_bar_text_color: self.top_bar_text_color,
            top_bar_links: parse_nav_items(&self.top_bar_links),
            background_type: parse_background_type(&self.background_type),
            background_color: self.background_color,
            background_image: self.background_image,
            gradient_from: self.gradient_from,
            gradient_to: self.gradient_to,
            text_color: self.text_color,
            link_color: self.link_color,
            link_hover_color: self.link_hover_color,
            main_nav_background_color: self.main_nav_background_color,
            main_nav_text_color: self.main_nav_text_color,
            is_active: self.is_active,
            updated_at: self.updated_at,
        }
    }
}

impl SqlStorage {
    pub async fn connect(database_url: &str, admin_email: &str) -> anyhow::Result<Self> {
        let db = Database::new(database_url).await?;
        db.run_migrations().await?;
        let storage = SqlStorage { db };
        storage.seed_if_empty(admin_email).await?;
        Ok(storage)
    }

    async fn seed_if_empty(&self, admin_email: &str) -> anyhow::Result<()> {
        let pages: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pages")
            .fetch_one(self.db.pool())
            .await?;
        if pages > 0 {
            return Ok(());
        }

        tracing::info!("Empty database, installing default site content");
        let data = seed::default_site(admin_email);

        sqlx::query(
            "INSERT INTO users (id, email, password, role, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&data.admin.id)
        .bind(&data.admin.email)
        .bind(&data.admin.password)
        .bind(&data.admin.role)
        .bind(data.admin.created_at)
        .execute(self.db.pool())
        .await?;

        sqlx::query(
            "INSERT INTO pages (id, slug, title, meta_description, is_published, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&data.page.id)
        .bind(&data.page.slug)
        .bind(&data.page.title)
        .bind(&data.page.meta_description)
        .bind(data.page.is_published)
        .bind(data.page.created_at)
        .bind(data.page.updated_at)
        .execute(self.db.pool())
        .await?;

        for block in &data.blocks {
            self.insert_block(block).await?;
        }

        for testimonial in &data.testimonials {
            sqlx::query(
                r#"INSERT INTO testimonials (id, name, rating, text, date, is_visible, "order", created_at)
                   VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
            )
            .bind(&testimonial.id)
            .bind(&testimonial.name)
            .bind(testimonial.rating)
            .bind(&testimonial.text)
            .bind(&testimonial.date)
            .bind(testimonial.is_visible)
            .bind(testimonial.order)
            .bind(testimonial.created_at)
            .execute(self.db.pool())
            .await?;
        }

        Ok(())
    }

    async fn insert_block(&self, block: &LayoutBlock) -> AppResult<()> {
        let content_json = serde_json::to_string(&block.content)
            .map_err(|e| AppError::Internal(format!("failed to encode block content: {}", e)))?;
        sqlx::query(
            r#"INSERT INTO layout_blocks (id, page_id, type, content, "order", is_visible, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&block.id)
        .bind(&block.page_id)
        .bind(block.block_type.as_str())
        .bind(&content_json)
        .bind(block.order)
        .bind(block.is_visible)
        .bind(block.created_at)
        .bind(block.updated_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }
}

#[async_trait]
impl Storage for SqlStorage {
    async fn get_user(&self, id: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password, role, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;
        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password, role, created_at FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(self.db.pool())
        .await?;
        Ok(user)
    }

    async fn create_user(&self, form: UserForm) -> AppResult<User> {
        let user = User {
            id: Uuid::new_v4().to_string(),
            email: form.email,
            password: form.password,
            role: form.role.unwrap_or_else(|| "admin".to_string()),
            created_at: current_timestamp_seconds(),
        };
        sqlx::query(
            "INSERT INTO users (id, email, password, role, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.role)
        .bind(user.created_at)
        .execute(self.db.pool())
        .await?;
        Ok(user)
    }

    async fn get_page(&self, id: &str) -> AppResult<Option<Page>> {
        let page = sqlx::query_as::<_, Page>(
            "SELECT id, slug, title, meta_description, is_published, created_at, updated_at \
             FROM pages WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;
        Ok(page)
    }

    async fn get_page_by_slug(&self, slug: &str) -> AppResult<Option<Page>> {
        let page = sqlx::query_as::<_, Page>(
            "SELECT id, slug, title, meta_description, is_published, created_at, updated_at \
             FROM pages WHERE slug = ?",
        )
        .bind(slug)
        .fetch_optional(self.db.pool())
        .await?;
        Ok(page)
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
        sqlx::query(
            "INSERT INTO pages (id, slug, title, meta_description, is_published, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&page.id)
        .bind(&page.slug)
        .bind(&page.title)
        .bind(&page.meta_description)
        .bind(page.is_published)
        .bind(page.created_at)
        .bind(page.updated_at)
        .execute(self.db.pool())
        .await?;
        Ok(page)
    }

    async fn update_page(&self, id: &str, patch: PagePatch) -> AppResult<Option<Page>> {
        let Some(mut page) = self.get_page(id).await? else {
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

        sqlx::query(
            "UPDATE pages SET title = ?, meta_description = ?, is_published = ?, updated_at = ? \
             WHERE id = ?",
        )
        .bind(&page.title)
        .bind(&page.meta_description)
        .bind(page.is_published)
        .bind(page.updated_at)
        .bind(id)
        .execute(self.db.pool())
        .await?;
        Ok(Some(page))
    }

    async fn get_layout_block(&self, id: &str) -> AppResult<Option<LayoutBlock>> {
        let row = sqlx::query_as::<_, LayoutBlockRow>(&format!(
            "SELECT {} FROM layout_blocks WHERE id = ?",
            BLOCK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;
        row.map(LayoutBlockRow::into_block).transpose()
    }

    async fn get_layout_blocks_by_page_id(&self, page_id: &str) -> AppResult<Vec<LayoutBlock>> {
        let rows = sqlx::query_as::<_, LayoutBlockRow>(&format!(
            r#"SELECT {} FROM layout_blocks WHERE page_id = ? ORDER BY "order" ASC, created_at ASC, id ASC"#,
            BLOCK_COLUMNS
        ))
        .bind(page_id)
        .fetch_all(self.db.pool())
        .await?;
        rows.into_iter().map(LayoutBlockRow::into_block).collect()
    }

    async fn get_layout_blocks_by_page_slug(&self, slug: &str) -> AppResult<Vec<LayoutBlock>> {
        let Some(page) = self.get_page_by_slug(slug).await? else {
            return Ok(Vec::new());
        };
        self.get_layout_blocks_by_page_id(&page.id).await
    }

    async fn create_layout_block(&self, block: NewLayoutBlock) -> AppResult<LayoutBlock> {
        let now = current_timestamp_seconds();
        let record = LayoutBlock {
            id: Uuid::new_v4().to_string(),
            page_id: block.page_id,
            block_type: block.content.block_type(),
            content: block.content,
            order: block.order,
            is_visible: block.is_visible,
            created_at: now,
            updated_at: now,
        };
        self.insert_block(&record).await?;
        Ok(record)
    }

    async fn update_layout_block(
        &self,
        id: &str,
        patch: LayoutBlockPatch,
    ) -> AppResult<Option<LayoutBlock>> {
        let Some(mut block) = self.get_layout_block(id).await? else {
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

        let content_json = serde_json::to_string(&block.content)
            .map_err(|e| AppError::Internal(format!("failed to encode block content: {}", e)))?;
        sqlx::query(
            r#"UPDATE layout_blocks SET type = ?, content = ?, "order" = ?, is_visible = ?, updated_at = ?
               WHERE id = ?"#,
        )
        .bind(block.block_type.as_str())
        .bind(&content_json)
        .bind(block.order)
        .bind(block.is_visible)
        .bind(block.updated_at)
        .bind(id)
        .execute(self.db.pool())
        .await?;
        Ok(Some(block))
    }

    async fn delete_layout_block(&self, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM layout_blocks WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn reorder_layout_blocks(&self, entries: &[BlockOrder]) -> AppResult<()> {
        let now = current_timestamp_seconds();
        let mut tx = self.db.pool().begin().await?;
        for entry in entries {
            sqlx::query(r#"UPDATE layout_blocks SET "order" = ?, updated_at = ? WHERE id = ?"#)
                .bind(entry.order)
                .bind(now)
                .bind(&entry.id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn get_testimonials(&self) -> AppResult<Vec<Testimonial>> {
        let testimonials = sqlx::query_as::<_, Testimonial>(
            r#"SELECT id, name, rating, text, date, is_visible, "order", created_at
               FROM testimonials ORDER BY "order" ASC, created_at ASC, id ASC"#,
        )
        .fetch_all(self.db.pool())
        .await?;
        Ok(testimonials)
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
        sqlx::query(
            r#"INSERT INTO testimonials (id, name, rating, text, date, is_visible, "order", created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&testimonial.id)
        .bind(&testimonial.name)
        .bind(testimonial.rating)
        .bind(&testimonial.text)
        .bind(&testimonial.date)
        .bind(testimonial.is_visible)
        .bind(testimonial.order)
        .bind(testimonial.created_at)
        .execute(self.db.pool())
        .await?;
        Ok(testimonial)
    }

    async fn update_testimonial(
        &self,
        id: &str,
        patch: TestimonialPatch,
    ) -> AppResult<Option<Testimonial>> {
        let existing = sqlx::query_as::<_, Testimonial>(
            r#"SELECT id, name, rating, text, date, is_visible, "order", created_at
               FROM testimonials WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;
        let Some(mut testimonial) = existing else {
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

        sqlx::query(
            r#"UPDATE testimonials SET name = ?, rating = ?, text = ?, date = ?, is_visible = ?, "order" = ?
               WHERE id = ?"#,
        )
        .bind(&testimonial.name)
        .bind(testimonial.rating)
        .bind(&testimonial.text)
        .bind(&testimonial.date)
        .bind(testimonial.is_visible)
        .bind(testimonial.order)
        .bind(id)
        .execute(self.db.pool())
        .await?;
        Ok(Some(testimonial))
    }

    async fn delete_testimonial(&self, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM testimonials WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn get_gallery_images(&self) -> AppResult<Vec<GalleryImage>> {
        let images = sqlx::query_as::<_, GalleryImage>(
            r#"SELECT id, title, image_url, alt, category, is_visible, "order", created_at
               FROM gallery_images ORDER BY "order" ASC, created_at ASC, id ASC"#,
        )
        .fetch_all(self.db.pool())
        .await?;
        Ok(images)
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
        sqlx::query(
            r#"INSERT INTO gallery_images (id, title, image_url, alt, category, is_visible, "order", created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&image.id)
        .bind(&image.title)
        .bind(&image.image_url)
        .bind(&image.alt)
        .bind(&image.category)
        .bind(image.is_visible)
        .bind(image.order)
        .bind(image.created_at)
        .execute(self.db.pool())
        .await?;
        Ok(image)
    }

    async fn update_gallery_image(
        &self,
        id: &str,
        patch: GalleryImagePatch,
    ) -> AppResult<Option<GalleryImage>> {
        let existing = sqlx::query_as::<_, GalleryImage>(
            r#"SELECT id, title, image_url, alt, category, is_visible, "order", created_at
               FROM gallery_images WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;
        let Some(mut image) = existing else {
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

        sqlx::query(
            r#"UPDATE gallery_images SET title = ?, image_url = ?, alt = ?, category = ?, is_visible = ?, "order" = ?
               WHERE id = ?"#,
        )
        .bind(&image.title)
        .bind(&image.image_url)
        .bind(&image.alt)
        .bind(&image.category)
        .bind(image.is_visible)
        .bind(image.order)
        .bind(id)
        .execute(self.db.pool())
        .await?;
        Ok(Some(image))
    }

    async fn delete_gallery_image(&self, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM gallery_images WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn get_uploaded_file(&self, id: &str) -> AppResult<Option<UploadedFile>> {
        let file = sqlx::query_as::<_, UploadedFile>(
            "SELECT id, filename, original_name, mime_type, size, path, url, uploaded_by, created_at \
             FROM uploaded_files WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;
        Ok(file)
    }

    async fn get_uploaded_files(&self) -> AppResult<Vec<UploadedFile>> {
        let files = sqlx::query_as::<_, UploadedFile>(
            "SELECT id, filename, original_name, mime_type, size, path, url, uploaded_by, created_at \
             FROM uploaded_files ORDER BY created_at DESC, id ASC",
        )
        .fetch_all(self.db.pool())
        .await?;
        Ok(files)
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
        sqlx::query(
            "INSERT INTO uploaded_files (id, filename, original_name, mime_type, size, path, url, uploaded_by, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&file.id)
        .bind(&file.filename)
        .bind(&file.original_name)
        .bind(&file.mime_type)
        .bind(file.size)
        .bind(&file.path)
        .bind(&file.url)
        .bind(&file.uploaded_by)
        .bind(file.created_at)
        .execute(self.db.pool())
        .await?;
        Ok(file)
    }

    async fn delete_uploaded_file(&self, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM uploaded_files WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn get_header_config(&self) -> AppResult<Option<HeaderConfig>> {
        let row = sqlx::query_as::<_, HeaderConfigRow>(&format!(
            "SELECT {} FROM header_config WHERE is_active = 1 LIMIT 1",
            HEADER_COLUMNS
        ))
        .fetch_optional(self.db.pool())
        .await?;
        Ok(row.map(HeaderConfigRow::into_config))
    }

    async fn create_header_config(&self, form: HeaderConfigForm) -> AppResult<HeaderConfig> {
        let config = form.into_config(Uuid::new_v4().to_string(), current_timestamp_seconds());

        let mut tx = self.db.pool().begin().await?;
        if config.is_active {
            sqlx::query("UPDATE header_config SET is_active = 0 WHERE is_active = 1")
                .execute(&mut *tx)
                .await?;
        }
        sqlx::query(&format!(
            "INSERT INTO header_config ({}) VALUES \
             (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            HEADER_COLUMNS
        ))
        .bind(&config.id)
        .bind(&config.logo_url)
        .bind(&config.logo_alt)
        .bind(nav_items_json(&config.navigation_items))
        .bind(&config.contact_phone)
        .bind(&config.contact_text)
        .bind(&config.cta_text)
        .bind(&config.cta_link)
        .bind(config.top_bar_enabled)
        .bind(&config.top_bar_phone)
        .bind(&config.top_bar_address)
        .bind(background_type_str(config.top_bar_background_type))
        .bind(&config.top_bar_background_color)
        .bind(&config.top_bar_background_image)
        .bind(&config.top_bar_gradient_from)
        .bind(&config.top_bar_gradient_to)
        .bind(&config.top_bar_text_color)
        .bind(nav_items_json(&config.top_bar_links))
        .bind(background_type_str(config.background_type))
        .bind(&config.background_color)
        .bind(&config.background_image)
        .bind(&config.gradient_from)
        .bind(&config.gradient_to)
        .bind(&config.text_color)
        .bind(&config.link_color)
        .bind(&config.link_hover_color)
        .bind(&config.main_nav_background_color)
        .bind(&config.main_nav_text_color)
        .bind(config.is_active)
        .bind(config.updated_at)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(config)
    }

    async fn update_header_config(
        &self,
        id: &str,
        patch: HeaderConfigPatch,
    ) -> AppResult<Option<HeaderConfig>> {
        let mut tx = self.db.pool().begin().await?;

        let row = sqlx::query_as::<_, HeaderConfigRow>(&format!(
            "SELECT {} FROM header_config WHERE id = ?",
            HEADER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(row) = row else {
            return Ok(None);
        };

        let mut config = row.into_config();
        let activating = patch.is_active == Some(true);
        config.apply(patch, current_timestamp_seconds());

        if activating {
            sqlx::query("UPDATE header_config SET is_active = 0 WHERE id != ?")
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query(
            "UPDATE header_config SET logo_url = ?, logo_alt = ?, navigation_items = ?, \
             contact_phone = ?, contact_text = ?, cta_text = ?, cta_link = ?, \
             top_bar_enabled = ?, top_bar_phone = ?, top_bar_address = ?, \
             top_bar_background_type = ?, top_bar_background_color = ?, \
             top_bar_background_image = ?, top_bar_gradient_from = ?, top_bar_gradient_to = ?, \
             top_bar_text_color = ?, top_bar_links = ?, background_type = ?, \
             background_color = ?, background_image = ?, gradient_from = ?, gradient_to = ?, \
             text_color = ?, link_color = ?, link_hover_color = ?, \
             main_nav_background_color = ?, main_nav_text_color = ?, is_active = ?, \
             updated_at = ? WHERE id = ?",
        )
        .bind(&config.logo_url)
        .bind(&config.logo_alt)
        .bind(nav_items_json(&config.navigation_items))
        .bind(&config.contact_phone)
        .bind(&config.contact_text)
        .bind(&config.cta_text)
        .bind(&config.cta_link)
        .bind(config.top_bar_enabled)
        .bind(&config.top_bar_phone)
        .bind(&config.top_bar_address)
        .bind(background_type_str(config.top_bar_background_type))
        .bind(&config.top_bar_background_color)
        .bind(&config.top_bar_background_image)
        .bind(&config.top_bar_gradient_from)
        .bind(&config.top_bar_gradient_to)
        .bind(&config.top_bar_text_color)
        .bind(nav_items_json(&config.top_bar_links))
        .bind(background_type_str(config.background_type))
        .bind(&config.background_color)
        .bind(&config.background_image)
        .bind(&config.gradient_from)
        .bind(&config.gradient_to)
        .bind(&config.text_color)
        .bind(&config.link_color)
        .bind(&config.link_hover_color)
        .bind(&config.main_nav_background_color)
        .bind(&config.main_nav_text_color)
        .bind(config.is_active)
        .bind(config.updated_at)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry;

    async fn test_storage() -> SqlStorage {
        SqlStorage::connect("sqlite::memory:", "admin@example.com")
            .await
            .expect("in-memory sqlite")
    }

    fn new_block(page_id: &str, block_type: BlockType, order: i64) -> NewLayoutBlock {
        NewLayoutBlock {
            page_id: page_id.to_string(),
            content: registry::default_content(block_type),
            order,
            is_visible: true,
        }
    }

    #[tokio::test]
    async fn migrations_and_seed_install_default_site() {
        let storage = test_storage().await;

        let page = storage.get_page_by_slug("homepage").await.unwrap();
        assert!(page.is_some());

        let blocks = storage
            .get_layout_blocks_by_page_slug("homepage")
            .await
            .unwrap();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].block_type, BlockType::Hero);
        assert_eq!(blocks[0].order, 1);

        let admin = storage
            .get_user_by_email("admin@example.com")
            .await
            .unwrap();
        assert!(admin.is_some());
        assert_eq!(storage.get_testimonials().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn block_content_round_trips_through_text_column() {
        let storage = test_storage().await;
        let page = storage.get_page_by_slug("homepage").await.unwrap().unwrap();

        let created = storage
            .create_layout_block(new_block(&page.id, BlockType::Cta, 4))
            .await
            .unwrap();
        let fetched = storage
            .get_layout_block(&created.id)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(fetched.block_type, BlockType::Cta);
        assert_eq!(fetched.content.to_value(), created.content.to_value());
    }

    #[tokio::test]
    async fn reorder_runs_in_one_transaction() {
        let storage = test_storage().await;
        let page = storage.get_page_by_slug("homepage").await.unwrap().unwrap();
        let blocks = storage
            .get_layout_blocks_by_page_id(&page.id)
            .await
            .unwrap();
        let ids: Vec<String> = blocks.iter().map(|b| b.id.clone()).collect();

        // Reverse the seeded hero/about/services sequence.
        let entries: Vec<BlockOrder> = ids
            .iter()
            .rev()
            .enumerate()
            .map(|(i, id)| BlockOrder {
                id: id.clone(),
                order: (i + 1) as i64,
            })
            .collect();
        storage.reorder_layout_blocks(&entries).await.unwrap();

        let reordered = storage
            .get_layout_blocks_by_page_id(&page.id)
            .await
            .unwrap();
        let got: Vec<String> = reordered.iter().map(|b| b.id.clone()).collect();
        let want: Vec<String> = ids.into_iter().rev().collect();
        assert_eq!(got, want);
    }

    #[tokio::test]
    async fn update_unknown_block_returns_none() {
        let storage = test_storage().await;
        let result = storage
            .update_layout_block(
                "missing",
                LayoutBlockPatch {
                    order: Some(1),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_block_then_delete_again() {
        let storage = test_storage().await;
        let page = storage.get_page_by_slug("homepage").await.unwrap().unwrap();
        let block = storage
            .create_layout_block(new_block(&page.id, BlockType::Text, 9))
            .await
            .unwrap();

        assert!(storage.delete_layout_block(&block.id).await.unwrap());
        assert!(!storage.delete_layout_block(&block.id).await.unwrap());
    }

    #[tokio::test]
    async fn single_active_header_config_is_transactional() {
        let storage = test_storage().await;

        let first = storage
            .create_header_config(HeaderConfigForm::default())
            .await
            .unwrap();
        let second = storage
            .create_header_config(HeaderConfigForm {
                logo_alt: Some("Second".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let active = storage.get_header_config().await.unwrap().unwrap();
        assert_eq!(active.id, second.id);

        let active_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM header_config WHERE is_active = 1")
                .fetch_one(storage.db.pool())
                .await
                .unwrap();
        assert_eq!(active_count, 1);

        // Re-activate the first record and the second flips off.
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
    }

    #[tokio::test]
    async fn navigation_items_survive_json_round_trip() {
        let storage = test_storage().await;
        let created = storage
            .create_header_config(HeaderConfigForm {
                navigation_items: Some(vec![
                    NavigationItem {
                        name: "Home".to_string(),
                        href: "/".to_string(),
                    },
                    NavigationItem {
                        name: "Gallery".to_string(),
                        href: "/gallery".to_string(),
                    },
                ]),
                ..Default::default()
            })
            .await
            .unwrap();

        let fetched = storage.get_header_config().await.unwrap().unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.navigation_items.len(), 2);
        assert_eq!(fetched.navigation_items[1].href, "/gallery");
    }
}
