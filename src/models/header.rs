use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundType {
    #[default]
    Solid,
    Gradient,
    Image,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationItem {
    pub name: String,
    pub href: String,
}

/// Site-wide header settings. At most one record is active at a time; the
/// active record is what the public navigation chrome renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderConfig {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    pub logo_alt: String,
    pub navigation_items: Vec<NavigationItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_link: Option<String>,

    pub top_bar_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_bar_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_bar_address: Option<String>,
    pub top_bar_background_type: BackgroundType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_bar_background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_bar_background_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_bar_gradient_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_bar_gradient_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_bar_text_color: Option<String>,
    pub top_bar_links: Vec<NavigationItem>,

    pub background_type: BackgroundType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradient_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradient_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_hover_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_nav_background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_nav_text_color: Option<String>,

    pub is_active: bool,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderConfigForm {
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub logo_alt: Option<String>,
    #[serde(default)]
    pub navigation_items: Option<Vec<NavigationItem>>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub contact_text: Option<String>,
    #[serde(default)]
    pub cta_text: Option<String>,
    #[serde(default)]
    pub cta_link: Option<String>,
    #[serde(default)]
    pub top_bar_enabled: Option<bool>,
    #[serde(default)]
    pub top_bar_phone: Option<String>,
    #[serde(default)]
    pub top_bar_address: Option<String>,
    #[serde(default)]
    pub top_bar_background_type: Option<BackgroundType>,
    #[serde(default)]
    pub top_bar_background_color: Option<String>,
    #[serde(default)]
    pub top_bar_background_image: Option<String>,
    #[serde(default)]
    pub top_bar_gradient_from: Option<String>,
    #[serde(default)]
    pub top_bar_gradient_to: Option<String>,
    #[serde(default)]
    pub top_bar_text_color: Option<String>,
    #[serde(default)]
    pub top_bar_links: Option<Vec<NavigationItem>>,
    #[serde(default)]
    pub background_type: Option<BackgroundType>,
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default)]
    pub background_image: Option<String>,
    #[serde(default)]
    pub gradient_from: Option<String>,
    #[serde(default)]
    pub gradient_to: Option<String>,
    #[serde(default)]
    pub text_color: Option<String>,
    #[serde(default)]
    pub link_color: Option<String>,
    #[serde(default)]
    pub link_hover_color: Option<String>,
    #[serde(default)]
    pub main_nav_background_color: Option<String>,
    #[serde(default)]
    pub main_nav_text_color: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl HeaderConfigForm {
    /// Materializes a full record, applying the documented defaults for
    /// omitted fields. New records are active unless the form says otherwise.
    pub fn into_config(self, id: String, now: i64) -> HeaderConfig {
        HeaderConfig {
            id,
            logo_url: self.logo_url,
            logo_alt: self.logo_alt.unwrap_or_else(|| "Logo".to_string()),
            navigation_items: self.navigation_items.unwrap_or_default(),
            contact_phone: self.contact_phone,
            contact_text: self.contact_text,
            cta_text: self.cta_text,
            cta_link: self.cta_link,
            top_bar_enabled: self.top_bar_enabled.unwrap_or(true),
            top_bar_phone: self.top_bar_phone,
            top_bar_address: self.top_bar_address,
            top_bar_background_type: self.top_bar_background_type.unwrap_or_default(),
            top_bar_background_color: self.top_bar_background_color,
            top_bar_background_image: self.top_bar_background_image,
            top_bar_gradient_from: self.top_bar_gradient_from,
            top_bar_gradient_to: self.top_bar_gradient_to,
            top_bar_text_color: self.top_bar_text_color,
            top_bar_links: self.top_bar_links.unwrap_or_default(),
            background_type: self.background_type.unwrap_or_default(),
            background_color: Some(
                self.background_color
                    .unwrap_or_else(|| "#ffffff".to_string()),
            ),
            background_image: self.background_image,
            gradient_from: self.gradient_from,
            gradient_to: self.gradient_to,
            text_color: Some(self.text_color.unwrap_or_else(|| "#000000".to_string())),
            link_color: Some(self.link_color.unwrap_or_else(|| "#2563eb".to_string())),
            link_hover_color: Some(
                self.link_hover_color
                    .unwrap_or_else(|| "#1d4ed8".to_string()),
            ),
            main_nav_background_color: self.main_nav_background_color,
            main_nav_text_color: self.main_nav_text_color,
            is_active: self.is_active.unwrap_or(true),
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderConfigPatch {
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub logo_alt: Option<String>,
    #[serde(default)]
    pub navigation_items: Option<Vec<NavigationItem>>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub contact_text: Option<String>,
    #[serde(default)]
    pub cta_text: Option<String>,
    #[serde(default)]
    pub cta_link: Option<String>,
    #[serde(default)]
    pub top_bar_enabled: Option<bool>,
    #[serde(default)]
    pub top_bar_phone: Option<String>,
    #[serde(default)]
    pub top_bar_address: Option<String>,
    #[serde(default)]
    pub top_bar_background_type: Option<BackgroundType>,
    #[serde(default)]
    pub top_bar_background_color: Option<String>,
    #[serde(default)]
    pub top_bar_background_image: Option<String>,
    #[serde(default)]
    pub top_bar_gradient_from: Option<String>,
    #[serde(default)]
    pub top_bar_gradient_to: Option<String>,
    #[serde(default)]
    pub top_bar_text_color: Option<String>,
    #[serde(default)]
    pub top_bar_links: Option<Vec<NavigationItem>>,
    #[serde(default)]
    pub background_type: Option<BackgroundType>,
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default)]
    pub background_image: Option<String>,
    #[serde(default)]
    pub gradient_from: Option<String>,
    #[serde(default)]
    pub gradient_to: Option<String>,
    #[serde(default)]
    pub text_color: Option<String>,
    #[serde(default)]
    pub link_color: Option<String>,
    #[serde(default)]
    pub link_hover_color: Option<String>,
    #[serde(default)]
    pub main_nav_background_color: Option<String>,
    #[serde(default)]
    pub main_nav_text_color: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl HeaderConfig {
    /// Merges provided fields onto the record. The caller is responsible for
    /// the single-active invariant when `is_active` flips to true.
    pub fn apply(&mut self, patch: HeaderConfigPatch, now: i64) {
        if let Some(v) = patch.logo_url {
            self.logo_url = Some(v);
        }
        if let Some(v) = patch.logo_alt {
            self.logo_alt = v;
        }
        if let Some(v) = patch.navigation_items {
            self.navigation_items = v;
        }
        if let Some(v) = patch.contact_phone {
            self.contact_phone = Some(v);
        }
        if let Some(v) = patch.contact_text {
            self.contact_text = Some(v);
        }
        if let Some(v) = patch.cta_text {
            self.cta_text = Some(v);
        }
        if let Some(v) = patch.cta_link {
            self.cta_link = Some(v);
        }
        if let Some(v) = patch.top_bar_enabled {
            self.top_bar_enabled = v;
        }
        if let Some(v) = patch.top_bar_phone {
            self.top_bar_phone = Some(v);
        }
        if let Some(v) = patch.top_bar_address {
            self.top_bar_address = Some(v);
        }
        if let Some(v) = patch.top_bar_background_type {
            self.top_bar_background_type = v;
        }
        if let Some(v) = patch.top_bar_background_color {
            self.top_bar_background_color = Some(v);
        }
        if let Some(v) = patch.top_bar_background_image {
            self.top_bar_background_image = Some(v);
        }
        if let Some(v) = patch.top_bar_gradient_from {
            self.top_bar_gradient_from = Some(v);
        }
        if let Some(v) = patch.top_bar_gradient_to {
            self.top_bar_gradient_to = Some(v);
        }
        if let Some(v) = patch.top_bar_text_color {
            self.top_bar_text_color = Some(v);
        }
        if let Some(v) = patch.top_bar_links {
            self.top_bar_links = v;
        }
        if let Some(v) = patch.background_type {
            self.background_type = v;
        }
        if let Some(v) = patch.background_color {
            self.background_color = Some(v);
        }
        if let Some(v) = patch.background_image {
            self.background_image = Some(v);
        }
        if let Some(v) = patch.gradient_from {
            self.gradient_from = Some(v);
        }
        if let Some(v) = patch.gradient_to {
            self.gradient_to = Some(v);
        }
        if let Some(v) = patch.text_color {
            self.text_color = Some(v);
        }
        if let Some(v) = patch.link_color {
            self.link_color = Some(v);
        }
        if let Some(v) = patch.link_hover_color {
            self.link_hover_color = Some(v);
        }
        if let Some(v) = patch.main_nav_background_color {
            self.main_nav_background_color = Some(v);
        }
        if let Some(v) = patch.main_nav_text_color {
            self.main_nav_text_color = Some(v);
        }
        if let Some(v) = patch.is_active {
            self.is_active = v;
        }
        self.updated_at = now;
    }
}
