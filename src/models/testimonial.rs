use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: String,
    pub name: String,
    pub rating: i64,
    pub text: String,
    /// Free-text display date, kept verbatim from the author.
    pub date: String,
    pub is_visible: bool,
    pub order: i64,
    pub created_at: i64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 0, max = 5))]
    pub rating: i64,
    #[validate(length(min = 1))]
    pub text: String,
    pub date: String,
    #[serde(default)]
    pub is_visible: Option<bool>,
    #[serde(default)]
    pub order: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[validate(range(min = 0, max = 5))]
    #[serde(default)]
    pub rating: Option<i64>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub is_visible: Option<bool>,
    #[serde(default)]
    pub order: Option<i64>,
}
