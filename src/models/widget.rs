use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;
use validator::Validate;

use crate::services::validation::{Rule, Rules};

/// Body of `POST /api/widgets`, accepted as JSON or XML.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WidgetRequest {
    #[validate(length(min = 1, max = 64))]
    pub name: String,

    #[validate(range(min = 1, max = 1000))]
    pub quantity: i32,

    #[validate(email)]
    pub owner_email: String,

    /// Checked by the `sku` rule of the registry
    pub sku: String,

    #[validate(nested)]
    pub dimensions: Dimensions,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Dimensions {
    #[validate(range(min = 1, max = 10000))]
    pub width: u32,

    #[validate(range(min = 1, max = 10000))]
    pub height: u32,
}

impl Rules for WidgetRequest {
    fn rules(&self) -> Vec<Rule<'_>> {
        vec![Rule {
            field: "sku",
            tag: "sku",
            value: &self.sku,
        }]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetResponse {
    pub id: Uuid,
    pub name: String,
    pub quantity: i32,
    pub sku: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
