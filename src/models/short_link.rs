// Short link model: one permanent short code per recipe

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::schema::short_links;

/// Short link record as stored in the database
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable, Serialize, Deserialize)]
#[diesel(table_name = short_links)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ShortLink {
    pub id: i64,
    pub recipe_id: i64,
    pub full_url: String,
    pub short_code: String,
    /// Path relative to the public base URL, e.g. `/s/AbC`
    pub short_url: String,
    pub created_at: DateTime<Utc>,
}

/// New short link for insertion
#[derive(Debug, Clone, PartialEq, Eq, Insertable)]
#[diesel(table_name = short_links)]
pub struct NewShortLink {
    pub recipe_id: i64,
    pub full_url: String,
    pub short_code: String,
    pub short_url: String,
}

/// Response body of the get-link endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"short-link": "https://foodgram.example/s/AbC"}))]
pub struct ShortLinkResponse {
    #[serde(rename = "short-link")]
    pub short_link: String,
}
