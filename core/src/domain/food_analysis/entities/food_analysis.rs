use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::generate_uuid_v7;

/// One completed analysis. The text has already been HTML-entity escaped; the
/// id and timestamp exist for log correlation only and are never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FoodAnalysis {
    pub id: Uuid,
    pub analysis: String,
    pub created_at: DateTime<Utc>,
}

impl FoodAnalysis {
    pub fn new(analysis: String) -> Self {
        Self {
            id: generate_uuid_v7(),
            analysis,
            created_at: Utc::now(),
        }
    }
}
