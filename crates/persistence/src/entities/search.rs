//! Search result row mapping.

use sqlx::FromRow;
use uuid::Uuid;

/// One full-text match, shape-compatible across all four searched tables.
///
/// `campaign_id`/`map_id` are NULL where the kind has no such parent (the
/// queries select NULL explicitly to keep the row shape uniform).
#[derive(Debug, Clone, FromRow)]
pub struct SearchRowEntity {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub campaign_id: Option<Uuid>,
    pub map_id: Option<Uuid>,
}
