use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::categories::CategoryRegistry;
use crate::shared::types::ApiResponse;

/// List permitted report categories
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "Permitted category slugs", body = ApiResponse<Vec<String>>)
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(registry): State<Arc<CategoryRegistry>>,
) -> Result<Json<ApiResponse<Vec<String>>>> {
    let slugs = registry.all().to_vec();
    Ok(Json(ApiResponse::success(Some(slugs), None, None)))
}
