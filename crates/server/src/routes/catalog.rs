use axum::{
    extract::{Query, State},
    Json,
};
use models::offering::ServiceOffering;
use service::services::CatalogFilter;

use crate::state::AppState;

/// Without parameters every offering is listed, inactive ones included.
pub async fn list_offerings(State(state): State<AppState>, Query(filter): Query<CatalogFilter>) -> Json<Vec<ServiceOffering>> {
    let catalog = &state.services.catalog;
    let found = match (&filter.category, &filter.q, filter.active_only) {
        (None, None, false) => catalog.get_all().await,
        (Some(category), None, true) => catalog.get_by_category(category).await,
        _ => catalog.search(&filter).await,
    };
    Json(found)
}
