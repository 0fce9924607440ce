use axum::Json;
use axum::extract::Query;
use shared::catalog::{default_model, model_options};
use shared::models::{ListModelsQuery, ListModelsResponse};

pub(super) async fn list_models(Query(query): Query<ListModelsQuery>) -> Json<ListModelsResponse> {
    Json(ListModelsResponse {
        variant: query.variant,
        default_model: default_model(query.variant).into(),
        models: model_options(query.variant)
            .iter()
            .copied()
            .map(Into::into)
            .collect(),
    })
}
