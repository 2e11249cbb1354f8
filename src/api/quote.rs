use axum::extract::State;
use axum::Json;

use crate::api::AppState;
use crate::domain::Quote;
use crate::error::AppError;

pub async fn get_quote(State(state): State<AppState>) -> Result<Json<Quote>, AppError> {
    let quote = state.calculator.fetch_quote().await?;
    Ok(Json(quote))
}
