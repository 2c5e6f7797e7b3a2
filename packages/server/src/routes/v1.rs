use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers::interview;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(interview::list_interviews))
        .routes(routes!(interview::get_interview))
        .routes(routes!(interview::score_interview))
        .routes(routes!(interview::attach_video))
}
