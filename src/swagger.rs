use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::wheel::spin,
        handlers::admin::get_prizes,
        handlers::admin::save_admin_changes,
        handlers::admin::delete_prize,
    ),
    components(
        schemas(
            Prize,
            PrizeInput,
            ReplacePrizesRequest,
            DeletePrizeRequest,
            DeletePrizeResponse,
            PrizeListResponse,
            SpinResponse,
            MessageResponse,
            ErrorResponse,
            ApiError,
        )
    ),
    tags(
        (name = "wheel", description = "Prize wheel API"),
        (name = "admin", description = "Prize configuration API"),
    ),
    info(
        title = "Prize Wheel API",
        version = "0.1.0",
        description = "Prize wheel REST API documentation"
    ),
    servers(
        (url = "/", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
