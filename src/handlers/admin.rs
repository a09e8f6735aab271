use actix_web::{HttpResponse, ResponseError, Result, web};

use crate::models::*;
use crate::pages;
use crate::services::PrizeRegistry;

/// 管理页面 (服务端渲染当前奖品表)
pub async fn admin_page(registry: web::Data<PrizeRegistry>) -> HttpResponse {
    let prizes = registry.snapshot().await;
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(pages::render_admin(&prizes))
}

#[utoipa::path(
    get,
    path = "/prizes",
    tag = "admin",
    responses(
        (status = 200, description = "获取奖品列表成功 (按转盘顺序)", body = PrizeListResponse)
    )
)]
pub async fn get_prizes(registry: web::Data<PrizeRegistry>) -> Result<HttpResponse> {
    let data = registry.snapshot().await;
    Ok(HttpResponse::Ok().json(PrizeListResponse {
        success: true,
        data,
    }))
}

#[utoipa::path(
    post,
    path = "/save_admin_changes",
    tag = "admin",
    request_body = ReplacePrizesRequest,
    responses(
        (status = 200, description = "保存成功, 权重已归一化", body = MessageResponse),
        (status = 400, description = "权重或次数格式错误, 奖品列表保持不变", body = ErrorResponse)
    )
)]
/// 整体替换奖品列表 (先校验, 后替换, 再归一化)
pub async fn save_admin_changes(
    registry: web::Data<PrizeRegistry>,
    payload: web::Json<ReplacePrizesRequest>,
) -> Result<HttpResponse> {
    match registry.replace_all(&payload.prizes).await {
        Ok(_) => Ok(HttpResponse::Ok().json(MessageResponse::success("Changes saved successfully."))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/delete_prize",
    tag = "admin",
    request_body = DeletePrizeRequest,
    responses(
        (status = 200, description = "删除成功 (名称不存在时 removed = 0)", body = DeletePrizeResponse),
        (status = 400, description = "请求体格式错误", body = ErrorResponse)
    )
)]
/// 删除所有同名奖品并归一化
pub async fn delete_prize(
    registry: web::Data<PrizeRegistry>,
    payload: web::Json<DeletePrizeRequest>,
) -> Result<HttpResponse> {
    let name = payload.into_inner().name;
    let removed = registry.delete(&name).await;
    Ok(HttpResponse::Ok().json(DeletePrizeResponse {
        success: true,
        message: format!("Prize \"{name}\" deleted."),
        removed,
    }))
}

pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/admin", web::get().to(admin_page))
        .route("/prizes", web::get().to(get_prizes))
        .route("/save_admin_changes", web::post().to(save_admin_changes))
        .route("/delete_prize", web::post().to(delete_prize));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::json_config;
    use actix_web::{App, http::StatusCode, test};
    use serde_json::{Value, json};

    fn seeded() -> PrizeRegistry {
        PrizeRegistry::new(vec![
            Prize::new("GET A CLUE", 20.0, 0),
            Prize::new("DETOUR", 20.0, 1),
            Prize::new("ROADBLOCK", 60.0, 0),
        ])
    }

    macro_rules! admin_app {
        ($registry:expr) => {
            test::init_service(
                App::new()
                    .app_data(json_config())
                    .app_data(web::Data::new($registry.clone()))
                    .configure(admin_config),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_get_prizes_in_order() {
        let registry = seeded();
        let app = admin_app!(registry);

        let req = test::TestRequest::get().uri("/prizes").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"][0]["name"], "GET A CLUE");
        assert_eq!(body["data"][1]["remainingUses"], 1);
        assert_eq!(body["data"][2]["weight"], 60.0);
    }

    #[actix_web::test]
    async fn test_save_admin_changes_normalizes() {
        let registry = seeded();
        let app = admin_app!(registry);

        let req = test::TestRequest::post()
            .uri("/save_admin_changes")
            .set_json(json!({
                "prizes": [
                    { "name": "A", "probability": "1", "usage_limit": "0" },
                    { "name": "B", "probability": "3", "usage_limit": "2" }
                ]
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Changes saved successfully.");

        assert_eq!(
            registry.snapshot().await,
            vec![Prize::new("A", 25.0, 0), Prize::new("B", 75.0, 2)]
        );
    }

    #[actix_web::test]
    async fn test_save_admin_changes_rejects_bad_weight() {
        let registry = seeded();
        let before = registry.snapshot().await;
        let app = admin_app!(registry);

        let req = test::TestRequest::post()
            .uri("/save_admin_changes")
            .set_json(json!({
                "prizes": [{ "name": "A", "probability": "many", "usage_limit": "0" }]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        assert_eq!(registry.snapshot().await, before);
    }

    #[actix_web::test]
    async fn test_malformed_body_is_validation_error() {
        let registry = seeded();
        let app = admin_app!(registry);

        let req = test::TestRequest::post()
            .uri("/delete_prize")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(registry.len().await, 3);
    }

    #[actix_web::test]
    async fn test_delete_without_name_is_validation_error() {
        let registry = seeded();
        let before = registry.snapshot().await;
        let app = admin_app!(registry);

        let req = test::TestRequest::post()
            .uri("/delete_prize")
            .set_json(json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        assert_eq!(registry.snapshot().await, before);
    }

    #[actix_web::test]
    async fn test_delete_prize() {
        let registry = seeded();
        let app = admin_app!(registry);

        let req = test::TestRequest::post()
            .uri("/delete_prize")
            .set_json(json!({ "name": "DETOUR" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Prize \"DETOUR\" deleted.");
        assert_eq!(body["removed"], 1);

        assert_eq!(
            registry.snapshot().await,
            vec![Prize::new("GET A CLUE", 25.0, 0), Prize::new("ROADBLOCK", 75.0, 0)]
        );

        let req = test::TestRequest::post()
            .uri("/delete_prize")
            .set_json(json!({ "name": "DETOUR" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["removed"], 0);
        assert_eq!(registry.len().await, 2);
    }

    #[actix_web::test]
    async fn test_admin_page_lists_prizes() {
        let registry = seeded();
        let app = admin_app!(registry);

        let req = test::TestRequest::get().uri("/admin").to_request();
        let html = test::call_and_read_body(&app, req).await;
        let html = std::str::from_utf8(&html).unwrap();
        assert!(html.contains("value=\"ROADBLOCK\""));
        assert!(html.contains("/static/admin.js"));
    }
}
