use actix_web::{HttpResponse, Result, web};

use crate::models::SpinResponse;
use crate::pages;
use crate::services::WheelSpinner;

/// 转盘页面
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(pages::render_index())
}

pub async fn wheel_script() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/javascript; charset=utf-8")
        .body(pages::WHEEL_SCRIPT)
}

pub async fn admin_script() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/javascript; charset=utf-8")
        .body(pages::ADMIN_SCRIPT)
}

#[utoipa::path(
    get,
    path = "/spin",
    tag = "wheel",
    responses(
        (status = 200, description = "抽奖结果 (奖品名称 / No Prizes Available / Try Again)", body = SpinResponse)
    )
)]
/// 进行一次抽奖:
/// 1. 读取奖品快照
/// 2. 按累计概率随机选出奖品
/// 3. 限量奖品扣减剩余次数
pub async fn spin(spinner: web::Data<WheelSpinner>) -> Result<HttpResponse> {
    let outcome = spinner.spin().await;
    Ok(HttpResponse::Ok().json(SpinResponse {
        outcome: outcome.to_string(),
    }))
}

/// 路由配置
pub fn wheel_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/spin", web::get().to(spin))
        .route("/spin", web::post().to(spin))
        .route("/static/wheel.js", web::get().to(wheel_script))
        .route("/static/admin.js", web::get().to(admin_script));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Prize;
    use crate::services::PrizeRegistry;
    use actix_web::{App, test};
    use serde_json::Value;

    #[actix_web::test]
    async fn test_spin_returns_outcome() {
        let registry = PrizeRegistry::new(vec![Prize::new("X", 100.0, 1)]);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(WheelSpinner::new(registry.clone())))
                .configure(wheel_config),
        )
        .await;

        let req = test::TestRequest::get().uri("/spin").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["outcome"], "X");
        assert_eq!(registry.snapshot().await[0].remaining_uses, 0);

        let req = test::TestRequest::post().uri("/spin").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["outcome"], "X");
        assert_eq!(registry.snapshot().await[0].remaining_uses, 0);
    }

    #[actix_web::test]
    async fn test_spin_without_prizes() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(WheelSpinner::new(PrizeRegistry::default())))
                .configure(wheel_config),
        )
        .await;

        let req = test::TestRequest::get().uri("/spin").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["outcome"], "No Prizes Available");
    }

    #[actix_web::test]
    async fn test_index_and_scripts_are_served() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(WheelSpinner::new(PrizeRegistry::default())))
                .configure(wheel_config),
        )
        .await;

        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        let html = test::read_body(resp).await;
        assert!(std::str::from_utf8(&html).unwrap().contains("spin-button"));

        for uri in ["/static/wheel.js", "/static/admin.js"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert!(resp.status().is_success(), "{uri}");
            assert_eq!(
                resp.headers().get("content-type").unwrap(),
                "application/javascript; charset=utf-8"
            );
        }
    }
}
