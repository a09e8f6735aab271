pub mod admin;
pub mod wheel;

pub use admin::admin_config;
pub use wheel::wheel_config;

use crate::error::AppError;
use actix_web::web;

/// JSON 请求体解析失败统一返回 VALIDATION_ERROR
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into())
}
