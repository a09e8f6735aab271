use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// 转盘奖品
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Prize {
    /// 奖品名称 (删除 / 更新时的唯一键)
    #[schema(example = "ROADBLOCK")]
    pub name: String,
    /// 相对权重 (归一化后为百分比)
    #[schema(example = 60.0)]
    pub weight: f64,
    /// 剩余可中奖次数 (0 = 不限量)
    #[serde(rename = "remainingUses", alias = "remaining_uses", alias = "usage_limit")]
    #[schema(example = 0)]
    pub remaining_uses: u32,
}

impl Prize {
    pub fn new(name: impl Into<String>, weight: f64, remaining_uses: u32) -> Self {
        Self {
            name: name.into(),
            weight,
            remaining_uses,
        }
    }

    /// 限量奖品: 每次中奖扣减一次
    pub fn is_limited(&self) -> bool {
        self.remaining_uses > 0
    }

    /// 是否参与抽奖。
    ///
    /// 不限量 (0) 或仍有剩余次数 (> 0) 的奖品都参与, 即所有奖品均参与;
    /// 次数耗尽的限量奖品与不限量奖品无法区分, 因此这里不做排除。
    pub fn is_eligible(&self) -> bool {
        self.remaining_uses == 0 || self.remaining_uses > 0
    }
}

/// 管理页面提交的原始奖品数据 (数值字段可能是数字或字符串)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PrizeInput {
    #[schema(example = "DETOUR")]
    pub name: String,
    #[serde(default, alias = "probability")]
    #[schema(value_type = String, example = "20")]
    pub weight: Value,
    #[serde(default, alias = "usage_limit", alias = "remainingUses")]
    #[schema(value_type = String, example = "1")]
    pub remaining_uses: Value,
}

impl PrizeInput {
    pub fn new(name: impl Into<String>, weight: Value, remaining_uses: Value) -> Self {
        Self {
            name: name.into(),
            weight,
            remaining_uses,
        }
    }

    /// 校验并转换为 Prize; `index` 仅用于错误信息
    pub fn validate(&self, index: usize) -> AppResult<Prize> {
        let weight = parse_weight(&self.weight).ok_or_else(|| {
            AppError::ValidationError(format!(
                "Prize #{} (\"{}\"): weight must be a non-negative number, got {}",
                index + 1,
                self.name,
                self.weight
            ))
        })?;
        let remaining_uses = parse_remaining_uses(&self.remaining_uses).ok_or_else(|| {
            AppError::ValidationError(format!(
                "Prize #{} (\"{}\"): usage limit must be a non-negative integer, got {}",
                index + 1,
                self.name,
                self.remaining_uses
            ))
        })?;
        Ok(Prize::new(self.name.clone(), weight, remaining_uses))
    }
}

fn parse_weight(value: &Value) -> Option<f64> {
    let weight = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (weight.is_finite() && weight >= 0.0).then_some(weight)
}

fn parse_remaining_uses(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

/// 保存奖品列表请求
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReplacePrizesRequest {
    #[serde(default)]
    pub prizes: Vec<PrizeInput>,
}

/// 删除奖品请求
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeletePrizeRequest {
    #[schema(example = "DETOUR")]
    pub name: String,
}

/// 删除奖品响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeletePrizeResponse {
    pub success: bool,
    #[schema(example = "Prize \"DETOUR\" deleted.")]
    pub message: String,
    /// 实际删除的条数 (名称不存在时为 0)
    pub removed: usize,
}

/// 奖品列表响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PrizeListResponse {
    pub success: bool,
    pub data: Vec<Prize>,
}

/// 抽奖结果
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SpinResponse {
    /// 奖品名称, 或 "No Prizes Available" / "Try Again"
    #[schema(example = "ROADBLOCK")]
    pub outcome: String,
}
