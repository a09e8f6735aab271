use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::AppResult;
use crate::models::{Prize, PrizeInput};

/// 奖品注册表: 进程内唯一的奖品列表, 所有读写都经过同一把锁
#[derive(Clone, Default)]
pub struct PrizeRegistry {
    prizes: Arc<Mutex<Vec<Prize>>>,
}

impl PrizeRegistry {
    /// 以给定列表初始化 (不做归一化)
    pub fn new(prizes: Vec<Prize>) -> Self {
        Self {
            prizes: Arc::new(Mutex::new(prizes)),
        }
    }

    /// 从原始输入构建, 任一条目非法则返回错误
    pub fn from_inputs(entries: &[PrizeInput]) -> AppResult<Self> {
        Ok(Self::new(validate_all(entries)?))
    }

    /// 当前奖品列表快照 (保持顺序)
    pub async fn snapshot(&self) -> Vec<Prize> {
        self.prizes.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.prizes.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.prizes.lock().await.is_empty()
    }

    /// 整体替换奖品列表。
    ///
    /// 先校验全部条目, 任一失败则保持原列表不变; 成功后按提交顺序安装并归一化。
    /// 返回安装的奖品数量。
    pub async fn replace_all(&self, entries: &[PrizeInput]) -> AppResult<usize> {
        let validated = validate_all(entries)?;
        let count = validated.len();

        let mut prizes = self.prizes.lock().await;
        *prizes = validated;
        normalize_weights(&mut prizes);

        log::info!("Prize list replaced with {} prize(s)", count);
        Ok(count)
    }

    /// 删除所有同名奖品并归一化, 返回删除条数 (不存在时为 0)
    pub async fn delete(&self, name: &str) -> usize {
        let mut prizes = self.prizes.lock().await;
        let before = prizes.len();
        prizes.retain(|p| p.name != name);
        let removed = before - prizes.len();
        normalize_weights(&mut prizes);

        log::info!("Deleted {} prize(s) named {:?}", removed, name);
        removed
    }

    /// 将权重重新归一化为百分比
    pub async fn normalize(&self) {
        let mut prizes = self.prizes.lock().await;
        normalize_weights(&mut prizes);
    }

    /// 中奖后扣减限量奖品的剩余次数。
    ///
    /// `index` 为中奖奖品在快照中的下标; 若该位置仍是同名限量奖品则直接扣减,
    /// 否则 (快照后列表已被替换) 扣减第一个同名且剩余次数 > 0 的奖品。
    /// 返回扣减后的剩余次数; 名称不存在或为不限量奖品时返回 None。
    pub async fn apply_win(&self, index: usize, name: &str) -> Option<u32> {
        let mut prizes = self.prizes.lock().await;
        let position = match prizes.get(index) {
            Some(p) if p.name == name && p.remaining_uses > 0 => index,
            _ => prizes
                .iter()
                .position(|p| p.name == name && p.remaining_uses > 0)?,
        };
        let prize = &mut prizes[position];
        prize.remaining_uses -= 1;

        log::info!(
            "Prize {:?} won, {} use(s) remaining",
            prize.name,
            prize.remaining_uses
        );
        Some(prize.remaining_uses)
    }
}

fn validate_all(entries: &[PrizeInput]) -> AppResult<Vec<Prize>> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| entry.validate(i))
        .collect()
}

/// 保留两位小数, 四舍五入 (远离零)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 按总权重归一化为百分比; 总权重为 0 时不做任何修改
pub fn normalize_weights(prizes: &mut [Prize]) {
    let total: f64 = prizes.iter().map(|p| p.weight).sum();
    if total <= 0.0 {
        return;
    }
    for p in prizes.iter_mut() {
        p.weight = round2(p.weight / total * 100.0);
    }
}
