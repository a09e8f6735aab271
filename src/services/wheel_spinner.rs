use rand::Rng;
use std::fmt;

use crate::models::Prize;
use crate::services::PrizeRegistry;

/// 转盘刻度上限 (百分比)
pub const WHEEL_SCALE: f64 = 100.0;

/// 单次抽奖结果
#[derive(Debug, Clone, PartialEq)]
pub enum SpinOutcome {
    Won(String),
    /// 没有奖品或总权重为 0
    NoPrizesAvailable,
    /// 浮点误差导致随机数落在累计概率之外
    TryAgain,
}

impl SpinOutcome {
    pub fn as_str(&self) -> &str {
        match self {
            SpinOutcome::Won(name) => name,
            SpinOutcome::NoPrizesAvailable => "No Prizes Available",
            SpinOutcome::TryAgain => "Try Again",
        }
    }
}

impl fmt::Display for SpinOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 纯计算的抽奖结果, 命中时给出奖品在快照中的下标
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Draw {
    Hit(usize),
    NoPrizesAvailable,
    Miss,
}

/// 按顺序构建累计概率表 (相对参与抽奖奖品的总权重, 单位: 百分比)。
/// 返回 (快照下标, 累计值) 列表; 无参与奖品或总权重为 0 时返回 None。
pub fn cumulative_table(prizes: &[Prize]) -> Option<Vec<(usize, f64)>> {
    let eligible: Vec<(usize, &Prize)> = prizes
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_eligible())
        .collect();

    let total: f64 = eligible.iter().map(|(_, p)| p.weight).sum();
    if eligible.is_empty() || total == 0.0 {
        return None;
    }

    let mut acc = 0.0;
    Some(
        eligible
            .into_iter()
            .map(|(i, p)| {
                acc += p.weight / total * WHEEL_SCALE;
                (i, acc)
            })
            .collect(),
    )
}

/// 用给定的随机数 `roll` (0..=100) 完成一次抽奖: 第一个累计值 >= roll 的奖品中奖,
/// 边界值归前一个奖品。
pub fn draw(prizes: &[Prize], roll: f64) -> Draw {
    let Some(table) = cumulative_table(prizes) else {
        return Draw::NoPrizesAvailable;
    };

    table
        .iter()
        .find(|(_, cumulative)| roll <= *cumulative)
        .map(|(i, _)| Draw::Hit(*i))
        .unwrap_or(Draw::Miss)
}

/// 转盘抽奖服务 (本身无状态, 奖品状态全部在注册表中)
#[derive(Clone)]
pub struct WheelSpinner {
    registry: PrizeRegistry,
}

impl WheelSpinner {
    pub fn new(registry: PrizeRegistry) -> Self {
        Self { registry }
    }

    /// 使用线程本地随机数抽奖
    pub async fn spin(&self) -> SpinOutcome {
        let prizes = self.registry.snapshot().await;
        let roll = rand::thread_rng().gen_range(0.0..=WHEEL_SCALE);
        self.settle(&prizes, roll).await
    }

    /// 使用指定随机源抽奖 (测试中传入固定种子的 StdRng)
    pub async fn spin_with<R: Rng + ?Sized>(&self, rng: &mut R) -> SpinOutcome {
        let prizes = self.registry.snapshot().await;
        let roll = rng.gen_range(0.0..=WHEEL_SCALE);
        self.settle(&prizes, roll).await
    }

    /// 抽奖逻辑:
    /// 1. 在快照上按累计概率选出奖品
    /// 2. 命中限量奖品时扣减剩余次数
    /// 3. 返回奖品名称或提示文案
    async fn settle(&self, prizes: &[Prize], roll: f64) -> SpinOutcome {
        match draw(prizes, roll) {
            Draw::Hit(index) => {
                let prize = &prizes[index];
                if prize.is_limited() {
                    self.registry.apply_win(index, &prize.name).await;
                }
                log::debug!("Spin roll {:.4} landed on {:?}", roll, prize.name);
                SpinOutcome::Won(prize.name.clone())
            }
            Draw::NoPrizesAvailable => {
                log::debug!("Spin requested with no prizes available");
                SpinOutcome::NoPrizesAvailable
            }
            Draw::Miss => {
                log::warn!("Spin roll {} fell outside the cumulative table", roll);
                SpinOutcome::TryAgain
            }
        }
    }
}
