use rand::{
    distr::uniform,
    {Rng, SeedableRng},
};
use rand_pcg::Pcg32;

/// 模拟专用的确定性RNG
///
/// 同一个种子总是产生同一局游戏。
#[derive(Debug, Clone)]
pub struct SimRng {
    rng: Pcg32,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// [0, 1) 内均匀分布的随机数
    pub fn uniform(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    pub fn random_bool(&mut self, probability: f64) -> bool {
        self.rng.random_bool(probability.clamp(0.0, 1.0))
    }

    /// 从列表中随机选择
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            let idx = self.random_range(0..items.len());
            items.get(idx)
        }
    }

    /// 生成指定范围内的随机值
    pub fn random_range<T, R>(&mut self, range: R) -> T
    where
        T: uniform::SampleUniform,
        R: uniform::SampleRange<T>,
    {
        self.rng.random_range(range)
    }
}

/// 战斗命中判定使用的随机源
pub trait RollSource {
    /// [0, 1) 内的一次抽样
    fn roll(&mut self) -> f64;
}

impl RollSource for SimRng {
    fn roll(&mut self) -> f64 {
        self.uniform()
    }
}

/// 固定结果的随机源，用于强制命中或未命中
#[derive(Debug, Clone, Copy)]
pub struct FixedRoll(pub f64);

impl RollSource for FixedRoll {
    fn roll(&mut self) -> f64 {
        self.0
    }
}
