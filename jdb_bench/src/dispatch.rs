// Weighted random choice over a fixed workload
// 固定工作负载上的加权随机选择

use crate::{Error, Result};

/// Tolerance of the weight sum / 权重和的容差
pub const WEIGHT_EPS: f64 = 1e-6;

/// Cumulative-weight table, immutable once built, shared by all workers
/// 累计权重表，构建后不可变，由所有工作线程共享
///
/// Entry `i` owns `[cum[i-1], cum[i])`, the last one also owns the leftover
/// rounding gap up to 1.0.
/// 第 `i` 项占 `[cum[i-1], cum[i])`，最后一项同时占据到 1.0 的舍入余量。
#[derive(Debug)]
pub struct Dispatcher<T> {
  cum: Vec<f64>,
  items: Vec<T>,
}

impl<T> Dispatcher<T> {
  pub fn new(weighted: impl IntoIterator<Item = (f64, T)>) -> Result<Self> {
    let mut cum = Vec::new();
    let mut items = Vec::new();
    let mut sum = 0.0;
    for (w, item) in weighted {
      // Also rejects NaN / 同时拒绝 NaN
      if !(w > 0.0 && w <= 1.0) {
        return Err(Error::Weight(w));
      }
      sum += w;
      cum.push(sum.min(1.0));
      items.push(item);
    }
    if items.is_empty() {
      return Err(Error::EmptyWorkload);
    }
    if (sum - 1.0).abs() > WEIGHT_EPS {
      return Err(Error::WeightSum(sum));
    }
    if let Some(last) = cum.last_mut() {
      *last = 1.0;
    }
    Ok(Self { cum, items })
  }

  /// Index owning `u`, `u` in [0, 1) / 拥有 `u` 的下标，`u` 取值 [0, 1)
  #[inline]
  pub fn pick(&self, u: f64) -> usize {
    self
      .cum
      .partition_point(|&c| c <= u)
      .min(self.items.len() - 1)
  }

  /// Draw one entry / 抽取一项
  #[inline]
  pub fn select(&self, rng: &mut fastrand::Rng) -> (usize, &T) {
    let i = self.pick(rng.f64());
    (i, &self.items[i])
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn items(&self) -> &[T] {
    &self.items
  }

  /// Interval `[lo, hi)` owned by entry `i` / 第 `i` 项占据的区间 `[lo, hi)`
  pub fn bounds(&self, i: usize) -> (f64, f64) {
    let lo = if i == 0 { 0.0 } else { self.cum[i - 1] };
    (lo, self.cum[i])
  }
}
