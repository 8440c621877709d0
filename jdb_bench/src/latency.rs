// Per-worker commit latency, merged after the run
// 每个工作线程的提交延迟，运行结束后合并

use hdrhistogram::Histogram;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Max latency value: 1 hour in nanoseconds
/// 最大延迟值：1小时（纳秒）
const MAX_LATENCY_NS: u64 = 3_600_000_000_000;

/// Significant figures for histogram precision
/// 直方图精度的有效数字
const SIGFIG: u8 = 3;

/// Latency histogram of committed transactions
/// 已提交事务的延迟直方图
#[derive(Debug, Clone)]
pub struct LatencyHistogram {
  inner: Histogram<u64>,
}

impl LatencyHistogram {
  pub fn new() -> Result<Self> {
    let inner = Histogram::new_with_bounds(1, MAX_LATENCY_NS, SIGFIG)?;
    Ok(Self { inner })
  }

  /// Record, clamped into [1, 1h] / 记录延迟，截断到 [1, 1h]
  #[inline]
  pub fn record(&mut self, latency_ns: u64) {
    let val = latency_ns.clamp(1, MAX_LATENCY_NS);
    // In bounds, cannot fail / 已在范围内，不会失败
    let _ = self.inner.record(val);
  }

  /// Fold another worker's samples in / 合并另一个工作线程的样本
  pub fn merge(&mut self, other: &Self) -> Result<()> {
    self.inner.add(&other.inner)?;
    Ok(())
  }

  pub fn quantile(&self, q: f64) -> u64 {
    self.inner.value_at_quantile(q)
  }

  pub fn count(&self) -> u64 {
    self.inner.len()
  }

  pub fn is_empty(&self) -> bool {
    self.inner.is_empty()
  }
}

/// Serializable latency stats snapshot
/// 可序列化的延迟统计快照
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LatencyStats {
  pub min: u64,
  pub max: u64,
  pub mean: f64,
  pub p50: u64,
  pub p99: u64,
  pub p999: u64,
  pub count: u64,
}

impl From<&LatencyHistogram> for LatencyStats {
  fn from(h: &LatencyHistogram) -> Self {
    if h.is_empty() {
      return Self::default();
    }
    let i = &h.inner;
    Self {
      min: i.min(),
      max: i.max(),
      mean: i.mean(),
      p50: h.quantile(0.50),
      p99: h.quantile(0.99),
      p999: h.quantile(0.999),
      count: h.count(),
    }
  }
}
