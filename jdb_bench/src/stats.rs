// Per-worker counters and run-level aggregation
// 每线程计数器与运行级聚合

use std::{io::Write, time::Duration};

use log::{Level, log};
use serde::{Deserialize, Serialize};

use crate::{Error, LatencyHistogram, LatencyStats, Result};

/// Counters owned by one worker / 单个工作线程独占的计数器
#[derive(Debug, Clone)]
pub struct TxnStats {
  pub commits: u64,
  pub aborts: u64,
  /// Commits per op, index-aligned with the dispatcher / 每种事务的提交数，与分派器下标对齐
  pub per_op: Vec<u64>,
  pub latency: LatencyHistogram,
}

impl TxnStats {
  pub fn new(n_ops: usize) -> Result<Self> {
    Ok(Self {
      commits: 0,
      aborts: 0,
      per_op: vec![0; n_ops],
      latency: LatencyHistogram::new()?,
    })
  }

  #[inline]
  pub fn commit(&mut self, op: usize, elapsed: Duration) {
    self.commits += 1;
    self.per_op[op] += 1;
    self
      .latency
      .record(u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX));
  }

  #[inline]
  pub fn abort(&mut self) {
    self.aborts += 1;
  }
}

/// Elementwise sum of equal-length vectors / 等长向量逐元素求和
pub fn elemwise_sum(a: &[u64], b: &[u64]) -> Result<Vec<u64>> {
  if a.len() != b.len() {
    return Err(Error::StatsLen {
      expect: a.len(),
      got: b.len(),
    });
  }
  Ok(a.iter().zip(b).map(|(x, y)| x + y).collect())
}

#[inline]
fn rate(n: u64, secs: f64) -> f64 {
  if secs > 0.0 { n as f64 / secs } else { 0.0 }
}

/// Run-level result / 运行级结果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunResult {
  pub commits: u64,
  pub aborts: u64,
  pub elapsed_ns: u64,
  pub workers: usize,
  /// Commits per second / 每秒提交数
  pub throughput: f64,
  pub per_core_throughput: f64,
  /// Aborts per second / 每秒中止数
  pub abort_rate: f64,
  pub per_core_abort_rate: f64,
  pub ops: Vec<String>,
  pub per_op: Vec<u64>,
  pub latency: LatencyStats,
}

impl RunResult {
  /// Combine joined workers' stats. Only call after every worker terminated.
  /// 合并已结束工作线程的统计，只能在所有工作线程结束后调用
  pub fn aggregate(names: &[String], stats: &[TxnStats], elapsed: Duration) -> Result<Self> {
    if stats.is_empty() {
      return Err(Error::NoWorker);
    }

    let mut commits = 0;
    let mut aborts = 0;
    let mut per_op = vec![0; names.len()];
    let mut latency = LatencyHistogram::new()?;
    for s in stats {
      commits += s.commits;
      aborts += s.aborts;
      per_op = elemwise_sum(&per_op, &s.per_op)?;
      latency.merge(&s.latency)?;
    }

    let secs = elapsed.as_secs_f64();
    let workers = stats.len();
    let throughput = rate(commits, secs);
    let abort_rate = rate(aborts, secs);
    Ok(Self {
      commits,
      aborts,
      elapsed_ns: u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX),
      workers,
      throughput,
      per_core_throughput: throughput / workers as f64,
      abort_rate,
      per_core_abort_rate: abort_rate / workers as f64,
      ops: names.to_vec(),
      per_op,
      latency: LatencyStats::from(&latency),
    })
  }

  pub fn elapsed(&self) -> Duration {
    Duration::from_nanos(self.elapsed_ns)
  }

  /// Machine-readable line: `throughput abort_rate`
  /// 机器可读输出行：`吞吐 中止率`
  pub fn line(&self) -> String {
    format!("{} {}", self.throughput, self.abort_rate)
  }

  pub fn write_line(&self, w: &mut impl Write) -> Result<()> {
    writeln!(w, "{}", self.line())?;
    Ok(())
  }

  pub fn to_json(&self) -> Result<String> {
    Ok(sonic_rs::to_string(self)?)
  }

  /// Log the breakdown / 输出明细日志
  pub fn log(&self, lv: Level) {
    let secs = self.elapsed().as_secs_f64();
    log!(lv, "--- benchmark statistics ---");
    log!(lv, "runtime: {secs} sec");
    log!(lv, "agg_throughput: {} ops/sec", self.throughput);
    log!(lv, "avg_per_core_throughput: {} ops/sec/core", self.per_core_throughput);
    log!(lv, "agg_abort_rate: {} aborts/sec", self.abort_rate);
    log!(lv, "avg_per_core_abort_rate: {} aborts/sec/core", self.per_core_abort_rate);
    log!(lv, "txn breakdown:");
    for (name, n) in self.ops.iter().zip(&self.per_op) {
      log!(lv, "  {name}: {n}");
    }
    let l = &self.latency;
    log!(
      lv,
      "commit latency ns: p50 {} p99 {} p999 {} max {}",
      l.p50,
      l.p99,
      l.p999,
      l.max
    );
  }
}
