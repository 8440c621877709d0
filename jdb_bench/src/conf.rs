// Run configuration
// 运行配置

use std::{path::Path, time::Duration};

use log::{Level, log};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default run seed / 默认运行种子
pub const SEED: u64 = 8544290;

/// Default run duration / 默认运行时长
pub const DURATION: Duration = Duration::from_secs(30);

/// Run configuration, read-only once the run starts
/// 运行配置，运行开始后只读
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
  /// Worker threads / 工作线程数
  pub threads: usize,
  /// Dataset size multiplier / 数据集规模系数
  pub scale_factor: f64,
  /// Measured window / 测量窗口
  pub duration: Duration,
  /// Opaque flags for `new_txn` / 传给 `new_txn` 的不透明标志
  pub txn_flags: u64,
  /// Seed for worker seeds / 派生各工作线程种子的种子
  pub seed: u64,
  /// Loader threads / 加载线程数
  pub loaders: usize,
  /// Diagnostics at info instead of debug / 诊断输出用 info 而非 debug 级别
  pub verbose: bool,
}

impl Default for RunConfig {
  fn default() -> Self {
    Self {
      threads: 1,
      scale_factor: 1.0,
      duration: DURATION,
      txn_flags: 0,
      seed: SEED,
      loaders: 1,
      verbose: false,
    }
  }
}

impl RunConfig {
  pub fn with_threads(mut self, n: usize) -> Self {
    self.threads = n;
    self
  }

  pub fn with_scale_factor(mut self, s: f64) -> Self {
    self.scale_factor = s;
    self
  }

  pub fn with_duration(mut self, d: Duration) -> Self {
    self.duration = d;
    self
  }

  pub fn with_txn_flags(mut self, flags: u64) -> Self {
    self.txn_flags = flags;
    self
  }

  pub fn with_seed(mut self, seed: u64) -> Self {
    self.seed = seed;
    self
  }

  pub fn with_loaders(mut self, n: usize) -> Self {
    self.loaders = n;
    self
  }

  pub fn with_verbose(mut self, on: bool) -> Self {
    self.verbose = on;
    self
  }

  pub fn validate(&self) -> Result<()> {
    if self.threads == 0 {
      return Err(Error::Conf("threads must be >= 1"));
    }
    if !(self.scale_factor.is_finite() && self.scale_factor > 0.0) {
      return Err(Error::Conf("scale_factor must be > 0"));
    }
    if self.duration.is_zero() {
      return Err(Error::Conf("duration must be > 0"));
    }
    if self.loaders == 0 {
      return Err(Error::Conf("loaders must be >= 1"));
    }
    Ok(())
  }

  /// Parse and validate JSON / 解析并校验 JSON
  pub fn from_json(json: &str) -> Result<Self> {
    let conf: Self = sonic_rs::from_str(json)?;
    conf.validate()?;
    Ok(conf)
  }

  /// Load from a JSON file / 从 JSON 文件加载
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    Self::from_json(&std::fs::read_to_string(path)?)
  }

  /// Log level of diagnostics / 诊断输出的日志级别
  #[inline]
  pub fn level(&self) -> Level {
    if self.verbose {
      Level::Info
    } else {
      Level::Debug
    }
  }

  /// Echo settings / 回显设置
  pub fn echo(&self, bench: &str) {
    let lv = self.level();
    log!(lv, "settings:");
    log!(lv, "  bench       : {bench}");
    log!(lv, "  scale       : {}", self.scale_factor);
    log!(lv, "  num-threads : {}", self.threads);
    log!(lv, "  loaders     : {}", self.loaders);
    log!(lv, "  txn-flags   : {:#x}", self.txn_flags);
    log!(lv, "  runtime     : {:?}", self.duration);
    log!(lv, "  seed        : {}", self.seed);
  }
}
