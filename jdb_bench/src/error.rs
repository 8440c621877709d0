use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
  /// Fatal store error, aborts never surface here
  /// 致命存储错误，中止不会出现在这里
  #[error("store: {0}")]
  Db(#[from] jdb_trait::Error),

  #[error("weight {0} out of (0, 1]")]
  Weight(f64),

  #[error("weights sum to {0}, expected 1.0")]
  WeightSum(f64),

  #[error("empty workload")]
  EmptyWorkload,

  #[error("config: {0}")]
  Conf(&'static str),

  /// Loading is conflict free, any failure is a bug
  /// 加载阶段无冲突，任何失败都是缺陷
  #[error("load {table} [{lo}, {hi}): {reason}")]
  Load {
    table: String,
    lo: u64,
    hi: u64,
    reason: String,
  },

  #[error("stats length {got}, expected {expect}")]
  StatsLen { expect: usize, got: usize },

  #[error("no worker")]
  NoWorker,

  #[error("{0} panicked")]
  Panic(String),

  #[error("Histogram error: {0}")]
  Histogram(#[from] hdrhistogram::CreationError),

  #[error("Histogram merge error: {0}")]
  HistogramMerge(#[from] hdrhistogram::AdditionError),

  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),

  #[error("JSON error: {0}")]
  Json(#[from] sonic_rs::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
