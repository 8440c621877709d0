//! Store errors / 存储错误

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
  /// Transactional conflict, the caller aborts and moves on
  /// 事务冲突，调用方中止后继续
  #[error("txn abort: {0}")]
  Abort(String),

  #[error("key not found")]
  NotFound,

  #[error("index not found: {0}")]
  NoIndex(String),

  #[error("store: {0}")]
  Store(String),
}

impl Error {
  /// Retryable abort / 可重试的中止
  pub fn abort(reason: impl Into<String>) -> Self {
    Self::Abort(reason.into())
  }

  /// Only `Abort` is expected under contention, everything else is fatal
  /// 只有 `Abort` 是竞争下的预期结果，其余均为致命错误
  #[inline]
  pub fn is_abort(&self) -> bool {
    matches!(self, Self::Abort(_))
  }
}
