//! Store trait / 存储 trait

use crate::{Index, Result, TxnFlags};

/// Transactional store shared by every benchmark thread
/// 所有基准线程共享的事务存储
///
/// The store brings its own concurrency control; callers never lock around
/// it and never share one `Txn` between threads.
/// 存储自带并发控制；调用方不会在外部加锁，也不会跨线程共享同一个 `Txn`。
pub trait Db: Send + Sync {
  /// Transaction handle / 事务句柄
  type Txn: Send;

  /// Ordered index bound to this store's transactions / 绑定本存储事务的有序索引
  type Index: Index<Self::Txn>;

  /// Begin a transaction / 开始事务
  fn new_txn(&self, flags: TxnFlags) -> Self::Txn;

  /// Try to commit, `Ok(false)` means the store did not commit
  /// 尝试提交，`Ok(false)` 表示存储未提交
  ///
  /// May also fail with `Error::Abort` on conflict.
  /// 冲突时也可能返回 `Error::Abort`。
  fn commit_txn(&self, txn: &mut Self::Txn) -> Result<bool>;

  /// Discard a transaction after an abort / 中止后丢弃事务
  fn abort_txn(&self, txn: &mut Self::Txn);

  /// Open (or create) a named index / 打开（或创建）具名索引
  fn open_index(&self, name: &str) -> Result<Self::Index>;

  /// Make everything committed so far visible to later transactions
  /// 使此前已提交的数据对后续事务可见
  fn do_txn_epoch_sync(&self) {}

  /// Run finished, no transaction follows / 运行结束，之后不再有事务
  fn do_txn_finish(&self) {}

  /// Max records per transaction, `None` = unbounded
  /// 单事务最大记录数，`None` 表示不限
  fn txn_max_batch_size(&self) -> Option<usize> {
    None
  }

  /// Whether `get` hands out store memory instead of a copy
  /// `get` 是否直接返回存储内存而非拷贝
  fn index_supports_direct_mem_access(&self) -> bool {
    false
  }
}
