//! Ordered index trait / 有序索引 trait

use std::ops::Bound;

use crate::Result;

/// Scan visitor, return `false` to stop / 扫描回调，返回 `false` 停止
pub type Visit<'a> = dyn FnMut(&[u8], &[u8]) -> bool + 'a;

/// Ordered key-value index, every call runs inside transaction `T`
/// 有序键值索引，每次调用都在事务 `T` 内执行
pub trait Index<T>: Send + Sync {
  /// Point read / 点查
  fn get(&self, txn: &mut T, key: &[u8]) -> Result<Option<Vec<u8>>>;

  /// Upsert / 写入或覆盖
  fn put(&self, txn: &mut T, key: &[u8], val: &[u8]) -> Result<()>;

  /// Insert a key known to be new / 插入已知不存在的键
  fn insert(&self, txn: &mut T, key: &[u8], val: &[u8]) -> Result<()> {
    self.put(txn, key, val)
  }

  /// Visit keys from `start` up to `end` in ascending order / 按键升序访问 `start` 到 `end` 之间的记录
  fn scan(&self, txn: &mut T, start: &[u8], end: Bound<&[u8]>, visit: &mut Visit<'_>)
  -> Result<()>;

  /// Committed record count, for diagnostics / 已提交记录数，用于诊断
  fn size(&self) -> usize;
}
