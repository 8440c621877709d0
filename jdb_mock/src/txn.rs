//! Transaction handle / 事务句柄

use std::sync::Arc;

use crate::index::Table;

pub(crate) struct Read {
  pub table: Arc<Table>,
  pub key: Vec<u8>,
  /// 0 = absent / 0 表示不存在
  pub ver: u64,
}

pub(crate) struct Write {
  pub table: Arc<Table>,
  pub key: Vec<u8>,
  pub val: Vec<u8>,
  pub insert: bool,
}

/// Mock transaction / 模拟事务
pub struct MockTxn {
  pub(crate) flags: u64,
  pub(crate) reads: Vec<Read>,
  pub(crate) writes: Vec<Write>,
}

impl MockTxn {
  pub(crate) fn new(flags: u64) -> Self {
    Self {
      flags,
      reads: Vec::new(),
      writes: Vec::new(),
    }
  }

  /// Flags given to `new_txn` / 创建时的标志
  pub fn flags(&self) -> u64 {
    self.flags
  }

  /// Buffered writes / 已缓冲的写入数
  pub fn write_count(&self) -> usize {
    self.writes.len()
  }

  pub(crate) fn clear(&mut self) {
    self.reads.clear();
    self.writes.clear();
  }

  /// Own uncommitted write of `key`, latest first / 本事务对 `key` 的最新未提交写入
  pub(crate) fn own(&self, table: &Arc<Table>, key: &[u8]) -> Option<&[u8]> {
    self
      .writes
      .iter()
      .rev()
      .find(|w| Arc::ptr_eq(&w.table, table) && w.key == key)
      .map(|w| w.val.as_slice())
  }
}
