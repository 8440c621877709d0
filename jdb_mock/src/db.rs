//! Mock store / 模拟存储

use std::{
  collections::HashMap,
  sync::{
    Arc,
    atomic::{AtomicU64, Ordering::Relaxed},
  },
};

use jdb_trait::{Db, Error, Result};
use log::debug;
use parking_lot::Mutex;

use crate::{
  MockIndex, MockTxn,
  index::{Row, Table},
};

/// In-memory optimistic store / 内存乐观并发存储
#[derive(Default)]
pub struct MockDb {
  tables: Mutex<HashMap<String, Arc<Table>>>,
  /// Serializes validation and apply / 串行化校验与落盘
  commit_lock: Mutex<()>,
  ver: AtomicU64,
  seq: AtomicU64,

  max_batch: Option<usize>,
  abort_every: u64,
  reject_every: u64,
  record: bool,

  commits: AtomicU64,
  aborts: AtomicU64,
  epoch_syncs: AtomicU64,
  finishes: AtomicU64,
  log: Mutex<Vec<Vec<Vec<u8>>>>,
}

impl MockDb {
  pub fn new() -> Self {
    Self::default()
  }

  /// Report a max batch size / 上报最大批量
  pub fn with_max_batch(mut self, n: usize) -> Self {
    self.max_batch = Some(n);
    self
  }

  /// Every n-th commit fails with a retryable abort / 每第 n 次提交返回可重试中止
  pub fn with_abort_every(mut self, n: u64) -> Self {
    self.abort_every = n;
    self
  }

  /// Every n-th commit returns `Ok(false)` / 每第 n 次提交返回 `Ok(false)`
  pub fn with_reject_every(mut self, n: u64) -> Self {
    self.reject_every = n;
    self
  }

  /// Keep the written keys of every committed txn / 记录每个已提交事务写入的键
  pub fn with_record(mut self, on: bool) -> Self {
    self.record = on;
    self
  }

  /// Successful commits / 成功提交数
  pub fn commits(&self) -> u64 {
    self.commits.load(Relaxed)
  }

  /// `abort_txn` calls / `abort_txn` 调用次数
  pub fn aborts(&self) -> u64 {
    self.aborts.load(Relaxed)
  }

  pub fn epoch_syncs(&self) -> u64 {
    self.epoch_syncs.load(Relaxed)
  }

  pub fn finishes(&self) -> u64 {
    self.finishes.load(Relaxed)
  }

  /// Written keys per committed txn, in commit order / 按提交顺序的各事务写入键
  pub fn committed(&self) -> Vec<Vec<Vec<u8>>> {
    self.log.lock().clone()
  }

  /// Injected failure for commit number `n`, if any / 第 `n` 次提交的注入失败
  fn inject(&self, n: u64) -> Option<Result<bool>> {
    if self.abort_every > 0 && n % self.abort_every == 0 {
      return Some(Err(Error::abort("injected")));
    }
    if self.reject_every > 0 && n % self.reject_every == 0 {
      return Some(Ok(false));
    }
    None
  }
}

impl Db for MockDb {
  type Txn = MockTxn;
  type Index = MockIndex;

  fn new_txn(&self, flags: u64) -> MockTxn {
    MockTxn::new(flags)
  }

  fn commit_txn(&self, txn: &mut MockTxn) -> Result<bool> {
    let n = self.seq.fetch_add(1, Relaxed) + 1;
    if let Some(r) = self.inject(n) {
      if matches!(r, Ok(false)) {
        txn.clear();
      }
      return r;
    }

    let _guard = self.commit_lock.lock();

    for r in &txn.reads {
      if r.table.ver(&r.key) != r.ver {
        return Err(Error::abort("read validation"));
      }
    }
    for w in txn.writes.iter().filter(|w| w.insert) {
      if w.table.ver(&w.key) != 0 {
        return Err(Error::Store(format!("duplicate key in {}", w.table.name)));
      }
    }

    let ver = self.ver.fetch_add(1, Relaxed) + 1;
    let mut keys = Vec::new();
    for w in txn.writes.drain(..) {
      if self.record {
        keys.push(w.key.clone());
      }
      w.table.rows.write().insert(w.key, Row { ver, val: w.val });
    }
    if self.record {
      self.log.lock().push(keys);
    }
    txn.reads.clear();

    self.commits.fetch_add(1, Relaxed);
    Ok(true)
  }

  fn abort_txn(&self, txn: &mut MockTxn) {
    txn.clear();
    self.aborts.fetch_add(1, Relaxed);
  }

  fn open_index(&self, name: &str) -> Result<MockIndex> {
    if name.is_empty() {
      return Err(Error::NoIndex(name.into()));
    }
    let table = self
      .tables
      .lock()
      .entry(name.into())
      .or_insert_with(|| {
        debug!("mock: create table {name}");
        Arc::new(Table::new(name))
      })
      .clone();
    Ok(MockIndex { table })
  }

  fn do_txn_epoch_sync(&self) {
    self.epoch_syncs.fetch_add(1, Relaxed);
  }

  fn do_txn_finish(&self) {
    self.finishes.fetch_add(1, Relaxed);
  }

  fn txn_max_batch_size(&self) -> Option<usize> {
    self.max_batch
  }
}
