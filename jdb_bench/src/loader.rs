// Batched bulk loading before measurement
// 测量前的分批批量加载

use std::ops::Range;

use jdb_trait::Db;
use log::{debug, log};

use crate::{Error, Result, RunConfig};

/// Batch size when the store reports no limit / 存储未报告上限时的批量大小
pub const DEFAULT_BATCH: usize = 10000;

/// Records per load transaction / 每个加载事务的记录数
pub fn batch_size<D: Db>(db: &D) -> Result<usize> {
  match db.txn_max_batch_size() {
    None => Ok(DEFAULT_BATCH),
    Some(0) => Err(Error::Conf("txn_max_batch_size is 0")),
    Some(n) => Ok(n),
  }
}

/// Cut `range` into `len / size` contiguous batches, the last one takes the remainder
/// 把 `range` 切成 `len / size` 个连续批次，最后一批吸收余数
pub fn batches(range: Range<u64>, size: usize) -> Vec<Range<u64>> {
  let Range { start, end } = range;
  if start >= end {
    return Vec::new();
  }
  let size = size.max(1) as u64;
  let n = ((end - start) / size).max(1);
  (0..n)
    .map(|i| {
      let lo = start + i * size;
      let hi = if i + 1 == n { end } else { lo + size };
      lo..hi
    })
    .collect()
}

/// Split `[0, total)` into at most `n` disjoint contiguous ranges
/// 把 `[0, total)` 划分为至多 `n` 个互不相交的连续区间
pub fn split(total: u64, n: usize) -> Vec<Range<u64>> {
  let n = n.max(1) as u64;
  let base = total / n;
  let rem = total % n;
  let mut lo = 0;
  let mut out = Vec::with_capacity(n as usize);
  for i in 0..n {
    let hi = lo + base + u64::from(i < rem);
    if hi > lo {
      out.push(lo..hi);
    }
    lo = hi;
  }
  out
}

/// One loader thread's job / 单个加载线程的任务
pub trait Loader<D: Db>: Send {
  fn name(&self) -> String;

  /// Populate, returns records loaded. Must be conflict free.
  /// 填充数据，返回加载的记录数，必须无冲突
  fn load(&self, db: &D, conf: &RunConfig) -> Result<u64>;
}

/// Inserts a key range, one transaction per batch
/// 插入一段键区间，每批一个事务
pub struct RangeLoader<'a, D: Db, F> {
  table: String,
  index: &'a D::Index,
  range: Range<u64>,
  fill: F,
}

impl<'a, D: Db, F> RangeLoader<'a, D, F>
where
  F: Fn(&D::Index, &mut D::Txn, u64) -> jdb_trait::Result<()> + Send + Sync,
{
  /// `fill` writes record `n` into the transaction / `fill` 把第 `n` 条记录写入事务
  pub fn new(table: impl Into<String>, index: &'a D::Index, range: Range<u64>, fill: F) -> Self {
    Self {
      table: table.into(),
      index,
      range,
      fill,
    }
  }

  fn batch(&self, db: &D, flags: u64, b: &Range<u64>) -> Result<()> {
    let fail = |reason: String| Error::Load {
      table: self.table.clone(),
      lo: b.start,
      hi: b.end,
      reason,
    };

    let mut txn = db.new_txn(flags);
    let r = b
      .clone()
      .try_for_each(|n| (self.fill)(self.index, &mut txn, n))
      .and_then(|()| db.commit_txn(&mut txn));
    match r {
      Ok(true) => Ok(()),
      Ok(false) => Err(fail("commit rejected".into())),
      Err(e) => {
        db.abort_txn(&mut txn);
        Err(fail(e.to_string()))
      }
    }
  }
}

impl<D, F> Loader<D> for RangeLoader<'_, D, F>
where
  D: Db,
  F: Fn(&D::Index, &mut D::Txn, u64) -> jdb_trait::Result<()> + Send + Sync,
{
  fn name(&self) -> String {
    format!("{}[{}, {})", self.table, self.range.start, self.range.end)
  }

  fn load(&self, db: &D, conf: &RunConfig) -> Result<u64> {
    let size = batch_size(db)?;
    let list = batches(self.range.clone(), size);
    debug!("{}: {} batches of {size}", self.name(), list.len());
    for b in &list {
      self.batch(db, conf.txn_flags, b)?;
      log!(
        conf.level(),
        "{}: batch [{}, {}) loaded",
        self.table,
        b.start,
        b.end
      );
    }
    Ok(self.range.end.saturating_sub(self.range.start))
  }
}
