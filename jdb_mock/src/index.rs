//! Mock index / 模拟索引

use std::{
  collections::BTreeMap,
  ops::Bound,
  sync::Arc,
};

use jdb_trait::{Index, Result, Visit};
use parking_lot::RwLock;

use crate::{
  MockTxn,
  txn::{Read, Write},
};

pub(crate) struct Row {
  pub ver: u64,
  pub val: Vec<u8>,
}

pub(crate) struct Table {
  pub name: String,
  pub rows: RwLock<BTreeMap<Vec<u8>, Row>>,
}

impl Table {
  pub fn new(name: &str) -> Self {
    Self {
      name: name.into(),
      rows: RwLock::new(BTreeMap::new()),
    }
  }

  /// Committed version of `key`, 0 if absent / `key` 的已提交版本，不存在为 0
  pub fn ver(&self, key: &[u8]) -> u64 {
    self.rows.read().get(key).map_or(0, |r| r.ver)
  }
}

/// Handle to one table / 单表句柄
#[derive(Clone)]
pub struct MockIndex {
  pub(crate) table: Arc<Table>,
}

impl MockIndex {
  /// Table name / 表名
  pub fn name(&self) -> &str {
    &self.table.name
  }

  /// Committed value, outside any transaction / 事务外读取已提交值
  pub fn peek(&self, key: &[u8]) -> Option<Vec<u8>> {
    self.table.rows.read().get(key).map(|r| r.val.clone())
  }
}

impl Index<MockTxn> for MockIndex {
  fn get(&self, txn: &mut MockTxn, key: &[u8]) -> Result<Option<Vec<u8>>> {
    if let Some(val) = txn.own(&self.table, key) {
      return Ok(Some(val.to_vec()));
    }

    let (ver, val) = match self.table.rows.read().get(key) {
      Some(r) => (r.ver, Some(r.val.clone())),
      None => (0, None),
    };
    txn.reads.push(Read {
      table: self.table.clone(),
      key: key.to_vec(),
      ver,
    });
    Ok(val)
  }

  fn put(&self, txn: &mut MockTxn, key: &[u8], val: &[u8]) -> Result<()> {
    txn.writes.push(Write {
      table: self.table.clone(),
      key: key.to_vec(),
      val: val.to_vec(),
      insert: false,
    });
    Ok(())
  }

  fn insert(&self, txn: &mut MockTxn, key: &[u8], val: &[u8]) -> Result<()> {
    txn.writes.push(Write {
      table: self.table.clone(),
      key: key.to_vec(),
      val: val.to_vec(),
      insert: true,
    });
    Ok(())
  }

  // Own writes are not merged into scans / 扫描不合并本事务的写入
  fn scan(
    &self,
    txn: &mut MockTxn,
    start: &[u8],
    end: Bound<&[u8]>,
    visit: &mut Visit<'_>,
  ) -> Result<()> {
    // BTreeMap::range panics on an inverted range / 倒置区间会让 BTreeMap::range panic
    if let Bound::Included(e) | Bound::Excluded(e) = end
      && e < start
    {
      return Ok(());
    }

    let rows = self.table.rows.read();
    for (key, row) in rows.range::<[u8], _>((Bound::Included(start), end)) {
      txn.reads.push(Read {
        table: self.table.clone(),
        key: key.clone(),
        ver: row.ver,
      });
      if !visit(key, &row.val) {
        break;
      }
    }
    Ok(())
  }

  fn size(&self) -> usize {
    self.table.rows.read().len()
  }
}
