// YCSB transaction bodies
// YCSB 事务体

use std::ops::Bound;

use jdb_bench::Op;
use jdb_trait::{Db, Error, Index, Result};

use crate::{
  Kind,
  key::{RMW_VAL, SCAN_LEN, WRITE_VAL, key},
};

pub struct YcsbOp<'a, D: Db> {
  kind: Kind,
  index: &'a D::Index,
  nkeys: u64,
}

impl<'a, D: Db> YcsbOp<'a, D> {
  pub fn new(kind: Kind, index: &'a D::Index, nkeys: u64) -> Self {
    Self { kind, index, nkeys }
  }

  pub fn kind(&self) -> Kind {
    self.kind
  }
}

impl<D: Db> Op<D> for YcsbOp<'_, D> {
  fn name(&self) -> &str {
    self.kind.name()
  }

  fn run(&self, _: &D, txn: &mut D::Txn, rng: &mut fastrand::Rng) -> Result<()> {
    let n = rng.u64(..self.nkeys);
    let k = key(n);
    match self.kind {
      Kind::Read => {
        // Every key below nkeys was loaded / nkeys 以下的键都已加载
        if self.index.get(txn, &k)?.is_none() {
          return Err(Error::NotFound);
        }
      }
      Kind::Write => self.index.put(txn, &k, &WRITE_VAL)?,
      Kind::Rmw => {
        if self.index.get(txn, &k)?.is_none() {
          return Err(Error::NotFound);
        }
        self.index.put(txn, &k, &RMW_VAL)?;
      }
      Kind::Scan => {
        let end = key(n + SCAN_LEN);
        self
          .index
          .scan(txn, &k, Bound::Excluded(&end[..]), &mut |_, _| true)?;
      }
    }
    Ok(())
  }
}
