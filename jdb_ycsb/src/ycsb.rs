// YCSB benchmark: USERTABLE loaders and the transaction mix
// YCSB 基准：USERTABLE 加载器与事务组合

use jdb_bench::{Bench, Error, Loader, Op, RangeLoader, Result, RunConfig, Workload, split};
use jdb_trait::{Db, Index};
use log::debug;

use crate::{
  Mix, YcsbOp,
  key::{LOAD_VAL, PER_SCALE, USERTABLE, key},
};

/// Records for `scale_factor` / `scale_factor` 对应的记录数
pub fn nkeys(scale_factor: f64) -> Result<u64> {
  let n = (scale_factor * PER_SCALE) as u64;
  if n == 0 {
    return Err(Error::Conf("scale_factor gives 0 records"));
  }
  Ok(n)
}

fn fill<D: Db>(index: &D::Index, txn: &mut D::Txn, n: u64) -> jdb_trait::Result<()> {
  index.insert(txn, &key(n), &LOAD_VAL)
}

pub struct Ycsb<D: Db> {
  index: D::Index,
  nkeys: u64,
  mix: Mix,
}

impl<D: Db> Ycsb<D> {
  pub fn new(db: &D, conf: &RunConfig, mix: Mix) -> Result<Self> {
    let nkeys = nkeys(conf.scale_factor)?;
    let index = db.open_index(USERTABLE)?;
    debug!("ycsb: {nkeys} keys, mix {mix:?}");
    Ok(Self { index, nkeys, mix })
  }

  pub fn nkeys(&self) -> u64 {
    self.nkeys
  }

  pub fn index(&self) -> &D::Index {
    &self.index
  }
}

impl<D: Db> Bench<D> for Ycsb<D> {
  fn name(&self) -> &str {
    "ycsb"
  }

  fn loaders(&self, conf: &RunConfig) -> Result<Vec<Box<dyn Loader<D> + '_>>> {
    Ok(
      split(self.nkeys, conf.loaders)
        .into_iter()
        .map(|r| {
          Box::new(RangeLoader::<D, _>::new(USERTABLE, &self.index, r, fill::<D>))
            as Box<dyn Loader<D> + '_>
        })
        .collect(),
    )
  }

  fn workload(&self) -> Workload<'_, D> {
    self
      .mix
      .weights()
      .into_iter()
      .map(|(kind, w)| {
        let op: Box<dyn Op<D> + '_> = Box::new(YcsbOp::<D>::new(kind, &self.index, self.nkeys));
        (w, op)
      })
      .collect()
  }

  fn tables(&self) -> Vec<(&str, &D::Index)> {
    vec![(USERTABLE, &self.index)]
  }
}
