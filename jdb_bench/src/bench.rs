// A benchmark: its loaders and its transaction mix
// 一个基准测试：加载器与事务组合

use jdb_trait::Db;

use crate::{Loader, Result, RunConfig, Workload};

pub trait Bench<D: Db> {
  fn name(&self) -> &str;

  /// Loaders, one thread each, over disjoint key ranges
  /// 加载器，每个一个线程，键区间互不相交
  fn loaders(&self, conf: &RunConfig) -> Result<Vec<Box<dyn Loader<D> + '_>>>;

  /// Weighted ops / 带权重的事务
  fn workload(&self) -> Workload<'_, D>;

  /// Tables whose size is logged after loading / 加载后输出大小的表
  fn tables(&self) -> Vec<(&str, &D::Index)> {
    Vec::new()
  }
}
