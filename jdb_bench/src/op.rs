// Transaction bodies and their outcome
// 事务体及其结果

use jdb_trait::{Db, TxnFlags};

use crate::{Dispatcher, Result};

/// One transaction kind, body only, the caller commits
/// 一种事务，只含事务体，由调用方提交
pub trait Op<D: Db>: Send + Sync {
  fn name(&self) -> &str;

  /// Run the body inside `txn`. Retryable failures return `Error::Abort`.
  /// 在 `txn` 中执行事务体，可重试的失败返回 `Error::Abort`
  fn run(&self, db: &D, txn: &mut D::Txn, rng: &mut fastrand::Rng) -> jdb_trait::Result<()>;
}

/// Weighted ops, weights in (0, 1] summing to 1
/// 带权重的事务，权重在 (0, 1] 内且和为 1
pub type Workload<'a, D> = Vec<(f64, Box<dyn Op<D> + 'a>)>;

/// Built dispatcher over ops / 构建好的事务分派器
pub type Ops<'a, D> = Dispatcher<Box<dyn Op<D> + 'a>>;

/// Closure as op / 以闭包作为事务
pub struct FnOp<F> {
  name: String,
  f: F,
}

impl<F> FnOp<F> {
  pub fn new(name: impl Into<String>, f: F) -> Self {
    Self {
      name: name.into(),
      f,
    }
  }
}

impl<D, F> Op<D> for FnOp<F>
where
  D: Db,
  F: Fn(&D, &mut D::Txn, &mut fastrand::Rng) -> jdb_trait::Result<()> + Send + Sync,
{
  fn name(&self) -> &str {
    &self.name
  }

  fn run(&self, db: &D, txn: &mut D::Txn, rng: &mut fastrand::Rng) -> jdb_trait::Result<()> {
    (self.f)(db, txn, rng)
  }
}

/// Result of one attempt / 单次尝试的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
  Committed,
  /// Body or commit aborted, counted / 事务体或提交中止，计入统计
  Aborted(String),
  /// Commit returned false, not counted / 提交返回 false，不计入统计
  Rejected,
}

/// Run `op` in a fresh transaction and commit it. Non-abort errors are fatal.
/// 在新事务中执行 `op` 并提交，非中止错误为致命错误
pub fn exec<D: Db>(
  db: &D,
  op: &dyn Op<D>,
  flags: TxnFlags,
  rng: &mut fastrand::Rng,
) -> Result<Outcome> {
  let mut txn = db.new_txn(flags);
  let r = match op.run(db, &mut txn, rng) {
    Ok(()) => db.commit_txn(&mut txn),
    Err(e) => Err(e),
  };
  match r {
    Ok(true) => Ok(Outcome::Committed),
    Ok(false) => Ok(Outcome::Rejected),
    Err(jdb_trait::Error::Abort(reason)) => {
      db.abort_txn(&mut txn);
      Ok(Outcome::Aborted(reason))
    }
    Err(e) => {
      db.abort_txn(&mut txn);
      Err(e.into())
    }
  }
}
