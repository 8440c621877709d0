// Measured transaction loop of one thread
// 单线程的测量事务循环

use std::time::Instant;

use jdb_trait::{Db, TxnFlags};
use log::{debug, error};

use crate::{Gate, Ops, Outcome, Result, Stop, TxnStats, op::exec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
  Init,
  Waiting,
  Running,
  Stopped,
}

pub struct Worker<'a, D: Db> {
  id: usize,
  db: &'a D,
  ops: &'a Ops<'a, D>,
  gate: &'a Gate,
  stop: &'a Stop,
  flags: TxnFlags,
  rng: fastrand::Rng,
  stats: TxnStats,
  state: State,
}

impl<'a, D: Db> Worker<'a, D> {
  pub fn new(
    id: usize,
    db: &'a D,
    ops: &'a Ops<'a, D>,
    gate: &'a Gate,
    stop: &'a Stop,
    flags: TxnFlags,
    seed: u64,
  ) -> Result<Self> {
    Ok(Self {
      id,
      db,
      ops,
      gate,
      stop,
      flags,
      rng: fastrand::Rng::with_seed(seed),
      stats: TxnStats::new(ops.len())?,
      state: State::Init,
    })
  }

  pub fn id(&self) -> usize {
    self.id
  }

  pub fn state(&self) -> State {
    self.state
  }

  pub fn stats(&self) -> &TxnStats {
    &self.stats
  }

  /// Wait for launch, loop until stopped, hand the stats back
  /// 等待出发，循环直到停止，交回统计
  pub fn run(mut self) -> Result<TxnStats> {
    let stop = self.stop;
    let _guard = stop.guard();

    self.state = State::Waiting;
    self.gate.arrive();

    self.state = State::Running;
    while !stop.is_set() {
      if let Err(e) = self.step() {
        error!("worker {}: {e}", self.id);
        let _ = stop.set();
        self.state = State::Stopped;
        return Err(e);
      }
    }

    self.state = State::Stopped;
    debug!(
      "worker {}: {} commits {} aborts",
      self.id, self.stats.commits, self.stats.aborts
    );
    Ok(self.stats)
  }

  /// One transaction, always finished before returning
  /// 执行一个事务，返回前必然结束
  pub fn step(&mut self) -> Result<Outcome> {
    let (i, op) = self.ops.select(&mut self.rng);
    let begin = Instant::now();
    let outcome = exec(self.db, op.as_ref(), self.flags, &mut self.rng)?;
    match &outcome {
      Outcome::Committed => self.stats.commit(i, begin.elapsed()),
      Outcome::Aborted(_) => self.stats.abort(),
      Outcome::Rejected => {}
    }
    Ok(outcome)
  }
}
