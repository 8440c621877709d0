// Load, launch, time, stop, join, report
// 加载、出发、计时、停止、汇合、报告

use std::{
  io::{self, Write},
  thread,
  time::{Duration, Instant},
};

use jdb_trait::{Db, Index};
use log::{debug, log, warn};

use crate::{
  Bench, Dispatcher, Error, Gate, Ops, Result, RunConfig, RunResult, Stop, TxnStats, Worker,
};

pub struct Runner<'a, D: Db, B: Bench<D>> {
  db: &'a D,
  bench: &'a B,
  conf: RunConfig,
}

impl<'a, D: Db, B: Bench<D>> Runner<'a, D, B> {
  pub fn new(db: &'a D, bench: &'a B, conf: RunConfig) -> Self {
    Self { db, bench, conf }
  }

  pub fn conf(&self) -> &RunConfig {
    &self.conf
  }

  /// Full run, the result line goes to stdout
  /// 完整运行，结果行写到标准输出
  pub fn run(&self) -> Result<RunResult> {
    let mut out = io::stdout().lock();
    self.run_to(&mut out)
  }

  pub fn run_to(&self, out: &mut impl Write) -> Result<RunResult> {
    let conf = &self.conf;
    conf.validate()?;
    let lv = conf.level();
    conf.echo(self.bench.name());

    let loaded = self.load()?;
    self.db.do_txn_epoch_sync();

    for (name, index) in self.bench.tables() {
      log!(lv, "table {name} size {}", index.size());
    }
    log!(lv, "{loaded} records loaded, starting benchmark...");

    let ops: Ops<'_, D> = Dispatcher::new(self.bench.workload())?;
    let names: Vec<String> = ops.items().iter().map(|op| op.name().to_owned()).collect();
    let (stats, elapsed) = self.measure(&ops)?;

    let result = RunResult::aggregate(&names, &stats, elapsed)?;
    result.log(lv);
    result.write_line(out)?;
    self.db.do_txn_finish();
    Ok(result)
  }

  /// Run every loader on its own thread, first error wins
  /// 每个加载器一个线程，返回第一个错误
  pub fn load(&self) -> Result<u64> {
    let loaders = self.bench.loaders(&self.conf)?;
    let begin = Instant::now();
    let db = self.db;
    let conf = &self.conf;

    let n = loaders.len();

    let results: Vec<Result<u64>> = thread::scope(|s| {
      let handles: Vec<_> = loaders
        .into_iter()
        .map(|l| (l.name(), s.spawn(move || l.load(db, conf))))
        .collect();
      handles
        .into_iter()
        .map(|(name, h)| {
          h.join()
            .unwrap_or_else(|_| Err(Error::Panic(format!("loader {name}"))))
        })
        .collect()
    });

    let mut total = 0;
    for r in results {
      total += r?;
    }
    log!(
      conf.level(),
      "loaded {total} records in {:?} with {} loaders",
      begin.elapsed(),
      n
    );
    Ok(total)
  }

  fn measure(&self, ops: &Ops<'_, D>) -> Result<(Vec<TxnStats>, Duration)> {
    let conf = &self.conf;
    let gate = Gate::new(conf.threads);
    let stop = Stop::new();

    // Drawn in id order on this thread, so seeds do not depend on spawn timing
    // 在本线程按 id 顺序生成，种子与线程启动时序无关
    let mut rng = fastrand::Rng::with_seed(conf.seed);
    let seeds: Vec<u64> = (0..conf.threads).map(|_| rng.u64(..)).collect();
    let db = self.db;
    let flags = conf.txn_flags;
    let (gate, stop) = (&gate, &stop);

    thread::scope(|s| {
      let handles: Vec<_> = seeds
        .into_iter()
        .enumerate()
        .map(|(id, seed)| {
          let h = s.spawn(move || match Worker::new(id, db, ops, gate, stop, flags, seed) {
            Ok(w) => w.run(),
            // Still pass the gate so launch never blocks / 仍需通过启动门，避免 launch 阻塞
            Err(e) => {
              let _ = stop.set();
              gate.arrive();
              Err(e)
            }
          });
          (id, h)
        })
        .collect();

      gate.launch();
      let begin = Instant::now();
      if stop.sleep(conf.duration) {
        warn!("run stopped early after {:?}", begin.elapsed());
      } else if !stop.set() {
        warn!("stop raised by a worker at the deadline");
      }
      let elapsed = begin.elapsed();

      let mut stats = Vec::with_capacity(handles.len());
      let mut first = None;
      for (id, h) in handles {
        match h.join() {
          Ok(Ok(st)) => stats.push(st),
          Ok(Err(e)) => {
            first.get_or_insert(e);
          }
          Err(_) => {
            first.get_or_insert(Error::Panic(format!("worker {id}")));
          }
        }
      }
      if let Some(e) = first {
        return Err(e);
      }
      debug!("{} workers joined", stats.len());
      Ok((stats, elapsed))
    })
  }
}
