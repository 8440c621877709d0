#[static_init::constructor(0)]
extern "C" fn _log_init() {
  log_init::init();
}

mod dispatch {
  use aok::{OK, Void};
  use jdb_bench::{Dispatcher, Error};
  use proptest::prelude::*;

  fn normalize(raw: &[u32]) -> Vec<(f64, usize)> {
    let total: u32 = raw.iter().sum();
    raw
      .iter()
      .enumerate()
      .map(|(i, &w)| (f64::from(w) / f64::from(total), i))
      .collect()
  }

  proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every draw in [0, 1) lands in exactly the entry whose interval holds it
    /// [0, 1) 内的每次抽取都恰好落在包含它的区间对应项
    #[test]
    fn prop_weight_coverage(
      raw in prop::collection::vec(1u32..1000, 1..20),
      draws in prop::collection::vec(0.0f64..1.0, 1..200),
    ) {
      let d = Dispatcher::new(normalize(&raw)).expect("build");
      let last = d.len() - 1;
      prop_assert_eq!(d.bounds(last).1, 1.0);
      for u in draws {
        let i = d.pick(u);
        prop_assert!(i <= last);
        let (lo, hi) = d.bounds(i);
        prop_assert!(lo <= u, "{lo} <= {u}");
        prop_assert!(u < hi || i == last, "{u} < {hi}");
      }
    }

    /// Same draws, same choices / 相同抽取，相同选择
    #[test]
    fn prop_deterministic(raw in prop::collection::vec(1u32..1000, 1..10), seed: u64) {
      let a = Dispatcher::new(normalize(&raw)).expect("build");
      let b = Dispatcher::new(normalize(&raw)).expect("build");
      let mut ra = fastrand::Rng::with_seed(seed);
      let mut rb = fastrand::Rng::with_seed(seed);
      for _ in 0..100 {
        prop_assert_eq!(a.select(&mut ra).0, b.select(&mut rb).0);
      }
    }
  }

  #[test]
  fn test_fidelity() -> Void {
    let d = Dispatcher::new([(0.95, "read"), (0.04, "rmw"), (0.01, "write")])?;
    let mut rng = fastrand::Rng::with_seed(8544290);
    let mut hits = [0u32; 3];
    const N: u32 = 100_000;
    for _ in 0..N {
      hits[d.select(&mut rng).0] += 1;
    }
    for (i, expect) in [0.95, 0.04, 0.01].into_iter().enumerate() {
      let got = f64::from(hits[i]) / f64::from(N);
      assert!((got - expect).abs() < 0.01, "{} {got} vs {expect}", d.items()[i]);
    }
    OK
  }

  #[test]
  fn test_boundaries() -> Void {
    let d = Dispatcher::new([(0.5, 'a'), (0.5, 'b')])?;
    assert_eq!(d.pick(0.0), 0);
    assert_eq!(d.pick(0.4999), 0);
    assert_eq!(d.pick(0.5), 1);
    assert_eq!(d.pick(0.999_999_999), 1);

    // 0.1 * 10 rounds below 1.0, the last entry still closes the table
    // 0.1 * 10 舍入后小于 1.0，最后一项仍封闭整张表
    let d = Dispatcher::new((0..10).map(|i| (0.1, i)))?;
    assert_eq!(d.bounds(9).1, 1.0);
    assert_eq!(d.pick(1.0 - f64::EPSILON), 9);
    OK
  }

  #[test]
  fn test_reject() {
    assert!(matches!(
      Dispatcher::<u8>::new([]),
      Err(Error::EmptyWorkload)
    ));
    assert!(matches!(
      Dispatcher::new([(0.0, 0), (1.0, 1)]),
      Err(Error::Weight(_))
    ));
    assert!(matches!(Dispatcher::new([(1.5, 0)]), Err(Error::Weight(_))));
    assert!(matches!(
      Dispatcher::new([(f64::NAN, 0)]),
      Err(Error::Weight(_))
    ));
    assert!(matches!(
      Dispatcher::new([(0.5, 0), (0.4, 1)]),
      Err(Error::WeightSum(_))
    ));
    assert!(matches!(
      Dispatcher::new([(0.7, 0), (0.7, 1)]),
      Err(Error::WeightSum(_))
    ));
  }
}

mod stats {
  use std::time::Duration;

  use aok::{OK, Void};
  use jdb_bench::{Error, RunResult, TxnStats, elemwise_sum};
  use proptest::prelude::*;

  fn names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("op{i}")).collect()
  }

  fn worker(per_op: Vec<u64>, aborts: u64) -> TxnStats {
    let mut s = TxnStats::new(per_op.len()).expect("stats");
    s.commits = per_op.iter().sum();
    s.aborts = aborts;
    s.per_op = per_op;
    s
  }

  proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Totals are sums, rates are totals over time
    /// 总数为各项之和，速率为总数除以时间
    #[test]
    fn prop_linearity(
      k in 1usize..6,
      rows in prop::collection::vec((prop::collection::vec(0u64..10_000, 6), 0u64..10_000), 1..16),
      ms in 1u64..100_000,
    ) {
      let stats: Vec<_> = rows
        .iter()
        .map(|(ops, a)| worker(ops[..k].to_vec(), *a))
        .collect();
      let elapsed = Duration::from_millis(ms);
      let r = RunResult::aggregate(&names(k), &stats, elapsed).expect("aggregate");

      let commits: u64 = stats.iter().map(|s| s.commits).sum();
      let aborts: u64 = stats.iter().map(|s| s.aborts).sum();
      prop_assert_eq!(r.commits, commits);
      prop_assert_eq!(r.aborts, aborts);
      prop_assert_eq!(r.workers, stats.len());
      for i in 0..k {
        let col: u64 = stats.iter().map(|s| s.per_op[i]).sum();
        prop_assert_eq!(r.per_op[i], col);
      }
      prop_assert_eq!(r.per_op.iter().sum::<u64>(), commits);

      let secs = elapsed.as_secs_f64();
      let tp = commits as f64 / secs;
      let ar = aborts as f64 / secs;
      prop_assert!((r.throughput - tp).abs() <= tp * 1e-12);
      prop_assert!((r.abort_rate - ar).abs() <= ar * 1e-12);
      prop_assert!((r.per_core_throughput - tp / stats.len() as f64).abs() <= tp * 1e-12);
      prop_assert!((r.per_core_abort_rate - ar / stats.len() as f64).abs() <= ar * 1e-12);
    }
  }

  #[test]
  fn test_zeros() -> Void {
    let stats = vec![worker(vec![0, 0], 0); 4];
    let r = RunResult::aggregate(&names(2), &stats, Duration::from_secs(1))?;
    assert_eq!((r.commits, r.aborts), (0, 0));
    assert_eq!(r.per_op, vec![0, 0]);
    assert_eq!(r.throughput, 0.0);
    assert_eq!(r.abort_rate, 0.0);
    assert_eq!(r.latency.count, 0);
    OK
  }

  #[test]
  fn test_zero_elapsed() -> Void {
    let r = RunResult::aggregate(&names(1), &[worker(vec![5], 2)], Duration::ZERO)?;
    assert_eq!(r.commits, 5);
    assert_eq!(r.throughput, 0.0);
    assert_eq!(r.abort_rate, 0.0);
    OK
  }

  #[test]
  fn test_mismatch_is_fatal() {
    let stats = [worker(vec![1, 2], 0), worker(vec![1, 2, 3], 0)];
    assert!(matches!(
      RunResult::aggregate(&names(2), &stats, Duration::from_secs(1)),
      Err(Error::StatsLen { expect: 2, got: 3 })
    ));
    assert!(matches!(
      RunResult::aggregate(&names(2), &[], Duration::from_secs(1)),
      Err(Error::NoWorker)
    ));
    assert!(elemwise_sum(&[1, 2], &[3]).is_err());
    assert_eq!(elemwise_sum(&[1, 2], &[3, 4]).ok(), Some(vec![4, 6]));
  }

  #[test]
  fn test_latency_merge() -> Void {
    let mut a = worker(vec![0], 0);
    let mut b = worker(vec![0], 0);
    for i in 1..=100 {
      a.commit(0, Duration::from_micros(i));
      b.commit(0, Duration::from_micros(i + 100));
    }
    let r = RunResult::aggregate(&names(1), &[a, b], Duration::from_secs(1))?;
    assert_eq!(r.commits, 200);
    assert_eq!(r.latency.count, 200);
    assert!(r.latency.p50 <= r.latency.p99);
    assert!(r.latency.p99 <= r.latency.max);
    assert!(r.latency.min >= 1_000 - 1);
    OK
  }

  #[test]
  fn test_output() -> Void {
    let r = RunResult::aggregate(&names(1), &[worker(vec![300], 30)], Duration::from_secs(3))?;
    assert_eq!(r.line(), "100 10");
    let mut out = Vec::new();
    r.write_line(&mut out)?;
    assert_eq!(out, b"100 10\n");

    let back: RunResult = sonic_rs::from_str(&r.to_json()?)?;
    assert_eq!(back, r);
    assert_eq!(back.elapsed(), Duration::from_secs(3));
    OK
  }
}

mod loader {
  use aok::{OK, Void};
  use jdb_bench::{DEFAULT_BATCH, batch_size, batches, split};
  use jdb_mock::MockDb;
  use proptest::prelude::*;

  #[test]
  fn test_batches() {
    assert_eq!(batches(0..1000, 300), vec![0..300, 300..600, 600..1000]);
    assert_eq!(batches(0..900, 300), vec![0..300, 300..600, 600..900]);
    assert_eq!(batches(0..50, 300), vec![0..50]);
    assert!(batches(10..10, 300).is_empty());
    assert_eq!(batches(100..350, 100), vec![100..200, 200..350]);
  }

  #[test]
  fn test_batch_size() -> Void {
    assert_eq!(batch_size(&MockDb::new())?, DEFAULT_BATCH);
    assert_eq!(batch_size(&MockDb::new().with_max_batch(7))?, 7);
    assert!(batch_size(&MockDb::new().with_max_batch(0)).is_err());
    OK
  }

  #[test]
  fn test_split() {
    assert_eq!(split(10, 3), vec![0..4, 4..7, 7..10]);
    assert_eq!(split(2, 4), vec![0..1, 1..2]);
    assert!(split(0, 4).is_empty());
    assert_eq!(split(5, 1), vec![0..5]);
  }

  proptest! {
    /// Batches are contiguous, cover the range, only the last differs in size
    /// 批次连续且覆盖区间，只有最后一批大小不同
    #[test]
    fn prop_batches(lo in 0u64..1000, len in 1u64..5000, size in 1usize..700) {
      let hi = lo + len;
      let list = batches(lo..hi, size);
      prop_assert_eq!(list.len() as u64, (len / size as u64).max(1));
      prop_assert_eq!(list[0].start, lo);
      prop_assert_eq!(list[list.len() - 1].end, hi);
      for w in list.windows(2) {
        prop_assert_eq!(w[0].end, w[1].start);
        prop_assert_eq!(w[0].end - w[0].start, size as u64);
      }
      prop_assert!(list.iter().all(|b| b.start < b.end));
    }

    /// Loader ranges are disjoint and cover [0, total)
    /// 加载区间互不相交且覆盖 [0, total)
    #[test]
    fn prop_split(total in 0u64..100_000, n in 1usize..64) {
      let list = split(total, n);
      prop_assert!(list.len() <= n);
      let mut next = 0;
      for r in &list {
        prop_assert_eq!(r.start, next);
        prop_assert!(r.end > r.start);
        next = r.end;
      }
      prop_assert_eq!(next, total);
    }
  }
}

mod sync {
  use std::{
    sync::atomic::{AtomicUsize, Ordering},
    thread,
    time::{Duration, Instant},
  };

  use jdb_bench::{Gate, Stop};

  #[test]
  fn test_stop_sleep_full() {
    let stop = Stop::new();
    let begin = Instant::now();
    assert!(!stop.sleep(Duration::from_millis(50)));
    assert!(begin.elapsed() >= Duration::from_millis(50));
    assert!(!stop.is_set());
  }

  #[test]
  fn test_stop_wakes_sleeper() {
    let stop = Stop::new();
    let begin = Instant::now();
    thread::scope(|s| {
      s.spawn(|| {
        thread::sleep(Duration::from_millis(20));
        stop.set();
      });
      assert!(stop.sleep(Duration::from_secs(30)));
    });
    assert!(begin.elapsed() < Duration::from_secs(10));
    assert!(stop.is_set());
  }

  #[test]
  fn test_panic_guard() {
    let stop = Stop::new();
    thread::scope(|s| {
      let h = s.spawn(|| {
        let _g = stop.guard();
        panic!("boom");
      });
      assert!(h.join().is_err());
    });
    assert!(stop.is_set());
    // Already raised by the guard / 守卫已触发
    assert!(!stop.set());

    let calm = Stop::new();
    drop(calm.guard());
    assert!(!calm.is_set());
  }

  #[test]
  fn test_stop_first_writer_wins() {
    let stop = Stop::new();
    let first = AtomicUsize::new(0);
    thread::scope(|s| {
      for _ in 0..4 {
        s.spawn(|| {
          if stop.set() {
            first.fetch_add(1, Ordering::SeqCst);
          }
        });
      }
    });
    assert_eq!(first.load(Ordering::SeqCst), 1);
    assert!(stop.is_set());
    assert!(!stop.set());
  }

  #[test]
  fn test_gate() {
    let gate = Gate::new(3);
    thread::scope(|s| {
      for _ in 0..3 {
        s.spawn(|| gate.arrive());
      }
      gate.launch();
      assert_eq!(gate.pending(), 0);
      assert!(gate.launched());
    });
  }
}
