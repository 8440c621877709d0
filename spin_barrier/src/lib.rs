//! # spin_barrier - Countdown barrier / 倒计数屏障
//!
//! A latch opened by the N-th arrival. Waiters spin for a short while and
//! then park on a condition variable, so a long wait costs no CPU.
//! 由第 N 次到达打开的门闩。等待者先短暂自旋，再在条件变量上休眠，长时间等待不占 CPU。

#![cfg_attr(docsrs, feature(doc_cfg))]

use std::{
  hint,
  sync::atomic::{
    AtomicUsize,
    Ordering::{AcqRel, Acquire},
  },
};

use parking_lot::{Condvar, Mutex};

/// Spin rounds before parking / 休眠前的自旋轮数
const SPIN: u32 = 1 << 10;

/// Countdown barrier / 倒计数屏障
///
/// Open once `remaining()` hits zero. An open barrier never closes again.
/// `remaining()` 归零即打开，打开后不会再关闭。
#[derive(Debug)]
pub struct Barrier {
  remain: AtomicUsize,
  lock: Mutex<()>,
  cv: Condvar,
}

impl Barrier {
  /// Create barrier opened by `n` arrivals / 创建需 `n` 次到达才打开的屏障
  pub fn new(n: usize) -> Self {
    Self {
      remain: AtomicUsize::new(n),
      lock: Mutex::new(()),
      cv: Condvar::new(),
    }
  }

  /// Arrivals still missing / 尚缺的到达次数
  #[inline]
  pub fn remaining(&self) -> usize {
    self.remain.load(Acquire)
  }

  /// Whether all arrivals happened / 是否已全部到达
  #[inline]
  pub fn is_open(&self) -> bool {
    self.remaining() == 0
  }

  /// Count one arrival without blocking, returns true if this call opened the barrier
  /// 记录一次到达且不阻塞，若本次调用打开了屏障则返回 true
  ///
  /// Arriving at an open barrier does nothing.
  /// 已打开的屏障上到达无任何效果。
  pub fn arrive_and_release(&self) -> bool {
    match self
      .remain
      .fetch_update(AcqRel, Acquire, |n| n.checked_sub(1))
    {
      Ok(1) => {
        // Waiters re-check under the lock, so notifying while holding it cannot be missed
        // 等待者在锁内复查，持锁通知不会丢失唤醒
        let _guard = self.lock.lock();
        self.cv.notify_all();
        true
      }
      _ => false,
    }
  }

  /// Block until the barrier is open / 阻塞直到屏障打开
  pub fn wait(&self) {
    for _ in 0..SPIN {
      if self.is_open() {
        return;
      }
      hint::spin_loop();
    }

    let mut guard = self.lock.lock();
    while !self.is_open() {
      self.cv.wait(&mut guard);
    }
  }

  /// Count one arrival, then block until all `n` arrived
  /// 记录一次到达，然后阻塞直到 `n` 次全部到达
  pub fn arrive_and_wait(&self) {
    self.arrive_and_release();
    self.wait();
  }
}
