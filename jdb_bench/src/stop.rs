// Run-wide cooperative stop signal
// 运行级协作式停止信号

use std::{
  sync::atomic::{AtomicBool, Ordering, fence},
  thread,
  time::{Duration, Instant},
};

use parking_lot::{Condvar, Mutex};

/// Set once by the controller (or a failing worker), polled by every worker
/// 由控制器（或出错的工作线程）设置一次，由所有工作线程轮询
#[derive(Debug, Default)]
pub struct Stop {
  flag: AtomicBool,
  lock: Mutex<()>,
  cv: Condvar,
}

impl Stop {
  pub fn new() -> Self {
    Self::default()
  }

  #[inline]
  pub fn is_set(&self) -> bool {
    self.flag.load(Ordering::Acquire)
  }

  /// Raise the signal, true only for the first caller
  /// 触发信号，仅第一个调用者返回 true
  ///
  /// A failing worker may race the controller, later calls change nothing.
  /// 出错的工作线程可能与控制器竞争，之后的调用不产生任何效果。
  pub fn set(&self) -> bool {
    if self.flag.swap(true, Ordering::AcqRel) {
      return false;
    }
    fence(Ordering::SeqCst);
    // Lock pairs with the check in sleep, no lost wakeup / 与 sleep 中的检查配对，避免丢失唤醒
    let _g = self.lock.lock();
    self.cv.notify_all();
    true
  }

  /// Sleep for `dur` unless set first. Returns true if woken early.
  /// 睡眠 `dur`，若先被设置则提前返回 true
  pub fn sleep(&self, dur: Duration) -> bool {
    let deadline = Instant::now() + dur;
    let mut g = self.lock.lock();
    loop {
      if self.is_set() {
        return true;
      }
      if self.cv.wait_until(&mut g, deadline).timed_out() {
        return self.is_set();
      }
    }
  }

  /// Guard raising the signal if its thread unwinds
  /// 线程 panic 展开时触发停止信号的守卫
  pub fn guard(&self) -> PanicGuard<'_> {
    PanicGuard(self)
  }
}

pub struct PanicGuard<'a>(&'a Stop);

impl Drop for PanicGuard<'_> {
  fn drop(&mut self) {
    if thread::panicking() {
      let _ = self.0.set();
    }
  }
}
