// Ready / go start gate
// 就绪 / 出发 启动门

use spin_barrier::Barrier;

/// `ready` counts N workers in, `go` is opened once by the controller
/// `ready` 等待 N 个工作线程到达，`go` 由控制器打开一次
#[derive(Debug)]
pub struct Gate {
  ready: Barrier,
  go: Barrier,
}

impl Gate {
  pub fn new(workers: usize) -> Self {
    Self {
      ready: Barrier::new(workers),
      go: Barrier::new(1),
    }
  }

  /// Worker side: report ready, block until launched
  /// 工作线程侧：报告就绪，阻塞直到出发
  pub fn arrive(&self) {
    self.ready.arrive_and_release();
    self.go.wait();
  }

  /// Controller side: wait for every worker, then release all at once
  /// 控制器侧：等待所有工作线程就绪，然后同时放行
  pub fn launch(&self) {
    self.ready.wait();
    self.go.arrive_and_release();
  }

  /// Workers not yet arrived / 尚未到达的工作线程数
  pub fn pending(&self) -> usize {
    self.ready.remaining()
  }

  pub fn launched(&self) -> bool {
    self.go.is_open()
  }
}
