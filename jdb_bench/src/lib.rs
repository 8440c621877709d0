//! # jdb_bench - Multi-threaded transactional benchmark harness
//! # jdb_bench - 多线程事务基准测试框架
//!
//! Loads a dataset in parallel batches, releases N workers at once through a
//! start gate, runs a weighted transaction mix for a fixed time, then stops
//! them cooperatively and aggregates throughput and abort rate.
//! 并行分批加载数据集，通过启动门同时放行 N 个工作线程，在固定时间内运行加权事务组合，
//! 随后协作式停止并聚合吞吐与中止率。

#![cfg_attr(docsrs, feature(doc_cfg))]

mod bench;
mod conf;
mod dispatch;
mod error;
mod gate;
mod latency;
mod loader;
mod op;
mod runner;
mod stats;
mod stop;
mod worker;

pub use bench::Bench;
pub use conf::{DURATION, RunConfig, SEED};
pub use dispatch::{Dispatcher, WEIGHT_EPS};
pub use error::{Error, Result};
pub use gate::Gate;
pub use latency::{LatencyHistogram, LatencyStats};
pub use loader::{DEFAULT_BATCH, Loader, RangeLoader, batch_size, batches, split};
pub use op::{FnOp, Op, Ops, Outcome, Workload, exec};
pub use runner::Runner;
pub use stats::{RunResult, TxnStats, elemwise_sum};
pub use stop::{PanicGuard, Stop};
pub use worker::{State, Worker};
