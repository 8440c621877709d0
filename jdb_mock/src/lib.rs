#![cfg_attr(docsrs, feature(doc_cfg))]

//! In-memory optimistic store for harness tests
//! 测试用内存乐观并发存储
//!
//! Reads record the version they saw, commit re-validates them under one
//! lock, so concurrent read-modify-write on a hot key produces real aborts.
//! Commit failures can also be injected every N commits.
//! 读操作记录所见版本，提交时在同一把锁内复核，热点键上的并发读改写会产生真实中止。
//! 也可每 N 次提交注入一次失败。

mod db;
mod index;
mod txn;

pub use db::MockDb;
pub use index::MockIndex;
pub use txn::MockTxn;
