#![cfg_attr(docsrs, feature(doc_cfg))]

//! Transactional store capability interface / 事务存储能力接口
//!
//! What a benchmark driver needs from a store: transaction lifecycle,
//! named ordered indexes and the durability hooks around a run.
//! 基准驱动对存储的全部需求：事务生命周期、具名有序索引、运行前后的持久化钩子。

mod db;
mod error;
mod index;

pub use db::Db;
pub use error::{Error, Result};
pub use index::{Index, Visit};

/// Opaque flags passed to `Db::new_txn` / 传给 `Db::new_txn` 的不透明标志
pub type TxnFlags = u64;
