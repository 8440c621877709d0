//! # jdb_ycsb - YCSB key-value workload
//! # jdb_ycsb - YCSB 键值工作负载
//!
//! One table of `scale_factor * 1000` records with 8-byte keys and 128-byte
//! values, driven by a weighted mix of read, write, read-modify-write and
//! short range scans.
//! 单表 `scale_factor * 1000` 条记录，8 字节键、128 字节值，
//! 以读、写、读改写与短范围扫描的加权组合驱动。

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod key;
mod mix;
mod op;
mod ycsb;

pub use key::USERTABLE;
pub use mix::{Kind, Mix};
pub use op::YcsbOp;
pub use ycsb::{Ycsb, nkeys};
