// Transaction kinds and standard mixes
// 事务种类与标准组合

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
  /// Get one existing record / 读取一条已存在的记录
  Read,
  /// Overwrite one record / 覆盖写一条记录
  Write,
  /// Read then overwrite / 读后写
  Rmw,
  /// Range of `SCAN_LEN` records / 范围扫描 `SCAN_LEN` 条记录
  Scan,
}

impl Kind {
  pub fn name(self) -> &'static str {
    match self {
      Kind::Read => "read",
      Kind::Write => "write",
      Kind::Rmw => "rmw",
      Kind::Scan => "scan",
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mix {
  /// 95% read, 4% rmw, 1% write
  #[default]
  Default,
  /// 100% read
  ReadOnly,
  /// 85% read, 10% scan, 4% rmw, 1% write
  Scan,
  Custom(Vec<(Kind, f64)>),
}

impl Mix {
  pub fn weights(&self) -> Vec<(Kind, f64)> {
    match self {
      Mix::Default => vec![(Kind::Read, 0.95), (Kind::Rmw, 0.04), (Kind::Write, 0.01)],
      Mix::ReadOnly => vec![(Kind::Read, 1.0)],
      Mix::Scan => vec![
        (Kind::Read, 0.85),
        (Kind::Scan, 0.10),
        (Kind::Rmw, 0.04),
        (Kind::Write, 0.01),
      ],
      Mix::Custom(w) => w.clone(),
    }
  }
}
