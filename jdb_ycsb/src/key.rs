// USERTABLE keys and values
// USERTABLE 的键与值

/// Table name / 表名
pub const USERTABLE: &str = "USERTABLE";

/// Records per unit of scale factor / 每单位规模系数的记录数
pub const PER_SCALE: f64 = 1000.0;

pub const VAL_LEN: usize = 128;

/// Loaded value / 加载写入的值
pub const LOAD_VAL: [u8; VAL_LEN] = [b'a'; VAL_LEN];

/// Value of `write` / `write` 写入的值
pub const WRITE_VAL: [u8; VAL_LEN] = [b'b'; VAL_LEN];

/// Value of `rmw` / `rmw` 写回的值
pub const RMW_VAL: [u8; VAL_LEN] = [b'c'; VAL_LEN];

/// Records covered by one `scan` / 单次 `scan` 覆盖的记录数
pub const SCAN_LEN: u64 = 100;

/// Big-endian, so byte order matches numeric order
/// 大端编码，字节序与数值序一致
#[inline]
pub fn key(n: u64) -> [u8; 8] {
  n.to_be_bytes()
}

#[inline]
pub fn decode(k: &[u8]) -> Option<u64> {
  Some(u64::from_be_bytes(k.try_into().ok()?))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_order() {
    let mut v: Vec<_> = [300u64, 2, 70_000, 1 << 40, 0].map(key).to_vec();
    v.sort();
    let n: Vec<_> = v.iter().filter_map(|k| decode(k)).collect();
    assert_eq!(n, vec![0, 2, 300, 70_000, 1 << 40]);
    assert_eq!(decode(b"short"), None);
  }
}
