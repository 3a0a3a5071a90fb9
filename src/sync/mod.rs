//! 同步原语
//!
//! 向文件系统各模块提供基本的锁
//! 短临界区使用自旋锁，读多写少的表使用读写锁
mod raw_spin_lock;

pub use raw_spin_lock::*;

pub use spin::{RwLock, RwLockReadGuard, RwLockWriteGuard};
