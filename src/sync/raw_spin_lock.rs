//! Raw spin lock integrated with `lock_api::RawMutex`
//!
//! [`SpinLock`] is the lock used for every short critical section in procfs
//! (node cache map, per-handle read cursor). Holders must not block.

use core::sync::atomic::{AtomicBool, Ordering};

/// 自旋锁结构体，不返回 Guard，由 `lock_api` 负责生成 RAII 保护器。
/// 不可重入 (即不能在持锁时再次调用 lock())。
pub struct RawSpinLock {
    locked: AtomicBool,
}

impl RawSpinLock {
    /// 创建一个新的 RawSpinLock 实例。
    pub const fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
        }
    }
}

impl Default for RawSpinLock {
    fn default() -> Self {
        Self::new()
    }
}

unsafe impl lock_api::RawMutex for RawSpinLock {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = Self::new();

    type GuardMarker = lock_api::GuardSend;

    /// 获取锁，自旋直到成功。
    fn lock(&self) {
        while self
            .locked
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            // 先只读等待，减少缓存行争用
            while self.locked.load(Ordering::Relaxed) {
                core::hint::spin_loop();
            }
        }
    }

    /// 尝试获取锁，失败立即返回 false。
    fn try_lock(&self) -> bool {
        self.locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    /// 释放锁。
    unsafe fn unlock(&self) {
        self.locked.store(false, Ordering::Release);
    }

    /// 检查锁是否被占用 (仅用于调试/测试)
    fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Relaxed)
    }
}

/// 基于 [`RawSpinLock`] 的互斥锁
pub type SpinLock<T> = lock_api::Mutex<RawSpinLock, T>;
/// [`SpinLock`] 的 RAII 保护器
pub type SpinLockGuard<'a, T> = lock_api::MutexGuard<'a, RawSpinLock, T>;
