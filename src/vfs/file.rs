//! 文件抽象层 - VFS 会话层接口
//!
//! 定义了统一的文件操作接口 [`File`] trait。
//!
//! # 架构
//!
//! VFS 采用两层设计：
//! - **会话层**: [`File`] trait - 维护会话状态（offset、flags、生成内容快照）
//! - **存储层**: [`Inode`](crate::vfs::Inode) trait - 提供无状态的随机访问
//!
//! procfs 的打开文件由 [`ProcFile`](crate::fs::proc::ProcFile) 实现，它在会话内
//! 保存一次生成的内容快照，保证分多次读取时看到的是同一份数据。

use crate::vfs::{FsError, InodeMetadata};

/// 文件操作的统一接口
///
/// 所有打开的文件以 `Arc<dyn File>` 形式存储在进程的文件描述符表中。
///
/// # 设计要点
///
/// - 方法不携带 offset 参数，由实现者内部维护
/// - 可选方法提供默认实现（如 `lseek` 默认返回 `NotSupported`）
pub trait File: Send + Sync {
    /// 检查文件是否可读
    fn readable(&self) -> bool;

    /// 检查文件是否可写
    fn writable(&self) -> bool;

    /// 从当前 offset 读取数据并更新 offset
    fn read(&self, buf: &mut [u8]) -> Result<usize, FsError>;

    /// 向文件写入数据
    fn write(&self, buf: &[u8]) -> Result<usize, FsError>;

    /// 获取文件元数据
    fn metadata(&self) -> Result<InodeMetadata, FsError>;

    /// 设置文件偏移量（可选方法）
    ///
    /// 默认返回 `NotSupported`，适用于流式设备。
    fn lseek(&self, _offset: isize, _whence: SeekWhence) -> Result<usize, FsError> {
        Err(FsError::NotSupported)
    }

    /// 获取当前偏移量（可选方法）
    fn offset(&self) -> usize {
        0
    }

    /// 获取打开标志（可选方法）
    fn flags(&self) -> OpenFlags {
        OpenFlags::empty()
    }
}

/// 文件偏移量设置模式
///
/// 对应 POSIX 的 `SEEK_SET`、`SEEK_CUR`、`SEEK_END`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum SeekWhence {
    /// 从文件开头计算
    Set = 0,
    /// 从当前位置计算
    Cur = 1,
    /// 从文件末尾计算
    End = 2,
}

bitflags::bitflags! {
    /// 文件打开标志（与 POSIX 兼容）
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct OpenFlags: u32 {
        const O_RDONLY    = 0o0;        // 只读
        const O_WRONLY    = 0o1;        // 只写
        const O_RDWR      = 0o2;        // 读写
        const O_ACCMODE   = 0o3;        // 访问模式掩码
        const O_DIRECTORY = 0o200000;   // 必须是目录
    }
}

impl OpenFlags {
    /// 检查是否可读（O_RDONLY 或 O_RDWR）
    pub fn readable(&self) -> bool {
        let mode = self.bits() & OpenFlags::O_ACCMODE.bits();
        mode == OpenFlags::O_RDONLY.bits() || mode == OpenFlags::O_RDWR.bits()
    }

    /// 检查是否可写（O_WRONLY 或 O_RDWR）
    pub fn writable(&self) -> bool {
        let mode = self.bits() & OpenFlags::O_ACCMODE.bits();
        mode == OpenFlags::O_WRONLY.bits() || mode == OpenFlags::O_RDWR.bits()
    }
}
