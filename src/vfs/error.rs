//! VFS 错误类型
//!
//! 定义了与 POSIX 兼容的文件系统错误码，可通过 [`FsError::to_errno()`] 转换为系统调用错误码。

use core::fmt;

/// VFS 错误类型
///
/// 各错误码对应标准 POSIX errno 值。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsError {
    // 文件/目录相关
    NotFound,     // -ENOENT(2): 文件不存在
    NotDirectory, // -ENOTDIR(20): 不是目录
    IsDirectory,  // -EISDIR(21): 是目录

    // 权限相关
    PermissionDenied, // -EPERM(1): 操作不被允许

    // 参数相关
    InvalidArgument, // -EINVAL(22): 无效参数

    // 内容生成相关
    StaleReference, // -ESRCH(3): 目标进程/描述符已消失，仅在 procfs 内部流转

    // 其他
    NotSupported, // -ENOTSUP(95): 操作不支持
}

impl FsError {
    /// 转换为系统调用错误码（负数）
    pub fn to_errno(&self) -> isize {
        match self {
            FsError::PermissionDenied => -1,
            FsError::NotFound => -2,
            FsError::StaleReference => -3,
            FsError::NotDirectory => -20,
            FsError::IsDirectory => -21,
            FsError::InvalidArgument => -22,
            FsError::NotSupported => -95,
        }
    }
}

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            FsError::NotFound => "no such file or directory",
            FsError::NotDirectory => "not a directory",
            FsError::IsDirectory => "is a directory",
            FsError::PermissionDenied => "operation not permitted",
            FsError::InvalidArgument => "invalid argument",
            FsError::StaleReference => "target no longer exists",
            FsError::NotSupported => "operation not supported",
        };
        f.write_str(msg)
    }
}
