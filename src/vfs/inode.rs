use crate::vfs::error::FsError;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

/// Inode类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InodeType {
    File,      // 普通文件
    Directory, // 目录
    Symlink,   // 符号链接
}

/// 文件权限和类型（与 POSIX 兼容）
bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FileMode: u32 {
        // 文件类型掩码
        const S_IFMT   = 0o170000;  // 文件类型掩码
        const S_IFREG  = 0o100000;  // 普通文件
        const S_IFDIR  = 0o040000;  // 目录
        const S_IFLNK  = 0o120000;  // 符号链接

        // 用户权限
        const S_IRUSR  = 0o400;     // 用户读
        const S_IWUSR  = 0o200;     // 用户写
        const S_IXUSR  = 0o100;     // 用户执行

        // 组权限
        const S_IRGRP  = 0o040;     // 组读
        const S_IWGRP  = 0o020;     // 组写
        const S_IXGRP  = 0o010;     // 组执行

        // 其他用户权限
        const S_IROTH  = 0o004;     // 其他读
        const S_IWOTH  = 0o002;     // 其他写
        const S_IXOTH  = 0o001;     // 其他执行
    }
}

/// 轻量级目录项（readdir 返回）
///
/// 用于数据传输，无引用关系，读取后即可丢弃
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,          // 文件名
    pub inode_no: usize,       // Inode 编号
    pub inode_type: InodeType, // 文件类型
}

/// Inode 元数据
#[derive(Debug, Clone)]
pub struct InodeMetadata {
    pub inode_no: usize,       // Inode 编号
    pub inode_type: InodeType, // 文件类型
    pub mode: FileMode,        // 类型位 + 权限位
    pub uid: u32,              // 用户 ID
    pub gid: u32,              // 组 ID
    pub size: usize,           // 文件大小（字节）
    pub nlinks: usize,         // 硬链接数
}

/// Inode trait - 所有文件系统必须实现
pub trait Inode: Send + Sync {
    /// 获取 inode 元数据
    fn metadata(&self) -> Result<InodeMetadata, FsError>;

    /// 从指定偏移量读取数据
    fn read_at(&self, offset: usize, buf: &mut [u8]) -> Result<usize, FsError>;

    /// 从指定偏移量写入数据
    fn write_at(&self, offset: usize, buf: &[u8]) -> Result<usize, FsError>;

    /// 在目录中查找子项
    fn lookup(&self, name: &str) -> Result<Arc<dyn Inode>, FsError>;

    /// 在目录中创建文件
    fn create(&self, name: &str, mode: FileMode) -> Result<Arc<dyn Inode>, FsError>;

    /// 在目录中创建子目录
    fn mkdir(&self, name: &str, mode: FileMode) -> Result<Arc<dyn Inode>, FsError>;

    /// 删除目录项
    fn unlink(&self, name: &str) -> Result<(), FsError>;

    /// 删除子目录
    fn rmdir(&self, name: &str) -> Result<(), FsError>;

    /// 列出目录内容
    fn readdir(&self) -> Result<Vec<DirEntry>, FsError>;

    /// 截断文件到指定大小
    fn truncate(&self, size: usize) -> Result<(), FsError>;

    /// 同步文件数据到存储设备
    fn sync(&self) -> Result<(), FsError>;

    /// 读取符号链接目标
    fn readlink(&self) -> Result<String, FsError> {
        Err(FsError::InvalidArgument)
    }

    /// 修改权限位
    fn chmod(&self, _mode: FileMode) -> Result<(), FsError> {
        Err(FsError::NotSupported)
    }

    /// 修改属主
    fn chown(&self, _uid: u32, _gid: u32) -> Result<(), FsError> {
        Err(FsError::NotSupported)
    }

    /// 是否允许上层缓存该 inode 的 dentry
    fn cacheable(&self) -> bool {
        true
    }

    /// 向下转型支持
    fn as_any(&self) -> &dyn core::any::Any;
}
