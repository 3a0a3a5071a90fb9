//! 虚拟文件系统接口
//!
//! procfs 向上层 VFS 暴露的通用契约：inode 操作、打开文件会话、文件系统对象。
pub mod error;
pub mod file;
pub mod file_system;
pub mod inode;

pub use error::FsError;
pub use file::{File, OpenFlags, SeekWhence};
pub use file_system::{FileSystem, StatFs};
pub use inode::{DirEntry, FileMode, Inode, InodeMetadata, InodeType};
