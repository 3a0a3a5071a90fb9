//! procfs - 以虚拟文件形式导出内核与进程实时状态的合成文件系统
//!
//! 整棵树从不在内存中完整构建：每个节点都由一个 32 位 inode 编号唯一标识，
//! 编号同时编码了父目录类别、所属进程、文件描述符或 tunable 下标以及叶子类型。
//! 目录遍历、名字查找和内容生成都在访问时根据编号即时完成。
//!
//! 外部依赖（进程表、符号表、内存管理器等）通过 [`kernel::KernelView`] 注入。
#![cfg_attr(not(test), no_std)]

extern crate alloc;

#[macro_use]
pub mod log;

pub mod config;
pub mod fs;
pub mod kernel;
pub mod sync;
pub mod vfs;


pub use fs::proc::{ProcFS, ProcFile, ProcIdent, ProcInode};
pub use kernel::KernelView;
pub use vfs::FsError;
