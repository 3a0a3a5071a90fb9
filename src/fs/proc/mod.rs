//! /proc 文件系统
//!
//! - [`ident`]: inode 编号编解码
//! - [`entries`]: 静态节点表与生成器/写入器 trait
//! - [`tunable`]: `/proc/sys` 下的布尔开关注册表
//! - [`cache`]: 按需创建的节点缓存
//! - [`proc`]: 目录与节点操作引擎 [`ProcFS`]
//! - [`inode`] / [`file`]: 面向 VFS 的节点句柄与打开文件
pub mod cache;
pub mod entries;
pub mod file;
pub mod generators;
pub mod ident;
pub mod inode;
pub mod proc;
pub mod tunable;

pub use entries::{ContentGenerator, ContentWriter};
pub use file::{ProcFile, ReadCursor};
pub use ident::{ParentDir, ProcFileType, ProcIdent};
pub use inode::ProcInode;
pub use proc::ProcFS;
pub use tunable::ChangeCallback;
