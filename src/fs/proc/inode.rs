use alloc::string::String;
use alloc::sync::{Arc, Weak};
use alloc::vec::Vec;

use crate::fs::proc::ident::{self, ProcIdent};
use crate::fs::proc::{ProcFS, ProcFile, ReadCursor};
use crate::vfs::{DirEntry, FileMode, FsError, Inode, InodeMetadata, OpenFlags};

/// procfs 节点句柄
///
/// 节点本身不保存任何内容，只记住自己的编号；所有操作都转交给
/// [`ProcFS`] 根据编号即时计算。节点的种类由编号决定，生命周期内不变。
pub struct ProcInode {
    ino: u32,
    ident: ProcIdent,
    fs: Weak<ProcFS>,
}

impl ProcInode {
    pub(crate) fn new(ino: u32, fs: Weak<ProcFS>) -> Arc<Self> {
        Arc::new(Self {
            ino,
            ident: ProcIdent::from_ino(ino),
            fs,
        })
    }

    /// inode 编号
    pub fn ino(&self) -> u32 {
        self.ino
    }

    /// 编号的结构化视图
    pub fn ident(&self) -> ProcIdent {
        self.ident
    }

    fn fs(&self) -> Result<Arc<ProcFS>, FsError> {
        // 文件系统已被卸载
        self.fs.upgrade().ok_or(FsError::NotFound)
    }

    /// 所在目录的节点
    pub fn parent(&self) -> Result<Arc<ProcInode>, FsError> {
        Ok(self.fs()?.get_inode(ident::parent_of(self.ino)))
    }

    /// 打开该节点，得到带独立读取快照的文件会话
    pub fn open(self: &Arc<Self>, flags: OpenFlags) -> Result<ProcFile, FsError> {
        self.fs()?.check_open(self.ino, flags)?;
        Ok(ProcFile::new(self.clone(), flags))
    }

    /// 在目录中查找，返回 procfs 节点
    pub fn lookup_node(&self, name: &str) -> Result<Arc<ProcInode>, FsError> {
        let fs = self.fs()?;
        let child = fs.lookup_child(self.ino, name)?;
        Ok(fs.get_inode(child))
    }

    /// 由子节点编号反查名字
    pub fn reverse_lookup(&self, child: u32) -> Result<String, FsError> {
        self.fs()?.reverse_lookup(self.ino, child)
    }

    /// 目录项数量（含 `.` 与 `..`）
    pub fn directory_entry_count(&self) -> Result<usize, FsError> {
        self.fs()?.directory_entry_count(self.ino)
    }

    pub(crate) fn read_with_cursor(
        &self,
        offset: usize,
        buf: &mut [u8],
        cursor: &mut ReadCursor,
    ) -> Result<usize, FsError> {
        self.fs()?.read(self.ino, offset, buf, Some(cursor))
    }

    pub(crate) fn snapshot_len(&self, cursor: &mut ReadCursor) -> Result<usize, FsError> {
        self.fs()?.prime_cursor(self.ino, cursor)
    }

    fn reject_mutation(&self, op: &str) -> FsError {
        pr_warn!("procfs: {} rejected on {:#010x}", op, self.ino);
        FsError::PermissionDenied
    }
}

impl Inode for ProcInode {
    fn metadata(&self) -> Result<InodeMetadata, FsError> {
        self.fs()?.metadata(self.ino)
    }

    fn read_at(&self, offset: usize, buf: &mut [u8]) -> Result<usize, FsError> {
        self.fs()?.read(self.ino, offset, buf, None)
    }

    fn write_at(&self, offset: usize, buf: &[u8]) -> Result<usize, FsError> {
        self.fs()?.write(self.ino, offset, buf)
    }

    fn lookup(&self, name: &str) -> Result<Arc<dyn Inode>, FsError> {
        Ok(self.lookup_node(name)? as Arc<dyn Inode>)
    }

    fn create(&self, _name: &str, _mode: FileMode) -> Result<Arc<dyn Inode>, FsError> {
        Err(self.reject_mutation("create"))
    }

    fn mkdir(&self, _name: &str, _mode: FileMode) -> Result<Arc<dyn Inode>, FsError> {
        Err(self.reject_mutation("mkdir"))
    }

    fn unlink(&self, _name: &str) -> Result<(), FsError> {
        Err(self.reject_mutation("unlink"))
    }

    fn rmdir(&self, _name: &str) -> Result<(), FsError> {
        Err(self.reject_mutation("rmdir"))
    }

    fn readdir(&self) -> Result<Vec<DirEntry>, FsError> {
        let mut entries = Vec::new();
        self.fs()?
            .enumerate_children(self.ino, |name, ino, inode_type| {
                entries.push(DirEntry {
                    name: String::from(name),
                    inode_no: ino as usize,
                    inode_type,
                });
            })?;
        Ok(entries)
    }

    fn truncate(&self, _size: usize) -> Result<(), FsError> {
        Err(self.reject_mutation("truncate"))
    }

    fn sync(&self) -> Result<(), FsError> {
        Ok(())
    }

    fn readlink(&self) -> Result<String, FsError> {
        self.fs()?.readlink(self.ino)
    }

    fn chmod(&self, _mode: FileMode) -> Result<(), FsError> {
        Err(self.reject_mutation("chmod"))
    }

    fn chown(&self, _uid: u32, _gid: u32) -> Result<(), FsError> {
        Err(self.reject_mutation("chown"))
    }

    fn cacheable(&self) -> bool {
        // 进程相关节点不缓存：避免进程退出后仍可通过 dentry cache 访问（幽灵 PID）。
        !ident::is_process_scoped(self.ino)
    }

    fn as_any(&self) -> &dyn core::any::Any {
        self
    }
}
