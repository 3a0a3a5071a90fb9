//! 目录与节点操作引擎
//!
//! [`ProcFS`] 持有静态表、tunable 注册表和节点缓存，所有节点操作都以
//! inode 编号为输入，结合这三者与注入的 [`KernelView`] 即时求值。
//! 节点句柄 [`ProcInode`] 只是把调用转发到这里。

use alloc::string::{String, ToString};
use alloc::sync::{Arc, Weak};
use alloc::vec::Vec;
use core::str::FromStr;
use core::sync::atomic::AtomicBool;

use crate::config::{OVERFLOW_GID, OVERFLOW_UID, PROC_BLOCK_SIZE, PROC_MAX_NAME_LEN};
use crate::fs::proc::cache::NodeCache;
use crate::fs::proc::entries::{ContentGenerator, ContentWriter, EntryTable, StaticEntry};
use crate::fs::proc::generators::FdEntryGenerator;
use crate::fs::proc::ident::{self, ProcFileType, ProcIdent, ROOT_INO};
use crate::fs::proc::tunable::{ChangeCallback, TunableRegistry};
use crate::fs::proc::{ProcFile, ProcInode, ReadCursor};
use crate::kernel::{KernelView, Pid, ProcessHandle};
use crate::vfs::{
    FileMode, FileSystem, FsError, Inode, InodeMetadata, InodeType, OpenFlags, StatFs,
};

pub struct ProcFS {
    this: Weak<ProcFS>,
    kernel: KernelView,
    entries: EntryTable,
    tunables: TunableRegistry,
    cache: NodeCache,
    root_inode: Arc<ProcInode>,
}

impl ProcFS {
    /// 创建新的 ProcFS 实例
    pub fn new(kernel: KernelView) -> Arc<Self> {
        let fs = Arc::new_cyclic(|this: &Weak<ProcFS>| Self {
            this: this.clone(),
            kernel,
            entries: EntryTable::new(),
            tunables: TunableRegistry::new(),
            cache: NodeCache::new(),
            root_inode: ProcInode::new(ROOT_INO, this.clone()),
        });
        pr_info!("procfs: initialized");
        fs
    }

    pub fn kernel(&self) -> &KernelView {
        &self.kernel
    }

    pub fn root(&self) -> &Arc<ProcInode> {
        &self.root_inode
    }

    pub(crate) fn tunables(&self) -> &TunableRegistry {
        &self.tunables
    }

    pub(crate) fn cache(&self) -> &NodeCache {
        &self.cache
    }

    /// 取得编号对应的节点
    ///
    /// 根节点与 tunable 节点常驻；其余节点首次访问时创建，
    /// 最后一个持有者释放后销毁。
    pub fn get_inode(&self, ino: u32) -> Arc<ProcInode> {
        if ino == ROOT_INO {
            return self.root_inode.clone();
        }
        if let ProcIdent::SysVar(index) = ProcIdent::from_ino(ino) {
            // 未注册的下标不进入缓存
            return match self.tunables.get(index) {
                Some(tunable) => tunable.inode().clone(),
                None => ProcInode::new(ino, self.this.clone()),
            };
        }
        self.cache
            .get_or_create(ino, || ProcInode::new(ino, self.this.clone()))
    }

    /// 在 `/proc/sys` 下发布一个布尔开关，返回其下标
    ///
    /// # Panics
    ///
    /// 注册数超出容量时 panic。
    pub fn register_tunable(
        &self,
        name: &str,
        flag: Arc<AtomicBool>,
        on_change: Option<ChangeCallback>,
    ) -> usize {
        if self.tunables.find(name).is_some() {
            pr_warn!("procfs: sys/{} registered twice, lookup sees the first", name);
        }
        let index = self.tunables.register(name, flag, on_change, |index| {
            ProcInode::new(ProcIdent::SysVar(index).ino(), self.this.clone())
        });
        pr_info!("procfs: registered sys/{} (index {})", name, index);
        index
    }

    fn process(&self, pid: Pid) -> Result<Arc<dyn ProcessHandle>, FsError> {
        self.kernel.process(pid).ok_or(FsError::NotFound)
    }

    /// 编号是否指向一个可能存在的节点（不检查进程存活）
    fn check_ident(&self, ident: ProcIdent) -> Result<(), FsError> {
        match ident {
            ProcIdent::Invalid(_) => Err(FsError::NotFound),
            ProcIdent::SysVar(index) if index >= self.tunables.len() => Err(FsError::NotFound),
            _ => Ok(()),
        }
    }

    /// 进程目录下当前可见的静态项
    ///
    /// 没有可执行文件或工作目录的进程不显示 `exe` / `cwd`。
    fn visible_pid_entries(
        &self,
        process: &dyn ProcessHandle,
    ) -> impl Iterator<Item = &StaticEntry> {
        let has_exe = process.executable_path().is_some();
        let has_cwd = process.cwd_path().is_some();
        self.entries.pid_entries().filter(move |entry| match entry.file_type {
            ProcFileType::PidExe => has_exe,
            ProcFileType::PidCwd => has_cwd,
            _ => true,
        })
    }

    pub fn metadata(&self, ino: u32) -> Result<InodeMetadata, FsError> {
        let ident = ProcIdent::from_ino(ino);
        self.check_ident(ident)?;

        let inode_type = inode_type_of(ident);
        let (mode, nlinks) = match inode_type {
            InodeType::Directory => (FileMode::S_IFDIR.bits() | 0o555, 2),
            InodeType::Symlink => (FileMode::S_IFLNK.bits() | 0o777, 1),
            InodeType::File => (FileMode::S_IFREG.bits() | 0o644, 1),
        };

        let (uid, gid) = match ident.pid() {
            Some(pid) => self
                .kernel
                .process(pid)
                .map(|p| (p.uid(), p.gid()))
                .unwrap_or((OVERFLOW_UID, OVERFLOW_GID)),
            None => (0, 0),
        };

        // 链接的大小就是目标路径长度，普通文件的内容在读取前不可知
        let size = match inode_type {
            InodeType::Symlink => self.generate(ident).map(|data| data.len()).unwrap_or(0),
            _ => 0,
        };

        Ok(InodeMetadata {
            inode_no: ino as usize,
            inode_type,
            mode: FileMode::from_bits_truncate(mode),
            uid,
            gid,
            size,
            nlinks,
        })
    }

    /// 在目录 `ino` 中按名字查找子节点编号
    pub fn lookup_child(&self, ino: u32, name: &str) -> Result<u32, FsError> {
        let ident = ProcIdent::from_ino(ino);
        self.check_ident(ident)?;
        if !ident.is_directory() {
            return Err(FsError::NotDirectory);
        }

        match name {
            "." => return Ok(ino),
            ".." => return Ok(ident::parent_of(ino)),
            _ => {}
        }

        match ident {
            ProcIdent::Root => {
                if let Some(entry) = self.entries.find_root(name) {
                    return Ok(ProcIdent::Entry(entry.file_type).ino());
                }
                let pid: Pid = parse_decimal(name).ok_or(FsError::NotFound)?;
                self.process(pid)?;
                Ok(ProcIdent::PidDir(pid).ino())
            }
            ProcIdent::Entry(ProcFileType::RootSys) => self
                .tunables
                .find(name)
                .map(|tunable| tunable.inode().ino())
                .ok_or(FsError::NotFound),
            ProcIdent::PidDir(pid) => {
                let process = self.process(pid)?;
                self.visible_pid_entries(process.as_ref())
                    .find(|entry| entry.name == name)
                    .map(|entry| ProcIdent::PidEntry(pid, entry.file_type).ino())
                    .ok_or(FsError::NotFound)
            }
            ProcIdent::PidEntry(pid, ProcFileType::PidFd) => {
                let fd: usize = parse_decimal(name).ok_or(FsError::NotFound)?;
                let process = self.process(pid)?;
                if process.file_descriptor_path(fd).is_none() {
                    return Err(FsError::NotFound);
                }
                ident::encode_fd(pid, fd).ok_or(FsError::NotFound)
            }
            _ => Err(FsError::NotFound),
        }
    }

    /// 由子节点编号反查它在目录 `ino` 中的名字
    pub fn reverse_lookup(&self, ino: u32, child: u32) -> Result<String, FsError> {
        let ident = ProcIdent::from_ino(ino);
        self.check_ident(ident)?;
        if !ident.is_directory() {
            return Err(FsError::NotDirectory);
        }

        if child == ino {
            return Ok(String::from("."));
        }
        if child == ident::parent_of(ino) {
            return Ok(String::from(".."));
        }
        if ident::parent_of(child) != ino {
            return Err(FsError::NotFound);
        }

        match ProcIdent::from_ino(child) {
            ProcIdent::Entry(ft) => self
                .entries
                .get(ft)
                .map(|entry| String::from(entry.name))
                .ok_or(FsError::NotFound),
            ProcIdent::PidDir(pid) => {
                self.process(pid)?;
                Ok(pid.to_string())
            }
            ProcIdent::SysVar(index) => self
                .tunables
                .get(index)
                .map(|tunable| String::from(tunable.name()))
                .ok_or(FsError::NotFound),
            ProcIdent::PidEntry(pid, ft) => {
                let process = self.process(pid)?;
                self.visible_pid_entries(process.as_ref())
                    .find(|entry| entry.file_type == ft)
                    .map(|entry| String::from(entry.name))
                    .ok_or(FsError::NotFound)
            }
            ProcIdent::PidFd(pid, fd) => {
                let process = self.process(pid)?;
                process
                    .file_descriptor_path(fd)
                    .map(|_| fd.to_string())
                    .ok_or(FsError::NotFound)
            }
            _ => Err(FsError::NotFound),
        }
    }

    /// 列出目录 `ino` 的全部子项，`.` 与 `..` 总是最先给出
    ///
    /// 进程目录在进程退出后返回 `NotFound`，此时不产生任何项。
    pub fn enumerate_children(
        &self,
        ino: u32,
        mut emit: impl FnMut(&str, u32, InodeType),
    ) -> Result<(), FsError> {
        let ident = ProcIdent::from_ino(ino);
        self.check_ident(ident)?;
        if !ident.is_directory() {
            return Err(FsError::NotDirectory);
        }

        let process = match ident.pid() {
            Some(pid) => Some(self.process(pid)?),
            None => None,
        };

        emit(".", ino, InodeType::Directory);
        emit("..", ident::parent_of(ino), InodeType::Directory);

        match (ident, process) {
            (ProcIdent::Root, _) => {
                for entry in self.entries.root_entries() {
                    let child = ProcIdent::Entry(entry.file_type);
                    emit(entry.name, child.ino(), inode_type_of(child));
                }
                for pid in self.kernel.processes.list_pids() {
                    let child = ProcIdent::PidDir(pid);
                    emit(&pid.to_string(), child.ino(), InodeType::Directory);
                }
            }
            (ProcIdent::Entry(ProcFileType::RootSys), _) => {
                for tunable in self.tunables.snapshot() {
                    emit(tunable.name(), tunable.inode().ino(), InodeType::File);
                }
            }
            (ProcIdent::PidDir(pid), Some(process)) => {
                for entry in self.visible_pid_entries(process.as_ref()) {
                    let child = ProcIdent::PidEntry(pid, entry.file_type);
                    emit(entry.name, child.ino(), inode_type_of(child));
                }
            }
            (ProcIdent::PidEntry(pid, ProcFileType::PidFd), Some(process)) => {
                for fd in 0..process.max_open_file_descriptors() {
                    if process.file_descriptor_path(fd).is_none() {
                        continue;
                    }
                    // 超出叶子字段的描述符无法编址
                    let Some(child) = ident::encode_fd(pid, fd) else {
                        continue;
                    };
                    emit(&fd.to_string(), child, InodeType::Symlink);
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// 目录项数量（含 `.` 与 `..`）
    pub fn directory_entry_count(&self, ino: u32) -> Result<usize, FsError> {
        let mut count = 0;
        self.enumerate_children(ino, |_, _, _| count += 1)?;
        Ok(count)
    }

    /// 生成节点内容；目标已消失时得到空内容
    fn generate(&self, ident: ProcIdent) -> Result<Vec<u8>, FsError> {
        let result = match ident {
            ProcIdent::SysVar(index) => {
                let tunable = self.tunables.get(index).ok_or(FsError::NotFound)?;
                tunable.generate(self, ident)
            }
            ProcIdent::PidFd(..) => FdEntryGenerator.generate(self, ident),
            _ => {
                let file_type = ident.file_type().ok_or(FsError::NotFound)?;
                let generator = self
                    .entries
                    .get(file_type)
                    .and_then(|entry| entry.generator.as_deref())
                    .ok_or(FsError::NotFound)?;
                generator.generate(self, ident)
            }
        };

        match result {
            Err(FsError::StaleReference) => {
                pr_debug!("procfs: {:#010x} went stale, serving empty content", ident.ino());
                Ok(Vec::new())
            }
            other => other,
        }
    }

    /// 从偏移 `offset` 读取节点内容
    ///
    /// 不带游标时每次调用都重新生成；带游标时只在游标为空时生成一次，
    /// 之后的读取都切片同一份快照，读到末尾（返回 0）时清空游标。
    pub fn read(
        &self,
        ino: u32,
        offset: usize,
        buf: &mut [u8],
        cursor: Option<&mut ReadCursor>,
    ) -> Result<usize, FsError> {
        let ident = ProcIdent::from_ino(ino);
        self.check_ident(ident)?;
        if ident.is_directory() {
            return Err(FsError::IsDirectory);
        }

        match cursor {
            None => {
                let data = self.generate(ident)?;
                Ok(copy_range(&data, offset, buf))
            }
            Some(cursor) => {
                let data = cursor.get_or_fill(|| self.generate(ident))?;
                let nread = copy_range(data, offset, buf);
                if nread == 0 {
                    cursor.clear();
                }
                Ok(nread)
            }
        }
    }

    /// 确保游标中有快照并返回其长度
    pub(crate) fn prime_cursor(&self, ino: u32, cursor: &mut ReadCursor) -> Result<usize, FsError> {
        let ident = ProcIdent::from_ino(ino);
        self.check_ident(ident)?;
        if ident.is_directory() {
            return Err(FsError::IsDirectory);
        }
        cursor.get_or_fill(|| self.generate(ident)).map(|data| data.len())
    }

    /// 写入节点；只有带写入处理器的节点接受，且只接受偏移 0
    pub fn write(&self, ino: u32, offset: usize, data: &[u8]) -> Result<usize, FsError> {
        let ident = ProcIdent::from_ino(ino);
        self.check_ident(ident)?;
        if ident.is_directory() {
            return Err(FsError::IsDirectory);
        }

        let reject = |err: FsError| {
            pr_warn!("procfs: write to {:#010x} rejected: {}", ino, err);
            Err(err)
        };

        match ident {
            ProcIdent::SysVar(index) => {
                let tunable = self.tunables.get(index).ok_or(FsError::NotFound)?;
                if offset != 0 {
                    return reject(FsError::InvalidArgument);
                }
                tunable.write(self, ident, data)
            }
            _ => {
                let writer = ident
                    .file_type()
                    .and_then(|ft| self.entries.get(ft))
                    .and_then(|entry| entry.writer.as_deref());
                let Some(writer) = writer else {
                    return reject(FsError::PermissionDenied);
                };
                if offset != 0 {
                    return reject(FsError::InvalidArgument);
                }
                writer.write(self, ident, data)
            }
        }
    }

    /// 读取符号链接目标
    pub fn readlink(&self, ino: u32) -> Result<String, FsError> {
        let ident = ProcIdent::from_ino(ino);
        self.check_ident(ident)?;
        if !ident.is_symlink() {
            return Err(FsError::InvalidArgument);
        }
        let data = self.generate(ident)?;
        String::from_utf8(data).map_err(|_| FsError::InvalidArgument)
    }

    /// 打开前的类型与访问模式检查
    pub(crate) fn check_open(&self, ino: u32, flags: OpenFlags) -> Result<(), FsError> {
        let ident = ProcIdent::from_ino(ino);
        self.check_ident(ident)?;
        if ident.is_directory() && flags.writable() {
            return Err(FsError::IsDirectory);
        }
        if flags.contains(OpenFlags::O_DIRECTORY) && !ident.is_directory() {
            return Err(FsError::NotDirectory);
        }
        Ok(())
    }

    /// 打开编号对应的节点
    pub fn open(&self, ino: u32, flags: OpenFlags) -> Result<ProcFile, FsError> {
        self.get_inode(ino).open(flags)
    }

    /// 节点相对 procfs 根的绝对路径，如 `/12/fd/3`
    pub fn path_of(&self, ino: u32) -> Result<String, FsError> {
        let mut names = Vec::new();
        let mut current = ino;
        while current != ROOT_INO {
            let parent = ident::parent_of(current);
            names.push(self.reverse_lookup(parent, current)?);
            current = parent;
        }
        if names.is_empty() {
            return Ok(String::from("/"));
        }
        let mut path = String::new();
        for name in names.iter().rev() {
            path.push('/');
            path.push_str(name);
        }
        Ok(path)
    }
}

impl FileSystem for ProcFS {
    fn fs_type(&self) -> &'static str {
        "proc"
    }

    fn root_inode(&self) -> Arc<dyn Inode> {
        self.root_inode.clone()
    }

    fn sync(&self) -> Result<(), FsError> {
        // proc 是纯内存文件系统，无需同步
        Ok(())
    }

    fn statfs(&self) -> Result<StatFs, FsError> {
        Ok(StatFs {
            block_size: PROC_BLOCK_SIZE,
            total_blocks: 0,
            free_blocks: 0,
            available_blocks: 0,
            total_inodes: 0,
            free_inodes: 0,
            fsid: 0,
            max_filename_len: PROC_MAX_NAME_LEN,
        })
    }
}

fn inode_type_of(ident: ProcIdent) -> InodeType {
    if ident.is_directory() {
        InodeType::Directory
    } else if ident.is_symlink() {
        InodeType::Symlink
    } else {
        InodeType::File
    }
}

/// 只接受规范十进制：非空、全为数字、除 "0" 外无前导零
fn parse_decimal<T: FromStr>(name: &str) -> Option<T> {
    let canonical = !name.is_empty()
        && name.bytes().all(|b| b.is_ascii_digit())
        && (name == "0" || !name.starts_with('0'));
    if !canonical {
        return None;
    }
    name.parse().ok()
}

/// 把 `data[offset..]` 尽量多地拷进 `buf`，越界时返回 0
fn copy_range(data: &[u8], offset: usize, buf: &mut [u8]) -> usize {
    let Some(remaining) = data.get(offset..) else {
        return 0;
    };
    let nread = remaining.len().min(buf.len());
    buf[..nread].copy_from_slice(&remaining[..nread]);
    nread
}
