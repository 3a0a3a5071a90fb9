//! procfs 打开文件的 File trait 实现

use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::fs::proc::ProcInode;
use crate::sync::SpinLock;
use crate::vfs::{File, FsError, Inode, InodeMetadata, OpenFlags, SeekWhence};

/// 单个打开句柄上的生成内容快照
///
/// 第一次读取时填充，之后的读取都切片同一份数据；读到末尾时清空，
/// 下一次读取会重新生成。
#[derive(Debug, Default)]
pub struct ReadCursor {
    snapshot: Option<Vec<u8>>,
}

impl ReadCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前保存的快照
    pub fn snapshot(&self) -> Option<&[u8]> {
        self.snapshot.as_deref()
    }

    pub fn is_primed(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn clear(&mut self) {
        self.snapshot = None;
    }

    /// 返回快照，为空时用 `generate` 填充
    pub fn get_or_fill(
        &mut self,
        generate: impl FnOnce() -> Result<Vec<u8>, FsError>,
    ) -> Result<&[u8], FsError> {
        if self.snapshot.is_none() {
            self.snapshot = Some(generate()?);
        }
        Ok(self.snapshot.as_deref().unwrap_or_default())
    }
}

struct FileState {
    offset: usize,
    cursor: ReadCursor,
}

/// procfs 文件的 File 实现
///
/// 对 [`ProcInode`] 的会话包装，维护当前偏移量和本句柄独有的 [`ReadCursor`]，
/// 保证一次打开内分多次读取看到的是同一份生成结果。
///
/// # 并发安全
///
/// 偏移量与游标放在同一把 `SpinLock` 里，读取过程中二者一起更新。
pub struct ProcFile {
    inode: Arc<ProcInode>,
    flags: OpenFlags,
    state: SpinLock<FileState>,
}

impl ProcFile {
    pub(crate) fn new(inode: Arc<ProcInode>, flags: OpenFlags) -> Self {
        Self {
            inode,
            flags,
            state: SpinLock::new(FileState {
                offset: 0,
                cursor: ReadCursor::new(),
            }),
        }
    }

    /// 获取底层 inode
    pub fn inode(&self) -> Arc<ProcInode> {
        self.inode.clone()
    }

    /// 本句柄当前是否持有生成快照
    pub fn has_snapshot(&self) -> bool {
        self.state.lock().cursor.is_primed()
    }
}

impl File for ProcFile {
    fn readable(&self) -> bool {
        self.flags.readable()
    }

    fn writable(&self) -> bool {
        self.flags.writable()
    }

    fn read(&self, buf: &mut [u8]) -> Result<usize, FsError> {
        if !self.readable() {
            return Err(FsError::PermissionDenied);
        }

        let mut state = self.state.lock();
        let FileState { offset, cursor } = &mut *state;
        let nread = self.inode.read_with_cursor(*offset, buf, cursor)?;
        *offset += nread;
        Ok(nread)
    }

    fn write(&self, buf: &[u8]) -> Result<usize, FsError> {
        if !self.writable() {
            return Err(FsError::PermissionDenied);
        }

        let mut state = self.state.lock();
        let nwritten = self.inode.write_at(state.offset, buf)?;
        state.offset += nwritten;
        Ok(nwritten)
    }

    fn metadata(&self) -> Result<InodeMetadata, FsError> {
        self.inode.metadata()
    }

    /// `End` 以本句柄的快照长度为准，必要时先生成快照
    fn lseek(&self, offset: isize, whence: SeekWhence) -> Result<usize, FsError> {
        let mut state = self.state.lock();
        let base = match whence {
            SeekWhence::Set => 0,
            SeekWhence::Cur => state.offset,
            SeekWhence::End => self.inode.snapshot_len(&mut state.cursor)?,
        };

        // 不能为负
        let new_offset = base
            .checked_add_signed(offset)
            .ok_or(FsError::InvalidArgument)?;
        state.offset = new_offset;
        Ok(new_offset)
    }

    fn offset(&self) -> usize {
        self.state.lock().offset
    }

    fn flags(&self) -> OpenFlags {
        self.flags
    }
}
