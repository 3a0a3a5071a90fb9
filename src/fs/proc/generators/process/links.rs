//! 以符号链接形式呈现的进程节点：`exe`、`cwd` 与 `fd/<n>`

use alloc::vec::Vec;

use super::process_of;
use crate::fs::proc::{ContentGenerator, ProcFS, ProcIdent};
use crate::vfs::FsError;

/// /proc/<pid>/exe
pub struct ExeGenerator;

impl ContentGenerator for ExeGenerator {
    fn generate(&self, fs: &ProcFS, ident: ProcIdent) -> Result<Vec<u8>, FsError> {
        let process = process_of(fs, ident)?;
        let path = process.executable_path().ok_or(FsError::StaleReference)?;
        Ok(path.into_bytes())
    }
}

/// /proc/<pid>/cwd
pub struct CwdGenerator;

impl ContentGenerator for CwdGenerator {
    fn generate(&self, fs: &ProcFS, ident: ProcIdent) -> Result<Vec<u8>, FsError> {
        let process = process_of(fs, ident)?;
        let path = process.cwd_path().ok_or(FsError::StaleReference)?;
        Ok(path.into_bytes())
    }
}

/// /proc/<pid>/fd/<n>，不在静态表中，由引擎按编号类别直接选用
pub struct FdEntryGenerator;

impl ContentGenerator for FdEntryGenerator {
    fn generate(&self, fs: &ProcFS, ident: ProcIdent) -> Result<Vec<u8>, FsError> {
        let ProcIdent::PidFd(_, fd) = ident else {
            return Err(FsError::InvalidArgument);
        };
        let process = process_of(fs, ident)?;
        let path = process
            .file_descriptor_path(fd)
            .ok_or(FsError::StaleReference)?;
        Ok(path.into_bytes())
    }
}
