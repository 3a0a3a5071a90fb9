//! /proc/<pid> 下的生成器
//!
//! 进程可能在目录解析之后、内容生成之前退出，此时生成器返回
//! [`FsError::StaleReference`]，由引擎降级为空内容。
pub mod fds;
pub mod links;
pub mod regs;
pub mod stack;
pub mod vm;
pub mod vmo;

pub use fds::FdsGenerator;
pub use links::{CwdGenerator, ExeGenerator, FdEntryGenerator};
pub use regs::RegsGenerator;
pub use stack::StackGenerator;
pub use vm::VmGenerator;
pub use vmo::VmoGenerator;

use crate::fs::proc::{ProcFS, ProcIdent};
use crate::kernel::SharedProcess;
use crate::vfs::FsError;

/// 编号所属的进程；进程已退出时返回 `StaleReference`
pub(crate) fn process_of(fs: &ProcFS, ident: ProcIdent) -> Result<SharedProcess, FsError> {
    let pid = ident.pid().ok_or(FsError::InvalidArgument)?;
    fs.kernel().process(pid).ok_or(FsError::StaleReference)
}
