use alloc::string::ToString;
use alloc::vec::Vec;

use crate::fs::proc::{ContentGenerator, ProcFS, ProcIdent};
use crate::vfs::FsError;

/// /proc/self - 动态符号链接，指向发起访问的进程
///
/// 与传入的编号无关，只取决于调用者。
pub struct SelfGenerator;

impl ContentGenerator for SelfGenerator {
    fn generate(&self, fs: &ProcFS, _ident: ProcIdent) -> Result<Vec<u8>, FsError> {
        let pid = fs.kernel().processes.current_pid();
        Ok(pid.to_string().into_bytes())
    }
}
