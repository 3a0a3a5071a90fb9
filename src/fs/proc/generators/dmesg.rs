use alloc::vec::Vec;

use crate::fs::proc::{ContentGenerator, ProcFS, ProcIdent};
use crate::vfs::FsError;

/// /proc/dmesg - 控制台日志缓冲区的原样拷贝
pub struct DmesgGenerator;

impl ContentGenerator for DmesgGenerator {
    fn generate(&self, fs: &ProcFS, _ident: ProcIdent) -> Result<Vec<u8>, FsError> {
        Ok(fs.kernel().console.log_buffer())
    }
}
