use alloc::format;
use alloc::vec::Vec;

use crate::fs::proc::{ContentGenerator, ProcFS, ProcIdent};
use crate::vfs::FsError;

/// /proc/kmalloc - 内核堆统计（字节）
pub struct KmallocGenerator;

impl ContentGenerator for KmallocGenerator {
    fn generate(&self, fs: &ProcFS, _ident: ProcIdent) -> Result<Vec<u8>, FsError> {
        let stats = fs.kernel().heap.stats();

        let content = format!(
            "eternal:      {}
allocated:    {}
free:         {}
",
            stats.eternal, stats.allocated, stats.free
        );

        Ok(content.into_bytes())
    }
}
