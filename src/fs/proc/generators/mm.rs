use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::fs::proc::{ContentGenerator, ProcFS, ProcIdent};
use crate::vfs::FsError;

/// /proc/mm - 内核 VM 对象列表与空闲物理页统计
pub struct MmGenerator;

impl ContentGenerator for MmGenerator {
    fn generate(&self, fs: &ProcFS, _ident: ProcIdent) -> Result<Vec<u8>, FsError> {
        let snapshot = fs.kernel().memory.snapshot();

        let mut content = String::new();
        for vmo in &snapshot.vm_objects {
            content.push_str(&format!(
                "VMO: {:#010x} {}({}): p:{:>4} {}\n",
                vmo.id,
                if vmo.anonymous { "anon" } else { "file" },
                vmo.ref_count,
                vmo.pages.len(),
                vmo.name
            ));
        }
        content.push_str(&format!("VMO count: {}\n", snapshot.vm_objects.len()));
        content.push_str(&format!(
            "Free physical pages: {}\n",
            snapshot.free_physical_pages
        ));
        content.push_str(&format!(
            "Free supervisor physical pages: {}\n",
            snapshot.free_supervisor_physical_pages
        ));

        Ok(content.into_bytes())
    }
}
