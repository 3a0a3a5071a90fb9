use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use super::process_of;
use crate::fs::proc::{ContentGenerator, ProcFS, ProcIdent};
use crate::vfs::FsError;

/// /proc/<pid>/vmo - 每个区域的后备 VM 对象及其逐页状态
///
/// 每页渲染为 `P<物理地址>[!](<引用数>)`，`!` 表示写时复制；
/// 未驻留的页地址与引用数都是 0。
pub struct VmoGenerator;

impl ContentGenerator for VmoGenerator {
    fn generate(&self, fs: &ProcFS, ident: ProcIdent) -> Result<Vec<u8>, FsError> {
        let process = process_of(fs, ident)?;

        let mut content = String::from("BEGIN       END         SIZE        NAME\n");
        for region in process.regions() {
            content.push_str(&format!(
                "{:08x} -- {:08x}    {:08x}    {}\n",
                region.base,
                region.last_addr(),
                region.size,
                region.name
            ));

            let vmo = &region.vmo;
            content.push_str(&format!(
                "VMO: {} \"{}\" @ {:08x}({})\n",
                if vmo.anonymous { "anonymous" } else { "file-backed" },
                vmo.name,
                vmo.id,
                vmo.ref_count
            ));

            for (i, page) in vmo.pages.iter().enumerate() {
                let (paddr, refs) = page.map_or((0, 0), |p| (p.paddr, p.ref_count));
                let cow = if region.is_cow(i) { "!" } else { "" };
                content.push_str(&format!("P{:x}{}({}) ", paddr, cow, refs));
            }
            content.push('\n');
        }

        Ok(content.into_bytes())
    }
}
