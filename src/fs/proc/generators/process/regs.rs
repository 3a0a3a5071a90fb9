use alloc::format;
use alloc::vec::Vec;

use super::process_of;
use crate::fs::proc::{ContentGenerator, ProcFS, ProcIdent};
use crate::vfs::FsError;

/// /proc/<pid>/regs - 保存的寄存器快照
pub struct RegsGenerator;

impl ContentGenerator for RegsGenerator {
    fn generate(&self, fs: &ProcFS, ident: ProcIdent) -> Result<Vec<u8>, FsError> {
        let process = process_of(fs, ident)?;
        let r = process.registers();

        let content = format!(
            "eax: {:08x}
ebx: {:08x}
ecx: {:08x}
edx: {:08x}
esi: {:08x}
edi: {:08x}
ebp: {:08x}
cr3: {:08x}
flg: {:08x}
sp:  {:04x}:{:08x}
pc:  {:04x}:{:08x}
",
            r.eax, r.ebx, r.ecx, r.edx, r.esi, r.edi, r.ebp, r.cr3, r.eflags, r.ss, r.esp, r.cs,
            r.eip
        );

        Ok(content.into_bytes())
    }
}
