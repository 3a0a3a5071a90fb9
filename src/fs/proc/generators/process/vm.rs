use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use super::process_of;
use crate::fs::proc::{ContentGenerator, ProcFS, ProcIdent};
use crate::vfs::FsError;

/// /proc/<pid>/vm - 进程映射区域：起止地址、大小、驻留量、名字
pub struct VmGenerator;

impl ContentGenerator for VmGenerator {
    fn generate(&self, fs: &ProcFS, ident: ProcIdent) -> Result<Vec<u8>, FsError> {
        let process = process_of(fs, ident)?;

        let mut content = String::from("BEGIN       END         SIZE      COMMIT     NAME\n");
        for region in process.regions() {
            content.push_str(&format!(
                "{:08x} -- {:08x}    {:08x}  {:08x}   {}\n",
                region.base,
                region.last_addr(),
                region.size,
                region.resident,
                region.name
            ));
        }

        Ok(content.into_bytes())
    }
}
