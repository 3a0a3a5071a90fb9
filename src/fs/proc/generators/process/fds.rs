use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use super::process_of;
use crate::fs::proc::{ContentGenerator, ProcFS, ProcIdent};
use crate::vfs::FsError;

/// /proc/<pid>/fds - 打开的描述符及其路径，每行 `<fd> <path>`
pub struct FdsGenerator;

impl ContentGenerator for FdsGenerator {
    fn generate(&self, fs: &ProcFS, ident: ProcIdent) -> Result<Vec<u8>, FsError> {
        let process = process_of(fs, ident)?;

        let mut content = String::new();
        for fd in 0..process.max_open_file_descriptors() {
            let Some(path) = process.file_descriptor_path(fd) else {
                continue;
            };
            content.push_str(&format!("{:>3} {}\n", fd, path));
        }

        Ok(content.into_bytes())
    }
}
