use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::fs::proc::{ContentGenerator, ProcFS, ProcIdent};
use crate::vfs::FsError;

/// /proc/mounts - 每个挂载点一行：`<fs 类名> @ <宿主>`
pub struct MountsGenerator;

impl ContentGenerator for MountsGenerator {
    fn generate(&self, fs: &ProcFS, _ident: ProcIdent) -> Result<Vec<u8>, FsError> {
        let mut content = String::new();

        for mount in fs.kernel().mounts.mounts() {
            let line = match &mount.host {
                // 根挂载没有宿主 inode
                None => format!("{} @ /\n", mount.fs_class),
                Some((fsid, index, path)) => {
                    format!("{} @ {}:{} {}\n", mount.fs_class, fsid, index, path)
                }
            };
            content.push_str(&line);
        }

        Ok(content.into_bytes())
    }
}
