use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::fs::proc::ident;
use crate::fs::proc::{ContentGenerator, ProcFS, ProcIdent, ProcInode};
use crate::vfs::FsError;

/// /proc/inodes - 当前存活的 procfs 节点
///
/// 每行：编号、解码后的 类别:pid:叶子、强引用数、路径。
/// 常驻节点（根与 tunable）在前，缓存节点按编号升序在后。
pub struct InodesGenerator;

fn node_line(fs: &ProcFS, node: &ProcInode, refs: usize) -> String {
    let ino = node.ino();
    let (parent, pid, leaf) = ident::decode(ino);
    let path = fs.path_of(ino).unwrap_or_else(|_| String::from("?"));
    format!("{:#010x} {:?}:{}:{} ({}) {}\n", ino, parent, pid, leaf, refs, path)
}

impl ContentGenerator for InodesGenerator {
    fn generate(&self, fs: &ProcFS, _ident: ProcIdent) -> Result<Vec<u8>, FsError> {
        let mut content = String::new();

        let root = fs.root();
        content.push_str(&node_line(fs, root, Arc::strong_count(root)));

        for tunable in fs.tunables().snapshot() {
            let inode = tunable.inode();
            content.push_str(&node_line(fs, inode, Arc::strong_count(inode)));
        }

        for node in fs.cache().live_nodes() {
            // 减去本次遍历自己持有的一份
            let refs = Arc::strong_count(&node) - 1;
            content.push_str(&node_line(fs, &node, refs));
        }

        Ok(content.into_bytes())
    }
}
