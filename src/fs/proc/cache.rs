//! 惰性节点缓存
//!
//! 进程目录、进程文件和描述符节点在第一次被访问时创建。缓存只保存
//! [`Weak`] 引用：节点的所有权属于持有它的调用方（dentry、打开的文件），
//! 最后一个强引用释放后节点即被销毁，缓存中的弱引用随之失效，
//! 之后的 [`NodeCache::get_or_create`] 会为同一编号构造新节点。
//!
//! 失效的条目在插入新节点时统一清理。查找、插入和清理都在同一把锁内完成，
//! 因此同一编号在任意时刻最多只有一个存活节点。
//!
//! 根节点和 tunable 节点是常驻的，不经过这里。

use alloc::sync::{Arc, Weak};
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::fs::proc::ProcInode;
use crate::sync::SpinLock;

pub struct NodeCache {
    nodes: SpinLock<HashMap<u32, Weak<ProcInode>>>,
}

impl NodeCache {
    pub fn new() -> Self {
        Self {
            nodes: SpinLock::new(HashMap::new()),
        }
    }

    /// 返回 `ino` 的存活节点，不存在时用 `create` 构造并登记
    pub fn get_or_create(
        &self,
        ino: u32,
        create: impl FnOnce() -> Arc<ProcInode>,
    ) -> Arc<ProcInode> {
        let mut nodes = self.nodes.lock();
        if let Some(node) = nodes.get(&ino).and_then(Weak::upgrade) {
            return node;
        }

        let before = nodes.len();
        nodes.retain(|_, weak| weak.strong_count() > 0);
        if nodes.len() != before {
            pr_debug!("node cache: pruned {} dead entries", before - nodes.len());
        }

        let node = create();
        nodes.insert(ino, Arc::downgrade(&node));
        pr_debug!("node cache: created node {:#010x}", ino);
        node
    }

    /// 仅查询，不创建
    pub fn get(&self, ino: u32) -> Option<Arc<ProcInode>> {
        self.nodes.lock().get(&ino).and_then(Weak::upgrade)
    }

    /// 所有存活节点，按编号升序
    pub fn live_nodes(&self) -> Vec<Arc<ProcInode>> {
        let mut live: Vec<_> = self
            .nodes
            .lock()
            .values()
            .filter_map(Weak::upgrade)
            .collect();
        live.sort_by_key(|node| node.ino());
        live
    }

    /// 存活节点数
    pub fn len(&self) -> usize {
        self.nodes
            .lock()
            .values()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for NodeCache {
    fn default() -> Self {
        Self::new()
    }
}
