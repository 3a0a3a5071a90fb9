//! /proc/sys 下的 tunable 注册表
//!
//! 内核其它子系统可以在任意时刻把一个布尔开关发布到 `/proc/sys/<name>`。
//! 注册表只追加不删除，下标按注册顺序分配并直接编码进 inode 编号，
//! 每个 tunable 的节点在注册时创建并随注册表一直存在。
//!
//! 读取得到 `"0\n"` 或 `"1\n"`；写入只看第一个字节，`'0'`/`'1'` 之外的内容
//! 被静默忽略，但仍报告整个输入已被消费。

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicBool, Ordering};

use crate::config::MAX_TUNABLES;
use crate::fs::proc::entries::{ContentGenerator, ContentWriter};
use crate::fs::proc::{ProcFS, ProcIdent, ProcInode};
use crate::sync::RwLock;
use crate::vfs::FsError;

/// 写入成功后调用的通知回调
pub type ChangeCallback = Box<dyn Fn() + Send + Sync>;

pub struct Tunable {
    name: String,
    index: usize,
    flag: Arc<AtomicBool>,
    on_change: Option<ChangeCallback>,
    /// 常驻节点
    inode: Arc<ProcInode>,
}

impl Tunable {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn inode(&self) -> &Arc<ProcInode> {
        &self.inode
    }

    /// 当前值渲染为 `"0\n"` / `"1\n"`
    pub fn read(&self) -> Vec<u8> {
        let digit = if self.flag.load(Ordering::Acquire) { b'1' } else { b'0' };
        alloc::vec![digit, b'\n']
    }

    /// 应用一次写入，返回被消费的字节数（总是 `data.len()`）
    pub fn apply(&self, data: &[u8]) -> usize {
        match data.first() {
            Some(&b) if b == b'0' || b == b'1' => {
                let value = b == b'1';
                self.flag.store(value, Ordering::Release);
                pr_debug!("sys/{} <- {}", self.name, value as u8);
                if let Some(cb) = &self.on_change {
                    cb();
                }
            }
            _ => {
                pr_debug!("sys/{}: ignoring malformed write of {} bytes", self.name, data.len());
            }
        }
        data.len()
    }
}

impl ContentGenerator for Tunable {
    fn generate(&self, _fs: &ProcFS, _ident: ProcIdent) -> Result<Vec<u8>, FsError> {
        Ok(self.read())
    }
}

impl ContentWriter for Tunable {
    fn write(&self, _fs: &ProcFS, _ident: ProcIdent, data: &[u8]) -> Result<usize, FsError> {
        Ok(self.apply(data))
    }
}

pub struct TunableRegistry {
    entries: RwLock<Vec<Arc<Tunable>>>,
}

impl TunableRegistry {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// 追加一个 tunable 并返回它的下标
    ///
    /// `make_inode` 以新下标对应的 inode 编号构造常驻节点。
    ///
    /// # Panics
    ///
    /// 注册数超过 [`MAX_TUNABLES`] 时 panic：注册只发生在固定的初始化路径上，
    /// 超出容量属于配置错误。
    pub fn register(
        &self,
        name: &str,
        flag: Arc<AtomicBool>,
        on_change: Option<ChangeCallback>,
        make_inode: impl FnOnce(usize) -> Arc<ProcInode>,
    ) -> usize {
        let mut entries = self.entries.write();
        let index = entries.len();
        assert!(
            index < MAX_TUNABLES,
            "procfs: too many tunables, cannot register sys/{}",
            name
        );
        let inode = make_inode(index);
        entries.push(Arc::new(Tunable {
            name: name.to_string(),
            index,
            flag,
            on_change,
            inode,
        }));
        index
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<Arc<Tunable>> {
        self.entries.read().get(index).cloned()
    }

    /// 按名字线性查找
    pub fn find(&self, name: &str) -> Option<Arc<Tunable>> {
        self.entries.read().iter().find(|t| t.name == name).cloned()
    }

    /// 当前所有 tunable 的快照，按下标升序
    pub fn snapshot(&self) -> Vec<Arc<Tunable>> {
        self.entries.read().clone()
    }
}

impl Default for TunableRegistry {
    fn default() -> Self {
        Self::new()
    }
}
