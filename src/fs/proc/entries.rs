//! 静态节点表
//!
//! 以 [`ProcFileType`] 数值为下标的定长表，构造后不再修改。每个具名槽位绑定
//! 一个名字、一个可选的内容生成器和一个可选的写入处理器；没有名字的槽位
//! （区间边界、`Root`、`Pid`）只占位。
//!
//! 按名字查找是对具名槽位的线性扫描，表长固定为 [`MAX_STATIC_INDEX`]。

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::fs::proc::ProcFS;
use crate::fs::proc::generators::{
    AllGenerator, CpuinfoGenerator, CwdGenerator, DmesgGenerator, ExeGenerator, FdsGenerator,
    InodesGenerator, KmallocGenerator, MmGenerator, MountsGenerator, RegsGenerator,
    SelfGenerator, StackGenerator, SummaryGenerator, VmGenerator, VmoGenerator,
};
use crate::fs::proc::ident::{MAX_STATIC_INDEX, ProcFileType, ProcIdent};
use crate::vfs::FsError;

/// 动态内容生成器 trait
pub trait ContentGenerator: Send + Sync {
    /// 生成文件内容（每次调用时重新生成）
    ///
    /// 目标进程或描述符已消失时返回 [`FsError::StaleReference`]，
    /// 由调用方降级为空内容。
    fn generate(&self, fs: &ProcFS, ident: ProcIdent) -> Result<Vec<u8>, FsError>;
}

/// 内容写入处理器 trait
pub trait ContentWriter: Send + Sync {
    /// 处理一次从偏移 0 开始的写入，返回被消费的字节数
    fn write(&self, fs: &ProcFS, ident: ProcIdent, data: &[u8]) -> Result<usize, FsError>;
}

/// 静态表中的一项
pub struct StaticEntry {
    pub name: &'static str,
    pub file_type: ProcFileType,
    pub generator: Option<Box<dyn ContentGenerator>>,
    pub writer: Option<Box<dyn ContentWriter>>,
}

impl StaticEntry {
    fn new(name: &'static str, file_type: ProcFileType) -> Self {
        Self {
            name,
            file_type,
            generator: None,
            writer: None,
        }
    }

    fn with_generator(mut self, generator: impl ContentGenerator + 'static) -> Self {
        self.generator = Some(Box::new(generator));
        self
    }
}

pub struct EntryTable {
    slots: Vec<Option<StaticEntry>>,
}

impl EntryTable {
    pub fn new() -> Self {
        let mut slots: Vec<Option<StaticEntry>> =
            (0..MAX_STATIC_INDEX).map(|_| None).collect();

        let mut set = |entry: StaticEntry| {
            let index = entry.file_type as usize;
            slots[index] = Some(entry);
        };

        set(StaticEntry::new("mm", ProcFileType::RootMm).with_generator(MmGenerator));
        set(StaticEntry::new("mounts", ProcFileType::RootMounts).with_generator(MountsGenerator));
        set(StaticEntry::new("kmalloc", ProcFileType::RootKmalloc).with_generator(KmallocGenerator));
        set(StaticEntry::new("all", ProcFileType::RootAll).with_generator(AllGenerator));
        set(StaticEntry::new("summary", ProcFileType::RootSummary).with_generator(SummaryGenerator));
        set(StaticEntry::new("cpuinfo", ProcFileType::RootCpuinfo).with_generator(CpuinfoGenerator));
        set(StaticEntry::new("inodes", ProcFileType::RootInodes).with_generator(InodesGenerator));
        set(StaticEntry::new("dmesg", ProcFileType::RootDmesg).with_generator(DmesgGenerator));
        set(StaticEntry::new("self", ProcFileType::RootSelf).with_generator(SelfGenerator));
        set(StaticEntry::new("sys", ProcFileType::RootSys));

        set(StaticEntry::new("vm", ProcFileType::PidVm).with_generator(VmGenerator));
        set(StaticEntry::new("vmo", ProcFileType::PidVmo).with_generator(VmoGenerator));
        set(StaticEntry::new("stack", ProcFileType::PidStack).with_generator(StackGenerator));
        set(StaticEntry::new("regs", ProcFileType::PidRegs).with_generator(RegsGenerator));
        set(StaticEntry::new("fds", ProcFileType::PidFds).with_generator(FdsGenerator));
        set(StaticEntry::new("exe", ProcFileType::PidExe).with_generator(ExeGenerator));
        set(StaticEntry::new("cwd", ProcFileType::PidCwd).with_generator(CwdGenerator));
        set(StaticEntry::new("fd", ProcFileType::PidFd));

        Self { slots }
    }

    pub fn get(&self, file_type: ProcFileType) -> Option<&StaticEntry> {
        self.slots.get(file_type as usize)?.as_ref()
    }

    /// `/proc` 下的静态项，按类型数值升序
    pub fn root_entries(&self) -> impl Iterator<Item = &StaticEntry> {
        self.slots
            .iter()
            .flatten()
            .filter(|e| e.file_type.is_root_level())
    }

    /// `/proc/<pid>` 下的静态项，按类型数值升序
    pub fn pid_entries(&self) -> impl Iterator<Item = &StaticEntry> {
        self.slots
            .iter()
            .flatten()
            .filter(|e| e.file_type.is_pid_level())
    }

    pub fn find_root(&self, name: &str) -> Option<&StaticEntry> {
        self.root_entries().find(|e| e.name == name)
    }
}

impl Default for EntryTable {
    fn default() -> Self {
        Self::new()
    }
}
