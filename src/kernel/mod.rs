//! 内核协作者接口
//!
//! procfs 渲染的内容全部来自这里定义的外部状态：进程表、内核符号表、
//! 内存管理器、堆分配器统计、控制台日志、挂载表与 CPU 识别信息。
//! 每个 trait 只暴露一次只读快照，由内核在构造 [`ProcFS`](crate::ProcFS)
//! 时一并注入。

pub mod process;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

pub use process::{
    MemoryUsage, PhysicalPage, Pid, ProcessHandle, ProcessState, ProcessTable, RegionInfo,
    RegisterSnapshot, SharedProcess, TtyInfo, VmObjectInfo,
};

/// 内核符号
#[derive(Debug, Clone)]
pub struct KernelSymbol {
    pub address: usize,
    pub name: String,
}

/// 内核符号解析接口
pub trait SymbolResolver: Send + Sync {
    /// 返回不大于 `addr` 的最近命名符号；无法解析时返回 `None`
    fn symbolicate(&self, addr: usize) -> Option<KernelSymbol>;
}

/// 内存管理器快照（/proc/mm）
#[derive(Debug, Clone, Default)]
pub struct MemoryManagerSnapshot {
    pub vm_objects: Vec<VmObjectInfo>,
    pub free_physical_pages: usize,
    pub free_supervisor_physical_pages: usize,
}

/// 内存管理器接口
pub trait MemoryManager: Send + Sync {
    /// 在关中断/持锁的短临界区内取得 VMO 列表与空闲页统计
    fn snapshot(&self) -> MemoryManagerSnapshot;
}

/// 内核堆统计（/proc/kmalloc）
#[derive(Debug, Clone, Copy, Default)]
pub struct HeapStats {
    pub eternal: usize,
    pub allocated: usize,
    pub free: usize,
}

/// 内核堆分配器接口
pub trait HeapAllocator: Send + Sync {
    fn stats(&self) -> HeapStats;
}

/// 控制台日志缓冲区接口（/proc/dmesg）
pub trait ConsoleLog: Send + Sync {
    /// 日志环形缓冲区当前内容
    fn log_buffer(&self) -> Vec<u8>;
}

/// 挂载点描述
#[derive(Debug, Clone)]
pub struct MountInfo {
    /// 被挂载文件系统的类名
    pub fs_class: String,
    /// 宿主 inode（fsid, index, 绝对路径）；根挂载为 `None`
    pub host: Option<(u32, u32, String)>,
}

/// 挂载表接口
pub trait MountTable: Send + Sync {
    fn mounts(&self) -> Vec<MountInfo>;
}

/// CPUID 指令的一次结果
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuidResult {
    pub eax: u32,
    pub ebx: u32,
    pub ecx: u32,
    pub edx: u32,
}

/// CPU 识别接口
pub trait CpuProbe: Send + Sync {
    fn cpuid(&self, leaf: u32) -> CpuidResult;
}

/// procfs 依赖的全部内核协作者
#[derive(Clone)]
pub struct KernelView {
    pub processes: Arc<dyn ProcessTable>,
    pub symbols: Arc<dyn SymbolResolver>,
    pub memory: Arc<dyn MemoryManager>,
    pub heap: Arc<dyn HeapAllocator>,
    pub console: Arc<dyn ConsoleLog>,
    pub mounts: Arc<dyn MountTable>,
    pub cpu: Arc<dyn CpuProbe>,
}

impl KernelView {
    /// 获取进程；已退出则返回 `None`
    pub fn process(&self, pid: Pid) -> Option<SharedProcess> {
        self.processes.get_process(pid)
    }
}
