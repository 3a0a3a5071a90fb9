//! 进程表接口
//!
//! procfs 只读取进程状态，不管理进程。进程表由内核实现并通过
//! [`KernelView`](crate::kernel::KernelView) 注入，每个进程以
//! [`ProcessHandle`] trait 对象的形式暴露给内容生成器。
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

/// 进程 ID（16 位，与 inode 编号中的 pid 字段宽度一致）
pub type Pid = u16;

/// 进程调度状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    Runnable,
    Running,
    Dying,
    Dead,
    Stopped,
    BlockedSleep,
    BlockedWait,
    BlockedRead,
    BlockedWrite,
    BlockedSignal,
}

impl ProcessState {
    /// 状态名称（用于 summary/all 输出）
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessState::Runnable => "Runnable",
            ProcessState::Running => "Running",
            ProcessState::Dying => "Dying",
            ProcessState::Dead => "Dead",
            ProcessState::Stopped => "Stopped",
            ProcessState::BlockedSleep => "Sleep",
            ProcessState::BlockedWait => "Wait",
            ProcessState::BlockedRead => "Read",
            ProcessState::BlockedWrite => "Write",
            ProcessState::BlockedSignal => "Signal",
        }
    }
}

/// 控制终端信息
#[derive(Debug, Clone)]
pub struct TtyInfo {
    /// 终端设备的绝对路径，如 `/dev/tty0`
    pub name: String,
    /// 终端前台进程组
    pub pgid: u32,
}

impl TtyInfo {
    /// 终端路径的最后一段（`/dev/tty0` -> `tty0`）
    pub fn short_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }
}

/// 进程内存统计（字节）
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryUsage {
    pub virtual_bytes: usize,
    pub resident_bytes: usize,
    pub shared_bytes: usize,
}

/// 物理页快照
#[derive(Debug, Clone, Copy)]
pub struct PhysicalPage {
    pub paddr: usize,
    pub ref_count: u32,
}

/// 虚拟内存对象（VMO）快照
#[derive(Debug, Clone)]
pub struct VmObjectInfo {
    /// 对象标识（内核中通常为对象地址）
    pub id: usize,
    pub name: String,
    pub anonymous: bool,
    pub ref_count: u32,
    /// 每页对应的物理页，`None` 表示尚未驻留
    pub pages: Vec<Option<PhysicalPage>>,
}

/// 进程映射区域快照
#[derive(Debug, Clone)]
pub struct RegionInfo {
    pub base: usize,
    pub size: usize,
    pub resident: usize,
    pub name: String,
    pub vmo: VmObjectInfo,
    /// 每页的写时复制标记，长度不足的部分视为 false
    pub cow: Vec<bool>,
}

impl RegionInfo {
    /// 区域最后一个字节的地址
    pub fn last_addr(&self) -> usize {
        self.base.wrapping_add(self.size.saturating_sub(1))
    }

    /// 第 `page` 页是否为写时复制
    pub fn is_cow(&self, page: usize) -> bool {
        self.cow.get(page).copied().unwrap_or(false)
    }
}

/// 保存的寄存器/控制状态
#[derive(Debug, Default, Clone, Copy)]
pub struct RegisterSnapshot {
    pub eax: u32,
    pub ebx: u32,
    pub ecx: u32,
    pub edx: u32,
    pub esi: u32,
    pub edi: u32,
    pub ebp: u32,
    pub cr3: u32,
    pub eflags: u32,
    pub ss: u16,
    pub esp: u32,
    pub cs: u16,
    pub eip: u32,
}

/// 单个进程的只读访问接口
///
/// 实现者返回的都是调用时刻的快照，procfs 不持有其中任何引用。
pub trait ProcessHandle: Send + Sync {
    fn pid(&self) -> Pid;
    fn name(&self) -> String;
    fn uid(&self) -> u32;
    fn gid(&self) -> u32;
    fn ppid(&self) -> Pid;
    fn pgid(&self) -> u32;
    fn sid(&self) -> u32;
    fn state(&self) -> ProcessState;
    fn times_scheduled(&self) -> u64;
    fn tty(&self) -> Option<TtyInfo>;
    fn memory_usage(&self) -> MemoryUsage;

    /// 映射区域列表，按基地址升序
    fn regions(&self) -> Vec<RegionInfo>;

    /// 描述符表容量
    fn max_open_file_descriptors(&self) -> usize;

    /// 描述符 `fd` 打开时返回其绝对路径
    fn file_descriptor_path(&self, fd: usize) -> Option<String>;

    /// 已打开的描述符数量
    fn number_of_open_file_descriptors(&self) -> usize {
        (0..self.max_open_file_descriptors())
            .filter(|&fd| self.file_descriptor_path(fd).is_some())
            .count()
    }

    fn registers(&self) -> RegisterSnapshot;

    /// 在进程地址空间中读取一个机器字；地址不可读时返回 `None`
    ///
    /// 用于栈回溯时校验帧指针，实现者必须在读取前检查地址有效性。
    fn read_stack_word(&self, addr: usize) -> Option<usize>;

    fn executable_path(&self) -> Option<String>;
    fn cwd_path(&self) -> Option<String>;
}

/// 共享的进程句柄
pub type SharedProcess = Arc<dyn ProcessHandle>;

/// 进程表接口
pub trait ProcessTable: Send + Sync {
    /// 当前存活的进程 ID（不含常驻空闲进程）
    fn list_pids(&self) -> Vec<Pid>;

    /// 根据 pid 获取进程；进程已不存在时返回 `None`
    fn get_process(&self, pid: Pid) -> Option<SharedProcess>;

    /// 在进程表锁内一次性取得所有存活进程（不含空闲进程），
    /// 快照期间不允许进程创建或退出
    fn snapshot(&self) -> Vec<SharedProcess>;

    /// 常驻内核空闲进程
    fn idle_process(&self) -> SharedProcess;

    /// 发起当前调用的进程
    fn current_pid(&self) -> Pid;
}
