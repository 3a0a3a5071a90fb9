//! inode 编号编解码
//!
//! procfs 的每个节点只由一个 32 位编号标识，布局如下（高位到低位）：
//!
//! ```text
//! 31            16 15    12 11     8 7            0
//! +---------------+--------+--------+--------------+
//! |      pid      | parent | unused | leaf / index |
//! +---------------+--------+--------+--------------+
//! ```
//!
//! - `parent` 是父目录类别 [`ParentDir`]，决定低 8 位如何解释；
//! - 静态节点的低 8 位是 [`ProcFileType`]；
//! - `/proc/<pid>/fd/<n>` 的低 8 位是 `MAX_STATIC_INDEX + n`；
//! - `/proc/sys/<name>` 的低 8 位是 tunable 在注册表中的下标。
//!
//! 这里的函数都是纯函数且对任意位模式有定义：解码永远得到某个结果，
//! 是否真实存在由静态表、tunable 注册表和进程表在之后判断。

use crate::config::{LEAF_MASK, MAX_TUNABLES, PARENT_MASK, PARENT_SHIFT, PID_SHIFT};
use crate::kernel::Pid;

/// 父目录类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ParentDir {
    AbstractRoot = 0,
    Root = 1,
    RootSys = 2,
    Pid = 3,
    PidFd = 4,
    /// 未定义的类别值（5..=15）
    Invalid = 0xf,
}

impl ParentDir {
    /// 从 4 位字段解码，未知值得到 [`ParentDir::Invalid`]
    pub const fn from_bits(bits: u8) -> Self {
        match bits {
            0 => ParentDir::AbstractRoot,
            1 => ParentDir::Root,
            2 => ParentDir::RootSys,
            3 => ParentDir::Pid,
            4 => ParentDir::PidFd,
            _ => ParentDir::Invalid,
        }
    }
}

/// 静态节点类型
///
/// 数值即编号中的叶子字段。2、13、15、24 是根级与进程级区间的边界，
/// 不对应任何节点。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum ProcFileType {
    Invalid = 0,
    /// `/proc`
    Root = 1,

    RootMm = 3,
    RootMounts = 4,
    RootKmalloc = 5,
    RootAll = 6,
    RootSummary = 7,
    RootCpuinfo = 8,
    RootInodes = 9,
    RootDmesg = 10,
    /// symlink
    RootSelf = 11,
    /// directory
    RootSys = 12,

    /// `/proc/<pid>`
    Pid = 14,

    PidVm = 16,
    PidVmo = 17,
    PidStack = 18,
    PidRegs = 19,
    PidFds = 20,
    /// symlink
    PidExe = 21,
    /// symlink
    PidCwd = 22,
    /// directory
    PidFd = 23,
}

const ROOT_START: u8 = 2;
const ROOT_END: u8 = 13;
const PID_START: u8 = 15;
const PID_END: u8 = 24;

/// 静态叶子类型的个数上限，描述符编号从这里开始
pub const MAX_STATIC_INDEX: u8 = 25;

impl ProcFileType {
    /// 所有具名的静态类型，按数值升序
    pub const ALL: [ProcFileType; 20] = [
        ProcFileType::RootMm,
        ProcFileType::RootMounts,
        ProcFileType::RootKmalloc,
        ProcFileType::RootAll,
        ProcFileType::RootSummary,
        ProcFileType::RootCpuinfo,
        ProcFileType::RootInodes,
        ProcFileType::RootDmesg,
        ProcFileType::RootSelf,
        ProcFileType::RootSys,
        ProcFileType::PidVm,
        ProcFileType::PidVmo,
        ProcFileType::PidStack,
        ProcFileType::PidRegs,
        ProcFileType::PidFds,
        ProcFileType::PidExe,
        ProcFileType::PidCwd,
        ProcFileType::PidFd,
        ProcFileType::Root,
        ProcFileType::Pid,
    ];

    /// 从叶子字段解码，未知值得到 [`ProcFileType::Invalid`]
    pub fn from_u8(value: u8) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|ft| *ft as u8 == value)
            .unwrap_or(ProcFileType::Invalid)
    }

    /// 是否为 `/proc` 下的静态项
    pub fn is_root_level(self) -> bool {
        (self as u8) > ROOT_START && (self as u8) < ROOT_END
    }

    /// 是否为 `/proc/<pid>` 下的静态项
    pub fn is_pid_level(self) -> bool {
        (self as u8) > PID_START && (self as u8) < PID_END
    }

    pub fn is_directory(self) -> bool {
        matches!(
            self,
            ProcFileType::Root | ProcFileType::RootSys | ProcFileType::Pid | ProcFileType::PidFd
        )
    }

    pub fn is_symlink(self) -> bool {
        matches!(
            self,
            ProcFileType::RootSelf | ProcFileType::PidExe | ProcFileType::PidCwd
        )
    }
}

/// `/proc` 根目录的编号
pub const ROOT_INO: u32 = encode(ParentDir::AbstractRoot, 0, ProcFileType::Root as u8);

/// 将 (父目录类别, pid, 叶子) 打包为编号
pub const fn encode(parent: ParentDir, pid: Pid, leaf: u8) -> u32 {
    ((pid as u32) << PID_SHIFT) | ((parent as u32 & PARENT_MASK) << PARENT_SHIFT) | leaf as u32
}

/// 将编号拆分为 (父目录类别, pid, 叶子)
pub const fn decode(ino: u32) -> (ParentDir, Pid, u8) {
    (to_parent_dir(ino), to_pid(ino), to_leaf(ino))
}

pub const fn to_pid(ino: u32) -> Pid {
    (ino >> PID_SHIFT) as Pid
}

pub const fn to_parent_dir(ino: u32) -> ParentDir {
    ParentDir::from_bits(((ino >> PARENT_SHIFT) & PARENT_MASK) as u8)
}

pub const fn to_leaf(ino: u32) -> u8 {
    (ino & LEAF_MASK) as u8
}

pub fn to_file_type(ino: u32) -> ProcFileType {
    ProcFileType::from_u8(to_leaf(ino))
}

/// `/proc/<pid>/fd/<fd>` 的编号；描述符超出 8 位叶子字段时返回 `None`
pub fn encode_fd(pid: Pid, fd: usize) -> Option<u32> {
    let leaf = (MAX_STATIC_INDEX as usize).checked_add(fd)?;
    let leaf = u8::try_from(leaf).ok()?;
    Some(encode(ParentDir::PidFd, pid, leaf))
}

/// 描述符编号；只对 [`ParentDir::PidFd`] 类别有意义
pub fn decode_fd(ino: u32) -> usize {
    debug_assert_eq!(to_parent_dir(ino), ParentDir::PidFd);
    (to_leaf(ino) as usize).saturating_sub(MAX_STATIC_INDEX as usize)
}

/// `/proc/sys/<name>` 的编号；下标超出叶子字段时返回 `None`
pub fn encode_sys(index: usize) -> Option<u32> {
    if index >= MAX_TUNABLES {
        return None;
    }
    let leaf = u8::try_from(index).ok()?;
    Some(encode(ParentDir::RootSys, 0, leaf))
}

/// tunable 下标；只对 [`ParentDir::RootSys`] 类别有意义
pub fn decode_sys_index(ino: u32) -> usize {
    debug_assert_eq!(to_parent_dir(ino), ParentDir::RootSys);
    to_leaf(ino) as usize
}

/// 包含 `ino` 的目录的编号
pub fn parent_of(ino: u32) -> u32 {
    let pid = to_pid(ino);
    match to_parent_dir(ino) {
        ParentDir::AbstractRoot | ParentDir::Root | ParentDir::Invalid => ROOT_INO,
        ParentDir::RootSys => encode(ParentDir::Root, 0, ProcFileType::RootSys as u8),
        ParentDir::Pid => encode(ParentDir::Root, pid, ProcFileType::Pid as u8),
        ParentDir::PidFd => encode(ParentDir::Pid, pid, ProcFileType::PidFd as u8),
    }
}

/// 叶子字段是否命名一个目录
pub fn is_directory(ino: u32) -> bool {
    match to_parent_dir(ino) {
        ParentDir::RootSys | ParentDir::PidFd => false,
        _ => to_file_type(ino).is_directory(),
    }
}

/// 节点是否属于某个进程（进程目录本身及其下所有节点）
pub fn is_process_scoped(ino: u32) -> bool {
    match to_parent_dir(ino) {
        ParentDir::Pid | ParentDir::PidFd => true,
        ParentDir::Root => to_file_type(ino) == ProcFileType::Pid,
        _ => false,
    }
}

/// 节点是否常驻（tunable 节点在注册表存续期间一直存在）
pub fn is_persistent(ino: u32) -> bool {
    to_parent_dir(ino) == ParentDir::RootSys
}

/// inode 编号的结构化视图
///
/// 与 `u32` 编号一一对应：对任意合法值 `id`，`ProcIdent::from_ino(id.ino()) == id`。
/// 不合法的位模式解码为 [`ProcIdent::Invalid`] 并保留原值。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcIdent {
    /// `/proc`
    Root,
    /// `/proc` 下的静态项（含 `sys` 目录与 `self` 链接）
    Entry(ProcFileType),
    /// `/proc/sys/<name>`，值为注册表下标
    SysVar(usize),
    /// `/proc/<pid>`
    PidDir(Pid),
    /// `/proc/<pid>` 下的静态项（含 `fd` 目录）
    PidEntry(Pid, ProcFileType),
    /// `/proc/<pid>/fd/<fd>`
    PidFd(Pid, usize),
    /// 无法解释的编号
    Invalid(u32),
}

impl ProcIdent {
    pub fn from_ino(ino: u32) -> Self {
        let (parent, pid, leaf) = decode(ino);
        // 8..12 位未使用，非零即视为非法
        if (ino >> 8) & 0xf != 0 {
            return ProcIdent::Invalid(ino);
        }
        let ft = ProcFileType::from_u8(leaf);
        match parent {
            ParentDir::AbstractRoot if pid == 0 && ft == ProcFileType::Root => ProcIdent::Root,
            ParentDir::Root if ft == ProcFileType::Pid => ProcIdent::PidDir(pid),
            ParentDir::Root if pid == 0 && ft.is_root_level() => ProcIdent::Entry(ft),
            ParentDir::RootSys if pid == 0 => ProcIdent::SysVar(leaf as usize),
            ParentDir::Pid if ft.is_pid_level() => ProcIdent::PidEntry(pid, ft),
            ParentDir::PidFd if leaf >= MAX_STATIC_INDEX => ProcIdent::PidFd(pid, decode_fd(ino)),
            _ => ProcIdent::Invalid(ino),
        }
    }

    pub fn ino(&self) -> u32 {
        match *self {
            ProcIdent::Root => ROOT_INO,
            ProcIdent::Entry(ft) => encode(ParentDir::Root, 0, ft as u8),
            ProcIdent::SysVar(index) => {
                encode_sys(index).unwrap_or(encode(ParentDir::Invalid, 0, 0))
            }
            ProcIdent::PidDir(pid) => encode(ParentDir::Root, pid, ProcFileType::Pid as u8),
            ProcIdent::PidEntry(pid, ft) => encode(ParentDir::Pid, pid, ft as u8),
            ProcIdent::PidFd(pid, fd) => {
                // 超出范围的描述符无法编码，退化为非法编号
                encode_fd(pid, fd).unwrap_or(encode(ParentDir::Invalid, pid, 0))
            }
            ProcIdent::Invalid(ino) => ino,
        }
    }

    /// 所属进程
    pub fn pid(&self) -> Option<Pid> {
        match *self {
            ProcIdent::PidDir(pid) | ProcIdent::PidEntry(pid, _) | ProcIdent::PidFd(pid, _) => {
                Some(pid)
            }
            _ => None,
        }
    }

    /// 对应的静态类型；描述符、tunable 与非法编号没有静态类型
    pub fn file_type(&self) -> Option<ProcFileType> {
        match *self {
            ProcIdent::Root => Some(ProcFileType::Root),
            ProcIdent::Entry(ft) | ProcIdent::PidEntry(_, ft) => Some(ft),
            ProcIdent::PidDir(_) => Some(ProcFileType::Pid),
            _ => None,
        }
    }

    pub fn is_directory(&self) -> bool {
        self.file_type().is_some_and(ProcFileType::is_directory)
    }

    /// 是否以符号链接形式呈现
    pub fn is_symlink(&self) -> bool {
        match self {
            ProcIdent::PidFd(..) => true,
            _ => self.file_type().is_some_and(ProcFileType::is_symlink),
        }
    }

    /// 包含该节点的目录
    pub fn parent(&self) -> ProcIdent {
        ProcIdent::from_ino(parent_of(self.ino()))
    }
}
