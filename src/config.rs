//! constants for the proc filesystem (platform-independent)

// about inode number layout
// [31..16] pid | [15..12] parent directory class | [11..8] unused | [7..0] leaf type / index
pub const PID_SHIFT: u32 = 16;
pub const PARENT_SHIFT: u32 = 12;
pub const PARENT_MASK: u32 = 0xf;
pub const LEAF_MASK: u32 = 0xff;

/// /proc/sys 下最多可注册的 tunable 数量（受叶子字段 8 位宽度限制）
pub const MAX_TUNABLES: usize = 256;

// about stack symbolication
pub const MAX_STACK_DEPTH: usize = 64;
/// 栈帧按 i386 布局：[fp] 为上一帧指针，[fp + 4] 为返回地址
pub const STACK_WORD_SIZE: usize = 4;

/// 进程已退出时，进程相关节点报告的 uid/gid（与 Linux overflowuid 一致）
pub const OVERFLOW_UID: u32 = 65534;
pub const OVERFLOW_GID: u32 = 65534;

// about statfs
pub const PROC_BLOCK_SIZE: usize = 4096;
pub const PROC_MAX_NAME_LEN: usize = 255;
