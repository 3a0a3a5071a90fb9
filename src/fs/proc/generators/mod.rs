//! 各节点的内容生成器
//!
//! 每个生成器都是无状态的单元结构体，调用时从 [`ProcFS`](crate::ProcFS)
//! 注入的内核视图中取得实时数据并渲染为文本。
pub mod all;
pub mod cpuinfo;
pub mod dmesg;
pub mod inodes;
pub mod kmalloc;
pub mod mm;
pub mod mounts;
pub mod process;
pub mod self_link;
pub mod summary;

pub use all::AllGenerator;
pub use cpuinfo::CpuinfoGenerator;
pub use dmesg::DmesgGenerator;
pub use inodes::InodesGenerator;
pub use kmalloc::KmallocGenerator;
pub use mm::MmGenerator;
pub use mounts::MountsGenerator;
pub use process::{
    CwdGenerator, ExeGenerator, FdEntryGenerator, FdsGenerator, RegsGenerator, StackGenerator,
    VmGenerator, VmoGenerator,
};
pub use self_link::SelfGenerator;
pub use summary::SummaryGenerator;
