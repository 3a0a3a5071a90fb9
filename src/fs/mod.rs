//! 文件系统模块
//!
//! 目前只包含 procfs：一个按需从内核实时状态生成内容的合成文件系统。
pub mod proc;
