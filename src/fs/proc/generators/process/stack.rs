use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use super::process_of;
use crate::config::{MAX_STACK_DEPTH, STACK_WORD_SIZE};
use crate::fs::proc::{ContentGenerator, ProcFS, ProcIdent};
use crate::kernel::{KernelSymbol, ProcessHandle, SymbolResolver};
use crate::vfs::FsError;

/// /proc/<pid>/stack - 沿帧指针链回溯并符号化
///
/// 先输出保存的 eip，再从 ebp 开始逐帧取返回地址。以下任一情况终止回溯：
/// - 帧指针或返回地址所在的字不可读
/// - 上一帧指针不严格大于当前帧指针（自环或向下指的损坏链）
/// - 已走过 [`MAX_STACK_DEPTH`] 帧
///
/// 无法符号化的地址不输出。
pub struct StackGenerator;

/// 返回回溯得到的 (地址, 符号) 序列
pub fn walk_stack(
    process: &dyn ProcessHandle,
    symbols: &dyn SymbolResolver,
) -> Vec<(usize, KernelSymbol)> {
    let regs = process.registers();
    let mut frames = Vec::new();

    let eip = regs.eip as usize;
    if let Some(symbol) = symbols.symbolicate(eip) {
        frames.push((eip, symbol));
    }

    let mut fp = regs.ebp as usize;
    for depth in 0.. {
        if depth == MAX_STACK_DEPTH {
            pr_debug!("stack walk of pid {} truncated at {} frames", process.pid(), depth);
            break;
        }
        let Some(next_fp) = process.read_stack_word(fp) else {
            break;
        };
        let Some(retaddr) = fp
            .checked_add(STACK_WORD_SIZE)
            .and_then(|addr| process.read_stack_word(addr))
        else {
            break;
        };
        if let Some(symbol) = symbols.symbolicate(retaddr) {
            frames.push((retaddr, symbol));
        }
        if next_fp <= fp {
            break;
        }
        fp = next_fp;
    }

    frames
}

impl ContentGenerator for StackGenerator {
    fn generate(&self, fs: &ProcFS, ident: ProcIdent) -> Result<Vec<u8>, FsError> {
        let process = process_of(fs, ident)?;
        let frames = walk_stack(process.as_ref(), fs.kernel().symbols.as_ref());

        let mut content = String::new();
        for (address, symbol) in frames {
            let offset = address.wrapping_sub(symbol.address);
            content.push_str(&format!("{:#010x}  {} +{}\n", address, symbol.name, offset));
        }

        Ok(content.into_bytes())
    }
}
