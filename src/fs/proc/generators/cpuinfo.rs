use alloc::format;
use alloc::vec::Vec;

use crate::fs::proc::{ContentGenerator, ProcFS, ProcIdent};
use crate::vfs::FsError;

/// /proc/cpuinfo - CPUID 识别信息
pub struct CpuinfoGenerator;

const LEAF_VENDOR: u32 = 0;
const LEAF_SIGNATURE: u32 = 1;
const LEAF_EXTENDED_MAX: u32 = 0x8000_0000;
const LEAF_BRAND_FIRST: u32 = 0x8000_0002;
const LEAF_BRAND_LAST: u32 = 0x8000_0004;

/// 把寄存器按小端顺序原样追加 4 个字节
fn push_register(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// family/model 的显示值，按 Intel/AMD 扩展字段规则合成
fn display_family_model(eax: u32) -> (u32, u32) {
    let model = (eax >> 4) & 0xf;
    let family = (eax >> 8) & 0xf;
    let extended_model = (eax >> 16) & 0xf;
    let extended_family = (eax >> 20) & 0xff;

    match family {
        15 => (family + extended_family, model + (extended_model << 4)),
        6 => (family, model + (extended_model << 4)),
        _ => (family, model),
    }
}

impl ContentGenerator for CpuinfoGenerator {
    fn generate(&self, fs: &ProcFS, _ident: ProcIdent) -> Result<Vec<u8>, FsError> {
        let cpu = &fs.kernel().cpu;
        let mut content = Vec::new();

        let vendor = cpu.cpuid(LEAF_VENDOR);
        content.extend_from_slice(b"cpuid:     ");
        push_register(&mut content, vendor.ebx);
        push_register(&mut content, vendor.edx);
        push_register(&mut content, vendor.ecx);
        content.push(b'\n');

        let signature = cpu.cpuid(LEAF_SIGNATURE).eax;
        let (family, model) = display_family_model(signature);
        content.extend_from_slice(format!("family:    {}\n", family).as_bytes());
        content.extend_from_slice(format!("model:     {}\n", model).as_bytes());
        content.extend_from_slice(format!("stepping:  {}\n", signature & 0xf).as_bytes());
        content.extend_from_slice(format!("type:      {}\n", (signature >> 12) & 0x3).as_bytes());

        // 品牌字符串只在 CPU 支持对应扩展叶时输出
        if cpu.cpuid(LEAF_EXTENDED_MAX).eax >= LEAF_BRAND_LAST {
            let mut brand = Vec::with_capacity(48);
            for leaf in LEAF_BRAND_FIRST..=LEAF_BRAND_LAST {
                let r = cpu.cpuid(leaf);
                for reg in [r.eax, r.ebx, r.ecx, r.edx] {
                    brand.extend_from_slice(&reg.to_le_bytes());
                }
            }
            // 以 NUL 结尾
            let len = brand.iter().position(|&b| b == 0).unwrap_or(brand.len());
            content.extend_from_slice(b"brandstr:  \"");
            content.extend_from_slice(brand[..len].trim_ascii());
            content.extend_from_slice(b"\"\n");
        }

        Ok(content)
    }
}
