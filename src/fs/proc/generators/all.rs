use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::fs::proc::{ContentGenerator, ProcFS, ProcIdent};
use crate::kernel::ProcessHandle;
use crate::vfs::FsError;

/// /proc/all - 每个进程一行的逗号分隔记录，空闲进程在最前
///
/// 字段顺序：pid, 调度次数, 终端进程组, pgid, sid, uid, gid, 状态, ppid,
/// 打开描述符数, 终端, 名字, 虚拟/驻留/共享内存字节数。
pub struct AllGenerator;

fn build_process_line(out: &mut String, process: &dyn ProcessHandle) {
    let tty = process.tty();
    let memory = process.memory_usage();
    out.push_str(&format!(
        "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}\n",
        process.pid(),
        process.times_scheduled(),
        tty.as_ref().map_or(0, |t| t.pgid),
        process.pgid(),
        process.sid(),
        process.uid(),
        process.gid(),
        process.state().as_str(),
        process.ppid(),
        process.number_of_open_file_descriptors(),
        tty.as_ref().map_or("notty", |t| t.name.as_str()),
        process.name(),
        memory.virtual_bytes,
        memory.resident_bytes,
        memory.shared_bytes
    ));
}

impl ContentGenerator for AllGenerator {
    fn generate(&self, fs: &ProcFS, _ident: ProcIdent) -> Result<Vec<u8>, FsError> {
        let table = &fs.kernel().processes;
        let processes = table.snapshot();

        let mut content = String::new();
        build_process_line(&mut content, table.idle_process().as_ref());
        for process in &processes {
            build_process_line(&mut content, process.as_ref());
        }

        Ok(content.into_bytes())
    }
}
