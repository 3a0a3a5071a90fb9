use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::fs::proc::{ContentGenerator, ProcFS, ProcIdent};
use crate::kernel::ProcessHandle;
use crate::vfs::FsError;

/// /proc/summary - 按列对齐的进程表
pub struct SummaryGenerator;

const HEADER: &str = "PID TPG PGP SID  OWNER  STATE      PPID NSCHED     FDS  TTY  NAME\n";

fn summary_line(process: &dyn ProcessHandle) -> String {
    let tty = process.tty();
    format!(
        "{:>3} {:>3} {:>3} {:>3}  {:>4}   {:>8}   {:>3}  {:>9}  {:>3}  {:>4}  {}\n",
        process.pid(),
        tty.as_ref().map_or(0, |t| t.pgid),
        process.pgid(),
        process.sid(),
        process.uid(),
        process.state().as_str(),
        process.ppid(),
        process.times_scheduled(),
        process.number_of_open_file_descriptors(),
        tty.as_ref().map_or("n/a", |t| t.short_name()),
        process.name()
    )
}

impl ContentGenerator for SummaryGenerator {
    fn generate(&self, fs: &ProcFS, _ident: ProcIdent) -> Result<Vec<u8>, FsError> {
        let table = &fs.kernel().processes;
        let processes = table.snapshot();

        let mut content = String::from(HEADER);
        content.push_str(&summary_line(table.idle_process().as_ref()));
        for process in &processes {
            content.push_str(&summary_line(process.as_ref()));
        }

        Ok(content.into_bytes())
    }
}
