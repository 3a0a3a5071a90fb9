//! ProcFS 符号链接测试

use super::*;
use crate::vfs::{FileSystem, FsError, InodeType};
use crate::{kassert, test_case};

test_case!(test_procfs_self_symlink_exists, {
    let (procfs, _kernel) = create_test_procfs_with_processes();
    let self_link = procfs.root_inode().lookup("self").unwrap();

    let metadata = self_link.metadata().unwrap();
    kassert!(metadata.inode_type == InodeType::Symlink);
});

test_case!(test_procfs_self_symlink_read, {
    let (procfs, _kernel) = create_test_procfs_with_processes();
    let self_link = procfs.root_inode().lookup("self").unwrap();

    // 指向当前进程的 PID
    kassert!(self_link.readlink().as_deref() == Ok("7"));
});

test_case!(test_procfs_self_symlink_dynamic, {
    let (procfs, kernel) = create_test_procfs_with_processes();
    let self_link = walk(&procfs, "self").unwrap();

    kassert!(self_link.readlink().as_deref() == Ok("7"));
    kernel.set_current(1);
    kassert!(self_link.readlink().as_deref() == Ok("1"));
    kassert!(read_all(&self_link) == "1");
});

test_case!(test_procfs_symlink_size_is_target_length, {
    let (procfs, _kernel) = create_test_procfs_with_processes();

    let exe = walk(&procfs, "7/exe").unwrap().metadata().unwrap();
    kassert!(exe.inode_type == InodeType::Symlink);
    kassert!(exe.size == "/bin/sh".len());

    let fd = walk(&procfs, "7/fd/3").unwrap().metadata().unwrap();
    kassert!(fd.inode_type == InodeType::Symlink);
    kassert!(fd.size == "/home/user/notes.txt".len());
});

test_case!(test_procfs_exe_and_cwd, {
    let (procfs, kernel) = create_test_procfs_with_processes();
    let mut p = MockProcess::new(20, "make");
    p.exe = Some(String::from("/usr/bin/make"));
    p.cwd = Some(String::from("/home/user/src"));
    kernel.add_process(p);

    kassert!(walk(&procfs, "20/exe").unwrap().readlink().as_deref() == Ok("/usr/bin/make"));
    kassert!(walk(&procfs, "20/cwd").unwrap().readlink().as_deref() == Ok("/home/user/src"));
});

test_case!(test_procfs_fd_symlinks, {
    let (procfs, _kernel) = create_test_procfs_with_processes();

    kassert!(walk(&procfs, "1/fd/0").unwrap().readlink().as_deref() == Ok("/dev/console"));
    kassert!(walk(&procfs, "7/fd/1").unwrap().readlink().as_deref() == Ok("/dev/tty0"));
});

test_case!(test_procfs_readlink_on_regular_file, {
    let (procfs, _kernel) = create_test_procfs_with_processes();

    let err = walk(&procfs, "mounts").unwrap().readlink().err();
    kassert!(err == Some(FsError::InvalidArgument));
    kassert!(procfs.root().readlink().err() == Some(FsError::InvalidArgument));
});
