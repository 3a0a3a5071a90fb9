//! ProcFS 基础功能测试

use super::*;
use crate::fs::proc::ident::ROOT_INO;
use crate::vfs::{FileMode, FileSystem, FsError, InodeType};
use crate::{kassert, test_case};

test_case!(test_procfs_create, {
    let (procfs, _kernel) = create_test_procfs();
    kassert!(procfs.fs_type() == "proc");
});

test_case!(test_procfs_root_inode, {
    let (procfs, _kernel) = create_test_procfs();
    let root = procfs.root_inode();

    let metadata = root.metadata().unwrap();
    kassert!(metadata.inode_type == InodeType::Directory);
    kassert!(metadata.inode_no == ROOT_INO as usize);
    kassert!(metadata.mode.bits() & 0o777 == 0o555); // dr-xr-xr-x
    kassert!(metadata.mode.contains(FileMode::S_IFDIR));
});

test_case!(test_procfs_sync, {
    let (procfs, _kernel) = create_test_procfs();
    // proc 是纯内存文件系统，sync 应该总是成功
    kassert!(procfs.sync().is_ok());
    kassert!(procfs.umount().is_ok());
});

test_case!(test_procfs_statfs, {
    let (procfs, _kernel) = create_test_procfs();
    let statfs = procfs.statfs().unwrap();

    kassert!(statfs.block_size == 4096);
    kassert!(statfs.total_blocks == 0);
    kassert!(statfs.free_blocks == 0);
    kassert!(statfs.total_inodes == 0);
    kassert!(statfs.max_filename_len == 255);
});

test_case!(test_procfs_root_metadata, {
    let (procfs, _kernel) = create_test_procfs();
    let metadata = procfs.root_inode().metadata().unwrap();

    kassert!(metadata.uid == 0);
    kassert!(metadata.gid == 0);
    kassert!(metadata.nlinks == 2);
    kassert!(metadata.size == 0);
});

test_case!(test_procfs_get_inode_root_is_singleton, {
    let (procfs, _kernel) = create_test_procfs();
    let a = procfs.get_inode(ROOT_INO);
    let b = procfs.get_inode(ROOT_INO);
    kassert!(Arc::ptr_eq(&a, &b));
    kassert!(Arc::ptr_eq(&a, procfs.root()));
});

test_case!(test_procfs_file_modes, {
    let (procfs, _kernel) = create_test_procfs_with_processes();

    let mounts = walk(&procfs, "mounts").unwrap().metadata().unwrap();
    kassert!(mounts.inode_type == InodeType::File);
    kassert!(mounts.mode.bits() == FileMode::S_IFREG.bits() | 0o644);
    kassert!(mounts.nlinks == 1);

    let self_link = walk(&procfs, "self").unwrap().metadata().unwrap();
    kassert!(self_link.inode_type == InodeType::Symlink);
    kassert!(self_link.mode.bits() == FileMode::S_IFLNK.bits() | 0o777);

    let sys = walk(&procfs, "sys").unwrap().metadata().unwrap();
    kassert!(sys.inode_type == InodeType::Directory);
    kassert!(sys.mode.bits() == FileMode::S_IFDIR.bits() | 0o555);
});

test_case!(test_procfs_process_entries_report_owner, {
    let (procfs, _kernel) = create_test_procfs_with_processes();

    let dir = walk(&procfs, "7").unwrap().metadata().unwrap();
    kassert!(dir.uid == 1000);
    kassert!(dir.gid == 1001);

    let regs = walk(&procfs, "7/regs").unwrap().metadata().unwrap();
    kassert!(regs.uid == 1000);
    kassert!(regs.gid == 1001);

    // 非进程节点属于 root
    let kmalloc = walk(&procfs, "kmalloc").unwrap().metadata().unwrap();
    kassert!(kmalloc.uid == 0);
});

test_case!(test_procfs_exited_process_reports_overflow_id, {
    let (procfs, kernel) = create_test_procfs_with_processes();
    let regs = walk(&procfs, "7/regs").unwrap();

    kernel.remove_process(7);

    let metadata = regs.metadata().unwrap();
    kassert!(metadata.uid == crate::config::OVERFLOW_UID);
    kassert!(metadata.gid == crate::config::OVERFLOW_GID);
});

test_case!(test_procfs_shape_mutations_rejected, {
    let (procfs, _kernel) = create_test_procfs_with_processes();
    let root = procfs.root_inode();
    let mode = FileMode::from_bits_truncate(0o644);

    kassert!(root.create("new", mode).err() == Some(FsError::PermissionDenied));
    kassert!(root.mkdir("newdir", mode).err() == Some(FsError::PermissionDenied));
    kassert!(root.unlink("mounts") == Err(FsError::PermissionDenied));
    kassert!(root.rmdir("sys") == Err(FsError::PermissionDenied));

    let mounts = walk(&procfs, "mounts").unwrap();
    kassert!(mounts.truncate(0) == Err(FsError::PermissionDenied));
    kassert!(mounts.chmod(mode) == Err(FsError::PermissionDenied));
    kassert!(mounts.chown(0, 0) == Err(FsError::PermissionDenied));

    // 树的形状不变
    kassert!(root.lookup("mounts").is_ok());
    kassert!(root.lookup("new").is_err());
});

test_case!(test_procfs_directory_read_is_error, {
    let (procfs, _kernel) = create_test_procfs();
    let mut buf = [0u8; 16];
    kassert!(procfs.root_inode().read_at(0, &mut buf) == Err(FsError::IsDirectory));
    kassert!(procfs.root_inode().write_at(0, b"x") == Err(FsError::IsDirectory));
});

test_case!(test_procfs_invalid_identifier, {
    let (procfs, _kernel) = create_test_procfs();
    // 父目录类别 7 未定义
    let bogus = procfs.get_inode(0x7003);
    kassert!(bogus.metadata().err() == Some(FsError::NotFound));

    // 尚未注册的 tunable 下标
    let unregistered = procfs.get_inode(crate::fs::proc::ident::encode_sys(5).unwrap());
    kassert!(unregistered.metadata().err() == Some(FsError::NotFound));
});

test_case!(test_procfs_cacheable, {
    let (procfs, _kernel) = create_test_procfs_with_processes();
    kassert!(procfs.root_inode().cacheable());
    kassert!(walk(&procfs, "mounts").unwrap().cacheable());
    kassert!(!walk(&procfs, "7").unwrap().cacheable());
    kassert!(!walk(&procfs, "7/fd/3").unwrap().cacheable());
});
