//! ProcFS 目录操作测试

use super::*;
use crate::fs::proc::ident::{self, ROOT_INO};
use crate::vfs::{FileSystem, FsError, InodeType};
use crate::{kassert, test_case};
use core::sync::atomic::AtomicBool;

/// 遍历得到的每个 (名字, 编号) 都能通过 lookup 与 reverse_lookup 互相还原
fn assert_bidirectional(procfs: &ProcFS, dir: u32) {
    let mut children = Vec::new();
    procfs
        .enumerate_children(dir, |name, ino, _| children.push((String::from(name), ino)))
        .unwrap();

    for (name, child) in children {
        kassert!(procfs.lookup_child(dir, &name) == Ok(child));
        // 根目录的 `.` 与 `..` 是同一个编号，反查只能得到其中一个
        if name == "." || name == ".." {
            continue;
        }
        kassert!(procfs.reverse_lookup(dir, child).as_deref() == Ok(name.as_str()));
        kassert!(ident::parent_of(child) == dir);
    }
}

test_case!(test_procfs_root_readdir_starts_with_dots, {
    let (procfs, _kernel) = create_test_procfs();
    let entries = procfs.root_inode().readdir().unwrap();

    kassert!(entries[0].name == ".");
    kassert!(entries[0].inode_no == ROOT_INO as usize);
    kassert!(entries[1].name == "..");
    kassert!(entries[1].inode_no == ROOT_INO as usize);
});

test_case!(test_procfs_root_enumeration_completeness, {
    let (procfs, kernel) = create_test_procfs_with_processes();
    kernel.add_process(MockProcess::new(300, "daemon"));

    let names = child_names(procfs.root());
    kassert!(
        names
            == [
                "mm", "mounts", "kmalloc", "all", "summary", "cpuinfo", "inodes", "dmesg",
                "self", "sys", "1", "7", "300"
            ]
    );
    for name in &names {
        kassert!(procfs.root().lookup_node(name).is_ok());
    }
});

test_case!(test_procfs_bidirectional_consistency, {
    let (procfs, _kernel) = create_test_procfs_with_processes();
    procfs.register_tunable("kmalloc_stacks", Arc::new(AtomicBool::new(false)), None);
    procfs.register_tunable("wm_flash", Arc::new(AtomicBool::new(true)), None);

    for path in ["", "sys", "1", "7", "1/fd", "7/fd"] {
        let dir = walk(&procfs, path).unwrap();
        assert_bidirectional(&procfs, dir.ino());
    }
});

test_case!(test_procfs_parent_consistency, {
    let (procfs, _kernel) = create_test_procfs_with_processes();
    procfs.register_tunable("flag", Arc::new(AtomicBool::new(false)), None);

    for path in ["mounts", "sys", "sys/flag", "7", "7/vm", "7/fd", "7/fd/3", "7/exe"] {
        let node = walk(&procfs, path).unwrap();
        let parent = ident::parent_of(node.ino());
        let name = procfs.reverse_lookup(parent, node.ino()).unwrap();
        kassert!(procfs.lookup_child(parent, &name) == Ok(node.ino()));
        kassert!(node.parent().unwrap().ino() == parent);
    }
});

test_case!(test_procfs_fd_enumeration_matches_liveness, {
    let (procfs, _kernel) = create_test_procfs_with_processes();
    let fd_dir = walk(&procfs, "7/fd").unwrap();

    kassert!(child_names(&fd_dir) == ["0", "1", "3"]);
    kassert!(fd_dir.lookup_node("2").err() == Some(FsError::NotFound));

    for entry in fd_dir.readdir().unwrap().iter().skip(2) {
        kassert!(entry.inode_type == InodeType::Symlink);
    }
});

test_case!(test_procfs_fd_directory_tracks_open_and_close, {
    let (procfs, kernel) = create_test_procfs_with_processes();
    let fd_dir = walk(&procfs, "1/fd").unwrap();
    kassert!(child_names(&fd_dir) == ["0", "1"]);

    let init = kernel.mock_process(1).unwrap();
    init.open_fd(5, "/var/log/messages");
    init.close_fd(0);

    kassert!(child_names(&fd_dir) == ["1", "5"]);
    kassert!(fd_dir.lookup_node("0").is_err());
    kassert!(fd_dir.lookup_node("5").is_ok());
});

test_case!(test_procfs_pid_directory_hides_missing_links, {
    let (procfs, kernel) = create_test_procfs_with_processes();
    let mut kthread = MockProcess::new(12, "kthread");
    kthread.exe = None;
    kthread.cwd = None;
    kernel.add_process(kthread);

    let dir = walk(&procfs, "12").unwrap();
    kassert!(child_names(&dir) == ["vm", "vmo", "stack", "regs", "fds", "fd"]);
    kassert!(dir.lookup_node("exe").is_err());
    kassert!(dir.lookup_node("cwd").is_err());

    let full = walk(&procfs, "7").unwrap();
    kassert!(child_names(&full) == ["vm", "vmo", "stack", "regs", "fds", "exe", "cwd", "fd"]);
});

test_case!(test_procfs_lookup_dot_entries, {
    let (procfs, _kernel) = create_test_procfs_with_processes();
    let fd_dir = walk(&procfs, "7/fd").unwrap();

    kassert!(fd_dir.lookup_node(".").unwrap().ino() == fd_dir.ino());
    kassert!(fd_dir.lookup_node("..").unwrap().ino() == walk(&procfs, "7").unwrap().ino());
    kassert!(procfs.root().lookup_node("..").unwrap().ino() == ROOT_INO);
});

test_case!(test_procfs_lookup_rejects_noncanonical_pid, {
    let (procfs, _kernel) = create_test_procfs_with_processes();
    let root = procfs.root();

    kassert!(root.lookup_node("7").is_ok());
    kassert!(root.lookup_node("07").is_err());
    kassert!(root.lookup_node("+7").is_err());
    kassert!(root.lookup_node("").is_err());
    kassert!(root.lookup_node("99").err() == Some(FsError::NotFound));
    kassert!(root.lookup_node("100000").is_err());
});

test_case!(test_procfs_lookup_in_file_is_not_directory, {
    let (procfs, _kernel) = create_test_procfs_with_processes();
    let mounts = walk(&procfs, "mounts").unwrap();

    kassert!(mounts.lookup_node("x").err() == Some(FsError::NotDirectory));
    kassert!(mounts.readdir().err() == Some(FsError::NotDirectory));
    kassert!(procfs.reverse_lookup(mounts.ino(), ROOT_INO).is_err());
});

test_case!(test_procfs_pid_names_do_not_leak_across_scopes, {
    let (procfs, _kernel) = create_test_procfs_with_processes();
    // 进程级名字不在根目录下，根级名字也不在进程目录下
    kassert!(procfs.root().lookup_node("regs").is_err());
    kassert!(walk(&procfs, "7").unwrap().lookup_node("mounts").is_err());
});

test_case!(test_procfs_reverse_lookup_rejects_foreign_child, {
    let (procfs, _kernel) = create_test_procfs_with_processes();
    let pid1 = walk(&procfs, "1").unwrap();
    let vm7 = walk(&procfs, "7/vm").unwrap();

    kassert!(procfs.reverse_lookup(pid1.ino(), vm7.ino()) == Err(FsError::NotFound));
    kassert!(procfs.reverse_lookup(ROOT_INO, pid1.ino()).as_deref() == Ok("1"));
});

test_case!(test_procfs_directory_entry_count, {
    let (procfs, _kernel) = create_test_procfs_with_processes();
    // . .. + 10 个静态项 + 2 个进程
    kassert!(procfs.root().directory_entry_count() == Ok(14));
    kassert!(walk(&procfs, "7/fd").unwrap().directory_entry_count() == Ok(5));
    kassert!(walk(&procfs, "sys").unwrap().directory_entry_count() == Ok(2));
});

test_case!(test_procfs_exited_process_directory, {
    let (procfs, kernel) = create_test_procfs_with_processes();
    let dir = walk(&procfs, "7").unwrap();

    kernel.remove_process(7);

    kassert!(dir.readdir().err() == Some(FsError::NotFound));
    kassert!(dir.lookup_node("vm").err() == Some(FsError::NotFound));
    kassert!(procfs.root().lookup_node("7").is_err());
    kassert!(!child_names(procfs.root()).contains(&String::from("7")));
});

test_case!(test_procfs_path_of, {
    let (procfs, _kernel) = create_test_procfs_with_processes();
    let node = walk(&procfs, "7/fd/3").unwrap();

    kassert!(procfs.path_of(node.ino()).as_deref() == Ok("/7/fd/3"));
    kassert!(procfs.path_of(ROOT_INO).as_deref() == Ok("/"));
});
