//! 节点缓存与生命周期测试

use super::*;
use crate::fs::proc::ident::{self, ProcFileType, ProcIdent};
use crate::vfs::FsError;
use crate::{kassert, test_case};
use core::sync::atomic::AtomicBool;

test_case!(test_cache_returns_same_node_while_held, {
    let (procfs, _kernel) = create_test_procfs_with_processes();
    let ino = ProcIdent::PidEntry(7, ProcFileType::PidVm).ino();

    let a = procfs.get_inode(ino);
    let b = procfs.get_inode(ino);
    kassert!(Arc::ptr_eq(&a, &b));
    kassert!(procfs.cache().len() == 1);
});

test_case!(test_cache_evicts_on_last_release, {
    let (procfs, _kernel) = create_test_procfs_with_processes();
    let ino = ProcIdent::PidEntry(7, ProcFileType::PidVm).ino();

    let node = procfs.get_inode(ino);
    kassert!(procfs.cache().get(ino).is_some());

    drop(node);
    kassert!(procfs.cache().get(ino).is_none());
    kassert!(procfs.cache().is_empty());

    // 再次访问会重新创建
    let again = procfs.get_inode(ino);
    kassert!(again.ino() == ino);
    kassert!(procfs.cache().len() == 1);
});

test_case!(test_cache_prunes_dead_entries_on_insert, {
    let (procfs, _kernel) = create_test_procfs_with_processes();
    for name in ["vm", "vmo", "stack", "regs"] {
        let _ = walk(&procfs, &alloc::format!("7/{}", name)).unwrap();
    }
    kassert!(procfs.cache().is_empty());

    let held = walk(&procfs, "7/fds").unwrap();
    kassert!(procfs.cache().live_nodes().len() == 1);
    kassert!(procfs.cache().live_nodes()[0].ino() == held.ino());
});

test_case!(test_cache_root_is_permanent, {
    let (procfs, _kernel) = create_test_procfs();
    let root = procfs.get_inode(ident::ROOT_INO);
    drop(root);
    kassert!(procfs.cache().get(ident::ROOT_INO).is_none());
    kassert!(Arc::ptr_eq(&procfs.get_inode(ident::ROOT_INO), procfs.root()));
});

test_case!(test_cache_node_survives_process_exit, {
    let (procfs, kernel) = create_test_procfs_with_processes();
    let node = walk(&procfs, "7/stack").unwrap();
    kernel.remove_process(7);

    // 节点仍可访问，只是内容变空
    kassert!(Arc::ptr_eq(&node, &procfs.get_inode(node.ino())));
    kassert!(read_all(&node).is_empty());
});

test_case!(test_cache_concurrent_get_or_create, {
    let (procfs, _kernel) = create_test_procfs_with_processes();
    let ino = ProcIdent::PidFd(7, 3).ino();
    let held = procfs.get_inode(ino);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let procfs = procfs.clone();
            std::thread::spawn(move || {
                for _ in 0..100 {
                    let node = procfs.get_inode(ino);
                    assert_eq!(node.ino(), ino);
                    let _ = procfs.get_inode(ProcIdent::PidEntry(7, ProcFileType::PidRegs).ino());
                }
                procfs.get_inode(ino)
            })
        })
        .collect();

    for handle in handles {
        let node = handle.join().unwrap();
        kassert!(Arc::ptr_eq(&node, &held));
    }
});

test_case!(test_cache_ignores_unregistered_tunable_keys, {
    let (procfs, _kernel) = create_test_procfs();
    let ino = ident::encode_sys(0).unwrap();

    // 注册前访问得到的节点不登记到缓存
    let early = procfs.get_inode(ino);
    kassert!(early.metadata().err() == Some(FsError::NotFound));
    kassert!(procfs.cache().get(ino).is_none());
    kassert!(procfs.cache().is_empty());

    procfs.register_tunable("x", Arc::new(AtomicBool::new(false)), None);
    let first = procfs.get_inode(ino);
    let second = procfs.get_inode(ino);
    kassert!(Arc::ptr_eq(&first, &second));
    kassert!(first.metadata().is_ok());
    kassert!(procfs.cache().is_empty());
});
