//! Tests for the Reconciler decision rules

use appsup_core::{MemoryTranscript, Reconciler, SyncOptions};
use appsup_fs::quoted;
use appsup_test_utils::TestTree;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::path::PathBuf;

/// Source `A/{x.txt, sub/y.txt}` as used by most scenarios.
fn scenario_tree() -> TestTree {
    let tree = TestTree::new();
    tree.write_with_mtime("A/x.txt", "0123456789", 2_000_000_000);
    tree.write("A/sub/y.txt", "y");
    tree
}

fn link_options(tree: &TestTree) -> SyncOptions {
    SyncOptions::link().with_link_root(tree.root())
}

fn copy_options(tree: &TestTree) -> SyncOptions {
    SyncOptions::copy().with_link_root(tree.root())
}

fn sync(tree: &TestTree, options: SyncOptions, delete: bool) -> (bool, MemoryTranscript) {
    let mut transcript = MemoryTranscript::new();
    let ok = Reconciler::new(options, &mut transcript).sync(&tree.path("A"), &tree.path("dst"), delete);
    (ok, transcript)
}

#[test]
fn test_missing_destination_becomes_link_to_source_dir() {
    let tree = scenario_tree();

    let (ok, transcript) = sync(&tree, link_options(&tree), false);

    assert!(ok);
    assert_eq!(tree.assert_symlink("dst"), PathBuf::from("A"));
    assert_eq!(
        transcript.progress,
        vec![format!(
            "placing symbolic link at {} to A",
            quoted(&tree.path("dst"))
        )]
    );
    assert_eq!(tree.read("dst/sub/y.txt"), "y");
}

#[test]
fn test_existing_empty_destination_gets_relative_child_links() {
    let tree = scenario_tree();
    tree.mkdir("dst");

    let (ok, transcript) = sync(&tree, link_options(&tree), false);

    assert!(ok);
    assert_eq!(tree.assert_symlink("dst/x.txt"), PathBuf::from("../A/x.txt"));
    assert_eq!(tree.assert_symlink("dst/sub"), PathBuf::from("../A/sub"));
    assert_eq!(transcript.progress.len(), 2);
    assert!(transcript.errors.is_empty());
}

#[test]
fn test_link_targets_are_absolute_outside_link_root() {
    let tree = scenario_tree();
    tree.mkdir("home/dst");
    let options = SyncOptions::link().with_link_root(tree.path("home"));

    let mut transcript = MemoryTranscript::new();
    let ok = Reconciler::new(options, &mut transcript).sync(
        &tree.path("A"),
        &tree.path("home/dst"),
        false,
    );

    assert!(ok);
    assert_eq!(tree.assert_symlink("home/dst/x.txt"), tree.path("A/x.txt"));
}

#[rstest]
#[case::delete_enabled(true)]
#[case::delete_disabled(false)]
fn test_orphan_handling(#[case] delete: bool) {
    let tree = scenario_tree();
    tree.write("dst/z.txt", "orphan");

    let (ok, transcript) = sync(&tree, link_options(&tree), delete);

    assert!(ok);
    let deleting = format!("deleting file {}", quoted(&tree.path("dst/z.txt")));
    if delete {
        tree.assert_missing("dst/z.txt");
        assert!(transcript.progress.contains(&deleting));
        assert_eq!(tree.child_names("dst"), tree.child_names("A"));
    } else {
        tree.assert_file("dst/z.txt", "orphan");
        assert!(!transcript.progress.contains(&deleting));
        assert!(tree.child_names("dst").is_superset(&tree.child_names("A")));
    }
}

#[test]
fn test_orphan_directory_is_deleted_recursively() {
    let tree = scenario_tree();
    tree.write("dst/old/deep/file.txt", "gone");

    let (ok, transcript) = sync(&tree, link_options(&tree), true);

    assert!(ok);
    tree.assert_missing("dst/old");
    assert!(
        transcript
            .progress
            .contains(&format!("deleting directory {}", quoted(&tree.path("dst/old"))))
    );
}

#[test]
fn test_delete_propagates_into_nested_directories() {
    let tree = scenario_tree();
    tree.write("dst/sub/stale.txt", "stale");

    let (ok, _) = sync(&tree, link_options(&tree), true);

    assert!(ok);
    tree.assert_missing("dst/sub/stale.txt");
    assert_eq!(tree.assert_symlink("dst/sub/y.txt"), PathBuf::from("../../A/sub/y.txt"));
}

#[test]
fn test_nested_orphans_survive_without_delete() {
    let tree = scenario_tree();
    tree.write("dst/sub/stale.txt", "stale");

    let (ok, _) = sync(&tree, link_options(&tree), false);

    assert!(ok);
    tree.assert_file("dst/sub/stale.txt", "stale");
}

#[cfg(unix)]
#[test]
fn test_stale_link_is_replaced() {
    let tree = scenario_tree();
    tree.write("elsewhere.txt", "other");
    tree.symlink("dst/x.txt", tree.path("elsewhere.txt"));

    let (ok, transcript) = sync(&tree, link_options(&tree), false);

    assert!(ok);
    assert_eq!(tree.assert_symlink("dst/x.txt"), PathBuf::from("../A/x.txt"));
    assert!(
        transcript
            .progress
            .contains(&format!("deleting file {}", quoted(&tree.path("dst/x.txt"))))
    );
}

#[cfg(unix)]
#[test]
fn test_dangling_link_is_replaced() {
    let tree = scenario_tree();
    tree.symlink("dst/x.txt", tree.path("vanished.txt"));

    let (ok, transcript) = sync(&tree, link_options(&tree), false);

    assert!(ok);
    assert_eq!(tree.assert_symlink("dst/x.txt"), PathBuf::from("../A/x.txt"));
    assert!(transcript.errors.is_empty());
}

#[cfg(unix)]
#[test]
fn test_link_resolving_to_source_is_left_alone() {
    let tree = scenario_tree();
    // Absolute rather than the relative form a fresh sync would write.
    tree.symlink("dst/x.txt", tree.path("A/x.txt"));
    tree.symlink("dst/sub", "../A/sub");

    let (ok, transcript) = sync(&tree, link_options(&tree), true);

    assert!(ok);
    assert!(transcript.is_empty(), "unexpected: {:?}", transcript);
    assert_eq!(tree.assert_symlink("dst/x.txt"), tree.path("A/x.txt"));
}

#[cfg(unix)]
#[test]
fn test_copy_mode_replaces_links_with_copies() {
    let tree = scenario_tree();
    tree.symlink("dst/x.txt", tree.path("A/x.txt"));
    tree.symlink("dst/sub", tree.path("A/sub"));

    let (ok, _) = sync(&tree, copy_options(&tree), false);

    assert!(ok);
    tree.assert_file("dst/x.txt", "0123456789");
    tree.assert_file("dst/sub/y.txt", "y");
    assert!(!tree.is_symlink("dst/sub"));
}

#[test]
fn test_older_file_of_different_size_is_replaced() {
    let tree = scenario_tree();
    tree.write_with_mtime("dst/x.txt", "old", 1_000_000_000);

    let (ok, transcript) = sync(&tree, link_options(&tree), false);

    assert!(ok);
    tree.assert_file("dst/x.txt", "0123456789");
    let src = tree.path("A/x.txt");
    let dst = tree.path("dst/x.txt");
    assert_eq!(
        transcript.progress_starting_with("deleting").collect::<Vec<_>>(),
        vec![format!("deleting file {}", quoted(&dst))]
    );
    assert!(
        transcript
            .progress
            .contains(&format!("copying file {} to {}", quoted(&src), quoted(&dst)))
    );
    assert_eq!(tree.mtime("dst/x.txt"), 2_000_000_000);
}

#[test]
fn test_newer_source_of_same_size_is_copied() {
    let tree = scenario_tree();
    tree.write_with_mtime("dst/x.txt", "abcdefghij", 1_000_000_000);

    let (ok, _) = sync(&tree, link_options(&tree), false);

    assert!(ok);
    tree.assert_file("dst/x.txt", "0123456789");
}

#[test]
fn test_same_size_not_older_file_is_left_alone() {
    let tree = scenario_tree();
    tree.write_with_mtime("dst/x.txt", "abcdefghij", 2_000_000_000);

    let (ok, transcript) = sync(&tree, link_options(&tree), false);

    assert!(ok);
    tree.assert_file("dst/x.txt", "abcdefghij");
    assert_eq!(transcript.progress_starting_with("copying").count(), 0);
}

#[test]
fn test_newer_destination_of_different_size_is_replaced() {
    let tree = scenario_tree();
    tree.write_with_mtime("dst/x.txt", "short", 2_100_000_000);

    let (ok, _) = sync(&tree, link_options(&tree), false);

    assert!(ok);
    tree.assert_file("dst/x.txt", "0123456789");
}

#[test]
fn test_copy_mode_materializes_nested_tree() {
    let tree = scenario_tree();

    let (ok, transcript) = sync(&tree, copy_options(&tree), false);

    assert!(ok);
    assert!(!tree.is_symlink("dst"));
    tree.assert_file("dst/x.txt", "0123456789");
    tree.assert_file("dst/sub/y.txt", "y");
    assert_eq!(
        transcript.progress,
        vec![format!(
            "copying directory {} to {}",
            quoted(&tree.path("A")),
            quoted(&tree.path("dst"))
        )]
    );
}

#[test]
fn test_copy_mode_into_existing_directory_copies_each_child() {
    let tree = scenario_tree();
    tree.mkdir("dst");

    let (ok, transcript) = sync(&tree, copy_options(&tree), true);

    assert!(ok);
    tree.assert_file("dst/x.txt", "0123456789");
    tree.assert_file("dst/sub/y.txt", "y");
    assert_eq!(transcript.progress_starting_with("copying file").count(), 1);
    assert_eq!(transcript.progress_starting_with("copying directory").count(), 1);
}

#[rstest]
#[case::link_mode(false)]
#[case::copy_mode(true)]
fn test_second_run_is_silent(#[case] copy_mode: bool) {
    let tree = scenario_tree();
    tree.mkdir("dst");
    tree.write("dst/orphan.txt", "x");
    let options = if copy_mode {
        copy_options(&tree)
    } else {
        link_options(&tree)
    };

    let (first_ok, first) = sync(&tree, options.clone(), true);
    let (second_ok, second) = sync(&tree, options, true);

    assert!(first_ok);
    assert!(!first.is_empty());
    assert!(second_ok);
    assert!(second.is_empty(), "second run logged: {:?}", second);
}

#[test]
fn test_failure_does_not_abort_siblings() {
    let tree = TestTree::new();
    tree.write("A/a.txt", "a");
    tree.write("A/b.txt", "b");
    tree.write("A/c.txt", "c");
    // A directory where the source has a file cannot be reconciled.
    tree.write("dst/b.txt/keep", "keep");

    let (ok, transcript) = sync(&tree, link_options(&tree), true);

    assert!(!ok);
    assert_eq!(transcript.errors.len(), 1);
    assert!(transcript.errors[0].starts_with("ERROR: "));
    assert!(tree.is_symlink("dst/a.txt"));
    assert!(tree.is_symlink("dst/c.txt"));
    tree.assert_file("dst/b.txt/keep", "keep");
}

#[test]
fn test_uncreatable_parent_fails_only_its_entry() {
    let tree = TestTree::new();
    tree.write("p/a.txt", "a");
    // A regular file where a parent directory is needed.
    tree.write("blocker", "not a directory");
    let mut transcript = MemoryTranscript::new();
    let mut reconciler = Reconciler::new(copy_options(&tree), &mut transcript);

    let blocked = reconciler.sync(&tree.path("p/a.txt"), &tree.path("blocker/sub/a.txt"), true);
    let sibling = reconciler.sync(&tree.path("p/a.txt"), &tree.path("ok/a.txt"), true);

    assert!(!blocked);
    assert!(sibling);
    assert_eq!(transcript.errors.len(), 1, "{:?}", transcript.errors);
    assert!(transcript.errors[0].starts_with("ERROR: "));
    assert!(transcript.errors[0].contains("blocker"));
    tree.assert_file("blocker", "not a directory");
    tree.assert_file("ok/a.txt", "a");
}

#[cfg(unix)]
#[test]
fn test_copy_mode_fills_readonly_source_directory() {
    use std::fs::{self, Permissions};
    use std::os::unix::fs::PermissionsExt;

    let tree = TestTree::new();
    tree.write("A/ro/f.txt", "inside");
    fs::set_permissions(tree.path("A/ro"), Permissions::from_mode(0o555)).unwrap();

    let (ok, transcript) = sync(&tree, copy_options(&tree), true);
    let (second_ok, second) = sync(&tree, copy_options(&tree), true);

    for dir in ["A/ro", "dst/ro"] {
        let _ = fs::set_permissions(tree.path(dir), Permissions::from_mode(0o755));
    }
    assert!(ok, "errors: {:?}", transcript.errors);
    tree.assert_file("dst/ro/f.txt", "inside");
    assert!(second_ok);
    assert!(second.is_empty(), "second run logged: {:?}", second);
}

#[test]
fn test_sync_preserving_keeps_named_children() {
    let tree = scenario_tree();
    tree.write("dst/proj/installed/file.txt", "project");
    tree.write("dst/junk.txt", "junk");
    let preserve: BTreeSet<OsString> = [OsString::from("proj")].into_iter().collect();

    let mut transcript = MemoryTranscript::new();
    let ok = Reconciler::new(link_options(&tree), &mut transcript).sync_preserving(
        &tree.path("A"),
        &tree.path("dst"),
        true,
        &preserve,
    );

    assert!(ok);
    tree.assert_missing("dst/junk.txt");
    tree.assert_file("dst/proj/installed/file.txt", "project");
}

#[cfg(unix)]
#[test]
fn test_delete_removes_link_but_not_its_target() {
    let tree = scenario_tree();
    tree.symlink("dst", tree.path("A"));

    let mut transcript = MemoryTranscript::new();
    let ok = Reconciler::new(link_options(&tree), &mut transcript).delete(&tree.path("dst"));

    assert!(ok);
    tree.assert_missing("dst");
    tree.assert_file("A/sub/y.txt", "y");
    assert_eq!(
        transcript.progress,
        vec![format!("deleting file {}", quoted(&tree.path("dst")))]
    );
}

#[test]
fn test_delete_of_missing_path_fails_and_logs() {
    let tree = TestTree::new();

    let mut transcript = MemoryTranscript::new();
    let ok = Reconciler::new(SyncOptions::link(), &mut transcript).delete(&tree.path("absent"));

    assert!(!ok);
    assert_eq!(transcript.progress.len(), 1);
    assert_eq!(transcript.errors.len(), 1);
}
