//! End-to-end integration test for the install lifecycle
//!
//! This test exercises the complete flow: config loading -> path resolution ->
//! install -> source edits -> re-install -> mode switch -> uninstall.

use appsup_core::{
    InstallConfig, InstallPaths, Installer, MemoryTranscript, SyncOptions, Uninstaller,
};
use appsup_test_utils::TestTree;
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;

const APP: &str = "home/Library/Application Support/helpers";

/// Set up a home directory with bundled tools, a TOML config and a project
fn setup_home() -> TestTree {
    let tree = TestTree::new();
    tree.write("home/tool/app_support/a.py", "alpha");
    tree.write("home/tool/app_support/lib/b.py", "beta");
    tree.write(
        "home/tool/appsup.toml",
        r#"
"Application Support Subdirectory" = "helpers"
"Projects Subdirectory" = "work"
"#,
    );
    tree.write("home/code/site/index.html", "<html/>");
    tree
}

fn load_paths(tree: &TestTree) -> InstallPaths {
    let mut transcript = MemoryTranscript::new();
    let config = InstallConfig::load(&tree.path("home/tool/appsup.toml"), &mut transcript).unwrap();
    assert_eq!(transcript.progress_starting_with("loading config file: ").count(), 1);
    InstallPaths::resolve(&config, &tree.path("home/Library/Application Support")).unwrap()
}

fn install(tree: &TestTree, paths: &InstallPaths, options: SyncOptions) -> MemoryTranscript {
    let mut transcript = MemoryTranscript::new();
    let ok = Installer::new(
        tree.path("home/tool/app_support"),
        paths.clone(),
        options.with_link_root(tree.path("home")),
    )
    .with_projects([tree.path("home/code/site")])
    .run(&mut transcript)
    .unwrap();
    assert!(ok, "errors: {:?}", transcript.errors);
    transcript
}

fn names(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_install_lifecycle() {
    let tree = setup_home();
    let paths = load_paths(&tree);
    assert_eq!(paths.projects_dir, tree.path(&format!("{APP}/work")));

    // Fresh link-mode install.
    install(&tree, &paths, SyncOptions::link());
    assert_eq!(tree.child_names(APP), names(&["a.py", "lib", "work"]));
    assert!(tree.is_symlink(&format!("{APP}/lib")));
    assert!(tree.is_symlink(&format!("{APP}/work/site")));

    // Source edits: one new file, one removed nested file.
    tree.write("home/tool/app_support/c.py", "gamma");
    std::fs::remove_file(tree.path("home/tool/app_support/lib/b.py")).unwrap();

    let transcript = install(&tree, &paths, SyncOptions::link());
    assert_eq!(transcript.progress.len(), 1, "{:?}", transcript.progress);
    assert!(transcript.progress[0].starts_with("placing symbolic link at"));
    assert!(tree.child_names(&format!("{APP}/lib")).is_empty());

    // Switching to copy mode replaces every link with a real entry.
    let transcript = install(&tree, &paths, SyncOptions::copy());
    assert_eq!(transcript.progress_starting_with("deleting file ").count(), 4);
    tree.assert_file(&format!("{APP}/a.py"), "alpha");
    tree.assert_file(&format!("{APP}/c.py"), "gamma");
    tree.assert_file(&format!("{APP}/work/site/index.html"), "<html/>");
    assert!(!tree.is_symlink(&format!("{APP}/lib")));

    // A changed source file is refreshed, nothing else is touched.
    tree.write("home/tool/app_support/a.py", "alpha, revised");
    let transcript = install(&tree, &paths, SyncOptions::copy());
    assert_eq!(transcript.progress.len(), 2, "{:?}", transcript.progress);
    assert!(transcript.progress[0].starts_with("deleting file "));
    assert!(transcript.progress[1].starts_with("copying file "));
    tree.assert_file(&format!("{APP}/a.py"), "alpha, revised");

    // Uninstalling the project leaves the tools in place.
    let mut transcript = MemoryTranscript::new();
    let ok = Uninstaller::new(paths.clone())
        .with_projects(["site".to_string()])
        .run(&mut transcript)
        .unwrap();
    assert!(ok);
    assert!(tree.child_names(&format!("{APP}/work")).is_empty());
    tree.assert_file(&format!("{APP}/c.py"), "gamma");

    // Full uninstall removes the managed directory and nothing else.
    let mut transcript = MemoryTranscript::new();
    let ok = Uninstaller::new(paths).run(&mut transcript).unwrap();
    assert!(ok);
    tree.assert_missing(APP);
    tree.assert_file("home/tool/app_support/c.py", "gamma");
    tree.assert_file("home/code/site/index.html", "<html/>");
}

#[test]
fn test_relative_links_survive_moving_home() {
    let tree = setup_home();
    let paths = load_paths(&tree);
    install(&tree, &paths, SyncOptions::link());

    std::fs::rename(tree.path("home"), tree.path("moved")).unwrap();

    let moved_app = "moved/Library/Application Support/helpers";
    assert_eq!(tree.read(&format!("{moved_app}/a.py")), "alpha");
    assert_eq!(tree.read(&format!("{moved_app}/work/site/index.html")), "<html/>");
}
