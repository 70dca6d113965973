//! Store atomicity: the mapping and its version marker are replaced as one
//! pair, and an interrupted replacement never exposes a mix.

mod common;

use std::fs;

use bundlemap::{AssetMapping, AssetStore, Mode, ResolvedEntry, ResolvedImport};
use common::TestEnv;

fn mapping_with(name: &str, url: &str, version: &str) -> AssetMapping {
    let mut mapping = AssetMapping::new();
    mapping.scripts.insert(
        name.to_string(),
        ResolvedEntry::new(vec![ResolvedImport::versioned(url, version)]),
    );
    mapping
}

#[test]
fn marker_and_mapping_are_stored_as_a_pair() {
    let env = TestEnv::new();
    let store = env.store();

    let old = mapping_with("main", "/dist/main.old.js", "aaa");
    store.store(&old, "1.0.0").unwrap();
    let new = mapping_with("main", "/dist/main.new.js", "bbb");
    store.store(&new, "2.0.0").unwrap();

    assert_eq!(store.load().unwrap(), new);
    assert_eq!(store.version_marker().unwrap().as_deref(), Some("2.0.0"));
}

#[test]
fn interrupted_store_leaves_previous_pair_readable() {
    let env = TestEnv::new();
    let store = env.store();

    let old = mapping_with("main", "/dist/main.old.js", "aaa");
    store.store(&old, "1.0.0").unwrap();

    // Simulate a writer dying mid-replacement: a half-written temp file is
    // left beside the document, but the rename never happened.
    let state_dir = env.state_path().parent().unwrap().to_path_buf();
    fs::write(state_dir.join(".assets.json.tmp"), "{\"version_marker\": \"2.0").unwrap();

    let reread = env.store();
    assert_eq!(reread.load().unwrap(), old);
    assert_eq!(reread.version_marker().unwrap().as_deref(), Some("1.0.0"));
}

#[test]
fn store_is_durable_across_handles() {
    let env = TestEnv::new();

    let mapping = mapping_with("main", "/dist/main.abc.js", "ccc");
    env.store().store(&mapping, "3.0.0").unwrap();

    // A second handle over the same path models a process restart.
    assert_eq!(env.store().load().unwrap(), mapping);
    assert_eq!(env.store().version_marker().unwrap().as_deref(), Some("3.0.0"));
}

#[test]
fn stale_marker_triggers_exactly_one_lazy_rebuild() {
    let env = TestEnv::new();
    env.write_manifest(&["main.js"]);

    env.store().store(&AssetMapping::new(), "1.0.0").unwrap();

    let mut resolver = env.resolver(Mode::Development, "2.0.0");
    resolver.finish_request().unwrap();
    let after_first = env.store().load().unwrap();
    assert!(after_first.script("main").is_some());

    // Invalidate the mapping out of band; a second signal in the same
    // process lifetime must not rebuild again.
    env.store().store(&AssetMapping::new(), "0.0.1").unwrap();
    resolver.finish_request().unwrap();
    assert!(env.store().load().unwrap().is_empty());
}
