//! Render-pass flow: deploy, then emit gated entries from the cached mapping.

mod common;

use bundlemap::{EnqueuePolicy, Mode};
use common::TestEnv;
use serde_json::json;

#[test]
fn render_pass_emits_only_allowed_entries_from_cache() {
    let env = TestEnv::new();
    env.write_manifest(&["main.js", "helloworld.js"]);
    env.write_fragment("main", &["/dist/main.abc.js"]);
    env.write_fragment("helloworld", &["/dist/helloworld.xyz.js"]);
    env.write_file("dist/main.abc.js", b"X");
    env.write_file("dist/helloworld.xyz.js", b"Z");

    let mut resolver = env.resolver(Mode::Production, "1.0.0");
    resolver.deploy().unwrap();

    let mut policy = EnqueuePolicy::new("bm-");
    policy.allow("helloworld");
    policy.add_var("helloworld", "apiUrl", json!("/api/v1"));

    let scripts = policy.emit_scripts(&resolver.cached());
    assert_eq!(scripts.len(), 1);
    assert_eq!(scripts[0].handle, "bm-helloworld");
    assert_eq!(scripts[0].imports[0].url, "/dist/helloworld.xyz.js");
    assert_eq!(
        scripts[0].vars,
        vec![("apiUrl".to_string(), json!("/api/v1"))]
    );
}

#[test]
fn render_pass_degrades_to_nothing_when_store_is_corrupt() {
    let env = TestEnv::new();
    env.write_file("state/assets.json", b"{ definitely not json");

    let resolver = env.resolver(Mode::Production, "1.0.0");
    let policy = EnqueuePolicy::new("bm-").with_default_allow();

    // load() fails; the render path emits nothing rather than crashing.
    assert!(policy.emit_scripts(&resolver.cached()).is_empty());
}

#[test]
fn development_emission_carries_no_version() {
    let env = TestEnv::new();
    env.write_manifest(&["main.js"]);

    let mut resolver = env.resolver(Mode::Development, "1.0.0");
    resolver.deploy().unwrap();

    let mut policy = EnqueuePolicy::new("bm-");
    policy.allow("main");

    let scripts = policy.emit_scripts(&resolver.cached());
    assert_eq!(scripts[0].imports[0].version, None);
}
