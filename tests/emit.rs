use std::path::Path;
use std::sync::Arc;

use postbundle::emit::{emit_tree, I18nTree, StaticTree};
use postbundle::OutputBundle;

async fn emit_i18n(root: &Path) -> (postbundle::Result<usize>, OutputBundle) {
    let mut bundle = OutputBundle::new();
    let result = emit_tree(root, Arc::new(I18nTree), &mut bundle).await;
    (result, bundle)
}

#[tokio::test]
async fn i18n_tree_flattens_nested_dictionaries() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("locales");
    std::fs::create_dir_all(root.join("asia")).unwrap();
    std::fs::write(root.join("asia/zh.json"), r#"{"hello":"你好"}"#).unwrap();
    std::fs::write(root.join("en.json"), r#"{"hello":"hello"}"#).unwrap();

    let (result, bundle) = emit_i18n(&root).await;

    assert_eq!(result.unwrap(), 2);
    // Destinations always land under i18n/, whatever the tree was named.
    let zh = bundle.get("i18n/zh.js").expect("flattened entry");
    assert_eq!(
        String::from_utf8(zh.source.clone()).unwrap(),
        r#"module.exports = {"hello":"你好"}"#
    );
    assert!(bundle.get("i18n/en.js").is_some());
}

#[tokio::test]
async fn static_tree_preserves_relative_layout() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("static");
    std::fs::create_dir_all(root.join("img/icons")).unwrap();
    let binary = vec![0x89u8, 0x50, 0x00, 0xff, 0x13];
    std::fs::write(root.join("img/icons/a.svg"), b"<svg/>").unwrap();
    std::fs::write(root.join("img/logo.png"), &binary).unwrap();

    let mut bundle = OutputBundle::new();
    let count = emit_tree(&root, Arc::new(StaticTree::new("static")), &mut bundle)
        .await
        .unwrap();

    assert_eq!(count, 2);
    assert_eq!(
        bundle.get("static/img/logo.png").unwrap().source,
        binary,
        "static copies are byte-for-byte"
    );
    assert!(bundle.get("static/img/icons/a.svg").is_some());
}

#[tokio::test]
async fn missing_tree_is_a_noop() {
    let dir = tempfile::tempdir().unwrap();
    let (result, bundle) = emit_i18n(&dir.path().join("absent")).await;

    assert_eq!(result.unwrap(), 0);
    assert!(bundle.is_empty());
}

#[tokio::test]
async fn empty_tree_is_a_noop() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("i18n");
    std::fs::create_dir_all(&root).unwrap();

    let (result, bundle) = emit_i18n(&root).await;

    assert_eq!(result.unwrap(), 0);
    assert!(bundle.is_empty());
}

#[tokio::test]
async fn one_bad_file_fails_the_whole_emission() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("i18n");
    std::fs::create_dir_all(&root).unwrap();
    std::fs::write(root.join("en.json"), r#"{"ok":true}"#).unwrap();
    std::fs::write(root.join("broken.json"), [0xff, 0xfe, 0x00]).unwrap();

    let (result, bundle) = emit_i18n(&root).await;

    let err = result.unwrap_err();
    assert!(err.to_string().contains("not valid UTF-8"), "{err}");
    // Fail fast: nothing registers on a partial failure.
    assert!(bundle.is_empty());
}

#[tokio::test]
async fn registration_follows_sorted_file_names() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("i18n");
    std::fs::create_dir_all(&root).unwrap();
    // Created out of order on purpose.
    for name in ["zh.json", "de.json", "en.json"] {
        std::fs::write(root.join(name), "{}").unwrap();
    }

    let (result, bundle) = emit_i18n(&root).await;

    assert_eq!(result.unwrap(), 3);
    let names: Vec<&str> = bundle
        .assets()
        .iter()
        .map(|asset| asset.file_name.as_str())
        .collect();
    assert_eq!(names, ["i18n/de.js", "i18n/en.js", "i18n/zh.js"]);
}
