use std::io::Read;

use postbundle::archive::{calculate_sha256, zip_dir};

#[tokio::test]
async fn zip_round_trips_the_tree() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("dist");
    std::fs::create_dir_all(out.join("assets")).unwrap();
    std::fs::create_dir_all(out.join("empty")).unwrap();
    std::fs::write(out.join("package.json"), r#"{"name":"demo"}"#).unwrap();
    std::fs::write(out.join("assets/index.js"), "export {}").unwrap();

    let destination = dir.path().join("demo.zip");
    zip_dir(&out, &destination).await.unwrap();

    let extracted = dir.path().join("extracted");
    let file = std::fs::File::open(&destination).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    archive.extract(&extracted).unwrap();

    // Children of dist are the archive root; dist itself is not nested.
    assert_eq!(
        std::fs::read_to_string(extracted.join("package.json")).unwrap(),
        r#"{"name":"demo"}"#
    );
    assert_eq!(
        std::fs::read_to_string(extracted.join("assets/index.js")).unwrap(),
        "export {}"
    );
    // Directory entries are recorded, so empty directories survive.
    assert!(extracted.join("empty").is_dir());
}

#[tokio::test]
async fn entries_are_deflate_compressed_and_slash_separated() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("dist");
    std::fs::create_dir_all(out.join("i18n")).unwrap();
    // Repetitive content so the deflate entry is visibly smaller.
    std::fs::write(out.join("i18n/en.js"), "module.exports = {}\n".repeat(500)).unwrap();

    let destination = dir.path().join("out.zip");
    zip_dir(&out, &destination).await.unwrap();

    let file = std::fs::File::open(&destination).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let names: Vec<String> = archive.file_names().map(str::to_string).collect();
    assert!(names.contains(&"i18n/en.js".to_string()), "{names:?}");

    let entry = archive.by_name("i18n/en.js").unwrap();
    assert_eq!(entry.compression(), zip::CompressionMethod::Deflated);
    assert!(
        entry.compressed_size() < entry.size(),
        "compressed {} >= raw {}",
        entry.compressed_size(),
        entry.size()
    );
}

#[tokio::test]
async fn archive_is_readable_as_soon_as_the_call_returns() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("dist");
    std::fs::create_dir_all(&out).unwrap();
    std::fs::write(out.join("a.txt"), "abc").unwrap();

    let destination = dir.path().join("ready.zip");
    zip_dir(&out, &destination).await.unwrap();

    // No settling time: the bytes must already be on disk.
    let file = std::fs::File::open(&destination).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut contents = String::new();
    archive
        .by_name("a.txt")
        .unwrap()
        .read_to_string(&mut contents)
        .unwrap();
    assert_eq!(contents, "abc");

    let checksum = calculate_sha256(&destination).await.unwrap();
    assert_eq!(checksum.len(), 64);
}

#[tokio::test]
async fn missing_source_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = zip_dir(&dir.path().join("absent"), &dir.path().join("out.zip"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("is not a directory"), "{err}");
}
