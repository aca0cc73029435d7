use indoc::indoc;
use pocatalog::backfill::backfill_string;
use pocatalog::merge::extract_strings;
use pocatalog::writer::{update_catalog, update_catalog_with, update_template, write_template};
use pocatalog::{Catalog, Error, LocalFileSystem, WriteOptions};
use std::fs;
use std::path::Path;

const TEMPLATE: &str = indoc! {r#"
    # Celestia translation template
    #
    # This file is distributed under the same license as Celestia.

    msgid ""
    msgstr ""
    "Project-Id-Version: celestia\n"
    "Content-Type: text/plain; charset=UTF-8\n"

    #  Platforms: Apple
    msgid "Obsolete"
    msgstr """#};

fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (relative, content) in files {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

#[test]
fn extract_and_update_template_end_to_end() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    write_tree(
        root,
        &[
            (
                "apple/Sources/Browser.swift",
                r#"label.text = CelestiaString("Go to Object", comment: "Menu action")
                   let unit = CelestiaString("%.2f km", context: "distance", comment: "")"#,
            ),
            (
                "android/app/src/Main.kt",
                r#"title = CelestiaString("Go to Object", "Toolbar action")"#,
            ),
            ("android/app/build.gradle", "CelestiaString(\"ignored\", \"\")"),
            (
                "windows/celestia/Menu.cpp",
                r#"menu.Add(LocalizationHelper::Localize(L"Go to Object", L""));"#,
            ),
        ],
    );
    let template_path = root.join("messages.pot");
    fs::write(&template_path, TEMPLATE).unwrap();

    let template = Catalog::read_template(&template_path).unwrap();
    let entries = extract_strings(
        &LocalFileSystem,
        &root.join("apple"),
        &root.join("android"),
        &root.join("windows"),
    )
    .unwrap();
    update_template(&template, entries, &WriteOptions::new(), &template_path).unwrap();

    let written = fs::read_to_string(&template_path).unwrap();
    assert_eq!(
        written,
        indoc! {r#"
            # Celestia translation template
            #
            # This file is distributed under the same license as Celestia.

            msgid ""
            msgstr ""
            "Project-Id-Version: celestia\n"
            "Content-Type: text/plain; charset=UTF-8\n"

            #  Platforms: Apple
            #, c-format
            msgctxt "distance"
            msgid "%.2f km"
            msgstr ""

            #  Platforms: Apple, Android, Windows
            #  Menu action
            #  Toolbar action
            msgid "Go to Object"
            msgstr """#}
    );

    // The written template is itself a valid template.
    let reread = Catalog::read_template(&template_path).unwrap();
    assert_eq!(reread.entries.len(), 2);
}

#[test]
fn update_catalog_follows_template() {
    let tmp = tempfile::tempdir().unwrap();
    let template_path = tmp.path().join("messages.pot");
    let catalog_path = tmp.path().join("fr.po");
    fs::write(
        &template_path,
        indoc! {r#"
            msgid ""
            msgstr ""
            "Language: \n"

            #  Platforms: Apple, Android
            msgid "A very long sentence that certainly does not fit in fifty characters"
            msgstr ""

            #  Platforms: Windows
            msgid "New"
            msgstr ""
        "#},
    )
    .unwrap();
    fs::write(
        &catalog_path,
        indoc! {r#"
            # French translation

            msgid ""
            msgstr "Language: fr\n"

            #  Platforms: Apple
            msgid "A very long sentence that certainly does not fit in fifty characters"
            msgstr "Une très longue phrase qui ne tient certainement pas en cinquante caractères"

            #  Platforms: Apple
            msgid "Removed"
            msgstr "Supprimé"
        "#},
    )
    .unwrap();

    let template = Catalog::read_template(&template_path).unwrap();
    let catalog = Catalog::read_from(&catalog_path).unwrap();
    update_catalog(&catalog, &template, &WriteOptions::new(), &catalog_path).unwrap();

    assert_eq!(
        fs::read_to_string(&catalog_path).unwrap(),
        indoc! {r#"
            msgid ""
            msgstr ""
            "Language: fr\n"

            #  Platforms: Apple, Android
            msgid ""
            "A very long sentence that certainly does not fit "
            "in fifty characters"
            msgstr ""
            "Une très longue phrase qui ne tient certainement "
            "pas en cinquante caractères"

            #  Platforms: Windows
            msgid "New"
            msgstr """#}
    );
}

#[test]
fn format_is_idempotent_on_disk() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("messages.pot");
    fs::write(&path, TEMPLATE).unwrap();

    let template = Catalog::read_template(&path).unwrap();
    write_template(&template, &WriteOptions::new(), &path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), TEMPLATE);
}

#[test]
fn template_with_translation_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("messages.pot");
    fs::write(&path, format!("{TEMPLATE}\n\n#  Platforms: Apple\nmsgid \"Hi\"\nmsgstr \"Salut\"")).unwrap();

    let err = Catalog::read_template(&path).unwrap_err();
    assert!(matches!(err, Error::NonEmptyStringInTemplate(ref id) if id == "Hi"));
    assert_eq!(err.to_string(), "template entry `Hi` has a non-empty translation");
}

#[test]
fn backfill_writes_converted_strings() {
    let tmp = tempfile::tempdir().unwrap();
    let source_path = tmp.path().join("zh_CN.po");
    let target_path = tmp.path().join("zh_TW.po");
    fs::write(
        &source_path,
        "msgid \"\"\nmsgstr \"Language: zh_CN\\n\"\n\n#  Platforms: Apple\nmsgid \"Open\"\nmsgstr \"打开\"\n\n#  Platforms: Apple\nmsgid \"Time\"\nmsgstr \"时间\"",
    )
    .unwrap();
    fs::write(
        &target_path,
        "msgid \"\"\nmsgstr \"Language: zh_TW\\n\"\n\n#  Platforms: Apple\nmsgid \"Open\"\nmsgstr \"開啟\"\n\n#  Platforms: Apple\nmsgid \"Time\"\nmsgstr \"\"",
    )
    .unwrap();

    let source = Catalog::read_from(&source_path).unwrap();
    let target = Catalog::read_from(&target_path).unwrap();
    let converter = |text: &str| text.replace('时', "時").replace('间', "間");
    update_catalog_with(
        &target,
        |entry| backfill_string(entry, &source, &converter),
        &WriteOptions::new(),
        &target_path,
    )
    .unwrap();

    let written = Catalog::read_from(&target_path).unwrap();
    assert_eq!(written.string_for("Open"), Some("開啟"));
    assert_eq!(written.string_for("Time"), Some("時間"));
    assert_eq!(written.language().unwrap().to_string(), "zh-TW");
}

#[test]
fn missing_source_root_is_an_enumeration_error() {
    let tmp = tempfile::tempdir().unwrap();
    let err = extract_strings(
        &LocalFileSystem,
        &tmp.path().join("apple"),
        &tmp.path().join("android"),
        &tmp.path().join("windows"),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Enumeration { .. }));
}
