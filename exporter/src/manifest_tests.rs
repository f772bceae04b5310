//! Unit tests for manifest parsing and attribute fallback.

use super::*;
use rstest::rstest;

fn full_manifest() -> Manifest {
    let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<extension type="component" method="upgrade">
    <name>com_contact</name>
    <version>3.2.1</version>
    <files folder="site">
        <filename>contact.php</filename>
        <folder>views</folder>
    </files>
    <media folder="media" destination="com_contact">
        <folder>images</folder>
    </media>
    <languages folder="language">
        <language tag="en-GB">en-GB/en-GB.com_contact.ini</language>
        <language tag="en-GB">custom/en-GB.com_contact.sys.ini</language>
    </languages>
    <administration>
        <files folder="admin">
            <filename>contact.php</filename>
        </files>
        <languages folder="admin/language">
            <language tag="en-GB">en-GB/en-GB.com_contact.ini</language>
        </languages>
    </administration>
</extension>"#;
    Manifest::parse(xml).expect("well-formed manifest")
}

#[test]
fn parses_version_and_folders() {
    let manifest = full_manifest();
    assert_eq!(manifest.version(), "3.2.1");
    assert_eq!(manifest.files_folder(), "site");
    assert_eq!(manifest.admin_files_folder(), "admin");
    assert_eq!(manifest.media_folder(), "media");
    assert_eq!(manifest.media_source("fallback"), "com_contact");
    assert_eq!(manifest.languages_folder(), "language");
    assert_eq!(manifest.admin_languages_folder(), "admin/language");
    assert!(manifest.has_media());
    assert!(manifest.has_languages());
}

#[test]
fn placement_table_matches_on_basename() {
    let manifest = full_manifest();
    let languages = manifest.site_languages().expect("languages declared");
    assert_eq!(
        languages.placement("en-GB.com_contact.sys.ini"),
        Some("custom/en-GB.com_contact.sys.ini")
    );
    assert_eq!(languages.placement("de-DE.com_contact.ini"), None);
}

#[rstest]
#[case::absent_tag("<extension><version>1.0</version></extension>")]
#[case::absent_attribute("<extension><version>1.0</version><files/></extension>")]
#[case::empty_attribute(r#"<extension><version>1.0</version><files folder=""/></extension>"#)]
fn files_folder_falls_back_to_default(#[case] xml: &str) {
    let manifest = Manifest::parse(xml).expect("well-formed manifest");
    assert_eq!(manifest.files_folder(), "");
}

#[test]
fn media_source_defaults_to_extension_name() {
    let xml = r#"<extension><version>1.0</version><media folder="media"/></extension>"#;
    let manifest = Manifest::parse(xml).expect("well-formed manifest");
    assert!(manifest.has_media());
    assert_eq!(manifest.media_source("mod_login"), "mod_login");
}

#[test]
fn missing_version_reads_as_empty() {
    let manifest = Manifest::parse("<extension/>").expect("well-formed manifest");
    assert_eq!(manifest.version(), "");
}

#[test]
fn missing_sections_read_as_absent() {
    let manifest = Manifest::parse("<extension><version>1.0</version></extension>")
        .expect("well-formed manifest");
    assert!(!manifest.has_media());
    assert!(!manifest.has_languages());
    assert!(manifest.site_languages().is_none());
    assert!(manifest.admin_languages().is_none());
    assert_eq!(manifest.admin_files_folder(), "");
    assert_eq!(manifest.admin_languages_folder(), "");
}

#[test]
fn administration_languages_alone_count_as_declared() {
    let xml = r#"<extension>
        <version>1.0</version>
        <administration>
            <languages folder="admin/language"/>
        </administration>
    </extension>"#;
    let manifest = Manifest::parse(xml).expect("well-formed manifest");
    assert!(manifest.has_languages());
    assert!(manifest.site_languages().is_none());
    assert!(manifest.admin_languages().is_some());
}

#[test]
fn empty_placement_table_is_allowed() {
    let xml = r#"<extension><version>1.0</version><languages folder="language"/></extension>"#;
    let manifest = Manifest::parse(xml).expect("well-formed manifest");
    let languages = manifest.site_languages().expect("languages declared");
    assert!(languages.entries().is_empty());
    assert_eq!(languages.placement("en-GB.mod_login.ini"), None);
}

#[test]
fn entry_tags_are_exposed() {
    let manifest = full_manifest();
    let languages = manifest.site_languages().expect("languages declared");
    assert_eq!(languages.entries().len(), 2);
    assert_eq!(languages.entries()[0].tag(), Some("en-GB"));
    assert_eq!(
        languages.entries()[0].path(),
        Some("en-GB/en-GB.com_contact.ini")
    );
}

#[test]
fn malformed_xml_is_rejected() {
    assert!(Manifest::parse("<extension><version>1.0").is_err());
}
