use freight_map::{MappingTemplate, TemplateStore};
use freight_model::ColumnMapping;
use tempfile::TempDir;

fn mapping() -> ColumnMapping {
    [
        ("Load #".to_string(), "workOrderNo".to_string()),
        ("Trucker".to_string(), "carrierName".to_string()),
    ]
    .into_iter()
    .collect()
}

#[test]
fn saved_template_loads_back() {
    let dir = TempDir::new().unwrap();
    let store = TemplateStore::new(dir.path().join("templates")).unwrap();

    let template = MappingTemplate::new("Acme Weekly", mapping()).with_description("Acme export");
    let path = store.save(&template).unwrap();
    assert!(path.ends_with("acme_weekly.json"));

    let loaded = store.load("Acme Weekly").unwrap().expect("template exists");
    assert_eq!(loaded, template);
    assert!(store.exists("Acme Weekly"));
}

#[test]
fn missing_template_is_none() {
    let dir = TempDir::new().unwrap();
    let store = TemplateStore::new(dir.path()).unwrap();
    assert!(store.load("nothing").unwrap().is_none());
    assert!(!store.delete("nothing").unwrap());
}

#[test]
fn list_skips_unreadable_files() {
    let dir = TempDir::new().unwrap();
    let store = TemplateStore::new(dir.path()).unwrap();
    store
        .save(&MappingTemplate::new("zeta", mapping()))
        .unwrap();
    store
        .save(&MappingTemplate::new("alpha", ColumnMapping::new()))
        .unwrap();
    std::fs::write(dir.path().join("broken.json"), "{not json").unwrap();
    std::fs::write(dir.path().join("readme.txt"), "ignored").unwrap();

    assert_eq!(store.list().unwrap(), vec!["alpha", "zeta"]);

    assert!(store.delete("zeta").unwrap());
    assert_eq!(store.list().unwrap(), vec!["alpha"]);
}

#[test]
fn corrupt_template_reports_its_path() {
    let dir = TempDir::new().unwrap();
    let store = TemplateStore::new(dir.path()).unwrap();
    std::fs::write(dir.path().join("bad.json"), "[]").unwrap();

    let err = store.load("bad").unwrap_err();
    assert!(err.to_string().contains("bad.json"));
}

#[test]
fn names_sharing_a_file_do_not_overwrite_each_other() {
    let dir = TempDir::new().unwrap();
    let store = TemplateStore::new(dir.path()).unwrap();
    let first = store.save(&MappingTemplate::new("Acme Co", mapping())).unwrap();

    let err = store
        .save(&MappingTemplate::new("acme-co", ColumnMapping::new()))
        .unwrap_err();
    assert!(err.to_string().contains("collides with saved template 'Acme Co'"));
    assert!(store.load("acme-co").unwrap().is_none());
    assert!(!store.exists("acme-co"));
    assert!(!store.delete("acme-co").unwrap());

    let loaded = store.load("Acme Co").unwrap().expect("original kept");
    assert_eq!(loaded.mapping, mapping());

    let resaved = store
        .save(&MappingTemplate::new(" ACME CO ", ColumnMapping::new()))
        .unwrap();
    assert_eq!(resaved, first);
    assert!(store.load("acme co").unwrap().unwrap().mapping.is_empty());
}

#[test]
fn names_without_letters_or_digits_are_rejected() {
    let dir = TempDir::new().unwrap();
    let store = TemplateStore::new(dir.path()).unwrap();
    for name in ["", "   ", "#!?"] {
        assert!(store.save(&MappingTemplate::new(name, mapping())).is_err(), "{name:?}");
        assert!(store.load(name).is_err());
        assert!(!store.exists(name));
    }
    assert!(store.list().unwrap().is_empty());
}
