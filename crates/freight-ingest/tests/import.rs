use freight_ingest::{
    DuplicateMode, DuplicatePolicy, ImportConfig, ImportRow, apply_mapping, parse_upload,
    plan_import,
};
use freight_model::ColumnMapping;

fn row(work_order: &str, carrier: &str) -> ImportRow {
    [("workOrderNo", work_order), ("carrierName", carrier)]
        .into_iter()
        .collect()
}

fn policy(mode: DuplicateMode) -> DuplicatePolicy {
    DuplicatePolicy {
        key: vec!["workOrderNo".to_string()],
        mode,
    }
}

#[test]
fn mapping_turns_columns_into_fields() {
    let table = parse_upload(
        "Load #,Ref,Carrier,Notes\nWO-1,,Acme,fragile\n,WO-2,Blue Line,\n".as_bytes(),
    )
    .unwrap();
    let mapping: ColumnMapping = [
        ("Load #", "workOrderNo"),
        ("Ref", "workOrderNo"),
        ("Carrier", "carrierName"),
    ]
    .into_iter()
    .map(|(c, f)| (c.to_string(), f.to_string()))
    .collect();

    let rows = apply_mapping(&table.headers, &table.rows, &mapping);
    assert_eq!(rows, vec![row("WO-1", "Acme"), row("WO-2", "Blue Line")]);
    assert_eq!(rows[0].get("remarks"), None);
}

#[test]
fn skip_drops_rows_matching_existing_or_earlier_keys() {
    let existing = vec![row("WO-1", "Acme")];
    let upload = vec![
        row("WO-1", "Acme Updated"),
        row("WO-2", "Blue Line"),
        row("WO-2", "Blue Line Again"),
        row("", "No Key"),
        row(" ", "Blank Key"),
    ];

    let plan = plan_import(upload, &existing, &policy(DuplicateMode::Skip));
    assert_eq!(
        plan.create,
        vec![row("WO-2", "Blue Line"), row("", "No Key"), row(" ", "Blank Key")]
    );
    assert!(plan.update.is_empty());
    assert_eq!(
        plan.skipped,
        vec![row("WO-1", "Acme Updated"), row("WO-2", "Blue Line Again")]
    );
    assert_eq!(plan.total(), 5);
}

#[test]
fn update_replaces_existing_and_keeps_last_upload_row() {
    let existing = vec![row("WO-1", "Acme")];
    let upload = vec![
        row("WO-1", "Acme v2"),
        row("WO-2", "Blue Line"),
        row("WO-1", "Acme v3"),
        row("WO-2", "Blue Line v2"),
    ];

    let plan = plan_import(upload, &existing, &policy(DuplicateMode::Update));
    assert_eq!(plan.update, vec![row("WO-1", "Acme v3")]);
    assert_eq!(plan.create, vec![row("WO-2", "Blue Line v2")]);
    assert!(plan.skipped.is_empty());
}

#[test]
fn allow_and_empty_key_disable_detection() {
    let existing = vec![row("WO-1", "Acme")];
    let upload = vec![row("WO-1", "Acme"), row("WO-1", "Acme")];

    let allowed = plan_import(upload.clone(), &existing, &policy(DuplicateMode::Allow));
    assert_eq!(allowed.create.len(), 2);

    let no_key = DuplicatePolicy {
        key: Vec::new(),
        mode: DuplicateMode::Skip,
    };
    assert_eq!(plan_import(upload, &existing, &no_key).create.len(), 2);
}

#[test]
fn composite_keys_join_every_field() {
    let config = ImportConfig {
        duplicate_key: vec!["workOrderNo".to_string(), "carrierName".to_string()],
        duplicate_policy: DuplicateMode::Skip,
    };
    let existing = vec![row("WO-1", "Acme")];
    let upload = vec![row("WO-1", "Blue Line"), row("WO-1", "Acme")];

    let plan = plan_import(upload, &existing, &config.policy());
    assert_eq!(plan.create, vec![row("WO-1", "Blue Line")]);
    assert_eq!(plan.skipped, vec![row("WO-1", "Acme")]);
    assert_eq!(row("WO-1", "Acme").key(&config.duplicate_key).as_deref(), Some("WO-1|Acme"));
}
