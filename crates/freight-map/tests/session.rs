use freight_map::{
    ColumnMappingStatus, ImportValidationError, MappingEngine, MappingError, MappingSession,
    validate_required,
};
use freight_model::{ColumnHeader, ColumnMapping, delivery_order_fields};

fn engine() -> MappingEngine {
    MappingEngine::new(delivery_order_fields().fields())
}

fn headers() -> Vec<ColumnHeader> {
    ColumnHeader::from_names(["Load Number", "Carrier Name", "Customer", "Mystery"])
}

#[test]
fn session_starts_from_engine_suggestions() {
    let session = MappingSession::start(&engine(), headers());

    assert_eq!(session.mapping().len(), 3);
    assert_eq!(session.status("Carrier Name"), ColumnMappingStatus::Suggested);
    assert_eq!(session.status("Mystery"), ColumnMappingStatus::Unmapped);
    assert_eq!(session.suggestions().unmapped_columns, vec!["Mystery".to_string()]);
}

#[test]
fn submit_lists_every_missing_required_field_in_schema_order() {
    let session = MappingSession::start(&engine(), headers());

    let err = session.submit().unwrap_err();
    let ImportValidationError::MissingRequired(missing) = &err;
    let fields: Vec<&str> = missing.iter().map(|m| m.field.as_str()).collect();
    assert_eq!(fields, vec!["lineHaul", "originCity", "destinationCity"]);
    assert_eq!(
        err.to_string(),
        "3 required field(s) have no mapped column: Line Haul, Pickup City, Drop City"
    );
    assert_eq!(
        err.messages()[0],
        "Required field 'Line Haul' (lineHaul) has no mapped column"
    );
}

#[test]
fn user_corrections_override_suggestions() {
    let mut session = MappingSession::start(&engine(), headers());

    session.assign("Mystery", "lineHaul").unwrap();
    assert_eq!(session.status("Mystery"), ColumnMappingStatus::Manual);
    assert_eq!(session.mapping().field_for("Mystery"), Some("lineHaul"));

    session.assign("Customer", "billTo").unwrap();
    assert_eq!(session.mapping().field_for("Customer"), Some("billTo"));

    session.reset("Customer").unwrap();
    assert_eq!(session.status("Customer"), ColumnMappingStatus::Suggested);
    assert_eq!(session.mapping().field_for("Customer"), Some("customerName"));

    assert!(session.clear("Customer").unwrap());
    assert_eq!(session.status("Customer"), ColumnMappingStatus::Unmapped);
    assert!(!session.clear("Customer").unwrap());

    let summary = session.summary();
    assert_eq!(summary.total_columns, 4);
    assert_eq!(summary.mapped_columns, 3);
    assert_eq!(summary.manual_columns, 1);
    assert_eq!(summary.required_total, 6);
    assert_eq!(summary.required_mapped, 3);
}

#[test]
fn assignments_are_checked_against_upload_and_schema() {
    let mut session = MappingSession::start(&engine(), headers());

    assert_eq!(
        session.assign("Not There", "lineHaul"),
        Err(MappingError::ColumnNotFound("Not There".to_string()))
    );
    assert_eq!(
        session.assign("Mystery", "loadNo"),
        Err(MappingError::FieldNotFound("loadNo".to_string()))
    );
    assert_eq!(session.status("Mystery"), ColumnMappingStatus::Unmapped);
}

#[test]
fn a_field_may_be_targeted_by_several_columns() {
    let mut session = MappingSession::start(&engine(), headers());
    session.assign("Mystery", "carrierName").unwrap();

    let mapped: Vec<&str> = session.mapping().columns_for("carrierName").collect();
    assert_eq!(mapped, vec!["Carrier Name", "Mystery"]);
}

#[test]
fn template_entries_for_missing_columns_are_ignored() {
    let template: ColumnMapping = [
        ("Mystery".to_string(), "lineHaul".to_string()),
        ("Gone".to_string(), "originCity".to_string()),
        ("Customer".to_string(), "retired".to_string()),
    ]
    .into_iter()
    .collect();

    let session = MappingSession::from_template(&engine(), headers(), &template);
    assert_eq!(session.mapping().field_for("Mystery"), Some("lineHaul"));
    assert_eq!(session.mapping().field_for("Gone"), None);
    assert_eq!(session.mapping().field_for("Customer"), Some("customerName"));
}

#[test]
fn alternatives_rank_the_closest_field_first() {
    let session = MappingSession::start(&engine(), ColumnHeader::from_names(["Line Hual"]));

    let ranked = session.alternatives("Line Hual", 3);
    assert_eq!(ranked.len(), 3);
    assert_eq!(ranked[0].field, "lineHaul");
    assert!(ranked.windows(2).all(|w| w[0].similarity >= w[1].similarity));
}

#[test]
fn complete_mapping_validates() {
    let fields = delivery_order_fields();
    let mapping: ColumnMapping = fields
        .required()
        .map(|f| (f.label.clone(), f.field.clone()))
        .collect();
    assert!(validate_required(&mapping, fields.fields()).is_ok());
}
