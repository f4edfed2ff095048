use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use comfy_table::{Cell, Table};
use freight_ingest::{ImportRow, apply_mapping, load_records, plan_import, read_upload};
use freight_map::{MappingEngine, MappingSession, MappingTemplate, TemplateStore};
use freight_model::{
    BidRecord, CallRecord, CarrierRecord, RecordKind, ReportRecord, TargetRecord,
    delivery_order_fields,
};
use freight_report::{FilterState, Page, PageRequest, ReportPipeline, Reportable, write_csv_all};
use tracing::{debug, info, info_span, warn};

use crate::cli::{MapArgs, ReportArgs};
use crate::config::FreightConfig;
use crate::logging::redact_value;
use crate::summary::{apply_table_style, header_cell, required_cell};
use crate::types::{MapOutcome, PlanWritten, ReportOutcome};

pub fn run_fields() -> Result<()> {
    let catalog = delivery_order_fields();
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Label"),
        header_cell("Required"),
    ]);
    apply_table_style(&mut table);
    for field in catalog.iter() {
        table.add_row(vec![
            Cell::new(&field.field),
            Cell::new(&field.label),
            required_cell(field.required),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_map(args: &MapArgs, config: &FreightConfig) -> Result<MapOutcome> {
    let span = info_span!("map", upload = %args.upload.display());
    let _guard = span.enter();

    let table = read_upload(&args.upload)?;
    let catalog = delivery_order_fields();
    let engine = MappingEngine::with_config(catalog.fields(), &config.mapper);

    let session = match &args.template {
        Some(name) => {
            let store = TemplateStore::new(&args.templates_dir)?;
            let template = store
                .load(name)?
                .ok_or_else(|| anyhow!("mapping template '{name}' not found"))?;
            info!(template = %name, "starting from template");
            MappingSession::from_template(&engine, table.headers.clone(), &template.mapping)
        }
        None => MappingSession::start(&engine, table.headers.clone()),
    };

    let summary = session.summary();
    info!(
        columns = summary.total_columns,
        mapped = summary.mapped_columns,
        required_mapped = summary.required_mapped,
        required_total = summary.required_total,
        "mapping suggested"
    );

    let template_saved = match &args.save_template {
        Some(name) => {
            let store = TemplateStore::new(&args.templates_dir)?;
            Some(store.save(&MappingTemplate::new(name.clone(), session.mapping().clone()))?)
        }
        None => None,
    };

    let (missing, plan) = match session.submit() {
        Ok(mapping) => {
            let plan = match &args.output {
                Some(output) => {
                    let rows = apply_mapping(&table.headers, &table.rows, &mapping);
                    let existing = match &args.existing {
                        Some(path) => load_existing(path)?,
                        None => Vec::new(),
                    };
                    let plan = plan_import(rows, &existing, &config.import.policy());
                    let json =
                        serde_json::to_string_pretty(&plan).context("serialize import plan")?;
                    fs::write(output, json)
                        .with_context(|| format!("write import plan {}", output.display()))?;
                    info!(
                        create = plan.create.len(),
                        update = plan.update.len(),
                        skipped = plan.skipped.len(),
                        "import plan written"
                    );
                    Some(PlanWritten {
                        path: output.clone(),
                        create: plan.create.len(),
                        update: plan.update.len(),
                        skipped: plan.skipped.len(),
                    })
                }
                None => None,
            };
            (Vec::new(), plan)
        }
        Err(error) => {
            warn!(%error, "import blocked");
            if args.output.is_some() {
                warn!("import plan not written");
            }
            (error.missing_fields().to_vec(), None)
        }
    };

    Ok(MapOutcome {
        upload: args.upload.clone(),
        preview: table.preview(args.sample_rows),
        session,
        missing,
        template_saved,
        plan,
    })
}

fn load_existing(path: &Path) -> Result<Vec<ImportRow>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("read existing rows {}", path.display()))?;
    let rows: Vec<ImportRow> = serde_json::from_str(&content)
        .with_context(|| format!("parse existing rows {}", path.display()))?;
    debug!(rows = rows.len(), "existing rows loaded");
    Ok(rows)
}

pub fn run_report(args: &ReportArgs, config: &FreightConfig) -> Result<ReportOutcome> {
    let kind = RecordKind::from(args.kind);
    let span = info_span!("report", %kind, feed = %args.feed.display());
    let _guard = span.enter();

    let records = load_records(&args.feed)?;
    match kind {
        RecordKind::Carrier => report_for::<CarrierRecord>(records, args, config),
        RecordKind::Call => report_for::<CallRecord>(records, args, config),
        RecordKind::Target => report_for::<TargetRecord>(records, args, config),
        RecordKind::Bid => report_for::<BidRecord>(records, args, config),
    }
}

fn filter_state(args: &ReportArgs) -> Result<FilterState> {
    let mut state = FilterState {
        search: args.search.clone(),
        search_fields: args.search_fields.clone(),
        status: args.status.clone(),
        start_date: args.from.clone(),
        end_date: args.to.clone(),
        ..FilterState::default()
    };
    for raw in &args.equals {
        state.push_equals(raw)?;
    }
    Ok(state)
}

fn report_for<R: Reportable>(
    records: Vec<ReportRecord>,
    args: &ReportArgs,
    config: &FreightConfig,
) -> Result<ReportOutcome> {
    let records = R::select(records);
    let state = filter_state(args)?;
    let spec = state.resolve::<R>()?;
    debug!(
        search = redact_value(&state.search),
        status = %state.status,
        equals = state.equals.len(),
        "filter resolved"
    );

    let page_size = args.page_size.unwrap_or(config.report.page_size);
    let request = PageRequest::new(args.page, page_size);
    let view = ReportPipeline::<R>::new().run(&records, &spec, request);

    let accessors = R::accessors();
    let items: Vec<Vec<String>> = view
        .page
        .items
        .iter()
        .map(|row| {
            accessors
                .iter()
                .map(|accessor| accessor.get(row).unwrap_or_default().into_owned())
                .collect()
        })
        .collect();
    let page = Page {
        items,
        page_number: view.page.page_number,
        page_size: view.page.page_size,
        total_pages: view.page.total_pages,
        start_index: view.page.start_index,
        end_index: view.page.end_index,
        total_items: view.page.total_items,
    };

    let exported = match &args.export {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("create {}", path.display()))?;
            let written = write_csv_all(&view.rows, BufWriter::new(file))
                .with_context(|| format!("export {}", path.display()))?;
            Some((path.clone(), written))
        }
        None => None,
    };

    Ok(ReportOutcome {
        kind: R::KIND,
        columns: accessors.iter().map(|a| a.name().to_string()).collect(),
        page,
        stats: serde_json::to_value(&view.stats).context("serialize report stats")?,
        exported,
    })
}
