use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use freight_model::{Amount, CallRecord, CarrierRecord, FieldAccess, TargetRecord};
use freight_report::{
    Charges, FilterSpec, FilterState, PageRequest, ReportPipeline, StatusFilter, paginate,
    parse_talk_time_hours, total_talk_time_hours, write_csv,
};
use proptest::prelude::*;

fn at(day: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).single()
}

fn call(id: &str, status: &str, created_at: Option<DateTime<Utc>>) -> CallRecord {
    CallRecord {
        id: id.to_string(),
        created_at,
        status: status.to_string(),
        agent: "Jo Smith".to_string(),
        department: "Sales".to_string(),
        ..CallRecord::default()
    }
}

fn ids<'a>(rows: impl IntoIterator<Item = &'a &'a CallRecord>) -> Vec<&'a str> {
    rows.into_iter().map(|r| r.id.as_str()).collect()
}

#[test]
fn record_must_pass_every_active_predicate() {
    let mut records = vec![
        call("pass", "answered", at(15)),
        call("wrong-status", "missed", at(15)),
        call("wrong-text", "answered", at(15)),
        call("wrong-date", "answered", Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).single()),
        call("wrong-department", "answered", at(15)),
        call("undated", "answered", None),
    ];
    records[2].agent = "Pat Jones".to_string();
    records[4].department = "Ops".to_string();

    let field = |name| CallRecord::accessor(name).unwrap();
    let spec = FilterSpec::new()
        .search("  SMITH ", vec![field("agent")])
        .status(StatusFilter::group(field("status"), "approved"))
        .date_range(NaiveDate::from_ymd_opt(2024, 3, 1), NaiveDate::from_ymd_opt(2024, 3, 31))
        .equals(field("department"), "sales");

    let pipeline = ReportPipeline::<CallRecord>::new();
    assert_eq!(ids(&pipeline.filter(&records, &spec)), vec!["pass"]);

    let everything = pipeline.filter(&records, &FilterSpec::new());
    assert_eq!(everything.len(), records.len());
}

#[test]
fn search_without_fields_matches_nothing() {
    let records = vec![call("a", "answered", at(1))];
    let pipeline = ReportPipeline::new();

    let blank = FilterSpec::new().search("   ", Vec::new());
    assert_eq!(pipeline.filter(&records, &blank).len(), 1);

    let misconfigured = FilterSpec::new().search("smith", Vec::new());
    assert!(pipeline.filter(&records, &misconfigured).is_empty());
}

#[test]
fn approved_filter_keeps_equivalent_statuses() {
    let records: Vec<CallRecord> = ["approved", "rejected", "pending", "answered"]
        .iter()
        .enumerate()
        .map(|(i, status)| call(&format!("c{i}"), status, at(1)))
        .collect();
    let state = FilterState {
        status: "approved".to_string(),
        ..FilterState::default()
    };

    let spec = state.resolve::<CallRecord>().unwrap();
    let kept = ReportPipeline::new().filter(&records, &spec);
    assert_eq!(ids(&kept), vec!["c0", "c3"]);
}

#[test]
fn custom_status_predicate_keeps_matching_records() {
    let mut records = vec![
        call("long", "answered", at(1)),
        call("short", "answered", at(2)),
        call("missed", "missed", at(3)),
    ];
    records[0].talk_time = "2h".to_string();
    records[1].talk_time = "10".to_string();

    let long_calls = StatusFilter::custom(|record: &CallRecord| {
        record.status == "answered" && parse_talk_time_hours(&record.talk_time) >= 1.0
    });
    assert!(long_calls.is_active());
    let spec = FilterSpec::new().status(long_calls);

    let pipeline = ReportPipeline::new();
    assert_eq!(ids(&pipeline.filter(&records, &spec)), vec!["long"]);

    let narrowed = spec.clone().search("nobody", vec![CallRecord::accessor("agent").unwrap()]);
    assert!(pipeline.filter(&records, &narrowed).is_empty());
}

fn period_start(record: &TargetRecord) -> Option<DateTime<Utc>> {
    let day = NaiveDate::parse_from_str(&format!("{}-01", record.period.trim()), "%Y-%m-%d").ok()?;
    Some(day.and_hms_opt(0, 0, 0)?.and_utc())
}

#[test]
fn pipeline_keyed_on_another_timestamp_sorts_and_filters_by_it() {
    let target = |id: &str, period: &str, created_day: u32| TargetRecord {
        id: id.to_string(),
        period: period.to_string(),
        created_at: at(created_day),
        ..TargetRecord::default()
    };
    // Creation order runs opposite to the periods.
    let records = vec![
        target("jan", "2024-01", 20),
        target("mar", "2024-03", 1),
        target("feb", "2024-02", 10),
        target("open", "", 5),
    ];
    let pipeline = ReportPipeline::with_timestamp(period_start);

    let sorted = pipeline.sort(records.iter().collect());
    let order: Vec<&str> = sorted.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(order, vec!["mar", "feb", "jan", "open"]);

    let february = FilterSpec::new().date_range(
        NaiveDate::from_ymd_opt(2024, 2, 1),
        NaiveDate::from_ymd_opt(2024, 2, 29),
    );
    let kept: Vec<&str> = pipeline
        .filter(&records, &february)
        .iter()
        .map(|r| r.id.as_str())
        .collect();
    assert_eq!(kept, vec!["feb"]);

    let by_creation = ReportPipeline::<TargetRecord>::new().filter(&records, &february);
    assert!(by_creation.is_empty());
}

#[test]
fn amount_equality_filter_matches_whole_numbers() {
    let carrier = |id: &str, line_haul: f64| CarrierRecord {
        id: id.to_string(),
        line_haul: Amount(line_haul),
        ..CarrierRecord::default()
    };
    let records = vec![carrier("k1", 1000.0), carrier("k2", 950.0), carrier("k3", 10_000.0)];
    let pipeline = ReportPipeline::<CarrierRecord>::new();

    let spec = FilterSpec::new().equals(CarrierRecord::accessor("lineHaul").unwrap(), "1000");
    let kept: Vec<&str> = pipeline
        .filter(&records, &spec)
        .iter()
        .map(|r| r.id.as_str())
        .collect();
    assert_eq!(kept, vec!["k1"]);

    let mut state = FilterState::default();
    state.push_equals("lineHaul = $10,000").unwrap();
    let spec = state.resolve::<CarrierRecord>().unwrap();
    assert_eq!(pipeline.filter(&records, &spec).len(), 1);
}

#[test]
fn sort_is_newest_first_and_stable() {
    let records = vec![
        call("old", "", at(1)),
        call("undated", "", None),
        call("new-a", "", at(9)),
        call("mid", "", at(5)),
        call("new-b", "", at(9)),
    ];
    let pipeline = ReportPipeline::new();

    let sorted = pipeline.sort(records.iter().collect());
    assert_eq!(ids(&sorted), vec!["new-a", "new-b", "mid", "old", "undated"]);
    assert_eq!(pipeline.sort(sorted.clone()), sorted);
}

#[test]
fn twenty_three_filtered_calls_span_three_pages() {
    let records: Vec<CallRecord> = (1..=23)
        .map(|day| call(&format!("c{day:02}"), "answered", at(day)))
        .collect();
    let pipeline = ReportPipeline::new();
    let spec = FilterSpec::new();

    let first = pipeline.run(&records, &spec, PageRequest::new(1, 9));
    assert_eq!(first.page.total_pages, 3);
    assert_eq!(first.page.items.len(), 9);
    assert_eq!(first.page.items[0].id, "c23");

    let third = pipeline.run(&records, &spec, PageRequest::new(3, 9));
    assert_eq!(third.page.items.len(), 5);
    assert_eq!((third.page.start_index, third.page.end_index), (18, 23));
    assert_eq!(ids(&third.page.items), vec!["c05", "c04", "c03", "c02", "c01"]);

    let fourth = pipeline.run(&records, &spec, PageRequest::new(4, 9));
    assert!(fourth.page.items.is_empty());
    assert_eq!(fourth.page.start_index, 27);
    assert_eq!(fourth.page.total_pages, 3);
    assert_eq!(fourth.stats.total, 23);
}

#[test]
fn talk_time_totals_mixed_formats() {
    assert_eq!(total_talk_time_hours(["2h 30m", "90m", "45"]), 4.75);

    let records: Vec<CallRecord> = [("2h 30m", "answered"), ("90m", "missed"), ("45", "answered")]
        .iter()
        .enumerate()
        .map(|(i, (talk, status))| CallRecord {
            talk_time: (*talk).to_string(),
            ..call(&format!("c{i}"), status, at(1))
        })
        .collect();
    let view = ReportPipeline::new().run(&records, &FilterSpec::new(), PageRequest::default());

    insta::assert_json_snapshot!(view.stats, @r###"
    {
      "total": 3,
      "answered": 2,
      "missed": 1,
      "talkTimeHours": 4.75
    }
    "###);
}

#[test]
fn stats_follow_the_filtered_rows() {
    let records = vec![
        CallRecord {
            talk_time: "1h".to_string(),
            ..call("a", "answered", at(1))
        },
        CallRecord {
            talk_time: "3h".to_string(),
            department: "Ops".to_string(),
            ..call("b", "answered", at(2))
        },
    ];
    let spec = FilterSpec::new().equals(CallRecord::accessor("department").unwrap(), "Sales");

    let view = ReportPipeline::new().run(&records, &spec, PageRequest::default());
    assert_eq!(view.stats.total, 1);
    assert_eq!(view.stats.talk_time_hours, 1.0);
}

#[test]
fn carrier_total_adds_surcharge_as_percent() {
    let record = CarrierRecord {
        id: "k1".to_string(),
        line_haul: Amount(1000.0),
        fsc_percent: Amount(10.0),
        other_charges: Amount(50.0),
        ..CarrierRecord::default()
    };
    assert_eq!(Charges::from(&record).total(), 1150.0);

    let records = vec![record];
    let view = ReportPipeline::new().run(&records, &FilterSpec::new(), PageRequest::default());
    assert_eq!(view.stats.fuel_surcharge, 100.0);
    assert_eq!(view.stats.total_amount, 1150.0);
}

#[test]
fn export_writes_rows_in_the_given_order() {
    let mut records = vec![call("a", "answered", at(1)), call("b", "missed", at(2))];
    records[0].talk_time = "2h 30m".to_string();
    records[1].agent = "Lee, Kim".to_string();
    let pipeline = ReportPipeline::new();
    let rows = pipeline.sort(pipeline.filter(&records, &FilterSpec::new()));

    let columns = ["id", "agent", "talkTime"].map(|name| CallRecord::accessor(name).unwrap());
    let mut out = Vec::new();
    let written = write_csv(&rows, &columns, &mut out).unwrap();

    assert_eq!(written, 2);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "id,agent,talkTime\nb,\"Lee, Kim\",\na,Jo Smith,2h 30m\n"
    );
}

proptest! {
    #[test]
    fn pagination_stays_in_bounds(count in 0usize..80, size in 1usize..15, page in 1usize..12) {
        let items: Vec<usize> = (0..count).collect();
        let result = paginate(&items, PageRequest::new(page, size));
        let expected_pages = count.div_ceil(size).max(1);

        prop_assert!(result.items.len() <= size);
        prop_assert_eq!(result.total_pages, expected_pages);
        prop_assert_eq!(result.start_index, (page - 1) * size);
        prop_assert_eq!(result.end_index, result.start_index + result.items.len());
        if result.start_index < count {
            prop_assert!(result.end_index <= count);
        }
        if page > expected_pages {
            prop_assert!(result.items.is_empty());
        }
    }

    #[test]
    fn sorting_twice_changes_nothing(days in prop::collection::vec(prop::option::of(1u32..5), 0..40)) {
        let records: Vec<CallRecord> = days
            .iter()
            .enumerate()
            .map(|(i, day)| call(&i.to_string(), "", day.and_then(at)))
            .collect();
        let pipeline = ReportPipeline::new();

        let once = pipeline.sort(records.iter().collect());
        let twice = pipeline.sort(once.clone());
        prop_assert_eq!(&once, &twice);

        for pair in once.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            match (a.created_at, b.created_at) {
                (Some(x), Some(y)) => {
                    prop_assert!(x >= y);
                    if x == y {
                        prop_assert!(a.id.parse::<usize>().unwrap() < b.id.parse::<usize>().unwrap());
                    }
                }
                (None, Some(_)) => prop_assert!(false, "undated record sorted before a dated one"),
                (None, None) => {
                    prop_assert!(a.id.parse::<usize>().unwrap() < b.id.parse::<usize>().unwrap());
                }
                (Some(_), None) => {}
            }
        }
    }
}
