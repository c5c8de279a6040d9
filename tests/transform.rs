mod common;

use std::collections::BTreeMap;

use drug_spend_view::{
    data::{DatasetResponse, DrugSeries, YearLabel},
    view::{filter::FilterSelection, format, transform::shape},
};
use proptest::prelude::*;

#[test]
fn single_drug_scenario() {
    let dataset = DatasetResponse::from_json(common::DRUG_A).unwrap();
    let shaped = shape(&dataset);

    let rendered: Vec<String> = shaped
        .rows
        .iter()
        .map(|r| format!("({},{},{},{})", r.drug, r.year, r.total_display(), r.avg_display()))
        .collect();
    insta::assert_snapshot!(rendered.join(" "), @"(DrugA,2020,$10.00,$5.00) (DrugA,2021,$20.00,$10.00)");
    assert_eq!(shaped.drugs, vec!["DrugA".to_string()]);
    assert_eq!(shaped.pie.get("DrugA"), Some(30.0));
    assert_eq!(shaped.labels, vec![YearLabel::Numeric(2020), YearLabel::Numeric(2021)]);
}

#[test]
fn drugs_keep_response_order() {
    let dataset = DatasetResponse::from_json(common::TWO_DRUGS).unwrap();
    let shaped = shape(&dataset);
    assert_eq!(shaped.drugs, vec!["Zeta".to_string(), "Alpha".to_string()]);
    assert_eq!(shaped.rows[0].drug, "Zeta");
    assert_eq!(shaped.rows[3].drug, "Alpha");
    let pie: Vec<&str> = shaped.pie.iter().map(|(drug, _)| drug).collect();
    assert_eq!(pie, vec!["Zeta", "Alpha"]);
}

#[test]
fn differing_axes_still_produce_every_row() {
    let dataset = DatasetResponse::from_json(common::MISALIGNED).unwrap();
    let shaped = shape(&dataset);
    assert_eq!(shaped.rows.len(), 5);
    assert_eq!(shaped.labels.len(), 3);
    assert_eq!(shaped.misaligned_drug(), Some("DrugB"));
}

#[test]
fn aligned_axes_report_no_misalignment() {
    let dataset = DatasetResponse::from_json(common::TWO_DRUGS).unwrap();
    assert_eq!(shape(&dataset).misaligned_drug(), None);
}

#[test]
fn mismatched_series_lengths_are_rejected() {
    let body = r#"{"DrugA": {"years": [2020, 2021], "total_spending": [1], "avg_spending": [1, 2]}}"#;
    assert!(DatasetResponse::from_json(body).is_err());
    assert!(DrugSeries::new(vec![2020.into()], vec![], vec![1.0]).is_err());
}

#[test]
fn string_years_are_accepted() {
    let body = r#"{"DrugA": {"years": ["2024", "2025"], "total_spending": [1, 2], "avg_spending": [1, 2]}}"#;
    let dataset = DatasetResponse::from_json(body).unwrap();
    let shaped = shape(&dataset);
    assert_eq!(shaped.rows[1].year.to_string(), "2025");
}

#[test]
fn empty_response_shapes_to_nothing() {
    let shaped = shape(&DatasetResponse::from_json("{}").unwrap());
    assert!(shaped.rows.is_empty());
    assert!(shaped.drugs.is_empty());
    assert!(shaped.pie.is_empty());
}

#[test]
fn currency_formats() {
    assert_eq!(format::currency(10.0), "$10.00");
    assert_eq!(format::currency(-3.456), "$-3.46");
    assert_eq!(format::currency(-0.0), "$0.00");
    assert_eq!(format::currency_grouped(1_234_567.891), "$1,234,567.89");
    assert_eq!(format::currency_grouped(-1234.5), "$-1,234.50");
    assert_eq!(format::currency_grouped(-0.0), "$0.00");
    assert_eq!(format::currency_grouped(999.999), "$1,000.00");
    assert_eq!(format::currency_grouped(12.0), "$12.00");
}

#[test]
fn negative_zero_from_body_renders_as_zero() {
    let body = r#"{"DrugA": {"years": [2024], "total_spending": [-0.0], "avg_spending": [-0.0]}}"#;
    let shaped = shape(&DatasetResponse::from_json(body).unwrap());
    assert_eq!(shaped.rows[0].total_display(), "$0.00");
    assert_eq!(shaped.rows[0].avg_display(), "$0.00");
}

fn dataset_strategy() -> impl Strategy<Value = BTreeMap<String, Vec<(f64, f64)>>> {
    prop::collection::btree_map(
        "[A-Z][a-z]{2,8}",
        prop::collection::vec((0.0..1.0e7f64, 0.0..1.0e4f64), 0..6),
        0..6,
    )
}

fn build(drugs: &BTreeMap<String, Vec<(f64, f64)>>) -> DatasetResponse {
    drugs
        .iter()
        .map(|(name, points)| {
            let years = (0..points.len() as i64).map(|i| YearLabel::from(2023 + i)).collect();
            let totals = points.iter().map(|(t, _)| *t).collect();
            let avgs = points.iter().map(|(_, a)| *a).collect();
            (name.clone(), DrugSeries::new(years, totals, avgs).unwrap())
        })
        .collect()
}

proptest! {
    #[test]
    fn row_count_is_sum_of_year_counts(drugs in dataset_strategy()) {
        let shaped = shape(&build(&drugs));
        let expected: usize = drugs.values().map(Vec::len).sum();
        prop_assert_eq!(shaped.rows.len(), expected);
    }

    #[test]
    fn options_are_the_drug_keys_once_each(drugs in dataset_strategy()) {
        let shaped = shape(&build(&drugs));
        let keys: Vec<String> = drugs.keys().cloned().collect();
        prop_assert_eq!(shaped.drugs, keys);
    }

    #[test]
    fn pie_is_per_drug_total(drugs in dataset_strategy()) {
        let shaped = shape(&build(&drugs));
        for (name, points) in &drugs {
            let expected: f64 = points.iter().map(|(t, _)| t).sum();
            let actual = shaped.pie.get(name).unwrap();
            prop_assert!((actual - expected).abs() <= 1e-6 * expected.max(1.0));
        }
    }

    #[test]
    fn filter_shows_exactly_the_selected_rows(drugs in dataset_strategy(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!drugs.is_empty());
        let mut view = common::seeded_view();
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        runtime.block_on(view.load(&common::Fixed(Ok(build(&drugs)))));

        let name = drugs.keys().nth(pick.index(drugs.len())).unwrap().clone();
        view.filter_table(FilterSelection::Drug(name.clone()));
        let visible: Vec<_> = view.visible_rows().collect();
        prop_assert_eq!(visible.len(), drugs[&name].len());
        prop_assert!(visible.iter().all(|r| r.drug == name));

        view.filter_table(FilterSelection::All);
        prop_assert_eq!(view.visible_rows().count(), view.rows().len());
    }
}
