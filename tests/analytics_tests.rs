mod common;

use common::populated_books;
use obra_core::analytics::{
    breakdown_by_category, time_series, used_categories, ChartFilter, Selection,
};
use obra_core::domain::TransactionKind;

#[test]
fn project_filtered_series_is_chronological_and_scoped() {
    let books = populated_books();
    let filter = ChartFilter {
        project: Selection::Only("p1".into()),
        ..ChartFilter::default()
    };
    let series = time_series(&books.transactions, &filter);

    assert_eq!(series.len(), 2);
    assert_eq!(series[0].date, "2024-01-01");
    assert_eq!(series[0].income, 50.0);
    assert_eq!(series[0].expense, 0.0);
    assert_eq!(series[1].date, "2024-01-03");
    assert_eq!(series[1].income, 0.0);
    assert_eq!(series[1].expense, 100.0);
}

#[test]
fn same_date_rows_merge_into_one_bucket() {
    let books = populated_books();
    let series = time_series(&books.transactions, &ChartFilter::default());
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].date, "2024-01-01");
    assert_eq!(series[0].income, 50.0);
    assert_eq!(series[0].expense, 20.0);
}

#[test]
fn expense_filter_does_not_exclude_income_rows() {
    let books = populated_books();
    let filter = ChartFilter {
        expense_category: Selection::Only("No Existe".into()),
        ..ChartFilter::default()
    };
    let income = breakdown_by_category(&books.transactions, &filter, TransactionKind::Income);
    assert_eq!(income.len(), 1);
    assert_eq!(income[0].total, 50.0);

    let expenses = breakdown_by_category(&books.transactions, &filter, TransactionKind::Expense);
    assert!(expenses.is_empty());
}

#[test]
fn filters_combine_with_logical_and() {
    let books = populated_books();
    let filter = ChartFilter {
        project: Selection::Only("p2".into()),
        expense_category: Selection::Only("Herramientas".into()),
        income_category: Selection::Only("No Existe".into()),
    };
    let series = time_series(&books.transactions, &filter);
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].expense, 20.0);
    assert_eq!(series[0].income, 0.0);
}

#[test]
fn filter_options_reflect_history_in_lexicographic_order() {
    let books = populated_books();
    assert_eq!(
        used_categories(&books.transactions, TransactionKind::Expense),
        vec!["Herramientas".to_string()]
    );
    assert_eq!(
        used_categories(&books.transactions, TransactionKind::Income),
        vec!["Anticipo Cliente".to_string()]
    );
}
