mod common;

use common::{monthly_table, noise, ramp};
use lagreg::format::{render_markdown, FITTED_KEYS, WARNING_KEY};
use lagreg::{FormatConfig, PairwiseRegressionEngine, ResultFormatter, ShiftMap};

#[test]
fn test_markdown_report_end_to_end() {
    let a = ramp(12);
    let b: Vec<f64> = a.iter().map(|v| 2.0 * v).collect();
    let table = monthly_table(&[("A", a), ("B", b), ("C", ramp(5).into_iter().chain(vec![f64::NAN; 7]).collect())]);
    let shifts = ShiftMap::new().with("B", 0).with("A", 2).with("C", 0);

    let results = PairwiseRegressionEngine::default()
        .run(&["B", "A", "C"], &table, &shifts)
        .unwrap();
    let records = ResultFormatter::default().format_all(&results);
    assert_eq!(records.len(), 3);

    let fitted = &records[0];
    assert_eq!(fitted.label, "B(t) ~ A(t-2)");
    assert_eq!(fitted.keys(), FITTED_KEYS.to_vec());
    assert_eq!(fitted.get("observations"), Some("10"));
    assert_eq!(fitted.get("slope"), Some("2.0000"));
    assert_eq!(fitted.get("intercept"), Some("4.0000"));
    assert_eq!(fitted.get("r_squared"), Some("1.0000"));
    assert_eq!(fitted.get("p_value"), Some("0.0000"));

    // Cは5行しか値がないため残りのペアはスキップされる
    for record in &records[1..] {
        assert_eq!(record.status, "skipped");
        assert_eq!(record.reason, Some("insufficient_data"));
        assert_eq!(record.keys(), vec![WARNING_KEY]);
    }

    let markdown = render_markdown(&records);
    assert!(markdown.starts_with("#### `B(t) ~ A(t-2)`\n- **observations**: 10\n"));
    assert!(markdown.contains("#### `B(t) ~ C(t)`\n- **warning**: "));
    assert!(markdown.contains("#### `A(t-2) ~ C(t)`\n"));
    assert_eq!(markdown.matches("#### ").count(), 3);
}

#[test]
fn test_precision_is_configurable() {
    let table = monthly_table(&[("A", noise(7, 24)), ("B", noise(8, 24))]);
    let shifts = ShiftMap::new().with("A", 0).with("B", 1);
    let results = PairwiseRegressionEngine::default()
        .run(&["A", "B"], &table, &shifts)
        .unwrap();

    let formatter = ResultFormatter::new(FormatConfig { precision: 2 }).unwrap();
    let record = formatter.format(&results[0]);
    for key in ["intercept", "slope", "p_value", "r_squared"] {
        let value = record.get(key).unwrap();
        let decimals = value.split('.').nth(1).map(str::len);
        assert_eq!(decimals, Some(2), "{} = {}", key, value);
    }
    assert_eq!(record.get("observations"), Some("23"));

    assert!(ResultFormatter::new(FormatConfig { precision: 40 }).is_err());
}

#[test]
fn test_text_rendering_lists_every_statistic() {
    let table = monthly_table(&[("A", ramp(12)), ("B", noise(3, 12))]);
    let shifts = ShiftMap::new().with("A", 0).with("B", 0);
    let results = PairwiseRegressionEngine::default()
        .run(&["A", "B"], &table, &shifts)
        .unwrap();

    let text = ResultFormatter::default().format(&results[0]).to_string();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("A(t) ~ B(t)"));
    for key in FITTED_KEYS {
        assert!(text.contains(key));
    }
    assert_eq!(text.lines().count(), 1 + FITTED_KEYS.len());
}
