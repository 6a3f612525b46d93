use super::*;

fn full_record_json() -> Value {
    serde_json::json!({
        "work_year": 2023,
        "experience_level": "SE",
        "employment_type": "FT",
        "job_title": "Machine Learning Engineer",
        "salary": 180000,
        "salary_currency": "USD",
        "salary_in_usd": 180000,
        "employee_residence": "US",
        "remote_ratio": 100,
        "company_location": "US",
        "company_size": "M"
    })
}

#[test]
fn parse_full_record() {
    let json = Value::Array(vec![full_record_json()]).to_string();
    let parsed = parse_records(&json).unwrap();
    assert!(parsed.skipped.is_empty());
    assert_eq!(parsed.records.len(), 1);
    let record = &parsed.records[0];
    assert_eq!(record.work_year, 2023);
    assert_eq!(record.job_title, "Machine Learning Engineer");
    assert!((record.salary_in_usd - 180_000.0).abs() < f64::EPSILON);
    assert_eq!(record.remote_ratio, 100);
    assert_eq!(record.company_size, "M");
}

#[test]
fn parse_defaults_descriptive_fields() {
    let json = r#"[{"work_year": 2021, "job_title": "ML Engineer", "salary_in_usd": 95000.5}]"#;
    let parsed = parse_records(json).unwrap();
    assert_eq!(parsed.records.len(), 1);
    let record = &parsed.records[0];
    assert_eq!(record.experience_level, "");
    assert_eq!(record.remote_ratio, 0);
    assert!((record.salary - 0.0).abs() < f64::EPSILON);
}

#[test]
fn parse_empty_array() {
    let parsed = parse_records("[]").unwrap();
    assert!(parsed.records.is_empty());
    assert!(parsed.skipped.is_empty());
}

#[test]
fn parse_skips_record_missing_salary() {
    let json = r#"[
        {"work_year": 2022, "job_title": "ML Engineer", "salary_in_usd": 100000},
        {"work_year": 2022, "job_title": "ML Engineer"},
        {"work_year": 2022, "job_title": "Data Scientist", "salary_in_usd": 120000}
    ]"#;
    let parsed = parse_records(json).unwrap();
    assert_eq!(parsed.records.len(), 2);
    assert_eq!(parsed.skipped.len(), 1);
    assert_eq!(parsed.skipped[0].index, 1);
    assert!(parsed.skipped[0].reason.contains("salary_in_usd"));
}

#[test]
fn parse_skips_wrongly_typed_year() {
    let json = r#"[{"work_year": "2022", "job_title": "ML Engineer", "salary_in_usd": 100000}]"#;
    let parsed = parse_records(json).unwrap();
    assert!(parsed.records.is_empty());
    assert_eq!(parsed.skipped[0].index, 0);
}

#[test]
fn parse_skips_non_object_elements() {
    let json = r#"[42, null, {"work_year": 2020, "job_title": "AI Scientist", "salary_in_usd": 1}]"#;
    let parsed = parse_records(json).unwrap();
    assert_eq!(parsed.records.len(), 1);
    let indices: Vec<usize> = parsed.skipped.iter().map(|s| s.index).collect();
    assert_eq!(indices, vec![0, 1]);
    assert!(parsed.skipped[0].reason.contains("a number"));
    assert!(parsed.skipped[1].reason.contains("null"));
}

#[test]
fn parse_skips_out_of_range_remote_ratio() {
    let json = r#"[{"work_year": 2020, "job_title": "AI Scientist", "salary_in_usd": 1, "remote_ratio": 150}]"#;
    let parsed = parse_records(json).unwrap();
    assert!(parsed.records.is_empty());
    assert_eq!(parsed.skipped.len(), 1);
}

#[test]
fn parse_rejects_non_array_document() {
    let err = parse_records(r#"{"work_year": 2020}"#).unwrap_err();
    assert!(matches!(err, DatasetError::NotAnArray { found: "an object" }));
    assert_eq!(err.to_string(), "dataset must be a JSON array, found an object");
}

#[test]
fn parse_rejects_invalid_json() {
    let err = parse_records("not json").unwrap_err();
    assert!(matches!(err, DatasetError::Parse(_)));
}
