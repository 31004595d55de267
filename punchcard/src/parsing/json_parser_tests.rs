#[cfg(test)]
mod tests {
    use crate::parsing::json_parser::{
        parse_date_and_value_data_json_str, parse_date_data_json_str, parse_records_json,
        parse_records_json_str,
    };
    use crate::parsing::records::{parse_timestamp, DataConverter, DateRecord};
    use crate::models::Dataset;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_date_data() {
        let json = r#"[
            {"id": "ann", "date": "2020-05-01T09:30:00"},
            {"id": "bob", "date": "2020-05-02"},
            {"id": "ann", "date": "2020-05-03 18:00:00"}
        ]"#;

        let dataset = parse_date_data_json_str(json).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.observation_count(), 3);
        assert_eq!(dataset.total_value("ann"), 2.0);

        let ann = dataset.get("ann").unwrap();
        assert_eq!(ann[0].timestamp, at(2020, 5, 1, 9, 30));
        assert_eq!(ann[1].timestamp, at(2020, 5, 3, 18, 0));
        assert_eq!(dataset.get("bob").unwrap()[0].timestamp, at(2020, 5, 2, 0, 0));
    }

    #[test]
    fn test_parse_date_and_value_data() {
        let json = r#"[
            {"authorId": "ann", "date": "2020-05-01T08:00:00Z", "value": 1},
            {"authorId": "ann", "date": "2020-05-19T10:00:00Z", "value": 90.5}
        ]"#;

        let dataset = parse_date_and_value_data_json_str(json).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.total_value("ann"), 91.5);
    }

    #[test]
    fn test_commit_style_field_names_are_accepted() {
        let json = r#"[{"author_id": "ann", "commit_date": "2021-01-01"}]"#;
        let dataset = parse_date_data_json_str(json).unwrap();
        assert_eq!(dataset.identities().collect::<Vec<_>>(), vec!["ann"]);
    }

    #[test]
    fn test_empty_array_gives_empty_dataset() {
        let dataset = parse_date_data_json_str("[]").unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_missing_field_reports_path() {
        let json = r#"[
            {"id": "ann", "date": "2020-05-01"},
            {"id": "bob"}
        ]"#;

        let err = parse_records_json_str::<DateRecord>(json).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("[1]"), "unexpected message: {message}");
        assert!(message.contains("date"), "unexpected message: {message}");
    }

    #[test]
    fn test_wrong_value_type_reports_path() {
        let json = r#"[{"authorId": "ann", "date": "2020-05-01", "value": "lots"}]"#;
        let err = parse_date_and_value_data_json_str(json).unwrap_err();
        assert!(format!("{:#}", err).contains("[0].value"));
    }

    #[test]
    fn test_bad_date_names_the_record() {
        let json = r#"[
            {"id": "ann", "date": "2020-05-01"},
            {"id": "ann", "date": "yesterday"}
        ]"#;

        let err = parse_date_data_json_str(json).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("Record 1 for 'ann'"), "unexpected message: {message}");
        assert!(message.contains("yesterday"), "unexpected message: {message}");
    }

    #[test]
    fn test_parse_timestamp_forms() {
        assert_eq!(parse_timestamp("2020-05-01").unwrap(), at(2020, 5, 1, 0, 0));
        assert_eq!(
            parse_timestamp("2020-05-01T09:30:00").unwrap(),
            at(2020, 5, 1, 9, 30)
        );
        assert_eq!(
            parse_timestamp(" 2020-05-01 09:30:00 ").unwrap(),
            at(2020, 5, 1, 9, 30)
        );
        assert_eq!(
            parse_timestamp("2020-05-01T09:30:00.250").unwrap(),
            at(2020, 5, 1, 9, 30) + chrono::Duration::milliseconds(250)
        );
        // Offsets are dropped, the local reading is kept
        assert_eq!(
            parse_timestamp("2020-05-01T23:30:00-05:00").unwrap(),
            at(2020, 5, 1, 23, 30)
        );
        assert!(parse_timestamp("").is_err());
        assert!(parse_timestamp("2020-13-01").is_err());
    }

    #[test]
    fn test_closures_act_as_converters() {
        let converter = |raw: Vec<(&str, &str)>| -> anyhow::Result<Dataset> {
            let mut dataset = Dataset::new();
            for (id, date) in raw {
                dataset.push(id, crate::models::Observation::presence(parse_timestamp(date)?));
            }
            Ok(dataset)
        };

        let dataset = converter
            .convert(vec![("ann", "2020-01-01"), ("bob", "2020-01-02")])
            .unwrap();
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn test_parse_records_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": "ann", "date": "2020-05-01"}}]"#).unwrap();

        let records: Vec<DateRecord> = parse_records_json(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "ann");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = parse_records_json::<DateRecord>(std::path::Path::new("/nonexistent/data.json"));
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("Failed to read JSON file"));
    }
}
