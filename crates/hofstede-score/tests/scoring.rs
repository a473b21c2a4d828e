//! Integration tests for the similarity engine.

use std::collections::BTreeMap;

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

use hofstede_model::{Dimension, DimensionVector, Preference, Weights};
use hofstede_score::{ErrorKind, RankOrder, ScoreError, score, score_keyed};

fn country_df(rows: &[(&str, &str, [i64; 6])]) -> DataFrame {
    let mut cols: Vec<Column> = vec![
        Series::new(
            "country_code".into(),
            rows.iter().map(|r| r.0.to_string()).collect::<Vec<_>>(),
        )
        .into_column(),
        Series::new(
            "country_name".into(),
            rows.iter().map(|r| r.1.to_string()).collect::<Vec<_>>(),
        )
        .into_column(),
    ];
    for dimension in Dimension::ALL {
        cols.push(
            Series::new(
                dimension.key().into(),
                rows.iter().map(|r| r.2[dimension.index()]).collect::<Vec<_>>(),
            )
            .into_column(),
        );
    }
    DataFrame::new(cols).unwrap()
}

fn sample_df() -> DataFrame {
    country_df(&[
        ("AUL", "Australia", [38, 90, 61, 51, 21, 71]),
        ("BEL", "Belgium", [65, 75, 54, 94, 82, 57]),
        ("DEN", "Denmark", [18, 74, 16, 23, 35, 70]),
        ("JPN", "Japan", [54, 46, 95, 92, 88, 42]),
        ("NET", "Netherlands", [38, 80, 14, 53, 67, 68]),
    ])
}

#[test]
fn identical_country_scores_one_hundred() {
    let df = country_df(&[("YOU", "Utopia", [20, 100, 20, 20, 80, 80])]);
    let ranked = score(&df, &Preference::default(), &Weights::default()).unwrap();
    let rows = ranked.rows().unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].total_loss, 0.0);
    assert_eq!(rows[0].similarity_score, 100.0);
}

#[test]
fn full_range_difference_on_one_dimension() {
    let df = country_df(&[("PDX", "Far", [120, 100, 20, 20, 80, 80])]);
    let ranked = score(&df, &Preference::default(), &Weights::default()).unwrap();
    let row = &ranked.rows().unwrap()[0];

    assert_eq!(row.loss(Dimension::Pdi), 100.0);
    assert_eq!(row.total_loss, 100.0);
    assert_eq!(row.similarity_score, 83.3);
}

#[test]
fn appends_named_columns() {
    let ranked = score(&sample_df(), &Preference::default(), &Weights::default()).unwrap();
    let names: Vec<String> = ranked
        .frame()
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    assert_eq!(
        names,
        vec![
            "country_code",
            "country_name",
            "pdi",
            "idv",
            "mas",
            "uai",
            "ltowvs",
            "ivr",
            "pdi_loss",
            "idv_loss",
            "mas_loss",
            "uai_loss",
            "ltowvs_loss",
            "ivr_loss",
            "total_loss",
            "similarity_score",
        ]
    );
}

#[test]
fn output_is_ascending_and_input_untouched() {
    let df = sample_df();
    let before = df.clone();
    let ranked = score(&df, &Preference::default(), &Weights::default()).unwrap();

    let scores = ranked.similarity_scores().unwrap();
    assert!(scores.windows(2).all(|pair| pair[0] <= pair[1]));
    assert!(df.equals(&before));
    assert_eq!(df.width(), 8);
}

#[test]
fn known_ranking_for_default_preference() {
    let ranked = score(&sample_df(), &Preference::default(), &Weights::default()).unwrap();
    let names: Vec<String> = ranked
        .rows()
        .unwrap()
        .into_iter()
        .map(|row| row.country.country_name)
        .collect();

    // Total losses: Japan 281, Belgium 203, Australia 168, Netherlands 102, Denmark 90.
    assert_eq!(
        names,
        vec!["Japan", "Belgium", "Australia", "Netherlands", "Denmark"]
    );
    assert_eq!(ranked.best_match().unwrap().name(), "Denmark");
    assert_eq!(ranked.worst_match().unwrap().name(), "Japan");
}

#[test]
fn best_match_is_not_first_row() {
    let ranked = score(&sample_df(), &Preference::default(), &Weights::default()).unwrap();
    let first = &ranked.rows().unwrap()[0];
    let best = ranked.best_match().unwrap();
    assert!(best.similarity_score > first.similarity_score);
}

#[test]
fn ties_keep_original_order() {
    let df = country_df(&[
        ("AAA", "First", [30, 100, 20, 20, 80, 80]),
        ("BBB", "Second", [10, 100, 20, 20, 80, 80]),
        ("CCC", "Third", [20, 100, 20, 20, 80, 80]),
        ("DDD", "Fourth", [20, 100, 20, 20, 80, 80]),
    ]);
    let ranked = score(&df, &Preference::default(), &Weights::default()).unwrap();

    let ascending: Vec<String> = ranked
        .rows()
        .unwrap()
        .into_iter()
        .map(|row| row.country.country_code)
        .collect();
    assert_eq!(ascending, vec!["AAA", "BBB", "CCC", "DDD"]);

    let descending: Vec<String> = ranked
        .rows_in(RankOrder::Descending)
        .unwrap()
        .into_iter()
        .map(|row| row.country.country_code)
        .collect();
    assert_eq!(descending, vec!["CCC", "DDD", "AAA", "BBB"]);

    assert_eq!(ranked.best_match().unwrap().country.country_code, "CCC");
}

#[test]
fn descending_frame_is_best_first() {
    let ranked = score(&sample_df(), &Preference::default(), &Weights::default()).unwrap();
    let frame = ranked.frame_in(RankOrder::Descending).unwrap();
    let names = frame.column("country_name").unwrap().str().unwrap().clone();
    assert_eq!(names.get(0), Some("Denmark"));
    assert_eq!(names.get(4), Some("Japan"));
}

#[test]
fn scores_can_go_below_zero() {
    let df = country_df(&[("NEG", "Opposite", [200, -100, 200, 200, -100, -100])]);
    let ranked = score(&df, &Preference::default(), &Weights::default()).unwrap();
    assert!(ranked.rows().unwrap()[0].similarity_score < 0.0);
}

#[test]
fn zero_weight_sum_is_configuration_error() {
    let weights = Weights::new(DimensionVector::splat(0.0)).unwrap();
    let err = score(&sample_df(), &Preference::default(), &weights).unwrap_err();

    assert!(matches!(err, ScoreError::ZeroWeightSum));
    assert_eq!(err.kind(), ErrorKind::Configuration);
    insta::assert_snapshot!(err.to_string(), @"at least one dimension must carry positive weight");
}

#[test]
fn missing_dimension_column_is_schema_error() {
    let df = sample_df().drop("uai").unwrap();
    let err = score(&df, &Preference::default(), &Weights::default()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Schema);
    insta::assert_snapshot!(err.to_string(), @"table is missing required column 'uai'");
}

#[test]
fn missing_column_reported_before_zero_weights() {
    let df = sample_df().drop("ivr").unwrap();
    let weights = Weights::new(DimensionVector::splat(0.0)).unwrap();
    let err = score(&df, &Preference::default(), &weights).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Schema);
}

#[test]
fn null_dimension_value_is_integrity_error() {
    let mut df = sample_df();
    df.with_column(Series::new(
        "mas".into(),
        vec![Some(61i64), Some(54), None, Some(95), Some(14)],
    ))
    .unwrap();
    let err = score(&df, &Preference::default(), &Weights::default()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DataIntegrity);
    assert!(matches!(err, ScoreError::NullValue { ref column, row: 2 } if column == "mas"));
}

#[test]
fn string_dimension_column_is_integrity_error() {
    let mut df = sample_df();
    df.with_column(Series::new(
        "pdi".into(),
        vec!["38", "65", "18", "54", "#NULL!"],
    ))
    .unwrap();
    let err = score(&df, &Preference::default(), &Weights::default()).unwrap_err();
    assert!(matches!(err, ScoreError::NonNumeric { .. }));
    assert_eq!(err.kind(), ErrorKind::DataIntegrity);
}

#[test]
fn fractional_dimension_value_is_integrity_error() {
    let mut df = sample_df();
    df.with_column(Series::new(
        "uai".into(),
        vec![51.0f64, 94.0, 23.0, 92.5, 53.0],
    ))
    .unwrap();
    let err = score(&df, &Preference::default(), &Weights::default()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DataIntegrity);
    assert!(matches!(
        err,
        ScoreError::NonIntegralValue { ref column, row: 3, value }
            if column == "uai" && value == 92.5
    ));
    insta::assert_snapshot!(err.to_string(), @"column 'uai' has a non-integer value 92.5 at row 3");
}

#[test]
fn whole_float_dimension_values_are_accepted() {
    let mut df = sample_df();
    df.with_column(Series::new(
        "uai".into(),
        vec![51.0f64, 94.0, 23.0, 92.0, 53.0],
    ))
    .unwrap();
    let ranked = score(&df, &Preference::default(), &Weights::default()).unwrap();
    let expected = score(&sample_df(), &Preference::default(), &Weights::default()).unwrap();

    assert_eq!(ranked.rows().unwrap(), expected.rows().unwrap());
}

#[test]
fn empty_table_is_rejected() {
    let df = country_df(&[]);
    let err = score(&df, &Preference::default(), &Weights::default()).unwrap_err();
    assert!(matches!(err, ScoreError::EmptyTable));
}

#[test]
fn keyed_inputs_require_every_dimension() {
    let preference: BTreeMap<String, f64> = [("pdi", 20.0), ("idv", 100.0)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    let weights: BTreeMap<String, f64> = DimensionVector::splat(1.0).into();
    let err = score_keyed(&sample_df(), &preference, &weights).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Schema);
    insta::assert_snapshot!(err.to_string(), @"invalid preference: missing value for dimension 'mas'");
}

#[test]
fn keyed_inputs_match_typed_inputs() {
    let preference: BTreeMap<String, f64> = (*Preference::default().vector()).into();
    let weights: BTreeMap<String, f64> = DimensionVector::new([1.0, 0.5, 0.0, 0.2, 1.0, 0.7]).into();
    let keyed = score_keyed(&sample_df(), &preference, &weights).unwrap();
    let typed = score(
        &sample_df(),
        &Preference::default(),
        &Weights::new(DimensionVector::new([1.0, 0.5, 0.0, 0.2, 1.0, 0.7])).unwrap(),
    )
    .unwrap();
    assert!(keyed.frame().equals(typed.frame()));
}

#[test]
fn scoring_twice_is_identical() {
    let df = sample_df();
    let weights = Weights::new(DimensionVector::new([0.3, 0.9, 0.1, 0.4, 0.0, 1.0])).unwrap();
    let first = score(&df, &Preference::default(), &weights).unwrap();
    let second = score(&df, &Preference::default(), &weights).unwrap();

    assert!(first.frame().equals(second.frame()));
    assert_eq!(first.rows().unwrap(), second.rows().unwrap());
}
