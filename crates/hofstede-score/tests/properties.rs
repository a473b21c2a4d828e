//! Property tests for similarity scoring.

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use proptest::prelude::{Strategy, prop, prop_assert, prop_assert_eq, proptest};

use hofstede_model::{Dimension, DimensionVector, Preference, Weights};
use hofstede_score::{ErrorKind, score};

fn single_country_df(values: [i64; 6]) -> DataFrame {
    many_country_df(&[values])
}

fn many_country_df(rows: &[[i64; 6]]) -> DataFrame {
    let mut cols: Vec<Column> = vec![
        Series::new(
            "country_code".into(),
            (0..rows.len()).map(|i| format!("C{i}")).collect::<Vec<_>>(),
        )
        .into_column(),
        Series::new(
            "country_name".into(),
            (0..rows.len()).map(|i| format!("Country {i}")).collect::<Vec<_>>(),
        )
        .into_column(),
    ];
    for dimension in Dimension::ALL {
        cols.push(
            Series::new(
                dimension.key().into(),
                rows.iter().map(|r| r[dimension.index()]).collect::<Vec<_>>(),
            )
            .into_column(),
        );
    }
    DataFrame::new(cols).unwrap()
}

fn only_score(values: [i64; 6], preference: &Preference, weights: &Weights) -> f64 {
    let ranked = score(&single_country_df(values), preference, weights).unwrap();
    ranked.similarity_scores().unwrap()[0]
}

fn dimension_values() -> impl Strategy<Value = [i64; 6]> {
    prop::array::uniform6(0i64..=100)
}

/// Weights in tenths, like the 0.1-step sliders, with at least one positive.
fn weights() -> impl Strategy<Value = Weights> {
    prop::array::uniform6(0u8..=10)
        .prop_filter("at least one positive weight", |w| w.iter().any(|x| *x > 0))
        .prop_map(|w| Weights::new(DimensionVector::new(w.map(|x| f64::from(x) / 10.0))).unwrap())
}

fn dimension() -> impl Strategy<Value = Dimension> {
    (0usize..Dimension::COUNT).prop_map(|idx| Dimension::ALL[idx])
}

proptest! {
    #[test]
    fn zero_divergence_scores_one_hundred(values in dimension_values(), weights in weights()) {
        let preference = Preference::new(DimensionVector::new(values.map(|v| v as f64))).unwrap();
        prop_assert_eq!(only_score(values, &preference, &weights), 100.0);
    }

    #[test]
    fn moving_away_strictly_lowers_score(
        values in dimension_values(),
        target in dimension_values(),
        weights in weights(),
        dimension in dimension(),
        // Smaller weights or steps can round both scores to the same tenth.
        weight_tenths in 5u8..=10,
        step in 2i64..=40,
    ) {
        let weights = weights.with(dimension, f64::from(weight_tenths) / 10.0).unwrap();
        let preference = Preference::new(DimensionVector::new(target.map(|v| v as f64))).unwrap();

        let idx = dimension.index();
        let mut farther = values;
        if values[idx] >= target[idx] {
            farther[idx] += step;
        } else {
            farther[idx] -= step;
        }

        let near = only_score(values, &preference, &weights);
        let far = only_score(farther, &preference, &weights);
        prop_assert!(far < near, "{far} should be below {near}");
    }

    #[test]
    fn zero_weight_dimension_is_ignored(
        values in dimension_values(),
        target in dimension_values(),
        weights in weights(),
        dimension in dimension(),
        other_value in -50i64..=150,
        other_target in -50.0f64..=150.0,
    ) {
        let others_positive = Dimension::ALL
            .iter()
            .any(|d| *d != dimension && weights.get(*d) > 0.0);
        let weights = if others_positive {
            weights.with(dimension, 0.0).unwrap()
        } else {
            // Keep one positive weight elsewhere.
            let other = Dimension::ALL[(dimension.index() + 1) % Dimension::COUNT];
            weights.with(dimension, 0.0).unwrap().with(other, 1.0).unwrap()
        };
        let preference = Preference::new(DimensionVector::new(target.map(|v| v as f64))).unwrap();

        let mut changed_values = values;
        changed_values[dimension.index()] = other_value;
        let changed_preference = preference.with(dimension, other_target).unwrap();

        prop_assert_eq!(
            only_score(values, &preference, &weights),
            only_score(changed_values, &changed_preference, &weights)
        );
    }

    #[test]
    fn ranked_rows_are_non_decreasing(
        rows in prop::collection::vec(dimension_values(), 1..40),
        target in dimension_values(),
        weights in weights(),
    ) {
        let preference = Preference::new(DimensionVector::new(target.map(|v| v as f64))).unwrap();
        let ranked = score(&many_country_df(&rows), &preference, &weights).unwrap();
        let scores = ranked.similarity_scores().unwrap();

        prop_assert_eq!(scores.len(), rows.len());
        prop_assert!(scores.windows(2).all(|pair| pair[0] <= pair[1]));

        let best = ranked.best_match().unwrap();
        let max = scores.iter().copied().fold(f64::MIN, f64::max);
        prop_assert_eq!(best.similarity_score, max);
    }

    #[test]
    fn all_zero_weights_never_score(
        rows in prop::collection::vec(dimension_values(), 1..10),
    ) {
        let weights = Weights::new(DimensionVector::splat(0.0)).unwrap();
        let err = score(&many_country_df(&rows), &Preference::default(), &weights).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}
