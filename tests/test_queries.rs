// Query engine tests
// Author: Gabriel Demetrios Lafis

use std::sync::Arc;

use enem_microdata_api::{
    data::{Column, Participant, Scores, Table, TableHandle},
    processing::{
        compute_median, compute_std_dev, Criterion, FilterSet, QueryEngine, QueryError,
        SearchCriteria, RACE_CODES, SCHOOL_TYPE_CODES,
    },
};

const STATES: [&str; 12] = ["SP", "RJ", "SP", "MG", "BA", "SP", "RJ", "MG", "SP", "BA", "RJ", "SP"];

fn participant(id: usize, state: &str, math: f64) -> Participant {
    Participant {
        registration: Some(format!("{:04}", id)),
        year: Some(if id % 2 == 0 { 2019 } else { 2020 }),
        age: Some(17 + (id % 4) as i64),
        sex: Some(if id % 2 == 0 { "F" } else { "M" }.to_string()),
        race: Some((id % 6) as i64),
        school_type: Some(1 + (id % 3) as i64),
        state: Some(state.to_string()),
        scores: Scores {
            natural_sciences: 400.0 + id as f64,
            human_sciences: 450.0 + 2.0 * id as f64,
            languages: 500.0 + (id % 5) as f64 * 10.0,
            math,
            essay: 600.0 + 20.0 * (id % 3) as f64,
        },
    }
}

fn sample_table() -> Table {
    STATES
        .iter()
        .enumerate()
        .map(|(id, state)| participant(id, state, 450.0 + 37.0 * ((id * 7) % 12) as f64))
        .collect()
}

fn engine(table: Table) -> QueryEngine {
    QueryEngine::new(Arc::new(TableHandle::Ready(table)))
}

fn unavailable_engine() -> QueryEngine {
    QueryEngine::new(Arc::new(TableHandle::unavailable("missing.csv: file not found")))
}

fn scenario_table() -> Table {
    vec![
        participant(0, "SP", 700.0),
        participant(1, "SP", 500.0),
        participant(2, "RJ", 600.0),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_general_sample_returns_first_five_rows() {
    let table = sample_table();
    let engine = engine(table.clone());

    let rows = engine.general_sample(None).unwrap();

    assert_eq!(rows.len(), 5);
    for (row, expected) in rows.iter().zip(table.rows()) {
        assert_eq!(*row, expected);
    }
}

#[test]
fn test_general_sample_filters_by_year() {
    let engine = engine(sample_table());

    let rows = engine.general_sample(Some(2019)).unwrap();

    assert_eq!(rows.len(), 5);
    assert!(rows.iter().all(|row| row.year == Some(2019)));
    assert_eq!(rows[0].registration.as_deref(), Some("0000"));
    assert_eq!(rows[1].registration.as_deref(), Some("0002"));
}

#[test]
fn test_general_sample_unknown_year_is_not_found() {
    let engine = engine(sample_table());

    let err = engine.general_sample(Some(1998)).unwrap_err();

    assert!(matches!(err, QueryError::NotFound(_)));
}

#[test]
fn test_sample_by_state_uppercases_input() {
    let engine = engine(sample_table());

    let rows = engine.sample_by_state("sp").unwrap();

    assert_eq!(rows.len(), 5);
    assert!(rows.iter().all(|row| row.state.as_deref() == Some("SP")));

    let rows = engine.sample_by_state(" mg ").unwrap();
    assert_eq!(rows.len(), 2);
}

#[test]
fn test_sample_by_state_without_matches() {
    let engine = engine(sample_table());

    assert!(matches!(engine.sample_by_state("AM"), Err(QueryError::NotFound(_))));
    // blank input is an ordinary query that matches no state
    assert!(matches!(engine.sample_by_state("  "), Err(QueryError::NotFound(_))));
    assert!(matches!(engine.sample_by_state(""), Err(QueryError::NotFound(_))));
}

#[test]
fn test_search_without_criteria_returns_first_ten_rows() {
    let table = sample_table();
    let engine = engine(table.clone());

    let rows = engine.search_participants(&SearchCriteria::default(), None).unwrap();

    assert_eq!(rows.len(), 10);
    for (row, expected) in rows.iter().zip(&table.rows()[..10]) {
        assert_eq!(*row, expected);
    }
}

#[test]
fn test_search_respects_limit_and_match_count() {
    let engine = engine(sample_table());
    let criteria = SearchCriteria {
        state: Some("sp".to_string()),
        ..Default::default()
    };

    let rows = engine.search_participants(&criteria, Some(3)).unwrap();
    assert_eq!(rows.len(), 3);

    let rows = engine.search_participants(&criteria, Some(100)).unwrap();
    assert_eq!(rows.len(), 5);
    assert!(rows.windows(2).all(|w| w[0].registration < w[1].registration));
}

#[test]
fn test_search_limit_out_of_range_is_invalid() {
    let engine = engine(sample_table()).with_max_limit(5);

    for limit in [0, 6] {
        let err = engine
            .search_participants(&SearchCriteria::default(), Some(limit))
            .unwrap_err();
        assert!(matches!(err, QueryError::InvalidArgument(_)));
    }

    assert_eq!(
        engine.search_participants(&SearchCriteria::default(), Some(5)).unwrap().len(),
        5
    );
}

#[test]
fn test_search_combines_all_criteria() {
    let engine = engine(sample_table());
    let criteria = SearchCriteria {
        age: Some(17),
        sex: Some("f".to_string()),
        state: Some("Sp".to_string()),
        race: Some("nao_declarado".to_string()),
        school_type: Some("NAO_RESPONDEU".to_string()),
        math_min: Some(400.0),
        math_max: Some(500.0),
    };

    let rows = engine.search_participants(&criteria, None).unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].registration.as_deref(), Some("0000"));
}

#[test]
fn test_search_by_categorical_labels() {
    let engine = engine(sample_table());

    let criteria = SearchCriteria {
        race: Some("branca".to_string()),
        ..Default::default()
    };
    let rows = engine.search_participants(&criteria, None).unwrap();
    assert!(rows.iter().all(|row| row.race == Some(1)));
    assert_eq!(rows.len(), 2);

    let criteria = SearchCriteria {
        school_type: Some("Privada".to_string()),
        ..Default::default()
    };
    let rows = engine.search_participants(&criteria, None).unwrap();
    assert!(rows.iter().all(|row| row.school_type == Some(3)));
    assert_eq!(rows.len(), 4);
}

// Unknown labels are skipped rather than rejected. Changing this to an
// InvalidArgument error would break existing clients.
#[test]
fn test_search_ignores_unknown_race_label() {
    let engine = engine(sample_table());
    let criteria = SearchCriteria {
        race: Some("INVALIDO".to_string()),
        ..Default::default()
    };

    let with_label = engine.search_participants(&criteria, None).unwrap();
    let without = engine.search_participants(&SearchCriteria::default(), None).unwrap();

    assert_eq!(with_label, without);
    assert!(criteria.to_filter_set(engine.codes()).is_empty());
}

#[test]
fn test_search_math_range_bounds_are_inclusive() {
    let table = scenario_table();
    let engine = engine(table);
    let criteria = SearchCriteria {
        math_min: Some(500.0),
        math_max: Some(600.0),
        ..Default::default()
    };

    let rows = engine.search_participants(&criteria, None).unwrap();

    let math: Vec<f64> = rows.iter().map(|row| row.scores.math).collect();
    assert_eq!(math, vec![500.0, 600.0]);
}

#[test]
fn test_search_without_matches_is_not_found() {
    let engine = engine(sample_table());
    let criteria = SearchCriteria {
        math_min: Some(1000.0),
        ..Default::default()
    };

    let err = engine.search_participants(&criteria, None).unwrap_err();

    assert!(matches!(err, QueryError::NotFound(_)));
}

#[test]
fn test_filter_composition_is_order_independent() {
    let table = sample_table();
    let a = Criterion::equals(Column::Sex, "F");
    let b = Criterion::at_least(Column::Math, 500.0);
    let c = Criterion::equals(Column::State, "SP");

    let abc = FilterSet::new().and(a.clone()).and(b.clone()).and(c.clone());
    let cba = FilterSet::new().and(c.clone()).and(b.clone()).and(a.clone());
    let bac: FilterSet = vec![b.clone(), a.clone(), c.clone()].into_iter().collect();

    let expected: Vec<&Participant> = abc.apply(&table).collect();
    assert_eq!(cba.apply(&table).collect::<Vec<_>>(), expected);
    assert_eq!(bac.apply(&table).collect::<Vec<_>>(), expected);

    // filtering in stages gives the same rows as the combined set
    let ab = FilterSet::new().and(a).and(b);
    let only_c = FilterSet::new().and(c);
    let staged: Vec<&Participant> = ab.apply(&table).filter(|row| only_c.matches(row)).collect();
    assert_eq!(staged, expected);
}

#[test]
fn test_criterion_never_matches_missing_values() {
    let mut row = participant(0, "SP", 500.0);
    row.age = None;

    assert!(!Criterion::equals(Column::Age, 17_i64).matches(&row));
    assert!(!Criterion::at_least(Column::Age, 0_i64).matches(&row));
    assert!(Criterion::at_most(Column::Math, 500_i64).matches(&row));
}

#[test]
fn test_aggregate_statistics_matches_manual_mean() {
    let table = sample_table();
    let engine = engine(table.clone());

    let summaries = engine.aggregate_statistics().unwrap();

    let names: Vec<&str> = summaries.iter().map(|s| s.column).collect();
    assert_eq!(
        names,
        vec!["NU_NOTA_CN", "NU_NOTA_CH", "NU_NOTA_LC", "NU_NOTA_MT", "NU_NOTA_REDACAO"]
    );

    let manual = table.iter().map(|row| row.scores.math).sum::<f64>() / table.len() as f64;
    assert!((summaries[3].summary.mean - manual).abs() < 1e-9);
}

#[test]
fn test_aggregate_statistics_scenario() {
    let engine = engine(scenario_table());

    let summaries = engine.aggregate_statistics().unwrap();
    let math = summaries[3].summary;

    assert!((math.mean - 600.0).abs() < 1e-9);
    assert!((math.median - 600.0).abs() < 1e-9);
    // sample standard deviation: sqrt((100^2 + 100^2 + 0) / 2)
    assert!((math.std_dev.unwrap() - 100.0).abs() < 1e-9);
}

#[test]
fn test_statistics_helpers() {
    assert_eq!(compute_median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
    assert_eq!(compute_median(&[]), None);
    assert_eq!(compute_std_dev(&[500.0]), None);
}

#[test]
fn test_aggregate_statistics_on_empty_table_is_not_found() {
    let engine = engine(Table::default());

    assert!(matches!(engine.aggregate_statistics(), Err(QueryError::NotFound(_))));
    assert!(matches!(engine.general_sample(None), Err(QueryError::NotFound(_))));
    assert!(engine.demographic_distribution("TP_SEXO").unwrap().is_empty());
}

#[test]
fn test_distribution_scenario() {
    let engine = engine(scenario_table());

    let counts = engine.demographic_distribution("SG_UF_RESIDENCIA").unwrap();

    let pairs: Vec<(&str, usize)> = counts.iter().map(|c| (c.label(), c.count)).collect();
    assert_eq!(pairs, vec![("SP", 2), ("RJ", 1)]);
}

#[test]
fn test_distribution_keeps_missing_apart_from_null_text() {
    let mut rows: Vec<Participant> = scenario_table().rows().to_vec();
    rows[0].sex = Some("null".to_string());
    rows[1].sex = None;
    let engine = engine(Table::new(rows));

    let counts = engine.demographic_distribution("TP_SEXO").unwrap();

    let values: Vec<(Option<&str>, usize)> =
        counts.iter().map(|c| (c.value.as_deref(), c.count)).collect();
    assert_eq!(values, vec![(Some("null"), 1), (None, 1), (Some("F"), 1)]);
}

#[test]
fn test_distribution_of_float_column_keeps_decimal_point() {
    let engine = engine(scenario_table());

    let counts = engine.demographic_distribution("NU_NOTA_MT").unwrap();

    let labels: Vec<&str> = counts.iter().map(|c| c.label()).collect();
    assert_eq!(labels, vec!["700.0", "500.0", "600.0"]);
}

#[test]
fn test_distribution_counts_sum_to_row_count() {
    let mut rows: Vec<Participant> = sample_table().rows().to_vec();
    rows[3].sex = None;
    let table = Table::new(rows);
    let engine = engine(table.clone());

    for column in ["TP_SEXO", "SG_UF_RESIDENCIA", "NU_IDADE", "NU_NOTA_MT"] {
        let counts = engine.demographic_distribution(column).unwrap();
        let total: usize = counts.iter().map(|c| c.count).sum();
        assert_eq!(total, table.len());
        assert!(counts.windows(2).all(|w| w[0].count >= w[1].count));
    }

    let sex = engine.demographic_distribution("TP_SEXO").unwrap();
    assert!(sex.iter().any(|c| c.value.is_none() && c.label() == "null" && c.count == 1));
}

#[test]
fn test_distribution_ties_keep_first_appearance() {
    let engine = engine(sample_table());

    let counts = engine.demographic_distribution("sg_uf_residencia").unwrap();

    let order: Vec<&str> = counts.iter().map(|c| c.label()).collect();
    assert_eq!(order, vec!["SP", "RJ", "MG", "BA"]);
}

#[test]
fn test_distribution_unknown_column_is_invalid() {
    let engine = engine(sample_table());

    let err = engine.demographic_distribution("NU_NOTA_FISICA").unwrap_err();

    assert!(matches!(err, QueryError::InvalidArgument(_)));
    assert!(!err.is_not_found());
}

#[test]
fn test_ranking_scenario_ties_keep_first_appearance() {
    let engine = engine(scenario_table());

    let ranking = engine.ranking_by_state().unwrap();

    let pairs: Vec<(&str, f64)> = ranking.iter().map(|g| (g.group.as_str(), g.mean)).collect();
    assert_eq!(pairs, vec![("SP", 600.0), ("RJ", 600.0)]);
}

#[test]
fn test_ranking_is_sorted_and_grounded_in_rows() {
    let table = sample_table();
    let engine = engine(table.clone());

    let ranking = engine.ranking_by_state().unwrap();

    assert_eq!(ranking.len(), 4);
    assert!(ranking.windows(2).all(|w| w[0].mean >= w[1].mean));
    for group in &ranking {
        let rows: Vec<&Participant> = table
            .iter()
            .filter(|row| row.state.as_deref() == Some(group.group.as_str()))
            .collect();
        assert_eq!(rows.len(), group.count);
        let mean = rows.iter().map(|row| row.scores.math).sum::<f64>() / rows.len() as f64;
        assert!((group.mean - mean).abs() < 1e-9);
    }
}

#[test]
fn test_ranking_skips_rows_without_state() {
    let mut rows: Vec<Participant> = scenario_table().rows().to_vec();
    rows.push(Participant {
        state: None,
        ..participant(3, "XX", 999.0)
    });
    let engine = engine(Table::new(rows));

    let ranking = engine.ranking_by_state().unwrap();

    assert_eq!(ranking.len(), 2);
}

#[test]
fn test_unavailable_table_fails_every_operation() {
    let engine = unavailable_engine();

    let results = vec![
        engine.general_sample(None).map(|_| ()),
        engine.general_sample(Some(2019)).map(|_| ()),
        engine.sample_by_state("SP").map(|_| ()),
        engine.search_participants(&SearchCriteria::default(), None).map(|_| ()),
        engine.aggregate_statistics().map(|_| ()),
        engine.demographic_distribution("TP_SEXO").map(|_| ()),
        engine.demographic_distribution("NOT_A_COLUMN").map(|_| ()),
        engine.ranking_by_state().map(|_| ()),
    ];

    for result in results {
        let err = result.unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(err, QueryError::Unavailable(_)));
        assert!(err.to_string().contains("not loaded"));
    }

    let status = engine.status();
    assert!(!status.available);
    assert_eq!(status.rows, 0);
}

#[test]
fn test_code_maps() {
    assert_eq!(RACE_CODES.lookup(" Branca "), Some(1));
    assert_eq!(RACE_CODES.lookup("indígena"), Some(5));
    assert_eq!(RACE_CODES.lookup("INDIGENA"), Some(5));
    assert_eq!(RACE_CODES.lookup("INVALIDO"), None);

    assert_eq!(SCHOOL_TYPE_CODES.lookup("pública"), Some(2));
    assert_eq!(SCHOOL_TYPE_CODES.lookup("privada"), Some(3));
    assert_eq!(SCHOOL_TYPE_CODES.name(), "TP_ESCOLA");
}
