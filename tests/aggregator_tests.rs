use pretty_assertions::assert_eq;
use std::collections::BTreeMap;
use vacancy_stats::aggregator::{
    aggregate_shard, merge, rank, AggregationDriver, CurrencyNormalizer, PartialAggregate,
};
use vacancy_stats::parser::{Salary, Shard, VacancyRecord};
use vacancy_stats::utils::AggregationError;

fn vacancy(name: &str, city: &str, from: f64, to: f64, year: i32) -> VacancyRecord {
    VacancyRecord::new(name, city, Salary::new(from, to, "RUR"), year)
}

fn two_shard_scenario() -> Vec<Shard> {
    vec![
        Shard::new(
            "2020.csv",
            vec![vacancy("Аналитик данных", "Москва", 100.0, 200.0, 2020)],
        ),
        Shard::new(
            "2021.csv",
            vec![vacancy("Программист", "Москва", 300.0, 500.0, 2021)],
        ),
    ]
}

#[test]
fn test_two_shard_scenario_merge() {
    let normalizer = CurrencyNormalizer::default();
    let partials: Vec<_> = two_shard_scenario()
        .iter()
        .map(|shard| aggregate_shard(shard, &normalizer, "Аналитик").unwrap())
        .collect();

    let global = merge(partials);

    assert_eq!(global.amount_by_year, BTreeMap::from([(2020, 1), (2021, 1)]));
    assert_eq!(
        global.profession_amount_by_year,
        BTreeMap::from([(2020, 1), (2021, 0)])
    );
    assert_eq!(global.salary_by_year[&2020], vec![150.0]);
    assert_eq!(global.salary_by_year[&2021], vec![400.0]);
    assert_eq!(global.cities.salaries("Москва"), Some(&[150.0, 400.0][..]));
}

#[test]
fn test_two_shard_scenario_summary() {
    let summary = AggregationDriver::default()
        .with_workers(2)
        .run(&two_shard_scenario(), "Аналитик")
        .unwrap();

    assert_eq!(summary.years, vec![2020, 2021]);
    assert_eq!(summary.salary_by_year, BTreeMap::from([(2020, 150), (2021, 400)]));
    assert_eq!(summary.amount_by_year, BTreeMap::from([(2020, 1), (2021, 1)]));
    assert_eq!(
        summary.profession_salary_by_year,
        BTreeMap::from([(2020, 150), (2021, 0)])
    );
    assert_eq!(
        summary.profession_amount_by_year,
        BTreeMap::from([(2020, 1), (2021, 0)])
    );

    assert_eq!(summary.city_salaries.len(), 1);
    assert_eq!(summary.city_salaries[0].city, "Москва");
    assert_eq!(summary.city_salaries[0].mean_salary, 275);

    assert_eq!(summary.city_shares.len(), 1);
    assert_eq!(summary.city_shares[0].city, "Москва");
    assert_eq!(summary.city_shares[0].share, 1.0);
}

#[test]
fn test_year_without_profession_defaults_to_zero() {
    let shards = vec![Shard::new(
        "2019.csv",
        vec![
            vacancy("Программист", "Пермь", 100.0, 100.0, 2019),
            vacancy("Тестировщик", "Пермь", 300.0, 300.0, 2019),
        ],
    )];

    let summary = AggregationDriver::default().run(&shards, "Аналитик").unwrap();

    assert_eq!(summary.salary_by_year[&2019], 200);
    assert_eq!(summary.profession_salary_by_year[&2019], 0);
    assert_eq!(summary.profession_amount_by_year[&2019], 0);
}

#[test]
fn test_top_ten_cap() {
    // 15 cities, all above the 1% threshold, distinct salaries and counts
    let mut records = Vec::new();
    for i in 0..15 {
        let city = format!("Город {:02}", i);
        for _ in 0..(i + 5) {
            let salary = 1000.0 * (i + 1) as f64;
            records.push(vacancy("Инженер", &city, salary, salary, 2022));
        }
    }
    let shards = vec![Shard::new("2022.csv", records)];

    let summary = AggregationDriver::default().run(&shards, "Инженер").unwrap();

    assert_eq!(summary.city_salaries.len(), 10);
    assert_eq!(summary.city_shares.len(), 10);
    assert_eq!(summary.city_salaries[0].city, "Город 14");
    assert_eq!(summary.city_shares[0].city, "Город 14");
    assert!(summary
        .city_salaries
        .windows(2)
        .all(|pair| pair[0].mean_salary >= pair[1].mean_salary));
    assert!(summary
        .city_shares
        .windows(2)
        .all(|pair| pair[0].share >= pair[1].share));
}

#[test]
fn test_country_entry_counts_toward_total_but_is_not_ranked() {
    let shards = vec![Shard::new(
        "2022.csv",
        vec![
            vacancy("A", "Россия", 900.0, 900.0, 2022),
            vacancy("A", "Москва", 100.0, 100.0, 2022),
        ],
    )];

    let summary = AggregationDriver::default().run(&shards, "A").unwrap();

    assert_eq!(summary.city_salaries.len(), 1);
    assert_eq!(summary.city_shares[0].share, 0.5);
    assert_eq!(summary.salary_by_year[&2022], 500);
}

#[test]
fn test_unknown_currency_fails_the_run() {
    let shards = vec![
        Shard::new(
            "2020.csv",
            vec![vacancy("Аналитик", "Москва", 1.0, 2.0, 2020)],
        ),
        Shard::new(
            "2021.csv",
            vec![VacancyRecord::new(
                "Аналитик",
                "Москва",
                Salary::new(1.0, 2.0, "XYZ"),
                2021,
            )],
        ),
    ];

    let result = AggregationDriver::default().run(&shards, "Аналитик");

    let err = result.unwrap_err();
    assert!(matches!(
        err.root_cause(),
        AggregationError::UnknownCurrency { code, .. } if code == "XYZ"
    ));
    assert!(err.to_string().contains("2021.csv"));
}

#[test]
fn test_rank_zero_total_is_empty_dataset() {
    let global = merge(Vec::<PartialAggregate>::new());
    assert!(matches!(rank(&global, 0), Err(AggregationError::EmptyDataset)));
}

#[test]
fn test_single_worker_matches_many_workers() {
    let mut shards = Vec::new();
    for year in 2015..2023 {
        let records = (0..20)
            .map(|i| {
                let city = ["Москва", "Казань", "Пермь", "Омск"][i % 4];
                vacancy("Аналитик", city, (i * 100) as f64, (i * 200) as f64, year)
            })
            .collect();
        shards.push(Shard::new(format!("{}.csv", year), records));
    }

    let single = AggregationDriver::default()
        .with_workers(1)
        .run(&shards, "Аналитик")
        .unwrap();
    let many = AggregationDriver::default()
        .with_workers(4)
        .run(&shards, "Аналитик")
        .unwrap();

    assert_eq!(single, many);
}
