use proptest::prelude::*;
use std::collections::BTreeMap;
use vacancy_stats::aggregator::{aggregate_shard, merge, CurrencyNormalizer, GlobalAggregate};
use vacancy_stats::parser::{Salary, Shard, VacancyRecord};

const CITIES: &[&str] = &["Москва", "Санкт-Петербург", "Казань", "Пермь", "Россия"];

fn record_strategy() -> impl Strategy<Value = VacancyRecord> {
    (0usize..CITIES.len(), 0u32..100_000, 0u32..100_000, 2018i32..2023, any::<bool>()).prop_map(
        |(city, low, high, year, matches)| {
            let name = if matches { "Аналитик данных" } else { "Программист" };
            VacancyRecord::new(
                name,
                CITIES[city],
                Salary::new(low.min(high) as f64, low.max(high) as f64, "RUR"),
                year,
            )
        },
    )
}

/// One shard per year
fn shards_by_year(records: &[VacancyRecord]) -> Vec<Shard> {
    let mut by_year: BTreeMap<i32, Vec<VacancyRecord>> = BTreeMap::new();
    for record in records {
        by_year.entry(record.year).or_default().push(record.clone());
    }
    by_year
        .into_iter()
        .map(|(year, records)| Shard::new(year.to_string(), records))
        .collect()
}

/// Every year split into two shards
fn shards_split(records: &[VacancyRecord]) -> Vec<Shard> {
    shards_by_year(records)
        .into_iter()
        .flat_map(|shard| {
            let mid = shard.records.len() / 2;
            let (head, tail) = shard.records.split_at(mid);
            vec![
                Shard::new(format!("{}-a", shard.label), head.to_vec()),
                Shard::new(format!("{}-b", shard.label), tail.to_vec()),
            ]
        })
        .collect()
}

fn merge_in_order(shards: &[Shard]) -> GlobalAggregate {
    let normalizer = CurrencyNormalizer::default();
    merge(
        shards
            .iter()
            .map(|shard| aggregate_shard(shard, &normalizer, "Аналитик").unwrap()),
    )
}

fn sorted(series: &[f64]) -> Vec<f64> {
    let mut series = series.to_vec();
    series.sort_by(|a, b| a.partial_cmp(b).unwrap());
    series
}

/// Compare everything except the order of values inside a series
fn assert_equivalent(left: &GlobalAggregate, right: &GlobalAggregate) -> Result<(), TestCaseError> {
    prop_assert_eq!(&left.amount_by_year, &right.amount_by_year);
    prop_assert_eq!(&left.profession_amount_by_year, &right.profession_amount_by_year);

    for (year, series) in &left.salary_by_year {
        prop_assert_eq!(sorted(series), sorted(&right.salary_by_year[year]));
        prop_assert_eq!(
            sorted(&left.profession_salary_by_year[year]),
            sorted(&right.profession_salary_by_year[year])
        );
    }

    prop_assert_eq!(left.cities.len(), right.cities.len());
    for (city, series) in left.cities.iter() {
        prop_assert_eq!(series.len(), right.cities.count(city));
        prop_assert_eq!(
            sorted(series),
            sorted(right.cities.salaries(city).unwrap_or(&[]))
        );
    }
    Ok(())
}

proptest! {
    #[test]
    fn merge_is_order_independent(
        records in prop::collection::vec(record_strategy(), 1..150),
        rotation in 0usize..16,
    ) {
        let shards = shards_by_year(&records);
        let forward = merge_in_order(&shards);

        let mut reversed = shards.clone();
        reversed.reverse();
        assert_equivalent(&forward, &merge_in_order(&reversed))?;

        let mut rotated = shards.clone();
        let len = rotated.len();
        rotated.rotate_left(rotation % len);
        assert_equivalent(&forward, &merge_in_order(&rotated))?;
    }

    #[test]
    fn merge_is_partition_independent(records in prop::collection::vec(record_strategy(), 1..150)) {
        let coarse = merge_in_order(&shards_by_year(&records));
        let fine = merge_in_order(&shards_split(&records));

        assert_equivalent(&coarse, &fine)?;
        prop_assert_eq!(coarse.total_count(), records.len());
    }

    #[test]
    fn merge_is_associative(records in prop::collection::vec(record_strategy(), 1..150)) {
        let shards = shards_split(&records);
        let sequential = merge_in_order(&shards);

        let mid = shards.len() / 2;
        let mut grouped = merge_in_order(&shards[..mid]);
        grouped.combine(merge_in_order(&shards[mid..]));

        assert_equivalent(&sequential, &grouped)?;
    }

    #[test]
    fn normalize_equal_bounds_in_rur_is_identity(x in -1.0e12f64..1.0e12f64) {
        let normalizer = CurrencyNormalizer::default();
        prop_assert_eq!(normalizer.normalize(x, x, "RUR").unwrap(), x);
    }
}
