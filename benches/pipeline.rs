use criterion::{black_box, criterion_group, criterion_main, Criterion};
use polars::prelude::*;
use weather_clean::{CleaningFrameExt, CleaningPipeline, EmptyColumnPolicy, PipelineConfig};

const ROWS: usize = 10_000;

fn raw_frame() -> DataFrame {
    let dates: Vec<String> = (0..ROWS)
        .map(|i| {
            let day = chrono::NaiveDate::from_ymd_opt(2013, 12, 21).unwrap()
                + chrono::Duration::days(i as i64);
            day.format("%Y-%m-%d").to_string()
        })
        .collect();
    let gusts: Vec<String> = (0..ROWS)
        .map(|i| if i % 7 == 0 { "-".to_string() } else { format!("{}", 10 + i % 25) })
        .collect();
    let precip: Vec<String> = (0..ROWS)
        .map(|i| if i % 11 == 0 { "T".to_string() } else { format!("{:.2}", (i % 50) as f64 / 100.0) })
        .collect();
    let temps: Vec<i64> = (0..ROWS).map(|i| 40 + (i % 50) as i64).collect();

    df!(
        "Date" => dates,
        "TempAvgF" => temps,
        "WindGustMPH" => gusts,
        "PrecipitationSumInches" => precip,
    )
    .unwrap()
}

fn bench_pipeline(c: &mut Criterion) {
    let raw = raw_frame();
    let config = PipelineConfig {
        numeric_columns: vec!["WindGustMPH".to_string(), "PrecipitationSumInches".to_string()],
        ..PipelineConfig::default()
    };
    let pipeline = CleaningPipeline::new(config).unwrap();

    c.bench_function("coerce_numeric", |b| {
        b.iter(|| {
            black_box(raw.clone())
                .coerce_numeric(&["WindGustMPH", "PrecipitationSumInches"])
                .unwrap()
        })
    });
    c.bench_function("impute_and_round", |b| {
        let coerced = raw
            .clone()
            .coerce_numeric(&["WindGustMPH", "PrecipitationSumInches"])
            .unwrap();
        b.iter(|| {
            black_box(coerced.clone())
                .impute_mean(EmptyColumnPolicy::Skip)
                .unwrap()
                .round_numeric(2)
                .unwrap()
        })
    });
    c.bench_function("clean", |b| b.iter(|| pipeline.clean(black_box(raw.clone())).unwrap()));
    c.bench_function("correlation_matrix", |b| {
        let table = pipeline.clean(raw.clone()).unwrap().table;
        b.iter(|| table.correlation_matrix().unwrap())
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
