use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gh_activity::activity::{to_heatmap_matrix, to_line_series};
use gh_activity::model::WeeklyActivityRecord;

fn year_of_weeks() -> Vec<WeeklyActivityRecord> {
    (0..52i64)
        .map(|w| {
            let days: Vec<u32> = (0..7).map(|d| ((w as u32 * 7 + d) * 13) % 40).collect();
            WeeklyActivityRecord {
                week: 1_704_067_200 + w * 604_800,
                total: days.iter().sum(),
                days,
            }
        })
        .collect()
}

fn bench_transform(c: &mut Criterion) {
    let records = year_of_weeks();
    c.bench_function("to_line_series/52w", |b| {
        b.iter(|| to_line_series(black_box(&records), "mdn/content"))
    });
    c.bench_function("to_heatmap_matrix/52w", |b| {
        b.iter(|| to_heatmap_matrix(black_box(&records)))
    });
}

criterion_group!(benches, bench_transform);
criterion_main!(benches);
