use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, black_box};
use story_core::{RawRow, SeriesBuilder};

fn gen_rows(players: usize, seasons: i32) -> Vec<RawRow> {
    let mut v = Vec::with_capacity(players * seasons as usize * 2);
    for p in 0..players {
        let name = format!("Player {p}");
        for s in 0..seasons {
            let season = 1980 + s;
            let attempts = ((p * 7 + s as usize) % 90) as f64 / 10.0;
            // every tenth player changes teams mid-season: two team rows plus the total
            if p % 10 == 0 {
                v.push(RawRow::new(name.as_str(), season, Some("AAA"), Some(attempts * 0.4), Some(0.33)));
                v.push(RawRow::new(name.as_str(), season, Some("BBB"), Some(attempts * 0.6), Some(0.37)));
                v.push(RawRow::new(name.as_str(), season, Some("TOT"), Some(attempts), Some(0.35)));
            } else {
                let pct = if s % 13 == 0 { None } else { Some(0.30 + (p % 10) as f64 / 100.0) };
                v.push(RawRow::new(name.as_str(), season, Some("CCC"), Some(attempts), pct));
            }
        }
    }
    v
}

fn bench_builder(c: &mut Criterion) {
    let mut group = c.benchmark_group("series_builder");
    for &players in &[500usize, 2_000usize] {
        let rows = gen_rows(players, 45);
        group.bench_with_input(BenchmarkId::from_parameter(format!("p{players}_s45")), &rows, |b, rows| {
            b.iter_batched(
                || SeriesBuilder::new().since(2010),
                |builder| { let _ = black_box(builder.build(rows)); },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_builder);
criterion_main!(benches);
