use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jyotish::chart::{ChartAssembler, ChartSettings};
use jyotish::ephemeris::{EphemerisProvider, KeplerianEphemeris};
use jyotish::time::UtcInstant;
use jyotish::vedic::{vimshottari_dasha, DashaLevel};
use jyotish::BirthInput;

fn bench_positions(c: &mut Criterion) {
    let provider = KeplerianEphemeris::default();
    let instant = UtcInstant::from_datetime(Utc.with_ymd_and_hms(1997, 10, 11, 1, 15, 0).unwrap());

    c.bench_function("keplerian_positions", |b| {
        b.iter(|| provider.positions(black_box(&instant)))
    });
}

fn bench_assemble(c: &mut Criterion) {
    let input = BirthInput::from_parts(1997, 10, 11, 6, 45, 26.76, 83.37, 5.5).unwrap();
    let assembler = ChartAssembler::default();
    let deep = ChartAssembler::new(ChartSettings {
        dasha_depth: DashaLevel::Pratyantardasha,
        ..ChartSettings::default()
    })
    .unwrap();

    c.bench_function("assemble_chart", |b| {
        b.iter(|| assembler.assemble(black_box(&input)))
    });
    c.bench_function("assemble_chart_pratyantardasha", |b| {
        b.iter(|| deep.assemble(black_box(&input)))
    });
}

fn bench_period_at(c: &mut Criterion) {
    let birth = UtcInstant::from_datetime(Utc.with_ymd_and_hms(1997, 10, 11, 1, 15, 0).unwrap());
    let dasha = vimshottari_dasha(&birth, 283.57).unwrap();
    let when = Utc.with_ymd_and_hms(2150, 1, 1, 0, 0, 0).unwrap();

    c.bench_function("dasha_periods_at", |b| {
        b.iter(|| dasha.periods_at(black_box(when), DashaLevel::Pratyantardasha))
    });
}

criterion_group!(benches, bench_positions, bench_assemble, bench_period_at);
criterion_main!(benches);
