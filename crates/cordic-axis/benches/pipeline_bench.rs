//! Pipeline throughput benchmarks
//!
//! Run with:
//!
//! ```bash
//! cargo bench -p cordic-axis --bench pipeline_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use cordic_axis::{
    Beat, CordicMode, CordicPipeline, CoreConfig, HarnessConfig, PausePattern, StreamingCoreExt,
    Testbench,
};
use cordic_core::Cordic;

const BEATS: usize = 4096;

fn sin_cos_beats() -> Vec<Beat> {
    (0..BEATS).map(|i| Beat::angle((i * 16) as u16)).collect()
}

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");
    group.throughput(Throughput::Elements(BEATS as u64));

    for iterations in [12, 16, 24] {
        let cordic = Cordic::new(CordicMode::SinCos, iterations).unwrap();
        group.bench_with_input(BenchmarkId::new("sin_cos", iterations), &cordic, |b, cordic| {
            b.iter(|| {
                for code in (0..BEATS).map(|i| (i * 16) as u16) {
                    black_box(cordic.sin_cos(black_box(code)));
                }
            })
        });
    }

    let cordic = Cordic::new(CordicMode::AngleMag, 16).unwrap();
    group.bench_function("angle_mag/16", |b| {
        b.iter(|| {
            for i in 0..BEATS as i32 {
                black_box(cordic.angle_mag(black_box((i * 7 - 14000) as i16), (i * 5) as i16));
            }
        })
    });

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    group.throughput(Throughput::Elements(BEATS as u64));
    let beats = sin_cos_beats();

    for depth in [8, 16, 24] {
        group.bench_with_input(BenchmarkId::new("process", depth), &depth, |b, &depth| {
            let mut core =
                CordicPipeline::new(CoreConfig::new(CordicMode::SinCos).iterations(depth)).unwrap();
            b.iter(|| black_box(core.process(&beats)))
        });
    }

    group.finish();
}

fn bench_testbench(c: &mut Criterion) {
    let mut group = c.benchmark_group("testbench");
    group.throughput(Throughput::Elements(BEATS as u64));
    let beats = sin_cos_beats();

    let patterns = [
        ("free", HarnessConfig::default()),
        (
            "cycle_pause",
            HarnessConfig::default()
                .idle(PausePattern::cycle_pause())
                .backpressure(PausePattern::cycle_pause()),
        ),
        (
            "random",
            HarnessConfig::default()
                .idle(PausePattern::random(0.3, 1))
                .backpressure(PausePattern::random(0.3, 2)),
        ),
    ];

    for (name, harness) in patterns {
        group.bench_function(name, |b| {
            let core = CordicPipeline::new(CoreConfig::default()).unwrap();
            let mut tb = Testbench::new(core, harness.clone()).unwrap();
            tb.reset();
            b.iter(|| black_box(tb.run_beats(beats.iter().copied()).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_engine, bench_pipeline, bench_testbench);
criterion_main!(benches);
