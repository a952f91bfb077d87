//! Pipeline Benchmarks
//!
//! Per-tick cost of the full pipeline, the pure step and the slip fusion.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rumble_engine::prelude::*;
use rumble_telemetry::{TelemetrySample, Wheels};

fn driving_sample(tick: u32) -> TelemetrySample {
    let t = f64::from(tick);
    TelemetrySample {
        rpm: 5000.0 + 2000.0 * (t / 30.0).sin(),
        max_rpm: 8500.0,
        speed_kmh: 140.0,
        throttle: 0.7,
        brake: 0.0,
        gear: 4,
        steering: 0.3 * (t / 50.0).sin(),
        tyre_temp: Wheels::splat(85.0),
        suspension_travel: Wheels::splat(0.02 * (t / 4.0).sin()),
        sim_slip: Wheels::new(0.05, 0.05, 0.2, 0.25),
        wheel_angular_speed: Wheels::new(100.0, 100.0, 104.0, 105.0),
        ..TelemetrySample::default()
    }
}

fn bench_pipeline_update(c: &mut Criterion) {
    let mut pipeline = match HapticPipeline::new(PipelineConfig::default()) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("failed to build pipeline: {e}");
            return;
        }
    };
    let mut tick = 0u32;
    c.bench_function("pipeline_update", |b| {
        b.iter(|| {
            tick = tick.wrapping_add(1);
            pipeline.update(std::hint::black_box(&driving_sample(tick)));
        })
    });
}

fn bench_state_advance(c: &mut Criterion) {
    let fusion = SlipFusion::standard();
    let mut state = PipelineState::default();
    let sample = driving_sample(7);
    c.bench_function("state_advance", |b| {
        b.iter(|| state.advance(std::hint::black_box(&sample), &fusion))
    });
}

fn bench_publish(c: &mut Criterion) {
    let Ok(mut pipeline) = HapticPipeline::new(PipelineConfig::default()) else {
        return;
    };
    pipeline.update(&driving_sample(1));
    let mut sum = 0.0;
    c.bench_function("publish_closure_sink", |b| {
        b.iter(|| {
            let mut sink = |_: &str, v: f64| sum += v;
            pipeline.publish(&mut sink);
        })
    });
    std::hint::black_box(sum);
}

fn bench_slip_fusion(c: &mut Criterion) {
    let mut group = c.benchmark_group("slip_fusion");
    let sample = driving_sample(3);
    for (name, fusion) in [
        ("empty", SlipFusion::empty()),
        ("standard", SlipFusion::standard()),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &fusion, |b, fusion| {
            b.iter(|| fusion.fuse(std::hint::black_box(&sample)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_pipeline_update,
    bench_state_advance,
    bench_publish,
    bench_slip_fusion
);
criterion_main!(benches);
