use criterion::{Criterion, criterion_group, criterion_main};
use health_scatter::api::{ScatterChart, ScatterChartConfig, project_marks};
use health_scatter::core::{AxisField, LinearScale, Metric, XField};
use health_scatter::data::{Dataset, Record};
use health_scatter::render::RetainedSurface;
use std::hint::black_box;

fn generated_dataset(len: usize) -> Dataset {
    let records = (0..len)
        .map(|i| {
            let t = i as f64;
            Record {
                state: format!("State {i}"),
                abbr: format!("S{}", i % 100),
                poverty: 8.0 + (t * 0.37) % 15.0,
                age: 30.0 + (t * 0.11) % 14.0,
                income: 38_000.0 + (t * 131.0) % 40_000.0,
                healthcare: 4.0 + (t * 0.23) % 18.0,
                smokes: 9.0 + (t * 0.19) % 18.0,
                obesity: 21.0 + (t * 0.29) % 15.0,
            }
        })
        .collect();
    Dataset::new(records).expect("generated dataset is valid")
}

fn bench_linear_scale_round_trip(c: &mut Criterion) {
    let scale = LinearScale::new((27.0, 44.0), (0.0, 940.0)).expect("valid scale");

    c.bench_function("linear_scale_round_trip", |b| {
        b.iter(|| {
            let px = scale.domain_to_pixel(black_box(38.2)).expect("to pixel");
            let _ = scale.pixel_to_domain(px).expect("from pixel");
        })
    });
}

fn bench_mark_projection_10k(c: &mut Criterion) {
    let dataset = generated_dataset(10_000);
    let scale = LinearScale::new((30_000.0, 85_000.0), (0.0, 940.0)).expect("valid scale");

    c.bench_function("mark_projection_10k", |b| {
        b.iter(|| {
            let _ = project_marks(black_box(&dataset), black_box(scale), Metric::Income)
                .expect("projection should succeed");
        })
    });
}

fn bench_caption_click_cycle_1k(c: &mut Criterion) {
    let mut chart = ScatterChart::mount(
        RetainedSurface::new(),
        generated_dataset(1_000),
        ScatterChartConfig::default(),
    )
    .expect("chart mounts");
    let cycle = [XField::Age, XField::Income, XField::Poverty];

    c.bench_function("caption_click_cycle_1k", |b| {
        b.iter(|| {
            for field in cycle {
                chart
                    .click_label(black_box(AxisField::X(field)))
                    .expect("click should succeed");
                chart.surface_mut().settle();
            }
        })
    });
}

criterion_group!(
    benches,
    bench_linear_scale_round_trip,
    bench_mark_projection_10k,
    bench_caption_click_cycle_1k
);
criterion_main!(benches);
