use criterion::{criterion_group, criterion_main, Criterion};
use differ::{align_epochs, subtract_cube, ReferenceCorrection};
use ndarray::Array3;

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

fn dates(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("2018{:02}{:02}", 1 + i / 28, 1 + i % 28)).collect()
}

fn timeseries_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("Time-series Difference");

    let (num_date, rows, cols) = (60, 300, 300);
    let date_list = dates(num_date);
    let alignment = align_epochs(&date_list[..], &date_list[..], false).unwrap();
    let primary = Array3::from_shape_fn((num_date, rows, cols), |(d, r, c)| {
        if (r + c) % 17 == 0 {
            0.0
        } else {
            (d * r) as f64 * 1e-3
        }
    });
    let secondary = Array3::from_shape_fn((num_date, rows, cols), |(d, _, c)| (d + c) as f64 * 1e-4);
    let correction = ReferenceCorrection {
        date: Some(date_list[num_date / 2].clone()),
        pixel: Some((rows / 2, cols / 2)),
    };

    group.bench_with_input(
        "re-referenced",
        &(primary, secondary, alignment, correction),
        |b, (p, s, a, r)| b.iter(|| subtract_cube(p.clone(), s.clone(), a, r).unwrap()),
    );
}

criterion_group!(benches, timeseries_diff);
criterion_main!(benches);
