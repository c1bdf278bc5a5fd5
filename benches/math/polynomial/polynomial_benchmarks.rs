use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use polyarith::{add, divide, multiply, Polynomial, Term};

/// Dense-ish polynomial of the given degree with small random coefficients.
fn random_poly(rng: &mut ChaCha8Rng, degree: u32) -> Polynomial {
    (0..=degree)
        .map(|e| Term::new(rng.gen_range(-50..=50), e))
        .chain(std::iter::once(Term::new(1, degree + 1)))
        .collect()
}

fn bench_multiply(c: &mut Criterion) {
    let mut group = c.benchmark_group("poly_multiply");
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for degree in [8u32, 32, 128] {
        let a = random_poly(&mut rng, degree);
        let b = random_poly(&mut rng, degree);

        group.bench_with_input(BenchmarkId::from_parameter(degree), &degree, |bench, _| {
            bench.iter(|| multiply(black_box(&a), black_box(&b)))
        });
    }

    group.finish();
}

fn bench_divide(c: &mut Criterion) {
    let mut group = c.benchmark_group("poly_divide");
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for degree in [8u32, 32, 128] {
        // Monic divisor keeps every step exact.
        let divisor = random_poly(&mut rng, degree / 2);
        let quotient = random_poly(&mut rng, degree / 2);
        let dividend = add(&multiply(&divisor, &quotient), &Polynomial::constant(3));

        group.bench_with_input(BenchmarkId::from_parameter(degree), &degree, |bench, _| {
            bench.iter(|| divide(black_box(&dividend), black_box(&divisor)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_multiply, bench_divide);
criterion_main!(benches);
