//! Benchmark for composing two fallible asynchronous steps.
//!
//! Compares three ways of running "step 1, then step 2, then add the
//! results" with short-circuiting on the first failure:
//!
//! 1. **chain**: `TryFutureExt::and_then` continuations
//! 2. **drive_steps**: the drive loop over a boxed [`StepsBuilder`] handle
//! 3. **drive_from_fn**: the drive loop over an unboxed closure handle
//!
//! Each is measured in three scenarios: no failure (10 + 11), a failure in
//! step one, and a failure in step two.
//!
//! Set `RUST_LOG=safe_error=trace` to see the drive loop's events; the
//! default filter keeps logging out of the measurements.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use futures::TryFutureExt;
use futures::future::{Ready, ready};
use safe_error::{Fallible, Resume, Step, StepsBuilder, drive, failure, from_fn};
use std::hint::black_box;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type Outcome = Fallible<i32, &'static str>;

#[derive(Debug, Clone, Copy)]
enum Scenario {
    NoFailure,
    FirstFails,
    SecondFails,
}

impl Scenario {
    const ALL: [Self; 3] = [Self::NoFailure, Self::FirstFails, Self::SecondFails];

    const fn name(self) -> &'static str {
        match self {
            Self::NoFailure => "no_failure",
            Self::FirstFails => "first_fails",
            Self::SecondFails => "second_fails",
        }
    }

    fn first(self) -> Outcome {
        match self {
            Self::FirstFails => Err(failure("F")),
            Self::NoFailure | Self::SecondFails => Ok(10),
        }
    }

    fn second(self) -> Outcome {
        match self {
            Self::SecondFails => Err(failure("F")),
            Self::NoFailure | Self::FirstFails => Ok(11),
        }
    }
}

async fn first_step(scenario: Scenario) -> Outcome {
    scenario.first()
}

async fn second_step(scenario: Scenario) -> Outcome {
    scenario.second()
}

async fn run_chain(scenario: Scenario) -> Outcome {
    first_step(scenario)
        .and_then(|first| second_step(scenario).map_ok(move |second| first + second))
        .await
}

async fn run_steps(scenario: Scenario) -> Outcome {
    let handle = StepsBuilder::new()
        .step(move |_| first_step(scenario))
        .step(move |_| second_step(scenario))
        .finish(|values| Ok(values.iter().sum()));
    drive(handle).await
}

async fn run_from_fn(scenario: Scenario) -> Outcome {
    let mut total = 0;
    let mut remaining = vec![scenario.second(), scenario.first()];
    let handle = from_fn(move |input: Resume<i32>| -> Step<Ready<Outcome>, Outcome> {
        total += input.resolved().unwrap_or(0);
        match remaining.pop() {
            Some(pending) => Step::Await(ready(pending)),
            None => Step::Done(Ok(total)),
        }
    });
    drive(handle).await
}

fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

// =============================================================================
// Flow Benchmarks
// =============================================================================

fn benchmark_flow(criterion: &mut Criterion) {
    init_tracing();
    let runtime = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    let mut group = criterion.benchmark_group("flow");

    for scenario in Scenario::ALL {
        group.bench_with_input(
            BenchmarkId::new("chain", scenario.name()),
            &scenario,
            |bencher, &scenario| {
                bencher
                    .to_async(&runtime)
                    .iter(|| async move { black_box(run_chain(black_box(scenario)).await) });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("drive_steps", scenario.name()),
            &scenario,
            |bencher, &scenario| {
                bencher
                    .to_async(&runtime)
                    .iter(|| async move { black_box(run_steps(black_box(scenario)).await) });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("drive_from_fn", scenario.name()),
            &scenario,
            |bencher, &scenario| {
                bencher
                    .to_async(&runtime)
                    .iter(|| async move { black_box(run_from_fn(black_box(scenario)).await) });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_flow);
criterion_main!(benches);
