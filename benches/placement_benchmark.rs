//! Benchmark for envelope extraction and marker placement
//!
//! Placement is rerun on every slider change in the host, so it should stay
//! well below a frame budget even for long tracks. Envelope extraction runs
//! once per track and is allowed to be slower.

use onset_cuts::{
    DurationBounds, PlacementConfig, SampleBuffer, burst_train, compute_onset_envelope,
    generate_markers, generate_markers_by_count,
};
use std::num::NonZeroU32;
use std::time::{Duration, Instant};

const SAMPLE_RATE: u32 = 44100;

/// Generate a 128 BPM burst train of the given length
fn generate_test_audio(duration_seconds: u64) -> SampleBuffer<f32> {
    let sample_rate = NonZeroU32::new(SAMPLE_RATE).unwrap();
    burst_train(
        128.0,
        Duration::from_millis(250),
        Duration::from_millis(80),
        Duration::from_secs(duration_seconds),
        sample_rate,
        0.8,
    )
}

/// Run `f` a number of times and print timing statistics in milliseconds
fn time_runs<F: FnMut()>(label: &str, num_runs: usize, mut f: F) -> f64 {
    // Warm up
    for _ in 0..3 {
        f();
    }

    let mut times = Vec::with_capacity(num_runs);
    for _ in 0..num_runs {
        let start = Instant::now();
        f();
        times.push(start.elapsed().as_secs_f64() * 1000.0);
    }

    times.sort_by(|a, b| a.total_cmp(b));
    let mean = times.iter().sum::<f64>() / times.len() as f64;
    let std_dev = (times.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / times.len() as f64).sqrt();
    let median = times[times.len() / 2];

    println!(
        "  {label}: {:.3}ms ± {:.3}ms (median: {:.3}ms, range: {:.3}-{:.3}ms)",
        mean,
        std_dev,
        median,
        times[0],
        times[times.len() - 1]
    );
    mean
}

fn benchmark_track(duration_seconds: u64) {
    let audio = generate_test_audio(duration_seconds);
    println!(
        "Benchmarking {}s track, {} samples",
        duration_seconds,
        audio.samples_per_channel()
    );

    time_runs("onset envelope", 5, || {
        let envelope = compute_onset_envelope(&audio);
        assert!(!envelope.is_empty());
    });

    let envelope = compute_onset_envelope(&audio);
    let total = audio.duration_seconds();

    let base = PlacementConfig::new(2.0, 4.0, 0.5);
    for sensitivity in [0.0, 0.5, 1.0] {
        let config = base.with_sensitivity(sensitivity);
        let mean = time_runs(&format!("placement (s = {sensitivity})"), 50, || {
            let markers = generate_markers(&envelope, &config, total).unwrap();
            assert!(!markers.is_empty());
        });
        if mean > 16.0 {
            println!("  ⚠️  placement slower than one frame at 60 fps");
        }
    }

    let target = (duration_seconds / 3) as usize;
    time_runs(&format!("count search (target {target})"), 20, || {
        let markers =
            generate_markers_by_count(&envelope, target, total, DurationBounds::new(2.0, 4.0))
                .unwrap();
        assert!(!markers.is_empty());
    });
    println!();
}

fn main() {
    println!("Onset cut placement benchmark\n");
    for duration in [30, 180, 600] {
        benchmark_track(duration);
    }
}
