use std::f64::consts::PI;
use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::{Context, Result};

const SAMPLE_RATE_HZ: f64 = 100.0;
const SAMPLES: usize = 2048;
const PULSE_HZ: f64 = 1.2;

/// One PPG reading: infrared and red photodiode counts.
fn ppg_sample(t: f64, rng: &mut SimpleRng) -> (i64, i64) {
    let phase = 2.0 * PI * PULSE_HZ * t;
    // Systolic peak plus a weaker dicrotic harmonic.
    let pulse = phase.sin() + 0.35 * (2.0 * phase + 0.8).sin();
    // Respiration-driven baseline wander.
    let drift = (2.0 * PI * 0.25 * t).sin();

    let ir = 52_000.0 + 900.0 * pulse + 400.0 * drift + rng.gauss(0.0, 40.0);
    let red = 31_000.0 + 450.0 * pulse + 250.0 * drift + rng.gauss(0.0, 30.0);
    (ir.round() as i64, red.round() as i64)
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() -> Result<()> {
    let output_path = std::env::args().nth(1).unwrap_or_else(|| "log.txt".to_string());
    let mut rng = SimpleRng::new(42);

    let file = File::create(&output_path)
        .with_context(|| format!("creating {output_path}"))?;
    let mut out = BufWriter::new(file);

    let mut blank_lines = 0;
    for i in 0..SAMPLES {
        let (ir, red) = ppg_sample(i as f64 / SAMPLE_RATE_HZ, &mut rng);
        writeln!(out, "{ir} {red}")?;
        // The sensor logger occasionally flushes an empty line.
        if rng.next_f64() < 0.01 {
            writeln!(out)?;
            blank_lines += 1;
        }
    }
    out.flush().with_context(|| format!("writing {output_path}"))?;

    println!(
        "Wrote {SAMPLES} samples ({PULSE_HZ} Hz pulse at {SAMPLE_RATE_HZ} Hz, {blank_lines} blank lines) to {output_path}"
    );
    Ok(())
}
