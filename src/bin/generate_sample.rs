use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
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
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Write a whitespace table with a noisy peak, its baseline, and a final
/// `inf` sentinel row.
fn main() -> Result<()> {
    env_logger::init();

    let output_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_data.txt"));

    let mut rng = SimpleRng::new(42);
    let mut text = String::from("t signal baseline\n");

    let n = 60;
    for i in 0..n {
        let t = i as f64 * 0.5;
        let baseline = 0.2 + 0.01 * t;
        let signal = baseline + gaussian(t, 15.0, 3.0, 2.5) + rng.gauss(0.0, 0.05);
        writeln!(text, "{t:.3} {signal:.6} {baseline:.6}")?;
    }
    writeln!(text, "{:.3} inf {:.6}", n as f64 * 0.5, 0.2 + 0.01 * n as f64 * 0.5)?;

    std::fs::write(&output_path, text)
        .with_context(|| format!("writing {}", output_path.display()))?;

    println!("Wrote {} rows to {}", n + 1, output_path.display());
    Ok(())
}
