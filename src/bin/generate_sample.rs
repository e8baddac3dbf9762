//! Writes a small demo CSV suitable for the backend's `/upload/` endpoint,
//! so the app can be exercised without an existing dataset.

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

fn main() -> anyhow::Result<()> {
    let mut rng = SimpleRng::new(42);

    let cities = ["Oslo", "Bergen", "Trondheim", "Stavanger"];

    let output_path = "sample_data.csv";
    let mut writer = csv::Writer::from_path(output_path)?;
    writer.write_record([
        "person_id",
        "age",
        "annual_income",
        "credit_score",
        "city",
    ])?;

    let rows = 200;
    for id in 0..rows {
        let age = (20.0 + rng.next_f64() * 45.0).floor();
        // income loosely tracks age, with noise
        let income = rng.gauss(18_000.0 + age * 900.0, 6_000.0).max(8_000.0);
        let score = rng.gauss(650.0, 80.0).clamp(300.0, 850.0);
        let city = cities[(rng.next_u64() % cities.len() as u64) as usize];

        writer.write_record([
            id.to_string(),
            format!("{age:.0}"),
            format!("{income:.2}"),
            format!("{score:.0}"),
            city.to_string(),
        ])?;
    }
    writer.flush()?;

    println!("Wrote {rows} rows to {output_path}");
    Ok(())
}
