//! Writes a synthetic salary dataset in the shape the dashboard expects.
//!
//! Usage: `generate_sample [OUTPUT_CSV] [ROWS]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "generate_sample", about = "Write a synthetic salary CSV")]
struct Cli {
    /// Destination CSV file
    #[arg(default_value = "data/salary_dataset.csv")]
    output: PathBuf,

    /// Number of records to generate
    #[arg(default_value_t = 400)]
    rows: usize,
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
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
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

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Log-normal draw, which is roughly how salaries spread.
    fn log_normal(&mut self, median: f64, sigma: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        median * (sigma * z).exp()
    }
}

const COMPANIES: &[&str] = &[
    "Mu Sigma", "IBM", "Tata Consultancy Services", "Impact Analytics", "Accenture",
    "Infosys", "Capgemini", "Cognizant Technology Solutions", "Google", "Amazon",
];

const LEVELS: &[(&str, f64)] = &[
    ("Junior ", 0.6),
    ("", 1.0),
    ("Senior ", 1.7),
    ("Lead ", 2.2),
];

const ROLES: &[&str] = &[
    "Data Scientist", "Data Analyst", "Data Engineer", "Machine Learning Engineer",
    "Software Engineer", "Android Developer", "Product Manager", "Business Analyst",
];

const LOCATIONS: &[&str] = &["Bangalore", "Pune", "Hyderabad", "New Delhi", "Mumbai", "Chennai"];

/// Indian digit grouping: 648573 → "6,48,573".
fn indian_grouping(n: u64) -> String {
    let digits = n.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (h, t) = rest.split_at(rest.len() - 2);
        groups.push(t);
        rest = h;
    }
    groups.push(rest);
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}

/// Salary text in one of the encodings found in the source dataset.
fn salary_text(annual: f64, rng: &mut SimpleRng) -> String {
    let roll = rng.next_f64();
    if roll < 0.8 {
        format!("₹{}/yr", indian_grouping(annual.round() as u64))
    } else if roll < 0.9 {
        format!("₹{}/mo", indian_grouping((annual / 12.0).round() as u64))
    } else {
        format!("₹{}k", (annual / 1000.0).round() as u64)
    }
}

fn main() -> Result<()> {
    let Cli { output, rows } = Cli::parse();

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&output).with_context(|| format!("creating {}", output.display()))?;
    writer.write_record(["Rating", "Company Name", "Job Title", "Salary", "Salaries Reported", "Location"])?;

    for _ in 0..rows {
        let (prefix, factor) = LEVELS[(rng.next_u64() % LEVELS.len() as u64) as usize];
        let role = rng.pick(ROLES);
        let annual = rng.log_normal(800_000.0 * factor, 0.35);

        // A few missing ratings exercise the mean fill.
        let rating = if rng.next_f64() < 0.05 {
            String::new()
        } else {
            format!("{:.1}", 3.0 + rng.next_f64() * 2.0)
        };
        let reported = 1 + rng.next_u64() % 12;

        writer.write_record([
            rating,
            rng.pick(COMPANIES).to_string(),
            format!("{prefix}{role}"),
            salary_text(annual, &mut rng),
            reported.to_string(),
            rng.pick(LOCATIONS).to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {rows} salary records to {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_default_and_validate() {
        let cli = Cli::try_parse_from(["generate_sample"]).unwrap();
        assert_eq!(cli.output, PathBuf::from("data/salary_dataset.csv"));
        assert_eq!(cli.rows, 400);

        let cli = Cli::try_parse_from(["generate_sample", "out.csv", "25"]).unwrap();
        assert_eq!(cli.output, PathBuf::from("out.csv"));
        assert_eq!(cli.rows, 25);

        assert!(Cli::try_parse_from(["generate_sample", "out.csv", "many"]).is_err());
    }

    #[test]
    fn groups_digits_indian_style() {
        assert_eq!(indian_grouping(573), "573");
        assert_eq!(indian_grouping(48_573), "48,573");
        assert_eq!(indian_grouping(648_573), "6,48,573");
        assert_eq!(indian_grouping(12_345_678), "1,23,45,678");
    }
}
