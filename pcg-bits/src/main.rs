//! pcg-bits: command line front end for the generators and samplers.
//!
//! Usage:
//!   pcg-bits scalar --seed 42 --count 4
//!   pcg-bits vector --seeds 10,20,30,40
//!   pcg-bits bias -n 1 -m 8 --count 2
//!   pcg-bits debias --bits 4096 -n 32 -m 8
//!
//! A seed of 0 requests hardware seeding. Set `RUST_LOG=debug` to see how generators are seeded.

use anyhow::{Context, Result, ensure};
use clap::{Args, Parser, Subcommand};
use log::info;
use pcg_bits::{
    BitRng, Pcg32x4, Pcg64, autocorrelation, bias, debias, utils::bits::words_for,
};

/// PCG generators and bit-level samplers
#[derive(Parser)]
#[command(name = "pcg-bits")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command drawing from the scalar generator.
#[derive(Args)]
struct Draw {
    /// Generator seed; 0 seeds from the hardware entropy instruction
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Number of values to print
    #[arg(short, long, default_value_t = 1)]
    count: usize,
}

/// Bernoulli probability given as `n / 2^m`.
#[derive(Args)]
struct Probability {
    /// Numerator of the probability
    #[arg(short, default_value_t = 1)]
    n: u64,

    /// Base 2 exponent of the denominator
    #[arg(short, default_value_t = 1)]
    m: u32,
}

#[derive(Subcommand)]
enum Commands {
    /// Print raw words of the 64-bit generator
    Scalar {
        #[command(flatten)]
        draw: Draw,
    },

    /// Print 256-bit blocks of the four-stream generator
    Vector {
        /// One seed per lane; any 0 seeds every lane from hardware
        #[arg(long, value_delimiter = ',', default_values_t = [10, 20, 30, 40])]
        seeds: Vec<u64>,

        /// Number of blocks to print
        #[arg(short, long, default_value_t = 1)]
        count: usize,
    },

    /// Print words whose bits are independent trials with probability n / 2^m
    Bias {
        #[command(flatten)]
        probability: Probability,

        #[command(flatten)]
        draw: Draw,
    },

    /// Print success counts of repeated Bernoulli trials
    Binomial {
        /// Number of trials per count
        #[arg(short, long)]
        trials: u64,

        #[command(flatten)]
        probability: Probability,

        #[command(flatten)]
        draw: Draw,
    },

    /// Print integers drawn uniformly from [min, max]
    Range {
        #[arg(long)]
        min: u64,

        #[arg(long)]
        max: u64,

        #[command(flatten)]
        draw: Draw,
    },

    /// Debias a stream of biased bits and report the balance of the output
    Debias {
        /// Length of the biased source stream in bits
        #[arg(long, default_value_t = 4096)]
        bits: u64,

        #[command(flatten)]
        probability: Probability,

        /// Generator seed; 0 seeds from the hardware entropy instruction
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
    },

    /// Compute the cyclic autocorrelation of a generated stream
    Autocorr {
        /// Length of the stream in bits
        #[arg(long, default_value_t = 1 << 16)]
        bits: u64,

        /// Lag between compared bits
        #[arg(short, long, default_value_t = 1)]
        lag: u64,

        #[command(flatten)]
        probability: Probability,

        /// Generator seed; 0 seeds from the hardware entropy instruction
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Commands::Scalar { draw } => {
            let mut rng = scalar(draw.seed)?;
            for _ in 0..draw.count {
                println!("{:#018x}", rng.next());
            }
        },
        Commands::Vector { seeds, count } => {
            let seeds: [u64; pcg_bits::LANES] =
                seeds.try_into().map_err(|_| anyhow::anyhow!("expected one seed per lane"))?;
            let mut rng = Pcg32x4::init(seeds).context("failed to seed vector generator")?;
            info!("four-stream kernel: {}", rng.kernel().name());
            for _ in 0..count {
                let block = rng.next();
                println!(
                    "{:#018x} {:#018x} {:#018x} {:#018x}",
                    block[0], block[1], block[2], block[3]
                );
            }
        },
        Commands::Bias { probability, draw } => {
            probability.validate()?;
            let mut rng = scalar(draw.seed)?;
            for _ in 0..draw.count {
                println!("{:#066b}", rng.bias(probability.n, probability.m));
            }
        },
        Commands::Binomial { trials, probability, draw } => {
            probability.validate()?;
            ensure!(trials != 0, "at least one trial is required");
            let mut rng = scalar(draw.seed)?;
            for _ in 0..draw.count {
                println!("{}", rng.binomial(trials, probability.n, probability.m));
            }
        },
        Commands::Range { min, max, draw } => {
            ensure!(min < max, "min {min} must be below max {max}");
            let mut rng = scalar(draw.seed)?;
            for _ in 0..draw.count {
                println!("{}", rng.uniform_in_range(min, max));
            }
        },
        Commands::Debias { bits, probability, seed } => {
            probability.validate()?;
            ensure!(bits != 0 && bits % 2 == 0, "source length must be even and non-zero");

            let mut rng = scalar(seed)?;
            let src = biased_stream(&mut rng, bits, &probability);
            let mut dest = vec![0u64; src.len()];
            let transfer = debias(&src, &mut dest, bits, bits / 2);

            let ones: u32 = dest.iter().map(|word| word.count_ones()).sum();
            println!("used:   {}", transfer.used);
            println!("filled: {}", transfer.filled);
            if transfer.filled != 0 {
                println!("ones:   {:.4}", f64::from(ones) / transfer.filled as f64);
            }
        },
        Commands::Autocorr { bits, lag, probability, seed } => {
            probability.validate()?;
            ensure!(lag < bits, "lag {lag} must be below the stream length {bits}");

            let mut rng = scalar(seed)?;
            let src = biased_stream(&mut rng, bits, &probability);
            match autocorrelation(&src, bits, lag) {
                Some(coefficient) => println!("{coefficient:.6}"),
                None => println!("undefined: every bit has the same value"),
            }
        },
    }

    Ok(())
}

impl Probability {
    fn validate(&self) -> Result<()> {
        ensure!(self.n != 0, "probability numerator must be non-zero");
        ensure!((1..=64).contains(&self.m), "exponent must lie in 1..=64, got {}", self.m);
        ensure!(self.m == 64 || self.n >> self.m == 0, "{} / 2^{} is not below 1", self.n, self.m);
        Ok(())
    }
}

fn scalar(seed: u64) -> Result<Pcg64> {
    Pcg64::init(seed).with_context(|| format!("failed to seed generator with {seed}"))
}

fn biased_stream(rng: &mut Pcg64, bits: u64, probability: &Probability) -> Vec<u64> {
    (0..words_for(bits)).map(|_| bias(rng, probability.n, probability.m)).collect()
}
