//! Reads whitespace separated tokens from stdin and prints a uniformly
//! random selection of `COUNT` of them, one per line.

use anyhow::Context;
use clap::Parser;
use log::{error, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ring_queues::RandomizedQueue;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::io::{self, Read, Write};

#[derive(Parser)]
#[clap(
    name = "permutation",
    version,
    author,
    about = "Prints a random selection of the tokens read from stdin"
)]
struct CliOptions {
    #[clap(help = "The number of tokens to print")]
    pub count: usize,

    #[clap(
        short,
        long,
        help = "Seed the random generator to make the output reproducible"
    )]
    pub seed: Option<u64>,

    #[clap(
        short,
        long,
        parse(from_occurrences),
        help = "Log more to stderr, may be repeated"
    )]
    pub verbose: u64,
}

fn main() {
    std::process::exit(match run() {
        Ok(()) => 0,
        Err(e) => {
            error!("{:?}", e);

            1
        }
    });
}

fn initialise_logging(verbose: u64) -> anyhow::Result<()> {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    // Stdout carries the selected tokens, so everything is logged to
    // stderr.
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context("failed to initialise logging")?;

    info!("Logging initialised successfully");
    Ok(())
}

fn run() -> anyhow::Result<()> {
    let options = CliOptions::parse();
    initialise_logging(options.verbose)?;

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read tokens from stdin")?;

    let rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    permute(&input, options.count, rng, &mut out)?;
    out.flush().context("failed to flush stdout")?;

    Ok(())
}

/// Enqueue every token of `input`, then dequeue `count` of them into
/// `out`, one per line, in the order they come out.
fn permute<R, W>(input: &str, count: usize, rng: R, out: &mut W) -> anyhow::Result<()>
where
    R: Rng,
    W: Write,
{
    let mut queue = RandomizedQueue::with_rng(rng);
    queue.extend(input.split_whitespace());

    let available = queue.len();
    info!("Read {} tokens, printing {}", available, count);

    for i in 0..count {
        let token = queue.dequeue().with_context(|| {
            format!(
                "can't print token {} of {}: only {} tokens were read",
                i + 1,
                count,
                available
            )
        })?;
        writeln!(out, "{}", token).context("failed to write token")?;
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn run_permute(input: &str, count: usize, seed: u64) -> anyhow::Result<Vec<String>> {
        let mut out = Vec::new();
        permute(input, count, StdRng::seed_from_u64(seed), &mut out)?;
        Ok(String::from_utf8(out)?
            .lines()
            .map(String::from)
            .collect())
    }

    #[test]
    fn prints_count_distinct_tokens() {
        let lines = run_permute("A B C D E F G H I", 3, 1).unwrap();

        assert_eq!(3, lines.len());
        for l in &lines {
            assert!("ABCDEFGHI".contains(l.as_str()));
        }

        let mut dedup = lines.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(3, dedup.len());
    }

    #[test]
    fn all_tokens_is_a_permutation() {
        let mut lines = run_permute("AA BB\nBB\tCC   DD", 5, 2).unwrap();
        lines.sort();

        assert_eq!(vec!["AA", "BB", "BB", "CC", "DD"], lines);
    }

    #[test]
    fn zero_prints_nothing() {
        assert!(run_permute("A B C", 0, 3).unwrap().is_empty());
        assert!(run_permute("", 0, 3).unwrap().is_empty());
    }

    #[test]
    fn same_seed_same_output() {
        assert_eq!(
            run_permute("a b c d e f g", 7, 42).unwrap(),
            run_permute("a b c d e f g", 7, 42).unwrap()
        );
    }

    #[test]
    fn asking_for_too_many_tokens_fails() {
        let e = run_permute("A B", 3, 4).unwrap_err();

        assert!(format!("{:#}", e).contains("only 2 tokens were read"));
    }

    #[test]
    fn options_parse() {
        let o = CliOptions::try_parse_from(vec!["permutation", "-vv", "--seed", "9", "3"]).unwrap();

        assert_eq!(3, o.count);
        assert_eq!(Some(9), o.seed);
        assert_eq!(2, o.verbose);

        assert!(CliOptions::try_parse_from(vec!["permutation", "three"]).is_err());
        assert!(CliOptions::try_parse_from(vec!["permutation", "-1"]).is_err());
    }
}
