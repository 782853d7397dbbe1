//! Frequency Analysis CLI Tool
//!
//! Guesses a monoalphabetic substitution key by ranking ciphertext letters
//! against the English frequency order, then compares the guess with a known
//! key.
//!
//! Usage:
//!   freq-analysis [--text <ciphertext>] [--key <pairs>] [--verbose]
//!
//! Examples:
//!   freq-analysis
//!   freq-analysis --text "wkh txlfn eurzq ira" --key "w=t,k=h,h=e"

use anyhow::{anyhow, Result};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use cipherlab::analysis::{
    compare_keys, decode_with_key, letter_frequency, substitution_guess, SubstitutionKey,
};
use cipherlab::LabConfig;

/// Ciphertext worked in the lab practical
const LAB_CIPHERTEXT: &str = "slaz tlla avupnoa ha aol whyr";

/// Key that decrypts [`LAB_CIPHERTEXT`]
const LAB_KEY: [(char, char); 14] = [
    ('s', 'l'),
    ('l', 'e'),
    ('a', 't'),
    ('z', 's'),
    ('t', 'm'),
    ('v', 'o'),
    ('u', 'n'),
    ('p', 'i'),
    ('n', 'g'),
    ('o', 'h'),
    ('h', 'a'),
    ('w', 'p'),
    ('y', 'r'),
    ('r', 'k'),
];

/// CLI arguments
struct Args {
    /// Ciphertext to analyse
    text: String,
    /// Known correct key, if any
    key: Option<SubstitutionKey>,
    /// Verbose output
    verbose: bool,
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = std::env::args().collect();

    let mut text: Option<String> = None;
    let mut key: Option<SubstitutionKey> = None;
    let mut verbose = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--text" | "-t" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --text".to_string());
                }
                text = Some(args[i].to_lowercase());
            }
            "--key" | "-k" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --key".to_string());
                }
                key = Some(parse_key(&args[i])?);
            }
            "--verbose" | "-v" => {
                verbose = true;
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            arg => {
                return Err(format!("Unknown argument: {}", arg));
            }
        }
        i += 1;
    }

    // The lab key only fits the lab ciphertext
    let (text, key) = match text {
        Some(text) => (text, key),
        None => (
            LAB_CIPHERTEXT.to_string(),
            key.or_else(|| Some(LAB_KEY.into_iter().collect())),
        ),
    };

    Ok(Args { text, key, verbose })
}

/// Parse `"a=b,c=d"` into a substitution key
fn parse_key(value: &str) -> Result<SubstitutionKey, String> {
    value
        .split(',')
        .map(|pair| {
            let mut chars = pair.trim().chars();
            match (chars.next(), chars.next(), chars.next(), chars.next()) {
                (Some(from), Some('='), Some(to), None) => {
                    Ok((from.to_ascii_lowercase(), to.to_ascii_lowercase()))
                }
                _ => Err(format!("Invalid key pair '{}', expected x=y", pair.trim())),
            }
        })
        .collect()
}

fn print_help() {
    println!(
        r#"
Frequency Analysis Tool - Cipherlab

Ranks ciphertext letters by frequency, maps them onto the English
frequency order and shows how far that guess is from the real key.

USAGE:
    freq-analysis [OPTIONS]

OPTIONS:
    -t, --text <TEXT>      Ciphertext to analyse (default: the lab ciphertext)
    -k, --key <PAIRS>      Correct key as cipher=plain pairs, e.g. "s=l,l=e"
    -v, --verbose          Enable verbose output
    -h, --help             Print this help message
"#
    );
}

fn spaced(letters: impl IntoIterator<Item = char>) -> String {
    letters
        .into_iter()
        .map(String::from)
        .collect::<Vec<_>>()
        .join(" ")
}

fn run_analysis(args: &Args, config: &LabConfig) {
    let english_order = &config.analysis.english_order;

    let ranked = letter_frequency(&args.text);
    debug!(distinct = ranked.len(), "Ranked ciphertext letters");
    let guess = substitution_guess(&ranked, english_order);

    println!("Cipher Letter Frequency (most to least):");
    println!("{}", spaced(ranked.iter().copied()));

    println!("\nStandard English Letter Frequency Order:");
    println!("{}", spaced(english_order.chars().take(ranked.len())));

    println!("\nInitial Substitution Key (frequency-based guess):");
    for c in &ranked {
        if let Some(plain) = guess.get(c) {
            println!("{} → {}", c, plain);
        }
    }

    println!("\nDecoded Text Using Frequency-Based Guess:");
    println!("{}", decode_with_key(&args.text, &guess));

    let Some(correct) = &args.key else {
        return;
    };

    println!("\nCorrect Substitution Key:");
    for (c, plain) in correct {
        println!("{} → {}", c, plain);
    }

    let diff = compare_keys(&guess, correct);
    info!(
        wrong = diff.len(),
        total = correct.len(),
        "Frequency guess compared with the correct key"
    );
    println!("\nLetters the Guess Got Wrong (guessed, correct):");
    for (c, (guessed, right)) in &diff {
        println!("{}: {} vs {}", c, guessed, right);
    }

    println!("\nDecoded Text Using Correct Key:");
    println!("{}", decode_with_key(&args.text, correct));
}

fn main() -> Result<()> {
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    };

    let config = LabConfig::load()?;

    let log_level = if args.verbose || config.debug {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("Failed to set subscriber: {}", e))?;

    run_analysis(&args, &config);
    Ok(())
}
