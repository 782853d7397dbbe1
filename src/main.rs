//! Cipherlab
//!
//! Interactive menu for the security lab practicals: pick a classical cipher,
//! enter a message and a key, and see the result. Option 12 runs the RSA
//! demonstration with its re-prompt loop.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use num_bigint::BigUint;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use cipherlab::cipher::{self, CipherKind, Direction, Key, KeyShape};
use cipherlab::config::LabConfig;
use cipherlab::crypto::rsa::{self, EncodedMessage, RsaKeyMaterial, RsaSession};
use cipherlab::crypto::HillKey;
use cipherlab::{LabError, RsaError, VERSION};

const RSA_CHOICE: &str = "12";

fn main() -> Result<()> {
    let config = LabConfig::load()?;
    init_logging(config.debug);

    info!("Cipherlab v{}", VERSION);
    if config.loaded_from_file {
        info!(
            "Configuration loaded from: {}",
            config.config_path.display()
        );
    } else {
        warn!(
            "Config file not found at {}, using defaults",
            config.config_path.display()
        );
    }

    let hill_key = config.hill()?;
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock());

    loop {
        print_menu();
        let Some(choice) = prompter.ask("Enter choice: ")? else {
            break;
        };
        let choice = choice.trim();

        if choice == "0" {
            break;
        }
        if choice == RSA_CHOICE {
            match run_rsa(&config, &mut prompter) {
                Ok(()) => {}
                Err(LabError::Rsa(e)) => println!("RSA demo aborted: {}", e),
                Err(e) => return Err(e.into()),
            }
            continue;
        }

        let Some(kind) = choice.parse::<u8>().ok().and_then(CipherKind::from_menu) else {
            println!("Invalid choice: {}", choice);
            continue;
        };

        match run_cipher(kind, &hill_key, &mut prompter) {
            Ok(Some(output)) => println!("{}", output),
            Ok(None) => break,
            Err(LabError::Cipher(e)) => println!("Error: {}", e),
            Err(e) => return Err(e.into()),
        }
    }

    info!("Goodbye!");
    Ok(())
}

/// Initialize the logging/tracing system
fn init_logging(debug: bool) {
    let default_filter = if debug {
        "info,cipherlab=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(io::stderr)
        .init();
}

fn print_menu() {
    println!("\n--- SECURITY LAB PRACTICALS ---");
    for kind in CipherKind::ALL {
        println!("{}. {} Cipher", kind.menu_number(), kind.name());
    }
    println!("{}. RSA Demo", RSA_CHOICE);
    println!("0. Exit");
}

/// Line-oriented prompts over any buffered reader
struct Prompter<R> {
    reader: R,
}

impl<R: BufRead> Prompter<R> {
    fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Print a prompt and read one line; `None` at end of input
    fn ask(&mut self, prompt: &str) -> cipherlab::Result<Option<String>> {
        print!("{}", prompt);
        io::stdout().flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Like [`Prompter::ask`] but end of input is an error
    fn require(&mut self, prompt: &str) -> cipherlab::Result<String> {
        self.ask(prompt)?
            .ok_or_else(|| io::Error::from(io::ErrorKind::UnexpectedEof).into())
    }

    /// Ask until the answer parses
    fn parse<T: std::str::FromStr>(&mut self, prompt: &str) -> cipherlab::Result<T> {
        loop {
            let answer = self.require(prompt)?;
            match answer.trim().parse() {
                Ok(value) => return Ok(value),
                Err(_) => println!("Not a valid number: {:?}", answer.trim()),
            }
        }
    }

    /// Ask for a decimal big integer; a blank answer takes `default` if given
    fn number(&mut self, prompt: &str, default: Option<u64>) -> cipherlab::Result<BigUint> {
        loop {
            let answer = self.require(prompt)?;
            if answer.trim().is_empty() {
                if let Some(value) = default {
                    return Ok(BigUint::from(value));
                }
            }
            match rsa::parse_decimal(&answer) {
                Ok(value) => return Ok(value),
                Err(e) => println!("{}", e),
            }
        }
    }
}

/// Run one classical cipher. Returns `None` when input ended mid-way.
fn run_cipher<R: BufRead>(
    kind: CipherKind,
    hill_key: &HillKey,
    prompter: &mut Prompter<R>,
) -> cipherlab::Result<Option<String>> {
    let Some(message) = prompter.ask("Enter message: ")? else {
        return Ok(None);
    };

    let direction = match prompter.require("Encrypt or decrypt? [E/d]: ")?.trim() {
        "d" | "D" => Direction::Decrypt,
        _ => Direction::Encrypt,
    };

    let key = match kind.key_shape() {
        KeyShape::Integer if kind == CipherKind::Multiplicative => {
            Key::Integer(prompter.parse("Enter Multiplier Key (coprime to 26): ")?)
        }
        KeyShape::Integer => Key::Integer(prompter.parse("Enter Shift Key (int): ")?),
        KeyShape::Pair => {
            let a = prompter.parse("Enter Key A (Multiplicative part): ")?;
            let b = prompter.parse("Enter Key B (Additive part): ")?;
            Key::Pair(a, b)
        }
        KeyShape::Keyword if kind == CipherKind::Columnar => {
            Key::Keyword(prompter.require("Enter Keyword (e.g., HACK): ")?)
        }
        KeyShape::Keyword => Key::Keyword(prompter.require("Enter Keyword: ")?),
        KeyShape::Depth => Key::Depth(prompter.parse("Enter Depth (Rails): ")?),
        KeyShape::Matrix => {
            println!("Using 2x2 Key Matrix {:?}", hill_key.matrix());
            Key::Matrix(*hill_key)
        }
    };

    let output = cipher::apply(kind, &key, &message, direction)?;
    let label = match direction {
        Direction::Encrypt => "Encrypted",
        Direction::Decrypt => "Decrypted",
    };
    Ok(Some(format!("{}: {}", label, output)))
}

/// Ask for a public exponent until `gcd(e, phi) = 1`
fn derive_key<R: BufRead>(
    config: &LabConfig,
    prompter: &mut Prompter<R>,
    p: &BigUint,
    q: &BigUint,
    mut e: BigUint,
) -> cipherlab::Result<RsaKeyMaterial> {
    let mut attempts = 1;
    loop {
        match RsaKeyMaterial::derive(p.clone(), q.clone(), e.clone()) {
            Ok(key) => return Ok(key),
            Err(RsaError::NoModularInverse { phi, gcd, .. })
                if attempts < config.rsa.max_attempts =>
            {
                println!(
                    "Public exponent e must be coprime with φ(n)={}. Current gcd(e, φ(n)) = {}.",
                    phi, gcd
                );
                e = prompter.number("Enter a different public exponent e: ", None)?;
                attempts += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn print_key(key: &RsaKeyMaterial) {
    println!(
        "\np={}, q={}, e={}, n={}, φ(n)={}, d={}",
        key.p(),
        key.q(),
        key.public_exponent(),
        key.modulus(),
        key.totient(),
        key.private_exponent()
    );
}

/// The RSA demonstration: derive, encode, encrypt, decrypt
fn run_rsa<R: BufRead>(config: &LabConfig, prompter: &mut Prompter<R>) -> cipherlab::Result<()> {
    println!("=== RSA Demo ===");
    let default_e = Some(config.rsa.default_public_exponent);

    let p = prompter.number("Enter prime p: ", None)?;
    let q = prompter.number("Enter prime q: ", None)?;
    let e = prompter.number(
        &format!(
            "Enter public exponent e [{}]: ",
            config.rsa.default_public_exponent
        ),
        default_e,
    )?;

    let key = derive_key(config, prompter, &p, &q, e)?;
    print_key(&key);

    let plaintext = prompter.require("\nEnter plaintext: ")?;
    let message = EncodedMessage::encode(&plaintext);
    debug!(mode = %message.mode(), "Selected encoding");

    let session = match RsaSession::new(key, message) {
        Ok(session) => session,
        Err(RsaError::MessageTooLarge { m, n }) => {
            println!(
                "\nEncoded message integer m={} must be smaller than n={}.",
                m, n
            );
            println!("Please choose larger primes (p, q) or shorter plaintext.");
            let session = retry_session(config, prompter, &plaintext)?;
            print_key(session.key());
            session
        }
        Err(e) => return Err(e.into()),
    };

    println!("\nPlaintext = {}", plaintext);
    println!(
        "Encoding mode = {}, encoded integer m = {}",
        session.message().mode(),
        session.message().value()
    );

    let result = session.round_trip();
    println!("\nCiphertext = {}", result.ciphertext);
    println!("Decrypted integer = {}", result.recovered);
    println!("Decrypted plaintext = {}", result.decoded);
    Ok(())
}

/// Ask for new `p`, `q`, `e` until the message fits and `e` is invertible
fn retry_session<R: BufRead>(
    config: &LabConfig,
    prompter: &mut Prompter<R>,
    plaintext: &str,
) -> cipherlab::Result<RsaSession> {
    let mut last_error = None;
    for _ in 0..config.rsa.max_attempts {
        let p = prompter.number("Enter prime p: ", None)?;
        let q = prompter.number("Enter prime q: ", None)?;
        let e = prompter.number("Enter public exponent e: ", None)?;

        match RsaSession::establish(p, q, e, plaintext) {
            Ok(session) => return Ok(session),
            Err(RsaError::MessageTooLarge { m, n }) => {
                println!("n={} still ≤ m={}. Pick larger primes.", n, m);
                last_error = Some(RsaError::MessageTooLarge { m, n });
            }
            Err(RsaError::NoModularInverse { e, phi, gcd }) => {
                println!("gcd(e, φ(n))={} ≠ 1. Pick a different e.", gcd);
                last_error = Some(RsaError::NoModularInverse { e, phi, gcd });
            }
            Err(e) => {
                println!("{}", e);
                last_error = Some(e);
            }
        }
    }
    Err(last_error
        .unwrap_or_else(|| RsaError::DegenerateInput("no attempts left".to_string()))
        .into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompter(input: &str) -> Prompter<&[u8]> {
        Prompter::new(input.as_bytes())
    }

    #[test]
    fn test_run_cipher_encrypt() {
        let mut input = prompter("ATTACK AT DAWN\ne\nLEMON\n");
        let output = run_cipher(CipherKind::Vigenere, &HillKey::default(), &mut input).unwrap();
        assert_eq!(output.as_deref(), Some("Encrypted: LXFOPVEFRNHR"));
    }

    #[test]
    fn test_run_cipher_decrypt_with_reprompt() {
        let mut input = prompter("Khoor\nd\nthree\n3\n");
        let output = run_cipher(CipherKind::Caesar, &HillKey::default(), &mut input).unwrap();
        assert_eq!(output.as_deref(), Some("Decrypted: Hello"));
    }

    #[test]
    fn test_run_cipher_reports_invalid_key() {
        let mut input = prompter("hello\n\n13\n");
        let result = run_cipher(CipherKind::Multiplicative, &HillKey::default(), &mut input);
        assert!(matches!(result, Err(LabError::Cipher(_))));
    }

    #[test]
    fn test_derive_key_reprompts_exponent() {
        let config = LabConfig::default();
        let mut input = prompter("17\n");
        let key = derive_key(
            &config,
            &mut input,
            &BigUint::from(61u32),
            &BigUint::from(53u32),
            BigUint::from(15u32),
        )
        .unwrap();
        assert_eq!(key.private_exponent(), &BigUint::from(2753u32));
    }

    #[test]
    fn test_retry_session_until_message_fits() {
        let config = LabConfig::default();
        let mut input = prompter("61\n53\n17\n1000003\n999983\n65537\n");
        let session = retry_session(&config, &mut input, "Hi!").unwrap();
        assert_eq!(session.round_trip().decoded, "Hi!");
    }

    #[test]
    fn test_retry_session_gives_up() {
        let mut config = LabConfig::default();
        config.rsa.max_attempts = 1;
        let mut input = prompter("61\n53\n17\n");
        let result = retry_session(&config, &mut input, "Hi!");
        assert!(matches!(
            result,
            Err(LabError::Rsa(RsaError::MessageTooLarge { .. }))
        ));
    }
}
