//! grammarkey CLI: offline access to key generation, entropy, sealing and
//! derivation-tree rendering.
//!
//! Usage:
//!   grammarkey modes
//!   grammarkey generate --mode alphanumeric --mode symbolic [--length 16] [--steps]
//!   grammarkey entropy <TEXT>
//!   grammarkey encrypt --key <KEY> [TEXT]            (reads stdin when TEXT is omitted)
//!   grammarkey decrypt --key <KEY> --nonce <B64> [CIPHERTEXT]
//!   grammarkey tree --mode numeric [--length 8] [--output tree.svg]

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};

use grammarkey::{
    catalog, decrypt_text, encrypt_text, parse_modes, visualize, EntropyReport, Generator,
    KdfParams, SealedText, DEFAULT_ITERATIONS,
};

#[derive(Parser)]
#[command(name = "grammarkey", version, about = "Grammar-derived keys, entropy and AES-256-GCM sealing")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the available grammar modes
    Modes,
    /// Derive a key from the grammar
    Generate {
        #[command(flatten)]
        spec: KeySpec,
        /// Print every derivation step
        #[arg(long)]
        steps: bool,
    },
    /// Shannon entropy of a string
    Entropy { text: String },
    /// Seal text with a passphrase-derived AES-256-GCM key
    Encrypt {
        #[arg(long, short)]
        key: String,
        #[command(flatten)]
        kdf: KdfArgs,
        text: Option<String>,
    },
    /// Open text sealed by `encrypt`
    Decrypt {
        #[arg(long, short)]
        key: String,
        #[arg(long, short)]
        nonce: String,
        #[command(flatten)]
        kdf: KdfArgs,
        encrypted: Option<String>,
    },
    /// Derive a key and render its derivation tree as SVG
    Tree {
        #[command(flatten)]
        spec: KeySpec,
        /// Write the SVG here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct KeySpec {
    /// Grammar mode; repeat for a union of alphabets
    #[arg(long = "mode", short, required = true)]
    modes: Vec<String>,
    /// Exact key length (grammar picks 8, 10, 12 or 16 when omitted)
    #[arg(long, short)]
    length: Option<usize>,
}

#[derive(Args)]
struct KdfArgs {
    /// PBKDF2 iteration count
    #[arg(long, env = "GRAMMARKEY_KDF_ITERATIONS", default_value_t = DEFAULT_ITERATIONS)]
    iterations: u32,
}

impl KdfArgs {
    fn params(&self) -> Result<KdfParams> {
        if self.iterations == 0 {
            bail!("iterations must be at least 1");
        }
        Ok(KdfParams::with_iterations(self.iterations))
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "grammarkey=warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Modes => {
            for m in catalog() {
                println!("{:<14} {:<14} {}", m.id, m.name, m.description);
            }
        }
        Command::Generate { spec, steps } => {
            let derivation = derive(&spec)?;
            if steps {
                for s in &derivation.parse_steps {
                    eprintln!("step {:>2}: {}", s.step, s.rule_applied);
                    eprintln!("         {}", s.symbols.join(" "));
                }
            }
            let report = EntropyReport::measure(&derivation.key);
            println!("{}", derivation.key);
            eprintln!(
                "entropy: {:.4} / {:.1} bits ({})",
                report.entropy,
                report.max_entropy,
                report.color.as_str()
            );
        }
        Command::Entropy { text } => {
            let report = EntropyReport::measure(&text);
            println!("{:.4} {}", report.entropy, report.color.as_str());
        }
        Command::Encrypt { key, kdf, text } => {
            let plaintext = text_or_stdin(text)?;
            let sealed = encrypt_text(&plaintext, &key, kdf.params()?)
                .context("encryption failed")?;
            println!("encrypted: {}", sealed.encrypted);
            println!("nonce:     {}", sealed.nonce);
        }
        Command::Decrypt { key, nonce, kdf, encrypted } => {
            let encrypted = text_or_stdin(encrypted)?;
            let sealed = SealedText { encrypted: encrypted.trim().to_string(), nonce };
            let plaintext = decrypt_text(&sealed, &key, kdf.params()?)
                .context("decryption failed (wrong key, corrupted ciphertext or nonce)")?;
            println!("{}", plaintext);
        }
        Command::Tree { spec, output } => {
            let derivation = derive(&spec)?;
            let view = visualize(&derivation.parse_steps)?;
            match output {
                Some(path) => {
                    fs::write(&path, &view.svg)
                        .with_context(|| format!("write {}", path.display()))?;
                    eprintln!("key:  {}", derivation.key);
                    eprintln!("tree: {} ({})", path.display(), view.view_box);
                }
                None => print!("{}", view.svg),
            }
        }
    }
    Ok(())
}

fn derive(spec: &KeySpec) -> Result<grammarkey::Derivation> {
    let modes = parse_modes(&spec.modes)?;
    Ok(Generator::new(&modes).generate(spec.length)?)
}

fn text_or_stdin(arg: Option<String>) -> Result<String> {
    match arg {
        Some(t) => Ok(t),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("read stdin")?;
            Ok(buf.trim_end_matches(['\r', '\n']).to_string())
        }
    }
}
