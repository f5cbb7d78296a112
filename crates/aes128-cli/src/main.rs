//! Command-line interface for the AES-128 / CBC file tools.

#![forbid(unsafe_code)]

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use aes128_core::{
    block_from_slice, cbc_encrypt, encrypt_block, expand_key, pad, unpad, Aes128, Aes128Key, Block,
    Cbc, Iv, Padding, Step, BLOCK_SIZE,
};
use aes128_text::{decode_block, decode_blocks, encode_bytes, format_grid};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// AES-128 CLI.
#[derive(Parser)]
#[command(
    name = "aes128",
    version,
    author,
    about = "AES-128 single-block and CBC file encryption"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a random 16-byte key or IV as hex text.
    Keygen {
        /// Output path.
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
        /// Optional RNG seed for reproducible output.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the 11 round keys derived from a key file.
    Expand {
        /// Key file (16 hex bytes).
        #[arg(long, value_name = "FILE")]
        key: PathBuf,
    },
    /// Encrypt the first 16 bytes of a file as a single block.
    Enc {
        /// Plaintext file.
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Key file; a random key is generated and saved next to the input when omitted.
        #[arg(long, value_name = "FILE")]
        key: Option<PathBuf>,
        /// Ciphertext path (defaults to `<stem>_encrypted.txt`).
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Optional RNG seed for the generated key.
        #[arg(long)]
        seed: Option<u64>,
        /// Print the state after every round step.
        #[arg(long, default_value_t = false)]
        trace: bool,
    },
    /// Decrypt a single hex-encoded block.
    Dec {
        /// Ciphertext file (16 hex bytes).
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Key file.
        #[arg(long, value_name = "FILE")]
        key: PathBuf,
        /// Plaintext path (defaults to `<stem>_decrypted.txt`).
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Print the state after every round step.
        #[arg(long, default_value_t = false)]
        trace: bool,
    },
    /// Encrypt a whole file in CBC mode.
    CbcEnc {
        /// Plaintext file.
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Key file; a random key is generated and saved next to the input when omitted.
        #[arg(long, value_name = "FILE")]
        key: Option<PathBuf>,
        /// IV file; a fresh random IV is generated and saved when omitted.
        #[arg(long, value_name = "FILE")]
        iv: Option<PathBuf>,
        /// Ciphertext path (defaults to `<stem>_encrypted.txt`).
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Require block-aligned input instead of applying PKCS#7 padding.
        #[arg(long, default_value_t = false)]
        no_pad: bool,
        /// Optional RNG seed for generated key and IV.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Decrypt a CBC ciphertext file.
    CbcDec {
        /// Ciphertext file (hex text, whole blocks).
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Key file.
        #[arg(long, value_name = "FILE")]
        key: PathBuf,
        /// IV file used at encryption time.
        #[arg(long, value_name = "FILE")]
        iv: PathBuf,
        /// Plaintext path (defaults to `<stem>_decrypted.txt`).
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// The ciphertext was produced with `--no-pad`.
        #[arg(long, default_value_t = false)]
        no_pad: bool,
    },
    /// Verify the implementation against published known-answer vectors.
    Check,
    /// Run a local demo: generate key + IV, CBC-encrypt random data, decrypt back.
    Demo {
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Keygen { out, seed } => cmd_keygen(&out, seed),
        Commands::Expand { key } => cmd_expand(&key),
        Commands::Enc {
            input,
            key,
            output,
            seed,
            trace,
        } => cmd_enc(&input, key.as_deref(), output.as_deref(), seed, trace).map(|_| ()),
        Commands::Dec {
            input,
            key,
            output,
            trace,
        } => cmd_dec(&input, &key, output.as_deref(), trace).map(|_| ()),
        Commands::CbcEnc {
            input,
            key,
            iv,
            output,
            no_pad,
            seed,
        } => cmd_cbc_enc(
            &input,
            key.as_deref(),
            iv.as_deref(),
            output.as_deref(),
            padding_for(no_pad),
            seed,
        )
        .map(|_| ()),
        Commands::CbcDec {
            input,
            key,
            iv,
            output,
            no_pad,
        } => cmd_cbc_dec(&input, &key, &iv, output.as_deref(), padding_for(no_pad)).map(|_| ()),
        Commands::Check => cmd_check(),
        Commands::Demo { seed } => cmd_demo(seed),
    }
}

fn padding_for(no_pad: bool) -> Padding {
    if no_pad {
        Padding::None
    } else {
        Padding::Pkcs7
    }
}

fn cmd_keygen(out: &Path, seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let block = random_block(&mut rng);
    write_block_file(out, &block)?;
    println!("Saved randomly generated block in {}", out.display());
    Ok(())
}

fn cmd_expand(key_path: &Path) -> Result<()> {
    let key = read_key_file(key_path)?;
    let round_keys = expand_key(&key);
    for (round, rk) in round_keys.as_blocks().iter().enumerate() {
        println!("round {round:>2}: {}", encode_bytes(rk));
    }
    Ok(())
}

fn cmd_enc(
    input: &Path,
    key_path: Option<&Path>,
    output: Option<&Path>,
    seed: Option<u64>,
    trace: bool,
) -> Result<PathBuf> {
    let out = output_path(input, output, "_encrypted")?;
    let data = read_input(input)?;
    if data.len() != BLOCK_SIZE {
        bail!(
            "single-block encryption needs exactly 16 bytes, {} has {}; use cbc-enc for other lengths",
            input.display(),
            data.len()
        );
    }
    let block = block_from_slice(&data)?;

    let mut rng = seeded_rng(seed);
    let key = load_or_generate_key(input, key_path, &mut rng)?;
    let cipher = Aes128::new(&key);
    let ct = if trace {
        cipher.encrypt_block_traced(&block, &mut print_step)
    } else {
        cipher.encrypt_block(&block)
    };

    write_block_file(&out, &ct)?;
    println!("Encrypted {} to file {}", input.display(), out.display());
    Ok(out)
}

fn cmd_dec(input: &Path, key_path: &Path, output: Option<&Path>, trace: bool) -> Result<PathBuf> {
    let out = output_path(input, output, "_decrypted")?;
    let ct = read_block_file(input)?;
    let cipher = Aes128::new(&read_key_file(key_path)?);
    let pt = if trace {
        cipher.decrypt_block_traced(&ct, &mut print_step)
    } else {
        cipher.decrypt_block(&ct)
    };

    fs::write(&out, pt).with_context(|| format!("write {}", out.display()))?;
    println!("Decrypted {} to file {}", input.display(), out.display());
    Ok(out)
}

fn cmd_cbc_enc(
    input: &Path,
    key_path: Option<&Path>,
    iv_path: Option<&Path>,
    output: Option<&Path>,
    padding: Padding,
    seed: Option<u64>,
) -> Result<PathBuf> {
    let out = output_path(input, output, "_encrypted")?;
    let data = read_input(input)?;
    let blocks = pad(&data, padding).context("frame message into blocks")?;

    let mut rng = seeded_rng(seed);
    let key = load_or_generate_key(input, key_path, &mut rng)?;
    let iv = match iv_path {
        Some(path) => Iv::from(read_block_file(path)?),
        None => {
            let iv = Iv::from(random_block(&mut rng));
            let path = derived_path(input, "_IV");
            write_new_block_file(&path, &iv.0)?;
            println!("Saved randomly generated IV in {}", path.display());
            iv
        }
    };

    let cipher = Aes128::new(&key);
    let encrypted = cbc_encrypt(&cipher, &iv, &blocks);
    println!("# of blocks: {}", encrypted.len());

    let text: String = encrypted.iter().map(|block| encode_bytes(block)).collect();
    fs::write(&out, text).with_context(|| format!("write {}", out.display()))?;
    println!("Encrypted {} to file {}", input.display(), out.display());
    Ok(out)
}

fn cmd_cbc_dec(
    input: &Path,
    key_path: &Path,
    iv_path: &Path,
    output: Option<&Path>,
    padding: Padding,
) -> Result<PathBuf> {
    let out = output_path(input, output, "_decrypted")?;
    let text = read_text(input)?;
    let blocks =
        decode_blocks(&text).with_context(|| format!("parse ciphertext {}", input.display()))?;
    let cipher = Aes128::new(&read_key_file(key_path)?);
    let iv = Iv::from(read_block_file(iv_path)?);

    let decrypted = Cbc::new(&cipher, iv).decrypt_blocks(&blocks);
    println!("# of blocks: {}", decrypted.len());
    let plaintext = unpad(&decrypted, padding).context("strip padding (wrong key or IV?)")?;

    fs::write(&out, plaintext).with_context(|| format!("write {}", out.display()))?;
    println!("Decrypted {} to file {}", input.display(), out.display());
    Ok(out)
}

fn cmd_check() -> Result<()> {
    // FIPS-197 appendix C.1.
    let key = parse_hex_block("000102030405060708090a0b0c0d0e0f")?;
    let plain = parse_hex_block("00112233445566778899aabbccddeeff")?;
    let expected = parse_hex_block("69c4e0d86a7b0430d8cdb78070b4c55a")?;
    let round_keys = expand_key(&Aes128Key::from(key));
    if encrypt_block(&plain, &round_keys) != expected {
        bail!("FIPS-197 C.1 encryption mismatch");
    }
    let cipher = Aes128::new(&Aes128Key::from(key));
    if cipher.decrypt_block(&expected) != plain {
        bail!("FIPS-197 C.1 decryption mismatch");
    }
    println!("FIPS-197 C.1: ok");

    // NIST SP 800-38A F.2.1.
    let cipher = Aes128::new(&Aes128Key::from(parse_hex_block(
        "2b7e151628aed2a6abf7158809cf4f3c",
    )?));
    let iv = Iv::from(parse_hex_block("000102030405060708090a0b0c0d0e0f")?);
    let plain = hex::decode(
        "6bc1bee22e409f96e93d7e117393172aae2d8a571e03ac9c9eb76fac45af8e51\
         30c81c46a35ce411e5fbc1191a0a52eff69f2445df4f9b17ad2b417be66c3710",
    )
    .context("decode vector")?;
    let expected = hex::decode(
        "7649abac8119b246cee98e9b12e9197d5086cb9b507219ee95db113a917678b2\
         73bed6b8e3c1743b7116e69e222295163ff1caa1681fac09120eca307586e1a7",
    )
    .context("decode vector")?;
    let cbc = Cbc::new(&cipher, iv);
    let actual = cbc.encrypt_padded(&plain, Padding::None)?;
    if actual != expected {
        bail!("SP 800-38A F.2.1 CBC mismatch");
    }
    if cbc.decrypt_padded(&actual, Padding::None)? != plain {
        bail!("SP 800-38A F.2.2 CBC mismatch");
    }
    println!("SP 800-38A F.2.1: ok");
    Ok(())
}

fn cmd_demo(seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let key = Aes128Key::from(random_block(&mut rng));
    let iv = Iv::from(random_block(&mut rng));
    let cipher = Aes128::new(&key);

    let mut message = vec![0u8; 40];
    rng.fill_bytes(&mut message);
    let plaintext_hex = hex::encode(&message);

    let cbc = Cbc::new(&cipher, iv);
    let sealed = cbc.encrypt_padded(&message, Padding::Pkcs7)?;
    let opened = cbc.decrypt_padded(&sealed, Padding::Pkcs7)?;
    let decrypted_hex = hex::encode(&opened);

    println!("demo key: {}", hex::encode(key.0));
    println!("demo iv: {}", hex::encode(iv.0));
    println!("plaintext: {}", plaintext_hex);
    println!("ciphertext: {}", hex::encode(&sealed));
    println!("decrypted: {}", decrypted_hex);
    if decrypted_hex != plaintext_hex {
        bail!("demo roundtrip failed");
    }
    Ok(())
}

fn print_step(round: usize, step: Step, state: Block) {
    println!("{step} round {round}");
    print!("{}", format_grid(&state));
}

fn parse_hex_block(hex_str: &str) -> Result<Block> {
    let bytes = hex::decode(hex_str.trim()).context("decode block hex")?;
    block_from_slice(&bytes).context("block must be 16 bytes (32 hex characters)")
}

/// `dir/msg.txt` -> `dir/msg{suffix}.txt`; `msg_encrypted.txt` decrypts to `msg_decrypted.txt`.
fn derived_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let base = match suffix {
        "_decrypted" => stem.strip_suffix("_encrypted").unwrap_or(&stem),
        _ => stem.as_str(),
    };
    input.with_file_name(format!("{base}{suffix}.txt"))
}

/// Explicit `--output` or the derived sibling, never the input itself.
fn output_path(input: &Path, output: Option<&Path>, suffix: &str) -> Result<PathBuf> {
    let out = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| derived_path(input, suffix));
    if out == input {
        bail!("output {} would overwrite the input", out.display());
    }
    Ok(out)
}

fn load_or_generate_key(
    input: &Path,
    key_path: Option<&Path>,
    rng: &mut (impl RngCore + CryptoRng),
) -> Result<Aes128Key> {
    if let Some(path) = key_path {
        return read_key_file(path);
    }
    let key = random_block(rng);
    let path = derived_path(input, "_key");
    write_new_block_file(&path, &key)?;
    println!("Saved randomly generated key in {}", path.display());
    Ok(Aes128Key::from(key))
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    println!("Reading {}...", path.display());
    fs::read(path).with_context(|| format!("read {}", path.display()))
}

fn read_text(path: &Path) -> Result<String> {
    println!("Reading {}...", path.display());
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

fn read_block_file(path: &Path) -> Result<Block> {
    let text = read_text(path)?;
    decode_block(&text).with_context(|| {
        format!(
            "{} is not 16 hex bytes without prefixes separated by spaces",
            path.display()
        )
    })
}

fn read_key_file(path: &Path) -> Result<Aes128Key> {
    read_block_file(path).map(Aes128Key::from)
}

fn write_block_file(path: &Path, block: &Block) -> Result<()> {
    fs::write(path, encode_bytes(block)).with_context(|| format!("write {}", path.display()))
}

/// Like [`write_block_file`] but fails if `path` exists; generated keys and IVs are never replaced.
fn write_new_block_file(path: &Path, block: &Block) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .with_context(|| {
            format!(
                "create {} (pass --key/--iv to reuse an existing file)",
                path.display()
            )
        })?;
    file.write_all(encode_bytes(block).as_bytes())
        .with_context(|| format!("write {}", path.display()))
}

fn random_block(rng: &mut impl RngCore) -> Block {
    let mut block = [0u8; BLOCK_SIZE];
    rng.fill_bytes(&mut block);
    block
}

fn seeded_rng(seed: Option<u64>) -> impl RngCore + CryptoRng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => {
            let mut seed_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed_bytes);
            ChaCha20Rng::from_seed(seed_bytes)
        }
    }
}
