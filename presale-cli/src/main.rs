// File: presale-cli/src/main.rs
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use presale_hash::to_prefixed_hex;
use presale_merkle::{
    parse_digest, read_identifier_list, EncodedProof, Identifier, MerkleTree, ProofEncoding,
    Whitelist, WhitelistArtifacts, WhitelistBundle,
};
use presale_params::load_params_file;
use presale_vesting::{breakdown, format_units, Position, RawPosition};
use std::{
    fs,
    path::PathBuf,
    process::ExitCode,
    time::{SystemTime, UNIX_EPOCH},
};
use tracing::info;

mod logging;

use logging::{init_logging, LogFormat};

#[derive(Parser)]
#[command(name = "presale", version, about = "Presale whitelist and vesting tooling")]
struct Cli {
    /// Default log filter when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
    #[arg(long, global = true, default_value = "human")]
    log_format: LogFormat,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Build the whitelist tree from an identifier list and write artifacts
    BuildTree {
        /// Line-delimited (or CSV) list of base58 identifiers
        #[arg(long)]
        input: PathBuf,
        /// JSON artifact output
        #[arg(long, default_value = "whitelist.json")]
        out: PathBuf,
        #[arg(long, default_value_t = ProofEncoding::Hex)]
        encoding: ProofEncoding,
        /// Optional bincode bundle with every leaf's proof
        #[arg(long)]
        bin: Option<PathBuf>,
    },
    /// Print one identifier's proof
    Proof {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        address: Identifier,
        #[arg(long, default_value_t = ProofEncoding::Hex)]
        encoding: ProofEncoding,
    },
    /// Check a proof against a root
    Verify {
        #[arg(long)]
        root: String,
        #[arg(long)]
        address: Identifier,
        /// Comma separated hex nodes, leaf level first
        #[arg(long, value_delimiter = ',')]
        proof: Vec<String>,
    },
    /// Show the claimable amount of a position
    Claimable {
        /// Presale params (toml)
        #[arg(long)]
        params: PathBuf,
        /// Position record (json)
        #[arg(long)]
        position: PathBuf,
        /// Unix timestamp to evaluate at; defaults to the system clock
        #[arg(long, allow_hyphen_values = true)]
        now: Option<i64>,
        /// Override the token decimals from params
        #[arg(long)]
        decimals: Option<u8>,
        /// Emit the breakdown as json
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.log_format, &cli.log_level);
    match cli.cmd {
        Cmd::BuildTree { input, out, encoding, bin } => {
            let whitelist = Whitelist::build(read_identifier_list(&input)?);
            let artifacts = WhitelistArtifacts::new(&whitelist, encoding);
            fs::write(&out, artifacts.to_json_pretty()?)
                .with_context(|| format!("write {}", out.display()))?;
            info!(path = %out.display(), "wrote artifacts");
            if let Some(bin) = bin {
                let bundle = WhitelistBundle::new(&whitelist)?;
                fs::write(&bin, bundle.to_bincode()?)
                    .with_context(|| format!("write {}", bin.display()))?;
                info!(path = %bin.display(), entries = bundle.entries.len(), "wrote bundle");
            }
            println!("root={}", to_prefixed_hex(&whitelist.root()));
            println!("entries={}", whitelist.len());
        }
        Cmd::Proof { input, address, encoding } => {
            let whitelist = Whitelist::build(read_identifier_list(&input)?);
            let proof = whitelist.proof_for(&address)?;
            println!("{}", serde_json::to_string(&EncodedProof::encode(&proof, encoding))?);
        }
        Cmd::Verify { root, address, proof } => {
            let root = parse_digest(&root).context("root")?;
            let path = proof
                .iter()
                .filter(|node| !node.trim().is_empty())
                .map(|node| parse_digest(node))
                .collect::<Result<Vec<_>, _>>()
                .context("proof")?;
            let ok = MerkleTree::verify(&root, &address.leaf(), &path);
            println!("{}", if ok { "valid" } else { "invalid" });
            if !ok {
                return Ok(ExitCode::FAILURE);
            }
        }
        Cmd::Claimable { params, position, now, decimals, json } => {
            let params = load_params_file(&params)?;
            let schedule = params.schedule()?;
            let text = fs::read_to_string(&position)
                .with_context(|| format!("read {}", position.display()))?;
            let raw: RawPosition = serde_json::from_str(&text)
                .with_context(|| format!("parse {}", position.display()))?;
            let position = Position::try_from(&raw)?;
            let now = match now {
                Some(ts) => ts,
                None => wall_clock()?,
            };
            let b = breakdown(&schedule, &position, now);
            if json {
                println!("{}", serde_json::to_string_pretty(&b)?);
            } else {
                let decimals = decimals.unwrap_or(params.token.decimals);
                let symbol = params.token.symbol.as_deref();
                println!("phase={:?}", b.phase);
                println!("tge_unlocked={}", format_units(&b.tge_unlocked, decimals, symbol));
                println!("linear_unlocked={}", format_units(&b.linear_unlocked, decimals, symbol));
                println!("unlocked={}", format_units(&b.unlocked, decimals, symbol));
                println!("claimed={}", format_units(&b.claimed, decimals, symbol));
                println!("claimable={}", format_units(&b.claimable, decimals, symbol));
                if let Some(ts) = b.next_unlock_ts {
                    println!("vesting_starts_after={ts}");
                }
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn wall_clock() -> Result<i64> {
    let secs = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    match i64::try_from(secs) {
        Ok(ts) => Ok(ts),
        Err(_) => bail!("system clock out of range: {secs}"),
    }
}
