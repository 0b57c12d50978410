//! ntrflash CLI - Command-line tool for programming NDS flashcart flash.
//!
//! ## Features
//!
//! - Dump and write raw cart flash images
//! - Inject an ntrboot payload (key blob + firmware)
//! - Erase cart flash
//! - Shell completion generation
//! - Environment variable support
//!
//! Cart access runs against the library's emulated cart backed by an
//! image file; a hardware transport plugs in through the same driver
//! surface.

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use console::style;
use env_logger::Env;
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use ntrflash::card::emu::{EmuCart, EmuConfig};
use ntrflash::target::jedec::{DSONE, DSONEI};
use ntrflash::{
    CartFamily, EraseMode, Flashcart, JedecCart, KeyCandidate, KeyKind, PollPolicy, R4iSdhcHk,
};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};

mod config;

use config::Config;

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// ntrflash - program NDS flashcart flash memory.
///
/// Environment variables:
///   NTRFLASH_IMAGE   - Default cart image file
///   NTRFLASH_CART    - Default cart family (dsone, dsonei, r4isdhc-hk)
#[derive(Parser)]
#[command(name = "ntrflash")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Cart image file backing the emulated cart.
    #[arg(short, long, global = true, env = "NTRFLASH_IMAGE")]
    image: Option<PathBuf>,

    /// Target cart family.
    #[arg(short, long, global = true, env = "NTRFLASH_CART")]
    cart: Option<Cart>,

    /// Verbose output level (-v, -vv, -vvv for increasing detail).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (suppress non-essential output).
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Assume yes for destructive-operation prompts.
    #[arg(short = 'y', long, global = true)]
    yes: bool,

    /// Path to a configuration file.
    #[arg(long = "config", global = true, value_name = "PATH")]
    config_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Supported cart families.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Cart {
    /// DSONE SDHC (512 KiB).
    Dsone,
    /// DSONEi SDHC (4 MiB, experimental).
    Dsonei,
    /// R4i SDHC Dual-Core and compatibles (2 MiB).
    R4isdhcHk,
}

impl From<Cart> for CartFamily {
    fn from(cart: Cart) -> Self {
        match cart {
            Cart::Dsone => CartFamily::Dsone,
            Cart::Dsonei => CartFamily::Dsonei,
            Cart::R4isdhcHk => CartFamily::R4isdhcHk,
        }
    }
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// List supported cart families.
    List,

    /// Show cart family details.
    Info {
        /// Emit machine-readable JSON.
        #[arg(long)]
        json: bool,
    },

    /// Dump cart flash to a file.
    Dump {
        /// Output file for the dump.
        output: PathBuf,

        /// Start address.
        #[arg(long, value_parser = parse_u32, default_value = "0")]
        addr: u32,

        /// Number of bytes (defaults to the rest of the chip).
        #[arg(long, value_parser = parse_u32)]
        len: Option<u32>,
    },

    /// Write a binary file to cart flash.
    Write {
        /// Input file to write.
        input: PathBuf,

        /// Destination address.
        #[arg(long, value_parser = parse_u32, default_value = "0")]
        addr: u32,

        /// Use the stock updater's legacy erase recipe instead of
        /// minimal covering-block erase.
        #[arg(long)]
        legacy_erase: bool,
    },

    /// Erase the entire cart flash.
    Erase,

    /// Inject an ntrboot payload.
    Inject {
        /// Blowfish key blob (0x1048 bytes).
        #[arg(long)]
        key: PathBuf,

        /// Firmware image to install.
        #[arg(long)]
        firmware: PathBuf,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let _ = ctrlc::set_handler(|| INTERRUPTED.store(true, Ordering::SeqCst));
    ntrflash::set_interrupt_checker(|| INTERRUPTED.load(Ordering::SeqCst));

    let config = match &cli.config_path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    };

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if e.downcast_ref::<ntrflash::Error>()
                .is_some_and(|err| matches!(err, ntrflash::Error::Interrupted))
            {
                eprintln!("{} cancelled", style("✗").red());
                return ExitCode::from(130);
            }
            eprintln!("{} {e:#}", style("Error:").red());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, config: &Config) -> Result<()> {
    match &cli.command {
        Commands::List => cmd_list(),
        Commands::Info { json } => cmd_info(cli, config, *json),
        Commands::Dump { output, addr, len } => cmd_dump(cli, config, output, *addr, *len),
        Commands::Write {
            input,
            addr,
            legacy_erase,
        } => cmd_write(cli, config, input, *addr, *legacy_erase),
        Commands::Erase => cmd_erase(cli, config),
        Commands::Inject { key, firmware } => cmd_inject(cli, config, key, firmware),
        Commands::Completions { shell } => {
            generate(*shell, &mut Cli::command(), "ntrflash", &mut io::stdout());
            Ok(())
        }
    }
}

fn cmd_list() -> Result<()> {
    for family in CartFamily::ALL {
        println!(
            "{:<12} {:<22} {:>5} KiB",
            family_slug(family),
            family.to_string(),
            family.capacity() / 1024
        );
    }
    Ok(())
}

fn cmd_info(cli: &Cli, config: &Config, json: bool) -> Result<()> {
    let family = resolve_family(cli, config)?;
    if json {
        let value = serde_json::json!({
            "family": family_slug(family),
            "name": family.to_string(),
            "capacity": family.capacity(),
        });
        println!("{value}");
        return Ok(());
    }
    println!("Family:   {family}");
    println!("Capacity: {:#x} bytes", family.capacity());
    Ok(())
}

fn cmd_dump(
    cli: &Cli,
    config: &Config,
    output: &Path,
    addr: u32,
    len: Option<u32>,
) -> Result<()> {
    let family = resolve_family(cli, config)?;
    let image_path = resolve_image(cli, config)?;
    let image = load_image(&image_path, family.capacity(), true)?;

    status(cli, format!("Dumping {family} cart from {}", image_path.display()));
    let pb = progress_bar(cli);

    let length = len.unwrap_or(family.capacity().saturating_sub(addr));
    let mut dumped = Vec::new();
    with_cart(family, &image, poll_policy(config), &mut |cart| {
        dumped = cart.read_flash(addr, length, &mut progress_sink(&pb))?;
        Ok(())
    })?;
    pb.finish_and_clear();

    fs::write(output, &dumped)
        .with_context(|| format!("failed to write dump to {}", output.display()))?;
    status(
        cli,
        format!("Dumped {length:#x} bytes to {}", output.display()),
    );
    Ok(())
}

fn cmd_write(
    cli: &Cli,
    config: &Config,
    input: &Path,
    addr: u32,
    legacy_erase: bool,
) -> Result<()> {
    let family = resolve_family(cli, config)?;
    let image_path = resolve_image(cli, config)?;
    let data =
        fs::read(input).with_context(|| format!("failed to read {}", input.display()))?;

    confirm(
        cli,
        &format!(
            "Write {:#x} bytes to {family} cart flash at {addr:#x}?",
            data.len()
        ),
    )?;

    let erase = if legacy_erase {
        EraseMode::Legacy
    } else {
        EraseMode::Covering
    };

    let image = load_image(&image_path, family.capacity(), false)?;
    let pb = progress_bar(cli);
    let memory = with_cart(family, &image, poll_policy(config), &mut |cart| {
        cart.write_flash(addr, &data, erase, &mut progress_sink(&pb))?;
        Ok(())
    })?;
    pb.finish_and_clear();

    save_image(&image_path, &memory)?;
    status(cli, format!("Wrote {:#x} bytes at {addr:#x}", data.len()));
    Ok(())
}

fn cmd_erase(cli: &Cli, config: &Config) -> Result<()> {
    let family = resolve_family(cli, config)?;
    let image_path = resolve_image(cli, config)?;

    confirm(cli, &format!("Erase the entire {family} cart flash?"))?;

    let image = load_image(&image_path, family.capacity(), false)?;
    let pb = progress_bar(cli);
    let memory = with_cart(family, &image, poll_policy(config), &mut |cart| {
        let blank = vec![0xFFu8; cart.capacity() as usize];
        cart.write_flash(0, &blank, EraseMode::Covering, &mut progress_sink(&pb))?;
        Ok(())
    })?;
    pb.finish_and_clear();

    save_image(&image_path, &memory)?;
    status(cli, "Flash erased".into());
    Ok(())
}

fn cmd_inject(cli: &Cli, config: &Config, key: &Path, firmware: &Path) -> Result<()> {
    let family = resolve_family(cli, config)?;
    let image_path = resolve_image(cli, config)?;

    let key_blob =
        fs::read(key).with_context(|| format!("failed to read {}", key.display()))?;
    let firm =
        fs::read(firmware).with_context(|| format!("failed to read {}", firmware.display()))?;

    confirm(
        cli,
        &format!("Inject ntrboot payload ({:#x} bytes) into {family} cart?", firm.len()),
    )?;

    let image = load_image(&image_path, family.capacity(), false)?;
    let pb = progress_bar(cli);
    let memory = with_cart(family, &image, poll_policy(config), &mut |cart| {
        cart.inject_ntrboot(&key_blob, &firm, &mut progress_sink(&pb))?;
        Ok(())
    })?;
    pb.finish_and_clear();

    save_image(&image_path, &memory)?;
    status(cli, "ntrboot payload installed".into());
    Ok(())
}

/// Run `op` against a freshly initialized driver for `family`, returning
/// the cart memory afterwards for persistence.
fn with_cart(
    family: CartFamily,
    image: &[u8],
    poll: PollPolicy,
    op: &mut dyn FnMut(&mut dyn Flashcart) -> Result<()>,
) -> Result<Vec<u8>> {
    match family {
        CartFamily::Dsone => {
            let card = EmuCart::with_contents(
                EmuConfig::jedec(DSONE.capacity, 0xD7BF, DSONE.erase_unit),
                image,
            );
            let driver = JedecCart::new(DSONE, card).with_poll_policy(poll);
            run_driver(driver, op, |d| d.into_card().into_memory())
        }
        CartFamily::Dsonei => {
            let card = EmuCart::with_contents(
                EmuConfig::jedec(DSONEI.capacity, 0xD7BF, DSONEI.erase_unit),
                image,
            );
            let driver = JedecCart::new(DSONEI, card).with_poll_policy(poll);
            run_driver(driver, op, |d| d.into_card().into_memory())
        }
        CartFamily::R4isdhcHk => {
            let card = EmuCart::with_contents(EmuConfig::r4(0x707), image);
            let driver =
                R4iSdhcHk::new(card, default_candidates()).with_poll_policy(poll);
            run_driver(driver, op, |d| d.into_card().into_memory())
        }
    }
}

fn run_driver<D, F>(
    mut driver: D,
    op: &mut dyn FnMut(&mut dyn Flashcart) -> Result<()>,
    finish: F,
) -> Result<Vec<u8>>
where
    D: Flashcart,
    F: FnOnce(D) -> Vec<u8>,
{
    driver
        .initialize()
        .context("cart initialization failed")?;
    op(&mut driver)?;
    driver.shutdown()?;
    Ok(finish(driver))
}

/// Emulated carts accept any key material; real secrets come from the
/// console at runtime and are never shipped.
fn default_candidates() -> Vec<KeyCandidate> {
    vec![
        KeyCandidate::unkeyed(KeyKind::Retail),
        KeyCandidate::unkeyed(KeyKind::BootromRetail),
        KeyCandidate::unkeyed(KeyKind::BootromDev),
    ]
}

fn family_slug(family: CartFamily) -> &'static str {
    match family {
        CartFamily::Dsone => "dsone",
        CartFamily::Dsonei => "dsonei",
        CartFamily::R4isdhcHk => "r4isdhc-hk",
    }
}

fn resolve_family(cli: &Cli, config: &Config) -> Result<CartFamily> {
    if let Some(cart) = cli.cart {
        return Ok(cart.into());
    }
    if let Some(name) = &config.cart.family {
        if let Some(family) = CartFamily::from_name(name) {
            return Ok(family);
        }
        bail!("unknown cart family {name:?} in config");
    }
    bail!("no cart family specified (use --cart or NTRFLASH_CART)")
}

fn resolve_image(cli: &Cli, config: &Config) -> Result<PathBuf> {
    cli.image
        .clone()
        .or_else(|| config.cart.image.clone())
        .context("no cart image specified (use --image or NTRFLASH_IMAGE)")
}

fn poll_policy(config: &Config) -> PollPolicy {
    config
        .cart
        .poll_attempts
        .map_or_else(PollPolicy::default, PollPolicy::new)
}

fn load_image(path: &Path, capacity: u32, must_exist: bool) -> Result<Vec<u8>> {
    if !path.exists() {
        if must_exist {
            bail!("cart image {} not found", path.display());
        }
        debug!("starting from a blank image (all 0xFF)");
        return Ok(Vec::new());
    }
    let data =
        fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    if data.len() > capacity as usize {
        bail!(
            "image {} is {:#x} bytes, larger than the {:#x}-byte cart",
            path.display(),
            data.len(),
            capacity
        );
    }
    Ok(data)
}

fn save_image(path: &Path, memory: &[u8]) -> Result<()> {
    fs::write(path, memory)
        .with_context(|| format!("failed to save cart image {}", path.display()))
}

fn confirm(cli: &Cli, prompt: &str) -> Result<()> {
    if cli.yes {
        return Ok(());
    }
    if !console::user_attended_stderr() {
        bail!("refusing to modify flash without --yes in non-interactive mode");
    }
    let proceed = dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?;
    if !proceed {
        bail!("aborted by user");
    }
    Ok(())
}

fn status(cli: &Cli, message: String) {
    if !cli.quiet {
        eprintln!("{} {message}", style("•").cyan());
    }
}

fn progress_bar(cli: &Cli) -> ProgressBar {
    if cli.quiet || !console::user_attended_stderr() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(1);
    #[allow(clippy::unwrap_used)] // Static template string
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_draw_target(indicatif::ProgressDrawTarget::stderr());
    pb
}

fn progress_sink(pb: &ProgressBar) -> impl FnMut(&str, usize, usize) + '_ {
    let mut label = String::new();
    move |name: &str, current: usize, total: usize| {
        if name != label {
            label = name.to_string();
            pb.set_message(label.clone());
        }
        pb.set_length(total as u64);
        pb.set_position(current as u64);
    }
}

fn parse_u32(s: &str) -> Result<u32, String> {
    let parsed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16)
    } else {
        s.parse()
    };
    parsed.map_err(|e| format!("invalid number {s:?}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_u32_accepts_hex_and_decimal() {
        assert_eq!(parse_u32("0x2000").unwrap(), 0x2000);
        assert_eq!(parse_u32("0X10").unwrap(), 0x10);
        assert_eq!(parse_u32("4096").unwrap(), 4096);
        assert!(parse_u32("zzz").is_err());
    }

    #[test]
    fn cart_arg_maps_to_family() {
        assert_eq!(CartFamily::from(Cart::Dsone), CartFamily::Dsone);
        assert_eq!(CartFamily::from(Cart::R4isdhcHk), CartFamily::R4isdhcHk);
    }

    #[test]
    fn verify_cli_definition() {
        Cli::command().debug_assert();
    }
}
