// Brings the transceiver from reset to FDD on a spidev bus, then prints the
// resulting clock/LO/gain state. Intended for board checkout.
use ad9361::{Ad9361, Config, Direction, SpiDevice};
use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "AD9361 bring-up and checkout")]
struct Args {
    /// SPI device node the transceiver hangs off
    #[arg(long, default_value = "/dev/spidev0.0")]
    spi: PathBuf,
    /// Board description TOML; defaults apply without one
    #[arg(long)]
    config: Option<PathBuf>,
    /// Complex sample rate, Hz
    #[arg(long, default_value_t = 16e6)]
    rate: f64,
    /// RX LO frequency, Hz
    #[arg(long, default_value_t = 2.4e9)]
    rx_freq: f64,
    /// TX LO frequency, Hz
    #[arg(long, default_value_t = 2.4e9)]
    tx_freq: f64,
    /// RX gain for both chains, dB
    #[arg(long, default_value_t = 30.0)]
    rx_gain: f64,
    /// TX gain for both chains, dB
    #[arg(long, default_value_t = 0.0)]
    tx_gain: f64,
    /// Close the digital TX-to-RX loopback after bring-up
    #[arg(long)]
    loopback: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config: Config = match &args.config {
        Some(path) => toml::from_str(
            &fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?,
        )
        .with_context(|| format!("parsing {}", path.display()))?,
        None => Config::default(),
    };

    let spi = SpiDevice::open(&args.spi)
        .with_context(|| format!("opening {}", args.spi.display()))?;
    let mut dev = Ad9361::new(spi, config);

    dev.init().context("initialization")?;
    let rate = dev.set_clock_rate(args.rate).context("clock rate")?;
    let rx = dev.tune(Direction::Rx, args.rx_freq).context("RX tune")?;
    let tx = dev.tune(Direction::Tx, args.tx_freq).context("TX tune")?;
    for chain in [1, 2] {
        dev.set_rx_gain(chain, args.rx_gain)?;
        dev.set_tx_gain(chain, args.tx_gain)?;
    }
    if args.loopback {
        dev.data_port_loopback(true)?;
    }

    println!("clock rate: {:.0} Hz", rate);
    println!("RX LO: {:.0} Hz", rx);
    println!("TX LO: {:.0} Hz", tx);
    let state = dev.state();
    println!(
        "gains: rx1 {:.2} rx2 {:.2} tx1 {:.2} tx2 {:.2} dB",
        state.rx1_gain, state.rx2_gain, state.tx1_gain, state.tx2_gain
    );
    for warning in dev.take_warnings() {
        eprintln!("warning: {warning}");
    }
    Ok(())
}
