//! HX711 Simulator Host CLI
//!
//! Runs the driver against a simulated chip on your PC and prints what the
//! driver decodes for each 24-bit word the chip shifts out. Handy for
//! checking offsets before flashing a board.
//!
//! ## Usage
//!
//! ```bash
//! # Default sweep of words
//! cargo run --features std --bin hx711_sim
//!
//! # Specific words (hex), gain 64, averaging 4
//! cargo run --features std --bin hx711_sim -- --gain 3 --average 4 7ffffb 7ffff6
//!
//! # Tare on the first word before decoding the rest
//! cargo run --features std --bin hx711_sim -- --tare 000000 7ffff1
//! ```

use hx711_adc::adapters::simulated::SIM_QUEUE_DEPTH;
use hx711_adc::{AdcConfig, Gain, Hx711Adc, SensorId, SensorPort, SimulatedHx711};

/// Words shifted out when none are given on the command line
const DEFAULT_WORDS: [u32; 6] = [0x00_0000, 0x7F_FFFB, 0x7F_FFEC, 0x40_0000, 0x80_0000, 0xFF_FFFF];

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Parsed command line
#[derive(Debug)]
struct Options {
    gain: Gain,
    average: u8,
    tare: bool,
    words: Vec<u32>,
}

fn parse_args(args: &[String]) -> CliResult<Options> {
    let mut options = Options {
        gain: Gain::Gain128,
        average: 1,
        tare: false,
        words: Vec::new(),
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--gain" => {
                let code: u8 = iter.next().ok_or("--gain needs a code (1, 2 or 3)")?.parse()?;
                options.gain = Gain::from_code(code).ok_or("gain code must be 1, 2 or 3")?;
            }
            "--average" => {
                options.average = iter.next().ok_or("--average needs a count")?.parse()?;
            }
            "--tare" => options.tare = true,
            word => options
                .words
                .push(u32::from_str_radix(word.trim_start_matches("0x"), 16)?),
        }
    }

    // Every sample of one reading is queued up front
    if options.average == 0 || usize::from(options.average) > SIM_QUEUE_DEPTH {
        return Err(format!("--average must be between 1 and {}", SIM_QUEUE_DEPTH).into());
    }

    if options.words.is_empty() {
        options.words.extend_from_slice(&DEFAULT_WORDS);
    }

    Ok(options)
}

fn main() -> CliResult<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    let Options {
        gain,
        average,
        tare,
        words,
    } = parse_args(&args)?;

    let config = AdcConfig::new()
        .with_gain(gain)
        .with_averaging(average)
        .with_sensor_id(SensorId::SIMULATED);

    println!(
        "HX711 simulator ({}): gain {} (channel {:?}), {} sample(s) per reading",
        config.sensor_id.as_str(),
        gain.factor(),
        gain.channel(),
        average
    );

    let mut words = words.into_iter();
    let mut sim = SimulatedHx711::new();

    // One conversion is consumed by init
    sim.push_sample(0).map_err(|_| "queue full")?;
    let mut adc = Hx711Adc::new(sim, config);
    adc.init()?;

    if tare {
        let zero_word = words.next().ok_or("--tare needs at least one word")?;
        adc.bus_mut().push_sample(zero_word).map_err(|_| "queue full")?;
        adc.wait_ready()?;
        let zero = adc.tare(1)?;
        println!("tare on {:06x}: zeroing offset {}", zero_word, zero);
    }

    println!("\n{:>8}  {:>10}  {:>12}", "word", "raw", "decoded");
    println!("{:-<8}  {:-<10}  {:-<12}", "", "", "");

    for word in words {
        for _ in 0..average {
            adc.bus_mut().push_sample(word).map_err(|_| "queue full")?;
        }

        let reading = SensorPort::read(&mut adc)?;
        println!(
            "{:>8}  {:>#10x}  {:>12}",
            format!("{:06x}", word),
            reading.raw,
            reading.value
        );
    }

    adc.deinit()?;
    println!(
        "\npowered down after {} clock pulses, {} µs of delays",
        adc.bus().rising_edges(),
        adc.bus().elapsed_us()
    );

    Ok(())
}

fn print_help() {
    println!("hx711_sim [--gain <1|2|3>] [--average <n>] [--tare] [hex words...]");
    println!();
    println!("  --gain     gain code: 1 = 128 (A), 2 = 32 (B), 3 = 64 (A)");
    println!(
        "  --average  conversions averaged per reading, 1 to {} (default 1)",
        SIM_QUEUE_DEPTH
    );
    println!("  --tare     use the first word as the zero point");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let options = parse_args(&[]).unwrap();
        assert_eq!(options.gain, Gain::Gain128);
        assert_eq!(options.average, 1);
        assert!(!options.tare);
        assert_eq!(options.words, DEFAULT_WORDS.to_vec());
    }

    #[test]
    fn test_flags_and_words() {
        let options = parse_args(&args(&[
            "--gain", "3", "--average", "16", "--tare", "0x7ffffb", "800000",
        ]))
        .unwrap();
        assert_eq!(options.gain, Gain::Gain64);
        assert_eq!(options.average, 16);
        assert!(options.tare);
        assert_eq!(options.words, vec![0x7F_FFFB, 0x80_0000]);
    }

    #[test]
    fn test_average_must_fit_the_queue() {
        assert!(parse_args(&args(&["--average", "0"])).is_err());
        assert!(parse_args(&args(&["--average", "17"])).is_err());
        assert!(parse_args(&args(&["--gain", "4"])).is_err());
    }

    #[test]
    fn test_init_and_full_average_fit_the_queue() {
        let mut sim = SimulatedHx711::new();
        sim.push_sample(0).unwrap();
        let config = AdcConfig::new().with_averaging(SIM_QUEUE_DEPTH as u8);
        let mut adc = Hx711Adc::new(sim, config);
        adc.init().unwrap();

        for _ in 0..SIM_QUEUE_DEPTH {
            adc.bus_mut().push_sample(0x7F_FFFB).unwrap();
        }
        let reading = SensorPort::read(&mut adc).unwrap();
        assert_eq!(reading.value, 10);
    }
}
