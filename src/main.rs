use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use vcpctl::{
    parse_code, parse_value, Controller, Delay, DisplayChannelProvider, InputSource, PowerMode,
    ThreadDelay, UsbPort, VcpReply,
};

mod config;
mod ddc;

use crate::config::Config;
use crate::ddc::DdcHiProvider;

/// Control external monitors over DDC/CI
#[derive(Parser)]
#[command(name = "kvmctl", version)]
struct Cli {
    /// YAML config file, the built-in defaults are used otherwise
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Monitor index as shown by `list`
    #[arg(short, long, global = true)]
    monitor: Option<usize>,
    /// Log every DDC/CI exchange
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List attached monitors
    List,
    /// Show or switch the video input (e.g. HDMI1, DP2, 0x0f)
    Input { source: Option<InputSource> },
    /// Show or switch the USB upstream port
    Usb {
        port: Option<UsbPort>,
        /// Vendor codes to try instead of the configured ones
        #[arg(long, value_delimiter = ',', value_parser = parse_code)]
        codes: Vec<u8>,
    },
    /// Switch video input and then USB upstream port
    Kvm { input: InputSource, usb: UsbPort },
    /// Show or set brightness (0-100)
    Brightness { value: Option<u16> },
    /// Show or set contrast (0-100)
    Contrast { value: Option<u16> },
    /// Show or set power mode (On, Standby, Suspend, Off, HardOff)
    Power { mode: Option<PowerMode> },
    /// Raw VCP feature access
    Vcp {
        #[command(subcommand)]
        action: VcpAction,
    },
    /// Read all standard and manufacturer specific codes
    Caps,
    /// Cycle vendor codes to find the USB switch (changes monitor state!)
    DiscoverUsb,
}

#[derive(Subcommand)]
enum VcpAction {
    Get {
        #[arg(value_parser = parse_code)]
        code: u8,
    },
    Set {
        #[arg(value_parser = parse_code)]
        code: u8,
        #[arg(value_parser = parse_value)]
        value: u16,
    },
}

fn print_reply(label: &str, reply: &VcpReply) {
    println!("{}: {} (max {})", label, reply.current, reply.maximum);
}

fn run<P: DisplayChannelProvider, D: Delay>(
    ctl: &mut Controller<P, D>,
    monitor: usize,
    command: Command,
) -> anyhow::Result<()> {
    match command {
        Command::List => {
            let monitors = ctl.list_monitors();
            if monitors.is_empty() {
                println!("No DDC/CI capable monitors found");
            }
            for m in monitors {
                println!("{}: {}", m.index, m.description);
            }
        }
        Command::Input { source: None } => {
            println!("{}", ctl.current_input(monitor)?);
        }
        Command::Input {
            source: Some(source),
        } => ctl.switch_input(monitor, source)?,
        Command::Usb { port, codes } => {
            let codes = (!codes.is_empty()).then_some(codes.as_slice());
            match port {
                Some(port) => ctl.switch_usb(monitor, port, codes)?,
                None => match ctl.current_usb_port(monitor, codes)? {
                    Some(port) => println!("{}", port),
                    None => println!("USB switching not supported"),
                },
            }
        }
        Command::Kvm { input, usb } => ctl.switch_kvm(monitor, input, usb)?,
        Command::Brightness { value: None } => print_reply("brightness", &ctl.brightness(monitor)?),
        Command::Brightness { value: Some(v) } => ctl.set_brightness(monitor, v)?,
        Command::Contrast { value: None } => print_reply("contrast", &ctl.contrast(monitor)?),
        Command::Contrast { value: Some(v) } => ctl.set_contrast(monitor, v)?,
        Command::Power { mode: None } => println!("{}", ctl.power_mode(monitor)?),
        Command::Power { mode: Some(mode) } => ctl.set_power_mode(monitor, mode)?,
        Command::Vcp {
            action: VcpAction::Get { code },
        } => print_reply(&format!("{code:#04x}"), &ctl.get_vcp(monitor, code)?),
        Command::Vcp {
            action: VcpAction::Set { code, value },
        } => ctl.set_vcp(monitor, code, value)?,
        Command::Caps => {
            for entry in ctl.discover_capabilities(monitor)? {
                println!(
                    "{:#04x} {:<22} current={} max={}",
                    entry.code, entry.name, entry.reply.current, entry.reply.maximum
                );
            }
        }
        Command::DiscoverUsb => {
            log::warn!("cycling vendor codes on monitor {monitor}, watch your USB devices");
            ctl.discover_usb_code(monitor)?;
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose > 0 { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::new()?,
    };
    let monitor = cli.monitor.unwrap_or(config.default_monitor);
    let mut ctl = Controller::new(
        DdcHiProvider::new(),
        ThreadDelay,
        config.controller_options(),
    );
    run(&mut ctl, monitor, cli.command).with_context(|| format!("monitor {monitor}"))
}

#[cfg(test)]
mod test {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_kvm_and_usb_codes() {
        let cli = Cli::try_parse_from(["kvmctl", "-m", "1", "kvm", "hdmi1", "usb2"]).unwrap();
        assert_eq!(cli.monitor, Some(1));
        assert!(matches!(
            cli.command,
            Command::Kvm {
                input: InputSource::HDMI1,
                usb: UsbPort::USB2
            }
        ));

        let cli = Cli::try_parse_from(["kvmctl", "usb", "1", "--codes", "0xe7,0xf0"]).unwrap();
        match cli.command {
            Command::Usb { port, codes } => {
                assert_eq!(port, Some(UsbPort::USB1));
                assert_eq!(codes, vec![0xE7, 0xF0]);
            }
            _ => panic!("expected usb command"),
        }
    }

    #[test]
    fn rejects_negative_monitor_index() {
        assert!(Cli::try_parse_from(["kvmctl", "-m", "-1", "list"]).is_err());
    }
}
