#![forbid(unsafe_code)]

//! `updown-demo`: drive a numeric up/down control from the command line.
//!
//! ```text
//! updown-demo --min 0 --max 10 --value 8 up up up type:x replace:-3 vm:4
//! ```
//!
//! Each action is applied in order and the rendered control is printed next
//! to the view model's value. Set `RUST_LOG=debug` to see commits and
//! rejections.

mod action;
mod view_model;
mod window;

use std::cell::RefCell;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use updown_widgets::{ConfigError, NumericUpDownConfig};

use crate::action::Action;
use crate::view_model::MainWindowViewModel;
use crate::window::MainWindow;

#[derive(Debug, Parser)]
#[command(
    name = "updown-demo",
    version,
    about = "Numeric up/down control bound to a view model"
)]
struct Cli {
    /// TOML file with value, minimum, maximum and step.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Lower bound (overrides the config file).
    #[arg(long, allow_negative_numbers = true)]
    min: Option<i32>,

    /// Upper bound (overrides the config file).
    #[arg(long, allow_negative_numbers = true)]
    max: Option<i32>,

    /// Increment/decrement step (overrides the config file).
    #[arg(long, allow_negative_numbers = true)]
    step: Option<i32>,

    /// Initial value (overrides the config file).
    #[arg(long, allow_negative_numbers = true)]
    value: Option<i32>,

    /// Rendered width in columns.
    #[arg(long, default_value_t = 16)]
    width: usize,

    /// Actions: up, down, hold-up:N, hold-down:N, type:TEXT, replace:TEXT,
    /// backspace, caret:N, vm:N, show, hide.
    actions: Vec<Action>,
}

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Cli {
    fn resolve_config(&self) -> Result<NumericUpDownConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => NumericUpDownConfig::load(path)?,
            None => NumericUpDownConfig::default(),
        };
        if let Some(minimum) = self.min {
            config.minimum = minimum;
        }
        if let Some(maximum) = self.max {
            config.maximum = maximum;
        }
        if let Some(step) = self.step {
            config.step = step;
        }
        if let Some(value) = self.value {
            config.value = value;
        }
        config.validate()?;
        Ok(config)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), DemoError> {
    let config = cli.resolve_config()?;
    tracing::info!(?config, "starting");

    let window = MainWindow::new(MainWindowViewModel::new(), &config, cli.width)?;

    let notifications = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&notifications);
    let _changed = window
        .view_model()
        .subscribe_property_changed(move |changed| log.borrow_mut().push(changed.property_name));

    window.show();
    println!("{:<16} {}  {}", "(initial)", window.render(), window.status());

    for action in &cli.actions {
        window.apply(action);
        let changed = notifications.borrow_mut().drain(..).count();
        println!(
            "{:<16} {}  {}{}",
            action.to_string(),
            window.render(),
            window.status(),
            if changed > 0 {
                format!("  ({changed} change notification(s))")
            } else {
                String::new()
            }
        );
    }

    window.hide();
    tracing::info!(value = window.control().value(), "done");
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
