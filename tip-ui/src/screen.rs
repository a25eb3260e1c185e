//! Line-driven calculator screen.
//!
//! Reads [`Command`]s, feeds them to the input owners and renders every
//! result and reset the calculator produces.

use std::io::Write;
use std::ops::ControlFlow;
use std::time::Duration;

use anyhow::Result;
use tip_core::inputs::BillNormalizer;
use tip_core::streams::Subscriptions;
use tip_core::{CalculatorInput, ResetSignal, Tip, TipCalculator, TipResult};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, warn};

use crate::commands::{Command, USAGE};
use crate::logging;
use crate::state::ScreenState;
use crate::utils::format_currency;

pub struct CalculatorScreen<W> {
    state: ScreenState,
    updates: UnboundedReceiver<TipResult>,
    reset: broadcast::Receiver<ResetSignal>,
    reset_closed: bool,
    subscriptions: Subscriptions,
    quiet_period: Duration,
    currency_symbol: String,
    out: W,
}

impl<W: Write> CalculatorScreen<W> {
    /// Binds a fresh set of inputs to `calculator` and focuses the bill
    /// field. Must be called inside a tokio runtime.
    pub fn bind(
        calculator: &TipCalculator,
        currency_symbol: impl Into<String>,
        out: W,
    ) -> Self {
        let quiet_period = calculator.config().quiet_period;
        let (state, streams) = ScreenState::new();
        let (bill, normalizer) = BillNormalizer::spawn(streams.bill_events, quiet_period);

        let output = calculator.transform(CalculatorInput {
            bill,
            tip: streams.tips,
            party_size: streams.party_sizes,
            logo_taps: streams.logo_taps,
        });
        let mut subscriptions = output.subscriptions;
        subscriptions.push("bill_normalizer", normalizer);

        state.bill.focus();

        Self {
            state,
            updates: output.updates,
            reset: output.reset,
            reset_closed: false,
            subscriptions,
            quiet_period,
            currency_symbol: currency_symbol.into(),
            out,
        }
    }

    /// Runs until `input` ends or `quit` is read, then lets pending bill text
    /// settle and returns the writer.
    pub async fn run<R>(
        mut self,
        input: R,
    ) -> Result<W>
    where
        R: AsyncBufRead + Unpin,
    {
        info!("calculator screen started");
        let mut lines = input.lines();

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        break;
                    };
                    if self.handle_line(&line).await?.is_break() {
                        break;
                    }
                }
                Some(result) = self.updates.recv() => self.render_result(&result)?,
                signal = self.reset.recv(), if !self.reset_closed => self.on_reset_signal(signal)?,
            }
        }

        self.settle(self.quiet_period * 2).await?;
        for (task, outcome) in self.subscriptions.shutdown().await {
            logging::log_task_error(task, outcome);
        }
        info!("calculator screen closed");
        Ok(self.out)
    }

    async fn handle_line(
        &mut self,
        line: &str,
    ) -> Result<ControlFlow<()>> {
        if line.trim().is_empty() {
            return Ok(ControlFlow::Continue(()));
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(error) => {
                warn!(%line, %error, "ignoring command");
                writeln!(self.out, "{error}")?;
                return Ok(ControlFlow::Continue(()));
            }
        };
        debug!(?command, "command");

        match command {
            Command::Bill(text) => self.state.bill.edit(text),
            Command::Tip(tip) => {
                self.state.tip.select(tip);
                self.render_tip()?;
            }
            Command::CustomTip(text) => {
                if self.state.tip.select_custom(&text).is_some() {
                    self.render_tip()?;
                } else {
                    writeln!(self.out, "custom tip must be a whole number")?;
                }
            }
            Command::SplitUp => {
                self.state.split.increment();
                self.render_split()?;
            }
            Command::SplitDown => {
                self.state.split.decrement();
                self.render_split()?;
            }
            Command::Logo => self.state.tap_logo(),
            Command::Wait(duration) => self.settle(duration).await?,
            Command::LogLevel(filter) => match logging::set_log_level(&filter) {
                Ok(()) => writeln!(self.out, "log filter: {filter}")?,
                Err(error) => writeln!(self.out, "{error}")?,
            },
            Command::Help => writeln!(self.out, "{USAGE}")?,
            Command::Quit => return Ok(ControlFlow::Break(())),
        }
        Ok(ControlFlow::Continue(()))
    }

    /// Processes results and resets for `duration` without reading input.
    async fn settle(
        &mut self,
        duration: Duration,
    ) -> Result<()> {
        let deadline = Instant::now() + duration;
        loop {
            tokio::select! {
                biased;
                Some(result) = self.updates.recv() => self.render_result(&result)?,
                signal = self.reset.recv(), if !self.reset_closed => self.on_reset_signal(signal)?,
                _ = sleep_until(deadline) => return Ok(()),
            }
        }
    }

    fn on_reset_signal(
        &mut self,
        signal: Result<ResetSignal, RecvError>,
    ) -> Result<()> {
        match signal {
            Ok(ResetSignal) => self.reset_inputs(),
            Err(RecvError::Lagged(missed)) => {
                warn!(missed, "reset signals lagged");
                self.reset_inputs()
            }
            Err(RecvError::Closed) => {
                self.reset_closed = true;
                Ok(())
            }
        }
    }

    fn reset_inputs(&mut self) -> Result<()> {
        self.state.clear_inputs();
        writeln!(self.out, "* calculator reset *")?;
        Ok(())
    }

    fn render_result(
        &mut self,
        result: &TipResult,
    ) -> Result<()> {
        let symbol = &self.currency_symbol;
        writeln!(
            self.out,
            "Total p/person: {} | Total bill: {} | Total tip: {}",
            format_currency(result.amount_per_person, symbol),
            format_currency(result.total_bill, symbol),
            format_currency(result.total_tip, symbol),
        )?;
        Ok(())
    }

    fn render_tip(&mut self) -> Result<()> {
        let label = match self.state.tip.current() {
            Tip::None => "none".to_string(),
            Tip::Custom(amount) => format_currency(f64::from(amount), &self.currency_symbol),
            tip => tip.label(),
        };
        writeln!(self.out, "Tip: {label}")?;
        Ok(())
    }

    fn render_split(&mut self) -> Result<()> {
        writeln!(self.out, "Split: {}", self.state.split.current())?;
        Ok(())
    }
}
