use crate::io::{ConfigurablePrintTarget, PrintTarget};
use std::io::Write;
use std::time::Duration;

/// Summary of the most recent checkout of a [`Dualizer`](crate::dualizer::Dualizer)
#[derive(Debug, Default)]
pub struct DualizerInfo {
    /// number of checkouts performed so far
    pub checkouts: u32,
    /// number of checkins performed so far
    pub checkins: u32,
    /// primal constraints whose multiplier is represented by a slack's dual variable
    pub slack_multipliers: usize,
    /// primal constraints whose multiplier is represented by a second-order cone
    pub soc_multipliers: usize,
    /// slack dual variables rescaled for a non-unit slack coefficient
    pub rescaled_slacks: usize,
    /// variables in the dual program
    pub dual_variables: usize,
    /// linear constraints in the dual program
    pub dual_constraints: usize,
    /// cones in the dual program
    pub dual_cones: usize,
    /// time spent building the dual program
    pub checkout_time: Duration,

    // target stream for printing
    stream: PrintTarget,
}

impl DualizerInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn print_checkout_summary(
        &mut self,
        primal: (usize, usize, usize),
    ) -> std::io::Result<()> {
        let (nvars, ncons, ncones) = primal;
        let out = &mut self.stream;

        writeln!(out, "\nconicdual v{}: dual checkout {}", crate::VERSION, self.checkouts)?;
        writeln!(out, "  primal variables    = {}", nvars)?;
        writeln!(out, "  primal constraints  = {}", ncons)?;
        writeln!(out, "  primal cones        = {}", ncones)?;
        writeln!(out, "  dual variables      = {}", self.dual_variables)?;
        writeln!(out, "  dual constraints    = {}", self.dual_constraints)?;
        writeln!(out, "  dual cones          = {}", self.dual_cones)?;
        writeln!(
            out,
            "  multipliers         = {} slack ({} rescaled), {} soc",
            self.slack_multipliers, self.rescaled_slacks, self.soc_multipliers
        )?;
        writeln!(out, "  checkout time       = {:.3e}s", self.checkout_time.as_secs_f64())?;

        out.flush()
    }
}

impl ConfigurablePrintTarget for DualizerInfo {
    fn print_to_stdout(&mut self) {
        self.stream.print_to_stdout()
    }
    fn print_to_stream(&mut self, stream: Box<dyn Write + Send + Sync>) {
        self.stream.print_to_stream(stream)
    }
    fn print_to_sink(&mut self) {
        self.stream.print_to_sink()
    }
    fn print_to_buffer(&mut self) {
        self.stream.print_to_buffer()
    }
    fn get_print_buffer(&mut self) -> std::io::Result<String> {
        self.stream.get_print_buffer()
    }
}
