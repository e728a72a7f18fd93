//! Typed settings that a session turns into HiGHS option assignments.

use crate::options::OptionValue;

/// Named HiGHS settings, applied by [`crate::Session::with_config`] or
/// [`crate::Session::apply_config`].
///
/// A `None` field emits no assignment, so HiGHS keeps its own value.
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    /// `time_limit`, in seconds.
    pub time_limit: Option<f64>,
    /// `mip_rel_gap`.
    pub mip_gap: Option<f64>,
    /// Drives `output_flag`: zero silences HiGHS, anything higher enables it.
    pub verbosity: Option<u32>,
    /// `presolve`, sent as the string `"on"` or `"off"`.
    pub presolve: Option<bool>,
    /// `threads`. HiGHS fixes its scheduler size on the first run in a
    /// process, so later changes only apply to new processes.
    pub threads: Option<u32>,
    /// Written to both `primal_feasibility_tolerance` and
    /// `dual_feasibility_tolerance`.
    pub tolerance: Option<f64>,
    /// `log_to_console`; `true` also forces `output_flag` on.
    pub log_to_console: Option<bool>,
    /// `solver`: `simplex`, `ipm`, `pdlp` or `choose`.
    pub solver: Option<String>,
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = Some(seconds);
        self
    }

    pub fn with_mip_gap(mut self, gap: f64) -> Self {
        self.mip_gap = Some(gap);
        self
    }

    pub fn with_verbosity(mut self, level: u32) -> Self {
        self.verbosity = Some(level);
        self
    }

    pub fn with_presolve(mut self, enabled: bool) -> Self {
        self.presolve = Some(enabled);
        self
    }

    pub fn with_threads(mut self, count: u32) -> Self {
        self.threads = Some(count);
        self
    }

    /// Same tolerance for primal and dual feasibility.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    pub fn with_log_to_console(mut self, enabled: bool) -> Self {
        self.log_to_console = Some(enabled);
        self
    }

    pub fn with_solver(mut self, solver: impl Into<String>) -> Self {
        self.solver = Some(solver.into());
        self
    }

    /// True when applying this configuration would not touch any option.
    pub fn is_empty(&self) -> bool {
        self.options().is_empty()
    }

    /// HiGHS option assignments in the order they must be applied.
    ///
    /// `log_to_console` comes after `verbosity` so that it can switch
    /// `output_flag` back on.
    pub fn options(&self) -> Vec<(&'static str, OptionValue)> {
        let mut options = Vec::new();

        if let Some(limit) = self.time_limit {
            options.push(("time_limit", OptionValue::Double(limit)));
        }
        if let Some(gap) = self.mip_gap {
            options.push(("mip_rel_gap", OptionValue::Double(gap)));
        }
        if let Some(level) = self.verbosity {
            options.push(("output_flag", OptionValue::Bool(level > 0)));
        }
        if let Some(presolve) = self.presolve {
            let presolve_str = if presolve { "on" } else { "off" };
            options.push(("presolve", OptionValue::Str(presolve_str.to_string())));
        }
        if let Some(threads) = self.threads {
            let threads = i32::try_from(threads).unwrap_or(i32::MAX);
            options.push(("threads", OptionValue::Int(threads)));
        }
        if let Some(tolerance) = self.tolerance {
            options.push((
                "primal_feasibility_tolerance",
                OptionValue::Double(tolerance),
            ));
            options.push(("dual_feasibility_tolerance", OptionValue::Double(tolerance)));
        }
        if let Some(solver) = &self.solver {
            options.push(("solver", OptionValue::Str(solver.clone())));
        }
        if let Some(enabled) = self.log_to_console {
            options.push(("log_to_console", OptionValue::Bool(enabled)));
            if enabled {
                options.push(("output_flag", OptionValue::Bool(true)));
            }
        }

        options
    }
}
