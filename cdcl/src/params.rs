use log::info;

pub struct SolverParams {
    pub var_decay: f64,
    pub clause_decay: f64,
    pub luby_restart: bool,
    /// Recursive minimization of learnt clauses.
    pub ccmin: bool,
    pub phase_saving: bool,
    pub remove_satisfied: bool,
    pub garbage_frac: f64,
    pub min_learnts_lim: u32,
    pub restart_first: u32,
    pub restart_inc: f64,
    pub learntsize_factor: f64,
    pub learntsize_inc: f64,
    pub learntsize_adjust_start_confl: u32,
    pub learntsize_adjust_inc: f64,
    /// 0 is silent, 1 logs search progress, 2 adds statistics after each solve.
    pub verbosity: u32,
}

impl Default for SolverParams {
    fn default() -> Self {
        SolverParams {
            var_decay: 0.95,
            clause_decay: 0.999,
            luby_restart: true,
            ccmin: true,
            phase_saving: true,
            remove_satisfied: true,
            garbage_frac: 0.20,
            min_learnts_lim: 0,
            restart_first: 100,
            restart_inc: 2.0,
            learntsize_factor: 1.0 / 3.0,
            learntsize_inc: 1.1,
            learntsize_adjust_start_confl: 100,
            learntsize_adjust_inc: 1.5,
            verbosity: 1,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct SolverStatistics {
    pub solves: usize,
    pub starts: usize,
    pub decisions: usize,
    pub propagations: usize,
    pub conflicts: usize,
    pub num_clauses: usize,
    pub num_learnts: usize,
    pub clauses_literals: usize,
    pub learnts_literals: usize,
    pub max_literals: usize,
    pub tot_literals: usize,
}

impl SolverStatistics {
    pub fn log_summary(&self, solve_start: cpu_time::ProcessTime) {
        let duration = cpu_time::ProcessTime::now()
            .duration_since(solve_start)
            .as_millis() as f64
            / 1000.0;
        let per_sec = |n: usize| n as f64 / duration.max(1e-3);
        info!("* stats:");
        info!("  - restarts: {}", self.starts);
        info!(
            "  - conflicts: {}  ({:.0} /sec)",
            self.conflicts,
            per_sec(self.conflicts)
        );
        info!(
            "  - decisions: {}  ({:.0} /sec)",
            self.decisions,
            per_sec(self.decisions)
        );
        info!(
            "  - propagations: {}  ({:.0} /sec)",
            self.propagations,
            per_sec(self.propagations)
        );
        if self.max_literals > 0 {
            info!(
                "  - conflict literals: {}  ({:.2} % deleted)",
                self.tot_literals,
                (self.max_literals - self.tot_literals) as f64 * 100.0 / self.max_literals as f64
            );
        }
        info!("  - cpu time: {:.2}s", duration);
    }
}
