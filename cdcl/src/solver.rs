use crate::clausedb::{CRef, ClauseDatabase, CREF_NONE};
use crate::heap::OrderHeap;
use crate::lits::*;
use crate::params::{SolverParams, SolverStatistics};
use log::{debug, info, trace};
use sattrait::{LitCode, SearchEngine, VarIndex};

#[derive(Copy, Clone)]
struct VariableData {
    reason: CRef,
    level: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Watcher {
    cref: CRef,
    blocker: Lit,
}

pub struct Solver {
    pub params: SolverParams,
    stats: SolverStatistics,

    // results of the last solve
    model: Vec<LBool>,
    conflict: Vec<Lit>,

    clause_database: ClauseDatabase,
    clauses: Vec<CRef>,
    learnts: Vec<CRef>,

    trail: Vec<Lit>,
    trail_lim: Vec<usize>,
    assumptions: Vec<Lit>,

    // variable maps
    activity: Vec<f64>,
    assigns: Vec<LBool>,
    polarity: Vec<bool>,
    vardata: Vec<VariableData>,
    // literal map
    watches: Vec<Vec<Watcher>>,

    order_heap: OrderHeap,

    ok: bool,
    cla_inc: f64,
    var_inc: f64,
    qhead: usize,
    simp_db_assigns: Option<usize>,
    simp_db_props: i64,
    next_var: i32,

    seen: Vec<bool>,
    analyze_stack: Vec<Lit>,
    analyze_toclear: Vec<Lit>,
    add_tmp: Vec<Lit>,

    max_learnts: f64,
    learntsize_adjust_confl: f64,
    learntsize_adjust_cnt: i64,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    pub fn new() -> Self {
        Self::with_params(SolverParams::default())
    }

    pub fn with_params(params: SolverParams) -> Self {
        Solver {
            params,
            stats: Default::default(),
            model: Vec::new(),
            conflict: Vec::new(),
            clause_database: ClauseDatabase::default(),
            clauses: Vec::new(),
            learnts: Vec::new(),
            trail: Vec::new(),
            trail_lim: Vec::new(),
            assumptions: Vec::new(),
            activity: Vec::new(),
            assigns: Vec::new(),
            polarity: Vec::new(),
            vardata: Vec::new(),
            watches: Vec::new(),
            order_heap: OrderHeap::default(),
            ok: true,
            cla_inc: 1.0,
            var_inc: 1.0,
            qhead: 0,
            simp_db_assigns: None,
            simp_db_props: 0,
            next_var: 0,
            seen: Vec::new(),
            analyze_stack: Vec::new(),
            analyze_toclear: Vec::new(),
            add_tmp: Vec::new(),
            max_learnts: 0.0,
            learntsize_adjust_confl: 0.0,
            learntsize_adjust_cnt: 0,
        }
    }

    pub fn num_vars(&self) -> usize {
        self.next_var as usize
    }
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }
    pub fn num_learnts(&self) -> usize {
        self.learnts.len()
    }
    pub fn stats(&self) -> &SolverStatistics {
        &self.stats
    }

    /// False once the clause database is known to be contradictory.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Assignment found by the last successful `solve`, indexed by variable.
    /// Empty if the last call did not find a model.
    pub fn model(&self) -> &[LBool] {
        &self.model
    }

    pub fn model_value(&self, lit: Lit) -> LBool {
        self.model
            .get(lit.var().idx())
            .map_or(LBool::Undef, |v| v.xor(lit.sign()))
    }

    /// After a `solve` that failed because of its assumptions: a clause made
    /// of negated assumptions that the clause database contradicts.
    pub fn conflict(&self) -> &[Lit] {
        &self.conflict
    }

    pub fn new_var(&mut self) -> Var {
        let var = Var(self.next_var);
        self.next_var += 1;

        self.watches.push(Vec::new());
        self.watches.push(Vec::new());
        self.assigns.push(LBool::Undef);
        self.vardata.push(VariableData {
            reason: CREF_NONE,
            level: 0,
        });
        self.activity.push(0.0);
        self.polarity.push(true);
        self.seen.push(false);
        self.order_heap.insert(var, &self.activity);
        var
    }

    fn value_in(assigns: &[LBool], lit: Lit) -> LBool {
        assigns[lit.var().idx()].xor(lit.sign())
    }

    fn lit_value(&self, lit: Lit) -> LBool {
        Self::value_in(&self.assigns, lit)
    }

    fn decision_level(&self) -> u32 {
        self.trail_lim.len() as u32
    }

    fn level(&self, var: Var) -> u32 {
        self.vardata[var.idx()].level
    }

    fn reason(&self, var: Var) -> CRef {
        self.vardata[var.idx()].reason
    }

    fn abstract_level(&self, var: Var) -> u32 {
        1 << (self.level(var) & 31)
    }

    /// Add a permanent clause. Only allowed at decision level zero.
    pub fn add_clause(&mut self, ps: impl IntoIterator<Item = Lit>) -> bool {
        assert!(self.trail_lim.is_empty());
        if !self.ok {
            return false;
        }

        self.add_tmp.clear();
        self.add_tmp.extend(ps);
        self.add_tmp.sort_unstable();

        let mut prev = LIT_UNDEF;
        let mut j = 0;
        for i in 0..self.add_tmp.len() {
            let l = self.add_tmp[i];
            debug_assert!(l.var().idx() < self.assigns.len());
            let value = self.lit_value(l);
            if value == LBool::True || (prev != LIT_UNDEF && l == !prev) {
                // satisfied or tautology
                return true;
            }
            if value != LBool::False && l != prev {
                self.add_tmp[j] = l;
                j += 1;
                prev = l;
            }
        }
        self.add_tmp.truncate(j);
        trace!("add_clause {:?}", self.add_tmp);

        match self.add_tmp.len() {
            0 => {
                self.ok = false;
            }
            1 => {
                self.unchecked_enqueue(self.add_tmp[0], CREF_NONE);
                self.ok = self.propagate() == CREF_NONE;
            }
            _ => {
                let cref = self.clause_database.alloc(&self.add_tmp, false);
                self.clauses.push(cref);
                self.attach_clause(cref);
            }
        }
        self.ok
    }

    fn attach_clause(&mut self, cref: CRef) {
        let db = &self.clause_database;
        let size = db.size(cref);
        debug_assert!(size > 1);
        let (c0, c1) = (db.lit(cref, 0), db.lit(cref, 1));
        self.watches[(!c0).idx()].push(Watcher { cref, blocker: c1 });
        self.watches[(!c1).idx()].push(Watcher { cref, blocker: c0 });

        if db.is_learnt(cref) {
            self.stats.num_learnts += 1;
            self.stats.learnts_literals += size;
        } else {
            self.stats.num_clauses += 1;
            self.stats.clauses_literals += size;
        }
    }

    fn detach_clause(&mut self, cref: CRef) {
        let db = &self.clause_database;
        let size = db.size(cref);
        let (c0, c1) = (db.lit(cref, 0), db.lit(cref, 1));
        self.watches[(!c0).idx()].retain(|w| w.cref != cref);
        self.watches[(!c1).idx()].retain(|w| w.cref != cref);

        if db.is_learnt(cref) {
            self.stats.num_learnts -= 1;
            self.stats.learnts_literals -= size;
        } else {
            self.stats.num_clauses -= 1;
            self.stats.clauses_literals -= size;
        }
    }

    fn remove_clause(&mut self, cref: CRef) {
        self.detach_clause(cref);
        if self.is_locked(cref) {
            let var = self.clause_database.lit(cref, 0).var();
            self.vardata[var.idx()].reason = CREF_NONE;
        }
        self.clause_database.free(cref);
    }

    /// A clause is locked while it is the reason of a current assignment.
    fn is_locked(&self, cref: CRef) -> bool {
        let first = self.clause_database.lit(cref, 0);
        self.lit_value(first) == LBool::True && self.reason(first.var()) == cref
    }

    fn is_satisfied(&self, cref: CRef) -> bool {
        self.clause_database
            .lits(cref)
            .any(|l| Self::value_in(&self.assigns, l) == LBool::True)
    }

    fn new_decision_level(&mut self) {
        self.trail_lim.push(self.trail.len());
    }

    fn unchecked_enqueue(&mut self, lit: Lit, reason: CRef) {
        trace!("assign {:?}", lit);
        debug_assert!(self.lit_value(lit) == LBool::Undef);
        self.assigns[lit.var().idx()] = LBool::from_bool(!lit.sign());
        self.vardata[lit.var().idx()] = VariableData {
            reason,
            level: self.decision_level(),
        };
        self.trail.push(lit);
    }

    fn cancel_until(&mut self, level: u32) {
        if self.decision_level() <= level {
            return;
        }
        let lim = self.trail_lim[level as usize];
        for c in (lim..self.trail.len()).rev() {
            let x = self.trail[c];
            self.assigns[x.var().idx()] = LBool::Undef;
            if self.params.phase_saving {
                self.polarity[x.var().idx()] = x.sign();
            }
            self.insert_var_order(x.var());
        }
        self.qhead = lim;
        self.trail.truncate(lim);
        self.trail_lim.truncate(level as usize);
    }

    fn insert_var_order(&mut self, var: Var) {
        if !self.order_heap.contains(var) {
            self.order_heap.insert(var, &self.activity);
        }
    }

    fn var_bump_activity(&mut self, var: Var) {
        self.activity[var.idx()] += self.var_inc;
        if self.activity[var.idx()] > 1e100 {
            // rescale
            for act in self.activity.iter_mut() {
                *act *= 1e-100;
            }
            self.var_inc *= 1e-100;
        }
        self.order_heap.increased(var, &self.activity);
    }

    fn clause_bump_activity(&mut self, cref: CRef) {
        let activity = self.clause_database.activity(cref) + self.cla_inc as f32;
        self.clause_database.set_activity(cref, activity);
        if activity > 1e20 {
            // rescale
            for &c in self.learnts.iter() {
                let a = self.clause_database.activity(c);
                self.clause_database.set_activity(c, a * 1e-20);
            }
            self.cla_inc *= 1e-20;
        }
    }

    fn pick_branch_lit(&mut self) -> Lit {
        loop {
            match self.order_heap.remove_max(&self.activity) {
                None => return LIT_UNDEF,
                Some(v) if self.assigns[v.idx()] == LBool::Undef => {
                    return Lit::new(v, self.polarity[v.idx()]);
                }
                Some(_) => {}
            }
        }
    }

    /// Propagate all enqueued facts. Returns the conflicting clause, if any.
    fn propagate(&mut self) -> CRef {
        profile!("propagate");
        let mut conflict = CREF_NONE;
        let mut num_props = 0;

        while self.qhead < self.trail.len() {
            let p = self.trail[self.qhead];
            self.qhead += 1;
            num_props += 1;
            trace!("propagating {:?}", p);

            let false_lit = !p;
            let mut ws = std::mem::take(&mut self.watches[p.idx()]);
            let (mut i, mut j) = (0, 0);
            'watches: while i < ws.len() {
                let w = ws[i];
                i += 1;
                if Self::value_in(&self.assigns, w.blocker) == LBool::True {
                    ws[j] = w;
                    j += 1;
                    continue;
                }

                // make sure the false literal is at position 1
                let db = &mut self.clause_database;
                let cref = w.cref;
                if db.lit(cref, 0) == false_lit {
                    db.swap_lits(cref, 0, 1);
                }
                debug_assert_eq!(db.lit(cref, 1), false_lit);

                let first = db.lit(cref, 0);
                let new_watch = Watcher {
                    cref,
                    blocker: first,
                };
                if first != w.blocker && Self::value_in(&self.assigns, first) == LBool::True {
                    ws[j] = new_watch;
                    j += 1;
                    continue;
                }

                // look for a new literal to watch
                for k in 2..db.size(cref) {
                    let lk = db.lit(cref, k);
                    if Self::value_in(&self.assigns, lk) != LBool::False {
                        db.set_lit(cref, 1, lk);
                        db.set_lit(cref, k, false_lit);
                        self.watches[(!lk).idx()].push(new_watch);
                        continue 'watches;
                    }
                }

                // clause is unit or conflicting under the current assignment
                ws[j] = new_watch;
                j += 1;
                if Self::value_in(&self.assigns, first) == LBool::False {
                    trace!("conflict in clause {}", cref);
                    conflict = cref;
                    self.qhead = self.trail.len();
                    while i < ws.len() {
                        ws[j] = ws[i];
                        j += 1;
                        i += 1;
                    }
                } else {
                    self.unchecked_enqueue(first, cref);
                }
            }
            ws.truncate(j);
            self.watches[p.idx()] = ws;
        }

        self.stats.propagations += num_props;
        self.simp_db_props -= num_props as i64;
        conflict
    }

    /// Analyze a conflict and produce the first-UIP learnt clause.
    ///
    /// On return, `out_learnt[0]` is the asserting literal and, if there are
    /// more literals, `out_learnt[1]` has the highest decision level among
    /// the rest. The returned level is where the clause becomes asserting.
    fn analyze(&mut self, mut conflict: CRef, out_learnt: &mut Vec<Lit>) -> u32 {
        profile!("analyze");
        let mut path_c = 0usize;
        let mut p = LIT_UNDEF;
        let mut index = self.trail.len();
        out_learnt.push(LIT_UNDEF);

        loop {
            debug_assert!(conflict != CREF_NONE);
            if self.clause_database.is_learnt(conflict) {
                self.clause_bump_activity(conflict);
            }

            let skip = if p == LIT_UNDEF { 0 } else { 1 };
            for k in skip..self.clause_database.size(conflict) {
                let q = self.clause_database.lit(conflict, k);
                let v = q.var();
                if !self.seen[v.idx()] && self.level(v) > 0 {
                    self.var_bump_activity(v);
                    self.seen[v.idx()] = true;
                    if self.level(v) >= self.decision_level() {
                        path_c += 1;
                    } else {
                        out_learnt.push(q);
                    }
                }
            }

            // next literal on the trail that is part of the conflict
            loop {
                index -= 1;
                if self.seen[self.trail[index].var().idx()] {
                    break;
                }
            }
            p = self.trail[index];
            conflict = self.reason(p.var());
            self.seen[p.var().idx()] = false;
            path_c -= 1;
            if path_c == 0 {
                break;
            }
        }
        out_learnt[0] = !p;

        self.analyze_toclear.clear();
        self.analyze_toclear.extend_from_slice(out_learnt);
        self.stats.max_literals += out_learnt.len();
        if self.params.ccmin {
            let levels = out_learnt[1..]
                .iter()
                .fold(0u32, |acc, l| acc | self.abstract_level(l.var()));
            let mut j = 1;
            for i in 1..out_learnt.len() {
                let l = out_learnt[i];
                if self.reason(l.var()) == CREF_NONE || !self.lit_redundant(l, levels) {
                    out_learnt[j] = l;
                    j += 1;
                }
            }
            out_learnt.truncate(j);
        }
        self.stats.tot_literals += out_learnt.len();

        let out_level = if out_learnt.len() == 1 {
            0
        } else {
            let mut max_i = 1;
            for i in 2..out_learnt.len() {
                if self.level(out_learnt[i].var()) > self.level(out_learnt[max_i].var()) {
                    max_i = i;
                }
            }
            out_learnt.swap(1, max_i);
            self.level(out_learnt[1].var())
        };

        for l in self.analyze_toclear.iter() {
            self.seen[l.var().idx()] = false;
        }
        out_level
    }

    /// Check whether `p` is implied by the other literals of the learnt
    /// clause, so that it can be left out.
    fn lit_redundant(&mut self, p: Lit, abstract_levels: u32) -> bool {
        self.analyze_stack.clear();
        self.analyze_stack.push(p);
        let top = self.analyze_toclear.len();

        while let Some(q) = self.analyze_stack.pop() {
            let reason = self.reason(q.var());
            debug_assert!(reason != CREF_NONE);
            for k in 1..self.clause_database.size(reason) {
                let l = self.clause_database.lit(reason, k);
                let v = l.var();
                if self.seen[v.idx()] || self.level(v) == 0 {
                    continue;
                }
                if self.reason(v) != CREF_NONE && (self.abstract_level(v) & abstract_levels) != 0 {
                    self.seen[v.idx()] = true;
                    self.analyze_stack.push(l);
                    self.analyze_toclear.push(l);
                } else {
                    for l in self.analyze_toclear.drain(top..) {
                        self.seen[l.var().idx()] = false;
                    }
                    return false;
                }
            }
        }
        true
    }

    /// Express the final conflict in terms of assumptions.
    fn analyze_final(&mut self, p: Lit) {
        self.conflict.clear();
        self.conflict.push(p);
        if self.decision_level() == 0 {
            return;
        }

        self.seen[p.var().idx()] = true;
        for i in (self.trail_lim[0]..self.trail.len()).rev() {
            let x = self.trail[i].var();
            if !self.seen[x.idx()] {
                continue;
            }
            let reason = self.reason(x);
            if reason == CREF_NONE {
                debug_assert!(self.level(x) > 0);
                self.conflict.push(!self.trail[i]);
            } else {
                for k in 1..self.clause_database.size(reason) {
                    let l = self.clause_database.lit(reason, k);
                    if self.level(l.var()) > 0 {
                        self.seen[l.var().idx()] = true;
                    }
                }
            }
            self.seen[x.idx()] = false;
        }
        self.seen[p.var().idx()] = false;
    }

    fn reduce_db(&mut self) {
        profile!("reduce_db");
        let extra_lim = self.cla_inc / self.learnts.len() as f64;
        let db = &self.clause_database;
        // binary clauses last, the rest by increasing activity
        self.learnts.sort_by(|&x, &y| {
            (db.size(x) <= 2)
                .cmp(&(db.size(y) <= 2))
                .then_with(|| db.activity(x).total_cmp(&db.activity(y)))
        });

        let learnts = std::mem::take(&mut self.learnts);
        let half = learnts.len() / 2;
        let mut kept = Vec::with_capacity(learnts.len());
        for (i, cref) in learnts.into_iter().enumerate() {
            if self.clause_database.size(cref) > 2
                && !self.is_locked(cref)
                && (i < half || (self.clause_database.activity(cref) as f64) < extra_lim)
            {
                self.remove_clause(cref);
            } else {
                kept.push(cref);
            }
        }
        trace!("reduce_db kept {} learnt clauses", kept.len());
        self.learnts = kept;
        self.check_garbage();
    }

    fn remove_satisfied(&mut self, clauses: Vec<CRef>) -> Vec<CRef> {
        let mut kept = Vec::with_capacity(clauses.len());
        for cref in clauses {
            if self.is_satisfied(cref) {
                self.remove_clause(cref);
            } else {
                kept.push(cref);
            }
        }
        kept
    }

    fn check_garbage(&mut self) {
        if (self.clause_database.wasted() as f64)
            > (self.clause_database.len() as f64) * self.params.garbage_frac
        {
            self.garbage_collect();
        }
    }

    fn garbage_collect(&mut self) {
        let mut to =
            ClauseDatabase::with_capacity(self.clause_database.len() - self.clause_database.wasted());
        self.reloc_all_clauses(&mut to);
        debug!(
            "garbage collection: {} -> {} words",
            self.clause_database.len(),
            to.len()
        );
        self.clause_database = to;
    }

    fn reloc_all_clauses(&mut self, to: &mut ClauseDatabase) {
        let db = &mut self.clause_database;

        for ws in self.watches.iter_mut() {
            for w in ws.iter_mut() {
                w.cref = db.relocate(w.cref, to);
            }
        }

        for lit in self.trail.iter() {
            let data = &mut self.vardata[lit.var().idx()];
            if data.reason == CREF_NONE {
                continue;
            }
            data.reason = if db.is_deleted(data.reason) {
                CREF_NONE
            } else {
                db.relocate(data.reason, to)
            };
        }

        for cref in self.learnts.iter_mut() {
            *cref = db.relocate(*cref, to);
        }
        for cref in self.clauses.iter_mut() {
            *cref = db.relocate(*cref, to);
        }
    }

    fn rebuild_order_heap(&mut self) {
        let assigns = &self.assigns;
        let vars = (0..self.next_var)
            .map(Var)
            .filter(|v| assigns[v.idx()] == LBool::Undef)
            .collect::<Vec<_>>();
        self.order_heap.build(vars, &self.activity);
        trace!("order heap rebuilt with {} variables", self.order_heap.len());
    }

    /// Top-level simplification: propagate and remove satisfied clauses.
    /// Returns false if the clause database is contradictory.
    pub fn simplify(&mut self) -> bool {
        profile!("simplify");
        assert!(self.trail_lim.is_empty());
        if !self.ok || self.propagate() != CREF_NONE {
            self.ok = false;
            return false;
        }

        if self.simp_db_assigns == Some(self.trail.len()) || self.simp_db_props > 0 {
            return true;
        }

        debug!(
            "simplify with {} top-level assignments, {} clauses, {} learnts",
            self.trail.len(),
            self.clauses.len(),
            self.learnts.len()
        );
        let learnts = std::mem::take(&mut self.learnts);
        self.learnts = self.remove_satisfied(learnts);
        if self.params.remove_satisfied {
            let clauses = std::mem::take(&mut self.clauses);
            self.clauses = self.remove_satisfied(clauses);
        }
        self.check_garbage();
        self.rebuild_order_heap();

        self.simp_db_assigns = Some(self.trail.len());
        self.simp_db_props = (self.stats.clauses_literals + self.stats.learnts_literals) as i64;
        true
    }

    fn search(&mut self, nof_conflicts: u64) -> LBool {
        profile!("search");
        debug!("-> SEARCH(nof_conflicts={})", nof_conflicts);
        debug_assert!(self.ok);
        let mut conflict_c = 0;
        let mut learnt_clause = Vec::new();
        self.stats.starts += 1;

        loop {
            let conflict = self.propagate();
            if conflict != CREF_NONE {
                self.stats.conflicts += 1;
                conflict_c += 1;
                if self.decision_level() == 0 {
                    return LBool::False;
                }

                learnt_clause.clear();
                let backtrack_level = self.analyze(conflict, &mut learnt_clause);
                trace!("learnt {:?}, backtrack to {}", learnt_clause, backtrack_level);
                self.cancel_until(backtrack_level);
                if learnt_clause.len() == 1 {
                    self.unchecked_enqueue(learnt_clause[0], CREF_NONE);
                } else {
                    let cref = self.clause_database.alloc(&learnt_clause, true);
                    self.learnts.push(cref);
                    self.attach_clause(cref);
                    self.clause_bump_activity(cref);
                    self.unchecked_enqueue(learnt_clause[0], cref);
                }

                self.var_inc *= 1.0 / self.params.var_decay;
                self.cla_inc *= 1.0 / self.params.clause_decay;

                self.learntsize_adjust_cnt -= 1;
                if self.learntsize_adjust_cnt == 0 {
                    self.learntsize_adjust_confl *= self.params.learntsize_adjust_inc;
                    self.learntsize_adjust_cnt = self.learntsize_adjust_confl as i64;
                    self.max_learnts *= self.params.learntsize_inc;

                    if self.params.verbosity >= 1 {
                        let free_vars = self.num_vars()
                            - self.trail_lim.first().copied().unwrap_or(self.trail.len());
                        info!(
                            " > cfl{:>9} | vars {:>6} clauses {:>7} lits {:>6}",
                            self.stats.conflicts,
                            free_vars,
                            self.clauses.len(),
                            self.stats.clauses_literals,
                        );
                        info!(
                            " -> learnt lim {:>8} clauses {:>8} lit/cl {:>8}",
                            self.max_learnts as usize,
                            self.learnts.len(),
                            self.stats.learnts_literals / self.learnts.len().max(1)
                        );
                    }
                }
            } else {
                if conflict_c >= nof_conflicts {
                    trace!("restart");
                    self.cancel_until(0);
                    return LBool::Undef;
                }

                if self.decision_level() == 0 && !self.simplify() {
                    return LBool::False;
                }

                if self.learnts.len() as f64 - self.trail.len() as f64 >= self.max_learnts {
                    self.reduce_db();
                }

                let mut next = LIT_UNDEF;
                while (self.decision_level() as usize) < self.assumptions.len() {
                    let p = self.assumptions[self.decision_level() as usize];
                    match self.lit_value(p) {
                        // already satisfied: dummy decision level
                        LBool::True => self.new_decision_level(),
                        LBool::False => {
                            self.analyze_final(!p);
                            return LBool::False;
                        }
                        LBool::Undef => {
                            next = p;
                            break;
                        }
                    }
                }

                if next == LIT_UNDEF {
                    self.stats.decisions += 1;
                    next = self.pick_branch_lit();
                    if next == LIT_UNDEF {
                        // model found
                        return LBool::True;
                    }
                }

                trace!("decision: {:?}", next);
                self.new_decision_level();
                self.unchecked_enqueue(next, CREF_NONE);
            }
        }
    }

    /// Search for a model of the permanent clauses extended with the
    /// given assumptions.
    pub fn solve(&mut self, assumptions: &[Lit]) -> LBool {
        profile!("solve");
        debug!("-> SOLVE ({} assumptions)", assumptions.len());
        let solve_start = cpu_time::ProcessTime::now();
        self.model.clear();
        self.conflict.clear();
        if !self.ok {
            debug!("<- SOLVE: already unsat");
            return LBool::False;
        }

        self.assumptions.clear();
        self.assumptions.extend_from_slice(assumptions);
        self.stats.solves += 1;

        self.max_learnts = (self.clauses.len() as f64 * self.params.learntsize_factor)
            .max(self.params.min_learnts_lim as f64);
        self.learntsize_adjust_confl = self.params.learntsize_adjust_start_confl as f64;
        self.learntsize_adjust_cnt = self.learntsize_adjust_confl as i64;

        if self.params.verbosity >= 1 {
            info!("* search statistics");
        }

        let mut status = LBool::Undef;
        let mut curr_restarts = 0;
        while status == LBool::Undef {
            let rest_base = if self.params.luby_restart {
                luby(self.params.restart_inc, curr_restarts)
            } else {
                self.params.restart_inc.powi(curr_restarts as i32)
            };
            status = self.search((rest_base * self.params.restart_first as f64) as u64);
            curr_restarts += 1;
        }

        match status {
            LBool::True => self.model = self.assigns.clone(),
            LBool::False if self.conflict.is_empty() => self.ok = false,
            _ => {}
        }

        self.cancel_until(0);
        self.assumptions.clear();

        if self.params.verbosity >= 1 {
            info!(
                "* solve finished (vars={}, clauses={}, learnts={})",
                self.num_vars(),
                self.num_clauses(),
                self.num_learnts()
            );
        }
        if self.params.verbosity >= 2 {
            self.stats.log_summary(solve_start);
        }
        debug!("<- SOLVE {:?}", status);
        status
    }
}

/// Element `x` of the Luby restart sequence scaled by `y`.
fn luby(y: f64, mut x: u32) -> f64 {
    let mut size = 1u32;
    let mut seq = 0i32;
    while size < x + 1 {
        seq += 1;
        size = 2 * size + 1;
    }
    while size - 1 != x {
        size = (size - 1) >> 1;
        seq -= 1;
        x %= size;
    }
    y.powi(seq)
}

impl SearchEngine for Solver {
    fn new_var(&mut self) -> VarIndex {
        Solver::new_var(self).0 as VarIndex
    }

    fn add_clause(&mut self, lits: &[LitCode]) -> bool {
        Solver::add_clause(self, lits.iter().map(|&code| Lit(code)))
    }

    fn solve(&mut self, assumptions: &[LitCode]) -> bool {
        let assumptions = assumptions.iter().map(|&code| Lit(code)).collect::<Vec<_>>();
        Solver::solve(self, &assumptions) == LBool::True
    }

    fn simplify(&mut self) -> bool {
        Solver::simplify(self)
    }

    fn value(&self, var: VarIndex) -> Option<bool> {
        self.model.get(var as usize).and_then(|v| v.as_bool())
    }

    fn num_vars(&self) -> usize {
        Solver::num_vars(self)
    }
}
