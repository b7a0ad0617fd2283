use crate::lits::Lit;
use bitfield::bitfield;

bitfield! {
    pub struct ClauseHeader(u32);
    impl Debug;
    pub deleted, set_deleted :0;
    pub learnt, set_learnt :1;
    pub reloced, set_reloced :2;
    pub size, set_size :31, 3;
}

/// Offset of a clause header in the clause arena.
pub type CRef = u32;
pub const CREF_NONE: CRef = u32::MAX;

/// Flat clause arena. Each clause is laid out as
/// `[header, lit_0, .., lit_n-1, (activity if learnt)]`.
#[derive(Default)]
pub struct ClauseDatabase {
    data: Vec<u32>,
    wasted: usize,
}

impl ClauseDatabase {
    pub fn with_capacity(words: usize) -> Self {
        ClauseDatabase {
            data: Vec::with_capacity(words),
            wasted: 0,
        }
    }

    /// Number of words in use, including freed clauses.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn wasted(&self) -> usize {
        self.wasted
    }

    fn header(&self, cref: CRef) -> ClauseHeader {
        ClauseHeader(self.data[cref as usize])
    }

    fn set_header(&mut self, cref: CRef, header: ClauseHeader) {
        self.data[cref as usize] = header.0;
    }

    pub fn alloc(&mut self, lits: &[Lit], learnt: bool) -> CRef {
        debug_assert!(lits.len() > 1);
        let cref = self.data.len() as CRef;
        let mut header = ClauseHeader(0);
        header.set_size(lits.len() as u32);
        header.set_learnt(learnt);
        self.data.push(header.0);
        self.data.extend(lits.iter().map(|l| l.0 as u32));
        if learnt {
            self.data.push(0.0f32.to_bits());
        }
        cref
    }

    pub fn size(&self, cref: CRef) -> usize {
        self.header(cref).size() as usize
    }

    pub fn is_learnt(&self, cref: CRef) -> bool {
        self.header(cref).learnt()
    }

    pub fn is_deleted(&self, cref: CRef) -> bool {
        self.header(cref).deleted()
    }

    pub fn lit(&self, cref: CRef, k: usize) -> Lit {
        Lit(self.data[cref as usize + 1 + k] as i32)
    }

    pub fn set_lit(&mut self, cref: CRef, k: usize, lit: Lit) {
        self.data[cref as usize + 1 + k] = lit.0 as u32;
    }

    pub fn swap_lits(&mut self, cref: CRef, a: usize, b: usize) {
        let base = cref as usize + 1;
        self.data.swap(base + a, base + b);
    }

    pub fn lits(&self, cref: CRef) -> impl Iterator<Item = Lit> + '_ {
        let start = cref as usize + 1;
        self.data[start..start + self.size(cref)]
            .iter()
            .map(|w| Lit(*w as i32))
    }

    fn activity_addr(&self, cref: CRef) -> usize {
        let header = self.header(cref);
        assert!(header.learnt());
        cref as usize + 1 + header.size() as usize
    }

    pub fn activity(&self, cref: CRef) -> f32 {
        f32::from_bits(self.data[self.activity_addr(cref)])
    }

    pub fn set_activity(&mut self, cref: CRef, activity: f32) {
        let addr = self.activity_addr(cref);
        self.data[addr] = activity.to_bits();
    }

    pub fn free(&mut self, cref: CRef) {
        let mut header = self.header(cref);
        debug_assert!(!header.deleted());
        header.set_deleted(true);
        self.wasted += 1 + header.size() as usize + header.learnt() as usize;
        self.set_header(cref, header);
    }

    /// Copy a live clause into `to`, leaving a forwarding address behind so
    /// that every reference to it relocates to the same place.
    pub fn relocate(&mut self, cref: CRef, to: &mut ClauseDatabase) -> CRef {
        let mut header = self.header(cref);
        debug_assert!(!header.deleted());
        if header.reloced() {
            return self.data[cref as usize + 1];
        }

        let words = 1 + header.size() as usize + header.learnt() as usize;
        let new_cref = to.data.len() as CRef;
        to.data
            .extend_from_slice(&self.data[cref as usize..cref as usize + words]);

        header.set_reloced(true);
        self.set_header(cref, header);
        self.data[cref as usize + 1] = new_cref;
        new_cref
    }
}
