use crate::lits::Var;

/// Binary max-heap of decision variables ordered by activity. The activity
/// vector lives in the solver and is passed in on every operation.
#[derive(Default)]
pub struct OrderHeap {
    heap: Vec<Var>,
    indices: Vec<Option<usize>>,
}

impl OrderHeap {
    fn left(i: usize) -> usize {
        i * 2 + 1
    }
    fn right(i: usize) -> usize {
        (i + 1) * 2
    }
    fn parent(i: usize) -> usize {
        (i - 1) >> 1
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn contains(&self, var: Var) -> bool {
        var.idx() < self.indices.len() && self.indices[var.idx()].is_some()
    }

    fn percolate_up(&mut self, mut i: usize, act: &[f64]) {
        let var = self.heap[i];
        while i != 0 {
            let p = Self::parent(i);
            if !(act[var.idx()] > act[self.heap[p].idx()]) {
                break;
            }
            self.heap[i] = self.heap[p];
            self.indices[self.heap[i].idx()] = Some(i);
            i = p;
        }
        self.heap[i] = var;
        self.indices[var.idx()] = Some(i);
    }

    fn percolate_down(&mut self, mut i: usize, act: &[f64]) {
        let var = self.heap[i];
        while Self::left(i) < self.heap.len() {
            let (l, r) = (Self::left(i), Self::right(i));
            let child = if r < self.heap.len() && act[self.heap[r].idx()] > act[self.heap[l].idx()] {
                r
            } else {
                l
            };
            if !(act[self.heap[child].idx()] > act[var.idx()]) {
                break;
            }
            self.heap[i] = self.heap[child];
            self.indices[self.heap[i].idx()] = Some(i);
            i = child;
        }
        self.heap[i] = var;
        self.indices[var.idx()] = Some(i);
    }

    pub fn insert(&mut self, var: Var, act: &[f64]) {
        if self.indices.len() <= var.idx() {
            self.indices.resize(var.idx() + 1, None);
        }
        debug_assert!(!self.contains(var));
        self.indices[var.idx()] = Some(self.heap.len());
        self.heap.push(var);
        self.percolate_up(self.heap.len() - 1, act);
    }

    /// Restore the heap property after the activity of `var` went up.
    pub fn increased(&mut self, var: Var, act: &[f64]) {
        if let Some(i) = self.indices.get(var.idx()).copied().flatten() {
            self.percolate_up(i, act);
        }
    }

    pub fn remove_max(&mut self, act: &[f64]) -> Option<Var> {
        let last = self.heap.pop()?;
        if self.heap.is_empty() {
            self.indices[last.idx()] = None;
            return Some(last);
        }
        let top = std::mem::replace(&mut self.heap[0], last);
        self.indices[top.idx()] = None;
        self.indices[last.idx()] = Some(0);
        if self.heap.len() > 1 {
            self.percolate_down(0, act);
        }
        Some(top)
    }

    /// Replace the contents of the heap with `vars`.
    pub fn build(&mut self, vars: impl IntoIterator<Item = Var>, act: &[f64]) {
        for v in self.heap.drain(..) {
            self.indices[v.idx()] = None;
        }
        for v in vars {
            if self.indices.len() <= v.idx() {
                self.indices.resize(v.idx() + 1, None);
            }
            self.indices[v.idx()] = Some(self.heap.len());
            self.heap.push(v);
        }
        for i in (0..self.heap.len() / 2).rev() {
            self.percolate_down(i, act);
        }
    }
}
