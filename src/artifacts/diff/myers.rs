use derive_new::new;

/// One step of an edit script over line sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit<'a> {
    Delete { line: &'a str },
    Insert { line: &'a str },
    Equal { line: &'a str },
}

impl<'a> Edit<'a> {
    pub fn line(&self) -> &'a str {
        match self {
            Edit::Delete { line } | Edit::Insert { line } | Edit::Equal { line } => line,
        }
    }

    /// Whether this step changes content (core diff) rather than keeping it.
    pub fn is_change(&self) -> bool {
        !matches!(self, Edit::Equal { .. })
    }

    /// True when this step consumes a line of the left sequence.
    pub fn consumes_left(&self) -> bool {
        matches!(self, Edit::Delete { .. } | Edit::Equal { .. })
    }

    /// True when this step consumes a line of the right sequence.
    pub fn consumes_right(&self) -> bool {
        matches!(self, Edit::Insert { .. } | Edit::Equal { .. })
    }
}

/// Myers' O((N+M)D) greedy shortest-edit diff over two line sequences.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct MyersDiff<'d> {
    a: &'d [&'d str],
    b: &'d [&'d str],
}

impl<'d> MyersDiff<'d> {
    /// Compute the full edit script, covering every line of both inputs.
    pub fn edit_script(&self) -> Vec<Edit<'d>> {
        if self.a.is_empty() && self.b.is_empty() {
            return Vec::new();
        }

        let mut script = Vec::new();

        for (prev_x, prev_y, x, y) in self.backtrack() {
            if x == prev_x {
                // only y advanced: insertion from b
                if prev_y < self.b.len() as isize {
                    script.push(Edit::Insert {
                        line: self.b[prev_y as usize],
                    });
                }
            } else if y == prev_y {
                // only x advanced: deletion from a
                if prev_x < self.a.len() as isize {
                    script.push(Edit::Delete {
                        line: self.a[prev_x as usize],
                    });
                }
            } else if prev_x < self.a.len() as isize {
                // diagonal move: both sides keep the line
                script.push(Edit::Equal {
                    line: self.a[prev_x as usize],
                });
            }
        }

        script.reverse();
        script
    }

    fn shortest_edit_trace(&self) -> Vec<Vec<isize>> {
        let (n, m) = (self.a.len() as isize, self.b.len() as isize);
        let offset = (n + m) as usize;

        let mut v = vec![0isize; 2 * offset + 1];
        let mut trace = Vec::new();

        for d in 0..=(n + m) {
            trace.push(v.clone());

            for k in (-d..=d).step_by(2) {
                let idx = (offset as isize + k) as usize;

                let mut x = if k == -d {
                    // we could have only come from k+1, thus an insertion
                    v[idx + 1]
                } else if k == d {
                    // we could have only come from k-1, thus a deletion
                    v[idx - 1] + 1
                } else {
                    let x_del = v[idx - 1] + 1;
                    let x_ins = v[idx + 1];
                    if x_del > x_ins { x_del } else { x_ins }
                };

                let mut y = x - k;
                while x < n && y < m && self.a[x as usize] == self.b[y as usize] {
                    // snake
                    x += 1;
                    y += 1;
                }

                v[idx] = x;

                if x >= n && y >= m {
                    return trace;
                }
            }
        }

        trace
    }

    fn backtrack(&self) -> Vec<(isize, isize, isize, isize)> {
        let (mut x, mut y) = (self.a.len() as isize, self.b.len() as isize);
        let offset = (x + y) as usize;
        let mut edit_path = Vec::new();

        let trace = self.shortest_edit_trace();

        for (d, v) in trace.iter().enumerate().rev() {
            let k = x - y;

            let prev_k = if k == -(d as isize) {
                k + 1
            } else if k == (d as isize) {
                k - 1
            } else {
                let k_del = k - 1;
                let k_ins = k + 1;
                if v[(offset as isize + k_del) as usize] + 1 > v[(offset as isize + k_ins) as usize]
                {
                    k_del
                } else {
                    k_ins
                }
            };

            let prev_x = v[(offset as isize + prev_k) as usize];
            let prev_y = prev_x - prev_k;

            while x > prev_x && y > prev_y {
                edit_path.push((x - 1, y - 1, x, y));
                x -= 1;
                y -= 1;
            }

            if d > 0 {
                edit_path.push((prev_x, prev_y, x, y));
            }

            (x, y) = (prev_x, prev_y);
        }

        edit_path
    }
}
