//! Phase offsets that split the fine grid into interleaved sub-grids.

/// Per-depth phase of one worker: whether its `L2` and `L1` indices start at
/// the odd fine-grid point (shifted by one `step`) instead of the even one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Phase {
    pub l2_shift: bool,
    pub l1_shift: bool,
}

impl Phase {
    pub const ALL: [Phase; 4] = [
        Phase {
            l2_shift: false,
            l1_shift: false,
        },
        Phase {
            l2_shift: true,
            l1_shift: false,
        },
        Phase {
            l2_shift: false,
            l1_shift: true,
        },
        Phase {
            l2_shift: true,
            l1_shift: true,
        },
    ];
}

/// Every phase tuple for `depths` sweep depths (`4^depths` tuples, entry `d`
/// of a tuple belongs to depth `d + 1`).
pub fn phase_tuples(depths: usize) -> Vec<Vec<Phase>> {
    let mut tuples = vec![Vec::with_capacity(depths)];
    for _ in 0..depths {
        tuples = tuples
            .into_iter()
            .flat_map(|prefix| {
                Phase::ALL.into_iter().map(move |ph| {
                    let mut t = prefix.clone();
                    t.push(ph);
                    t
                })
            })
            .collect();
    }
    tuples
}
