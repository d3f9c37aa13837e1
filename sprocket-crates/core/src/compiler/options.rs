/// Options which influence how a problem is compiled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CompileOptions {
    /// The upper bound of every time variable. If `None`, a bound is derived from the problem
    /// with [`topology::horizon`](crate::topology::horizon).
    pub horizon: Option<i32>,
}

impl CompileOptions {
    pub fn with_horizon(horizon: i32) -> CompileOptions {
        CompileOptions {
            horizon: Some(horizon),
        }
    }
}
