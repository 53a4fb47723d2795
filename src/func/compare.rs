/// Pick `a` when `cond` holds, otherwise `b`
///
/// Both branches are evaluated by the caller; use `if` for lazy branches.
pub fn ternary<T>(cond: bool, a: T, b: T) -> T {
    if cond { a } else { b }
}
