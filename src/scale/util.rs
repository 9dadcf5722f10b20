use num_traits::Float;

/// Return `(min, max)` for two owned values.
pub fn sorted_pair<T: PartialOrd>(a: T, b: T) -> (T, T) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Tolerance for floating-point comparisons against a tick step.
pub fn epsilon_from_step<T: Float>(step: &T) -> T {
    let ten = T::from(10.0).unwrap();
    *step / ten
}
